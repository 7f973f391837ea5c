//! Built-in ATT&CK catalog and mock threat feed.
//!
//! The dashboard's data-source collaborator made concrete: a static
//! six-tactic slice of the ATT&CK matrix expressed as const tables and
//! assembled into the [`Tactic`] forest, plus a seeded generator that
//! fabricates a plausible threat collection over it for demos and tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use matrix::{Subtechnique, Tactic, Technique, Threat, SEVERITIES, STATUSES};

// ---------------------------------------------------------------------------
// Catalog tables
// ---------------------------------------------------------------------------

/// `(tactic_id, name, description)`
const TACTICS: &[(&str, &str, &str)] = &[
    (
        "TA0001",
        "Initial Access",
        "The adversary is trying to get into your network.",
    ),
    (
        "TA0002",
        "Execution",
        "The adversary is trying to run malicious code.",
    ),
    (
        "TA0003",
        "Persistence",
        "The adversary is trying to maintain their foothold.",
    ),
    (
        "TA0004",
        "Privilege Escalation",
        "The adversary is trying to gain higher-level permissions.",
    ),
    (
        "TA0005",
        "Defense Evasion",
        "The adversary is trying to avoid being detected.",
    ),
    (
        "TA0006",
        "Credential Access",
        "The adversary is trying to steal account names and passwords.",
    ),
];

/// `(tactic_id, technique_id, name, description)`
const TECHNIQUES: &[(&str, &str, &str, &str)] = &[
    (
        "TA0001",
        "T1189",
        "Drive-by Compromise",
        "Adversaries may gain access to a system through a user visiting a website over the normal course of browsing.",
    ),
    (
        "TA0001",
        "T1190",
        "Exploit Public-Facing Application",
        "Adversaries may attempt to take advantage of a weakness in an Internet-facing computer or program using software, data, or commands.",
    ),
    (
        "TA0001",
        "T1566",
        "Phishing",
        "Phishing is a technique used by adversaries to gain access by sending deceptive messages.",
    ),
    (
        "TA0002",
        "T1059",
        "Command and Scripting Interpreter",
        "Adversaries may abuse command and script interpreters to execute commands, scripts, or binaries.",
    ),
    (
        "TA0002",
        "T1203",
        "Exploitation for Client Execution",
        "Adversaries may exploit software vulnerabilities in client applications to execute code.",
    ),
    (
        "TA0003",
        "T1547",
        "Boot or Logon Autostart Execution",
        "Adversaries may configure system settings to automatically execute a program during system boot or logon.",
    ),
    (
        "TA0003",
        "T1554",
        "Compromise Client Software Binary",
        "Adversaries may modify client software binaries to establish persistence.",
    ),
    (
        "TA0004",
        "T1548",
        "Abuse Elevation Control Mechanism",
        "Adversaries may abuse elevation control mechanisms to gain higher-level permissions.",
    ),
    (
        "TA0004",
        "T1134",
        "Access Token Manipulation",
        "Adversaries may modify access tokens to operate under a different user or system security context.",
    ),
    (
        "TA0005",
        "T1070",
        "Indicator Removal on Host",
        "Adversaries may delete or modify artifacts generated on a host system to hide their presence.",
    ),
    (
        "TA0005",
        "T1027",
        "Obfuscated Files or Information",
        "Adversaries may attempt to make an executable or file difficult to discover or analyze.",
    ),
    (
        "TA0006",
        "T1110",
        "Brute Force",
        "Adversaries may use brute force techniques to gain access to accounts.",
    ),
    (
        "TA0006",
        "T1555",
        "Credentials from Password Stores",
        "Adversaries may search for common password storage locations to obtain credentials.",
    ),
];

/// `(parent_technique_id, subtechnique_id, name, description)`
const SUBTECHNIQUES: &[(&str, &str, &str, &str)] = &[
    (
        "T1566",
        "T1566.001",
        "Spearphishing Attachment",
        "Adversaries may send spearphishing emails with a malicious attachment in an attempt to gain access to victim systems.",
    ),
    (
        "T1566",
        "T1566.002",
        "Spearphishing Link",
        "Adversaries may send spearphishing emails with a malicious link in an attempt to gain access to victim systems.",
    ),
    (
        "T1059",
        "T1059.001",
        "PowerShell",
        "Adversaries may abuse PowerShell commands and scripts for execution.",
    ),
    (
        "T1059",
        "T1059.003",
        "Windows Command Shell",
        "Adversaries may abuse the Windows command shell for execution.",
    ),
    (
        "T1547",
        "T1547.001",
        "Registry Run Keys / Startup Folder",
        "Adversaries may achieve persistence by adding a program to a startup folder or referencing it with a Registry run key.",
    ),
    (
        "T1547",
        "T1547.004",
        "Winlogon Helper DLL",
        "Adversaries may abuse Winlogon to execute malicious DLLs and/or executables.",
    ),
    (
        "T1548",
        "T1548.001",
        "Setuid and Setgid",
        "Adversaries may perform privilege escalation using setuid and setgid binaries.",
    ),
    (
        "T1548",
        "T1548.002",
        "Bypass User Account Control",
        "Adversaries may bypass UAC mechanisms to elevate process privileges.",
    ),
    (
        "T1134",
        "T1134.001",
        "Token Impersonation/Theft",
        "Adversaries may create a new access token to impersonate another user or system account.",
    ),
    (
        "T1070",
        "T1070.001",
        "Clear Windows Event Logs",
        "Adversaries may clear Windows Event Logs to hide their tracks.",
    ),
    (
        "T1070",
        "T1070.003",
        "Clear Command History",
        "Adversaries may clear command history to conceal the commands they ran.",
    ),
    (
        "T1027",
        "T1027.001",
        "Binary Padding",
        "Adversaries may use binary padding to add junk data and change the on-disk representation of malware.",
    ),
    (
        "T1110",
        "T1110.001",
        "Password Guessing",
        "Adversaries may use password guessing to access accounts.",
    ),
    (
        "T1110",
        "T1110.002",
        "Password Cracking",
        "Adversaries may use password cracking techniques to access accounts.",
    ),
    (
        "T1555",
        "T1555.001",
        "Keychain",
        "Adversaries may collect passwords from Keychain.",
    ),
];

/// Assemble the const tables into the tactic forest the engine consumes.
/// The result satisfies the hierarchy invariants by construction; the
/// catalog tests index it to prove that.
pub fn builtin_tactics() -> Vec<Tactic> {
    TACTICS
        .iter()
        .map(|&(tactic_id, tactic_name, tactic_desc)| Tactic {
            id: tactic_id.to_owned(),
            name: tactic_name.to_owned(),
            description: tactic_desc.to_owned(),
            techniques: TECHNIQUES
                .iter()
                .filter(|&&(owner, _, _, _)| owner == tactic_id)
                .map(|&(_, technique_id, name, description)| Technique {
                    id: technique_id.to_owned(),
                    name: name.to_owned(),
                    description: description.to_owned(),
                    tactic_id: tactic_id.to_owned(),
                    subtechniques: SUBTECHNIQUES
                        .iter()
                        .filter(|&&(parent, _, _, _)| parent == technique_id)
                        .map(|&(_, sub_id, sub_name, sub_desc)| Subtechnique {
                            id: sub_id.to_owned(),
                            name: sub_name.to_owned(),
                            description: sub_desc.to_owned(),
                            parent_technique_id: technique_id.to_owned(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Mock threat feed
// ---------------------------------------------------------------------------

const THREAT_WINDOW_DAYS: i64 = 30;

/// Fabricate a threat collection over the given forest: each technique has
/// a 40% chance of carrying 1-3 threats, each subtechnique a 30% chance of
/// 1-2, timestamps spread over the last 30 days before `now`. The same
/// seed always yields the same collection.
pub fn generate_threats(tactics: &[Tactic], seed: u64, now: i64) -> Vec<Threat> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut threats = Vec::new();

    let mut emit = |rng: &mut StdRng, threats: &mut Vec<Threat>, target_id: &str, name: &str| {
        let days = rng.gen_range(0..THREAT_WINDOW_DAYS);
        let hours = rng.gen_range(0..24i64);
        let minutes = rng.gen_range(0..60i64);
        threats.push(Threat {
            id: format!("threat-{}", threats.len() + 1),
            technique_id: target_id.to_owned(),
            ts_unix: now - (days * 86_400 + hours * 3_600 + minutes * 60),
            severity: SEVERITIES[rng.gen_range(0..SEVERITIES.len())],
            status: STATUSES[rng.gen_range(0..STATUSES.len())],
            description: format!("Detected {} activity", name),
            details: None,
        });
    };

    for tactic in tactics {
        for technique in &tactic.techniques {
            if rng.gen::<f64>() < 0.4 {
                for _ in 0..rng.gen_range(1..=3) {
                    emit(&mut rng, &mut threats, &technique.id, &technique.name);
                }
            }
            for subtechnique in &technique.subtechniques {
                if rng.gen::<f64>() < 0.3 {
                    for _ in 0..rng.gen_range(1..=2) {
                        emit(&mut rng, &mut threats, &subtechnique.id, &subtechnique.name);
                    }
                }
            }
        }
    }

    threats
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix::{HierarchyIndex, ResolvedLevel, ThreatCounts};

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn builtin_catalog_indexes_cleanly() {
        let tactics = builtin_tactics();
        assert_eq!(tactics.len(), 6);
        let idx = HierarchyIndex::build(&tactics).unwrap();
        // 6 tactics + 13 techniques + 15 subtechniques, all unique.
        assert_eq!(idx.len(), 34);
    }

    #[test]
    fn catalog_back_references_are_consistent() {
        for tactic in builtin_tactics() {
            for technique in &tactic.techniques {
                assert_eq!(technique.tactic_id, tactic.id);
                for sub in &technique.subtechniques {
                    assert_eq!(sub.parent_technique_id, technique.id);
                }
            }
        }
    }

    #[test]
    fn generator_is_deterministic_per_seed() {
        let tactics = builtin_tactics();
        let a = generate_threats(&tactics, 7, NOW);
        let b = generate_threats(&tactics, 7, NOW);
        let c = generate_threats(&tactics, 8, NOW);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn generated_threats_all_resolve_below_tactic_level() {
        let tactics = builtin_tactics();
        let idx = HierarchyIndex::build(&tactics).unwrap();
        let threats = generate_threats(&tactics, 42, NOW);
        for threat in &threats {
            let resolved = idx.resolve(&threat.technique_id).unwrap();
            assert_ne!(resolved.level, ResolvedLevel::Tactic);
        }
        let counts = ThreatCounts::tally(&threats, &idx);
        assert_eq!(counts.unresolved, 0);
        assert_eq!(counts.total() as usize, threats.len());
    }

    #[test]
    fn generated_timestamps_fall_inside_the_window() {
        let tactics = builtin_tactics();
        for threat in generate_threats(&tactics, 1, NOW) {
            let age = NOW - threat.ts_unix;
            assert!(age >= 0);
            assert!(age < (THREAT_WINDOW_DAYS + 2) * 86_400);
        }
    }
}
