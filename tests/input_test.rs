use quickcheck_macros::quickcheck;
use roadmap_optimizer::{RunConfig, RunError, parse_features};

#[test]
fn test_features_are_trimmed_and_blank_lines_dropped() {
    let raw = "  Dark Mode \n\n\tVoice Search\r\n   \nReferral Bonus";
    assert_eq!(
        parse_features(raw),
        vec!["Dark Mode", "Voice Search", "Referral Bonus"]
    );
}

#[test]
fn test_duplicates_are_kept_in_order() {
    let raw = "B\nA\nB";
    assert_eq!(parse_features(raw), vec!["B", "A", "B"]);
}

#[test]
fn test_empty_text_yields_no_features() {
    assert!(parse_features("").is_empty());
    assert!(parse_features("\n \n\t\n").is_empty());
}

#[quickcheck]
fn prop_every_non_blank_line_survives_in_order(lines: Vec<String>) -> bool {
    let lines: Vec<String> = lines
        .into_iter()
        .map(|l| l.replace('\n', " ").trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    let raw = lines
        .iter()
        .map(|l| format!("  {l}\t"))
        .collect::<Vec<_>>()
        .join("\n\n");

    let parsed = parse_features(&raw);
    parsed.len() == lines.len() && parsed == lines && parsed.iter().all(|f| !f.is_empty())
}

#[test]
fn test_blank_credential_is_a_blocking_error() {
    for key in ["", "   ", "\t\n"] {
        let cfg = RunConfig::new("Goal", key, "A");
        assert!(matches!(
            cfg.require_credential(),
            Err(RunError::MissingCredential)
        ));
    }
}

#[test]
fn test_credential_is_trimmed() {
    let cfg = RunConfig::new("Goal", "  abc123 ", "A");
    assert_eq!(cfg.require_credential().unwrap(), "abc123");
}

#[test]
fn test_debug_output_hides_the_credential() {
    let cfg = RunConfig::new("Goal", "super-secret-key", "A");
    let shown = format!("{cfg:?}");
    assert!(!shown.contains("super-secret-key"));
    assert!(shown.contains("<redacted>"));
}
