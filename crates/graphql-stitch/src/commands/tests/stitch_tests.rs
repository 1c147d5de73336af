use crate::commands::stitch::render_report;
use crate::commands::stitch::stitch_case_file;
use crate::commands::stitch::CaseOutcome;
use std::path::PathBuf;

fn renamed_field_case_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../libgraphql-stitch/src/test/stitch_snapshot_tests/fixtures/valid/renamed_field.json")
}

fn outcomes() -> Vec<CaseOutcome> {
    let file_path = renamed_field_case_path();
    vec![
        CaseOutcome {
            result: stitch_case_file(&file_path, None),
            file_path,
        },
        CaseOutcome {
            file_path: PathBuf::from("missing.json"),
            result: Err(anyhow::anyhow!("no such case")),
        },
    ]
}

#[test]
fn report_lists_every_case_and_counts_failures() {
    let outcomes = outcomes();
    assert!(outcomes[0].result.is_ok());

    let (report, num_failed) = render_report(&outcomes, false);

    assert_eq!(num_failed, 1);
    let lines = report.lines().collect::<Vec<_>>();
    assert!(lines[0].starts_with("✅ "));
    assert!(lines[0].contains("renamed_field.json"));
    assert!(report.contains("\"data\""));
    assert!(report.contains("❌ missing.json: no such case"));
    assert!(lines.last().unwrap().starts_with("Stitched 1 of 2 cases. Complexity: "));
}

#[test]
fn summary_only_report_omits_stitched_results() {
    let (report, num_failed) = render_report(&outcomes(), true);

    assert_eq!(num_failed, 1);
    assert!(!report.contains("\"data\""));
    assert_eq!(report.lines().count(), 3);
}
