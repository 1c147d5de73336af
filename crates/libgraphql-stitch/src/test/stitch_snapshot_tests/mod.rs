//! File-based stitching tests.
//!
//! Every `fixtures/valid/*.json` file is a [`StitchCase`] plus an `expected`
//! block describing the stitched tree; every `fixtures/invalid/*.json` file
//! is a case whose preparation or conversion must fail with an error
//! containing each of the `expected.error_contains` substrings.
//!
//! [`StitchCase`]: crate::stitch_case::StitchCase

mod stitch_snapshot_test_case;
mod test_runner;
mod utils;

pub use stitch_snapshot_test_case::ExpectedOutcome;
pub use stitch_snapshot_test_case::StitchSnapshotTestCase;

#[cfg(test)]
mod tests {
    use crate::test::stitch_snapshot_tests::test_runner;
    use crate::test::stitch_snapshot_tests::utils;

    #[test]
    fn verify_stitch_snapshot_tests() {
        let fixtures_dir = utils::get_fixtures_dir();

        let results = test_runner::run_stitch_tests(fixtures_dir);

        let all_passed = results.all_passed();
        if !all_passed {
            eprintln!("{}", results.failure_report());
            eprintln!("\n{}", results.summary());
        } else {
            println!("{}", results.summary());
        }

        assert!(!results.results.is_empty(), "No stitch snapshot fixtures were found");
        assert!(
            all_passed,
            "Stitch snapshot tests failed:\n{}",
            results.failure_report()
        );
    }
}
