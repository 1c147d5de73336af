use crate::result::ResultNode;
use crate::test::fixture::paths;
use crate::test::stitch_snapshot_tests::ExpectedOutcome;
use crate::test::stitch_snapshot_tests::StitchSnapshotTestCase;
use rayon::prelude::IntoParallelRefIterator;
use rayon::prelude::ParallelIterator;
use std::path::Path;
use std::path::PathBuf;

/// Result of a single snapshot test
#[derive(Debug)]
pub struct SnapshotTestResult {
    pub test_name: String,
    pub passed: bool,
    pub error_message: Option<String>,
    pub file_path: PathBuf,
}

/// Collection of snapshot test results
#[derive(Debug, Default)]
pub struct SnapshotTestResults {
    pub results: Vec<SnapshotTestResult>,
}

impl SnapshotTestResults {
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn failure_report(&self) -> String {
        let failures: Vec<_> = self.results.iter().filter(|r| !r.passed).collect();
        let failures_len = failures.len();
        let results_len = self.results.len();
        let failures_text = failures
            .iter()
            .map(|r| format_detailed_failure(r))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!("{failures_len} of {results_len} stitch snapshot tests failed:\n\n{failures_text}")
    }

    pub fn summary(&self) -> String {
        let all_passed = self.all_passed();
        let emoji = if all_passed { "✅" } else { "❌" };
        let banner = format!("{emoji} ========================================");
        let header = format!("{emoji} STITCH SNAPSHOT SUMMARY");
        let total = self.results.len();
        let failed = self.results.iter().filter(|r| !r.passed).count();
        let passed = total - failed;

        format!("{banner}\n{header}\n{banner}\nTotal tests: {total}\nPassed: {passed}\nFailed: {failed}\n{banner}")
    }
}

fn format_detailed_failure(result: &SnapshotTestResult) -> String {
    let test_name = &result.test_name;
    let file_path = result.file_path.display();
    let mut output = format!("❌ {test_name}\n   File: {file_path}\n");
    if let Some(msg) = &result.error_message {
        output.push_str(&format!("   {msg}\n"));
    }
    output
}

/// Runs every stitch fixture under `fixtures_dir`.
pub fn run_stitch_tests(fixtures_dir: &Path) -> SnapshotTestResults {
    let test_cases = StitchSnapshotTestCase::discover_all(fixtures_dir);
    SnapshotTestResults {
        results: test_cases.par_iter().map(run_test_case).collect(),
    }
}

fn run_test_case(test_case: &StitchSnapshotTestCase) -> SnapshotTestResult {
    let outcome = match &test_case.contents {
        Err(load_error) => Err(format!("Could not load fixture: {load_error}")),
        Ok((case, expected)) => {
            let stitched = case
                .prepare()
                .map_err(|err| err.to_string())
                .and_then(|prepared| prepared.run().map_err(|err| err.to_string()));
            if test_case.expect_error {
                check_failure(stitched, expected)
            } else {
                check_success(stitched, expected)
            }
        },
    };

    SnapshotTestResult {
        test_name: test_case.name.to_string(),
        passed: outcome.is_ok(),
        error_message: outcome.err(),
        file_path: test_case.file_path.clone(),
    }
}

fn check_success(
    stitched: Result<ResultNode, String>,
    expected: &ExpectedOutcome,
) -> Result<(), String> {
    let result = stitched.map_err(|err| format!("Expected: Successful stitch\nGot: {err}"))?;

    if let Some(data) = &expected.data {
        let actual = result.to_json();
        if &actual != data {
            return Err(format!("Expected data: {data}\nGot: {actual}"));
        }
    }
    if let Some(expected_paths) = &expected.paths {
        let actual = paths(&result);
        if &actual != expected_paths {
            return Err(format!("Expected paths: {expected_paths:?}\nGot: {actual:?}"));
        }
    }
    if let Some(counters) = &expected.counters {
        let actual = result.counters();
        if &actual != counters {
            return Err(format!("Expected counters: {counters:?}\nGot: {actual:?}"));
        }
    }
    Ok(())
}

fn check_failure(
    stitched: Result<ResultNode, String>,
    expected: &ExpectedOutcome,
) -> Result<(), String> {
    let error = match stitched {
        Ok(_) => return Err(
            "Expected: Stitching to fail\nGot: Stitched successfully (false negative!)".to_string(),
        ),
        Err(error) => error,
    };

    let unmatched = expected.error_contains
        .iter()
        .filter(|pattern| !error.contains(pattern.as_str()))
        .map(|pattern| format!("  ✗ {pattern}"))
        .collect::<Vec<_>>();
    if unmatched.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Expected: All error patterns must match\n\nUnmatched patterns:\n{}\n\nActual error:\n{error}",
            unmatched.join("\n"),
        ))
    }
}
