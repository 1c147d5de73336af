use crate::result::ResultCounters;
use crate::stitch_case::StitchCase;
use crate::test::stitch_snapshot_tests::utils;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// What a snapshot fixture expects from stitching its case.
///
/// Every field is optional: only what is present is checked.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct ExpectedOutcome {
    #[serde(default)]
    pub counters: Option<ResultCounters>,

    /// The `data` projection of the stitched tree.
    #[serde(default)]
    pub data: Option<serde_json::Value>,

    #[serde(default)]
    pub error_contains: Vec<String>,

    /// Pre-order paths of the stitched tree.
    #[serde(default)]
    pub paths: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
struct StitchSnapshotFile {
    #[serde(flatten)]
    case: StitchCase,

    #[serde(default)]
    expected: ExpectedOutcome,
}

/// One fixture file of the stitch snapshot suite.
#[derive(Clone, Debug)]
pub struct StitchSnapshotTestCase {
    pub name: String,
    pub file_path: PathBuf,
    pub expect_error: bool,

    /// `Err` holds the reason the fixture file itself could not be loaded.
    pub contents: Result<(StitchCase, ExpectedOutcome), String>,
}

impl StitchSnapshotTestCase {
    /// Discovers every fixture under `fixtures_dir`, sorted by name.
    pub fn discover_all(fixtures_dir: &Path) -> Vec<Self> {
        let mut cases = Vec::new();
        cases.extend(Self::discover_dir(&fixtures_dir.join("valid"), false));
        cases.extend(Self::discover_dir(&fixtures_dir.join("invalid"), true));
        cases
    }

    fn discover_dir(dir: &Path, expect_error: bool) -> Vec<Self> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };

        let mut paths = entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if !utils::extension_matches_ignore_case(&path, "json") {
                    eprintln!("WARNING: Ignoring non-JSON fixture: {}", path.display());
                    return None;
                }
                Some(path)
            })
            .collect::<Vec<_>>();
        paths.sort();

        let group = if expect_error { "invalid" } else { "valid" };
        paths
            .into_iter()
            .map(|file_path| {
                let stem = file_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default();
                Self {
                    name: format!("{group}/{stem}"),
                    contents: Self::load(&file_path),
                    expect_error,
                    file_path,
                }
            })
            .collect()
    }

    fn load(file_path: &Path) -> Result<(StitchCase, ExpectedOutcome), String> {
        let content = fs::read_to_string(file_path).map_err(|e| e.to_string())?;
        let file: StitchSnapshotFile =
            serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok((file.case, file.expected))
    }
}
