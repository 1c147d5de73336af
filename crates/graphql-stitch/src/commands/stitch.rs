use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use libgraphql_stitch::result::ResultComplexityAggregator;
use libgraphql_stitch::result::ResultNode;
use libgraphql_stitch::stitch_case::StitchCase;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct StitchCmd {
    #[arg(
        default_values_t=["json".to_string()],
        help="Set of file extensions to filter to when searching for stitch \
             case files within a directory.",
        long,
        value_delimiter = ',',
    )]
    case_file_exts: Vec<String>,

    #[arg(
        help="Paths to one or more stitch case files or directories \
             containing stitch case files.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,

    #[arg(
        help="Only print the counters of each stitched result, not the \
             result itself.",
        long,
    )]
    summary_only: bool,
}

/// One stitched (or failed) case.
pub(crate) struct CaseOutcome {
    pub file_path: PathBuf,
    pub result: anyhow::Result<(String, ResultNode)>,
}

#[inherent::inherent]
impl RunnableCommand for StitchCmd {
    pub fn name(&self) -> &'static str {
        "stitch"
    }

    pub async fn run(self, cli: Cli) -> CommandResult {
        let case_file_exts: HashSet<String> =
            self.case_file_exts.iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect();

        log::debug!(
            "Scanning {} input paths...",
            self.file_or_dir_paths.len(),
        );
        let file_paths = match find_case_files(&self.file_or_dir_paths, &case_file_exts) {
            Ok(file_paths) => file_paths,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} Failed to collect stitch case files: {err:#}",
                output_utils::RED_X,
            )),
        };
        if file_paths.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} No stitch case files found (extensions: {}).",
                output_utils::RED_X,
                case_file_exts.iter()
                    .map(|ext| format!("`.{ext}`"))
                    .collect::<Vec<_>>()
                    .join(", "),
            ));
        }
        log::debug!("Found {} stitch case files.", file_paths.len());

        // Cases are independent, so each one is stitched on the blocking
        // pool and the outcomes are collected in input order.
        let handles = file_paths
            .into_iter()
            .map(|file_path| {
                let marker = cli.artificial_field_marker.clone();
                tokio::task::spawn_blocking(move || CaseOutcome {
                    result: stitch_case_file(&file_path, marker),
                    file_path,
                })
            })
            .collect::<Vec<_>>();

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => return CommandResult::stderr(format_args!(
                    "{} A stitching task failed: {err}",
                    output_utils::RED_X,
                )),
            }
        }

        let (report, num_failed) = render_report(&outcomes, self.summary_only);
        if num_failed == 0 {
            CommandResult::stdout(format_args!("{report}"))
        } else {
            CommandResult::stdout_failure(format_args!("{report}"))
        }
    }
}

fn find_case_files(
    file_or_dir_paths: &[PathBuf],
    case_file_exts: &HashSet<String>,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut file_paths = vec![];
    for path in file_or_dir_paths {
        // A file named explicitly is loaded whatever its extension.
        if path.is_file() {
            file_paths.push(std::fs::canonicalize(path)?);
            continue;
        }

        for entry in WalkDir::new(path.as_path()).follow_links(true).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walking {}", path.display()))?;
            let entry_path = entry.path();
            if !entry.file_type().is_file() {
                log::trace!("Skipping non-file: {entry_path:#?}.");
                continue;
            }
            let matches_ext = entry_path
                .extension()
                .map(|ext| case_file_exts.contains(&*ext.to_string_lossy()))
                .unwrap_or(false);
            if matches_ext {
                log::trace!("Found stitch case file at {entry_path:#?}.");
                file_paths.push(std::fs::canonicalize(entry_path)?);
            }
        }
    }
    Ok(file_paths)
}

pub(crate) fn stitch_case_file(
    file_path: &Path,
    artificial_field_marker: Option<String>,
) -> anyhow::Result<(String, ResultNode)> {
    let mut case = StitchCase::from_file(file_path)?;
    if artificial_field_marker.is_some() {
        case.artificial_field_marker = artificial_field_marker;
    }
    let prepared = case.prepare()?;
    log::debug!(
        "Stitching {} from `{}` ({} transformations)...",
        file_path.display(),
        prepared.overall_schema().query_type_name(),
        prepared.registry().len(),
    );
    let result = prepared.run().map_err(|err| {
        let graphql_error = err.to_graphql_error();
        anyhow::anyhow!(
            "{err} ({})",
            serde_json::to_string(&graphql_error).unwrap_or_default(),
        )
    })?;
    Ok((prepared.service_name().to_string(), result))
}

pub(crate) fn render_report(outcomes: &[CaseOutcome], summary_only: bool) -> (String, usize) {
    let mut report = String::new();
    let mut aggregator = ResultComplexityAggregator::new();
    let mut num_failed = 0;

    for outcome in outcomes {
        let file_path = outcome.file_path.display();
        match &outcome.result {
            Ok((service_name, result)) => {
                aggregator.record_service_result(service_name, result);
                report.push_str(&format!(
                    "{} {file_path} (service `{service_name}`): {} nodes, {} field renames, {} type renames\n",
                    output_utils::GREEN_CHECK,
                    result.total_node_count(),
                    result.total_field_rename_count(),
                    result.total_type_rename_count(),
                ));
                if !summary_only {
                    report.push_str(&format!("{:#}\n", response_json(result)));
                }
            },

            Err(err) => {
                num_failed += 1;
                report.push_str(&format!("{} {file_path}: {err:#}\n", output_utils::RED_X));
            },
        }
    }

    report.push_str(&format!(
        "Stitched {} of {} cases. Complexity: {}",
        outcomes.len() - num_failed,
        outcomes.len(),
        aggregator.to_extension_value(),
    ));
    (report, num_failed)
}

/// The stitched tree as a GraphQL response: its data plus every error
/// carried by its nodes.
fn response_json(result: &ResultNode) -> serde_json::Value {
    let errors = result
        .pre_order()
        .into_iter()
        .flat_map(|node| node.errors().iter().cloned().map(|err| {
            if err.path.is_some() {
                err
            } else {
                err.with_path(node.path().clone())
            }
        }))
        .collect::<Vec<_>>();

    let mut response = serde_json::Map::new();
    response.insert("data".to_string(), result.to_json());
    if !errors.is_empty() {
        response.insert(
            "errors".to_string(),
            serde_json::to_value(errors).unwrap_or_default(),
        );
    }
    serde_json::Value::Object(response)
}
