use crate::result::ResultCounters;
use crate::result::ResultNode;
use indexmap::IndexMap;

/// Name of the root extension the aggregated complexity is reported under.
pub const RESULT_COMPLEXITY_EXTENSION: &str = "resultComplexity";

/// Sums the counters of every stitched service result of one execution.
///
/// The execution driver records each top-level service conversion (and each
/// hydration conversion) here, then attaches the totals to the final
/// response root with [`ResultComplexityAggregator::apply_to_root()`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultComplexityAggregator {
    field_renames_count: usize,
    service_node_counts: IndexMap<String, usize>,
    total_node_count: usize,
    type_renames_count: i64,
}
impl ResultComplexityAggregator {
    /// Returns `root` with the `resultComplexity` extension set.
    pub fn apply_to_root(&self, root: &ResultNode) -> ResultNode {
        root.to_builder()
            .extension(RESULT_COMPLEXITY_EXTENSION, self.to_extension_value())
            .build()
            .with_counters(root.counters())
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_counters(&mut self, service_name: impl AsRef<str>, counters: ResultCounters) {
        self.total_node_count += counters.node_count;
        *self.service_node_counts
            .entry(service_name.as_ref().to_string())
            .or_insert(0) += counters.node_count;
        self.field_renames_count += counters.field_rename_count;
        self.type_renames_count += counters.type_rename_count;
    }

    /// Records the totals stamped on the top node of a stitched service
    /// result.
    pub fn record_service_result(&mut self, service_name: impl AsRef<str>, node: &ResultNode) {
        self.record_counters(service_name, node.counters());
    }

    pub fn to_extension_value(&self) -> serde_json::Value {
        serde_json::json!({
            "totalNodeCount": self.total_node_count,
            "serviceNodeCounts": self.service_node_counts,
            "fieldRenamesCount": self.field_renames_count,
            "typeRenamesCount": self.type_renames_count,
        })
    }
}
