use crate::normalized::NormalizedQuery;

/// Alias prefix the planner gives to fields it injects for its own use.
pub const DEFAULT_ARTIFICIAL_FIELD_MARKER: &str = "__stitch_artificial";

/// Per-execution configuration of the stitching engine.
#[derive(Clone, Debug, PartialEq)]
pub struct StitchContext {
    artificial_field_marker: String,
    normalized_query: NormalizedQuery,
}
impl StitchContext {
    pub fn artificial_field_marker(&self) -> &str {
        self.artificial_field_marker.as_str()
    }

    /// Helper function that just delegates to [`StitchContextBuilder::new()`].
    pub fn builder() -> StitchContextBuilder {
        StitchContextBuilder::new()
    }

    /// True for aliases of fields injected by the planner that must never
    /// reach a client.
    pub fn is_artificial_field(&self, alias: &str) -> bool {
        alias.starts_with(self.artificial_field_marker.as_str())
    }

    pub fn normalized_query(&self) -> &NormalizedQuery {
        &self.normalized_query
    }
}

#[derive(Debug, Default)]
pub struct StitchContextBuilder {
    artificial_field_marker: Option<String>,
    normalized_query: Option<NormalizedQuery>,
}
impl StitchContextBuilder {
    pub fn artificial_field_marker(mut self, marker: impl AsRef<str>) -> Self {
        self.artificial_field_marker = Some(marker.as_ref().to_string());
        self
    }

    pub fn build(self) -> StitchContext {
        StitchContext {
            artificial_field_marker: self.artificial_field_marker
                .unwrap_or_else(|| DEFAULT_ARTIFICIAL_FIELD_MARKER.to_string()),
            normalized_query: self.normalized_query.unwrap_or_default(),
        }
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalized_query(mut self, normalized_query: NormalizedQuery) -> Self {
        self.normalized_query = Some(normalized_query);
        self
    }
}
