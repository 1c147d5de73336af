use crate::result::ResultPath;
use indexmap::IndexMap;

/// A per-field data error as it appears in a GraphQL response.
///
/// These travel through stitching as ordinary node data: they are never
/// raised, only carried from the underlying result (or from a removed-field
/// record) onto the overall result.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct GraphQLError {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<ResultPath>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extensions: IndexMap<String, serde_json::Value>,
}
impl GraphQLError {
    pub fn new(message: impl AsRef<str>) -> Self {
        Self {
            message: message.as_ref().to_string(),
            path: None,
            extensions: IndexMap::new(),
        }
    }

    pub fn with_extension(
        mut self,
        key: impl AsRef<str>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.extensions.insert(key.as_ref().to_string(), value.into());
        self
    }

    pub fn with_path(mut self, path: ResultPath) -> Self {
        self.path = Some(path);
        self
    }
}
impl std::fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} (at {path})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
