use std::collections::HashMap;

/// The type renames between the overall schema and one underlying schema.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeRenames {
    overall_by_underlying: HashMap<String, String>,
    underlying_by_overall: HashMap<String, String>,
}
impl TypeRenames {
    pub fn insert(
        &mut self,
        overall_name: impl AsRef<str>,
        underlying_name: impl AsRef<str>,
    ) {
        let overall_name = overall_name.as_ref().to_string();
        let underlying_name = underlying_name.as_ref().to_string();
        self.overall_by_underlying.insert(underlying_name.clone(), overall_name.clone());
        self.underlying_by_overall.insert(overall_name, underlying_name);
    }

    pub fn is_empty(&self) -> bool {
        self.overall_by_underlying.is_empty()
    }

    pub fn new() -> Self {
        Self::default()
    }

    /// The overall-schema name of an underlying type. Types that were not
    /// renamed keep their name.
    pub fn overall_name<'a>(&'a self, underlying_name: &'a str) -> &'a str {
        self.overall_by_underlying
            .get(underlying_name)
            .map(|name| name.as_str())
            .unwrap_or(underlying_name)
    }

    pub fn underlying_name<'a>(&'a self, overall_name: &'a str) -> &'a str {
        self.underlying_by_overall
            .get(overall_name)
            .map(|name| name.as_str())
            .unwrap_or(overall_name)
    }
}
impl<S: AsRef<str>> std::iter::FromIterator<(S, S)> for TypeRenames {
    /// Collects `(overall_name, underlying_name)` pairs.
    fn from_iter<I: IntoIterator<Item = (S, S)>>(iter: I) -> Self {
        let mut renames = Self::new();
        for (overall_name, underlying_name) in iter {
            renames.insert(overall_name, underlying_name);
        }
        renames
    }
}
