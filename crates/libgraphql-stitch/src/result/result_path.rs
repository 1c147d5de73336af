/// One step of a [`ResultPath`]: either a response key or a list index.
#[derive(
    Clone,
    Debug,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}
impl PathSegment {
    pub fn as_field_name(&self) -> Option<&str> {
        if let Self::Field(name) = self {
            Some(name.as_str())
        } else {
            None
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        if let Self::Index(idx) = self {
            Some(*idx)
        } else {
            None
        }
    }
}
impl std::convert::From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        Self::Field(value.to_string())
    }
}
impl std::convert::From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

/// The location of a node within an execution result, e.g.
/// `/issues[0]/title`.
///
/// Serialized the same way GraphQL response error paths are: a JSON array of
/// response keys (strings) and list indices (integers).
#[derive(
    Clone,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(transparent)]
pub struct ResultPath(Vec<PathSegment>);
impl ResultPath {
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self(segments.into_iter().collect())
    }

    /// Returns a new path with a list-index segment appended.
    pub fn index(&self, idx: usize) -> Self {
        self.with_segment(PathSegment::Index(idx))
    }

    /// True when this path points at an element of a list, i.e. its last
    /// segment is an index.
    pub fn is_list_segment(&self) -> bool {
        matches!(self.0.last(), Some(PathSegment::Index(_)))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last_segment(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    pub fn root() -> Self {
        Self(vec![])
    }

    /// Returns a new path with a response-key segment appended.
    pub fn segment(&self, name: impl AsRef<str>) -> Self {
        self.with_segment(PathSegment::Field(name.as_ref().to_string()))
    }

    pub fn segments(&self) -> &[PathSegment] {
        self.0.as_slice()
    }

    pub fn with_segment(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }
}
impl std::fmt::Display for ResultPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.0 {
            match segment {
                PathSegment::Field(name) => write!(f, "/{name}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}
