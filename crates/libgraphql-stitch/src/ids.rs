//! Typed handles for the identifiers threaded through a stitching run.
//!
//! Field identifiers are assigned to the nodes of the client's query document
//! while it is being annotated. The stitching engine never interprets them
//! beyond equality and registry lookups, so they are opaque `u32` handles
//! rather than strings.

/// Identifies one field selection of the original query document.
///
/// A single [`ResultNode`](crate::result::ResultNode) may carry several of
/// these when multiple selections were merged into one underlying field.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(transparent)]
pub struct FieldId(u32);
impl FieldId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}
impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// Identifies one registered
/// [`FieldTransformation`](crate::transformation::FieldTransformation).
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(transparent)]
pub struct TransformationId(u32);
impl TransformationId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}
impl std::fmt::Display for TransformationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Identifies one [`NormalizedField`](crate::normalized::NormalizedField) of
/// a [`NormalizedQuery`](crate::normalized::NormalizedQuery).
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(transparent)]
pub struct NormalizedFieldId(u32);
impl NormalizedFieldId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}
impl std::fmt::Display for NormalizedFieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}
