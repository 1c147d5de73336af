//! Result stitching for a GraphQL federation gateway.
//!
//! A gateway exposes one overall schema backed by several underlying
//! services. Client queries are translated into per-service queries, and
//! this crate takes each service's raw [`result::ResultNode`] tree and
//! rewrites it into the overall schema's terms, reversing the field renames
//! and hydrations applied during translation.
//!
//! The entry point is [`ServiceResultStitcher`].

pub mod engine;
mod ids;
pub mod normalized;
pub mod result;
pub mod schema;
pub mod stitch_case;
mod stitch_error;
pub mod transformation;

#[cfg(test)]
mod test;

pub use engine::ServiceResultStitcher;
pub use engine::StitchContext;
pub use ids::FieldId;
pub use ids::NormalizedFieldId;
pub use ids::TransformationId;
pub use stitch_error::StitchError;
