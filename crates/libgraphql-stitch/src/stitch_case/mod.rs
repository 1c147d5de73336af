//! Self-contained, JSON-described stitching inputs.
//!
//! A stitch case bundles an overall and an underlying schema, the
//! transformations and metadata of a query plan, the normalized query, and a
//! raw result tree. Tooling and tests use these to run the engine without a
//! live gateway.

mod raw_node;
#[allow(clippy::module_inception)]
mod stitch_case;
mod stitch_case_error;

pub use raw_node::RawNode;
pub use stitch_case::ConvertChildrenSpec;
pub use stitch_case::FieldMetadataEntry;
pub use stitch_case::NormalizedFieldSpec;
pub use stitch_case::PreparedStitchCase;
pub use stitch_case::RegisteredTransformation;
pub use stitch_case::RemovedFieldEntry;
pub use stitch_case::StitchCase;
pub use stitch_case_error::StitchCaseError;
