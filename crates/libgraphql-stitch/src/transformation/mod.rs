mod field_transformation;
mod hydration;
mod metadata;
mod registry;
mod rename;
mod type_renames;
mod unapply_environment;

pub use field_transformation::FieldTransformation;
pub(crate) use field_transformation::FieldTransformationTrait;
pub use hydration::HydrationArgument;
pub use hydration::HydrationTransformation;
pub use metadata::FieldMetadata;
pub use metadata::RemovedField;
pub use metadata::TransformationMetadata;
pub use registry::TransformationRegistry;
pub use rename::RenameTransformation;
pub use type_renames::TypeRenames;
pub use unapply_environment::TraversalControl;
pub use unapply_environment::UnapplyEnvironment;
pub use unapply_environment::UnapplyResult;
