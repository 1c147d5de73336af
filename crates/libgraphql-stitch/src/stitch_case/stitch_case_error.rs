use crate::result::ResultNodeKind;
use crate::result::ResultPath;
use crate::schema::FieldCoordinate;
use crate::schema::SchemaBuildError;
use crate::StitchError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum StitchCaseError {
    #[error("Failure while trying to read stitch case file `{}`: {err}", file.display())]
    FileReadError {
        file: PathBuf,
        err: String,
    },

    #[error("Invalid {kind} node at `{path}`: {reason}")]
    InvalidNode {
        kind: ResultNodeKind,
        path: ResultPath,
        reason: String,
    },

    #[error("Error parsing stitch case JSON: {err}")]
    ParseError {
        err: String,
    },

    #[error("Invalid {schema_role} schema: {err}")]
    SchemaBuildError {
        err: SchemaBuildError,
        schema_role: &'static str,
    },

    #[error(transparent)]
    StitchError(#[from] StitchError),

    #[error("The overall schema defines no field `{coordinate}`")]
    UnknownOverallField {
        coordinate: FieldCoordinate,
    },

    #[error("The underlying schema defines no field `{coordinate}`")]
    UnknownUnderlyingField {
        coordinate: FieldCoordinate,
    },
}
