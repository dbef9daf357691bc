// Tue Jan 20 2026 - Alex

use crate::host::TypeKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Field #{index} of '{record}' has no name")]
    AnonymousField { record: String, index: usize },
    #[error("Field '{field}' of '{record}': array element of kind {kind} is not an integer type")]
    UnsupportedElement { record: String, field: String, kind: TypeKind },
    #[error("Field '{field}' of '{record}': pointee of kind {kind} is not an integer type")]
    UnsupportedPointee { record: String, field: String, kind: TypeKind },
    #[error("Field '{field}' of '{record}': type has no name")]
    UnnamedType { record: String, field: String },
    #[error("Field '{field}' of '{record}': offset is not a constant")]
    NonConstantOffset { record: String, field: String },
    #[error("Field '{field}' of '{record}': bit offset overflows")]
    OffsetOverflow { record: String, field: String },
    #[error("Field '{field}' of '{record}': type has no constant size")]
    IncompleteType { record: String, field: String },
    #[error("Field '{field}' of '{record}': {kind} type has no {missing} type")]
    MalformedType { record: String, field: String, kind: TypeKind, missing: &'static str },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LayoutError {
    /// True for shapes the extractor refuses to describe, as opposed to sink failures.
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Json(_))
    }
}
