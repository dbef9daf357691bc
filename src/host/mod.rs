// Tue Jan 20 2026 - Alex

pub mod error;
pub mod tree;

pub use error::HostError;
pub use tree::{FieldRef, TypeId, TypeRef, TypeTable};

use std::fmt;

/// Coarse kind tag of a host type node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Record,
    Union,
    Array,
    Pointer,
    Integer,
    Other,
}

impl TypeKind {
    /// Kinds accepted as array elements and pointees.
    pub fn is_integer_like(self) -> bool {
        matches!(self, Self::Integer)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Record => "record",
            Self::Union => "union",
            Self::Array => "array",
            Self::Pointer => "pointer",
            Self::Integer => "integer",
            Self::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Read-only view of a type node owned by the driving compiler.
///
/// Adapters implement this over whatever type introspection the host exposes.
/// The extractor only ever queries it.
pub trait TypeNode: Sized {
    type Field: FieldDecl<Type = Self>;

    fn kind(&self) -> TypeKind;

    /// Identifier attached to this exact node, if any.
    fn name(&self) -> Option<&str>;

    /// Unqualified form of the type. Nodes without qualifiers return themselves.
    fn main_variant(&self) -> Self;

    /// Field declarations in declaration order. Empty for non-records and forward declarations.
    fn fields(&self) -> Vec<Self::Field>;

    fn size_bits(&self) -> Option<u64>;

    fn size_bytes(&self) -> Option<u64>;

    fn element_type(&self) -> Option<Self>;

    fn pointee_type(&self) -> Option<Self>;
}

/// One member of a record type.
pub trait FieldDecl {
    type Type: TypeNode;

    fn name(&self) -> Option<&str>;

    fn declared_type(&self) -> Self::Type;

    /// Byte-granular offset, `None` when the host has no constant for it.
    fn byte_offset(&self) -> Option<u64>;

    /// Bit remainder to add on top of the byte offset.
    fn bit_offset(&self) -> Option<u64>;
}
