// Tue Jan 20 2026 - Alex

use crate::structure::{Offset, Size};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldClass {
    Scalar,
    Pointer,
    /// `element_count` is the array's size in bytes, not bytes divided by element size.
    /// Consumers of the text format already rely on that value.
    Array { element_count: u64 },
}

impl FieldClass {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scalar => "Scalar",
            Self::Pointer => "Pointer",
            Self::Array { .. } => "Array",
        }
    }

    pub fn element_count(&self) -> Option<u64> {
        match self {
            Self::Array { element_count } => Some(*element_count),
            _ => None,
        }
    }
}

/// One classified field of a dumped record.
///
/// `type_name` is the field type's own name for scalars, the pointee's for pointers and the
/// element's for arrays. `size` is always the size of the field itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    name: String,
    class: FieldClass,
    offset: Offset,
    size: Size,
    type_name: String,
}

impl FieldRecord {
    pub fn new(name: String, class: FieldClass, offset: Offset, size: Size, type_name: String) -> Self {
        Self {
            name,
            class,
            offset,
            size,
            type_name,
        }
    }

    pub fn scalar(name: &str, offset: u64, size: u64, type_name: &str) -> Self {
        Self::new(name.to_string(), FieldClass::Scalar, offset.into(), size.into(), type_name.to_string())
    }

    pub fn pointer(name: &str, offset: u64, size: u64, pointee: &str) -> Self {
        Self::new(name.to_string(), FieldClass::Pointer, offset.into(), size.into(), pointee.to_string())
    }

    pub fn array(name: &str, offset: u64, size: u64, element_count: u64, element: &str) -> Self {
        Self::new(
            name.to_string(),
            FieldClass::Array { element_count },
            offset.into(),
            size.into(),
            element.to_string(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> FieldClass {
        self.class
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl fmt::Display for FieldRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}', {}, {}", self.class.label(), self.name, self.offset, self.size)?;
        if let Some(count) = self.class.element_count() {
            write!(f, ", {}", count)?;
        }
        write!(f, ", '{}')", self.type_name)
    }
}
