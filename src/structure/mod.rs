// Tue Jan 20 2026 - Alex

pub mod classifier;
pub mod error;
pub mod field;
pub mod layout;
pub mod offset;
pub mod registry;
pub mod size;
pub mod walker;

pub use classifier::{classify_field, extract_layout};
pub use error::LayoutError;
pub use field::{FieldClass, FieldRecord};
pub use layout::StructureLayout;
pub use offset::Offset;
pub use registry::DumpRegistry;
pub use size::Size;
pub use walker::{LayoutDumper, Outcome};
