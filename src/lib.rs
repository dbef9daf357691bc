// Tue Jan 20 2026 - Alex

pub mod config;
pub mod host;
pub mod output;
pub mod structure;
pub mod ui;
pub mod utils;

pub use config::{Config, ConfigError, PluginArgs};
pub use host::{FieldDecl, TypeKind, TypeNode, TypeTable};
pub use output::{LayoutWriter, OutputFormat};
pub use structure::{DumpRegistry, FieldClass, FieldRecord, LayoutDumper, LayoutError, Outcome, StructureLayout};
