// Tue Jan 20 2026 - Alex

use crate::structure::StructureLayout;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableLayout {
    pub name: String,
    pub fields: Vec<SerializableField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableField {
    pub name: String,
    pub class: String,
    pub offset: u64,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_count: Option<u64>,
    pub type_name: String,
}

impl From<&StructureLayout> for SerializableLayout {
    fn from(layout: &StructureLayout) -> Self {
        Self {
            name: layout.name().to_string(),
            fields: layout
                .fields()
                .iter()
                .map(|f| SerializableField {
                    name: f.name().to_string(),
                    class: f.class().label().to_string(),
                    offset: f.offset().as_bits(),
                    size: f.size().as_bits(),
                    element_count: f.class().element_count(),
                    type_name: f.type_name().to_string(),
                })
                .collect(),
        }
    }
}

/// Single-line JSON rendering, newline terminated.
pub fn render_line(layout: &StructureLayout) -> Result<String, serde_json::Error> {
    let mut line = serde_json::to_string(&SerializableLayout::from(layout))?;
    line.push('\n');
    Ok(line)
}
