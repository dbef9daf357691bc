// Tue Jan 20 2026 - Alex

use crate::structure::FieldRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureLayout {
    name: String,
    fields: Vec<FieldRecord>,
}

impl StructureLayout {
    pub fn new(name: String) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn add_field(&mut self, field: FieldRecord) {
        self.fields.push(field);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldRecord] {
        &self.fields
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldRecord> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
