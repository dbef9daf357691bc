// Tue Jan 20 2026 - Alex

//! Type table host: an arena of type nodes loaded from a JSON type dump.
//!
//! The table stands in for the compiler's type tree. Nodes reference each other by index,
//! and `finish_order` replays the "type finished" events the compiler would deliver.

use crate::host::{FieldDecl, HostError, TypeKind, TypeNode};
use crate::structure::{LayoutDumper, LayoutError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub usize);

impl TypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Record,
    Union,
    Array,
    Pointer,
    Integer,
    Boolean,
    Real,
    Enum,
    Void,
    Other,
}

impl From<EntryKind> for TypeKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Record => TypeKind::Record,
            EntryKind::Union => TypeKind::Union,
            EntryKind::Array => TypeKind::Array,
            EntryKind::Pointer => TypeKind::Pointer,
            EntryKind::Integer => TypeKind::Integer,
            EntryKind::Boolean
            | EntryKind::Real
            | EntryKind::Enum
            | EntryKind::Void
            | EntryKind::Other => TypeKind::Other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeEntry {
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_variant: Option<TypeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bits: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<TypeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointee: Option<TypeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldEntry>,
}

impl TypeEntry {
    fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            name: None,
            main_variant: None,
            size_bits: None,
            size_bytes: None,
            element: None,
            pointee: None,
            fields: Vec::new(),
        }
    }

    fn with_size_bits(mut self, bits: u64) -> Self {
        self.size_bits = Some(bits);
        if bits % 8 == 0 {
            self.size_bytes = Some(bits / 8);
        }
        self
    }

    fn references(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.main_variant
            .into_iter()
            .chain(self.element)
            .chain(self.pointee)
            .chain(self.fields.iter().map(|f| f.ty))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeId,
    pub byte_offset: Option<u64>,
    #[serde(default = "zero_bits")]
    pub bit_offset: Option<u64>,
}

fn zero_bits() -> Option<u64> {
    Some(0)
}

impl FieldEntry {
    pub fn new(name: &str, ty: TypeId, byte_offset: u64) -> Self {
        Self {
            name: Some(name.to_string()),
            ty,
            byte_offset: Some(byte_offset),
            bit_offset: Some(0),
        }
    }

    pub fn anonymous(ty: TypeId, byte_offset: u64) -> Self {
        Self {
            name: None,
            ty,
            byte_offset: Some(byte_offset),
            bit_offset: Some(0),
        }
    }

    pub fn with_bit_offset(mut self, bits: u64) -> Self {
        self.bit_offset = Some(bits);
        self
    }

    pub fn with_variable_offset(mut self) -> Self {
        self.byte_offset = None;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeTable {
    types: Vec<TypeEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    finish_order: Option<Vec<TypeId>>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, HostError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, HostError> {
        let table: TypeTable = serde_json::from_str(text)?;
        table.check()?;
        Ok(table)
    }

    pub fn to_json(&self) -> Result<String, HostError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check(&self) -> Result<(), HostError> {
        let len = self.types.len();

        for (index, entry) in self.types.iter().enumerate() {
            if let Some(target) = entry.references().find(|id| id.index() >= len) {
                return Err(HostError::DanglingType { from: index, target: target.index() });
            }
        }

        if let Some(order) = &self.finish_order {
            if let Some(id) = order.iter().find(|id| id.index() >= len) {
                return Err(HostError::UnknownFinish(id.index()));
            }
        }

        for index in 0..len {
            let mut current = TypeId(index);
            let mut steps = 0;
            while let Some(next) = self.types[current.index()].main_variant {
                if next == current {
                    break;
                }
                steps += 1;
                if steps > len {
                    return Err(HostError::VariantCycle(index));
                }
                current = next;
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, id: TypeId) -> Option<TypeRef<'_>> {
        (id.index() < self.types.len()).then(|| TypeRef { table: self, id })
    }

    fn entry(&self, id: TypeId) -> &TypeEntry {
        &self.types[id.index()]
    }

    fn push(&mut self, entry: TypeEntry) -> TypeId {
        self.types.push(entry);
        TypeId(self.types.len() - 1)
    }

    pub fn integer(&mut self, name: &str, bits: u64) -> TypeId {
        let mut entry = TypeEntry::new(EntryKind::Integer).with_size_bits(bits);
        entry.name = Some(name.to_string());
        self.push(entry)
    }

    pub fn other(&mut self, kind: EntryKind, name: Option<&str>, bits: u64) -> TypeId {
        let mut entry = TypeEntry::new(kind).with_size_bits(bits);
        entry.name = name.map(str::to_string);
        self.push(entry)
    }

    pub fn pointer(&mut self, pointee: TypeId, bits: u64) -> TypeId {
        let mut entry = TypeEntry::new(EntryKind::Pointer).with_size_bits(bits);
        entry.pointee = Some(pointee);
        self.push(entry)
    }

    pub fn array(&mut self, element: TypeId, count: u64) -> TypeId {
        let element_bits = self.entry(element).size_bits.unwrap_or(0);
        let mut entry = TypeEntry::new(EntryKind::Array).with_size_bits(element_bits * count);
        entry.element = Some(element);
        self.push(entry)
    }

    pub fn record(&mut self, name: Option<&str>, fields: Vec<FieldEntry>) -> TypeId {
        let end_bits = fields
            .iter()
            .filter_map(|f| {
                let start = f.byte_offset? * 8 + f.bit_offset.unwrap_or(0);
                Some(start + self.entry(f.ty).size_bits.unwrap_or(0))
            })
            .max()
            .unwrap_or(0);

        let mut entry = TypeEntry::new(EntryKind::Record);
        entry.name = name.map(str::to_string);
        entry.fields = fields;
        if entry.fields.is_empty() {
            entry.size_bits = None;
        } else {
            entry = entry.with_size_bits(end_bits.div_ceil(8) * 8);
        }
        self.push(entry)
    }

    /// Qualified copy of `of` whose main variant is `of`.
    pub fn variant(&mut self, of: TypeId) -> TypeId {
        let mut entry = self.entry(of).clone();
        entry.name = None;
        entry.main_variant = Some(of);
        self.push(entry)
    }

    pub fn finish(&mut self, id: TypeId) {
        self.finish_order.get_or_insert_with(Vec::new).push(id);
    }

    pub fn finish_events(&self) -> Vec<TypeRef<'_>> {
        match &self.finish_order {
            Some(order) => order.iter().map(|&id| TypeRef { table: self, id }).collect(),
            None => (0..self.types.len())
                .map(|index| TypeRef { table: self, id: TypeId(index) })
                .collect(),
        }
    }

    /// Delivers every finish event to `dumper`, stopping at the first extraction failure.
    /// Returns how many records were written.
    pub fn replay<W: Write>(&self, dumper: &mut LayoutDumper<W>) -> Result<usize, LayoutError> {
        log::debug!("replaying {} finish events", self.finish_events().len());
        dumper.run(self.finish_events())
    }
}

#[derive(Clone, Copy)]
pub struct TypeRef<'a> {
    table: &'a TypeTable,
    id: TypeId,
}

impl<'a> TypeRef<'a> {
    pub fn id(&self) -> TypeId {
        self.id
    }

    fn entry(&self) -> &'a TypeEntry {
        self.table.entry(self.id)
    }

    fn at(&self, id: TypeId) -> TypeRef<'a> {
        TypeRef { table: self.table, id }
    }
}

impl fmt::Debug for TypeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.entry();
        write!(f, "{} {:?}", self.id, entry.kind)?;
        if let Some(name) = &entry.name {
            write!(f, " '{}'", name)?;
        }
        if let Some(bits) = entry.size_bits {
            write!(f, " size={}", bits)?;
        }
        Ok(())
    }
}

impl<'a> TypeNode for TypeRef<'a> {
    type Field = FieldRef<'a>;

    fn kind(&self) -> TypeKind {
        self.entry().kind.into()
    }

    fn name(&self) -> Option<&str> {
        self.entry().name.as_deref()
    }

    fn main_variant(&self) -> Self {
        let mut current = self.id;
        while let Some(next) = self.table.entry(current).main_variant {
            if next == current {
                break;
            }
            current = next;
        }
        self.at(current)
    }

    /// A qualified variant listed without fields of its own shares its main variant's list.
    fn fields(&self) -> Vec<FieldRef<'a>> {
        let entry = self.entry();
        if entry.fields.is_empty() && entry.main_variant.is_some_and(|main| main != self.id) {
            return self.main_variant().fields();
        }
        (0..entry.fields.len())
            .map(|index| FieldRef { table: self.table, owner: self.id, index })
            .collect()
    }

    fn size_bits(&self) -> Option<u64> {
        self.entry().size_bits
    }

    fn size_bytes(&self) -> Option<u64> {
        let entry = self.entry();
        entry
            .size_bytes
            .or_else(|| entry.size_bits.filter(|bits| bits % 8 == 0).map(|bits| bits / 8))
    }

    fn element_type(&self) -> Option<Self> {
        self.entry().element.map(|id| self.at(id))
    }

    fn pointee_type(&self) -> Option<Self> {
        self.entry().pointee.map(|id| self.at(id))
    }
}

#[derive(Clone, Copy)]
pub struct FieldRef<'a> {
    table: &'a TypeTable,
    owner: TypeId,
    index: usize,
}

impl<'a> FieldRef<'a> {
    fn entry(&self) -> &'a FieldEntry {
        &self.table.entry(self.owner).fields[self.index]
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.entry();
        f.debug_struct("FieldRef")
            .field("owner", &self.owner)
            .field("name", &entry.name)
            .field("type", &self.declared_type())
            .field("byte_offset", &entry.byte_offset)
            .field("bit_offset", &entry.bit_offset)
            .finish()
    }
}

impl<'a> FieldDecl for FieldRef<'a> {
    type Type = TypeRef<'a>;

    fn name(&self) -> Option<&str> {
        self.entry().name.as_deref()
    }

    fn declared_type(&self) -> TypeRef<'a> {
        TypeRef { table: self.table, id: self.entry().ty }
    }

    fn byte_offset(&self) -> Option<u64> {
        self.entry().byte_offset
    }

    fn bit_offset(&self) -> Option<u64> {
        self.entry().bit_offset
    }
}
