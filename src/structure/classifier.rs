// Tue Jan 20 2026 - Alex

use crate::host::{FieldDecl, TypeKind, TypeNode};
use crate::structure::{FieldClass, FieldRecord, LayoutError, Offset, Size, StructureLayout};
use std::fmt;

/// Classifies every field of `record` in declaration order.
pub fn extract_layout<F: FieldDecl + fmt::Debug>(record: &str, fields: &[F]) -> Result<StructureLayout, LayoutError> {
    let mut layout = StructureLayout::new(record.to_string());
    for (index, field) in fields.iter().enumerate() {
        log::trace!("field {:?}", field);
        layout.add_field(classify_field(record, index, field)?);
    }
    Ok(layout)
}

/// Produces the record for a single field of `record`.
///
/// Arrays and pointers are described one level deep: their element or pointee must be an
/// integer type, anything else is refused.
pub fn classify_field<F: FieldDecl>(record: &str, index: usize, field: &F) -> Result<FieldRecord, LayoutError> {
    let name = field
        .name()
        .ok_or_else(|| LayoutError::AnonymousField { record: record.to_string(), index })?
        .to_string();

    let declared = field.declared_type();

    let (class, size, current) = match declared.kind() {
        TypeKind::Array => {
            let size = bits_of(&declared, record, &name)?;
            // Byte size of the whole array, kept as the element count.
            let element_count = declared.size_bytes().ok_or_else(|| LayoutError::IncompleteType {
                record: record.to_string(),
                field: name.clone(),
            })?;
            let element = declared.element_type().ok_or_else(|| LayoutError::MalformedType {
                record: record.to_string(),
                field: name.clone(),
                kind: TypeKind::Array,
                missing: "element",
            })?;
            if !element.kind().is_integer_like() {
                return Err(LayoutError::UnsupportedElement {
                    record: record.to_string(),
                    field: name,
                    kind: element.kind(),
                });
            }
            (FieldClass::Array { element_count }, size, element)
        }
        TypeKind::Pointer => {
            let size = bits_of(&declared, record, &name)?;
            let pointee = declared.pointee_type().ok_or_else(|| LayoutError::MalformedType {
                record: record.to_string(),
                field: name.clone(),
                kind: TypeKind::Pointer,
                missing: "pointee",
            })?;
            if !pointee.kind().is_integer_like() {
                return Err(LayoutError::UnsupportedPointee {
                    record: record.to_string(),
                    field: name,
                    kind: pointee.kind(),
                });
            }
            (FieldClass::Pointer, size, pointee)
        }
        _ => {
            let size = bits_of(&declared, record, &name)?;
            (FieldClass::Scalar, size, declared)
        }
    };

    let type_name = match current.name() {
        Some(type_name) => type_name.to_string(),
        None => current
            .main_variant()
            .name()
            .map(str::to_string)
            .ok_or_else(|| LayoutError::UnnamedType {
                record: record.to_string(),
                field: name.clone(),
            })?,
    };

    let (byte_offset, bit_offset) = match (field.byte_offset(), field.bit_offset()) {
        (Some(bytes), Some(bits)) => (bytes, bits),
        _ => {
            return Err(LayoutError::NonConstantOffset {
                record: record.to_string(),
                field: name,
            })
        }
    };
    let offset = Offset::from_parts(byte_offset, bit_offset).ok_or_else(|| LayoutError::OffsetOverflow {
        record: record.to_string(),
        field: name.clone(),
    })?;

    Ok(FieldRecord::new(name, class, offset, size, type_name))
}

fn bits_of<N: TypeNode>(node: &N, record: &str, field: &str) -> Result<Size, LayoutError> {
    node.size_bits().map(Size::new).ok_or_else(|| LayoutError::IncompleteType {
        record: record.to_string(),
        field: field.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::tree::{EntryKind, FieldEntry};
    use crate::host::{TypeId, TypeTable};

    fn classify(table: &TypeTable, record: TypeId, index: usize) -> Result<FieldRecord, LayoutError> {
        let node = table.get(record).unwrap();
        let fields = node.fields();
        classify_field("t", index, &fields[index])
    }

    #[test]
    fn test_scalar_field() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let char_ty = table.integer("char", 8);
        let rec = table.record(
            Some("t"),
            vec![FieldEntry::new("y", int, 0), FieldEntry::new("z", char_ty, 4)],
        );

        assert_eq!(classify(&table, rec, 0).unwrap(), FieldRecord::scalar("y", 0, 32, "int"));
        assert_eq!(classify(&table, rec, 1).unwrap(), FieldRecord::scalar("z", 32, 8, "char"));
    }

    #[test]
    fn test_bit_remainder_folded_into_offset() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let rec = table.record(
            Some("t"),
            vec![
                FieldEntry::new("a", int, 0),
                FieldEntry::new("b", int, 16).with_bit_offset(5),
            ],
        );

        assert_eq!(classify(&table, rec, 1).unwrap().offset().as_bits(), 16 * 8 + 5);
    }

    #[test]
    fn test_pointer_reports_pointer_size_and_pointee_name() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let ptr = table.pointer(int, 64);
        let rec = table.record(Some("t"), vec![FieldEntry::new("p", ptr, 8)]);

        let field = classify(&table, rec, 0).unwrap();
        assert_eq!(field, FieldRecord::pointer("p", 64, 64, "int"));
        assert_eq!(field.to_string(), "Pointer('p', 64, 64, 'int')");
    }

    #[test]
    fn test_array_keeps_byte_size_as_count() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let arr = table.array(int, 5);
        let rec = table.record(Some("t"), vec![FieldEntry::new("arr", arr, 0)]);

        let field = classify(&table, rec, 0).unwrap();
        assert_eq!(field.class(), FieldClass::Array { element_count: 20 });
        assert_eq!(field.size().as_bits(), 160);
        assert_eq!(field.type_name(), "int");
    }

    #[test]
    fn test_byte_array_count_matches_length() {
        let mut table = TypeTable::new();
        let uchar = table.integer("unsigned char", 8);
        let arr = table.array(uchar, 16);
        let rec = table.record(Some("t"), vec![FieldEntry::new("buf", arr, 0)]);

        let field = classify(&table, rec, 0).unwrap();
        assert_eq!(field.to_string(), "Array('buf', 0, 128, 16, 'unsigned char')");
    }

    #[test]
    fn test_qualified_scalar_uses_main_variant_name() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let const_int = table.variant(int);
        let rec = table.record(Some("t"), vec![FieldEntry::new("c", const_int, 0)]);

        assert_eq!(classify(&table, rec, 0).unwrap().type_name(), "int");
    }

    #[test]
    fn test_struct_field_is_scalar_under_its_name() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let inner = table.record(Some("a"), vec![FieldEntry::new("x", int, 0)]);
        let rec = table.record(Some("t"), vec![FieldEntry::new("aa", inner, 0)]);

        let field = classify(&table, rec, 0).unwrap();
        assert_eq!(field, FieldRecord::scalar("aa", 0, 32, "a"));
        assert_eq!(field.to_string(), "Scalar('aa', 0, 32, 'a')");
    }

    #[test]
    fn test_self_referential_pointer_refused() {
        let table = TypeTable::from_json(
            r#"{ "types": [
                { "kind": "integer", "name": "int", "size_bits": 32 },
                { "kind": "record", "name": "node", "size_bits": 128,
                  "fields": [
                    { "name": "val", "type": 0, "byte_offset": 0 },
                    { "name": "next", "type": 2, "byte_offset": 8 }
                  ] },
                { "kind": "pointer", "pointee": 1, "size_bits": 64 }
            ] }"#,
        )
        .unwrap();

        match classify(&table, TypeId(1), 1) {
            Err(LayoutError::UnsupportedPointee { field, kind, .. }) => {
                assert_eq!(field, "next");
                assert_eq!(kind, TypeKind::Record);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_struct_element_refused() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let inner = table.record(Some("a"), vec![FieldEntry::new("x", int, 0)]);
        let arr = table.array(inner, 2);
        let rec = table.record(Some("t"), vec![FieldEntry::new("items", arr, 0)]);

        match classify(&table, rec, 0) {
            Err(LayoutError::UnsupportedElement { field, kind, .. }) => {
                assert_eq!(field, "items");
                assert_eq!(kind, TypeKind::Record);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_float_pointee_refused() {
        let mut table = TypeTable::new();
        let float = table.other(EntryKind::Real, Some("float"), 32);
        let ptr = table.pointer(float, 64);
        let rec = table.record(Some("t"), vec![FieldEntry::new("f", ptr, 0)]);

        let err = classify(&table, rec, 0).unwrap_err();
        assert!(matches!(err, LayoutError::UnsupportedPointee { kind: TypeKind::Other, .. }));
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_pointer_to_pointer_refused() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let ptr = table.pointer(int, 64);
        let ptr_ptr = table.pointer(ptr, 64);
        let rec = table.record(Some("t"), vec![FieldEntry::new("pp", ptr_ptr, 0)]);

        assert!(matches!(
            classify(&table, rec, 0),
            Err(LayoutError::UnsupportedPointee { kind: TypeKind::Pointer, .. })
        ));
    }

    #[test]
    fn test_anonymous_field_refused() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let rec = table.record(Some("t"), vec![FieldEntry::anonymous(int, 0)]);

        assert!(matches!(
            classify(&table, rec, 0),
            Err(LayoutError::AnonymousField { index: 0, .. })
        ));
    }

    #[test]
    fn test_variable_offset_refused() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let rec = table.record(Some("t"), vec![FieldEntry::new("v", int, 0).with_variable_offset()]);

        assert!(matches!(
            classify(&table, rec, 0),
            Err(LayoutError::NonConstantOffset { .. })
        ));
    }

    #[test]
    fn test_extract_stops_at_first_bad_field() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let double = table.other(EntryKind::Real, Some("double"), 64);
        let arr = table.array(double, 2);
        let rec = table.record(
            Some("t"),
            vec![FieldEntry::new("ok", int, 0), FieldEntry::new("bad", arr, 8)],
        );

        let node = table.get(rec).unwrap();
        assert!(extract_layout("t", &node.fields()).is_err());
    }
}
