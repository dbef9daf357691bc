// Tue Jan 20 2026 - Alex

use crate::host::{TypeKind, TypeNode};
use crate::output::{json, serializer, LayoutWriter, OutputFormat};
use crate::structure::{extract_layout, DumpRegistry, LayoutError, StructureLayout};
use std::fmt;
use std::io::Write;

/// What a single "type finished" event led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NotRecord,
    ForwardDeclaration,
    Anonymous,
    NameMismatch,
    AlreadyDumped,
    Dumped(StructureLayout),
}

impl Outcome {
    pub fn is_dumped(&self) -> bool {
        matches!(self, Self::Dumped(_))
    }
}

/// Receives finished types from the host and dumps the configured target record once.
pub struct LayoutDumper<W: Write> {
    target: String,
    format: OutputFormat,
    registry: DumpRegistry,
    writer: LayoutWriter<W>,
}

impl<W: Write> LayoutDumper<W> {
    pub fn new(target: impl Into<String>, writer: LayoutWriter<W>) -> Self {
        Self {
            target: target.into(),
            format: OutputFormat::default(),
            registry: DumpRegistry::new(),
            writer,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn registry(&self) -> &DumpRegistry {
        &self.registry
    }

    pub fn writer(&self) -> &LayoutWriter<W> {
        &self.writer
    }

    pub fn into_writer(self) -> LayoutWriter<W> {
        self.writer
    }

    pub fn finish_type<N>(&mut self, node: &N) -> Result<Outcome, LayoutError>
    where
        N: TypeNode,
        N::Field: fmt::Debug,
    {
        if node.kind() != TypeKind::Record {
            return Ok(Outcome::NotRecord);
        }

        let fields = node.fields();
        if fields.is_empty() {
            return Ok(Outcome::ForwardDeclaration);
        }

        let main = node.main_variant();
        let Some(name) = main.name() else {
            return Ok(Outcome::Anonymous);
        };

        if name != self.target {
            return Ok(Outcome::NameMismatch);
        }

        // Registered before any field is looked at, so a revisit from inside this record
        // is a no-op rather than a second, interleaved dump.
        if !self.registry.insert(name) {
            log::trace!("'{}' already dumped", name);
            return Ok(Outcome::AlreadyDumped);
        }

        log::debug!("dumping '{}' ({} fields)", name, fields.len());
        let layout = extract_layout(name, &fields)?;

        let rendered = match self.format {
            OutputFormat::Text => serializer::render(&layout),
            OutputFormat::Json => json::render_line(&layout)?,
        };
        self.writer.write_record(&rendered)?;
        log::debug!("wrote '{}' ({} bytes)", layout.name(), rendered.len());

        Ok(Outcome::Dumped(layout))
    }

    /// Feeds a whole event sequence, stopping at the first failure.
    pub fn run<N, I>(&mut self, events: I) -> Result<usize, LayoutError>
    where
        N: TypeNode,
        N::Field: fmt::Debug,
        I: IntoIterator<Item = N>,
    {
        let mut dumped = 0;
        for node in events {
            if self.finish_type(&node)?.is_dumped() {
                dumped += 1;
            }
        }
        Ok(dumped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::tree::{EntryKind, FieldEntry};
    use crate::host::{TypeId, TypeTable};

    fn dumper(target: &str) -> LayoutDumper<Vec<u8>> {
        LayoutDumper::new(target, LayoutWriter::new(Vec::new()))
    }

    fn output(dumper: LayoutDumper<Vec<u8>>) -> String {
        String::from_utf8(dumper.into_writer().into_inner()).unwrap()
    }

    fn finish(dumper: &mut LayoutDumper<Vec<u8>>, table: &TypeTable, id: TypeId) -> Outcome {
        dumper.finish_type(&table.get(id).unwrap()).unwrap()
    }

    #[test]
    fn test_scalar_record() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let rec = table.record(Some("T"), vec![FieldEntry::new("x", int, 0)]);

        let mut dumper = dumper("T");
        assert!(finish(&mut dumper, &table, rec).is_dumped());
        assert_eq!(output(dumper), "T = [\n\tScalar('x', 0, 32, 'int'),\n]\n");
    }

    #[test]
    fn test_mixed_record() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let chr = table.integer("char", 8);
        let ptr = table.pointer(int, 64);
        let arr = table.array(chr, 3);
        let rec = table.record(
            Some("x"),
            vec![
                FieldEntry::new("y", int, 0),
                FieldEntry::new("p", ptr, 8),
                FieldEntry::new("name", arr, 16),
            ],
        );

        let mut dumper = dumper("x");
        finish(&mut dumper, &table, rec);
        assert_eq!(
            output(dumper),
            "x = [\n\
             \tScalar('y', 0, 32, 'int'),\n\
             \tPointer('p', 64, 64, 'int'),\n\
             \tArray('name', 128, 24, 3, 'char'),\n\
             ]\n"
        );
    }

    #[test]
    fn test_repeat_finish_dumps_once() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let rec = table.record(Some("T"), vec![FieldEntry::new("x", int, 0)]);
        let qualified = table.variant(rec);

        let mut dumper = dumper("T");
        assert!(finish(&mut dumper, &table, rec).is_dumped());
        assert_eq!(finish(&mut dumper, &table, rec), Outcome::AlreadyDumped);
        assert_eq!(finish(&mut dumper, &table, qualified), Outcome::AlreadyDumped);
        assert_eq!(dumper.registry().len(), 1);
        assert_eq!(output(dumper).matches("T = [").count(), 1);
    }

    #[test]
    fn test_name_mismatch_is_silent() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let upper = table.record(Some("Point"), vec![FieldEntry::new("x", int, 0)]);
        let other = table.record(Some("other"), vec![FieldEntry::new("x", int, 0)]);

        let mut dumper = dumper("point");
        assert_eq!(finish(&mut dumper, &table, upper), Outcome::NameMismatch);
        assert_eq!(finish(&mut dumper, &table, other), Outcome::NameMismatch);
        assert!(dumper.registry().is_empty());
        assert_eq!(output(dumper), "");
    }

    #[test]
    fn test_anonymous_record_skipped() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let anon = table.record(None, vec![FieldEntry::new("x", int, 0)]);

        let mut dumper = dumper("T");
        assert_eq!(finish(&mut dumper, &table, anon), Outcome::Anonymous);
        assert_eq!(output(dumper), "");
    }

    #[test]
    fn test_non_records_and_forward_declarations_skipped() {
        let mut table = TypeTable::new();
        let int = table.integer("T", 32);
        let union = table.other(EntryKind::Union, Some("T"), 32);
        let forward = table.record(Some("T"), Vec::new());

        let mut dumper = dumper("T");
        assert_eq!(finish(&mut dumper, &table, int), Outcome::NotRecord);
        assert_eq!(finish(&mut dumper, &table, union), Outcome::NotRecord);
        assert_eq!(finish(&mut dumper, &table, forward), Outcome::ForwardDeclaration);
        assert!(dumper.registry().is_empty());
    }

    #[test]
    fn test_unsupported_field_writes_nothing() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let float = table.other(EntryKind::Real, Some("float"), 32);
        let arr = table.array(float, 4);
        let rec = table.record(
            Some("T"),
            vec![FieldEntry::new("ok", int, 0), FieldEntry::new("f", arr, 4)],
        );

        let mut dumper = dumper("T");
        let err = dumper.finish_type(&table.get(rec).unwrap()).unwrap_err();
        assert!(err.is_invariant_violation());
        assert!(dumper.registry().contains("T"));
        assert_eq!(dumper.writer().records_written(), 0);
        assert_eq!(output(dumper), "");
    }

    #[test]
    fn test_json_format() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let rec = table.record(Some("T"), vec![FieldEntry::new("x", int, 0)]);

        let mut dumper = dumper("T").with_format(OutputFormat::Json);
        finish(&mut dumper, &table, rec);
        let text = output(dumper);
        assert!(text.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["name"], "T");
        assert_eq!(value["fields"][0]["class"], "Scalar");
        assert_eq!(value["fields"][0]["size"], 32);
    }

    #[test]
    fn test_run_counts_dumps() {
        let mut table = TypeTable::new();
        let int = table.integer("int", 32);
        let rec = table.record(Some("T"), vec![FieldEntry::new("x", int, 0)]);
        table.finish(int);
        table.finish(rec);
        table.finish(rec);

        let mut dumper = dumper("T");
        assert_eq!(dumper.run(table.finish_events()).unwrap(), 1);
        assert_eq!(table.replay(&mut dumper).unwrap(), 0);
    }

    #[test]
    fn test_target_finished_only_through_qualified_variant() {
        let table = TypeTable::from_json(
            r#"{
                "types": [
                    { "kind": "integer", "name": "int", "size_bits": 32 },
                    { "kind": "record", "name": "x", "fields": [ { "name": "y", "type": 0, "byte_offset": 0 } ] },
                    { "kind": "record", "main_variant": 1 }
                ],
                "finish_order": [2]
            }"#,
        )
        .unwrap();

        let mut dumper = dumper("x");
        assert!(finish(&mut dumper, &table, TypeId(2)).is_dumped());
        assert!(dumper.registry().contains("x"));
        assert_eq!(output(dumper), "x = [\n\tScalar('y', 0, 32, 'int'),\n]\n");
    }
}
