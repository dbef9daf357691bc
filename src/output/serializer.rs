// Tue Jan 20 2026 - Alex

//! Text rendering of a dumped record.
//!
//! ```text
//! x = [
//! 	Scalar('y', 0, 32, 'int'),
//! 	Pointer('p', 64, 64, 'int'),
//! 	Array('arr', 128, 160, 20, 'int'),
//! ]
//! ```
//!
//! Each line is a constructor-style call, so the whole block evaluates as an assignment of a
//! list in a dynamic language.

use crate::structure::StructureLayout;
use std::fmt::Write;

pub fn render(layout: &StructureLayout) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} = [", layout.name());
    for field in layout.fields() {
        let _ = writeln!(out, "\t{},", field);
    }
    out.push_str("]\n");
    out
}
