//! Annotated byte listing.
//!
//! One `AAAA: BB` row per byte. Each region is preceded by `#` comment
//! lines naming what starts there; marks are listed before the
//! instruction at their address. The header comment carries the decoded
//! start address.

use std::collections::BTreeMap;

use bytelang_core::Colors;

use super::CompiledProgram;
use super::layout::{RegionKind, layout};

const START_ADDRESS_COMMENT: &str = "program start address define";

pub fn dump(compiled: &CompiledProgram, colors: Colors) -> String {
    let mut out = String::new();
    let program = &compiled.program;
    let mut marks: BTreeMap<usize, &[String]> = program
        .marks
        .iter()
        .map(|(address, names)| (*address, names.as_slice()))
        .collect();

    for region in layout(compiled) {
        match region.kind {
            RegionKind::StartAddress => {
                let text = match program.heap_pointer().read_unsigned(&compiled.bytes) {
                    Some(start) => format!("{START_ADDRESS_COMMENT} = {start:04X}"),
                    None => START_ADDRESS_COMMENT.to_string(),
                };
                comment(&mut out, &text, colors);
            }
            RegionKind::Variable(i) => {
                comment(&mut out, &program.variables[i].to_string(), colors)
            }
            RegionKind::Instruction(i) => {
                for name in marks.remove(&region.address).unwrap_or_default() {
                    comment(&mut out, &format!("{name}:"), colors);
                }
                comment(&mut out, &compiled.instructions[i].to_string(), colors);
            }
        }

        let end = region.end().min(compiled.bytes.len());
        for address in region.address..end {
            row(&mut out, address, compiled.bytes[address], colors);
        }
    }

    // Marks after the last instruction point at the end of the program.
    for name in marks.into_values().flatten() {
        comment(&mut out, &format!("{name}:"), colors);
    }

    out
}

fn comment(out: &mut String, text: &str, c: Colors) {
    out.push_str(&format!("{}# {text}{}\n", c.comment, c.reset));
}

fn row(out: &mut String, address: usize, byte: u8, c: Colors) {
    out.push_str(&format!(
        "{}{address:04X}{}: {}{byte:02X}{}\n",
        c.address, c.reset, c.value, c.reset
    ));
}
