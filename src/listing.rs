//! Tabular listing of a bytecode program: one row per word with its offset, raw bytes and the
//! assembly it decodes to.

use lazy_static::lazy_static;
use prettytable::{format as TableFormat, row, Table};

use crate::bytecode::{decode_program, WORD_SIZE};
use crate::error::DecodeError;
use crate::registry::InstructionRegistry;

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

pub fn make_listing_table(bytes: &[u8], registry: &InstructionRegistry) -> Result<Table, DecodeError> {
  let instructions = decode_program(bytes, registry)?;

  let mut table = Table::new();
  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->"Offset", ubl->"Bytes", ubl->"Instruction"]);

  for (index, (word, instruction)) in bytes.chunks(WORD_SIZE).zip(&instructions).enumerate() {
    let offset = index * WORD_SIZE;
    let raw = word
      .iter()
      .map(|b| format!("{:02X}", b))
      .collect::<Vec<String>>()
      .join(" ");
    table.add_row(row![r->format!("{:04X}", offset), raw, instruction]);
  }

  Ok(table)
}
