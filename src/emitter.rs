/*!
  The emitter drives assembly: for every tokenized line, in order, it resolves the mnemonic,
  checks the argument count, parses the arguments and appends the encoded word to its buffer.

  The first error aborts the run. `assemble` and `assemble_units` only ever return the complete
  bytecode or an error, never a truncated buffer.
*/

use std::num::IntErrorKind;

use log::debug;

use crate::bytecode::{encode_instruction, parse_assembly, AssemblyUnit, OperandWidth, WORD_SIZE};
use crate::error::{AssemblyError, EncodeError};
use crate::registry::InstructionRegistry;

/// Parses an argument token as a base-10 integer.
fn parse_operand(
  unit: &AssemblyUnit<'_>,
  token: &str,
  width: OperandWidth,
) -> Result<i64, AssemblyError> {
  token.parse::<i64>().map_err(|e| match e.kind() {
    // A decimal integer, just not one any field can hold.
    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => AssemblyError::OperandOutOfRange {
      line: unit.line,
      mnemonic: unit.mnemonic.to_string(),
      token: token.to_string(),
      width,
    },
    _ => AssemblyError::MalformedOperand {
      line: unit.line,
      mnemonic: unit.mnemonic.to_string(),
      token: token.to_string(),
    },
  })
}

pub struct Emitter<'r> {
  registry: &'r InstructionRegistry,
  buffer: Vec<u8>,
}

impl<'r> Emitter<'r> {
  pub fn new(registry: &'r InstructionRegistry) -> Emitter<'r> {
    Emitter {
      registry,
      buffer: Vec::new(),
    }
  }

  /// Encodes `unit` and appends it. Nothing is appended if this fails.
  pub fn emit(&mut self, unit: &AssemblyUnit<'_>) -> Result<(), AssemblyError> {
    let descriptor = self
      .registry
      .lookup(unit.mnemonic)
      .map_err(|_| AssemblyError::UnknownMnemonic {
        line: unit.line,
        mnemonic: unit.mnemonic.to_string(),
      })?;

    if unit.args.len() != descriptor.arg_count {
      return Err(AssemblyError::ArityMismatch {
        line: unit.line,
        mnemonic: unit.mnemonic.to_string(),
        expected: descriptor.arg_count,
        given: unit.args.len(),
        args: unit.args.iter().map(|s| s.to_string()).collect(),
      });
    }

    let args = unit
      .args
      .iter()
      .zip(descriptor.scheme.operands())
      .map(|(token, &width)| parse_operand(unit, token, width))
      .collect::<Result<Vec<i64>, AssemblyError>>()?;

    let word = encode_instruction(descriptor, &args).map_err(|e| match e {
      EncodeError::OperandOutOfRange { position, width, .. } => AssemblyError::OperandOutOfRange {
        line: unit.line,
        mnemonic: unit.mnemonic.to_string(),
        token: unit.args[position].to_string(),
        width,
      },
      // The count was checked against the descriptor above.
      EncodeError::ArityMismatch { expected, given } => AssemblyError::ArityMismatch {
        line: unit.line,
        mnemonic: unit.mnemonic.to_string(),
        expected,
        given,
        args: unit.args.iter().map(|s| s.to_string()).collect(),
      },
    })?;

    debug!(
      "{:04X}: {:02X} {:02X} {:02X} {:02X}  ; line {}: {}",
      self.buffer.len(), word[0], word[1], word[2], word[3], unit.line, unit.mnemonic
    );
    self.buffer.extend_from_slice(&word);
    Ok(())
  }

  /// Number of words emitted so far.
  pub fn len(&self) -> usize {
    self.buffer.len() / WORD_SIZE
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  /// Hands over the bytecode.
  pub fn finish(self) -> Vec<u8> {
    self.buffer
  }
}

/// Assembles already tokenized lines.
pub fn assemble_units<'a, I>(units: I, registry: &InstructionRegistry) -> Result<Vec<u8>, AssemblyError>
where
  I: IntoIterator<Item = AssemblyUnit<'a>>,
{
  let mut emitter = Emitter::new(registry);
  for unit in units {
    emitter.emit(&unit)?;
  }
  Ok(emitter.finish())
}

/// Assembles a complete source text.
pub fn assemble(text: &str, registry: &InstructionRegistry) -> Result<Vec<u8>, AssemblyError> {
  let mut emitter = Emitter::new(registry);
  for unit in parse_assembly(text) {
    emitter.emit(&unit)?;
  }
  debug!("assembled {} instructions", emitter.len());
  Ok(emitter.finish())
}
