//! Error types for every stage: registering instructions, packing operands, assembling source
//! lines and decoding bytecode.

use thiserror::Error;

use crate::bytecode::OperandWidth;

/// A failure to pack an argument list into a payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
  #[error("expected {expected} operands but was given {given}")]
  ArityMismatch { expected: usize, given: usize },

  /// `position` is 0-based.
  #[error("operand {position} has value {value}, which does not fit in {width}")]
  OperandOutOfRange {
    position: usize,
    value: i64,
    width: OperandWidth,
  },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown mnemonic `{0}`")]
pub struct UnknownMnemonic(pub String);

/// Rejected calls to `InstructionRegistry::register`. These are programmer errors in the
/// instruction table, never caused by assembly input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
  #[error("invalid registration of {name}: opcode {opcode} does not fit in a byte")]
  OpcodeOutOfRange { name: String, opcode: u32 },

  #[error("invalid registration: mnemonic {0} is already registered")]
  DuplicateName(String),

  #[error("invalid registration of {name}: opcode {opcode:#04X} already belongs to {existing}")]
  DuplicateOpcode {
    name: String,
    opcode: u8,
    existing: String,
  },

  #[error("invalid registration of {name}: {arg_count} arguments declared but the scheme takes {scheme_arity}")]
  ArityMismatch {
    name: String,
    arg_count: usize,
    scheme_arity: usize,
  },
}

/// Fatal errors while assembling a source program. Lines are 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssemblyError {
  #[error("Error on line {line}: {mnemonic} is not an operation")]
  UnknownMnemonic { line: usize, mnemonic: String },

  #[error("Error on line {line}: {mnemonic} requires {expected} arguments but was given {given}: ({})", .args.join(", "))]
  ArityMismatch {
    line: usize,
    mnemonic: String,
    expected: usize,
    given: usize,
    args: Vec<String>,
  },

  #[error("Error on line {line}: {mnemonic}: `{token}` is not a decimal integer")]
  MalformedOperand {
    line: usize,
    mnemonic: String,
    token: String,
  },

  #[error("Error on line {line}: {mnemonic}: `{token}` does not fit in {width}")]
  OperandOutOfRange {
    line: usize,
    mnemonic: String,
    token: String,
    width: OperandWidth,
  },
}

impl AssemblyError {
  pub fn line(&self) -> usize {
    match self {
      AssemblyError::UnknownMnemonic { line, .. }
      | AssemblyError::ArityMismatch { line, .. }
      | AssemblyError::MalformedOperand { line, .. }
      | AssemblyError::OperandOutOfRange { line, .. } => *line,
    }
  }
}

/// Failures reading a bytecode stream back into instructions. Offsets are in bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
  #[error("truncated instruction at offset {offset:#06X}: only {remaining} bytes left")]
  TruncatedWord { offset: usize, remaining: usize },

  #[error("unknown opcode {opcode:#04X} at offset {offset:#06X}")]
  UnknownOpcode { offset: usize, opcode: u8 },
}
