use std::fmt::{Display, Formatter};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

use super::EncodingScheme;

/**
  Opcodes of the virtual machine. The discriminant of each variant is the byte the VM
  dispatches on, and the variant name is the mnemonic used in assembly source.

  The VM's fetch loop reads one word at a time, so any new operation must use one of the
  `EncodingScheme` layouts.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq, PartialEq,  Debug,    Hash
)]
#[repr(u8)]
#[allow(clippy::upper_case_acronyms)]
pub enum Operation {
  NOOP  = 0x00,  // NOOP

  // Memory //
  LOADI = 0x01,  // LOADI reg value
  LOAD  = 0x0C,  // LOAD reg address
  STORE = 0x0D,  // STORE reg address

  // Arithmetic //
  ADD   = 0x02,  // ADD dst src1 src2
  SUB   = 0x08,  // SUB dst src1 src2
  MUL   = 0x09,  // MUL dst src1 src2

  // Logic //
  AND   = 0x04,  // AND dst src1 src2
  OR    = 0x05,  // OR dst src1 src2
  NOT   = 0x06,  // NOT reg
  CMP   = 0x0A,  // CMP reg1 reg2

  // Jumps //
  JNE   = 0x07,  // JNE address
  JEQ   = 0x0B,  // JEQ address

  PRNT  = 0x03,  // PRNT reg
  HLT   = 0xFF,  // HLT
}

impl Operation {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  pub fn mnemonic(&self) -> &'static str {
    self.into()
  }

  pub fn scheme(&self) -> EncodingScheme {
    match self {
      Operation::ADD
      | Operation::SUB
      | Operation::MUL
      | Operation::AND
      | Operation::OR => EncodingScheme::ThreeBytes,

      Operation::LOADI
      | Operation::LOAD
      | Operation::STORE => EncodingScheme::ByteShort,

      Operation::PRNT
      | Operation::NOT => EncodingScheme::OneByte,

      Operation::CMP => EncodingScheme::TwoBytes,

      Operation::JNE
      | Operation::JEQ => EncodingScheme::OneShort,

      Operation::NOOP
      | Operation::HLT => EncodingScheme::Nullary,
    }
  }

  pub fn arity(&self) -> usize {
    self.scheme().arity()
  }
}

/// A decoded instruction: the mnemonic it was registered under and its operand values.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Instruction {
  pub mnemonic: String,
  pub opcode: u8,
  pub operands: Vec<u16>,
}

/// Formats as the assembly line that produces this instruction.
impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.mnemonic)?;
    for operand in &self.operands {
      write!(f, " {}", operand)?;
    }
    Ok(())
  }
}
