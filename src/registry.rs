/*!
  The instruction registry maps mnemonics to the descriptors used to encode them. It is
  populated once, before any source is read, and is only read from afterwards. The emitter
  and the decoder borrow it explicitly.

  Mnemonics and opcodes are kept in a `BiMap`, so neither can be registered twice and both
  directions resolve in constant time.
*/

use std::collections::HashMap;

use bimap::BiMap;
use log::trace;
use strum::IntoEnumIterator;

use crate::bytecode::{encode_instruction, EncodingScheme, Operation, Word};
use crate::error::{EncodeError, RegistrationError, UnknownMnemonic};

/// The encoding contract of one mnemonic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstructionDescriptor {
  pub name: String,
  pub opcode: u8,
  pub arg_count: usize,
  pub scheme: EncodingScheme,
}

impl InstructionDescriptor {
  /// Encodes a complete word: the opcode followed by the packed payload.
  pub fn encode(&self, args: &[i64]) -> Result<Word, EncodeError> {
    encode_instruction(self, args)
  }
}

#[derive(Clone, Debug, Default)]
pub struct InstructionRegistry {
  names: BiMap<String, u8>,
  descriptors: HashMap<u8, InstructionDescriptor>,
}

impl InstructionRegistry {
  pub fn new() -> InstructionRegistry {
    InstructionRegistry::default()
  }

  /// A registry holding every `Operation` the VM executes.
  pub fn standard() -> InstructionRegistry {
    let mut registry = InstructionRegistry::new();
    for operation in Operation::iter() {
      registry
        .register(operation.mnemonic(), operation.code() as u32, operation.arity(), operation.scheme())
        // `Operation` discriminants are distinct bytes and its arities come from its schemes.
        .unwrap_or_else(|e| unreachable!("{}", e));
    }
    registry
  }

  pub fn register(
    &mut self,
    name: &str,
    opcode: u32,
    arg_count: usize,
    scheme: EncodingScheme,
  ) -> Result<(), RegistrationError> {
    if opcode > u8::MAX as u32 {
      return Err(RegistrationError::OpcodeOutOfRange { name: name.to_string(), opcode });
    }
    let opcode = opcode as u8;

    if scheme.arity() != arg_count {
      return Err(RegistrationError::ArityMismatch {
        name: name.to_string(),
        arg_count,
        scheme_arity: scheme.arity(),
      });
    }
    if self.names.contains_left(name) {
      return Err(RegistrationError::DuplicateName(name.to_string()));
    }
    if let Some(existing) = self.names.get_by_right(&opcode) {
      return Err(RegistrationError::DuplicateOpcode {
        name: name.to_string(),
        opcode,
        existing: existing.clone(),
      });
    }

    trace!("registering {} as {:#04X} ({:?})", name, opcode, scheme);
    self.names.insert(name.to_string(), opcode);
    self.descriptors.insert(
      opcode,
      InstructionDescriptor { name: name.to_string(), opcode, arg_count, scheme },
    );
    Ok(())
  }

  pub fn lookup(&self, name: &str) -> Result<&InstructionDescriptor, UnknownMnemonic> {
    self
      .names
      .get_by_left(name)
      .and_then(|opcode| self.descriptors.get(opcode))
      .ok_or_else(|| UnknownMnemonic(name.to_string()))
  }

  pub fn lookup_opcode(&self, opcode: u8) -> Option<&InstructionDescriptor> {
    self.descriptors.get(&opcode)
  }

  pub fn len(&self) -> usize {
    self.descriptors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.descriptors.is_empty()
  }

  /// Descriptors in opcode order.
  pub fn descriptors(&self) -> Vec<&InstructionDescriptor> {
    let mut descriptors: Vec<_> = self.descriptors.values().collect();
    descriptors.sort_by_key(|d| d.opcode);
    descriptors
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn standard_registrations_all_succeed(){
    let mut registry = InstructionRegistry::new();
    for operation in Operation::iter() {
      assert_eq!(
        registry.register(operation.mnemonic(), operation.code() as u32, operation.arity(), operation.scheme()),
        Ok(())
      );
    }
    assert_eq!(registry.len(), InstructionRegistry::standard().len());
  }

  #[test]
  fn standard_instruction_set(){
    let registry = InstructionRegistry::standard();
    assert_eq!(registry.len(), 15);

    let table: Vec<(&str, u8, usize, EncodingScheme)> = registry
      .descriptors()
      .into_iter()
      .map(|d| (d.name.as_str(), d.opcode, d.arg_count, d.scheme))
      .collect();
    assert_eq!(
      table,
      vec![
        ("NOOP",  0,   0, EncodingScheme::Nullary),
        ("LOADI", 1,   2, EncodingScheme::ByteShort),
        ("ADD",   2,   3, EncodingScheme::ThreeBytes),
        ("PRNT",  3,   1, EncodingScheme::OneByte),
        ("AND",   4,   3, EncodingScheme::ThreeBytes),
        ("OR",    5,   3, EncodingScheme::ThreeBytes),
        ("NOT",   6,   1, EncodingScheme::OneByte),
        ("JNE",   7,   1, EncodingScheme::OneShort),
        ("SUB",   8,   3, EncodingScheme::ThreeBytes),
        ("MUL",   9,   3, EncodingScheme::ThreeBytes),
        ("CMP",   10,  2, EncodingScheme::TwoBytes),
        ("JEQ",   11,  1, EncodingScheme::OneShort),
        ("LOAD",  12,  2, EncodingScheme::ByteShort),
        ("STORE", 13,  2, EncodingScheme::ByteShort),
        ("HLT",   255, 0, EncodingScheme::Nullary),
      ]
    );
  }

  #[test]
  fn unknown_mnemonic(){
    let registry = InstructionRegistry::standard();
    assert_eq!(registry.lookup("FOO"), Err(UnknownMnemonic("FOO".to_string())));
    assert!(registry.lookup("add").is_err());
    assert_eq!(registry.lookup("ADD").map(|d| d.opcode), Ok(2));
  }

  #[test]
  fn every_word_is_four_bytes(){
    let registry = InstructionRegistry::standard();
    for descriptor in registry.descriptors() {
      let args = vec![1_i64; descriptor.arg_count];
      let word = descriptor.encode(&args).unwrap();
      assert_eq!(word.len(), 4);
      assert_eq!(word[0], descriptor.opcode);
    }
  }

  #[test]
  fn encode_rejects_wrong_arity(){
    let registry = InstructionRegistry::standard();
    let add = registry.lookup("ADD").unwrap();
    assert_eq!(add.encode(&[1, 2]), Err(EncodeError::ArityMismatch { expected: 3, given: 2 }));
  }

  #[test]
  fn rejects_bad_registrations(){
    let mut registry = InstructionRegistry::new();
    registry.register("PUSH", 0x20, 1, EncodingScheme::OneByte).unwrap();

    assert_eq!(
      registry.register("BIG", 256, 0, EncodingScheme::Nullary),
      Err(RegistrationError::OpcodeOutOfRange { name: "BIG".to_string(), opcode: 256 })
    );
    assert_eq!(
      registry.register("PUSH", 0x21, 1, EncodingScheme::OneByte),
      Err(RegistrationError::DuplicateName("PUSH".to_string()))
    );
    assert_eq!(
      registry.register("POP", 0x20, 1, EncodingScheme::OneByte),
      Err(RegistrationError::DuplicateOpcode {
        name: "POP".to_string(),
        opcode: 0x20,
        existing: "PUSH".to_string(),
      })
    );
    assert_eq!(
      registry.register("POP", 0x21, 2, EncodingScheme::OneByte),
      Err(RegistrationError::ArityMismatch { name: "POP".to_string(), arg_count: 2, scheme_arity: 1 })
    );
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn custom_instruction_encodes(){
    let mut registry = InstructionRegistry::new();
    registry.register("PUSH", 0x20, 1, EncodingScheme::OneShort).unwrap();
    let push = registry.lookup("PUSH").unwrap();
    assert_eq!(push.encode(&[0x0102]), Ok([0x20, 0x02, 0x01, 0x00]));
    assert_eq!(registry.lookup_opcode(0x20), Some(push));
    assert_eq!(registry.lookup_opcode(0x21), None);
  }
}
