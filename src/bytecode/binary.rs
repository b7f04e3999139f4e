/*!
  This module is responsible for the encoding and decoding of binary instructions.

*/

use std::convert::TryInto;

use super::{Instruction, Word, WORD_SIZE};
use crate::error::{DecodeError, EncodeError};
use crate::registry::{InstructionDescriptor, InstructionRegistry};

/**
  Encodes one instruction into a word: the opcode byte followed by the payload its scheme packs
  from `args`. It is the caller's responsibility to have resolved the descriptor for the
  mnemonic; the argument count and ranges are checked here.
*/
pub fn encode_instruction(descriptor: &InstructionDescriptor, args: &[i64]) -> Result<Word, EncodeError> {
  let payload = descriptor.scheme.encode(args)?;
  // [OpCode:8][Payload:24]
  Ok([descriptor.opcode, payload[0], payload[1], payload[2]])
}

/// Decodes a single word, or returns `None` if its opcode is not registered.
pub fn try_decode_instruction(word: Word, registry: &InstructionRegistry) -> Option<Instruction> {
  let descriptor = registry.lookup_opcode(word[0])?;
  Some(Instruction {
    mnemonic: descriptor.name.clone(),
    opcode: descriptor.opcode,
    operands: descriptor.scheme.decode([word[1], word[2], word[3]]),
  })
}

/// Decodes a whole bytecode stream, word by word from offset 0.
pub fn decode_program(bytes: &[u8], registry: &InstructionRegistry) -> Result<Vec<Instruction>, DecodeError> {
  let chunks = bytes.chunks(WORD_SIZE);
  let mut instructions = Vec::with_capacity(chunks.len());

  for (index, chunk) in chunks.enumerate() {
    let offset = index * WORD_SIZE;
    let word: Word = chunk
      .try_into()
      .map_err(|_| DecodeError::TruncatedWord { offset, remaining: chunk.len() })?;

    let instruction = try_decode_instruction(word, registry)
      .ok_or(DecodeError::UnknownOpcode { offset, opcode: word[0] })?;
    instructions.push(instruction);
  }

  Ok(instructions)
}
