/*!

  The VM executes a flat stream of 32 bit instruction words with no header, footer or length
  prefix. The VM fetches one word at a time starting at offset 0, so every instruction is
  exactly one word, regardless of how many operands it takes. The first byte of a word is the
  opcode. The remaining three bytes are the payload:

    Opcode:   8 bits
    Payload: 24 bits, laid out by the instruction's `EncodingScheme`

  Payload fields are either one byte (registers, small immediates) or two bytes (memory
  addresses, 16 bit immediates). Two byte fields are little-endian in the file regardless of the
  host's byte order. Payload bytes not used by any operand are zero.

  Opcodes are an enum only for the fixed instruction set the VM executes. The encoder itself
  works from `InstructionDescriptor`s, so an instruction registered at runtime encodes the same
  way as a built-in one.

*/

mod assembly;
mod binary;
mod instruction;
mod scheme;

pub use assembly::{parse_assembly, parse_line, AssemblyUnit};
pub use binary::{decode_program, encode_instruction, try_decode_instruction};
pub use instruction::{Instruction, Operation};
pub use scheme::{EncodingScheme, OperandWidth, Payload};

/// Bytes in an encoded instruction.
pub const WORD_SIZE: usize = 4;
/// Bytes following the opcode.
pub const PAYLOAD_SIZE: usize = WORD_SIZE - 1;

/// An encoded instruction in file order: opcode first.
pub type Word = [u8; WORD_SIZE];
