/*!
  A single-pass assembler for a small register VM. Each source line is one instruction and
  becomes one 4 byte word; see `bytecode` for the word format.

  ```
  use rvm_asm::{assemble, InstructionRegistry};

  let registry = InstructionRegistry::standard();
  let bytecode = assemble("LOADI 1 1000\nHLT\n", &registry).unwrap();
  assert_eq!(bytecode, vec![0x01, 0x01, 0xE8, 0x03, 0xFF, 0x00, 0x00, 0x00]);
  ```
*/

pub mod bytecode;
pub mod emitter;
pub mod error;
pub mod listing;
pub mod registry;

pub use emitter::{assemble, assemble_units, Emitter};
pub use error::{AssemblyError, DecodeError, EncodeError, RegistrationError, UnknownMnemonic};
pub use registry::{InstructionDescriptor, InstructionRegistry};
