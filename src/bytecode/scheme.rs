/*!
  Encoding schemes describe how an instruction's arguments are laid out in the three payload
  bytes that follow the opcode. Every scheme lists its operands left to right and fills whatever
  those operands leave over with zero bytes, so every instruction occupies exactly one word.

  Two-byte operands are little-endian.
*/

use strum_macros::{Display as StrumDisplay, EnumIter};

use crate::bytecode::PAYLOAD_SIZE;
use crate::error::EncodeError;

/// The three payload bytes of an encoded instruction.
pub type Payload = [u8; PAYLOAD_SIZE];

/// The size of a single operand field.
#[derive(StrumDisplay, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum OperandWidth {
  #[strum(to_string = "1 byte")]
  Byte,
  #[strum(to_string = "2 bytes")]
  Short,
}

impl OperandWidth {
  pub fn size(&self) -> usize {
    match self {
      OperandWidth::Byte => 1,
      OperandWidth::Short => 2,
    }
  }

  /// The largest value a field of this width can hold.
  pub fn max_value(&self) -> i64 {
    match self {
      OperandWidth::Byte => u8::MAX as i64,
      OperandWidth::Short => u16::MAX as i64,
    }
  }

  pub fn contains(&self, value: i64) -> bool {
    (0..=self.max_value()).contains(&value)
  }
}

use self::OperandWidth::{Byte, Short};

/**
  The payload layouts. Variant docs show the whole word, opcode included.
*/
#[derive(EnumIter, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum EncodingScheme {
  /// [OpCode:8][Byte:8][Byte:8][Byte:8]
  ThreeBytes,
  /// [OpCode:8][Byte:8][Short:16]
  ByteShort,
  /// [OpCode:8][Byte:8][Reserved:16]
  OneByte,
  /// [OpCode:8][Byte:8][Byte:8][Reserved:8]
  TwoBytes,
  /// [OpCode:8][Short:16][Reserved:8]
  OneShort,
  /// [OpCode:8][Reserved:24]
  Nullary,
}

impl EncodingScheme {
  /// Operand widths in the order they are packed.
  pub fn operands(&self) -> &'static [OperandWidth] {
    match self {
      EncodingScheme::ThreeBytes => &[Byte, Byte, Byte],
      EncodingScheme::ByteShort  => &[Byte, Short],
      EncodingScheme::OneByte    => &[Byte],
      EncodingScheme::TwoBytes   => &[Byte, Byte],
      EncodingScheme::OneShort   => &[Short],
      EncodingScheme::Nullary    => &[],
    }
  }

  pub fn arity(&self) -> usize {
    self.operands().len()
  }

  /// Number of trailing zero bytes.
  pub fn padding(&self) -> usize {
    PAYLOAD_SIZE - self.operands().iter().map(OperandWidth::size).sum::<usize>()
  }

  /**
    Packs `args` into a payload. Fails without producing any bytes if the number of arguments
    is wrong or any argument does not fit its field.
  */
  pub fn encode(&self, args: &[i64]) -> Result<Payload, EncodeError> {
    let widths = self.operands();
    if args.len() != widths.len() {
      return Err(EncodeError::ArityMismatch {
        expected: widths.len(),
        given: args.len(),
      });
    }

    let mut payload: Payload = [0; PAYLOAD_SIZE];
    let mut cursor = 0;

    for (position, (&value, &width)) in args.iter().zip(widths).enumerate() {
      if !width.contains(value) {
        return Err(EncodeError::OperandOutOfRange { position, value, width });
      }
      match width {
        Byte => payload[cursor] = value as u8,
        Short => payload[cursor..cursor + 2].copy_from_slice(&(value as u16).to_le_bytes()),
      }
      cursor += width.size();
    }

    // The remaining `self.padding()` bytes are already zero.
    Ok(payload)
  }

  /// Unpacks the operand fields of `payload`. Padding bytes are not inspected.
  pub fn decode(&self, payload: Payload) -> Vec<u16> {
    let mut cursor = 0;
    self
      .operands()
      .iter()
      .map(|width| {
        let value = match width {
          Byte => payload[cursor] as u16,
          Short => u16::from_le_bytes([payload[cursor], payload[cursor + 1]]),
        };
        cursor += width.size();
        value
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use strum::IntoEnumIterator;

  #[test]
  fn every_scheme_fills_the_payload(){
    for scheme in EncodingScheme::iter() {
      let operand_bytes: usize = scheme.operands().iter().map(OperandWidth::size).sum();
      assert_eq!(operand_bytes + scheme.padding(), PAYLOAD_SIZE, "{:?}", scheme);
    }
  }

  #[test]
  fn padding_is_zeroed(){
    assert_eq!(EncodingScheme::Nullary.encode(&[]), Ok([0, 0, 0]));
    assert_eq!(EncodingScheme::OneByte.encode(&[7]), Ok([7, 0, 0]));
    assert_eq!(EncodingScheme::TwoBytes.encode(&[7, 9]), Ok([7, 9, 0]));
    assert_eq!(EncodingScheme::OneShort.encode(&[0x1234]), Ok([0x34, 0x12, 0]));
  }

  #[test]
  fn short_fields_are_little_endian(){
    assert_eq!(EncodingScheme::ByteShort.encode(&[1, 1000]), Ok([0x01, 0xE8, 0x03]));
  }

  #[test]
  fn bounds_at_every_position(){
    for scheme in EncodingScheme::iter() {
      for (position, width) in scheme.operands().iter().enumerate() {
        for &value in &[0, width.max_value()] {
          let mut args = vec![1_i64; scheme.arity()];
          args[position] = value;
          let payload = scheme.encode(&args).unwrap();
          assert_eq!(
            scheme.decode(payload).iter().map(|&v| v as i64).collect::<Vec<_>>(),
            args,
            "{:?}", scheme
          );
        }

        for &value in &[width.max_value() + 1, -1] {
          let mut args = vec![1_i64; scheme.arity()];
          args[position] = value;
          assert_eq!(
            scheme.encode(&args),
            Err(EncodeError::OperandOutOfRange { position, value, width: *width }),
            "{:?}", scheme
          );
        }
      }
    }
  }

  #[test]
  fn width_limits(){
    assert_eq!(Byte.max_value(), 255);
    assert_eq!(Short.max_value(), 65535);
    assert!(Byte.contains(255) && !Byte.contains(256));
    assert!(Short.contains(65535) && !Short.contains(65536));
  }

  #[test]
  fn wrong_argument_count(){
    assert_eq!(
      EncodingScheme::ThreeBytes.encode(&[1, 2]),
      Err(EncodeError::ArityMismatch { expected: 3, given: 2 })
    );
    assert_eq!(
      EncodingScheme::Nullary.encode(&[1]),
      Err(EncodeError::ArityMismatch { expected: 0, given: 1 })
    );
  }

  #[test]
  fn decode_recovers_operands(){
    let scheme = EncodingScheme::ByteShort;
    let payload = scheme.encode(&[200, 40000]).unwrap();
    assert_eq!(scheme.decode(payload), vec![200, 40000]);

    let scheme = EncodingScheme::TwoBytes;
    assert_eq!(scheme.decode([3, 4, 0xAA]), vec![3, 4]);
  }
}
