use std::fmt::Display;

use tracing::debug;

use crate::error::{DecodeError, EncodeError};
use crate::feature_map::RegisterDescriptor;

/// 16-bit value stored in Modbus register.
pub type Word = u16;

/// Characters of the parameter value consumed per payload byte.
const CHUNK_LEN: usize = 2;

/// Encode the parameter `value` into the payload written to the registers described by `descriptor`.
///
/// The payload length is fixed by the descriptor: shorter values are zero-padded and longer ones truncated.
/// Fails with [`EncodeError::NoMessages`] if the register type cannot be written.
pub fn encode(
    key: &str,
    value: &str,
    descriptor: &RegisterDescriptor,
) -> Result<Vec<u8>, EncodeError> {
    let len = descriptor.payload_len().ok_or(EncodeError::NoMessages)?;
    debug!(
        key,
        register_type = ?descriptor.register_type,
        register_count = descriptor.register_count,
        "encoding parameter"
    );

    let mut bytes = vec![0; len];
    for (index, byte) in bytes.iter_mut().enumerate() {
        let start = index * CHUNK_LEN;
        let end = start + CHUNK_LEN;
        if end > value.len() {
            break;
        }
        let word = parse_chunk(value, start, end).ok_or_else(|| EncodeError::InvalidDigits {
            key: key.to_string(),
            index,
            chunk: String::from_utf8_lossy(&value.as_bytes()[start..end]).into_owned(),
        })?;
        // Low byte only.
        *byte = word as u8;
    }

    debug!(key, ?bytes, "encoded parameter");
    Ok(bytes)
}

fn parse_chunk(value: &str, start: usize, end: usize) -> Option<Word> {
    let chunk = value.get(start..end)?;
    if !chunk.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    chunk.parse().ok()
}

/// Decode the first device message into lowercase hexadecimal text.
///
/// The first two bytes are read as a big-endian [`Word`]; a single byte is taken as the low byte.
pub fn decode<B: AsRef<[u8]>>(messages: &[B]) -> Result<String, DecodeError> {
    let bytes = messages
        .first()
        .map(AsRef::<[u8]>::as_ref)
        .ok_or(DecodeError::NoMessages)?;
    let word = match *bytes {
        [] => return Err(DecodeError::NoMessages),
        [lo] => Word::from_be_bytes([0, lo]),
        [hi, lo, ..] => Word::from_be_bytes([hi, lo]),
    };
    let data = format!("{word:x}");

    debug!(?bytes, word, %data, "decoded device message");
    Ok(data)
}

/// Render `value` as a parameter value, left-padding it with `0` to whole chunks.
///
/// Only values printing as plain decimal digits (unsigned integers) encode without [`EncodeError::InvalidDigits`].
pub fn digits(value: impl Display) -> String {
    let mut digits = value.to_string();
    if digits.len() % CHUNK_LEN != 0 {
        digits.insert(0, '0');
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_map::RegisterType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_length_depends_only_on_descriptor() {
        for value in ["", "0", "07", "0799", "01020304050607080910"] {
            for cnt in [0, 1, 2, 5] {
                let holding = encode("k", value, &RegisterDescriptor::holding(cnt)).unwrap();
                assert_eq!(holding.len(), 2 * cnt as usize, "holding {cnt} {value:?}");

                let coil = encode("k", value, &RegisterDescriptor::coil(cnt)).unwrap();
                assert_eq!(coil.len(), cnt as usize, "coil {cnt} {value:?}");
            }
        }
    }

    #[test]
    fn test_encode_zero_padding() {
        let bytes = encode("k", "07", &RegisterDescriptor::holding(2)).unwrap();
        assert_eq!(bytes, vec![7, 0, 0, 0]);
    }

    #[test]
    fn test_encode_truncation() {
        let bytes = encode("k", "0799", &RegisterDescriptor::holding(1)).unwrap();
        assert_eq!(bytes, vec![7, 99]);

        let bytes = encode("k", "0799", &RegisterDescriptor::coil(1)).unwrap();
        assert_eq!(bytes, vec![7]);
    }

    #[test]
    fn test_encode_ignores_dangling_character() {
        // "123" has one full chunk, the trailing "3" is not a chunk
        let bytes = encode("k", "123", &RegisterDescriptor::coil(2)).unwrap();
        assert_eq!(bytes, vec![12, 0]);
    }

    #[test]
    fn test_encode_invalid_digits() {
        for value in ["0a", "07x1", "+7", " 7", "-1"] {
            let err = encode("speed", value, &RegisterDescriptor::holding(1)).unwrap_err();
            assert!(
                matches!(err, EncodeError::InvalidDigits { ref key, .. } if key == "speed"),
                "{value:?}: {err:?}"
            );
        }

        let err = encode("speed", "07x1", &RegisterDescriptor::holding(1)).unwrap_err();
        assert_eq!(
            err,
            EncodeError::InvalidDigits {
                key: "speed".to_string(),
                index: 1,
                chunk: "x1".to_string()
            }
        );
    }

    #[test]
    fn test_encode_invalid_digits_outside_payload_are_ignored() {
        let bytes = encode("k", "07xx", &RegisterDescriptor::coil(1)).unwrap();
        assert_eq!(bytes, vec![7]);
    }

    #[test]
    fn test_encode_non_ascii_does_not_panic() {
        let err = encode("k", "0é", &RegisterDescriptor::holding(1)).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidDigits { index: 0, .. }));

        let err = encode("k", "é0", &RegisterDescriptor::holding(1)).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidDigits { index: 0, .. }));
    }

    #[test]
    fn test_encode_read_only_register() {
        let descriptor = RegisterDescriptor::new(RegisterType::Input, 1);
        assert_eq!(encode("k", "07", &descriptor), Err(EncodeError::NoMessages));
    }

    #[test]
    fn test_decode() {
        for (message, expected) in [
            (vec![0x00u8, 0x07], "7"),
            (vec![0x00, 0xff], "ff"),
            (vec![0x01, 0x00], "100"),
            (vec![0xff, 0xff], "ffff"),
            (vec![0x00, 0x00], "0"),
            (vec![0x12, 0x34, 0x56], "1234"),
            (vec![0x07], "7"),
        ] {
            assert_eq!(decode(&[message.clone()]).unwrap(), expected, "{message:?}");
        }
    }

    #[test]
    fn test_decode_single_byte_is_zero_padded() {
        assert_eq!(decode(&[[0x07u8]]), decode(&[[0x00u8, 0x07]]));
    }

    #[test]
    fn test_decode_uses_first_message_only() {
        let messages: [&[u8]; 2] = [&[0x00, 0x07], &[0x01, 0x00]];
        assert_eq!(decode(&messages).unwrap(), "7");
    }

    #[test]
    fn test_decode_no_messages() {
        let none: [&[u8]; 0] = [];
        assert_eq!(decode(&none), Err(DecodeError::NoMessages));

        let empty: [&[u8]; 2] = [&[], &[0x00, 0x07]];
        assert_eq!(decode(&empty), Err(DecodeError::NoMessages));
    }

    #[test]
    fn test_digits() {
        assert_eq!(digits(7), "07");
        assert_eq!(digits(99), "99");
        assert_eq!(digits(123), "0123");
        assert_eq!(digits("0799"), "0799");
        assert_eq!(digits(""), "");
    }
}
