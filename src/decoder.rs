/// Sensor payload decoding
///
/// Pure functions from raw characteristic payloads to physical quantities.
/// Nothing in here performs I/O or keeps state between calls; the byte
/// order and color scale differences between firmware revisions come in as
/// parameters (see [`crate::config::DeviceProfile`]).
use thiserror::Error;

use crate::models::{Celsius, Fahrenheit, Kilopascals, Pascals, RelativeHumidity, Rgba};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("empty integer payload")]
    EmptyPayload,
    #[error("malformed color payload: {0}")]
    MalformedColorPayload(String),
    #[error("color field {0:?} is not an integer")]
    InvalidNumericField(String),
}

/// Byte order of multi-byte integer characteristics.
///
/// Rev1 firmware transmits little-endian, rev2 big-endian; neither is
/// hard-coded here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

/// Interpret a byte sequence as an unsigned integer under the given byte
/// order.
///
/// Fails only on an empty payload. Payloads longer than eight bytes reduce
/// modulo 2^64; the device sends at most four.
pub fn decode_integer(bytes: &[u8], order: ByteOrder) -> Result<u64, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }

    let value = match order {
        ByteOrder::Big => bytes
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
        ByteOrder::Little => bytes
            .iter()
            .rev()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
    };

    Ok(value)
}

/// Temperature arrives as centidegrees Celsius (fixed-point, two implied
/// decimal digits); convert to Fahrenheit for display.
pub fn scale_temperature(raw: u64) -> Fahrenheit {
    Celsius(raw as f64 / 100.0).to_fahrenheit()
}

/// Humidity arrives as centipercent (fixed-point, two implied decimal
/// digits).
pub fn scale_humidity(raw: u64) -> RelativeHumidity {
    RelativeHumidity(raw as f64 / 100.0)
}

/// Pressure arrives as decipascals (fixed-point, one implied decimal
/// digit); convert to kilopascals for display.
pub fn scale_pressure(raw: u64) -> Kilopascals {
    Pascals(raw as f64 / 10.0).to_kilopascals()
}

/// Extract the comma-separated field string from a color payload.
///
/// The payload is UTF-8 text terminated by a single NUL sentinel, e.g.
/// `b"534,300,234,983\0"`. The sentinel is a firmware observation rather
/// than a verified contract, so stripping is conditional: exactly one
/// trailing NUL is removed when present, and a payload without one is used
/// as-is instead of losing its last digit.
pub fn color_text(payload: &[u8]) -> Result<&str, DecodeError> {
    let trimmed = match payload.split_last() {
        Some((&0, rest)) => rest,
        _ => payload,
    };

    std::str::from_utf8(trimmed)
        .map_err(|e| DecodeError::MalformedColorPayload(format!("payload is not UTF-8: {e}")))
}

/// Decode the vendor color characteristic into 8-bit RGBA.
///
/// The four fields are raw sensor counts in `[0, raw_max]`; each is scaled
/// down to `[0, 255]`. Counts above `raw_max` clamp to 255.
pub fn decode_color(payload: &[u8], raw_max: u32) -> Result<Rgba, DecodeError> {
    let text = color_text(payload)?;
    let fields: Vec<&str> = text.split(',').collect();

    if fields.len() != 4 {
        return Err(DecodeError::MalformedColorPayload(format!(
            "expected 4 comma-separated fields, got {} in {:?}",
            fields.len(),
            text
        )));
    }

    let mut channels = [0u8; 4];
    for (channel, field) in channels.iter_mut().zip(&fields) {
        let value: u64 = field
            .trim()
            .parse()
            .map_err(|_| DecodeError::InvalidNumericField(field.to_string()))?;
        *channel = rescale(value, raw_max);
    }

    Ok(Rgba {
        red: channels[0],
        green: channels[1],
        blue: channels[2],
        intensity: channels[3],
    })
}

/// Scale a raw count from `[0, raw_max]` down to `[0, 255]`.
fn rescale(value: u64, raw_max: u32) -> u8 {
    let max = u64::from(raw_max);
    if value >= max {
        return 255;
    }
    (value * 255 / max) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_integer_little_endian() {
        let value = decode_integer(&[0xB8, 0x08, 0x00, 0x00], ByteOrder::Little).unwrap();
        assert_eq!(value, 2232);
    }

    #[test]
    fn decode_integer_big_endian() {
        let value = decode_integer(&[0x00, 0x00, 0x08, 0xB8], ByteOrder::Big).unwrap();
        assert_eq!(value, 2232);
    }

    #[test]
    fn decode_integer_single_byte_orders_agree() {
        assert_eq!(decode_integer(&[0x2A], ByteOrder::Big).unwrap(), 42);
        assert_eq!(decode_integer(&[0x2A], ByteOrder::Little).unwrap(), 42);
    }

    #[test]
    fn decode_integer_matches_standard_interpretation() {
        let bytes = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0];
        assert_eq!(
            decode_integer(&bytes, ByteOrder::Big).unwrap(),
            u64::from_be_bytes(bytes)
        );
        assert_eq!(
            decode_integer(&bytes, ByteOrder::Little).unwrap(),
            u64::from_le_bytes(bytes)
        );
    }

    #[test]
    fn decode_integer_empty_payload_fails() {
        assert_eq!(
            decode_integer(&[], ByteOrder::Little),
            Err(DecodeError::EmptyPayload)
        );
    }

    #[test]
    fn decode_integer_is_idempotent() {
        let bytes = [0x01, 0x02, 0x03];
        let first = decode_integer(&bytes, ByteOrder::Big).unwrap();
        let second = decode_integer(&bytes, ByteOrder::Big).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn temperature_centidegrees_to_fahrenheit() {
        let f = scale_temperature(2350);
        assert!((f.0 - 74.3).abs() < 1e-9, "got {}", f.0);
    }

    #[test]
    fn humidity_centipercent() {
        assert_eq!(scale_humidity(2350), RelativeHumidity(23.5));
    }

    #[test]
    fn pressure_decipascals_to_kilopascals() {
        let kpa = scale_pressure(988343);
        assert!((kpa.0 - 98.8343).abs() < 1e-9, "got {}", kpa.0);
    }

    #[test]
    fn scaling_is_monotonic() {
        let pairs = [(0u64, 1u64), (2349, 2350), (988342, 988343)];
        for (a, b) in pairs {
            assert!(scale_temperature(a).0 < scale_temperature(b).0);
            assert!(scale_humidity(a).0 < scale_humidity(b).0);
            assert!(scale_pressure(a).0 < scale_pressure(b).0);
        }
    }

    #[test]
    fn decode_color_12_bit_firmware() {
        let rgba = decode_color(b"2660,2059,1787,4097\0", 4097).unwrap();
        assert_eq!(
            rgba,
            Rgba {
                red: 165,
                green: 128,
                blue: 111,
                intensity: 255,
            }
        );
    }

    #[test]
    fn decode_color_16_bit_firmware() {
        let rgba = decode_color(b"65535,0,32768,65535\0", 65535).unwrap();
        assert_eq!(rgba.red, 255);
        assert_eq!(rgba.green, 0);
        assert_eq!(rgba.blue, 127);
        assert_eq!(rgba.intensity, 255);
    }

    #[test]
    fn decode_color_without_sentinel_keeps_last_digit() {
        let with = decode_color(b"100,200,300,400\0", 4097).unwrap();
        let without = decode_color(b"100,200,300,400", 4097).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn decode_color_clamps_out_of_domain_counts() {
        let rgba = decode_color(b"5000,0,0,0\0", 4097).unwrap();
        assert_eq!(rgba.red, 255);
    }

    #[test]
    fn decode_color_too_few_fields() {
        let err = decode_color(b"1,2,3\0", 4097).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedColorPayload(_)));
    }

    #[test]
    fn decode_color_too_many_fields() {
        let err = decode_color(b"1,2,3,4,5\0", 4097).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedColorPayload(_)));
    }

    #[test]
    fn decode_color_non_numeric_field() {
        let err = decode_color(b"1,2,x,4\0", 4097).unwrap_err();
        assert_eq!(err, DecodeError::InvalidNumericField("x".to_string()));
    }

    #[test]
    fn decode_color_rejects_non_utf8() {
        let err = decode_color(&[0xFF, 0xFE, 0x00], 4097).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedColorPayload(_)));
    }

    #[test]
    fn color_rescaling_preserves_channel_order() {
        let low = decode_color(b"100,200,300,400\0", 4097).unwrap();
        let high = decode_color(b"1100,1200,1300,1400\0", 4097).unwrap();
        assert!(low.red < high.red);
        assert!(low.green < high.green);
        assert!(low.blue < high.blue);
        assert!(low.intensity < high.intensity);
    }

    #[test]
    fn color_text_strips_exactly_one_sentinel() {
        assert_eq!(color_text(b"1,2,3,4\0").unwrap(), "1,2,3,4");
        assert_eq!(color_text(b"1,2,3,4").unwrap(), "1,2,3,4");
    }
}
