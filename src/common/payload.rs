// src/common/payload.rs

use super::frame::VALUE_SEPARATOR;
use super::types::scan_value;

/// Why value decoding stopped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScanStop {
    /// The last value was not followed by `,`.
    EndOfValues,
    /// Every output slot was filled.
    OutputFull,
    /// Slot `index` did not hold a number.
    InvalidValue { index: usize },
}

/// Result of decoding a payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ValueScan {
    /// Values written to the front of the output slice.
    pub decoded: usize,
    pub stop: ScanStop,
}

/// Decodes comma-separated values from `payload` into `output`.
///
/// `payload` starts right after the `=` of an echo frame. At most
/// `output.len()` values are written; slots past `decoded` are left untouched.
pub fn parse_values(payload: &[u8], output: &mut [f64]) -> ValueScan {
    let mut cursor = payload;
    let mut decoded = 0;

    for (index, slot) in output.iter_mut().enumerate() {
        let Some((value, consumed)) = scan_value(cursor) else {
            return ValueScan { decoded, stop: ScanStop::InvalidValue { index } };
        };
        *slot = value;
        decoded += 1;

        match cursor[consumed..].split_first() {
            Some((&VALUE_SEPARATOR, rest)) => cursor = rest,
            _ => return ValueScan { decoded, stop: ScanStop::EndOfValues },
        }
    }

    ValueScan { decoded, stop: ScanStop::OutputFull }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_all_values_below_capacity() {
        let mut out = [0.0; 10];
        let scan = parse_values(b"1.0,2.5,-3.25\r", &mut out);
        assert_eq!(scan, ValueScan { decoded: 3, stop: ScanStop::EndOfValues });
        assert_eq!(&out[..3], &[1.0, 2.5, -3.25]);
    }

    #[test]
    fn stops_at_capacity_without_overrun() {
        let mut out = [0.0; 2];
        let scan = parse_values(b"1,2,3,4\n", &mut out);
        assert_eq!(scan, ValueScan { decoded: 2, stop: ScanStop::OutputFull });
        assert_eq!(out, [1.0, 2.0]);
    }

    #[test]
    fn exact_capacity_ends_on_values() {
        let mut out = [0.0; 3];
        let scan = parse_values(b"1,2,3\n", &mut out);
        assert_eq!(scan, ValueScan { decoded: 3, stop: ScanStop::EndOfValues });
    }

    #[test]
    fn zero_capacity_decodes_nothing() {
        let mut out: [f64; 0] = [];
        let scan = parse_values(b"1,2\n", &mut out);
        assert_eq!(scan, ValueScan { decoded: 0, stop: ScanStop::OutputFull });
    }

    #[test]
    fn mixed_hex_and_decimal() {
        let mut out = [0.0; 4];
        let scan = parse_values(b"0x1A,2.75,0XFF,-2\r\n", &mut out);
        assert_eq!(scan.decoded, 4);
        assert_eq!(out, [26.0, 2.75, 255.0, -2.0]);
    }

    #[test]
    fn invalid_first_value() {
        let mut out = [7.0; 3];
        let scan = parse_values(b"abc\n", &mut out);
        assert_eq!(scan, ValueScan { decoded: 0, stop: ScanStop::InvalidValue { index: 0 } });
        assert_eq!(out, [7.0; 3]);
    }

    #[test]
    fn invalid_value_after_separator_keeps_earlier_ones() {
        let mut out = [0.0; 4];
        let scan = parse_values(b"1.5,,2\n", &mut out);
        assert_eq!(scan, ValueScan { decoded: 1, stop: ScanStop::InvalidValue { index: 1 } });
        assert_eq!(out[0], 1.5);
    }

    #[test]
    fn trailing_garbage_ends_the_list() {
        let mut out = [0.0; 4];
        let scan = parse_values(b"1.5;2\n", &mut out);
        assert_eq!(scan, ValueScan { decoded: 1, stop: ScanStop::EndOfValues });
    }

    #[test]
    fn empty_payload() {
        let mut out = [0.0; 4];
        assert_eq!(
            parse_values(b"", &mut out),
            ValueScan { decoded: 0, stop: ScanStop::InvalidValue { index: 0 } }
        );
    }

    #[test]
    fn unterminated_partial_frame_still_decodes() {
        let mut out = [0.0; 4];
        let scan = parse_values(b"1,2,3", &mut out);
        assert_eq!(scan, ValueScan { decoded: 3, stop: ScanStop::EndOfValues });
    }

    #[test]
    fn round_trips_formatted_floats() {
        let values = [0.0, -0.001, 179.99, -45.5, 1.0e-7, 12345.678];
        let mut line = String::new();
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            line.push_str(&v.to_string());
        }
        line.push('\n');

        let mut out = [0.0; 8];
        let scan = parse_values(line.as_bytes(), &mut out);
        assert_eq!(scan.decoded, values.len());
        for (got, want) in out.iter().zip(values.iter()) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
    }
}
