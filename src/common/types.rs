// src/common/types.rs

use core::str::{self, FromStr};

// --- Single value scanning ---

/// Parses one value from the start of `input`.
///
/// `0x`/`0X` introduces an unsigned hexadecimal integer; anything else is read
/// as a decimal float (`[+-]digits[.digits][(e|E)[+-]digits]`). Returns the
/// value and the number of bytes consumed, or `None` if no digits were found.
/// Scanning stops at the first byte that cannot extend the number.
pub fn scan_value(input: &[u8]) -> Option<(f64, usize)> {
    match input {
        [b'0', b'x' | b'X', rest @ ..] => scan_hex(rest).map(|(v, n)| (v, n + 2)),
        _ => scan_decimal(input),
    }
}

fn scan_hex(input: &[u8]) -> Option<(f64, usize)> {
    let digits = input.iter().take_while(|b| b.is_ascii_hexdigit()).count();
    if digits == 0 {
        return None;
    }
    // Saturate like strtoul rather than wrap
    let value = input[..digits].iter().fold(0u64, |acc, &b| {
        let nibble = (b as char).to_digit(16).unwrap_or(0) as u64;
        acc.checked_mul(16)
            .and_then(|v| v.checked_add(nibble))
            .unwrap_or(u64::MAX)
    });
    Some((value as f64, digits))
}

fn scan_decimal(input: &[u8]) -> Option<(f64, usize)> {
    let count_digits = |from: usize| input[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = 0;
    if matches!(input.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_digits = count_digits(end);
    end += int_digits;

    let mut frac_digits = 0;
    if input.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        end += 1 + frac_digits;
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    // Exponent only counts if at least one digit follows
    if matches!(input.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(input.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let text = str::from_utf8(&input[..end]).ok()?;
    let value = f64::from_str(text).ok()?;
    Some((value, end))
}

// --- Orientation readings ---

/// Euler angles as returned by the `e` command, in wire order.
///
/// Values are passed through in the sensor's own units.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct EulerAngles {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl EulerAngles {
    /// Number of values a reply must carry.
    pub const FIELD_COUNT: usize = 3;

    /// Builds from decoded values, or `None` if fewer than three are present.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        match values {
            [roll, pitch, yaw, ..] => Some(EulerAngles { roll: *roll, pitch: *pitch, yaw: *yaw }),
            _ => None,
        }
    }
}

/// Quaternion components as returned by the `q` command.
///
/// Component order follows the sensor's output configuration, so they are
/// kept as an array rather than named fields.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Quaternion {
    pub components: [f64; 4],
}

impl Quaternion {
    /// Number of values a reply must carry.
    pub const FIELD_COUNT: usize = 4;

    /// Builds from decoded values, or `None` if fewer than four are present.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let components: [f64; 4] = values.get(..Self::FIELD_COUNT)?.try_into().ok()?;
        Some(Quaternion { components })
    }
}
