//! Conversion between human readable decimal amounts and the fixed point
//! integers the token contracts operate on.

use soroban_sdk::{Env, String};

/// Decimals used by `to_wei`/`from_wei`, same as the reward and staking tokens.
pub const WEI_DECIMALS: u32 = 18;

/// Highest scale whose `10^decimals` still fits into an `i128`.
pub const MAX_DECIMALS: u32 = 38;

// sign + 39 integer digits + dot + 38 fractional digits
const FORMAT_CAPACITY: usize = 80;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum UnitsError {
    /// Nothing to parse
    Empty,
    /// Only digits, one leading minus and one dot are accepted
    InvalidCharacter,
    MultipleDecimalPoints,
    /// The scaled value does not fit into an i128
    Overflow,
    DecimalsTooLarge,
}

/// Parses `value` and scales it by `10^decimals`.
/// Fractional digits beyond `decimals` are truncated.
pub fn parse_units(value: &str, decimals: u32) -> Result<i128, UnitsError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitsError::DecimalsTooLarge);
    }

    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((_, fraction)) if fraction.contains('.') => {
            return Err(UnitsError::MultipleDecimalPoints)
        }
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(UnitsError::Empty);
    }

    let mut scaled: i128 = 0;
    for digit in whole.bytes() {
        scaled = push_digit(scaled, digit)?;
    }

    let mut used = 0u32;
    for digit in fraction.bytes() {
        if used == decimals {
            // still reject garbage in the truncated tail
            if !digit.is_ascii_digit() {
                return Err(UnitsError::InvalidCharacter);
            }
            continue;
        }
        scaled = push_digit(scaled, digit)?;
        used += 1;
    }

    let scaled = scaled
        .checked_mul(10i128.pow(decimals - used))
        .ok_or(UnitsError::Overflow)?;

    Ok(if negative { -scaled } else { scaled })
}

fn push_digit(acc: i128, digit: u8) -> Result<i128, UnitsError> {
    if !digit.is_ascii_digit() {
        return Err(UnitsError::InvalidCharacter);
    }
    acc.checked_mul(10)
        .and_then(|acc| acc.checked_add((digit - b'0') as i128))
        .ok_or(UnitsError::Overflow)
}

/// Decimal rendering of a scaled amount, e.g. `"1.0"`, `"0.05"`, `"-12.5"`.
#[derive(Clone, Copy)]
pub struct FormattedUnits {
    buf: [u8; FORMAT_CAPACITY],
    len: usize,
}

impl FormattedUnits {
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    pub fn to_string(&self, env: &Env) -> String {
        String::from_str(env, self.as_str())
    }
}

impl core::fmt::Debug for FormattedUnits {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders `value / 10^decimals`, trailing fractional zeros trimmed down to a
/// single one.
pub fn format_units(value: i128, decimals: u32) -> Result<FormattedUnits, UnitsError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitsError::DecimalsTooLarge);
    }
    Ok(render(value, decimals as usize))
}

fn render(value: i128, decimals: usize) -> FormattedUnits {
    // least significant digit first
    let mut digits = [b'0'; 40];
    let mut count = 0;
    let mut magnitude = value.unsigned_abs();
    loop {
        digits[count] = b'0' + (magnitude % 10) as u8;
        magnitude /= 10;
        count += 1;
        if magnitude == 0 {
            break;
        }
    }
    // at least one digit before the dot
    let total = count.max(decimals + 1);

    let mut out = FormattedUnits {
        buf: [0u8; FORMAT_CAPACITY],
        len: 0,
    };
    let mut push = |byte: u8| {
        out.buf[out.len] = byte;
        out.len += 1;
    };

    if value < 0 {
        push(b'-');
    }
    for position in (decimals..total).rev() {
        push(digits[position]);
    }
    push(b'.');

    let lowest_significant = (0..decimals)
        .find(|&position| digits[position] != b'0')
        .unwrap_or(decimals);
    if lowest_significant == decimals {
        push(b'0');
    } else {
        for position in (lowest_significant..decimals).rev() {
            push(digits[position]);
        }
    }

    out
}

/// `value` in whole tokens to 18 decimals token units.
pub fn to_wei(value: &str) -> Result<i128, UnitsError> {
    parse_units(value, WEI_DECIMALS)
}

/// 18 decimals token units to a decimal string in whole tokens.
pub fn from_wei(env: &Env, value: i128) -> String {
    render(value, WEI_DECIMALS as usize).to_string(env)
}
