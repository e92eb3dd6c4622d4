//! Lenient value parsing
//!
//! Every helper here returns a value, never an error. Text that is not a
//! number reads as zero, mirroring the C `atol` contract the portal
//! clients were written against.

/// Number of logical axes per input source
pub const AXIS_COUNT: usize = 8;

/// Largest raw signal value accepted for valve calibration
pub const RAW_MAX: u16 = 1023;

/// Parse a decimal integer, defaulting to zero
///
/// Accepts optional leading whitespace and a sign, then reads digits up
/// to the first non-digit. `"12abc"` is 12, `"abc"` is 0. Values outside
/// the `i32` range saturate.
pub fn parse_int_or_zero(text: &str) -> i32 {
    let bytes = text.trim_start().as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut magnitude: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        magnitude = magnitude
            .saturating_mul(10)
            .saturating_add(i64::from(b - b'0'));
    }

    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Clamp a parsed integer into the raw signal domain `[0, RAW_MAX]`
pub fn clamp_raw(value: i32) -> u16 {
    value.clamp(0, i32::from(RAW_MAX)) as u16
}

/// Parse a comma-separated list of axis flags
///
/// Each token is read with [`parse_int_or_zero`] and is set when nonzero.
/// Missing trailing tokens are `false`; tokens past [`AXIS_COUNT`] are
/// ignored.
pub fn parse_flags(text: &str) -> [bool; AXIS_COUNT] {
    let mut flags = [false; AXIS_COUNT];
    for (flag, token) in flags.iter_mut().zip(text.split(',')) {
        *flag = parse_int_or_zero(token) != 0;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_int_plain() {
        assert_eq!(parse_int_or_zero("512"), 512);
        assert_eq!(parse_int_or_zero("-5"), -5);
        assert_eq!(parse_int_or_zero("+7"), 7);
        assert_eq!(parse_int_or_zero("  42"), 42);
    }

    #[test]
    fn test_parse_int_malformed_is_zero() {
        assert_eq!(parse_int_or_zero(""), 0);
        assert_eq!(parse_int_or_zero("abc"), 0);
        assert_eq!(parse_int_or_zero("-"), 0);
        assert_eq!(parse_int_or_zero("x12"), 0);
    }

    #[test]
    fn test_parse_int_stops_at_garbage() {
        assert_eq!(parse_int_or_zero("12abc"), 12);
        assert_eq!(parse_int_or_zero("3.9"), 3);
    }

    #[test]
    fn test_parse_int_saturates() {
        assert_eq!(parse_int_or_zero("99999999999999999999"), i32::MAX);
        assert_eq!(parse_int_or_zero("-99999999999999999999"), i32::MIN);
    }

    #[test]
    fn test_clamp_raw() {
        assert_eq!(clamp_raw(5000), 1023);
        assert_eq!(clamp_raw(-5), 0);
        assert_eq!(clamp_raw(700), 700);
    }

    #[test]
    fn test_parse_flags_short_list_padded() {
        assert_eq!(
            parse_flags("1,0,1"),
            [true, false, true, false, false, false, false, false]
        );
    }

    #[test]
    fn test_parse_flags_long_list_truncated() {
        assert_eq!(
            parse_flags("1,0,1,0,0,0,0,0,1,1"),
            [true, false, true, false, false, false, false, false]
        );
    }

    #[test]
    fn test_parse_flags_malformed_tokens() {
        assert_eq!(
            parse_flags("yes,2,,-1,0"),
            [false, true, false, true, false, false, false, false]
        );
        assert_eq!(parse_flags(""), [false; AXIS_COUNT]);
    }

    proptest! {
        #[test]
        fn prop_clamp_raw_in_domain(value in any::<i32>()) {
            prop_assert!(clamp_raw(value) <= RAW_MAX);
        }

        #[test]
        fn prop_parse_int_matches_std(value in any::<i32>()) {
            let mut buf = heapless::String::<16>::new();
            core::fmt::write(&mut buf, format_args!("{}", value)).unwrap();
            prop_assert_eq!(parse_int_or_zero(&buf), value);
        }

        #[test]
        fn prop_parse_flags_prefix(bits in proptest::collection::vec(any::<bool>(), 0..12)) {
            let mut text = heapless::String::<64>::new();
            for (i, bit) in bits.iter().enumerate() {
                if i > 0 {
                    text.push(',').unwrap();
                }
                text.push(if *bit { '1' } else { '0' }).unwrap();
            }

            let flags = parse_flags(&text);
            for (i, flag) in flags.iter().enumerate() {
                prop_assert_eq!(*flag, bits.get(i).copied().unwrap_or(false));
            }
        }
    }
}
