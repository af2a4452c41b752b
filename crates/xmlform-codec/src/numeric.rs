//! Lenient integer reading for legacy flag attributes

/// Leading integer of `text`, `0` when there is none
///
/// Leading whitespace and a sign are accepted, trailing junk is ignored and
/// overflow saturates: `" 12abc"` is 12, `"yes"` is 0.
pub(crate) fn leading_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// True when the first character is an ASCII digit
#[inline]
pub(crate) fn starts_with_digit(text: &str) -> bool {
    text.as_bytes().first().is_some_and(u8::is_ascii_digit)
}
