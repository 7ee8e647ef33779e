/// Extended Arabic-Indic (Persian) digit zero, U+06F0.
const PERSIAN_ZERO: u32 = 0x06F0;

pub fn is_persian_digit(c: char) -> bool {
    ('\u{06F0}'..='\u{06F9}').contains(&c)
}

/// Latin or Persian digit.
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || is_persian_digit(c)
}

/// Map a Persian digit glyph to its Latin equivalent; any other char is returned as is.
pub fn to_latin(c: char) -> char {
    if is_persian_digit(c) {
        char::from_digit(c as u32 - PERSIAN_ZERO, 10).unwrap_or(c)
    } else {
        c
    }
}

/// Read every Latin/Persian digit in `raw` as one base-10 number.
///
/// Non-digit characters are dropped. Empty input, input without digits, or a value
/// that does not fit in `u32` all yield 0.
pub fn parse_units(raw: &str) -> u32 {
    let digits: String = raw.chars().filter(|c| is_digit(*c)).map(to_latin).collect();
    digits.parse().unwrap_or(0)
}
