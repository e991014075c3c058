//! Token classification helpers.
//!
//! "Numeric" follows the Unicode numeric categories (Nd, Nl, No), so full-width
//! digits and characters such as `Ⅻ` or `½` count as digits.

/// `true` if `token` is non-empty and every character is numeric
#[inline]
pub fn is_digit(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_numeric)
}

/// `true` if `token` holds at least one numeric character, at least one ASCII
/// letter, and nothing else
pub fn is_pure_digit_letters(token: &str) -> bool {
    let (mut digit, mut letter) = (false, false);
    for c in token.chars() {
        if c.is_numeric() {
            digit = true;
        } else if c.is_ascii_alphabetic() {
            letter = true;
        } else {
            return false;
        }
    }
    digit && letter
}
