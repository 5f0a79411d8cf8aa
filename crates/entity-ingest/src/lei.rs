//! Legal Entity Identifier validation (ISO 17442).
//!
//! An LEI is 20 alphanumeric characters whose last two are check digits
//! under ISO 7064 MOD 97-10: with letters expanded to two-digit numbers
//! (A=10 .. Z=35), the whole code read as an integer is 1 modulo 97.

/// Length of a well-formed LEI.
pub const LEI_LEN: usize = 20;

/// Trim and upper-case `raw`, returning it only if it is a valid LEI.
pub fn normalize_lei(raw: &str) -> Option<String> {
    let code = raw.trim().to_ascii_uppercase();
    is_valid_lei(&code).then_some(code)
}

/// True when `code` is exactly a valid upper-case LEI.
pub fn is_valid_lei(code: &str) -> bool {
    if code.len() != LEI_LEN {
        return false;
    }
    let mut remainder: u32 = 0;
    for ch in code.chars() {
        let Some(value) = ch.to_digit(36) else {
            return false;
        };
        if ch.is_ascii_lowercase() {
            return false;
        }
        remainder = if value < 10 {
            (remainder * 10 + value) % 97
        } else {
            (remainder * 100 + value) % 97
        };
    }
    remainder == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_leis() {
        assert!(is_valid_lei("HWUPKR0MPOU8FGXBT394"));
        assert!(is_valid_lei("INR2EJN1ERAN0W5ZP974"));
        assert!(is_valid_lei("7LTWFZYICNSX8D621K86"));
    }

    #[test]
    fn test_bad_check_digits() {
        assert!(!is_valid_lei("HWUPKR0MPOU8FGXBT395"));
        assert!(!is_valid_lei("549300HEZY8RK3R1KL81"));
    }

    #[test]
    fn test_bad_shape() {
        assert!(!is_valid_lei(""));
        assert!(!is_valid_lei("HWUPKR0MPOU8FGXBT39"));
        assert!(!is_valid_lei("HWUPKR0MPOU8FGXBT3945"));
        assert!(!is_valid_lei("HWUPKR0MPOU8FGXBT-94"));
        assert!(!is_valid_lei("hwupkr0mpou8fgxbt394"));
    }

    #[test]
    fn test_normalize_lei() {
        assert_eq!(
            normalize_lei("  hwupkr0mpou8fgxbt394 ").as_deref(),
            Some("HWUPKR0MPOU8FGXBT394")
        );
        assert_eq!(normalize_lei("not-an-lei"), None);
    }
}
