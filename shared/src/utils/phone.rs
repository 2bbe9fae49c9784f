//! Phone number utilities
//!
//! Phone numbers are personal data: every log line that mentions one must go
//! through [`mask_phone`]. Format validation is intentionally absent here -
//! numbers are passed through to the delivery provider, which is the
//! authority on what it can reach.

/// Strip common formatting characters, keeping digits and a leading '+'
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Mask a phone number for logging (e.g., +8190****5678)
pub fn mask_phone(phone: &str) -> String {
    let normalized = normalize_phone(phone);
    if normalized.len() >= 9 {
        format!(
            "{}****{}",
            &normalized[0..normalized.len() - 8],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+81 90-1234-5678"), "+819012345678");
        assert_eq!(normalize_phone("(415) 555-2671"), "4155552671");
    }

    #[test]
    fn test_mask_phone_keeps_prefix_and_last_four() {
        assert_eq!(mask_phone("+819012345678"), "+8190****5678");
        assert_eq!(mask_phone("+14155552671"), "+141****2671");
    }

    #[test]
    fn test_mask_phone_short_input_fully_masked() {
        assert_eq!(mask_phone("12345"), "****");
        assert_eq!(mask_phone(""), "****");
    }
}
