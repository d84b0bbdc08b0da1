//! Validation utilities for the Warehouse Management Platform
//!
//! Reference formats follow the warehouse numbering scheme: orders are
//! `ORD` plus five digits, items are `P` plus six digits, transfers are
//! `TR` plus five digits.

// ============================================================================
// Reference Formats
// ============================================================================

fn has_digit_suffix(value: &str, prefix: &str, digits: usize) -> bool {
    value.len() == prefix.len() + digits
        && value.starts_with(prefix)
        && value[prefix.len()..].chars().all(|c| c.is_ascii_digit())
}

/// Validate an order reference (e.g. ORD00001)
pub fn validate_order_reference(reference: &str) -> Result<(), &'static str> {
    if has_digit_suffix(reference, "ORD", 5) {
        Ok(())
    } else {
        Err("Order reference must match ORD followed by 5 digits")
    }
}

/// Validate an item reference (e.g. P000001)
pub fn validate_item_reference(reference: &str) -> Result<(), &'static str> {
    if has_digit_suffix(reference, "P", 6) {
        Ok(())
    } else {
        Err("Item reference must match P followed by 6 digits")
    }
}

/// Validate a transfer reference (e.g. TR00001)
pub fn validate_transfer_reference(reference: &str) -> Result<(), &'static str> {
    if has_digit_suffix(reference, "TR", 5) {
        Ok(())
    } else {
        Err("Transfer reference must match TR followed by 5 digits")
    }
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate warehouse/supplier code format (2-10 uppercase alphanumeric)
pub fn validate_entity_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 2 {
        return Err("Code must be at least 2 characters");
    }
    if code.len() > 10 {
        return Err("Code must be at most 10 characters");
    }
    if !code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err("Code must be uppercase alphanumeric only");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate a contact phone number: 7-15 digits, optional leading +
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let stripped = phone.strip_prefix('+').unwrap_or(phone);
    let digits: String = stripped
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();

    if digits.len() >= 7 && digits.len() <= 15 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err("Invalid phone number format")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_reference_format() {
        assert!(validate_order_reference("ORD00001").is_ok());
        assert!(validate_order_reference("ORD99999").is_ok());
        assert!(validate_order_reference("ORD0001").is_err());
        assert!(validate_order_reference("ORD000001").is_err());
        assert!(validate_order_reference("ord00001").is_err());
        assert!(validate_order_reference("ORD0000A").is_err());
        assert!(validate_order_reference("").is_err());
    }

    #[test]
    fn item_reference_format() {
        assert!(validate_item_reference("P000001").is_ok());
        assert!(validate_item_reference("P123456").is_ok());
        assert!(validate_item_reference("P00001").is_err());
        assert!(validate_item_reference("Q000001").is_err());
        assert!(validate_item_reference("P00000X").is_err());
    }

    #[test]
    fn transfer_reference_format() {
        assert!(validate_transfer_reference("TR00001").is_ok());
        assert!(validate_transfer_reference("TR0001").is_err());
        assert!(validate_transfer_reference("T000001").is_err());
    }

    #[test]
    fn entity_code_format() {
        assert!(validate_entity_code("WH01").is_ok());
        assert!(validate_entity_code("AMSWH").is_ok());
        assert!(validate_entity_code("w").is_err());
        assert!(validate_entity_code("wh01").is_err());
        assert!(validate_entity_code("WAREHOUSE001").is_err());
    }

    #[test]
    fn email_format() {
        assert!(validate_email("ops@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn phone_format() {
        assert!(validate_phone("0201234567").is_ok());
        assert!(validate_phone("+31 20 123 4567").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("phone").is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Every 5-digit suffix forms a valid order reference, and the
            /// same digits under any other prefix do not
            #[test]
            fn prop_order_reference_accepts_exactly_five_digits(n in 0u32..100_000) {
                prop_assert!(validate_order_reference(&format!("ORD{:05}", n)).is_ok());
                prop_assert!(validate_order_reference(&format!("ORX{:05}", n)).is_err());
                prop_assert!(validate_order_reference(&format!("ORD{:06}", n)).is_err());
            }

            /// Item references take exactly six digits after the P prefix
            #[test]
            fn prop_item_reference_accepts_exactly_six_digits(n in 0u32..1_000_000) {
                prop_assert!(validate_item_reference(&format!("P{:06}", n)).is_ok());
                prop_assert!(validate_item_reference(&format!("P{:05}", n % 100_000)).is_err());
            }
        }
    }
}
