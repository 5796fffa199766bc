//! Payment field input masks.

/// Longest expiry (`MMYY`) or CVV input accepted, in digits.
const MAX_SHORT_FIELD_DIGITS: usize = 4;

/// Group a card number in blocks of four digits separated by spaces.
pub fn card_number(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();

    digits
        .chunks(4)
        .map(|block| block.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format an expiry as `MM/YY`, keeping at most four digits.
pub fn card_expiry(raw: &str) -> String {
    let digits = leading_digits(raw, MAX_SHORT_FIELD_DIGITS);

    if digits.len() < 2 {
        return digits;
    }

    let (month, year) = digits.split_at(2);

    format!("{month}/{year}")
}

/// Keep at most four digits of a CVV.
pub fn card_cvv(raw: &str) -> String {
    leading_digits(raw, MAX_SHORT_FIELD_DIGITS)
}

/// Card number without the display grouping.
pub fn card_number_digits(masked: &str) -> String {
    masked.chars().filter(char::is_ascii_digit).collect()
}

/// Expiry as `MMYY`.
pub fn expiry_digits(masked: &str) -> String {
    masked.chars().filter(char::is_ascii_digit).collect()
}

fn leading_digits(raw: &str, limit: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_number_groups_by_four() {
        assert_eq!(card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(card_number("4111 11111"), "4111 1111 1");
        assert_eq!(card_number("  "), "");
    }

    #[test]
    fn card_number_drops_separators_and_letters() {
        assert_eq!(card_number("41-11"), "4111");
        assert_eq!(card_number("4111-1111-1111-1111"), "4111 1111 1111 1111");
        assert_eq!(card_number("4x1 1"), "411");
    }

    #[test]
    fn card_number_masking_is_idempotent() {
        let once = card_number("378282246310005");

        assert_eq!(card_number(&once), once);
        assert_eq!(once, "3782 8224 6310 005");
    }

    #[test]
    fn expiry_inserts_slash_after_month() {
        assert_eq!(card_expiry("1"), "1");
        assert_eq!(card_expiry("12"), "12/");
        assert_eq!(card_expiry("123"), "12/3");
        assert_eq!(card_expiry("12/29"), "12/29");
    }

    #[test]
    fn expiry_strips_non_digits_and_caps_length() {
        assert_eq!(card_expiry("ab0-7x2 8 99"), "07/28");
    }

    #[test]
    fn cvv_keeps_up_to_four_digits() {
        assert_eq!(card_cvv("12a3"), "123");
        assert_eq!(card_cvv("123456"), "1234");
    }

    #[test]
    fn unmasking_for_gateway() {
        assert_eq!(card_number_digits("4111 1111 1111 1111"), "4111111111111111");
        assert_eq!(expiry_digits("07/28"), "0728");
    }
}
