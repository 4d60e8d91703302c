//! # Display Helpers
//!
//! String formatting shared by every front end (CLI today, web bindings via
//! ts-rs). Rounding of money lives in [`Money`]'s `Display`; these helpers
//! only shape text.

use crate::money::Money;
use crate::validation::MAX_RATING;

/// Price as shown next to a product, e.g. `$29.99`.
pub fn format_price(price: Money) -> String {
    price.to_string()
}

/// Rating with one decimal, e.g. `4.5`.
pub fn format_rating(rate: f64) -> String {
    format!("{:.1}", rate)
}

/// Cuts `text` to `max_len` characters and appends `...` when it was longer.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let head: String = text.chars().take(max_len).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Upper-cases the first character (category labels).
pub fn capitalize_first_letter(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Number of filled stars for a rating: the whole part of `rate`, capped at
/// `max_stars`.
pub fn filled_stars(rate: f64, max_stars: usize) -> usize {
    if !rate.is_finite() || rate <= 0.0 {
        return 0;
    }
    (rate.floor() as usize).min(max_stars)
}

/// Star bar like `★★★★☆` on a five-star scale.
pub fn star_bar(rate: f64) -> String {
    let max = MAX_RATING as usize;
    let filled = filled_stars(rate, max);
    format!("{}{}", "★".repeat(filled), "☆".repeat(max - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Money::from_cents(2999)), "$29.99");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(4.0), "4.0");
        assert_eq!(format_rating(3.87), "3.9");
    }

    #[test]
    fn test_truncate_text() {
        let title = "Test Product 2 with a very long title that should be truncated";
        assert_eq!(truncate_text(title, 30), "Test Product 2 with a very lon...");
        assert_eq!(truncate_text("short", 30), "short");
    }

    #[test]
    fn test_capitalize_first_letter() {
        assert_eq!(capitalize_first_letter("electronics"), "Electronics");
        assert_eq!(capitalize_first_letter(""), "");
    }

    #[test]
    fn test_stars() {
        assert_eq!(filled_stars(3.9, 5), 3);
        assert_eq!(filled_stars(7.0, 5), 5);
        assert_eq!(filled_stars(f64::NAN, 5), 0);
        assert_eq!(star_bar(4.5), "★★★★☆");
    }
}
