//! Form input helpers: masks applied as the user types, and simple checks.

use crate::error::GridError;

pub const DEFAULT_DELETE_CONFIRMATION: &str = "Are you sure you want to delete this item?";

/// Format a phone number as `(AAA) BBB-CCCC` while it is being typed.
///
/// Non-digits are dropped and at most ten digits are kept. Partial input
/// formats partially: `"555"` stays `"555"`, `"5551"` becomes `"(555) 1"`.
pub fn format_phone(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(char::is_ascii_digit).take(10).collect();
    let area: String = digits.iter().take(3).collect();
    let exchange: String = digits.iter().skip(3).take(3).collect();
    let line: String = digits.iter().skip(6).collect();

    if exchange.is_empty() {
        return area;
    }

    let mut out = format!("({area}) {exchange}");
    if !line.is_empty() {
        out.push('-');
        out.push_str(&line);
    }
    out
}

/// Uppercase and strip all whitespace (student ids, course codes).
pub fn normalize_code(input: &str) -> String {
    input.to_uppercase().chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn check_password_confirmation(password: &str, confirmation: &str) -> Result<(), GridError> {
    if password == confirmation {
        Ok(())
    } else {
        Err(GridError::PasswordMismatch)
    }
}

/// Prompt shown before a delete; falls back to the stock question.
pub fn confirm_delete_message(message: Option<&str>) -> &str {
    match message {
        Some(m) if !m.is_empty() => m,
        _ => DEFAULT_DELETE_CONFIRMATION,
    }
}
