//! Validation helpers for DTOs.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use validator::ValidationError;

/// Format shared by puzzle ids and the catalog window bound.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Validates that a puzzle id is a real `YYYY-MM-DD` calendar date.
///
/// # Examples
///
/// ```ignore
/// validate_puzzle_id("2026-01-24") // Ok
/// validate_puzzle_id("2026-1-24")  // Err - not zero-padded
/// validate_puzzle_id("2026-02-30") // Err - no such day
/// ```
pub fn validate_puzzle_id(id: &str) -> Result<(), ValidationError> {
    if Date::parse(id, DATE_FORMAT).is_err() {
        let mut err = ValidationError::new("puzzle_id_format");
        err.message = Some(format!("puzzle id `{id}` is not a YYYY-MM-DD date").into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_puzzle_id_valid() {
        assert!(validate_puzzle_id("2026-01-24").is_ok());
        assert!(validate_puzzle_id("1999-12-31").is_ok());
        assert!(validate_puzzle_id("2024-02-29").is_ok()); // leap day
    }

    #[test]
    fn test_validate_puzzle_id_invalid() {
        assert!(validate_puzzle_id("2026-1-24").is_err()); // not zero-padded
        assert!(validate_puzzle_id("2026-02-30").is_err()); // no such day
        assert!(validate_puzzle_id("2026/01/24").is_err()); // wrong separator
        assert!(validate_puzzle_id("today").is_err());
        assert!(validate_puzzle_id("").is_err());
    }
}
