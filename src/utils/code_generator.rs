//! Alias generation and validation utilities.

use crate::error::AppError;
use rand::Rng;

/// Length of generated aliases.
pub const ALIAS_LENGTH: usize = 6;

/// Longest custom alias accepted from the admin form.
pub const MAX_ALIAS_LENGTH: usize = 64;

/// URL-safe alphabet for generated aliases (64 symbols, 6 bits each).
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Aliases that would be shadowed by fixed routes.
pub const RESERVED_ALIASES: &[&str] = &["admin", "login", "logout", "debug", "setup"];

/// Generates a random 6-character alias.
///
/// Collisions are unlikely (64^6 combinations) but not excluded; the
/// store's unique constraint is the final arbiter.
///
/// # Examples
///
/// ```ignore
/// let alias = generate_alias();
/// assert_eq!(alias.len(), 6);
/// ```
pub fn generate_alias() -> String {
    let mut rng = rand::rng();

    (0..ALIAS_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Validates an operator-supplied alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-` (case is kept)
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(format!(
            "Alias must be 1-{MAX_ALIAS_LENGTH} characters"
        )));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AppError::bad_request(
            "Alias can only contain letters, digits, '_' and '-'",
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request("This alias is reserved"));
    }

    Ok(())
}
