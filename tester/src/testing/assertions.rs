//! Structural assertions on API responses
//!
//! Failures become [`TesterError::Assertion`] so they flow through the same
//! `?` chain as transport errors and get wrapped with the step name.

use std::fmt::Debug;

use crate::error::{TesterError, TesterResult};

pub fn ensure(condition: bool, message: impl Into<String>) -> TesterResult<()> {
    if condition {
        Ok(())
    } else {
        Err(TesterError::assertion(message))
    }
}

pub fn ensure_eq<A, E>(actual: A, expected: E, what: &str) -> TesterResult<()>
where
    A: PartialEq<E> + Debug,
    E: Debug,
{
    if actual == expected {
        Ok(())
    } else {
        Err(TesterError::assertion(format!(
            "{what}: expected {expected:?}, got {actual:?}"
        )))
    }
}

/// Unwrap a value the backend must have returned
pub fn ensure_some<T>(value: Option<T>, what: &str) -> TesterResult<T> {
    value.ok_or_else(|| TesterError::assertion(format!("{what} is null")))
}

pub fn ensure_not_empty(value: &str, what: &str) -> TesterResult<()> {
    ensure(!value.trim().is_empty(), format!("{what} is empty"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_ensure_eq_message() {
        let err = ensure_eq("Closed", "Open", "alert status").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Assertion failed: alert status: expected "Open", got "Closed""#
        );
        assert!(ensure_eq(7usize, 7usize, "alert count").is_ok());
    }

    #[test]
    fn test_ensure_some_and_not_empty() {
        assert_eq!(ensure_some(Some(3), "id").unwrap(), 3);
        assert_matches!(ensure_some::<i32>(None, "id"), Err(TesterError::Assertion { .. }));
        assert!(ensure_not_empty("  ", "token").is_err());
        assert!(ensure_not_empty("abc", "token").is_ok());
    }
}
