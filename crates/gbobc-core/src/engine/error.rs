use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SolvationError {
    #[error("Expected {expected} {what} (one per atom), found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Rejects per-atom inputs whose length disagrees with the parameter set.
pub(crate) fn check_len(
    what: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), SolvationError> {
    if expected == found {
        Ok(())
    } else {
        Err(SolvationError::LengthMismatch {
            what,
            expected,
            found,
        })
    }
}
