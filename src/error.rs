use thiserror::Error;

/// Errors surfaced by the resolution core.
///
/// `Configuration` is fatal at load time and means the balance config (or an
/// RNG setup) cannot be used as given. `InvariantViolation` means the driver
/// called the core out of protocol; the affected progress record is left
/// untouched and the call should not be retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::Configuration("bad threshold table".to_string());
        assert_eq!(err.to_string(), "configuration error: bad threshold table");

        let err = EngineError::InvariantViolation("mission already terminal".to_string());
        assert_eq!(
            err.to_string(),
            "invariant violation: mission already terminal"
        );
    }
}
