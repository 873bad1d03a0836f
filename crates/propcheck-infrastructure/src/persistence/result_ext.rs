use propcheck_domain::shared::DomainError;

/// Extension trait for Result types to simplify error handling
pub trait ResultExt<T, E> {
    /// Convert error to DomainError::Persistence, prefixed with the operation
    /// Usage: `result.to_persistence_err("Read slot")?`
    fn to_persistence_err(self, operation: &str) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn to_persistence_err(self, operation: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Persistence(format!("{} failed: {}", operation, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_persistence_err() {
        let result: Result<i32, &str> = Err("disk full");
        match result.to_persistence_err("Write slot") {
            Err(DomainError::Persistence(msg)) => assert_eq!(msg, "Write slot failed: disk full"),
            _ => panic!("Expected Persistence error"),
        }
    }
}
