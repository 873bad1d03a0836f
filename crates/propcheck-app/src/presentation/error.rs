use propcheck_domain::shared::{DomainError, ErrorCode, ErrorSeverity};
use serde::{Deserialize, Serialize};

/// Structured error returned by every command
///
/// Printed as JSON by the binary so scripts can branch on `code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    /// Numeric error code (2xxx-6xxx range)
    pub code: u16,

    pub message: String,

    pub severity: ErrorSeverity,

    /// Whether retrying the same command can succeed
    pub recoverable: bool,
}

impl CommandError {
    pub fn from_code(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: error_code.code(),
            message: message.into(),
            severity: error_code.severity(),
            recoverable: error_code.is_recoverable(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::InfrastructureError, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::ValidationError, message)
    }
}

impl From<DomainError> for CommandError {
    fn from(err: DomainError) -> Self {
        Self {
            code: err.code().code(),
            message: err.message().to_string(),
            severity: err.severity(),
            recoverable: err.is_recoverable(),
        }
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(err: anyhow::Error) -> Self {
        // Domain errors surfaced through anyhow keep their code
        match err.downcast::<DomainError>() {
            Ok(domain) => domain.into(),
            Err(other) => Self::infrastructure(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for CommandError {
    fn from(err: sqlx::Error) -> Self {
        Self::from_code(ErrorCode::PersistenceError, err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::from_code(ErrorCode::SerializationError, err.to_string())
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_from_domain_error() {
        let cmd_err: CommandError =
            DomainError::EmptyInput("Enter at least one day".to_string()).into();

        assert_eq!(cmd_err.code, 3001);
        assert_eq!(cmd_err.message, "Enter at least one day");
        assert_eq!(cmd_err.severity, ErrorSeverity::Info);
        assert!(!cmd_err.recoverable);
    }

    #[test]
    fn test_persistence_errors_are_recoverable() {
        let cmd_err: CommandError = DomainError::Persistence("disk full".to_string()).into();

        assert_eq!(cmd_err.code, 4001);
        assert!(cmd_err.recoverable);
    }

    #[test]
    fn test_anyhow_keeps_domain_code() {
        let wrapped = anyhow::Error::new(DomainError::InvalidConfiguration("bad".to_string()));
        let cmd_err: CommandError = wrapped.into();
        assert_eq!(cmd_err.code, 3002);

        let plain: CommandError = anyhow::anyhow!("boom").into();
        assert_eq!(plain.code, 5001);
        assert_eq!(plain.message, "boom");
    }

    #[test]
    fn test_command_error_helpers() {
        assert_eq!(CommandError::validation("Invalid input").code, 6001);
        assert_eq!(CommandError::infrastructure("Service unavailable").code, 5001);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(CommandError::validation("nope")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": 6001,
                "message": "nope",
                "severity": "Info",
                "recoverable": false
            })
        );
    }
}
