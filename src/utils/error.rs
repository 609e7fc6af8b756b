use std::fmt;

/// Error taxonomy for the API core. Services return these; handlers map
/// them to HTTP statuses at the boundary.
#[derive(Debug)]
pub enum AppError {
    /// A required field is missing or blank. Always maps to 400.
    Validation(String),
    /// The managed database call itself failed. Maps to 500, with the
    /// database message passed through when available.
    Database(String),
    /// The target record does not exist. Distinct variant so callers can
    /// tell it from a true backend failure, even though the wire keeps
    /// the same 500 status for team updates.
    NotFound(String),
}

impl AppError {
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) => 400,
            AppError::Database(_) | AppError::NotFound(_) => 500,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Invalid request: {}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Validation("name".into()).status_code(), 400);
        assert_eq!(AppError::Database("down".into()).status_code(), 500);
        assert_eq!(AppError::NotFound("x".into()).status_code(), 500);
    }

    #[test]
    fn test_display_passes_message_through() {
        let e = AppError::Database("connection reset".into());
        assert_eq!(e.to_string(), "Database error: connection reset");

        let e = AppError::Validation("name and role are required".into());
        assert!(e.to_string().contains("name and role"));
    }
}
