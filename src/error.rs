//! Application error type.
//!
//! Every failure in the pipeline is fatal, so a single error type carrying the
//! process exit code and a human-readable message is all we need.

/// Exit code for failures writing the report.
pub const EXIT_REPORT: u8 = 1;
/// Exit code for I/O and input-format failures.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for least-squares failures.
pub const EXIT_FIT: u8 = 4;
/// Exit code for terminal/viewer failures.
pub const EXIT_VIEWER: u8 = 5;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Input file could not be opened/read/written, or a record is malformed.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    /// The solver could not produce a fit.
    pub fn fit(message: impl Into<String>) -> Self {
        Self::new(EXIT_FIT, message)
    }

    /// The report could not be rendered.
    pub fn report(message: impl Into<String>) -> Self {
        Self::new(EXIT_REPORT, message)
    }

    pub fn viewer(message: impl Into<String>) -> Self {
        Self::new(EXIT_VIEWER, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_carry_distinct_exit_codes() {
        let codes = [
            AppError::report("r").exit_code(),
            AppError::input("i").exit_code(),
            AppError::fit("f").exit_code(),
            AppError::viewer("v").exit_code(),
        ];
        assert_eq!(codes, [EXIT_REPORT, EXIT_INPUT, EXIT_FIT, EXIT_VIEWER]);
        for (i, a) in codes.iter().enumerate() {
            assert!(codes[i + 1..].iter().all(|b| a != b));
        }
    }

    #[test]
    fn display_is_the_message() {
        let err = AppError::report("Failed to serialize report: boom");
        assert_eq!(err.to_string(), "Failed to serialize report: boom");
        assert_eq!(err.exit_code(), 1);
    }
}
