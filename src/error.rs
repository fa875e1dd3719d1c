//! Error types for kartoteka
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-facing (Russian) messages with hints
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for kartoteka operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoOther = 202,

    // Persistence errors (3xx)
    InvalidExtension = 300,
    FileNotFound = 301,
    ParseError = 302,
    SerializeError = 303,

    // Date errors (4xx)
    InvalidDate = 400,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E300")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // IO errors
            300..=399 => 30, // Persistence errors
            400..=499 => 40, // Date errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type.
///
/// Display messages are Russian: every variant except the config/internal
/// kinds is surfaced verbatim to the interactive user.
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Файл конфигурации не найден: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Не удалось разобрать файл конфигурации: {message}")]
    ConfigParse { message: String },

    /// Configuration validation error
    #[error("Некорректная конфигурация: {0}")]
    Config(String),

    /// TOML serialization error (config show/init)
    #[error("Ошибка сериализации конфигурации: {0}")]
    Toml(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Ошибка чтения файла {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Ошибка записи файла {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error (streams, flush)
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Persistence Errors
    // ─────────────────────────────────────────────────────────────

    /// Target file does not carry the .json extension
    #[error("Несоответствующий формат файла: {path}")]
    InvalidExtension { path: String },

    /// Load target does not exist
    #[error("Заданного файла не существует: {path}")]
    FileNotFound { path: String },

    /// Malformed JSON or missing keys
    #[error("Не удалось разобрать файл {path}: {message}")]
    Parse { path: String, message: String },

    /// List could not be serialized
    #[error("Не удалось сериализовать список: {message}")]
    Serialize { message: String },

    // ─────────────────────────────────────────────────────────────
    // Date Errors
    // ─────────────────────────────────────────────────────────────

    /// Unparseable or impossible calendar date
    #[error("Некорректная дата: {text}")]
    InvalidDate { text: String },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::Config(_) => ErrorCode::ConfigValidation,
            Error::Toml(_) => ErrorCode::ConfigParseError,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(_) => ErrorCode::IoOther,

            Error::InvalidExtension { .. } => ErrorCode::InvalidExtension,
            Error::FileNotFound { .. } => ErrorCode::FileNotFound,
            Error::Parse { .. } => ErrorCode::ParseError,
            Error::Serialize { .. } => ErrorCode::SerializeError,

            Error::InvalidDate { .. } => ErrorCode::InvalidDate,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Facing Hints
    // ─────────────────────────────────────────────────────────────

    /// Get a hint for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Выполните 'kartoteka config init', чтобы создать файл конфигурации.",
            ),
            Error::ConfigParse { .. } => Some(
                "Проверьте синтаксис файла командой 'kartoteka config validate'.",
            ),
            Error::InvalidExtension { .. } => Some(
                "Укажите имя файла с расширением .json, например: save people.json.",
            ),
            Error::FileNotFound { .. } => Some(
                "Файл ищется относительно текущего каталога. Проверьте имя и каталог запуска.",
            ),
            Error::Parse { .. } => Some(
                "Файл должен содержать JSON-массив объектов с ключами name, pnumber, birth.",
            ),
            Error::InvalidDate { .. } => Some(
                "Дата вводится в формате ДД.ММ.ГГГГ, например 01.01.2077.",
            ),
            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let code = self.code();
        let mut output = format!("\x1b[31mОшибка [{}]\x1b[0m: {}\n", code.as_str(), self);

        if let Some(hint) = self.suggestion() {
            output.push_str(&format!("\n\x1b[33mПодсказка\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        format!("[{}] {}", self.code().as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors (for ergonomic error creation)
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create an invalid extension error
    pub fn invalid_extension(path: impl Into<String>) -> Self {
        Error::InvalidExtension { path: path.into() }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create a parse error
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid date error
    pub fn invalid_date(text: impl Into<String>) -> Self {
        Error::InvalidDate { text: text.into() }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::ConfigNotFound.as_str(), "E100");
        assert_eq!(ErrorCode::InvalidExtension.as_str(), "E300");
        assert_eq!(ErrorCode::InvalidDate.as_str(), "E400");
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(ErrorCode::ConfigNotFound.exit_code(), 10);
        assert_eq!(ErrorCode::IoRead.exit_code(), 20);
        assert_eq!(ErrorCode::FileNotFound.exit_code(), 30);
        assert_eq!(ErrorCode::InvalidDate.exit_code(), 40);
        assert_eq!(ErrorCode::InternalError.exit_code(), 90);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::invalid_extension("foo.txt").code(),
            ErrorCode::InvalidExtension
        );
        assert_eq!(
            Error::file_not_found("missing.json").code(),
            ErrorCode::FileNotFound
        );
        assert_eq!(Error::invalid_date("32.01.1990").code(), ErrorCode::InvalidDate);
    }

    #[test]
    fn test_error_display() {
        let err = Error::file_not_found("missing.json");
        assert!(err.to_string().contains("missing.json"));
        assert!(err.to_string().contains("не существует"));
    }

    #[test]
    fn test_error_suggestions() {
        let err = Error::invalid_extension("foo.txt");
        assert!(err.suggestion().unwrap().contains(".json"));

        let err = Error::invalid_date("bad");
        assert!(err.suggestion().unwrap().contains("ДД.ММ.ГГГГ"));

        assert!(Error::Internal("x".into()).suggestion().is_none());
    }

    #[test]
    fn test_format_for_terminal() {
        let err = Error::invalid_extension("foo.txt");
        let formatted = err.format_for_terminal();

        // Should contain error code
        assert!(formatted.contains("E300"));
        // Should contain ANSI color codes
        assert!(formatted.contains("\x1b[31m"));
        // Should contain hint
        assert!(formatted.contains("Подсказка"));
    }

    #[test]
    fn test_format_for_log() {
        let err = Error::file_not_found("missing.json");
        let formatted = err.format_for_log();

        assert!(formatted.contains("[E301]"));
        assert!(!formatted.contains("\x1b["));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err: Error = io_err.into();
        assert_eq!(err.code(), ErrorCode::IoOther);
    }
}
