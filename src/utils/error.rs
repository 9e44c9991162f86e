use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtilError {
    #[error("{message}")]
    InvalidArgument { message: String },

    #[error("{message}")]
    InvalidDate { message: String },

    #[error("{message}")]
    InvalidFormat { message: String },

    #[error("{message}")]
    InvalidNumber { message: String },

    #[error("{message}")]
    NotANumber { message: String },

    #[error("{message}")]
    NegativeInput { message: String },

    #[error("{message}")]
    NonInteger { message: String },

    #[error("{message}")]
    MissingArgument { message: String },

    #[error("{message}")]
    Overflow { message: String },

    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Which precondition (or ambient concern) a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The argument had the wrong type.
    Type,
    /// The argument had the right type but lies outside the function's domain.
    Domain,
    /// Wrong number of arguments.
    Arity,
    /// Input or result exceeds the supported integer or calendar range.
    Range,
    Configuration,
    System,
}

impl UtilError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    pub fn invalid_number(message: impl Into<String>) -> Self {
        Self::InvalidNumber {
            message: message.into(),
        }
    }

    pub fn not_a_number(message: impl Into<String>) -> Self {
        Self::NotANumber {
            message: message.into(),
        }
    }

    pub fn negative_input(message: impl Into<String>) -> Self {
        Self::NegativeInput {
            message: message.into(),
        }
    }

    pub fn non_integer(message: impl Into<String>) -> Self {
        Self::NonInteger {
            message: message.into(),
        }
    }

    pub fn missing_argument(message: impl Into<String>) -> Self {
        Self::MissingArgument {
            message: message.into(),
        }
    }

    pub fn overflow(message: impl Into<String>) -> Self {
        Self::Overflow {
            message: message.into(),
        }
    }

    /// Stable tag for the variant, used in batch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "InvalidArgument",
            Self::InvalidDate { .. } => "InvalidDate",
            Self::InvalidFormat { .. } => "InvalidFormat",
            Self::InvalidNumber { .. } => "InvalidNumber",
            Self::NotANumber { .. } => "NotANumber",
            Self::NegativeInput { .. } => "NegativeInput",
            Self::NonInteger { .. } => "NonInteger",
            Self::MissingArgument { .. } => "MissingArgument",
            Self::Overflow { .. } => "Overflow",
            Self::UnknownOperation { .. } => "UnknownOperation",
            Self::ConfigValidationError { .. } => "ConfigValidationError",
            Self::InvalidConfigValueError { .. } => "InvalidConfigValueError",
            Self::IoError(_) => "IoError",
            Self::SerializationError(_) => "SerializationError",
            Self::CsvError(_) => "CsvError",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. }
            | Self::InvalidDate { .. }
            | Self::InvalidFormat { .. }
            | Self::InvalidNumber { .. }
            | Self::NotANumber { .. } => ErrorCategory::Type,
            Self::NegativeInput { .. } | Self::NonInteger { .. } => ErrorCategory::Domain,
            Self::MissingArgument { .. } => ErrorCategory::Arity,
            Self::Overflow { .. } => ErrorCategory::Range,
            Self::UnknownOperation { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::InvalidArgument { .. } => {
                "Pass text arguments (and a single character where one is expected)".to_string()
            }
            Self::InvalidDate { .. } => {
                "Use a date such as 2023-12-25 or 2023-12-25T10:30:00".to_string()
            }
            Self::InvalidFormat { .. } => {
                "Provide a non-empty pattern using the YYYY, MM and DD tokens".to_string()
            }
            Self::InvalidNumber { .. } | Self::NotANumber { .. } => {
                "Pass a plain number, not a quoted string".to_string()
            }
            Self::NegativeInput { .. } => "Use a value of zero or greater".to_string(),
            Self::NonInteger { .. } => "Use a whole number without a fractional part".to_string(),
            Self::MissingArgument { .. } => {
                "Check the argument count with the `list` command".to_string()
            }
            Self::Overflow { .. } => "Use a smaller input value".to_string(),
            Self::UnknownOperation { .. } => {
                "Run the `list` command to see the available operations".to_string()
            }
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' entry in the batch file", field)
            }
            Self::IoError(_) => "Check that the path exists and is writable".to_string(),
            Self::SerializationError(_) | Self::CsvError(_) => {
                "Check the batch arguments for values that cannot be serialized".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Type => format!("Wrong argument type: {}", self),
            ErrorCategory::Domain => format!("Argument out of domain: {}", self),
            ErrorCategory::Arity => format!("Wrong number of arguments: {}", self),
            ErrorCategory::Range => format!("Value out of range: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, UtilError>;
