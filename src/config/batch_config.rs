use crate::core::dispatch::Operation;
use crate::utils::error::{Result, UtilError};
use crate::utils::validation::{
    sanitize_filename, validate_file_stem, validate_non_empty_string, validate_one_of,
    validate_path, validate_positive_number, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const OUTPUT_FORMATS: [&str; 3] = ["json", "csv", "tsv"];
pub const ERROR_POLICIES: [&str; 2] = ["continue", "abort"];

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub batch: BatchInfo,
    pub output: OutputConfig,
    pub error_handling: Option<ErrorHandlingConfig>,
    #[serde(default)]
    pub calls: Vec<CallConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
    /// File stem for the report files, defaults to the batch name.
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallConfig {
    pub operation: String,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

impl BatchConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| UtilError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn abort_on_error(&self) -> bool {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_error.as_deref())
            .map(|policy| policy == "abort")
            .unwrap_or(false)
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }

    /// File stem for report files, reduced to a single path component.
    pub fn report_stem(&self) -> String {
        sanitize_filename(self.output.filename.as_deref().unwrap_or(&self.batch.name))
    }

    /// Parsed operations in call order.
    pub fn operations(&self) -> Result<Vec<Operation>> {
        self.calls
            .iter()
            .map(|call| call.operation.parse::<Operation>())
            .collect()
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("batch.name", &self.batch.name)?;
        validate_path("output.path", &self.output.path)?;
        match &self.output.filename {
            Some(filename) => validate_file_stem("output.filename", filename)?,
            None => validate_file_stem("batch.name", &self.batch.name)?,
        }

        validate_positive_number("output.formats", self.output.formats.len(), 1)?;
        for format in &self.output.formats {
            validate_one_of("output.formats", format, &OUTPUT_FORMATS)?;
        }

        if let Some(policy) = self.error_handling.as_ref().and_then(|e| e.on_error.as_deref()) {
            validate_one_of("error_handling.on_error", policy, &ERROR_POLICIES)?;
        }

        validate_positive_number("calls", self.calls.len(), 1)?;
        for (index, call) in self.calls.iter().enumerate() {
            call.operation
                .parse::<Operation>()
                .map_err(|_| UtilError::InvalidConfigValueError {
                    field: format!("calls[{}].operation", index),
                    value: call.operation.clone(),
                    reason: "Unknown operation".to_string(),
                })?;
        }

        tracing::debug!("Batch '{}' passed validation", self.batch.name);
        Ok(())
    }
}
