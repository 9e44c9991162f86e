use crate::utils::error::{Result, UtilError};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Ok,
    Error,
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Result of one call in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallOutcome {
    pub index: usize,
    pub operation: String,
    pub args: Vec<serde_json::Value>,
    pub status: CallStatus,
    pub result: Option<serde_json::Value>,
    pub error_kind: Option<String>,
    pub message: Option<String>,
}

impl CallOutcome {
    pub fn success(
        index: usize,
        operation: &str,
        args: Vec<serde_json::Value>,
        result: serde_json::Value,
    ) -> Self {
        Self {
            index,
            operation: operation.to_string(),
            args,
            status: CallStatus::Ok,
            result: Some(result),
            error_kind: None,
            message: None,
        }
    }

    pub fn failure(
        index: usize,
        operation: &str,
        args: Vec<serde_json::Value>,
        error: &UtilError,
    ) -> Self {
        Self {
            index,
            operation: operation.to_string(),
            args,
            status: CallStatus::Error,
            result: None,
            error_kind: Some(error.kind().to_string()),
            message: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == CallStatus::Ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
    Tsv,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = UtilError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            other => Err(UtilError::InvalidConfigValueError {
                field: "output.formats".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: json, csv, tsv".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub name: String,
    pub outcomes: Vec<CallOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ReportFormat::Csv => self.render_delimited(b','),
            ReportFormat::Tsv => self.render_delimited(b'\t'),
        }
    }

    fn render_delimited(&self, delimiter: u8) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());

        writer.write_record(["index", "operation", "args", "status", "result", "error_kind", "message"])?;
        for outcome in &self.outcomes {
            writer.write_record([
                outcome.index.to_string(),
                outcome.operation.clone(),
                serde_json::to_string(&outcome.args)?,
                outcome.status.to_string(),
                outcome.result.as_ref().map(plain_text).unwrap_or_default(),
                outcome.error_kind.clone().unwrap_or_default(),
                outcome.message.clone().unwrap_or_default(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| UtilError::IoError(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| {
            UtilError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}

/// Strings without their JSON quotes; everything else as JSON.
fn plain_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
