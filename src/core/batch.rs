use crate::config::batch_config::BatchConfig;
use crate::core::dispatch::Operation;
use crate::domain::model::{BatchReport, CallOutcome, ReportFormat};
use crate::domain::ports::Storage;
use crate::utils::error::Result;

/// Runs the calls of a batch file and writes the report through a `Storage`.
pub struct BatchEngine<S: Storage> {
    storage: S,
}

impl<S: Storage> BatchEngine<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Executes and loads the batch, returning the written paths.
    pub fn run(&self, config: &BatchConfig) -> Result<(BatchReport, Vec<String>)> {
        tracing::info!("Starting batch '{}'", config.batch.name);

        let report = execute(config)?;
        tracing::info!(
            "Executed {} calls ({} ok, {} failed)",
            report.outcomes.len(),
            report.succeeded(),
            report.failed()
        );

        let written = self.load(config, &report)?;
        Ok((report, written))
    }

    fn load(&self, config: &BatchConfig, report: &BatchReport) -> Result<Vec<String>> {
        let mut written = Vec::new();
        for format in &config.output.formats {
            let format: ReportFormat = format.parse()?;
            let contents = report.render(format)?;
            let filename = format!("{}.{}", config.report_stem(), format.extension());

            tracing::debug!("Writing {} ({} bytes)", filename, contents.len());
            written.push(self.storage.write_file(&filename, contents.as_bytes())?);
        }
        Ok(written)
    }
}

/// Runs every call in order. With `on_error = "abort"` the first failing
/// call's error is returned instead of a report.
pub fn execute(config: &BatchConfig) -> Result<BatchReport> {
    let operations = config.operations()?;
    let abort_on_error = config.abort_on_error();
    let mut outcomes = Vec::with_capacity(operations.len());

    for (index, (operation, call)) in operations.iter().zip(&config.calls).enumerate() {
        match operation.invoke(&call.args) {
            Ok(result) => {
                tracing::debug!("#{} {} -> {}", index, operation, result);
                outcomes.push(CallOutcome::success(
                    index,
                    operation.name(),
                    call.args.clone(),
                    result,
                ));
            }
            Err(e) => {
                tracing::warn!("#{} {} failed: {} ({})", index, operation, e, e.kind());
                if abort_on_error {
                    return Err(e);
                }
                outcomes.push(CallOutcome::failure(
                    index,
                    operation.name(),
                    call.args.clone(),
                    &e,
                ));
            }
        }
    }

    Ok(BatchReport {
        name: config.batch.name.clone(),
        outcomes,
    })
}

/// Calls the batch would run, without running them.
pub fn plan(config: &BatchConfig) -> Result<Vec<(Operation, usize)>> {
    Ok(config
        .operations()?
        .into_iter()
        .zip(&config.calls)
        .map(|(operation, call)| (operation, call.args.len()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CallStatus;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryStorage {
        files: RefCell<Vec<(String, Vec<u8>)>>,
    }

    impl Storage for &MemoryStorage {
        fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            self.files
                .borrow_mut()
                .push((path.to_string(), data.to_vec()));
            Ok(format!("memory://{}", path))
        }
    }

    fn config(on_error: &str) -> BatchConfig {
        BatchConfig::from_toml_str(&format!(
            r#"
[batch]
name = "mixed"

[output]
path = "unused"
formats = ["csv", "json"]

[error_handling]
on_error = "{}"

[[calls]]
operation = "capitalize"
args = ["hello world"]

[[calls]]
operation = "factorial"
args = [-3]

[[calls]]
operation = "is_prime"
args = [97]
"#,
            on_error
        ))
        .unwrap()
    }

    #[test]
    fn test_execute_continues_past_failures() {
        let report = execute(&config("continue")).unwrap();

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.outcomes[0].result, Some(json!("Hello World")));
        assert_eq!(report.outcomes[1].status, CallStatus::Error);
        assert_eq!(report.outcomes[1].error_kind.as_deref(), Some("NegativeInput"));
        assert_eq!(report.outcomes[2].operation, "isPrime");
        assert_eq!(report.outcomes[2].result, Some(json!(true)));
    }

    #[test]
    fn test_execute_aborts_on_first_failure() {
        let err = execute(&config("abort")).unwrap_err();
        assert_eq!(err.kind(), "NegativeInput");
    }

    #[test]
    fn test_engine_writes_each_format() {
        let storage = MemoryStorage::default();
        let engine = BatchEngine::new(&storage);

        let (report, written) = engine.run(&config("continue")).unwrap();

        assert_eq!(report.succeeded(), 2);
        assert_eq!(written, vec!["memory://mixed.csv", "memory://mixed.json"]);
        let files = storage.files.borrow();
        assert!(String::from_utf8_lossy(&files[0].1).contains("Hello World"));
    }

    #[test]
    fn test_plan_lists_calls() {
        let planned = plan(&config("continue")).unwrap();
        assert_eq!(
            planned,
            vec![
                (Operation::Capitalize, 1),
                (Operation::Factorial, 1),
                (Operation::IsPrime, 1)
            ]
        );
    }
}
