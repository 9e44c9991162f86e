use anyhow::Result;
use small_utils::utils::validation::Validate;
use small_utils::{BatchConfig, BatchEngine, LocalStorage};
use tempfile::TempDir;

fn write_batch(temp_dir: &TempDir, output_path: &str, on_error: &str) -> Result<String> {
    let content = format!(
        r#"
[batch]
name = "end-to-end"
description = "One call from each group plus a failing one"

[output]
path = "{}"
formats = ["json", "csv", "tsv"]
filename = "report"

[error_handling]
on_error = "{}"

[[calls]]
operation = "truncate"
args = ["hello world", 8]

[[calls]]
operation = "daysBetween"
args = ["2020-01-01", "2023-12-31"]

[[calls]]
operation = "fibonacci"
args = [40]

[[calls]]
operation = "gcd"
args = [12]
"#,
        output_path.replace('\\', "/"),
        on_error
    );

    let config_path = temp_dir.path().join("batch.toml");
    std::fs::write(&config_path, content)?;
    Ok(config_path.to_string_lossy().into_owned())
}

#[test]
fn test_batch_writes_all_report_formats() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().join("reports");
    let config_path = write_batch(&temp_dir, output_dir.to_str().unwrap(), "continue")?;

    let config = BatchConfig::from_file(&config_path)?;
    config.validate()?;

    let engine = BatchEngine::new(LocalStorage::new(config.output_path()));
    let (report, written) = engine.run(&config)?;

    assert_eq!(report.succeeded(), 3);
    assert_eq!(report.failed(), 1);
    assert_eq!(written.len(), 3);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output_dir.join("report.json"))?)?;
    let outcomes = json["outcomes"].as_array().unwrap();
    assert_eq!(outcomes[0]["result"], "hello...");
    assert_eq!(outcomes[1]["result"], 1460);
    assert_eq!(outcomes[2]["result"], 102_334_155);
    assert_eq!(outcomes[3]["status"], "error");
    assert_eq!(outcomes[3]["error_kind"], "MissingArgument");

    let csv = std::fs::read_to_string(output_dir.join("report.csv"))?;
    assert!(csv.starts_with("index,operation,args,status,result,error_kind,message"));
    assert!(csv.contains("GCD requires exactly two arguments"));

    let tsv = std::fs::read_to_string(output_dir.join("report.tsv"))?;
    assert!(tsv.contains("fibonacci\t[40]\tok\t102334155"));

    Ok(())
}

#[test]
fn test_batch_abort_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().join("aborted");
    let config_path = write_batch(&temp_dir, output_dir.to_str().unwrap(), "abort")?;

    let config = BatchConfig::from_file(&config_path)?;
    let engine = BatchEngine::new(LocalStorage::new(config.output_path()));

    let err = engine.run(&config).unwrap_err();
    assert_eq!(err.kind(), "MissingArgument");
    assert!(!output_dir.exists());

    Ok(())
}

#[test]
fn test_missing_batch_file_is_an_io_error() {
    let err = BatchConfig::from_file("/definitely/not/here/batch.toml").unwrap_err();
    assert_eq!(err.kind(), "IoError");
}

#[test]
fn test_report_name_cannot_leave_output_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().join("reports");
    let content = format!(
        r#"
[batch]
name = "../escaped"

[output]
path = "{}"
formats = ["json"]

[[calls]]
operation = "reverse"
args = ["abc"]
"#,
        output_dir.to_str().unwrap().replace('\\', "/")
    );
    let config = BatchConfig::from_toml_str(&content)?;

    let err = config.validate().unwrap_err();
    assert_eq!(err.kind(), "InvalidConfigValueError");

    let engine = BatchEngine::new(LocalStorage::new(config.output_path()));
    let (_, written) = engine.run(&config)?;

    assert_eq!(written.len(), 1);
    assert!(output_dir.join(".._escaped.json").exists());
    assert!(!temp_dir.path().join("escaped.json").exists());

    Ok(())
}
