use clap::Parser;
use small_utils::config::cli::{parse_cli_arg, Command, LogFormat};
use small_utils::core::batch;
use small_utils::utils::error::ErrorCategory;
use small_utils::utils::{logger, validation::Validate};
use small_utils::{BatchConfig, BatchEngine, CliConfig, LocalStorage, Operation, UtilError};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }
    tracing::debug!("CLI config: {:?}", config);

    let outcome = match config.command {
        Command::Call { operation, args } => run_call(&operation, &args),
        Command::Batch {
            config,
            output_path,
            dry_run,
        } => run_batch(&config, output_path, dry_run),
        Command::List => {
            list_operations();
            Ok(())
        }
    };

    if let Err(e) = outcome {
        tracing::error!("{} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(exit_code(e.category()));
    }

    Ok(())
}

fn run_call(name: &str, raw_args: &[String]) -> Result<(), UtilError> {
    let operation: Operation = name.parse()?;
    let args: Vec<_> = raw_args.iter().map(|raw| parse_cli_arg(raw)).collect();

    let result = operation.invoke(&args)?;
    println!("{}", result);
    Ok(())
}

fn run_batch(path: &str, output_path: Option<String>, dry_run: bool) -> Result<(), UtilError> {
    tracing::info!("📁 Loading batch from: {}", path);
    let mut config = BatchConfig::from_file(path)?;

    if let Some(output_path) = output_path {
        tracing::info!("🔧 Output path overridden to: {}", output_path);
        config.output.path = output_path;
    }
    config.validate()?;

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - No calls will be executed");
        for (index, (operation, arg_count)) in batch::plan(&config)?.into_iter().enumerate() {
            println!("#{:<3} {} ({} argument(s))", index, operation, arg_count);
        }
        return Ok(());
    }

    let engine = BatchEngine::new(LocalStorage::new(config.output_path()));
    let (report, written) = engine.run(&config)?;

    println!(
        "✅ Batch '{}' finished: {} ok, {} failed",
        report.name,
        report.succeeded(),
        report.failed()
    );
    for path in written {
        println!("📁 Report saved to: {}", path);
    }
    Ok(())
}

fn list_operations() {
    for operation in Operation::all() {
        println!(
            "{:<12} {:<7} {} argument(s)",
            operation.name(),
            operation.group().to_string(),
            operation.arity()
        );
    }
}

fn exit_code(category: ErrorCategory) -> i32 {
    match category {
        ErrorCategory::Configuration => 1,
        ErrorCategory::Type
        | ErrorCategory::Domain
        | ErrorCategory::Arity
        | ErrorCategory::Range => 2,
        ErrorCategory::System => 3,
    }
}
