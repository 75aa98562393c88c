use clap::Parser;
use fare_check::config::{Command, DataSourceKind};
use fare_check::core::ReferenceRepository;
use fare_check::utils::{logger, validation::Validate};
use fare_check::{
    reference_repository, CliConfig, FareChecker, HttpStorage, LocalStorage, ResponseStatus,
    TomlConfig,
};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", output);
    Ok(())
}

/// 依回應狀態決定退出碼
fn exit_code(status: ResponseStatus) -> i32 {
    match status {
        ResponseStatus::Ok => 0,
        ResponseStatus::NotFound => 1,
        ResponseStatus::BadRequest => 2,
        ResponseStatus::InternalServerError => 3,
    }
}

async fn run<R: ReferenceRepository>(checker: FareChecker<R>, cli: &CliConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Command::Check(args) => {
            let response = checker.handle(args.to_request()).await;
            print_json(&response.body, cli.pretty)?;
            Ok(exit_code(response.status))
        }
        Command::Airports => {
            let airports = checker.list_airports().await?;
            tracing::info!("📋 {} airports available", airports.len());
            print_json(&airports, cli.pretty)?;
            Ok(0)
        }
        Command::Airlines => {
            let airlines = checker.list_airlines().await?;
            tracing::info!("📋 {} airlines classified", airlines.len());
            print_json(&airlines, cli.pretty)?;
            Ok(0)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config: TomlConfig = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    };

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, config.log_level(), config.json_logs());

    tracing::info!("Starting fare-check CLI");
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(2);
    }

    let code = match config.data.source {
        DataSourceKind::Local => {
            tracing::info!("📁 Reading reference tables from {}", config.data_path());
            let storage = LocalStorage::new(config.data_path());
            run(FareChecker::new(reference_repository(storage, &config)), &cli).await?
        }
        DataSourceKind::Http => {
            let url = config.data.url.as_deref().unwrap_or_default();
            tracing::info!("🌐 Reading reference tables from {}", url);
            let storage = HttpStorage::new(url, config.request_timeout())?;
            run(FareChecker::new(reference_repository(storage, &config)), &cli).await?
        }
    };

    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
