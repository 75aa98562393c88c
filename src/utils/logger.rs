use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match (verbose, level) {
        (true, _) => EnvFilter::new("fare_check=debug,info"),
        (false, Some(level)) => EnvFilter::try_new(format!("fare_check={}", level))
            .unwrap_or_else(|_| EnvFilter::new("fare_check=info")),
        (false, None) => EnvFilter::new("fare_check=info"),
    })
}

/// CLI 日誌: 預設 compact 格式，`json` 時輸出 JSON 行
pub fn init_cli_logger(verbose: bool, level: Option<&str>, json: bool) {
    let filter = default_filter(verbose, level);
    let registry = tracing_subscriber::registry().with(filter);

    // 日誌寫到 stderr，stdout 只留給結果 JSON
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }
}

pub fn init_lambda_logger() {
    let filter = default_filter(false, None);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .without_time()
                .json(), // Lambda uses JSON format for better CloudWatch integration
        )
        .init();
}
