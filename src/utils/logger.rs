use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 決定日誌過濾條件：`--verbose` 優先，其次為設定檔的 log_level，預設只顯示警告
pub fn filter_directives(verbose: bool, level: Option<&str>) -> String {
    match (verbose, level) {
        (true, _) => "bikeshare_explorer=debug,info".to_string(),
        (false, Some(level)) => format!("bikeshare_explorer={}", level),
        (false, None) => "bikeshare_explorer=warn".to_string(),
    }
}

/// 初始化 CLI 日誌；輸出到 stderr，stdout 保留給互動式對話
pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbose, level)));

    tracing_subscriber::registry()
        .with(filter)
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

/// 以 JSON 格式輸出日誌，方便將多次執行的記錄交給其他工具分析
pub fn init_json_logger(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(false, Some(level))));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
