use anyhow::Context;
use bikeshare_explorer::config::toml_config::LogFormat;
use bikeshare_explorer::domain::ports::ConfigProvider;
use bikeshare_explorer::utils::error::ErrorSeverity;
use bikeshare_explorer::utils::{logger, validation::Validate};
use bikeshare_explorer::{CliConfig, Explorer, LocalDatasets, StdConsole, TomlConfig};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.config.clone() {
        Some(path) => {
            let config = TomlConfig::from_file(&path)
                .with_context(|| format!("Failed to load config file '{}'", path))?;

            // 初始化日誌
            match config.log_format() {
                LogFormat::Json => logger::init_json_logger(config.log_level()),
                LogFormat::Compact => logger::init_cli_logger(cli.verbose, Some(config.log_level())),
            }
            tracing::info!("📁 Loaded configuration from: {}", path);

            let monitor_enabled = cli.monitor || config.monitoring_enabled();
            explore(config, monitor_enabled);
        }
        None => {
            logger::init_cli_logger(cli.verbose, None);
            if cli.verbose {
                tracing::debug!("CLI config: {:?}", cli);
            }

            let monitor_enabled = cli.monitor;
            explore(cli, monitor_enabled);
        }
    }

    Ok(())
}

fn explore<C: ConfigProvider + Validate>(config: C, monitor_enabled: bool) {
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let source = LocalDatasets::from_config(&config);
    let mut explorer = Explorer::new_with_monitoring(source, config, monitor_enabled);
    let mut console = StdConsole::stdio();

    match explorer.run(&mut console) {
        Ok(summary) => {
            tracing::info!(
                "✅ Finished after {} sessions (quit: {})",
                summary.sessions,
                summary.quit
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Exploration failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
