use crate::core::filters::{collect_filters, Flow, RULE};
use crate::core::loader::load_trips;
use crate::core::stats::{station_stats, time_stats, trip_duration_stats, user_stats, SessionReport};
use crate::core::viewer::RowViewer;
use crate::domain::model::SessionFilters;
use crate::domain::ports::{ConfigProvider, Console, DatasetSource};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub sessions: usize,
    pub quit: bool,
}

pub struct Explorer<S: DatasetSource, C: ConfigProvider> {
    source: S,
    config: C,
    monitor: SystemMonitor,
}

impl<S: DatasetSource, C: ConfigProvider> Explorer<S, C> {
    pub fn new(source: S, config: C) -> Self {
        Self::new_with_monitoring(source, config, false)
    }

    pub fn new_with_monitoring(source: S, config: C, monitor_enabled: bool) -> Self {
        Self {
            source,
            config,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// 反覆執行工作階段，直到使用者輸入 `q` 或不再重新開始
    pub fn run(&mut self, console: &mut dyn Console) -> Result<RunSummary> {
        tracing::info!("🚲 Starting bikeshare explorer");
        let mut sessions = 0;

        loop {
            let filters = match collect_filters(console)? {
                Flow::Continue(filters) => filters,
                Flow::Quit => {
                    tracing::info!("👋 User quit after {} sessions", sessions);
                    self.monitor.log_final_stats();
                    return Ok(RunSummary {
                        sessions,
                        quit: true,
                    });
                }
            };

            self.run_session(&filters, console)?;
            sessions += 1;

            let restart = console.ask("\nWould you like to restart?(y/n)\n")?;
            if !restart.is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y")) {
                break;
            }
        }

        self.monitor.log_final_stats();
        Ok(RunSummary {
            sessions,
            quit: false,
        })
    }

    /// 載入資料、輸出四項統計並進入逐列瀏覽
    pub fn run_session(
        &mut self,
        filters: &SessionFilters,
        console: &mut dyn Console,
    ) -> Result<SessionReport> {
        let table = load_trips(&self.source, filters)?;
        self.monitor.log_stats("Load");

        let time = time_stats(&table, filters, console)?;
        self.monitor.log_stats("Time stats");
        self.pause(console)?;

        let stations = station_stats(&table, console)?;
        self.monitor.log_stats("Station stats");
        self.pause(console)?;

        let durations = trip_duration_stats(&table, console)?;
        self.monitor.log_stats("Duration stats");
        self.pause(console)?;

        let users = user_stats(&table, filters, console)?;
        self.monitor.log_stats("User stats");

        let report = SessionReport {
            filters: *filters,
            rows: table.len(),
            time,
            stations,
            durations,
            users,
        };

        if let Some(path) = self.config.report_path() {
            match write_report(path, &report) {
                Ok(()) => tracing::info!("📁 Session report saved to: {}", path),
                Err(e) => tracing::warn!("⚠️ Failed to write session report to {}: {}", path, e),
            }
        }

        RowViewer::new(&table, self.config.page_size()).run(console)?;
        Ok(report)
    }

    fn pause(&self, console: &mut dyn Console) -> Result<()> {
        let seconds = self.config.pause_seconds();
        if seconds == 0 {
            return Ok(());
        }
        console.say(&format!("Proceeding in {} seconds...", seconds))?;
        console.say(RULE)?;
        std::thread::sleep(Duration::from_secs(seconds));
        Ok(())
    }
}

pub fn write_report(path: &str, report: &SessionReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, json)?;
    Ok(())
}
