use crate::core::filters::FAREWELL;
use crate::domain::model::{Trip, TripTable};
use crate::domain::ports::Console;
use crate::utils::error::Result;

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    AskInitial,
    ShowingBlock,
    AskContinue,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    Yes,
    No,
}

fn parse_answer(input: &str) -> Option<Answer> {
    match input.trim().to_lowercase().as_str() {
        "y" => Some(Answer::Yes),
        "n" => Some(Answer::No),
        _ => None,
    }
}

/// 逐頁顯示篩選後的原始行程
pub struct RowViewer<'a> {
    table: &'a TripTable,
    page_size: usize,
    position: usize,
    blocks_shown: usize,
    state: ViewerState,
}

impl<'a> RowViewer<'a> {
    pub fn new(table: &'a TripTable, page_size: usize) -> Self {
        Self {
            table,
            page_size: page_size.max(1),
            position: 0,
            blocks_shown: 0,
            state: ViewerState::AskInitial,
        }
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn blocks_shown(&self) -> usize {
        self.blocks_shown
    }

    fn remaining(&self) -> usize {
        self.table.len().saturating_sub(self.position)
    }

    /// 執行一次狀態轉移並回傳新狀態
    pub fn step(&mut self, console: &mut dyn Console) -> Result<ViewerState> {
        self.state = match self.state {
            ViewerState::AskInitial => {
                let prompt = format!(
                    "Would you like to view {} rows of individual trip data? (y/n)\n",
                    self.page_size
                );
                match console.ask(&prompt)?.as_deref().map(parse_answer) {
                    None => ViewerState::Done,
                    Some(Some(Answer::No)) => {
                        console.say(FAREWELL)?;
                        ViewerState::Done
                    }
                    Some(Some(Answer::Yes)) if self.remaining() == 0 => ViewerState::Done,
                    Some(Some(Answer::Yes)) => ViewerState::ShowingBlock,
                    Some(None) => ViewerState::AskInitial,
                }
            }
            ViewerState::ShowingBlock => {
                let end = (self.position + self.page_size).min(self.table.len());
                let block = &self.table.trips[self.position..end];
                for line in render_block(block, self.table.city.has_demographics()) {
                    console.say(&line)?;
                }
                self.position = end;
                self.blocks_shown += 1;
                ViewerState::AskContinue
            }
            ViewerState::AskContinue if self.remaining() == 0 => ViewerState::Done,
            ViewerState::AskContinue => {
                match console
                    .ask("Do you wish to continue? (y/n): ")?
                    .as_deref()
                    .map(parse_answer)
                {
                    None | Some(Some(Answer::No)) => ViewerState::Done,
                    Some(Some(Answer::Yes)) => ViewerState::ShowingBlock,
                    Some(None) => ViewerState::AskContinue,
                }
            }
            ViewerState::Done => ViewerState::Done,
        };
        Ok(self.state)
    }

    /// 執行到 `Done` 為止，回傳顯示過的區塊數
    pub fn run(mut self, console: &mut dyn Console) -> Result<usize> {
        console.say(&format!(
            "\nThere are {} rows of data within the selection",
            self.table.len()
        ))?;

        while self.step(console)? != ViewerState::Done {}

        tracing::debug!(
            "Row viewer finished after {} blocks ({} of {} rows shown)",
            self.blocks_shown,
            self.position,
            self.table.len()
        );
        Ok(self.blocks_shown)
    }
}

fn format_birth_year(value: Option<f64>) -> String {
    match value {
        Some(year) => format!("{:.1}", year),
        None => "NaN".to_string(),
    }
}

/// 將一個區塊排成對齊的文字表格，第一欄為原始列索引
pub fn render_block(trips: &[Trip], with_demographics: bool) -> Vec<String> {
    let mut header = vec![
        String::new(),
        "Start Time".to_string(),
        "End Time".to_string(),
        "Trip Duration".to_string(),
        "Start Station".to_string(),
        "End Station".to_string(),
        "User Type".to_string(),
    ];
    if with_demographics {
        header.push("Gender".to_string());
        header.push("Birth Year".to_string());
    }

    let mut rows = vec![header];
    for trip in trips {
        let record = &trip.record;
        let mut row = vec![
            trip.row.to_string(),
            record.start_time.clone(),
            record.end_time.clone(),
            record.trip_duration.to_string(),
            record.start_station.clone(),
            record.end_station.clone(),
            record.user_type.clone().unwrap_or_else(|| "NaN".to_string()),
        ];
        if with_demographics {
            row.push(record.gender.clone().unwrap_or_else(|| "NaN".to_string()));
            row.push(format_birth_year(record.birth_year));
        }
        rows.push(row);
    }

    let columns = rows[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    rows.iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:>width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect()
}
