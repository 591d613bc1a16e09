use crate::core::aggregate::{count_of, mean, mode, sum, value_counts};
use crate::core::filters::RULE;
use crate::domain::model::{weekday_title, Month, SessionFilters, TripTable, WEEKDAYS};
use crate::domain::ports::Console;
use crate::utils::error::Result;
use chrono::Weekday;
use serde::Serialize;
use std::time::Instant;

/// 報表沿用的「天」換算值。實際一天為 86_400 秒，見 DESIGN.md
pub const REPORTED_SECONDS_PER_DAY: f64 = 84_600.0;

const NOT_AVAILABLE: &str = "n/a";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popular<T> {
    pub value: T,
    pub count: usize,
}

impl<T> From<(T, usize)> for Popular<T> {
    fn from((value, count): (T, usize)) -> Self {
        Self { value, count }
    }
}

fn popular<T, I>(values: I) -> Option<Popular<T>>
where
    T: Ord + std::hash::Hash,
    I: IntoIterator<Item = T>,
{
    mode(values).map(Popular::from)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub popular_month: Option<Popular<u32>>,
    pub popular_day: Option<Popular<Weekday>>,
    pub popular_hour: Option<Popular<u32>>,
}

impl TimeStats {
    /// 月份與星期只在對應篩選為 `all` 時計算
    pub fn compute(table: &TripTable, filters: &SessionFilters) -> Self {
        let popular_month = if filters.month.is_all() {
            popular(table.trips.iter().map(|trip| trip.month))
        } else {
            None
        };
        let popular_day = if filters.day.is_all() {
            popular(table.trips.iter().map(|trip| weekday_title(trip.weekday)))
                .and_then(|p| weekday_by_title(p.value).map(|value| Popular { value, count: p.count }))
        } else {
            None
        };

        Self {
            popular_month,
            popular_day,
            popular_hour: popular(table.trips.iter().map(|trip| trip.start_hour)),
        }
    }

    pub fn render(&self, filters: &SessionFilters) -> Vec<String> {
        let mut lines = Vec::new();
        if filters.month.is_all() {
            let month = self
                .popular_month
                .as_ref()
                .map(|p| match Month::from_number(p.value) {
                    Some(month) => month.title().to_string(),
                    None => p.value.to_string(),
                })
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            lines.push(format!("Most popular month: {}", month));
        }
        if filters.day.is_all() {
            let day = self
                .popular_day
                .as_ref()
                .map(|p| weekday_title(p.value).to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            lines.push(format!("Most popular day:   {}", day));
        }
        let hour = self
            .popular_hour
            .as_ref()
            .map(|p| p.value.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        lines.push(format!("Most popular hour:  {}", hour));
        lines
    }
}

// Weekday 未實作 Ord，以星期名稱計算眾數；同票時依名稱字母順序取最小者
fn weekday_by_title(title: &str) -> Option<Weekday> {
    WEEKDAYS.into_iter().find(|day| weekday_title(*day) == title)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub start_station: Option<Popular<String>>,
    pub end_station: Option<Popular<String>>,
    pub route: Option<Popular<String>>,
}

impl StationStats {
    pub fn compute(table: &TripTable) -> Self {
        Self {
            start_station: popular(table.trips.iter().map(|t| t.record.start_station.clone())),
            end_station: popular(table.trips.iter().map(|t| t.record.end_station.clone())),
            route: popular(table.trips.iter().map(|t| t.route.clone())),
        }
    }

    pub fn render(&self) -> Vec<String> {
        let describe = |stat: &Option<Popular<String>>| match stat {
            Some(p) => format!("{} (Count: {})", p.value, p.count),
            None => NOT_AVAILABLE.to_string(),
        };
        vec![
            format!("Most popular start station: {}", describe(&self.start_station)),
            format!("Most popular end station: {}", describe(&self.end_station)),
            format!(
                "Most frequent start station and end station trip: {}",
                describe(&self.route)
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_seconds: f64,
    pub mean_seconds: Option<f64>,
}

impl DurationStats {
    pub fn compute(table: &TripTable) -> Self {
        let durations: Vec<f64> = table
            .trips
            .iter()
            .map(|trip| trip.record.trip_duration)
            .collect();
        Self {
            total_seconds: sum(&durations),
            mean_seconds: mean(&durations),
        }
    }

    pub fn total_days(&self) -> f64 {
        self.total_seconds / REPORTED_SECONDS_PER_DAY
    }

    pub fn render(&self) -> Vec<String> {
        let total = self.total_seconds;
        let mut lines = vec![
            format!("Total travel time: {:.1} seconds", total),
            format!("\t\tor {:.1} minutes", total / 60.0),
            format!("\t\tor {:.1} hours", total / 3600.0),
            format!("\t\tor {:.2} days", self.total_days()),
            String::new(),
        ];
        match self.mean_seconds {
            Some(mean) => {
                lines.push(format!("Mean travel time:  {:.1} seconds", mean));
                lines.push(format!("\t\tor {:.1} minutes", mean / 60.0));
                lines.push(format!("\t\tor {:.2} hours", mean / 3600.0));
            }
            None => lines.push(format!("Mean travel time:  {}", NOT_AVAILABLE)),
        }
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Demographics {
    pub male: usize,
    pub female: usize,
    pub gender_counts: Vec<(String, usize)>,
    pub earliest_birth_year: Option<i32>,
    pub most_recent_birth_year: Option<i32>,
    pub most_common_birth_year: Option<Popular<i32>>,
    /// 最常見出生年份佔所有非空出生年份的百分比
    pub most_common_share: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub subscribers: usize,
    pub customers: usize,
    pub user_type_counts: Vec<(String, usize)>,
    pub demographics: Option<Demographics>,
}

impl UserStats {
    pub fn compute(table: &TripTable, filters: &SessionFilters) -> Self {
        let user_type_counts = value_counts(
            table
                .trips
                .iter()
                .filter_map(|trip| non_blank(trip.record.user_type.as_deref())),
        );

        let demographics = if filters.city.has_demographics() {
            Some(Self::demographics(table))
        } else {
            None
        };

        Self {
            subscribers: count_of(&user_type_counts, "Subscriber"),
            customers: count_of(&user_type_counts, "Customer"),
            user_type_counts,
            demographics,
        }
    }

    fn demographics(table: &TripTable) -> Demographics {
        let gender_counts = value_counts(
            table
                .trips
                .iter()
                .filter_map(|trip| non_blank(trip.record.gender.as_deref())),
        );
        let birth_years: Vec<i32> = table
            .trips
            .iter()
            .filter_map(|trip| trip.record.birth_year)
            .filter(|year| year.is_finite())
            .map(|year| year as i32)
            .collect();

        let most_common_birth_year = popular(birth_years.iter().copied());
        let most_common_share = most_common_birth_year
            .as_ref()
            .map(|p| p.count as f64 * 100.0 / birth_years.len() as f64);

        Demographics {
            male: count_of(&gender_counts, "Male"),
            female: count_of(&gender_counts, "Female"),
            gender_counts,
            earliest_birth_year: birth_years.iter().min().copied(),
            most_recent_birth_year: birth_years.iter().max().copied(),
            most_common_birth_year,
            most_common_share,
        }
    }

    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Subscribers: {}", self.subscribers),
            format!("Customers:   {}", self.customers),
        ];
        for (label, count) in &self.user_type_counts {
            if label != "Subscriber" && label != "Customer" {
                lines.push(format!("{}: {}", label, count));
            }
        }
        lines.push(String::new());

        if let Some(demographics) = &self.demographics {
            lines.push(format!("Male:   {}", demographics.male));
            lines.push(format!("Female: {}", demographics.female));
            lines.push(String::new());

            let year = |value: Option<i32>| {
                value
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string())
            };
            lines.push(format!(
                "Earliest year of birth:    {}",
                year(demographics.earliest_birth_year)
            ));
            lines.push(format!(
                "Most recent year of birth: {}",
                year(demographics.most_recent_birth_year)
            ));
            match (&demographics.most_common_birth_year, demographics.most_common_share) {
                (Some(p), Some(share)) => lines.push(format!(
                    "Most common year of birth: {} ({:.2}% of users)",
                    p.value, share
                )),
                _ => lines.push(format!("Most common year of birth: {}", NOT_AVAILABLE)),
            }
        }
        lines
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 一次工作階段的所有統計結果，可序列化為 JSON 報告
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub filters: SessionFilters,
    pub rows: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}

/// 印出標題、計算結果與耗時
fn report<T>(
    console: &mut dyn Console,
    heading: &str,
    compute: impl FnOnce() -> T,
    render: impl FnOnce(&T) -> Vec<String>,
) -> Result<T> {
    console.say(&format!("\nCalculating {}...\n", heading))?;
    let start_time = Instant::now();

    let stats = compute();
    for line in render(&stats) {
        console.say(&line)?;
    }

    let elapsed = start_time.elapsed();
    tracing::debug!("⏱️ {} took {:?}", heading, elapsed);
    console.say(&format!("\nThis took {} seconds.", elapsed.as_secs_f64()))?;
    console.say(RULE)?;
    Ok(stats)
}

pub fn time_stats(
    table: &TripTable,
    filters: &SessionFilters,
    console: &mut dyn Console,
) -> Result<TimeStats> {
    report(
        console,
        "The Most Frequent Times of Travel",
        || TimeStats::compute(table, filters),
        |stats| stats.render(filters),
    )
}

pub fn station_stats(table: &TripTable, console: &mut dyn Console) -> Result<StationStats> {
    report(
        console,
        "The Most Popular Stations and Trip",
        || StationStats::compute(table),
        StationStats::render,
    )
}

pub fn trip_duration_stats(table: &TripTable, console: &mut dyn Console) -> Result<DurationStats> {
    report(
        console,
        "Trip Duration",
        || DurationStats::compute(table),
        DurationStats::render,
    )
}

pub fn user_stats(
    table: &TripTable,
    filters: &SessionFilters,
    console: &mut dyn Console,
) -> Result<UserStats> {
    report(
        console,
        "User Stats",
        || UserStats::compute(table, filters),
        UserStats::render,
    )
}
