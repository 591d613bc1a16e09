use crate::domain::model::{City, Month, Selection, SessionFilters, Trip, TripRecord, TripTable};
use crate::domain::ports::DatasetSource;
use crate::utils::error::{ExplorerError, Result};
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

const START_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    START_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// 衍生月份、星期、小時與起訖站組合欄位
pub fn derive_trip(row: usize, record: TripRecord) -> Result<Trip> {
    let start = parse_start_time(&record.start_time).ok_or_else(|| {
        ExplorerError::MalformedRecord {
            row,
            message: format!("unparseable Start Time '{}'", record.start_time),
        }
    })?;
    let route = format!("{} to {}", record.start_station, record.end_station);

    Ok(Trip {
        row,
        start,
        month: start.month(),
        weekday: start.weekday(),
        start_hour: start.hour(),
        route,
        record,
    })
}

/// 解析整份 CSV；未知欄位（例如無名稱的索引欄）會被忽略
pub fn parse_trips(data: &[u8]) -> Result<Vec<Trip>> {
    let mut reader = csv::Reader::from_reader(data);
    let mut trips = Vec::new();

    for (row, result) in reader.deserialize::<TripRecord>().enumerate() {
        let record = result?;
        trips.push(derive_trip(row, record)?);
    }

    Ok(trips)
}

impl TripTable {
    pub fn new(city: City, trips: Vec<Trip>) -> Self {
        Self {
            city,
            source_rows: trips.len(),
            trips,
        }
    }

    /// 只保留指定月份的行程；`All` 不做任何事
    pub fn filter_month(mut self, month: Selection<Month>) -> Self {
        if let Selection::Only(month) = month {
            let number = month.number();
            self.trips.retain(|trip| trip.month == number);
        }
        self
    }

    pub fn filter_day(mut self, day: Selection<Weekday>) -> Self {
        if let Selection::Only(day) = day {
            self.trips.retain(|trip| trip.weekday == day);
        }
        self
    }

    pub fn apply(self, filters: &SessionFilters) -> Self {
        self.filter_month(filters.month).filter_day(filters.day)
    }
}

/// 載入城市資料集並套用月份與星期篩選
pub fn load_trips<S: DatasetSource + ?Sized>(
    source: &S,
    filters: &SessionFilters,
) -> Result<TripTable> {
    let data = source.read_dataset(filters.city)?;
    let trips = parse_trips(&data)?;
    tracing::debug!("Parsed {} trips for {}", trips.len(), filters.city);

    let table = TripTable::new(filters.city, trips).apply(filters);
    tracing::info!(
        "📥 Loaded {} of {} trips for {}",
        table.len(),
        table.source_rows,
        filters.city
    );

    Ok(table)
}
