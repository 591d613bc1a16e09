use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// 各單字字首組成的縮寫：c、nyc、w
    pub fn short_code(self) -> &'static str {
        match self {
            City::Chicago => "c",
            City::NewYorkCity => "nyc",
            City::Washington => "w",
        }
    }

    pub fn default_file(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Washington 的資料沒有 Gender 與 Birth Year 欄位
    pub fn has_demographics(self) -> bool {
        !matches!(self, City::Washington)
    }

    pub fn parse(input: &str) -> Option<Self> {
        let token = normalize(input);
        City::ALL
            .into_iter()
            .find(|city| token == city.short_code() || token == city.name())
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
        }
    }

    /// 1 起算的月份編號
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn from_number(number: u32) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Month::ALL.get(index as usize).copied())
    }

    pub fn parse(input: &str) -> Option<Self> {
        let token = normalize(input);
        Month::ALL
            .into_iter()
            .find(|month| token == month.name() || token == &month.name()[..3])
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_title(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn parse_weekday(input: &str) -> Option<Weekday> {
    let token = normalize(input);
    WEEKDAYS.into_iter().find(|day| {
        let name = weekday_title(*day).to_lowercase();
        token == name || token == &name[..3]
    })
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// 篩選維度的選擇：全部，或單一值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T: Copy> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn value(&self) -> Option<T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(*value),
        }
    }

    /// `all` 或由 `parse_one` 接受的單一值
    pub fn parse_with(input: &str, parse_one: impl Fn(&str) -> Option<T>) -> Option<Self> {
        if input.trim().eq_ignore_ascii_case("all") {
            Some(Selection::All)
        } else {
            parse_one(input).map(Selection::Only)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionFilters {
    pub city: City,
    pub month: Selection<Month>,
    #[serde(serialize_with = "serialize_day_selection")]
    pub day: Selection<Weekday>,
}

impl SessionFilters {
    pub fn new(city: City, month: Selection<Month>, day: Selection<Weekday>) -> Self {
        Self { city, month, day }
    }

    pub fn unfiltered(city: City) -> Self {
        Self::new(city, Selection::All, Selection::All)
    }
}

fn serialize_day_selection<S>(day: &Selection<Weekday>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match day {
        Selection::All => serializer.serialize_str("all"),
        Selection::Only(day) => serializer.serialize_str(&weekday_title(*day).to_lowercase()),
    }
}

/// CSV 中的一筆原始行程，欄位依標題名稱對應
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<f64>,
}

/// 原始行程加上衍生欄位
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub row: usize,
    pub record: TripRecord,
    pub start: NaiveDateTime,
    pub month: u32,
    pub weekday: Weekday,
    pub start_hour: u32,
    pub route: String,
}

#[derive(Debug, Clone)]
pub struct TripTable {
    pub city: City,
    pub source_rows: usize,
    pub trips: Vec<Trip>,
}

impl TripTable {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
