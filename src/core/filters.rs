use crate::domain::model::{parse_weekday, weekday_title, City, Month, Selection, SessionFilters};
use crate::domain::ports::Console;
use crate::utils::error::Result;

pub const FAREWELL: &str = "Thank you for using Bikeshare data explorer :D";
pub const RULE: &str = "----------------------------------------";

const CITY_PROMPT: &str =
    "Please enter city - Chicago (c), New York City (nyc) or Washington (w), exit (q): ";
const MONTH_PROMPT: &str = "Please enter month from January to June (e.g. jan, feb, ...) or enter \"all\" for all months, exit (q): ";
const DAY_PROMPT: &str =
    "Please enter day (e.g. mon, tue, ...) or enter \"all\" for all days, exit (q): ";

/// 使用者可隨時輸入 `q` 結束，這不是錯誤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow<T> {
    Continue(T),
    Quit,
}

/// 重複詢問直到 `parse` 接受輸入；`q` 或輸入結束時回傳 `Quit`
fn ask_until_valid<T>(
    console: &mut dyn Console,
    prompt: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Flow<T>> {
    loop {
        let Some(answer) = console.ask(prompt)? else {
            return Ok(Flow::Quit);
        };

        if answer.trim().eq_ignore_ascii_case("q") {
            return Ok(Flow::Quit);
        }

        match parse(&answer) {
            Some(value) => return Ok(Flow::Continue(value)),
            None => tracing::debug!("Rejected input {:?} for prompt {:?}", answer, prompt.trim()),
        }
    }
}

fn say_goodbye(console: &mut dyn Console) -> Result<Flow<SessionFilters>> {
    console.say(FAREWELL)?;
    console.ask("<Press Enter to exit>")?;
    Ok(Flow::Quit)
}

/// 詢問城市、月份與星期，回傳正規化後的篩選條件
pub fn collect_filters(console: &mut dyn Console) -> Result<Flow<SessionFilters>> {
    console.say("Hello! Let's explore some US bikeshare data!")?;
    console.say(
        "We will begin by selecting the city, month and/or day of the week of interest",
    )?;
    console.say("Currently, only Chicago, New York City, and Washington are available.")?;

    let city = match ask_until_valid(console, CITY_PROMPT, City::parse)? {
        Flow::Continue(city) => city,
        Flow::Quit => return say_goodbye(console),
    };
    console.say(&format!("You have selected {}!\n", city.title()))?;

    let month = match ask_until_valid(console, MONTH_PROMPT, |input| {
        Selection::parse_with(input, Month::parse)
    })? {
        Flow::Continue(month) => month,
        Flow::Quit => return say_goodbye(console),
    };
    match month {
        Selection::All => console.say("You have selected all months!\n")?,
        Selection::Only(month) => console.say(&format!("You have selected {}!\n", month.title()))?,
    }

    let day = match ask_until_valid(console, DAY_PROMPT, |input| {
        Selection::parse_with(input, parse_weekday)
    })? {
        Flow::Continue(day) => day,
        Flow::Quit => return say_goodbye(console),
    };
    match day {
        Selection::All => console.say("You have selected all days!\n")?,
        Selection::Only(day) => {
            console.say(&format!("You have selected {}!\n", weekday_title(day)))?
        }
    }

    let filters = SessionFilters::new(city, month, day);
    describe_scope(console, &filters)?;
    tracing::info!(
        "🔎 Filters selected: city={}, month={:?}, day={:?}",
        filters.city,
        filters.month,
        filters.day
    );

    Ok(Flow::Continue(filters))
}

fn describe_scope(console: &mut dyn Console, filters: &SessionFilters) -> Result<()> {
    console.say("Let's look into the data for:")?;
    console.say(filters.city.title())?;
    match filters.month {
        Selection::All => console.say("All months")?,
        Selection::Only(month) => console.say(month.title())?,
    }
    match filters.day {
        Selection::All => console.say("All days")?,
        Selection::Only(day) => console.say(&format!("{}s", weekday_title(day)))?,
    }
    console.say(RULE)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Weekday;
    use std::collections::VecDeque;

    /// 依序回放預先準備的輸入，並記錄所有輸出
    #[derive(Default)]
    pub(crate) struct ScriptedConsole {
        pub answers: VecDeque<String>,
        pub prompts: Vec<String>,
        pub lines: Vec<String>,
    }

    impl ScriptedConsole {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl Console for ScriptedConsole {
        fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
            self.prompts.push(prompt.to_string());
            Ok(self.answers.pop_front())
        }

        fn say(&mut self, line: &str) -> Result<()> {
            self.lines.push(line.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_collects_normalized_filters() {
        let mut console = ScriptedConsole::new(&["NYC", "mar", "Friday"]);
        let flow = collect_filters(&mut console).unwrap();

        assert_eq!(
            flow,
            Flow::Continue(SessionFilters::new(
                City::NewYorkCity,
                Selection::Only(Month::March),
                Selection::Only(Weekday::Fri),
            ))
        );
        assert!(console.lines.contains(&"Fridays".to_string()));
        assert!(console.lines.contains(&"You have selected New York City!\n".to_string()));
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let mut console = ScriptedConsole::new(&["boston", "", "w", "july", "all", "funday", "all"]);
        let flow = collect_filters(&mut console).unwrap();

        assert_eq!(flow, Flow::Continue(SessionFilters::unfiltered(City::Washington)));
        assert_eq!(console.prompts.len(), 7);
        assert!(console.lines.contains(&"All months".to_string()));
        assert!(console.lines.contains(&"All days".to_string()));
    }

    #[test]
    fn test_quit_at_month_prompt() {
        let mut console = ScriptedConsole::new(&["c", "Q", ""]);
        let flow = collect_filters(&mut console).unwrap();

        assert_eq!(flow, Flow::Quit);
        assert!(console.lines.contains(&FAREWELL.to_string()));
        assert_eq!(console.prompts.last().unwrap(), "<Press Enter to exit>");
        assert!(console.answers.is_empty());
    }

    #[test]
    fn test_end_of_input_quits() {
        let mut console = ScriptedConsole::new(&["chicago", "all"]);
        assert_eq!(collect_filters(&mut console).unwrap(), Flow::Quit);
    }
}
