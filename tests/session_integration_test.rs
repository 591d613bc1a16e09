use bikeshare_explorer::core::explorer::RunSummary;
use bikeshare_explorer::{CliConfig, Explorer, ExplorerError, LocalDatasets, StdConsole, TomlConfig};
use tempfile::TempDir;

const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
0,2017-01-02 08:15:00,2017-01-02 08:25:00,600,Canal St,Clark St,Subscriber,Male,1985.0
1,2017-01-06 17:05:00,2017-01-06 17:20:00,900,Clark St,Canal St,Customer,,
2,2017-03-03 17:45:10,2017-03-03 17:55:10,600,Canal St,Clark St,Subscriber,Female,1990.0
3,2017-03-03 08:00:00,2017-03-03 08:30:00,1800,State St,Lake St,Subscriber,Male,1985.0
4,2017-03-06 17:30:00,2017-03-06 17:40:00,600,Canal St,Clark St,Customer,Female,1972.0
5,2017-06-09 12:00:00,2017-06-09 12:05:00,300,Lake St,State St,Subscriber,Male,1999.0
";

const WASHINGTON_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
0,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
1,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
2,2017-05-30 01:02:59,2017-05-30 01:13:37,637.251,17th St & Massachusetts Ave NW,5th & K St NW,Customer
";

fn setup_data_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("chicago.csv"), CHICAGO_CSV).unwrap();
    std::fs::write(temp_dir.path().join("washington.csv"), WASHINGTON_CSV).unwrap();
    temp_dir
}

fn cli_config(data_dir: &str, report_path: Option<String>) -> CliConfig {
    CliConfig {
        data_dir: data_dir.to_string(),
        config: None,
        pause_seconds: 0,
        page_size: 5,
        report_path,
        verbose: false,
        monitor: false,
    }
}

fn run_script(data_dir: &str, report_path: Option<String>, script: &str) -> (RunSummary, String) {
    let config = cli_config(data_dir, report_path);
    let mut explorer = Explorer::new(LocalDatasets::from_config(&config), config);
    let mut console = StdConsole::new(script.as_bytes(), Vec::new());

    let summary = explorer.run(&mut console).unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();
    (summary, output)
}

/// 測試完整工作階段：三月、所有星期
#[test]
fn test_march_session_reports_day_but_not_month() {
    let temp_dir = setup_data_dir();
    let data_dir = temp_dir.path().to_str().unwrap();

    let (summary, output) = run_script(data_dir, None, "chicago\nmarch\nall\nn\nn\n");

    assert_eq!(summary, RunSummary { sessions: 1, quit: false });
    assert!(output.contains("You have selected Chicago!"));
    assert!(output.contains("You have selected March!"));
    assert!(output.contains("Most popular day:   Friday"));
    assert!(!output.contains("Most popular month"));
    assert!(output.contains("Most popular hour:  17"));
    assert!(output.contains("Most popular start station: Canal St (Count: 2)"));
    assert!(output.contains("Total travel time: 3000.0 seconds"));
    assert!(output.contains("Subscribers: 2"));
    assert!(output.contains("Male:   1"));
    assert!(output.contains("There are 3 rows of data within the selection"));
    assert!(output.contains("Thank you for using Bikeshare data explorer :D"));
}

/// 測試 Washington 沒有性別與出生年份統計，並逐頁瀏覽
#[test]
fn test_washington_session_with_row_viewer() {
    let temp_dir = setup_data_dir();
    let data_dir = temp_dir.path().to_str().unwrap();

    let (summary, output) = run_script(data_dir, None, "w\nall\nall\ny\nn\n");

    assert_eq!(summary.sessions, 1);
    assert!(output.contains("Most popular month: March"));
    assert!(output.contains("Customers:   1"));
    assert!(!output.contains("Male:"));
    assert!(!output.contains("year of birth"));
    assert!(output.contains("14th & Belmont St NW"));
    assert!(output.contains("Yuma St & Tenley Circle NW"));
    // 三列只需要一個區塊，不會再詢問是否繼續
    assert!(!output.contains("Do you wish to continue?"));
}

/// 測試重新開始後在月份提示輸入 q
#[test]
fn test_restart_and_quit() {
    let temp_dir = setup_data_dir();
    let data_dir = temp_dir.path().to_str().unwrap();

    let (summary, output) =
        run_script(data_dir, None, "c\nall\nfri\nn\ny\nnyc\nq\n\n");

    assert_eq!(summary, RunSummary { sessions: 1, quit: true });
    assert!(output.contains("Fridays"));
    assert!(output.contains("Most popular month: March"));
    assert_eq!(output.matches("Hello! Let's explore some US bikeshare data!").count(), 2);
    assert!(output.contains("<Press Enter to exit>"));
}

/// 測試非 UTF-8 的輸入只會重新詢問，不會中斷工作階段
#[test]
fn test_invalid_utf8_input_reprompts() {
    let temp_dir = setup_data_dir();
    let config = cli_config(temp_dir.path().to_str().unwrap(), None);
    let mut explorer = Explorer::new(LocalDatasets::from_config(&config), config);
    let mut console = StdConsole::new(&b"\xff\xfe\nw\nall\nall\nn\nn\n"[..], Vec::new());

    let summary = explorer.run(&mut console).unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();

    assert_eq!(summary, RunSummary { sessions: 1, quit: false });
    assert_eq!(output.matches("Please enter city").count(), 2);
    assert!(output.contains("You have selected Washington!"));
}

/// 測試找不到資料集時回傳型別化的錯誤
#[test]
fn test_missing_city_file() {
    let temp_dir = setup_data_dir();
    let config = cli_config(temp_dir.path().to_str().unwrap(), None);
    let mut explorer = Explorer::new(LocalDatasets::from_config(&config), config);
    let mut console = StdConsole::new("nyc\nall\nall\n".as_bytes(), Vec::new());

    match explorer.run(&mut console) {
        Err(ExplorerError::DatasetNotFound { city, path }) => {
            assert_eq!(city, "New York City");
            assert!(path.ends_with("new_york_city.csv"));
        }
        other => panic!("expected DatasetNotFound, got {:?}", other),
    }
}

/// 測試 JSON 工作階段報告
#[test]
fn test_session_report_is_written() {
    let temp_dir = setup_data_dir();
    let data_dir = temp_dir.path().to_str().unwrap();
    let report_path = temp_dir.path().join("reports").join("session.json");

    run_script(
        data_dir,
        Some(report_path.to_str().unwrap().to_string()),
        "c\njan\nall\nn\nn\n",
    );

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["filters"]["city"], "chicago");
    assert_eq!(report["filters"]["month"]["only"], "january");
    assert_eq!(report["filters"]["day"], "all");
    assert_eq!(report["rows"], 2);
    assert_eq!(report["durations"]["total_seconds"], 1500.0);
    assert!(report["time"]["popular_month"].is_null());
    assert_eq!(report["users"]["demographics"]["male"], 1);
}

/// 測試 TOML 設定覆寫資料集檔名
#[test]
fn test_toml_config_file_overrides() {
    let temp_dir = setup_data_dir();
    std::fs::rename(
        temp_dir.path().join("washington.csv"),
        temp_dir.path().join("dc_2017.csv"),
    )
    .unwrap();

    let toml_content = format!(
        r#"
[datasets]
dir = "{}"

[datasets.files]
washington = "dc_2017.csv"

[session]
pause_seconds = 0
page_size = 2
"#,
        temp_dir.path().to_str().unwrap().replace('\\', "/")
    );
    let config = TomlConfig::from_toml_str(&toml_content).unwrap();

    let mut explorer = Explorer::new(LocalDatasets::from_config(&config), config);
    let mut console = StdConsole::new("w\nall\nall\ny\ny\nn\n".as_bytes(), Vec::new());
    let summary = explorer.run(&mut console).unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();

    assert_eq!(summary.sessions, 1);
    assert!(output.contains("Would you like to view 2 rows of individual trip data?"));
    assert_eq!(output.matches("Do you wish to continue?").count(), 1);
    assert!(output.contains("17th St & Massachusetts Ave NW"));
}
