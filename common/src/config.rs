use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config.properties";
pub const DEFAULT_API_BASE: &str = "http://www.acinfinityserver.com";
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(15);

const START_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const START_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid line {line} in config: {content:?}")]
    MalformedLine { line: usize, content: String },
    #[error("missing required config key: {0}")]
    MissingKey(&'static str),
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
    #[error("failed to parse start_date: {0:?}")]
    InvalidStartDate(String),
    #[error("invalid update_interval {0:?}, expected a positive number of seconds")]
    InvalidInterval(String),
}

/// Settings read once from `config.properties` and shared read-only with the
/// poll loop for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub timezone: Tz,
    pub token: String,
    pub start_date: DateTime<Tz>,
    pub update_interval: Duration,
    pub output_dir: PathBuf,
    pub api_base: String,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    /// Parses `key=value` lines. The start date is resolved after every line
    /// has been read, so `tz` may appear before or after `start_date`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut timezone = None;
        let mut token = None;
        let mut start_date = None;
        let mut update_interval = None;
        let mut output_dir = None;
        let mut api_base = None;

        for (index, line) in raw.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::MalformedLine {
                    line: index + 1,
                    content: line.to_string(),
                });
            };
            let value = value.trim();

            match key.trim() {
                "tz" => timezone = Some(value),
                "token" => token = Some(value),
                "start_date" => start_date = Some(value),
                "update_interval" => update_interval = Some(value),
                "output_dir" => output_dir = Some(value),
                "api_base" => api_base = Some(value),
                other => warn!("unknown config key: {other}"),
            }
        }

        let timezone = match timezone {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| ConfigError::UnknownTimezone(name.to_string()))?,
            None => Tz::UTC,
        };

        let token = token
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingKey("token"))?
            .to_string();

        let start_date = start_date.ok_or(ConfigError::MissingKey("start_date"))?;
        let start_date = parse_start_date(start_date, timezone)?;

        let update_interval = match update_interval {
            Some(raw) => parse_interval(raw)?,
            None => DEFAULT_UPDATE_INTERVAL,
        };

        Ok(Self {
            timezone,
            token,
            start_date,
            update_interval,
            output_dir: output_dir
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            api_base: api_base
                .filter(|value| !value.is_empty())
                .unwrap_or(DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
        })
    }

    /// Token suitable for log lines: only the last four characters survive,
    /// and only when the token is longer than that.
    pub fn masked_token(&self) -> String {
        let count = self.token.chars().count();
        if count <= 4 {
            return "****".to_string();
        }

        let visible: String = self.token.chars().skip(count - 4).collect();
        format!("****{visible}")
    }
}

fn parse_start_date(raw: &str, timezone: Tz) -> Result<DateTime<Tz>, ConfigError> {
    let naive = NaiveDateTime::parse_from_str(raw, START_DATE_TIME_FORMAT)
        .or_else(|_| {
            NaiveDate::parse_from_str(raw, START_DATE_FORMAT)
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map_err(|_| ConfigError::InvalidStartDate(raw.to_string()))?;

    match naive.and_local_timezone(timezone) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(ConfigError::InvalidStartDate(raw.to_string())),
    }
}

fn parse_interval(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
        _ => Err(ConfigError::InvalidInterval(raw.to_string())),
    }
}
