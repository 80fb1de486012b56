//! Run configuration.
//!
//! All caller-supplied state is resolved here, once, into an immutable
//! `Config` that gets passed into the orchestrator. CLI flags win over
//! environment variables; identity fields and the location list are
//! mandatory, everything else has a portal-appropriate default.

use std::env;

use chrono::{Local, NaiveDate};

use crate::booking::types::{SearchCriteria, ALL_DAYS_OF_WEEK, ALL_PARTS_OF_DAY, DATE_FORMAT};
use crate::booking::window::DateWindow;
use crate::booking::Credentials;
use crate::cli::Cli;
use crate::error::AppError;

/// Production portal base URL.
pub const DEFAULT_PORTAL_URL: &str = "https://onlinebusiness.icbc.com";

/// Default exam type code for a class 5 road test.
pub const DEFAULT_EXAM_TYPE: &str = "5-R-1";

#[derive(Debug, Clone)]
pub struct Config {
    pub portal_url: String,
    pub last_name: String,
    pub licence_number: String,
    pub keyword: Option<String>,
    pub locations: Vec<i64>,
    pub exam_type: String,
    pub earliest_date: NaiveDate,
    pub latest_date: Option<NaiveDate>,
    pub days_of_week: String,
    pub parts_of_day: String,
    pub pushover: Option<PushoverConfig>,
}

/// Credentials for the Pushover alert channel. Only present when both
/// halves are configured; a run without them just logs found slots.
#[derive(Debug, Clone)]
pub struct PushoverConfig {
    pub token: String,
    pub user: String,
}

impl Config {
    /// Merge CLI flags with environment fallbacks and validate the result.
    pub fn resolve(cli: Cli) -> Result<Self, AppError> {
        let last_name = cli
            .last_name
            .or_else(|| env_var("ROADTEST_LAST_NAME"))
            .ok_or_else(|| AppError::config("--last-name (or ROADTEST_LAST_NAME) is required"))?;

        let licence_number = cli
            .licence_number
            .or_else(|| env_var("ROADTEST_LICENCE_NUMBER"))
            .ok_or_else(|| {
                AppError::config("--licence-number (or ROADTEST_LICENCE_NUMBER) is required")
            })?;

        let keyword = cli.keyword.or_else(|| env_var("ROADTEST_KEYWORD"));

        if cli.location_ids.is_empty() {
            return Err(AppError::config("at least one --location-id is required"));
        }

        let earliest_date = match cli.start_date.as_deref() {
            Some(raw) => parse_date(raw, "--start-date")?,
            None => Local::now().date_naive(),
        };

        let latest_date = cli
            .end_date
            .as_deref()
            .map(|raw| parse_date(raw, "--end-date"))
            .transpose()?;

        let pushover_token = cli.pushover_token.or_else(|| env_var("PUSHOVER_TOKEN"));
        let pushover_user = cli.pushover_user.or_else(|| env_var("PUSHOVER_USER"));
        let pushover = match (pushover_token, pushover_user) {
            (Some(token), Some(user)) => Some(PushoverConfig { token, user }),
            _ => None,
        };

        Ok(Self {
            portal_url: cli
                .portal_url
                .or_else(|| env_var("PORTAL_URL"))
                .unwrap_or_else(|| DEFAULT_PORTAL_URL.to_string()),
            last_name,
            licence_number,
            keyword,
            locations: cli.location_ids,
            exam_type: cli
                .exam_type
                .unwrap_or_else(|| DEFAULT_EXAM_TYPE.to_string()),
            earliest_date,
            latest_date,
            days_of_week: cli
                .days_of_week
                .unwrap_or_else(|| ALL_DAYS_OF_WEEK.to_string()),
            parts_of_day: cli
                .parts_of_day
                .unwrap_or_else(|| ALL_PARTS_OF_DAY.to_string()),
            pushover,
        })
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            last_name: self.last_name.clone(),
            licence_number: self.licence_number.clone(),
            keyword: self.keyword.clone(),
        }
    }

    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.earliest_date, self.latest_date)
    }

    /// Build the search criteria for one exam centre. Only the location id
    /// varies between locations within a run.
    pub fn criteria_for(&self, location_id: i64) -> SearchCriteria {
        SearchCriteria {
            location_id,
            exam_type: self.exam_type.clone(),
            exam_date: self.earliest_date,
            ignore_reserve_time: false,
            days_of_week: self.days_of_week.clone(),
            parts_of_day: self.parts_of_day.clone(),
            last_name: self.last_name.clone(),
            licence_number: self.licence_number.clone(),
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn parse_date(raw: &str, flag: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| AppError::config(format!("{} must be a YYYY-MM-DD date, got '{}'", flag, raw)))
}
