use clap::Parser;

/// Road-test slot watcher CLI arguments.
///
/// Every field is optional here; `Config::resolve` merges flags with the
/// environment and rejects incomplete configurations in one place.
#[derive(Debug, Parser, Default)]
#[command(
    name = "roadtest-watcher",
    version,
    about = "Watches a licensing portal for road test slots and sends an alert when one matches"
)]
pub struct Cli {
    /// Driver last name, as registered with the portal
    #[arg(long)]
    pub last_name: Option<String>,

    /// Licence number (yellow paper)
    #[arg(long)]
    pub licence_number: Option<String>,

    /// Shared keyword used as a second authentication factor
    #[arg(long)]
    pub keyword: Option<String>,

    /// Exam centre location id; repeat the flag to watch several centres
    #[arg(long = "location-id")]
    pub location_ids: Vec<i64>,

    /// Exam type code (default 5-R-1)
    #[arg(long)]
    pub exam_type: Option<String>,

    /// Earliest acceptable date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Latest acceptable date, YYYY-MM-DD (default: any future date)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Preferred days of week mask, e.g. "[0,1,2,3,4,5,6]"
    #[arg(long)]
    pub days_of_week: Option<String>,

    /// Preferred parts of day mask, e.g. "[0,1]"
    #[arg(long)]
    pub parts_of_day: Option<String>,

    /// Booking portal base URL (override for testing)
    #[arg(long)]
    pub portal_url: Option<String>,

    /// Pushover application token
    #[arg(long)]
    pub pushover_token: Option<String>,

    /// Pushover user key
    #[arg(long)]
    pub pushover_user: Option<String>,
}
