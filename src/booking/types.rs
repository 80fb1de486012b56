//! Wire-level and domain types for the booking pipeline.

use chrono::NaiveDate;
use serde::Serialize;

/// Calendar date format used by the portal on both endpoints.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Day-of-week mask accepting every day. The portal expects the mask as a
/// string, not a JSON array.
pub const ALL_DAYS_OF_WEEK: &str = "[0,1,2,3,4,5,6]";

/// Part-of-day mask accepting morning and afternoon.
pub const ALL_PARTS_OF_DAY: &str = "[0,1]";

/// Identity supplied once at startup; serializes to the login body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    #[serde(rename = "drvrLastName")]
    pub last_name: String,
    #[serde(rename = "licenceNumber")]
    pub licence_number: String,
    #[serde(rename = "keyword", skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Bearer token extracted from the login response header.
///
/// Constructing one guarantees it is non-empty, so the query layer never
/// has to re-check before attaching the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Login response body. The portal does not document its shape and nothing
/// in the pipeline reads from it; kept only for debug logging.
#[derive(Debug, Clone)]
pub struct SessionMeta {
    pub raw: serde_json::Value,
}

/// One appointment search, serialized verbatim as the portal wire body.
//
// The portal spells "licence" differently across its two endpoints:
// `licenceNumber` on login, `licenseNumber` here.
#[derive(Debug, Clone, Serialize)]
pub struct SearchCriteria {
    #[serde(rename = "aPosID")]
    pub location_id: i64,
    #[serde(rename = "examType")]
    pub exam_type: String,
    #[serde(rename = "examDate")]
    pub exam_date: NaiveDate,
    #[serde(rename = "ignoreReserveTime")]
    pub ignore_reserve_time: bool,
    #[serde(rename = "prfDaysOfWeek")]
    pub days_of_week: String,
    #[serde(rename = "prfPartsOfDay")]
    pub parts_of_day: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "licenseNumber")]
    pub licence_number: String,
}

/// A single available exam appointment at one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub location_id: i64,
    pub date: NaiveDate,
    pub day_of_week: String,
    pub start_time: String,
}
