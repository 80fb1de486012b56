//! Appointment search against one exam centre.

use chrono::NaiveDate;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

use crate::booking::types::{AuthToken, SearchCriteria, Slot, DATE_FORMAT};
use crate::error::AppError;
use crate::services::portal::{PortalRequest, PortalTransport};

pub const APPOINTMENTS_PATH: &str = "/deas-api/v1/web/getAvailableAppointments";

const BOOKING_REFERER: &str = "https://onlinebusiness.icbc.com/webdeas-ui/booking";

/// One slot as the portal returns it.
#[derive(Debug, Deserialize)]
struct AppointmentRecord {
    #[serde(rename = "appointmentDt")]
    appointment_dt: AppointmentDt,
    #[serde(rename = "startTm")]
    start_tm: String,
}

#[derive(Debug, Deserialize)]
struct AppointmentDt {
    date: String,
    #[serde(rename = "dayOfWeek")]
    day_of_week: String,
}

pub struct AppointmentSearch {
    criteria: SearchCriteria,
}

impl AppointmentSearch {
    pub fn new(criteria: SearchCriteria) -> Self {
        Self { criteria }
    }

    fn to_slot(&self, record: AppointmentRecord) -> Result<Slot, AppError> {
        let date = NaiveDate::parse_from_str(&record.appointment_dt.date, DATE_FORMAT)
            .map_err(|_| {
                AppError::decode(format!(
                    "appointment date '{}' is not a YYYY-MM-DD date",
                    record.appointment_dt.date
                ))
            })?;

        Ok(Slot {
            location_id: self.criteria.location_id,
            date,
            day_of_week: record.appointment_dt.day_of_week,
            start_time: record.start_tm,
        })
    }
}

impl PortalRequest for AppointmentSearch {
    type Output = Option<Slot>;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> &'static str {
        APPOINTMENTS_PATH
    }

    fn referer(&self) -> &'static str {
        BOOKING_REFERER
    }

    fn body(&self) -> Result<Value, AppError> {
        serde_json::to_value(&self.criteria)
            .map_err(|err| AppError::decode(format!("failed to encode search body: {}", err)))
    }

    fn decode(&self, body: Value, _headers: &HeaderMap) -> Result<Self::Output, AppError> {
        let records: Vec<AppointmentRecord> = serde_json::from_value(body).map_err(|err| {
            AppError::decode(format!("appointment response had an unexpected shape: {}", err))
        })?;

        if records.is_empty() {
            return Ok(None);
        }

        // The portal is believed to return slots earliest-first, but its
        // ordering is undocumented; scan the whole sequence instead of
        // trusting element 0. Every element must still decode.
        let mut earliest: Option<Slot> = None;
        for record in records {
            let slot = self.to_slot(record)?;
            match &earliest {
                Some(current) if current.date <= slot.date => {}
                _ => earliest = Some(slot),
            }
        }

        Ok(earliest)
    }
}

/// Search one location for its best available slot.
///
/// `Ok(None)` means the portal had nothing matching the criteria; that is
/// an outcome, not an error.
pub async fn query(
    transport: &PortalTransport,
    criteria: &SearchCriteria,
    token: &AuthToken,
) -> Result<Option<Slot>, AppError> {
    let request = AppointmentSearch::new(criteria.clone());
    transport
        .execute(&request, &[("Authorization", token.as_str())])
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::types::{ALL_DAYS_OF_WEEK, ALL_PARTS_OF_DAY};
    use serde_json::json;

    fn search() -> AppointmentSearch {
        AppointmentSearch::new(SearchCriteria {
            location_id: 73,
            exam_type: "5-R-1".to_string(),
            exam_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            ignore_reserve_time: false,
            days_of_week: ALL_DAYS_OF_WEEK.to_string(),
            parts_of_day: ALL_PARTS_OF_DAY.to_string(),
            last_name: "Driver".to_string(),
            licence_number: "01234567".to_string(),
        })
    }

    fn record(date: &str, day: &str, start: &str) -> Value {
        json!({
            "appointmentDt": { "date": date, "dayOfWeek": day },
            "startTm": start,
        })
    }

    #[test]
    fn empty_sequence_decodes_to_none() {
        let result = search().decode(json!([]), &HeaderMap::new()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn single_record_decodes_to_a_slot() {
        let body = json!([record("2024-02-15", "Thursday", "09:00")]);

        let slot = search().decode(body, &HeaderMap::new()).unwrap().unwrap();

        assert_eq!(slot.location_id, 73);
        assert_eq!(slot.date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert_eq!(slot.day_of_week, "Thursday");
        assert_eq!(slot.start_time, "09:00");
    }

    #[test]
    fn earliest_slot_wins_regardless_of_ordering() {
        let body = json!([
            record("2024-03-10", "Sunday", "10:30"),
            record("2024-02-18", "Sunday", "13:15"),
            record("2024-04-01", "Monday", "08:45"),
        ]);

        let slot = search().decode(body, &HeaderMap::new()).unwrap().unwrap();

        assert_eq!(slot.date, NaiveDate::from_ymd_opt(2024, 2, 18).unwrap());
        assert_eq!(slot.start_time, "13:15");
    }

    #[test]
    fn date_ties_keep_the_portal_order() {
        let body = json!([
            record("2024-02-18", "Sunday", "08:00"),
            record("2024-02-18", "Sunday", "13:15"),
        ]);

        let slot = search().decode(body, &HeaderMap::new()).unwrap().unwrap();
        assert_eq!(slot.start_time, "08:00");
    }

    #[test]
    fn a_non_array_body_is_a_decode_error() {
        let err = search()
            .decode(json!({"error": "session expired"}), &HeaderMap::new())
            .unwrap_err();

        assert!(matches!(err, AppError::Decode { .. }));
    }

    #[test]
    fn a_malformed_record_is_a_decode_error_even_past_element_zero() {
        let body = json!([
            record("2024-02-18", "Sunday", "13:15"),
            { "startTm": "09:00" },
        ]);

        let err = search().decode(body, &HeaderMap::new()).unwrap_err();
        assert!(matches!(err, AppError::Decode { .. }));
    }

    #[test]
    fn a_malformed_slot_date_is_a_decode_error() {
        let body = json!([record("18/02/2024", "Sunday", "13:15")]);

        let err = search().decode(body, &HeaderMap::new()).unwrap_err();
        assert!(matches!(err, AppError::Decode { .. }));
    }
}
