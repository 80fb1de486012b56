//! Alert formatting and delivery.
//!
//! The orchestrator renders one fixed message per qualifying slot and hands
//! it to whatever sink is configured. Delivery failure is logged by the
//! caller and never retried within a run; the next scheduled invocation is
//! the retry mechanism.

pub mod pushover;

pub use pushover::PushoverSink;

use async_trait::async_trait;

use crate::booking::types::Slot;
use crate::error::AppError;

/// A channel that can deliver one human-readable alert message.
#[async_trait]
pub trait AlertSink {
    async fn deliver(&self, message: &str) -> Result<(), AppError>;

    /// Name of this sink for logging.
    fn sink_name(&self) -> &str;
}

/// Render the fixed found-a-slot template.
pub fn slot_message(slot: &Slot) -> String {
    format!(
        "Found appointment:\n\tlocation: {}, date: {} on {}, time: {}",
        slot.location_id, slot.date, slot.day_of_week, slot.start_time
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn slot_message_renders_the_fixed_template() {
        let slot = Slot {
            location_id: 73,
            date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            day_of_week: "Thursday".to_string(),
            start_time: "09:00".to_string(),
        };

        assert_eq!(
            slot_message(&slot),
            "Found appointment:\n\tlocation: 73, date: 2024-02-15 on Thursday, time: 09:00"
        );
    }
}
