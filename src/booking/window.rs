//! Date-window evaluation of a found slot.

use chrono::NaiveDate;

use crate::booking::types::Slot;

/// The caller's acceptable date range for a qualifying slot.
///
/// The portal itself filters on the start date (it is part of the search
/// criteria), so only the end bound is evaluated locally. An absent end
/// means any future date is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    earliest: NaiveDate,
    latest: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(earliest: NaiveDate, latest: Option<NaiveDate>) -> Self {
        Self { earliest, latest }
    }

    pub fn earliest(&self) -> NaiveDate {
        self.earliest
    }

    pub fn latest(&self) -> Option<NaiveDate> {
        self.latest
    }

    /// True when the date is not strictly after the window end.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.latest {
            Some(end) => date <= end,
            None => true,
        }
    }

    pub fn satisfies(&self, slot: &Slot) -> bool {
        self.contains(slot.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window_ending(end: Option<NaiveDate>) -> DateWindow {
        DateWindow::new(date(2024, 1, 1), end)
    }

    #[test]
    fn slot_before_the_end_satisfies() {
        let window = window_ending(Some(date(2024, 3, 1)));
        assert!(window.contains(date(2024, 2, 15)));
    }

    #[test]
    fn slot_after_the_end_does_not_satisfy() {
        let window = window_ending(Some(date(2024, 3, 1)));
        assert!(!window.contains(date(2024, 3, 15)));
    }

    #[test]
    fn the_end_date_itself_satisfies() {
        let window = window_ending(Some(date(2024, 3, 1)));
        assert!(window.contains(date(2024, 3, 1)));
    }

    #[test]
    fn an_open_window_accepts_any_date() {
        let window = window_ending(None);
        assert!(window.contains(date(2031, 12, 31)));
    }

    proptest! {
        // If a slot at date D satisfies a window, every earlier slot does too.
        #[test]
        fn contains_is_monotonic(end in 0i64..720, a in 0i64..720, b in 0i64..720) {
            let base = date(2024, 1, 1);
            let window = DateWindow::new(base, Some(base + Duration::days(end)));
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

            if window.contains(base + Duration::days(hi)) {
                prop_assert!(window.contains(base + Duration::days(lo)));
            }
        }

        #[test]
        fn open_windows_accept_everything(days in 0i64..3650) {
            let base = date(2024, 1, 1);
            let window = DateWindow::new(base, None);
            prop_assert!(window.contains(base + Duration::days(days)));
        }
    }
}
