use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::models::SlotWindow;

/// Appointments can be booked up to this many days ahead, inclusive.
pub const BOOKING_WINDOW_DAYS: i64 = 10;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AvailabilityError {
    #[error("Date must be between {min} and {max}")]
    OutsideWindow { min: String, max: String },
}

/// Inclusive `[today, today + 10 days]` window, recomputed from the caller's
/// clock every time so it never goes stale across midnight.
pub fn booking_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today, today + Duration::days(BOOKING_WINDOW_DAYS))
}

pub fn validate_date(date: NaiveDate, today: NaiveDate) -> Result<(), AvailabilityError> {
    let (min, max) = booking_window(today);
    if date < min || date > max {
        return Err(AvailabilityError::OutsideWindow {
            min: min.format("%b %-d").to_string(),
            max: max.format("%b %-d").to_string(),
        });
    }
    Ok(())
}

/// Whether a slot can still be picked for the given date.
///
/// Only the current calendar date restricts anything: a slot closes once it
/// has fully elapsed, or once more than half of its window has already passed
/// (too little useful time left to honor the booking). Future dates never
/// close a slot.
pub fn slot_is_open(slot: SlotWindow, date: NaiveDate, now: NaiveDateTime) -> bool {
    if date != now.date() {
        return true;
    }

    let current = (now.hour() * 60 + now.minute()) as i64;
    let start = slot.start_minutes();
    let end = slot.end_minutes();

    if current >= end {
        return false;
    }
    // Strictly more than half elapsed; exactly half keeps the slot open.
    if current >= start && (current - start) * 2 > end - start {
        return false;
    }
    true
}

/// Per-slot open/closed listing for rendering a slot picker.
pub fn slot_listing(date: NaiveDate, now: NaiveDateTime) -> Vec<(SlotWindow, bool)> {
    SlotWindow::ALL
        .iter()
        .map(|slot| (*slot, slot_is_open(*slot, date, now)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_window_boundaries_inclusive() {
        let today = d("2026-01-05");
        assert!(validate_date(d("2026-01-05"), today).is_ok());
        assert!(validate_date(d("2026-01-15"), today).is_ok());
        assert!(validate_date(d("2026-01-04"), today).is_err());
        assert!(validate_date(d("2026-01-16"), today).is_err());
    }

    #[test]
    fn test_window_error_names_both_display_dates() {
        let err = validate_date(d("2026-02-01"), d("2026-01-05")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Jan 5"), "missing min date: {msg}");
        assert!(msg.contains("Jan 15"), "missing max date: {msg}");
    }

    #[test]
    fn test_slot_closes_past_half_window() {
        // 19:30 into the 18:00-20:00 window: 90 of 120 minutes elapsed.
        assert!(!slot_is_open(
            SlotWindow::SixToEight,
            d("2026-01-05"),
            dt("2026-01-05 19:30")
        ));
        // 18:10: only 10 minutes elapsed, still open.
        assert!(slot_is_open(
            SlotWindow::SixToEight,
            d("2026-01-05"),
            dt("2026-01-05 18:10")
        ));
    }

    #[test]
    fn test_slot_open_at_exactly_half_window() {
        // 19:00 is exactly half of 18:00-20:00; the rule is strictly-greater.
        assert!(slot_is_open(
            SlotWindow::SixToEight,
            d("2026-01-05"),
            dt("2026-01-05 19:00")
        ));
    }

    #[test]
    fn test_slot_closes_once_fully_elapsed() {
        assert!(!slot_is_open(
            SlotWindow::TenToNoon,
            d("2026-01-05"),
            dt("2026-01-05 12:00")
        ));
        assert!(!slot_is_open(
            SlotWindow::TenToNoon,
            d("2026-01-05"),
            dt("2026-01-05 15:45")
        ));
    }

    #[test]
    fn test_future_dates_never_close_slots() {
        let late = dt("2026-01-05 23:59");
        for slot in SlotWindow::ALL {
            assert!(slot_is_open(slot, d("2026-01-06"), late));
        }
    }

    #[test]
    fn test_slot_before_window_start_is_open() {
        // 09:00 on the same day: no window has started yet.
        let morning = dt("2026-01-05 09:00");
        for (_, open) in slot_listing(d("2026-01-05"), morning) {
            assert!(open);
        }
    }

    #[test]
    fn test_listing_marks_only_elapsed_slots() {
        // At 13:10 today: 10-12 elapsed, 12-14 more than half gone, rest open.
        let listing = slot_listing(d("2026-01-05"), dt("2026-01-05 13:10"));
        let open: Vec<bool> = listing.iter().map(|(_, o)| *o).collect();
        assert_eq!(open, vec![false, false, true, true, true]);
    }
}
