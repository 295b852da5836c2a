use chrono::NaiveDateTime;

/// Source of "now" for the date-window and slot-availability rules. Injected
/// so tests can pin the wall clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
