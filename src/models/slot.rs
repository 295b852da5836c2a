use serde::{Deserialize, Serialize};

/// One of the five fixed 2-hour appointment windows between 10:00 and 20:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotWindow {
    TenToNoon,
    NoonToTwo,
    TwoToFour,
    FourToSix,
    SixToEight,
}

impl SlotWindow {
    pub const ALL: [SlotWindow; 5] = [
        SlotWindow::TenToNoon,
        SlotWindow::NoonToTwo,
        SlotWindow::TwoToFour,
        SlotWindow::FourToSix,
        SlotWindow::SixToEight,
    ];

    /// The label shown to the user and sent as `time_slot` on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            SlotWindow::TenToNoon => "10:00 AM - 12:00 PM",
            SlotWindow::NoonToTwo => "12:00 PM - 02:00 PM",
            SlotWindow::TwoToFour => "02:00 PM - 04:00 PM",
            SlotWindow::FourToSix => "04:00 PM - 06:00 PM",
            SlotWindow::SixToEight => "06:00 PM - 08:00 PM",
        }
    }

    /// Window start in minutes since midnight.
    pub fn start_minutes(&self) -> i64 {
        match self {
            SlotWindow::TenToNoon => 10 * 60,
            SlotWindow::NoonToTwo => 12 * 60,
            SlotWindow::TwoToFour => 14 * 60,
            SlotWindow::FourToSix => 16 * 60,
            SlotWindow::SixToEight => 18 * 60,
        }
    }

    /// Window end in minutes since midnight. Every window is 2 hours long.
    pub fn end_minutes(&self) -> i64 {
        self.start_minutes() + 120
    }

    fn start_label(&self) -> &'static str {
        match self {
            SlotWindow::TenToNoon => "10:00 AM",
            SlotWindow::NoonToTwo => "12:00 PM",
            SlotWindow::TwoToFour => "02:00 PM",
            SlotWindow::FourToSix => "04:00 PM",
            SlotWindow::SixToEight => "06:00 PM",
        }
    }

    /// The 24-hour `HH:MM:SS` start time sent as `appointment_time` on the wire.
    ///
    /// Only the PM boundary needs special-casing: an hour below 12 with a PM
    /// marker moves forward by 12, while "12:00 PM" is already correct.
    pub fn start_time_24h(&self) -> String {
        let start = self.start_label();
        let (time, meridiem) = start.split_once(' ').unwrap_or((start, ""));
        let (h, m) = time.split_once(':').unwrap_or((time, "00"));
        let hour: u32 = h.parse().unwrap_or(0);
        let hour = if hour < 12 && meridiem == "PM" {
            hour + 12
        } else {
            hour
        };
        format!("{hour:02}:{m}:00")
    }
}
