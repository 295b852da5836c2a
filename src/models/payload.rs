use serde::{Deserialize, Serialize};

use super::form::BookingForm;

/// Wire payload for the appointment-creation endpoint. Optional fields
/// serialize as `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact_no: String,
    pub alternate_contact_no: Option<String>,
    pub age: String,
    pub gender: String,
    pub concerns: Option<String>,
    pub appointment_date: String,
    pub appointment_time: String,
    pub time_slot: String,
}

impl AppointmentRequest {
    /// Builds the payload from a fully validated form. Returns `None` when a
    /// selection-type field is missing, which step validation rules out.
    pub fn from_form(form: &BookingForm) -> Option<Self> {
        let date = form.appointment_date?;
        let slot = form.time_slot?;
        let gender = form.gender?;

        let optional = |value: &str| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        Some(Self {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            email: form.email.trim().to_string(),
            contact_no: form.phone.clone(),
            alternate_contact_no: optional(&form.alternate_contact_no),
            age: form.age.clone(),
            gender: gender.as_str().to_string(),
            concerns: optional(&form.concerns),
            appointment_date: date.format("%Y-%m-%d").to_string(),
            appointment_time: slot.start_time_24h(),
            time_slot: slot.label().to_string(),
        })
    }
}

/// Response shape of the appointment endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
}
