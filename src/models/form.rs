use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::slot::SlotWindow;

/// Every input of the booking form, used to key validation errors and
/// touched-state tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    AlternateContactNo,
    Age,
    Gender,
    AppointmentDate,
    TimeSlot,
    Concerns,
}

impl Field {
    /// Fields checked when leaving the personal-details step. The alternate
    /// number is included because, when filled in, it must validate too.
    pub const STEP_ONE: [Field; 7] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::AlternateContactNo,
        Field::Age,
        Field::Gender,
    ];

    pub const STEP_TWO: [Field; 2] = [Field::AppointmentDate, Field::TimeSlot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::AlternateContactNo => "alternate_contact_no",
            Field::Age => "age",
            Field::Gender => "gender",
            Field::AppointmentDate => "appointment_date",
            Field::TimeSlot => "time_slot",
            Field::Concerns => "concerns",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Other,
        Gender::PreferNotToSay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.as_str() == s)
    }
}

/// The booking form as the user fills it in. String fields hold already
/// sanitized input; `None` means not yet selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub alternate_contact_no: String,
    pub age: String,
    pub gender: Option<Gender>,
    pub appointment_date: Option<NaiveDate>,
    pub time_slot: Option<SlotWindow>,
    pub concerns: String,
}

/// Field-keyed validation messages. Absence of a key means the field is clean.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }
}
