use chrono::NaiveDateTime;
use regex::Regex;

use crate::models::{BookingForm, Field, ValidationErrors};
use crate::services::availability;

/// Keeps letters and whitespace only, applied to name fields as the user
/// types so disallowed characters never land in the form.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect()
}

pub fn sanitize_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Digits only, with anything above 100 clamped down to "100". Values below 1
/// are left alone for the pattern rule to reject.
pub fn sanitize_age(raw: &str) -> String {
    let digits = sanitize_digits(raw);
    match digits.parse::<u128>() {
        Ok(n) if n > 100 => "100".to_string(),
        Ok(_) => digits,
        // A non-empty digit string too long even for u128 is far above 100.
        Err(_) if !digits.is_empty() => "100".to_string(),
        Err(_) => digits,
    }
}

/// Digits only, with a leading `+91`/`91` country code or `0` trunk prefix
/// stripped so the stored number is the bare 10-digit subscriber number.
pub fn normalize_phone(raw: &str) -> String {
    let digits = sanitize_digits(raw);
    if digits.len() == 12 && digits.starts_with("91") {
        digits[2..].to_string()
    } else if digits.len() == 11 && digits.starts_with('0') {
        digits[1..].to_string()
    } else {
        digits
    }
}

/// Validates one field against the form, first failing rule wins. `None`
/// means the field is clean. Pure: never mutates and never looks at the clock
/// (the date-window rule lives in step validation, which has one).
pub fn validate_field(form: &BookingForm, field: Field) -> Option<String> {
    match field {
        Field::FirstName => validate_name(&form.first_name, "First name"),
        Field::LastName => validate_name(&form.last_name, "Last name"),
        Field::Email => validate_email(&form.email),
        Field::Phone => validate_phone(&form.phone, "Phone number"),
        Field::AlternateContactNo => {
            if form.alternate_contact_no.is_empty() {
                return None;
            }
            if let Some(err) = validate_phone(&form.alternate_contact_no, "Alternate contact number")
            {
                return Some(err);
            }
            // Dedicated rule, separate from the shape check.
            if form.alternate_contact_no == form.phone {
                return Some(
                    "Alternate contact number must be different from the phone number".to_string(),
                );
            }
            None
        }
        Field::Age => validate_age(&form.age),
        Field::Gender => match form.gender {
            Some(_) => None,
            None => Some("Please select a gender".to_string()),
        },
        Field::AppointmentDate => match form.appointment_date {
            Some(_) => None,
            None => Some("Please select an appointment date".to_string()),
        },
        Field::TimeSlot => match form.time_slot {
            Some(_) => None,
            None => Some("Please select a time slot".to_string()),
        },
        Field::Concerns => None,
    }
}

fn validate_name(value: &str, label: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{label} is required"));
    }
    let re = Regex::new(r"^[A-Za-z\s]{2,50}$").unwrap();
    if !re.is_match(value) {
        return Some(format!("{label} must be 2-50 letters"));
    }
    None
}

fn validate_email(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some("Email is required".to_string());
    }
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !re.is_match(value) {
        return Some("Enter a valid email address".to_string());
    }
    None
}

fn validate_phone(value: &str, label: &str) -> Option<String> {
    if value.is_empty() {
        return Some(format!("{label} is required"));
    }
    let re = Regex::new(r"^(?:\+?91|0)?[6789]\d{9}$").unwrap();
    if !re.is_match(value) {
        return Some(format!("{label} must be a valid 10-digit mobile number"));
    }
    None
}

fn validate_age(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Age is required".to_string());
    }
    let re = Regex::new(r"^(?:[1-9][0-9]?|100)$").unwrap();
    if !re.is_match(value) {
        return Some("Age must be between 1 and 100".to_string());
    }
    None
}

/// All personal-details errors at once, not just the first failing field.
pub fn validate_step_one(form: &BookingForm) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in Field::STEP_ONE {
        if let Some(msg) = validate_field(form, field) {
            errors.set(field, msg);
        }
    }
    errors
}

/// Date and slot must both be set, the date inside the booking window and the
/// slot still open against the supplied wall clock.
pub fn validate_step_two(form: &BookingForm, now: NaiveDateTime) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    match form.appointment_date {
        None => errors.set(Field::AppointmentDate, "Please select an appointment date"),
        Some(date) => {
            if let Err(err) = availability::validate_date(date, now.date()) {
                errors.set(Field::AppointmentDate, err.to_string());
            }
        }
    }

    match form.time_slot {
        None => errors.set(Field::TimeSlot, "Please select a time slot"),
        Some(slot) => {
            if let Some(date) = form.appointment_date {
                if !availability::slot_is_open(slot, date, now) {
                    errors.set(Field::TimeSlot, "That time slot is no longer available today");
                }
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, SlotWindow};
    use chrono::NaiveDate;

    fn form() -> BookingForm {
        BookingForm {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.org".to_string(),
            phone: "9876543210".to_string(),
            alternate_contact_no: String::new(),
            age: "34".to_string(),
            gender: Some(Gender::Female),
            appointment_date: None,
            time_slot: None,
            concerns: String::new(),
        }
    }

    #[test]
    fn test_sanitize_name_strips_non_letters() {
        assert_eq!(sanitize_name("R2-D2 O'Neil"), "RD ONeil");
        assert_eq!(sanitize_name("Mary Jane"), "Mary Jane");
    }

    #[test]
    fn test_name_length_bounds() {
        let mut f = form();
        f.first_name = "A".to_string();
        assert!(validate_field(&f, Field::FirstName).is_some());
        f.first_name = "Al".to_string();
        assert!(validate_field(&f, Field::FirstName).is_none());
        f.first_name = "a".repeat(51);
        assert!(validate_field(&f, Field::FirstName).is_some());
    }

    #[test]
    fn test_phone_rules() {
        let mut f = form();
        for good in ["6123456789", "7123456789", "8123456789", "9876543210"] {
            f.phone = good.to_string();
            assert!(validate_field(&f, Field::Phone).is_none(), "{good}");
        }
        for bad in ["5876543210", "987654321", "98765432109", ""] {
            f.phone = bad.to_string();
            assert!(validate_field(&f, Field::Phone).is_some(), "{bad:?}");
        }
    }

    #[test]
    fn test_normalize_phone_strips_prefixes() {
        assert_eq!(normalize_phone("+91 98765 43210"), "9876543210");
        assert_eq!(normalize_phone("09876543210"), "9876543210");
        assert_eq!(normalize_phone("9876543210"), "9876543210");
    }

    #[test]
    fn test_alternate_must_differ_from_phone() {
        let mut f = form();
        f.alternate_contact_no = f.phone.clone();
        let err = validate_field(&f, Field::AlternateContactNo).unwrap();
        assert!(err.contains("different"), "{err}");

        f.alternate_contact_no = "8123456789".to_string();
        assert!(validate_field(&f, Field::AlternateContactNo).is_none());

        // Empty alternate is fine: the field is optional.
        f.alternate_contact_no = String::new();
        assert!(validate_field(&f, Field::AlternateContactNo).is_none());
    }

    #[test]
    fn test_age_clamp_and_bounds() {
        assert_eq!(sanitize_age("101"), "100");
        assert_eq!(sanitize_age("250"), "100");
        assert_eq!(sanitize_age("42"), "42");
        assert_eq!(sanitize_age("0"), "0");

        let mut f = form();
        f.age = "100".to_string();
        assert!(validate_field(&f, Field::Age).is_none());
        f.age = "0".to_string();
        assert!(validate_field(&f, Field::Age).is_some());
        f.age = String::new();
        assert!(validate_field(&f, Field::Age).is_some());
    }

    #[test]
    fn test_age_clamp_survives_pasted_big_numbers() {
        // Pasted values that overflow small integer types must still clamp.
        assert_eq!(sanitize_age("99999999999"), "100");
        assert_eq!(sanitize_age(&"9".repeat(50)), "100");
        assert_eq!(sanitize_age(""), "");
    }

    #[test]
    fn test_email_shape() {
        let mut f = form();
        for bad in ["", "no-at-sign", "a@b", "a b@c.d", "a@b c.d"] {
            f.email = bad.to_string();
            assert!(validate_field(&f, Field::Email).is_some(), "{bad:?}");
        }
        f.email = "x@y.org".to_string();
        assert!(validate_field(&f, Field::Email).is_none());
    }

    #[test]
    fn test_step_one_reports_all_failures_at_once() {
        let mut f = form();
        f.email = String::new();
        f.phone = "12345".to_string();
        let errors = validate_step_one(&f);
        assert!(errors.get(Field::Email).is_some());
        assert!(errors.get(Field::Phone).is_some());
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_step_two_requires_date_and_slot() {
        let now = NaiveDateTime::parse_from_str("2026-01-05 09:00", "%Y-%m-%d %H:%M").unwrap();
        let errors = validate_step_two(&form(), now);
        assert!(errors.get(Field::AppointmentDate).is_some());
        assert!(errors.get(Field::TimeSlot).is_some());

        let mut f = form();
        f.appointment_date = NaiveDate::from_ymd_opt(2026, 1, 7);
        f.time_slot = Some(SlotWindow::TenToNoon);
        assert!(validate_step_two(&f, now).is_empty());
    }

    #[test]
    fn test_step_two_rejects_stale_slot() {
        // Slot picked earlier in the day but now more than half elapsed.
        let mut f = form();
        f.appointment_date = NaiveDate::from_ymd_opt(2026, 1, 5);
        f.time_slot = Some(SlotWindow::TenToNoon);
        let now = NaiveDateTime::parse_from_str("2026-01-05 11:30", "%Y-%m-%d %H:%M").unwrap();
        let errors = validate_step_two(&f, now);
        assert!(errors.get(Field::TimeSlot).is_some());
    }
}
