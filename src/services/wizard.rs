use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::{
    AppointmentRequest, BookingForm, Field, Gender, SlotWindow, ValidationErrors,
};
use crate::services::alerts::AlertSink;
use crate::services::api::AppointmentApi;
use crate::services::availability;
use crate::services::clock::Clock;
use crate::services::validation;

/// The three sequential stages of the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    PersonalDetails,
    DateTime,
    Summary,
}

impl Step {
    pub fn number(&self) -> u8 {
        match self {
            Step::PersonalDetails => 1,
            Step::DateTime => 2,
            Step::Summary => 3,
        }
    }

    fn fields(&self) -> &'static [Field] {
        match self {
            Step::PersonalDetails => &Field::STEP_ONE,
            Step::DateTime => &Field::STEP_TWO,
            Step::Summary => &[],
        }
    }
}

/// What happened when the user confirmed the booking.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Server accepted; the wizard has been reset to a fresh step 1.
    Accepted,
    /// Server said no (`status: false`); form state is preserved for retry.
    Rejected(String),
    /// The request never produced a usable response; form state is preserved.
    Failed,
    /// A submission was already in flight or re-validation found stale state.
    Blocked,
}

/// Controller for the 3-step booking flow: owns the form for the lifetime of
/// one booking session, applies per-field and per-step validation, computes
/// slot availability against the injected clock and drives submission.
pub struct BookingWizard {
    form: BookingForm,
    errors: ValidationErrors,
    touched: BTreeSet<Field>,
    step: Step,
    submitting: bool,
    api: Box<dyn AppointmentApi>,
    alerts: Box<dyn AlertSink>,
    clock: Box<dyn Clock>,
}

impl BookingWizard {
    pub fn new(api: Box<dyn AppointmentApi>, alerts: Box<dyn AlertSink>, clock: Box<dyn Clock>) -> Self {
        Self {
            form: BookingForm::default(),
            errors: ValidationErrors::default(),
            touched: BTreeSet::new(),
            step: Step::PersonalDetails,
            submitting: false,
            api,
            alerts,
            clock,
        }
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The error to render next to a field, if any. Errors stay hidden until
    /// the field was blurred or a step advance was attempted.
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if self.touched.contains(&field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    /// Stores a keystroke-level update, sanitizing per field first so
    /// disallowed characters never appear in the form at all.
    pub fn input(&mut self, field: Field, raw: &str) {
        match field {
            Field::FirstName => self.form.first_name = validation::sanitize_name(raw),
            Field::LastName => self.form.last_name = validation::sanitize_name(raw),
            Field::Email => self.form.email = raw.to_string(),
            Field::Phone => self.form.phone = validation::normalize_phone(raw),
            Field::AlternateContactNo => {
                self.form.alternate_contact_no = validation::normalize_phone(raw)
            }
            Field::Age => self.form.age = validation::sanitize_age(raw),
            Field::Gender => self.form.gender = Gender::from_label(raw),
            Field::Concerns => self.form.concerns = raw.to_string(),
            // Selections go through select_date / select_slot.
            Field::AppointmentDate | Field::TimeSlot => return,
        }

        if self.touched.contains(&field) {
            self.refresh_field(field);
        }
        // The differs-from-phone rule makes the alternate number depend on
        // the phone field.
        if field == Field::Phone && self.touched.contains(&Field::AlternateContactNo) {
            self.refresh_field(Field::AlternateContactNo);
        }
    }

    /// Marks a field as blurred, making its validation state visible.
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
        self.refresh_field(field);
    }

    /// Applies a date selection. An out-of-window date clears both the date
    /// and any chosen slot; a valid one still clears the slot, because slot
    /// availability depends on the date.
    pub fn select_date(&mut self, date: NaiveDate) {
        let today = self.clock.now().date();
        self.touched.insert(Field::AppointmentDate);

        match availability::validate_date(date, today) {
            Ok(()) => {
                self.form.appointment_date = Some(date);
                self.form.time_slot = None;
                self.errors.clear(Field::AppointmentDate);
                self.errors.clear(Field::TimeSlot);
            }
            Err(err) => {
                tracing::warn!(date = %date, "rejected out-of-window date");
                self.form.appointment_date = None;
                self.form.time_slot = None;
                self.errors.set(Field::AppointmentDate, err.to_string());
            }
        }
    }

    /// Applies a slot selection. Picking a closed slot is a no-op, mirroring
    /// a disabled control; returns whether the selection took effect.
    pub fn select_slot(&mut self, slot: SlotWindow) -> bool {
        let Some(date) = self.form.appointment_date else {
            return false;
        };
        if !availability::slot_is_open(slot, date, self.clock.now()) {
            return false;
        }
        self.form.time_slot = Some(slot);
        self.touched.insert(Field::TimeSlot);
        self.errors.clear(Field::TimeSlot);
        true
    }

    /// Open/closed state of every slot for the currently selected date, for
    /// rendering the picker. All closed until a date is chosen.
    pub fn slot_listing(&self) -> Vec<(SlotWindow, bool)> {
        match self.form.appointment_date {
            Some(date) => availability::slot_listing(date, self.clock.now()),
            None => SlotWindow::ALL.iter().map(|s| (*s, false)).collect(),
        }
    }

    /// Attempts to advance to the next step. On failure every failing field's
    /// error becomes visible at once and a warning alert fires.
    pub fn next_step(&mut self) -> bool {
        let step_errors = match self.step {
            Step::PersonalDetails => validation::validate_step_one(&self.form),
            Step::DateTime => validation::validate_step_two(&self.form, self.clock.now()),
            Step::Summary => return false,
        };

        self.apply_step_errors(self.step, &step_errors);

        if !step_errors.is_empty() {
            let failing: Vec<&str> = step_errors.iter().map(|(f, _)| f.as_str()).collect();
            tracing::warn!(
                step = self.step.number(),
                fields = ?failing,
                "step validation blocked advancement"
            );
            self.alerts
                .warning("Please fix the highlighted fields before continuing");
            return false;
        }

        self.step = match self.step {
            Step::PersonalDetails => Step::DateTime,
            Step::DateTime | Step::Summary => Step::Summary,
        };
        tracing::info!(step = self.step.number(), "advanced to next step");
        true
    }

    /// Backward navigation is unconditional and never validated.
    pub fn prev_step(&mut self) {
        self.step = match self.step {
            Step::PersonalDetails | Step::DateTime => Step::PersonalDetails,
            Step::Summary => Step::DateTime,
        };
    }

    /// Final confirmation: re-validates both earlier steps as a guard against
    /// stale state, posts the payload and branches on the response.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.submitting {
            return SubmitOutcome::Blocked;
        }
        // Submission only happens from the summary step.
        if self.step != Step::Summary {
            return SubmitOutcome::Blocked;
        }

        let now = self.clock.now();
        let mut stale = validation::validate_step_one(&self.form);
        stale.merge(validation::validate_step_two(&self.form, now));
        if !stale.is_empty() {
            self.apply_step_errors(Step::PersonalDetails, &stale);
            self.apply_step_errors(Step::DateTime, &stale);
            self.alerts
                .warning("Please fix the highlighted fields before continuing");
            return SubmitOutcome::Blocked;
        }

        let Some(request) = AppointmentRequest::from_form(&self.form) else {
            // Unreachable after step validation; kept as a hard stop.
            return SubmitOutcome::Blocked;
        };

        self.submitting = true;
        let result = self.api.create_appointment(&request).await;
        self.submitting = false;

        match result {
            Ok(res) if res.status => {
                tracing::info!(
                    date = %request.appointment_date,
                    slot = %request.time_slot,
                    "appointment booked"
                );
                self.alerts.success(
                    res.message
                        .as_deref()
                        .unwrap_or("Appointment booked successfully"),
                );
                self.reset();
                SubmitOutcome::Accepted
            }
            Ok(res) => {
                let message = res
                    .message
                    .unwrap_or_else(|| "Could not book the appointment. Please try again.".to_string());
                tracing::warn!(message = %message, "appointment API rejected the booking");
                self.alerts.error(&message);
                SubmitOutcome::Rejected(message)
            }
            Err(err) => {
                tracing::error!(error = %err, "appointment submission failed");
                self.alerts
                    .error("Something went wrong while booking. Please try again.");
                SubmitOutcome::Failed
            }
        }
    }

    /// Back to a fresh step 1 with an empty form, after a confirmed success.
    fn reset(&mut self) {
        self.form = BookingForm::default();
        self.errors.clear_all();
        self.touched.clear();
        self.step = Step::PersonalDetails;
        self.submitting = false;
    }

    fn refresh_field(&mut self, field: Field) {
        match validation::validate_field(&self.form, field) {
            Some(msg) => self.errors.set(field, msg),
            None => self.errors.clear(field),
        }
    }

    fn apply_step_errors(&mut self, step: Step, step_errors: &ValidationErrors) {
        for field in step.fields() {
            self.touched.insert(*field);
            match step_errors.get(*field) {
                Some(msg) => self.errors.set(*field, msg),
                None => self.errors.clear(*field),
            }
        }
    }
}
