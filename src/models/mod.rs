pub mod form;
pub mod payload;
pub mod slot;

pub use form::{BookingForm, Field, Gender, ValidationErrors};
pub use payload::{ApiResponse, AppointmentRequest};
pub use slot::SlotWindow;
