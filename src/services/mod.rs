pub mod alerts;
pub mod api;
pub mod availability;
pub mod clock;
pub mod validation;
pub mod wizard;
