pub mod rest;

use async_trait::async_trait;

use crate::models::{ApiResponse, AppointmentRequest};

#[async_trait]
pub trait AppointmentApi: Send + Sync {
    async fn create_appointment(&self, request: &AppointmentRequest)
        -> anyhow::Result<ApiResponse>;
}
