use anyhow::Context;
use async_trait::async_trait;

use super::AppointmentApi;
use crate::config::AppConfig;
use crate::models::{ApiResponse, AppointmentRequest};

pub struct RestAppointmentApi {
    base_url: String,
    client: reqwest::Client,
}

impl RestAppointmentApi {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }
}

#[async_trait]
impl AppointmentApi for RestAppointmentApi {
    async fn create_appointment(
        &self,
        request: &AppointmentRequest,
    ) -> anyhow::Result<ApiResponse> {
        let url = format!(
            "{}/api/appointments",
            self.base_url.trim_end_matches('/')
        );

        self.client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("failed to reach appointment API")?
            .error_for_status()
            .context("appointment API returned error status")?
            .json::<ApiResponse>()
            .await
            .context("failed to decode appointment API response")
    }
}
