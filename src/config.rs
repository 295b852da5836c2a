use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("APPOINTMENT_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
        }
    }
}
