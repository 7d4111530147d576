pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod views;

use crate::api::ApiClient;
use crate::config::Config;
use crate::form::{FormController, ValidationMode};

pub fn build_controller(config: &Config, mode: ValidationMode) -> FormController<ApiClient> {
    tracing::debug!("Using submissions API at {}", config.api_base);
    FormController::new(ApiClient::new(&config.api_base), mode)
}
