/// Tracing subscriber initialisation.
pub mod logging;
/// `workorder.toml` loading and validation.
pub mod toml_config;
