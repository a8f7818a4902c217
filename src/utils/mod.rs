/// TOML-based configuration (`jarvis.toml`).
pub mod toml_config;
