//! Text producer for slide generation: an OpenRouter chat-completions
//! client and its configuration.

pub mod config;
pub mod openrouter;

pub use config::{default_config_path, load_config, parse_config, ConfigFile, ProducerConfig};
pub use openrouter::OpenRouterProducer;
