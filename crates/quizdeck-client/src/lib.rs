//! quizdeck-client — REST quiz source and configuration.
//!
//! Implements the `QuizSource` trait against the platform's quiz API and
//! loads the `quizdeck.toml` configuration the CLI runs with.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{load_config, load_config_from, ApiConfig, QuizdeckConfig};
pub use http::RestSource;
pub use mock::MockSource;
