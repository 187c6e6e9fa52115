//! lexigrade-client: Remote word lists and score storage.
//!
//! Implements the `WordSource` and `ResultStore` traits against the
//! vocabulary service's REST API, and loads the lexigrade configuration.

pub mod config;
pub mod error;
pub mod http;
pub mod mock;

pub use config::{load_config_from, LexigradeConfig, QuizConfig, ServerConfig};
pub use error::ClientError;
pub use http::HttpBackend;
pub use mock::MockBackend;
