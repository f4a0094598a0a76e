pub mod archive;
pub mod bootstrap;
pub mod commands;
pub mod config;
pub mod distribution;
pub mod logging;
pub mod paths;
pub mod prompt;
pub mod router;
pub mod template;

// Re-export commonly used types
pub use config::Settings;
pub use prompt::{AnswerSource, InitRequest};
pub use router::{route, CommandTable};
