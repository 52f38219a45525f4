pub mod config;
pub mod highlight;

pub use config::{AppConfig, ModelConfig};
pub use highlight::{parse_highlight, HighlightColor, ParseHighlightError};
