//! Configuration module for Newsprint
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use newsprint::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("newsprint.toml")).unwrap();
//! println!("Will walk up to {} listing pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, SelectorConfig, SelectorStrategy, UserAgentConfig,
    DEFAULT_BASE_URL,
};

// Re-export parser functions
pub use parser::{hash_config, load_config, parse_config};
pub use validation::validate;
