// Frameworks: runtime configuration.

pub mod config;
