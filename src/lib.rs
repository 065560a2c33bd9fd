// For integration tests only, skillplan does binary-only packaging
pub mod cli;
pub mod config;
pub mod curriculum;
pub mod export;
pub mod history;
pub mod logging;
pub mod orchestrator;
pub mod service;
