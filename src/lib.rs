pub mod app;
pub mod config;
pub mod filter;
pub mod logging;
pub mod output;
pub mod version;
