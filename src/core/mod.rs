pub mod answer;
pub mod app;
pub mod cli;
pub mod config;
pub mod format;
pub mod message;
pub mod page;
pub mod response;
pub mod transcript;
pub mod viz;
