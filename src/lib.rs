pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod navigation;
pub mod query;
pub mod render;
pub mod session;
pub mod shell;
pub mod terminal;
pub mod views;
