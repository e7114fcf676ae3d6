pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod notify;
pub mod reminder;
pub mod theme;
pub mod tui;
pub mod ui;
