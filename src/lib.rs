//! twig - a terminal client for threaded forum chat
//!
//! This library exposes modules for use in integration tests and benches.

pub mod animation;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod gesture;
pub mod input;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod render;
pub mod services;
pub mod terminal;
pub mod ui;
pub mod views;
