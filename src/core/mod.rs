//! Core types: settings, errors, models and the translation gateway

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
