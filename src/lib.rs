//! Snipbin library
//!
//! This library exports the core modules for the snipbin web server so that
//! integration tests can build the full request pipeline in-process.

pub mod app_state;
pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod render;
pub mod routes;
pub mod session;
