//! Profit Engine library crate.
//!
//! This crate exposes the sales-funnel profit estimator and its HTTP
//! API as reusable modules.  External applications may depend on the
//! `profit_engine` crate and call `engine::compute` directly or embed
//! the API via `api::build_router`.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod lenient;
pub mod models;
pub mod scenario;
