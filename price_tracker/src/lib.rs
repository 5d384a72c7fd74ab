//! Fetch daily OHLCV history for one ticker, write a fixed-width text report
//! and render a close/high-low chart.
//!
//! The binary drives [`pipeline::run`]; the pieces are public so other
//! front ends and tests can swap the [`providers::DataProvider`] or the sinks.

pub mod cli;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod io;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod providers;
