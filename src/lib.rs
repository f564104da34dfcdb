//! Ditherkit
//!
//! HTTP service and command line front end for the `dither_core` engine.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
