//! HTTP surface of the signup service.
//!
//! - [`config`] - CLI/environment configuration for the binary
//! - [`routes`] - router and handlers (form, submission, status)
//! - [`pages`] - the static HTML served to browsers

pub mod config;
pub mod pages;
pub mod routes;
