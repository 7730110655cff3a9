//! REST client for the mentorship platform API.
//!
//! Provides typed wrappers for the plan, profile and relationship
//! endpoints, environment-driven configuration, and the async service
//! traits the dashboard controllers are written against.

pub mod api;
pub mod config;
pub mod error;
pub mod plans;
pub mod profile;
pub mod relationships;
pub mod service;

pub use api::MentorlinkApi;
pub use config::ClientConfig;
pub use error::ApiError;
