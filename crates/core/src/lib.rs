//! Domain model and client-side state machines for the mentorship
//! platform.
//!
//! Nothing in this crate performs I/O. The REST bindings live in
//! `mentorlink-client`, and the controllers that drive these state
//! machines through the network live in `mentorlink-dashboard`.

pub mod error;
pub mod pitch;
pub mod plan;
pub mod plan_editor;
pub mod plan_template;
pub mod profile;
pub mod roles;
pub mod session;
pub mod types;
