//! Controllers for the mentorship dashboard.
//!
//! Each controller owns one of the pure state machines from
//! `mentorlink-core` and drives it through the service traits from
//! `mentorlink-client`. Every controller receives an explicit
//! [`Session`](mentorlink_core::session::Session); there is no ambient
//! current-user lookup.

pub mod dashboard;
pub mod error;
pub mod notice;
pub mod plan_view;
pub mod profile_panels;
pub mod render;
