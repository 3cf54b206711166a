//! HireHub job board core.
//!
//! Everything lives in memory: the [`board::registry::JobRegistry`] owns the postings and the
//! applied-set, [`board::view::derive_view`] computes what gets displayed, and
//! [`board::session::BoardSession`] ties both to the role, draft and notice state of one user
//! session.

pub mod board;
pub mod config;
pub mod error;
pub mod telemetry;
