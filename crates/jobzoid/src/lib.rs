//! Core library for the JobZoid applicant protection service.
//!
//! The `risk` module tree holds the scoring heuristics (signal classifier,
//! energy-sink engine, ghost-listing heuristic, and the facade that composes
//! them); the `auth` module tree holds the OTP issuance/verification
//! lifecycle and its collaborator seams.

pub mod auth;
pub mod config;
pub mod error;
pub mod risk;
pub mod telemetry;
