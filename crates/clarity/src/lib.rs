//! Pay comparison core for the Clarity service.
//!
//! `pay` holds the pure derivation pipeline (banding, benchmark lookup, comparison, summary),
//! `remote` the clients for the external feedback and prediction endpoints, and `session` the
//! generation-tagged analysis state that ties the two together.

pub mod config;
pub mod error;
pub mod pay;
pub mod remote;
pub mod session;
pub mod telemetry;
