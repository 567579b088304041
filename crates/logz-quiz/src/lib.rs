//! Log Z diagnostic quiz: weighted scoring, urgency tiers, savings estimate,
//! the quiz session state machine and the emailed report.

pub mod config;
pub mod error;
pub mod quiz;
pub mod report;
pub mod telemetry;
