//! CLI library components for the FHIR converter.

pub mod check;
pub mod input;
pub mod logging;
