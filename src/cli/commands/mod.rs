//! Command execution coordinating the release step.

mod release;

pub use release::execute_release;
