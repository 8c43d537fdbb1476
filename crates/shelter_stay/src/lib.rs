//! Shelter stay estimator
//!
//! Predicts how many days an animal will stay in a shelter before adoption
//! from its intake data, and keeps a log of how those predictions turned out.

pub mod charts;
pub mod commands;
pub mod report;
