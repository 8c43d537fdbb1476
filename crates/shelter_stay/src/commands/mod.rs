//! CLI command implementations.

pub mod feedback;
pub mod form;
pub mod predict;
pub mod schema;
pub mod stats;

pub use form::FormArgs;
pub use predict::Estimator;
