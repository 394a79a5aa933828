//! Signal normalization, agreement scoring and sentiment gauge mapping.

pub mod aggregation;
pub mod gauge;
pub mod normalization;
pub mod scoring;

pub use aggregation::*;
pub use gauge::*;
pub use normalization::*;
pub use scoring::*;
