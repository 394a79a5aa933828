//! Display formatting for prices, volumes and percentage changes.

pub mod change;
pub mod number;

pub use change::*;
pub use number::*;
