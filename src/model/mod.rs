//! Pure data structures: orders, placement records and logical time.

pub mod order;
pub mod shelved;

pub use order::*;
pub use shelved::*;
