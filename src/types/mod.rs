//! Common data types

pub mod frame;
pub mod grid;

pub use frame::*;
pub use grid::*;
