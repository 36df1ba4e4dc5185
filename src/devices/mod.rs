//! Device implementations
//!
//! Only hardware-free devices live in-crate; real register-level drivers
//! are external and implement the traits in [`crate::drivers`].

pub mod mock;
