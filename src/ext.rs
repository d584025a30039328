//! Optional extensions built on top of the access layer.

pub mod expiry;

pub use expiry::*;
