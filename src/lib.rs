//! Facade crate for the regio clipping-region engine.

pub use regio_core::*;
