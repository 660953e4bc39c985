//! Logging facade for the regio project.
//!
//! Downstream crates depend on this crate instead of `tracing` directly so the
//! backing implementation can be swapped without touching call sites.

pub use tracing::{Level, debug, error, event, info, span, trace, warn};
