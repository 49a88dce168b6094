//! Scorekeeper test support utilities
//!
//! Shared by the integration test binaries; currently unified logging
//! initialization.

pub mod logging;
