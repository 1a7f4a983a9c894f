//! Domain layer for linelint
//!
//! Pure data model for lint findings and scan reports, independent of the
//! file system and the output formats. Finding is a value object produced by
//! the rule engine; ScanReport is the aggregate the checker assembles.

pub mod findings;

// Re-export main domain types for convenience
pub use findings::*;
