//! Report aggregation engine.
//!
//! Pure, synchronous computation over an immutable dataset snapshot:
//! query validation, stop clustering, per-vehicle activity aggregation,
//! ranking with pagination, and the pipeline orchestrating them into
//! the three report kinds.

pub mod aggregate;
pub mod cluster;
pub mod error;
pub mod pipeline;
pub mod rank;
pub mod types;
pub mod utility;
pub mod validate;
