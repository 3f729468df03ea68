//! # floe
//!
//! 64-bit, time-ordered, collision-resistant Snowflake IDs for distributed
//! producers.
//!
//! Each process is configured with a fixed `(datacenter_id, machine_id)`
//! identity and constructs one [`SnowflakeGenerator`] for it. The generator
//! packs a 41-bit millisecond timestamp, the 5-bit datacenter ID, the 5-bit
//! machine ID, and a 12-bit per-millisecond sequence into a single `u64`, so
//! IDs sort numerically by creation time across the whole fleet:
//!
//! ```text
//!  Bit Index:  63           63 62            22 21       17 16       12 11             0
//!              +--------------+----------------+-----------+-----------+---------------+
//!  Field:      | reserved (1) | timestamp (41) |  dc (5)   | machine(5)| sequence (12) |
//!              +--------------+----------------+-----------+-----------+---------------+
//!              |<------------ MSB ----------- 64 bits ----------- LSB -------------->|
//! ```
//!
//! The generator is safe to share across threads: all mutable state sits
//! behind one mutex, and every call either returns a unique, monotonically
//! increasing ID or fails with an explicit error (invalid identity at
//! construction, or a detected backward clock step at generation).
//!
//! ## Example
//!
//! ```
//! use floe::{SnowflakeGenerator, WallClock};
//!
//! let generator = SnowflakeGenerator::new(1, 1, WallClock::default())?;
//! let id = generator.generate_id()?;
//! assert_eq!(id.datacenter_id(), 1);
//! assert_eq!(id.machine_id(), 1);
//! # Ok::<(), floe::Error>(())
//! ```

mod error;
mod generator;
mod id;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::time::*;
