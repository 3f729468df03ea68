use crate::SnowflakeId;
use std::sync::{MutexGuard, PoisonError};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `floe` can emit.
///
/// Construction fails only on an out-of-range identity; generation fails only
/// when the wall clock is observed to move backwards (or, pathologically, when
/// the generator lock is poisoned by a panicking thread). There are no partial
/// failure states: a failed call leaves the generator untouched.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The configured datacenter ID does not fit in the 5-bit field.
    ///
    /// Not retryable; the caller must supply a valid identity.
    #[error(
        "datacenter ID must be between 0 and {max}, got {datacenter_id}",
        max = SnowflakeId::DATACENTER_ID_MASK
    )]
    DatacenterIdOutOfRange { datacenter_id: u64 },

    /// The configured machine ID does not fit in the 5-bit field.
    ///
    /// Not retryable; the caller must supply a valid identity.
    #[error(
        "machine ID must be between 0 and {max}, got {machine_id}",
        max = SnowflakeId::MACHINE_ID_MASK
    )]
    MachineIdOutOfRange { machine_id: u64 },

    /// The wall clock read earlier than the timestamp of the last
    /// successfully generated ID.
    ///
    /// Emitting an ID here could duplicate or reorder, so the generator
    /// refuses instead. Callers may retry once the clock catches up; the
    /// generator itself implements no retry policy.
    #[error(
        "clock moved backwards; refusing to generate an ID (last {last_millis}ms, now {now_millis}ms)"
    )]
    ClockMovedBackwards { last_millis: u64, now_millis: u64 },

    /// The configured epoch lies ahead of the wall clock.
    ///
    /// Packing a timestamp here would pin the 41-bit field at zero across
    /// milliseconds and mint duplicate IDs, so the generator refuses instead.
    /// Callers must supply an epoch at or before the current time.
    #[error(
        "epoch is ahead of the wall clock; refusing to generate an ID (epoch {epoch_millis}ms, now {now_millis}ms)"
    )]
    EpochAheadOfClock { epoch_millis: u64, now_millis: u64 },

    /// A thread panicked while holding the generator lock.
    #[error("generator lock poisoned")]
    LockPoisoned,
}

// Convert all poisoned lock errors to a simplified `LockPoisoned`
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
