use crate::{Error, Result, SnowflakeId, TimeSource};
use std::sync::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Mutable generator state, updated only inside the critical section.
#[derive(Debug)]
struct GeneratorState {
    /// Wall-clock millisecond at which the most recent ID was minted. `None`
    /// until the first successful generation.
    last_timestamp: Option<u64>,
    /// Ordinal of the ID minted within `last_timestamp`'s millisecond.
    sequence: u64,
}

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// One instance is constructed per `(datacenter_id, machine_id)` identity and
/// lives for the process's duration. All mutable state sits behind a single
/// [`Mutex`], so every call to [`generate_id`] is one atomic critical section:
/// concurrent callers queue, and no caller ever observes partially updated
/// state.
///
/// Multiple instances in one process need no coordination beyond distinct
/// identities: the datacenter and machine fields make the low bits of an ID
/// universally distinct even when timestamps and sequences collide.
///
/// ## Guarantees
///
/// - Every returned ID is unique among all IDs this instance ever produced.
/// - A later successful call never returns a numerically smaller ID than an
///   earlier one. A detected backward clock step fails the call instead of
///   silently breaking this ordering.
///
/// [`generate_id`]: SnowflakeGenerator::generate_id
#[derive(Debug)]
pub struct SnowflakeGenerator<T>
where
    T: TimeSource,
{
    datacenter_id: u64,
    machine_id: u64,
    state: Mutex<GeneratorState>,
    clock: T,
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new generator for the given identity.
    ///
    /// # Parameters
    ///
    /// - `datacenter_id`: datacenter identity, must fit the 5-bit field
    ///   (`0..=31`).
    /// - `machine_id`: machine identity, must fit the 5-bit field (`0..=31`).
    /// - `clock`: a [`TimeSource`] (e.g. [`WallClock`]) supplying wall-clock
    ///   milliseconds and the encoding epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatacenterIdOutOfRange`] or
    /// [`Error::MachineIdOutOfRange`] if either identity value exceeds its
    /// field. These are not retryable.
    ///
    /// # Example
    ///
    /// ```
    /// use floe::{SnowflakeGenerator, WallClock};
    ///
    /// let generator = SnowflakeGenerator::new(1, 1, WallClock::default())?;
    /// let id = generator.generate_id()?;
    /// assert!(id.to_raw() > 0);
    /// # Ok::<(), floe::Error>(())
    /// ```
    ///
    /// [`WallClock`]: crate::WallClock
    pub fn new(datacenter_id: u64, machine_id: u64, clock: T) -> Result<Self> {
        if datacenter_id > SnowflakeId::DATACENTER_ID_MASK {
            return Err(Error::DatacenterIdOutOfRange { datacenter_id });
        }
        if machine_id > SnowflakeId::MACHINE_ID_MASK {
            return Err(Error::MachineIdOutOfRange { machine_id });
        }
        Ok(Self {
            datacenter_id,
            machine_id,
            state: Mutex::new(GeneratorState {
                last_timestamp: None,
                sequence: 0,
            }),
            clock,
        })
    }

    /// Returns the configured datacenter ID.
    pub fn datacenter_id(&self) -> u64 {
        self.datacenter_id
    }

    /// Returns the configured machine ID.
    pub fn machine_id(&self) -> u64 {
        self.machine_id
    }

    /// Generates the next unique, time-ordered ID.
    ///
    /// Runs the whole algorithm, clock read included, as one critical
    /// section under the state lock. Reading the clock inside the lock keeps
    /// one caller's reading from racing another caller's state update, which
    /// would otherwise present as a phantom backward step.
    ///
    /// - If the clock advanced past the last minted millisecond, the sequence
    ///   resets to zero.
    /// - If the clock still reads the last minted millisecond, the sequence
    ///   increments. When all 4096 ordinals of the millisecond are spent, the
    ///   call spin-waits (holding the lock, so concurrent callers queue
    ///   behind it) until the clock advances, then resets the sequence. The
    ///   wait is bounded by the remainder of the current millisecond.
    /// - If the clock reads *earlier* than the last minted millisecond, the
    ///   call fails and state is left untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockMovedBackwards`] on a detected backward clock step.
    ///   Callers may retry after the clock catches up.
    /// - [`Error::EpochAheadOfClock`] if the configured epoch lies in the
    ///   future of the wall clock.
    /// - [`Error::LockPoisoned`] if another thread panicked mid-generation.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_id(&self) -> Result<SnowflakeId> {
        let mut state = self.state.lock()?;
        let mut now = self.clock.current_millis();

        // A future epoch would pin the timestamp field at zero and repeat
        // (0, sequence) pairs across milliseconds. Refuse before touching
        // state.
        let epoch = self.clock.epoch_millis();
        if now < epoch {
            return Err(Error::EpochAheadOfClock {
                epoch_millis: epoch,
                now_millis: now,
            });
        }

        match state.last_timestamp {
            Some(last) if now < last => {
                return Err(Error::ClockMovedBackwards {
                    last_millis: last,
                    now_millis: now,
                });
            }
            Some(last) if now == last => {
                if state.sequence < SnowflakeId::SEQUENCE_MASK {
                    state.sequence += 1;
                } else {
                    // Millisecond exhausted: wait out the remainder of the
                    // tick, then start it fresh.
                    now = self.wait_until_after(last);
                    state.sequence = 0;
                }
            }
            _ => {
                state.sequence = 0;
            }
        }

        state.last_timestamp = Some(now);
        // Ordering is tracked on the raw wall-clock reading; the epoch is
        // applied only when packing, so re-anchoring it never looks like a
        // backward clock step.
        let delta = now - epoch;
        Ok(SnowflakeId::from_parts(
            delta,
            self.datacenter_id,
            self.machine_id,
            state.sequence,
        ))
    }

    /// Spins until the clock reads strictly later than `last`.
    ///
    /// Called with the state lock held; see [`generate_id`] for the ordering
    /// rationale.
    ///
    /// [`generate_id`]: SnowflakeGenerator::generate_id
    fn wait_until_after(&self, last: u64) -> u64 {
        loop {
            let now = self.clock.current_millis();
            if now > last {
                return now;
            }
            core::hint::spin_loop();
        }
    }
}
