use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// Default epoch: Wednesday, January 1, 2025 00:00:00 UTC.
///
/// Measuring the timestamp field from a recent epoch instead of 1970 leaves
/// the 41-bit field room for roughly 69 years of IDs.
pub const DEFAULT_EPOCH: Duration = Duration::from_millis(1_735_689_600_000);

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC.
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// A time source supplying wall-clock milliseconds to the generator.
///
/// This is the seam between the generator and the clock: production code uses
/// [`WallClock`], tests plug in fixed or stepping clocks.
///
/// Two readings are exposed:
///
/// - [`current_millis`]: the current wall-clock time in milliseconds since
///   the Unix epoch. The generator tracks ordering and detects regression
///   against this value.
/// - [`epoch_millis`]: the encoding origin, subtracted from `current_millis`
///   when packing an ID's timestamp field. Defaults to zero (encode raw Unix
///   milliseconds), which is what mock clocks in tests typically want.
///
/// Keeping ordering on the raw reading and applying the epoch only at encode
/// time means re-anchoring the epoch never makes the clock appear to run
/// backwards.
///
/// # Example
///
/// ```
/// use floe::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// assert_eq!(time.epoch_millis(), 0);
/// ```
///
/// [`current_millis`]: TimeSource::current_millis
/// [`epoch_millis`]: TimeSource::epoch_millis
pub trait TimeSource {
    /// Returns the current wall-clock time in milliseconds since the Unix
    /// epoch.
    fn current_millis(&self) -> u64;

    /// Returns the encoding origin in milliseconds since the Unix epoch.
    fn epoch_millis(&self) -> u64 {
        0
    }
}

impl<T: TimeSource> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }

    fn epoch_millis(&self) -> u64 {
        (**self).epoch_millis()
    }
}

impl<T: TimeSource> TimeSource for Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }

    fn epoch_millis(&self) -> u64 {
        (**self).epoch_millis()
    }
}

/// A [`TimeSource`] backed by the system wall clock.
///
/// Every call reads `SystemTime::now()`. Reading the wall clock directly
/// (rather than a monotonic timer) means a backward system-clock adjustment
/// is *visible* to the generator, which detects it and refuses to mint an ID
/// rather than risking a duplicate or an out-of-order value.
///
/// The epoch lives behind an `Arc`, so clones observe epoch changes made via
/// [`WallClock::set_epoch`]. Changing the epoch takes effect on the next
/// generated ID; it never alters previously produced ones.
#[derive(Clone, Debug)]
pub struct WallClock {
    epoch_millis: Arc<AtomicU64>,
}

impl Default for WallClock {
    /// Constructs a wall clock anchored to [`DEFAULT_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(DEFAULT_EPOCH)
    }
}

impl WallClock {
    /// Constructs a wall clock using a custom epoch as the encoding origin
    /// (t = 0), specified as a [`Duration`] since 1970-01-01 UTC.
    pub fn with_epoch(epoch: Duration) -> Self {
        Self {
            epoch_millis: Arc::new(AtomicU64::new(epoch.as_millis() as u64)),
        }
    }

    /// Re-anchors the encoding origin to a new epoch.
    ///
    /// Takes effect on the next generated ID. IDs produced before the change
    /// keep their original timestamp field.
    pub fn set_epoch(&self, epoch: Duration) {
        self.epoch_millis
            .store(epoch.as_millis() as u64, Ordering::Release);
    }

    /// Milliseconds since the Unix epoch, straight from the system clock.
    ///
    /// # Panics
    ///
    /// Panics if the system clock reads earlier than 1970-01-01 UTC.
    pub fn unix_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("System clock before UNIX_EPOCH")
            .as_millis() as u64
    }
}

impl TimeSource for WallClock {
    fn current_millis(&self) -> u64 {
        Self::unix_millis()
    }

    fn epoch_millis(&self) -> u64 {
        self.epoch_millis.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_clock_tracks_unix_time() {
        let clock = WallClock::default();
        assert!(clock.current_millis().abs_diff(WallClock::unix_millis()) < 10);
        assert_eq!(clock.epoch_millis(), DEFAULT_EPOCH.as_millis() as u64);
    }

    #[test]
    fn set_epoch_re_anchors_clones() {
        let clock = WallClock::with_epoch(DEFAULT_EPOCH);
        let alias = clock.clone();
        clock.set_epoch(TWITTER_EPOCH);
        assert_eq!(alias.epoch_millis(), TWITTER_EPOCH.as_millis() as u64);
    }
}
