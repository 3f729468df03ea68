use core::fmt;

/// A 64-bit Snowflake ID.
///
/// - 1 bit reserved (always zero)
/// - 41 bits timestamp (ms since the configured epoch, see [`DEFAULT_EPOCH`])
/// - 5 bits datacenter ID
/// - 5 bits machine ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21              17 16           12 11             0
///              +--------------+----------------+------------------+---------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | datacenter ID (5)| machine ID (5)| sequence (12) |
///              +--------------+----------------+------------------+---------------+---------------+
///              |<--------------------- MSB --------- 64 bits --------- LSB --------------------->|
/// ```
///
/// The timestamp occupies the highest payload bits, so IDs sort numerically
/// by creation time regardless of which datacenter or machine produced them.
///
/// [`DEFAULT_EPOCH`]: crate::DEFAULT_EPOCH
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId {
    id: u64,
}

impl SnowflakeId {
    /// Field-width mask selecting the 41-bit timestamp, positioned at bits
    /// 22 through 62 by [`Self::TIMESTAMP_SHIFT`].
    pub const TIMESTAMP_MASK: u64 = (1 << 41) - 1;

    /// Field-width mask selecting the 5-bit datacenter ID, positioned at
    /// bits 17 through 21 by [`Self::DATACENTER_ID_SHIFT`].
    pub const DATACENTER_ID_MASK: u64 = (1 << 5) - 1;

    /// Field-width mask selecting the 5-bit machine ID, positioned at bits
    /// 12 through 16 by [`Self::MACHINE_ID_SHIFT`].
    pub const MACHINE_ID_MASK: u64 = (1 << 5) - 1;

    /// Field-width mask selecting the 12-bit sequence, which sits at bits 0
    /// through 11 unshifted.
    pub const SEQUENCE_MASK: u64 = (1 << 12) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 22).
    pub const TIMESTAMP_SHIFT: u64 = 22;

    /// Number of bits to shift the datacenter ID to its correct position
    /// (bit 17).
    pub const DATACENTER_ID_SHIFT: u64 = 17;

    /// Number of bits to shift the machine ID to its correct position
    /// (bit 12).
    pub const MACHINE_ID_SHIFT: u64 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u64 = 0;

    /// Packs the four components into a single 64-bit ID.
    ///
    /// Each component is masked to its field width before shifting, so
    /// oversized inputs wrap rather than corrupt neighboring fields. The
    /// generator validates identity values up front and never produces
    /// oversized components.
    pub const fn from_parts(
        timestamp: u64,
        datacenter_id: u64,
        machine_id: u64,
        sequence: u64,
    ) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let datacenter_id =
            (datacenter_id & Self::DATACENTER_ID_MASK) << Self::DATACENTER_ID_SHIFT;
        let machine_id = (machine_id & Self::MACHINE_ID_MASK) << Self::MACHINE_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | datacenter_id | machine_id | sequence,
        }
    }

    /// Extracts the timestamp (milliseconds since the configured epoch).
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the datacenter ID.
    pub const fn datacenter_id(&self) -> u64 {
        (self.id >> Self::DATACENTER_ID_SHIFT) & Self::DATACENTER_ID_MASK
    }

    /// Extracts the machine ID.
    pub const fn machine_id(&self) -> u64 {
        (self.id >> Self::MACHINE_ID_SHIFT) & Self::MACHINE_ID_MASK
    }

    /// Extracts the sequence number.
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns the raw packed value.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Reconstructs an ID from a raw packed value.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the ID as a zero-padded 20-digit string.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("timestamp", &self.timestamp())
            .field("datacenter_id", &self.datacenter_id())
            .field("machine_id", &self.machine_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_partition_the_payload() {
        assert_eq!(SnowflakeId::TIMESTAMP_SHIFT, 22);
        assert_eq!(SnowflakeId::DATACENTER_ID_SHIFT, 17);
        assert_eq!(SnowflakeId::MACHINE_ID_SHIFT, 12);
        assert_eq!(SnowflakeId::SEQUENCE_SHIFT, 0);
        // 41 + 5 + 5 + 12 payload bits leave the sign bit clear.
        assert_eq!(
            SnowflakeId::from_parts(
                SnowflakeId::TIMESTAMP_MASK,
                SnowflakeId::DATACENTER_ID_MASK,
                SnowflakeId::MACHINE_ID_MASK,
                SnowflakeId::SEQUENCE_MASK,
            )
            .to_raw(),
            u64::MAX >> 1
        );
    }

    #[test]
    fn pack_unpack_round_trip() {
        let id = SnowflakeId::from_parts(1_000, 2, 3, 1);
        assert_eq!(id.timestamp(), 1_000);
        assert_eq!(id.datacenter_id(), 2);
        assert_eq!(id.machine_id(), 3);
        assert_eq!(id.sequence(), 1);
        assert_eq!(SnowflakeId::from_raw(id.to_raw()), id);
    }

    #[test]
    fn fields_do_not_bleed_at_max_values() {
        let id = SnowflakeId::from_parts(0, SnowflakeId::DATACENTER_ID_MASK, 0, 0);
        assert_eq!(id.datacenter_id(), 31);
        assert_eq!(id.machine_id(), 0);
        assert_eq!(id.sequence(), 0);
        assert_eq!(id.timestamp(), 0);

        let id = SnowflakeId::from_parts(0, 0, 0, SnowflakeId::SEQUENCE_MASK);
        assert_eq!(id.sequence(), 4095);
        assert_eq!(id.machine_id(), 0);
    }

    #[test]
    fn orders_by_timestamp_before_identity() {
        let earlier = SnowflakeId::from_parts(41, 31, 31, 4095);
        let later = SnowflakeId::from_parts(42, 0, 0, 0);
        assert!(later > earlier);
    }

    #[test]
    fn padded_string_is_twenty_digits() {
        let id = SnowflakeId::from_parts(1, 1, 1, 1);
        let s = id.to_padded_string();
        assert_eq!(s.len(), 20);
        assert_eq!(s.parse::<u64>().unwrap(), id.to_raw());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let id = SnowflakeId::from_parts(123_456, 7, 8, 9);
        let json = serde_json::to_string(&id).unwrap();
        let back: SnowflakeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
