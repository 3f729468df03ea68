use clap::Parser;
use std::time::Duration;

/// Runtime configuration for the `floe` binary.
///
/// All values are parsed from CLI arguments or environment variables. The
/// identity values default to 1 so a bare invocation works out of the box;
/// production deployments are expected to set `DATACENTER_ID` and
/// `MACHINE_ID` per instance.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "floe",
    version,
    about = "Generate 64-bit time-ordered Snowflake IDs"
)]
pub struct CliArgs {
    /// Datacenter identity encoded into every generated ID (0..=31).
    ///
    /// Environment variable: `DATACENTER_ID`
    #[arg(long, env = "DATACENTER_ID", default_value_t = 1)]
    pub datacenter_id: u64,

    /// Machine identity encoded into every generated ID (0..=31).
    ///
    /// Environment variable: `MACHINE_ID`
    #[arg(long, env = "MACHINE_ID", default_value_t = 1)]
    pub machine_id: u64,

    /// Number of IDs to generate and print.
    ///
    /// Environment variable: `COUNT`
    #[arg(long, env = "COUNT", default_value_t = 1)]
    pub count: usize,

    /// Custom epoch in milliseconds since the Unix epoch.
    ///
    /// Defaults to the library's built-in epoch (2025-01-01T00:00:00Z) when
    /// absent.
    ///
    /// Environment variable: `EPOCH_MS`
    #[arg(long, env = "EPOCH_MS")]
    pub epoch_ms: Option<u64>,
}

impl CliArgs {
    /// Returns the configured epoch, if any, as a [`Duration`] since
    /// 1970-01-01 UTC.
    pub fn epoch(&self) -> Option<Duration> {
        self.epoch_ms.map(Duration::from_millis)
    }
}
