//! Configuration for a shutdown run

use std::path::PathBuf;

/// Configuration for one shutdown sweep.
#[derive(Debug, Clone, Default)]
pub struct StopConfig {
    /// AWS region; `None` falls back to the SDK's default region chain
    /// (environment, profile, IMDS).
    pub region: Option<String>,

    /// Cap on concurrent stop commands per fan-out. `None` launches every
    /// command immediately; set this when provider rate limits bite.
    pub max_in_flight: Option<usize>,

    /// Write the final report as JSON to this path.
    pub output: Option<PathBuf>,
}
