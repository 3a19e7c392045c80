use serde::{Deserialize, Serialize};

/// Noise parameters of the two fused channels.
///
/// Both values are variances (σ²). Zero means the channel is perfectly
/// trusted; negative values are a contract violation and produce a
/// statistically meaningless filter.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Variance of the vertical acceleration input, (m/s²)²
    pub q_accel: f32,
    /// Default variance of the altitude measurement, m²
    pub r_altitude: f32,
}

impl Default for NoiseConfig {
    /// Typical MEMS accelerometer feeding a barometric altitude channel.
    fn default() -> Self {
        Self {
            q_accel: 0.04,
            r_altitude: 1.0,
        }
    }
}

/// Snapshot of the current state estimate, the shape downstream control and
/// telemetry consume.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateEstimate {
    /// m, positive up
    pub altitude: f32,
    /// m/s, positive up
    pub vertical_velocity: f32,
}
