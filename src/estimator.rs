use nalgebra::{Matrix2, RowVector2, Vector2};

use crate::config::{NoiseConfig, StateEstimate};

/// Classic (linear) Kalman filter for a 1-D altitude + vertical-speed model,
/// driven by an acceleration input.
///
/// State vector  x = [ h, v ]ᵀ  (units: m, m s⁻¹, positive up)
/// Measurement z = absolute altitude (m), from e.g. a barometer or rangefinder
///
/// The acceleration enters the prediction as a control term, so the state
/// transition stays linear:
///
/// ```text
///     hₖ₊₁ = hₖ + vₖ·dt + ½·a·dt²
///     vₖ₊₁ = vₖ          +   a·dt
///
///     F = ⎡1  dt⎤ ,  G = ⎡½dt²⎤ ,  H = ⎡1  0⎤
///         ⎣0   1⎦       ⎣ dt ⎦
/// ```
///
/// White acceleration error of variance `q_accel` maps through G into the
/// state: Q = G·Gᵀ·q_accel. The sensor observes altitude only, never
/// velocity; velocity corrections come through the h/v cross covariance.
///
/// The filter is a plain value: no allocation, no I/O, constant time per
/// call. Interleaving `propagate` and `update` is entirely the caller's
/// choice (propagate once per control tick, update whenever a fix arrives).
/// It is not synchronized; concurrent callers must serialize access.
#[derive(Debug, Clone)]
pub struct AltitudeEstimator {
    /// Current state estimate [h, v]ᵀ
    x: Vector2<f32>,
    /// Estimate covariance
    p: Matrix2<f32>,
    /// Acceleration input variance (σ²)
    q_accel: f32,
    /// Default altitude measurement variance (σ²)
    r_altitude: f32,
}

impl AltitudeEstimator {
    /// Create a filter with scalar process & measurement noise variances.
    ///
    /// The state starts at rest at zero altitude with identity covariance
    /// (unit variance, no cross correlation). Callers wanting a different
    /// prior should run an `update` with their known altitude before trusting
    /// the output.
    pub fn new(q_accel: f32, r_altitude: f32) -> Self {
        Self {
            x: Vector2::zeros(),
            p: Matrix2::identity(),
            q_accel,
            r_altitude,
        }
    }

    pub fn with_config(config: &NoiseConfig) -> Self {
        Self::new(config.q_accel, config.r_altitude)
    }

    /// Predict the state `dt` seconds ahead given the vertical acceleration
    /// over that interval (m/s², positive up, gravity already removed).
    ///
    /// `dt` must be positive; the filter does not check. `dt = 0` leaves the
    /// state and covariance unchanged.
    pub fn propagate(&mut self, acceleration: f32, dt: f32) {
        let f = Matrix2::new(1.0, dt, 0.0, 1.0);
        let g = Vector2::new(0.5 * dt * dt, dt);

        // x̂₋ = F x̂ + G a
        self.x = f * self.x + g * acceleration;

        // P₋ = F P Fᵀ + G Gᵀ q
        self.p = f * self.p * f.transpose() + g * g.transpose() * self.q_accel;
        self.p = 0.5 * (self.p + self.p.transpose()); // keep symmetric
    }

    /// Incorporate an altitude measurement (m) at the default measurement
    /// variance given at construction.
    pub fn update(&mut self, altitude: f32) {
        self.update_with_variance(altitude, self.r_altitude);
    }

    /// Incorporate an altitude measurement (m) with an explicit variance.
    /// Use this when several altitude sources of different precision feed the
    /// same filter.
    pub fn update_with_variance(&mut self, altitude: f32, measurement_variance: f32) {
        // Innovation y = z - H x̂₋
        let y = altitude - self.x[0];

        // Innovation covariance S = H P₋ Hᵀ + R, scalar for this H
        let s = self.p[(0, 0)] + measurement_variance;
        if !(s > 0.0) {
            // the division below poisons the state with inf/NaN; a negative
            // variance or a collapsed covariance got past the caller
            log_warn!("non-positive innovation covariance {}", s);
        }

        // Kalman gain K = P₋ Hᵀ S⁻¹
        let k = Vector2::new(self.p[(0, 0)] / s, self.p[(1, 0)] / s);

        // x̂ = x̂₋ + K y
        self.x += k * y;

        // P = (I - K H) P₋
        let h = RowVector2::new(1.0, 0.0);
        self.p = (Matrix2::identity() - k * h) * self.p;
        self.p = 0.5 * (self.p + self.p.transpose());
    }

    /// Estimated altitude (m, positive up).
    pub fn h(&self) -> f32 {
        self.x[0]
    }

    /// Estimated vertical velocity (m/s, positive up).
    pub fn v(&self) -> f32 {
        self.x[1]
    }

    pub fn altitude_variance(&self) -> f32 {
        self.p[(0, 0)]
    }

    pub fn velocity_variance(&self) -> f32 {
        self.p[(1, 1)]
    }

    pub fn state(&self) -> StateEstimate {
        StateEstimate {
            altitude: self.x[0],
            vertical_velocity: self.x[1],
        }
    }

    /// Replace the acceleration input variance. State and covariance are
    /// untouched; only future `propagate` calls see the new value.
    pub fn set_process_noise(&mut self, q_accel: f32) {
        self.q_accel = q_accel;
    }

    /// Replace the default measurement variance used by
    /// [`update`](Self::update).
    pub fn set_measurement_noise(&mut self, r_altitude: f32) {
        self.r_altitude = r_altitude;
    }
}
