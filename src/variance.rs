use libm::sqrtf;

/// Online mean / variance accumulator for a scalar sensor stream, using
/// Welford's algorithm to avoid catastrophic cancellation.
///
/// Used to characterize a channel's noise before constructing the filter:
/// hold the vehicle still, feed every raw sample, then read `variance()` as
/// the channel's σ² prior.
#[derive(Debug, Clone, Default)]
pub struct VarianceEstimator {
    n: u32,
    mean: f32,
    m2: f32,
}

impl VarianceEstimator {
    pub const fn new() -> Self {
        Self {
            n: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    pub fn update(&mut self, sample: f32) {
        self.n = self.n.saturating_add(1);
        let delta = sample - self.mean;
        self.mean += delta / self.n as f32;
        // second difference uses the updated mean
        self.m2 += delta * (sample - self.mean);
    }

    pub fn count(&self) -> u32 {
        self.n
    }

    pub fn mean(&self) -> f32 {
        self.mean
    }

    /// Population variance (σ²). `None` until the first sample.
    pub fn variance(&self) -> Option<f32> {
        if self.n > 0 {
            Some(self.m2 / self.n as f32)
        } else {
            None
        }
    }

    pub fn stddev(&self) -> Option<f32> {
        self.variance().map(sqrtf)
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
