use crate::{AltitudeEstimator, NoiseConfig, VarianceEstimator};
#[cfg(feature = "log")]
use log::LevelFilter;

pub fn init_logger() {
    #[cfg(feature = "log")]
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .filter(Some("altitude_estimator_core"), LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// Deterministic uniform noise in [-amplitude, amplitude]; a uniform source
/// of amplitude A has variance A²/3.
struct NoiseGen {
    state: u64,
}

impl NoiseGen {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self, amplitude: f32) -> f32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let unit = (self.state >> 40) as f32 / (1u64 << 24) as f32;
        (2.0 * unit - 1.0) * amplitude
    }
}

const DT: f32 = 0.01; // 100 Hz control tick
const UPDATE_EVERY: usize = 10; // altitude fixes at 10 Hz
const ACC_NOISE_AMP: f32 = 0.35; // σ² ≈ 0.041
const BARO_NOISE_AMP: f32 = 0.87; // σ² ≈ 0.252

/// Full pipeline: characterize both channels during a stationary hold, then
/// fly a powered ascent / coast / descent profile and check the fused
/// estimate tracks truth despite the 10x slower altitude channel.
#[test]
fn synthetic_flight() {
    init_logger();
    let mut noise = NoiseGen::new(0x5EED);

    // 5 s stationary hold
    let mut acc_stats = VarianceEstimator::new();
    let mut baro_stats = VarianceEstimator::new();
    for _ in 0..500 {
        acc_stats.update(noise.next(ACC_NOISE_AMP));
        baro_stats.update(noise.next(BARO_NOISE_AMP));
    }
    let config = NoiseConfig {
        q_accel: acc_stats.variance().unwrap(),
        r_altitude: baro_stats.variance().unwrap(),
    };
    log_info!("measured noise config: {:?}", config);
    assert!(config.q_accel > 0.02 && config.q_accel < 0.07);
    assert!(config.r_altitude > 0.12 && config.r_altitude < 0.45);

    let mut kf = AltitudeEstimator::with_config(&config);

    // 5 s powered ascent at 8 m/s² net, then coast through apogee (~9.1 s)
    // into descent; truth uses the same piecewise-constant kinematics
    let mut h_true = 0.0f32;
    let mut v_true = 0.0f32;
    let total_ticks = 1100;
    let mut window_h_err = Vec::new();
    let mut window_v_err = Vec::new();

    for tick in 0..total_ticks {
        let t = tick as f32 * DT;
        let a_true = if t < 5.0 { 8.0 } else { -9.81 };

        h_true += v_true * DT + 0.5 * a_true * DT * DT;
        v_true += a_true * DT;

        kf.propagate(a_true + noise.next(ACC_NOISE_AMP), DT);
        if tick % UPDATE_EVERY == 0 {
            kf.update(h_true + noise.next(BARO_NOISE_AMP));
        }

        if tick >= total_ticks - 200 {
            window_h_err.push((kf.h() - h_true).abs());
            window_v_err.push((kf.v() - v_true).abs());
        }
    }

    let mean = |v: &[f32]| v.iter().sum::<f32>() / v.len() as f32;
    let max = |v: &[f32]| v.iter().fold(0.0f32, |a, &b| a.max(b));
    log_info!(
        "last 2 s: altitude err mean {} max {}, velocity err mean {} max {}",
        mean(&window_h_err),
        max(&window_h_err),
        mean(&window_v_err),
        max(&window_v_err),
    );

    assert!(mean(&window_h_err) < 0.5);
    assert!(max(&window_h_err) < 1.5);
    assert!(mean(&window_v_err) < 0.5);
    assert!(max(&window_v_err) < 1.5);

    // fused uncertainty settles well below a single baro fix's variance
    assert!(kf.altitude_variance() > 0.0);
    assert!(kf.altitude_variance() < config.r_altitude);
}
