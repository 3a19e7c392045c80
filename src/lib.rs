//! Linear Kalman filter core estimating vertical altitude and velocity from a
//! continuous acceleration signal and intermittent absolute altitude fixes.

// only use std when feature = "std" is enabled or during testing
#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod fmt;

mod config;
mod estimator;
mod variance;

pub use config::{NoiseConfig, StateEstimate};
pub use estimator::AltitudeEstimator;
pub use variance::VarianceEstimator;

#[cfg(test)]
mod tests;
