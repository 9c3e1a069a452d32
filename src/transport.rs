//! Transport cost estimator.
//!
//! Independent of the record store and the aggregation engine.

use crate::config;
use crate::error::{AgriMarketError, Result};
use crate::validation::parse_non_negative;

/// Estimates the cost of moving produce by road.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportEstimator {
    /// Base rate in ETB per km used when the caller does not supply one.
    pub rate_per_km: f64,
}

impl Default for TransportEstimator {
    fn default() -> Self {
        Self {
            rate_per_km: config::DEFAULT_RATE_PER_KM,
        }
    }
}

impl TransportEstimator {
    pub fn new(rate_per_km: f64) -> Self {
        Self { rate_per_km }
    }

    /// Estimate using this estimator's default rate.
    pub fn quote(&self, distance_km: f64, weight_kg: Option<f64>) -> Result<f64> {
        estimate(distance_km, self.rate_per_km, weight_kg)
    }

    /// Estimate from raw form strings.
    ///
    /// Distance and rate are both required; a blank rate is rejected like any
    /// other unparsable one. A blank or unparsable weight counts as zero.
    pub fn parse_and_estimate(&self, distance: &str, rate: &str, weight: &str) -> Result<f64> {
        let distance_km = parse_non_negative(distance).ok_or_else(|| {
            AgriMarketError::InvalidTransport(format!("distance '{}'", distance.trim()))
        })?;
        let rate_per_km = parse_non_negative(rate).ok_or_else(|| {
            AgriMarketError::InvalidTransport(format!("rate '{}'", rate.trim()))
        })?;
        let weight_kg = weight.trim().parse::<f64>().ok();
        estimate(distance_km, rate_per_km, weight_kg)
    }
}

/// Transport cost in ETB.
///
/// `distance × rate`, plus 200 ETB for every started 500 kg above 1000 kg,
/// then a 10% surcharge on trips longer than 100 km.
pub fn estimate(distance_km: f64, rate_per_km: f64, weight_kg: Option<f64>) -> Result<f64> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(AgriMarketError::InvalidTransport(format!(
            "distance {}",
            distance_km
        )));
    }
    if !rate_per_km.is_finite() || rate_per_km < 0.0 {
        return Err(AgriMarketError::InvalidTransport(format!(
            "rate {}",
            rate_per_km
        )));
    }
    let weight_kg = weight_kg.filter(|w| w.is_finite()).unwrap_or(0.0);

    let mut cost = distance_km * rate_per_km;

    if weight_kg > config::WEIGHT_SURCHARGE_THRESHOLD_KG {
        let steps = ((weight_kg - config::WEIGHT_SURCHARGE_THRESHOLD_KG)
            / config::WEIGHT_SURCHARGE_STEP_KG)
            .ceil();
        cost += steps * config::WEIGHT_SURCHARGE_PER_STEP;
    }

    if distance_km > config::LONG_DISTANCE_THRESHOLD_KM {
        cost *= config::LONG_DISTANCE_MULTIPLIER;
    }

    Ok(cost)
}
