//! Transport estimator tests.

use agrimarket::transport::estimate;
use agrimarket::{AgriMarket, AgriMarketError, TransportEstimator};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn short_light_trip_is_distance_times_rate() {
    assert!(close(estimate(40.0, 5.0, None).unwrap(), 200.0));
    assert!(close(estimate(40.0, 5.0, Some(1000.0)).unwrap(), 200.0));
}

#[test]
fn heavy_load_adds_surcharge_per_started_500kg() {
    // 1001 kg starts one step, 1500 kg is exactly one, 1800 kg starts two
    assert!(close(estimate(10.0, 5.0, Some(1001.0)).unwrap(), 250.0));
    assert!(close(estimate(10.0, 5.0, Some(1500.0)).unwrap(), 250.0));
    assert!(close(estimate(10.0, 5.0, Some(1800.0)).unwrap(), 450.0));
}

#[test]
fn long_trip_multiplies_after_surcharge() {
    assert!(close(estimate(100.0, 5.0, None).unwrap(), 500.0));
    assert!(close(estimate(120.0, 5.0, None).unwrap(), 660.0));
    // (120 * 5 + 2 * 200) * 1.1
    assert!(close(estimate(120.0, 5.0, Some(1800.0)).unwrap(), 1100.0));
}

#[test]
fn zero_distance_is_allowed() {
    assert!(close(estimate(0.0, 5.0, None).unwrap(), 0.0));
}

#[test]
fn negative_or_non_finite_inputs_are_rejected() {
    for (distance, rate) in [(-1.0, 5.0), (10.0, -0.5), (f64::NAN, 5.0), (10.0, f64::INFINITY)] {
        let err = estimate(distance, rate, None).unwrap_err();
        assert!(matches!(err, AgriMarketError::InvalidTransport(_)));
    }
}

#[test]
fn parse_and_estimate_ignores_bad_weight() {
    let estimator = TransportEstimator::default();
    assert!(close(estimator.parse_and_estimate("40", "5", "").unwrap(), 200.0));
    assert!(close(estimator.parse_and_estimate("40", "2", "heavy").unwrap(), 80.0));
    assert!(close(estimator.parse_and_estimate(" 40 ", "2", "2000").unwrap(), 480.0));
}

#[test]
fn parse_and_estimate_rejects_bad_distance_and_rate() {
    let estimator = TransportEstimator::default();
    assert!(matches!(
        estimator.parse_and_estimate("far", "5", ""),
        Err(AgriMarketError::InvalidTransport(_))
    ));
    assert!(matches!(
        estimator.parse_and_estimate("10", "-5", ""),
        Err(AgriMarketError::InvalidTransport(_))
    ));
}

#[test]
fn parse_and_estimate_requires_a_rate() {
    let estimator = TransportEstimator::default();
    for rate in ["", "   ", "fast"] {
        let err = estimator.parse_and_estimate("40", rate, "").unwrap_err();
        assert!(
            matches!(err, AgriMarketError::InvalidTransport(_)),
            "rate {:?} should be rejected, got {:?}",
            rate,
            err
        );
    }
}

#[test]
fn context_estimator_uses_configured_rate() {
    let market = AgriMarket::builder().in_memory().rate_per_km(7.0).build().unwrap();
    assert!(close(market.transport().quote(10.0, None).unwrap(), 70.0));
}
