//! Derived comfort quantities computed from decoded measurements.
//!
//! Dewpoint uses the Magnus approximation; the heat index follows the NWS
//! regression with its published adjustment terms. Out-of-domain inputs
//! yield `None` rather than a numeric sentinel, so "not applicable" can
//! never leak into downstream arithmetic.

const MAGNUS_C1: f64 = 243.04;
const MAGNUS_C2: f64 = 17.625;

/// Dewpoint in degrees C from dry-bulb temperature (degrees C) and
/// relative humidity (0..=100).
///
/// Humidity is clamped into [1 %, 100 %] before the logarithm, so the
/// result is defined for every input; readings above 100 % clamp down.
pub fn dewpoint(temperature_c: f64, humidity_pct: f64) -> f64 {
    let h = (humidity_pct / 100.0).clamp(0.01, 1.0);
    let lnh = h.ln();
    let scaled = temperature_c * MAGNUS_C2 / (temperature_c + MAGNUS_C1);
    MAGNUS_C1 * (lnh + scaled) / (MAGNUS_C2 - lnh - scaled)
}

/// NWS heat index in degrees F from dry-bulb temperature (degrees F) and
/// relative humidity (0..=100).
///
/// `None` when the inputs fall outside the validated reference range. The
/// domain check rounds the temperature half-up, but every formula below
/// uses the unrounded value; the reference tables were validated against
/// exactly this behavior.
pub fn heat_index(temperature_f: f64, humidity_pct: f64) -> Option<f64> {
    let t = temperature_f;
    let rh = humidity_pct;

    let rounded = (t + 0.5).floor();
    if !(76.0..=126.0).contains(&rounded) {
        return None;
    }
    if !(0.0..=100.0).contains(&rh) {
        return None;
    }

    let easy = 0.5 * (t + 61.0 + (t - 68.0) * 1.2 + rh * 0.094);
    if easy + t < 160.0 {
        return Some(easy);
    }

    let t2 = t * t;
    let rh2 = rh * rh;
    let mut result = -42.379
        + 2.04901523 * t
        + 10.14333127 * rh
        + -0.22475541 * t * rh
        + -0.00683783 * t2
        + -0.05481717 * rh2
        + 0.00122874 * t2 * rh
        + 0.00085282 * t * rh2
        + -0.00000199 * t2 * rh2;

    // published adjustments for the dry and humid corners of the table
    if rh < 13.0 && (80.0..=112.0).contains(&t) {
        result -= (13.0 - rh) / 4.0 * ((17.0 - (t - 95.0).abs()) / 17.0).sqrt();
    } else if rh > 85.0 && (80.0..=87.0).contains(&t) {
        result += (rh - 85.0) / 10.0 * ((87.0 - t) / 5.0);
    }

    // the reference tables stop near 183; past that the regression is
    // unvouched
    if result >= 183.5 { None } else { Some(result) }
}

/// Heat index converted to degrees C; `None` passes through.
pub fn heat_index_celsius(temperature_f: f64, humidity_pct: f64) -> Option<f64> {
    heat_index(temperature_f, humidity_pct).map(|value| (value - 32.0) * 5.0 / 9.0)
}

#[cfg(test)]
mod tests {
    use super::{dewpoint, heat_index, heat_index_celsius};

    #[test]
    fn dewpoint_reference_point() {
        let value = dewpoint(20.0, 50.0);
        assert!((value - 9.3).abs() < 0.1, "dewpoint was {value}");
    }

    #[test]
    fn dewpoint_saturated_air_tracks_temperature() {
        let value = dewpoint(20.0, 100.0);
        assert!((value - 20.0).abs() < 1e-9, "dewpoint was {value}");
    }

    #[test]
    fn dewpoint_clamps_dry_air() {
        let value = dewpoint(20.0, 0.0);
        assert!(value.is_finite());
        assert!((value - -38.0).abs() < 0.1, "dewpoint was {value}");
        // above-full-scale humidity clamps to 100 %
        assert_eq!(dewpoint(20.0, 120.0), dewpoint(20.0, 100.0));
    }

    #[test]
    fn heat_index_easy_formula_at_lower_bound() {
        let value = heat_index(76.0, 50.0).expect("in domain");
        let easy = 0.5 * (76.0 + 61.0 + (76.0 - 68.0) * 1.2 + 50.0 * 0.094);
        assert!((value - easy).abs() < 1e-12);
        assert!((value - 75.65).abs() < 1e-9);
    }

    #[test]
    fn heat_index_domain_bounds() {
        assert!(heat_index(130.0, 50.0).is_none());
        assert!(heat_index(130.0, 0.0).is_none());
        assert!(heat_index(70.0, 50.0).is_none());
        assert!(heat_index(76.0, -1.0).is_none());
        assert!(heat_index(76.0, 100.5).is_none());
    }

    #[test]
    fn heat_index_rounds_half_up_for_domain_check() {
        assert!(heat_index(75.4, 50.0).is_none());
        assert!(heat_index(75.5, 50.0).is_some());
    }

    #[test]
    fn heat_index_regression_matches_reference_chart() {
        // NWS chart: 96 F at 65 % is about 121 F
        let value = heat_index(96.0, 65.0).expect("in domain");
        assert!((value - 121.0).abs() < 0.5, "heat index was {value}");
    }

    #[test]
    fn heat_index_dry_adjustment() {
        let value = heat_index(90.0, 10.0).expect("in domain");
        assert!((value - 85.3).abs() < 0.2, "heat index was {value}");
    }

    #[test]
    fn heat_index_humid_adjustment() {
        let value = heat_index(82.0, 90.0).expect("in domain");
        assert!((value - 92.0).abs() < 0.5, "heat index was {value}");
    }

    #[test]
    fn heat_index_rejects_unvouched_extremes() {
        // far corner of the table where the regression exceeds 183.5
        assert!(heat_index(126.0, 95.0).is_none());
    }

    #[test]
    fn heat_index_celsius_converts_defined_results() {
        let fahrenheit = heat_index(96.0, 65.0).unwrap();
        let celsius = heat_index_celsius(96.0, 65.0).unwrap();
        assert!((celsius - (fahrenheit - 32.0) * 5.0 / 9.0).abs() < 1e-12);
        assert!(heat_index_celsius(70.0, 50.0).is_none());
    }
}
