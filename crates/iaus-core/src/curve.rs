//! Response curves.
//!
//! A response curve maps a normalized input (nominally 0..=1) onto a
//! normalized score. Every family is parametrized by the same four values:
//! - `slope`: vertical scale (negative values flip the curve)
//! - `exponent`: steepness or power, depending on the family
//! - `x_shift`: horizontal offset
//! - `y_shift`: vertical offset
//!
//! Results are always sanitized into `[0.0, 1.0]`; non-finite values
//! collapse to `0.0`.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The mathematical family a curve belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveType {
    /// Unset family; always evaluates to 0.0
    #[default]
    Unknown,
    Linear,
    Polynomial,
    Logistic,
    Logit,
    Normal,
    Sine,
}

impl CurveType {
    /// Every evaluable family, in declaration order.
    pub const ALL: [CurveType; 6] = [
        CurveType::Linear,
        CurveType::Polynomial,
        CurveType::Logistic,
        CurveType::Logit,
        CurveType::Normal,
        CurveType::Sine,
    ];

    /// Lowercase name as used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            CurveType::Unknown => "unknown",
            CurveType::Linear => "linear",
            CurveType::Polynomial => "polynomial",
            CurveType::Logistic => "logistic",
            CurveType::Logit => "logit",
            CurveType::Normal => "normal",
            CurveType::Sine => "sine",
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a curve type name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown curve type '{0}' (expected linear, polynomial, logistic, logit, normal or sine)")]
pub struct ParseCurveTypeError(pub String);

impl FromStr for CurveType {
    type Err = ParseCurveTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurveType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseCurveTypeError(s.to_string()))
    }
}

/// A parametrized normalized-to-normalized function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseCurve {
    /// Curve family
    #[serde(rename = "type", default)]
    pub curve_type: CurveType,
    #[serde(default)]
    pub slope: f64,
    #[serde(default)]
    pub exponent: f64,
    #[serde(default)]
    pub x_shift: f64,
    #[serde(default)]
    pub y_shift: f64,
}

impl ResponseCurve {
    /// Upward diagonal: `y = x`.
    pub const LINEAR: ResponseCurve = ResponseCurve::new(CurveType::Linear, 1.0, 0.0, 0.0, 0.0);

    /// Downward slope that stays high before dropping off: `y = 1 - x^4`.
    pub const INVERSE_LINEAR: ResponseCurve =
        ResponseCurve::new(CurveType::Polynomial, -1.0, 4.0, 0.0, 1.0);

    pub const fn new(
        curve_type: CurveType,
        slope: f64,
        exponent: f64,
        x_shift: f64,
        y_shift: f64,
    ) -> Self {
        Self {
            curve_type,
            slope,
            exponent,
            x_shift,
            y_shift,
        }
    }

    /// Looks up a built-in preset by name (see [`presets::ALL`]).
    pub fn preset(name: &str) -> Option<ResponseCurve> {
        presets::ALL
            .iter()
            .find(|(preset, _)| *preset == name)
            .map(|(_, curve)| *curve)
    }

    /// Evaluates the curve at `x`. The result is always within `[0.0, 1.0]`.
    pub fn compute(&self, x: f64) -> f64 {
        let Self {
            slope: s,
            exponent: e,
            x_shift: xs,
            y_shift: ys,
            ..
        } = *self;

        let raw = match self.curve_type {
            CurveType::Linear => s * (x - xs) + ys,
            CurveType::Polynomial => s * (x - xs).powf(e) + ys,
            CurveType::Logistic => s / (1.0 + (-10.0 * e * (x - 0.5 - xs)).exp()) + ys,
            CurveType::Logit => s * ((x - xs) / (1.0 - (x - xs))).ln() / 5.0 + 0.5 + ys,
            CurveType::Normal => s * (-30.0 * e * (x - xs - 0.5) * (x - xs - 0.5)).exp() + ys,
            CurveType::Sine => 0.5 * s * (2.0 * PI * (x - xs)).sin() + 0.5 + ys,
            CurveType::Unknown => 0.0,
        };

        sanitize(raw)
    }

    /// Evaluates the curve at `samples` evenly spaced points across `[0, 1]`.
    ///
    /// Returns `(x, y)` pairs, endpoints included.
    pub fn sample(&self, samples: usize) -> Vec<(f64, f64)> {
        match samples {
            0 => Vec::new(),
            1 => vec![(0.0, self.compute(0.0))],
            n => {
                let step = 1.0 / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        let x = i as f64 * step;
                        (x, self.compute(x))
                    })
                    .collect()
            }
        }
    }
}

impl fmt::Display for ResponseCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(slope={}, exponent={}, x_shift={}, y_shift={})",
            self.curve_type, self.slope, self.exponent, self.x_shift, self.y_shift
        )
    }
}

/// Forces a value into `[0.0, 1.0]`.
///
/// Infinities of either sign and NaN become 0.0; the range clamp only
/// applies to finite values.
pub fn sanitize(value: f64) -> f64 {
    if value.is_infinite() || value.is_nan() {
        return 0.0;
    }
    if value < 0.0 {
        return 0.0;
    }
    if value > 1.0 {
        return 1.0;
    }
    value
}

/// Named curve presets.
pub mod presets {
    use super::{CurveType, ResponseCurve};

    pub const CONSTANT: ResponseCurve = ResponseCurve::new(CurveType::Linear, 0.0, 0.0, 0.0, 0.5);
    pub const QUADRIC_LOWER_LEFT: ResponseCurve =
        ResponseCurve::new(CurveType::Polynomial, 1.0, 4.0, 1.0, 0.0);
    pub const QUADRIC_LOWER_RIGHT: ResponseCurve =
        ResponseCurve::new(CurveType::Polynomial, 1.0, 4.0, 0.0, 0.0);
    pub const QUADRIC_UPPER_LEFT: ResponseCurve =
        ResponseCurve::new(CurveType::Polynomial, -1.0, 4.0, 1.0, 1.0);
    pub const QUADRIC_UPPER_RIGHT: ResponseCurve =
        ResponseCurve::new(CurveType::Polynomial, -1.0, 4.0, 0.0, 1.0);
    /// Rises slowly, then sharply near 1.0
    pub const STANDARD_COOLDOWN: ResponseCurve =
        ResponseCurve::new(CurveType::Polynomial, 1.0, 6.0, 0.0, 0.0);
    /// Stays high, then falls sharply near 1.0
    pub const STANDARD_RUNTIME: ResponseCurve =
        ResponseCurve::new(CurveType::Polynomial, -1.0, 6.0, 0.0, 1.0);
    pub const LOGISTIC: ResponseCurve = ResponseCurve::new(CurveType::Logistic, 1.0, 1.0, 0.0, 0.0);
    pub const INVERSE_LOGISTIC: ResponseCurve =
        ResponseCurve::new(CurveType::Logistic, -1.0, 1.0, 0.0, 1.0);
    pub const LOGIT: ResponseCurve = ResponseCurve::new(CurveType::Logit, 1.0, 1.0, 0.0, 0.0);
    pub const INVERSE_LOGIT: ResponseCurve =
        ResponseCurve::new(CurveType::Logit, -1.0, 1.0, 0.0, 0.0);
    pub const BELL: ResponseCurve = ResponseCurve::new(CurveType::Normal, 1.0, 1.0, 0.0, 0.0);
    pub const INVERSE_BELL: ResponseCurve =
        ResponseCurve::new(CurveType::Normal, -1.0, 1.0, 0.0, 1.0);
    pub const SINE: ResponseCurve = ResponseCurve::new(CurveType::Sine, 1.0, 1.0, 0.0, 0.0);
    pub const INVERSE_SINE: ResponseCurve =
        ResponseCurve::new(CurveType::Sine, -1.0, 1.0, 0.0, 0.0);

    /// Every preset with the name it is looked up by.
    pub const ALL: [(&str, ResponseCurve); 17] = [
        ("linear", ResponseCurve::LINEAR),
        ("inverse_linear", ResponseCurve::INVERSE_LINEAR),
        ("constant", CONSTANT),
        ("quadric_lower_left", QUADRIC_LOWER_LEFT),
        ("quadric_lower_right", QUADRIC_LOWER_RIGHT),
        ("quadric_upper_left", QUADRIC_UPPER_LEFT),
        ("quadric_upper_right", QUADRIC_UPPER_RIGHT),
        ("standard_cooldown", STANDARD_COOLDOWN),
        ("standard_runtime", STANDARD_RUNTIME),
        ("logistic", LOGISTIC),
        ("inverse_logistic", INVERSE_LOGISTIC),
        ("logit", LOGIT),
        ("inverse_logit", INVERSE_LOGIT),
        ("bell", BELL),
        ("inverse_bell", INVERSE_BELL),
        ("sine", SINE),
        ("inverse_sine", INVERSE_SINE),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_linear_identity_at_midpoint() {
        let curve = ResponseCurve::new(CurveType::Linear, 1.0, 0.0, 0.0, 0.0);
        assert_eq!(curve.compute(0.5), 0.5);
        assert_eq!(ResponseCurve::LINEAR.compute(0.5), 0.5);
    }

    #[test]
    fn test_inverse_linear_shape() {
        let curve = ResponseCurve::INVERSE_LINEAR;
        assert_eq!(curve.compute(0.0), 1.0);
        assert_eq!(curve.compute(1.0), 0.0);
        // 1 - 0.5^4
        assert!(approx(curve.compute(0.5), 0.9375));
    }

    #[test]
    fn test_polynomial_with_shift() {
        // 0.5 * (0.75 - 0.25)^2 + 0.1 = 0.225
        let curve = ResponseCurve::new(CurveType::Polynomial, 0.5, 2.0, 0.25, 0.1);
        assert!(approx(curve.compute(0.75), 0.225));
    }

    #[test]
    fn test_logistic_midpoint() {
        assert!(approx(presets::LOGISTIC.compute(0.5), 0.5));
        assert!(presets::LOGISTIC.compute(0.9) > 0.95);
        assert!(presets::INVERSE_LOGISTIC.compute(0.9) < 0.05);
    }

    #[test]
    fn test_logit_midpoint_and_poles() {
        assert!(approx(presets::LOGIT.compute(0.5), 0.5));
        // ln(0) = -inf
        assert_eq!(presets::LOGIT.compute(0.0), 0.0);
        // ln(1/0) = +inf, which sanitizes to 0.0, not 1.0
        assert_eq!(presets::LOGIT.compute(1.0), 0.0);
    }

    #[test]
    fn test_normal_peak() {
        assert!(approx(presets::BELL.compute(0.5), 1.0));
        assert!(presets::BELL.compute(0.0) < 0.01);
        assert!(approx(presets::INVERSE_BELL.compute(0.5), 0.0));
    }

    #[test]
    fn test_sine_quarter_points() {
        assert!(approx(presets::SINE.compute(0.0), 0.5));
        assert!(approx(presets::SINE.compute(0.25), 1.0));
        assert!(approx(presets::SINE.compute(0.75), 0.0));
        assert!(approx(presets::INVERSE_SINE.compute(0.25), 0.0));
    }

    #[test]
    fn test_unknown_type_is_zero() {
        let curve = ResponseCurve::new(CurveType::Unknown, 1.0, 1.0, 0.0, 0.5);
        assert_eq!(curve.compute(0.5), 0.0);
    }

    #[test]
    fn test_non_finite_inputs_map_to_zero() {
        let curve = ResponseCurve::LINEAR;
        assert_eq!(curve.compute(f64::NAN), 0.0);
        assert_eq!(curve.compute(f64::INFINITY), 0.0);
        assert_eq!(curve.compute(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let steep = ResponseCurve::new(CurveType::Linear, 2.0, 0.0, 0.0, 0.0);
        assert_eq!(steep.compute(1.0), 1.0);
        assert_eq!(steep.compute(-1.0), 0.0);
    }

    #[test]
    fn test_sanitize_order() {
        assert_eq!(sanitize(f64::INFINITY), 0.0);
        assert_eq!(sanitize(f64::NEG_INFINITY), 0.0);
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(1.5), 1.0);
        assert_eq!(sanitize(-0.5), 0.0);
        assert_eq!(sanitize(0.3), 0.3);
    }

    #[test]
    fn test_negative_base_fractional_power_is_zero() {
        // (-0.5)^0.5 is NaN
        let curve = ResponseCurve::new(CurveType::Polynomial, 1.0, 0.5, 1.0, 0.0);
        assert_eq!(curve.compute(0.5), 0.0);
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(ResponseCurve::preset("linear"), Some(ResponseCurve::LINEAR));
        assert_eq!(
            ResponseCurve::preset("standard_cooldown"),
            Some(presets::STANDARD_COOLDOWN)
        );
        assert_eq!(ResponseCurve::preset("nope"), None);
    }

    #[test]
    fn test_presets_stay_in_range() {
        for (name, curve) in presets::ALL {
            for (x, y) in curve.sample(101) {
                assert!((0.0..=1.0).contains(&y), "{} at {} gave {}", name, x, y);
            }
        }
    }

    #[test]
    fn test_sample_endpoints() {
        let points = ResponseCurve::LINEAR.sample(5);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], (0.0, 0.0));
        assert_eq!(points[2], (0.5, 0.5));
        assert_eq!(points[4], (1.0, 1.0));

        assert!(ResponseCurve::LINEAR.sample(0).is_empty());
        assert_eq!(ResponseCurve::LINEAR.sample(1), vec![(0.0, 0.0)]);
    }

    #[test]
    fn test_curve_type_from_str() {
        assert_eq!("logistic".parse::<CurveType>(), Ok(CurveType::Logistic));
        assert_eq!(" Sine ".parse::<CurveType>(), Ok(CurveType::Sine));
        assert!("unknown".parse::<CurveType>().is_err());
        assert!("cubic".parse::<CurveType>().is_err());
    }

    #[test]
    fn test_curve_serialization() {
        let json = serde_json::to_string(&ResponseCurve::INVERSE_LINEAR).unwrap();
        assert!(json.contains(r#""type":"polynomial""#));

        let parsed: ResponseCurve =
            serde_json::from_str(r#"{"type":"normal","slope":1.0,"exponent":2.0}"#).unwrap();
        assert_eq!(parsed.curve_type, CurveType::Normal);
        assert_eq!(parsed.exponent, 2.0);
        assert_eq!(parsed.x_shift, 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ResponseCurve::LINEAR.to_string(),
            "linear(slope=1, exponent=0, x_shift=0, y_shift=0)"
        );
    }
}
