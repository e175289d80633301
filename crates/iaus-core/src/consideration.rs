//! Considerations: single scoring inputs.
//!
//! A consideration reads one piece of domain state (hunger, distance to a
//! threat, ammo left) as a raw scalar and shapes it through its own
//! [`ResponseCurve`] into a normalized score.

use std::fmt;

use crate::curve::ResponseCurve;

/// A single scoring input normalized to `[0.0, 1.0]`.
///
/// Implementors supply [`raw_value`](Consideration::raw_value); the default
/// [`calculate`](Consideration::calculate) passes it through the curve.
/// Calculation must not have side effects: it may run any number of times
/// per tick.
pub trait Consideration {
    /// Human readable name (Hunger, Fatigue, ...)
    fn name(&self) -> &str;

    /// The curve used to normalize the raw value.
    fn curve(&self) -> &ResponseCurve;

    /// The domain value before normalization, nominally in `[0.0, 1.0]`.
    fn raw_value(&self) -> f64;

    /// Normalized score for the current state.
    fn calculate(&self) -> f64 {
        self.curve().compute(self.raw_value())
    }
}

impl fmt::Debug for dyn Consideration + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consideration")
            .field("name", &self.name())
            .field("curve", self.curve())
            .finish()
    }
}

/// Scores the ratio of two quantities, e.g. current over maximum health.
///
/// A zero denominator produces a non-finite ratio, which the curve
/// sanitizes to 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioConsideration {
    name: String,
    numerator: f64,
    denominator: f64,
    curve: ResponseCurve,
}

impl RatioConsideration {
    /// Creates a ratio consideration normalized through [`ResponseCurve::LINEAR`].
    pub fn new(name: impl Into<String>, numerator: f64, denominator: f64) -> Self {
        Self {
            name: name.into(),
            numerator,
            denominator,
            curve: ResponseCurve::LINEAR,
        }
    }

    /// Replaces the normalizing curve.
    pub fn with_curve(mut self, curve: ResponseCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Updates both quantities.
    pub fn set(&mut self, numerator: f64, denominator: f64) {
        self.numerator = numerator;
        self.denominator = denominator;
    }
}

impl Consideration for RatioConsideration {
    fn name(&self) -> &str {
        &self.name
    }

    fn curve(&self) -> &ResponseCurve {
        &self.curve
    }

    fn raw_value(&self) -> f64 {
        self.numerator / self.denominator
    }
}

/// A consideration whose raw value comes from a closure.
///
/// Handy for wiring a consideration to shared agent state without a
/// dedicated type.
pub struct FnConsideration<F> {
    name: String,
    curve: ResponseCurve,
    raw: F,
}

impl<F> FnConsideration<F>
where
    F: Fn() -> f64,
{
    pub fn new(name: impl Into<String>, curve: ResponseCurve, raw: F) -> Self {
        Self {
            name: name.into(),
            curve,
            raw,
        }
    }
}

impl<F> Consideration for FnConsideration<F>
where
    F: Fn() -> f64,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn curve(&self) -> &ResponseCurve {
        &self.curve
    }

    fn raw_value(&self) -> f64 {
        (self.raw)()
    }
}

impl<F> fmt::Debug for FnConsideration<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConsideration")
            .field("name", &self.name)
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}
