#![deny(warnings)]
//! Equipment estimators for the Ironbale baler and shredder range.
//!
//! Every estimator is a pure function from a typed input record to a typed
//! result record. Raw form fields are coerced into the input record by
//! [`FieldReader`], so an estimate never fails on bad input: anything missing,
//! non-numeric or out of range falls back to the field's default.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::ops::RangeInclusive;

pub mod bands;
pub mod built_in;
pub mod calculator;
pub mod materials;
pub mod plugin;
pub mod plugin_manager;

pub use bands::{Bands, CapacityStatus};
pub use calculator::{Calculator, CalculatorInfo};
pub use materials::{Material, MaterialProfile};
pub use plugin::{CalculationResult, CalculatorInput, Estimate, Estimator, EstimatorPlugin};

/// Provides a coercing interface for calculators to read raw form fields.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> FieldReader<'a> {
    /// Creates a new `FieldReader`.
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Reads a numeric field.
    ///
    /// JSON numbers and numeric strings are accepted. A missing, unparsable,
    /// non-finite or out-of-range entry yields `default`.
    pub fn number(&self, name: &str, default: f64, range: RangeInclusive<f64>) -> f64 {
        let parsed = match self.fields.get(name) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(value) if value.is_finite() && range.contains(&value) => value,
            _ => default,
        }
    }

    /// Reads a whole-number field; fractional entries are truncated.
    pub fn whole(&self, name: &str, default: u32, range: RangeInclusive<u32>) -> u32 {
        let bounds = f64::from(*range.start())..=f64::from(*range.end());
        self.number(name, f64::from(default), bounds).trunc() as u32
    }

    /// Reads an enumerated field by its snake_case name.
    pub fn choice<T: DeserializeOwned>(&self, name: &str, default: T) -> T {
        self.fields
            .get(name)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or(default)
    }
}

/// Rounds `value` to `places` decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
