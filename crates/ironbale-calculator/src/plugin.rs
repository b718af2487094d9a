use crate::FieldReader;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type CalculationResult = Result<Estimate>;

/// Coerced inputs and derived result of a single estimator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub calculator: String,
    pub inputs: Value,
    pub result: Value,
}

/// A calculator input record: a fixed set of named fields with documented defaults.
pub trait CalculatorInput: Default + Serialize {
    /// Builds the record from raw form fields, coercing bad entries to defaults.
    fn from_fields(reader: &FieldReader<'_>) -> Self;

    /// Restores every field to its default.
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A typed estimator: a pure function from an input record to a result record.
pub trait Estimator: Send + Sync {
    type Input: CalculatorInput;
    type Output: Serialize;

    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn estimate(&self, input: &Self::Input) -> Self::Output;
}

/// Object-safe face of an estimator, driven by raw form fields.
pub trait EstimatorPlugin: Send + Sync {
    /// The name of the calculator.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// The default input record as JSON.
    fn defaults(&self) -> Result<Value>;

    /// Coerces `fields` and runs the estimate.
    fn calculate(&self, fields: &Map<String, Value>) -> CalculationResult;
}

impl<E: Estimator> EstimatorPlugin for E {
    fn name(&self) -> &str {
        E::NAME
    }

    fn description(&self) -> &str {
        E::DESCRIPTION
    }

    fn defaults(&self) -> Result<Value> {
        Ok(serde_json::to_value(E::Input::default())?)
    }

    fn calculate(&self, fields: &Map<String, Value>) -> CalculationResult {
        let input = E::Input::from_fields(&FieldReader::new(fields));
        let output = self.estimate(&input);
        Ok(Estimate {
            calculator: E::NAME.to_string(),
            inputs: serde_json::to_value(&input)?,
            result: serde_json::to_value(&output)?,
        })
    }
}
