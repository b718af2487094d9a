use crate::built_in::{
    bale_density::BaleDensityCalculator, baler_sizing::BalerSizingCalculator, roi::RoiCalculator,
    shredder_power::ShredderPowerCalculator, throughput_capacity::ThroughputCapacityCalculator,
};
use crate::plugin::CalculationResult;
use crate::plugin_manager::PluginManager;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name and one-line description of a registered calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorInfo {
    pub name: String,
    pub description: String,
}

pub struct Calculator {
    plugin_manager: PluginManager,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        let mut plugin_manager = PluginManager::new();
        plugin_manager.register(Box::new(BaleDensityCalculator));
        plugin_manager.register(Box::new(RoiCalculator));
        plugin_manager.register(Box::new(BalerSizingCalculator));
        plugin_manager.register(Box::new(ShredderPowerCalculator));
        plugin_manager.register(Box::new(ThroughputCapacityCalculator));
        Self { plugin_manager }
    }

    pub fn contains(&self, calculator_name: &str) -> bool {
        self.plugin_manager.get(calculator_name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugin_manager.iter().map(|plugin| plugin.name()).collect()
    }

    pub fn describe(&self) -> Vec<CalculatorInfo> {
        self.plugin_manager
            .iter()
            .map(|plugin| CalculatorInfo {
                name: plugin.name().to_string(),
                description: plugin.description().to_string(),
            })
            .collect()
    }

    /// The default input record of a calculator.
    pub fn defaults(&self, calculator_name: &str) -> Result<Value> {
        match self.plugin_manager.get(calculator_name) {
            Some(plugin) => plugin.defaults(),
            None => Err(anyhow!("calculator '{calculator_name}' not found")),
        }
    }

    pub fn calculate(&self, calculator_name: &str, fields: &Map<String, Value>) -> CalculationResult {
        if let Some(plugin) = self.plugin_manager.get(calculator_name) {
            plugin.calculate(fields)
        } else {
            Err(anyhow!("calculator '{calculator_name}' not found"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_all_five_calculators_in_name_order() {
        let calculator = Calculator::new();
        assert_eq!(
            calculator.names(),
            vec![
                "bale_density",
                "baler_sizing",
                "roi",
                "shredder_power",
                "throughput_capacity"
            ]
        );
    }

    #[test]
    fn unknown_calculator_is_an_error() {
        let calculator = Calculator::new();
        assert!(!calculator.contains("kiln_temperature"));
        let err = calculator.calculate("kiln_temperature", &Map::new()).unwrap_err();
        assert_eq!(err.to_string(), "calculator 'kiln_temperature' not found");
        assert!(calculator.defaults("kiln_temperature").is_err());
    }

    #[test]
    fn empty_fields_calculate_from_defaults() {
        let calculator = Calculator::new();
        for name in calculator.names() {
            let estimate = calculator.calculate(name, &Map::new()).unwrap();
            assert_eq!(estimate.calculator, name);
            assert_eq!(estimate.inputs, calculator.defaults(name).unwrap());
            assert!(estimate.result.get("status").is_some(), "{name} reports a status");
        }
    }
}
