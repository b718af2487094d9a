//! Baler sizing
//!
//! Picks the smallest baler model whose tier covers the material-adjusted
//! hourly throughput and reports how heavily that model would be loaded.

use serde::{Deserialize, Serialize};

use crate::FieldReader;
use crate::bands::{Bands, CapacityStatus, LOAD_LABELS};
use crate::materials::Material;
use crate::plugin::{CalculatorInput, Estimator};

/// Bale chamber volume shared by the whole HB range, m³.
const STANDARD_BALE_VOLUME_M3: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalerModel {
    pub name: &'static str,
    pub press_force_tons: f64,
    pub cycle_time_seconds: f64,
    pub rated_capacity_tph: f64,
    pub motor_power_kw: f64,
}

pub const HB_300: BalerModel = BalerModel {
    name: "HB-300",
    press_force_tons: 300.0,
    cycle_time_seconds: 45.0,
    rated_capacity_tph: 6.0,
    motor_power_kw: 22.0,
};

pub const HB_500: BalerModel = BalerModel {
    name: "HB-500",
    press_force_tons: 500.0,
    cycle_time_seconds: 40.0,
    rated_capacity_tph: 12.0,
    motor_power_kw: 37.0,
};

pub const HB_800: BalerModel = BalerModel {
    name: "HB-800",
    press_force_tons: 800.0,
    cycle_time_seconds: 35.0,
    rated_capacity_tph: 24.0,
    motor_power_kw: 55.0,
};

pub const HB_1200: BalerModel = BalerModel {
    name: "HB-1200",
    press_force_tons: 1200.0,
    cycle_time_seconds: 30.0,
    rated_capacity_tph: 40.0,
    motor_power_kw: 90.0,
};

/// Adjusted throughput tiers, t/h.
const MODEL_TIERS: Bands<'static, BalerModel> =
    Bands::new(&[5.0, 10.0, 20.0], &[HB_300, HB_500, HB_800, HB_1200]);

/// Utilization of the selected model's rated capacity, %.
const STATUS_BANDS: Bands<'static, CapacityStatus> = Bands::new(&[60.0, 85.0, 100.0], &LOAD_LABELS);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalerSizingInput {
    pub material: Material,
    pub daily_volume_tons: f64,
    pub operating_hours: f64,
}

impl Default for BalerSizingInput {
    fn default() -> Self {
        Self { material: Material::Cardboard, daily_volume_tons: 40.0, operating_hours: 8.0 }
    }
}

impl CalculatorInput for BalerSizingInput {
    fn from_fields(reader: &FieldReader<'_>) -> Self {
        let d = Self::default();
        Self {
            material: reader.choice("material", d.material),
            daily_volume_tons: reader.number("daily_volume_tons", d.daily_volume_tons, 0.1..=2000.0),
            operating_hours: reader.number("operating_hours", d.operating_hours, 1.0..=24.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalerSizingResult {
    pub hourly_throughput_tph: f64,
    pub adjusted_throughput_tph: f64,
    pub recommended_model: String,
    pub press_force_tons: f64,
    pub cycle_time_seconds: f64,
    pub rated_capacity_tph: f64,
    pub motor_power_kw: f64,
    pub bales_per_hour: f64,
    pub bale_weight_tons: f64,
    pub bales_per_day: u32,
    pub utilization_percent: f64,
    pub status: CapacityStatus,
}

pub fn calculate(input: &BalerSizingInput) -> BalerSizingResult {
    let profile = input.material.profile();
    let hourly_throughput_tph = input.daily_volume_tons / input.operating_hours;
    let adjusted_throughput_tph = hourly_throughput_tph * profile.baling_factor;

    let model = MODEL_TIERS.classify(adjusted_throughput_tph);
    let bale_weight_tons = profile.max_bale_density * STANDARD_BALE_VOLUME_M3;
    let utilization_percent = adjusted_throughput_tph / model.rated_capacity_tph * 100.0;

    BalerSizingResult {
        hourly_throughput_tph,
        adjusted_throughput_tph,
        recommended_model: model.name.to_string(),
        press_force_tons: model.press_force_tons,
        cycle_time_seconds: model.cycle_time_seconds,
        rated_capacity_tph: model.rated_capacity_tph,
        motor_power_kw: model.motor_power_kw,
        bales_per_hour: 3600.0 / model.cycle_time_seconds,
        bale_weight_tons,
        bales_per_day: (input.daily_volume_tons / bale_weight_tons).ceil() as u32,
        utilization_percent,
        status: STATUS_BANDS.classify(utilization_percent),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BalerSizingCalculator;

impl Estimator for BalerSizingCalculator {
    type Input = BalerSizingInput;
    type Output = BalerSizingResult;

    const NAME: &'static str = "baler_sizing";
    const DESCRIPTION: &'static str = "Recommended HB baler model for a daily material volume";

    fn estimate(&self, input: &Self::Input) -> Self::Output {
        calculate(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly(tph: f64) -> BalerSizingInput {
        BalerSizingInput {
            material: Material::Cardboard,
            daily_volume_tons: tph,
            operating_hours: 1.0,
        }
    }

    #[test]
    fn five_tonnes_per_hour_selects_hb_300() {
        let result = calculate(&BalerSizingInput::default());
        assert_eq!(result.adjusted_throughput_tph, 5.0);
        assert_eq!(result.recommended_model, "HB-300");
        assert_eq!(result.press_force_tons, 300.0);
        assert_eq!(result.cycle_time_seconds, 45.0);
        assert_eq!(result.bales_per_hour, 80.0);
    }

    #[test]
    fn tier_boundaries_are_upper_inclusive() {
        assert_eq!(calculate(&hourly(5.0)).press_force_tons, 300.0);
        assert_eq!(calculate(&hourly(5.01)).press_force_tons, 500.0);
        assert_eq!(calculate(&hourly(10.0)).press_force_tons, 500.0);
        assert_eq!(calculate(&hourly(10.01)).press_force_tons, 800.0);
        assert_eq!(calculate(&hourly(20.0)).press_force_tons, 800.0);
        assert_eq!(calculate(&hourly(20.01)).press_force_tons, 1200.0);
    }

    #[test]
    fn material_factor_scales_throughput() {
        // 5 t/h of steel scrap counts as 8 t/h
        let input = BalerSizingInput {
            material: Material::SteelScrap,
            daily_volume_tons: 40.0,
            operating_hours: 8.0,
        };
        let result = calculate(&input);
        assert!((result.adjusted_throughput_tph - 8.0).abs() < 1e-9);
        assert_eq!(result.recommended_model, "HB-500");
        assert_eq!(result.status, CapacityStatus::Acceptable);
    }

    #[test]
    fn utilization_status() {
        assert_eq!(calculate(&hourly(2.0)).status, CapacityStatus::Oversized);
        assert_eq!(calculate(&BalerSizingInput::default()).status, CapacityStatus::Acceptable);
        assert_eq!(calculate(&hourly(36.0)).status, CapacityStatus::Optimal);
        assert_eq!(calculate(&hourly(50.0)).status, CapacityStatus::Undersized);
    }

    #[test]
    fn bale_count_from_standard_bale() {
        let result = calculate(&BalerSizingInput::default());
        assert_eq!(result.bale_weight_tons, 0.50 * 1.1);
        assert_eq!(result.bales_per_day, 73);
    }
}
