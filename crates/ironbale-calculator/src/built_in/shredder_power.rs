//! Shredder power estimator.

use serde::{Deserialize, Serialize};

use crate::FieldReader;
use crate::bands::{Bands, CapacityStatus, LOAD_LABELS};
use crate::materials::Material;
use crate::plugin::{CalculatorInput, Estimator};

const SIZE_FACTOR_EXPONENT: f64 = 0.25;
const MAX_SIZE_FACTOR: f64 = 3.0;
/// Cutting force per millimetre of feed for a material of hardness 1.0, tons.
const CUTTING_FORCE_PER_MM: f64 = 0.08;
const MIN_CUTTING_FORCE_TONS: f64 = 10.0;
const MAX_CUTTING_FORCE_TONS: f64 = 500.0;

/// IEC frame sizes offered on the shredder line, kW.
pub const STANDARD_MOTOR_SIZES_KW: [f64; 14] = [
    55.0, 75.0, 90.0, 110.0, 132.0, 160.0, 200.0, 250.0, 315.0, 400.0, 500.0, 630.0, 800.0, 1000.0,
];

/// Motor load (% of installed power).
const STATUS_BANDS: Bands<'static, CapacityStatus> = Bands::new(&[60.0, 80.0, 100.0], &LOAD_LABELS);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedType {
    #[default]
    Loose,
    Baled,
    Bulky,
}

impl FeedType {
    pub fn power_factor(self) -> f64 {
        match self {
            FeedType::Loose => 1.0,
            FeedType::Baled => 1.25,
            FeedType::Bulky => 1.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShredderPowerInput {
    pub material: Material,
    pub feed_type: FeedType,
    pub throughput_tph: f64,
    pub feed_size_mm: f64,
    pub output_size_mm: f64,
    pub installed_power_kw: f64,
    pub motor_efficiency_percent: f64,
    pub electricity_price_per_kwh: f64,
    pub operating_hours: f64,
}

impl Default for ShredderPowerInput {
    fn default() -> Self {
        Self {
            material: Material::Tires,
            feed_type: FeedType::Loose,
            throughput_tph: 5.0,
            feed_size_mm: 600.0,
            output_size_mm: 50.0,
            installed_power_kw: 315.0,
            motor_efficiency_percent: 92.0,
            electricity_price_per_kwh: 0.12,
            operating_hours: 8.0,
        }
    }
}

impl CalculatorInput for ShredderPowerInput {
    fn from_fields(reader: &FieldReader<'_>) -> Self {
        let d = Self::default();
        Self {
            material: reader.choice("material", d.material),
            feed_type: reader.choice("feed_type", d.feed_type),
            throughput_tph: reader.number("throughput_tph", d.throughput_tph, 0.1..=200.0),
            feed_size_mm: reader.number("feed_size_mm", d.feed_size_mm, 10.0..=3000.0),
            output_size_mm: reader.number("output_size_mm", d.output_size_mm, 1.0..=1000.0),
            installed_power_kw: reader.number(
                "installed_power_kw",
                d.installed_power_kw,
                1.0..=5000.0,
            ),
            motor_efficiency_percent: reader.number(
                "motor_efficiency_percent",
                d.motor_efficiency_percent,
                1.0..=100.0,
            ),
            electricity_price_per_kwh: reader.number(
                "electricity_price_per_kwh",
                d.electricity_price_per_kwh,
                0.0..=10.0,
            ),
            operating_hours: reader.number("operating_hours", d.operating_hours, 1.0..=24.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShredderPowerResult {
    pub reduction_ratio: f64,
    pub size_factor: f64,
    pub shaft_power_kw: f64,
    pub motor_power_kw: f64,
    /// Smallest standard motor covering `motor_power_kw`; `None` beyond the range.
    pub recommended_motor_kw: Option<f64>,
    pub cutting_force_tons: f64,
    pub daily_energy_kwh: f64,
    pub energy_cost_per_ton: f64,
    pub load_percent: f64,
    pub status: CapacityStatus,
}

pub fn calculate(input: &ShredderPowerInput) -> ShredderPowerResult {
    let profile = input.material.profile();

    let reduction_ratio = input.feed_size_mm / input.output_size_mm;
    let size_factor = reduction_ratio.powf(SIZE_FACTOR_EXPONENT).clamp(1.0, MAX_SIZE_FACTOR);

    let shaft_power_kw = input.throughput_tph
        * profile.specific_energy_kwh_per_t
        * size_factor
        * input.feed_type.power_factor();
    let motor_power_kw = shaft_power_kw / (input.motor_efficiency_percent / 100.0);
    let recommended_motor_kw = STANDARD_MOTOR_SIZES_KW
        .iter()
        .copied()
        .find(|&size| size >= motor_power_kw);

    let cutting_force_tons = (profile.hardness * input.feed_size_mm * CUTTING_FORCE_PER_MM)
        .clamp(MIN_CUTTING_FORCE_TONS, MAX_CUTTING_FORCE_TONS);

    let load_percent = motor_power_kw / input.installed_power_kw * 100.0;

    ShredderPowerResult {
        reduction_ratio,
        size_factor,
        shaft_power_kw,
        motor_power_kw,
        recommended_motor_kw,
        cutting_force_tons,
        daily_energy_kwh: motor_power_kw * input.operating_hours,
        energy_cost_per_ton: motor_power_kw * input.electricity_price_per_kwh / input.throughput_tph,
        load_percent,
        status: STATUS_BANDS.classify(load_percent),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ShredderPowerCalculator;

impl Estimator for ShredderPowerCalculator {
    type Input = ShredderPowerInput;
    type Output = ShredderPowerResult;

    const NAME: &'static str = "shredder_power";
    const DESCRIPTION: &'static str = "Drive power and cutting force needed by a shredder";

    fn estimate(&self, input: &Self::Input) -> Self::Output {
        calculate(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fit_a_315_kw_drive() {
        let result = calculate(&ShredderPowerInput::default());
        assert_eq!(result.reduction_ratio, 12.0);
        let expected_shaft = 5.0 * 30.0 * 12.0_f64.powf(0.25);
        assert!((result.shaft_power_kw - expected_shaft).abs() < 1e-9);
        assert_eq!(result.recommended_motor_kw, Some(315.0));
        assert_eq!(result.cutting_force_tons, 96.0);
        assert_eq!(result.status, CapacityStatus::Optimal);
    }

    #[test]
    fn size_factor_is_bounded() {
        let coarse = ShredderPowerInput {
            feed_size_mm: 100.0,
            output_size_mm: 200.0,
            ..ShredderPowerInput::default()
        };
        assert_eq!(calculate(&coarse).size_factor, 1.0);

        let fine = ShredderPowerInput {
            feed_size_mm: 3000.0,
            output_size_mm: 1.0,
            ..ShredderPowerInput::default()
        };
        assert_eq!(calculate(&fine).size_factor, 3.0);
    }

    #[test]
    fn baled_feed_needs_more_power() {
        let loose = calculate(&ShredderPowerInput::default());
        let baled = calculate(&ShredderPowerInput {
            feed_type: FeedType::Baled,
            ..ShredderPowerInput::default()
        });
        assert!((baled.shaft_power_kw / loose.shaft_power_kw - 1.25).abs() < 1e-12);
        assert_eq!(baled.status, CapacityStatus::Undersized);
    }

    #[test]
    fn oversized_drive_and_out_of_range_motor() {
        let light = calculate(&ShredderPowerInput {
            installed_power_kw: 1000.0,
            ..ShredderPowerInput::default()
        });
        assert_eq!(light.status, CapacityStatus::Oversized);

        let heavy = calculate(&ShredderPowerInput {
            material: Material::SteelScrap,
            throughput_tph: 100.0,
            ..ShredderPowerInput::default()
        });
        assert_eq!(heavy.recommended_motor_kw, None);
        assert_eq!(heavy.cutting_force_tons, 120.0);
    }

    #[test]
    fn energy_cost_per_ton() {
        let input = ShredderPowerInput {
            material: Material::Cardboard,
            feed_size_mm: 50.0,
            output_size_mm: 50.0,
            motor_efficiency_percent: 100.0,
            electricity_price_per_kwh: 0.2,
            throughput_tph: 10.0,
            ..ShredderPowerInput::default()
        };
        let result = calculate(&input);
        // 10 t/h x 15 kWh/t = 150 kW
        assert_eq!(result.motor_power_kw, 150.0);
        assert!((result.energy_cost_per_ton - 3.0).abs() < 1e-12);
        assert_eq!(result.daily_energy_kwh, 1200.0);
    }
}
