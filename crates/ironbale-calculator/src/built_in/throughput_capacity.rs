//! Throughput capacity planner
//!
//! Converts a line's rated capacity into effective daily and annual capacity
//! and compares it with the customer's daily demand.

use serde::{Deserialize, Serialize};

use crate::FieldReader;
use crate::bands::{Bands, CapacityStatus, LOAD_LABELS};
use crate::materials::Material;
use crate::plugin::{CalculatorInput, Estimator};

// Light materials feed slower; interpolate the feed factor over loose density.
const LIGHT_DENSITY: f64 = 0.03;
const HEAVY_DENSITY: f64 = 0.50;
const LIGHT_FEED_FACTOR: f64 = 0.7;
const HEAVY_FEED_FACTOR: f64 = 1.0;

const MAX_DAILY_HOURS: f64 = 24.0;

/// Demand as % of daily capacity.
const STATUS_BANDS: Bands<'static, CapacityStatus> = Bands::new(&[50.0, 75.0, 100.0], &LOAD_LABELS);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftPattern {
    Single,
    #[default]
    Double,
    Triple,
}

impl ShiftPattern {
    pub fn shifts(self) -> u32 {
        match self {
            ShiftPattern::Single => 1,
            ShiftPattern::Double => 2,
            ShiftPattern::Triple => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputCapacityInput {
    pub material: Material,
    pub rated_capacity_tph: f64,
    pub shift_pattern: ShiftPattern,
    pub hours_per_shift: f64,
    pub availability_percent: f64,
    pub efficiency_percent: f64,
    pub operating_days_per_year: u32,
    pub daily_demand_tons: f64,
}

impl Default for ThroughputCapacityInput {
    fn default() -> Self {
        Self {
            material: Material::Cardboard,
            rated_capacity_tph: 10.0,
            shift_pattern: ShiftPattern::Double,
            hours_per_shift: 8.0,
            availability_percent: 90.0,
            efficiency_percent: 85.0,
            operating_days_per_year: 250,
            daily_demand_tons: 80.0,
        }
    }
}

impl CalculatorInput for ThroughputCapacityInput {
    fn from_fields(reader: &FieldReader<'_>) -> Self {
        let d = Self::default();
        Self {
            material: reader.choice("material", d.material),
            rated_capacity_tph: reader.number(
                "rated_capacity_tph",
                d.rated_capacity_tph,
                0.1..=500.0,
            ),
            shift_pattern: reader.choice("shift_pattern", d.shift_pattern),
            hours_per_shift: reader.number("hours_per_shift", d.hours_per_shift, 1.0..=12.0),
            availability_percent: reader.number(
                "availability_percent",
                d.availability_percent,
                1.0..=100.0,
            ),
            efficiency_percent: reader.number(
                "efficiency_percent",
                d.efficiency_percent,
                1.0..=100.0,
            ),
            operating_days_per_year: reader.whole(
                "operating_days_per_year",
                d.operating_days_per_year,
                1..=366,
            ),
            daily_demand_tons: reader.number(
                "daily_demand_tons",
                d.daily_demand_tons,
                0.0..=20_000.0,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputCapacityResult {
    pub material_factor: f64,
    pub effective_tph: f64,
    pub daily_hours: f64,
    pub daily_capacity_tons: f64,
    pub annual_capacity_tons: f64,
    pub utilization_percent: f64,
    /// Negative when demand exceeds capacity.
    pub spare_capacity_tons: f64,
    pub required_hours_per_day: f64,
    pub status: CapacityStatus,
}

/// Feed factor for a material, linear in loose density and capped at both ends.
pub fn material_factor(material: Material) -> f64 {
    let loose = material.profile().loose_density;
    let t = (loose - LIGHT_DENSITY) / (HEAVY_DENSITY - LIGHT_DENSITY);
    (LIGHT_FEED_FACTOR + t * (HEAVY_FEED_FACTOR - LIGHT_FEED_FACTOR))
        .clamp(LIGHT_FEED_FACTOR, HEAVY_FEED_FACTOR)
}

pub fn calculate(input: &ThroughputCapacityInput) -> ThroughputCapacityResult {
    let material_factor = material_factor(input.material);
    let effective_tph = input.rated_capacity_tph
        * (input.availability_percent / 100.0)
        * (input.efficiency_percent / 100.0)
        * material_factor;

    let daily_hours = (f64::from(input.shift_pattern.shifts()) * input.hours_per_shift)
        .min(MAX_DAILY_HOURS);
    let daily_capacity_tons = effective_tph * daily_hours;
    let utilization_percent = input.daily_demand_tons / daily_capacity_tons * 100.0;

    ThroughputCapacityResult {
        material_factor,
        effective_tph,
        daily_hours,
        daily_capacity_tons,
        annual_capacity_tons: daily_capacity_tons * f64::from(input.operating_days_per_year),
        utilization_percent,
        spare_capacity_tons: daily_capacity_tons - input.daily_demand_tons,
        required_hours_per_day: input.daily_demand_tons / effective_tph,
        status: STATUS_BANDS.classify(utilization_percent),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThroughputCapacityCalculator;

impl Estimator for ThroughputCapacityCalculator {
    type Input = ThroughputCapacityInput;
    type Output = ThroughputCapacityResult;

    const NAME: &'static str = "throughput_capacity";
    const DESCRIPTION: &'static str = "Effective daily and annual capacity against demand";

    fn estimate(&self, input: &Self::Input) -> Self::Output {
        calculate(input)
    }
}
