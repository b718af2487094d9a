//! Bale density optimizer
//!
//! Estimates how dense a bale the customer's press could produce, what that
//! does to bale counts and truck trips, and how much press force the optimum
//! would need.

use serde::{Deserialize, Serialize};

use crate::FieldReader;
use crate::bands::Bands;
use crate::materials::Material;
use crate::plugin::{CalculatorInput, Estimator};

/// Press force at which a baler reaches the material's maximum bale density.
const REFERENCE_PRESS_FORCE_TONS: f64 = 300.0;
const REQUIRED_FORCE_EXPONENT: f64 = 2.5;
const MIN_REQUIRED_FORCE_TONS: f64 = 50.0;
const MAX_REQUIRED_FORCE_TONS: f64 = 1500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityStatus {
    Underpacked,
    Acceptable,
    Optimal,
}

/// Packing efficiency (% of maximum bale density).
const STATUS_BANDS: Bands<'static, DensityStatus> = Bands::new(
    &[70.0, 90.0],
    &[DensityStatus::Underpacked, DensityStatus::Acceptable, DensityStatus::Optimal],
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaleDensityInput {
    pub material: Material,
    /// t/m³
    pub current_density: f64,
    pub bale_volume_m3: f64,
    pub bales_per_day: u32,
    pub press_force_tons: f64,
    pub truck_payload_tons: f64,
    pub truck_volume_m3: f64,
    pub cost_per_trip: f64,
    pub operating_days_per_year: u32,
}

impl Default for BaleDensityInput {
    fn default() -> Self {
        Self {
            material: Material::Cardboard,
            current_density: 0.35,
            bale_volume_m3: 1.2,
            bales_per_day: 40,
            press_force_tons: 150.0,
            truck_payload_tons: 22.0,
            truck_volume_m3: 90.0,
            cost_per_trip: 450.0,
            operating_days_per_year: 250,
        }
    }
}

impl CalculatorInput for BaleDensityInput {
    fn from_fields(reader: &FieldReader<'_>) -> Self {
        let d = Self::default();
        Self {
            material: reader.choice("material", d.material),
            current_density: reader.number("current_density", d.current_density, 0.01..=3.0),
            bale_volume_m3: reader.number("bale_volume_m3", d.bale_volume_m3, 0.1..=10.0),
            bales_per_day: reader.whole("bales_per_day", d.bales_per_day, 1..=10_000),
            press_force_tons: reader.number("press_force_tons", d.press_force_tons, 10.0..=3000.0),
            truck_payload_tons: reader.number("truck_payload_tons", d.truck_payload_tons, 1.0..=60.0),
            truck_volume_m3: reader.number("truck_volume_m3", d.truck_volume_m3, 1.0..=200.0),
            cost_per_trip: reader.number("cost_per_trip", d.cost_per_trip, 0.0..=100_000.0),
            operating_days_per_year: reader.whole(
                "operating_days_per_year",
                d.operating_days_per_year,
                1..=366,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaleDensityResult {
    pub optimal_density: f64,
    pub density_increase_percent: i64,
    pub current_bale_weight_tons: f64,
    pub optimal_bale_weight_tons: f64,
    pub daily_tonnage: f64,
    pub bales_per_day_at_optimal: u32,
    pub current_trips_per_day: u32,
    pub optimal_trips_per_day: u32,
    pub annual_transport_savings: f64,
    pub required_press_force_tons: f64,
    pub packing_efficiency_percent: f64,
    pub status: DensityStatus,
}

pub fn calculate(input: &BaleDensityInput) -> BaleDensityResult {
    let profile = input.material.profile();

    // Density grows with the square root of available force, capped at full force.
    let force_ratio = (input.press_force_tons / REFERENCE_PRESS_FORCE_TONS).clamp(0.0, 1.0);
    let achievable = profile.loose_density
        + (profile.max_bale_density - profile.loose_density) * force_ratio.sqrt();
    let optimal_density = achievable.min(profile.max_bale_density).max(input.current_density);

    let density_increase_percent = if input.current_density > 0.0 {
        ((optimal_density - input.current_density) / input.current_density * 100.0).round() as i64
    } else {
        0
    };

    let current_bale_weight_tons = input.current_density * input.bale_volume_m3;
    let optimal_bale_weight_tons = optimal_density * input.bale_volume_m3;
    let daily_tonnage = current_bale_weight_tons * f64::from(input.bales_per_day);
    let bales_per_day_at_optimal = if optimal_bale_weight_tons > 0.0 {
        (daily_tonnage / optimal_bale_weight_tons).ceil() as u32
    } else {
        input.bales_per_day
    };

    let current_trips_per_day =
        trips_per_day(input.bales_per_day, current_bale_weight_tons, input);
    let optimal_trips_per_day =
        trips_per_day(bales_per_day_at_optimal, optimal_bale_weight_tons, input);
    let annual_transport_savings = f64::from(current_trips_per_day.saturating_sub(optimal_trips_per_day))
        * input.cost_per_trip
        * f64::from(input.operating_days_per_year);

    let required_press_force_tons = (REFERENCE_PRESS_FORCE_TONS
        * (optimal_density / profile.max_bale_density).powf(REQUIRED_FORCE_EXPONENT))
    .clamp(MIN_REQUIRED_FORCE_TONS, MAX_REQUIRED_FORCE_TONS);

    let packing_efficiency_percent = input.current_density / profile.max_bale_density * 100.0;

    BaleDensityResult {
        optimal_density,
        density_increase_percent,
        current_bale_weight_tons,
        optimal_bale_weight_tons,
        daily_tonnage,
        bales_per_day_at_optimal,
        current_trips_per_day,
        optimal_trips_per_day,
        annual_transport_savings,
        required_press_force_tons,
        packing_efficiency_percent,
        status: STATUS_BANDS.classify(packing_efficiency_percent),
    }
}

/// Truck loads are limited by whichever of payload or cargo volume runs out first.
fn trips_per_day(bales: u32, bale_weight_tons: f64, input: &BaleDensityInput) -> u32 {
    let by_weight = if bale_weight_tons > 0.0 {
        (input.truck_payload_tons / bale_weight_tons).floor()
    } else {
        f64::INFINITY
    };
    let by_volume = (input.truck_volume_m3 / input.bale_volume_m3).floor();
    let bales_per_truck = by_weight.min(by_volume).max(1.0);
    (f64::from(bales) / bales_per_truck).ceil() as u32
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BaleDensityCalculator;

impl Estimator for BaleDensityCalculator {
    type Input = BaleDensityInput;
    type Output = BaleDensityResult;

    const NAME: &'static str = "bale_density";
    const DESCRIPTION: &'static str =
        "Optimal bale density, bale count and transport savings for a press";

    fn estimate(&self, input: &Self::Input) -> Self::Output {
        calculate(input)
    }
}
