use ironbale_calculator::built_in::bale_density::{self, BaleDensityInput};
use ironbale_calculator::built_in::baler_sizing::{self, BalerSizingInput};
use ironbale_calculator::built_in::roi::{self, RoiInput};
use ironbale_calculator::built_in::shredder_power::{FeedType, ShredderPowerInput};
use ironbale_calculator::built_in::throughput_capacity::{ShiftPattern, ThroughputCapacityInput};
use ironbale_calculator::{Calculator, CalculatorInput, Material};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn fields(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn calculate(name: &str, inputs: Value) -> Value {
    Calculator::new().calculate(name, &fields(inputs)).unwrap().result
}

#[test]
fn roi_defaults_through_registry() {
    let result = calculate("roi", json!({}));
    assert_eq!(result["net_annual_profit"], json!(225_000.0));
    let payback = result["payback_years"].as_f64().unwrap();
    assert!((payback - 2.444_444).abs() < 1e-5);
    assert_eq!(result["status"], json!("good"));
}

#[test]
fn roi_form_strings_are_coerced() {
    let result = calculate(
        "roi",
        json!({ "equipment_cost": "400000", "annual_revenue": "not a number" }),
    );
    assert_eq!(result["total_investment"], json!(450_000.0));
    assert_eq!(result["net_annual_profit"], json!(225_000.0));
}

#[test]
fn baler_sizing_crosses_every_tier() {
    let cases = [
        (5.0, "HB-300", 45.0),
        (5.5, "HB-500", 40.0),
        (10.0, "HB-500", 40.0),
        (10.5, "HB-800", 35.0),
        (20.0, "HB-800", 35.0),
        (20.5, "HB-1200", 30.0),
    ];
    for (tph, model, cycle) in cases {
        let result = calculate(
            "baler_sizing",
            json!({ "material": "cardboard", "daily_volume_tons": tph, "operating_hours": 1 }),
        );
        assert_eq!(result["recommended_model"], json!(model), "{tph} t/h");
        assert_eq!(result["cycle_time_seconds"], json!(cycle), "{tph} t/h");
    }
}

#[test]
fn out_of_range_inputs_fall_back_to_defaults() {
    let estimate = Calculator::new()
        .calculate(
            "shredder_power",
            &fields(json!({ "motor_efficiency_percent": 180, "feed_type": "frozen" })),
        )
        .unwrap();
    assert_eq!(estimate.inputs["motor_efficiency_percent"], json!(92.0));
    assert_eq!(estimate.inputs["feed_type"], json!("loose"));
}

#[test]
fn enum_fields_are_read() {
    let estimate = Calculator::new()
        .calculate(
            "throughput_capacity",
            &fields(json!({ "shift_pattern": "triple", "material": "steel_scrap" })),
        )
        .unwrap();
    assert_eq!(estimate.inputs["shift_pattern"], json!("triple"));
    assert_eq!(estimate.result["daily_hours"], json!(24.0));
    assert_eq!(estimate.result["material_factor"], json!(1.0));
}

#[test]
fn reset_restores_documented_defaults() {
    let mut density = BaleDensityInput { current_density: 0.1, ..Default::default() };
    density.reset();
    assert_eq!(density.current_density, 0.35);
    assert_eq!(density.press_force_tons, 150.0);
    assert_eq!(density, BaleDensityInput::default());

    let mut roi_input = RoiInput { equipment_cost: 1.0, project_life_years: 3, ..Default::default() };
    roi_input.reset();
    assert_eq!(roi_input.equipment_cost, 500_000.0);
    assert_eq!(roi_input.installation_cost, 50_000.0);
    assert_eq!(roi_input.annual_revenue, 800_000.0);
    assert_eq!(roi_input.project_life_years, 10);

    let mut sizing = BalerSizingInput { material: Material::Tires, ..Default::default() };
    sizing.reset();
    assert_eq!(sizing, BalerSizingInput::default());

    let mut shredder = ShredderPowerInput { feed_type: FeedType::Bulky, ..Default::default() };
    shredder.reset();
    assert_eq!(shredder, ShredderPowerInput::default());

    let mut capacity =
        ThroughputCapacityInput { shift_pattern: ShiftPattern::Single, ..Default::default() };
    capacity.reset();
    assert_eq!(capacity, ThroughputCapacityInput::default());
}

#[test]
fn defaults_endpoint_matches_default_records() {
    let calculator = Calculator::new();
    assert_eq!(
        calculator.defaults("roi").unwrap(),
        serde_json::to_value(RoiInput::default()).unwrap()
    );
    assert_eq!(
        calculator.defaults("bale_density").unwrap(),
        serde_json::to_value(BaleDensityInput::default()).unwrap()
    );
}

fn material() -> impl Strategy<Value = Material> {
    prop::sample::select(Material::ALL.to_vec())
}

proptest! {
    #[test]
    fn optimal_density_never_below_current(
        material in material(),
        current in 0.01f64..3.0,
        force in 10.0f64..3000.0,
    ) {
        let input = BaleDensityInput {
            material,
            current_density: current,
            press_force_tons: force,
            ..BaleDensityInput::default()
        };
        let result = bale_density::calculate(&input);
        prop_assert!(result.optimal_density >= current);
        let expected = ((result.optimal_density - current) / current * 100.0).round() as i64;
        prop_assert_eq!(result.density_increase_percent, expected);
    }

    #[test]
    fn baler_force_never_decreases_with_throughput(a in 0.1f64..2000.0, b in 0.1f64..2000.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let sized = |tons: f64| {
            baler_sizing::calculate(&BalerSizingInput {
                daily_volume_tons: tons,
                ..BalerSizingInput::default()
            })
            .press_force_tons
        };
        prop_assert!(sized(low) <= sized(high));
    }

    #[test]
    fn payback_matches_investment_over_profit(
        equipment in 1.0f64..5_000_000.0,
        revenue in 600_000.0f64..5_000_000.0,
    ) {
        let input = RoiInput { equipment_cost: equipment, annual_revenue: revenue, ..RoiInput::default() };
        let result = roi::calculate(&input);
        let payback = result.payback_years.unwrap();
        prop_assert!((payback - (equipment + 50_000.0) / (revenue - 575_000.0)).abs() < 1e-9 * payback.max(1.0));
    }
}
