//! ROI and payback estimator for an equipment purchase.
//!
//! Net annual profit is revenue minus the four operating cost lines. Payback,
//! ROI, NPV and an approximate IRR are all derived from that single figure,
//! assumed constant over the project life.

use serde::{Deserialize, Serialize};

use crate::FieldReader;
use crate::bands::Bands;
use crate::plugin::{CalculatorInput, Estimator};

const MONEY_RANGE: std::ops::RangeInclusive<f64> = 0.0..=1_000_000_000.0;

/// IRR is approximated by scanning 0.0% to 100.0% in 0.1% steps.
const IRR_SCAN_STEPS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaybackStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Payback period in years.
const STATUS_BANDS: Bands<'static, PaybackStatus> = Bands::new(
    &[2.0, 4.0, 6.0],
    &[PaybackStatus::Excellent, PaybackStatus::Good, PaybackStatus::Fair, PaybackStatus::Poor],
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiInput {
    pub equipment_cost: f64,
    pub installation_cost: f64,
    pub annual_revenue: f64,
    pub labor_cost: f64,
    pub maintenance_cost: f64,
    pub energy_cost: f64,
    pub other_costs: f64,
    pub discount_rate_percent: f64,
    pub project_life_years: u32,
}

impl Default for RoiInput {
    fn default() -> Self {
        Self {
            equipment_cost: 500_000.0,
            installation_cost: 50_000.0,
            annual_revenue: 800_000.0,
            labor_cost: 300_000.0,
            maintenance_cost: 75_000.0,
            energy_cost: 150_000.0,
            other_costs: 50_000.0,
            discount_rate_percent: 8.0,
            project_life_years: 10,
        }
    }
}

impl CalculatorInput for RoiInput {
    fn from_fields(reader: &FieldReader<'_>) -> Self {
        let d = Self::default();
        Self {
            equipment_cost: reader.number("equipment_cost", d.equipment_cost, MONEY_RANGE),
            installation_cost: reader.number("installation_cost", d.installation_cost, MONEY_RANGE),
            annual_revenue: reader.number("annual_revenue", d.annual_revenue, MONEY_RANGE),
            labor_cost: reader.number("labor_cost", d.labor_cost, MONEY_RANGE),
            maintenance_cost: reader.number("maintenance_cost", d.maintenance_cost, MONEY_RANGE),
            energy_cost: reader.number("energy_cost", d.energy_cost, MONEY_RANGE),
            other_costs: reader.number("other_costs", d.other_costs, MONEY_RANGE),
            discount_rate_percent: reader.number(
                "discount_rate_percent",
                d.discount_rate_percent,
                0.0..=100.0,
            ),
            project_life_years: reader.whole("project_life_years", d.project_life_years, 1..=50),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub total_investment: f64,
    pub total_operating_costs: f64,
    pub net_annual_profit: f64,
    /// `None` when the project never pays back.
    pub payback_years: Option<f64>,
    pub annual_roi_percent: f64,
    pub lifetime_roi_percent: f64,
    pub npv: f64,
    pub irr_percent: Option<f64>,
    pub status: PaybackStatus,
}

pub fn calculate(input: &RoiInput) -> RoiResult {
    let total_investment = input.equipment_cost + input.installation_cost;
    let total_operating_costs =
        input.labor_cost + input.maintenance_cost + input.energy_cost + input.other_costs;
    let net_annual_profit = input.annual_revenue - total_operating_costs;
    let life = input.project_life_years;

    let payback_years =
        (net_annual_profit > 0.0).then(|| total_investment / net_annual_profit);

    let (annual_roi_percent, lifetime_roi_percent) = if total_investment > 0.0 {
        (
            net_annual_profit / total_investment * 100.0,
            (net_annual_profit * f64::from(life) - total_investment) / total_investment * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    let status = match payback_years {
        Some(years) => STATUS_BANDS.classify(years),
        None => PaybackStatus::Poor,
    };

    RoiResult {
        total_investment,
        total_operating_costs,
        net_annual_profit,
        payback_years,
        annual_roi_percent,
        lifetime_roi_percent,
        npv: npv(total_investment, net_annual_profit, life, input.discount_rate_percent),
        irr_percent: irr_scan(total_investment, net_annual_profit, life),
        status,
    }
}

/// Net present value of a level annual cash flow after an up-front investment.
pub fn npv(investment: f64, annual_cash_flow: f64, years: u32, rate_percent: f64) -> f64 {
    let rate = rate_percent / 100.0;
    (1..=years).fold(-investment, |acc, year| {
        acc + annual_cash_flow / (1.0 + rate).powi(year as i32)
    })
}

/// The scanned rate whose NPV lies closest to zero.
fn irr_scan(investment: f64, annual_cash_flow: f64, years: u32) -> Option<f64> {
    if annual_cash_flow <= 0.0 {
        return None;
    }
    (0..=IRR_SCAN_STEPS)
        .map(|step| f64::from(step) / 10.0)
        .map(|rate| (rate, npv(investment, annual_cash_flow, years, rate).abs()))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(rate, _)| rate)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RoiCalculator;

impl Estimator for RoiCalculator {
    type Input = RoiInput;
    type Output = RoiResult;

    const NAME: &'static str = "roi";
    const DESCRIPTION: &'static str = "Payback period, ROI, NPV and IRR of an equipment purchase";

    fn estimate(&self, input: &Self::Input) -> Self::Output {
        calculate(input)
    }
}
