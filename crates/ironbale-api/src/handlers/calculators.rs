use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::types::{CalculationResponse, CalculatorListResponse};

#[utoipa::path(
    get,
    path = "/calculators",
    responses((status = 200, description = "Registered calculators", body = CalculatorListResponse)),
    tag = "calculators"
)]
pub async fn list_calculators(State(state): State<Arc<AppState>>) -> Json<CalculatorListResponse> {
    let calculators = state.calculator.describe().into_iter().map(Into::into).collect();
    Json(CalculatorListResponse { calculators })
}

#[utoipa::path(
    get,
    path = "/calculators/{name}/defaults",
    params(("name" = String, Path, description = "Calculator name")),
    responses(
        (status = 200, description = "Default input record as a JSON object"),
        (status = 404, description = "Unknown calculator", body = crate::error::ApiErrorResponse)
    ),
    tag = "calculators"
)]
pub async fn calculator_defaults(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Value>> {
    ensure_known(&state, &name)?;
    Ok(Json(state.calculator.defaults(&name)?))
}

/// Body: raw form fields as a JSON object. Bad or missing entries fall back
/// to defaults.
#[utoipa::path(
    post,
    path = "/calculators/{name}",
    params(("name" = String, Path, description = "Calculator name")),
    responses(
        (status = 200, description = "Coerced inputs and result", body = CalculationResponse),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Unknown calculator", body = crate::error::ApiErrorResponse)
    ),
    tag = "calculators"
)]
pub async fn run_calculator(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<CalculationResponse>> {
    let fields = form_fields(body)?;
    let estimate = calculate(&state, &name, &fields)?;
    Ok(Json(estimate))
}

pub(crate) fn ensure_known(state: &AppState, name: &str) -> ApiResult<()> {
    if state.calculator.contains(name) {
        Ok(())
    } else {
        Err(ApiError::not_found(format!("calculator '{name}'")))
    }
}

pub(crate) fn calculate(
    state: &AppState,
    name: &str,
    fields: &Map<String, Value>,
) -> ApiResult<CalculationResponse> {
    ensure_known(state, name)?;
    let estimate = state.calculator.calculate(name, fields)?;
    debug!(calculator = name, fields = fields.len(), "Estimate computed");
    Ok(estimate.into())
}

/// A JSON object of form fields; `null` counts as an empty form.
fn form_fields(body: Value) -> ApiResult<Map<String, Value>> {
    match body {
        Value::Object(fields) => Ok(fields),
        Value::Null => Ok(Map::new()),
        _ => Err(ApiError::validation("request body must be a JSON object of form fields")),
    }
}
