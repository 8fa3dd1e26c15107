use axum::Json;

use pm_provision::PLANS;

use crate::dto::PlanResponse;

pub async fn list_plans() -> Json<Vec<PlanResponse>> {
    Json(PLANS.iter().map(PlanResponse::from).collect())
}
