use crate::service::numeric;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The objective the service minimizes: f(x) = x^2 + 5x + 10.
fn objective(x: f64) -> f64 {
    x * x + 5.0 * x + 10.0
}

/// The curve the service integrates: f(x) = x^2.
fn integrand(x: f64) -> f64 {
    x * x
}

#[derive(Debug, Deserialize)]
pub struct OptimizationRequest {
    pub initial_value: f64,
}

#[derive(Debug, Serialize)]
pub struct OptimizationResponse {
    pub optimal_value: f64,
}

#[derive(Debug, Deserialize)]
pub struct IntegrationRequest {
    pub lower_limit: f64,
    pub upper_limit: f64,
}

#[derive(Debug, Serialize)]
pub struct IntegrationResponse {
    pub area_under_curve: f64,
    pub error_estimate: f64,
}

#[derive(Debug, Deserialize)]
pub struct StatisticsRequest {
    pub data: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub mean: f64,
    pub variance: f64,
}

pub async fn optimize(req: web::Json<OptimizationRequest>) -> impl Responder {
    if !req.initial_value.is_finite() {
        return HttpResponse::BadRequest().json(json!({
            "error": "initial_value must be finite"
        }));
    }
    let optimal_value = numeric::minimize(objective, req.initial_value);
    HttpResponse::Ok().json(OptimizationResponse { optimal_value })
}

pub async fn integrate(req: web::Json<IntegrationRequest>) -> impl Responder {
    if !req.lower_limit.is_finite() || !req.upper_limit.is_finite() {
        return HttpResponse::BadRequest().json(json!({
            "error": "integration limits must be finite"
        }));
    }
    let (area_under_curve, error_estimate) =
        numeric::quad(&integrand, req.lower_limit, req.upper_limit);
    HttpResponse::Ok().json(IntegrationResponse {
        area_under_curve,
        error_estimate,
    })
}

pub async fn statistics(req: web::Json<StatisticsRequest>) -> impl Responder {
    if req.data.iter().any(|x| !x.is_finite()) {
        return HttpResponse::BadRequest().json(json!({
            "error": "data must contain only finite values"
        }));
    }
    match numeric::describe(&req.data) {
        Some((mean, variance)) => HttpResponse::Ok().json(StatisticsResponse { mean, variance }),
        None => HttpResponse::BadRequest().json(json!({
            "error": "data must contain at least two points"
        })),
    }
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": VERSION
    }))
}
