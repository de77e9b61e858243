//! AWS Lambda handler for mortgage payment options and schedules
//!
//! Accepts a loan as JSON and returns the six payment options, a frequency
//! comparison and (optionally) the full schedules.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};
use mortgage_calculator::{
    Frequency, FrequencyComparison, LoanAnalysis, MortgageError, PartialLoanConfig, PaymentSet, ScheduleSet,
};
use serde::{Deserialize, Serialize};

/// Input loan and output options
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub principal: f64,

    /// Quoted annual rate in percent (e.g. 5.0 for 5%)
    pub quoted_rate: f64,

    pub amortization_years: u32,

    pub term_years: f64,

    /// Frequency labels to schedule (default: all six)
    #[serde(default)]
    pub frequencies: Option<Vec<String>>,

    /// Whether to return every schedule row (default: true)
    #[serde(default = "default_include_schedules")]
    pub include_schedules: bool,
}

fn default_include_schedules() -> bool { true }

/// Output from the calculation
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub payments: PaymentSet,
    pub effective_annual_rate_pct: f64,
    pub comparison: FrequencyComparison,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedules: Option<ScheduleSet>,
    pub execution_time_ms: u64,
}

fn parse_frequencies(labels: Option<&[String]>) -> Result<Vec<Frequency>, MortgageError> {
    match labels {
        None => Ok(Frequency::ALL.to_vec()),
        Some(labels) => labels.iter().map(|l| l.parse()).collect(),
    }
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    let body = serde_json::json!({ "error": message });
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(body.to_string()))
        .unwrap()
}

fn json_response(body: &ScheduleResponse) -> Response<Body> {
    let text = match serde_json::to_string(body) {
        Ok(text) => text,
        Err(e) => return error_response(500, &format!("Failed to serialize response: {}", e)),
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(text))
        .unwrap()
}

/// Compute the response for a parsed request
fn calculate(request: ScheduleRequest) -> Result<ScheduleResponse, MortgageError> {
    let start = std::time::Instant::now();
    let frequencies = parse_frequencies(request.frequencies.as_deref())?;

    let config = PartialLoanConfig {
        principal: Some(request.principal),
        quoted_rate: Some(request.quoted_rate),
        amortization_years: Some(request.amortization_years),
        term_years: Some(request.term_years),
    }
    .resolve()?;
    let analysis = LoanAnalysis::run_selected(&config, &frequencies);
    let effective_annual_rate_pct = config.engine().effective_annual_rate() * 100.0;

    info!(
        "Calculated {} schedules for principal={:.2} rate={}% amortization={}y term={}y",
        analysis.schedules.len(),
        config.principal,
        config.quoted_rate,
        config.amortization_years,
        config.term_years
    );

    Ok(ScheduleResponse {
        payments: analysis.payments,
        effective_annual_rate_pct,
        comparison: analysis.comparison,
        schedules: request.include_schedules.then_some(analysis.schedules),
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ScheduleRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            warn!("Rejected request: {}", e);
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    match calculate(request) {
        Ok(response) => Ok(json_response(&response)),
        Err(e) => {
            warn!("Rejected request: {}", e);
            Ok(error_response(400, &e.to_string()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> ScheduleRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_calculate_all_frequencies() {
        let response = calculate(request(
            r#"{"principal": 300000, "quoted_rate": 5, "amortization_years": 25, "term_years": 5}"#,
        ))
        .unwrap();

        assert_eq!(response.payments.monthly, 1744.81);
        assert_eq!(response.comparison.lines.len(), 6);
        assert_eq!(response.schedules.as_ref().map(|s| s.len()), Some(6));
    }

    #[test]
    fn test_selected_frequencies_without_rows() {
        let response = calculate(request(
            r#"{"principal": 300000, "quoted_rate": 5, "amortization_years": 25, "term_years": 5,
                "frequencies": ["Weekly", "Rapid Weekly"], "include_schedules": false}"#,
        ))
        .unwrap();

        assert!(response.schedules.is_none());
        let listed: Vec<Frequency> = response.comparison.lines.iter().map(|l| l.frequency).collect();
        assert_eq!(listed, vec![Frequency::Weekly, Frequency::RapidWeekly]);
    }

    #[test]
    fn test_unknown_frequency_rejected() {
        let err = calculate(request(
            r#"{"principal": 1000, "quoted_rate": 5, "amortization_years": 1, "term_years": 1,
                "frequencies": ["Monthly", "Quarterly"]}"#,
        ))
        .unwrap_err();

        assert_eq!(err.to_string(), "Invalid frequency: Quarterly");
    }

    fn post(body: &str) -> Request {
        let mut event = Request::new(Body::Text(body.to_string()));
        *event.method_mut() = lambda_http::http::Method::POST;
        event
    }

    fn body_json(response: &Response<Body>) -> serde_json::Value {
        match response.body() {
            Body::Text(text) => serde_json::from_str(text).unwrap(),
            other => panic!("expected text body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_handler_success() {
        let response = handler(post(
            r#"{"principal": 100000, "quoted_rate": 6, "amortization_years": 1, "term_years": 1}"#,
        ))
        .await
        .unwrap();

        assert_eq!(response.status(), 200);
        let json = body_json(&response);
        assert_eq!(json["payments"]["Monthly"], 8603.26);
        assert_eq!(json["schedules"]["Monthly"]["rows"][0]["Period"], 1);
    }

    #[tokio::test]
    async fn test_handler_malformed_json() {
        let response = handler(post(r#"{"principal": "#)).await.unwrap();

        assert_eq!(response.status(), 400);
        let json = body_json(&response);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_handler_unknown_frequency() {
        let response = handler(post(
            r#"{"principal": 1000, "quoted_rate": 5, "amortization_years": 1, "term_years": 1,
                "frequencies": ["Quarterly"]}"#,
        ))
        .await
        .unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(body_json(&response)["error"], "Invalid frequency: Quarterly");
    }

    #[tokio::test]
    async fn test_handler_zero_amortization() {
        let response = handler(post(
            r#"{"principal": 1000, "quoted_rate": 5, "amortization_years": 0, "term_years": 1}"#,
        ))
        .await
        .unwrap();

        assert_eq!(response.status(), 400);
        assert!(body_json(&response)["error"].as_str().unwrap().contains("amortization_years"));
    }

    #[tokio::test]
    async fn test_handler_preflight() {
        let mut event = Request::new(Body::Empty);
        *event.method_mut() = lambda_http::http::Method::OPTIONS;

        let response = handler(event).await.unwrap();
        assert_eq!(response.status(), 200);
        assert!(matches!(response.body(), Body::Empty));
        assert_eq!(response.headers()["Access-Control-Allow-Methods"], "POST, OPTIONS");
    }
}
