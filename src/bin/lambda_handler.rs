//! AWS Lambda handler for property analysis
//!
//! Accepts an `AnalysisRequest` as the JSON body of a Lambda Function URL
//! request and returns the full analysis (cash flow, affordability,
//! scenarios, 30-year projection and ROI milestones).

use aws_lambda_events::lambda_function_urls::LambdaFunctionUrlRequest;
use chrono::{DateTime, Utc};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use rental_analysis::{analyze, AnalysisRequest, PropertyAnalysis};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub generated_at: DateTime<Utc>,
    pub analysis: PropertyAnalysis,
    pub execution_time_ms: u64,
}

fn http_response(status: u16, body: String) -> Value {
    json!({
        "statusCode": status,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Methods": "POST, OPTIONS",
            "Access-Control-Allow-Headers": "Content-Type"
        },
        "body": body,
    })
}

fn error_response(status: u16, message: &str) -> Value {
    warn!("request rejected ({}): {}", status, message);
    http_response(status, json!({ "error": message }).to_string())
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<Value, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    // CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return Ok(http_response(200, String::new()));
    }

    if request.is_base64_encoded {
        return Ok(error_response(400, "Binary request bodies are not supported"));
    }

    let body = request.body.unwrap_or_default();
    let analysis_request: AnalysisRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let analysis = match analyze(&analysis_request) {
        Ok(a) => a,
        Err(e) => {
            return Ok(error_response(400, &e.to_string()));
        }
    };

    let response = AnalysisResponse {
        generated_at: Utc::now(),
        analysis,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "analyzed {} in {} ms",
        response.analysis.address, response.execution_time_ms
    );

    Ok(http_response(200, serde_json::to_string(&response)?))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
