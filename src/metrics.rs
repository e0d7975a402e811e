use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Installs the Prometheus recorder and spawns its upkeep task.
///
/// Returns `None` when observability is disabled or the recorder could not be
/// installed; the service keeps running without metrics in both cases.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
        )
        .and_then(|builder| builder.install_recorder());

    let handle = match handle {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

/// Feature area of a request path: `/api/grades/3` is `grades`, anything
/// outside `/api` is `root`.
fn api_area(path: &str) -> &str {
    path.strip_prefix("/api/")
        .and_then(|rest| rest.split('/').find(|segment| !segment.is_empty()))
        .unwrap_or("root")
}

/// Records per-route request counts and latency. Routes are labelled by their
/// matched pattern (`/api/students/{id}`) to keep label cardinality bounded.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or("unmatched", MatchedPath::as_str)
        .to_owned();
    let area = api_area(&route).to_owned();

    let response = next.run(req).await;
    let status = response.status();

    counter!(
        "registrar_requests_total",
        "area" => area.clone(),
        "method" => method.clone(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "area" => area, "method" => method, "route" => route)
        .record(start.elapsed().as_secs_f64());

    if status.is_server_error() {
        counter!("registrar_server_errors_total").increment(1);
    }

    response
}

/// Router exposing the Prometheus scrape endpoint.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Business metrics

pub fn track_account_registered(role: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("accounts_registered_total", "role" => role.to_string()).increment(1);
}

pub fn track_login_success(role: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("logins_total", "role" => role.to_string(), "status" => "success").increment(1);
}

pub fn track_login_failure(reason: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("logins_total", "role" => "unknown", "status" => "failure", "reason" => reason.to_string()).increment(1);
}

pub fn track_account_status_change(account: &str, activated: bool) {
    if !is_observability_enabled() {
        return;
    }
    let status = if activated { "activated" } else { "deactivated" };
    counter!("account_status_changes_total", "account" => account.to_string(), "status" => status)
        .increment(1);
}

/// Enrollment attempts, labelled by outcome.
pub fn track_enrollment(success: bool) {
    if !is_observability_enabled() {
        return;
    }
    let status = if success { "success" } else { "failure" };
    counter!("course_enrollments_total", "status" => status).increment(1);
}

pub fn track_registration_review(decision: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("registration_reviews_total", "decision" => decision.to_string()).increment(1);
}

pub fn track_grade_recorded(letter: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("grades_recorded_total", "letter_grade" => letter.to_string()).increment(1);
}

pub fn track_attendance_marked(status: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("attendance_marked_total", "status" => status.to_string()).increment(1);
}

pub fn track_wallet_top_up(amount: i64) {
    if !is_observability_enabled() {
        return;
    }
    counter!("wallet_top_ups_total").increment(1);
    counter!("wallet_top_up_amount_total").increment(amount.max(0) as u64);
}

pub fn track_jwt_issued() {
    if !is_observability_enabled() {
        return;
    }
    counter!("jwt_tokens_issued_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_area() {
        assert_eq!(api_area("/api/grades/{id}"), "grades");
        assert_eq!(api_area("/api/registrations/student/{id}/status/{status}"), "registrations");
        assert_eq!(api_area("/health"), "root");
        assert_eq!(api_area("unmatched"), "root");
    }
}
