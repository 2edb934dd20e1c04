//! Turns a pipeline [`Outcome`] into an HTTP response.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use chrono::{DateTime, Utc};
use pinned::{Outcome, PipelineError};
use pinned_models::RateLimitStatus;

pub const RATE_LIMIT_LIMIT: &str = "X-RateLimit-Limit";
pub const RATE_LIMIT_REMAINING: &str = "X-RateLimit-Remaining";
pub const RATE_LIMIT_RESET: &str = "X-RateLimit-Reset";
pub const RETRY_AFTER: &str = "Retry-After";

const OPAQUE_UPSTREAM_MESSAGE: &str = "upstream request failed";

/// Format as an RFC 1123 HTTP-date, e.g. `Wed, 01 Jan 2025 01:00:00 GMT`.
#[must_use]
pub fn format_http_date(instant: DateTime<Utc>) -> String {
    instant.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[must_use]
pub fn status_code(error: &PipelineError) -> StatusCode {
    match error {
        PipelineError::Validation(_) => StatusCode::BAD_REQUEST,
        PipelineError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        PipelineError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[must_use]
pub fn emit(outcome: Outcome, opaque_errors: bool) -> HttpResponse {
    let quota = outcome.reported_quota();

    match outcome.result {
        Ok(repositories) => {
            let mut response = HttpResponse::Ok();
            insert_quota_headers(&mut response, quota);
            response.json(repositories)
        }
        Err(e) => {
            let mut response = HttpResponse::build(status_code(&e));
            insert_quota_headers(&mut response, quota);

            let body = match &e {
                PipelineError::RateLimited(status) => {
                    response.insert_header((RETRY_AFTER, format_http_date(status.reset_at)));
                    e.to_string()
                }
                PipelineError::Upstream(upstream) => {
                    log::error!("Upstream failure: {upstream}");
                    if opaque_errors {
                        OPAQUE_UPSTREAM_MESSAGE.to_string()
                    } else {
                        e.to_string()
                    }
                }
                PipelineError::Validation(_) => e.to_string(),
            };

            response.content_type("text/plain; charset=utf-8").body(body)
        }
    }
}

fn insert_quota_headers(
    response: &mut actix_web::HttpResponseBuilder,
    quota: Option<RateLimitStatus>,
) {
    if let Some(quota) = quota {
        response
            .insert_header((RATE_LIMIT_LIMIT, quota.limit.to_string()))
            .insert_header((RATE_LIMIT_REMAINING, quota.remaining.to_string()))
            .insert_header((RATE_LIMIT_RESET, format_http_date(quota.reset_at)));
    }
}
