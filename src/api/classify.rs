//! HTTP status classification for the Google APIs.

use serde::Deserialize;

use crate::error::{UpstreamError, UpstreamKind};

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: String,
}

/// Map a non-success response onto an upstream error kind.
///
/// 403 is ambiguous on these APIs: the `reason` of the first error detail
/// distinguishes rate limits and quotas from real permission failures.
pub fn classify_status(status: u16, body: &str) -> UpstreamError {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let reason = envelope
        .error
        .errors
        .first()
        .map(|d| d.reason.as_str())
        .unwrap_or("");

    let kind = match status {
        429 => UpstreamKind::RateLimited,
        403 => match reason {
            "rateLimitExceeded" | "userRateLimitExceeded" => UpstreamKind::RateLimited,
            "quotaExceeded" | "dailyLimitExceeded" => UpstreamKind::QuotaExhausted,
            _ => UpstreamKind::Forbidden,
        },
        401 => UpstreamKind::Unauthorized,
        404 => UpstreamKind::NotFound,
        409 => UpstreamKind::AlreadyExists,
        408 => UpstreamKind::Timeout,
        500..=599 => UpstreamKind::Server,
        _ => UpstreamKind::BadRequest,
    };

    let message = if envelope.error.message.is_empty() {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            format!("HTTP {status}")
        } else {
            trimmed.chars().take(200).collect()
        }
    } else {
        envelope.error.message
    };

    UpstreamError::new(kind, message).with_status(status)
}
