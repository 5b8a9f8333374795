//! Validation helper functions for the FlowPilot MCP server
//!
//! This module contains the request-layer checks that run before the
//! extractor: input bounds and the optional reference timestamp.

use crate::config::InputLimits;
use crate::error::InputRejected;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use mcp_attr::Result as McpResult;

/// Validate raw input before it reaches the extractor
///
/// # Arguments
/// * `text` - Raw text from the caller
/// * `limits` - Character bounds (inclusive)
///
/// # Returns
/// `Ok(())` or the reason the text was rejected
pub fn validate_input(text: &str, limits: &InputLimits) -> Result<(), InputRejected> {
    let len = text.chars().count();
    if len < limits.min_chars {
        return Err(InputRejected::TooShort {
            len,
            min: limits.min_chars,
        });
    }
    if len > limits.max_chars {
        return Err(InputRejected::TooLong {
            len,
            max: limits.max_chars,
        });
    }
    if !text.chars().any(char::is_alphanumeric) {
        return Err(InputRejected::NoAlphanumeric);
    }
    Ok(())
}

/// Parse a reference timestamp
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD`
/// (midnight).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse and validate the optional `now` parameter
///
/// # Arguments
/// * `now` - Timestamp string, or `None` for the local clock
///
/// # Returns
/// Result containing the reference time or an invalid-params error
pub fn parse_now(now: Option<&str>) -> McpResult<NaiveDateTime> {
    let Some(value) = now else {
        return Ok(Local::now().naive_local());
    };
    parse_timestamp(value).ok_or_else(|| {
        mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(
            format!(
                "Invalid timestamp '{}'. Use RFC 3339 or YYYY-MM-DDTHH:MM:SS (e.g., '2025-03-15T09:00:00')",
                value
            ),
            true,
        )
    })
}
