// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Creates a new HTTP client with the standard logship User-Agent header.
pub fn new_client() -> Client {
	builder().build().expect("failed to build HTTP client")
}

/// Creates a new HTTP client builder with the standard logship User-Agent
/// header.
///
/// Use this when you need to customize the client further.
///
/// # Example
/// ```ignore
/// let client = logship_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a builder with the SDK's timeout pair applied.
///
/// reqwest exposes no separate read/write timeout, so the total-request
/// timeout carries the read/write budget and the connect timeout is applied
/// on top of it.
pub fn builder_with_timeouts(connect: Duration, read_write: Duration) -> ClientBuilder {
	builder().connect_timeout(connect).timeout(read_write)
}

/// Returns the standard logship User-Agent string.
///
/// Format: `logship/{os}/{version}`
/// Example: `logship/linux/0.1.0`
pub fn user_agent() -> String {
	format!(
		"logship/{}/{}",
		std::env::consts::OS,
		env!("CARGO_PKG_VERSION")
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_correct_format() {
		let ua = user_agent();
		assert!(ua.starts_with("logship/"));
		let parts: Vec<&str> = ua.split('/').collect();
		assert_eq!(parts.len(), 3);
		assert_eq!(parts[0], "logship");
	}

	#[test]
	fn builder_with_timeouts_builds() {
		let client = builder_with_timeouts(Duration::from_secs(5), Duration::from_secs(30)).build();
		assert!(client.is_ok());
	}
}
