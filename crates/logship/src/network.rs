// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Network traffic monitor.
//!
//! Wraps outbound HTTP calls as a decorator: time the call, let it proceed,
//! classify the outcome from observable signals (status, elapsed time, error
//! shape) and derive log records. Calls to the collector itself are passed
//! through unobserved so shipping a record can never generate another one.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::logger::Logger;

/// Successful calls slower than this are still worth a warning.
const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_millis(3000);
/// Response bodies larger than this trigger an oversized-payload warning.
const LARGE_RESPONSE_BYTES: u64 = 1024 * 1024;
/// Path fragment identifying calls to the collector itself.
const COLLECTOR_PATH: &str = "/logs";

/// Coarse bucket for a failed transport call, used for analytics grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
	Timeout,
	DnsFailure,
	ConnectionFailure,
	TlsFailure,
	SocketError,
	Io,
	Unknown,
}

impl FailureKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			FailureKind::Timeout => "TIMEOUT",
			FailureKind::DnsFailure => "DNS_FAILURE",
			FailureKind::ConnectionFailure => "CONNECTION_FAILURE",
			FailureKind::TlsFailure => "TLS_FAILURE",
			FailureKind::SocketError => "SOCKET_ERROR",
			FailureKind::Io => "IO_ERROR",
			FailureKind::Unknown => "UNKNOWN_NETWORK_ERROR",
		}
	}
}

/// How a completed response should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseClass {
	/// Status >= 400.
	Failed,
	/// Succeeded but took longer than the slow threshold.
	Slow,
	Normal,
}

fn classify_response(status: u16, elapsed: Duration) -> ResponseClass {
	if status >= 400 {
		ResponseClass::Failed
	} else if elapsed > SLOW_REQUEST_THRESHOLD {
		ResponseClass::Slow
	} else {
		ResponseClass::Normal
	}
}

/// Maps an HTTP error status to its analytics tag and description.
fn http_error_bucket(status: u16) -> (&'static str, &'static str) {
	match status {
		400 => ("NetworkBadRequest", "bad request"),
		401 => ("NetworkAuth", "unauthorized, check authentication"),
		403 => ("NetworkAuth", "forbidden, check permissions"),
		404 => ("NetworkNotFound", "not found"),
		408 | 504 => ("NetworkTimeout", "timeout"),
		429 => ("NetworkRateLimit", "rate limited"),
		500 => ("NetworkServer", "internal server error"),
		503 => ("NetworkServer", "service unavailable"),
		502 => ("NetworkGateway", "bad gateway"),
		status if (400..500).contains(&status) => ("NetworkHttp", "client error"),
		_ => ("NetworkHttp", "server error"),
	}
}

/// Derives a coarse failure category from a transport error.
///
/// reqwest surfaces resolver and TLS causes only through its error text, so
/// those are keyword-matched first; everything else walks the
/// `std::io::Error` source chain for a kind.
pub fn classify_failure(error: &reqwest::Error) -> FailureKind {
	if error.is_timeout() {
		return FailureKind::Timeout;
	}

	let text = format!("{error:?}").to_ascii_lowercase();
	if text.contains("dns") || text.contains("failed to lookup") {
		return FailureKind::DnsFailure;
	}
	if text.contains("tls") || text.contains("certificate") || text.contains("ssl") {
		return FailureKind::TlsFailure;
	}

	let mut source = std::error::Error::source(error);
	while let Some(cause) = source {
		if let Some(io) = cause.downcast_ref::<std::io::Error>() {
			use std::io::ErrorKind;
			return match io.kind() {
				ErrorKind::TimedOut => FailureKind::Timeout,
				ErrorKind::ConnectionRefused
				| ErrorKind::ConnectionReset
				| ErrorKind::ConnectionAborted
				| ErrorKind::NotConnected => FailureKind::ConnectionFailure,
				ErrorKind::BrokenPipe | ErrorKind::UnexpectedEof => FailureKind::SocketError,
				_ => FailureKind::Io,
			};
		}
		source = cause.source();
	}

	if error.is_connect() {
		FailureKind::ConnectionFailure
	} else {
		FailureKind::Unknown
	}
}

/// Observes outbound HTTP calls and derives log records from their outcome.
///
/// Modeled as a decorator around request execution: hand it the request's
/// method/URL and a closure that performs the call. No cooperation from the
/// calling code is needed beyond routing the call through [`observe`].
///
/// [`observe`]: NetworkMonitor::observe
pub struct NetworkMonitor {
	logger: Logger,
}

impl NetworkMonitor {
	pub(crate) fn new(logger: Logger) -> Self {
		Self { logger }
	}

	/// True for calls that target the collector itself.
	fn is_collector_call(url: &str) -> bool {
		url.contains(COLLECTOR_PATH)
	}

	/// Times and classifies one HTTP call.
	///
	/// The wrapped call's outcome is always returned unmodified: responses
	/// of any status pass through, and a transport error is re-raised after
	/// the derived records are emitted. Never retries.
	pub async fn observe<F, Fut>(
		&self,
		method: &str,
		url: &str,
		proceed: F,
	) -> reqwest::Result<reqwest::Response>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = reqwest::Result<reqwest::Response>>,
	{
		if Self::is_collector_call(url) {
			return proceed().await;
		}

		let started = Instant::now();
		match proceed().await {
			Ok(response) => {
				self.report_response(method, url, &response, started.elapsed());
				Ok(response)
			}
			Err(error) => {
				self.report_failure(method, url, &error, started.elapsed());
				Err(error)
			}
		}
	}

	fn report_response(
		&self,
		method: &str,
		url: &str,
		response: &reqwest::Response,
		elapsed: Duration,
	) {
		let status = response.status();
		let code = status.as_u16();
		let millis = elapsed.as_millis();

		match classify_response(code, elapsed) {
			ResponseClass::Failed => {
				let reason = status.canonical_reason().unwrap_or("unknown");
				self.logger.error(
					"Network",
					&format!("{method} {url} failed with status {code} ({reason}) in {millis}ms"),
				);
				let (tag, description) = http_error_bucket(code);
				self.logger.error(
					tag,
					&format!("{description} - {method} {url} (status {code})"),
				);
			}
			ResponseClass::Slow => {
				self.logger.warning(
					"Network",
					&format!("{method} {url} completed in {millis}ms (slow), status {code}"),
				);
			}
			ResponseClass::Normal => {
				self.logger.debug(
					"Network",
					&format!("{method} {url}, status {code} in {millis}ms"),
				);
			}
		}

		// Oversized payloads are reported independently of the branch above.
		if let Some(length) = response.content_length() {
			if length > LARGE_RESPONSE_BYTES {
				self.logger.warning(
					"NetworkSize",
					&format!(
						"{method} {url} returned large response: {}MiB",
						length / 1024 / 1024
					),
				);
			}
		}
	}

	fn report_failure(
		&self,
		method: &str,
		url: &str,
		error: &reqwest::Error,
		elapsed: Duration,
	) {
		let millis = elapsed.as_millis();
		self.logger.error(
			"Network",
			&format!("{method} {url} failed after {millis}ms: {error}"),
		);

		let kind = classify_failure(error);
		self.logger.error(
			"NetworkError",
			&format!("{} - {method} {url}", kind.as_str()),
		);
	}
}
