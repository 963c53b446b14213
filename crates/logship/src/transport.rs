// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed HTTP transport to the collector.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use logship_core::{LogQuery, LogRecord, ShipConfig};
use tracing::debug;

use crate::error::{Result, SdkError};
use crate::network::NetworkMonitor;

/// Route for shipping and querying records, relative to the base URL.
const LOGS_ROUTE: &str = "logs/";
/// Route returning every stored record.
const ALL_LOGS_ROUTE: &str = "logs/all";
/// Deadline for the synchronous crash-path send.
const CRASH_SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for shipping records to the collector and querying them back.
///
/// Cheap to clone; all clones share the underlying connection pool.
/// Replacing a transport is just dropping the old handle, which makes
/// re-initialization with a new config leak-free.
#[derive(Clone)]
pub struct TransportClient {
	inner: Arc<TransportInner>,
}

struct TransportInner {
	http: reqwest::Client,
	base_url: String,
	monitor: Option<Arc<NetworkMonitor>>,
}

impl TransportClient {
	/// Builds a client with the config's connect and read/write timeouts.
	///
	/// When a network monitor is attached, every request this client makes
	/// is routed through it; calls to the collector itself are exempted by
	/// the monitor's loop-prevention check.
	pub fn new(config: &ShipConfig, monitor: Option<Arc<NetworkMonitor>>) -> Result<Self> {
		let http = logship_common_http::builder_with_timeouts(
			config.connect_timeout(),
			config.read_timeout(),
		)
		.build()?;

		Ok(Self {
			inner: Arc::new(TransportInner {
				http,
				base_url: config.base_url().to_string(),
				monitor,
			}),
		})
	}

	/// Collector base URL, ending with `/`.
	pub fn base_url(&self) -> &str {
		&self.inner.base_url
	}

	/// POSTs one record to the collector.
	///
	/// A 2xx answer decodes the collector's acknowledgement map; any other
	/// status is reported as [`SdkError::Collector`]. This method never
	/// retries; the caller decides what the outcome is worth.
	pub async fn send_log(&self, record: &LogRecord) -> Result<HashMap<String, String>> {
		let url = format!("{}{}", self.inner.base_url, LOGS_ROUTE);
		let request = self.inner.http.post(&url).json(record);
		let response = self.execute("POST", &url, request).await?;
		let response = Self::check_status(response).await?;
		Ok(response.json().await?)
	}

	/// GETs records matching the query's set filters.
	pub async fn query_logs(&self, query: &LogQuery) -> Result<Vec<LogRecord>> {
		let url = format!("{}{}", self.inner.base_url, LOGS_ROUTE);
		let request = self.inner.http.get(&url).query(&query.to_pairs());
		let response = self.execute("GET", &url, request).await?;
		let response = Self::check_status(response).await?;
		Ok(response.json().await?)
	}

	/// GETs every record the collector has stored.
	pub async fn fetch_all_logs(&self) -> Result<Vec<LogRecord>> {
		let url = format!("{}{}", self.inner.base_url, ALL_LOGS_ROUTE);
		let request = self.inner.http.get(&url);
		let response = self.execute("GET", &url, request).await?;
		let response = Self::check_status(response).await?;
		Ok(response.json().await?)
	}

	/// Ships one record synchronously with a short deadline.
	///
	/// Used only from the panic hook: the process is about to die, so a
	/// fresh blocking client with a 5 second budget is the only delivery
	/// that can still complete.
	pub(crate) fn send_log_blocking(&self, record: &LogRecord) -> Result<()> {
		let url = format!("{}{}", self.inner.base_url, LOGS_ROUTE);
		let client = reqwest::blocking::Client::builder()
			.user_agent(logship_common_http::user_agent())
			.timeout(CRASH_SEND_TIMEOUT)
			.build()?;

		let response = client.post(&url).json(record).send()?;
		if !response.status().is_success() {
			let status = response.status().as_u16();
			let message = response.text().unwrap_or_default();
			return Err(SdkError::Collector { status, message });
		}
		Ok(())
	}

	/// Routes a request through the network monitor when one is attached.
	async fn execute(
		&self,
		method: &str,
		url: &str,
		request: reqwest::RequestBuilder,
	) -> Result<reqwest::Response> {
		let response = match &self.inner.monitor {
			Some(monitor) => monitor.observe(method, url, || request.send()).await?,
			None => request.send().await?,
		};
		Ok(response)
	}

	async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
		if response.status().is_success() {
			return Ok(response);
		}
		let status = response.status().as_u16();
		let message = response.text().await.unwrap_or_default();
		debug!(status, "collector rejected request");
		Err(SdkError::Collector { status, message })
	}
}
