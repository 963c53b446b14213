// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: ship logs and monitored events to a collector.
//!
//! Run with:
//!   cargo run --example ship -p logship

use logship::{LogQuery, LogLevel, LogShip, ShipConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "info".into()),
		)
		.init();

	let base_url =
		std::env::var("LOGSHIP_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
	let user_id = std::env::var("LOGSHIP_USER_ID").unwrap_or_else(|_| "example-user".to_string());

	println!("Initializing SDK...");
	println!("  Base URL: {}", base_url);
	println!("  User ID: {}", user_id);

	let sdk = LogShip::new();
	sdk.init(
		ShipConfig::builder(&base_url, &user_id)
			.debug_logs(true)
			.build()?,
	)?;

	let logger = sdk.logger();
	logger.info("Example", "application started");
	logger.debug("Example", "loading profile");
	logger.warning("Example", "profile cache was stale");

	let timeout = std::io::Error::new(std::io::ErrorKind::TimedOut, "socket timed out");
	logger.error_with("Example", "profile refresh failed", &timeout);

	// Screen lifecycle, the way a host UI layer would report it.
	if let Some(lifecycle) = sdk.lifecycle_monitor() {
		lifecycle.screen_created("HomeScreen", false);
		lifecycle.screen_started("HomeScreen");
		lifecycle.screen_resumed("HomeScreen");
		lifecycle.screen_paused("HomeScreen");
		lifecycle.screen_destroyed("HomeScreen", true);
	}

	// Observe one of the host's own HTTP calls.
	if let Some(monitor) = sdk.network_monitor() {
		let client = reqwest::Client::new();
		let url = format!("{}/health", base_url.trim_end_matches('/'));
		match monitor.observe("GET", &url, || client.get(&url).send()).await {
			Ok(response) => println!("Health check: {}", response.status()),
			Err(error) => println!("Health check failed: {}", error),
		}
	}

	// Give the detached sends a moment before querying back.
	tokio::time::sleep(std::time::Duration::from_millis(500)).await;

	let transport = sdk.transport()?;
	let query = LogQuery::new().user_id(&user_id).level(LogLevel::Error);
	match transport.query_logs(&query).await {
		Ok(records) => println!("Collector stores {} error records for this user.", records.len()),
		Err(error) => println!("Query failed (is a collector running?): {}", error),
	}

	sdk.cleanup();
	println!("SDK cleaned up.");

	Ok(())
}
