// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SDK configuration, resolved once at startup and read-only thereafter.

use std::time::Duration;

use crate::error::ConfigError;

/// Default connect and read/write timeout in whole seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Immutable SDK settings, validated at construction.
///
/// The base URL is normalized to end with exactly one `/` so route joins
/// stay well-formed regardless of what the caller passed in.
///
/// # Example
///
/// ```
/// use logship_core::ShipConfig;
///
/// let config = ShipConfig::builder("http://collector.example.com:5000", "user-42")
///     .debug_logs(true)
///     .timeouts(10, 20)
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url(), "http://collector.example.com:5000/");
/// ```
#[derive(Debug, Clone)]
pub struct ShipConfig {
	base_url: String,
	user_id: String,
	enable_monitoring: bool,
	enable_debug_logs: bool,
	connect_timeout_secs: u64,
	read_timeout_secs: u64,
	package_name: Option<String>,
}

impl ShipConfig {
	/// Creates a builder with the two required settings.
	pub fn builder(base_url: impl Into<String>, user_id: impl Into<String>) -> ShipConfigBuilder {
		ShipConfigBuilder {
			base_url: base_url.into(),
			user_id: user_id.into(),
			enable_monitoring: true,
			enable_debug_logs: false,
			connect_timeout_secs: DEFAULT_TIMEOUT_SECS,
			read_timeout_secs: DEFAULT_TIMEOUT_SECS,
			package_name: None,
		}
	}

	/// Builds a config with all defaults.
	pub fn new(
		base_url: impl Into<String>,
		user_id: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Self::builder(base_url, user_id).build()
	}

	/// Collector base URL, always ending with exactly one `/`.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Identity stamped onto every shipped record.
	pub fn user_id(&self) -> &str {
		&self.user_id
	}

	/// Whether the crash/lifecycle/network monitors are started at init.
	pub fn monitoring_enabled(&self) -> bool {
		self.enable_monitoring
	}

	/// Whether SDK-internal diagnostics are emitted at debug rather than
	/// trace verbosity.
	pub fn debug_logs_enabled(&self) -> bool {
		self.enable_debug_logs
	}

	pub fn connect_timeout(&self) -> Duration {
		Duration::from_secs(self.connect_timeout_secs)
	}

	pub fn read_timeout(&self) -> Duration {
		Duration::from_secs(self.read_timeout_secs)
	}

	/// Explicit application identifier, when configured.
	pub fn package_name(&self) -> Option<&str> {
		self.package_name.as_deref()
	}
}

/// Builder for [`ShipConfig`]. `build()` rejects blank required fields and
/// zero timeouts; nothing is retained on failure.
#[derive(Debug, Clone)]
pub struct ShipConfigBuilder {
	base_url: String,
	user_id: String,
	enable_monitoring: bool,
	enable_debug_logs: bool,
	connect_timeout_secs: u64,
	read_timeout_secs: u64,
	package_name: Option<String>,
}

impl ShipConfigBuilder {
	/// Enables or disables the automatic monitors (default: enabled).
	pub fn monitoring(mut self, enabled: bool) -> Self {
		self.enable_monitoring = enabled;
		self
	}

	/// Enables verbose SDK-internal diagnostics (default: disabled).
	pub fn debug_logs(mut self, enabled: bool) -> Self {
		self.enable_debug_logs = enabled;
		self
	}

	pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
		self.connect_timeout_secs = secs;
		self
	}

	pub fn read_timeout_secs(mut self, secs: u64) -> Self {
		self.read_timeout_secs = secs;
		self
	}

	/// Sets both timeouts at once, in whole seconds.
	pub fn timeouts(mut self, connect_secs: u64, read_secs: u64) -> Self {
		self.connect_timeout_secs = connect_secs;
		self.read_timeout_secs = read_secs;
		self
	}

	/// Overrides the application identifier attached to records. When unset
	/// the SDK falls back to the current executable's file stem.
	pub fn package_name(mut self, package_name: impl Into<String>) -> Self {
		self.package_name = Some(package_name.into());
		self
	}

	pub fn build(self) -> Result<ShipConfig, ConfigError> {
		if self.base_url.trim().is_empty() {
			return Err(ConfigError::BlankBaseUrl);
		}
		if self.user_id.trim().is_empty() {
			return Err(ConfigError::BlankUserId);
		}
		if self.connect_timeout_secs == 0 {
			return Err(ConfigError::NonPositiveTimeout("connect"));
		}
		if self.read_timeout_secs == 0 {
			return Err(ConfigError::NonPositiveTimeout("read"));
		}

		Ok(ShipConfig {
			base_url: normalize_base_url(&self.base_url),
			user_id: self.user_id,
			enable_monitoring: self.enable_monitoring,
			enable_debug_logs: self.enable_debug_logs,
			connect_timeout_secs: self.connect_timeout_secs,
			read_timeout_secs: self.read_timeout_secs,
			package_name: self.package_name,
		})
	}
}

/// Ensures exactly one trailing slash.
fn normalize_base_url(url: &str) -> String {
	format!("{}/", url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn defaults() {
		let config = ShipConfig::new("http://example.com", "user-1").unwrap();
		assert!(config.monitoring_enabled());
		assert!(!config.debug_logs_enabled());
		assert_eq!(config.connect_timeout(), Duration::from_secs(30));
		assert_eq!(config.read_timeout(), Duration::from_secs(30));
		assert!(config.package_name().is_none());
	}

	#[test]
	fn blank_base_url_is_rejected() {
		assert_eq!(
			ShipConfig::new("   ", "user-1").unwrap_err(),
			ConfigError::BlankBaseUrl
		);
	}

	#[test]
	fn blank_user_id_is_rejected() {
		assert_eq!(
			ShipConfig::new("http://example.com", "").unwrap_err(),
			ConfigError::BlankUserId
		);
	}

	#[test]
	fn zero_timeouts_are_rejected() {
		assert_eq!(
			ShipConfig::builder("http://example.com", "u")
				.connect_timeout_secs(0)
				.build()
				.unwrap_err(),
			ConfigError::NonPositiveTimeout("connect")
		);
		assert_eq!(
			ShipConfig::builder("http://example.com", "u")
				.read_timeout_secs(0)
				.build()
				.unwrap_err(),
			ConfigError::NonPositiveTimeout("read")
		);
	}

	#[test]
	fn base_url_gains_single_trailing_slash() {
		for input in [
			"http://example.com",
			"http://example.com/",
			"http://example.com///",
		] {
			let config = ShipConfig::new(input, "u").unwrap();
			assert_eq!(config.base_url(), "http://example.com/");
		}
	}

	#[test]
	fn builder_setters_stick() {
		let config = ShipConfig::builder("http://example.com", "u")
			.monitoring(false)
			.debug_logs(true)
			.timeouts(5, 45)
			.package_name("checkout-app")
			.build()
			.unwrap();

		assert!(!config.monitoring_enabled());
		assert!(config.debug_logs_enabled());
		assert_eq!(config.connect_timeout(), Duration::from_secs(5));
		assert_eq!(config.read_timeout(), Duration::from_secs(45));
		assert_eq!(config.package_name(), Some("checkout-app"));
	}

	proptest! {
		#[test]
		fn valid_base_urls_always_end_with_one_slash(
			host in "[a-z]{1,20}",
			slashes in 0usize..5,
		) {
			let input = format!("http://{}{}", host, "/".repeat(slashes));
			let config = ShipConfig::new(input, "user").unwrap();

			prop_assert!(config.base_url().ends_with('/'));
			prop_assert!(!config.base_url().ends_with("//"));
		}

		#[test]
		fn positive_timeouts_always_build(connect in 1u64..600, read in 1u64..600) {
			let config = ShipConfig::builder("http://example.com", "u")
				.timeouts(connect, read)
				.build();
			prop_assert!(config.is_ok());
		}
	}
}
