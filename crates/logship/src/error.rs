// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the SDK.

use logship_core::ConfigError;
use thiserror::Error;

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, SdkError>;

/// Errors that can occur in the SDK.
///
/// `NotInitialized` and `NoRuntime` indicate a setup bug in the host and are
/// deliberately distinct from the transport variants, which describe
/// transient network conditions the host never has to handle.
#[derive(Debug, Error)]
pub enum SdkError {
	/// The SDK has not been initialized. Call `init()` first.
	#[error("SDK not initialized, call init() first")]
	NotInitialized,

	/// `init()` was called outside a tokio runtime; the SDK needs one to
	/// dispatch detached sends.
	#[error("init() must be called from within a tokio runtime")]
	NoRuntime,

	/// The configuration was rejected at construction.
	#[error("invalid configuration: {0}")]
	InvalidConfig(#[from] ConfigError),

	/// HTTP request failed in transit.
	#[error("HTTP request failed: {0}")]
	Request(#[from] reqwest::Error),

	/// The collector answered with a non-success status.
	#[error("collector error (status {status}): {message}")]
	Collector {
		/// HTTP status code.
		status: u16,
		/// Error body from the collector.
		message: String,
	},
}
