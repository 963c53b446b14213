// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration validation errors.

use thiserror::Error;

/// Errors that reject a configuration at construction time.
///
/// A rejected build retains no partial state; init never proceeds with a
/// half-valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
	/// Base URL was empty or whitespace.
	#[error("base URL cannot be blank")]
	BlankBaseUrl,

	/// User ID was empty or whitespace.
	#[error("user ID cannot be blank")]
	BlankUserId,

	/// A timeout was zero seconds.
	#[error("{0} timeout must be a positive number of seconds")]
	NonPositiveTimeout(&'static str),
}
