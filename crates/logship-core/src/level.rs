// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Severity levels for log records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown severity string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid log level: {0}")]
pub struct ParseLevelError(pub String);

/// Severity of a [`LogRecord`](crate::LogRecord).
///
/// Serialized lowercase on the wire: `"verbose"` through `"error"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Verbose,
	Debug,
	Info,
	Warning,
	Error,
}

impl LogLevel {
	/// Returns the wire representation.
	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::Verbose => "verbose",
			LogLevel::Debug => "debug",
			LogLevel::Info => "info",
			LogLevel::Warning => "warning",
			LogLevel::Error => "error",
		}
	}
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl FromStr for LogLevel {
	type Err = ParseLevelError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"verbose" => Ok(Self::Verbose),
			"debug" => Ok(Self::Debug),
			"info" => Ok(Self::Info),
			"warning" => Ok(Self::Warning),
			"error" => Ok(Self::Error),
			_ => Err(ParseLevelError(s.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn level_ordering() {
		assert!(LogLevel::Verbose < LogLevel::Debug);
		assert!(LogLevel::Warning < LogLevel::Error);
	}

	#[test]
	fn unknown_level_fails_to_parse() {
		let err = "fatal".parse::<LogLevel>().unwrap_err();
		assert_eq!(err, ParseLevelError("fatal".to_string()));
	}

	#[test]
	fn serde_uses_lowercase() {
		let json = serde_json::to_string(&LogLevel::Warning).unwrap();
		assert_eq!(json, "\"warning\"");
	}

	proptest! {
		#[test]
		fn level_roundtrip(level in prop_oneof![
			Just(LogLevel::Verbose),
			Just(LogLevel::Debug),
			Just(LogLevel::Info),
			Just(LogLevel::Warning),
			Just(LogLevel::Error),
		]) {
			let s = level.to_string();
			let parsed: LogLevel = s.parse().unwrap();
			prop_assert_eq!(level, parsed);

			let json = serde_json::to_string(&level).unwrap();
			let decoded: LogLevel = serde_json::from_str(&json).unwrap();
			prop_assert_eq!(level, decoded);
		}
	}
}
