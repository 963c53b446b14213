// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The log record: one structured event, the unit shipped to the collector.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::level::LogLevel;

/// Wire timestamp format, stamped in the local zone at creation time.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// One structured log event with fixed metadata.
///
/// Built fresh per emission and never mutated afterwards. Optional fields
/// serialize as absent keys so the collector can tell "unknown" apart from
/// an empty string or zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
	pub user_id: String,
	pub level: LogLevel,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tag: Option<String>,
	pub message: String,
	pub timestamp: String,
	/// Calling thread, for concurrency debugging.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub thread_id: Option<i64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub process_id: Option<u32>,
	/// Identifies the emitting application when one collector serves several.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub package_name: Option<String>,
}

impl LogRecord {
	/// Builds a record stamped with the current local time and the calling
	/// thread/process identity.
	pub fn now(
		user_id: impl Into<String>,
		level: LogLevel,
		tag: Option<String>,
		message: impl Into<String>,
		package_name: Option<String>,
	) -> Self {
		Self {
			user_id: user_id.into(),
			level,
			tag,
			message: message.into(),
			timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
			thread_id: current_thread_id(),
			process_id: Some(std::process::id()),
			package_name,
		}
	}
}

/// Best-effort numeric id of the calling thread.
///
/// `std::thread::ThreadId` exposes no stable integer, so this extracts the
/// numeric core of its debug form. Absent if that form ever changes shape.
fn current_thread_id() -> Option<i64> {
	let id = format!("{:?}", std::thread::current().id());
	let digits: String = id.chars().filter(|c| c.is_ascii_digit()).collect();
	digits.parse().ok()
}
