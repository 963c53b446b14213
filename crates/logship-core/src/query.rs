// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Read-side filters for querying stored records.

use crate::level::LogLevel;

/// Optional filters for `GET {base}logs/`.
///
/// Only the filters that are set are rendered into the request; an empty
/// query fetches everything the collector will return unfiltered.
///
/// # Example
///
/// ```
/// use logship_core::{LogLevel, LogQuery};
///
/// let query = LogQuery::new()
///     .user_id("user-42")
///     .level(LogLevel::Error)
///     .start("2025-01-01 00:00:00.000");
/// assert_eq!(query.to_pairs().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
	pub user_id: Option<String>,
	pub level: Option<LogLevel>,
	pub start: Option<String>,
	pub end: Option<String>,
	pub tag: Option<String>,
	pub package_name: Option<String>,
}

impl LogQuery {
	/// Creates an empty query matching all records.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
		self.user_id = Some(user_id.into());
		self
	}

	pub fn level(mut self, level: LogLevel) -> Self {
		self.level = Some(level);
		self
	}

	/// Inclusive lower bound on the record timestamp (wire format).
	pub fn start(mut self, start: impl Into<String>) -> Self {
		self.start = Some(start.into());
		self
	}

	/// Inclusive upper bound on the record timestamp (wire format).
	pub fn end(mut self, end: impl Into<String>) -> Self {
		self.end = Some(end.into());
		self
	}

	pub fn tag(mut self, tag: impl Into<String>) -> Self {
		self.tag = Some(tag.into());
		self
	}

	pub fn package_name(mut self, package_name: impl Into<String>) -> Self {
		self.package_name = Some(package_name.into());
		self
	}

	/// Renders the set filters as query-string pairs with wire key names.
	pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = Vec::new();
		if let Some(user_id) = &self.user_id {
			pairs.push(("userId", user_id.clone()));
		}
		if let Some(level) = self.level {
			pairs.push(("level", level.to_string()));
		}
		if let Some(start) = &self.start {
			pairs.push(("start", start.clone()));
		}
		if let Some(end) = &self.end {
			pairs.push(("end", end.clone()));
		}
		if let Some(tag) = &self.tag {
			pairs.push(("tag", tag.clone()));
		}
		if let Some(package_name) = &self.package_name {
			pairs.push(("packageName", package_name.clone()));
		}
		pairs
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_query_renders_no_pairs() {
		assert!(LogQuery::new().to_pairs().is_empty());
	}

	#[test]
	fn only_set_filters_are_rendered() {
		let pairs = LogQuery::new()
			.level(LogLevel::Warning)
			.tag("Network")
			.to_pairs();

		assert_eq!(
			pairs,
			vec![
				("level", "warning".to_string()),
				("tag", "Network".to_string()),
			]
		);
	}

	#[test]
	fn full_query_renders_all_wire_keys() {
		let pairs = LogQuery::new()
			.user_id("u")
			.level(LogLevel::Error)
			.start("a")
			.end("b")
			.tag("t")
			.package_name("p")
			.to_pairs();

		let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
		assert_eq!(
			keys,
			vec!["userId", "level", "start", "end", "tag", "packageName"]
		);
	}
}
