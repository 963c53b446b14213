// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Screen lifecycle monitoring.
//!
//! The host reports each screen transition through the callbacks below; the
//! monitor keeps an ordered stack of live screen names and derives
//! transition, detail and stack-summary records. A logging problem in here
//! must never break the host screen's lifecycle, so every path degrades
//! silently.

use std::sync::Mutex;

use crate::logger::Logger;

/// Stack depths beyond this are reported as an anomaly (a likely leak).
const STACK_WARNING_DEPTH: usize = 5;

/// Tracks live screens and derives lifecycle records.
///
/// Screens are pushed on create and removed by name on destroy: teardown
/// order is not always the reverse of creation, so removal is by identity,
/// not by position.
pub struct LifecycleMonitor {
	logger: Logger,
	stack: Mutex<Vec<String>>,
}

impl LifecycleMonitor {
	pub(crate) fn new(logger: Logger) -> Self {
		Self {
			logger,
			stack: Mutex::new(Vec::new()),
		}
	}

	/// A screen was created. `restored` marks re-creation from saved state.
	pub fn screen_created(&self, name: &str, restored: bool) {
		self.logger.info("Lifecycle", &format!("created - {name}"));
		if restored {
			self.logger.debug(
				"LifecycleDetail",
				&format!("restored from saved state - {name}"),
			);
		}

		if let Ok(mut stack) = self.stack.lock() {
			stack.push(name.to_string());
			self.report_stack(&stack);
		}
	}

	pub fn screen_started(&self, name: &str) {
		self.logger.info("Lifecycle", &format!("started - {name}"));
	}

	pub fn screen_resumed(&self, name: &str) {
		self.logger.info("Lifecycle", &format!("resumed - {name}"));
		self.logger
			.debug("LifecycleDetail", &format!("in foreground - {name}"));
	}

	pub fn screen_paused(&self, name: &str) {
		self.logger.info("Lifecycle", &format!("paused - {name}"));
	}

	pub fn screen_stopped(&self, name: &str) {
		self.logger.info("Lifecycle", &format!("stopped - {name}"));
		self.logger
			.debug("LifecycleDetail", &format!("no longer visible - {name}"));
	}

	pub fn screen_save_state(&self, name: &str) {
		self.logger.debug("Lifecycle", &format!("save state - {name}"));
	}

	/// A screen was destroyed. `finishing` distinguishes an explicit finish
	/// from an implicit teardown.
	pub fn screen_destroyed(&self, name: &str, finishing: bool) {
		self.logger.info("Lifecycle", &format!("destroyed - {name}"));

		if let Ok(mut stack) = self.stack.lock() {
			if let Some(index) = stack.iter().position(|screen| screen == name) {
				stack.remove(index);
			}
			self.report_stack(&stack);
		}

		if finishing {
			self.logger.debug(
				"LifecycleDetail",
				&format!("finished explicitly - {name}"),
			);
		} else {
			self.logger.warning(
				"LifecycleDetail",
				&format!("destroyed without finish - {name}"),
			);
		}
	}

	/// Current live screens, creation order.
	pub fn stack(&self) -> Vec<String> {
		self.stack
			.lock()
			.map(|stack| stack.clone())
			.unwrap_or_default()
	}

	/// The most recently created live screen.
	pub fn current_screen(&self) -> Option<String> {
		self.stack
			.lock()
			.ok()
			.and_then(|stack| stack.last().cloned())
	}

	fn report_stack(&self, stack: &[String]) {
		let top = stack.last().map(String::as_str).unwrap_or("none");
		self.logger.debug(
			"ScreenStack",
			&format!("size: {}, current: {top}", stack.len()),
		);

		if stack.len() > STACK_WARNING_DEPTH {
			self.logger.warning(
				"ScreenStack",
				&format!("large screen stack detected: {}", stack.join(" -> ")),
			);
		}
	}
}
