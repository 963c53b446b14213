// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Crash monitoring via the process panic hook.
//!
//! The monitor captures whatever hook was installed before it, reports the
//! panic (full report, compact analytics record, coarse category, memory
//! snapshot) and then always chains to the captured hook so the process
//! keeps its normal crash behavior. A failure while reporting is dropped; a
//! crash while handling a crash must never cascade.

use std::panic::{self, AssertUnwindSafe, PanicHookInfo};
use std::sync::Arc;

use logship_core::LogLevel;
use tracing::debug;

use crate::backtrace::capture_frames;
use crate::logger::Logger;

/// Frames kept in a crash report.
const MAX_FRAMES: usize = 10;

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Send + Sync + 'static>;

/// Coarse crash bucket for analytics, derived by keyword matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCategory {
	Memory,
	NullReference,
	Index,
	Cast,
	Security,
	Network,
	Database,
	Ui,
	Unknown,
}

impl CrashCategory {
	pub fn as_str(&self) -> &'static str {
		match self {
			CrashCategory::Memory => "MEMORY_ERROR",
			CrashCategory::NullReference => "NULL_POINTER",
			CrashCategory::Index => "INDEX_ERROR",
			CrashCategory::Cast => "CAST_ERROR",
			CrashCategory::Security => "SECURITY_ERROR",
			CrashCategory::Network => "NETWORK_ERROR",
			CrashCategory::Database => "DATABASE_ERROR",
			CrashCategory::Ui => "UI_ERROR",
			CrashCategory::Unknown => "UNKNOWN_ERROR",
		}
	}
}

/// Derives the crash category from the panic message and backtrace text.
///
/// Buckets are checked in a fixed precedence order; the first match wins.
pub fn categorize(message: &str, backtrace: &str) -> CrashCategory {
	let message = message.to_ascii_lowercase();
	let backtrace = backtrace.to_ascii_lowercase();

	if message.contains("memory")
		|| message.contains("allocation")
		|| message.contains("capacity overflow")
	{
		CrashCategory::Memory
	} else if message.contains("`none`") || message.contains("null") {
		CrashCategory::NullReference
	} else if message.contains("index out of bounds") || message.contains("out of range") {
		CrashCategory::Index
	} else if message.contains("downcast") || message.contains("cast") {
		CrashCategory::Cast
	} else if message.contains("security") || message.contains("permission denied") {
		CrashCategory::Security
	} else if message.contains("network")
		|| message.contains("connection")
		|| backtrace.contains("network")
	{
		CrashCategory::Network
	} else if message.contains("database")
		|| message.contains("sql")
		|| backtrace.contains("database")
	{
		CrashCategory::Database
	} else if backtrace.contains("render") || backtrace.contains("widget") || backtrace.contains("::ui::")
	{
		CrashCategory::Ui
	} else {
		CrashCategory::Unknown
	}
}

/// Installs a chaining panic hook and restores the previous one on cleanup.
pub struct CrashMonitor {
	previous: Arc<PanicHook>,
}

impl CrashMonitor {
	/// Captures the current hook and installs the reporting replacement.
	///
	/// The replacement reports first, then invokes the captured hook, so
	/// default platform behavior (abort, backtrace printing) is preserved
	/// unchanged.
	pub(crate) fn install(logger: Logger) -> Self {
		let previous: Arc<PanicHook> = Arc::new(panic::take_hook());
		let chained = Arc::clone(&previous);

		panic::set_hook(Box::new(move |info| {
			// A panic raised while reporting a panic is dropped here.
			let _ = panic::catch_unwind(AssertUnwindSafe(|| report_panic(&logger, info)));
			(*chained)(info);
		}));

		debug!("panic hook installed");
		Self { previous }
	}

	/// Restores the hook captured at install time.
	pub(crate) fn cleanup(&self) {
		let previous = Arc::clone(&self.previous);
		panic::set_hook(Box::new(move |info| (*previous)(info)));
		debug!("panic hook restored");
	}
}

/// Formats and ships the crash records. Runs inside the panic hook, so
/// delivery is synchronous; the process is about to terminate.
fn report_panic(logger: &Logger, info: &PanicHookInfo<'_>) {
	let thread = std::thread::current();
	let thread_name = thread.name().unwrap_or("unnamed").to_string();
	let message = payload_message(info);
	let location = info
		.location()
		.map(|location| location.to_string())
		.unwrap_or_else(|| "unknown".to_string());

	let frames = capture_frames(MAX_FRAMES);
	let stack = frames
		.iter()
		.map(|frame| format!("    at {frame}"))
		.collect::<Vec<_>>()
		.join("\n");

	let report = format!(
		"App panicked in thread '{thread_name}'\n\
		 Panic: {message}\n\
		 Location: {location}\n\
		 Stack trace:\n{stack}"
	);
	logger.emit_blocking(LogLevel::Error, "Crash", &report);

	logger.emit_blocking(
		LogLevel::Error,
		"CrashAnalytics",
		&format!("thread: {thread_name}, panic: {message}"),
	);

	let category = categorize(&message, &stack);
	logger.emit_blocking(LogLevel::Error, "CrashCategory", category.as_str());

	logger.emit_blocking(LogLevel::Info, "CrashMemory", &memory_snapshot());
}

/// Extracts a printable message from the panic payload.
fn payload_message(info: &PanicHookInfo<'_>) -> String {
	if let Some(message) = info.payload().downcast_ref::<&str>() {
		(*message).to_string()
	} else if let Some(message) = info.payload().downcast_ref::<String>() {
		message.clone()
	} else {
		"<non-string panic payload>".to_string()
	}
}

/// One-line snapshot of system memory in MiB.
fn memory_snapshot() -> String {
	use sysinfo::System;

	const MIB: u64 = 1024 * 1024;
	let mut system = System::new();
	system.refresh_memory();

	format!(
		"memory - used: {}MiB, free: {}MiB, available: {}MiB, total: {}MiB",
		system.used_memory() / MIB,
		system.free_memory() / MIB,
		system.available_memory() / MIB,
		system.total_memory() / MIB,
	)
}

/// The panic hook is process-global; every test that installs one takes
/// this lock, across all of the crate's test modules.
#[cfg(test)]
pub(crate) static HOOK_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
	use super::*;
	use crate::logger::LoggerCore;
	use std::sync::atomic::{AtomicUsize, Ordering};

	fn unarmed_logger() -> Logger {
		Logger::from_core(Arc::new(LoggerCore::new()))
	}

	#[test]
	fn categorize_none_unwrap_as_null_pointer() {
		let message = "called `Option::unwrap()` on a `None` value";
		assert_eq!(categorize(message, ""), CrashCategory::NullReference);
	}

	#[test]
	fn categorize_precedence_and_buckets() {
		assert_eq!(
			categorize("memory allocation of 48 bytes failed", ""),
			CrashCategory::Memory
		);
		assert_eq!(categorize("capacity overflow", ""), CrashCategory::Memory);
		assert_eq!(
			categorize("index out of bounds: the len is 3 but the index is 7", ""),
			CrashCategory::Index
		);
		assert_eq!(
			categorize("range end index 5 out of range for slice of length 3", ""),
			CrashCategory::Index
		);
		assert_eq!(
			categorize("downcast to ConfigError failed", ""),
			CrashCategory::Cast
		);
		assert_eq!(
			categorize("permission denied reading keystore", ""),
			CrashCategory::Security
		);
		assert_eq!(
			categorize("connection reset by peer", ""),
			CrashCategory::Network
		);
		assert_eq!(
			categorize("boom", "    at my_app::network::poll"),
			CrashCategory::Network
		);
		assert_eq!(
			categorize("sql constraint violated", ""),
			CrashCategory::Database
		);
		assert_eq!(
			categorize("boom", "    at my_app::ui::render_frame"),
			CrashCategory::Ui
		);
		assert_eq!(categorize("boom", ""), CrashCategory::Unknown);

		// Memory wins over later buckets when both would match.
		assert_eq!(
			categorize("memory mapping of index file failed", ""),
			CrashCategory::Memory
		);
	}

	#[test]
	fn category_names() {
		assert_eq!(CrashCategory::NullReference.as_str(), "NULL_POINTER");
		assert_eq!(CrashCategory::Unknown.as_str(), "UNKNOWN_ERROR");
	}

	#[test]
	fn memory_snapshot_reports_all_fields() {
		let snapshot = memory_snapshot();
		assert!(snapshot.contains("used:"));
		assert!(snapshot.contains("free:"));
		assert!(snapshot.contains("available:"));
		assert!(snapshot.contains("total:"));
	}

	#[test]
	fn previous_hook_runs_exactly_once_per_panic() {
		let _guard = HOOK_LOCK.lock().unwrap();

		static CALLS: AtomicUsize = AtomicUsize::new(0);
		CALLS.store(0, Ordering::SeqCst);

		let original = panic::take_hook();
		panic::set_hook(Box::new(|_| {
			CALLS.fetch_add(1, Ordering::SeqCst);
		}));

		let monitor = CrashMonitor::install(unarmed_logger());

		let result = std::thread::spawn(|| panic!("monitored panic")).join();
		assert!(result.is_err());
		assert_eq!(CALLS.load(Ordering::SeqCst), 1);

		monitor.cleanup();
		panic::set_hook(original);
	}

	#[test]
	fn cleanup_restores_the_captured_hook() {
		let _guard = HOOK_LOCK.lock().unwrap();

		static CALLS: AtomicUsize = AtomicUsize::new(0);
		CALLS.store(0, Ordering::SeqCst);

		let original = panic::take_hook();
		panic::set_hook(Box::new(|_| {
			CALLS.fetch_add(1, Ordering::SeqCst);
		}));

		let monitor = CrashMonitor::install(unarmed_logger());
		monitor.cleanup();

		// After cleanup the counting hook still fires: it was captured and
		// restored, not lost.
		let result = std::thread::spawn(|| panic!("post-cleanup panic")).join();
		assert!(result.is_err());
		assert_eq!(CALLS.load(Ordering::SeqCst), 1);

		panic::set_hook(original);
	}
}
