// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Backtrace capture and formatting for crash reports.

use rustc_demangle::demangle;
use std::backtrace::Backtrace;

/// Captures the current backtrace and returns up to `max` demangled frame
/// names, outermost call last, panic plumbing filtered out.
pub(crate) fn capture_frames(max: usize) -> Vec<String> {
	let backtrace = Backtrace::force_capture();
	parse_frames(&backtrace.to_string(), max)
}

/// Parses backtrace text into demangled frame names.
pub(crate) fn parse_frames(backtrace: &str, max: usize) -> Vec<String> {
	let mut frames = Vec::new();

	for line in backtrace.lines() {
		if frames.len() >= max {
			break;
		}

		let line = line.trim();
		if line.is_empty() {
			continue;
		}
		// Location lines belong to the previous frame.
		if line.starts_with("at ") {
			continue;
		}

		let Some(function) = frame_function(line) else {
			continue;
		};
		if !is_reportable_frame(&function) {
			continue;
		}
		frames.push(function);
	}

	frames
}

/// Extracts and demangles the function name from one backtrace line.
///
/// Lines are typically `"  N: function_name"`; a bare function name is also
/// accepted.
fn frame_function(line: &str) -> Option<String> {
	let function_part = if let Some(idx) = line.find(':') {
		let prefix = &line[..idx];
		if prefix.trim().parse::<u32>().is_ok() {
			line[idx + 1..].trim()
		} else {
			line
		}
	} else {
		line
	};

	if function_part.is_empty() {
		return None;
	}

	Some(demangle(function_part).to_string())
}

/// Panic plumbing and our own reporting frames add noise to a report.
fn is_reportable_frame(function: &str) -> bool {
	const SKIP_PREFIXES: &[&str] = &[
		"std::panicking",
		"std::panic",
		"core::panicking",
		"rust_begin_unwind",
		"rust_panic",
		"__rust_",
		"std::backtrace",
		"backtrace::",
		"logship::backtrace",
		"logship::crash",
	];

	!SKIP_PREFIXES
		.iter()
		.any(|prefix| function.starts_with(prefix))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_extracts_numbered_frames() {
		let text = "   0: std::panicking::begin_panic\n\
		             at /rustc/lib/std/src/panicking.rs:1:1\n\
		    1: my_app::handlers::process\n\
		    2: my_app::main\n";
		let frames = parse_frames(text, 10);
		assert_eq!(
			frames,
			vec!["my_app::handlers::process", "my_app::main"]
		);
	}

	#[test]
	fn parse_caps_frame_count() {
		let text = (0..20)
			.map(|i| format!("   {i}: my_app::level_{i}"))
			.collect::<Vec<_>>()
			.join("\n");
		let frames = parse_frames(&text, 10);
		assert_eq!(frames.len(), 10);
	}

	#[test]
	fn panic_plumbing_is_filtered() {
		assert!(!is_reportable_frame("std::panicking::begin_panic_handler"));
		assert!(!is_reportable_frame("core::panicking::panic_fmt"));
		assert!(!is_reportable_frame("logship::crash::report_panic"));
		assert!(is_reportable_frame("my_app::main"));
		assert!(is_reportable_frame(
			"logship::transport::TransportClient::send_log"
		));
	}

	#[test]
	fn capture_does_not_panic() {
		// Frame content depends on build mode and debug info; only the cap
		// is guaranteed.
		let frames = capture_frames(10);
		assert!(frames.len() <= 10);
	}
}
