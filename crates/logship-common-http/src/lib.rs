// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client construction for logship.
//!
//! This crate provides a pre-configured reqwest client builder with a
//! consistent User-Agent header and a helper that applies the SDK's
//! connect/read timeout pair.

mod client;

pub use client::{builder, builder_with_timeouts, new_client, user_agent};
