// ABOUTME: Configuration module root re-exporting environment-based settings
// ABOUTME: All runtime configuration is sourced from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

/// Environment variable parsing into typed server configuration
pub mod environment;
