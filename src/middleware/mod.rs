// ABOUTME: HTTP middleware module root
// ABOUTME: CORS policy construction lives here; trace layering is applied in server assembly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

/// CORS policy construction from configuration
pub mod cors;
