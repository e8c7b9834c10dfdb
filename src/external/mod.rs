// ABOUTME: External API client modules (payments provider)
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Quarters Property Software

//! External API Clients
//!
//! Clients for external services used by the Quarters server.

pub mod payments;

pub use payments::{PaymentsClient, PaymentsClientConfig};
