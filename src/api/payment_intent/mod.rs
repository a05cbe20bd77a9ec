// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Payment intent endpoint
//!
//! Provides `POST /api/create-payment-intent`.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::create_payment_intent_handler;
pub use request::CreatePaymentIntentRequest;
pub use response::CreatePaymentIntentResponse;
