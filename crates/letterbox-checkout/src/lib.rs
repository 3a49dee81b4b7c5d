//! Letterbox — Checkout bounded context.
//!
//! Prices a letter order from its contents and holds the payment step's
//! details. Everything here is pure: no I/O and no clock.

pub mod payment;
pub mod pricing;
