//! Letterbox Core — shared domain abstractions.
//!
//! This crate defines the traits and types that the letter composition and
//! checkout contexts build on. It contains no infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod repository;
