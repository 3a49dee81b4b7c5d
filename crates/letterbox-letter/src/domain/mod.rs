//! Domain model for the Letter Composition context.

pub mod aggregates;
pub mod catalog;
pub mod commands;
pub mod draft;
pub mod events;
pub mod steps;
pub mod wizard;
