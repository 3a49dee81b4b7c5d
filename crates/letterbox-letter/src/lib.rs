//! Letterbox — Letter Composition bounded context.
//!
//! Responsible for the letter creation wizard: the order draft, the step
//! sequence and its validation, navigation between steps, and placing the
//! finished order.

pub mod application;
pub mod domain;
