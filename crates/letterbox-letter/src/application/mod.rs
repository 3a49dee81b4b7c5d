//! Application services for the Letter Composition context.

pub mod command_handlers;
pub mod query_handlers;

#[cfg(test)]
pub(crate) mod fixtures;
