//! CLI command implementations.

pub(crate) mod classify;
pub(crate) mod dump;
pub(crate) mod symbols;
