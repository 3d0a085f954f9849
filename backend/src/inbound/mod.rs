//! Inbound adapters that translate operator input into domain service calls
//! while keeping framework details at the edge.
//!
//! The operator console lives under [`cli`].

pub mod cli;
