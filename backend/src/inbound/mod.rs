//! Inbound adapters that translate external triggers into domain service
//! calls while keeping framework details at the edge.
//!
//! HTTP handlers live under [`http`]; the periodic import trigger lives
//! under [`scheduler`].

pub mod http;
pub mod scheduler;
