//! Core types shared across gbserver facilities
//!
//! Canonical field keys and event names used by the error and logging
//! facilities, so that the core, the engine and the HTTP adapter emit
//! the same structured shape.

pub mod schema;
