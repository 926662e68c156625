//! gbserver Engine - service layer
//!
//! `GbService` runs each operation under a single acquisition of the shared
//! store lock and shapes the externally visible response objects. It owns
//! the operation boundary logs; the core crate below it only logs at debug.

pub mod dto;
pub mod service;

pub use service::GbService;
