//! Seed loading
//!
//! Provides:
//! - Seed Format v0 schema
//! - YAML parser with validation
//! - Importer that replays the seed through the store ops
//! - The built-in default fixture

pub mod format_v0;
pub mod importer;
pub mod parser;

pub use format_v0::SeedV0;
pub use importer::{build_store, import_seed, load_default_seed, DEFAULT_SEED};
pub use parser::{parse_seed_file, parse_seed_str};
