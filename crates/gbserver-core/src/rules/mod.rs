pub mod invariants;
pub mod validation;

pub use invariants::validate_store;
