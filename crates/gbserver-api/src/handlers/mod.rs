pub mod branches;
pub mod health;
pub mod pulls;
pub mod repos;
