// Shared types
pub mod types;

// Modular tools
pub mod clean;
pub mod plan;
pub mod validate;
