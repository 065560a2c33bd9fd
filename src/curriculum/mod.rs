pub mod error;
pub mod normalizer;
pub mod renderer;
pub mod schema;
pub mod types;
