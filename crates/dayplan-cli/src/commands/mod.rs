pub mod advise;
pub mod analyze;
pub mod common;
pub mod config;
pub mod plan;
pub mod score;
pub mod slots;
