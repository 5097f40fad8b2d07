pub mod config;
pub mod engine;
pub mod models;
pub mod resort;
pub mod rng;
pub mod systems;
pub mod web;

pub use config::ResortConfig;
pub use engine::{Engine, EngineBuilder, EngineSettings};
pub use resort::Resort;
