pub mod lifts;
pub mod safety;
pub mod slopes;
pub mod weather;

pub use lifts::LiftSystem;
pub use safety::SafetySystem;
pub use slopes::SlopeSystem;
pub use weather::WeatherSystem;
