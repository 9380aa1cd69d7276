//! Background job definitions
//!
//! One job today: the per-user playlist rotation.

pub mod rotation;

pub use rotation::RotationOutcome;
