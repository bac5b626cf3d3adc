pub mod signals;
pub mod telemetry;
