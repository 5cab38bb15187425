// Mindit - OCD elicitation counseling backend
// Library exports

pub mod analysis;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod providers;
pub mod server;
