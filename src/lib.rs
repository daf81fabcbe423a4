pub mod config;
pub mod guardrails;
pub mod interaction;
pub mod llm;
pub mod telemetry;

pub use opentelemetry;
pub use reqwest;
pub use serde;
pub use serde_json;
