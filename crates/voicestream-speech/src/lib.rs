#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]

pub mod engine;
pub mod error;
pub mod platform;

pub use engine::Engine;
pub use error::EngineError;
pub use platform::SystemSpeechPlatform;
