//! Data Transfer Objects (DTOs) for the HTTP API contract.
//!
//! These types pin the JSON shape of request bodies and responses. Domain
//! types that are already camelCase (`SpeechRequest`, `Session`) are
//! returned as-is.

pub mod requests;
pub mod voices;

pub use requests::{CreatedDto, ListRequestsQuery, PingBody, StatusUpdateBody, SubmitRequestBody};
pub use voices::VoiceDto;
