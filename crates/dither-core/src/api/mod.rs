//! Public API: request/response processing and the unified error type.

mod engine;
mod error;

pub use engine::{process, try_process, Operation, TransformRequest, TransformResponse};
pub use error::EngineError;
