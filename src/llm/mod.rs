pub mod extract;
pub mod invoker;
pub mod prompt;
pub mod repair;

pub use extract::*;
pub use invoker::*;
pub use prompt::*;
pub use repair::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Model output is not valid JSON, even after repair")]
    MalformedOutput { raw: String },

    #[error("Expected a JSON {expected} from the model, got {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Model provider returned error (status {status})")]
    Upstream { status: u16, body: String },

    #[error("Cannot reach model provider at {0}")]
    Connect(String),

    #[error("Model request failed: {0}")]
    Transport(String),

    #[error("Cannot decode provider response: {0}")]
    ResponseDecode(String),
}
