//! OpenAI-compatible Responses API adapter
//!
//! - [`protocol`] — request/response wire types
//! - [`ResponsesGateway`] — [`LlmGateway`](reviewer_application::LlmGateway)
//!   over `POST {base_url}/responses`

pub mod gateway;
pub mod protocol;

pub use gateway::ResponsesGateway;
