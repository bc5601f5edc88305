// Claude API wire types and retry policy
// Shared by the Claude provider in the providers module

pub(crate) mod retry;
pub(crate) mod types;

pub use retry::{HttpStatusError, RetryPolicy};
pub use types::{ContentBlock, Message, MessageRequest, MessageResponse, Usage};
