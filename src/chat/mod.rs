//! Conversation state: rounds, the single in-flight flag, and the hooks a
//! view implements to follow a streaming reply.

mod conversation;
mod error;
mod session;
mod view;

pub use conversation::{Conversation, Round, RoundMut, build_context};
pub use error::{ChatError, SubmitError};
pub use session::{ChatSession, PendingRequest};
pub use view::{DetachedView, EchoView, ViewPort};
