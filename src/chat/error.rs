use thiserror::Error;

use crate::providers::error::ProviderError;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A response is still in progress")]
    Responding,

    #[error("Prompt is empty")]
    EmptyPrompt,
}

#[derive(Error, Debug)]
pub enum ChatError {
    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}
