//! Errors.

/// Failures that originate in the embedding core itself.
///
/// Failures from view construction are not translated. They propagate as
/// [`anyhow::Error`]s with the model id attached as context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedError {
    /// A view for this model id is already registered in the
    /// [`ViewIndex`](crate::index::ViewIndex).
    AlreadyRendered { model_id: String },
}

impl core::fmt::Display for EmbedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbedError::AlreadyRendered { model_id } => {
                write!(f, "a view for model '{model_id}' is already rendered")
            }
        }
    }
}

impl std::error::Error for EmbedError {}

/// A failed render that no caller was awaiting.
///
/// Renders triggered by a root being added to the document run as detached
/// tasks. When one fails the error is logged and, if the binding was given a
/// sender with [`Embed::with_failures`](crate::embed::Embed::with_failures),
/// delivered here.
#[derive(Debug)]
pub struct RenderFailure {
    pub model_id: String,
    pub error: anyhow::Error,
}

impl core::fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "could not render root '{}': {:#}", self.model_id, self.error)
    }
}
