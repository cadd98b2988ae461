use std::borrow::Cow;

/// Failures of a classifier, at load time or during inference.
#[fitclass_derive::fitclass_error]
pub enum ClassifierError {
    /// No model is available to answer the request.
    #[error("Model not loaded{}: {message}", format_context(.context))]
    NotLoaded { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The frame's columns do not match the model's input schema.
    #[error("Feature schema mismatch{}: {message}", format_context(.context))]
    Schema { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A cell holds a value the model cannot encode.
    #[error("Unexpected feature value{}: {message}", format_context(.context))]
    Value { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unsupported operation{}: {message}", format_context(.context))]
    Unsupported { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The artifact is not valid JSON for the model format.
    #[error("Model artifact error{}: {source}", format_context(.context))]
    Artifact { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The artifact parsed but describes an unusable model.
    #[error("Malformed model{}: {message}", format_context(.context))]
    Malformed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Model I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal classifier error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
