use fitclass_classifier::ClassifierError;
use fitclass_deriver::ValidationError;
use std::borrow::Cow;

/// A specialized [`ServiceError`] enum of this crate.
#[fitclass_derive::fitclass_error]
pub enum ServiceError {
    /// The caller's input broke one or more constraints; nothing was classified.
    #[error("Validation failed{}: {source}", format_context(.context))]
    Validation { source: ValidationError, context: Option<Cow<'static, str>> },

    /// The classifier failed or panicked while handling a valid input.
    #[error("Prediction failed{}: {source}", format_context(.context))]
    Prediction { source: ClassifierError, context: Option<Cow<'static, str>> },

    #[error("Internal service error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
