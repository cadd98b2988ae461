use fitclass_classifier::ClassifierError;
use fitclass_prediction::ServiceError;
use std::borrow::Cow;

#[fitclass_derive::fitclass_error]
pub enum PlatformError {
    #[error("Model error{}: {source}", format_context(.context))]
    Model { source: ClassifierError, context: Option<Cow<'static, str>> },
    #[error("Service error{}: {source}", format_context(.context))]
    Service { source: ServiceError, context: Option<Cow<'static, str>> },
    #[error("Platform error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
