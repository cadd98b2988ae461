use fitclass_derive::fitclass_error;
use std::borrow::Cow;

#[fitclass_error]
pub enum ArtifactError {
    #[error("Artifact read failed{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Artifact is malformed{}: {message}", format_context(.context))]
    Malformed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal artifact error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<String, ArtifactError> {
    std::fs::read_to_string("/definitely/not/here.json").context("Reading artifact")
}

fn main() {
    let err = read_missing().unwrap_err();
    assert!(err.to_string().starts_with("Artifact read failed (Reading artifact)"));

    let err: ArtifactError = "boom".into();
    assert_eq!(err.to_string(), "Internal artifact error: boom");

    let malformed: Result<(), ArtifactError> =
        Err(ArtifactError::Malformed { message: "no trees".into(), context: None });
    let err = malformed.context("model.json").unwrap_err();
    assert_eq!(err.to_string(), "Artifact is malformed (model.json): no trees");
}
