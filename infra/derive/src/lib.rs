#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the workspace: error enums, HTTP payload models,
//! documented handlers and the runtime entry point.
//!
//! Examples below are `ignore`d because a proc-macro crate cannot use its own macros;
//! see the consuming crates for compiled usages.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro that turns an `async fn main` into a synchronous `main` running on a
/// `fitclass_runtime` profile.
///
/// # Arguments
///
/// * `high_performance` - Server workloads.
/// * `memory_efficient` - Constrained hosts and short-lived processes.
/// * `default` - Worker threads auto-detected (same as passing no argument).
///
/// # Examples
///
/// ```rust,ignore
/// #[fitclass_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro for request/response payloads.
///
/// * **Derives**: adds `Debug`, `Serialize` and `Deserialize` when missing.
/// * **`OpenAPI`**: adds `utoipa::ToSchema` when the consuming crate enables `server`.
/// * **Serde policy**: `rename_all = "snake_case"` and `deny_unknown_fields` unless
///   overridden with `api_model(rename_all = "...", deny_unknown_fields = false)`.
///
/// # Example
///
/// ```rust,ignore
/// use fitclass_derive::api_model;
///
/// #[api_model(deny_unknown_fields = false)]
/// pub struct HealthReport {
///     pub status: String,
///     pub model_loaded: bool,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro attaching `utoipa::path` metadata to an axum handler.
///
/// Accepts the usual `utoipa::path` arguments (`get`, `post`, `path = "..."`,
/// `request_body = ...`, `responses(...)`, `tag = ...`). The metadata is only emitted when
/// the consuming crate builds with its `server` feature.
///
/// # Example
///
/// ```rust,ignore
/// #[api_handler(get, path = "/health", responses((status = OK, body = HealthReport)))]
/// pub async fn health() -> Json<HealthReport> { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Attribute macro for crate error enums.
///
/// # Generated items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * `<Name>Ext` trait with `.context(...)`, implemented for `Result<T, Name>` and for
///   `Result<T, Source>` of every variant holding a `source` field.
/// * `From<Source>` for every such variant.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }` variant
///   exists.
/// * A private `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// Variants use named fields; a `context` field must be `Option<Cow<'static, str>>` and is
/// mandatory for variants with a source.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[fitclass_derive::fitclass_error]
/// pub enum ArtifactError {
///     #[error("Artifact read failed{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal artifact error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, ArtifactError> {
///     std::fs::read_to_string(path).context("Reading model artifact")
/// }
/// ```
#[proc_macro_attribute]
pub fn fitclass_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
