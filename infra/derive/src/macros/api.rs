use crate::macros::error::derived_names;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Expr, ItemFn, ItemStruct, Lit, LitStr, Meta, Token};

/// Wire field naming used by every HTTP payload in the workspace.
const DEFAULT_RENAME: &str = "snake_case";

#[derive(Default)]
struct ModelOptions {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<bool>,
}

/// Expands the `#[api_model]` attribute macro.
///
/// Adds the missing `Debug`/`Serialize`/`Deserialize` derives, a `ToSchema` derive behind the
/// `server` feature, and the workspace serde policy unless the struct already declares it.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    match try_expand_api_model(args, input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn try_expand_api_model(args: TokenStream, input: ItemStruct) -> syn::Result<TokenStream> {
    let options = parse_model_options(args)?;
    let derives = derived_names(&input.attrs);
    let (serde_rename, serde_deny) = declared_serde_policy(&input)?;

    let mut missing = Vec::new();
    for (name, tokens) in [
        ("Debug", quote! { Debug }),
        ("Serialize", quote! { ::serde::Serialize }),
        ("Deserialize", quote! { ::serde::Deserialize }),
    ] {
        if !derives.contains(name) {
            missing.push(tokens);
        }
    }
    let derive_attr = if missing.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#missing),*)] }
    };

    let schema_attr = if derives.contains("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    };

    let rename = options.rename_all.unwrap_or_else(|| LitStr::new(DEFAULT_RENAME, Span::call_site()));
    let rename_attr = match serde_rename {
        Some(existing) if existing.value() != rename.value() => {
            return Err(syn::Error::new_spanned(
                existing,
                "serde rename_all conflicts with api_model(rename_all = ...)",
            ));
        },
        Some(_) => quote! {},
        None => quote! { #[serde(rename_all = #rename)] },
    };

    let deny = options.deny_unknown_fields.unwrap_or(true);
    let deny_attr = match (serde_deny, deny) {
        (true, false) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "serde(deny_unknown_fields) is set explicitly; remove it to opt out",
            ));
        },
        (false, true) => quote! { #[serde(deny_unknown_fields)] },
        _ => quote! {},
    };

    Ok(quote! {
        #derive_attr
        #schema_attr
        #rename_attr
        #deny_attr
        #input
    })
}

/// Expands the `#[api_handler]` attribute macro.
///
/// The handler body is left untouched; `utoipa::path` metadata is only emitted when the
/// consuming crate builds with its `server` feature.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}

fn parse_model_options(args: TokenStream) -> syn::Result<ModelOptions> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;
    let mut options = ModelOptions::default();

    for meta in metas {
        let Meta::NameValue(pair) = meta else {
            return Err(syn::Error::new_spanned(
                meta,
                "expected `rename_all = \"...\"` or `deny_unknown_fields = bool`",
            ));
        };
        let Expr::Lit(literal) = &pair.value else {
            return Err(syn::Error::new_spanned(&pair.value, "expected a literal value"));
        };

        match (&literal.lit, pair.path.get_ident().map(ToString::to_string).as_deref()) {
            (Lit::Str(value), Some("rename_all")) if options.rename_all.is_none() => {
                options.rename_all = Some(value.clone());
            },
            (Lit::Bool(value), Some("deny_unknown_fields"))
                if options.deny_unknown_fields.is_none() =>
            {
                options.deny_unknown_fields = Some(value.value);
            },
            (_, Some("rename_all" | "deny_unknown_fields")) => {
                return Err(syn::Error::new_spanned(pair, "duplicate or mistyped argument"));
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    pair.path,
                    "unsupported argument; expected rename_all or deny_unknown_fields",
                ));
            },
        }
    }

    Ok(options)
}

fn declared_serde_policy(input: &ItemStruct) -> syn::Result<(Option<LitStr>, bool)> {
    let mut rename_all = None;
    let mut deny_unknown_fields = false;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                rename_all = Some(meta.value()?.parse::<LitStr>()?);
            } else if meta.path.is_ident("deny_unknown_fields") {
                deny_unknown_fields = true;
            } else if meta.input.peek(Token![=]) {
                // Other container options (e.g. `default`, `tag = "..."`) pass through.
                let _: Expr = meta.value()?.parse()?;
            }
            Ok(())
        })?;
    }

    Ok((rename_all, deny_unknown_fields))
}
