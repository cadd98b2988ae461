use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, Ident, ItemFn, ReturnType, Type};

const PROFILES: &[&str] = &["default", "high_performance", "memory_efficient"];

/// Expands the `#[fitclass_runtime::main]` attribute macro.
#[must_use]
pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    if input.sig.asyncness.is_none() {
        return Error::new_spanned(
            &input.sig.ident,
            "#[fitclass_runtime::main] can only be used on async functions",
        )
        .to_compile_error();
    }

    if !returns_result(&input.sig.output) {
        return Error::new_spanned(
            &input.sig.output,
            "#[fitclass_runtime::main] requires a Result return type",
        )
        .to_compile_error();
    }

    let profile = if args.is_empty() {
        Ident::new("default", proc_macro2::Span::call_site())
    } else {
        match syn::parse2::<Ident>(args) {
            Ok(ident) if PROFILES.contains(&ident.to_string().as_str()) => ident,
            Ok(ident) => {
                return Error::new_spanned(
                    ident,
                    "unknown runtime profile; use high_performance, memory_efficient or default",
                )
                .to_compile_error();
            },
            Err(err) => return err.to_compile_error(),
        }
    };

    let ItemFn { attrs, vis, sig, block } = input;
    let name = &sig.ident;
    let output = &sig.output;

    quote! {
        #(#attrs)*
        #vis fn #name() #output {
            let config = ::fitclass_runtime::RuntimeConfig::#profile();
            let runtime = ::fitclass_runtime::build_runtime_with_config(&config)?;
            runtime.block_on(async #block)
        }
    }
}

fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = &**ty else {
        return false;
    };
    path.path.segments.last().is_some_and(|seg| seg.ident == "Result")
}
