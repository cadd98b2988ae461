use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DataEnum, DeriveInput, Field, Fields, GenericArgument, Ident, Type};

/// What the macro needs to know about a single error variant.
struct VariantShape<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
    cfgs: Vec<&'a Attribute>,
}

impl VariantShape<'_> {
    fn is_internal(&self) -> bool {
        self.ident == "Internal"
    }
}

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "fitclass_error can only be used on enums")
            .to_compile_error();
    };

    let shapes = match analyze(data) {
        Ok(shapes) => shapes,
        Err(err) => return err.to_compile_error(),
    };

    let name = &input.ident;
    let ext = format_ident!("{name}Ext");

    let derives = missing_derives(&input.attrs);
    let context_trait = render_context_trait(name, &ext, &shapes);
    let source_impls = shapes.iter().filter(|s| !s.is_internal()).filter_map(|s| {
        let (field, ty) = s.source?;
        Some(render_source_impls(name, &ext, s, field, ty))
    });
    let internal_impls = shapes.iter().find(|s| s.is_internal()).map(|s| {
        let cfgs = &s.cfgs;
        quote! {
            #(#cfgs)*
            impl From<&'static str> for #name {
                #[inline]
                fn from(message: &'static str) -> Self {
                    Self::Internal { message: ::std::borrow::Cow::Borrowed(message), context: None }
                }
            }

            #(#cfgs)*
            impl From<String> for #name {
                #[inline]
                fn from(message: String) -> Self {
                    Self::Internal { message: ::std::borrow::Cow::Owned(message), context: None }
                }
            }
        }
    });

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #context_trait
        #(#source_impls)*
        #internal_impls

        #[allow(dead_code)]
        fn format_context(
            context: &Option<::std::borrow::Cow<'static, str>>,
        ) -> ::std::borrow::Cow<'static, str> {
            match context {
                Some(c) => ::std::borrow::Cow::Owned(format!(" ({c})")),
                None => ::std::borrow::Cow::Borrowed(""),
            }
        }
    }
}

fn analyze(data: &DataEnum) -> syn::Result<Vec<VariantShape<'_>>> {
    let mut shapes = Vec::with_capacity(data.variants.len());

    for variant in &data.variants {
        let Fields::Named(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "fitclass_error variants must use named fields (`message`/`source` + `context`)",
            ));
        };

        let mut source = None;
        let mut has_context = false;

        for field in &fields.named {
            let Some(ident) = field.ident.as_ref() else { continue };
            if ident == "context" {
                if !is_optional_cow(&field.ty) {
                    return Err(syn::Error::new_spanned(
                        &field.ty,
                        "context field must be Option<Cow<'static, str>>",
                    ));
                }
                has_context = true;
            } else if source.is_none() && is_source_field(ident, field) {
                source = Some((ident, &field.ty));
            }
        }

        if source.is_some() && !has_context {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "variants with a source need a `context: Option<Cow<'static, str>>` field",
            ));
        }

        shapes.push(VariantShape {
            ident: &variant.ident,
            source,
            has_context,
            cfgs: variant.attrs.iter().filter(|a| a.path().is_ident("cfg")).collect(),
        });
    }

    Ok(shapes)
}

fn is_source_field(ident: &Ident, field: &Field) -> bool {
    ident == "source"
        || field.attrs.iter().any(|a| a.path().is_ident("source") || a.path().is_ident("from"))
}

fn render_context_trait(name: &Ident, ext: &Ident, shapes: &[VariantShape<'_>]) -> TokenStream {
    let arms = shapes.iter().filter(|s| s.has_context).map(|s| {
        let ident = s.ident;
        let cfgs = &s.cfgs;
        quote! { #(#cfgs)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    quote! {
        /// Attaches human-readable context to a failed result.
        pub trait #ext<T> {
            fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    #[allow(unreachable_patterns)]
                    match &mut err {
                        #(#arms)*
                        _ => {}
                    }
                    err
                })
            }
        }
    }
}

fn render_source_impls(
    name: &Ident,
    ext: &Ident,
    shape: &VariantShape<'_>,
    field: &Ident,
    ty: &Type,
) -> TokenStream {
    let variant = shape.ident;
    let cfgs = &shape.cfgs;

    quote! {
        #(#cfgs)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self {
                Self::#variant { #field, context: None }
            }
        }

        #(#cfgs)*
        #[automatically_derived]
        impl<T> #ext<T> for ::std::result::Result<T, #ty> {
            #[inline]
            fn context(
                self,
                context: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::std::result::Result<T, #name> {
                self.map_err(|#field| #name::#variant { #field, context: Some(context.into()) })
            }
        }
    }
}

fn missing_derives(attrs: &[Attribute]) -> TokenStream {
    let present = derived_names(attrs);
    let mut wanted = Vec::new();
    if !present.contains("Debug") {
        wanted.push(quote! { Debug });
    }
    if !present.contains("Error") {
        wanted.push(quote! { ::thiserror::Error });
    }
    if wanted.is_empty() { quote! {} } else { quote! { #[derive(#(#wanted),*)] } }
}

pub fn derived_names(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                names.insert(last.ident.to_string());
            }
            Ok(())
        });
    }
    names
}

/// Matches `Option<Cow<'static, str>>`, with or without path prefixes.
fn is_optional_cow(ty: &Type) -> bool {
    let Some(inner) = single_generic(ty, "Option") else {
        return false;
    };
    let Type::Path(path) = inner else {
        return false;
    };
    let Some(cow) = path.path.segments.last().filter(|seg| seg.ident == "Cow") else {
        return false;
    };
    let syn::PathArguments::AngleBracketed(args) = &cow.arguments else {
        return false;
    };

    let mut args = args.args.iter();
    let static_lifetime =
        matches!(args.next(), Some(GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let str_type = matches!(
        args.next(),
        Some(GenericArgument::Type(Type::Path(p)))
            if p.path.segments.last().is_some_and(|seg| seg.ident == "str")
    );

    static_lifetime && str_type && args.next().is_none()
}

fn single_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last().filter(|seg| seg.ident == wrapper)?;
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
