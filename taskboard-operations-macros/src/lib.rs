//! Procedural macros for defining operations
//!
//! `#[operation]` implements `taskboard_operations::Operation` for a struct,
//! reading the parameter list from its named fields. Fields may carry
//! `#[param(alias = "...", kind = "...")]`; the attribute is consumed by
//! `#[operation]` and does not survive into the emitted struct.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, Attribute, DeriveInput, Expr, Field, Fields, GenericArgument, Lit, LitStr,
    Meta, PathArguments, Type,
};

/// Attribute macro for defining an operation
///
/// ```ignore
/// #[operation(verb = "move", noun = "task", description = "Move a task to another column")]
/// #[derive(Debug, Deserialize, Serialize)]
/// pub struct MoveTask {
///     /// The task to move
///     #[param(alias = "taskId")]
///     pub id: TaskId,
///     /// Destination column and optional index
///     #[param(kind = "object")]
///     pub position: Position,
/// }
/// ```
#[proc_macro_attribute]
pub fn operation(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut verb: Option<LitStr> = None;
    let mut noun: Option<LitStr> = None;
    let mut description: Option<LitStr> = None;

    let parser = syn::meta::parser(|meta| {
        let slot = if meta.path.is_ident("verb") {
            &mut verb
        } else if meta.path.is_ident("noun") {
            &mut noun
        } else if meta.path.is_ident("description") {
            &mut description
        } else {
            return Err(meta.error("expected `verb`, `noun` or `description`"));
        };
        *slot = Some(meta.value()?.parse()?);
        Ok(())
    });
    parse_macro_input!(attr with parser);

    let mut input = parse_macro_input!(item as DeriveInput);

    let (verb, noun, description) = match (verb, noun, description) {
        (Some(v), Some(n), Some(d)) => (v, n, d),
        _ => {
            return syn::Error::new_spanned(
                &input.ident,
                "#[operation] needs verb, noun and description",
            )
            .to_compile_error()
            .into()
        }
    };

    let params = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => {
                match fields.named.iter().map(param_meta).collect::<syn::Result<Vec<_>>>() {
                    Ok(params) => params,
                    Err(err) => return err.to_compile_error().into(),
                }
            }
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return syn::Error::new_spanned(&input.ident, "tuple structs are not operations")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(&input.ident, "only structs can be operations")
                .to_compile_error()
                .into()
        }
    };

    strip_param_attrs(&mut input);

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let count = params.len();

    let expanded = quote! {
        #input

        impl #impl_generics taskboard_operations::Operation for #name #ty_generics #where_clause {
            fn verb(&self) -> &'static str {
                #verb
            }

            fn noun(&self) -> &'static str {
                #noun
            }

            fn description(&self) -> &'static str {
                #description
            }

            fn parameters(&self) -> &'static [taskboard_operations::ParamMeta] {
                static PARAMS: [taskboard_operations::ParamMeta; #count] = [#(#params),*];
                &PARAMS
            }
        }
    };

    expanded.into()
}

/// Field attributes cannot be macros, so `#[param]` must not reach rustc
fn strip_param_attrs(input: &mut DeriveInput) {
    if let syn::Data::Struct(data) = &mut input.data {
        for field in data.fields.iter_mut() {
            field.attrs.retain(|attr| !attr.path().is_ident("param"));
        }
    }
}

fn param_meta(field: &Field) -> syn::Result<proc_macro2::TokenStream> {
    let name = field
        .ident
        .as_ref()
        .map(|ident| ident.to_string())
        .unwrap_or_default();
    let description = doc_string(&field.attrs);
    let ParamAttrs { aliases, kind } = param_attrs(&field.attrs)?;
    let param_type = match &kind {
        Some(kind) => kind_type(kind)?,
        None => param_type(&field.ty),
    };
    let required = if outer_ident(&field.ty).as_deref() == Some("Option") {
        quote! {}
    } else {
        quote! { .required() }
    };

    Ok(quote! {
        taskboard_operations::ParamMeta::new(#name)
            .description(#description)
            .param_type(#param_type)
            .aliases(&[#(#aliases),*])
            #required
    })
}

/// Joined `///` lines of the first paragraph
fn doc_string(attrs: &[Attribute]) -> String {
    let mut lines = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("doc")) {
        let Meta::NameValue(nv) = &attr.meta else {
            continue;
        };
        let Expr::Lit(expr) = &nv.value else {
            continue;
        };
        let Lit::Str(s) = &expr.lit else {
            continue;
        };
        let line = s.value().trim().to_string();
        if line.is_empty() && !lines.is_empty() {
            break;
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines.join(" ")
}

/// Values of `#[param(alias = "...", kind = "...")]`
#[derive(Default)]
struct ParamAttrs {
    aliases: Vec<String>,
    kind: Option<LitStr>,
}

fn param_attrs(attrs: &[Attribute]) -> syn::Result<ParamAttrs> {
    let mut found = ParamAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("param")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("alias") {
                let value: LitStr = meta.value()?.parse()?;
                found.aliases.push(value.value());
                Ok(())
            } else if meta.path.is_ident("kind") {
                found.kind = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `alias` or `kind`"))
            }
        })?;
    }
    Ok(found)
}

/// Explicit `kind = "object"` and friends
fn kind_type(kind: &LitStr) -> syn::Result<proc_macro2::TokenStream> {
    let variant = match kind.value().as_str() {
        "string" => quote! { String },
        "integer" => quote! { Integer },
        "number" => quote! { Number },
        "boolean" => quote! { Boolean },
        "array" => quote! { Array },
        "object" => quote! { Object },
        other => {
            return Err(syn::Error::new_spanned(
                kind,
                format!("unknown parameter kind `{}`", other),
            ))
        }
    };
    Ok(quote! { taskboard_operations::ParamType::#variant })
}

fn outer_ident(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(path) => path.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    }
}

fn first_generic(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

fn param_type(ty: &Type) -> proc_macro2::TokenStream {
    let variant = match outer_ident(ty).as_deref() {
        Some("Option") => return first_generic(ty).map(param_type).unwrap_or_else(string_type),
        Some("Vec") => quote! { Array },
        Some("bool") => quote! { Boolean },
        Some("u8" | "u16" | "u32" | "u64" | "usize" | "i8" | "i16" | "i32" | "i64" | "isize") => {
            quote! { Integer }
        }
        Some("f32" | "f64") => quote! { Number },
        Some("Value" | "HashMap" | "BTreeMap") => quote! { Object },
        _ => quote! { String },
    };
    quote! { taskboard_operations::ParamType::#variant }
}

fn string_type() -> proc_macro2::TokenStream {
    quote! { taskboard_operations::ParamType::String }
}
