//! Derive macro for `pawtrip_shared::Validate`.
//!
//! Supported field rules:
//!
//! - `non_empty`: string-like fields must contain non-whitespace text.
//! - `iso_date`: string-like fields must look like `YYYY-MM-DD`.
//! - `range(min = .., max = ..)`: numeric fields must fall in the inclusive range.
//! - `custom = "path"`: call `path(&field)` and propagate its error.
//!
//! `Option<T>` fields are only checked when present.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{ToTokens, quote};
use syn::{
    Attribute, Data, DeriveInput, Fields, GenericArgument, Ident, Lit, LitStr, Path,
    PathArguments, Type,
};

/// Derive `pawtrip_shared::Validate` with field-level checks.
#[proc_macro_derive(Validate, attributes(validate))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand_validate(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_validate(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let error_ty = parse_error_type(&input.attrs)?;
    let Data::Struct(struct_data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Validate can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &struct_data.fields else {
        return Err(syn::Error::new_spanned(
            &struct_data.fields,
            "Validate requires named fields",
        ));
    };

    let mut checks = Vec::new();
    for field in &fields.named {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let (field_name, rules) = parse_field_rules(&field.attrs, ident)?;
        let (is_option, inner_ty) = unwrap_option(&field.ty);
        let target = FieldTarget {
            ident,
            name: LitStr::new(&field_name, Span::call_site()),
            ty: inner_ty,
            error_ty: &error_ty,
        };
        for rule in rules {
            let body = match rule {
                Rule::NonEmpty => target.non_empty()?,
                Rule::IsoDate => target.iso_date()?,
                Rule::Range { min, max } => target.range(&min, &max)?,
                Rule::Custom(path) => {
                    checks.push(target.custom(&path, is_option));
                    continue;
                },
            };
            checks.push(target.bind(body, is_option));
        }
    }

    let name = &input.ident;
    Ok(quote! {
        impl pawtrip_shared::Validate for #name {
            type Error = #error_ty;

            fn validate(&self) -> Result<(), Self::Error> {
                #(#checks)*
                Ok(())
            }
        }
    })
}

fn parse_error_type(attrs: &[Attribute]) -> Result<Path, syn::Error> {
    let mut error_ty: Option<Path> = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("validate")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("error") {
                return Err(meta.error("unsupported validate attribute on container"));
            }
            if error_ty.is_some() {
                return Err(meta.error("duplicate validate(error = ...)"));
            }
            let value: LitStr = meta.value()?.parse()?;
            error_ty = Some(value.parse()?);
            Ok(())
        })?;
    }

    error_ty.ok_or_else(|| {
        syn::Error::new(
            Span::call_site(),
            "missing #[validate(error = \"path\")] on struct",
        )
    })
}

#[derive(Debug)]
enum Rule {
    NonEmpty,
    IsoDate,
    Range { min: Lit, max: Lit },
    Custom(Path),
}

fn parse_field_rules(attrs: &[Attribute], ident: &Ident) -> Result<(String, Vec<Rule>), syn::Error> {
    let mut rules = Vec::new();
    let mut renamed: Option<String> = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("validate")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("field") {
                if renamed.is_some() {
                    return Err(meta.error("duplicate validate(field = ...)"));
                }
                let value: LitStr = meta.value()?.parse()?;
                renamed = Some(value.value());
            } else if meta.path.is_ident("non_empty") {
                rules.push(Rule::NonEmpty);
            } else if meta.path.is_ident("iso_date") {
                rules.push(Rule::IsoDate);
            } else if meta.path.is_ident("custom") {
                let value: LitStr = meta.value()?.parse()?;
                rules.push(Rule::Custom(value.parse()?));
            } else if meta.path.is_ident("range") {
                let mut min: Option<Lit> = None;
                let mut max: Option<Lit> = None;
                meta.parse_nested_meta(|nested| {
                    if nested.path.is_ident("min") {
                        min = Some(nested.value()?.parse()?);
                        Ok(())
                    } else if nested.path.is_ident("max") {
                        max = Some(nested.value()?.parse()?);
                        Ok(())
                    } else {
                        Err(nested.error("unsupported range attribute"))
                    }
                })?;
                let (Some(min), Some(max)) = (min, max) else {
                    return Err(meta.error("range requires both min and max"));
                };
                rules.push(Rule::Range { min, max });
            } else {
                return Err(meta.error("unsupported validate attribute on field"));
            }
            Ok(())
        })?;
    }
    Ok((renamed.unwrap_or_else(|| ident.to_string()), rules))
}

/// A single field being expanded; checks read the field through `value`.
struct FieldTarget<'a> {
    ident: &'a Ident,
    name: LitStr,
    ty: &'a Type,
    error_ty: &'a Path,
}

impl FieldTarget<'_> {
    /// Bind `value` to the field (or its `Some` payload) and run `body`.
    fn bind(&self, body: TokenStream2, is_option: bool) -> TokenStream2 {
        let ident = self.ident;
        if is_option {
            quote! {
                if let Some(value) = self.#ident.as_ref() {
                    #body
                }
            }
        } else {
            quote! {
                {
                    let value = &self.#ident;
                    #body
                }
            }
        }
    }

    fn non_empty(&self) -> Result<TokenStream2, syn::Error> {
        self.require_string("non_empty")?;
        let (name, error_ty) = (&self.name, self.error_ty);
        Ok(quote! {
            if value.trim().is_empty() {
                return Err(<#error_ty as pawtrip_shared::ValidationError>::empty(#name));
            }
        })
    }

    fn iso_date(&self) -> Result<TokenStream2, syn::Error> {
        self.require_string("iso_date")?;
        let (name, error_ty) = (&self.name, self.error_ty);
        Ok(quote! {
            if !pawtrip_shared::is_iso_date_shape(value.trim()) {
                return Err(<#error_ty as pawtrip_shared::ValidationError>::invalid_date(
                    #name,
                    value.to_string(),
                ));
            }
        })
    }

    fn range(&self, min: &Lit, max: &Lit) -> Result<TokenStream2, syn::Error> {
        let kind = numeric_kind(self.ty).ok_or_else(|| {
            syn::Error::new_spanned(self.ty, "range can only be used on numeric fields")
        })?;
        let (name, error_ty) = (&self.name, self.error_ty);
        let min_str = LitStr::new(&lit_to_string(min), Span::call_site());
        let max_str = LitStr::new(&lit_to_string(max), Span::call_site());
        let out_of_range = quote! {
            return Err(<#error_ty as pawtrip_shared::ValidationError>::out_of_range(
                #name,
                value.to_string(),
                #min_str.to_string(),
                #max_str.to_string(),
            ));
        };
        let finite_check = matches!(kind, NumberKind::Float).then(|| {
            quote! {
                if !value.is_finite() {
                    #out_of_range
                }
            }
        });
        Ok(quote! {
            let value = *value;
            #finite_check
            if !(#min..=#max).contains(&value) {
                #out_of_range
            }
        })
    }

    fn custom(&self, path: &Path, is_option: bool) -> TokenStream2 {
        let ident = self.ident;
        if is_option {
            quote! { #path(self.#ident.as_ref())?; }
        } else {
            quote! { #path(&self.#ident)?; }
        }
    }

    fn require_string(&self, rule: &str) -> Result<(), syn::Error> {
        if is_string_like(self.ty) {
            Ok(())
        } else {
            Err(syn::Error::new_spanned(
                self.ty,
                format!("{rule} can only be used on string-like fields"),
            ))
        }
    }
}

fn unwrap_option(ty: &Type) -> (bool, &Type) {
    generic_inner(ty, "Option").map_or((false, ty), |inner| (true, inner))
}

/// Returns the first type argument when `ty` is `wrapper<T>`.
fn generic_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

fn last_ident(ty: &Type) -> Option<String> {
    match ty {
        Type::Reference(reference) => last_ident(&reference.elem),
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

fn is_string_like(ty: &Type) -> bool {
    if let Type::Reference(reference) = ty {
        return is_string_like(&reference.elem);
    }
    if let Some(inner) = generic_inner(ty, "Box") {
        return last_ident(inner).as_deref() == Some("str");
    }
    matches!(last_ident(ty).as_deref(), Some("String" | "str"))
}

#[derive(Copy, Clone, Debug)]
enum NumberKind {
    Integer,
    Float,
}

fn numeric_kind(ty: &Type) -> Option<NumberKind> {
    match last_ident(ty)?.as_str() {
        "f32" | "f64" => Some(NumberKind::Float),
        "u8" | "u16" | "u32" | "u64" | "u128" | "usize" | "i8" | "i16" | "i32" | "i64"
        | "i128" | "isize" => Some(NumberKind::Integer),
        _ => None,
    }
}

fn lit_to_string(lit: &Lit) -> String {
    match lit {
        Lit::Int(value) => value.base10_digits().to_string(),
        Lit::Float(value) => value.base10_digits().to_string(),
        Lit::Str(value) => value.value(),
        _ => lit.to_token_stream().to_string(),
    }
}
