//! Procedural macros for crudkit
//!
//! Provides `#[derive(CrudModel)]` and `#[derive(CrudEnum)]`, which turn a
//! plain struct or enum into a form-editable domain type. The derives emit
//! property descriptors at compile time, so the library never needs runtime
//! reflection to discover what a domain type looks like.
//!
//! ```ignore
//! #[derive(Default, Clone, PartialEq, Validate, CrudModel)]
//! struct Person {
//!     name: String,
//!     age: i32,
//!     #[crud(skip)]
//!     internal_rev: u64,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, Type};

/// Derive the `CrudSchema` and `CrudModel` traits for a struct with named
/// fields.
///
/// Field types are mapped to value kinds by their type name:
///
/// | Rust type | value kind |
/// |---|---|
/// | `bool` | `Bool` |
/// | `String` | `Text` |
/// | `char` | `Char` |
/// | `i8`..`i64`, `u8`..`u32`, `isize` | `Int` |
/// | `i128`, `u64`, `usize` | `BigInt` |
/// | `f32`, `f64` | `Float` |
/// | `chrono::NaiveDate` | `Date` |
///
/// Two field attributes are recognized:
///
/// - `#[crud(skip)]` — exclude the field from the schema entirely.
/// - `#[crud(select)]` — treat the field as an enumeration; its type must
///   implement `CrudEnum`.
///
/// Any other field type is a compile error, since no widget could be chosen
/// for it.
#[proc_macro_derive(CrudModel, attributes(crud))]
pub fn derive_crud_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_crud_model(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive the `CrudEnum` trait for a fieldless enum, exposing its variant
/// names for dropdown widgets and string round-tripping.
#[proc_macro_derive(CrudEnum)]
pub fn derive_crud_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_crud_enum(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Per-field facts gathered before code generation.
struct FieldInfo<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    kind: FieldKind,
}

enum FieldKind {
    Bool,
    Text,
    Char,
    Int,
    BigInt,
    Float { f32: bool },
    Date,
    Select,
}

fn expand_crud_model(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "CrudModel can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            input,
            "CrudModel requires named fields",
        ));
    };

    let mut infos = Vec::new();
    for field in &fields.named {
        let attrs = parse_crud_attrs(field)?;
        if attrs.skip {
            continue;
        }
        let ident = field.ident.as_ref().expect("named field");
        let kind = if attrs.select {
            FieldKind::Select
        } else {
            resolve_kind(&field.ty).ok_or_else(|| {
                syn::Error::new_spanned(
                    &field.ty,
                    format!(
                        "cannot resolve a value kind for field `{ident}`; \
                         use #[crud(select)] for enumerations or #[crud(skip)] to exclude it"
                    ),
                )
            })?
        };
        infos.push(FieldInfo {
            ident,
            ty: &field.ty,
            kind,
        });
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let descriptors = infos.iter().map(descriptor_tokens);
    let get_arms = infos.iter().map(get_arm_tokens);
    let set_arms = infos.iter().map(set_arm_tokens);

    Ok(quote! {
        impl #impl_generics ::crudkit::schema::CrudSchema for #name #ty_generics #where_clause {
            fn properties() -> &'static [::crudkit::schema::Property] {
                const PROPERTIES: &[::crudkit::schema::Property] = &[#(#descriptors),*];
                PROPERTIES
            }
        }

        impl #impl_generics ::crudkit::schema::CrudModel for #name #ty_generics #where_clause {
            fn get(&self, property: &str) -> ::core::option::Option<::crudkit::schema::FieldValue> {
                match property {
                    #(#get_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn set(
                &mut self,
                property: &str,
                value: ::crudkit::schema::FieldValue,
            ) -> ::core::result::Result<(), ::crudkit::schema::PropertyError> {
                match property {
                    #(#set_arms)*
                    _ => ::core::result::Result::Err(
                        ::crudkit::schema::PropertyError::unknown(property),
                    ),
                }
            }
        }
    })
}

struct CrudAttrs {
    skip: bool,
    select: bool,
}

fn parse_crud_attrs(field: &syn::Field) -> syn::Result<CrudAttrs> {
    let mut attrs = CrudAttrs {
        skip: false,
        select: false,
    };
    for attr in &field.attrs {
        if !attr.path().is_ident("crud") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                attrs.skip = true;
                Ok(())
            } else if meta.path.is_ident("select") {
                attrs.select = true;
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `select`"))
            }
        })?;
    }
    Ok(attrs)
}

/// Map a type to a value kind by the last segment of its path.
fn resolve_kind(ty: &Type) -> Option<FieldKind> {
    let Type::Path(path) = ty else { return None };
    let segment = path.path.segments.last()?;
    let name = segment.ident.to_string();
    match name.as_str() {
        "bool" => Some(FieldKind::Bool),
        "String" => Some(FieldKind::Text),
        "char" => Some(FieldKind::Char),
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "isize" => Some(FieldKind::Int),
        // usize shares the wide lane with u64: reading either through an
        // i64 could wrap above i64::MAX, i128 cannot.
        "i128" | "u64" | "usize" => Some(FieldKind::BigInt),
        "f32" => Some(FieldKind::Float { f32: true }),
        "f64" => Some(FieldKind::Float { f32: false }),
        "NaiveDate" => Some(FieldKind::Date),
        _ => None,
    }
}

fn descriptor_tokens(info: &FieldInfo<'_>) -> TokenStream2 {
    let name = info.ident.to_string();
    let ty = info.ty;
    let kind = match info.kind {
        FieldKind::Bool => quote!(::crudkit::schema::ValueKind::Bool),
        FieldKind::Text => quote!(::crudkit::schema::ValueKind::Text),
        FieldKind::Char => quote!(::crudkit::schema::ValueKind::Char),
        FieldKind::Int => quote!(::crudkit::schema::ValueKind::Int),
        FieldKind::BigInt => quote!(::crudkit::schema::ValueKind::BigInt),
        FieldKind::Float { .. } => quote!(::crudkit::schema::ValueKind::Float),
        FieldKind::Date => quote!(::crudkit::schema::ValueKind::Date),
        FieldKind::Select => quote!(::crudkit::schema::ValueKind::Select {
            variants: <#ty as ::crudkit::schema::CrudEnum>::VARIANTS,
        }),
    };
    quote! {
        ::crudkit::schema::Property { name: #name, kind: #kind }
    }
}

fn get_arm_tokens(info: &FieldInfo<'_>) -> TokenStream2 {
    let ident = info.ident;
    let name = ident.to_string();
    let ty = info.ty;
    let value = match info.kind {
        FieldKind::Bool => quote!(::crudkit::schema::FieldValue::Bool(self.#ident)),
        FieldKind::Text => quote!(::crudkit::schema::FieldValue::Text(self.#ident.clone())),
        FieldKind::Char => quote!(::crudkit::schema::FieldValue::Char(self.#ident)),
        FieldKind::Int => quote!(::crudkit::schema::FieldValue::Int(self.#ident as i64)),
        FieldKind::BigInt => quote!(::crudkit::schema::FieldValue::BigInt(self.#ident as i128)),
        FieldKind::Float { f32: true } => {
            quote!(::crudkit::schema::FieldValue::Float(f64::from(self.#ident)))
        }
        FieldKind::Float { f32: false } => {
            quote!(::crudkit::schema::FieldValue::Float(self.#ident))
        }
        FieldKind::Date => quote!(::crudkit::schema::FieldValue::Date(self.#ident)),
        FieldKind::Select => quote!(::crudkit::schema::FieldValue::Choice(
            <#ty as ::crudkit::schema::CrudEnum>::as_variant(&self.#ident).to_string(),
        )),
    };
    quote! {
        #name => ::core::option::Option::Some(#value),
    }
}

fn set_arm_tokens(info: &FieldInfo<'_>) -> TokenStream2 {
    let ident = info.ident;
    let name = ident.to_string();
    let ty = info.ty;
    let body = match info.kind {
        FieldKind::Bool => quote! {
            ::crudkit::schema::FieldValue::Bool(v) => { self.#ident = v; Ok(()) }
        },
        FieldKind::Text => quote! {
            ::crudkit::schema::FieldValue::Text(v) => { self.#ident = v; Ok(()) }
        },
        FieldKind::Char => quote! {
            ::crudkit::schema::FieldValue::Char(v) => { self.#ident = v; Ok(()) }
        },
        FieldKind::Int => quote! {
            ::crudkit::schema::FieldValue::Int(v) => {
                self.#ident = ::core::convert::TryFrom::try_from(v)
                    .map_err(|_| ::crudkit::schema::PropertyError::out_of_range(#name))?;
                Ok(())
            }
        },
        FieldKind::BigInt => quote! {
            ::crudkit::schema::FieldValue::BigInt(v) => {
                self.#ident = ::core::convert::TryFrom::try_from(v)
                    .map_err(|_| ::crudkit::schema::PropertyError::out_of_range(#name))?;
                Ok(())
            }
        },
        FieldKind::Float { f32: true } => quote! {
            ::crudkit::schema::FieldValue::Float(v) => { self.#ident = v as f32; Ok(()) }
        },
        FieldKind::Float { f32: false } => quote! {
            ::crudkit::schema::FieldValue::Float(v) => { self.#ident = v; Ok(()) }
        },
        FieldKind::Date => quote! {
            ::crudkit::schema::FieldValue::Date(v) => { self.#ident = v; Ok(()) }
        },
        FieldKind::Select => quote! {
            ::crudkit::schema::FieldValue::Choice(v) => {
                self.#ident = <#ty as ::crudkit::schema::CrudEnum>::from_variant(&v)
                    .ok_or_else(|| ::crudkit::schema::PropertyError::unknown_variant(#name, &v))?;
                Ok(())
            }
        },
    };
    quote! {
        #name => match value {
            #body
            other => ::core::result::Result::Err(
                ::crudkit::schema::PropertyError::kind_mismatch(#name, other.kind()),
            ),
        },
    }
}

fn expand_crud_enum(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "CrudEnum can only be derived for enums",
        ));
    };

    let mut names = Vec::new();
    let mut idents = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "CrudEnum requires fieldless variants",
            ));
        }
        names.push(variant.ident.to_string());
        idents.push(&variant.ident);
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::crudkit::schema::CrudEnum for #name #ty_generics #where_clause {
            const VARIANTS: &'static [&'static str] = &[#(#names),*];

            fn as_variant(&self) -> &'static str {
                match self {
                    #(Self::#idents => #names,)*
                }
            }

            fn from_variant(variant: &str) -> ::core::option::Option<Self> {
                match variant {
                    #(#names => ::core::option::Option::Some(Self::#idents),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}
