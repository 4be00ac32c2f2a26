// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, GenericParam, Generics};

/// `#[derive(Describe)]` macro: generates a `safemarshal::Describe` impl
///
/// Supports:
/// - Structs with named, tuple or no fields (described as records)
/// - Enums (described as unions, one record per variant)
/// - Generic types (every type parameter must implement `Describe`)
///
/// Fields marked `#[describe(skip)]` are left out of the description.
///
/// Example:
/// ```ignore
/// use safemarshal::Describe;
///
/// #[derive(Describe)]
/// struct Node {
///     value: i64,
///     next: Option<Box<Node>>,   // Recursion is fine
///     #[describe(skip)]
///     cache: Option<Box<dyn std::any::Any>>,
/// }
/// ```
#[proc_macro_derive(Describe, attributes(describe))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let type_name = name.to_string();

    let kind = match &input.data {
        Data::Struct(data) => {
            let fields = describe_fields(&data.fields)?;
            quote! {
                ::safemarshal::TypeKind::Struct(::std::vec![#(#fields),*])
            }
        }
        Data::Enum(data) => {
            let mut cases = Vec::with_capacity(data.variants.len());
            for variant in &data.variants {
                let variant_name = variant.ident.to_string();
                let fields = describe_fields(&variant.fields)?;
                cases.push(quote! {
                    ::safemarshal::UnionCase::new(
                        #variant_name,
                        ::std::sync::Arc::new(::safemarshal::TypeDescriptor::new(
                            ::std::format!("{}::{}", ::std::any::type_name::<Self>(), #variant_name),
                            #variant_name,
                            ::safemarshal::TypeKind::Struct(::std::vec![#(#fields),*]),
                        )),
                    )
                });
            }
            quote! {
                ::safemarshal::TypeKind::Union(::std::vec![#(#cases),*])
            }
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Describe cannot be derived for unions",
            ))
        }
    };

    let generics = add_describe_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::safemarshal::Describe for #name #ty_generics #where_clause {
            // `registry` goes unused for types without fields
            #[allow(unused_variables)]
            fn describe(
                registry: &mut ::safemarshal::HashMapTypeRegistry,
            ) -> ::std::sync::Arc<::safemarshal::TypeDescriptor> {
                registry.declare::<Self>(#type_name, |registry| #kind)
            }
        }
    })
}

/// One `FieldDescriptor` expression per described field, in declaration order.
///
/// Tuple fields are named by position.
fn describe_fields(fields: &Fields) -> syn::Result<Vec<proc_macro2::TokenStream>> {
    let mut described = Vec::with_capacity(fields.len());
    for (index, field) in fields.iter().enumerate() {
        if is_skipped(field)? {
            continue;
        }
        let field_name = field
            .ident
            .as_ref()
            .map_or_else(|| index.to_string(), ToString::to_string);
        let field_type = &field.ty;
        described.push(quote! {
            ::safemarshal::FieldDescriptor::new(
                #field_name,
                <#field_type as ::safemarshal::Describe>::describe(registry),
            )
        });
    }
    Ok(described)
}

fn is_skipped(field: &syn::Field) -> syn::Result<bool> {
    let mut skip = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("describe") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported describe option, expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

fn add_describe_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param
                .bounds
                .push(parse_quote!(::safemarshal::Describe));
        }
    }
    generics
}
