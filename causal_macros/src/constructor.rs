// SPDX-License-Identifier: MIT
// Copyright (c) "2025" . The DeepCausality Authors and Contributors. All Rights Reserved.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Field, Fields};

pub fn expand(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => expand_fields(name, None, &data.fields),
        Data::Enum(data) => {
            let methods = data.variants.iter().map(|variant| {
                let ctor_name = format_ident!("new_{}", to_snake_case(&variant.ident.to_string()));
                expand_fields(name, Some((&variant.ident, &ctor_name)), &variant.fields)
            });
            quote! { #(#methods)* }
        }
        Data::Union(_) => panic!("Constructor cannot be derived for unions"),
    };

    quote! {
        #[automatically_derived]
        impl #impl_generics #name #ty_generics #where_clause {
            #body
        }
    }
}

/// Builds one `new`/`new_<variant>` associated function for a set of fields.
/// `variant` is `None` for a plain struct and `Some((variant_ident, fn_name))`
/// for an enum variant.
fn expand_fields(
    self_name: &Ident,
    variant: Option<(&Ident, &Ident)>,
    fields: &Fields,
) -> TokenStream {
    let fn_name = match variant {
        Some((_, fn_name)) => fn_name.clone(),
        None => format_ident!("new"),
    };

    let constructed = |inits: TokenStream| match variant {
        Some((variant_ident, _)) => quote! { #self_name::#variant_ident #inits },
        None => quote! { #self_name #inits },
    };

    match fields {
        Fields::Named(named) => {
            let mut params = Vec::new();
            let mut inits = Vec::new();
            for field in &named.named {
                let fname = field.ident.as_ref().unwrap();
                let fty = &field.ty;
                if is_default_field(field) {
                    inits.push(quote! { #fname: ::core::default::Default::default() });
                } else {
                    params.push(quote! { #fname: #fty });
                    inits.push(quote! { #fname });
                }
            }
            let body = constructed(quote! { { #(#inits),* } });
            quote! {
                pub fn #fn_name(#(#params),*) -> Self {
                    #body
                }
            }
        }
        Fields::Unnamed(unnamed) => {
            let mut params = Vec::new();
            let mut inits = Vec::new();
            for (i, field) in unnamed.unnamed.iter().enumerate() {
                let fty = &field.ty;
                if is_default_field(field) {
                    inits.push(quote! { ::core::default::Default::default() });
                } else {
                    let argname = format_ident!("field{}", i);
                    params.push(quote! { #argname: #fty });
                    inits.push(quote! { #argname });
                }
            }
            let body = constructed(quote! { ( #(#inits),* ) });
            quote! {
                pub fn #fn_name(#(#params),*) -> Self {
                    #body
                }
            }
        }
        Fields::Unit => {
            let body = constructed(quote! {});
            quote! {
                pub fn #fn_name() -> Self {
                    #body
                }
            }
        }
    }
}

fn is_default_field(field: &Field) -> bool {
    field.attrs.iter().any(|attr| {
        if !attr.path().is_ident("new") {
            return false;
        }
        let mut found = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                found = true;
            }
            Ok(())
        });
        found
    })
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, c) in name.char_indices() {
        if c.is_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
