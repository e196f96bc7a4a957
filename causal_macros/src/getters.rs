// SPDX-License-Identifier: MIT
// Copyright (c) "2025" . The DeepCausality Authors and Contributors. All Rights Reserved.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident};

pub fn expand(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let data = match &input.data {
        Data::Struct(data) => data,
        _ => panic!("Getters can only be derived for structs"),
    };

    let methods = match &data.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|field| {
                let fname = field.ident.as_ref().unwrap();
                let fty = &field.ty;
                let getter = getter_name(field).unwrap_or_else(|| fname.clone());
                quote! {
                    pub fn #getter(&self) -> &#fty {
                        &self.#fname
                    }
                }
            })
            .collect::<Vec<_>>(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => panic!("Getters requires named fields, not a tuple struct"),
    };

    quote! {
        #[automatically_derived]
        impl #impl_generics #name #ty_generics #where_clause {
            #(#methods)*
        }
    }
}

fn getter_name(field: &Field) -> Option<Ident> {
    let mut name = None;
    for attr in &field.attrs {
        if !attr.path().is_ident("getter") {
            continue;
        }
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value = meta.value()?;
                let ident: Ident = value.parse()?;
                name = Some(ident);
            }
            Ok(())
        });
    }
    name
}
