// SPDX-License-Identifier: MIT
// Copyright (c) "2025" . The DeepCausality Authors and Contributors. All Rights Reserved.

use proc_macro::TokenStream;
use quote::quote;

pub fn make_len(_input: TokenStream) -> TokenStream {
    quote! {
        fn len(&self) -> usize {
            self.iter().count()
        }
    }
    .into()
}

pub fn make_is_empty(_input: TokenStream) -> TokenStream {
    quote! {
        fn is_empty(&self) -> bool {
            self.iter().next().is_none()
        }
    }
    .into()
}

pub fn make_get_all_items(_input: TokenStream) -> TokenStream {
    quote! {
        fn get_all_items(&self) -> Vec<&T> {
            self.iter().collect()
        }
    }
    .into()
}

pub fn make_vec_to_vec(_input: TokenStream) -> TokenStream {
    quote! {
        fn to_vec(&self) -> Vec<T> {
            self.iter().cloned().collect()
        }
    }
    .into()
}

pub fn make_array_to_vec(_input: TokenStream) -> TokenStream {
    quote! {
        fn to_vec(&self) -> Vec<T> {
            self.iter().cloned().collect()
        }
    }
    .into()
}

pub fn make_find_from_iter_values(_input: TokenStream) -> TokenStream {
    quote! {
        fn get_item_by_id(&self, id: IdentificationValue) -> Option<&T> {
            self.iter().find(|item| item.id() == id)
        }
    }
    .into()
}

pub fn make_find_from_map_values(_input: TokenStream) -> TokenStream {
    quote! {
        fn get_item_by_id(&self, id: IdentificationValue) -> Option<&V> {
            self.values().find(|item| item.id() == id)
        }
    }
    .into()
}
