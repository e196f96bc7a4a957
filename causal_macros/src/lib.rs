// SPDX-License-Identifier: MIT
// Copyright (c) "2025" . The DeepCausality Authors and Contributors. All Rights Reserved.

//! Procedural macros shared by the causal graph crates: `Constructor` and
//! `Getters` derives, plus a handful of function-like macros that fill in
//! boilerplate trait methods for collection-backed types.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod collections;
mod constructor;
mod getters;

/// Generates a `new` constructor for a struct, or one `new_<variant>`
/// constructor per enum variant. Fields annotated `#[new(default)]` are
/// filled with `Default::default()` instead of becoming a constructor
/// argument.
#[proc_macro_derive(Constructor, attributes(new))]
pub fn derive_constructor(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    constructor::expand(&input).into()
}

/// Generates a `&self -> &FieldType` accessor per named field of a struct.
/// The accessor name defaults to the field name; `#[getter(name = alias)]`
/// overrides it. Only structs with named fields are supported.
#[proc_macro_derive(Getters, attributes(getter))]
pub fn derive_getters(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    getters::expand(&input).into()
}

/// Implements `len(&self) -> usize` by counting `self.iter()`.
#[proc_macro]
pub fn make_len(input: TokenStream) -> TokenStream {
    collections::make_len(input)
}

/// Implements `is_empty(&self) -> bool` via `self.iter().next().is_none()`.
#[proc_macro]
pub fn make_is_empty(input: TokenStream) -> TokenStream {
    collections::make_is_empty(input)
}

/// Implements `get_all_items(&self) -> Vec<&T>` via `self.iter().collect()`.
#[proc_macro]
pub fn make_get_all_items(input: TokenStream) -> TokenStream {
    collections::make_get_all_items(input)
}

/// Implements `to_vec(&self) -> Vec<T>` for a `T: Clone` collection.
#[proc_macro]
pub fn make_vec_to_vec(input: TokenStream) -> TokenStream {
    collections::make_vec_to_vec(input)
}

/// Implements `to_vec(&self) -> Vec<T>` for a `T: Clone` slice.
#[proc_macro]
pub fn make_array_to_vec(input: TokenStream) -> TokenStream {
    collections::make_array_to_vec(input)
}

/// Implements `get_item_by_id(&self, id: IdentificationValue) -> Option<&T>`
/// for a `Vec<T>` of `Identifiable` items, by linear scan.
#[proc_macro]
pub fn make_find_from_iter_values(input: TokenStream) -> TokenStream {
    collections::make_find_from_iter_values(input)
}

/// Implements `get_item_by_id(&self, id: IdentificationValue) -> Option<&V>`
/// for a map of `Identifiable` values, by linear scan over `self.values()`.
#[proc_macro]
pub fn make_find_from_map_values(input: TokenStream) -> TokenStream {
    collections::make_find_from_map_values(input)
}
