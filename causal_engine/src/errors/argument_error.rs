/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The DeepCausality Authors and Contributors. All Rights Reserved.
 */
use causal_macros::Constructor;
use std::error::Error;
use std::fmt;

#[derive(Constructor, Debug, Clone)]
pub struct ArgumentError(pub String);

impl Error for ArgumentError {}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ArgumentError: {}", self.0)
    }
}
