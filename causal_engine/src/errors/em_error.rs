/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The DeepCausality Authors and Contributors. All Rights Reserved.
 */
use causal_macros::Constructor;
use std::error::Error;
use std::fmt;

#[derive(Constructor, Debug, Clone)]
pub struct EmError(pub String);

impl Error for EmError {}

impl fmt::Display for EmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EmError: {}", self.0)
    }
}
