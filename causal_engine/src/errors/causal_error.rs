/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The DeepCausality Authors and Contributors. All Rights Reserved.
 */
use crate::errors::{
    ArgumentError, EmError, FactorGraphError, IncompatibleOperationError,
};
use std::error::Error;
use std::fmt;

/// Umbrella error returned by every fallible public operation of this crate.
#[derive(Debug, Clone)]
pub enum CausalError {
    Argument(ArgumentError),
    FactorGraph(FactorGraphError),
    IncompatibleOperation(IncompatibleOperationError),
    Em(EmError),
}

impl Error for CausalError {}

impl fmt::Display for CausalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CausalError::Argument(e) => write!(f, "{e}"),
            CausalError::FactorGraph(e) => write!(f, "{e}"),
            CausalError::IncompatibleOperation(e) => write!(f, "{e}"),
            CausalError::Em(e) => write!(f, "{e}"),
        }
    }
}

impl From<ArgumentError> for CausalError {
    fn from(err: ArgumentError) -> Self {
        CausalError::Argument(err)
    }
}

impl From<FactorGraphError> for CausalError {
    fn from(err: FactorGraphError) -> Self {
        CausalError::FactorGraph(err)
    }
}

impl From<IncompatibleOperationError> for CausalError {
    fn from(err: IncompatibleOperationError) -> Self {
        CausalError::IncompatibleOperation(err)
    }
}

impl From<EmError> for CausalError {
    fn from(err: EmError) -> Self {
        CausalError::Em(err)
    }
}
