/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The DeepCausality Authors and Contributors. All Rights Reserved.
 */

//! A belief-propagation and EM-learning engine for causal factor graphs of
//! binary variables connected by deterministic AND/OR/prior factors.

pub mod bp;
pub mod em;
pub mod errors;
pub mod factor;
pub mod graph;
pub mod message;
pub mod prob;
pub mod types;

pub mod prelude {
    pub use crate::bp::{BpEngine, BpProperties, InfType, RunOutcome, UpdateType};
    pub use crate::em::{
        CausalEm, CausalMaxStep, CausalSharedParam, CondProbEstimation, CondProbEstimationConfig, Evidence, ParameterEstimation, TermConditions,
    };
    pub use crate::errors::{
        ArgumentError, CausalError, EmError, FactorGraphError, IncompatibleOperationError,
    };
    pub use crate::factor::CausalFactor;
    pub use crate::graph::CausalFactorGraph;
    pub use crate::message::{AccumulatedVarMessage, EdgeMessage};
    pub use crate::types::{Variable, VarSet};
}
