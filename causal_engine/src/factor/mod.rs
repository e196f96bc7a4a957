/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The DeepCausality Authors and Contributors. All Rights Reserved.
 */

//! The three factor kinds a causal factor graph is built from: a prior
//! [`CausalFactor::Singleton`] and the two deterministic combinators
//! [`CausalFactor::DefiniteAnd`] / [`CausalFactor::DefiniteOr`].

use crate::types::Variable;

/// A single factor in a causal factor graph.
///
/// `Singleton` attaches a prior probability directly to `head`. `DefiniteAnd`
/// and `DefiniteOr` relate `head` to its `body` variables through a noisy
/// AND/OR gate: with probability `p` the gate is "active" and `head` equals
/// the logical AND/OR of `body`; with probability `1 - p` the gate leaks and
/// `head` is drawn from the `p_default` prior instead.
#[derive(Debug, Clone, PartialEq)]
pub enum CausalFactor {
    Singleton {
        head: Variable,
        p: f64,
        /// `Some(mask)` after [`CausalFactor::gen_clamped`] has hard-clamped
        /// `head` to a specific state; `mask[x]` is `1.0` for the clamped
        /// state and `0.0` otherwise.
        head_clamped: Option<[f64; 2]>,
    },
    DefiniteAnd {
        head: Variable,
        body: Vec<Variable>,
        p: f64,
        p_default: f64,
        head_clamped: Option<[f64; 2]>,
    },
    DefiniteOr {
        head: Variable,
        body: Vec<Variable>,
        p: f64,
        p_default: f64,
        head_clamped: Option<[f64; 2]>,
    },
}

impl CausalFactor {
    pub fn singleton(head: Variable, p: f64) -> Self {
        CausalFactor::Singleton { head, p, head_clamped: None }
    }

    pub fn definite_and(head: Variable, body: Vec<Variable>, p: f64, p_default: f64) -> Self {
        CausalFactor::DefiniteAnd { head, body, p, p_default, head_clamped: None }
    }

    pub fn definite_or(head: Variable, body: Vec<Variable>, p: f64, p_default: f64) -> Self {
        CausalFactor::DefiniteOr { head, body, p, p_default, head_clamped: None }
    }

    pub fn head(&self) -> Variable {
        match self {
            CausalFactor::Singleton { head, .. }
            | CausalFactor::DefiniteAnd { head, .. }
            | CausalFactor::DefiniteOr { head, .. } => *head,
        }
    }

    pub fn body(&self) -> &[Variable] {
        match self {
            CausalFactor::Singleton { .. } => &[],
            CausalFactor::DefiniteAnd { body, .. } | CausalFactor::DefiniteOr { body, .. } => body,
        }
    }

    /// `p`, the probability that the gate fires (or the prior, for a
    /// singleton).
    pub fn prob(&self) -> f64 {
        match self {
            CausalFactor::Singleton { p, .. }
            | CausalFactor::DefiniteAnd { p, .. }
            | CausalFactor::DefiniteOr { p, .. } => *p,
        }
    }

    /// `1 - p`'s companion prior, used when the gate leaks. `0.0` for a
    /// singleton, which has no leak branch.
    pub fn prob_default(&self) -> f64 {
        match self {
            CausalFactor::Singleton { .. } => 0.0,
            CausalFactor::DefiniteAnd { p_default, .. } | CausalFactor::DefiniteOr { p_default, .. } => *p_default,
        }
    }

    pub fn head_clamped(&self) -> Option<[f64; 2]> {
        match self {
            CausalFactor::Singleton { head_clamped, .. }
            | CausalFactor::DefiniteAnd { head_clamped, .. }
            | CausalFactor::DefiniteOr { head_clamped, .. } => *head_clamped,
        }
    }

    /// All variables this factor touches, head first.
    pub fn vars(&self) -> Vec<Variable> {
        let mut v = vec![self.head()];
        v.extend_from_slice(self.body());
        v
    }

    /// Hard-clamps variable `v` to state `x` within this factor, returning a
    /// new factor with the clamp applied.
    ///
    /// If `v` is this factor's head, `x` is folded into `head_clamped` as a
    /// one-hot mask; clamping the same head twice multiplies the masks
    /// together (so a conflicting double clamp degenerates to the
    /// all-zero mask used elsewhere to signal an unsatisfiable factor).
    /// If `v` is a body variable, it is simply erased from `body` (the
    /// constant value is folded into the caller's evidence rather than this
    /// factor, matching how `DefiniteAnd`/`DefiniteOr` fold clamped
    /// neighbors into `mask` during message computation). Clamping a
    /// variable unrelated to this factor is a no-op that logs a warning.
    pub fn gen_clamped(&self, v: Variable, x: usize) -> Self {
        debug_assert!(x < 2);
        match self {
            CausalFactor::Singleton { head, p, head_clamped } => {
                if *head == v {
                    let new_mask = one_hot(x);
                    let merged = match head_clamped {
                        Some(old) => mul_mask(*old, new_mask),
                        None => new_mask,
                    };
                    CausalFactor::Singleton { head: *head, p: *p, head_clamped: Some(merged) }
                } else {
                    tracing::warn!(var = v.label(), factor_head = head.label(), "clamp target unrelated to singleton factor");
                    self.clone()
                }
            }
            CausalFactor::DefiniteAnd { head, body, p, p_default, head_clamped } => {
                if *head == v {
                    let new_mask = one_hot(x);
                    let merged = match head_clamped {
                        Some(old) => {
                            tracing::warn!(var = v.label(), "head already clamped; multiplying masks");
                            mul_mask(*old, new_mask)
                        }
                        None => new_mask,
                    };
                    CausalFactor::DefiniteAnd {
                        head: *head,
                        body: body.clone(),
                        p: *p,
                        p_default: *p_default,
                        head_clamped: Some(merged),
                    }
                } else {
                    let mut new_body = body.clone();
                    new_body.retain(|b| *b != v);
                    CausalFactor::DefiniteAnd {
                        head: *head,
                        body: new_body,
                        p: *p,
                        p_default: *p_default,
                        head_clamped: *head_clamped,
                    }
                }
            }
            CausalFactor::DefiniteOr { head, body, p, p_default, head_clamped } => {
                if *head == v {
                    let new_mask = one_hot(x);
                    let merged = match head_clamped {
                        Some(old) => {
                            tracing::warn!(var = v.label(), "head already clamped; multiplying masks");
                            mul_mask(*old, new_mask)
                        }
                        None => new_mask,
                    };
                    CausalFactor::DefiniteOr {
                        head: *head,
                        body: body.clone(),
                        p: *p,
                        p_default: *p_default,
                        head_clamped: Some(merged),
                    }
                } else {
                    let mut new_body = body.clone();
                    new_body.retain(|b| *b != v);
                    CausalFactor::DefiniteOr {
                        head: *head,
                        body: new_body,
                        p: *p,
                        p_default: *p_default,
                        head_clamped: *head_clamped,
                    }
                }
            }
        }
    }
}

fn one_hot(x: usize) -> [f64; 2] {
    if x == 0 { [1.0, 0.0] } else { [0.0, 1.0] }
}

fn mul_mask(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [a[0] * b[0], a[1] * b[1]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_singleton_head() {
        let f = CausalFactor::singleton(Variable::new(0), 0.3);
        let clamped = f.gen_clamped(Variable::new(0), 1);
        assert_eq!(clamped.head_clamped(), Some([0.0, 1.0]));
    }

    #[test]
    fn clamp_and_body_var_removes_it() {
        let f = CausalFactor::definite_and(Variable::new(0), vec![Variable::new(1), Variable::new(2)], 0.9, 0.01);
        let clamped = f.gen_clamped(Variable::new(1), 1);
        assert_eq!(clamped.body(), &[Variable::new(2)]);
    }

    #[test]
    fn double_clamp_multiplies_masks_to_zero_on_conflict() {
        let f = CausalFactor::singleton(Variable::new(0), 0.3);
        let c1 = f.gen_clamped(Variable::new(0), 0);
        let c2 = c1.gen_clamped(Variable::new(0), 1);
        assert_eq!(c2.head_clamped(), Some([0.0, 0.0]));
    }

    #[test]
    fn clamp_unrelated_var_is_noop() {
        let f = CausalFactor::singleton(Variable::new(0), 0.3);
        let clamped = f.gen_clamped(Variable::new(7), 1);
        assert_eq!(clamped, f);
    }
}
