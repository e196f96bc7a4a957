/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The DeepCausality Authors and Contributors. All Rights Reserved.
 */

//! The message representation passed along factor-graph edges during belief
//! propagation, and the running per-variable accumulator used to avoid
//! recomputing a full incoming-message product for every outgoing edge.

use std::collections::BTreeSet;

use crate::prob::{scale2, scale2_log};

/// The pair of messages (current and freshly computed) carried by one
/// variable-to-factor edge, plus the residual between them used by
/// convergence diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeMessage {
    pub message: [f64; 2],
    pub new_message: [f64; 2],
    pub residual: f64,
}

impl EdgeMessage {
    pub fn new(fill: f64) -> Self {
        Self { message: [fill, fill], new_message: [fill, fill], residual: 0.0 }
    }
}

/// A running product (linear domain) or sum (log domain) of all messages
/// incoming to one state of one variable, with an explicit set of edges
/// whose message was an exact zero (or `-inf` in log domain).
///
/// Tracking the zero-contributing edges separately lets [`Self::residual`]
/// recover the "leave factor `i` out" product even when the full product is
/// zero: if exactly one edge contributed the zero and it is `i`, the
/// leave-one-out product is whatever remains in `msg`; if it is some other
/// edge, the leave-one-out product is still zero; and if two or more edges
/// independently zeroed it out, no single exclusion can undo that.
#[derive(Debug, Clone, Default)]
pub struct AccumulatedVarMessage {
    msg: f64,
    zeros: BTreeSet<usize>,
}

impl AccumulatedVarMessage {
    pub fn new(logdomain: bool) -> Self {
        Self { msg: if logdomain { 0.0 } else { 1.0 }, zeros: BTreeSet::new() }
    }

    /// Resets the accumulator to the empty product/sum, forgetting all
    /// accumulated edges.
    pub fn reset(&mut self, logdomain: bool) {
        self.msg = if logdomain { 0.0 } else { 1.0 };
        self.zeros.clear();
    }

    /// Removes edge `id`'s previously accumulated contribution `orig_msg`
    /// before a fresh one is folded back in via [`Self::accumulate`].
    pub fn reset_edge(&mut self, id: usize, orig_msg: f64, logdomain: bool) -> &mut Self {
        if !self.zeros.remove(&id) {
            if logdomain {
                self.msg -= orig_msg;
            } else {
                self.msg /= orig_msg;
            }
        }
        self
    }

    /// Folds edge `id`'s message `m` into the running product/sum.
    pub fn accumulate(&mut self, logdomain: bool, id: usize, m: f64) {
        if logdomain {
            if m.is_infinite() {
                self.zeros.insert(id);
            } else {
                self.msg += m;
            }
        } else if m == 0.0 {
            self.zeros.insert(id);
        } else {
            self.msg *= m;
        }
    }

    /// The accumulated product/sum with edge `i`'s own contribution `m`
    /// divided (linear) or subtracted (log) back out — i.e. the product of
    /// every *other* incoming edge.
    pub fn residual(&self, logdomain: bool, i: usize, m: f64) -> f64 {
        if self.zeros.len() > 1 {
            return if logdomain { f64::NEG_INFINITY } else { 0.0 };
        }
        if self.zeros.len() == 1 {
            return if self.zeros.contains(&i) {
                self.msg
            } else if logdomain {
                f64::NEG_INFINITY
            } else {
                0.0
            };
        }
        if logdomain { self.msg - m } else { self.msg / m }
    }

    /// The full accumulated product/sum across every incoming edge.
    pub fn total(&self, logdomain: bool) -> f64 {
        if self.zeros.is_empty() {
            self.msg
        } else if logdomain {
            f64::NEG_INFINITY
        } else {
            0.0
        }
    }

    fn msg_mut(&mut self) -> &mut f64 {
        &mut self.msg
    }
}

/// Rescales a variable's state-0/state-1 accumulators together, dispatching
/// to the linear or log-domain scaling rule.
pub fn scale_pair(logdomain: bool, a: &mut AccumulatedVarMessage, b: &mut AccumulatedVarMessage) {
    if logdomain {
        scale2_log(a.msg_mut(), b.msg_mut());
    } else {
        scale2(a.msg_mut(), b.msg_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_and_total_linear() {
        let mut m = AccumulatedVarMessage::new(false);
        m.accumulate(false, 0, 0.5);
        m.accumulate(false, 1, 0.25);
        assert!((m.total(false) - 0.125).abs() < 1e-12);
    }

    #[test]
    fn single_zero_edge_residual_recovers_rest() {
        let mut m = AccumulatedVarMessage::new(false);
        m.accumulate(false, 0, 0.0);
        m.accumulate(false, 1, 0.4);
        assert_eq!(m.total(false), 0.0);
        assert!((m.residual(false, 0, 0.0) - 0.4).abs() < 1e-12);
        assert_eq!(m.residual(false, 1, 0.4), 0.0);
    }

    #[test]
    fn two_zero_edges_residual_always_zero() {
        let mut m = AccumulatedVarMessage::new(false);
        m.accumulate(false, 0, 0.0);
        m.accumulate(false, 1, 0.0);
        assert_eq!(m.residual(false, 0, 0.0), 0.0);
        assert_eq!(m.residual(false, 1, 0.0), 0.0);
    }

    #[test]
    fn reset_edge_undoes_contribution() {
        let mut m = AccumulatedVarMessage::new(false);
        m.accumulate(false, 0, 0.5);
        m.accumulate(false, 1, 0.25);
        m.reset_edge(1, 0.25, false);
        assert!((m.total(false) - 0.5).abs() < 1e-12);
    }
}
