/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The DeepCausality Authors and Contributors. All Rights Reserved.
 */

//! The bipartite variable/factor graph itself: adjacency, hard-evidence
//! clamping with undo, structural queries, and the plain-text I/O format.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use crate::errors::{CausalError, FactorGraphError};
use crate::factor::CausalFactor;
use crate::types::{VarSet, Variable};

/// A causal factor graph: an ordered list of binary [`Variable`]s and the
/// [`CausalFactor`]s relating them, with dual variable↔factor adjacency and
/// a backup map supporting temporary hard-evidence clamping.
#[derive(Debug, Clone, Default)]
pub struct CausalFactorGraph {
    vars: Vec<Variable>,
    var_index: HashMap<usize, usize>,
    factors: Vec<CausalFactor>,
    backup: BTreeMap<usize, CausalFactor>,
}

impl CausalFactorGraph {
    pub fn new(vars: Vec<Variable>, factors: Vec<CausalFactor>) -> Self {
        let var_index = vars.iter().enumerate().map(|(i, v)| (*v.label(), i)).collect();
        Self { vars, var_index, factors, backup: BTreeMap::new() }
    }

    pub fn nr_vars(&self) -> usize {
        self.vars.len()
    }

    pub fn nr_factors(&self) -> usize {
        self.factors.len()
    }

    pub fn var(&self, i: usize) -> Variable {
        self.vars[i]
    }

    pub fn vars(&self) -> &[Variable] {
        &self.vars
    }

    pub fn factor(&self, idx: usize) -> &CausalFactor {
        &self.factors[idx]
    }

    pub fn factors(&self) -> &[CausalFactor] {
        &self.factors
    }

    pub fn find_var(&self, v: Variable) -> Option<usize> {
        self.var_index.get(v.label()).copied()
    }

    /// Indices of the factors touching variable `i` (by position, not
    /// label), in factor-declaration order.
    pub fn nb_v(&self, i: usize) -> Vec<usize> {
        let v = self.vars[i];
        self.factors
            .iter()
            .enumerate()
            .filter(|(_, f)| f.vars().contains(&v))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Positions of the variables touching factor `factor_idx`.
    pub fn nb_f(&self, factor_idx: usize) -> Vec<usize> {
        self.factors[factor_idx]
            .vars()
            .iter()
            .filter_map(|v| self.find_var(*v))
            .collect()
    }

    /// All variables sharing at least one factor with variable `i`,
    /// excluding `i` itself.
    pub fn delta(&self, i: usize) -> VarSet {
        let v = self.vars[i];
        let mut out = VarSet::new();
        for fidx in self.nb_v(i) {
            for u in self.factors[fidx].vars() {
                if u != v {
                    out.insert(u);
                }
            }
        }
        out
    }

    /// `true` if every factor touches at most two variables.
    pub fn is_pairwise(&self) -> bool {
        self.factors.iter().all(|f| f.vars().len() <= 2)
    }

    /// The Markov graph: an adjacency list over variable positions, two
    /// variables being adjacent iff they co-occur in some factor.
    pub fn markov_graph(&self) -> Vec<VarSet> {
        (0..self.nr_vars()).map(|i| self.delta(i)).collect()
    }

    /// `true` if no other factor's variable set is a strict superset of
    /// factor `big_idx`'s.
    pub fn is_maximal(&self, big_idx: usize) -> bool {
        let vs = VarSet::from_iter(self.factors[big_idx].vars());
        !self.factors.iter().enumerate().any(|(j, f)| {
            j != big_idx && {
                let other = VarSet::from_iter(f.vars());
                other.is_superset_of(&vs) && other.len() > vs.len()
            }
        })
    }

    /// The index of a maximal factor whose variable set is a superset of
    /// factor `idx`'s own (possibly `idx` itself, if it is already maximal).
    pub fn maximal_factor(&self, idx: usize) -> usize {
        let vs = VarSet::from_iter(self.factors[idx].vars());
        self.factors
            .iter()
            .enumerate()
            .find(|(j, f)| {
                *j == idx || {
                    let other = VarSet::from_iter(f.vars());
                    other.is_superset_of(&vs)
                }
            })
            .map(|(j, _)| j)
            .unwrap_or(idx)
    }

    /// Log-probability of a full state assignment under the product of this
    /// graph's factors, evaluated deterministically (AND/OR gates collapse
    /// to `p` or `1 - p` per whether `head` agrees with the gate's output).
    pub fn log_score(&self, statevec: &[usize]) -> f64 {
        self.factors
            .iter()
            .map(|f| factor_log_prob(f, statevec, &self.var_index))
            .sum()
    }

    /// Hard-clamps variable `i` (by position) to state `x`, mutating every
    /// factor touching it. If `backup` is set, the pre-clamp state of every
    /// touched factor is recorded so [`Self::restore_factors`] can undo it.
    pub fn clamp(&mut self, i: usize, x: usize, backup: bool) {
        let v = self.vars[i];
        for (idx, f) in self.factors.iter_mut().enumerate() {
            if f.vars().contains(&v) {
                if backup {
                    self.backup.entry(idx).or_insert_with(|| f.clone());
                }
                *f = f.gen_clamped(v, x);
            }
        }
    }

    /// Clamps several variables (by position) to respective states in one
    /// pass, each with its own optional backup.
    pub fn clamp_var(&mut self, assignments: &[(usize, usize)], backup: bool) {
        for (i, x) in assignments {
            self.clamp(*i, *x, backup);
        }
    }

    /// Returns a clone of this graph with variable `i` clamped to `x`,
    /// leaving `self` untouched.
    pub fn clamped(&self, i: usize, x: usize) -> Self {
        let mut out = self.clone();
        out.clamp(i, x, false);
        out
    }

    /// Overwrites factor `idx`'s own probability in place — used by EM's
    /// maximization step to write back a re-estimated Singleton prior.
    /// Panics if `idx` does not name a `Singleton` factor.
    pub fn set_singleton_prob(&mut self, idx: usize, p: f64) {
        match &mut self.factors[idx] {
            CausalFactor::Singleton { p: slot, .. } => *slot = p,
            other => panic!("set_singleton_prob called on non-singleton factor {other:?}"),
        }
    }

    pub fn backup_factors(&mut self, indices: &[usize]) {
        for &idx in indices {
            self.backup.entry(idx).or_insert_with(|| self.factors[idx].clone());
        }
    }

    pub fn backup_varset(&mut self, vs: &VarSet) {
        let indices: Vec<usize> = (0..self.nr_factors())
            .filter(|&idx| self.factors[idx].vars().iter().any(|v| vs.contains(v)))
            .collect();
        self.backup_factors(&indices);
    }

    /// Restores every backed-up factor and clears the backup map.
    pub fn restore_factors(&mut self) {
        for (idx, f) in self.backup.split_off(&0) {
            self.factors[idx] = f;
        }
    }

    /// Restores only the backed-up factors touching `vs`, leaving the rest
    /// of the backup map intact.
    pub fn restore_varset(&mut self, vs: &VarSet) {
        let keys: Vec<usize> = self
            .backup
            .keys()
            .copied()
            .filter(|&idx| self.factors[idx].vars().iter().any(|v| vs.contains(v)))
            .collect();
        for k in keys {
            if let Some(f) = self.backup.remove(&k) {
                self.factors[k] = f;
            }
        }
    }

    /// Parses the whitespace-sensitive causal factor graph text format:
    ///
    /// ```text
    /// <numFactors>
    ///
    /// <head_label>
    /// <type_char>              # 'I' Singleton, '*' DefiniteAnd, '+' DefiniteOr
    /// <p>
    /// <body_len>                (And/Or only)
    /// <body_label_1> ... <body_label_n>   (And/Or only)
    ///
    /// <head_label>
    /// ...
    /// ```
    ///
    /// Blank lines separate factors; comment lines start with `#` and may
    /// precede any data token. Variable cardinality is implicitly 2, and the
    /// variable set itself is never listed explicitly — it is the set of
    /// every label mentioned as a head or body variable, in first-seen
    /// order. For And/Or factors, a leak probability may be appended
    /// directly after the type character (e.g. `*0.02`); if absent the
    /// factor is deterministic (`p = 1`, `p_default = 0`).
    pub fn read_str(text: &str) -> Result<Self, CausalError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l))
            .filter(|(_, l)| !l.trim().is_empty() && !l.trim_start().starts_with('#'));

        let (nfac_line, nfac_str) = lines.next().ok_or_else(|| FactorGraphError::Malformed {
            line: 0,
            message: "missing factor count".into(),
        })?;
        let nfactors: usize = nfac_str.trim().parse().map_err(|_| FactorGraphError::Malformed {
            line: nfac_line,
            message: "factor count is not an integer".into(),
        })?;

        let mut var_order: Vec<usize> = Vec::new();
        let mut seen: std::collections::HashSet<usize> = std::collections::HashSet::new();
        let mut see = |label: usize, vars: &mut Vec<usize>, seen: &mut std::collections::HashSet<usize>| {
            if seen.insert(label) {
                vars.push(label);
            }
        };

        let mut factors = Vec::with_capacity(nfactors);
        for _ in 0..nfactors {
            let (head_line, head_str) = lines.next().ok_or_else(|| FactorGraphError::Malformed {
                line: 0,
                message: "unexpected end of input while reading a factor head".into(),
            })?;
            let head_label: usize = head_str.trim().parse().map_err(|_| FactorGraphError::Malformed {
                line: head_line,
                message: "head label is not an integer".into(),
            })?;
            see(head_label, &mut var_order, &mut seen);
            let head = Variable::new(head_label);

            let (type_line, type_str) = lines.next().ok_or_else(|| FactorGraphError::Malformed {
                line: head_line,
                message: "missing type character".into(),
            })?;
            let type_str = type_str.trim();
            let ch = type_str.chars().next().ok_or_else(|| FactorGraphError::Malformed {
                line: type_line,
                message: "empty type character".into(),
            })?;
            let leak: Option<f64> = type_str[ch.len_utf8()..].trim().parse().ok();

            let (p_line, p_str) = lines.next().ok_or_else(|| FactorGraphError::Malformed {
                line: type_line,
                message: "missing p".into(),
            })?;
            let p: f64 = p_str.trim().parse().map_err(|_| FactorGraphError::Malformed {
                line: p_line,
                message: "p is not a real number".into(),
            })?;

            match ch {
                'I' => factors.push(CausalFactor::singleton(head, p)),
                '*' | '+' => {
                    let (len_line, len_str) = lines.next().ok_or_else(|| FactorGraphError::Malformed {
                        line: p_line,
                        message: "missing body length".into(),
                    })?;
                    let declared: usize = len_str.trim().parse().map_err(|_| FactorGraphError::Malformed {
                        line: len_line,
                        message: "body length is not an integer".into(),
                    })?;
                    let (body_line, body_str) = lines.next().ok_or_else(|| FactorGraphError::Malformed {
                        line: len_line,
                        message: "missing body line".into(),
                    })?;
                    let body: Vec<Variable> = body_str
                        .split_whitespace()
                        .map(|s| {
                            let label: usize = s.parse().map_err(|_| FactorGraphError::Malformed {
                                line: body_line,
                                message: "body variable is not an integer".into(),
                            })?;
                            see(label, &mut var_order, &mut seen);
                            Ok(Variable::new(label))
                        })
                        .collect::<Result<_, FactorGraphError>>()?;
                    if body.len() != declared {
                        return Err(FactorGraphError::BodyLengthMismatch {
                            line: body_line,
                            declared,
                            found: body.len(),
                        }
                        .into());
                    }
                    let p_default = leak.unwrap_or(0.0);
                    let p = if leak.is_some() { p } else { 1.0 };
                    if ch == '*' {
                        factors.push(CausalFactor::definite_and(head, body, p, p_default));
                    } else {
                        factors.push(CausalFactor::definite_or(head, body, p, p_default));
                    }
                }
                other => {
                    return Err(FactorGraphError::UnknownFactorType { line: type_line, ch: other }.into());
                }
            }
        }

        let vars = var_order.into_iter().map(Variable::new).collect();
        Ok(CausalFactorGraph::new(vars, factors))
    }

    /// Serializes this graph back into the format [`Self::read_str`] reads.
    pub fn write_str(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.nr_factors());
        for f in &self.factors {
            out.push('\n');
            match f {
                CausalFactor::Singleton { head, p, .. } => {
                    let _ = writeln!(out, "{}", head.label());
                    let _ = writeln!(out, "I");
                    let _ = writeln!(out, "{p}");
                }
                CausalFactor::DefiniteAnd { head, body, p, p_default, .. } => {
                    write_gated(&mut out, '*', *head, body, *p, *p_default);
                }
                CausalFactor::DefiniteOr { head, body, p, p_default, .. } => {
                    write_gated(&mut out, '+', *head, body, *p, *p_default);
                }
            }
        }
        out
    }
}

fn write_gated(out: &mut String, ch: char, head: Variable, body: &[Variable], p: f64, p_default: f64) {
    let _ = writeln!(out, "{}", head.label());
    if p == 1.0 && p_default == 0.0 {
        let _ = writeln!(out, "{ch}");
    } else {
        let _ = writeln!(out, "{ch}{p_default}");
    }
    let _ = writeln!(out, "{p}");
    let _ = writeln!(out, "{}", body.len());
    let body_str = body.iter().map(|v| v.label().to_string()).collect::<Vec<_>>().join(" ");
    let _ = writeln!(out, "{body_str}");
}

fn factor_log_prob(f: &CausalFactor, statevec: &[usize], var_index: &HashMap<usize, usize>) -> f64 {
    let state_of = |v: &crate::types::Variable| statevec[var_index[v.label()]];
    match f {
        CausalFactor::Singleton { head, p, .. } => {
            let x = state_of(head);
            (if x == 1 { *p } else { 1.0 - *p }).ln()
        }
        CausalFactor::DefiniteAnd { head, body, p, p_default, .. } => {
            let gate = body.iter().all(|b| state_of(b) == 1) as usize;
            let x = state_of(head);
            let prob = if gate == 1 {
                if x == 1 { *p } else { 1.0 - *p }
            } else if x == 1 {
                *p_default
            } else {
                1.0 - *p_default
            };
            prob.ln()
        }
        CausalFactor::DefiniteOr { head, body, p, p_default, .. } => {
            let gate = body.iter().any(|b| state_of(b) == 1) as usize;
            let x = state_of(head);
            let prob = if gate == 1 {
                if x == 1 { *p } else { 1.0 - *p }
            } else if x == 1 {
                *p_default
            } else {
                1.0 - *p_default
            };
            prob.ln()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> CausalFactorGraph {
        let vars = vec![Variable::new(0), Variable::new(1), Variable::new(2)];
        let factors = vec![
            CausalFactor::singleton(Variable::new(0), 0.3),
            CausalFactor::singleton(Variable::new(1), 0.6),
            CausalFactor::definite_and(Variable::new(2), vec![Variable::new(0), Variable::new(1)], 0.95, 0.02),
        ];
        CausalFactorGraph::new(vars, factors)
    }

    #[test]
    fn roundtrip_through_text_format() {
        let g = sample_graph();
        let text = g.write_str();
        let g2 = CausalFactorGraph::read_str(&text).unwrap();
        assert_eq!(g2.nr_vars(), 3);
        assert_eq!(g2.nr_factors(), 3);
        assert_eq!(g2.write_str(), text);
    }

    #[test]
    fn delta_and_markov_graph() {
        let g = sample_graph();
        let d = g.delta(0);
        assert!(d.contains(&Variable::new(2)));
        assert_eq!(g.markov_graph().len(), 3);
    }

    #[test]
    fn is_pairwise_false_when_and_has_two_parents() {
        let g = sample_graph();
        assert!(!g.is_pairwise());
    }

    #[test]
    fn clamp_and_restore_roundtrips() {
        let mut g = sample_graph();
        let before = g.factor(0).clone();
        g.clamp(0, 1, true);
        assert_ne!(g.factor(0), &before);
        g.restore_factors();
        assert_eq!(g.factor(0), &before);
    }

    #[test]
    fn malformed_body_length_is_reported() {
        let text = "1\n\n1\n*0.1\n0.9\n5\n0\n";
        let err = CausalFactorGraph::read_str(text).unwrap_err();
        assert!(matches!(err, CausalError::FactorGraph(FactorGraphError::BodyLengthMismatch { .. })));
    }

    #[test]
    fn comment_lines_are_skipped() {
        let text = "# a comment\n1\n\n# head var\n7\nI\n0.25\n";
        let g = CausalFactorGraph::read_str(text).unwrap();
        assert_eq!(g.nr_vars(), 1);
        assert_eq!(g.factor(0).prob(), 0.25);
    }

    #[test]
    fn leak_probability_is_parsed_from_type_line() {
        let text = "1\n\n3\n*0.02\n0.95\n2\n1 2\n";
        let g = CausalFactorGraph::read_str(text).unwrap();
        match g.factor(0) {
            CausalFactor::DefiniteAnd { p, p_default, .. } => {
                assert_eq!(*p, 0.95);
                assert_eq!(*p_default, 0.02);
            }
            other => panic!("expected DefiniteAnd, got {other:?}"),
        }
    }
}
