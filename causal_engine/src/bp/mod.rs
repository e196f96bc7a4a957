/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The DeepCausality Authors and Contributors. All Rights Reserved.
 */

//! Loopy belief propagation specialized to deterministic AND/OR factors: the
//! closed-form message update of [`calc_new_message`] replaces the generic
//! brute-force sum over `2^|body|` states a dense BP implementation would
//! otherwise need.

use std::collections::VecDeque;

use crate::factor::CausalFactor;
use crate::graph::CausalFactorGraph;
use crate::message::{scale_pair, AccumulatedVarMessage, EdgeMessage};
use crate::prob::{belief_f_dist_linf, normalize2, scale2};

/// Message-passing schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateType {
    /// Every edge recomputed from the previous sweep's messages, committed
    /// together, then the per-variable accumulators rebuilt from scratch.
    #[default]
    Parall,
    /// Edges updated one at a time in a fixed, declaration order, with the
    /// accumulator for the updated variable refreshed incrementally.
    SeqFix,
    /// Like `SeqFix`, but the edge order is reshuffled before every sweep.
    SeqRnd,
}

/// Inference objective. Only sum-product (marginal belief) inference is
/// implemented; max-product is out of scope for this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfType {
    #[default]
    SumProd,
}

/// Tunables for a [`BpEngine`] run, mirroring the classic loopy-BP knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BpProperties {
    pub tol: f64,
    pub maxiter: usize,
    pub maxtime: f64,
    pub verbose: usize,
    pub logdomain: bool,
    pub damping: f64,
    pub updates: UpdateType,
    pub inference: InfType,
    /// Skips the `e1`/equal-arm correction term in [`calc_new_message`],
    /// trading a small amount of accuracy on degenerate (tied) messages for
    /// speed. Mirrors the original engine's `fastcausal` switch.
    pub fastcausal: bool,
}

impl Default for BpProperties {
    fn default() -> Self {
        Self {
            tol: 1e-9,
            maxiter: 10_000,
            maxtime: f64::INFINITY,
            verbose: 0,
            logdomain: false,
            damping: 0.0,
            updates: UpdateType::default(),
            inference: InfType::default(),
            fastcausal: false,
        }
    }
}

/// Why a [`BpEngine::run_extended`] call stopped iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    AllConverged,
    BigFracConverged,
    Diverged,
}

/// A belief-propagation solver bound to one [`CausalFactorGraph`].
///
/// Holds the per-edge message state, the per-variable running
/// [`AccumulatedVarMessage`] accumulators, and enough adjacency bookkeeping
/// to avoid recomputing the factor graph's structure on every sweep.
pub struct BpEngine {
    graph: CausalFactorGraph,
    props: BpProperties,
    /// `edges[i][_I]` is the message on the edge between variable `i` and
    /// its `_I`-th neighboring factor.
    edges: Vec<Vec<EdgeMessage>>,
    /// `nb_of_var[i]` lists the factor indices neighboring variable `i`, in
    /// the same order as `edges[i]`.
    nb_of_var: Vec<Vec<usize>>,
    /// `nb_of_factor[factor_idx]` lists the variable positions neighboring
    /// that factor.
    nb_of_factor: Vec<Vec<usize>>,
    /// `dual_of_factor[factor_idx][k]` is the index of `factor_idx` within
    /// `nb_of_var[nb_of_factor[factor_idx][k]]` — the "dual edge" lookup the
    /// original engine calls `j.dual`.
    dual_of_factor: Vec<Vec<usize>>,
    var_msgs: Vec<[AccumulatedVarMessage; 2]>,
    old_beliefs_v: Vec<[f64; 2]>,
    old_beliefs_f: Vec<Vec<f64>>,
    update_seq: Vec<(usize, usize)>,
    iters: usize,
    maxdiff: f64,
    low_pass_beliefs: Vec<f64>,
    rng_state: u64,
}

impl BpEngine {
    pub fn new(graph: CausalFactorGraph, props: BpProperties) -> Self {
        let nvars = graph.nr_vars();
        let nfactors = graph.nr_factors();

        let nb_of_var: Vec<Vec<usize>> = (0..nvars).map(|i| graph.nb_v(i)).collect();
        let nb_of_factor: Vec<Vec<usize>> = (0..nfactors).map(|i| graph.nb_f(i)).collect();
        let dual_of_factor: Vec<Vec<usize>> = nb_of_factor
            .iter()
            .enumerate()
            .map(|(fidx, neighbors)| {
                neighbors
                    .iter()
                    .map(|&j| nb_of_var[j].iter().position(|&f| f == fidx).expect("adjacency is symmetric"))
                    .collect()
            })
            .collect();

        let fill = if props.logdomain { 0.0 } else { 1.0 };
        let edges: Vec<Vec<EdgeMessage>> = nb_of_var.iter().map(|n| vec![EdgeMessage::new(fill); n.len()]).collect();

        let mut update_seq = Vec::new();
        for fidx in 0..nfactors {
            for &j in &nb_of_factor[fidx] {
                let dual = nb_of_var[j].iter().position(|&f| f == fidx).unwrap();
                update_seq.push((j, dual));
            }
        }

        let var_msgs = (0..nvars).map(|_| [AccumulatedVarMessage::new(props.logdomain), AccumulatedVarMessage::new(props.logdomain)]).collect();
        let old_beliefs_v = vec![[0.5, 0.5]; nvars];
        let old_beliefs_f = graph.factors().iter().map(|f| vec![0.0; f.vars().len()]).collect();

        Self {
            graph,
            props,
            edges,
            nb_of_var,
            nb_of_factor,
            dual_of_factor,
            var_msgs,
            old_beliefs_v,
            old_beliefs_f,
            update_seq,
            iters: 0,
            maxdiff: 0.0,
            low_pass_beliefs: vec![0.5; nvars],
            rng_state: 0x9E3779B97F4A7C15,
        }
    }

    pub fn graph(&self) -> &CausalFactorGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut CausalFactorGraph {
        &mut self.graph
    }

    pub fn iterations(&self) -> usize {
        self.iters
    }

    pub fn max_diff(&self) -> f64 {
        self.maxdiff
    }

    /// Resets every message to the uniform (non-informative) value and
    /// clears the accumulators. Must be called before the first [`Self::run`].
    pub fn init(&mut self) {
        let c = if self.props.logdomain { 0.0 } else { 1.0 };
        for i in 0..self.graph.nr_vars() {
            self.var_msgs[i][0].reset(self.props.logdomain);
            self.var_msgs[i][1].reset(self.props.logdomain);
            for e in &mut self.edges[i] {
                e.message = [c, c];
                e.new_message = [c, c];
            }
        }
        self.iters = 0;
    }

    /// Reinitializes only the variables named in `positions`, leaving the
    /// rest of the message state untouched. Used after a partial clamp.
    pub fn init_partial(&mut self, positions: &[usize]) {
        let c = if self.props.logdomain { 0.0 } else { 1.0 };
        for &i in positions {
            self.var_msgs[i][0].reset(self.props.logdomain);
            self.var_msgs[i][1].reset(self.props.logdomain);
            for e in &mut self.edges[i] {
                e.message = [c, c];
                e.new_message = [c, c];
            }
        }
        self.iters = 0;
    }

    fn next_rand(&mut self) -> u64 {
        // xorshift64*, good enough for reshuffling the sweep order.
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng_state = x;
        x
    }

    fn shuffle_update_seq(&mut self) {
        let n = self.update_seq.len();
        for i in (1..n).rev() {
            let j = (self.next_rand() as usize) % (i + 1);
            self.update_seq.swap(i, j);
        }
    }

    /// Incoming message from variable `j` toward factor `factor_idx`, i.e.
    /// the leave-one-out product of every message accumulated into `j`
    /// *except* the one `factor_idx` itself sent it. `dual` is only used to
    /// find the right edge slot (`edges[j][dual]`, `j`'s local position for
    /// `factor_idx`); the *exclusion* id passed to
    /// [`AccumulatedVarMessage::residual`] must be `factor_idx`, the global
    /// factor index the `zeros` set is keyed by everywhere else
    /// (`update_message`, `rebuild_var_msgs_parall`) — using `dual` there
    /// would check membership in the wrong index space.
    fn incoming(&self, j: usize, dual: usize, factor_idx: usize) -> (f64, f64) {
        let orig = self.edges[j][dual].message;
        let logdomain = self.props.logdomain;
        let mut p0 = self.var_msgs[j][0].residual(logdomain, factor_idx, orig[0]);
        let mut p1 = self.var_msgs[j][1].residual(logdomain, factor_idx, orig[1]);
        if logdomain {
            p0 = p0.exp();
            p1 = p1.exp();
        }
        if !self.props.fastcausal {
            normalize2(&mut p0, &mut p1, false);
        }
        (p0, p1)
    }

    /// Recomputes the `_I`-th outgoing message of variable `i` from the
    /// current incoming messages of every *other* variable neighboring the
    /// same factor, using the closed-form update for the factor's kind
    /// instead of summing over all `2^|body|` joint states.
    pub fn calc_new_message(&mut self, i: usize, _idx: usize) {
        let factor_idx = self.nb_of_var[i][_idx];
        let neighbors = self.nb_of_factor[factor_idx].clone();
        let duals = self.dual_of_factor[factor_idx].clone();
        let factor = self.graph.factor(factor_idx).clone();
        let is_head = factor.head_var_position(&self.graph, i);

        let (marg0, marg1) = match &factor {
            CausalFactor::Singleton { p, .. } => (1.0 - *p, *p),
            CausalFactor::DefiniteAnd { .. } => self.calc_and_message(factor_idx, i, &factor, &neighbors, &duals, is_head),
            CausalFactor::DefiniteOr { .. } => self.calc_or_message(factor_idx, i, &factor, &neighbors, &duals, is_head),
        };

        let mut m0 = marg0;
        let mut m1 = marg1;
        normalize2(&mut m0, &mut m1, false);
        let edge = &mut self.edges[i][_idx];
        if self.props.logdomain {
            edge.new_message = [m0.ln(), m1.ln()];
        } else {
            edge.new_message = [m0, m1];
        }
    }

    fn head_mask(factor: &CausalFactor) -> (f64, f64) {
        match factor.head_clamped() {
            Some(mask) => (mask[0], mask[1]),
            None => (1.0, 1.0),
        }
    }

    fn calc_and_message(&self, factor_idx: usize, i: usize, factor: &CausalFactor, neighbors: &[usize], duals: &[usize], head: bool) -> (f64, f64) {
        let (mask0, mask1) = Self::head_mask(factor);
        let p1 = factor.prob();
        let p0 = factor.prob_default();
        if head {
            let (mut t0, mut t1, mut e1) = (1.0, 1.0, 0.0);
            for (k, &j) in neighbors.iter().enumerate() {
                if j == i {
                    continue;
                }
                let (prod_j0, prod_j1) = self.incoming(j, duals[k], factor_idx);
                let a0 = prod_j0 + prod_j1;
                let a1 = prod_j1;
                t0 *= a0;
                t1 *= a1;
                scale2(&mut t0, &mut t1);
                if !self.props.fastcausal {
                    let delta = prod_j0;
                    if a1 != 0.0 && a0 == a1 && delta != 0.0 {
                        e1 += delta / a1;
                    }
                }
            }
            let gated1 = e1 * t0 + (t0 - t1);
            let marg0 = ((1.0 - p1) * t1 + (1.0 - p0) * gated1) * mask0;
            let marg1 = (p1 * t1 + p0 * gated1) * mask1;
            (marg0, marg1)
        } else {
            let (mut t0, mut t1) = (1.0, 1.0);
            for (k, &j) in neighbors.iter().enumerate() {
                if j == i {
                    continue;
                }
                let (prod_j0, prod_j1) = self.incoming(j, duals[k], factor_idx);
                if factor.head_var_position(&self.graph, j) {
                    t1 *= (p1 - p0) * (prod_j1 * mask1 - prod_j0 * mask0);
                    t0 *= p0 * prod_j1 * mask1 + (1.0 - p0) * prod_j0 * mask0;
                } else {
                    t1 *= prod_j1;
                    t0 *= prod_j0 + prod_j1;
                }
                scale2(&mut t0, &mut t1);
            }
            (t0, t1 + t0)
        }
    }

    fn calc_or_message(&self, factor_idx: usize, i: usize, factor: &CausalFactor, neighbors: &[usize], duals: &[usize], head: bool) -> (f64, f64) {
        let (mask0, mask1) = Self::head_mask(factor);
        let p1 = factor.prob();
        let p0 = factor.prob_default();
        if head {
            let (mut t0, mut t1, mut e1) = (1.0, 1.0, 0.0);
            for (k, &j) in neighbors.iter().enumerate() {
                if j == i {
                    continue;
                }
                let (prod_j0, prod_j1) = self.incoming(j, duals[k], factor_idx);
                let a0 = prod_j0 + prod_j1;
                let a1 = prod_j0;
                t0 *= a0;
                t1 *= a1;
                scale2(&mut t0, &mut t1);
                if !self.props.fastcausal {
                    let delta = prod_j1;
                    if a1 != 0.0 && a0 == a1 && delta != 0.0 {
                        e1 += delta / a1;
                    }
                }
            }
            let gated1 = e1 * t0 + (t0 - t1);
            let marg0 = (p1 * t1 + p0 * gated1) * mask0;
            let marg1 = ((1.0 - p1) * t1 + (1.0 - p0) * gated1) * mask1;
            (marg0, marg1)
        } else {
            let (mut t0, mut t1) = (1.0, 1.0);
            for (k, &j) in neighbors.iter().enumerate() {
                if j == i {
                    continue;
                }
                let (prod_j0, prod_j1) = self.incoming(j, duals[k], factor_idx);
                if factor.head_var_position(&self.graph, j) {
                    t1 *= (p1 - p0) * (prod_j0 * mask0 - prod_j1 * mask1);
                    t0 *= p0 * prod_j0 * mask0 + (1.0 - p0) * prod_j1 * mask1;
                } else {
                    t1 *= prod_j0;
                    t0 *= prod_j0 + prod_j1;
                }
                scale2(&mut t0, &mut t1);
            }
            (t1 + t0, t0)
        }
    }

    /// Commits `edges[i][_idx].new_message` into `edges[i][_idx].message`,
    /// applying damping and, outside [`UpdateType::Parall`], incrementally
    /// refreshing variable `i`'s running accumulator.
    fn update_message(&mut self, i: usize, _idx: usize) {
        let damping = self.props.damping;
        let logdomain = self.props.logdomain;
        let orig = self.edges[i][_idx].message;
        let mut new_msg = self.edges[i][_idx].new_message;
        if damping != 0.0 {
            new_msg = if logdomain {
                [orig[0] * damping + new_msg[0] * (1.0 - damping), orig[1] * damping + new_msg[1] * (1.0 - damping)]
            } else {
                [orig[0].powf(damping) * new_msg[0].powf(1.0 - damping), orig[1].powf(damping) * new_msg[1].powf(1.0 - damping)]
            };
        }
        if self.props.updates != UpdateType::Parall {
            let factor_idx = self.nb_of_var[i][_idx];
            self.var_msgs[i][0].reset_edge(factor_idx, orig[0], logdomain).accumulate(logdomain, factor_idx, new_msg[0]);
            self.var_msgs[i][1].reset_edge(factor_idx, orig[1], logdomain).accumulate(logdomain, factor_idx, new_msg[1]);
            self.rescale_var(i);
        }
        self.edges[i][_idx].message = new_msg;
    }

    fn rescale_var(&mut self, i: usize) {
        let logdomain = self.props.logdomain;
        let (a, b) = self.var_msgs[i].split_at_mut(1);
        scale_pair(logdomain, &mut a[0], &mut b[0]);
    }

    fn rebuild_var_msgs_parall(&mut self, use_new: bool) {
        let logdomain = self.props.logdomain;
        for i in 0..self.graph.nr_vars() {
            self.var_msgs[i][0].reset(logdomain);
            self.var_msgs[i][1].reset(logdomain);
            for (_idx, &factor_idx) in self.nb_of_var[i].clone().iter().enumerate() {
                let m = if use_new { self.edges[i][_idx].new_message } else { self.edges[i][_idx].message };
                self.var_msgs[i][0].accumulate(logdomain, factor_idx, m[0]);
                self.var_msgs[i][1].accumulate(logdomain, factor_idx, m[1]);
            }
            self.rescale_var(i);
        }
    }

    fn sweep(&mut self) {
        match self.props.updates {
            UpdateType::Parall => {
                for i in 0..self.graph.nr_vars() {
                    for k in 0..self.nb_of_var[i].len() {
                        self.calc_new_message(i, k);
                    }
                }
                for i in 0..self.graph.nr_vars() {
                    for k in 0..self.nb_of_var[i].len() {
                        self.update_message(i, k);
                    }
                }
                self.rebuild_var_msgs_parall(false);
            }
            UpdateType::SeqFix | UpdateType::SeqRnd => {
                if self.props.updates == UpdateType::SeqRnd {
                    self.shuffle_update_seq();
                }
                for (i, _idx) in self.update_seq.clone() {
                    self.calc_new_message(i, _idx);
                    self.update_message(i, _idx);
                }
            }
        }
    }

    fn belief_vec(&self, i: usize) -> [f64; 2] {
        let logdomain = self.props.logdomain;
        let mut p0 = self.var_msgs[i][0].total(logdomain);
        let mut p1 = self.var_msgs[i][1].total(logdomain);
        if logdomain {
            let m = p0.max(p1);
            p0 = (p0 - m).exp();
            p1 = (p1 - m).exp();
        }
        normalize2(&mut p0, &mut p1, false);
        [p0, p1]
    }

    /// Marginal belief `P(var = 1)` for variable `i`, after normalization.
    pub fn belief(&self, i: usize) -> [f64; 2] {
        self.belief_vec(i)
    }

    pub fn beliefs(&self) -> Vec<[f64; 2]> {
        (0..self.graph.nr_vars()).map(|i| self.belief_vec(i)).collect()
    }

    /// The per-value belief vector of factor `factor_idx`, in the order of
    /// [`CausalFactorGraph::nb_f`].
    pub fn factor_belief(&self, factor_idx: usize) -> Vec<f64> {
        self.causal_belief_f(factor_idx)
    }

    /// Incoming-message product for every variable of factor `factor_idx`,
    /// used to detect factor-level convergence (a singleton's "factor
    /// belief" coincides with its head's belief).
    fn causal_belief_f(&self, factor_idx: usize) -> Vec<f64> {
        self.nb_of_factor[factor_idx]
            .iter()
            .enumerate()
            .map(|(k, &j)| {
                let dual = self.dual_of_factor[factor_idx][k];
                let (p0, p1) = self.incoming(j, dual, factor_idx);
                let _ = p0;
                p1
            })
            .collect()
    }

    /// Bethe-approximation log partition function: since this engine only
    /// ever reports variable beliefs (factor beliefs are unavailable except
    /// for singletons), the factor entropy term of the full Bethe free
    /// energy collapses and only the variable term survives.
    pub fn log_z(&self) -> f64 {
        let mut sum = 0.0;
        for i in 0..self.graph.nr_vars() {
            let b = self.belief_vec(i);
            let entropy = -b.iter().filter(|&&p| p > 0.0).map(|p| p * p.ln()).sum::<f64>();
            let degree = self.nb_of_var[i].len() as f64;
            sum += (1.0 - degree) * entropy;
        }
        sum
    }

    /// Runs sweeps until the largest per-variable belief change drops below
    /// `props.tol`, `props.maxiter` sweeps have elapsed, or `props.maxtime`
    /// seconds have elapsed (checked via `time_budget`, since this crate has
    /// no wall-clock dependency of its own). Returns the final max-diff.
    pub fn run(&mut self, mut time_budget: impl FnMut() -> f64) -> f64 {
        let mut max_diff = f64::INFINITY;
        while self.iters < self.props.maxiter && max_diff > self.props.tol && time_budget() < self.props.maxtime {
            self.sweep();

            max_diff = f64::NEG_INFINITY;
            for i in 0..self.graph.nr_vars() {
                let b = self.belief_vec(i);
                let d = (b[1] - self.old_beliefs_v[i][1]).abs().max((b[0] - self.old_beliefs_v[i][0]).abs());
                max_diff = max_diff.max(d);
                self.old_beliefs_v[i] = b;
            }
            for fidx in 0..self.graph.nr_factors() {
                let b = self.causal_belief_f(fidx);
                let d = belief_f_dist_linf(&b, &self.old_beliefs_f[fidx]);
                max_diff = max_diff.max(d);
                self.old_beliefs_f[fidx] = b;
            }
            self.iters += 1;
        }
        if max_diff > self.maxdiff {
            self.maxdiff = max_diff;
        }
        max_diff
    }

    /// The extended run surface: tracks a bounded per-variable belief
    /// history of length `hist_length` and allows the sweep loop to report
    /// early with [`RunOutcome::BigFracConverged`] once the as-yet-unconverged
    /// fraction of variables+factors drops below a tolerance floor that
    /// grows linearly from `min_iters` to `max_iters`. Returns the
    /// yet-to-converge fraction and the outcome that ended the run.
    pub fn run_extended(&mut self, tolerance: f64, min_iters: usize, max_iters: usize, hist_length: usize) -> (f64, RunOutcome) {
        assert!(tolerance > 0.0);
        assert!(hist_length > 0 && hist_length < min_iters && min_iters < max_iters);

        let mut num_iters = 0usize;
        let mut max_diff = f64::INFINITY;
        let mut yet_to_converge_fraction = 1.0;
        let mut belief_hist: Vec<VecDeque<f64>> = vec![VecDeque::new(); self.graph.nr_vars()];
        let outcome;

        loop {
            let node_frac_tolerance = if num_iters >= min_iters {
                (num_iters - min_iters) as f64 / (max_iters - min_iters) as f64
            } else {
                0.0
            };

            if max_diff <= tolerance {
                outcome = RunOutcome::AllConverged;
                break;
            } else if num_iters > min_iters && yet_to_converge_fraction < node_frac_tolerance {
                outcome = RunOutcome::BigFracConverged;
                break;
            } else if num_iters > max_iters {
                outcome = RunOutcome::Diverged;
                break;
            }

            self.sweep();

            max_diff = f64::NEG_INFINITY;
            let mut non_converged = 0usize;
            for i in 0..self.graph.nr_vars() {
                let b = self.belief_vec(i);
                let d = (b[1] - self.old_beliefs_v[i][1]).abs().max((b[0] - self.old_beliefs_v[i][0]).abs());
                max_diff = max_diff.max(d);
                if d > tolerance {
                    non_converged += 1;
                }
                self.old_beliefs_v[i] = b;

                if b[1].is_finite() {
                    belief_hist[i].push_back(b[1]);
                    if belief_hist[i].len() > hist_length {
                        belief_hist[i].pop_front();
                    }
                }
            }
            for fidx in 0..self.graph.nr_factors() {
                let b = self.causal_belief_f(fidx);
                let d = belief_f_dist_linf(&b, &self.old_beliefs_f[fidx]);
                max_diff = max_diff.max(d);
                if d > tolerance {
                    non_converged += 1;
                }
                self.old_beliefs_f[fidx] = b;
            }

            yet_to_converge_fraction = non_converged as f64 / (self.graph.nr_vars() + self.graph.nr_factors()) as f64;
            num_iters += 1;
            self.iters += 1;
        }

        if max_diff > self.maxdiff {
            self.maxdiff = max_diff;
        }

        self.low_pass_beliefs = vec![0.0; self.graph.nr_vars()];
        match outcome {
            RunOutcome::AllConverged => {
                for i in 0..self.graph.nr_vars() {
                    self.low_pass_beliefs[i] = self.belief_vec(i)[1];
                }
            }
            RunOutcome::BigFracConverged | RunOutcome::Diverged => {
                for i in 0..self.graph.nr_vars() {
                    let denom = belief_hist[i].len();
                    let sum: f64 = belief_hist[i].iter().sum();
                    self.low_pass_beliefs[i] = if denom > 0 { sum / denom as f64 } else { 0.0 };
                }
            }
        }

        match outcome {
            RunOutcome::AllConverged => tracing::info!(num_iters, max_diff, "bp converged"),
            RunOutcome::BigFracConverged => tracing::info!(num_iters, yet_to_converge_fraction, "bp reached convergence threshold fraction"),
            RunOutcome::Diverged => tracing::warn!(num_iters, max_diff, "bp did not converge"),
        }

        (yet_to_converge_fraction, outcome)
    }

    /// The smoothed belief `P(i = 1)` recorded by the most recent
    /// [`Self::run_extended`] call.
    pub fn low_pass_belief(&self, i: usize) -> f64 {
        self.low_pass_beliefs[i]
    }
}

impl CausalFactor {
    fn head_var_position(&self, graph: &CausalFactorGraph, pos: usize) -> bool {
        graph.find_var(self.head()) == Some(pos)
    }
}
