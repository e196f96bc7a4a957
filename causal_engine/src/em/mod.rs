/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The DeepCausality Authors and Contributors. All Rights Reserved.
 */

//! Expectation-maximization parameter learning over a causal factor graph:
//! [`Evidence`] samples drive repeated clamped BP runs (the E-step), whose
//! beliefs feed pseudocount-based re-estimation of tied Singleton
//! probabilities (the M-step), via [`CausalEm::run`].

use std::collections::BTreeMap;

use crate::bp::{BpEngine, BpProperties};
use crate::errors::{EmError, IncompatibleOperationError};
use crate::graph::CausalFactorGraph;

/// An ordered sequence of observation samples. Each sample maps a variable
/// *label* to its observed state; variables absent from a sample are
/// treated as unobserved and left unclamped.
#[derive(Debug, Clone, Default)]
pub struct Evidence {
    samples: Vec<BTreeMap<usize, usize>>,
}

impl Evidence {
    pub fn new(samples: Vec<BTreeMap<usize, usize>>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample(&self, idx: usize) -> &BTreeMap<usize, usize> {
        &self.samples[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = &BTreeMap<usize, usize>> {
        self.samples.iter()
    }

    /// Parses the tab-separated evidence table format: a header row of
    /// variable labels, then one row per sample with each cell either the
    /// observed state or empty (unobserved).
    pub fn read_str(text: &str) -> Self {
        let mut lines = text.lines();
        let header: Vec<usize> = match lines.next() {
            Some(h) => h.split('\t').filter_map(|s| s.trim().parse().ok()).collect(),
            None => return Evidence::default(),
        };
        let samples = lines
            .filter(|l| !l.trim().is_empty())
            .map(|line| {
                let mut sample = BTreeMap::new();
                for (label, cell) in header.iter().zip(line.split('\t')) {
                    let cell = cell.trim();
                    if !cell.is_empty() {
                        if let Ok(state) = cell.parse::<usize>() {
                            sample.insert(*label, state);
                        }
                    }
                }
                sample
            })
            .collect();
        Evidence::new(samples)
    }
}

/// Pluggable sufficient-statistics-to-probability conversion used by a
/// [`CausalSharedParam`]'s M-step.
pub trait ParameterEstimation: Send + Sync {
    /// Size of one output distribution block.
    fn target_dim(&self) -> usize;
    /// Total accumulator length (a whole number of `target_dim`-sized blocks).
    fn total_dim(&self) -> usize;
    /// The pseudocount every accumulator cell is initialized/reset to.
    fn pseudo_count(&self) -> f64;
    /// Normalizes each consecutive `target_dim` block of `accumulator` into
    /// a distribution (falling back to uniform if a block sums to zero),
    /// resets `accumulator` to the initial pseudocounts, and returns the
    /// concatenated distributions.
    fn estimate(&self, accumulator: &mut [f64]) -> Vec<f64>;
}

/// Configuration for [`CondProbEstimation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CondProbEstimationConfig {
    pub target_dim: usize,
    pub total_dim: usize,
    pub pseudo_count: f64,
}

impl Default for CondProbEstimationConfig {
    fn default() -> Self {
        Self { target_dim: 2, total_dim: 2, pseudo_count: 1.0 }
    }
}

/// Conditional-probability estimation with pseudocount smoothing — the
/// only parameter-estimation strategy this engine implements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CondProbEstimation {
    config: CondProbEstimationConfig,
}

impl CondProbEstimation {
    /// Fails if `config.target_dim != 2`: [`CausalSharedParam::collect_expectations`]
    /// only ever folds a belief into `expectations[0]`/`expectations[1]`, so a
    /// larger target dimension would silently under-accumulate instead of
    /// producing a meaningful estimate.
    pub fn new(config: CondProbEstimationConfig) -> Result<Self, IncompatibleOperationError> {
        if config.target_dim != 2 {
            return Err(IncompatibleOperationError::UnsupportedTargetDim { dim: config.target_dim });
        }
        Ok(Self { config })
    }
}

impl ParameterEstimation for CondProbEstimation {
    fn target_dim(&self) -> usize {
        self.config.target_dim
    }

    fn total_dim(&self) -> usize {
        self.config.total_dim
    }

    fn pseudo_count(&self) -> f64 {
        self.config.pseudo_count
    }

    fn estimate(&self, accumulator: &mut [f64]) -> Vec<f64> {
        let mut out = Vec::with_capacity(accumulator.len());
        for chunk in accumulator.chunks(self.config.target_dim) {
            let s: f64 = chunk.iter().sum();
            if s > 0.0 {
                out.extend(chunk.iter().map(|v| v / s));
            } else {
                out.extend(std::iter::repeat(1.0 / self.config.target_dim as f64).take(chunk.len()));
            }
        }
        accumulator.iter_mut().for_each(|v| *v = self.config.pseudo_count);
        out
    }
}

/// A group of Singleton factors whose probability `p` is tied to one
/// shared estimate, plus the accumulator of expected sufficient statistics
/// backing that estimate.
pub struct CausalSharedParam {
    factor_indices: Vec<usize>,
    estimation: Box<dyn ParameterEstimation>,
    expectations: Vec<f64>,
}

impl CausalSharedParam {
    pub fn new(factor_indices: Vec<usize>, estimation: Box<dyn ParameterEstimation>) -> Self {
        let expectations = vec![estimation.pseudo_count(); estimation.total_dim()];
        Self { factor_indices, estimation, expectations }
    }

    /// Adds the current E-step belief over each tied factor's head into the
    /// accumulator.
    pub fn collect_expectations(&mut self, graph: &CausalFactorGraph, bp: &BpEngine) {
        for &fidx in &self.factor_indices {
            let head = graph.factor(fidx).head();
            let Some(pos) = graph.find_var(head) else { continue };
            let b = bp.belief(pos);
            self.expectations[0] += b[0];
            self.expectations[1] += b[1];
        }
    }

    /// Re-estimates the shared probability from the accumulator and writes
    /// it into every tied factor of `graph`.
    pub fn set_parameters(&mut self, graph: &mut CausalFactorGraph) {
        let dist = self.estimation.estimate(&mut self.expectations);
        for &fidx in &self.factor_indices {
            graph.set_singleton_prob(fidx, dist[1]);
        }
    }

    /// Resets the accumulator to zero (not to the pseudocount floor —
    /// that reset happens inside [`Self::set_parameters`]).
    pub fn clear(&mut self) {
        self.expectations.iter_mut().for_each(|v| *v = 0.0);
    }
}

/// An ordered list of [`CausalSharedParam`]s maximized together in one pass.
#[derive(Default)]
pub struct CausalMaxStep {
    params: Vec<CausalSharedParam>,
}

impl CausalMaxStep {
    pub fn new(params: Vec<CausalSharedParam>) -> Self {
        Self { params }
    }

    pub fn add_expectations(&mut self, graph: &CausalFactorGraph, bp: &BpEngine) {
        for p in &mut self.params {
            p.collect_expectations(graph, bp);
        }
    }

    pub fn maximize(&mut self, graph: &mut CausalFactorGraph) {
        for p in &mut self.params {
            p.set_parameters(graph);
        }
    }

    pub fn clear(&mut self) {
        for p in &mut self.params {
            p.clear();
        }
    }
}

/// Termination options for [`CausalEm::run`] (§4.6.4 defaults).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermConditions {
    pub max_iters: usize,
    pub log_z_tol: f64,
}

impl Default for TermConditions {
    fn default() -> Self {
        Self { max_iters: 30, log_z_tol: 0.01 }
    }
}

/// The EM driver: holds the evidence, the base (unclamped) factor graph and
/// BP configuration used to spin up one BP engine per evidence sample, and
/// the maximization steps to iterate.
pub struct CausalEm {
    evidence: Evidence,
    graph: CausalFactorGraph,
    bp_props: BpProperties,
    msteps: Vec<CausalMaxStep>,
    iters: usize,
    last_log_z: Vec<f64>,
    term: TermConditions,
    max_jobs: usize,
}

impl CausalEm {
    pub fn new(evidence: Evidence, graph: CausalFactorGraph, bp_props: BpProperties, msteps: Vec<CausalMaxStep>, term: TermConditions) -> Self {
        let max_jobs = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self { evidence, graph, bp_props, msteps, iters: 0, last_log_z: Vec::new(), term, max_jobs }
    }

    pub fn graph(&self) -> &CausalFactorGraph {
        &self.graph
    }

    pub fn iterations(&self) -> usize {
        self.iters
    }

    pub fn log_z(&self) -> Option<f64> {
        self.last_log_z.last().copied()
    }

    pub fn set_max_jobs(&mut self, max_jobs: usize) {
        tracing::info!(from = self.max_jobs, to = max_jobs, "changing EM max parallel jobs");
        self.max_jobs = max_jobs;
    }

    /// `true` once `max_iters` has been reached, or the last two
    /// log-likelihoods have converged to within `log_z_tol` relative
    /// improvement (requires at least 3 recorded values, discarding the
    /// first). A strictly negative improvement is logged as an error and
    /// also terminates the loop.
    pub fn has_satisfied_term_conditions(&self) -> bool {
        if self.iters >= self.term.max_iters {
            return true;
        }
        if self.last_log_z.len() >= 3 {
            let n = self.last_log_z.len();
            let lt = self.last_log_z[n - 1];
            let lt_minus_1 = self.last_log_z[n - 2];
            let delta = (lt - lt_minus_1) / lt_minus_1.abs();
            if delta < 0.0 {
                tracing::error!(delta, "log-likelihood regressed between EM iterations");
                return true;
            }
            return delta <= self.term.log_z_tol;
        }
        false
    }

    fn run_bp(&self, graph: CausalFactorGraph) -> (BpEngine, f64) {
        let mut bp = BpEngine::new(graph, self.bp_props);
        bp.init();
        let mut t = 0.0;
        bp.run(|| {
            t += 1.0;
            0.0
        });
        let log_z = bp.log_z();
        (bp, log_z)
    }

    fn clamp_for_sample(&self, sample: &BTreeMap<usize, usize>) -> CausalFactorGraph {
        let mut g = self.graph.clone();
        for (&label, &state) in sample {
            if let Some(pos) = g.find_var(crate::types::Variable::new(label)) {
                g.clamp(pos, state, false);
            } else {
                tracing::warn!(label, "evidence references a variable not present in the graph");
            }
        }
        g
    }

    /// Runs one maximization step end to end: clears it, runs the unclamped
    /// E-step to get a baseline `logZ_0`, dispatches clamped E-step runs for
    /// every evidence sample in parallel work groups of size `max_jobs`
    /// (the last task of each group running on the calling thread),
    /// sequentially folds the resulting beliefs into the step's
    /// expectations once each group has joined, and finally re-estimates
    /// parameters. Returns the accumulated log-likelihood improvement.
    pub fn iterate_mstep(&mut self, mstep_idx: usize) -> Result<f64, EmError> {
        if mstep_idx >= self.msteps.len() {
            return Err(EmError::new(format!("no maximization step at index {mstep_idx}")));
        }
        self.msteps[mstep_idx].clear();

        let (_, log_z0) = self.run_bp(self.graph.clone());

        let mut likelihood = 0.0;
        let max_jobs = self.max_jobs.max(1);
        let samples: Vec<&BTreeMap<usize, usize>> = self.evidence.iter().collect();
        for group in samples.chunks(max_jobs) {
            let this: &CausalEm = &*self;
            let results: Vec<(CausalFactorGraph, BpEngine, f64)> = std::thread::scope(|scope| {
                let (last, rest) = group.split_last().expect("chunks are non-empty");
                let handles: Vec<_> = rest
                    .iter()
                    .map(|sample| {
                        let clamped = this.clamp_for_sample(sample);
                        scope.spawn(move || {
                            let (bp, log_z) = this.run_bp(clamped.clone());
                            (clamped, bp, log_z)
                        })
                    })
                    .collect();

                let mut out: Vec<(CausalFactorGraph, BpEngine, f64)> = handles.into_iter().map(|h| h.join().expect("E-step task panicked")).collect();
                let last_clamped = this.clamp_for_sample(last);
                let (last_bp, last_log_z) = this.run_bp(last_clamped.clone());
                out.push((last_clamped, last_bp, last_log_z));
                out
            });

            for (_, _, log_z) in &results {
                likelihood += log_z - log_z0;
            }
            for (clamped_graph, bp, _) in &results {
                self.msteps[mstep_idx].add_expectations(clamped_graph, bp);
            }
        }

        self.msteps[mstep_idx].maximize(&mut self.graph);
        Ok(likelihood)
    }

    /// Runs [`Self::iterate_mstep`] for every maximization step, summing
    /// their returned likelihoods, recording the total, and incrementing
    /// the iteration counter.
    pub fn iterate(&mut self) -> Result<f64, EmError> {
        let mut total = 0.0;
        for idx in 0..self.msteps.len() {
            total += self.iterate_mstep(idx)?;
        }
        self.last_log_z.push(total);
        self.iters += 1;
        Ok(total)
    }

    /// Iterates until [`Self::has_satisfied_term_conditions`] is true.
    pub fn run(&mut self) -> Result<(), EmError> {
        while !self.has_satisfied_term_conditions() {
            let l = self.iterate()?;
            tracing::info!(iters = self.iters, likelihood = l, "EM iteration complete");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::CausalFactor;
    use crate::types::Variable;

    fn toy_graph() -> CausalFactorGraph {
        let vars = vec![Variable::new(0), Variable::new(1)];
        let factors = vec![CausalFactor::singleton(Variable::new(0), 0.5), CausalFactor::singleton(Variable::new(1), 0.5)];
        CausalFactorGraph::new(vars, factors)
    }

    #[test]
    fn cond_prob_estimate_normalizes_and_resets() {
        let est = CondProbEstimation::new(CondProbEstimationConfig::default()).unwrap();
        let mut acc = vec![3.0, 1.0];
        let dist = est.estimate(&mut acc);
        assert!((dist[0] - 0.75).abs() < 1e-12);
        assert!((dist[1] - 0.25).abs() < 1e-12);
        assert_eq!(acc, vec![1.0, 1.0]);
    }

    #[test]
    fn cond_prob_estimate_falls_back_to_uniform_on_empty_block() {
        let est = CondProbEstimation::new(CondProbEstimationConfig { pseudo_count: 0.0, ..Default::default() }).unwrap();
        let mut acc = vec![0.0, 0.0];
        let dist = est.estimate(&mut acc);
        assert_eq!(dist, vec![0.5, 0.5]);
    }

    #[test]
    fn cond_prob_estimation_rejects_unsupported_target_dim() {
        let err = CondProbEstimation::new(CondProbEstimationConfig { target_dim: 3, ..Default::default() }).unwrap_err();
        assert_eq!(err, IncompatibleOperationError::UnsupportedTargetDim { dim: 3 });
    }

    #[test]
    fn evidence_read_str_parses_sparse_table() {
        let text = "0\t1\n1\t\n\t0\n";
        let ev = Evidence::read_str(text);
        assert_eq!(ev.len(), 2);
        assert_eq!(ev.sample(0).get(&0), Some(&1));
        assert_eq!(ev.sample(0).get(&1), None);
        assert_eq!(ev.sample(1).get(&1), Some(&0));
    }

    #[test]
    fn em_recovers_biased_prior_from_evidence() {
        let samples = vec![
            BTreeMap::from([(0usize, 1usize)]),
            BTreeMap::from([(0usize, 1usize)]),
            BTreeMap::from([(0usize, 1usize)]),
            BTreeMap::from([(0usize, 0usize)]),
        ];
        let evidence = Evidence::new(samples);
        let graph = toy_graph();
        let shared = CausalSharedParam::new(vec![0], Box::new(CondProbEstimation::new(CondProbEstimationConfig::default()).unwrap()));
        let mstep = CausalMaxStep::new(vec![shared]);
        let mut em = CausalEm::new(evidence, graph, BpProperties::default(), vec![mstep], TermConditions { max_iters: 5, log_z_tol: 0.0 });
        em.set_max_jobs(2);
        em.run().unwrap();
        let p = em.graph().factor(0).prob();
        assert!(p > 0.5, "expected EM to raise p toward the majority-observed state, got {p}");
    }
}
