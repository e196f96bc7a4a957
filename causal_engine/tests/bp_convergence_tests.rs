/*
 * SPDX-License-Identifier: MIT
 * Copyright (c) "2025" . The DeepCausality Authors and Contributors. All Rights Reserved.
 */

use causal_engine::prelude::*;

fn chain_graph() -> CausalFactorGraph {
    // v0 -> v1 -> v2 via two noisy-OR gates, each with a single parent.
    let vars = vec![Variable::new(0), Variable::new(1), Variable::new(2)];
    let factors = vec![
        CausalFactor::singleton(Variable::new(0), 0.7),
        CausalFactor::definite_or(Variable::new(1), vec![Variable::new(0)], 0.9, 0.05),
        CausalFactor::definite_or(Variable::new(2), vec![Variable::new(1)], 0.9, 0.05),
    ];
    CausalFactorGraph::new(vars, factors)
}

#[test]
fn chain_of_or_gates_converges_under_all_update_types() {
    for updates in [UpdateType::Parall, UpdateType::SeqFix, UpdateType::SeqRnd] {
        let props = BpProperties { updates, ..Default::default() };
        let mut bp = BpEngine::new(chain_graph(), props);
        bp.init();
        let max_diff = bp.run(|| 0.0);
        assert!(max_diff <= props.tol, "update type {updates:?} failed to converge: max_diff={max_diff}");
        let b2 = bp.belief(2);
        assert!(b2[1] > 0.5, "expected downstream belief to lean true, got {b2:?}");
    }
}

#[test]
fn logdomain_and_linear_domain_agree() {
    let props_linear = BpProperties::default();
    let mut bp_linear = BpEngine::new(chain_graph(), props_linear);
    bp_linear.init();
    bp_linear.run(|| 0.0);

    let props_log = BpProperties { logdomain: true, ..Default::default() };
    let mut bp_log = BpEngine::new(chain_graph(), props_log);
    bp_log.init();
    bp_log.run(|| 0.0);

    for i in 0..3 {
        let a = bp_linear.belief(i);
        let b = bp_log.belief(i);
        assert!((a[1] - b[1]).abs() < 1e-6, "var {i}: linear={a:?} log={b:?}");
    }
}

#[test]
fn run_extended_degrades_gracefully_to_diverged_on_zero_max_iters_budget() {
    let mut bp = BpEngine::new(chain_graph(), BpProperties::default());
    bp.init();
    let (_frac, outcome) = bp.run_extended(1e-12, 2, 4, 1);
    assert!(matches!(outcome, RunOutcome::AllConverged | RunOutcome::BigFracConverged | RunOutcome::Diverged));
}

#[test]
fn clamping_head_true_forces_downstream_belief_high() {
    let graph = chain_graph().clamped(0, 1);
    let mut bp = BpEngine::new(graph, BpProperties::default());
    bp.init();
    bp.run(|| 0.0);
    assert!(bp.belief(0)[1] > 0.999);
}
