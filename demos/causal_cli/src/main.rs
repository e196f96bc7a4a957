//! Interactive line-oriented query wrapper around `causal_engine`.
//!
//! Reads a causal factor graph from a file, then serves one reply per
//! command read from standard input until EOF.

use std::collections::{HashMap, HashSet};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use causal_engine::prelude::*;

/// Interactive query wrapper around a causal factor graph.
#[derive(Parser, Debug)]
#[command(name = "causal_cli", version, about = "Query a causal factor graph over stdin")]
struct Args {
    /// Path to a factor graph in the plain-text format causal_engine::graph reads.
    graph: PathBuf,

    /// Run belief propagation in the log domain.
    #[arg(long)]
    logdomain: bool,
}

struct Session {
    graph: CausalFactorGraph,
    props: BpProperties,
    pending: HashMap<usize, usize>,
    clamped: HashSet<usize>,
}

impl Session {
    fn new(graph: CausalFactorGraph, props: BpProperties) -> Self {
        Self { graph, props, pending: HashMap::new(), clamped: HashSet::new() }
    }

    fn belief(&self, var_idx: usize) -> Result<f64> {
        if var_idx >= self.graph.nr_vars() {
            bail!("var_index {var_idx} out of range");
        }
        let mut bp = BpEngine::new(self.graph.clone(), self.props);
        bp.init();
        bp.run(|| 0.0);
        Ok(bp.belief(var_idx)[1])
    }

    fn factor_belief(&self, factor_idx: usize, value_idx: usize) -> Result<f64> {
        if factor_idx >= self.graph.nr_factors() {
            bail!("factor_index {factor_idx} out of range");
        }
        let mut bp = BpEngine::new(self.graph.clone(), self.props);
        bp.init();
        bp.run(|| 0.0);
        let b = bp.factor_belief(factor_idx);
        b.get(value_idx).copied().with_context(|| format!("value_index {value_idx} out of range for factor {factor_idx}"))
    }

    fn run_bp(&mut self, tol: f64, min_iters: usize, max_iters: usize, hist_length: usize) -> Result<f64> {
        if !self.pending.is_empty() {
            let assignments: Vec<(usize, usize)> = self.pending.drain().collect();
            self.graph.clamp_var(&assignments, true);
            self.clamped.extend(assignments.iter().map(|(i, _)| *i));
        }
        let mut bp = BpEngine::new(self.graph.clone(), self.props);
        bp.init();
        let (frac, _outcome) = bp.run_extended(tol, min_iters, max_iters, hist_length);
        Ok(frac)
    }

    fn observe(&mut self, var_idx: usize, value: bool) -> Result<()> {
        if var_idx >= self.graph.nr_vars() {
            bail!("var_index {var_idx} out of range");
        }
        self.pending.insert(var_idx, value as usize);
        Ok(())
    }

    fn unclamp(&mut self, var_idx: usize) -> Result<()> {
        if var_idx >= self.graph.nr_vars() {
            bail!("var_index {var_idx} out of range");
        }
        self.pending.remove(&var_idx);
        if self.clamped.remove(&var_idx) {
            let mut vs = VarSet::new();
            vs.insert(self.graph.var(var_idx));
            self.graph.restore_varset(&vs);
        }
        Ok(())
    }
}

fn handle_line(session: &mut Session, line: &str, out: &mut impl Write) -> Result<()> {
    let mut tokens = line.split_whitespace();
    let cmd = tokens.next().unwrap_or("");
    match cmd {
        "Q" => {
            let idx: usize = tokens.next().context("Q requires var_index")?.parse()?;
            let b = session.belief(idx)?;
            writeln!(out, "{b}")?;
        }
        "FQ" => {
            let factor_idx: usize = tokens.next().context("FQ requires factor_index")?.parse()?;
            let value_idx: usize = tokens.next().context("FQ requires value_index")?.parse()?;
            let b = session.factor_belief(factor_idx, value_idx)?;
            writeln!(out, "{b}")?;
        }
        "BP" => {
            let tol: f64 = tokens.next().context("BP requires tolerance")?.parse()?;
            let min_iters: usize = tokens.next().context("BP requires minIters")?.parse()?;
            let max_iters: usize = tokens.next().context("BP requires maxIters")?.parse()?;
            let hist_length: usize = tokens.next().context("BP requires histLength")?.parse()?;
            let frac = session.run_bp(tol, min_iters, max_iters, hist_length)?;
            writeln!(out, "{frac}")?;
        }
        "O" => {
            let idx: usize = tokens.next().context("O requires var_index")?.parse()?;
            let val: bool = tokens.next().context("O requires true|false")?.parse()?;
            session.observe(idx, val)?;
            writeln!(out, "O {idx} {val}")?;
        }
        "UC" => {
            let idx: usize = tokens.next().context("UC requires var_index")?.parse()?;
            session.unclamp(idx)?;
            writeln!(out, "UC {idx}")?;
        }
        "NL" => {
            writeln!(out)?;
        }
        other => bail!("unknown command {other:?}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let text = std::fs::read_to_string(&args.graph).with_context(|| format!("reading {:?}", args.graph))?;
    let graph = CausalFactorGraph::read_str(&text).map_err(|e| anyhow::anyhow!("{e:?}"))?;
    tracing::info!(nr_vars = graph.nr_vars(), nr_factors = graph.nr_factors(), "loaded causal factor graph");

    let props = BpProperties { logdomain: args.logdomain, ..Default::default() };
    let mut session = Session::new(graph, props);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if let Err(e) = handle_line(&mut session, &line, &mut stdout) {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
    Ok(())
}
