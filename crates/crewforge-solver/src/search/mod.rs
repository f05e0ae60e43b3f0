//! Exact search using depth-first branch-and-bound.
//!
//! The engine explores a binary tree of bound changes. Each node runs
//! bounds-consistency propagation to a fixpoint; a conflict undoes the
//! node through the trail. Nodes whose optimistic objective bound cannot
//! beat the incumbent are pruned.
//!
//! # Branching
//!
//! Decision variables are branched before auxiliary variables, each group
//! in declaration order. A branch fixes the variable to its preferred value
//! (the upper bound unless the variable has a negative objective
//! coefficient) and the other branch excludes that value. Both branches are
//! propagated first and the one with the higher objective bound is
//! explored first, the preferred value winning ties. A branch that fails
//! propagation is never pushed.

mod bounder;
mod domains;
mod propagator;

use std::time::Duration;

use crewforge_config::SolverConfig;
use tracing::{debug, info};

use crate::engine::{EngineStatus, SolveOutcome, SolverEngine};
use crate::model::{CpModel, Valuation, VarKind};
use crate::statistics::{ObjectiveImprovement, SolverStatistics};
use crate::termination::{self, SearchProgress, Termination};

use bounder::ObjectiveBounder;
use domains::Domains;
use propagator::Propagator;

/// Tolerance below which a bound is not considered an improvement.
const PRUNE_EPSILON: f64 = 1e-9;

/// The built-in exact engine.
///
/// Runs to proof of optimality or infeasibility unless the configuration
/// sets a time or node limit, in which case the best solution found so far
/// is returned as [`EngineStatus::Feasible`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBoundSolver;

impl BranchAndBoundSolver {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Solves with an explicit termination instead of one built from
    /// configuration.
    pub fn solve_with<T: Termination>(&self, model: &CpModel, termination: &T) -> SolveOutcome {
        let mut search = Search::new(model);
        let exhausted = search.run(termination);

        let Search {
            mut stats,
            progress,
            best,
            ..
        } = search;
        stats.node_count = progress.node_count();
        stats.total_duration = progress.elapsed();

        let status = match (exhausted, best.is_some()) {
            (true, true) => EngineStatus::Optimal,
            (true, false) => EngineStatus::Infeasible,
            (false, true) => EngineStatus::Feasible,
            (false, false) => EngineStatus::TimeoutNoSolution,
        };
        let (objective, valuation) = match best {
            Some((objective, valuation)) => (Some(objective), Some(valuation)),
            None => (None, None),
        };

        SolveOutcome {
            status,
            valuation,
            objective,
            statistics: stats,
        }
    }
}

impl SolverEngine for BranchAndBoundSolver {
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> SolveOutcome {
        info!(
            event = "solve_start",
            engine = self.engine_name(),
            model = model.name(),
            variables = model.var_count(),
            decisions = model.decision_count(),
            constraints = model.constraint_count(),
            time_limit_ms = ?config.time_limit().map(|d: Duration| d.as_millis()),
            node_limit = ?config.node_count_limit(),
        );

        let outcome = self.solve_with(model, &termination::from_config(config));

        info!(
            event = "solve_end",
            status = %outcome.status,
            objective = ?outcome.objective,
            nodes = outcome.statistics.node_count,
            backtracks = outcome.statistics.backtrack_count,
            prunings = outcome.statistics.prune_count,
            solutions = outcome.statistics.solution_count,
            duration_ms = outcome.statistics.total_duration.as_millis() as u64,
        );
        outcome
    }

    fn engine_name(&self) -> &'static str {
        "BranchAndBound"
    }
}

/// One open decision on the search stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    mark: usize,
    var: usize,
    // Bounds of the branch not yet explored.
    alternative: Option<(i64, i64)>,
}

struct Search<'m> {
    model: &'m CpModel,
    domains: Domains,
    propagator: Propagator,
    bounder: ObjectiveBounder,
    coefficients: Vec<f64>,
    order: Vec<usize>,
    stats: SolverStatistics,
    progress: SearchProgress,
    best: Option<(f64, Valuation)>,
}

impl<'m> Search<'m> {
    fn new(model: &'m CpModel) -> Self {
        let bounder = ObjectiveBounder::new(model);
        let coefficients = bounder.coefficients(model.var_count());
        let order = model
            .var_ids()
            .filter(|&v| model.var(v).kind() == VarKind::Decision)
            .chain(
                model
                    .var_ids()
                    .filter(|&v| model.var(v).kind() == VarKind::Auxiliary),
            )
            .map(|v| v.index())
            .collect();

        Self {
            model,
            domains: Domains::new(model),
            propagator: Propagator::new(model),
            bounder,
            coefficients,
            order,
            stats: SolverStatistics::new(),
            progress: SearchProgress::start(),
            best: None,
        }
    }

    /// Runs the search. Returns true if the tree was exhausted, false if
    /// the termination fired first.
    fn run<T: Termination>(&mut self, termination: &T) -> bool {
        let mut stack: Vec<Frame> = Vec::new();

        let mut at_node = !self.domains.any_empty() && {
            self.propagator.enqueue_all();
            self.propagator
                .propagate(&mut self.domains, &mut self.stats.propagation_count)
        };

        while at_node {
            self.progress.increment_node_count();
            if termination.is_terminated(&self.progress) {
                return false;
            }

            if let Some((best, _)) = &self.best {
                if self.bounder.optimistic_bound(&self.domains) <= best + PRUNE_EPSILON {
                    self.stats.prune_count += 1;
                    at_node = self.backtrack(&mut stack);
                    continue;
                }
            }

            match self.select_var() {
                None => {
                    self.record_solution();
                    at_node = self.backtrack(&mut stack);
                }
                Some(var) => match self.order_branches(var) {
                    None => at_node = self.backtrack(&mut stack),
                    Some((first, second)) => {
                        stack.push(Frame {
                            mark: self.domains.mark(),
                            var,
                            alternative: second,
                        });
                        if !self.restrict(var, first.0, first.1) {
                            at_node = self.backtrack(&mut stack);
                        }
                    }
                },
            }
        }
        true
    }

    fn select_var(&self) -> Option<usize> {
        self.order
            .iter()
            .copied()
            .find(|&v| !self.domains.is_fixed(v))
    }

    /// Splits the domain of `var` and orders the two halves by the objective
    /// bound each reaches after propagation. Halves that fail propagation
    /// are dropped; `None` means both failed.
    fn order_branches(&mut self, var: usize) -> Option<((i64, i64), Option<(i64, i64)>)> {
        let (lo, hi) = (self.domains.lo(var), self.domains.hi(var));
        let (preferred, other) = if self.coefficients[var] < 0.0 {
            ((lo, lo), (lo + 1, hi))
        } else {
            ((hi, hi), (lo, hi - 1))
        };
        let preferred_bound = self.bound_after(var, preferred);
        let other_bound = self.bound_after(var, other);

        match (preferred_bound, other_bound) {
            (None, None) => None,
            (Some(_), None) => Some((preferred, None)),
            (None, Some(_)) => Some((other, None)),
            (Some(p), Some(o)) if o > p + PRUNE_EPSILON => Some((other, Some(preferred))),
            (Some(_), Some(_)) => Some((preferred, Some(other))),
        }
    }

    /// Objective bound after narrowing `var` to `range`, or `None` on a
    /// conflict. The domains are left as they were.
    fn bound_after(&mut self, var: usize, range: (i64, i64)) -> Option<f64> {
        let mark = self.domains.mark();
        let bound = self
            .restrict(var, range.0, range.1)
            .then(|| self.bounder.optimistic_bound(&self.domains));
        self.domains.undo_to(mark);
        bound
    }

    /// Narrows a variable to `[lo, hi]` and propagates. Returns false on a
    /// conflict.
    fn restrict(&mut self, var: usize, lo: i64, hi: i64) -> bool {
        let raised = self.domains.raise_lo(var, lo);
        let lowered = self.domains.lower_hi(var, hi);
        match (raised, lowered) {
            (Some(r), Some(l)) => {
                if r || l {
                    self.propagator.enqueue_var(var);
                }
                self.propagator
                    .propagate(&mut self.domains, &mut self.stats.propagation_count)
            }
            _ => false,
        }
    }

    /// Undoes frames until an unexplored alternative propagates cleanly.
    /// Returns false once the stack is empty.
    fn backtrack(&mut self, stack: &mut Vec<Frame>) -> bool {
        while let Some(frame) = stack.last_mut() {
            self.domains.undo_to(frame.mark);
            self.stats.backtrack_count += 1;
            let var = frame.var;
            match frame.alternative.take() {
                Some((lo, hi)) => {
                    if self.restrict(var, lo, hi) {
                        return true;
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
        false
    }

    fn record_solution(&mut self) {
        self.stats.solution_count += 1;
        let valuation = self.domains.to_valuation();
        let objective = self.model.objective().evaluate(&valuation);
        let improves = self
            .best
            .as_ref()
            .map_or(true, |(best, _)| objective > best + PRUNE_EPSILON);
        if !improves {
            return;
        }

        debug!(
            event = "improvement",
            objective,
            nodes = self.progress.node_count(),
        );
        self.stats.objective_history.push(ObjectiveImprovement {
            time_offset: self.progress.elapsed(),
            node_count: self.progress.node_count(),
            objective,
        });
        self.best = Some((objective, valuation));
    }
}

#[cfg(test)]
mod tests;
