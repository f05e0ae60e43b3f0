//! Bounds-consistency propagation of linear constraints.
//!
//! Every constraint is normalized into rows `Σ a·x ≤ b`: `≥` rows are
//! negated and `=` yields one row in each direction. A row is filtered
//! against its minimum activity, which for `a > 0` uses the lower bound
//! and for `a < 0` the upper bound of each variable.

use std::collections::VecDeque;

use super::domains::Domains;
use crate::model::{Comparison, CpModel};

#[derive(Debug, Clone)]
struct Row {
    terms: Vec<(usize, i64)>,
    rhs: i64,
}

/// Propagation queue and watch lists over the normalized rows.
#[derive(Debug, Clone)]
pub(crate) struct Propagator {
    rows: Vec<Row>,
    watches: Vec<Vec<usize>>,
    queue: VecDeque<usize>,
    queued: Vec<bool>,
}

impl Propagator {
    pub(crate) fn new(model: &CpModel) -> Self {
        let mut rows = Vec::with_capacity(model.constraint_count());
        for constraint in model.constraints() {
            let terms: Vec<(usize, i64)> = constraint
                .terms()
                .iter()
                .map(|&(var, coef)| (var.index(), coef))
                .collect();
            let negated = || terms.iter().map(|&(v, c)| (v, -c)).collect::<Vec<_>>();
            match constraint.comparison() {
                Comparison::Le => rows.push(Row {
                    terms: terms.clone(),
                    rhs: constraint.rhs(),
                }),
                Comparison::Ge => rows.push(Row {
                    terms: negated(),
                    rhs: -constraint.rhs(),
                }),
                Comparison::Eq => {
                    rows.push(Row {
                        terms: terms.clone(),
                        rhs: constraint.rhs(),
                    });
                    rows.push(Row {
                        terms: negated(),
                        rhs: -constraint.rhs(),
                    });
                }
            }
        }

        let mut watches = vec![Vec::new(); model.var_count()];
        for (r, row) in rows.iter().enumerate() {
            for &(var, _) in &row.terms {
                watches[var].push(r);
            }
        }

        let queued = vec![false; rows.len()];
        Self {
            rows,
            watches,
            queue: VecDeque::new(),
            queued,
        }
    }

    #[cfg(test)]
    pub(crate) fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Schedules every row.
    pub(crate) fn enqueue_all(&mut self) {
        for r in 0..self.rows.len() {
            self.enqueue_row(r);
        }
    }

    /// Schedules every row that mentions `var`.
    pub(crate) fn enqueue_var(&mut self, var: usize) {
        for i in 0..self.watches[var].len() {
            let r = self.watches[var][i];
            self.enqueue_row(r);
        }
    }

    fn enqueue_row(&mut self, r: usize) {
        if !self.queued[r] {
            self.queued[r] = true;
            self.queue.push_back(r);
        }
    }

    fn clear(&mut self) {
        while let Some(r) = self.queue.pop_front() {
            self.queued[r] = false;
        }
    }

    /// Runs the queue to a fixpoint.
    ///
    /// Returns false on a conflict, leaving the queue empty and the domains
    /// in a partially filtered state for the caller to roll back.
    pub(crate) fn propagate(&mut self, domains: &mut Domains, propagations: &mut u64) -> bool {
        while let Some(r) = self.queue.pop_front() {
            self.queued[r] = false;
            if !self.filter_row(r, domains, propagations) {
                self.clear();
                return false;
            }
        }
        true
    }

    fn filter_row(&mut self, r: usize, domains: &mut Domains, propagations: &mut u64) -> bool {
        let row = &self.rows[r];
        let min_activity: i64 = row
            .terms
            .iter()
            .map(|&(v, a)| min_contribution(domains, v, a))
            .sum();
        if min_activity > row.rhs {
            return false;
        }

        let mut changed: Vec<usize> = Vec::new();
        for &(v, a) in &row.terms {
            // a·x ≤ slack once every other term sits at its minimum.
            let slack = row.rhs - (min_activity - min_contribution(domains, v, a));
            let moved = if a > 0 {
                domains.lower_hi(v, floor_div(slack, a))
            } else {
                domains.raise_lo(v, ceil_div(slack, a))
            };
            match moved {
                None => return false,
                Some(true) => {
                    *propagations += 1;
                    changed.push(v);
                }
                Some(false) => {}
            }
        }

        for v in changed {
            for i in 0..self.watches[v].len() {
                let other = self.watches[v][i];
                if other != r {
                    self.enqueue_row(other);
                }
            }
        }
        true
    }
}

#[inline]
fn min_contribution(domains: &Domains, var: usize, coef: i64) -> i64 {
    if coef > 0 {
        coef * domains.lo(var)
    } else {
        coef * domains.hi(var)
    }
}

fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

fn ceil_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) == (b < 0)) {
        q + 1
    } else {
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VarKind;

    #[test]
    fn test_rounding() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(ceil_div(7, 2), 4);
        assert_eq!(ceil_div(-7, -2), 4);
        assert_eq!(ceil_div(-3, -1), 3);
    }

    #[test]
    fn test_equality_propagates_both_ways() {
        let mut model = CpModel::new("m");
        let a = model.new_bool("a", VarKind::Decision);
        let b = model.new_bool("b", VarKind::Decision);
        let c = model.new_bool("c", VarKind::Decision);
        model.add_linear("one", [(a, 1), (b, 1), (c, 1)], Comparison::Eq, 1);

        let mut domains = Domains::new(&model);
        let mut propagator = Propagator::new(&model);
        assert_eq!(propagator.row_count(), 2);
        let mut count = 0;

        domains.raise_lo(a.index(), 1);
        propagator.enqueue_var(a.index());
        assert!(propagator.propagate(&mut domains, &mut count));
        assert_eq!(domains.hi(b.index()), 0);
        assert_eq!(domains.hi(c.index()), 0);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_last_candidate_is_forced() {
        let mut model = CpModel::new("m");
        let a = model.new_bool("a", VarKind::Decision);
        let b = model.new_bool("b", VarKind::Decision);
        model.add_linear("one", [(a, 1), (b, 1)], Comparison::Eq, 1);

        let mut domains = Domains::new(&model);
        let mut propagator = Propagator::new(&model);
        let mut count = 0;

        domains.lower_hi(a.index(), 0);
        propagator.enqueue_var(a.index());
        assert!(propagator.propagate(&mut domains, &mut count));
        assert_eq!(domains.lo(b.index()), 1);
    }

    #[test]
    fn test_min_of_two_bounds_auxiliary() {
        let mut model = CpModel::new("m");
        let x = model.new_int("x", 0, 3, VarKind::Decision);
        let y = model.new_int("y", 0, 5, VarKind::Decision);
        let g = model.new_int("g", 0, 10, VarKind::Auxiliary);
        model.add_linear("g_le_x", [(g, 1), (x, -1)], Comparison::Le, 0);
        model.add_linear("g_le_y", [(g, 1), (y, -1)], Comparison::Le, 0);

        let mut domains = Domains::new(&model);
        let mut propagator = Propagator::new(&model);
        let mut count = 0;
        propagator.enqueue_all();
        assert!(propagator.propagate(&mut domains, &mut count));
        assert_eq!(domains.hi(g.index()), 3);
    }

    #[test]
    fn test_conflict() {
        let mut model = CpModel::new("m");
        let a = model.new_bool("a", VarKind::Decision);
        let b = model.new_bool("b", VarKind::Decision);
        model.add_linear("at_least_three", [(a, 1), (b, 1)], Comparison::Ge, 3);

        let mut domains = Domains::new(&model);
        let mut propagator = Propagator::new(&model);
        let mut count = 0;
        propagator.enqueue_all();
        assert!(!propagator.propagate(&mut domains, &mut count));
    }
}
