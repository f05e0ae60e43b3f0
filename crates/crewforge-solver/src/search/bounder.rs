//! Objective bounds for branch-and-bound pruning.

use super::domains::Domains;
use crate::model::{Comparison, CpModel, LinearConstraint};

/// Calculates the optimistic objective bound of a search node.
///
/// The bound takes every objective variable at its most favorable current
/// bound, so it is never below the objective of any solution below the
/// node. Propagation tightens auxiliary bounds as decisions are made, which
/// tightens the bound with them.
///
/// Rewarded booleans that share a `Σ ≤ 1` row form an exclusive group: at
/// most one of them can be true, so the group adds only its largest
/// coefficient among members still free to be true.
#[derive(Debug, Clone)]
pub(crate) struct ObjectiveBounder {
    // Merged coefficient per objective variable outside any group.
    terms: Vec<(usize, f64)>,
    groups: Vec<Vec<(usize, f64)>>,
    constant: f64,
}

impl ObjectiveBounder {
    pub(crate) fn new(model: &CpModel) -> Self {
        let mut coefs = vec![0.0; model.var_count()];
        for &(var, coef) in model.objective().terms() {
            coefs[var.index()] += coef;
        }

        let mut grouped = vec![false; coefs.len()];
        let mut groups = Vec::new();
        for constraint in model.constraints() {
            if !is_exclusive(model, constraint, &coefs, &grouped) {
                continue;
            }
            let group: Vec<(usize, f64)> = constraint
                .terms()
                .iter()
                .map(|&(var, _)| (var.index(), coefs[var.index()]))
                .collect();
            for &(var, _) in &group {
                grouped[var] = true;
            }
            groups.push(group);
        }

        let terms = coefs
            .into_iter()
            .enumerate()
            .filter(|&(var, c)| c != 0.0 && !grouped[var])
            .collect();
        Self {
            terms,
            groups,
            constant: model.objective().constant(),
        }
    }

    /// Coefficient of a variable in the objective.
    pub(crate) fn coefficients(&self, var_count: usize) -> Vec<f64> {
        let mut coefs = vec![0.0; var_count];
        for &(var, coef) in self.terms.iter().chain(self.groups.iter().flatten()) {
            coefs[var] = coef;
        }
        coefs
    }

    pub(crate) fn optimistic_bound(&self, domains: &Domains) -> f64 {
        let ungrouped: f64 = self
            .terms
            .iter()
            .map(|&(var, coef)| {
                if coef > 0.0 {
                    coef * domains.hi(var) as f64
                } else {
                    coef * domains.lo(var) as f64
                }
            })
            .sum();
        let grouped: f64 = self
            .groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|&(var, coef)| coef * domains.hi(var) as f64)
                    .fold(0.0, f64::max)
            })
            .sum();
        self.constant + ungrouped + grouped
    }

    #[cfg(test)]
    pub(crate) fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// `Σ x ≤ 1` over at least two distinct, ungrouped booleans that all carry
/// a positive objective coefficient.
fn is_exclusive(
    model: &CpModel,
    constraint: &LinearConstraint,
    coefs: &[f64],
    grouped: &[bool],
) -> bool {
    let terms = constraint.terms();
    if constraint.comparison() != Comparison::Le || constraint.rhs() != 1 || terms.len() < 2 {
        return false;
    }
    let mut seen = Vec::with_capacity(terms.len());
    for &(var, coef) in terms {
        let index = var.index();
        let domain = model.var(var);
        if coef != 1
            || domain.lo() < 0
            || domain.hi() > 1
            || coefs[index] <= 0.0
            || grouped[index]
            || seen.contains(&index)
        {
            return false;
        }
        seen.push(index);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VarKind;

    #[test]
    fn test_bound_uses_favorable_side() {
        let mut model = CpModel::new("m");
        let a = model.new_int("a", 0, 4, VarKind::Auxiliary);
        let b = model.new_int("b", 1, 3, VarKind::Auxiliary);
        model.add_objective_term(a, 2.0);
        model.add_objective_term(b, -1.0);
        model.add_objective_term(a, 0.5);
        model.add_objective_constant(1.0);

        let bounder = ObjectiveBounder::new(&model);
        let domains = Domains::new(&model);
        // 1 + 2.5 * 4 - 1 * 1
        assert_eq!(bounder.optimistic_bound(&domains), 10.0);
        assert_eq!(bounder.coefficients(2), vec![2.5, -1.0]);
    }

    #[test]
    fn test_exclusive_booleans_count_once() {
        let mut model = CpModel::new("m");
        let a = model.new_bool("a", VarKind::Auxiliary);
        let b = model.new_bool("b", VarKind::Auxiliary);
        let c = model.new_bool("c", VarKind::Auxiliary);
        model.add_objective_term(a, 2.0);
        model.add_objective_term(b, 3.0);
        model.add_objective_term(c, 1.0);
        model.add_linear("once", [(a, 1), (b, 1)], Comparison::Le, 1);
        // Not exclusive: the right-hand side allows both.
        model.add_linear("twice", [(b, 1), (c, 1)], Comparison::Le, 2);

        let bounder = ObjectiveBounder::new(&model);
        assert_eq!(bounder.group_count(), 1);
        let mut domains = Domains::new(&model);
        // max(2, 3) + 1
        assert_eq!(bounder.optimistic_bound(&domains), 4.0);
        assert_eq!(bounder.coefficients(3), vec![2.0, 3.0, 1.0]);

        domains.lower_hi(b.index(), 0);
        assert_eq!(bounder.optimistic_bound(&domains), 3.0);
        domains.lower_hi(a.index(), 0);
        assert_eq!(bounder.optimistic_bound(&domains), 1.0);
    }

    #[test]
    fn test_unrewarded_row_is_not_a_group() {
        let mut model = CpModel::new("m");
        let a = model.new_bool("a", VarKind::Auxiliary);
        let b = model.new_bool("b", VarKind::Decision);
        model.add_objective_term(a, 2.0);
        model.add_linear("once", [(a, 1), (b, 1)], Comparison::Le, 1);

        let bounder = ObjectiveBounder::new(&model);
        assert_eq!(bounder.group_count(), 0);
        assert_eq!(bounder.optimistic_bound(&Domains::new(&model)), 2.0);
    }
}
