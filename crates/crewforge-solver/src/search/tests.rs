//! Tests for the branch-and-bound engine.

use super::*;
use crate::model::{Comparison, VarId};
use crate::termination::NodeCountTermination;

fn solve(model: &CpModel) -> SolveOutcome {
    BranchAndBoundSolver::new().solve(model, &SolverConfig::unlimited())
}

/// Maximum objective over every valuation in the box, by enumeration.
fn brute_force(model: &CpModel) -> Option<f64> {
    let vars = model.vars();
    let mut values: Vec<i64> = vars.iter().map(|v| v.lo()).collect();
    if vars.iter().any(|v| v.lo() > v.hi()) {
        return None;
    }
    let mut best: Option<f64> = None;
    loop {
        let valuation = Valuation::from_values(values.clone());
        if model.violations(&valuation).is_empty() {
            let objective = model.objective().evaluate(&valuation);
            best = Some(best.map_or(objective, |b: f64| b.max(objective)));
        }
        // Odometer increment.
        let mut i = 0;
        loop {
            if i == values.len() {
                return best;
            }
            if values[i] < vars[i].hi() {
                values[i] += 1;
                break;
            }
            values[i] = vars[i].lo();
            i += 1;
        }
    }
}

/// Three people, two crews of capacity two, with pair bonuses.
fn pairing_model() -> (CpModel, Vec<[VarId; 2]>) {
    let mut model = CpModel::new("pairing");
    let x: Vec<[VarId; 2]> = (0..3)
        .map(|p| {
            [
                model.new_bool(format!("x_{p}_0"), VarKind::Decision),
                model.new_bool(format!("x_{p}_1"), VarKind::Decision),
            ]
        })
        .collect();
    for (p, row) in x.iter().enumerate() {
        model.add_linear(format!("one_{p}"), [(row[0], 1), (row[1], 1)], Comparison::Eq, 1);
    }
    for c in 0..2 {
        model.add_linear(
            format!("cap_{c}"),
            x.iter().map(|row| (row[c], 1)),
            Comparison::Le,
            2,
        );
    }
    // Bonus for person 0 and 2 sharing a crew, by crew.
    for c in 0..2 {
        let s = model.new_bool(format!("s_{c}"), VarKind::Auxiliary);
        model.add_linear(format!("s_{c}_a"), [(s, 1), (x[0][c], -1)], Comparison::Le, 0);
        model.add_linear(format!("s_{c}_b"), [(s, 1), (x[2][c], -1)], Comparison::Le, 0);
        model.add_objective_term(s, 3.0);
    }
    // Person 1 prefers crew 1.
    model.add_objective_term(x[1][1], 1.0);
    (model, x)
}

#[test]
fn test_pairing_is_optimal() {
    let (model, x) = pairing_model();
    let outcome = solve(&model);

    assert_eq!(outcome.status, EngineStatus::Optimal);
    assert_eq!(outcome.objective, Some(4.0));
    assert_eq!(outcome.objective, brute_force(&model));

    let valuation = outcome.valuation.unwrap();
    assert!(model.violations(&valuation).is_empty());
    assert!(valuation.is_true(x[1][1]));
    assert!(valuation.is_true(x[0][0]) && valuation.is_true(x[2][0]));
}

#[test]
fn test_general_integers() {
    let mut model = CpModel::new("knapsack");
    let x = model.new_int("x", 0, 5, VarKind::Decision);
    let y = model.new_int("y", 0, 5, VarKind::Decision);
    model.add_linear("weight", [(x, 1), (y, 2)], Comparison::Le, 7);
    model.add_objective_term(x, 3.0);
    model.add_objective_term(y, 4.0);

    let outcome = solve(&model);
    assert_eq!(outcome.status, EngineStatus::Optimal);
    assert_eq!(outcome.objective, Some(19.0));
    let valuation = outcome.valuation.unwrap();
    assert_eq!((valuation.value(x), valuation.value(y)), (5, 1));
}

#[test]
fn test_negative_coefficients_prefer_low_values() {
    let mut model = CpModel::new("min");
    let x = model.new_int("x", 0, 4, VarKind::Decision);
    let y = model.new_int("y", 0, 4, VarKind::Decision);
    model.add_linear("cover", [(x, 1), (y, 1)], Comparison::Ge, 3);
    model.add_objective_term(x, -2.0);
    model.add_objective_term(y, -1.0);
    model.add_objective_constant(10.0);

    let outcome = solve(&model);
    assert_eq!(outcome.status, EngineStatus::Optimal);
    assert_eq!(outcome.objective, Some(7.0));
    assert_eq!(outcome.objective, brute_force(&model));
}

#[test]
fn test_matches_enumeration_on_generated_models() {
    // Small linear congruential generator for reproducible coefficients.
    let mut state: u64 = 0x2545_f491;
    let mut next = |m: u64| {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 33) % m) as i64
    };

    for round in 0..12 {
        let mut model = CpModel::new(format!("generated_{round}"));
        let vars: Vec<VarId> = (0..5)
            .map(|i| {
                let kind = if i < 4 { VarKind::Decision } else { VarKind::Auxiliary };
                model.new_int(format!("v{i}"), 0, 1 + next(2), kind)
            })
            .collect();
        for k in 0..3 {
            let terms: Vec<(VarId, i64)> = vars.iter().map(|&v| (v, next(5) - 2)).collect();
            let comparison = if k == 0 { Comparison::Ge } else { Comparison::Le };
            model.add_linear(format!("c{k}"), terms, comparison, next(4) as i64 - 1);
        }
        for &v in &vars {
            model.add_objective_term(v, (next(7) - 3) as f64 * 0.5);
        }

        let outcome = solve(&model);
        let expected = brute_force(&model);
        match expected {
            Some(best) => {
                assert_eq!(outcome.status, EngineStatus::Optimal, "round {round}");
                let objective = outcome.objective.unwrap();
                assert!((objective - best).abs() < 1e-9, "round {round}: {objective} vs {best}");
                assert!(model.violations(&outcome.valuation.unwrap()).is_empty());
            }
            None => assert_eq!(outcome.status, EngineStatus::Infeasible, "round {round}"),
        }
    }
}

#[test]
fn test_infeasible() {
    let mut model = CpModel::new("infeasible");
    let a = model.new_bool("a", VarKind::Decision);
    let b = model.new_bool("b", VarKind::Decision);
    model.add_linear("both", [(a, 1), (b, 1)], Comparison::Eq, 2);
    model.add_linear("not_both", [(a, 1), (b, 1)], Comparison::Le, 1);

    let outcome = solve(&model);
    assert_eq!(outcome.status, EngineStatus::Infeasible);
    assert!(outcome.valuation.is_none());
    assert!(outcome.objective.is_none());
}

#[test]
fn test_empty_domain_is_infeasible() {
    let mut model = CpModel::new("empty");
    let a = model.new_int("a", 0, 3, VarKind::Decision);
    model.fix(a, 7);
    let outcome = solve(&model);
    assert_eq!(outcome.status, EngineStatus::Infeasible);
    assert_eq!(outcome.statistics.node_count, 0);
}

#[test]
fn test_empty_model_is_trivially_optimal() {
    let mut model = CpModel::new("empty");
    model.add_objective_constant(2.5);
    let outcome = solve(&model);
    assert_eq!(outcome.status, EngineStatus::Optimal);
    assert_eq!(outcome.objective, Some(2.5));
    assert!(outcome.valuation.unwrap().is_empty());
}

/// `a + b = 1`, `s ≤ b`, maximize `s`. The preferred value `a = 1` only
/// leads to a zero-valued solution.
fn late_optimum_model() -> CpModel {
    let mut model = CpModel::new("late");
    let a = model.new_bool("a", VarKind::Decision);
    let b = model.new_bool("b", VarKind::Decision);
    let s = model.new_bool("s", VarKind::Auxiliary);
    model.add_linear("one", [(a, 1), (b, 1)], Comparison::Eq, 1);
    model.add_linear("s_le_b", [(s, 1), (b, -1)], Comparison::Le, 0);
    model.add_objective_term(s, 1.0);
    model
}

#[test]
fn test_branch_with_better_bound_goes_first() {
    let outcome = solve(&late_optimum_model());
    assert_eq!(outcome.status, EngineStatus::Optimal);
    assert_eq!(outcome.objective, Some(1.0));
    // The first solution is already the optimum; `a = 1` is pruned.
    assert_eq!(outcome.statistics.solution_count, 1);
    assert_eq!(outcome.statistics.improvement_count(), 1);
    assert_eq!(outcome.statistics.best_objective(), Some(1.0));
    assert!(outcome.statistics.prune_count >= 1);
}

#[test]
fn test_node_limit_returns_incumbent() {
    let model = late_optimum_model();
    // Node 3 is the first leaf; the proof needs more.
    let outcome = BranchAndBoundSolver::new().solve_with(&model, &NodeCountTermination::new(4));
    assert_eq!(outcome.status, EngineStatus::Feasible);
    assert_eq!(outcome.objective, Some(1.0));
    assert_eq!(outcome.statistics.node_count, 4);
    assert!(model.violations(&outcome.valuation.unwrap()).is_empty());
}

/// Twelve people in three interchangeable crews of four, where crew
/// diversity only shows once crews fill up.
fn balanced_crews_model() -> CpModel {
    let mut model = CpModel::new("balanced");
    let people = 12;
    let crews = 3;
    let x: Vec<Vec<VarId>> = (0..people)
        .map(|p| {
            (0..crews)
                .map(|c| model.new_bool(format!("x_{p}_{c}"), VarKind::Decision))
                .collect()
        })
        .collect();
    for (p, row) in x.iter().enumerate() {
        model.add_linear(format!("one_{p}"), row.iter().map(|&v| (v, 1)), Comparison::Eq, 1);
    }
    for c in 0..crews {
        model.add_linear(format!("cap_{c}"), x.iter().map(|row| (row[c], 1)), Comparison::Le, 4);
        // Even people are one kind, odd people the other.
        let g = model.new_int(format!("g_{c}"), 0, 2, VarKind::Auxiliary);
        for parity in 0..2 {
            model.add_linear(
                format!("g_{c}_{parity}"),
                std::iter::once((g, 1)).chain(
                    x.iter()
                        .enumerate()
                        .filter(|(p, _)| p % 2 == parity)
                        .map(|(_, row)| (row[c], -1)),
                ),
                Comparison::Le,
                0,
            );
            model.add_linear(
                format!("g_{c}_{parity}_cap"),
                std::iter::once((g, 1)).chain(
                    x.iter()
                        .enumerate()
                        .filter(|(p, _)| p % 2 != parity)
                        .map(|(_, row)| (row[c], 1)),
                ),
                Comparison::Le,
                4,
            );
        }
        model.add_objective_term(g, 1.0);
    }
    model
}

#[test]
fn test_balanced_crews_found_on_first_dive() {
    let model = balanced_crews_model();
    let outcome = BranchAndBoundSolver::new()
        .solve_with(&model, &NodeCountTermination::new(100_000));
    assert_eq!(outcome.status, EngineStatus::Optimal);
    assert_eq!(outcome.objective, Some(6.0));
    assert_eq!(outcome.statistics.improvement_count(), 1);
}

#[test]
fn test_budget_without_solution() {
    let model = late_optimum_model();
    let config = SolverConfig::new().with_node_count_limit(1);
    let outcome = BranchAndBoundSolver::new().solve(&model, &config);
    assert_eq!(outcome.status, EngineStatus::TimeoutNoSolution);
    assert!(outcome.valuation.is_none());
}

#[test]
fn test_engine_name() {
    assert_eq!(BranchAndBoundSolver::new().engine_name(), "BranchAndBound");
}
