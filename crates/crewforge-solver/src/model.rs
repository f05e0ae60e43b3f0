//! Engine-neutral constraint model.
//!
//! A [`CpModel`] holds bounded integer variables (booleans are `[0, 1]`),
//! linear constraints with integer coefficients, and one linear objective
//! with real coefficients that is maximized. Fixing a variable is a bound
//! change; nothing else about the model encodes constants.

use std::fmt;

/// Handle to a variable of one [`CpModel`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    /// Returns the position of the variable in its model.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarId({})", self.0)
    }
}

/// Role of a variable in the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// Encodes a choice of the problem. Branched on first.
    Decision,
    /// Derived quantity bounded by decision variables, such as a min-of-two
    /// score term.
    Auxiliary,
}

/// A bounded integer variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntVar {
    name: String,
    lo: i64,
    hi: i64,
    kind: VarKind,
}

impl IntVar {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lo(&self) -> i64 {
        self.lo
    }

    pub fn hi(&self) -> i64 {
        self.hi
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }

    /// Returns true if the domain holds a single value.
    pub fn is_fixed(&self) -> bool {
        self.lo == self.hi
    }
}

/// Relation between a linear expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Le,
    Eq,
    Ge,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparison::Le => "<=",
            Comparison::Eq => "=",
            Comparison::Ge => ">=",
        })
    }
}

/// `Σ a·x {≤, =, ≥} rhs` with integer coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    name: String,
    terms: Vec<(VarId, i64)>,
    comparison: Comparison,
    rhs: i64,
}

impl LinearConstraint {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn rhs(&self) -> i64 {
        self.rhs
    }

    /// Value of the left-hand side under a valuation.
    pub fn activity(&self, valuation: &Valuation) -> i64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * valuation.value(var))
            .sum()
    }

    /// Returns true if the valuation satisfies the constraint.
    pub fn is_satisfied(&self, valuation: &Valuation) -> bool {
        let lhs = self.activity(valuation);
        match self.comparison {
            Comparison::Le => lhs <= self.rhs,
            Comparison::Eq => lhs == self.rhs,
            Comparison::Ge => lhs >= self.rhs,
        }
    }
}

/// Linear objective, maximized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Objective {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl Objective {
    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Value of the objective under a valuation.
    pub fn evaluate(&self, valuation: &Valuation) -> f64 {
        self.constant
            + self
                .terms
                .iter()
                .map(|&(var, coef)| coef * valuation.value(var) as f64)
                .sum::<f64>()
    }
}

/// A complete constraint model.
#[derive(Debug, Clone, Default)]
pub struct CpModel {
    name: String,
    vars: Vec<IntVar>,
    constraints: Vec<LinearConstraint>,
    objective: Objective,
}

impl CpModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a boolean variable.
    pub fn new_bool(&mut self, name: impl Into<String>, kind: VarKind) -> VarId {
        self.new_int(name, 0, 1, kind)
    }

    /// Adds an integer variable with domain `[lo, hi]`.
    pub fn new_int(&mut self, name: impl Into<String>, lo: i64, hi: i64, kind: VarKind) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(IntVar {
            name: name.into(),
            lo,
            hi,
            kind,
        });
        id
    }

    /// Fixes a variable to one value.
    ///
    /// Fixing outside the current domain empties it, which the engine
    /// reports as infeasible.
    pub fn fix(&mut self, var: VarId, value: i64) {
        let v = &mut self.vars[var.0];
        if value < v.lo || value > v.hi {
            v.lo = 1;
            v.hi = 0;
        } else {
            v.lo = value;
            v.hi = value;
        }
    }

    /// Adds a linear constraint and returns its position.
    pub fn add_linear(
        &mut self,
        name: impl Into<String>,
        terms: impl IntoIterator<Item = (VarId, i64)>,
        comparison: Comparison,
        rhs: i64,
    ) -> usize {
        let terms: Vec<(VarId, i64)> = terms.into_iter().filter(|&(_, c)| c != 0).collect();
        self.constraints.push(LinearConstraint {
            name: name.into(),
            terms,
            comparison,
            rhs,
        });
        self.constraints.len() - 1
    }

    /// Adds `coef · var` to the objective.
    pub fn add_objective_term(&mut self, var: VarId, coef: f64) {
        if coef != 0.0 {
            self.objective.terms.push((var, coef));
        }
    }

    /// Adds a constant to the objective.
    pub fn add_objective_constant(&mut self, value: f64) {
        self.objective.constant += value;
    }

    pub fn var(&self, id: VarId) -> &IntVar {
        &self.vars[id.0]
    }

    pub fn vars(&self) -> &[IntVar] {
        &self.vars
    }

    /// Iterates over all variable handles.
    pub fn var_ids(&self) -> impl Iterator<Item = VarId> {
        (0..self.vars.len()).map(VarId)
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Number of decision variables.
    pub fn decision_count(&self) -> usize {
        self.vars
            .iter()
            .filter(|v| v.kind == VarKind::Decision)
            .count()
    }

    /// Names of every constraint or variable bound the valuation breaks.
    pub fn violations(&self, valuation: &Valuation) -> Vec<String> {
        let mut violations = Vec::new();
        if valuation.len() != self.vars.len() {
            violations.push(format!(
                "valuation has {} values for {} variables",
                valuation.len(),
                self.vars.len()
            ));
            return violations;
        }
        for (i, var) in self.vars.iter().enumerate() {
            let value = valuation.value(VarId(i));
            if value < var.lo || value > var.hi {
                violations.push(format!(
                    "{} = {} outside [{}, {}]",
                    var.name, value, var.lo, var.hi
                ));
            }
        }
        for constraint in &self.constraints {
            if !constraint.is_satisfied(valuation) {
                violations.push(format!(
                    "{}: {} {} {} does not hold",
                    constraint.name,
                    constraint.activity(valuation),
                    constraint.comparison,
                    constraint.rhs
                ));
            }
        }
        violations
    }
}

/// One value per model variable, as returned by an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Valuation {
    values: Vec<i64>,
}

impl Valuation {
    /// Wraps raw values, one per variable in model order.
    pub fn from_values(values: Vec<i64>) -> Self {
        Self { values }
    }

    /// Returns the value of a variable.
    #[inline]
    pub fn value(&self, var: VarId) -> i64 {
        self.values[var.0]
    }

    /// Returns true if a boolean variable is set.
    #[inline]
    pub fn is_true(&self, var: VarId) -> bool {
        self.value(var) != 0
    }

    /// Overwrites the value of a variable.
    pub fn set(&mut self, var: VarId, value: i64) {
        self.values[var.0] = value;
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
