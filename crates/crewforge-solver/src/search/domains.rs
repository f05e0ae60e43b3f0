//! Variable bounds with an undo trail.
//!
//! Every bound change is logged with the bounds it replaced. A search frame
//! remembers the trail length when it was opened and rolls back to it on
//! backtrack, restoring entries in reverse order.

use crate::model::{CpModel, Valuation};

/// Bounds of one variable before a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrailEntry {
    var: usize,
    old_lo: i64,
    old_hi: i64,
}

/// Current bounds of every model variable.
#[derive(Debug, Clone)]
pub(crate) struct Domains {
    lo: Vec<i64>,
    hi: Vec<i64>,
    trail: Vec<TrailEntry>,
}

impl Domains {
    pub(crate) fn new(model: &CpModel) -> Self {
        Self {
            lo: model.vars().iter().map(|v| v.lo()).collect(),
            hi: model.vars().iter().map(|v| v.hi()).collect(),
            trail: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn lo(&self, var: usize) -> i64 {
        self.lo[var]
    }

    #[inline]
    pub(crate) fn hi(&self, var: usize) -> i64 {
        self.hi[var]
    }

    #[inline]
    pub(crate) fn is_fixed(&self, var: usize) -> bool {
        self.lo[var] == self.hi[var]
    }

    /// Returns true if some domain is empty.
    pub(crate) fn any_empty(&self) -> bool {
        self.lo.iter().zip(&self.hi).any(|(lo, hi)| lo > hi)
    }

    /// Current trail length, used as a rollback point.
    #[inline]
    pub(crate) fn mark(&self) -> usize {
        self.trail.len()
    }

    /// Raises the lower bound. Returns `Some(true)` if the bound moved,
    /// `Some(false)` if it was already at least `value`, and `None` if the
    /// domain became empty.
    pub(crate) fn raise_lo(&mut self, var: usize, value: i64) -> Option<bool> {
        if value <= self.lo[var] {
            return Some(false);
        }
        self.log(var);
        self.lo[var] = value;
        (value <= self.hi[var]).then_some(true)
    }

    /// Lowers the upper bound, with the same result convention as
    /// [`raise_lo`](Self::raise_lo).
    pub(crate) fn lower_hi(&mut self, var: usize, value: i64) -> Option<bool> {
        if value >= self.hi[var] {
            return Some(false);
        }
        self.log(var);
        self.hi[var] = value;
        (value >= self.lo[var]).then_some(true)
    }

    fn log(&mut self, var: usize) {
        self.trail.push(TrailEntry {
            var,
            old_lo: self.lo[var],
            old_hi: self.hi[var],
        });
    }

    /// Undoes every change made after `mark`.
    pub(crate) fn undo_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            if let Some(entry) = self.trail.pop() {
                self.lo[entry.var] = entry.old_lo;
                self.hi[entry.var] = entry.old_hi;
            }
        }
    }

    /// Reads the fixed values as a valuation.
    pub(crate) fn to_valuation(&self) -> Valuation {
        Valuation::from_values(self.lo.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VarKind;

    #[test]
    fn test_undo_restores_in_reverse() {
        let mut model = CpModel::new("m");
        model.new_int("x", 0, 10, VarKind::Decision);
        let mut domains = Domains::new(&model);

        let mark = domains.mark();
        assert_eq!(domains.raise_lo(0, 3), Some(true));
        assert_eq!(domains.lower_hi(0, 5), Some(true));
        assert_eq!(domains.raise_lo(0, 2), Some(false));
        assert_eq!((domains.lo(0), domains.hi(0)), (3, 5));

        domains.undo_to(mark);
        assert_eq!((domains.lo(0), domains.hi(0)), (0, 10));
    }

    #[test]
    fn test_wipeout_is_reported() {
        let mut model = CpModel::new("m");
        model.new_bool("b", VarKind::Decision);
        let mut domains = Domains::new(&model);
        assert_eq!(domains.lower_hi(0, 0), Some(true));
        assert_eq!(domains.raise_lo(0, 1), None);
        domains.undo_to(0);
        assert!(!domains.is_fixed(0));
    }
}
