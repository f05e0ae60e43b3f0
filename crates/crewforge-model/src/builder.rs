//! Construction of decision variables and hard constraints.

use crewforge_config::AssignmentConfig;
use crewforge_core::{CrewIndex, PersonIndex, Result, Roster};
use crewforge_solver::{Comparison, CpModel, VarKind};
use tracing::info;

use crate::integrity::check_integrity;
use crate::kinship::{check_fixed_friends, check_kinship, friend_pairs, kinship_pairs, KinshipPair};
use crate::layout::IndicatorLayout;
use crate::symmetry::interchangeable_crews;

/// A constraint model over one roster together with its indicator layout.
#[derive(Debug, Clone)]
pub struct CrewModel {
    pub(crate) model: CpModel,
    pub(crate) layout: IndicatorLayout,
}

impl CrewModel {
    pub fn model(&self) -> &CpModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut CpModel {
        &mut self.model
    }

    pub fn layout(&self) -> &IndicatorLayout {
        &self.layout
    }

    pub fn into_parts(self) -> (CpModel, IndicatorLayout) {
        (self.model, self.layout)
    }
}

/// Builds the hard part of the assignment model.
///
/// The builder emits one boolean indicator per (decidable person, crew in
/// domain) pair and the constraints that keep every valuation a valid
/// assignment: exactly one crew per person, crew sizes, kinship and friend
/// separation, and with
/// [`require_friend_center`](AssignmentConfig::require_friend_center) a
/// shared center with some friend choice. The objective is added
/// afterwards by [`ObjectiveComposer`](crate::ObjectiveComposer).
///
/// Crews that are interchangeable are ordered by first use: the first
/// youth (in roster order) placed in such a group of crews goes on its
/// first crew, and a youth may open the next crew only once an earlier
/// youth is on the one before it. Every assignment has a relabeling of
/// those crews that satisfies the order with the same score.
///
/// # Example
///
/// ```
/// use crewforge_config::AssignmentConfig;
/// use crewforge_core::{CrewRecord, Gender, History, PersonRecord, Roster, YearLevel};
/// use crewforge_model::CrewModelBuilder;
///
/// let roster = Roster::builder()
///     .person(PersonRecord::youth("y1", "Ann Lee", Gender::Female, YearLevel::Junior, History::New))
///     .person(PersonRecord::youth("y2", "Bo Chen", Gender::Male, YearLevel::Senior, History::New))
///     .crew(CrewRecord::new("F01", "Fayette"))
///     .crew(CrewRecord::new("F02", "Fayette"))
///     .build()
///     .unwrap();
///
/// let config = AssignmentConfig::new().with_crew_size(1, 1);
/// let built = CrewModelBuilder::new(&roster, &config).build().unwrap();
/// assert_eq!(built.layout().len(), 4);
/// assert_eq!(built.model().decision_count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct CrewModelBuilder<'r> {
    roster: &'r Roster,
    config: AssignmentConfig,
}

impl<'r> CrewModelBuilder<'r> {
    pub fn new(roster: &'r Roster, config: &AssignmentConfig) -> Self {
        Self {
            roster,
            config: config.clone(),
        }
    }

    /// Runs the pre-construction checks and builds the model.
    ///
    /// # Errors
    ///
    /// Returns [`CrewForgeError::DataIntegrity`] when a youth has no
    /// eligible crew or a crew cannot hold its pre-assigned members, and
    /// [`CrewForgeError::ModelConstruction`] when kinship or friend rules
    /// contradict the pre-assigned placements.
    ///
    /// [`CrewForgeError::DataIntegrity`]: crewforge_core::CrewForgeError::DataIntegrity
    /// [`CrewForgeError::ModelConstruction`]: crewforge_core::CrewForgeError::ModelConstruction
    pub fn build(&self) -> Result<CrewModel> {
        let roster = self.roster;
        check_integrity(roster, &self.config)?;
        let kinship = kinship_pairs(roster);
        check_kinship(roster, &kinship)?;
        let friends = friend_pairs(roster);
        check_fixed_friends(roster, &friends)?;

        let mut model = CpModel::new("crew-assignment");
        let mut layout = IndicatorLayout::new(roster.people().len());

        for p in roster.decidable() {
            let person_id = roster.person(p).id();
            for c in roster.allowed_crews(p) {
                let var = model.new_bool(
                    format!("x[{},{}]", person_id, roster.crew(c).id()),
                    VarKind::Decision,
                );
                layout.push(p, c, var);
            }
            model.add_linear(
                format!("one_crew[{person_id}]"),
                layout.indicators(p).iter().map(|&(_, var)| (var, 1)),
                Comparison::Eq,
                1,
            );
        }

        self.add_crew_sizes(&mut model, &layout);
        for pair in &kinship {
            self.add_kinship(&mut model, &layout, pair);
        }
        for &(a, b) in &friends {
            self.add_friend_separation(&mut model, &layout, a, b);
        }
        if self.config.require_friend_center {
            self.add_friend_centers(&mut model, &layout);
        }
        let classes = interchangeable_crews(roster, &self.config, &layout, &kinship, &friends);
        for class in &classes {
            self.add_crew_order(&mut model, &layout, class);
        }

        info!(
            event = "model_built",
            people = roster.people().len(),
            decidable = roster.decidable_count(),
            crews = roster.crews().len(),
            indicators = layout.len(),
            variables = model.var_count(),
            constraints = model.constraint_count(),
            kinship_pairs = kinship.len(),
            friend_pairs = friends.len(),
            interchangeable_groups = classes.len(),
        );

        Ok(CrewModel { model, layout })
    }

    fn add_crew_sizes(&self, model: &mut CpModel, layout: &IndicatorLayout) {
        let roster = self.roster;
        for c in roster.crew_indices() {
            let crew = roster.crew(c);
            let (min, max) = crew.size_bounds(self.config.min_crew_size, self.config.max_crew_size);
            let fixed = i64::from(crew.fixed_count());
            let terms: Vec<_> = layout.on_crew(c).map(|(_, var)| (var, 1)).collect();
            model.add_linear(
                format!("size_min[{}]", crew.id()),
                terms.iter().copied(),
                Comparison::Ge,
                i64::from(min) - fixed,
            );
            model.add_linear(
                format!("size_max[{}]", crew.id()),
                terms,
                Comparison::Le,
                i64::from(max) - fixed,
            );
        }
    }

    fn add_kinship(&self, model: &mut CpModel, layout: &IndicatorLayout, pair: &KinshipPair) {
        let roster = self.roster;
        let (a, b) = (pair.a, pair.b);
        match (roster.person(a).fixed_crew(), roster.person(b).fixed_crew()) {
            (None, None) => {
                let label = format!("{},{}", roster.person(a).id(), roster.person(b).id());
                for k in roster.center_indices() {
                    let terms: Vec<_> = layout
                        .in_center(roster, a, k)
                        .into_iter()
                        .map(|var| (var, 1))
                        .chain(layout.in_center(roster, b, k).into_iter().map(|var| (var, -1)))
                        .collect();
                    if terms.is_empty() {
                        continue;
                    }
                    model.add_linear(
                        format!("kin_center[{label},{}]", roster.center(k).id()),
                        terms,
                        Comparison::Eq,
                        0,
                    );
                }
                for &(c, xa) in layout.indicators(a) {
                    if let Some(xb) = layout.indicator(b, c) {
                        model.add_linear(
                            format!("kin_apart[{label},{}]", roster.crew(c).id()),
                            [(xa, 1), (xb, 1)],
                            Comparison::Le,
                            1,
                        );
                    }
                }
            }
            (None, Some(fixed)) => self.pin_to_relative(model, layout, a, b, fixed),
            (Some(fixed), None) => self.pin_to_relative(model, layout, b, a, fixed),
            // Both fixed: checked before construction.
            (Some(_), Some(_)) => {}
        }
    }

    /// Keeps `person` in the center of `relative`'s fixed crew and off that
    /// crew.
    fn pin_to_relative(
        &self,
        model: &mut CpModel,
        layout: &IndicatorLayout,
        person: PersonIndex,
        relative: PersonIndex,
        fixed: CrewIndex,
    ) {
        let roster = self.roster;
        let center = roster.crew(fixed).center();
        let outside = layout.outside_center(roster, person, center);
        if !outside.is_empty() {
            model.add_linear(
                format!(
                    "kin_center[{},{}]",
                    roster.person(person).id(),
                    roster.person(relative).id()
                ),
                outside.into_iter().map(|var| (var, 1)),
                Comparison::Eq,
                0,
            );
        }
        if let Some(var) = layout.indicator(person, fixed) {
            model.fix(var, 0);
        }
    }

    fn add_friend_separation(
        &self,
        model: &mut CpModel,
        layout: &IndicatorLayout,
        a: PersonIndex,
        b: PersonIndex,
    ) {
        let roster = self.roster;
        match (roster.person(a).fixed_crew(), roster.person(b).fixed_crew()) {
            (None, None) => {
                for &(c, xa) in layout.indicators(a) {
                    if let Some(xb) = layout.indicator(b, c) {
                        model.add_linear(
                            format!(
                                "friend_apart[{},{},{}]",
                                roster.person(a).id(),
                                roster.person(b).id(),
                                roster.crew(c).id()
                            ),
                            [(xa, 1), (xb, 1)],
                            Comparison::Le,
                            1,
                        );
                    }
                }
            }
            (None, Some(fixed)) => {
                if let Some(var) = layout.indicator(a, fixed) {
                    model.fix(var, 0);
                }
            }
            (Some(fixed), None) => {
                if let Some(var) = layout.indicator(b, fixed) {
                    model.fix(var, 0);
                }
            }
            (Some(_), Some(_)) => {}
        }
    }

    /// `Σ x(p, k) − Σ_f Σ x(f, k) ≤ 0` per center `k` the chooser can
    /// join; a friend fixed in `k` satisfies the row outright.
    fn add_friend_centers(&self, model: &mut CpModel, layout: &IndicatorLayout) {
        let roster = self.roster;
        for chooser in roster.friend_choosers() {
            if !roster.person(chooser).is_decidable() {
                continue;
            }
            let friends: Vec<PersonIndex> = roster
                .person(chooser)
                .resolved_friends()
                .map(|(_, friend)| friend)
                .collect();
            for k in roster.center_indices() {
                let own = layout.in_center(roster, chooser, k);
                if own.is_empty() || friends.iter().any(|&f| roster.fixed_center(f) == Some(k)) {
                    continue;
                }
                let terms: Vec<_> = own
                    .into_iter()
                    .map(|var| (var, 1))
                    .chain(
                        friends
                            .iter()
                            .flat_map(|&f| layout.in_center(roster, f, k))
                            .map(|var| (var, -1)),
                    )
                    .collect();
                model.add_linear(
                    format!(
                        "friend_center[{},{}]",
                        roster.person(chooser).id(),
                        roster.center(k).id()
                    ),
                    terms,
                    Comparison::Le,
                    0,
                );
            }
        }
    }

    /// `x(q_j, c_i) − Σ_{l<j} x(q_l, c_{i−1}) ≤ 0` over the youths `q`
    /// that may join the group, for every crew after the first.
    fn add_crew_order(&self, model: &mut CpModel, layout: &IndicatorLayout, class: &[CrewIndex]) {
        let roster = self.roster;
        let Some(&first) = class.first() else {
            return;
        };
        let youths: Vec<PersonIndex> = roster
            .decidable()
            .filter(|&p| layout.indicator(p, first).is_some())
            .collect();
        for (j, &q) in youths.iter().enumerate() {
            for pair in class.windows(2) {
                let (previous, crew) = (pair[0], pair[1]);
                let Some(var) = layout.indicator(q, crew) else {
                    continue;
                };
                let earlier = youths[..j]
                    .iter()
                    .filter_map(|&l| layout.indicator(l, previous))
                    .map(|v| (v, -1));
                model.add_linear(
                    format!(
                        "crew_order[{},{}]",
                        roster.person(q).id(),
                        roster.crew(crew).id()
                    ),
                    std::iter::once((var, 1)).chain(earlier),
                    Comparison::Le,
                    0,
                );
            }
        }
    }
}
