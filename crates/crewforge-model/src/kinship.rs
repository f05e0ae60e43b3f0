//! Kinship and friend pairs, and the closure check over kinship groups.

use std::collections::BTreeSet;

use crewforge_core::{CenterIndex, CrewForgeError, PersonIndex, Result, Roster};

/// How two people in a kinship pair are related.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KinshipKind {
    ParentChild,
    Siblings,
}

/// Two people who must share a center but not a crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KinshipPair {
    /// The child for parent/child pairs, the lower index for siblings.
    pub a: PersonIndex,
    pub b: PersonIndex,
    pub kind: KinshipKind,
}

/// Every parent/child and sibling pair of the roster, each listed once.
pub fn kinship_pairs(roster: &Roster) -> Vec<KinshipPair> {
    let mut pairs = Vec::new();
    for p in roster.person_indices() {
        let person = roster.person(p);
        if let Some(parent) = person.parent() {
            pairs.push(KinshipPair {
                a: p,
                b: parent,
                kind: KinshipKind::ParentChild,
            });
        }
        for &sibling in person.siblings() {
            if p < sibling {
                pairs.push(KinshipPair {
                    a: p,
                    b: sibling,
                    kind: KinshipKind::Siblings,
                });
            }
        }
    }
    pairs
}

/// Every unordered pair of people where at least one lists the other as a
/// resolved friend choice, lower index first.
pub fn friend_pairs(roster: &Roster) -> Vec<(PersonIndex, PersonIndex)> {
    let mut pairs = BTreeSet::new();
    for chooser in roster.friend_choosers() {
        for (_, friend) in roster.person(chooser).resolved_friends() {
            pairs.insert((chooser.min(friend), chooser.max(friend)));
        }
    }
    pairs.into_iter().collect()
}

/// People connected through parent and sibling links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KinshipGroups {
    groups: Vec<Vec<PersonIndex>>,
}

impl KinshipGroups {
    /// Groups the endpoints of the given pairs into connected components.
    /// Only groups with at least two members are kept.
    pub fn from_pairs(roster: &Roster, pairs: &[KinshipPair]) -> Self {
        let mut parent: Vec<usize> = (0..roster.people().len()).collect();

        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }

        for pair in pairs {
            let ra = find(&mut parent, pair.a.get());
            let rb = find(&mut parent, pair.b.get());
            if ra != rb {
                parent[ra.max(rb)] = ra.min(rb);
            }
        }

        let mut members: Vec<Vec<PersonIndex>> = vec![Vec::new(); parent.len()];
        for i in 0..parent.len() {
            let root = find(&mut parent, i);
            members[root].push(PersonIndex::new(i));
        }
        Self {
            groups: members.into_iter().filter(|g| g.len() > 1).collect(),
        }
    }

    pub fn groups(&self) -> &[Vec<PersonIndex>] {
        &self.groups
    }

    /// Centers acceptable to every member of a group.
    pub fn common_centers(roster: &Roster, group: &[PersonIndex]) -> Vec<CenterIndex> {
        let mut common: Option<BTreeSet<CenterIndex>> = None;
        for &member in group {
            let centers: BTreeSet<CenterIndex> =
                roster.eligible_centers(member).into_iter().collect();
            common = Some(match common {
                None => centers,
                Some(acc) => acc.intersection(&centers).copied().collect(),
            });
        }
        common.unwrap_or_default().into_iter().collect()
    }
}

/// Checks that kinship rules can be met at all.
///
/// Pairs where both people are pre-assigned must already be in the same
/// center and on different crews, and every kinship group must have a
/// center acceptable to all its members.
pub fn check_kinship(roster: &Roster, pairs: &[KinshipPair]) -> Result<()> {
    for pair in pairs {
        let (Some(crew_a), Some(crew_b)) = (
            roster.person(pair.a).fixed_crew(),
            roster.person(pair.b).fixed_crew(),
        ) else {
            continue;
        };
        let a = roster.person(pair.a).name();
        let b = roster.person(pair.b).name();
        if roster.crew(crew_a).center() != roster.crew(crew_b).center() {
            return Err(CrewForgeError::ModelConstruction(format!(
                "{a} and {b} are related but pre-assigned to different centers"
            )));
        }
        if crew_a == crew_b {
            return Err(CrewForgeError::ModelConstruction(format!(
                "{a} and {b} are related but pre-assigned to the same crew {}",
                roster.crew(crew_a).id()
            )));
        }
    }

    let groups = KinshipGroups::from_pairs(roster, pairs);
    for group in groups.groups() {
        if KinshipGroups::common_centers(roster, group).is_empty() {
            let names: Vec<&str> = group.iter().map(|&p| roster.person(p).name()).collect();
            return Err(CrewForgeError::ModelConstruction(format!(
                "family of {} has no center acceptable to every member",
                names.join(", ")
            )));
        }
    }
    Ok(())
}

/// Checks friend pairs where both people are pre-assigned.
pub fn check_fixed_friends(roster: &Roster, pairs: &[(PersonIndex, PersonIndex)]) -> Result<()> {
    for &(a, b) in pairs {
        match (roster.person(a).fixed_crew(), roster.person(b).fixed_crew()) {
            (Some(crew_a), Some(crew_b)) if crew_a == crew_b => {
                return Err(CrewForgeError::ModelConstruction(format!(
                    "friends {} and {} are both pre-assigned to crew {}",
                    roster.person(a).name(),
                    roster.person(b).name(),
                    roster.crew(crew_a).id()
                )));
            }
            _ => {}
        }
    }
    Ok(())
}
