use crate::config::RoleSearch;
use crate::domain::TEAM_SIZE;

type Ordering = [usize; TEAM_SIZE];

const IDENTITY: Ordering = [0, 1, 2, 3, 4];

/// Produces the role orderings tried for a group of five players.
/// The first ordering is always the group's own order.
#[derive(Debug, Clone)]
pub struct RoleAssigner {
    orderings: Vec<Ordering>,
}

impl RoleAssigner {
    pub fn new(mode: RoleSearch) -> Self {
        let orderings = match mode {
            RoleSearch::Fixed => vec![IDENTITY],
            RoleSearch::Exhaustive => lexicographic_permutations(),
        };
        Self { orderings }
    }

    pub fn len(&self) -> usize {
        self.orderings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orderings.is_empty()
    }

    /// Slot-ordered versions of `group`; element `i` of each item plays role `i`
    pub fn assignments(&self, group: [usize; TEAM_SIZE]) -> impl Iterator<Item = [usize; TEAM_SIZE]> + '_ {
        self.orderings
            .iter()
            .map(move |ordering| ordering.map(|position| group[position]))
    }
}

/// All 5! orderings of slot positions, starting from the identity
fn lexicographic_permutations() -> Vec<Ordering> {
    let mut current = IDENTITY;
    let mut all = vec![current];

    while next_permutation(&mut current) {
        all.push(current);
    }

    all
}

fn next_permutation(values: &mut Ordering) -> bool {
    let Some(pivot) = (0..TEAM_SIZE - 1).rev().find(|&i| values[i] < values[i + 1]) else {
        return false;
    };

    let successor = (pivot + 1..TEAM_SIZE)
        .rev()
        .find(|&j| values[j] > values[pivot])
        .unwrap_or(pivot + 1);

    values.swap(pivot, successor);
    values[pivot + 1..].reverse();
    true
}
