use crate::domain::{POOL_SIZE, TEAM_SIZE};

/// A split of the pool into two groups of five, stored as a bit-set of the
/// dense indices in the first group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partition {
    mask: u16,
}

impl Partition {
    fn from_indices(indices: &[usize; TEAM_SIZE]) -> Self {
        let mask = indices.iter().fold(0u16, |mask, &index| mask | (1 << index));
        Self { mask }
    }

    /// Players `0..5` against players `5..10`
    pub fn identity() -> Self {
        Self::from_indices(&[0, 1, 2, 3, 4])
    }

    pub fn group_a(&self) -> [usize; TEAM_SIZE] {
        self.collect_group(true)
    }

    pub fn group_b(&self) -> [usize; TEAM_SIZE] {
        self.collect_group(false)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.mask & (1 << index) != 0
    }

    /// The same split with the groups exchanged
    pub fn mirrored(&self) -> Self {
        let full = (1u16 << POOL_SIZE) - 1;
        Self { mask: !self.mask & full }
    }

    fn collect_group(&self, in_first: bool) -> [usize; TEAM_SIZE] {
        let mut group = [0; TEAM_SIZE];
        let members = (0..POOL_SIZE).filter(|&index| self.contains(index) == in_first);
        for (slot, index) in group.iter_mut().zip(members) {
            *slot = index;
        }
        group
    }
}

/// Lexicographic 5-combinations of the pool indices, the same order as
/// walking `combinations(players, 5)` over the pool in input order.
#[derive(Debug, Clone)]
pub struct PartitionEnumerator {
    indices: [usize; TEAM_SIZE],
    exhausted: bool,
    mirror_free: bool,
}

impl PartitionEnumerator {
    /// Every ordered split: C(10, 5) = 252, each unordered split twice
    pub fn all() -> Self {
        Self::starting(false)
    }

    /// Only splits whose first group holds player 0: 126, each unordered
    /// split once, at the position of its first visit in `all()`
    pub fn mirror_free() -> Self {
        Self::starting(true)
    }

    fn starting(mirror_free: bool) -> Self {
        Self {
            indices: [0, 1, 2, 3, 4],
            exhausted: false,
            mirror_free,
        }
    }

    fn advance(&mut self) {
        let Some(pivot) = (0..TEAM_SIZE)
            .rev()
            .find(|&i| self.indices[i] < POOL_SIZE - TEAM_SIZE + i)
        else {
            self.exhausted = true;
            return;
        };

        self.indices[pivot] += 1;
        for i in pivot + 1..TEAM_SIZE {
            self.indices[i] = self.indices[i - 1] + 1;
        }

        if self.mirror_free && self.indices[0] != 0 {
            self.exhausted = true;
        }
    }
}

impl Iterator for PartitionEnumerator {
    type Item = Partition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let partition = Partition::from_indices(&self.indices);
        self.advance();
        Some(partition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_yields_every_combination_once() {
        let partitions: Vec<_> = PartitionEnumerator::all().collect();
        let distinct: HashSet<_> = partitions.iter().copied().collect();

        assert_eq!(partitions.len(), 252);
        assert_eq!(distinct.len(), 252);
    }

    #[test]
    fn test_first_partition_is_identity() {
        let first = PartitionEnumerator::all().next().unwrap();
        assert_eq!(first, Partition::identity());
        assert_eq!(first.group_a(), [0, 1, 2, 3, 4]);
        assert_eq!(first.group_b(), [5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_order_is_lexicographic() {
        let groups: Vec<_> = PartitionEnumerator::all().take(3).map(|p| p.group_a()).collect();
        assert_eq!(groups, vec![[0, 1, 2, 3, 4], [0, 1, 2, 3, 5], [0, 1, 2, 3, 6]]);

        let last = PartitionEnumerator::all().last().unwrap();
        assert_eq!(last.group_a(), [5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_groups_cover_pool_without_overlap() {
        for partition in PartitionEnumerator::all() {
            let mut seen: Vec<_> = partition.group_a().into_iter().chain(partition.group_b()).collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..POOL_SIZE).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_mirror_free_visits_each_unordered_split_first() {
        let all: Vec<_> = PartitionEnumerator::all().collect();
        let mirror_free: Vec<_> = PartitionEnumerator::mirror_free().collect();

        assert_eq!(mirror_free.len(), 126);
        assert_eq!(&all[..126], &mirror_free[..]);

        for partition in &mirror_free {
            let mirror_position = all.iter().position(|p| *p == partition.mirrored()).unwrap();
            assert!(mirror_position >= 126);
        }
    }

    #[test]
    fn test_enumerator_restarts_from_clone() {
        let fresh = PartitionEnumerator::mirror_free();
        let first_pass: Vec<_> = fresh.clone().collect();
        let second_pass: Vec<_> = fresh.collect();
        assert_eq!(first_pass, second_pass);
    }
}
