//! Candidate selection: filter out excluded ids, then draw a bounded uniform sample.

use crate::utils::error::{RecommendationError, Result};
use rand::seq::index;
use rand::Rng;
use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

pub const DEFAULT_MAX_RESPONSES: usize = 4;

/// Catalog ids not present in `excluded`, in catalog order.
///
/// A repeated catalog id is kept only at its first occurrence.
pub fn eligible<'a, S, E>(catalog: &'a [S], excluded: &HashSet<E>) -> Vec<&'a str>
where
    S: AsRef<str>,
    E: Borrow<str> + Hash + Eq,
{
    let mut seen = HashSet::with_capacity(catalog.len());
    catalog
        .iter()
        .map(|id| id.as_ref())
        .filter(|id| !excluded.contains(*id) && seen.insert(*id))
        .collect()
}

/// Uniformly samples `min(cap, |eligible|)` ids without replacement.
///
/// Every subset of that size is equally likely. The order of the returned ids
/// carries no meaning. Empty catalogs, fully excluded catalogs and a zero cap
/// all yield an empty vector.
pub fn select<S, E, R>(catalog: &[S], excluded: &HashSet<E>, cap: usize, rng: &mut R) -> Vec<String>
where
    S: AsRef<str>,
    E: Borrow<str> + Hash + Eq,
    R: Rng + ?Sized,
{
    let pool = eligible(catalog, excluded);
    let amount = cap.min(pool.len());
    if amount == 0 {
        return Vec::new();
    }

    index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i].to_string())
        .collect()
}

/// A [`select`] call with its cap fixed up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSelector {
    cap: usize,
}

impl CandidateSelector {
    pub fn new(cap: usize) -> Self {
        Self { cap }
    }

    /// Builds a selector from an untrusted signed cap.
    pub fn try_from_cap(cap: i64) -> Result<Self> {
        let reason = if cap < 0 {
            "cap must be zero or greater"
        } else {
            "cap exceeds the platform limit"
        };
        usize::try_from(cap)
            .map(Self::new)
            .map_err(|_| RecommendationError::InvalidArgument {
                name: "max_responses".to_string(),
                value: cap.to_string(),
                reason: reason.to_string(),
            })
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn select<S, E, R>(&self, catalog: &[S], excluded: &HashSet<E>, rng: &mut R) -> Vec<String>
    where
        S: AsRef<str>,
        E: Borrow<str> + Hash + Eq,
        R: Rng + ?Sized,
    {
        select(catalog, excluded, self.cap, rng)
    }
}

impl Default for CandidateSelector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESPONSES)
    }
}

impl TryFrom<i64> for CandidateSelector {
    type Error = RecommendationError;

    fn try_from(cap: i64) -> Result<Self> {
        Self::try_from_cap(cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn set(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn as_set(ids: &[String]) -> HashSet<&str> {
        ids.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_exactly_cap_eligible_returns_all_of_them() {
        let mut rng = StdRng::seed_from_u64(42);
        let catalog = ["A", "B", "C", "D", "E", "F"];

        let result = select(&catalog, &set(&["B", "D"]), 4, &mut rng);

        assert_eq!(result.len(), 4);
        assert_eq!(as_set(&result), HashSet::from(["A", "C", "E", "F"]));
    }

    #[test]
    fn test_fully_excluded_catalog_is_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        let catalog = ["L9ECAV7KIM", "2ZYFJ3GM2N", "0PUK6V6EV0"];

        let result = select(&catalog, &set(&catalog), 4, &mut rng);

        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let mut rng = StdRng::seed_from_u64(42);
        let catalog: [&str; 0] = [];

        assert!(select(&catalog, &HashSet::<String>::new(), 4, &mut rng).is_empty());
    }

    #[test]
    fn test_single_item() {
        let mut rng = StdRng::seed_from_u64(42);

        let result = select(&["X"], &HashSet::<String>::new(), 4, &mut rng);

        assert_eq!(result, vec!["X".to_string()]);
    }

    #[test]
    fn test_more_eligible_than_cap() {
        let mut rng = StdRng::seed_from_u64(7);
        let catalog = ["A", "B", "C", "D", "E"];

        let result = select(&catalog, &HashSet::<String>::new(), 4, &mut rng);

        assert_eq!(result.len(), 4);
        assert_eq!(as_set(&result).len(), 4);
        assert!(result.iter().all(|id| catalog.contains(&id.as_str())));
    }

    #[test]
    fn test_partial_overlap_limits_to_eligible_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let catalog = ["1", "2", "3", "4", "5"];

        let result = select(&catalog, &set(&["1", "2", "4"]), 4, &mut rng);

        assert_eq!(as_set(&result), HashSet::from(["3", "5"]));
    }

    #[test]
    fn test_zero_cap_is_empty() {
        let mut rng = StdRng::seed_from_u64(3);

        assert!(select(&["A", "B"], &HashSet::<String>::new(), 0, &mut rng).is_empty());
    }

    #[test]
    fn test_exclusions_outside_catalog_are_ignored() {
        let mut rng = StdRng::seed_from_u64(3);

        let result = select(&["A", "B"], &set(&["Z", "Q"]), 4, &mut rng);

        assert_eq!(as_set(&result), HashSet::from(["A", "B"]));
    }

    #[test]
    fn test_duplicate_catalog_entries_collapse() {
        let catalog = ["A", "B", "A", "C", "B"];

        assert_eq!(eligible(&catalog, &HashSet::<&str>::new()), vec!["A", "B", "C"]);

        let mut rng = StdRng::seed_from_u64(9);
        let result = select(&catalog, &HashSet::<&str>::new(), 4, &mut rng);
        assert_eq!(result.len(), 3);
        assert_eq!(as_set(&result).len(), 3);
    }

    #[test]
    fn test_eligibility_is_idempotent() {
        let catalog = ["A", "B", "C", "D", "E"];
        let excluded = set(&["B", "D"]);

        let once = eligible(&catalog, &excluded);
        let twice = eligible(&once, &excluded);

        assert_eq!(once, vec!["A", "C", "E"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_same_seed_same_selection() {
        let catalog: Vec<String> = (0..20).map(|i| format!("P{:02}", i)).collect();
        let excluded = set(&["P01", "P02", "P03"]);

        let first = select(&catalog, &excluded, 4, &mut StdRng::seed_from_u64(42));
        let second = select(&catalog, &excluded, 4, &mut StdRng::seed_from_u64(42));

        assert_eq!(first, second);
    }

    #[test]
    fn test_every_subset_is_reachable_and_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let catalog = ["A", "B", "C", "D"];
        let mut counts: HashMap<Vec<String>, usize> = HashMap::new();

        for _ in 0..6000 {
            let mut pick = select(&catalog, &HashSet::<String>::new(), 2, &mut rng);
            pick.sort();
            *counts.entry(pick).or_default() += 1;
        }

        // C(4, 2) = 6 subsets, ~1000 draws each
        assert_eq!(counts.len(), 6);
        for (subset, count) in counts {
            assert!((800..1200).contains(&count), "{:?} drawn {} times", subset, count);
        }
    }

    #[test]
    fn test_selector_rejects_negative_cap() {
        let err = CandidateSelector::try_from_cap(-1).unwrap_err();
        assert!(matches!(err, RecommendationError::InvalidArgument { .. }));

        assert_eq!(CandidateSelector::try_from(0).unwrap().cap(), 0);
        assert_eq!(CandidateSelector::default().cap(), DEFAULT_MAX_RESPONSES);
    }

    #[test]
    fn test_selector_applies_its_cap() {
        let selector = CandidateSelector::new(2);
        let mut rng = StdRng::seed_from_u64(5);

        let result = selector.select(&["A", "B", "C", "D"], &HashSet::<String>::new(), &mut rng);

        assert_eq!(result.len(), 2);
    }
}
