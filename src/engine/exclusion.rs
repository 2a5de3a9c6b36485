use std::collections::{BTreeMap, BTreeSet, HashMap};
use crate::errors::VultesterError;
use crate::models::Fact;

/// Declared mutual exclusions between facts.
///
/// Entries are directional as authored; a pair conflicts when either side
/// lists the other. A reverse index keeps both directions one lookup away.
#[derive(Debug, Clone, Default)]
pub struct ExclusionTable {
    excludes: BTreeMap<Fact, BTreeSet<Fact>>,
    excluded_from: BTreeMap<Fact, BTreeSet<Fact>>,
}

impl ExclusionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: BTreeMap<Fact, Vec<Fact>>) -> Self {
        let mut table = Self::new();
        for (fact, excluded) in map {
            table.insert(fact, excluded);
        }
        table
    }

    pub fn insert<I>(&mut self, fact: Fact, excluded: I)
    where
        I: IntoIterator<Item = Fact>,
    {
        let entry = self.excludes.entry(fact.clone()).or_default();
        for other in excluded {
            self.excluded_from.entry(other.clone()).or_default().insert(fact.clone());
            entry.insert(other);
        }
    }

    pub fn conflicts(&self, a: &str, b: &str) -> bool {
        self.partners(a).any(|other| other == b)
    }

    /// Every fact that conflicts with `fact`, in either authored direction.
    pub fn partners<'a>(&'a self, fact: &str) -> impl Iterator<Item = &'a Fact> + 'a {
        self.excludes
            .get(fact)
            .into_iter()
            .chain(self.excluded_from.get(fact))
            .flatten()
    }

    /// Facts that can no longer be selected alongside `selected`.
    pub fn excluded_by(&self, selected: &[Fact]) -> BTreeSet<Fact> {
        selected
            .iter()
            .flat_map(|fact| self.partners(fact.as_str()))
            .cloned()
            .collect()
    }

    pub fn entries(&self) -> &BTreeMap<Fact, BTreeSet<Fact>> {
        &self.excludes
    }

    pub fn len(&self) -> usize {
        self.excludes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.excludes.is_empty()
    }
}

/// Rejects submissions that contain a mutually exclusive pair.
pub struct ExclusionValidator<'a> {
    table: &'a ExclusionTable,
}

impl<'a> ExclusionValidator<'a> {
    pub fn new(table: &'a ExclusionTable) -> Self {
        Self { table }
    }

    /// Reports the first conflicting pair in submission order: the earliest
    /// fact that has a conflict, paired with its earliest later partner.
    ///
    /// Runs in one pass over the input plus one partner lookup per distinct
    /// fact.
    pub fn validate(&self, facts: &[Fact]) -> Result<(), VultesterError> {
        let mut first_seen: HashMap<&str, usize> = HashMap::with_capacity(facts.len());
        for (idx, fact) in facts.iter().enumerate() {
            first_seen.entry(fact.as_str()).or_insert(idx);
        }

        for (idx, first) in facts.iter().enumerate() {
            if first_seen.get(first.as_str()) != Some(&idx) {
                continue;
            }
            // A partner submitted before `first` would already have been
            // reported from its own position, so any match lies after `idx`.
            let second = self
                .table
                .partners(first.as_str())
                .filter(|other| *other != first)
                .filter_map(|other| first_seen.get(other.as_str()).copied())
                .min();

            if let Some(pos) = second {
                return Err(VultesterError::ContradictoryFacts {
                    first: first.to_string(),
                    second: facts[pos].to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn table() -> ExclusionTable {
        let mut t = ExclusionTable::new();
        t.insert(
            Fact::from("no_ssl_enabled"),
            [Fact::from("ssl_enabled"), Fact::from("ssl_weak_cipher")],
        );
        t.insert(Fact::from("redis_no_auth"), [Fact::from("redis_auth_enabled")]);
        t
    }

    fn facts(names: &[&str]) -> Vec<Fact> {
        names.iter().map(|n| Fact::from(*n)).collect()
    }

    #[test]
    fn test_conflicts_is_symmetric() {
        let t = table();
        assert!(t.conflicts("no_ssl_enabled", "ssl_enabled"));
        assert!(t.conflicts("ssl_enabled", "no_ssl_enabled"));
        assert!(!t.conflicts("ssl_enabled", "redis_no_auth"));
    }

    #[test]
    fn test_validate_accepts_compatible_facts() {
        let t = table();
        let v = ExclusionValidator::new(&t);
        assert!(v.validate(&facts(&["ssl_enabled", "redis_no_auth", "port_22_open"])).is_ok());
        assert!(v.validate(&[]).is_ok());
    }

    #[test]
    fn test_validate_reports_pair_in_submission_order() {
        let t = table();
        let v = ExclusionValidator::new(&t);
        let err = v
            .validate(&facts(&["redis_auth_enabled", "port_80_open", "redis_no_auth"]))
            .unwrap_err();
        match err {
            VultesterError::ContradictoryFacts { first, second } => {
                assert_eq!(first, "redis_auth_enabled");
                assert_eq!(second, "redis_no_auth");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_repeated_fact_is_not_a_contradiction() {
        let t = table();
        let v = ExclusionValidator::new(&t);
        assert!(v.validate(&facts(&["ssl_enabled", "ssl_enabled"])).is_ok());
    }

    #[test]
    fn test_excluded_by_covers_both_directions() {
        let t = table();
        let disabled = t.excluded_by(&facts(&["ssl_weak_cipher"]));
        assert!(disabled.contains("no_ssl_enabled"));
        let disabled = t.excluded_by(&facts(&["no_ssl_enabled"]));
        assert!(disabled.contains("ssl_enabled"));
        assert!(disabled.contains("ssl_weak_cipher"));
    }

    #[test]
    fn test_earliest_conflicting_fact_is_reported_first() {
        // ssl_enabled/no_ssl_enabled is the tighter pair, but redis_auth_enabled
        // was submitted first.
        let t = table();
        let v = ExclusionValidator::new(&t);
        let err = v
            .validate(&facts(&[
                "redis_auth_enabled",
                "ssl_enabled",
                "no_ssl_enabled",
                "redis_no_auth",
            ]))
            .unwrap_err();
        match err {
            VultesterError::ContradictoryFacts { first, second } => {
                assert_eq!(first, "redis_auth_enabled");
                assert_eq!(second, "redis_no_auth");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_partner_repeated_later_reports_first_occurrence() {
        let t = table();
        let v = ExclusionValidator::new(&t);
        let err = v
            .validate(&facts(&["ssl_enabled", "ssl_enabled", "no_ssl_enabled"]))
            .unwrap_err();
        assert!(matches!(
            err,
            VultesterError::ContradictoryFacts { ref first, ref second }
                if first == "ssl_enabled" && second == "no_ssl_enabled"
        ));
    }

    #[test]
    fn test_large_submission_validates_in_linear_time() {
        let t = table();
        let v = ExclusionValidator::new(&t);
        let mut submitted: Vec<Fact> = (0..100_000).map(|i| Fact::from(format!("f{i}"))).collect();
        submitted.push(Fact::from("ssl_enabled"));
        submitted.push(Fact::from("no_ssl_enabled"));

        let started = Instant::now();
        let err = v.validate(&submitted).unwrap_err();
        assert!(matches!(err, VultesterError::ContradictoryFacts { .. }));
        // A pairwise scan of this input is billions of comparisons.
        assert!(started.elapsed() < Duration::from_secs(5), "took {:?}", started.elapsed());
    }
}
