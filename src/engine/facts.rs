use std::collections::HashSet;
use crate::models::Fact;

/// Working memory of one analysis run.
///
/// Membership is answered by a hash set; iteration always follows insertion
/// order so traces and `final_facts` never depend on hashing.
#[derive(Debug, Clone, Default)]
pub struct FactSet {
    ordered: Vec<Fact>,
    members: HashSet<Fact>,
}

impl FactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from submitted facts, dropping repeats.
    pub fn from_facts<I>(facts: I) -> Self
    where
        I: IntoIterator<Item = Fact>,
    {
        let mut set = Self::new();
        for fact in facts {
            set.insert(fact);
        }
        set
    }

    /// Returns `true` if the fact was not already present.
    pub fn insert(&mut self, fact: Fact) -> bool {
        if self.members.contains(&fact) {
            return false;
        }
        self.members.insert(fact.clone());
        self.ordered.push(fact);
        true
    }

    pub fn contains(&self, fact: &str) -> bool {
        self.members.contains(fact)
    }

    pub fn contains_all(&self, facts: &[Fact]) -> bool {
        facts.iter().all(|f| self.contains(f.as_str()))
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fact> {
        self.ordered.iter()
    }

    pub fn into_vec(self) -> Vec<Fact> {
        self.ordered
    }
}
