use std::collections::HashSet;

/// Maximum number of article links one discovery phase hands downstream
pub const MAX_CANDIDATES: usize = 50;

/// Outcome of offering a link to a [`LinkCandidateSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The link is new and was stored
    Added,
    /// The link was already present
    Duplicate,
    /// The set is at capacity; the link was dropped
    Full,
}

/// Deduplicated article links gathered while walking one category
///
/// Links are compared by exact string equality after resolution. The set
/// never holds more than its capacity and never shrinks. Insertion order is
/// retained so results are reproducible, but callers must not rely on it.
#[derive(Debug, Clone)]
pub struct LinkCandidateSet {
    links: Vec<String>,
    seen: HashSet<String>,
    capacity: usize,
}

impl Default for LinkCandidateSet {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkCandidateSet {
    /// Creates an empty set capped at [`MAX_CANDIDATES`]
    pub fn new() -> Self {
        Self::with_capacity(MAX_CANDIDATES)
    }

    /// Creates an empty set with a custom cap
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: Vec::new(),
            seen: HashSet::new(),
            capacity,
        }
    }

    /// Offers a link to the set
    pub fn insert(&mut self, link: String) -> InsertOutcome {
        if self.seen.contains(&link) {
            return InsertOutcome::Duplicate;
        }
        if self.is_full() {
            return InsertOutcome::Full;
        }
        self.seen.insert(link.clone());
        self.links.push(link);
        InsertOutcome::Added
    }

    /// Returns whether the set has reached its cap
    pub fn is_full(&self) -> bool {
        self.links.len() >= self.capacity
    }

    pub fn contains(&self, link: &str) -> bool {
        self.seen.contains(link)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(String::as_str)
    }

    /// Consumes the set, returning its links
    pub fn into_vec(self) -> Vec<String> {
        self.links
    }
}
