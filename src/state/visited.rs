use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// URLs already processed by one crawler instance
///
/// The set only grows. Membership is tested and recorded under one lock so
/// concurrent pipelines racing on the same URL see exactly one winner.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a URL as visited
    ///
    /// Returns `true` if the URL was not visited before, `false` if it was.
    pub fn mark(&self, url: &str) -> bool {
        let mut urls = self.lock();
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_string())
    }

    /// Checks whether a URL has been visited
    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Returns the number of visited URLs
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns whether nothing has been visited yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // A panic while holding the lock cannot leave the set half-updated
        self.urls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_set_is_empty() {
        let visited = VisitedSet::new();
        assert!(visited.is_empty());
        assert_eq!(visited.len(), 0);
    }

    #[test]
    fn test_mark_is_first_wins() {
        let visited = VisitedSet::new();
        assert!(visited.mark("https://www.bbc.com/news/articles/a1"));
        assert!(!visited.mark("https://www.bbc.com/news/articles/a1"));
        assert!(visited.contains("https://www.bbc.com/news/articles/a1"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_exact_string_identity() {
        let visited = VisitedSet::new();
        assert!(visited.mark("https://www.bbc.com/news/articles/a1"));
        assert!(visited.mark("https://www.bbc.com/news/articles/a1/"));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_concurrent_marks_have_single_winner() {
        let visited = Arc::new(VisitedSet::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let visited = Arc::clone(&visited);
                std::thread::spawn(move || visited.mark("https://www.bbc.com/news/articles/a1"))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(visited.len(), 1);
    }
}
