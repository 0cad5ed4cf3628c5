//! Responsive image source-set parsing
//!
//! A source-set is a comma-separated list of `url [descriptor]` entries.
//! Only width descriptors (`1024w`) carry a size; any other or missing
//! descriptor counts as width 0, so an unlabeled entry only wins when no
//! entry has a width.

/// One entry of a source-set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrcsetCandidate {
    pub url: String,
    pub width: u64,
}

/// Parses a source-set attribute into its candidates
///
/// Empty entries (e.g. from a trailing comma) are skipped. An entry with
/// more than one descriptor keeps its URL but gets width 0.
///
/// # Examples
///
/// ```
/// use newsprint::extract::parse_srcset;
///
/// let candidates = parse_srcset("a.jpg 320w, b.jpg 1024w, c.jpg");
/// assert_eq!(candidates.len(), 3);
/// assert_eq!(candidates[1].width, 1024);
/// assert_eq!(candidates[2].width, 0);
/// ```
pub fn parse_srcset(srcset: &str) -> Vec<SrcsetCandidate> {
    srcset
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split_whitespace();
            let url = parts.next()?;
            let descriptors: Vec<&str> = parts.collect();

            let width = match descriptors.as_slice() {
                [descriptor] => parse_width(descriptor),
                _ => 0,
            };

            Some(SrcsetCandidate {
                url: url.to_string(),
                width,
            })
        })
        .collect()
}

/// Parses a `<n>w` descriptor, treating anything else as 0
///
/// Widths too large for a u64 saturate instead of being discarded.
fn parse_width(descriptor: &str) -> u64 {
    let Some(digits) = descriptor.strip_suffix('w') else {
        return 0;
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// Picks the widest candidate of a source-set
///
/// Ties go to the earliest entry. Returns None when the source-set has no
/// usable entry.
///
/// # Examples
///
/// ```
/// use newsprint::extract::widest_candidate;
///
/// let widest = widest_candidate("a.jpg 320w, b.jpg 1024w, c.jpg").unwrap();
/// assert_eq!(widest.url, "b.jpg");
/// ```
pub fn widest_candidate(srcset: &str) -> Option<SrcsetCandidate> {
    parse_srcset(srcset)
        .into_iter()
        .fold(None, |best: Option<SrcsetCandidate>, candidate| match best {
            Some(current) if current.width >= candidate.width => Some(current),
            _ => Some(candidate),
        })
}
