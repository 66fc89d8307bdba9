//! Extracts two raw entity fragments from command-like phrasing.
//!
//! Extractors run in a fixed priority order. Unambiguous command verbs come
//! before loose separators, and the first extractor that matches wins.

use std::sync::LazyLock;

use regex::Regex;

/// Two raw fragments, each probably naming one entity. Not yet scored.
pub type FragmentPair = (String, String);

/// One rule of the extraction cascade.
pub trait PairExtractor: Send + Sync {
    /// Short rule name, used in debug logs.
    fn name(&self) -> &'static str;

    /// Returns the two fragments if this rule matches `text`.
    fn try_extract(&self, text: &str) -> Option<FragmentPair>;
}

/// An extractor backed by a regular expression whose first two capture
/// groups are the fragments.
#[derive(Debug)]
pub struct PatternExtractor {
    name: &'static str,
    pattern: Regex,
}

impl PatternExtractor {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("extraction patterns are valid"),
        }
    }
}

impl PairExtractor for PatternExtractor {
    fn name(&self) -> &'static str {
        self.name
    }

    fn try_extract(&self, text: &str) -> Option<FragmentPair> {
        let captures = self.pattern.captures(text)?;
        let first = captures.get(1)?.as_str();
        let second = captures.get(2)?.as_str();
        if first.is_empty() || second.is_empty() {
            return None;
        }
        Some((first.to_owned(), second.to_owned()))
    }
}

const KO_REQUEST_SUFFIX: &str = r"(?:해\s*줘|해\s*주세요|줘|주세요)?";

static EXTRACTORS: LazyLock<Vec<PatternExtractor>> = LazyLock::new(|| {
    vec![
        PatternExtractor::new(
            "connect_to",
            r"(?i)(?:connect|bridge|link)\s+(.+?)\s+to\s+(.+?)[.?!]*$",
        ),
        PatternExtractor::new(
            "connect_with",
            r"(?i)(?:connect|bridge|link)\s+(.+?)\s+(?:and|with)\s+(.+?)[.?!]*$",
        ),
        PatternExtractor::new(
            "path_from_to",
            r"(?i)(?:show|find)\s+(?:a\s+)?path\s+from\s+(.+?)\s+to\s+(.+?)[.?!]*$",
        ),
        PatternExtractor::new(
            "path_between",
            r"(?i)(?:show|find)\s+(?:a\s+)?path\s+between\s+(.+?)\s+and\s+(.+?)[.?!]*$",
        ),
        PatternExtractor::new(
            "versus",
            r"(?i)(?:what\s+if\s+)?(.+?)\s+(?:meets|versus|vs)\s+(.+?)[.?!]*$",
        ),
        PatternExtractor::new(
            "crossover",
            r"(?i)(?:what\s+if\s+)?(.+?)\s+x\s+(.+?)[.?!]*$",
        ),
        PatternExtractor::new(
            "ampersand",
            r"(?i)(?:what\s+if\s+)?(.+?)\s*&\s*(.+?)[.?!]*$",
        ),
        PatternExtractor::new(
            "ko_object_connect",
            &format!(
                r"(.+?)\s*(?:를|을)\s+(.+?)\s*(?:와|과|랑|이랑)\s*(?:연결|브리지|링크|이어){KO_REQUEST_SUFFIX}[.?!]*$"
            ),
        ),
        PatternExtractor::new(
            "ko_companion_connect",
            &format!(
                r"(.+?)\s*(?:와|과|랑|이랑)\s+(.+?)\s*(?:를|을)?\s*(?:연결|브리지|링크|이어){KO_REQUEST_SUFFIX}[.?!]*$"
            ),
        ),
        PatternExtractor::new(
            "ko_path",
            r"(.+?)\s*(?:에서|부터)\s+(.+?)\s*까지\s*(?:경로|길)(?:를)?\s*(?:보여\s*줘|찾아\s*줘|보여\s*주세요|찾아\s*주세요)?[.?!]*$",
        ),
        PatternExtractor::new(
            "separator",
            r"(?i)^(.+?)\s*(?:->|vs\.?|/)\s*(.+?)[.?!]*$",
        ),
    ]
});

/// The built-in extractors, in priority order.
#[must_use]
pub fn default_extractors() -> &'static [PatternExtractor] {
    &EXTRACTORS
}

/// Runs the built-in cascade over the trimmed query.
#[must_use]
pub fn extract_pair(raw_query: &str) -> Option<FragmentPair> {
    extract_pair_with(raw_query, default_extractors())
}

/// Runs `extractors` in order over the trimmed query and returns the first
/// match.
pub fn extract_pair_with<E: PairExtractor>(
    raw_query: &str,
    extractors: &[E],
) -> Option<FragmentPair> {
    let text = raw_query.trim();
    extractors.iter().find_map(|extractor| {
        let pair = extractor.try_extract(text)?;
        tracing::debug!(rule = extractor.name(), "pair extracted");
        Some(pair)
    })
}
