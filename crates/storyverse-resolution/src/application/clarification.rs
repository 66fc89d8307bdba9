//! Localized clarification text and actionable alternative pairs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::model::{Locale, RankedCandidate};

/// Number of alternative pairs offered when the caller does not say.
pub const DEFAULT_MAX_CHOICES: usize = 3;

/// An alternative pair the user can pick instead of the resolved one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClarificationChoice {
    pub source_id: String,
    pub target_id: String,
    /// Ready-to-send query text naming both titles.
    pub prompt: String,
}

/// Renders the canonical "connect A to B" command in `locale`.
#[must_use]
pub fn connect_prompt(locale: Locale, source_title: &str, target_title: &str) -> String {
    match locale {
        Locale::En => format!("Connect {source_title} to {target_title}."),
        Locale::Ko => format!("{source_title}를 {target_title}와 연결해줘."),
    }
}

/// Builds up to `max_choices` alternative pairs from the candidate lists.
///
/// Pairs come from the Cartesian product with sources in the outer loop.
/// The currently `selected` (source, target) pair and repeated id pairs are
/// skipped, so the ordering is deterministic for a given input.
#[must_use]
pub fn build_choices(
    locale: Locale,
    source_candidates: &[RankedCandidate],
    target_candidates: &[RankedCandidate],
    selected: (&str, &str),
    max_choices: usize,
) -> Vec<ClarificationChoice> {
    let mut choices = Vec::new();
    if max_choices == 0 {
        return choices;
    }

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    for source in source_candidates {
        for target in target_candidates {
            let pair = (source.id.as_str(), target.id.as_str());
            if pair == selected || !seen.insert(pair) {
                continue;
            }
            choices.push(ClarificationChoice {
                source_id: source.id.clone(),
                target_id: target.id.clone(),
                prompt: connect_prompt(locale, &source.title, &target.title),
            });
            if choices.len() >= max_choices {
                return choices;
            }
        }
    }
    choices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, title: &str, score: u32) -> RankedCandidate {
        RankedCandidate {
            id: id.to_owned(),
            title: title.to_owned(),
            score,
        }
    }

    fn english_candidates() -> (Vec<RankedCandidate>, Vec<RankedCandidate>) {
        (
            vec![
                candidate("sherlock-holmes", "Sherlock Holmes", 97),
                candidate("cleopatra", "Cleopatra", 60),
            ],
            vec![
                candidate("star-wars", "Star Wars", 95),
                candidate("blade-runner", "Blade Runner", 61),
            ],
        )
    }

    #[test]
    fn test_english_choices_exclude_selected_pair() {
        // Arrange
        let (sources, targets) = english_candidates();

        // Act
        let choices = build_choices(
            Locale::En,
            &sources,
            &targets,
            ("sherlock-holmes", "star-wars"),
            DEFAULT_MAX_CHOICES,
        );

        // Assert
        assert_eq!(
            choices,
            vec![
                ClarificationChoice {
                    source_id: "sherlock-holmes".to_owned(),
                    target_id: "blade-runner".to_owned(),
                    prompt: "Connect Sherlock Holmes to Blade Runner.".to_owned(),
                },
                ClarificationChoice {
                    source_id: "cleopatra".to_owned(),
                    target_id: "star-wars".to_owned(),
                    prompt: "Connect Cleopatra to Star Wars.".to_owned(),
                },
                ClarificationChoice {
                    source_id: "cleopatra".to_owned(),
                    target_id: "blade-runner".to_owned(),
                    prompt: "Connect Cleopatra to Blade Runner.".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_korean_choices_use_korean_template() {
        let choices = build_choices(
            Locale::Ko,
            &[candidate("dune", "듄", 91)],
            &[candidate("roman-empire", "로마 제국", 90)],
            ("none", "none"),
            1,
        );

        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].source_id, "dune");
        assert_eq!(choices[0].target_id, "roman-empire");
        assert_eq!(choices[0].prompt, "듄를 로마 제국와 연결해줘.");
    }

    #[test]
    fn test_zero_max_choices_yields_nothing() {
        let (sources, targets) = english_candidates();

        let choices = build_choices(Locale::En, &sources, &targets, ("x", "y"), 0);

        assert!(choices.is_empty());
    }

    #[test]
    fn test_duplicate_candidates_are_offered_once() {
        let sources = vec![candidate("dune", "Dune", 90), candidate("dune", "Dune", 80)];
        let targets = vec![candidate("cleopatra", "Cleopatra", 90)];

        let choices = build_choices(Locale::En, &sources, &targets, ("x", "y"), 5);

        assert_eq!(choices.len(), 1);
    }

    #[test]
    fn test_choices_never_exceed_the_cap() {
        let (sources, targets) = english_candidates();

        let choices = build_choices(Locale::En, &sources, &targets, ("x", "y"), 2);

        assert_eq!(choices.len(), 2);
        assert_eq!(choices[1].target_id, "blade-runner");
    }
}
