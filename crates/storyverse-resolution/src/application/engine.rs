//! The resolution engine: picks exactly one strategy per query and turns it
//! into a (source, target) pair with confidence and clarification text.

use std::collections::HashSet;

use storyverse_core::catalog::{CatalogEntity, Medium};
use tracing::debug;

use super::clarification::connect_prompt;
use crate::domain::extractor::extract_pair;
use crate::domain::matcher::{CatalogMatch, rank};
use crate::domain::mentions::scan_mentions;
use crate::domain::model::{
    Confidence, Locale, RankedCandidate, ResolutionError, ResolutionMetadata, ResolutionOptions,
    ResolutionResult, ResolutionStrategy,
};

const CANDIDATE_LIMIT: usize = 3;
const PROMPT_TITLE_LIMIT: usize = 2;
/// A lone candidate below this score is too weak to trust.
const LONE_MATCH_FLOOR: u32 = 80;
/// A top candidate at or above this score is never ambiguous.
const NEAR_PERFECT: u32 = 95;
/// Both sides must reach this score for high confidence.
const HIGH_CONFIDENCE: u32 = 90;
const SINGLE_MENTION_BASE: u32 = 70;
const DEFAULT_FALLBACK_BASE: u32 = 60;
const FALLBACK_STEP: u32 = 10;

/// What the query gave us to work with, decided once up front.
enum Selection<'a> {
    ExplicitPair { source: String, target: String },
    MentionPair(&'a CatalogEntity, &'a CatalogEntity),
    SingleMention(&'a CatalogEntity),
    Default,
}

impl Selection<'_> {
    fn strategy(&self) -> ResolutionStrategy {
        match self {
            Self::ExplicitPair { .. } => ResolutionStrategy::ExplicitPair,
            Self::MentionPair(..) => ResolutionStrategy::MentionPair,
            Self::SingleMention(_) => ResolutionStrategy::SingleMentionFallback,
            Self::Default => ResolutionStrategy::DefaultFallback,
        }
    }
}

fn select<'a>(query: &str, catalog: &'a [CatalogEntity]) -> Selection<'a> {
    if let Some((source, target)) = extract_pair(query) {
        return Selection::ExplicitPair { source, target };
    }
    match scan_mentions(query, catalog).as_slice() {
        [first, second, ..] => Selection::MentionPair(*first, *second),
        [only] => Selection::SingleMention(*only),
        [] => Selection::Default,
    }
}

/// Resolves free text into a (source, target) pair.
///
/// Strategies are tried in priority order (explicit pair, mention pair,
/// single mention, default) and the first applicable one is final.
///
/// # Errors
///
/// Returns [`ResolutionError::CatalogTooSmall`] when `catalog` holds fewer
/// than two distinct ids.
pub fn resolve_query(
    query: &str,
    catalog: &[CatalogEntity],
    options: &ResolutionOptions,
) -> Result<ResolutionResult, ResolutionError> {
    let distinct = catalog
        .iter()
        .map(|entity| entity.id.as_str())
        .collect::<HashSet<_>>()
        .len();
    if distinct < 2 {
        return Err(ResolutionError::CatalogTooSmall { size: distinct });
    }

    let locale = Locale::detect(query);
    let selection = select(query, catalog);
    let strategy = selection.strategy();
    let result = match selection {
        Selection::ExplicitPair { source, target } => {
            resolve_explicit(&source, &target, catalog, options, locale)
        }
        Selection::MentionPair(first, second) => resolve_mentions(first, second, catalog, locale),
        Selection::SingleMention(source) => resolve_single(source, catalog, options, locale),
        Selection::Default => resolve_default(catalog, options, locale),
    };

    debug!(
        ?strategy,
        source = %result.source.id,
        target = %result.target.id,
        confidence = ?result.metadata.confidence,
        "query resolved"
    );
    Ok(result)
}

/// Builds the result for a pair the caller picked by id. Always high
/// confidence with nothing to clarify; `query` only decides the locale.
#[must_use]
pub fn resolve_manual(query: &str, source: &CatalogEntity, target: &CatalogEntity) -> ResolutionResult {
    ResolutionResult {
        source: source.clone(),
        target: target.clone(),
        metadata: ResolutionMetadata {
            strategy: ResolutionStrategy::ManualSelection,
            confidence: Confidence::High,
            locale: Locale::detect(query),
            needs_clarification: false,
            clarification_prompt: None,
            source_candidates: vec![RankedCandidate::of(source, 100)],
            target_candidates: vec![RankedCandidate::of(target, 100)],
        },
    }
}

fn resolve_explicit(
    source_fragment: &str,
    target_fragment: &str,
    catalog: &[CatalogEntity],
    options: &ResolutionOptions,
    locale: Locale,
) -> ResolutionResult {
    let order = &options.preferred_medium_order;
    let source_matches = rank(source_fragment, catalog, order);
    let target_matches = rank(target_fragment, catalog, order);

    let picked_source = source_matches.first().map_or(&catalog[0], |m| m.entity);
    let picked_target = target_matches.first().map_or(&catalog[1], |m| m.entity);
    let (source, target) = ensure_distinct(picked_source, picked_target, catalog);

    let source_candidates = to_ranked(&source_matches, source);
    let target_candidates = to_ranked(&target_matches, target);
    let source_ambiguous = is_ambiguous(&source_matches, options.ambiguity_margin);
    let target_ambiguous = is_ambiguous(&target_matches, options.ambiguity_margin);
    let needs_clarification = source_ambiguous || target_ambiguous;

    let confidence = if needs_clarification {
        Confidence::Low
    } else if top_score(&source_matches) >= HIGH_CONFIDENCE
        && top_score(&target_matches) >= HIGH_CONFIDENCE
    {
        Confidence::High
    } else {
        Confidence::Medium
    };

    let mut parts = Vec::new();
    if source_ambiguous {
        let options = joined_titles(&source_candidates, " / ");
        if !options.is_empty() {
            parts.push(match locale {
                Locale::En => format!("source could be {options}"),
                Locale::Ko => format!("출발 노드 후보: {options}"),
            });
        }
    }
    if target_ambiguous {
        let options = joined_titles(&target_candidates, " / ");
        if !options.is_empty() {
            parts.push(match locale {
                Locale::En => format!("target could be {options}"),
                Locale::Ko => format!("도착 노드 후보: {options}"),
            });
        }
    }
    let clarification_prompt = (!parts.is_empty()).then(|| match locale {
        Locale::En => format!("Please clarify: {}.", parts.join("; ")),
        Locale::Ko => format!("확인이 필요합니다: {}.", parts.join("; ")),
    });

    ResolutionResult {
        source: source.clone(),
        target: target.clone(),
        metadata: ResolutionMetadata {
            strategy: ResolutionStrategy::ExplicitPair,
            confidence,
            locale,
            needs_clarification,
            clarification_prompt,
            source_candidates,
            target_candidates,
        },
    }
}

fn resolve_mentions(
    first: &CatalogEntity,
    second: &CatalogEntity,
    catalog: &[CatalogEntity],
    locale: Locale,
) -> ResolutionResult {
    let (source, target) = ensure_distinct(first, second, catalog);
    ResolutionResult {
        source: source.clone(),
        target: target.clone(),
        metadata: ResolutionMetadata {
            strategy: ResolutionStrategy::MentionPair,
            confidence: Confidence::High,
            locale,
            needs_clarification: false,
            clarification_prompt: None,
            source_candidates: vec![RankedCandidate::of(source, 100)],
            target_candidates: vec![RankedCandidate::of(target, 100)],
        },
    }
}

fn resolve_single(
    mentioned: &CatalogEntity,
    catalog: &[CatalogEntity],
    options: &ResolutionOptions,
    locale: Locale,
) -> ResolutionResult {
    let others = sort_by_preference(
        catalog.iter().filter(|entity| entity.id != mentioned.id),
        &options.preferred_medium_order,
    );
    let fallback = others.first().copied().unwrap_or(mentioned);
    let (source, target) = ensure_distinct(mentioned, fallback, catalog);

    let target_candidates = descending_candidates(&others, SINGLE_MENTION_BASE);
    let separator = match locale {
        Locale::En => " or ",
        Locale::Ko => " 또는 ",
    };
    let mut hint = joined_titles(&target_candidates, separator);
    if hint.is_empty() {
        hint = match locale {
            Locale::En => "no suggestions",
            Locale::Ko => "추천 노드 없음",
        }
        .to_owned();
    }
    let prompt = match locale {
        Locale::En => format!(
            "I detected only one node. Please specify a second node (for example: {hint})."
        ),
        Locale::Ko => {
            format!("노드를 하나만 찾았습니다. 두 번째 노드를 지정해 주세요 (예: {hint}).")
        }
    };

    ResolutionResult {
        source: source.clone(),
        target: target.clone(),
        metadata: ResolutionMetadata {
            strategy: ResolutionStrategy::SingleMentionFallback,
            confidence: Confidence::Low,
            locale,
            needs_clarification: true,
            clarification_prompt: Some(prompt),
            source_candidates: vec![RankedCandidate::of(source, 100)],
            target_candidates,
        },
    }
}

fn resolve_default(
    catalog: &[CatalogEntity],
    options: &ResolutionOptions,
    locale: Locale,
) -> ResolutionResult {
    let ordered = sort_by_preference(catalog.iter(), &options.preferred_medium_order);
    let source = ordered[0];
    let remaining: Vec<&CatalogEntity> = ordered
        .iter()
        .copied()
        .filter(|entity| entity.id != source.id)
        .collect();
    let target = remaining.first().copied().unwrap_or(source);

    let example = connect_prompt(locale, &source.title, &target.title);
    let prompt = match locale {
        Locale::En => format!("I could not confidently map your query. Try: \"{example}\""),
        Locale::Ko => format!("질의를 명확히 해석하지 못했습니다. 예: \"{example}\""),
    };

    ResolutionResult {
        source: source.clone(),
        target: target.clone(),
        metadata: ResolutionMetadata {
            strategy: ResolutionStrategy::DefaultFallback,
            confidence: Confidence::Low,
            locale,
            needs_clarification: true,
            clarification_prompt: Some(prompt),
            source_candidates: descending_candidates(&ordered, DEFAULT_FALLBACK_BASE),
            target_candidates: descending_candidates(&remaining, DEFAULT_FALLBACK_BASE),
        },
    }
}

/// Replaces `second` with the first catalog entity whose id differs from
/// `first` when both share an id.
fn ensure_distinct<'a>(
    first: &'a CatalogEntity,
    second: &'a CatalogEntity,
    catalog: &'a [CatalogEntity],
) -> (&'a CatalogEntity, &'a CatalogEntity) {
    if first.id != second.id {
        return (first, second);
    }
    let replacement = catalog
        .iter()
        .find(|entity| entity.id != first.id)
        .unwrap_or(second);
    (first, replacement)
}

/// Stable sort by preferred medium. Media missing from `order` sink to the
/// end in their original relative order.
fn sort_by_preference<'a>(
    entities: impl Iterator<Item = &'a CatalogEntity>,
    order: &[Medium],
) -> Vec<&'a CatalogEntity> {
    let mut sorted: Vec<&'a CatalogEntity> = entities.collect();
    if !order.is_empty() {
        sorted.sort_by_key(|entity| {
            order
                .iter()
                .position(|medium| *medium == entity.medium)
                .unwrap_or(usize::MAX)
        });
    }
    sorted
}

/// The top candidates, with `selected` prepended at score 0 if the ranking
/// did not include it.
fn to_ranked(matches: &[CatalogMatch<'_>], selected: &CatalogEntity) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = matches
        .iter()
        .take(CANDIDATE_LIMIT)
        .map(|m| RankedCandidate::of(m.entity, m.score))
        .collect();
    if !ranked.iter().any(|candidate| candidate.id == selected.id) {
        ranked.insert(0, RankedCandidate::of(selected, 0));
        ranked.truncate(CANDIDATE_LIMIT);
    }
    ranked
}

fn is_ambiguous(matches: &[CatalogMatch<'_>], margin: u32) -> bool {
    match matches {
        [] => true,
        [only] => only.score < LONE_MATCH_FLOOR,
        [first, second, ..] => {
            first.score < NEAR_PERFECT && first.score.saturating_sub(second.score) <= margin
        }
    }
}

fn top_score(matches: &[CatalogMatch<'_>]) -> u32 {
    matches.first().map_or(0, |m| m.score)
}

fn descending_candidates(entities: &[&CatalogEntity], base: u32) -> Vec<RankedCandidate> {
    entities
        .iter()
        .take(CANDIDATE_LIMIT)
        .zip((0..).map(|step: u32| base.saturating_sub(step * FALLBACK_STEP)))
        .map(|(entity, score)| RankedCandidate::of(entity, score))
        .collect()
}

fn joined_titles(candidates: &[RankedCandidate], separator: &str) -> String {
    candidates
        .iter()
        .take(PROMPT_TITLE_LIMIT)
        .map(|candidate| candidate.title.as_str())
        .filter(|title| !title.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
