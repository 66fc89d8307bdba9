//! Scores free-text fragments against catalog entities.

use storyverse_core::catalog::{CatalogEntity, Medium};

use super::normalize::normalize;

/// Fragment equals the title.
pub const TITLE_EXACT: u32 = 100;
/// Fragment equals an alias.
pub const ALIAS_EXACT: u32 = 90;
/// Title contains the fragment or the fragment contains the title.
pub const TITLE_CONTAINS: u32 = 80;
/// An alias contains the fragment or the fragment contains an alias.
pub const ALIAS_CONTAINS: u32 = 70;

/// A catalog entity with its score for some fragment.
#[derive(Debug, Clone, Copy)]
pub struct CatalogMatch<'a> {
    pub entity: &'a CatalogEntity,
    pub score: u32,
}

/// Scores `fragment` against `entity`. Rungs are checked top-down (title
/// exact, title containment, alias exact, alias containment) and the first
/// one that qualifies decides; scores are never summed. Zero means no match.
#[must_use]
pub fn score(fragment: &str, entity: &CatalogEntity) -> u32 {
    score_normalized(&normalize(fragment), entity)
}

fn score_normalized(fragment: &str, entity: &CatalogEntity) -> u32 {
    if fragment.is_empty() {
        return 0;
    }

    let title = normalize(&entity.title);
    if !title.is_empty() {
        if title == fragment {
            return TITLE_EXACT;
        }
        if title.contains(fragment) || fragment.contains(title.as_str()) {
            return TITLE_CONTAINS;
        }
    }

    entity
        .aliases
        .iter()
        .map(|alias| normalize(alias))
        .filter(|alias| !alias.is_empty())
        .map(|alias| {
            if alias == fragment {
                ALIAS_EXACT
            } else if alias.contains(fragment) || fragment.contains(alias.as_str()) {
                ALIAS_CONTAINS
            } else {
                0
            }
        })
        .max()
        .unwrap_or(0)
}

/// Bonus for an entity whose medium appears in `order`:
/// `len(order) - index`. Media absent from the order get nothing.
#[must_use]
pub fn medium_bonus(medium: Medium, order: &[Medium]) -> u32 {
    order
        .iter()
        .position(|candidate| *candidate == medium)
        .map_or(0, |index| {
            u32::try_from(order.len() - index).unwrap_or(u32::MAX)
        })
}

/// Ranks every entity in `catalog` against `fragment`.
///
/// Non-matching entities are dropped before the medium bonus is applied, so
/// a bonus alone never makes an entity a candidate. The sort is stable: ties
/// keep catalog order.
#[must_use]
pub fn rank<'a>(
    fragment: &str,
    catalog: &'a [CatalogEntity],
    preferred_medium_order: &[Medium],
) -> Vec<CatalogMatch<'a>> {
    let fragment = normalize(fragment);
    let mut matches: Vec<CatalogMatch<'a>> = catalog
        .iter()
        .filter_map(|entity| {
            let base = score_normalized(&fragment, entity);
            (base > 0).then(|| CatalogMatch {
                entity,
                score: base + medium_bonus(entity.medium, preferred_medium_order),
            })
        })
        .collect();
    matches.sort_by(|left, right| right.score.cmp(&left.score));
    matches
}
