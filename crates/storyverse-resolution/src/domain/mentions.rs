//! Finds catalog entities mentioned anywhere in a query, in reading order.

use std::cmp::Reverse;

use storyverse_core::catalog::CatalogEntity;

use super::normalize::{contains_hangul, normalize};

const TITLE_MENTION: usize = 120;
const ALIAS_MENTION: usize = 95;
const MAX_LENGTH_BONUS: usize = 30;

#[derive(Debug)]
struct Mention<'a> {
    entity: &'a CatalogEntity,
    position: usize,
    strength: usize,
}

/// Position of `token` in `query` (both normalized).
///
/// Latin tokens must sit on word boundaries. Korean particles attach
/// directly to nouns, so a Hangul token may also match as a bare substring.
fn token_position(query: &str, token: &str) -> Option<usize> {
    if token.is_empty() {
        return None;
    }
    let padded_query = format!(" {query} ");
    let padded_token = format!(" {token} ");
    padded_query
        .find(&padded_token)
        .or_else(|| contains_hangul(token).then(|| query.find(token)).flatten())
}

fn mention_of<'a>(query: &str, entity: &'a CatalogEntity) -> Option<Mention<'a>> {
    let title = normalize(&entity.title);
    let aliases = entity
        .aliases
        .iter()
        .map(|alias| normalize(alias))
        .filter(|alias| !alias.is_empty());

    let mut best: Option<(usize, usize)> = None;
    for token in std::iter::once(title.clone()).chain(aliases) {
        let Some(position) = token_position(query, &token) else {
            continue;
        };
        let base = if token == title {
            TITLE_MENTION
        } else {
            ALIAS_MENTION
        };
        let strength = base + token.chars().count().min(MAX_LENGTH_BONUS);
        best = Some(match best {
            Some((best_position, best_strength)) => {
                (best_position.min(position), best_strength.max(strength))
            }
            None => (position, strength),
        });
    }

    best.map(|(position, strength)| Mention {
        entity,
        position,
        strength,
    })
}

/// Returns every entity whose title or alias occurs in `raw_query`, ordered
/// by earliest occurrence and then by mention strength.
#[must_use]
pub fn scan_mentions<'a>(raw_query: &str, catalog: &'a [CatalogEntity]) -> Vec<&'a CatalogEntity> {
    let query = normalize(raw_query);
    if query.is_empty() {
        return Vec::new();
    }

    let mut mentions: Vec<Mention<'a>> = catalog
        .iter()
        .filter_map(|entity| mention_of(&query, entity))
        .collect();
    mentions.sort_by_key(|mention| (mention.position, Reverse(mention.strength)));
    mentions.into_iter().map(|mention| mention.entity).collect()
}
