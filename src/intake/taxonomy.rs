//! Resolution of free-text category names against the interest → area
//! taxonomy.
//!
//! Matching is tiered (exact, then prefix, then substring) over names
//! normalized by [`normalize_name`]. Among several substring hits the shortest
//! name wins; remaining ties keep input order, so identical inputs always
//! resolve identically.

use super::replies::{CATEGORY_LIST_EMPTY, CATEGORY_LIST_HEADER, NO_AREAS};
use crate::backend::{Area, Interest, TaxonomySource};
use std::collections::{BTreeSet, HashMap};

/// Lowercase, trim and collapse internal whitespace runs.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Anything with a display name that can be matched.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Interest {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Area {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Which tier produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome<'a, T> {
    Exact(&'a T),
    Prefix(&'a T),
    Substring(&'a T),
    NoMatch,
}

impl<'a, T> MatchOutcome<'a, T> {
    pub fn found(self) -> Option<&'a T> {
        match self {
            Self::Exact(item) | Self::Prefix(item) | Self::Substring(item) => Some(item),
            Self::NoMatch => None,
        }
    }
}

/// Tiered match of `query` against `candidates`.
pub fn match_name<'a, T: Named>(query: &str, candidates: &'a [T]) -> MatchOutcome<'a, T> {
    let key = normalize_name(query);
    if key.is_empty() || candidates.is_empty() {
        return MatchOutcome::NoMatch;
    }

    let normalized: Vec<(String, &T)> = candidates
        .iter()
        .map(|c| (normalize_name(c.name()), c))
        .collect();

    if let Some(&(_, item)) = normalized.iter().find(|(name, _)| *name == key) {
        return MatchOutcome::Exact(item);
    }
    if let Some(&(_, item)) = normalized.iter().find(|(name, _)| name.starts_with(&key)) {
        return MatchOutcome::Prefix(item);
    }
    normalized
        .iter()
        .filter(|(name, _)| name.contains(&key))
        .min_by_key(|(_, item)| item.name().chars().count())
        .map_or(MatchOutcome::NoMatch, |&(_, item)| MatchOutcome::Substring(item))
}

pub fn match_interest<'a>(query: &str, interests: &'a [Interest]) -> Option<&'a Interest> {
    match_name(query, interests).found()
}

pub fn match_area<'a>(query: &str, areas: &'a [Area]) -> Option<&'a Area> {
    match_name(query, areas).found()
}

/// Canonical interest/area names, both present in the snapshot that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCategory {
    pub interest: String,
    pub area: String,
}

/// Match the interest first, then the area among that interest's children.
/// Order is strict; see [`resolve_category`] for the swapped fallback.
pub fn resolve_pair(
    interest_query: &str,
    area_query: &str,
    interests: &[Interest],
    areas: &[Area],
) -> Option<ResolvedCategory> {
    let interest = match_interest(interest_query, interests)?;
    let children: Vec<Area> = areas
        .iter()
        .filter(|a| a.interest_id == interest.id)
        .cloned()
        .collect();
    let area = match_area(area_query, &children)?;
    Some(ResolvedCategory {
        interest: interest.name.clone(),
        area: area.name.clone(),
    })
}

/// [`resolve_pair`] with the "child > parent" fallback: when the stated
/// order fails and the area query names a real interest, retry swapped.
pub fn resolve_category(
    interest_query: &str,
    area_query: &str,
    interests: &[Interest],
    areas: &[Area],
) -> Option<ResolvedCategory> {
    let interest_query = interest_query.trim();
    let area_query = area_query.trim();
    if interest_query.is_empty() || area_query.is_empty() {
        return None;
    }

    if let Some(resolved) = resolve_pair(interest_query, area_query, interests, areas) {
        return Some(resolved);
    }
    if match_interest(area_query, interests).is_none() {
        return None;
    }
    let swapped = resolve_pair(area_query, interest_query, interests, areas);
    if swapped.is_some() {
        tracing::debug!(interest_query, area_query, "category resolved in swapped order");
    }
    swapped
}

/// One fetch of the full taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomySnapshot {
    pub interests: Vec<Interest>,
    pub areas: Vec<Area>,
}

impl TaxonomySnapshot {
    pub async fn fetch(source: &dyn TaxonomySource) -> anyhow::Result<Self> {
        let interests = source.list_interests().await?;
        let areas = source.list_areas().await?;
        tracing::debug!(
            interests = interests.len(),
            areas = areas.len(),
            "taxonomy fetched"
        );
        Ok(Self { interests, areas })
    }

    pub fn resolve(&self, interest_query: &str, area_query: &str) -> Option<ResolvedCategory> {
        resolve_category(interest_query, area_query, &self.interests, &self.areas)
    }

    pub fn is_empty(&self) -> bool {
        self.interests.is_empty() && self.areas.is_empty()
    }

    /// Area names per interest id, in input order.
    fn area_names_by_interest(&self) -> HashMap<&str, Vec<&str>> {
        let mut grouped: HashMap<&str, Vec<&str>> = HashMap::new();
        for area in &self.areas {
            grouped
                .entry(area.interest_id.as_str())
                .or_default()
                .push(area.name.as_str());
        }
        grouped
    }

    /// Hierarchy block for the main system prompt.
    pub fn format_for_prompt(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let grouped = self.area_names_by_interest();
        let lines: Vec<String> = self
            .interests
            .iter()
            .map(|interest| {
                let areas = grouped
                    .get(interest.id.as_str())
                    .filter(|names| !names.is_empty())
                    .map_or_else(|| "(nenhuma)".to_string(), |names| names.join(", "));
                format!("- INTERESSE «{}» → ÁREAS: {areas}", interest.name)
            })
            .collect();

        format!(
            "INTERESSES (categoria pai) e ÁREAS (subcategoria, cada uma pertence a um interesse):\n{}\n\
             Ao responder sobre categorias existentes, liste sempre primeiro os INTERESSES, depois as ÁREAS agrupadas por interesse.",
            lines.join("\n")
        )
    }

    /// User-facing listing: one line per interest, `Interest - AreaA - AreaB`.
    pub fn format_category_list(&self) -> String {
        let mut areas_by_interest: HashMap<&str, BTreeSet<(String, &str)>> = HashMap::new();
        for area in &self.areas {
            let name = area.name.trim();
            if area.interest_id.is_empty() || name.is_empty() {
                continue;
            }
            areas_by_interest
                .entry(area.interest_id.as_str())
                .or_default()
                .insert((name.to_lowercase(), name));
        }

        let mut interests: Vec<&Interest> = self
            .interests
            .iter()
            .filter(|i| !i.name.trim().is_empty())
            .collect();
        interests.sort_by_cached_key(|i| i.name.trim().to_lowercase());

        let lines: Vec<String> = interests
            .into_iter()
            .map(|interest| {
                let name = interest.name.trim();
                match areas_by_interest.get(interest.id.as_str()) {
                    Some(areas) if !areas.is_empty() => {
                        let mut parts = vec![name];
                        parts.extend(areas.iter().map(|(_, area)| *area));
                        parts.join(" - ")
                    }
                    _ => format!("{name} - {NO_AREAS}"),
                }
            })
            .collect();

        if lines.is_empty() {
            format!("{CATEGORY_LIST_HEADER}\n{CATEGORY_LIST_EMPTY}")
        } else {
            format!("{CATEGORY_LIST_HEADER}\n{}", lines.join("\n"))
        }
    }
}
