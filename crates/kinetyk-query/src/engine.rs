//! Query operations.
//!
//! All operations run against an immutable [`Snapshot`] and are stateless
//! per request. Filters are conjunctive; projection applies only to the
//! returned page and silently omits fields absent on a record.

use crate::snapshot::Snapshot;
use kinetyk_core::model::{Difficulty, Exercise, category_display_name};
use kinetyk_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Default page number.
pub const DEFAULT_PAGE: usize = 1;

/// Default page size.
pub const DEFAULT_LIMIT: usize = 20;

// ============================================================================
// Filters and pagination
// ============================================================================

/// Conjunctive record filters; every supplied predicate must hold.
#[derive(Debug, Clone, Default)]
pub struct ExerciseFilter {
    /// Category equality.
    pub category: Option<String>,
    /// Difficulty equality.
    pub difficulty: Option<Difficulty>,
    /// Equipment membership.
    pub equipment: Option<String>,
    /// Muscle membership over primary ∪ secondary.
    pub muscle: Option<String>,
    /// Tag intersection (any of).
    pub tags: Vec<String>,
}

impl ExerciseFilter {
    /// Whether no predicate is supplied.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.difficulty.is_none()
            && self.equipment.is_none()
            && self.muscle.is_none()
            && self.tags.is_empty()
    }

    /// Whether a record satisfies every supplied predicate.
    pub fn matches(&self, exercise: &Exercise) -> bool {
        if let Some(category) = &self.category {
            if &exercise.category != category {
                return false;
            }
        }
        if let Some(difficulty) = self.difficulty {
            if exercise.difficulty != difficulty {
                return false;
            }
        }
        if let Some(equipment) = &self.equipment {
            if !exercise.equipment.iter().any(|e| e == equipment) {
                return false;
            }
        }
        if let Some(muscle) = &self.muscle {
            if !exercise.all_muscles().any(|m| m == muscle) {
                return false;
            }
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|t| exercise.tags.contains(t)) {
            return false;
        }
        true
    }
}

/// Requested page, 1-indexed.
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    /// Page number; values below 1 are treated as 1.
    pub page: usize,
    /// Page size; values below 1 are treated as 1.
    pub limit: usize,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Pagination metadata returned with every list/search response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Full filtered count, independent of the requested page.
    pub total: usize,
    /// Page number served.
    pub page: usize,
    /// Page size used.
    pub limit: usize,
    /// Total page count: ceil(total / limit).
    pub pages: usize,
}

/// One page of (possibly projected) records.
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    /// Pagination metadata.
    pub metadata: PageMeta,
    /// Records on the requested page.
    pub exercises: Vec<Value>,
}

/// Project a record onto the requested fields.
///
/// Fields absent on the record are silently omitted.
fn project(value: Value, fields: &[String]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            fields
                .iter()
                .filter_map(|field| map.get(field).map(|v| (field.clone(), v.clone())))
                .collect(),
        ),
        other => other,
    }
}

// ============================================================================
// Facets
// ============================================================================

/// One category facet, carrying its fixed display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFacet {
    /// Category key.
    pub key: String,
    /// Display name from the fixed lookup.
    pub display_name: String,
    /// Number of records in the category.
    pub count: usize,
}

/// One muscle or equipment facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetEntry {
    /// Distinct value.
    pub name: String,
    /// Number of records using it.
    pub count: usize,
}

// ============================================================================
// Engine
// ============================================================================

/// Read-only query operations over one snapshot.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    snapshot: Arc<Snapshot>,
}

impl QueryEngine {
    /// Create an engine over a shared snapshot.
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        Self { snapshot }
    }

    /// Version of the dataset being served.
    pub fn data_version(&self) -> &str {
        self.snapshot.version()
    }

    /// List records matching the filter, paginated and optionally projected.
    ///
    /// A page beyond the filtered range yields an empty list with `total`
    /// still the full filtered count.
    pub fn list(
        &self,
        filter: &ExerciseFilter,
        page: PageParams,
        fields: Option<&[String]>,
    ) -> Result<PageResult> {
        let matched: Vec<&Exercise> = self
            .snapshot
            .exercises()
            .iter()
            .filter(|ex| filter.matches(ex))
            .collect();
        paginate(matched, page, fields)
    }

    /// Fetch one record by id, optionally projected.
    pub fn get_by_id(&self, id: &str, fields: Option<&[String]>) -> Result<Value> {
        let exercise = self
            .snapshot
            .get(id)
            .ok_or_else(|| Error::not_found(format!("exercise '{id}'")))?;
        render(exercise, fields)
    }

    /// Fetch records for an ordered id list.
    ///
    /// Returns the subset found, preserving input order; unknown ids are
    /// silently dropped. An empty id list is a bad request.
    pub fn batch(&self, ids: &[String]) -> Result<Vec<Value>> {
        if ids.is_empty() {
            return Err(Error::bad_request("batch requires at least one id"));
        }
        ids.iter()
            .filter_map(|id| self.snapshot.get(id))
            .map(|ex| render(ex, None))
            .collect()
    }

    /// Case-insensitive substring search over name, description, and tags,
    /// combinable with the same filters as [`list`](Self::list).
    ///
    /// With no query text the search behaves as a filtered list; with no
    /// criteria at all it is a bad request.
    pub fn search(
        &self,
        query: Option<&str>,
        filter: &ExerciseFilter,
        page: PageParams,
        fields: Option<&[String]>,
    ) -> Result<PageResult> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        if query.is_none() && filter.is_empty() {
            return Err(Error::bad_request(
                "search requires query text or at least one filter",
            ));
        }

        let needle = query.map(str::to_lowercase);
        let matched: Vec<&Exercise> = self
            .snapshot
            .exercises()
            .iter()
            .filter(|ex| filter.matches(ex))
            .filter(|ex| match &needle {
                Some(needle) => matches_query(ex, needle),
                None => true,
            })
            .collect();
        paginate(matched, page, fields)
    }

    /// Category facets over the full dataset, with fixed display names.
    pub fn category_facets(&self) -> Vec<CategoryFacet> {
        let counts = count_values(self.snapshot.exercises(), |ex| vec![ex.category.clone()]);
        let mut facets: Vec<CategoryFacet> = counts
            .into_iter()
            .map(|(key, count)| CategoryFacet {
                display_name: category_display_name(&key),
                key,
                count,
            })
            .collect();
        facets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
        facets
    }

    /// Muscle facets over primary ∪ secondary muscles.
    pub fn muscle_facets(&self) -> Vec<FacetEntry> {
        sorted_entries(count_values(self.snapshot.exercises(), |ex| {
            let mut muscles: Vec<String> = ex.all_muscles().map(str::to_string).collect();
            muscles.sort();
            muscles.dedup();
            muscles
        }))
    }

    /// Equipment facets.
    pub fn equipment_facets(&self) -> Vec<FacetEntry> {
        sorted_entries(count_values(self.snapshot.exercises(), |ex| {
            ex.equipment.clone()
        }))
    }
}

fn matches_query(exercise: &Exercise, needle: &str) -> bool {
    exercise.name.to_lowercase().contains(needle)
        || exercise.description.to_lowercase().contains(needle)
        || exercise.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

fn render(exercise: &Exercise, fields: Option<&[String]>) -> Result<Value> {
    let value = serde_json::to_value(exercise)
        .map_err(|e| Error::operation(format!("failed to serialize '{}': {e}", exercise.id)))?;
    Ok(match fields {
        Some(fields) => project(value, fields),
        None => value,
    })
}

fn paginate(
    matched: Vec<&Exercise>,
    page: PageParams,
    fields: Option<&[String]>,
) -> Result<PageResult> {
    let limit = page.limit.max(1);
    let page_no = page.page.max(1);
    let total = matched.len();
    let pages = total.div_ceil(limit);
    let offset = (page_no - 1).saturating_mul(limit);

    let exercises = matched
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(|ex| render(ex, fields))
        .collect::<Result<Vec<Value>>>()?;

    Ok(PageResult {
        metadata: PageMeta {
            total,
            page: page_no,
            limit,
            pages,
        },
        exercises,
    })
}

fn count_values<F>(exercises: &[Exercise], values_of: F) -> BTreeMap<String, usize>
where
    F: Fn(&Exercise) -> Vec<String>,
{
    let mut counts = BTreeMap::new();
    for exercise in exercises {
        for value in values_of(exercise) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    counts
}

fn sorted_entries(counts: BTreeMap<String, usize>) -> Vec<FacetEntry> {
    let mut entries: Vec<FacetEntry> = counts
        .into_iter()
        .map(|(name, count)| FacetEntry { name, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries
}

// ============================================================================
// Tests
// ============================================================================
