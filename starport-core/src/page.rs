//! Sorting and pagination of filtered record sets.

use std::cmp::Ordering;

use crate::domain::Ship;
use crate::error::{Result, StarportError};

/// Page size applied when the client supplies none.
pub const DEFAULT_PAGE_SIZE: u32 = 3;

/// Sort key for ship listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Ascending by identifier (the default).
    #[default]
    Id,
    /// Ascending by speed.
    Speed,
    /// Ascending by production date.
    ProdDate,
    /// Ascending by rating.
    Rating,
}

impl SortKey {
    /// Parse a wire sort-key literal.
    ///
    /// Unrecognized literals are an invalid request rather than a silent
    /// fallback.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "id" => Ok(SortKey::Id),
            "speed" => Ok(SortKey::Speed),
            "prodDate" => Ok(SortKey::ProdDate),
            "rating" => Ok(SortKey::Rating),
            other => Err(StarportError::InvalidRequest(format!(
                "unknown sort order: {other}"
            ))),
        }
    }

    fn compare(&self, a: &Ship, b: &Ship) -> Ordering {
        match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Speed => a.speed.total_cmp(&b.speed),
            SortKey::ProdDate => a.prod_date.cmp(&b.prod_date),
            SortKey::Rating => a.rating.total_cmp(&b.rating),
        }
    }
}

/// Sort ascending by the given key and slice out one page.
///
/// The sort is stable, so ties keep their relative order from the input.
/// Page number defaults to 0 and page size to [`DEFAULT_PAGE_SIZE`];
/// a page past the end of the sequence is empty, not an error.
pub fn paginate(
    mut ships: Vec<Ship>,
    sort: SortKey,
    page_number: Option<u32>,
    page_size: Option<u32>,
) -> Vec<Ship> {
    ships.sort_by(|a, b| sort.compare(a, b));
    let page_number = page_number.unwrap_or(0) as usize;
    let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE) as usize;
    ships
        .into_iter()
        .skip(page_number.saturating_mul(page_size))
        .take(page_size)
        .collect()
}
