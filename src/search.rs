// 🔎 Search Query - Filters for catalog lookups
// Each dimension takes one value or a set of acceptable values

use crate::record::ResaleRecord;

/// Hard cap on the number of records a search returns
pub const SEARCH_LIMIT: usize = 30;

// ============================================================================
// SELECTION
// ============================================================================

/// Acceptable values for one filter dimension.
///
/// An empty selection places no constraint on its dimension. Building one
/// from a single empty string also yields an empty selection, so `""` and
/// `[]` both mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    values: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Selection { values: Vec::new() }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// True when this selection does not filter anything out
    pub fn is_any(&self) -> bool {
        self.values.is_empty()
    }

    pub fn matches(&self, value: &str) -> bool {
        self.is_any() || self.values.iter().any(|v| v == value)
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            return Selection::new();
        }
        Selection {
            values: vec![value.to_string()],
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        Selection::from(value.as_str())
    }
}

impl From<Vec<String>> for Selection {
    fn from(values: Vec<String>) -> Self {
        Selection { values }
    }
}

impl From<Vec<&str>> for Selection {
    fn from(values: Vec<&str>) -> Self {
        values.as_slice().into()
    }
}

impl From<&[&str]> for Selection {
    fn from(values: &[&str]) -> Self {
        Selection {
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for Selection {
    fn from(values: [&str; N]) -> Self {
        values.as_slice().into()
    }
}

// ============================================================================
// SEARCH QUERY
// ============================================================================

/// SearchQuery - AND-combined filters applied by `Catalog::search`
///
/// Order of evaluation: town, flat type, flat model, minimum price per unit
/// area, then the implicit `price_per_unit_area >= 0`.
///
/// ```
/// use hdb_resale::SearchQuery;
///
/// let query = SearchQuery::new()
///     .town(["YISHUN", "ANG MO KIO"])
///     .flat_type("5 ROOM")
///     .min_price_psf(2500.0);
/// assert!(query.flat_model_selection().is_any());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    town: Selection,
    flat_type: Selection,
    flat_model: Selection,
    min_price_psf: Option<f64>,
}

impl SearchQuery {
    /// A query with no filters (matches every non-negative record)
    pub fn new() -> Self {
        SearchQuery::default()
    }

    /// Builder pattern: restrict towns
    pub fn town(mut self, town: impl Into<Selection>) -> Self {
        self.town = town.into();
        self
    }

    /// Builder pattern: restrict flat types
    pub fn flat_type(mut self, flat_type: impl Into<Selection>) -> Self {
        self.flat_type = flat_type.into();
        self
    }

    /// Builder pattern: restrict flat models
    pub fn flat_model(mut self, flat_model: impl Into<Selection>) -> Self {
        self.flat_model = flat_model.into();
        self
    }

    /// Builder pattern: minimum price per unit area (inclusive)
    pub fn min_price_psf(mut self, price_psf: f64) -> Self {
        self.min_price_psf = Some(price_psf);
        self
    }

    pub fn town_selection(&self) -> &Selection {
        &self.town
    }

    pub fn flat_type_selection(&self) -> &Selection {
        &self.flat_type
    }

    pub fn flat_model_selection(&self) -> &Selection {
        &self.flat_model
    }

    pub fn min_price(&self) -> Option<f64> {
        self.min_price_psf
    }

    /// Check a record against every filter, in evaluation order
    pub fn matches(&self, record: &ResaleRecord) -> bool {
        if !self.town.matches(record.town()) {
            return false;
        }

        if !self.flat_type.matches(record.flat_type()) {
            return false;
        }

        if !self.flat_model.matches(record.flat_model()) {
            return false;
        }

        let price_psf = record.price_per_unit_area();

        if let Some(min) = self.min_price_psf {
            if !(price_psf >= min) {
                return false;
            }
        }

        price_psf >= 0.0
    }
}
