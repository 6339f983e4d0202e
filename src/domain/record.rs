//! Catalog record model.
//!
//! A [`Record`] is one product row of the grid. Records are identified by a
//! [`RecordId`] that stays unique across the store for the whole session.
//! [`RecordPatch`] carries a partial set of field values and is shared by
//! `update_by_id` and the edit draft.

use crate::domain::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title given to records created by the "add" action.
pub const PLACEHOLDER_TITLE: &str = "New Product";

/// Price given to records created by the "add" action.
pub const PLACEHOLDER_PRICE: f64 = 100.0;

/// Stable identifier of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub brand: String,
}

impl Record {
    /// Creates a record with every field set.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        brand: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId(id),
            title: title.into(),
            price,
            category: category.into(),
            brand: brand.into(),
        }
    }

    /// Creates the placeholder record inserted by the "add" action.
    ///
    /// ```
    /// use catalog_grid::domain::{Record, RecordId};
    ///
    /// let record = Record::placeholder(RecordId(9));
    /// assert_eq!(record.title, "New Product");
    /// assert_eq!(record.price, 100.0);
    /// assert!(record.brand.is_empty());
    /// ```
    #[must_use]
    pub fn placeholder(id: RecordId) -> Self {
        Self {
            id,
            title: PLACEHOLDER_TITLE.to_string(),
            price: PLACEHOLDER_PRICE,
            category: String::new(),
            brand: String::new(),
        }
    }

    /// Returns the display text of a column.
    ///
    /// Prices use the shortest `f64` representation (`10` rather than `10.0`).
    #[must_use]
    pub fn field_text(&self, column: Column) -> String {
        match column {
            Column::Title => self.title.clone(),
            Column::Price => self.price.to_string(),
            Column::Category => self.category.clone(),
            Column::Brand => self.brand.clone(),
        }
    }
}

/// Editable and sortable columns of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Title,
    Price,
    Category,
    Brand,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Self; 4] = [Self::Title, Self::Price, Self::Category, Self::Brand];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Price => "price",
            Self::Category => "category",
            Self::Brand => "brand",
        }
    }

    /// Header label used by the table renderer.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Price => "Price",
            Self::Category => "Category",
            Self::Brand => "Brand",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = GridError;

    /// Parses a column name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "price" => Ok(Self::Price),
            "category" => Ok(Self::Category),
            "brand" => Ok(Self::Brand),
            other => Err(GridError::InvalidViewParameter(format!(
                "unknown sort key: {other:?}"
            ))),
        }
    }
}

/// Partial set of record fields.
///
/// `None` means "leave the stored value alone" when the patch is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl RecordPatch {
    /// Builds a patch holding every editable field of `record`.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            title: Some(record.title.clone()),
            price: Some(record.price),
            category: Some(record.category.clone()),
            brand: Some(record.brand.clone()),
        }
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.price.is_none() && self.category.is_none() && self.brand.is_none()
    }

    /// Sets one field from user input.
    ///
    /// Text columns take the value verbatim. The price must parse as a finite
    /// number.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidFieldValue`] if the price does not parse; the
    /// patch is left unchanged.
    pub fn set(&mut self, column: Column, value: &str) -> Result<()> {
        match column {
            Column::Title => self.title = Some(value.to_string()),
            Column::Category => self.category = Some(value.to_string()),
            Column::Brand => self.brand = Some(value.to_string()),
            Column::Price => {
                let price = value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|p| p.is_finite())
                    .ok_or_else(|| GridError::InvalidFieldValue {
                        field: column,
                        value: value.to_string(),
                    })?;
                self.price = Some(price);
            }
        }
        Ok(())
    }

    /// Merges the set fields into `record`. The id is never touched.
    pub fn apply_to(&self, record: &mut Record) {
        if let Some(title) = &self.title {
            record.title.clone_from(title);
        }
        if let Some(price) = self.price {
            record.price = price;
        }
        if let Some(category) = &self.category {
            record.category.clone_from(category);
        }
        if let Some(brand) = &self.brand {
            record.brand.clone_from(brand);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_parses_case_insensitively() {
        assert_eq!(" Price ".parse::<Column>().unwrap(), Column::Price);
        assert_eq!("BRAND".parse::<Column>().unwrap(), Column::Brand);
        assert!(matches!(
            "rating".parse::<Column>(),
            Err(GridError::InvalidViewParameter(_))
        ));
    }

    #[test]
    fn patch_applies_only_set_fields() {
        let mut record = Record::new(1, "Phone", 10.0, "smartphones", "Apple");
        let patch = RecordPatch {
            price: Some(12.5),
            ..RecordPatch::default()
        };
        patch.apply_to(&mut record);
        assert_eq!(record, Record::new(1, "Phone", 12.5, "smartphones", "Apple"));
    }

    #[test]
    fn patch_rejects_non_numeric_price() {
        let mut patch = RecordPatch::default();
        let err = patch.set(Column::Price, "cheap").unwrap_err();
        assert!(matches!(err, GridError::InvalidFieldValue { field: Column::Price, .. }));
        assert!(patch.is_empty());

        assert!(patch.set(Column::Price, "NaN").is_err());
        patch.set(Column::Price, " 19.99 ").unwrap();
        assert_eq!(patch.price, Some(19.99));
    }

    #[test]
    fn price_text_drops_trailing_zero() {
        let record = Record::new(1, "Phone", 10.0, "", "");
        assert_eq!(record.field_text(Column::Price), "10");
    }
}
