//! Per-line extraction results and resolved sales records.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Rendering of a field whose pattern did not match.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format of the purchase date shape (`DD/MM/YY`).
pub const PURCHASE_DATE_FORMAT: &str = "%d/%m/%y";

/// A scalar field value: either the matched text or the "not found" sentinel.
///
/// `Found(String::new())` is a valid (if odd) extraction and is never
/// conflated with `Missing`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// Text matched by the field's pattern.
    Found(String),
    /// The pattern did not match.
    #[default]
    Missing,
}

impl FieldValue {
    pub fn found(value: impl Into<String>) -> Self {
        Self::Found(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Matched text, `None` for the sentinel.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Found(value) => Some(value),
            Self::Missing => None,
        }
    }

    /// Matched text, or `"N/A"` for the sentinel.
    pub fn as_str(&self) -> &str {
        self.value().unwrap_or(NOT_AVAILABLE)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map(Self::Found).unwrap_or(Self::Missing)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == NOT_AVAILABLE {
            Ok(Self::Missing)
        } else {
            Ok(Self::Found(raw))
        }
    }
}

/// The six kinds of field recognized in a raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    ProductCode,
    Price,
    PurchaseDate,
    Phone,
    Email,
    Name,
}

impl FieldKind {
    /// Kinds in the order their spans are claimed on a line.
    ///
    /// The most specific shapes come first so that a looser shape cannot
    /// take digits that belong to an email, phone number or date.
    pub const CLAIM_ORDER: [FieldKind; 6] = [
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::PurchaseDate,
        FieldKind::Price,
        FieldKind::ProductCode,
        FieldKind::Name,
    ];

    /// Kinds with at most one value per line.
    pub const SCALARS: [FieldKind; 5] = [
        FieldKind::ProductCode,
        FieldKind::Price,
        FieldKind::PurchaseDate,
        FieldKind::Phone,
        FieldKind::Email,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ProductCode => "product_code",
            Self::Price => "price",
            Self::PurchaseDate => "purchase_date",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fields recognized on a single input line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineExtraction {
    /// 1-based line number in the input.
    pub line: usize,

    pub product_code: FieldValue,
    pub price: FieldValue,
    pub purchase_date: FieldValue,
    pub phone: FieldValue,
    pub email: FieldValue,

    /// Name candidates, left to right. In-line duplicates are kept.
    pub names: Vec<String>,
}

impl LineExtraction {
    /// An extraction with every field missing.
    pub fn new(line: usize) -> Self {
        Self {
            line,
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = FieldValue::found(email);
        self
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Scalar field by kind. `Name` is not a scalar and yields `None`.
    pub fn field(&self, kind: FieldKind) -> Option<&FieldValue> {
        match kind {
            FieldKind::ProductCode => Some(&self.product_code),
            FieldKind::Price => Some(&self.price),
            FieldKind::PurchaseDate => Some(&self.purchase_date),
            FieldKind::Phone => Some(&self.phone),
            FieldKind::Email => Some(&self.email),
            FieldKind::Name => None,
        }
    }

    pub(crate) fn field_mut(&mut self, kind: FieldKind) -> Option<&mut FieldValue> {
        match kind {
            FieldKind::ProductCode => Some(&mut self.product_code),
            FieldKind::Price => Some(&mut self.price),
            FieldKind::PurchaseDate => Some(&mut self.purchase_date),
            FieldKind::Phone => Some(&mut self.phone),
            FieldKind::Email => Some(&mut self.email),
            FieldKind::Name => None,
        }
    }
}

/// How a record's customer name was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// The name matched the normalized email local part.
    EmailAnchored,
    /// First candidate on the line not yet assigned.
    Positional,
    /// No unassigned candidate was left.
    Unresolved,
}

/// A sales record with its customer chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    /// 1-based line number the record came from.
    pub line: usize,

    pub product_code: FieldValue,
    pub price: FieldValue,
    pub purchase_date: FieldValue,
    pub customer_name: FieldValue,
    pub email: FieldValue,
    pub phone: FieldValue,

    pub resolution: Resolution,
}

impl ResolvedRecord {
    /// Price as a decimal amount.
    pub fn price_value(&self) -> Option<Decimal> {
        self.price.value().and_then(|p| Decimal::from_str(p).ok())
    }

    /// Purchase date as a calendar date, `None` if missing or not a real date.
    pub fn purchase_date_value(&self) -> Option<NaiveDate> {
        self.purchase_date
            .value()
            .and_then(|d| NaiveDate::parse_from_str(d, PURCHASE_DATE_FORMAT).ok())
    }
}
