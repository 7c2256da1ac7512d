//! Listing contract for the product index.
//!
//! Raw query-string values arrive as [`ListingParams`] and are parsed
//! leniently into a [`ListingQuery`]: an ordered list of optional filter
//! predicates (combined with AND), at most one sort, and a 1-based page.
//! Nothing here fails. Values that cannot be used are dropped and their
//! parameter names recorded in [`ListingQuery::ignored`].

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::search::build_tsquery;
use crate::types::DbId;

/// Fixed number of rows per page.
pub const PAGE_SIZE: i64 = 10;

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Columns a listing may be sorted by. Anything else is never interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Price,
    CreatedAt,
    Name,
}

impl SortField {
    pub const DEFAULT: SortField = SortField::CreatedAt;

    /// Exact, case-sensitive match against the allow-list.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "price" => Some(Self::Price),
            "created_at" => Some(Self::CreatedAt),
            "name" => Some(Self::Name),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::CreatedAt => "created_at",
            Self::Name => "name",
        }
    }

    /// Qualified column in the `products p` listing query.
    pub fn column(self) -> &'static str {
        match self {
            Self::Price => "p.price",
            Self::CreatedAt => "p.created_at",
            Self::Name => "p.name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const DEFAULT: SortDirection = SortDirection::Desc;

    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Raw `GET /products` query parameters.
///
/// Every value is kept as a string so that malformed input never rejects
/// the request; [`ListingQuery::from_params`] decides what to use.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListingParams {
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub page: Option<String>,
}

impl ListingParams {
    /// Collect raw `key=value` pairs. A repeated key keeps its last value;
    /// unknown keys are skipped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "search" => &mut params.search,
                "category_id" => &mut params.category_id,
                "min_price" => &mut params.min_price,
                "max_price" => &mut params.max_price,
                "sort_by" => &mut params.sort_by,
                "sort_dir" => &mut params.sort_dir,
                "page" => &mut params.page,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        params
    }
}

/// One WHERE-clause condition of the listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `search_vector @@ to_tsquery('simple', ..)`; holds the built tsquery text.
    TextMatches(String),
    CategoryIs(DbId),
    PriceAtLeast(Decimal),
    PriceAtMost(Decimal),
}

/// Optional constraints on the product listing, each independently absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Already converted by [`build_tsquery`].
    pub text_query: Option<String>,
    pub category_id: Option<DbId>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    /// Supplied constraints in a fixed order: text, category, min, max.
    pub fn predicates(&self) -> Vec<Predicate> {
        [
            self.text_query.clone().map(Predicate::TextMatches),
            self.category_id.map(Predicate::CategoryIs),
            self.min_price.map(Predicate::PriceAtLeast),
            self.max_price.map(Predicate::PriceAtMost),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// `true` when both price bounds are given and cannot both hold.
    pub fn has_inverted_price_range(&self) -> bool {
        matches!((self.min_price, self.max_price), (Some(min), Some(max)) if min > max)
    }
}

/// A fully parsed listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub filter: ProductFilter,
    /// `None` when `sort_by` named a column outside the allow-list.
    pub sort: Option<SortSpec>,
    /// 1-based.
    pub page: i64,
    /// Parameters that were present but unusable.
    pub ignored: Vec<&'static str>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_or_ignore<T: FromStr>(
    name: &'static str,
    value: &Option<String>,
    ignored: &mut Vec<&'static str>,
) -> Option<T> {
    let raw = present(value)?;
    match raw.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            ignored.push(name);
            None
        }
    }
}

impl ListingQuery {
    pub fn from_params(params: &ListingParams) -> Self {
        let mut ignored = Vec::new();

        let filter = ProductFilter {
            text_query: present(&params.search).and_then(build_tsquery),
            category_id: parse_or_ignore("category_id", &params.category_id, &mut ignored),
            min_price: parse_or_ignore("min_price", &params.min_price, &mut ignored),
            max_price: parse_or_ignore("max_price", &params.max_price, &mut ignored),
        };

        let direction = match present(&params.sort_dir) {
            None => SortDirection::DEFAULT,
            Some(raw) => SortDirection::parse(raw).unwrap_or_else(|| {
                ignored.push("sort_dir");
                SortDirection::DEFAULT
            }),
        };

        let sort = match present(&params.sort_by) {
            None => Some(SortField::DEFAULT),
            Some(raw) => {
                let field = SortField::parse(raw);
                if field.is_none() {
                    ignored.push("sort_by");
                }
                field
            }
        }
        .map(|field| SortSpec { field, direction });

        let page = match parse_or_ignore::<i64>("page", &params.page, &mut ignored) {
            Some(p) if p >= 1 => p,
            Some(_) => {
                ignored.push("page");
                1
            }
            None => 1,
        };

        Self {
            filter,
            sort,
            page,
            ignored,
        }
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(PAGE_SIZE)
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Last page number for `total` matching rows. Never less than 1.
pub fn last_page(total: i64) -> i64 {
    if total <= 0 {
        1
    } else {
        (total + PAGE_SIZE - 1) / PAGE_SIZE
    }
}

/// Pagination metadata returned alongside a page of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub last_page: i64,
    pub per_page: i64,
    pub total: i64,
    /// 1-based position of the first row on this page; `None` when empty.
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl PageMeta {
    pub fn new(current_page: i64, total: i64, rows_on_page: usize) -> Self {
        let offset = (current_page - 1).saturating_mul(PAGE_SIZE);
        let rows = rows_on_page as i64;
        let (from, to) = if rows == 0 {
            (None, None)
        } else {
            (Some(offset + 1), Some(offset + rows))
        };
        Self {
            current_page,
            last_page: last_page(total),
            per_page: PAGE_SIZE,
            total,
            from,
            to,
        }
    }
}

/// One page of rows plus metadata, serialized flat:
/// `{"data": [..], "current_page": 1, "last_page": 3, ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, current_page: i64, total: i64) -> Self {
        let meta = PageMeta::new(current_page, total, data.len());
        Self { data, meta }
    }
}
