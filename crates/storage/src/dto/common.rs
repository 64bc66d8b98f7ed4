use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Direction of a listing sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// A whitelisted column a listing can be ordered by.
///
/// `Default` is the column used when `sort_by` is absent or unknown.
pub trait SortColumn: Copy + Default {
    fn parse(name: &str) -> Option<Self>;

    /// Column expression spliced into `ORDER BY`. Always a static name from
    /// the whitelist, never caller input.
    fn as_column(self) -> &'static str;
}

/// Resolved paging and ordering of one listing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery<S> {
    pub offset: u64,
    pub limit: u32,
    pub sort: S,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Column to order by. Unknown columns fall back to `created_at` descending.
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: SortOrder,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    10
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(default_page(), default_per_page())
    }
}

impl PaginationParams {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            sort_by: None,
            sort_order: SortOrder::default(),
        }
    }

    pub fn sorted_by(mut self, column: &str, order: SortOrder) -> Self {
        self.sort_by = Some(column.to_string());
        self.sort_order = order;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.per_page < 1 || self.per_page > 100 {
            return Err("per_page must be between 1 and 100".to_string());
        }
        Ok(())
    }

    /// Rows to skip. Computed in 64 bits so the largest page number cannot
    /// overflow.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u32 {
        self.per_page
    }

    pub fn list_query<S: SortColumn>(&self) -> ListQuery<S> {
        let (sort, order) = match self.sort_by.as_deref() {
            None => (S::default(), self.sort_order),
            Some(name) => match S::parse(name) {
                Some(column) => (column, self.sort_order),
                None => (S::default(), SortOrder::Desc),
            },
        };
        ListQuery {
            offset: self.offset(),
            limit: self.limit(),
            sort,
            order,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(page: u32, per_page: u32, total_items: i64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            (total_items.max(0) as u64).div_ceil(u64::from(per_page)) as u32
        };
        Self {
            page,
            per_page,
            total_items,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, params: &PaginationParams, total_items: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(params.page, params.per_page, total_items),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
