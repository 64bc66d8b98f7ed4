pub mod goal;
pub mod matches;
pub mod player;
pub mod team;

use crate::dto::common::{ListQuery, SortColumn};

/// `ORDER BY` clause of a listing. Ties fall back to `created_at` in the
/// requested direction, then to `id`.
pub(crate) fn order_by<S: SortColumn>(query: &ListQuery<S>, created_at: &str, id: &str) -> String {
    let direction = query.order.as_sql();
    let column = query.sort.as_column();
    if column == created_at {
        format!("ORDER BY {column} {direction}, {id}")
    } else {
        format!("ORDER BY {column} {direction}, {created_at} {direction}, {id}")
    }
}

/// Postgres `OFFSET` takes a bigint.
pub(crate) fn sql_offset(offset: u64) -> i64 {
    i64::try_from(offset).unwrap_or(i64::MAX)
}
