use serde::Serialize;

pub(crate) const fn default_limit() -> i64 {
    100
}

#[derive(Debug, Serialize)]
pub(crate) struct PaginatedResponse<T> {
    pub(crate) items: Vec<T>,
    pub(crate) total_count: i64,
    pub(crate) skip: i64,
    pub(crate) limit: i64,
}

impl<T> PaginatedResponse<T> {
    pub(crate) fn map_from<S>(
        items: Vec<S>,
        total_count: i64,
        skip: i64,
        limit: i64,
        map: impl FnMut(S) -> T,
    ) -> Self {
        Self { items: items.into_iter().map(map).collect(), total_count, skip, limit }
    }
}
