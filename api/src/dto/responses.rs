use serde::{Deserialize, Serialize};

/// Body of `DELETE /api/posts/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_page() -> usize {
    1
}
fn default_limit() -> usize {
    10
}

/// Paginated response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}

impl<T: Clone> PaginatedResponse<T> {
    /// Slices one page out of an already ordered list.
    pub fn paginate(items: &[T], params: &PaginationParams) -> Self {
        let total = items.len();
        let start = params.page.saturating_sub(1).saturating_mul(params.limit);
        let end = start.saturating_add(params.limit).min(total);

        let data = if start < total {
            items[start..end].to_vec()
        } else {
            vec![]
        };

        Self {
            data,
            page: params.page,
            limit: params.limit,
            total,
        }
    }
}
