use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::metrics::REQUEST_TOTAL;
use crate::models::{GistsQuery, GistsResponse};
use crate::state::AppState;
use crate::upstream::MAX_PER_PAGE;

pub const DEFAULT_PER_PAGE: i64 = 30;
pub const DEFAULT_PAGE: i64 = 1;

// Non-numeric values fall back to the default; integer literals too wide
// for i64 saturate so range checks still reject them
fn int_or(value: Option<&str>, default: i64) -> i64 {
    let Some(text) = value.map(str::trim) else {
        return default;
    };
    if let Ok(n) = text.parse::<i64>() {
        return n;
    }

    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return default;
    }
    if negative { i64::MIN } else { i64::MAX }
}

// Validated (per_page, page) from the query string
pub fn pagination(query: &GistsQuery) -> Result<(u32, u64), ApiError> {
    let per_page = int_or(query.per_page.as_deref(), DEFAULT_PER_PAGE);
    let page = int_or(query.page.as_deref(), DEFAULT_PAGE);

    if !(1..=i64::from(MAX_PER_PAGE)).contains(&per_page) {
        return Err(ApiError::Validation(
            "per_page must be between 1 and 100".to_string(),
        ));
    }
    if page < 1 {
        return Err(ApiError::Validation("page must be greater than 0".to_string()));
    }

    // both are positive and per_page <= 100 at this point
    Ok((per_page as u32, page as u64))
}

// GET /{username}
pub async fn gists_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<GistsQuery>,
) -> Result<Response, ApiError> {
    REQUEST_TOTAL.inc();

    let (per_page, page) = pagination(&query)?;
    let gists = state.gists.fetch_user_gists(&username, per_page, page).await?;

    Ok(Json(GistsResponse {
        username: &username,
        gists: &gists,
        count: gists.len(),
        page,
        per_page,
    })
    .into_response())
}
