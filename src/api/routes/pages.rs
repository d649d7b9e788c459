//! Page Routes
//!
//! - GET /api/v1/pages/:page - Navigate and return the rendered page
//! - GET /api/v1/chart - Chart series

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::SearchQuery;
use crate::api::state::AppState;
use crate::view::{ChartView, Page, View};

/// GET /api/v1/pages/:page?q=
///
/// Unknown page ids show the Search page. On the Search page `q` replaces
/// the search term; without it the previous term is kept.
pub async fn show_page(
    State(state): State<Arc<AppState>>,
    Path(page): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Json<View> {
    let page = Page::parse_or_search(&page);

    let view = match (page, query.q) {
        (Page::Search, Some(term)) => state.session.set_search(term).await,
        (page, _) => state.session.navigate(page).await,
    };

    Json(view)
}

/// GET /api/v1/chart
pub async fn chart(State(state): State<Arc<AppState>>) -> Json<ChartView> {
    Json(state.session.chart().await)
}
