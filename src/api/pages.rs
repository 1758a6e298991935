use crate::api::AppState;
use crate::api::schemas::contact::ContactPageQuery;
use crate::domain::notice::Indicator;
use crate::error::Result;
use axum::extract::{Query, State, rejection::QueryRejection};
use axum::response::Html;

/// View route: the contact form, plus an outcome message for a recognized indicator.
/// A query string that does not parse is treated like an empty one.
pub async fn contact_page(
    State(state): State<AppState>,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Html<String>> {
    let query: ContactPageQuery = query.map(|Query(pairs)| pairs.into_iter().collect()).unwrap_or_default();
    let indicator = Indicator::from_query(query.success.as_deref(), query.error.as_deref());

    let page = state.page_service.render_contact_page(indicator)?;
    Ok(Html(page))
}
