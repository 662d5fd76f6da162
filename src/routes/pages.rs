use axum::{extract::State, response::Html};

use crate::error::Result;
use crate::origin::RequestOrigin;
use crate::templates::Page;
use crate::AppState;

async fn render(state: &AppState, page: Page, origin: &RequestOrigin) -> Result<Html<String>> {
    let rewrite = state.rewriter.render(page, &origin.0).await?;
    Ok(Html(rewrite.html))
}

/// GET /ranking
pub async fn ranking_page(
    State(state): State<AppState>,
    origin: RequestOrigin,
) -> Result<Html<String>> {
    render(&state, Page::Ranking, &origin).await
}

/// GET /photos
pub async fn photos_page(
    State(state): State<AppState>,
    origin: RequestOrigin,
) -> Result<Html<String>> {
    render(&state, Page::Photos, &origin).await
}

/// GET /cocteles/ranking
pub async fn cocteles_ranking_page(
    State(state): State<AppState>,
    origin: RequestOrigin,
) -> Result<Html<String>> {
    render(&state, Page::CoctelesRanking, &origin).await
}
