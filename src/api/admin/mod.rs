mod certificates;
mod content;
mod media;
mod site;
mod students;

use axum::Router;

use crate::core::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .merge(students::router())
        .merge(content::router())
        .merge(media::router())
        .merge(site::router())
        .merge(certificates::router())
}
