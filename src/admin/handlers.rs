//! Admin portal pages.

use axum::response::Html;

/// Static page served to authenticated admins.
pub const WELCOME_PAGE: &str = "<html><h1>Welcome to the admin portal</h1></html>";

/// `GET /admin`
pub async fn welcome() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}
