//! Session routes.

use axum::response::{IntoResponse, Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::middleware::auth::SESSION_COOKIE;
use crate::services::route_guard::LOGIN_PATH;

/// POST /auth/logout — drop the session cookie and return to the login page.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to(LOGIN_PATH))
}
