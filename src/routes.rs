use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{debug, elevated, protected, public};
use crate::middleware::{guarded, Guard};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(debug_routes(&state))
        .merge(session_routes(&state))
        .merge(import_routes(&state))
        .merge(admin_routes(&state))
        .fallback(public::not_found)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn debug_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/auth/login/fake/", get(public::auth::fake_login))
        .route("/api/debug/config", get(debug::config_snapshot));

    guarded(routes, state, &[Guard::DebugOnly])
}

fn session_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/auth/logout", get(protected::logout))
        .route("/api/auth/whoami", get(protected::whoami));

    guarded(routes, state, &[Guard::RequireToken])
}

fn import_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/api/import/shapefile", post(protected::import_shapefile))
        .layer(DefaultBodyLimit::max(state.config.server.max_upload_bytes));

    guarded(routes, state, &[Guard::RequireToken])
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new().route("/api/admin/database", get(elevated::database_info));

    guarded(
        routes,
        state,
        &[Guard::TranslateDataErrors, Guard::RequireToken, Guard::AdministratorOnly],
    )
}
