use axum::{
    middleware::{from_fn, from_fn_with_state},
    Router,
};

use super::{admin_only_middleware, data_error_middleware, debug_only_middleware, token_auth_middleware};
use crate::state::AppState;

/// Access wrappers, declared from outermost to innermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Guard {
    TranslateDataErrors,
    RequireToken,
    AdministratorOnly,
    DebugOnly,
}

/// Wrap every route of `router` in `guards`, always nested in declaration
/// order of [`Guard`] whatever order they are listed in. Call after the
/// routes have been added.
pub fn guarded(router: Router<AppState>, state: &AppState, guards: &[Guard]) -> Router<AppState> {
    let mut ordered = guards.to_vec();
    ordered.sort();
    ordered.dedup();

    // The last layer added is the outermost, so start from the innermost.
    ordered
        .into_iter()
        .rev()
        .fold(router, |router, guard| match guard {
            Guard::DebugOnly => {
                router.route_layer(from_fn_with_state(state.clone(), debug_only_middleware))
            }
            Guard::AdministratorOnly => router.route_layer(from_fn(admin_only_middleware)),
            Guard::RequireToken => {
                router.route_layer(from_fn_with_state(state.clone(), token_auth_middleware))
            }
            Guard::TranslateDataErrors => {
                router.route_layer(from_fn_with_state(state.clone(), data_error_middleware))
            }
        })
}
