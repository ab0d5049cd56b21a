//! Route table. Each path is declared once; the auth gate and the
//! validation middleware are attached per method router so public and
//! admin methods can share a path.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put, MethodRouter},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{
    handlers,
    middleware::{self, validate_with},
    state::AppState,
    validation::{rules, FieldRule},
};

fn admin_only(state: &AppState, routes: MethodRouter<AppState>) -> MethodRouter<AppState> {
    routes.route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::auth_admin,
    ))
}

fn token_only(state: &AppState, routes: MethodRouter<AppState>) -> MethodRouter<AppState> {
    routes.route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::auth,
    ))
}

fn validated(rules: &Arc<Vec<FieldRule>>, routes: MethodRouter<AppState>) -> MethodRouter<AppState> {
    routes.route_layer(axum_middleware::from_fn(validate_with(Arc::clone(rules))))
}

pub fn router(state: AppState) -> Router {
    let application_rules = Arc::new(rules::application_rules());
    let login_rules = Arc::new(rules::login_rules());
    let admin_user_rules = Arc::new(rules::admin_user_rules());
    let scholarship_rules = Arc::new(rules::scholarship_rules());

    Router::new()
        // Auth
        .route("/api/auth/login", validated(&login_rules, post(handlers::auth::login)))
        .route("/api/auth/verify", token_only(&state, get(handlers::auth::verify)))
        .route(
            "/api/auth/logout",
            token_only(&state, post(handlers::auth::logout)),
        )
        // Applications: public submission, admin review
        .route(
            "/api/applications",
            validated(&application_rules, post(handlers::applications::create_application)).merge(
                admin_only(&state, get(handlers::applications::list_applications)),
            ),
        )
        .route(
            "/api/applications/stats/overview",
            admin_only(&state, get(handlers::applications::stats_overview)),
        )
        .route(
            "/api/applications/{id}",
            admin_only(
                &state,
                get(handlers::applications::get_application)
                    .delete(handlers::applications::delete_application),
            ),
        )
        .route(
            "/api/applications/{id}/status",
            admin_only(
                &state,
                patch(handlers::applications::update_application_status),
            ),
        )
        // Scholarships: public subset, admin CRUD
        .route(
            "/api/scholarships/public",
            get(handlers::scholarships::list_public),
        )
        .route(
            "/api/scholarships/public/{id}",
            get(handlers::scholarships::get_public),
        )
        .route(
            "/api/scholarships",
            admin_only(&state, get(handlers::scholarships::list_scholarships)).merge(admin_only(
                &state,
                validated(
                    &scholarship_rules,
                    post(handlers::scholarships::create_scholarship),
                ),
            )),
        )
        .route(
            "/api/scholarships/{id}",
            admin_only(
                &state,
                get(handlers::scholarships::get_scholarship)
                    .delete(handlers::scholarships::delete_scholarship),
            )
            .merge(admin_only(
                &state,
                validated(
                    &scholarship_rules,
                    put(handlers::scholarships::update_scholarship),
                ),
            )),
        )
        .route(
            "/api/scholarships/{id}/status",
            admin_only(
                &state,
                patch(handlers::scholarships::update_scholarship_status),
            ),
        )
        // Admin panel
        .route(
            "/api/admin/users",
            admin_only(&state, get(handlers::admin::get_users)).merge(admin_only(
                &state,
                validated(&admin_user_rules, post(handlers::admin::create_user)),
            )),
        )
        .route(
            "/api/admin/users/{id}",
            admin_only(&state, delete(handlers::admin::delete_user)),
        )
        .route(
            "/api/admin/users/{id}/password",
            admin_only(&state, patch(handlers::admin::update_user_password)),
        )
        .route(
            "/api/admin/dashboard",
            admin_only(&state, get(handlers::admin::dashboard)),
        )
        .route(
            "/api/admin/profile",
            token_only(
                &state,
                get(handlers::admin::get_profile).patch(handlers::admin::update_profile),
            ),
        )
        // Diagnostics
        .route("/api/health", get(handlers::health::health))
        .route("/api/test-db", get(handlers::health::test_db))
        .fallback(handlers::health::route_not_found)
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("0"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=15552000; includeSubDomains"),
        ))
}
