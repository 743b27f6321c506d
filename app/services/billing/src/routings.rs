use crate::handlers::{bill::*, customer::*, index::*, login::*, user::*};
use app_middleware::web_auth_middleware;
use app_state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/customers/", get(get_customers).post(post_customer))
        .route(
            "/customers/{customer_id}",
            get(get_customer).put(put_customer).delete(delete_customer),
        )
        .route("/bills/", get(get_bills).post(post_bill))
        .route(
            "/bills/{bill_id}",
            get(get_bill).put(put_bill).delete(delete_bill),
        )
        .route("/users/", post(post_user))
        .route("/users/me", get(get_me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            web_auth_middleware,
        ));

    Router::new()
        .route("/", get(get_index))
        .route("/token", post(post_token))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
