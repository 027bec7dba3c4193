pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod services;
pub mod state;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    use handlers::{auth, boards, cards, checklist, comments, health, invites, labels, lists};

    let card = "/boards/{board_id}/lists/{list_id}/cards/{card_id}";

    Router::new()
        .route("/health", get(health::health))
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me).put(auth::update_me))
        // Boards
        .route("/boards", get(boards::list_boards).post(boards::create_board))
        .route(
            "/boards/{board_id}",
            get(boards::get_board)
                .put(boards::update_board)
                .delete(boards::delete_board),
        )
        .route("/boards/{board_id}/full", get(boards::get_board_full))
        .route("/boards/{board_id}/archived", get(boards::get_board_archived))
        .route("/boards/{board_id}/move-targets", get(boards::get_move_targets))
        // Invites & members
        .route("/boards/invites", get(invites::list_invites))
        .route(
            "/boards/invites/{invite_id}/accept",
            post(invites::accept_invite),
        )
        .route("/boards/invites/{invite_id}", delete(invites::decline_invite))
        .route("/boards/{board_id}/invite", post(invites::invite_member))
        .route("/boards/{board_id}/members", get(invites::list_members))
        .route(
            "/boards/{board_id}/members/{user_id}",
            delete(invites::remove_member),
        )
        // Lists
        .route(
            "/boards/{board_id}/lists",
            get(lists::list_lists).post(lists::create_list),
        )
        .route("/boards/{board_id}/lists/reorder", patch(lists::reorder_lists))
        .route(
            "/boards/{board_id}/lists/{list_id}",
            put(lists::update_list).delete(lists::delete_list),
        )
        // Cards
        .route(
            "/boards/{board_id}/lists/{list_id}/cards",
            get(cards::list_cards).post(cards::create_card),
        )
        .route(
            "/boards/{board_id}/lists/{list_id}/cards/reorder",
            patch(cards::reorder_cards),
        )
        .route(
            card,
            get(cards::get_card)
                .patch(cards::update_card)
                .delete(cards::delete_card),
        )
        .route(&format!("{card}/move"), put(cards::move_card))
        .route(&format!("{card}/move-to-list"), put(cards::move_card_to_list))
        .route(&format!("{card}/archive"), patch(cards::archive_card))
        .route(&format!("{card}/unarchive"), patch(cards::unarchive_card))
        .route(&format!("{card}/labels"), put(cards::set_card_labels))
        // Labels
        .route(
            "/boards/{board_id}/labels",
            get(labels::list_labels).post(labels::create_label),
        )
        .route(
            "/boards/{board_id}/labels/{label_id}",
            put(labels::update_label).delete(labels::delete_label),
        )
        // Checklist
        .route(
            &format!("{card}/checklist"),
            get(checklist::list_items).post(checklist::create_item),
        )
        .route(
            &format!("{card}/checklist/reorder"),
            patch(checklist::reorder_items),
        )
        .route(
            &format!("{card}/checklist/{{item_id}}"),
            patch(checklist::update_item).delete(checklist::delete_item),
        )
        // Comments
        .route(
            &format!("{card}/comments"),
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            &format!("{card}/comments/{{comment_id}}"),
            delete(comments::delete_comment),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub mod test_utils {
    use crate::auth::{generate_token, hash_password, hash_token};
    use crate::config::AppConfig;
    use crate::state::AppState;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    pub async fn create_test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    pub async fn create_test_state() -> AppState {
        let pool = create_test_pool().await;
        AppState::new(pool, AppConfig::default())
    }

    pub async fn create_test_user(state: &AppState, email: &str, name: &str) -> i64 {
        let password_hash = hash_password("testpassword123").unwrap();
        state
            .users
            .create(email, &password_hash, Some(name))
            .await
            .unwrap()
            .id
    }

    /// Returns the raw token; only its hash is stored.
    pub async fn create_test_session(state: &AppState, user_id: i64) -> String {
        let token = generate_token();
        state
            .sessions
            .create(user_id, &hash_token(&token))
            .await
            .unwrap();
        token
    }
}
