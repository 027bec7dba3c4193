use axum::http::StatusCode;
use axum_test::TestServer;
use cookie::Cookie;
use serde_json::{json, Value};
use taskboard::{create_router, state::AppState, test_utils};

async fn setup_server() -> TestServer {
    let state = test_utils::create_test_state().await;
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

async fn setup_server_with_state() -> (TestServer, AppState) {
    let state = test_utils::create_test_state().await;
    let app = create_router(state.clone());
    (TestServer::new(app).unwrap(), state)
}

/// Registers `email` and returns its session token.
async fn register(server: &TestServer, email: &str) -> String {
    let response = server
        .post("/auth/register")
        .json(&json!({
            "email": email,
            "password": "testpassword123",
            "name": "Test User"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["token"].as_str().unwrap().to_string()
}

async fn register_and_login(server: &TestServer) -> String {
    let email = format!("test_{}@example.com", uuid::Uuid::new_v4());
    register(server, &email).await
}

fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::new("session", token.to_string())
}

fn id(value: &Value) -> i64 {
    value["id"].as_i64().unwrap()
}

async fn create_board(server: &TestServer, session: &str, title: &str) -> i64 {
    let response = server
        .post("/boards")
        .add_cookie(session_cookie(session))
        .json(&json!({ "title": title }))
        .await;
    response.assert_status(StatusCode::CREATED);
    id(&response.json::<Value>()["board"])
}

async fn create_list(server: &TestServer, session: &str, board_id: i64, title: &str) -> Value {
    let response = server
        .post(&format!("/boards/{}/lists", board_id))
        .add_cookie(session_cookie(session))
        .json(&json!({ "title": title }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["list"].clone()
}

async fn create_card(
    server: &TestServer,
    session: &str,
    board_id: i64,
    list_id: i64,
    title: &str,
) -> Value {
    let response = server
        .post(&format!("/boards/{}/lists/{}/cards", board_id, list_id))
        .add_cookie(session_cookie(session))
        .json(&json!({ "title": title }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["card"].clone()
}

/// Owner invites `email`, the invitee accepts.
async fn share_board(server: &TestServer, owner: &str, board_id: i64, email: &str, invitee: &str) {
    let invite = server
        .post(&format!("/boards/{}/invite", board_id))
        .add_cookie(session_cookie(owner))
        .json(&json!({ "email": email }))
        .await;
    invite.assert_status(StatusCode::CREATED);
    let invite_id = id(&invite.json::<Value>()["invite"]);

    server
        .post(&format!("/boards/invites/{}/accept", invite_id))
        .add_cookie(session_cookie(invitee))
        .await
        .assert_status_ok();
}

// ============================================================================
// Auth Tests
// ============================================================================

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_is_public() {
        let server = setup_server().await;

        let response = server.get("/health").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ok");
    }

    #[tokio::test]
    async fn test_register_success() {
        let server = setup_server().await;

        let response = server
            .post("/auth/register")
            .json(&json!({
                "email": "NewUser@Example.com",
                "password": "securepassword123",
                "name": "New User"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert!(body["user"]["id"].is_i64());
        assert_eq!(body["user"]["email"], "newuser@example.com");
        assert_eq!(body["user"]["name"], "New User");
        assert!(body["user"].get("passwordHash").is_none());
        assert_eq!(body["token"].as_str().unwrap().len(), 64);
        assert!(!response.cookie("session").value().is_empty());
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let server = setup_server().await;

        let response = server
            .post("/auth/register")
            .json(&json!({ "email": "user@example.com" }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["message"],
            "Email and password are required"
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let server = setup_server().await;
        register(&server, "duplicate@example.com").await;

        let response = server
            .post("/auth/register")
            .json(&json!({
                "email": "DUPLICATE@example.com",
                "password": "password456"
            }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["message"], "Email already in use");
    }

    #[tokio::test]
    async fn test_login_success() {
        let server = setup_server().await;
        register(&server, "login@example.com").await;

        let response = server
            .post("/auth/login")
            .json(&json!({
                "email": "login@example.com",
                "password": "testpassword123"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["user"]["email"], "login@example.com");
        assert_eq!(
            response.cookie("session").value(),
            body["token"].as_str().unwrap()
        );
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let server = setup_server().await;
        register(&server, "wrong@example.com").await;

        let response = server
            .post("/auth/login")
            .json(&json!({
                "email": "wrong@example.com",
                "password": "not-the-password"
            }))
            .await;

        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_protected_route_requires_session() {
        let server = setup_server().await;

        let response = server.get("/boards").await;

        response.assert_status_unauthorized();
        assert!(response.json::<Value>()["message"].is_string());
    }

    #[tokio::test]
    async fn test_seeded_session_authenticates() {
        let (server, state) = setup_server_with_state().await;
        let user_id = test_utils::create_test_user(&state, "seeded@example.com", "Seeded").await;
        let token = test_utils::create_test_session(&state, user_id).await;

        let response = server
            .get("/auth/me")
            .add_cookie(session_cookie(&token))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["user"]["id"], user_id);
    }

    #[tokio::test]
    async fn test_bearer_token_is_accepted() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;

        let response = server
            .get("/auth/me")
            .authorization_bearer(&session)
            .await;

        response.assert_status_ok();
        assert!(response.json::<Value>()["user"]["email"].is_string());
    }

    #[tokio::test]
    async fn test_update_profile_blank_name_clears() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;

        let response = server
            .put("/auth/me")
            .add_cookie(session_cookie(&session))
            .json(&json!({ "name": "   " }))
            .await;

        response.assert_status_ok();
        assert!(response.json::<Value>()["user"]["name"].is_null());
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;

        server
            .post("/auth/logout")
            .add_cookie(session_cookie(&session))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get("/auth/me")
            .add_cookie(session_cookie(&session))
            .await
            .assert_status_unauthorized();
    }
}

// ============================================================================
// Board Tests
// ============================================================================

mod board_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_board_trims_title() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;

        let response = server
            .post("/boards")
            .add_cookie(session_cookie(&session))
            .json(&json!({ "title": "  Sprint  " }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["board"]["title"], "Sprint");
        assert!(body["board"]["ownerId"].is_i64());
    }

    #[tokio::test]
    async fn test_create_board_empty_title() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;

        let response = server
            .post("/boards")
            .add_cookie(session_cookie(&session))
            .json(&json!({ "title": "   " }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["message"], "Title is required");
    }

    #[tokio::test]
    async fn test_malformed_json_uses_message_body() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;

        let response = server
            .post("/boards")
            .add_cookie(session_cookie(&session))
            .json(&json!({ "title": 42 }))
            .await;

        response.assert_status_bad_request();
        assert!(response.json::<Value>()["message"].is_string());
    }

    #[tokio::test]
    async fn test_list_boards_includes_role() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        create_board(&server, &session, "Board 1").await;
        create_board(&server, &session, "Board 2").await;

        let response = server
            .get("/boards")
            .add_cookie(session_cookie(&session))
            .await;

        response.assert_status_ok();
        let boards = response.json::<Value>()["boards"].as_array().unwrap().clone();
        assert_eq!(boards.len(), 2);
        assert_eq!(boards[0]["title"], "Board 1");
        assert_eq!(boards[1]["title"], "Board 2");
        assert!(boards.iter().all(|b| b["role"] == "OWNER"));
    }

    #[tokio::test]
    async fn test_rename_and_delete_board() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Original").await;

        let response = server
            .put(&format!("/boards/{}", board_id))
            .add_cookie(session_cookie(&session))
            .json(&json!({ "title": "Renamed" }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["board"]["title"], "Renamed");

        server
            .delete(&format!("/boards/{}", board_id))
            .add_cookie(session_cookie(&session))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/boards/{}", board_id))
            .add_cookie(session_cookie(&session))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_delete_board_cascades() {
        let (server, state) = setup_server_with_state().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Doomed").await;
        let list = create_list(&server, &session, board_id, "Todo").await;
        create_card(&server, &session, board_id, id(&list), "Task").await;

        server
            .delete(&format!("/boards/{}", board_id))
            .add_cookie(session_cookie(&session))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let cards = state.cards.list_by_list(id(&list), None).await.unwrap();
        assert!(cards.is_empty());
        assert!(state.lists.list_by_board(board_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_member_cannot_rename_or_delete() {
        let server = setup_server().await;
        let owner = register(&server, "owner@example.com").await;
        let member = register(&server, "member@example.com").await;
        let board_id = create_board(&server, &owner, "Shared").await;
        share_board(&server, &owner, board_id, "member@example.com", &member).await;

        server
            .put(&format!("/boards/{}", board_id))
            .add_cookie(session_cookie(&member))
            .json(&json!({ "title": "Mine now" }))
            .await
            .assert_status_not_found();

        server
            .delete(&format!("/boards/{}", board_id))
            .add_cookie(session_cookie(&member))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_archived_view_only_has_archived_cards() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let list = create_list(&server, &session, board_id, "Todo").await;
        let kept = create_card(&server, &session, board_id, id(&list), "Kept").await;
        let shelved = create_card(&server, &session, board_id, id(&list), "Shelved").await;

        let response = server
            .patch(&format!(
                "/boards/{}/lists/{}/cards/{}/archive",
                board_id,
                id(&list),
                id(&shelved)
            ))
            .add_cookie(session_cookie(&session))
            .await;
        response.assert_status_ok();
        let archived: Value = response.json();
        assert_eq!(archived["card"]["archived"], true);
        assert!(archived["card"]["archivedAt"].is_string());
        assert_eq!(archived["card"]["position"], 1);

        let full: Value = server
            .get(&format!("/boards/{}/full", board_id))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        let active = full["lists"][0]["cards"].as_array().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0]["id"], kept["id"]);

        let archive: Value = server
            .get(&format!("/boards/{}/archived", board_id))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        let hidden = archive["lists"][0]["cards"].as_array().unwrap();
        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden[0]["id"], shelved["id"]);

        let restored: Value = server
            .patch(&format!(
                "/boards/{}/lists/{}/cards/{}/unarchive",
                board_id,
                id(&list),
                id(&shelved)
            ))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        assert_eq!(restored["card"]["archived"], false);
        assert!(restored["card"]["archivedAt"].is_null());
    }
}

// ============================================================================
// Access Tests
// ============================================================================

mod access_tests {
    use super::*;

    #[tokio::test]
    async fn test_outsider_gets_not_found_everywhere() {
        let server = setup_server().await;
        let owner = register(&server, "owner@example.com").await;
        let outsider = register(&server, "outsider@example.com").await;
        let board_id = create_board(&server, &owner, "Private").await;
        let list = create_list(&server, &owner, board_id, "Todo").await;
        let card = create_card(&server, &owner, board_id, id(&list), "Secret").await;
        let card_path = format!("/boards/{}/lists/{}/cards/{}", board_id, id(&list), id(&card));

        let reads = [
            format!("/boards/{}", board_id),
            format!("/boards/{}/full", board_id),
            format!("/boards/{}/archived", board_id),
            format!("/boards/{}/move-targets", board_id),
            format!("/boards/{}/members", board_id),
            format!("/boards/{}/lists", board_id),
            format!("/boards/{}/labels", board_id),
            format!("/boards/{}/lists/{}/cards", board_id, id(&list)),
            card_path.clone(),
            format!("{}/checklist", card_path),
            format!("{}/comments", card_path),
        ];
        for path in &reads {
            let response = server
                .get(path)
                .add_cookie(session_cookie(&outsider))
                .await;
            response.assert_status_not_found();
            assert!(response.json::<Value>()["message"].is_string(), "{path}");
        }

        server
            .post(&format!("/boards/{}/lists", board_id))
            .add_cookie(session_cookie(&outsider))
            .json(&json!({ "title": "Intrusion" }))
            .await
            .assert_status_not_found();

        server
            .patch(&card_path)
            .add_cookie(session_cookie(&outsider))
            .json(&json!({ "title": "Defaced" }))
            .await
            .assert_status_not_found();

        server
            .delete(&card_path)
            .add_cookie(session_cookie(&outsider))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_nested_ids_must_match_their_parents() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let first = create_board(&server, &session, "First").await;
        let second = create_board(&server, &session, "Second").await;
        let list = create_list(&server, &session, first, "Todo").await;
        let card = create_card(&server, &session, first, id(&list), "Task").await;

        server
            .get(&format!(
                "/boards/{}/lists/{}/cards/{}",
                second,
                id(&list),
                id(&card)
            ))
            .add_cookie(session_cookie(&session))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_non_numeric_path_is_bad_request() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;

        let response = server
            .get("/boards/not-a-number")
            .add_cookie(session_cookie(&session))
            .await;

        response.assert_status_bad_request();
        assert!(response.json::<Value>()["message"].is_string());
    }
}

// ============================================================================
// List Tests
// ============================================================================

mod list_tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_append_in_order() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;

        let todo = create_list(&server, &session, board_id, "Todo").await;
        let doing = create_list(&server, &session, board_id, "Doing").await;
        assert_eq!(todo["position"], 0);
        assert_eq!(doing["position"], 1);
        assert_eq!(todo["boardId"], board_id);
    }

    #[tokio::test]
    async fn test_append_after_delete_leaves_gap() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let a = create_list(&server, &session, board_id, "A").await;
        create_list(&server, &session, board_id, "B").await;

        server
            .delete(&format!("/boards/{}/lists/{}", board_id, id(&a)))
            .add_cookie(session_cookie(&session))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let c = create_list(&server, &session, board_id, "C").await;
        assert_eq!(c["position"], 2);
    }

    #[tokio::test]
    async fn test_reorder_lists() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let a = id(&create_list(&server, &session, board_id, "A").await);
        let b = id(&create_list(&server, &session, board_id, "B").await);
        let c = id(&create_list(&server, &session, board_id, "C").await);

        let response = server
            .patch(&format!("/boards/{}/lists/reorder", board_id))
            .add_cookie(session_cookie(&session))
            .json(&json!({ "orderedListIds": [c, a, b.to_string()] }))
            .await;

        response.assert_status_ok();
        let lists = response.json::<Value>()["lists"].as_array().unwrap().clone();
        let order: Vec<(i64, i64)> = lists
            .iter()
            .map(|l| (l["id"].as_i64().unwrap(), l["position"].as_i64().unwrap()))
            .collect();
        assert_eq!(order, vec![(c, 0), (a, 1), (b, 2)]);
    }

    #[tokio::test]
    async fn test_reorder_rejects_malformed_ids() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let a = id(&create_list(&server, &session, board_id, "A").await);

        let cases = [
            (json!({}), "orderedListIds must be a non-empty array"),
            (json!({ "orderedListIds": [] }), "orderedListIds must be a non-empty array"),
            (json!({ "orderedListIds": [a, "x"] }), "orderedListIds must contain only numbers"),
            (json!({ "orderedListIds": [a, a] }), "orderedListIds must be unique"),
        ];
        for (body, message) in cases {
            let response = server
                .patch(&format!("/boards/{}/lists/reorder", board_id))
                .add_cookie(session_cookie(&session))
                .json(&body)
                .await;
            response.assert_status_bad_request();
            assert_eq!(response.json::<Value>()["message"], message);
        }
    }

    #[tokio::test]
    async fn test_reorder_mismatched_set_changes_nothing() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let a = id(&create_list(&server, &session, board_id, "A").await);
        let b = id(&create_list(&server, &session, board_id, "B").await);
        let other_board = create_board(&server, &session, "Other").await;
        let foreign = id(&create_list(&server, &session, other_board, "X").await);

        for ids in [json!([b]), json!([b, a, foreign]), json!([b, foreign])] {
            server
                .patch(&format!("/boards/{}/lists/reorder", board_id))
                .add_cookie(session_cookie(&session))
                .json(&json!({ "orderedListIds": ids }))
                .await
                .assert_status_not_found();
        }

        let lists: Value = server
            .get(&format!("/boards/{}/lists", board_id))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        let order: Vec<(i64, i64)> = lists["lists"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| (l["id"].as_i64().unwrap(), l["position"].as_i64().unwrap()))
            .collect();
        assert_eq!(order, vec![(a, 0), (b, 1)]);
    }

    #[tokio::test]
    async fn test_rename_list() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let list = create_list(&server, &session, board_id, "Todo").await;

        let response = server
            .put(&format!("/boards/{}/lists/{}", board_id, id(&list)))
            .add_cookie(session_cookie(&session))
            .json(&json!({ "title": " Backlog " }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["list"]["title"], "Backlog");
        assert_eq!(body["list"]["position"], 0);
    }
}

// ============================================================================
// Card Tests
// ============================================================================

mod card_tests {
    use super::*;

    #[tokio::test]
    async fn test_cards_append_sequentially() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let list = id(&create_list(&server, &session, board_id, "Todo").await);

        let first = create_card(&server, &session, board_id, list, "First").await;
        let second = create_card(&server, &session, board_id, list, "Second").await;

        assert_eq!(first["position"], 0);
        assert_eq!(second["position"], 1);
        assert_eq!(first["listId"], list);
        assert_eq!(first["archived"], false);
        assert!(first["description"].is_null());
    }

    #[tokio::test]
    async fn test_update_card_fields() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let list = id(&create_list(&server, &session, board_id, "Todo").await);
        let card = create_card(&server, &session, board_id, list, "Task").await;
        let path = format!("/boards/{}/lists/{}/cards/{}", board_id, list, id(&card));

        let response = server
            .patch(&path)
            .add_cookie(session_cookie(&session))
            .json(&json!({ "description": "Details", "dueDate": "2025-03-01" }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["card"]["title"], "Task");
        assert_eq!(body["card"]["description"], "Details");
        assert!(body["card"]["dueDate"]
            .as_str()
            .unwrap()
            .starts_with("2025-03-01T00:00:00"));

        let cleared: Value = server
            .patch(&path)
            .add_cookie(session_cookie(&session))
            .json(&json!({ "description": null, "dueDate": null }))
            .await
            .json();
        assert!(cleared["card"]["description"].is_null());
        assert!(cleared["card"]["dueDate"].is_null());
        assert_eq!(cleared["card"]["title"], "Task");
    }

    #[tokio::test]
    async fn test_update_card_validation() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let list = id(&create_list(&server, &session, board_id, "Todo").await);
        let card = create_card(&server, &session, board_id, list, "Task").await;
        let path = format!("/boards/{}/lists/{}/cards/{}", board_id, list, id(&card));

        let cases = [
            (json!({}), "title, description, or dueDate is required"),
            (json!({ "title": "  " }), "Title is required"),
            (json!({ "dueDate": "someday" }), "Invalid dueDate"),
        ];
        for (body, message) in cases {
            let response = server
                .patch(&path)
                .add_cookie(session_cookie(&session))
                .json(&body)
                .await;
            response.assert_status_bad_request();
            assert_eq!(response.json::<Value>()["message"], message);
        }
    }

    #[tokio::test]
    async fn test_reorder_cards() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let list = id(&create_list(&server, &session, board_id, "Todo").await);
        let a = id(&create_card(&server, &session, board_id, list, "A").await);
        let b = id(&create_card(&server, &session, board_id, list, "B").await);

        let response = server
            .patch(&format!("/boards/{}/lists/{}/cards/reorder", board_id, list))
            .add_cookie(session_cookie(&session))
            .json(&json!({ "orderedCardIds": [b, a] }))
            .await;

        response.assert_status_ok();
        let cards = response.json::<Value>()["cards"].as_array().unwrap().clone();
        assert_eq!(cards[0]["id"], b);
        assert_eq!(cards[0]["position"], 0);
        assert_eq!(cards[1]["id"], a);
        assert_eq!(cards[1]["position"], 1);
    }

    #[tokio::test]
    async fn test_card_details_include_children() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let list = id(&create_list(&server, &session, board_id, "Todo").await);
        let card = id(&create_card(&server, &session, board_id, list, "Task").await);
        let path = format!("/boards/{}/lists/{}/cards/{}", board_id, list, card);

        server
            .post(&format!("{}/checklist", path))
            .add_cookie(session_cookie(&session))
            .json(&json!({ "text": "Step one" }))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post(&format!("{}/comments", path))
            .add_cookie(session_cookie(&session))
            .json(&json!({ "content": "Looks good" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .get(&path)
            .add_cookie(session_cookie(&session))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["card"]["title"], "Task");
        assert_eq!(body["card"]["labels"], json!([]));
        assert_eq!(body["card"]["checklist"][0]["text"], "Step one");
        assert_eq!(body["card"]["comments"][0]["content"], "Looks good");
    }
}

// ============================================================================
// Move Tests
// ============================================================================

mod move_tests {
    use super::*;

    #[tokio::test]
    async fn test_move_appends_to_target_list() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let todo = id(&create_list(&server, &session, board_id, "Todo").await);
        let done = id(&create_list(&server, &session, board_id, "Done").await);
        let card = id(&create_card(&server, &session, board_id, todo, "Task").await);
        create_card(&server, &session, board_id, done, "Existing 1").await;
        create_card(&server, &session, board_id, done, "Existing 2").await;

        let response = server
            .put(&format!("/boards/{}/lists/{}/cards/{}/move", board_id, todo, card))
            .add_cookie(session_cookie(&session))
            .json(&json!({ "targetListId": done }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["card"]["listId"], done);
        assert_eq!(body["card"]["position"], 2);

        server
            .get(&format!("/boards/{}/lists/{}/cards/{}", board_id, todo, card))
            .add_cookie(session_cookie(&session))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_move_requires_target() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let todo = id(&create_list(&server, &session, board_id, "Todo").await);
        let card = id(&create_card(&server, &session, board_id, todo, "Task").await);

        let response = server
            .put(&format!("/boards/{}/lists/{}/cards/{}/move", board_id, todo, card))
            .add_cookie(session_cookie(&session))
            .json(&json!({}))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["message"], "targetListId is required");
    }

    #[tokio::test]
    async fn test_move_to_list_on_another_board() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let source = create_board(&server, &session, "Source").await;
        let target = create_board(&server, &session, "Target").await;
        let todo = id(&create_list(&server, &session, source, "Todo").await);
        let inbox = id(&create_list(&server, &session, target, "Inbox").await);
        let card = id(&create_card(&server, &session, source, todo, "Task").await);

        let response = server
            .put(&format!(
                "/boards/{}/lists/{}/cards/{}/move-to-list",
                source, todo, card
            ))
            .add_cookie(session_cookie(&session))
            .json(&json!({ "targetBoardId": target, "targetListId": inbox }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["card"]["listId"], inbox);
        assert_eq!(body["card"]["position"], 0);

        let full: Value = server
            .get(&format!("/boards/{}/full", target))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        assert_eq!(full["lists"][0]["cards"][0]["id"], card);
    }

    #[tokio::test]
    async fn test_move_to_another_board_drops_source_labels() {
        let server = setup_server().await;
        let alice = register(&server, "alice@example.com").await;
        let bob = register(&server, "bob@example.com").await;
        let source = create_board(&server, &alice, "Source").await;
        let target = create_board(&server, &alice, "Target").await;
        share_board(&server, &alice, target, "bob@example.com", &bob).await;
        let todo = id(&create_list(&server, &alice, source, "Todo").await);
        let inbox = id(&create_list(&server, &alice, target, "Inbox").await);
        let card = id(&create_card(&server, &alice, source, todo, "Task").await);

        let label = server
            .post(&format!("/boards/{}/labels", source))
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "name": "secret-source-label" }))
            .await;
        label.assert_status(StatusCode::CREATED);
        let label_id = id(&label.json::<Value>()["label"]);

        server
            .put(&format!(
                "/boards/{}/lists/{}/cards/{}/labels",
                source, todo, card
            ))
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "labelIds": [label_id] }))
            .await
            .assert_status_ok();

        server
            .put(&format!(
                "/boards/{}/lists/{}/cards/{}/move-to-list",
                source, todo, card
            ))
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "targetBoardId": target, "targetListId": inbox }))
            .await
            .assert_status_ok();

        let detail = server
            .get(&format!("/boards/{}/lists/{}/cards/{}", target, inbox, card))
            .add_cookie(session_cookie(&bob))
            .await;
        detail.assert_status_ok();
        assert_eq!(detail.json::<Value>()["card"]["labels"], json!([]));

        let full: Value = server
            .get(&format!("/boards/{}/full", target))
            .add_cookie(session_cookie(&bob))
            .await
            .json();
        assert_eq!(full["lists"][0]["cards"][0]["labels"], json!([]));

        // The label stays on the source board.
        let labels: Value = server
            .get(&format!("/boards/{}/labels", source))
            .add_cookie(session_cookie(&alice))
            .await
            .json();
        assert_eq!(labels["labels"][0]["name"], "secret-source-label");
    }

    #[tokio::test]
    async fn test_move_to_list_validation() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let todo = id(&create_list(&server, &session, board_id, "Todo").await);
        let card = id(&create_card(&server, &session, board_id, todo, "Task").await);
        let path = format!(
            "/boards/{}/lists/{}/cards/{}/move-to-list",
            board_id, todo, card
        );

        let missing = server
            .put(&path)
            .add_cookie(session_cookie(&session))
            .json(&json!({ "targetListId": todo }))
            .await;
        missing.assert_status_bad_request();
        assert_eq!(
            missing.json::<Value>()["message"],
            "targetBoardId and targetListId are required"
        );

        let wrong_type = server
            .put(&path)
            .add_cookie(session_cookie(&session))
            .json(&json!({ "targetBoardId": "abc", "targetListId": todo }))
            .await;
        wrong_type.assert_status_bad_request();
        assert_eq!(
            wrong_type.json::<Value>()["message"],
            "targetBoardId and targetListId must be numbers"
        );
    }

    #[tokio::test]
    async fn test_move_to_inaccessible_board_is_not_found() {
        let server = setup_server().await;
        let alice = register(&server, "alice@example.com").await;
        let bob = register(&server, "bob@example.com").await;
        let source = create_board(&server, &alice, "Alice").await;
        let foreign = create_board(&server, &bob, "Bob").await;
        let todo = id(&create_list(&server, &alice, source, "Todo").await);
        let inbox = id(&create_list(&server, &bob, foreign, "Inbox").await);
        let card = id(&create_card(&server, &alice, source, todo, "Task").await);

        let response = server
            .put(&format!(
                "/boards/{}/lists/{}/cards/{}/move-to-list",
                source, todo, card
            ))
            .add_cookie(session_cookie(&alice))
            .json(&json!({ "targetBoardId": foreign, "targetListId": inbox }))
            .await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["message"], "Target board not found");
    }

    #[tokio::test]
    async fn test_move_targets_put_current_board_first() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let first = create_board(&server, &session, "First").await;
        let second = create_board(&server, &session, "Second").await;
        let third = create_board(&server, &session, "Third").await;
        create_list(&server, &session, first, "F1").await;
        create_list(&server, &session, second, "S1").await;
        create_list(&server, &session, second, "S2").await;
        create_list(&server, &session, third, "T1").await;

        let response = server
            .get(&format!("/boards/{}/move-targets", second))
            .add_cookie(session_cookie(&session))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["currentBoardId"], second);
        let titles: Vec<&str> = body["targets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["listTitle"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["S1", "S2", "F1", "T1"]);
        assert_eq!(body["targets"][0]["boardTitle"], "Second");
    }
}

// ============================================================================
// Invite & Member Tests
// ============================================================================

mod invite_tests {
    use super::*;

    #[tokio::test]
    async fn test_invite_rules() {
        let server = setup_server().await;
        let owner = register(&server, "owner@example.com").await;
        register(&server, "guest@example.com").await;
        let board_id = create_board(&server, &owner, "Board").await;
        let path = format!("/boards/{}/invite", board_id);

        server
            .post(&path)
            .add_cookie(session_cookie(&owner))
            .json(&json!({ "email": "owner@example.com" }))
            .await
            .assert_status_bad_request();

        server
            .post(&path)
            .add_cookie(session_cookie(&owner))
            .json(&json!({ "email": "ghost@example.com" }))
            .await
            .assert_status_not_found();

        let first = server
            .post(&path)
            .add_cookie(session_cookie(&owner))
            .json(&json!({ "email": "Guest@Example.com" }))
            .await;
        first.assert_status(StatusCode::CREATED);

        let again = server
            .post(&path)
            .add_cookie(session_cookie(&owner))
            .json(&json!({ "email": "guest@example.com" }))
            .await;
        again.assert_status(StatusCode::CREATED);
        assert_eq!(
            first.json::<Value>()["invite"]["id"],
            again.json::<Value>()["invite"]["id"]
        );
    }

    #[tokio::test]
    async fn test_member_cannot_invite() {
        let server = setup_server().await;
        let owner = register(&server, "owner@example.com").await;
        let member = register(&server, "member@example.com").await;
        register(&server, "third@example.com").await;
        let board_id = create_board(&server, &owner, "Board").await;
        share_board(&server, &owner, board_id, "member@example.com", &member).await;

        server
            .post(&format!("/boards/{}/invite", board_id))
            .add_cookie(session_cookie(&member))
            .json(&json!({ "email": "third@example.com" }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_accept_twice_is_not_found() {
        let server = setup_server().await;
        let owner = register(&server, "owner@example.com").await;
        let guest = register(&server, "guest@example.com").await;
        let board_id = create_board(&server, &owner, "Board").await;

        let invite: Value = server
            .post(&format!("/boards/{}/invite", board_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({ "email": "guest@example.com" }))
            .await
            .json();
        let invite_id = id(&invite["invite"]);

        let accepted = server
            .post(&format!("/boards/invites/{}/accept", invite_id))
            .add_cookie(session_cookie(&guest))
            .await;
        accepted.assert_status_ok();
        assert_eq!(accepted.json::<Value>()["board"]["id"], board_id);

        server
            .post(&format!("/boards/invites/{}/accept", invite_id))
            .add_cookie(session_cookie(&guest))
            .await
            .assert_status_not_found();

        let members: Value = server
            .get(&format!("/boards/{}/members", board_id))
            .add_cookie(session_cookie(&owner))
            .await
            .json();
        assert_eq!(members["members"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_only_invitee_can_accept() {
        let server = setup_server().await;
        let owner = register(&server, "owner@example.com").await;
        register(&server, "guest@example.com").await;
        let intruder = register(&server, "intruder@example.com").await;
        let board_id = create_board(&server, &owner, "Board").await;

        let invite: Value = server
            .post(&format!("/boards/{}/invite", board_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({ "email": "guest@example.com" }))
            .await
            .json();

        server
            .post(&format!("/boards/invites/{}/accept", id(&invite["invite"])))
            .add_cookie(session_cookie(&intruder))
            .await
            .assert_status_not_found();

        server
            .get(&format!("/boards/{}", board_id))
            .add_cookie(session_cookie(&intruder))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_decline_removes_invite() {
        let server = setup_server().await;
        let owner = register(&server, "owner@example.com").await;
        let guest = register(&server, "guest@example.com").await;
        let board_id = create_board(&server, &owner, "Board").await;

        let invite: Value = server
            .post(&format!("/boards/{}/invite", board_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({ "email": "guest@example.com" }))
            .await
            .json();

        server
            .delete(&format!("/boards/invites/{}", id(&invite["invite"])))
            .add_cookie(session_cookie(&guest))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let invites: Value = server
            .get("/boards/invites")
            .add_cookie(session_cookie(&guest))
            .await
            .json();
        assert!(invites["invites"].as_array().unwrap().is_empty());

        server
            .get(&format!("/boards/{}", board_id))
            .add_cookie(session_cookie(&guest))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_remove_member() {
        let server = setup_server().await;
        let owner = register(&server, "owner@example.com").await;
        let member = register(&server, "member@example.com").await;
        let board_id = create_board(&server, &owner, "Board").await;
        share_board(&server, &owner, board_id, "member@example.com", &member).await;

        let members: Value = server
            .get(&format!("/boards/{}/members", board_id))
            .add_cookie(session_cookie(&member))
            .await
            .json();
        let owner_id = members["members"][0]["userId"].as_i64().unwrap();
        let member_id = members["members"][1]["userId"].as_i64().unwrap();

        server
            .delete(&format!("/boards/{}/members/{}", board_id, owner_id))
            .add_cookie(session_cookie(&owner))
            .await
            .assert_status_bad_request();

        server
            .delete(&format!("/boards/{}/members/{}", board_id, member_id))
            .add_cookie(session_cookie(&owner))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/boards/{}", board_id))
            .add_cookie(session_cookie(&member))
            .await
            .assert_status_not_found();

        server
            .delete(&format!("/boards/{}/members/{}", board_id, member_id))
            .add_cookie(session_cookie(&owner))
            .await
            .assert_status_not_found();
    }
}

// ============================================================================
// Label Tests
// ============================================================================

mod label_tests {
    use super::*;

    async fn create_label(server: &TestServer, session: &str, board_id: i64, name: &str) -> i64 {
        let response = server
            .post(&format!("/boards/{}/labels", board_id))
            .add_cookie(session_cookie(session))
            .json(&json!({ "name": name, "color": "#ff0000" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        id(&response.json::<Value>()["label"])
    }

    #[tokio::test]
    async fn test_label_crud() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let label = create_label(&server, &session, board_id, "Bug").await;

        let updated = server
            .put(&format!("/boards/{}/labels/{}", board_id, label))
            .add_cookie(session_cookie(&session))
            .json(&json!({ "color": null }))
            .await;
        updated.assert_status_ok();
        let body: Value = updated.json();
        assert_eq!(body["label"]["name"], "Bug");
        assert!(body["label"]["color"].is_null());

        server
            .delete(&format!("/boards/{}/labels/{}", board_id, label))
            .add_cookie(session_cookie(&session))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let labels: Value = server
            .get(&format!("/boards/{}/labels", board_id))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        assert!(labels["labels"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_card_labels_and_full_view() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let list = id(&create_list(&server, &session, board_id, "Todo").await);
        let card = id(&create_card(&server, &session, board_id, list, "Task").await);
        let bug = create_label(&server, &session, board_id, "Bug").await;
        let ui = create_label(&server, &session, board_id, "UI").await;
        let path = format!("/boards/{}/lists/{}/cards/{}/labels", board_id, list, card);

        let response = server
            .put(&path)
            .add_cookie(session_cookie(&session))
            .json(&json!({ "labelIds": [bug, ui] }))
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["card"]["labels"]
                .as_array()
                .unwrap()
                .len(),
            2
        );

        let full: Value = server
            .get(&format!("/boards/{}/full", board_id))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        let labels = full["lists"][0]["cards"][0]["labels"].as_array().unwrap();
        assert_eq!(labels.len(), 2);

        let cleared: Value = server
            .put(&path)
            .add_cookie(session_cookie(&session))
            .json(&json!({ "labelIds": [] }))
            .await
            .json();
        assert_eq!(cleared["card"]["labels"], json!([]));
    }

    #[tokio::test]
    async fn test_labels_from_other_board_rejected() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let other = create_board(&server, &session, "Other").await;
        let list = id(&create_list(&server, &session, board_id, "Todo").await);
        let card = id(&create_card(&server, &session, board_id, list, "Task").await);
        let own = create_label(&server, &session, board_id, "Own").await;
        let foreign = create_label(&server, &session, other, "Foreign").await;
        let path = format!("/boards/{}/lists/{}/cards/{}/labels", board_id, list, card);

        server
            .put(&path)
            .add_cookie(session_cookie(&session))
            .json(&json!({ "labelIds": [own] }))
            .await
            .assert_status_ok();

        let response = server
            .put(&path)
            .add_cookie(session_cookie(&session))
            .json(&json!({ "labelIds": [own, foreign] }))
            .await;
        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["message"], "Label not found");

        let card: Value = server
            .get(&format!("/boards/{}/lists/{}/cards/{}", board_id, list, card))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        assert_eq!(card["card"]["labels"][0]["id"], own);
        assert_eq!(card["card"]["labels"].as_array().unwrap().len(), 1);
    }
}

// ============================================================================
// Checklist Tests
// ============================================================================

mod checklist_tests {
    use super::*;

    #[tokio::test]
    async fn test_checklist_flow() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let list = id(&create_list(&server, &session, board_id, "Todo").await);
        let card = id(&create_card(&server, &session, board_id, list, "Task").await);
        let base = format!("/boards/{}/lists/{}/cards/{}/checklist", board_id, list, card);

        let mut ids = Vec::new();
        for (index, text) in ["Write", "Review"].iter().enumerate() {
            let response = server
                .post(&base)
                .add_cookie(session_cookie(&session))
                .json(&json!({ "text": text }))
                .await;
            response.assert_status(StatusCode::CREATED);
            let item = response.json::<Value>()["item"].clone();
            assert_eq!(item["position"], index as i64);
            assert_eq!(item["done"], false);
            ids.push(id(&item));
        }

        let toggled = server
            .patch(&format!("{}/{}", base, ids[0]))
            .add_cookie(session_cookie(&session))
            .json(&json!({ "done": true }))
            .await;
        toggled.assert_status_ok();
        let body: Value = toggled.json();
        assert_eq!(body["item"]["done"], true);
        assert_eq!(body["item"]["text"], "Write");

        let reordered: Value = server
            .patch(&format!("{}/reorder", base))
            .add_cookie(session_cookie(&session))
            .json(&json!({ "orderedItemIds": [ids[1], ids[0]] }))
            .await
            .json();
        assert_eq!(reordered["items"][0]["id"], ids[1]);
        assert_eq!(reordered["items"][1]["position"], 1);

        server
            .delete(&format!("{}/{}", base, ids[1]))
            .add_cookie(session_cookie(&session))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let items: Value = server
            .get(&base)
            .add_cookie(session_cookie(&session))
            .await
            .json();
        assert_eq!(items["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_item_needs_a_field() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let list = id(&create_list(&server, &session, board_id, "Todo").await);
        let card = id(&create_card(&server, &session, board_id, list, "Task").await);
        let base = format!("/boards/{}/lists/{}/cards/{}/checklist", board_id, list, card);

        let item: Value = server
            .post(&base)
            .add_cookie(session_cookie(&session))
            .json(&json!({ "text": "Step" }))
            .await
            .json();

        server
            .patch(&format!("{}/{}", base, id(&item["item"])))
            .add_cookie(session_cookie(&session))
            .json(&json!({}))
            .await
            .assert_status_bad_request();
    }
}

// ============================================================================
// Comment Tests
// ============================================================================

mod comment_tests {
    use super::*;

    #[tokio::test]
    async fn test_only_author_can_delete_comment() {
        let server = setup_server().await;
        let owner = register(&server, "owner@example.com").await;
        let member = register(&server, "member@example.com").await;
        let board_id = create_board(&server, &owner, "Board").await;
        share_board(&server, &owner, board_id, "member@example.com", &member).await;
        let list = id(&create_list(&server, &owner, board_id, "Todo").await);
        let card = id(&create_card(&server, &owner, board_id, list, "Task").await);
        let base = format!("/boards/{}/lists/{}/cards/{}/comments", board_id, list, card);

        let response = server
            .post(&base)
            .add_cookie(session_cookie(&owner))
            .json(&json!({ "content": "  Owner's note  " }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let comment = response.json::<Value>()["comment"].clone();
        assert_eq!(comment["content"], "Owner's note");
        assert_eq!(comment["authorEmail"], "owner@example.com");

        let forbidden = server
            .delete(&format!("{}/{}", base, id(&comment)))
            .add_cookie(session_cookie(&member))
            .await;
        forbidden.assert_status_forbidden();
        assert!(forbidden.json::<Value>()["message"].is_string());

        server
            .delete(&format!("{}/{}", base, id(&comment)))
            .add_cookie(session_cookie(&owner))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let comments: Value = server
            .get(&base)
            .add_cookie(session_cookie(&member))
            .await
            .json();
        assert!(comments["comments"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_comment_rejected() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Board").await;
        let list = id(&create_list(&server, &session, board_id, "Todo").await);
        let card = id(&create_card(&server, &session, board_id, list, "Task").await);

        server
            .post(&format!(
                "/boards/{}/lists/{}/cards/{}/comments",
                board_id, list, card
            ))
            .add_cookie(session_cookie(&session))
            .json(&json!({ "content": "   " }))
            .await
            .assert_status_bad_request();
    }
}

// ============================================================================
// Scenarios
// ============================================================================

mod scenario_tests {
    use super::*;

    #[tokio::test]
    async fn test_sprint_board_reorder_scenario() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session, "Sprint").await;

        let todo = create_list(&server, &session, board_id, "Todo").await;
        let doing = create_list(&server, &session, board_id, "Doing").await;
        assert_eq!(todo["position"], 0);
        assert_eq!(doing["position"], 1);

        let card = create_card(&server, &session, board_id, id(&todo), "Fix bug").await;
        assert_eq!(card["position"], 0);

        server
            .patch(&format!("/boards/{}/lists/reorder", board_id))
            .add_cookie(session_cookie(&session))
            .json(&json!({ "orderedListIds": [id(&doing), id(&todo)] }))
            .await
            .assert_status_ok();

        let full: Value = server
            .get(&format!("/boards/{}/full", board_id))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        assert_eq!(full["board"]["title"], "Sprint");

        let lists = full["lists"].as_array().unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0]["title"], "Doing");
        assert_eq!(lists[0]["position"], 0);
        assert_eq!(lists[1]["title"], "Todo");
        assert_eq!(lists[1]["position"], 1);
        assert_eq!(lists[1]["cards"][0]["title"], "Fix bug");
        assert_eq!(lists[1]["cards"][0]["position"], 0);
    }

    #[tokio::test]
    async fn test_invite_accept_scenario() {
        let server = setup_server().await;
        let owner = register(&server, "owner@example.com").await;
        let x = register(&server, "x@example.com").await;
        let board_id = create_board(&server, &owner, "Team").await;

        server
            .post(&format!("/boards/{}/invite", board_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({ "email": "X@example.com" }))
            .await
            .assert_status(StatusCode::CREATED);

        let invites: Value = server
            .get("/boards/invites")
            .add_cookie(session_cookie(&x))
            .await
            .json();
        let invites = invites["invites"].as_array().unwrap();
        assert_eq!(invites.len(), 1);
        assert_eq!(invites[0]["boardId"], board_id);
        assert_eq!(invites[0]["boardTitle"], "Team");
        assert_eq!(invites[0]["inviterEmail"], "owner@example.com");

        server
            .post(&format!("/boards/invites/{}/accept", id(&invites[0])))
            .add_cookie(session_cookie(&x))
            .await
            .assert_status_ok();

        let boards: Value = server
            .get("/boards")
            .add_cookie(session_cookie(&x))
            .await
            .json();
        let boards = boards["boards"].as_array().unwrap();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0]["id"], board_id);
        assert_eq!(boards[0]["role"], "MEMBER");

        let members: Value = server
            .get(&format!("/boards/{}/members", board_id))
            .add_cookie(session_cookie(&owner))
            .await
            .json();
        let members = members["members"].as_array().unwrap();
        assert_eq!(members[0]["isOwner"], true);
        assert_eq!(members[0]["role"], "OWNER");
        let x_entry = members
            .iter()
            .find(|m| m["email"] == "x@example.com")
            .unwrap();
        assert_eq!(x_entry["role"], "MEMBER");
        assert_eq!(x_entry["isOwner"], false);
    }
}
