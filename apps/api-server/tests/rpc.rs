mod common;

use actix_web::{App, http::StatusCode, http::header, test};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use api_server::configure_app;
use api_server::observability::RequestIdMiddleware;
use common::{expired_token_for, fixture, seed_post, token_for};

macro_rules! app {
    ($state:expr) => {{
        let state = $state;
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .configure(move |cfg| configure_app(cfg, state)),
        )
        .await
    }};
}

fn create_request(token: Option<&str>, content: &str) -> test::TestRequest {
    let req = test::TestRequest::post()
        .uri("/api/trpc/post.create")
        .set_json(json!({ "content": content }));
    match token {
        Some(t) => req.insert_header((header::AUTHORIZATION, format!("Bearer {t}"))),
        None => req,
    }
}

#[actix_web::test]
async fn test_health_has_request_id() {
    let app = app!(fixture().state);

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
}

#[actix_web::test]
async fn test_create_requires_session() {
    let fx = fixture();
    let posts = fx.posts.clone();
    let app = app!(fx.state);

    let res = test::call_service(&app, create_request(None, "😀").to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "UNAUTHORIZED");

    let expired = expired_token_for("user_alice");
    let res = test::call_service(&app, create_request(Some(&expired), "😀").to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(posts.len().await, 0);
}

#[actix_web::test]
async fn test_create_then_read_back() {
    let app = app!(fixture().state);
    let token = token_for("user_alice");

    let res = test::call_service(&app, create_request(Some(&token), "🦀🔥").to_request()).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["authorId"], "user_alice");
    assert_eq!(body["data"]["content"], "🦀🔥");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/trpc/post.getById?id={id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["post"]["id"], id.as_str());
    assert_eq!(body["data"]["author"]["username"], "alice");
    assert_eq!(body["data"]["author"]["imageUrl"], "https://img.test/user_alice.png");
}

#[actix_web::test]
async fn test_create_validation_errors() {
    let fx = fixture();
    let posts = fx.posts.clone();
    let app = app!(fx.state);
    let token = token_for("user_alice");

    let res = test::call_service(&app, create_request(Some(&token), "hello").to_request()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["fieldErrors"]["content"][0], "Only emojis are allowed.");

    let res = test::call_service(&app, create_request(Some(&token), "").to_request()).await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["fieldErrors"]["content"][0], "Only emojis are allowed.");
    assert_eq!(
        body["fieldErrors"]["content"][1],
        "String must contain at least 1 character(s)"
    );

    let res = test::call_service(&app, create_request(Some(&token), &"a".repeat(281)).to_request()).await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["fieldErrors"]["content"][0], "Only emojis are allowed.");
    assert_eq!(
        body["fieldErrors"]["content"][1],
        "String must contain at most 280 character(s)"
    );

    let long = "😀".repeat(281);
    let res = test::call_service(&app, create_request(Some(&token), &long).to_request()).await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body["fieldErrors"]["content"][0],
        "String must contain at most 280 character(s)"
    );

    assert_eq!(posts.len().await, 0);
}

#[actix_web::test]
async fn test_fourth_create_is_rate_limited() {
    let app = app!(fixture().state);
    let alice = token_for("user_alice");
    let bob = token_for("user_bob");

    for _ in 0..3 {
        let res = test::call_service(&app, create_request(Some(&alice), "😀").to_request()).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = test::call_service(&app, create_request(Some(&alice), "😀").to_request()).await;
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "TOO_MANY_REQUESTS");

    let res = test::call_service(&app, create_request(Some(&bob), "😀").to_request()).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_get_all_newest_first() {
    let fx = fixture();
    let now = Utc::now();
    seed_post(&fx.posts, "user_alice", "1️⃣", now - Duration::minutes(10)).await;
    seed_post(&fx.posts, "user_bob", "3️⃣", now).await;
    seed_post(&fx.posts, "user_alice", "2️⃣", now - Duration::minutes(5)).await;
    let app = app!(fx.state);

    let req = test::TestRequest::get().uri("/api/trpc/post.getAll").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let contents: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["post"]["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["3️⃣", "2️⃣", "1️⃣"]);

    for item in body["data"].as_array().unwrap() {
        assert_eq!(item["author"]["id"], item["post"]["authorId"]);
    }
}

#[actix_web::test]
async fn test_get_all_fails_when_author_missing() {
    let fx = fixture();
    seed_post(&fx.posts, "user_ghost", "👻", Utc::now()).await;
    let app = app!(fx.state);

    let req = test::TestRequest::get().uri("/api/trpc/post.getAll").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
    assert!(body.get("detail").is_none());
}

#[actix_web::test]
async fn test_posts_by_user_filters_author() {
    let fx = fixture();
    let now = Utc::now();
    seed_post(&fx.posts, "user_alice", "🅰️", now).await;
    seed_post(&fx.posts, "user_bob", "🅱️", now).await;
    let app = app!(fx.state);

    let req = test::TestRequest::get()
        .uri("/api/trpc/post.getPostByUserId?userId=user_bob")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["post"]["authorId"], "user_bob");
}

#[actix_web::test]
async fn test_get_by_id_not_found() {
    let app = app!(fixture().state);

    for id in [uuid::Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/trpc/post.getById?id={id}"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["detail"], "Post not found");
    }
}

#[actix_web::test]
async fn test_missing_query_input_is_bad_request() {
    let app = app!(fixture().state);

    let req = test::TestRequest::get().uri("/api/trpc/post.getById").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_profile_lookup() {
    let app = app!(fixture().state);

    let req = test::TestRequest::get()
        .uri("/api/trpc/profile.getUserByUsername?username=alice")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let author = body["data"].as_object().unwrap();
    let mut keys: Vec<&str> = author.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["id", "imageUrl", "username"]);
    assert_eq!(author["id"], "user_alice");

    let req = test::TestRequest::get()
        .uri("/api/trpc/profile.getUserByUsername?username=nobody-exists")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["detail"], "User not found");
}
