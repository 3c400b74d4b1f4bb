use serde_json::json;
use uuid::Uuid;

use crate::helpers::{json_body, spawn_app, titles};

#[tokio::test]
async fn list_is_ordered_by_title_and_paginated_by_two() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;
    let author = app.create_author("Leo Tolstoy").await;

    for title in ["Charlie", "Alpha", "Bravo"] {
        app.publish_ok("articles", &editor.token, title, author, 1).await;
    }

    let first = json_body(app.get("/api/articles", None).await).await;
    assert_eq!(titles(&first), vec!["Alpha", "Bravo"]);
    assert_eq!(first["data"]["meta"]["total"], 3);
    assert_eq!(first["data"]["meta"]["limit"], 2);
    assert_eq!(first["data"]["meta"]["total_pages"], 2);

    let second = json_body(app.get("/api/articles?page=2", None).await).await;
    assert_eq!(titles(&second), vec!["Charlie"]);
    assert_eq!(second["data"]["meta"]["page"], 2);

    let past_end = app.get("/api/articles?page=3", None).await;
    assert_eq!(past_end.status().as_u16(), 404);
}

#[tokio::test]
async fn empty_list_still_serves_first_page() {
    let app = spawn_app().await;

    let response = app.get("/api/articles", None).await;

    assert_eq!(response.status().as_u16(), 200);
    let body = json_body(response).await;
    assert!(titles(&body).is_empty());
    assert_eq!(body["data"]["meta"]["total"], 0);
}

#[tokio::test]
async fn filters_combine_title_author_and_rating() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;
    let tolstoy = app.create_author("Leo Tolstoy").await;
    let chekhov = app.create_author("Anton Chekhov").await;

    app.publish_ok("articles", &editor.token, "War and Peace", tolstoy, 9).await;
    app.publish_ok("articles", &editor.token, "Peace Talks", chekhov, 3).await;
    app.publish_ok("articles", &editor.token, "The Seagull", chekhov, 8).await;

    let by_title = json_body(app.get("/api/articles?title=PEACE", None).await).await;
    assert_eq!(titles(&by_title), vec!["Peace Talks", "War and Peace"]);

    let by_author = json_body(app.get("/api/articles?author=chekhov", None).await).await;
    assert_eq!(titles(&by_author), vec!["Peace Talks", "The Seagull"]);
    assert_eq!(by_author["data"]["filters"]["author"], "chekhov");

    let by_rating = json_body(app.get("/api/articles?rating_gt=8", None).await).await;
    assert_eq!(titles(&by_rating), vec!["War and Peace"]);

    let combined = json_body(app.get("/api/articles/search?title=peace&author=anton&rating_gt=1", None).await).await;
    assert_eq!(titles(&combined), vec!["Peace Talks"]);
    assert_eq!(combined["code"], "ARTICLES_SEARCHED");
}

#[tokio::test]
async fn like_wildcards_in_filters_match_literally() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;
    let author = app.create_author("Leo Tolstoy").await;
    app.publish_ok("articles", &editor.token, "War and Peace", author, 1).await;
    app.publish_ok("articles", &editor.token, "100% Growth", author, 1).await;

    let percent = json_body(app.get_query("/api/articles", &[("title", "%")]).await).await;
    assert_eq!(titles(&percent), vec!["100% Growth"]);

    let underscore = json_body(app.get_query("/api/articles/search", &[("title", "_")]).await).await;
    assert!(titles(&underscore).is_empty());

    let author_wildcard = json_body(app.get_query("/api/articles", &[("author", "%")]).await).await;
    assert!(titles(&author_wildcard).is_empty());
}

#[tokio::test]
async fn cyrillic_author_filter_matches_stored_name() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;
    let tolstoy = app.create_author("Лев Толстой").await;
    let chekhov = app.create_author("Антон Чехов").await;
    app.publish_ok("articles", &editor.token, "Война и мир", tolstoy, 5).await;
    app.publish_ok("articles", &editor.token, "Чайка", chekhov, 5).await;

    let body = json_body(app.get_query("/api/articles", &[("author", "Толстой")]).await).await;
    assert_eq!(titles(&body), vec!["Война и мир"]);

    let by_title = json_body(app.get_query("/api/articles/search", &[("title", "мир")]).await).await;
    assert_eq!(titles(&by_title), vec!["Война и мир"]);
}

#[tokio::test]
async fn detail_includes_author_and_server_time() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;
    let author = app.create_author("Leo Tolstoy").await;
    let id = app.publish_ok("articles", &editor.token, "Anna Karenina", author, 5).await;

    let response = app.get(&format!("/api/articles/{}", id), None).await;

    assert_eq!(response.status().as_u16(), 200);
    let body = json_body(response).await;
    assert_eq!(body["data"]["title"], "Anna Karenina");
    assert_eq!(body["data"]["category"], "article");
    assert_eq!(body["data"]["author"]["name"], "Leo Tolstoy");
    assert!(body["data"]["time_now"].is_string());
}

#[tokio::test]
async fn detail_of_unknown_article_is_404() {
    let app = spawn_app().await;

    let response = app.get(&format!("/api/articles/{}", Uuid::now_v7()), None).await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(json_body(response).await["code"], "ARTICLE_NOT_FOUND");
}

#[tokio::test]
async fn malformed_id_is_answered_with_the_envelope() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;

    let response = app.get("/api/articles/not-a-uuid", None).await;
    assert_eq!(response.status().as_u16(), 400);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], "INVALID_ID");

    let response = app
        .put_json("/api/articles/42/edit", Some(&editor.token), &json!({"rating": 1}))
        .await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(json_body(response).await["code"], "INVALID_ID");
}

#[tokio::test]
async fn malformed_filter_is_answered_with_the_envelope() {
    let app = spawn_app().await;

    for path in ["/api/articles", "/api/articles/search", "/api/news"] {
        let response = app.get_query(path, &[("rating_gt", "abc")]).await;
        assert_eq!(response.status().as_u16(), 400, "{}", path);
        assert_eq!(json_body(response).await["code"], "INVALID_QUERY", "{}", path);
    }
}

#[tokio::test]
async fn create_without_token_is_401() {
    let app = spawn_app().await;
    let author = app.create_author("Leo Tolstoy").await;

    let response = app
        .post_json(
            "/api/articles/create",
            None,
            &json!({"title": "T", "text": "B", "rating": 1, "author_id": author}),
        )
        .await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(json_body(response).await["code"], "AUTH_MISSING");
}

#[tokio::test]
async fn create_with_garbage_token_is_401() {
    let app = spawn_app().await;

    let response = app.post_json("/api/articles/create", Some("not-a-jwt"), &json!({})).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn create_without_permission_is_403_even_for_invalid_payload() {
    let app = spawn_app().await;
    let reader = app.create_user("reader", None).await;
    let author = app.create_author("Leo Tolstoy").await;

    let valid = app.publish("articles", &reader.token, "Title", author, 1).await;
    assert_eq!(valid.status().as_u16(), 403);
    assert_eq!(json_body(valid).await["message"], "Missing permission add_article");

    let invalid = app.post_json("/api/articles/create", Some(&reader.token), &json!({"rating": -5})).await;
    assert_eq!(invalid.status().as_u16(), 403);
}

#[tokio::test]
async fn negative_rating_is_rejected() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;
    let author = app.create_author("Leo Tolstoy").await;

    let response = app.publish("articles", &editor.token, "Minus", author, -1).await;

    assert_eq!(response.status().as_u16(), 400);
    let body = json_body(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["data"][0]["field"], "rating");
}

#[tokio::test]
async fn missing_title_and_text_are_reported_per_field() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;
    let author = app.create_author("Leo Tolstoy").await;

    let response = app
        .post_json(
            "/api/articles/create",
            Some(&editor.token),
            &json!({"title": "  ", "rating": 0, "author_id": author}),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body = json_body(response).await;
    let fields: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["text", "title"]);
}

#[tokio::test]
async fn unknown_author_is_rejected() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;

    let response = app.publish("articles", &editor.token, "Orphan", Uuid::now_v7(), 1).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(json_body(response).await["code"], "AUTHOR_NOT_FOUND");
}

#[tokio::test]
async fn duplicate_title_is_rejected_within_kind_only() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;
    let author = app.create_author("Leo Tolstoy").await;
    app.publish_ok("articles", &editor.token, "Resurrection", author, 1).await;

    let again = app.publish("articles", &editor.token, "Resurrection", author, 2).await;
    assert_eq!(again.status().as_u16(), 400);
    assert_eq!(json_body(again).await["code"], "VALIDATION_ERROR");

    let as_news = app.publish("news", &editor.token, "Resurrection", author, 2).await;
    assert_eq!(as_news.status().as_u16(), 201);
}

#[tokio::test]
async fn update_is_partial_and_checks_title_against_others() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;
    let author = app.create_author("Leo Tolstoy").await;
    let first = app.publish_ok("articles", &editor.token, "First", author, 1).await;
    app.publish_ok("articles", &editor.token, "Second", author, 1).await;

    let created = json_body(app.get(&format!("/api/articles/{}", first), None).await).await;

    // Keeping its own title is not a conflict
    let same_title = app
        .put_json(
            &format!("/api/articles/{}/edit", first),
            Some(&editor.token),
            &json!({"title": "First", "rating": 7}),
        )
        .await;
    assert_eq!(same_title.status().as_u16(), 200);
    let updated = json_body(same_title).await;
    assert_eq!(updated["data"]["rating"], 7);
    assert_eq!(updated["data"]["text"], "Body of First");
    assert_eq!(updated["data"]["date_creation"], created["data"]["date_creation"]);
    assert_ne!(updated["data"]["added_at"], created["data"]["added_at"]);

    let taken = app
        .put_json(
            &format!("/api/articles/{}/edit", first),
            Some(&editor.token),
            &json!({"title": "Second"}),
        )
        .await;
    assert_eq!(taken.status().as_u16(), 400);
}

#[tokio::test]
async fn update_of_unknown_article_is_404() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;

    let response = app
        .put_json(
            &format!("/api/articles/{}/edit", Uuid::now_v7()),
            Some(&editor.token),
            &json!({"rating": 1}),
        )
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn delete_answers_with_list_location() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;
    let author = app.create_author("Leo Tolstoy").await;
    let id = app.publish_ok("articles", &editor.token, "Doomed", author, 1).await;

    let response = app.delete(&format!("/api/articles/{}/delete", id), Some(&editor.token)).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(json_body(response).await["data"]["redirect_to"], "/api/articles");

    let gone = app.get(&format!("/api/articles/{}", id), None).await;
    assert_eq!(gone.status().as_u16(), 404);

    let again = app.delete(&format!("/api/articles/{}/delete", id), Some(&editor.token)).await;
    assert_eq!(again.status().as_u16(), 404);
}

#[tokio::test]
async fn delete_requires_delete_permission() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;
    let reader = app.create_user("reader", None).await;
    let author = app.create_author("Leo Tolstoy").await;
    let id = app.publish_ok("articles", &editor.token, "Sturdy", author, 1).await;

    let response = app.delete(&format!("/api/articles/{}/delete", id), Some(&reader.token)).await;

    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(app.get(&format!("/api/articles/{}", id), None).await.status().as_u16(), 200);
}
