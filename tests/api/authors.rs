use serde_json::json;

use crate::helpers::{json_body, spawn_app};

#[tokio::test]
async fn authors_are_listed_by_name_without_login() {
    let app = spawn_app().await;
    app.create_author("Leo Tolstoy").await;
    app.create_author("Anton Chekhov").await;

    let body = json_body(app.get("/api/authors", None).await).await;

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Anton Chekhov", "Leo Tolstoy"]);
}

#[tokio::test]
async fn creating_an_author_requires_add_author() {
    let app = spawn_app().await;
    let reader = app.create_user("reader", None).await;
    let editor = app.create_user("editor", Some("editor")).await;

    let denied = app
        .post_json("/api/authors/create", Some(&reader.token), &json!({"name": "Ivan Bunin"}))
        .await;
    assert_eq!(denied.status().as_u16(), 403);

    let created = app
        .post_json("/api/authors/create", Some(&editor.token), &json!({"name": " Ivan Bunin "}))
        .await;
    assert_eq!(created.status().as_u16(), 201);
    assert_eq!(json_body(created).await["data"]["name"], "Ivan Bunin");

    let duplicate = app
        .post_json("/api/authors/create", Some(&editor.token), &json!({"name": "Ivan Bunin"}))
        .await;
    assert_eq!(duplicate.status().as_u16(), 400);
}

#[tokio::test]
async fn blank_author_name_is_rejected() {
    let app = spawn_app().await;
    let editor = app.create_user("editor", Some("editor")).await;

    let response = app
        .post_json("/api/authors/create", Some(&editor.token), &json!({"name": ""}))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(json_body(response).await["code"], "VALIDATION_ERROR");
}
