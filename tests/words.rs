#[macro_use]
mod common;

use actix_web::test;
use pretty_assertions::assert_eq;
use serde_json::Value;
use uuid::Uuid;
use wordbook::routes::words::{
    CATALOG_EMPTY, CATALOG_PATH, WORD_ADDED, WORD_DELETED, WORD_EDITED, WORD_NOT_FOUND,
};

use common::{follow, get, location, post_form, register_user, test_state};

fn word_form<'a>(word: &'a str, name: &'a str, description: &'a str) -> [(&'static str, &'a str); 3] {
    [
        ("task_word", word),
        ("task_name", name),
        ("task_description", description),
    ]
}

async fn catalog_json<S, B>(app: &S, uri: &str) -> Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let resp = get(app, uri, &[]).await;
    assert_eq!(resp.status(), 200);
    test::read_body_json(resp).await
}

#[actix_rt::test]
async fn test_mutating_routes_require_a_session() {
    let app = test_app!(test_state());
    let id = Uuid::new_v4();

    let cases = vec![
        get(&app, "/add_word", &[]).await,
        post_form(&app, "/add_word", &word_form("Aft", "adv", "Rear"), &[]).await,
        get(&app, &format!("/edit_word/{}", id), &[]).await,
        post_form(
            &app,
            &format!("/edit_word/{}", id),
            &word_form("Aft", "adv", "Rear"),
            &[],
        )
        .await,
        get(&app, &format!("/delete_word/{}", id), &[]).await,
    ];

    for resp in cases {
        assert_eq!(resp.status(), 303);
        assert_eq!(location(&resp), "/login");
    }

    let encoded = get(&app, "/add%5Fword", &[]).await;
    assert_eq!(encoded.status(), 303);
    assert_eq!(location(&encoded), "/login");

    let page = follow(&app, get(&app, "/add_word", &[]).await, &[]).await;
    assert_eq!(page["flash"][0], "Please log in first");

    // Nothing was written.
    let catalog = catalog_json(&app, CATALOG_PATH).await;
    assert_eq!(catalog["entries"], serde_json::json!([]));
}

#[test_log::test(actix_rt::test)]
async fn test_word_crud_flow() {
    let app = test_app!(test_state());
    let session = register_user(&app, "ada", "secret1").await;

    // Add
    let form = get(&app, "/add_word", &[session.clone()]).await;
    assert_eq!(form.status(), 200);

    let resp = post_form(
        &app,
        "/add_word",
        &word_form("Bilge", "noun", "The lowest part of a ship's hull"),
        &[session.clone()],
    )
    .await;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), CATALOG_PATH);
    let page = follow(&app, resp, &[session.clone()]).await;
    assert_eq!(page["view"], "catalog");
    assert_eq!(page["flash"][0], WORD_ADDED);
    assert_eq!(page["user"], "ada");

    let entries = page["entries"].as_array().unwrap().clone();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["task_word"], "Bilge");
    assert_eq!(entries[0]["created_by"], "ada");
    let id = entries[0]["id"].as_str().unwrap().to_string();

    // The root path serves the same catalog.
    let root = catalog_json(&app, "/").await;
    assert_eq!(root["entries"], page["entries"]);

    // Edit form carries the entry and the sorted categories.
    let resp = get(&app, &format!("/edit_word/{}", id), &[session.clone()]).await;
    assert_eq!(resp.status(), 200);
    let edit: Value = test::read_body_json(resp).await;
    assert_eq!(edit["view"], "edit_word");
    assert_eq!(edit["entry"]["task_word"], "Bilge");
    let categories: Vec<&str> = edit["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["category_name"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["Adjective", "Nautical", "Slang"]);

    // Edit as another user: full replace, editor becomes created_by.
    let grace = register_user(&app, "grace", "secret2").await;
    let resp = post_form(
        &app,
        &format!("/edit_word/{}", id),
        &word_form("Bilge water", "phrase", "Foul water in the bilge"),
        &[grace.clone()],
    )
    .await;
    assert_eq!(location(&resp), CATALOG_PATH);
    let page = follow(&app, resp, &[grace.clone()]).await;
    assert_eq!(page["flash"][0], WORD_EDITED);
    let entries = page["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], id.as_str());
    assert_eq!(entries[0]["task_word"], "Bilge water");
    assert_eq!(entries[0]["task_name"], "phrase");
    assert_eq!(entries[0]["task_description"], "Foul water in the bilge");
    assert_eq!(entries[0]["created_by"], "grace");

    // Delete
    let resp = get(&app, &format!("/delete_word/{}", id), &[session.clone()]).await;
    assert_eq!(location(&resp), CATALOG_PATH);
    let page = follow(&app, resp, &[session.clone()]).await;
    assert_eq!(page["flash"][0], WORD_DELETED);
    assert_eq!(page["entries"], serde_json::json!([]));

    // Gone for good.
    let resp = get(&app, &format!("/edit_word/{}", id), &[session.clone()]).await;
    assert_eq!(location(&resp), CATALOG_PATH);
    let page = follow(&app, resp, &[session.clone()]).await;
    assert_eq!(page["flash"][0], WORD_NOT_FOUND);

    let resp = get(&app, &format!("/delete_word/{}", id), &[session]).await;
    let page = follow(&app, resp, &[]).await;
    assert_eq!(page["flash"][0], WORD_NOT_FOUND);
}

#[actix_rt::test]
async fn test_add_word_requires_every_field() {
    let app = test_app!(test_state());
    let session = register_user(&app, "ada", "secret1").await;

    let resp = post_form(
        &app,
        "/add_word",
        &[("task_word", "Aft"), ("task_name", "")],
        &[session.clone()],
    )
    .await;
    assert_eq!(location(&resp), "/add_word");
    let page = follow(&app, resp, &[session]).await;
    assert_eq!(page["flash"][0], "Please fill in: task_description, task_name");

    let catalog = catalog_json(&app, CATALOG_PATH).await;
    assert_eq!(catalog["entries"], serde_json::json!([]));
}

#[actix_rt::test]
async fn test_random_word() {
    let app = test_app!(test_state());

    // Empty catalog: a notice instead of a crash.
    let resp = get(&app, "/random", &[]).await;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), CATALOG_PATH);
    let page = follow(&app, resp, &[]).await;
    assert_eq!(page["flash"][0], CATALOG_EMPTY);

    let session = register_user(&app, "ada", "secret1").await;
    post_form(
        &app,
        "/add_word",
        &word_form("Doubloon", "noun", "A Spanish gold coin"),
        &[session],
    )
    .await;

    let resp = get(&app, "/random", &[]).await;
    assert_eq!(resp.status(), 200);
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["view"], "random");
    assert_eq!(page["entry"]["task_word"], "Doubloon");

    let resp = post_form(&app, "/random", &[], &[]).await;
    assert_eq!(resp.status(), 200);
}

#[actix_rt::test]
async fn test_search() {
    let app = test_app!(test_state());
    let session = register_user(&app, "ada", "secret1").await;
    for (word, description) in [
        ("Doubloon", "A Spanish gold coin"),
        ("Galley", "The kitchen aboard a vessel"),
        ("Aft", "Toward the stern"),
    ] {
        post_form(
            &app,
            "/add_word",
            &word_form(word, "noun", description),
            &[session.clone()],
        )
        .await;
    }

    let page = catalog_json(&app, "/search?query=gold").await;
    let words: Vec<&str> = page["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["task_word"].as_str().unwrap())
        .collect();
    assert_eq!(words, vec!["Doubloon"]);
    assert_eq!(page["query"], "gold");

    let resp = post_form(&app, "/search", &[("query", "KITCHEN stern")], &[]).await;
    assert_eq!(resp.status(), 200);
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["entries"].as_array().unwrap().len(), 2);

    // A blank or absent query lists everything.
    let page = catalog_json(&app, "/search").await;
    assert_eq!(page["entries"].as_array().unwrap().len(), 3);
    let resp = post_form(&app, "/search", &[("query", "  ")], &[]).await;
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["entries"].as_array().unwrap().len(), 3);

    let page = catalog_json(&app, "/search?query=parrot").await;
    assert_eq!(page["entries"], serde_json::json!([]));
}

#[actix_rt::test]
async fn test_malformed_word_id_is_not_found() {
    let app = test_app!(test_state());
    let session = register_user(&app, "ada", "secret1").await;

    let resp = get(&app, "/edit_word/not-a-uuid", &[session]).await;
    assert_eq!(resp.status(), 404);
}
