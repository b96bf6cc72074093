mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn unauthenticated_requests_are_rejected() {
    let app = TestApp::new().await;

    for (method, uri) in [
        (Method::GET, "/api/v1/budgets"),
        (Method::POST, "/api/v1/budgets"),
        (Method::GET, "/api/v1/budgets/does-not-exist"),
        (Method::PATCH, "/api/v1/budgets/does-not-exist"),
        (Method::DELETE, "/api/v1/budgets/does-not-exist"),
        (Method::GET, "/api/v1/categories"),
    ] {
        let (status, body) = app
            .send(method.clone(), uri, None, Some(json!({ "limit": "x" })))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body["code"], 401);
    }

    let (status, _) = app
        .send(Method::GET, "/api/v1/budgets", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_then_retrieve_round_trips() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let food = app.category(&alice, "Food").await;

    let (status, created) = app
        .create_budget(
            &alice,
            json!({ "category": food, "limit": "150.00", "period": "weekly" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = app
        .send(Method::GET, &format!("/api/v1/budgets/{id}"), Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["category"], food);
    assert_eq!(fetched["category_name"], "Food");
    assert_eq!(fetched["period"], "weekly");
    assert_eq!(fetched["limit"], "150.00");
    assert_eq!(fetched["created_at"], created["created_at"]);
    assert!(fetched.get("user").is_none());
    assert!(fetched.get("user_id").is_none());
}

#[tokio::test]
async fn owner_always_comes_from_the_caller() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let (_, bob_profile) = app.send(Method::GET, "/api/v1/auth/me", Some(&bob), None).await;
    let food = app.category(&alice, "Food").await;

    let (status, _) = app
        .create_budget(
            &alice,
            json!({
                "category": food,
                "limit": "10",
                "user": bob_profile["id"],
                "category_name": "Spoofed",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, mine) = app.send(Method::GET, "/api/v1/budgets", Some(&alice), None).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["category_name"], "Food");

    let (_, theirs) = app.send(Method::GET, "/api/v1/budgets", Some(&bob), None).await;
    assert!(theirs.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn period_defaults_to_monthly_and_limit_is_rescaled() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let food = app.category(&alice, "Food").await;

    let (status, created) = app
        .create_budget(&alice, json!({ "category": food, "limit": 25 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["period"], "monthly");
    assert_eq!(created["limit"], "25.00");
}

#[tokio::test]
async fn limit_precision_is_enforced() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let food = app.category(&alice, "Food").await;

    let (status, body) = app
        .create_budget(&alice, json!({ "category": food, "limit": "12345678901.23" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = app
        .create_budget(
            &alice,
            json!({ "category": food, "limit": "1.500", "period": "weekly" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, created) = app
        .create_budget(&alice, json!({ "category": food, "limit": "99999999.99" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["limit"], "99999999.99");
}

#[tokio::test]
async fn malformed_bodies_are_validation_errors() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let food = app.category(&alice, "Food").await;

    let cases = [
        json!({ "limit": "10" }),
        json!({ "category": food }),
        json!({ "category": food, "limit": true }),
        json!({ "category": food, "limit": "10", "period": "daily" }),
        json!({ "category": "no-such-category", "limit": "10" }),
    ];
    for body in cases {
        let (status, _) = app.create_budget(&alice, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    }

    let (status, _) = app
        .send_raw(
            Method::POST,
            "/api/v1/budgets",
            Some(&alice),
            Some("{not json".to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = app.send(Method::GET, "/api/v1/budgets", Some(&alice), None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_triple_conflicts_and_keeps_the_original() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let food = app.category(&alice, "Food").await;

    let (_, first) = app
        .create_budget(&alice, json!({ "category": food, "limit": "100" }))
        .await;
    let (status, body) = app
        .create_budget(
            &alice,
            json!({ "category": food, "limit": "200", "period": "monthly" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);

    let (_, list) = app.send(Method::GET, "/api/v1/budgets", Some(&alice), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0], first);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_of_one_triple_yield_a_single_budget() {
    let app = TestApp::new().await;
    let token = app.user("alice").await;
    let food = app.category(&token, "Food").await;

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let app = app.clone();
            let token = token.clone();
            let body = json!({ "category": food, "limit": "50.00" });
            tokio::spawn(async move { app.create_budget(&token, body).await.0 })
        })
        .collect();

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }
    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let conflicts = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!((created, conflicts), (1, 15), "{statuses:?}");

    let (status, body) = app.send(Method::GET, "/api/v1/budgets", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn other_users_records_are_not_found() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let food = app.category(&alice, "Food").await;
    let (_, budget) = app
        .create_budget(&alice, json!({ "category": food, "limit": "100" }))
        .await;
    let uri = format!("/api/v1/budgets/{}", budget["id"].as_str().unwrap());

    let (status, _) = app.send(Method::GET, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app
        .send(Method::PATCH, &uri, Some(&bob), Some(json!({ "limit": "1" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app
        .send(
            Method::PUT,
            &uri,
            Some(&bob),
            Some(json!({ "category": food, "limit": "1" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, unchanged) = app.send(Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged, budget);
}

#[tokio::test]
async fn put_requires_fields_and_patch_keeps_omitted_ones() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let food = app.category(&alice, "Food").await;
    let (_, budget) = app
        .create_budget(
            &alice,
            json!({ "category": food, "limit": "100", "period": "yearly" }),
        )
        .await;
    let uri = format!("/api/v1/budgets/{}", budget["id"].as_str().unwrap());

    let (status, _) = app
        .send(Method::PUT, &uri, Some(&alice), Some(json!({ "limit": "5" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, patched) = app
        .send(Method::PATCH, &uri, Some(&alice), Some(json!({ "limit": "75.5" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["limit"], "75.50");
    assert_eq!(patched["period"], "yearly");
    assert_eq!(patched["category"], food);
    assert_eq!(patched["created_at"], budget["created_at"]);

    let (status, replaced) = app
        .send(
            Method::PUT,
            &uri,
            Some(&alice),
            Some(json!({ "category": food, "limit": "80", "period": "weekly" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["limit"], "80.00");
    assert_eq!(replaced["period"], "weekly");
}

#[tokio::test]
async fn update_into_existing_triple_conflicts() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let food = app.category(&alice, "Food").await;
    let rent = app.category(&alice, "Rent").await;
    app.create_budget(&alice, json!({ "category": food, "limit": "100" }))
        .await;
    let (_, rent_budget) = app
        .create_budget(&alice, json!({ "category": rent, "limit": "900" }))
        .await;
    let uri = format!("/api/v1/budgets/{}", rent_budget["id"].as_str().unwrap());

    let (status, _) = app
        .send(Method::PATCH, &uri, Some(&alice), Some(json!({ "category": food })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, unchanged) = app.send(Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(unchanged, rent_budget);
}

#[tokio::test]
async fn delete_removes_the_budget() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let food = app.category(&alice, "Food").await;
    let (_, budget) = app
        .create_budget(&alice, json!({ "category": food, "limit": "100" }))
        .await;
    let uri = format!("/api/v1/budgets/{}/", budget["id"].as_str().unwrap());

    let (status, body) = app.send(Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.send(Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trailing_slash_aliases_are_served() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let food = app.category(&alice, "Food").await;

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/budgets/",
            Some(&alice),
            Some(json!({ "category": food, "limit": "1" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, list) = app.send(Method::GET, "/api/v1/budgets/", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_a_category_cascades_to_every_budget_on_it() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let food = app.category(&alice, "Food").await;

    // Category ownership is not checked, so bob may budget against alice's category.
    app.create_budget(&alice, json!({ "category": food, "limit": "100" }))
        .await;
    let (status, _) = app
        .create_budget(&bob, json!({ "category": food, "limit": "50" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/v1/categories/{food}"),
            Some(&bob),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/v1/categories/{food}"),
            Some(&alice),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    for token in [&alice, &bob] {
        let (_, list) = app.send(Method::GET, "/api/v1/budgets", Some(token), None).await;
        assert!(list.as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn deleting_a_user_cascades_to_their_budgets() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let food = app.category(&alice, "Food").await;
    let bobs_food = app.category(&bob, "Food").await;
    app.create_budget(&alice, json!({ "category": food, "limit": "100" }))
        .await;
    app.create_budget(&bob, json!({ "category": food, "limit": "10" }))
        .await;
    app.create_budget(&bob, json!({ "category": bobs_food, "limit": "20" }))
        .await;

    let (status, _) = app.send(Method::DELETE, "/api/v1/auth/me", Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // alice's category went with her, taking bob's budget on it along.
    let (_, list) = app.send(Method::GET, "/api/v1/budgets", Some(&bob), None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["category"], bobs_food);

    // A fresh account with the same name starts empty.
    let alice_again = app.user("alice").await;
    let (_, list) = app
        .send(Method::GET, "/api/v1/budgets", Some(&alice_again), None)
        .await;
    assert!(list.as_array().unwrap().is_empty());
}
