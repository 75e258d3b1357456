/// Database-backed integration tests for the task routes
///
/// These tests run against the database named by `DATABASE_URL` and skip
/// themselves when it is not set. Each test creates its own organizations
/// and users, so concurrent runs do not interfere.
mod common;

use axum::http::StatusCode;
use serde_json::json;
use taskflow_shared::models::user::Role;

use common::TestContext;

/// Listing 25 tasks at page=1&limit=10 returns the first ten in the order
/// they were created, and the last page holds the remaining five.
#[tokio::test]
async fn test_list_pagination_in_insertion_order() {
    let Some(ctx) = TestContext::new().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };

    let org = ctx.create_org("Pagination Org").await;
    let (_, auth) = ctx.create_user(org.id, Role::Admin).await;

    let mut created_titles = Vec::new();
    for i in 0..25 {
        let title = format!("task-{:02}", i);
        let (status, body) = ctx
            .request("POST", "/tasks", &auth, Some(json!({ "title": title })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "CREATED");
        created_titles.push(title);
    }

    let (status, body) = ctx
        .request("GET", "/tasks?page=1&limit=10", &auth, None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let page = body.as_array().expect("Response should be an array");
    assert_eq!(page.len(), 10);

    let titles: Vec<&str> = page.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, &created_titles[..10]);

    let ids: Vec<i64> = page.iter().map(|t| t["id"].as_i64().unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    let (status, body) = ctx
        .request("GET", "/tasks?page=3&limit=10", &auth, None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let page = body.as_array().expect("Response should be an array");
    assert_eq!(page.len(), 5);

    let titles: Vec<&str> = page.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, &created_titles[20..]);
}

/// Callers from another organization get 404 on a task's id-bearing routes,
/// never 403, and never see the task in their own list.
#[tokio::test]
async fn test_cross_org_task_access_is_not_found() {
    let Some(ctx) = TestContext::new().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };

    let org_a = ctx.create_org("Org A").await;
    let org_b = ctx.create_org("Org B").await;
    let (_, auth_a) = ctx.create_user(org_a.id, Role::Admin).await;
    let (_, admin_b) = ctx.create_user(org_b.id, Role::Admin).await;
    let (_, user_b) = ctx.create_user(org_b.id, Role::User).await;

    let (status, task) = ctx
        .request("POST", "/tasks", &auth_a, Some(json!({ "title": "secret" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let task_id = task["id"].as_i64().unwrap();

    let update = json!({ "status": "IN_PROGRESS" });

    // Admin of the other org: would pass the role check, must still 404
    let (status, body) = ctx
        .request("PUT", &format!("/tasks/{}", task_id), &admin_b, Some(update.clone()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Task not found");

    let (status, _) = ctx
        .request("DELETE", &format!("/tasks/{}", task_id), &admin_b, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Plain user of the other org: 404 as well, not 403, so existence
    // is not leaked through the status code
    let (status, body) = ctx
        .request("PUT", &format!("/tasks/{}", task_id), &user_b, Some(update))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Task not found");

    let (status, body) = ctx.request("GET", "/tasks", &user_b, None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert!(!listed.contains(&task_id));

    // Still visible and untouched in its own organization
    let (status, body) = ctx.request("GET", "/tasks", &auth_a, None).await;
    assert_eq!(status, StatusCode::OK);
    let own = body
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"].as_i64() == Some(task_id))
        .expect("Task should remain in its own organization");
    assert_eq!(own["status"], "CREATED");
}

/// A task walks CREATED -> IN_PROGRESS -> COMPLETED through PUT, with the
/// skip-ahead and the backwards step both rejected as 400.
#[tokio::test]
async fn test_status_lifecycle_over_put() {
    let Some(ctx) = TestContext::new().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };

    let org = ctx.create_org("Lifecycle Org").await;
    let (_, auth) = ctx.create_user(org.id, Role::Admin).await;

    let (status, task) = ctx
        .request("POST", "/tasks", &auth, Some(json!({ "title": "ship it" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["status"], "CREATED");
    let uri = format!("/tasks/{}", task["id"].as_i64().unwrap());

    // Skipping straight to COMPLETED names both states in the error
    let (status, body) = ctx
        .request("PUT", &uri, &auth, Some(json!({ "status": "COMPLETED" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("CREATED"));
    assert!(detail.contains("COMPLETED"));

    let (status, body) = ctx
        .request("PUT", &uri, &auth, Some(json!({ "status": "IN_PROGRESS" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "IN_PROGRESS");

    let (status, body) = ctx
        .request("PUT", &uri, &auth, Some(json!({ "status": "COMPLETED" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "COMPLETED");

    // COMPLETED is terminal; moving backwards is rejected
    let (status, body) = ctx
        .request("PUT", &uri, &auth, Some(json!({ "status": "IN_PROGRESS" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("COMPLETED"));
    assert!(detail.contains("IN_PROGRESS"));
}
