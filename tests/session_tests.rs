mod common;

use axum::http::StatusCode;
use common::{body_text, capture_logs, location, session_cookie, TestApp};
use rstest::rstest;
use serde_json::json;
use tasklist_server::task::{NewTask, Task};

#[tokio::test]
async fn signup_starts_a_session_and_opens_the_task_page() {
    let app = TestApp::new();

    let response = app
        .form("/signup/", "username=carla&password1=s3cret-pass&password2=s3cret-pass", None)
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/tasks/"));
    let cookie = session_cookie(&response).expect("signup sets a session cookie");
    assert!(cookie.starts_with("sessionid="));

    let stored = app.state.data_context.get_user_by_username("carla").unwrap().unwrap();
    assert!(stored.is_staff);
    assert!(!stored.is_superuser);

    let page = app.get("/tasks/", Some(&cookie)).await;
    assert_eq!(page.status(), StatusCode::OK);
    let html = body_text(page).await;
    assert!(html.contains("carla's tasks"));
    assert!(html.contains("data-api=\"/api/\""));

    let (status, task) = app
        .json("POST", "/api/", Some(&cookie), Some(json!({ "title": "First" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["owner"], "carla");
}

#[rstest]
#[case(
    "username=carla&password1=s3cret-pass&password2=other-pass",
    "The two password fields didn’t match."
)]
#[case("username=carla&password1=short&password2=short", "at least 8 characters")]
#[case("username=carla&password1=12345678901&password2=12345678901", "entirely numeric")]
#[case("username=&password1=s3cret-pass&password2=s3cret-pass", "This field is required.")]
#[tokio::test]
async fn invalid_signup_rerenders_the_form(#[case] body: &str, #[case] message: &str) {
    let app = TestApp::new();

    let response = app.form("/signup/", body, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(session_cookie(&response).is_none());
    let html = body_text(response).await;
    assert!(html.contains(message), "missing {message:?} in {html}");
    assert!(app.state.data_context.list_users().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = TestApp::new();
    app.user_with_password("carla", "s3cret-pass", false);

    let response = app
        .form("/signup/", "username=carla&password1=an0ther-pass&password2=an0ther-pass", None)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("A user with that username already exists."));
    assert_eq!(app.state.data_context.list_users().unwrap().len(), 1);
}

#[rstest]
#[case("/tasks/")]
#[case("/admin/")]
#[tokio::test]
async fn protected_pages_redirect_to_login(#[case] uri: &str) {
    let app = TestApp::new();

    let response = app.get(uri, None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login/"));
}

#[rstest]
#[case("/login/", false, "/tasks/")]
#[case("/login/", true, "/admin/")]
#[case("/admin/login/", true, "/admin/")]
#[tokio::test]
async fn login_redirects_by_role(#[case] uri: &str, #[case] superuser: bool, #[case] destination: &str) {
    let app = TestApp::new();
    app.user_with_password("dana", "s3cret-pass", superuser);

    let response = app.form(uri, "username=dana&password=s3cret-pass", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some(destination));
    let cookie = session_cookie(&response).unwrap();
    assert_eq!(app.get(destination, Some(&cookie)).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_logs_role_and_destination() {
    let app = TestApp::new();
    app.user_with_password("root", "s3cret-pass", true);
    app.user_with_password("dana", "s3cret-pass", false);
    let (logs, _guard) = capture_logs();

    app.form("/login/", "username=root&password=s3cret-pass", None).await;
    app.form("/login/", "username=dana&password=s3cret-pass", None).await;

    let superuser = logs.lines_with("superuser logged in");
    assert_eq!(superuser.len(), 1);
    assert!(superuser[0].contains("actor=root"));
    assert!(superuser[0].contains("/admin/"));

    let standard = logs.lines_with(" user logged in");
    assert_eq!(standard.len(), 1);
    assert!(standard[0].contains("actor=dana"));
    assert!(standard[0].contains("/tasks/"));
}

#[rstest]
#[case("username=dana&password=wrong-pass")]
#[case("username=nobody&password=s3cret-pass")]
#[tokio::test]
async fn failed_login_shows_an_error(#[case] body: &str) {
    let app = TestApp::new();
    app.user_with_password("dana", "s3cret-pass", false);

    let response = app.form("/login/", body, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    assert!(body_text(response).await.contains("Please enter a correct username and password."));
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = TestApp::new();
    let user = app.user("erin");
    let cookie = app.cookie_for(&user);
    let (status, _) = app.json("GET", "/api/", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    let response = app.form("/logout/", "", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login/"));
    assert_eq!(session_cookie(&response).as_deref(), Some("sessionid="));

    let (status, body) = app.json("GET", "/api/", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Authentication credentials were not provided.");
}

#[tokio::test]
async fn home_page_reflects_the_session() {
    let app = TestApp::new();
    let user = app.user("erin");

    let anonymous = body_text(app.get("/", None).await).await;
    assert!(anonymous.contains("href=\"/login/\""));

    let cookie = app.cookie_for(&user);
    let signed_in = body_text(app.get("/", Some(&cookie)).await).await;
    assert!(signed_in.contains("Signed in as erin."));
}

#[tokio::test]
async fn admin_listing_is_for_superusers_only() {
    let app = TestApp::new();
    let staff = app.user("frank");
    let admin = app.user_with_password("root", "s3cret-pass", true);
    for (owner, title) in [(&staff, "Frank's errand"), (&admin, "Root's chore")] {
        let task = Task::new(
            owner.id,
            NewTask {
                title: title.to_string(),
                description: String::new(),
            },
        );
        app.state.data_context.create_task(&task).unwrap();
    }

    let denied = app.get("/admin/", Some(&app.cookie_for(&staff))).await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let admin_cookie = app.cookie_for(&admin);
    let listing = app.get("/admin/", Some(&admin_cookie)).await;
    assert_eq!(listing.status(), StatusCode::OK);
    let html = body_text(listing).await;
    assert!(html.contains("Frank&#x27;s errand") || html.contains("Frank's errand"));
    assert!(html.contains("Root"));
    assert!(html.contains("2 task(s)"));

    let filtered = body_text(app.get("/admin/?owner=frank", Some(&admin_cookie)).await).await;
    assert!(filtered.contains("1 task(s)"));
    assert!(filtered.contains("name=\"owner\" value=\"frank\""));
    assert!(!filtered.contains("chore"));
}
