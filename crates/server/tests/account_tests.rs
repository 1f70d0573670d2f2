//! # Account Flow Tests
//!
//! Registration, sign-in, sign-out and profile management through the
//! form-encoded `/account` routes.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{
    body_json,
    cookie_pair,
    form_request,
    json_request,
    location,
    register,
    send,
    test_app,
    TEST_PASSWORD,
};
use entity::{app_users, AppUsers, UserSessions};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

fn login_body(email: &str, password: &str, remember_me: bool) -> String {
    let mut body = format!("email={}&password={}", email.replace('@', "%40"), password);
    if remember_me {
        body.push_str("&remember_me=on");
    }
    body
}

#[tokio::test]
async fn test_register_signs_in_and_redirects_home() {
    let (app, state) = test_app().await;

    let body = format!(
        "email=ann%40example.com&user_name=ann&name=Ann&department=Hr&password={0}&confirm_password={0}",
        TEST_PASSWORD
    );
    let response = send(&app, form_request("/account/register", &body, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/"));

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("portfolio_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(!set_cookie.contains("Max-Age"));

    let user = AppUsers::find()
        .filter(app_users::Column::NormalizedEmail.eq("ANN@EXAMPLE.COM"))
        .one(&state.db)
        .await
        .unwrap()
        .expect("user stored");
    assert_eq!(user.user_name, "ann@example.com");
    assert_ne!(user.password_hash, TEST_PASSWORD);

    let cookie = cookie_pair(&response).unwrap();
    let response = send(&app, json_request(Method::GET, "/account/profile", None, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = body_json(response).await;
    assert_eq!(profile["email"], "ann@example.com");
    assert_eq!(profile["department"], "Hr");
}

#[tokio::test]
async fn test_register_form_errors_are_returned_as_json() {
    let (app, _) = test_app().await;

    let body = "email=bad&user_name=&name=Ann&department=Hr&password=CorrectHorse42Battery&confirm_password=other";
    let response = send(&app, form_request("/account/register", body, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    let errors: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e.as_str())
        .collect();
    assert!(errors.contains(&"Invalid email address."));
    assert!(errors.contains(&"Username is required."));
    assert!(errors.contains(&"Passwords do not match."));
}

#[tokio::test]
async fn test_register_rejects_whitespace_only_name() {
    let (app, state) = test_app().await;

    let body = format!(
        "email=ann%40example.com&user_name=+++&name=+++&department=Hr&password={0}&confirm_password={0}",
        TEST_PASSWORD
    );
    let response = send(&app, form_request("/account/register", &body, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["errors"][0], "Name is required.");
    assert_eq!(json["errors"][1], "Username is required.");
    assert!(AppUsers::find().all(&state.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_accepts_pascal_case_form_fields() {
    let (app, _) = test_app().await;

    let body = format!(
        "Email=ann%40example.com&UserName=ann&Name=Ann&Department=Hr&Password={0}&ConfirmPassword={0}",
        TEST_PASSWORD
    );
    let response = send(&app, form_request("/account/register", &body, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(cookie_pair(&response).is_some());
}

#[tokio::test]
async fn test_register_rejects_weak_password_and_duplicate_email() {
    let (app, _) = test_app().await;

    let body = "email=ann%40example.com&user_name=ann&name=Ann&department=Hr&password=short&confirm_password=short";
    let response = send(&app, form_request("/account/register", body, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], false);

    register(&app, "ann@example.com").await;

    let body = format!(
        "email=ANN%40example.com&user_name=ann&name=Ann&department=Hr&password={0}&confirm_password={0}",
        TEST_PASSWORD
    );
    let response = send(&app, form_request("/account/register", &body, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0], "Email 'ANN@example.com' is already taken.");
}

#[tokio::test]
async fn test_login_redirects_only_to_local_urls() {
    let (app, _) = test_app().await;
    register(&app, "ann@example.com").await;

    let body = login_body("ann@example.com", TEST_PASSWORD, false);
    let response = send(&app, form_request("/account/login?returnUrl=%2Faccount%2Fsettings", &body, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/account/settings"));

    let response = send(&app, form_request("/account/login?returnUrl=~%2Fdashboard", &body, None)).await;
    assert_eq!(location(&response).as_deref(), Some("/dashboard"));

    for target in ["https%3A%2F%2Fevil.example", "%2F%2Fevil.example", "%2F%5Cevil.example"] {
        let uri = format!("/account/login?returnUrl={}", target);
        let response = send(&app, form_request(&uri, &body, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response).as_deref(), Some("/"), "{target}");
    }
}

#[tokio::test]
async fn test_login_failure_is_a_form_error() {
    let (app, _) = test_app().await;
    register(&app, "ann@example.com").await;

    for body in [
        login_body("ann@example.com", "WrongPassword99", false),
        login_body("nobody@example.com", TEST_PASSWORD, false),
    ] {
        let response = send(&app, form_request("/account/login", &body, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let json = body_json(response).await;
        assert_eq!(json["errors"][0], "Invalid login attempt.");
    }
}

#[tokio::test]
async fn test_remember_me_sets_persistent_cookie() {
    let (app, state) = test_app().await;
    register(&app, "ann@example.com").await;

    let body = login_body("ann@example.com", TEST_PASSWORD, true);
    let response = send(&app, form_request("/account/login", &body, None)).await;
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.contains(&format!(
        "Max-Age={}",
        state.session_config.persistent_expiration_seconds
    )));

    let persistent = UserSessions::find().all(&state.db).await.unwrap();
    assert!(persistent.iter().any(|session| session.persistent));
}

#[tokio::test]
async fn test_logout_revokes_the_session() {
    let (app, _) = test_app().await;
    let cookie = register(&app, "ann@example.com").await;

    let response = send(&app, form_request("/account/logout", "", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/"));
    let expired = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(expired.contains("Max-Age=0"));

    let response = send(&app, json_request(Method::GET, "/api/dashboard", None, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, form_request("/account/logout", "", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_account_pages_redirect_to_login() {
    let (app, _) = test_app().await;

    let response = send(&app, json_request(Method::GET, "/account/settings", None, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response).as_deref(),
        Some("/account/login?returnUrl=%2Faccount%2Fsettings")
    );
}

#[tokio::test]
async fn test_settings_update_moves_normalized_email() {
    let (app, state) = test_app().await;
    let cookie = register(&app, "ann@example.com").await;

    let body = "name=Ann+Smith&email=ann.smith%40example.com&department=Marketing";
    let response = send(&app, form_request("/account/settings", body, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/account/profile"));

    let user = AppUsers::find()
        .filter(app_users::Column::NormalizedEmail.eq("ANN.SMITH@EXAMPLE.COM"))
        .one(&state.db)
        .await
        .unwrap()
        .expect("user moved to new email");
    assert_eq!(user.normalized_user_name, "ANN.SMITH@EXAMPLE.COM");
    assert_eq!(user.user_name, "ann.smith@example.com");
    assert_eq!(user.name, "Ann Smith");

    let response = send(&app, json_request(Method::GET, "/account/settings", None, Some(&cookie))).await;
    let settings = body_json(response).await;
    assert_eq!(settings["department"], "Marketing");

    let body = login_body("ann.smith@example.com", TEST_PASSWORD, false);
    let response = send(&app, form_request("/account/login", &body, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_settings_rejects_email_of_another_account() {
    let (app, _) = test_app().await;
    register(&app, "bob@example.com").await;
    let cookie = register(&app, "ann@example.com").await;

    let body = "name=Ann&email=BOB%40example.com&department=Hr";
    let response = send(&app, form_request("/account/settings", body, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn test_change_password_signs_out_other_sessions() {
    let (app, _) = test_app().await;
    let first = register(&app, "ann@example.com").await;

    let body = login_body("ann@example.com", TEST_PASSWORD, false);
    let response = send(&app, form_request("/account/login", &body, None)).await;
    let second = cookie_pair(&response).unwrap();

    let new_password = "BrandNewSecret77";
    let body = format!(
        "current_password=WrongPassword1&new_password={0}&confirm_password={0}",
        new_password
    );
    let response = send(&app, form_request("/account/changepassword", &body, Some(&first))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["errors"][0], "Incorrect password.");

    let body = format!(
        "current_password={1}&new_password={0}&confirm_password={0}",
        new_password, TEST_PASSWORD
    );
    let response = send(&app, form_request("/account/changepassword", &body, Some(&first))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/account/settings"));

    let response = send(&app, json_request(Method::GET, "/account/profile", None, Some(&first))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(&app, json_request(Method::GET, "/api/dashboard", None, Some(&second))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let old = login_body("ann@example.com", TEST_PASSWORD, false);
    let response = send(&app, form_request("/account/login", &old, None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let new = login_body("ann@example.com", new_password, false);
    let response = send(&app, form_request("/account/login", &new, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
