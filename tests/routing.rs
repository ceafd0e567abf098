//! Router-phase and route-registration integration tests.

use serde_json::json;

use app_composer::manifest::loader;
use app_composer::{
    ComposeError, ComposeOptions, Composer, MiddlewareEntry, Module, RouteEntry, SubRouter,
    ValidationError,
};

mod common;

fn composer() -> Composer {
    Composer::new(common::test_registry())
}

#[tokio::test]
async fn router_with_a_path_option_is_mounted_prefixed() {
    let manifest = loader::from_value(json!({
        "application": {
            "routers": [{ "router": "api", "options": { "path": "/api" } }]
        }
    }))
    .unwrap();

    let app = composer()
        .compose(&manifest, &ComposeOptions::default())
        .unwrap();
    assert_eq!(app.mounts(), &[Some("/api".to_string())]);

    let router = app.into_router();
    let (status, body) = common::get(router.clone(), "/api/ping").await;
    assert_eq!(status, 200);
    assert_eq!(body, "pong");

    let (status, _) = common::get(router, "/ping").await;
    assert_eq!(status, 404, "prefixed mounts must not answer at the root");
}

#[tokio::test]
async fn router_without_a_path_option_is_mounted_unprefixed() {
    let manifest = loader::from_value(json!({
        "application": { "routers": [{ "router": "api" }] }
    }))
    .unwrap();

    let app = composer()
        .compose(&manifest, &ComposeOptions::default())
        .unwrap();
    assert_eq!(app.mounts(), &[None]);

    let (status, body) = common::get(app.into_router(), "/ping").await;
    assert_eq!(status, 200);
    assert_eq!(body, "pong");
}

#[tokio::test]
async fn router_middleware_is_registered_before_mounting() {
    let mut manifest = loader::from_value(json!({
        "application": {
            "routers": [{ "router": "api", "options": { "path": "/api" } }]
        }
    }))
    .unwrap();
    manifest.application.as_mut().unwrap().routers[0]
        .middleware
        .push(MiddlewareEntry {
            custom: Some(common::tag("router-mw")),
            ..Default::default()
        });

    let app = composer()
        .compose(&manifest, &ComposeOptions::default())
        .unwrap();
    let (status, body) = common::get(app.into_router(), "/api/trace").await;
    assert_eq!(status, 200);
    assert_eq!(body, "router-mw");
}

#[tokio::test]
async fn application_middleware_runs_before_router_middleware() {
    let mut manifest = loader::from_value(json!({
        "application": {
            "routers": [{ "router": "api", "options": { "path": "/api" } }]
        }
    }))
    .unwrap();
    let application = manifest.application.as_mut().unwrap();
    application.middleware.push(MiddlewareEntry {
        custom: Some(common::tag("app-mw")),
        ..Default::default()
    });
    application.routers[0].middleware.push(MiddlewareEntry {
        custom: Some(common::tag("router-mw")),
        ..Default::default()
    });

    let app = composer()
        .compose(&manifest, &ComposeOptions::default())
        .unwrap();
    let (_, body) = common::get(app.into_router(), "/api/trace").await;
    assert_eq!(body, "app-mw,router-mw");
}

#[tokio::test]
async fn router_mounted_at_the_root_path_merges_unprefixed() {
    let manifest = loader::from_value(json!({
        "application": {
            "routers": [{ "router": "api", "options": { "path": "/" } }]
        }
    }))
    .unwrap();

    let app = composer()
        .compose(&manifest, &ComposeOptions::default())
        .unwrap();
    assert_eq!(app.mounts(), &[None]);

    let (status, body) = common::get(app.into_router(), "/ping").await;
    assert_eq!(status, 200);
    assert_eq!(body, "pong");
}

#[test]
fn routers_exposing_the_same_route_fail_composition() {
    let manifest = loader::from_value(json!({
        "application": {
            "routers": [{ "router": "api" }, { "router": "api" }]
        }
    }))
    .unwrap();

    let err = composer()
        .compose(&manifest, &ComposeOptions::default())
        .unwrap_err();
    match err {
        ComposeError::Validation(ValidationError::Field { path, reason }) => {
            assert_eq!(path, "application.routers");
            assert!(reason.contains("/ping"), "unexpected reason: {reason}");
        }
        other => panic!("expected a field validation error, got {other}"),
    }
}

#[tokio::test]
async fn routers_mounted_at_the_same_path_stack_in_manifest_order() {
    let mut registry = common::test_registry();
    registry.register(
        "users",
        Module::router(|| SubRouter::new().route("/users", axum::routing::get(|| async { "users" }))),
    );
    registry.register(
        "items",
        Module::router(|| SubRouter::new().route("/items", axum::routing::get(|| async { "items" }))),
    );
    let composer = Composer::new(registry);

    let manifest = loader::from_value(json!({
        "application": {
            "routers": [
                { "router": "users", "options": { "path": "/api" } },
                { "router": "items", "options": { "path": "/api" } }
            ]
        }
    }))
    .unwrap();

    let app = composer.compose(&manifest, &ComposeOptions::default()).unwrap();
    assert_eq!(
        app.mounts(),
        &[Some("/api".to_string()), Some("/api".to_string())]
    );

    let router = app.into_router();
    let (_, body) = common::get(router.clone(), "/api/users").await;
    assert_eq!(body, "users");
    let (_, body) = common::get(router, "/api/items").await;
    assert_eq!(body, "items");
}

#[tokio::test]
async fn relative_router_identifiers_resolve_against_relative_to() {
    let mut registry = common::test_registry();
    registry.register("/srv/app/routes/api", Module::router(common::api_router));
    let composer = Composer::new(registry);

    let manifest = loader::from_value(json!({
        "application": {
            "routers": [{ "router": "./routes/api", "options": { "path": "/api" } }]
        }
    }))
    .unwrap();
    let options = ComposeOptions {
        relative_to: Some("/srv/app".into()),
    };

    let app = composer.compose(&manifest, &options).unwrap();
    let (status, body) = common::get(app.into_router(), "/api/ping").await;
    assert_eq!(status, 200);
    assert_eq!(body, "pong");
}

#[tokio::test]
async fn route_entries_register_with_guards_in_order() {
    let mut manifest = loader::from_value(json!({ "application": {} })).unwrap();
    manifest.application.as_mut().unwrap().routes.push(RouteEntry {
        method: Some("GET".into()),
        path: Some("/address".into()),
        guards: vec![common::tag("first"), common::tag("second")],
        handler: Some(common::echo_trace()),
    });

    let app = composer()
        .compose(&manifest, &ComposeOptions::default())
        .unwrap();
    assert_eq!(app.routes(), &["/address".to_string()]);

    let (status, body) = common::get(app.into_router(), "/address").await;
    assert_eq!(status, 200);
    assert_eq!(body, "first,second");
}

#[test]
fn duplicate_route_entries_fail_composition() {
    let mut manifest = loader::from_value(json!({ "application": {} })).unwrap();
    for _ in 0..2 {
        manifest.application.as_mut().unwrap().routes.push(RouteEntry {
            method: Some("GET".into()),
            path: Some("/dup".into()),
            handler: Some(common::echo_trace()),
            ..Default::default()
        });
    }

    let err = composer()
        .compose(&manifest, &ComposeOptions::default())
        .unwrap_err();
    match err {
        ComposeError::Validation(ValidationError::Field { path, reason }) => {
            assert_eq!(path, "application.routes");
            assert!(reason.contains("GET /dup"), "unexpected reason: {reason}");
        }
        other => panic!("expected a field validation error, got {other}"),
    }
}

#[tokio::test]
async fn route_entries_may_share_a_path_across_methods() {
    let mut manifest = loader::from_value(json!({ "application": {} })).unwrap();
    for method in ["GET", "POST"] {
        manifest.application.as_mut().unwrap().routes.push(RouteEntry {
            method: Some(method.into()),
            path: Some("/address".into()),
            handler: Some(common::echo_trace()),
            ..Default::default()
        });
    }

    let app = composer()
        .compose(&manifest, &ComposeOptions::default())
        .unwrap();
    assert_eq!(app.routes(), &["/address".to_string(), "/address".to_string()]);

    let (status, _) = common::get(app.into_router(), "/address").await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn route_methods_are_case_insensitive() {
    let mut manifest = loader::from_value(json!({ "application": {} })).unwrap();
    manifest.application.as_mut().unwrap().routes.push(RouteEntry {
        method: Some("get".into()),
        path: Some("/address".into()),
        handler: Some(common::echo_trace()),
        ..Default::default()
    });

    let app = composer()
        .compose(&manifest, &ComposeOptions::default())
        .unwrap();
    let (status, _) = common::get(app.into_router(), "/address").await;
    assert_eq!(status, 200);
}
