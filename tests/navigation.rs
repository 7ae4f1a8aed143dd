//! End-to-end navigation tests through the registry.

use std::sync::Arc;

use element_router::config::loader::parse_config;
use element_router::config::RouterSettings;
use element_router::content::{Content, StaticModuleLoader};
use element_router::lifecycle::{self, Shutdown};
use element_router::navigation::{NavigationOutcome, RouterRegistry};
use element_router::{RouteDescriptor, RouterError};

mod common;

fn open_loader() -> Arc<StaticModuleLoader> {
    Arc::new(StaticModuleLoader::new().allow_unknown(true))
}

#[tokio::test]
async fn test_fallback_route_mounts_once_and_notifies_once() {
    let (controller, _history) = common::controller(
        RouterSettings::default(),
        vec![
            RouteDescriptor::new("/a").element("x-a"),
            RouteDescriptor::wildcard().element("x-fallback"),
        ],
        open_loader(),
    );
    let registry = Arc::new(RouterRegistry::new());
    let handle = registry.mount(controller).await.unwrap();
    let mut events = handle.controller().subscribe();

    registry.navigate_to("/b").await.unwrap();

    let mounted = handle.controller().slot().current();
    match mounted {
        Some(Content::Element(element)) => {
            assert_eq!(element.tag, "x-fallback");
            assert!(element.properties.is_empty());
        }
        other => panic!("expected x-fallback, got {other:?}"),
    }
    let changes = common::drain(&mut events);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].url, "/b");
}

#[tokio::test]
async fn test_navigating_to_current_location_is_noop() {
    let (controller, history) = common::controller(
        RouterSettings::default(),
        vec![RouteDescriptor::wildcard().element("x-any")],
        open_loader(),
    );
    let registry = Arc::new(RouterRegistry::new());
    let handle = registry.mount(controller).await.unwrap();
    registry.navigate_to("/page").await.unwrap();
    let mut events = handle.controller().subscribe();

    let outcome = registry.navigate_to("/page").await.unwrap();
    assert_eq!(outcome, NavigationOutcome::Unchanged);
    assert_eq!(history.entries(), vec!["/", "/page"]);
    assert!(common::drain(&mut events).is_empty());
}

#[tokio::test]
async fn test_redirect_runs_exactly_one_follow_up_cycle() {
    let (controller, history) = common::controller(
        RouterSettings::default(),
        vec![
            RouteDescriptor::new("/old").element("x-old").redirect("/new"),
            RouteDescriptor::new("/new").element("x-new"),
        ],
        open_loader(),
    );
    let registry = Arc::new(RouterRegistry::new());
    let handle = registry.mount(controller).await.unwrap();
    let mut events = handle.controller().subscribe();

    let outcome = registry.navigate_to("/old").await.unwrap();

    assert_eq!(
        outcome,
        NavigationOutcome::Completed { url: "/new".into(), route: Some("/new".into()) }
    );
    assert_eq!(history.entries(), vec!["/", "/old", "/new"]);
    assert_eq!(handle.controller().slot().render(), "<x-new></x-new>");
    let changes = common::drain(&mut events);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].url, "/new");
}

#[tokio::test]
async fn test_redirect_to_current_location_ends_quietly() {
    let (controller, history) = common::controller(
        RouterSettings::default(),
        vec![RouteDescriptor::new("/loop").redirect("/loop")],
        open_loader(),
    );
    let mut events = controller.subscribe();

    let outcome = controller.navigate("/loop").await.unwrap();
    assert_eq!(outcome, NavigationOutcome::Unchanged);
    assert_eq!(history.entries(), vec!["/", "/loop"]);
    assert!(controller.slot().is_empty());
    assert!(common::drain(&mut events).is_empty());
}

#[tokio::test]
async fn test_redirect_cycle_hits_limit() {
    let settings = RouterSettings {
        max_redirects: Some(3),
        ..RouterSettings::default()
    };
    let (controller, history) = common::controller(
        settings,
        vec![
            RouteDescriptor::new("/ping").redirect("/pong"),
            RouteDescriptor::new("/pong").redirect("/ping"),
        ],
        open_loader(),
    );
    let mut events = controller.subscribe();

    let err = controller.navigate("/ping").await.unwrap_err();
    match err {
        RouterError::RedirectLimit { limit, target } => {
            assert_eq!(limit, 3);
            assert_eq!(target, "/ping");
        }
        other => panic!("expected redirect limit, got {other:?}"),
    }
    // Initial push plus three followed redirects.
    assert_eq!(history.entries(), vec!["/", "/ping", "/pong", "/ping", "/pong"]);
    assert!(common::drain(&mut events).is_empty());
}

#[tokio::test]
async fn test_params_become_element_properties() {
    let (controller, _history) = common::controller(
        RouterSettings::default(),
        vec![
            RouteDescriptor::new("/users/:id/files/:path*").element("x-files"),
        ],
        open_loader(),
    );

    controller.navigate("/users/ada/files/docs/read%20me.md?raw=1").await.unwrap();
    assert_eq!(
        controller.slot().render(),
        r#"<x-files id="ada" path="docs/read me.md"></x-files>"#
    );
}

#[tokio::test]
async fn test_history_back_reruns_cycle() {
    let (controller, history) = common::controller(
        RouterSettings::default(),
        vec![
            RouteDescriptor::new("/a").element("x-a"),
            RouteDescriptor::new("/b").element("x-b"),
        ],
        open_loader(),
    );
    controller.navigate("/a").await.unwrap();
    controller.navigate("/b").await.unwrap();

    let shutdown = Shutdown::new();
    let listener = tokio::spawn(Arc::clone(&controller).run(shutdown.subscribe()));
    let mut events = controller.subscribe();

    assert!(history.go_back());
    let change = common::next_change(&mut events).await;
    assert_eq!(change.url, "/a");
    assert_eq!(controller.slot().render(), "<x-a></x-a>");
    assert_eq!(history.entries(), vec!["/", "/a"]);

    shutdown.trigger();
    listener.await.unwrap();
}

#[tokio::test]
async fn test_reloaded_routes_apply_to_next_navigation() {
    let (controller, _history) = common::controller(
        RouterSettings::default(),
        vec![RouteDescriptor::new("/a").element("x-a")],
        open_loader(),
    );
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let follower = tokio::spawn(Arc::clone(&controller).follow_reloads(rx));

    let reloaded = parse_config("[[routes]]\npath = \"/a\"\nelement = \"x-a2\"\n").unwrap();
    tx.send(reloaded).unwrap();
    drop(tx);
    follower.await.unwrap();

    controller.navigate("/a").await.unwrap();
    assert_eq!(controller.slot().render(), "<x-a2></x-a2>");
}

#[tokio::test]
async fn test_startup_from_config_and_active_helper() {
    let config = parse_config(
        r#"
        [router]
        initial_location = "/docs?page=2"
        active_class = "current"

        [[routes]]
        path = "/docs"
        [[routes.template]]
        type = "text"
        text = "Docs"

        [[routes]]
        path = "*"
        element = "x-missing"
        "#,
    )
    .unwrap();
    let registry = Arc::new(RouterRegistry::new());
    let runtime = lifecycle::start(&config, &registry).await.unwrap();

    assert_eq!(runtime.controller().slot().render(), "Docs");
    assert_eq!(registry.active_default("/docs?page=2"), "current");
    assert_eq!(registry.active_default("/docs"), "");
    assert_eq!(registry.active("/docs?page=2", "selected"), "selected");
}
