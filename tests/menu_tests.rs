//! Menu Projection Tests
//!
//! Tests for:
//! - Route tree → menu tree projection with path concatenation
//! - Permission filtering against the caller's role set
//! - Hidden routes and hidden children
//! - Selection/expansion state (union semantics)
//! - The application route table and redirect resolution

use heartfield::menu::{
    MenuState, PageKind, RouteDescriptor, RouteMeta, app_routes, normalize_path, path_prefixes,
    project_menu, resolve_route,
};

fn route(path: &str, title: &str, children: Vec<RouteDescriptor>) -> RouteDescriptor {
    RouteDescriptor {
        path: path.to_string(),
        children,
        meta: Some(RouteMeta {
            title: Some(title.to_string()),
            ..RouteMeta::default()
        }),
        page: None,
    }
}

#[test]
fn projects_nested_routes_with_full_paths() {
    let routes = vec![route("a", "A", vec![route("b", "B", vec![])])];

    let menu = project_menu(&routes, &[]);

    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].key, "/a");
    assert_eq!(menu[0].label, "A");
    assert_eq!(menu[0].children.len(), 1);
    assert_eq!(menu[0].children[0].key, "/a/b");
    assert_eq!(menu[0].children[0].label, "B");
    assert!(menu[0].children[0].children.is_empty());
}

#[test]
fn selection_and_expansion_for_nested_location() {
    let mut state = MenuState::new();
    state.navigate("/a/b");

    assert!(state.selected.contains("/a/b"));
    assert_eq!(state.selected.len(), 1);
    assert!(state.expanded.contains("/a"));
}

#[test]
fn navigation_merges_expansion_instead_of_replacing() {
    let mut state = MenuState::new();
    state.toggle("/user-opened");

    state.navigate("/a/b");

    assert!(state.expanded.contains("/user-opened"));
    assert!(state.expanded.contains("/a"));

    // Selection, unlike expansion, is replaced.
    state.navigate("/c");
    assert!(!state.selected.contains("/a/b"));
    assert!(state.selected.contains("/c"));
    assert!(state.expanded.contains("/a"));
}

#[test]
fn auth_filtering_respects_role_set() {
    let mut secured = route("admin-zone", "Admin", vec![]);
    secured.meta.as_mut().unwrap().auth = Some(vec!["admin".to_string()]);
    let routes = vec![secured];

    assert!(project_menu(&routes, &["guest"]).is_empty());

    let menu = project_menu(&routes, &["admin"]);
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].key, "/admin-zone");

    // A route with no auth set is visible to everyone.
    let open = vec![route("open", "Open", vec![])];
    assert_eq!(project_menu(&open, &[]).len(), 1);
}

#[test]
fn pathless_and_hidden_routes_are_excluded() {
    let mut hidden = route("secret", "Secret", vec![]);
    hidden.meta.as_mut().unwrap().hide_in_menu = true;

    let routes = vec![
        RouteDescriptor::default(), // pathless redirect entry
        hidden,
        route("shown", "Shown", vec![]),
    ];

    let menu = project_menu(&routes, &[]);
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].key, "/shown");
}

#[test]
fn hide_children_keeps_parent_as_leaf() {
    let mut parent = route("parent", "Parent", vec![route("child", "Child", vec![])]);
    parent.meta.as_mut().unwrap().hide_children_in_menu = true;

    let menu = project_menu(&[parent], &[]);
    assert_eq!(menu.len(), 1);
    assert!(menu[0].children.is_empty());
}

#[test]
fn fully_filtered_children_collapse_to_leaf() {
    let mut secured_child = route("child", "Child", vec![]);
    secured_child.meta.as_mut().unwrap().auth = Some(vec!["admin".to_string()]);
    let parent = route("parent", "Parent", vec![secured_child]);

    let menu = project_menu(&[parent], &["guest"]);
    assert_eq!(menu.len(), 1);
    assert!(menu[0].children.is_empty());
}

#[test]
fn path_normalization() {
    assert_eq!(normalize_path("a/b"), "/a/b");
    assert_eq!(normalize_path("/a//b/"), "/a/b");
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(path_prefixes("/a/b/c"), vec!["/a", "/a/b", "/a/b/c"]);
    assert!(path_prefixes("/").is_empty());
}

#[test]
fn app_routes_project_like_the_reference_shell() {
    let routes = app_routes();
    let layout_children = &routes[1].children;

    let menu = project_menu(layout_children, &["admin"]);
    assert_eq!(menu.len(), 2);
    assert_eq!(menu[0].key, "/threejs");
    assert_eq!(menu[0].children.len(), 1);
    assert_eq!(menu[0].children[0].key, "/threejs/hart");
    assert_eq!(menu[1].key, "/g6");
}

#[test]
fn root_redirects_to_heart_scene() {
    let routes = app_routes();
    let (location, page) = resolve_route(&routes, "/");

    assert_eq!(location, "/threejs/hart");
    assert_eq!(page, Some(PageKind::HeartScene));
}

#[test]
fn route_descriptors_deserialize_from_config() {
    let json = r#"{
      "path": "tools",
      "meta": { "title": "Tools", "auth": ["admin"], "hide_in_menu": false },
      "children": [ { "path": "viewer" } ]
    }"#;

    let route: RouteDescriptor = serde_json::from_str(json).unwrap();
    assert_eq!(route.path, "tools");
    assert_eq!(route.meta.as_ref().unwrap().title.as_deref(), Some("Tools"));
    assert_eq!(route.children.len(), 1);
}
