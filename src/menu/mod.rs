//! Route descriptors and menu projection.
//!
//! The routing layer hands this module an ordered tree of route descriptors;
//! [`project_menu`] turns it into a navigational menu tree, filtering hidden
//! and unauthorized entries and concatenating child paths onto their
//! parents. [`MenuState`] tracks which keys render selected and expanded,
//! merging (never replacing) the expansion set so branches the user opened
//! are not collapsed by navigation.

pub mod routes;

use rustc_hash::FxHashSet;
use serde::Deserialize;

pub use routes::{PageKind, app_routes, resolve_route};

/// Display and access metadata for a route.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouteMeta {
    /// Menu label; untitled routes still project with an empty label.
    pub title: Option<String>,
    /// Icon identifier for the menu renderer.
    pub icon: Option<String>,
    /// Excludes the route (and its subtree) from the menu.
    pub hide_in_menu: bool,
    /// Keeps the route but hides its children.
    pub hide_children_in_menu: bool,
    /// Roles allowed to see the route; `None` means everyone.
    pub auth: Option<Vec<String>>,
}

/// One node of the route tree, defined once at startup and never mutated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouteDescriptor {
    /// Path segment; empty for pure redirect/index entries.
    pub path: String,
    pub children: Vec<RouteDescriptor>,
    pub meta: Option<RouteMeta>,
    /// What this route displays.
    pub page: Option<PageKind>,
}

/// A projected menu entry: full path key, label, icon, and surviving
/// children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub children: Vec<MenuNode>,
}

/// Checks whether a caller with `roles` may see `route`.
///
/// Routes without an `auth` set are visible to everyone; otherwise the
/// caller needs at least one matching role.
#[must_use]
pub fn has_permission(route: &RouteDescriptor, roles: &[&str]) -> bool {
    match route.meta.as_ref().and_then(|m| m.auth.as_ref()) {
        None => true,
        Some(auth) => auth.iter().any(|required| roles.contains(&required.as_str())),
    }
}

/// Projects the route tree into a menu tree for a caller with `roles`.
///
/// Depth-first; a route is dropped when it has no path segment, is flagged
/// hidden, or fails the permission check. Child paths are concatenated onto
/// the parent's accumulated path with normalized separators. A route whose
/// children are all filtered away becomes a plain leaf (empty child list),
/// not a node with an empty submenu.
#[must_use]
pub fn project_menu(routes: &[RouteDescriptor], roles: &[&str]) -> Vec<MenuNode> {
    project_level(routes, roles, None)
}

fn project_level(
    routes: &[RouteDescriptor],
    roles: &[&str],
    parent_path: Option<&str>,
) -> Vec<MenuNode> {
    routes
        .iter()
        .filter(|route| {
            if route.path.is_empty() {
                return false;
            }
            if route.meta.as_ref().is_some_and(|m| m.hide_in_menu) {
                return false;
            }
            has_permission(route, roles)
        })
        .map(|route| {
            let mut full_path = if route.path.starts_with('/') {
                route.path.clone()
            } else {
                format!("/{}", route.path)
            };
            if let Some(parent) = parent_path {
                let parent = if parent.starts_with('/') {
                    parent.to_string()
                } else {
                    format!("/{parent}")
                };
                full_path = format!("{parent}{full_path}");
            }

            let hide_children = route
                .meta
                .as_ref()
                .is_some_and(|m| m.hide_children_in_menu);
            let children = if route.children.is_empty() || hide_children {
                Vec::new()
            } else {
                project_level(&route.children, roles, Some(&full_path))
            };

            MenuNode {
                label: route
                    .meta
                    .as_ref()
                    .and_then(|m| m.title.clone())
                    .unwrap_or_default(),
                icon: route.meta.as_ref().and_then(|m| m.icon.clone()),
                key: full_path,
                children,
            }
        })
        .collect()
}

/// Collapses a location path to the canonical `/a/b` form.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let joined = path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    format!("/{joined}")
}

/// Every prefix of a location path: `/a/b/c` → `/a`, `/a/b`, `/a/b/c`.
#[must_use]
pub fn path_prefixes(path: &str) -> Vec<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    (1..=segments.len())
        .map(|i| format!("/{}", segments[..i].join("/")))
        .collect()
}

/// Selection and expansion state of the menu.
#[derive(Debug, Clone, Default)]
pub struct MenuState {
    pub selected: FxHashSet<String>,
    pub expanded: FxHashSet<String>,
}

impl MenuState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a navigation to `location`: the selection is replaced by the
    /// normalized path, while the expansion set takes the union with the
    /// location's prefixes, leaving user-opened branches open.
    pub fn navigate(&mut self, location: &str) {
        self.selected.clear();
        self.selected.insert(normalize_path(location));
        self.expanded.extend(path_prefixes(location));
    }

    /// User toggles a submenu open or closed.
    pub fn toggle(&mut self, key: &str) {
        if !self.expanded.remove(key) {
            self.expanded.insert(key.to_string());
        }
    }
}
