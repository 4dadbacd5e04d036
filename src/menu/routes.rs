//! The application's route table.

use serde::Deserialize;

use crate::menu::{RouteDescriptor, RouteMeta, normalize_path};

/// What a route displays when navigated to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Redirect to another location.
    Redirect(String),
    /// The animated heart scene.
    HeartScene,
    /// A named placeholder page.
    Placeholder(String),
}

/// The static route tree: a redirect root, the layout subtree with the
/// heart scene and a placeholder page, and a login route kept out of the
/// menu by having no title metadata.
#[must_use]
pub fn app_routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor {
            path: "/".to_string(),
            page: Some(PageKind::Redirect("/threejs".to_string())),
            ..Default::default()
        },
        RouteDescriptor {
            path: "/".to_string(),
            children: vec![
                RouteDescriptor {
                    path: "threejs".to_string(),
                    meta: Some(RouteMeta {
                        title: Some("threejs".to_string()),
                        icon: Some("home".to_string()),
                        ..Default::default()
                    }),
                    children: vec![
                        RouteDescriptor {
                            path: String::new(),
                            page: Some(PageKind::Redirect("hart".to_string())),
                            ..Default::default()
                        },
                        RouteDescriptor {
                            path: "hart".to_string(),
                            page: Some(PageKind::HeartScene),
                            meta: Some(RouteMeta {
                                title: Some("hart".to_string()),
                                icon: Some("smile".to_string()),
                                ..Default::default()
                            }),
                            ..Default::default()
                        },
                    ],
                    ..Default::default()
                },
                RouteDescriptor {
                    path: "g6".to_string(),
                    page: Some(PageKind::Placeholder("G6".to_string())),
                    meta: Some(RouteMeta {
                        title: Some("G6".to_string()),
                        icon: Some("apple".to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            ],
            ..Default::default()
        },
        RouteDescriptor {
            path: "login".to_string(),
            page: Some(PageKind::Placeholder("Login".to_string())),
            ..Default::default()
        },
    ]
}

/// Resolves a location against the route tree, following redirects, and
/// returns the final location plus the page it lands on.
///
/// Redirect targets may be absolute or relative to the redirecting route.
#[must_use]
pub fn resolve_route(routes: &[RouteDescriptor], location: &str) -> (String, Option<PageKind>) {
    let mut location = normalize_path(location);

    // Bounded redirect chain; route tables are static and tiny.
    for _ in 0..8 {
        match find_page(routes, &location) {
            Some(PageKind::Redirect(target)) => {
                location = if target.starts_with('/') {
                    normalize_path(&target)
                } else {
                    normalize_path(&format!("{location}/{target}"))
                };
            }
            page => return (location, page),
        }
    }

    log::warn!("Redirect chain too long at {location}");
    (location, None)
}

/// Finds the page registered for a normalized location, walking segments
/// through the tree. Empty-path children act as index routes.
fn find_page(routes: &[RouteDescriptor], location: &str) -> Option<PageKind> {
    fn walk(routes: &[RouteDescriptor], segments: &[&str]) -> Option<PageKind> {
        for route in routes {
            let trimmed = route.path.trim_matches('/');
            let own: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

            if segments.len() < own.len() || segments[..own.len()] != own[..] {
                continue;
            }
            let rest = &segments[own.len()..];

            if rest.is_empty() {
                // Exact match; an index child may still redirect further.
                if route.page.is_some() {
                    return route.page.clone();
                }
                if let Some(index) = route
                    .children
                    .iter()
                    .find(|c| c.path.is_empty() && c.page.is_some())
                {
                    return index.page.clone();
                }
                continue;
            }

            if let Some(page) = walk(&route.children, rest) {
                return Some(page);
            }
        }
        None
    }

    let segments: Vec<&str> = location.split('/').filter(|s| !s.is_empty()).collect();
    walk(routes, &segments)
}
