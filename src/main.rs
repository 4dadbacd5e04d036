use heartfield::app::App;
use heartfield::config::HeartSceneConfig;
use heartfield::errors::Result;
use heartfield::menu::{self, MenuState, PageKind};

fn main() -> Result<()> {
    env_logger::init();

    // The route table drives both the menu projection and the start page.
    let routes = menu::app_routes();
    let (location, page) = menu::resolve_route(&routes, "/");

    let roles = ["admin"];
    let layout_children = routes.get(1).map_or(&[][..], |r| r.children.as_slice());
    let items = menu::project_menu(layout_children, &roles);
    log::info!("Menu for {roles:?}: {items:?}");

    let mut state = MenuState::new();
    state.navigate(&location);
    log::info!("Navigated to {location}; expanded {:?}", state.expanded);

    match page {
        Some(PageKind::HeartScene) => App::new(HeartSceneConfig::default()).run(),
        other => {
            log::warn!("Start location {location} resolves to {other:?}; nothing to show");
            Ok(())
        }
    }
}
