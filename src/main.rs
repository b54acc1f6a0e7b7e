use dioxus::prelude::*;

mod components;
mod config;
mod error;
mod hooks;
mod models;
mod services;
mod store;

use components::AppLayout;
use config::AppConfig;
use live_store::LiveStoreClient;
use photo_api::PhotoApiClient;
use store::UserStore;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(not(target_family = "wasm"))]
    env_logger::init();

    dioxus::launch(App);
}

/// Top-level tabs of the app
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Tab {
    Gallery,
    Feed,
}

/// Card currently highlighted by a feed jump, shared between the activity
/// feed and the gallery
#[derive(Clone, Copy)]
pub struct HighlightedCard(pub Signal<Option<String>>);

#[component]
fn App() -> Element {
    let config = use_hook(AppConfig::load);
    let photo_config = config.photo_api.clone();
    let realtime_config = config.realtime.clone();

    use_context_provider(move || {
        PhotoApiClient::new(photo_config.base_url, photo_config.access_key)
            .expect("Failed to create photo API client")
    });
    use_context_provider(move || {
        LiveStoreClient::new(realtime_config.base_url, realtime_config.app_id)
            .expect("Failed to create live store client")
    });
    use_context_provider(|| Signal::new(UserStore::load_or_create()));
    use_context_provider(|| HighlightedCard(Signal::new(None)));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AppLayout {}
    }
}
