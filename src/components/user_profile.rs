use crate::hooks::use_user_store;
use crate::models::user::random_accent_color;
use crate::store::UserPatch;
use dioxus::prelude::*;

#[derive(Clone, PartialEq)]
enum NetworkStatus {
    Checking,
    Online,
    Offline,
}

#[component]
pub fn UserProfile() -> Element {
    let mut user_store = use_user_store();
    let mut editing = use_signal(|| false);
    let mut temp_name = use_signal(String::new);
    let mut network_status = use_signal(|| NetworkStatus::Checking);

    // Check network connectivity on mount
    use_effect(move || {
        spawn(async move {
            match reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(5))
                .build()
            {
                Ok(client) => {
                    match client
                        .get("https://www.google.com/generate_204")
                        .send()
                        .await
                    {
                        Ok(response)
                            if response.status().is_success()
                                || response.status().as_u16() == 204 =>
                        {
                            network_status.set(NetworkStatus::Online);
                        }
                        Ok(response) => {
                            log::warn!("Connectivity probe returned {}", response.status());
                            network_status.set(NetworkStatus::Offline);
                        }
                        Err(e) => {
                            log::warn!("Connectivity probe failed: {}", e);
                            network_status.set(NetworkStatus::Offline);
                        }
                    }
                }
                Err(e) => {
                    log::warn!("Failed to build probe client: {}", e);
                    network_status.set(NetworkStatus::Offline);
                }
            }
        });
    });

    let user = user_store.read().user().clone();
    let short_id: String = user.id.chars().take(8).collect();
    let user_id = user.id.clone();

    let save = use_callback(move |_: ()| {
        let name = temp_name();
        if !name.trim().is_empty() {
            if let Err(e) = user_store.write().set_user_name(&name) {
                log::error!("Rename failed: {}", e);
            }
        }
        editing.set(false);
    });

    let mut start_editing = move |_| {
        let current = user_store.read().user().name.clone();
        temp_name.set(current);
        editing.set(true);
    };

    rsx! {
        div { class: "user-profile",
            div { class: "user-profile-row",
                div {
                    class: "avatar-badge avatar-badge-large",
                    style: "background: {user.color};",
                    "{user.initial()}"
                }

                div { class: "user-profile-main",
                    if editing() {
                        input {
                            class: "user-name-input",
                            r#type: "text",
                            value: "{temp_name}",
                            autofocus: true,
                            oninput: move |e| temp_name.set(e.value()),
                            onkeydown: move |e| {
                                if e.key() == Key::Enter {
                                    save.call(());
                                }
                            },
                        }
                    } else {
                        h4 { class: "user-name", "{user.name}" }
                    }

                    p { class: "user-id",
                        "ID: {short_id}…"
                        button {
                            class: "user-id-copy",
                            title: "Copy user id",
                            onclick: move |_| {
                                let js = format!(
                                    "navigator.clipboard.writeText('{}');",
                                    user_id
                                );
                                let _ = document::eval(&js);
                            },
                            "⧉"
                        }
                    }
                }

                button {
                    class: "user-edit",
                    onclick: move |e| {
                        if editing() {
                            save.call(());
                        } else {
                            start_editing(e);
                        }
                    },
                    if editing() { "💾" } else { "✏️" }
                }
            }

            div { class: "user-profile-details",
                div { class: "user-profile-detail",
                    span { "Status" }
                    span { class: "user-status",
                        match network_status() {
                            NetworkStatus::Checking => rsx! {
                                "Checking…"
                            },
                            NetworkStatus::Online => rsx! {
                                span { class: "live-dot" }
                                "Online"
                            },
                            NetworkStatus::Offline => rsx! {
                                "Offline"
                            },
                        }
                    }
                }
                div { class: "user-profile-detail",
                    span { "Color" }
                    span { class: "user-color",
                        span {
                            class: "user-color-swatch",
                            style: "background: {user.color};",
                        }
                        button {
                            class: "user-color-change",
                            onclick: move |_| {
                                let patch = UserPatch {
                                    color: Some(random_accent_color()),
                                    ..UserPatch::default()
                                };
                                if let Err(e) = user_store.write().update_user(patch) {
                                    log::error!("Recolor failed: {}", e);
                                }
                            },
                            "Change"
                        }
                    }
                }
            }
        }
    }
}
