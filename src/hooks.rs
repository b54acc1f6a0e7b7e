use crate::store::UserStore;
use dioxus::prelude::*;
use live_store::{LiveQuery, LiveStoreClient};
use serde::de::DeserializeOwned;

/// Subscribe to a live query for the lifetime of the component.
///
/// Registers the query on mount, forwards every pushed snapshot into the
/// returned signal (deserialized records, unreadable ones skipped), and
/// cancels the subscription when the component unmounts. Deliveries are full
/// snapshots; callers re-derive any ordering they need on each update.
pub fn use_live_records<T>(query: LiveQuery) -> Signal<Vec<T>>
where
    T: DeserializeOwned + Clone + 'static,
{
    let client = use_context::<LiveStoreClient>();
    let mut records = use_signal(Vec::<T>::new);

    let subscription = use_hook(move || {
        let subscription = client.subscribe(query);
        let mut rx = subscription.receiver();

        spawn(async move {
            // A snapshot may have landed before this task started.
            let current = rx.borrow_and_update().clone();
            if let Some(snapshot) = current {
                records.set(deserialize_snapshot(snapshot));
            }

            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow_and_update().clone();
                if let Some(snapshot) = snapshot {
                    records.set(deserialize_snapshot(snapshot));
                }
            }
        });

        subscription
    });

    use_drop(move || subscription.cancel());

    records
}

fn deserialize_snapshot<T: DeserializeOwned>(snapshot: live_store::Snapshot) -> Vec<T> {
    snapshot
        .into_values()
        .filter_map(|record| match serde_json::from_value::<T>(record) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Skipping unreadable record in snapshot: {}", e);
                None
            }
        })
        .collect()
}

/// The shared identity store. Read anywhere; written only by the profile
/// component's explicit setters.
pub fn use_user_store() -> Signal<UserStore> {
    use_context::<Signal<UserStore>>()
}
