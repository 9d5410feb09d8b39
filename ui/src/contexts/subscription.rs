use wasm_bindgen::prelude::*;
use web_sys::StorageEvent;
use yew::prelude::*;

use crate::subscription::SubscriptionStore;

#[derive(Properties, PartialEq)]
pub struct SubscriptionProviderProps {
    pub children: Children,
}

/// Owns the [`SubscriptionStore`] for the app and feeds it `storage` events
/// from other tabs.
#[function_component]
pub fn SubscriptionProvider(props: &SubscriptionProviderProps) -> Html {
    let store = use_memo((), |_| SubscriptionStore::browser());
    let store = (*store).clone();

    use_effect_with(store.clone(), |store| {
        let window = web_sys::window();
        let store = store.clone();
        let closure = Closure::wrap(Box::new(move |event: StorageEvent| {
            store.handle_storage_change(event.key().as_deref());
        }) as Box<dyn FnMut(StorageEvent)>);

        if let Some(window) = &window
            && window
                .add_event_listener_with_callback(
                    "storage",
                    closure.as_ref().unchecked_ref(),
                )
                .is_err()
        {
            tracing::warn!("Could not listen for storage changes");
        }

        // Rust retains ownership of the closure, JS only has a pointer to it
        move || {
            if let Some(window) = window {
                let _ = window.remove_event_listener_with_callback(
                    "storage",
                    closure.as_ref().unchecked_ref(),
                );
            }
            drop(closure);
        }
    });

    html! {
        <ContextProvider<SubscriptionStore> context={store}>
            {props.children.clone()}
        </ContextProvider<SubscriptionStore>>
    }
}

/// The subscriber email, kept current as the store changes in this tab or
/// any other.
#[hook]
pub fn use_subscription() -> Option<String> {
    let store = use_context::<SubscriptionStore>()
        .expect("use_subscription must be used within a SubscriptionProvider");
    let subscriber = use_state(|| store.subscriber());

    use_effect_with(store, {
        let subscriber = subscriber.clone();
        move |store| {
            // Catch writes between the first render and this effect.
            subscriber.set(store.subscriber());

            let observed = store.clone();
            let subscription = store
                .subscribe(move |_| subscriber.set(observed.subscriber()));
            move || drop(subscription)
        }
    });

    (*subscriber).clone()
}
