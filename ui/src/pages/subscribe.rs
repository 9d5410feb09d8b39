use payloads::requests;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::config::AppConfig;
use crate::contexts::use_subscription;
use crate::hooks::use_title;
use crate::subscription::SubscriptionStore;
use crate::ticket_gate::{FormSession, FormStatus, GateApi, GateRequest};
use crate::{Route, get_api_client};

/// Whether the visitor is still on the subscribe page, so sending them home
/// does not pull them away from somewhere they navigated to meanwhile.
fn still_subscribing(path: Option<&str>) -> bool {
    path.and_then(Route::recognize) == Some(Route::Subscribe)
}

/// Subscribe without going through a ticket link.
#[function_component]
pub fn SubscribePage() -> Html {
    use_title("Subscribe - Sydney Events Hub");
    let store = use_context::<SubscriptionStore>()
        .expect("SubscribePage must be used within a SubscriptionProvider");
    let subscriber = use_subscription();
    let navigator = use_navigator().expect("Must be used within a Router");
    let session = use_state(FormSession::default);

    let on_email_input = {
        let session = session.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*session).clone();
            next.email = input.value();
            session.set(next);
        })
    };

    let on_submit = {
        let session = session.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if session.is_pending() {
                return;
            }

            let mut next = (*session).clone();
            let email = next.email.trim().to_string();
            if email.is_empty() {
                next.fail("Please enter your email");
                session.set(next);
                return;
            }
            next.begin();
            session.set(next.clone());

            let session = session.clone();
            let store = store.clone();
            let navigator = navigator.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let request = GateRequest::SubmitEmail(requests::SubmitEmail {
                    email: email.clone(),
                });
                match get_api_client().send(&request).await {
                    Ok(()) => {
                        store.set_subscriber(&email);
                        next.succeed("Thank you for subscribing!");
                        session.set(next);

                        let delay = AppConfig::from_build_env().redirect_delay_ms;
                        gloo_timers::future::TimeoutFuture::new(delay).await;
                        let path = web_sys::window()
                            .and_then(|window| window.location().pathname().ok());
                        if still_subscribing(path.as_deref()) {
                            navigator.push(&Route::Home);
                        }
                    }
                    Err(e) => {
                        next.fail_with(&e, request.fallback_message());
                        session.set(next);
                    }
                }
            });
        })
    };

    let content = if session.status == FormStatus::Success {
        html! {
            <div class="text-green-600">
                {session.message.clone().unwrap_or_default()}
                <p class="text-sm text-gray-600 mt-2">
                    {"You'll receive updates about upcoming events. Redirecting to home page..."}
                </p>
            </div>
        }
    } else if let Some(email) = subscriber {
        html! {
            <div class="text-green-600">
                {format!("You're already subscribed as {email}.")}
                <p class="text-sm text-gray-600 mt-2">
                    <Link<Route> to={Route::Home} classes="text-purple-700 hover:underline">
                        {"Browse events"}
                    </Link<Route>>
                </p>
            </div>
        }
    } else {
        html! {
            <form onsubmit={on_submit} class="space-y-4">
                <div>
                    <label for="email" class="block text-gray-700 mb-2">
                        {"Email Address"}
                    </label>
                    <input
                        type="email"
                        id="email"
                        required={true}
                        autocomplete="email"
                        value={session.email.clone()}
                        oninput={on_email_input}
                        placeholder="Enter your email"
                        class="w-full p-2 border rounded focus:outline-none \
                               focus:ring-2 focus:ring-purple-500"
                    />
                </div>
                if let Some(message) = &session.message {
                    <p class="text-red-600">{message}</p>
                }
                <button
                    type="submit"
                    disabled={session.is_pending()}
                    class="w-full bg-purple-700 text-white py-2 px-4 rounded \
                           hover:bg-purple-800 disabled:opacity-50"
                >
                    {if session.is_pending() { "Submitting..." } else { "Subscribe" }}
                </button>
            </form>
        }
    };

    html! {
        <div class="max-w-md mx-auto mt-8 p-6 bg-white rounded-lg shadow-md">
            <h1 class="text-2xl font-bold mb-4">{"Subscribe to Events"}</h1>
            {content}
        </div>
    }
}
