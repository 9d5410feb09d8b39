use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::contexts::use_subscription;

#[function_component]
pub fn Header() -> Html {
    let subscriber = use_subscription();

    html! {
        <nav class="bg-white shadow-lg">
            <div class="container mx-auto px-4">
                <div class="flex justify-between items-center h-16">
                    <Link<Route> to={Route::Home} classes="text-xl font-bold text-gray-800">
                        {"Sydney Events Hub"}
                    </Link<Route>>
                    <div class="flex items-center space-x-4">
                        <Link<Route> to={Route::Home} classes="text-gray-600 hover:text-gray-900">
                            {"Events"}
                        </Link<Route>>
                        <Link<Route> to={Route::Subscribe} classes="text-gray-600 hover:text-gray-900">
                            {"Subscribe"}
                        </Link<Route>>
                        if let Some(email) = subscriber {
                            <span
                                class="text-sm text-green-700 bg-green-50 rounded-full px-3 py-1"
                                title={email.clone()}
                            >
                                {format!("Subscribed as {email}")}
                            </span>
                        }
                    </div>
                </div>
            </div>
        </nav>
    }
}
