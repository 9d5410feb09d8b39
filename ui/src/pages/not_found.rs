use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::hooks::use_title;

#[function_component]
pub fn NotFoundPage() -> Html {
    use_title("Page not found - Sydney Events Hub");

    html! {
        <div class="text-center py-16">
            <h1 class="text-4xl font-bold text-gray-900">{"404"}</h1>
            <p class="text-gray-600 mb-6">{"Page not found"}</p>
            <Link<Route> to={Route::Home} classes="text-purple-700 hover:underline">
                {"Browse events"}
            </Link<Route>>
        </div>
    }
}
