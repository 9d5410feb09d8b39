use crate::components::layout::Header;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MainLayoutProps {
    pub children: Children,
}

#[function_component]
pub fn MainLayout(props: &MainLayoutProps) -> Html {
    html! {
        <div class="min-h-screen bg-gray-100 text-gray-900">
            <Header />
            <main class="container mx-auto px-4 py-8">
                {for props.children.iter()}
            </main>
        </div>
    }
}
