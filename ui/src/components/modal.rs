use wasm_bindgen::JsCast;
use yew::prelude::*;

/// Dialog over a dimmed backdrop. Clicking the backdrop or the close button
/// calls `on_close`; the parent decides whether to stop rendering it.
#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub children: Html,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub title: Option<AttrValue>,
    /// Maximum width class (default: "max-w-md")
    #[prop_or_else(|| AttrValue::from("max-w-md"))]
    pub max_width: AttrValue,
}

#[function_component]
pub fn Modal(props: &ModalProps) -> Html {
    let backdrop_ref = use_node_ref();

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let backdrop_ref = backdrop_ref.clone();

        // Only clicks on the backdrop itself, not ones bubbling up from the
        // dialog, close it.
        Callback::from(move |e: MouseEvent| {
            if let Some(backdrop_element) =
                backdrop_ref.cast::<web_sys::Element>()
                && let Some(target) = e.target()
                && target.dyn_ref::<web_sys::Element>()
                    == Some(&backdrop_element)
            {
                on_close.emit(());
            }
        })
    };

    let on_close_click = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div
            ref={backdrop_ref}
            onclick={on_backdrop_click}
            class="fixed inset-0 bg-black bg-opacity-50 z-50 flex
                   items-center justify-center p-4"
        >
            <div
                role="dialog"
                aria-modal="true"
                class={classes!(
                    "relative", "bg-white", "rounded-lg", "shadow-xl",
                    "w-full", "p-6", props.max_width.to_string()
                )}
            >
                <button
                    type="button"
                    onclick={on_close_click}
                    aria-label="Close"
                    class="absolute top-3 right-3 text-gray-400
                           hover:text-gray-600"
                >
                    {"×"}
                </button>
                if let Some(title) = &props.title {
                    <h2 class="text-xl font-bold text-gray-900 mb-4 pr-6">
                        {title}
                    </h2>
                }
                {props.children.clone()}
            </div>
        </div>
    }
}
