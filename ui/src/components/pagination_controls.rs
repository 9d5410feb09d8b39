use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Current page (1-based)
    pub page: usize,
    pub total_pages: usize,
    /// Callback with the page to switch to
    pub on_page_change: Callback<usize>,
}

#[function_component]
pub fn PaginationControls(props: &Props) -> Html {
    let Props {
        page, total_pages, ..
    } = *props;

    if total_pages <= 1 {
        return html! {};
    }

    let on_previous = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |_: MouseEvent| {
            on_page_change.emit(page.saturating_sub(1).max(1));
        })
    };

    let on_next = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |_: MouseEvent| {
            on_page_change.emit((page + 1).min(total_pages));
        })
    };

    let prev_disabled = page <= 1;
    let next_disabled = page >= total_pages;

    let button_class = |disabled: bool| {
        if disabled {
            "px-4 py-2 border border-gray-300 rounded-md text-sm \
             font-medium text-gray-400 bg-gray-100 cursor-not-allowed"
        } else {
            "px-4 py-2 border border-gray-300 rounded-md text-sm \
             font-medium text-gray-700 bg-white hover:bg-gray-50 \
             transition-colors duration-200"
        }
    };

    html! {
        <nav
            aria-label="Pagination"
            class="flex items-center justify-between mt-8 pt-4 \
                   border-t border-gray-200"
        >
            <button
                onclick={on_previous}
                disabled={prev_disabled}
                class={button_class(prev_disabled)}
            >
                {"Previous"}
            </button>
            <span class="text-sm text-gray-600">
                {format!("Page {page} of {total_pages}")}
            </span>
            <button
                onclick={on_next}
                disabled={next_disabled}
                class={button_class(next_disabled)}
            >
                {"Next"}
            </button>
        </nav>
    }
}
