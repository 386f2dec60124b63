use leptos::prelude::*;
use thaw::*;

/// PaginationControls component - reusable Previous/Next pagination
///
/// Pages are 1-indexed. Граничные проверки и guard на активную загрузку
/// живут в обработчике владельца; кнопки лишь отражают их визуально.
#[component]
pub fn PaginationControls(
    /// Current page (1-indexed)
    #[prop(into)]
    page: Signal<u32>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<u32>,

    /// Fetch in flight: navigation disabled
    #[prop(into)]
    is_loading: Signal<bool>,

    /// Короткий fade при смене страницы (только презентация)
    #[prop(into)]
    is_transitioning: Signal<bool>,

    /// Callback when page changes
    on_page_change: Callback<u32>,
) -> impl IntoView {
    let fade_style = move || {
        if is_transitioning.get() {
            "opacity: 0.5; transition: opacity 0.3s ease;"
        } else {
            "opacity: 1; transition: opacity 0.3s ease;"
        }
    };

    view! {
        <div class="pagination-controls" style=fade_style>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <Button
                    on_click=move |_| {
                        let current = page.get();
                        if current > 1 {
                            on_page_change.run(current - 1);
                        }
                    }
                    disabled=Signal::derive(move || page.get() <= 1 || is_loading.get())
                >
                    "Previous"
                </Button>
                <span class="pagination-info">
                    {move || format!("Page {} of {}", page.get(), total_pages.get().max(1))}
                </span>
                <Button
                    on_click=move |_| {
                        on_page_change.run(page.get() + 1);
                    }
                    disabled=Signal::derive(move || page.get() >= total_pages.get() || is_loading.get())
                >
                    "Next"
                </Button>
            </Flex>
        </div>
    }
}
