use crate::domain::products::ui::list::ProductsList;
use crate::shared::theme::{ThemeProvider, ThemeToggle};
use crate::tracking::UploadTracking;
use crate::usecases::upload_csv::view::UploadWidget;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Единственный владелец изменяемого состояния jobs — контекст,
    // раздаваемый вниз по дереву
    provide_context(UploadTracking::new());

    view! {
        <ThemeProvider>
            <div class="page">
                <div class="page__header">
                    <h1 class="page__title">"Product Catalog"</h1>
                    <div class="page__header-right">
                        <ThemeToggle />
                    </div>
                </div>
                <div class="page__content">
                    <UploadWidget />
                    <ProductsList />
                </div>
            </div>
        </ThemeProvider>
    }
}
