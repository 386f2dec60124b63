mod state;

use contracts::products::dto::ProductDto;
use contracts::products::status::collect_line_errors;
use futures::future::join_all;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::{ProductListState, SortColumn, PAGE_SIZE_OPTIONS};
use thaw::*;

use crate::domain::products::api;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::debounce::Debouncer;
use crate::shared::export::{build_csv_document, download_csv};
use crate::shared::icons::icon;
use crate::shared::sanitize::strip_markup;
use crate::tracking::UploadTracking;
use crate::usecases::upload_csv::api as upload_api;

/// Окно debounce для текстовых фильтров
const FILTER_DEBOUNCE_MS: u32 = 300;
/// Короткий fade при смене страницы (только презентация)
const PAGE_FADE_MS: u32 = 300;

#[component]
pub fn ProductsList() -> impl IntoView {
    let tracking = use_context::<UploadTracking>().expect("UploadTracking context not found");

    let state = RwSignal::new(ProductListState::default());
    let (items, set_items) = signal(Vec::<ProductDto>::new());
    let (is_loading, set_is_loading) = signal(false);
    let (fetch_error, set_fetch_error) = signal(Option::<String>::None);
    let (is_transitioning, set_is_transitioning) = signal(false);

    // Локальное эхо текстовых фильтров (до debounce-commit'а)
    let local_name = RwSignal::new(String::new());
    let local_price = RwSignal::new(String::new());
    let local_expiration = RwSignal::new(String::new());

    let name_debounce = Debouncer::new(FILTER_DEBOUNCE_MS);
    let price_debounce = Debouncer::new(FILTER_DEBOUNCE_MS);
    let expiration_debounce = Debouncer::new(FILTER_DEBOUNCE_MS);

    // Поколение запроса: ответ вытесненного fetch'а отбрасывается
    let fetch_epoch = StoredValue::new(0u64);

    on_cleanup(move || {
        name_debounce.cancel();
        price_debounce.cancel();
        expiration_debounce.cancel();
    });

    let load = move || {
        fetch_epoch.update_value(|e| *e += 1);
        let epoch = fetch_epoch.get_value();
        set_is_loading.set(true);

        let st = state.get_untracked();
        spawn_local(async move {
            let (sort_by, order) = st.sort_params();
            let result = api::fetch_products(
                st.page,
                st.limit,
                &st.name_filter,
                &st.price_filter,
                &st.expiration_filter,
                sort_by,
                order,
            )
            .await;

            // last-committed-query-wins: этот ответ уже никому не нужен
            if fetch_epoch.get_value() != epoch {
                return;
            }

            match result {
                Ok(response) => {
                    set_items.set(response.data);
                    state.update(|s| {
                        s.apply_page(
                            response.page,
                            response.limit,
                            response.total,
                            response.total_pages,
                        )
                    });
                    set_fetch_error.set(None);
                }
                Err(e) => {
                    // прежняя страница остаётся на экране
                    log::error!("products fetch failed: {}", e);
                    set_fetch_error.set(Some(e));
                }
            }
            set_is_loading.set(false);
        });
    };

    // Каждое зафиксированное изменение параметров сначала прячет ошибки
    // прежнего контекста jobs, затем перезапрашивает товары
    let commit_and_reload = move || {
        tracking.clear_status_display();
        load();
    };

    // Первичная загрузка
    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load();
        }
    });

    // Восстановленные после перезагрузки jobs опрашиваем один раз, чтобы
    // список ошибок снова появился; poll-цикл при этом не запускается
    Effect::new(move |_| {
        let job_ids = tracking.job_ids.get();
        if job_ids.is_empty() || !tracking.should_fetch_statuses.get() {
            return;
        }
        let epoch = tracking.current_poll_epoch();
        spawn_local(async move {
            let results =
                join_all(job_ids.iter().map(|id| upload_api::fetch_upload_status(id))).await;
            for (job_id, result) in job_ids.iter().zip(results) {
                match result {
                    Ok(status) => {
                        tracking.apply_status(epoch, job_id, status);
                    }
                    Err(e) => log::warn!("status fetch failed for job {}: {}", job_id, e),
                }
            }
        });
    });

    // Debounce-commit'ы фильтров: один commit на паузу ввода
    Effect::new(move |_| {
        let value = local_name.get();
        if value == state.with_untracked(|s| s.name_filter.clone()) {
            return;
        }
        name_debounce.schedule(move || {
            state.update(|s| s.commit_name_filter(value));
            commit_and_reload();
        });
    });
    Effect::new(move |_| {
        let value = local_price.get();
        if value == state.with_untracked(|s| s.price_filter.clone()) {
            return;
        }
        price_debounce.schedule(move || {
            state.update(|s| s.commit_price_filter(value));
            commit_and_reload();
        });
    });
    Effect::new(move |_| {
        let value = local_expiration.get();
        if value == state.with_untracked(|s| s.expiration_filter.clone()) {
            return;
        }
        expiration_debounce.schedule(move || {
            state.update(|s| s.commit_expiration_filter(value));
            commit_and_reload();
        });
    });

    let handle_sort = move |column: SortColumn| {
        if is_loading.get_untracked() {
            return;
        }
        state.update(|s| s.toggle_sort(column));
        commit_and_reload();
    };

    let handle_limit_change = move |limit: u32| {
        if is_loading.get_untracked() {
            return;
        }
        state.update(|s| s.set_limit(limit));
        commit_and_reload();
    };

    let handle_page_change = move |new_page: u32| {
        let allowed =
            state.with_untracked(|s| s.can_change_page(new_page, is_loading.get_untracked()));
        if !allowed {
            return;
        }
        set_is_transitioning.set(true);
        spawn_local(async move {
            TimeoutFuture::new(PAGE_FADE_MS).await;
            tracking.clear_status_display();
            state.update(|s| s.page = new_page);
            load();
            set_is_transitioning.set(false);
        });
    };

    // Экспорт видимой страницы; никакого fetch'а
    let export_csv = move |_| {
        let rows = items.get_untracked();
        let page = state.with_untracked(|s| s.page);
        let document = build_csv_document(&rows);
        if let Err(e) = download_csv(&document, &format!("products_page_{}.csv", page)) {
            log::error!("CSV export failed: {}", e);
        }
    };

    // Пересчитывается при каждом обращении, без кеша
    let all_errors = Signal::derive(move || {
        let job_ids = tracking.job_ids.get();
        tracking
            .statuses
            .with(|statuses| collect_line_errors(&job_ids, statuses))
    });

    let fade_style = move || {
        if is_transitioning.get() {
            "opacity: 0.5; transition: opacity 0.3s ease;"
        } else {
            "opacity: 1; transition: opacity 0.3s ease;"
        }
    };

    view! {
        <div class="card">
            <div class="card__body">
                {move || {
                    let errors = all_errors.get();
                    if errors.is_empty() {
                        view! { <></> }.into_any()
                    } else {
                        view! {
                            <div class="warning-box warning-box--error">
                                <div class="warning-box__text">
                                    <h2 class="section-title">"Errors in Upload"</h2>
                                    <ul class="error-list">
                                        {errors.into_iter().map(|e| view! {
                                            <li>{format!("Line {}: {}", e.line, e.error)}</li>
                                        }).collect_view()}
                                    </ul>
                                </div>
                            </div>
                        }.into_any()
                    }
                }}

                {move || fetch_error.get().map(|e| view! {
                    <div class="alert alert--error">
                        {format!("Failed to load products: {}", e)}
                    </div>
                })}

                <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::End>
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div style="width: 200px;">
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Name:"</Label>
                                <Input value=local_name placeholder="Filter by name..."/>
                            </Flex>
                        </div>
                        <div style="width: 140px;">
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Price:"</Label>
                                <input
                                    class="form__input"
                                    type="number"
                                    placeholder="Filter by price..."
                                    prop:value=move || local_price.get()
                                    on:input=move |ev| local_price.set(event_target_value(&ev))
                                />
                            </Flex>
                        </div>
                        <div style="width: 170px;">
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Expiration:"</Label>
                                <input
                                    class="form__input"
                                    type="date"
                                    prop:value=move || local_expiration.get()
                                    on:change=move |ev| local_expiration.set(event_target_value(&ev))
                                />
                            </Flex>
                        </div>
                        <div style="width: 130px;">
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Per page:"</Label>
                                <select
                                    class="form__select"
                                    prop:value=move || state.get().limit.to_string()
                                    on:change=move |ev| {
                                        let value = event_target_value(&ev).parse().unwrap_or(10);
                                        handle_limit_change(value);
                                    }
                                >
                                    {PAGE_SIZE_OPTIONS.iter().map(|&size| view! {
                                        <option value={size.to_string()}>
                                            {format!("{} per page", size)}
                                        </option>
                                    }).collect_view()}
                                </select>
                            </Flex>
                        </div>
                    </Flex>
                    <Button appearance=ButtonAppearance::Primary on_click=export_csv>
                        {icon("download")}
                        " Export to CSV"
                    </Button>
                </Flex>

                <div class="table-wrapper" style=fade_style>
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>
                                    "Name"
                                    <span
                                        style="cursor: pointer;"
                                        on:click=move |_| handle_sort(SortColumn::Name)
                                    >
                                        {move || state.get().sort_indicator(SortColumn::Name)}
                                    </span>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    "Price"
                                    <span
                                        style="cursor: pointer;"
                                        on:click=move |_| handle_sort(SortColumn::Price)
                                    >
                                        {move || state.get().sort_indicator(SortColumn::Price)}
                                    </span>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    "Expiration"
                                    <span
                                        style="cursor: pointer;"
                                        on:click=move |_| handle_sort(SortColumn::Expiration)
                                    >
                                        {move || state.get().sort_indicator(SortColumn::Expiration)}
                                    </span>
                                </TableHeaderCell>
                                <TableHeaderCell>"USD"</TableHeaderCell>
                                <TableHeaderCell>"EUR"</TableHeaderCell>
                                <TableHeaderCell>"GBP"</TableHeaderCell>
                                <TableHeaderCell>"JPY"</TableHeaderCell>
                                <TableHeaderCell>"BRL"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || items.get().into_iter().map(|product| {
                                let clean_name = strip_markup(&product.name);
                                let rates = product.exchange_rates;
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <span inner_html=clean_name></span>
                                        </TableCell>
                                        <TableCell class="text-right">{product.price.to_string()}</TableCell>
                                        <TableCell>{product.expiration.format("%Y-%m-%d").to_string()}</TableCell>
                                        <TableCell class="text-right">{format!("{:.2}", rates.usd)}</TableCell>
                                        <TableCell class="text-right">{format!("{:.2}", rates.eur)}</TableCell>
                                        <TableCell class="text-right">{format!("{:.2}", rates.gbp)}</TableCell>
                                        <TableCell class="text-right">{format!("{:.2}", rates.jpy)}</TableCell>
                                        <TableCell class="text-right">{format!("{:.2}", rates.brl)}</TableCell>
                                    </TableRow>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                    {move || {
                        if is_loading.get() {
                            view! { <div class="table-placeholder">"Loading..."</div> }.into_any()
                        } else if items.with(|rows| rows.is_empty()) {
                            view! { <div class="table-placeholder">"No products to display"</div> }.into_any()
                        } else {
                            view! { <></> }.into_any()
                        }
                    }}
                </div>

                <PaginationControls
                    page=Signal::derive(move || state.get().page)
                    total_pages=Signal::derive(move || state.get().total_pages)
                    is_loading=is_loading
                    is_transitioning=is_transitioning
                    on_page_change=Callback::new(handle_page_change)
                />
            </div>
        </div>
    }
}
