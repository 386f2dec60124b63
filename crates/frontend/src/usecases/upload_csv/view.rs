use super::api::{self, UploadError};
use super::machine::{self, UploadPhase};
use contracts::products::status::StatusAggregate;
use futures::future::join_all;
use gloo_timers::future::TimeoutFuture;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

use crate::tracking::UploadTracking;

/// Пауза между раундами опроса, без backoff
const POLL_INTERVAL_MS: u32 = 1000;

/// Один раунд опроса: веер запросов по всем jobs, результаты применяются
/// только при актуальной эпохе. `None` — цикл вытеснен и должен умолкнуть.
async fn poll_round(tracking: UploadTracking, epoch: u64) -> Option<StatusAggregate> {
    let job_ids = tracking.job_ids.get_untracked();
    let results = join_all(job_ids.iter().map(|id| api::fetch_upload_status(id))).await;
    if !tracking.is_current_poll(epoch) {
        return None;
    }
    for (job_id, result) in job_ids.iter().zip(results) {
        match result {
            Ok(status) => {
                tracking.apply_status(epoch, job_id, status);
            }
            // transient: job доедет на следующем тике, остальные не страдают
            Err(e) => log::warn!("status fetch failed for job {}: {}", job_id, e),
        }
    }
    let aggregate = tracking
        .statuses
        .with_untracked(|statuses| StatusAggregate::compute(&job_ids, statuses));
    Some(aggregate)
}

#[component]
pub fn UploadWidget() -> impl IntoView {
    let tracking = use_context::<UploadTracking>().expect("UploadTracking context not found");

    let (phase, set_phase) = signal(UploadPhase::Idle);
    let (message, set_message) = signal(Option::<String>::None);
    let (validation_error, set_validation_error) = signal(Option::<String>::None);
    let (has_file, set_has_file) = signal(false);
    let selected_file = StoredValue::new_local(Option::<web_sys::File>::None);
    let file_input_ref = NodeRef::<html::Input>::new();

    // Размонтирование формы глушит активный цикл опроса
    on_cleanup(move || {
        tracking.bump_poll_epoch();
    });

    // После завершения повторный клик — no-op, пока не выбран новый файл
    let clear_selected_file = move || {
        selected_file.set_value(None);
        set_has_file.set(false);
        if let Some(input) = file_input_ref.get_untracked() {
            input.set_value("");
        }
    };

    let run_poller = move |epoch: u64| {
        spawn_local(async move {
            loop {
                let Some(aggregate) = poll_round(tracking, epoch).await else {
                    return;
                };
                if aggregate.all_terminal {
                    set_phase.set(UploadPhase::Completed);
                    set_message.set(Some(machine::completion_message(aggregate.total_errors)));
                    clear_selected_file();
                    return;
                }
                set_message.set(Some(machine::progress_message(&aggregate)));
                TimeoutFuture::new(POLL_INTERVAL_MS).await;
                if !tracking.is_current_poll(epoch) {
                    return;
                }
            }
        });
    };

    let handle_file_change = move |ev: web_sys::Event| {
        set_validation_error.set(None);
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        let Some(input) = input else { return };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        if let Err(reason) = machine::validate_file(&file.type_(), file.size()) {
            set_validation_error.set(Some(reason));
            selected_file.set_value(None);
            set_has_file.set(false);
            set_phase.set(UploadPhase::Idle);
            set_message.set(None);
            return;
        }

        selected_file.set_value(Some(file));
        set_has_file.set(true);
        set_phase.set(UploadPhase::Idle);
        set_message.set(None);
    };

    let on_submit = move |_| {
        if phase.get_untracked().is_busy() {
            return;
        }
        let Some(file) = selected_file.get_value() else {
            return;
        };

        set_phase.set(UploadPhase::Uploading);
        set_message.set(Some(machine::MSG_SENDING.to_string()));

        spawn_local(async move {
            match api::upload_csv(&file).await {
                Ok(response) => {
                    let epoch = tracking.track_jobs(response.job_ids);
                    set_phase.set(UploadPhase::Processing);
                    set_message.set(Some(machine::MSG_PROCESSING_STARTED.to_string()));
                    run_poller(epoch);
                }
                Err(error) => {
                    let timed_out = matches!(error, UploadError::TimedOut);
                    set_phase.set(UploadPhase::Failed);
                    set_message.set(Some(machine::failure_message(&error.to_string(), timed_out)));
                }
            }
        });
    };

    let submit_disabled =
        Signal::derive(move || !machine::can_submit(has_file.get(), phase.get()));

    view! {
        <div class="card">
            <div class="card__body">
                <h2 class="section-title">"Upload products CSV"</h2>
                <div class="form__group">
                    <label class="form__label" for="csv-file-input">"Select a CSV file"</label>
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <input
                            id="csv-file-input"
                            class="form__input"
                            type="file"
                            accept=".csv"
                            node_ref=file_input_ref
                            on:change=handle_file_change
                            prop:disabled=move || phase.get().is_busy()
                        />
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=on_submit
                            disabled=submit_disabled
                        >
                            {move || phase.get().action_label()}
                        </Button>
                    </Flex>
                </div>
                {move || message.get().map(|text| {
                    let class = if phase.get() == UploadPhase::Failed {
                        "upload-message upload-message--error"
                    } else {
                        "upload-message"
                    };
                    view! { <p class=class>{text}</p> }
                })}
                {move || validation_error.get().map(|text| view! {
                    <p class="upload-message upload-message--error">{text}</p>
                })}
            </div>
        </div>
    }
}
