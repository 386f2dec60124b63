//! Общее состояние отслеживания загрузки: jobs текущей сессии, карта их
//! статусов и эпоха опроса.
//!
//! Набор job ids переживает перезагрузку страницы (один namespaced ключ в
//! localStorage); карта статусов — нет, она восстанавливается повторным
//! запросом. Все мутации идут через методы контекста.

use contracts::products::dto::UploadStatusDto;
use leptos::prelude::*;
use std::collections::HashMap;

const JOB_IDS_KEY: &str = "csv_products_job_ids_v1";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn load_job_ids() -> Vec<String> {
    storage()
        .and_then(|s| s.get_item(JOB_IDS_KEY).ok().flatten())
        .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
        .unwrap_or_default()
}

fn save_job_ids(ids: &[String]) {
    let Some(storage) = storage() else { return };
    let Ok(raw) = serde_json::to_string(ids) else {
        return;
    };
    let _ = storage.set_item(JOB_IDS_KEY, &raw);
}

#[derive(Clone, Copy)]
pub struct UploadTracking {
    pub job_ids: RwSignal<Vec<String>>,
    pub statuses: RwSignal<HashMap<String, UploadStatusDto>>,
    /// После перезагрузки страницы статусы восстановленных jobs нужно
    /// дозапросить один раз; commit изменений списка сбрасывает флаг
    pub should_fetch_statuses: RwSignal<bool>,
    poll_epoch: RwSignal<u64>,
}

impl UploadTracking {
    pub fn new() -> Self {
        let persisted = load_job_ids();
        let has_jobs = !persisted.is_empty();
        Self {
            job_ids: RwSignal::new(persisted),
            statuses: RwSignal::new(HashMap::new()),
            should_fetch_statuses: RwSignal::new(has_jobs),
            poll_epoch: RwSignal::new(0),
        }
    }

    /// Новая загрузка вытесняет предыдущую: сохраняем ids, сбрасываем карту
    /// статусов и поднимаем эпоху, чтобы прежний цикл опроса замолчал.
    /// Возвращает эпоху для нового цикла.
    pub fn track_jobs(&self, ids: Vec<String>) -> u64 {
        save_job_ids(&ids);
        self.job_ids.set(ids);
        self.statuses.set(HashMap::new());
        self.should_fetch_statuses.set(true);
        self.bump_poll_epoch()
    }

    /// Очистка только отображения; активный цикл опроса не трогаем
    pub fn clear_status_display(&self) {
        self.statuses.set(HashMap::new());
        self.should_fetch_statuses.set(false);
    }

    pub fn current_poll_epoch(&self) -> u64 {
        self.poll_epoch.get_untracked()
    }

    pub fn is_current_poll(&self, epoch: u64) -> bool {
        self.poll_epoch.get_untracked() == epoch
    }

    /// Инвалидация всех выданных эпох (новая загрузка, размонтирование)
    pub fn bump_poll_epoch(&self) -> u64 {
        self.poll_epoch.update(|e| *e += 1);
        self.poll_epoch.get_untracked()
    }

    /// Полная замена статуса job'а; устаревшая эпоха — результат в корзину
    pub fn apply_status(&self, epoch: u64, job_id: &str, status: UploadStatusDto) -> bool {
        if !self.is_current_poll(epoch) {
            return false;
        }
        self.statuses.update(|map| {
            map.insert(job_id.to_string(), status);
        });
        true
    }
}
