//! Trailing-edge debounce: каждый новый вызов отменяет предыдущий таймер,
//! эффект срабатывает один раз после паузы ввода.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct Debouncer {
    delay_ms: u32,
    pending: StoredValue<Option<Timeout>, LocalStorage>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: StoredValue::new_local(None),
        }
    }

    /// Отменяет запланированное действие (если есть) и ставит новое
    pub fn schedule(&self, action: impl FnOnce() + 'static) {
        let pending = self.pending;
        let timeout = Timeout::new(self.delay_ms, move || {
            pending.set_value(None);
            action();
        });
        // замена предыдущего Timeout роняет его, drop отменяет таймер
        self.pending.set_value(Some(timeout));
    }

    /// Сброс при размонтировании: отложенный commit уже не выстрелит
    pub fn cancel(&self) {
        self.pending.set_value(None);
    }
}
