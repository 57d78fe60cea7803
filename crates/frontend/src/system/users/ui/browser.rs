//! Браузерные реализации подтверждения и таймера для view-model

use std::time::Duration;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::system::users::view_model::{ConfirmDialog, ManagementState, StateStore, Timer};

/// `window.confirm`; без window ответ всегда "нет"
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConfirm;

impl ConfirmDialog for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// `setTimeout` через gloo; хэндл отпускается, задача выполняется всегда
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }
}

impl StateStore for RwSignal<ManagementState> {
    fn read<R: Default>(&self, f: impl FnOnce(&ManagementState) -> R) -> R {
        self.try_with_untracked(f).unwrap_or_default()
    }

    fn write<R: Default>(&self, f: impl FnOnce(&mut ManagementState) -> R) -> R {
        self.try_update(f).unwrap_or_default()
    }
}
