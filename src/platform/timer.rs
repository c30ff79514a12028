//! Cancellable `setTimeout` wrapper

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// A scheduled one-shot callback
///
/// Dropping the handle clears the timeout if it has not fired yet.
pub struct Timeout {
    handle: i32,
    // Kept alive until the callback runs or the timeout is cleared
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn schedule<F>(delay_ms: u32, callback: F) -> Option<Self>
    where
        F: FnOnce() + 'static,
    {
        let window = web_sys::window()?;
        let mut callback = Some(callback);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(callback) = callback.take() {
                callback();
            }
        });
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )
            .ok()?;
        Some(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}
