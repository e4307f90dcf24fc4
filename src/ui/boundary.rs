//! Per-view error boundaries
//!
//! A panic while rendering a view is caught, logged, and the view is replaced
//! by its fallback for the rest of the session. Other views keep working.

use crate::types::Route;
use eframe::egui;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::error;

pub const FALLBACK_TEXT: &str = "Something went wrong.";

#[derive(Debug, Default)]
pub struct Boundaries {
    failed: HashMap<Route, String>,
}

impl Boundaries {
    pub fn has_failed(&self, route: Route) -> bool {
        self.failed.contains_key(&route)
    }

    /// Run `f` under the boundary for `route`. Returns `None` once the route
    /// has failed, without calling `f` again.
    pub fn guard<R>(&mut self, route: Route, f: impl FnOnce() -> R) -> Option<R> {
        if self.has_failed(route) {
            return None;
        }
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => Some(value),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(route = ?route, error = %message, "View crashed, showing fallback");
                self.failed.insert(route, message);
                None
            }
        }
    }

    /// Render a view, or its fallback if it has ever panicked
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        route: Route,
        render: impl FnOnce(&mut egui::Ui),
        fallback: impl FnOnce(&mut egui::Ui),
    ) {
        if self.guard(route, || render(ui)).is_none() {
            fallback(ui);
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_view_renders() {
        let mut boundaries = Boundaries::default();
        assert_eq!(boundaries.guard(Route::Home, || 7), Some(7));
        assert!(!boundaries.has_failed(Route::Home));
    }

    #[test]
    fn panic_is_permanent_and_isolated() {
        let mut boundaries = Boundaries::default();
        let result: Option<()> = boundaries.guard(Route::Changelog, || panic!("bad entry"));
        assert!(result.is_none());
        assert!(boundaries.has_failed(Route::Changelog));
        assert_eq!(boundaries.failed[&Route::Changelog], "bad entry");

        // Not retried, even if the view would now succeed
        let mut called = false;
        assert!(boundaries.guard(Route::Changelog, || called = true).is_none());
        assert!(!called);

        assert_eq!(boundaries.guard(Route::Home, || 1), Some(1));
    }

    #[test]
    fn show_falls_back_inside_a_frame() {
        let ctx = egui::Context::default();
        let mut boundaries = Boundaries::default();
        let mut fell_back = false;

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                boundaries.show(
                    ui,
                    Route::RawData,
                    |_ui| panic!("{}", String::from("formatted panic")),
                    |ui| {
                        ui.label(FALLBACK_TEXT);
                        fell_back = true;
                    },
                );
            });
        });

        assert!(fell_back);
        assert_eq!(boundaries.failed[&Route::RawData], "formatted panic");
    }
}
