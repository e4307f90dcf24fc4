//! Central panel routing, each view behind its own error boundary

use super::{contract, home, raw, App};
use crate::theme;
use crate::types::*;
use crate::ui::boundary::FALLBACK_TEXT;
use crate::ui::components;
use eframe::egui;

impl App {
    pub(crate) fn render_central(&mut self, ctx: &egui::Context) {
        let p = self.theme.palette();

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(p.bg_base)
                    .inner_margin(egui::Margin::symmetric(24, 16)),
            )
            .show(ctx, |ui| {
                self.central_panel_rect = Some(ui.max_rect());

                if self.route == Route::MetroMap {
                    // The canvas handles its own scrolling and zoom
                    self.render_route(ui);
                    return;
                }

                egui::ScrollArea::vertical()
                    .id_salt(("route_scroll", self.route))
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.set_max_width(theme::CONTENT_MAX_WIDTH);
                            ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                                self.render_route(ui);
                            });
                        });
                    });
            });
    }

    fn render_route(&mut self, ui: &mut egui::Ui) {
        let route = self.route;
        let p = self.theme.palette();
        let fallback = |ui: &mut egui::Ui| {
            components::centered_message(ui, p.status_error, FALLBACK_TEXT);
        };

        // Views that do not depend on the catalog
        match route {
            Route::Home => {
                let mut navigate = None;
                let theme = &self.theme;
                self.boundaries.show(ui, route, |ui| navigate = home::show_home(ui, theme), fallback);
                if let Some(next) = navigate {
                    self.navigate(next);
                }
                return;
            }
            Route::MetroMap => {
                let (metro, theme) = (&mut self.metro, &self.theme);
                self.boundaries.show(ui, route, |ui| metro.show(ui, theme), fallback);
                return;
            }
            Route::RawData => {
                let (theme, load) = (&self.theme, &self.load);
                let source = self.source.describe();
                self.boundaries
                    .show(ui, route, |ui| raw::show_raw(ui, theme, load, &source), fallback);
                return;
            }
            _ => {}
        }

        let catalog = match &self.load {
            LoadState::Loading => {
                components::centered_message(ui, p.text_muted, "Loading...");
                return;
            }
            LoadState::Failed(message) => {
                components::centered_message(ui, p.status_error, &format!("Error: {}", message));
                return;
            }
            LoadState::Ready(catalog) => catalog,
        };

        let theme = &self.theme;
        let mut export = false;
        let mut page_size_changed = false;
        match route {
            Route::DataDictionary => {
                let dictionary = &mut self.dictionary;
                self.boundaries.show(
                    ui,
                    route,
                    |ui| {
                        let action = dictionary.show(ui, theme, &catalog.data);
                        export = action.export;
                        page_size_changed = action.page_size_changed;
                    },
                    fallback,
                );
            }
            Route::DataContract => {
                self.boundaries.show(
                    ui,
                    route,
                    |ui| contract::show_contract(ui, theme, &catalog.data.contract),
                    fallback,
                );
            }
            Route::Changelog => {
                let changelog = &mut self.changelog;
                self.boundaries.show(
                    ui,
                    route,
                    |ui| changelog.show(ui, theme, &catalog.data.changelog),
                    fallback,
                );
            }
            Route::Home | Route::MetroMap | Route::RawData => {}
        }

        if page_size_changed {
            self.save_settings();
        }
        if export {
            let entries = catalog.data.dictionary.clone();
            self.export_dictionary(&entries);
        }
    }
}
