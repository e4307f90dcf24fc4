//! Raw JSON viewer for the loaded catalog document

use crate::theme::{self, ThemeController};
use crate::types::LoadState;
use crate::ui::components;
use crate::utils::format_count;
use eframe::egui;

pub(crate) fn show_raw(ui: &mut egui::Ui, theme: &ThemeController, state: &LoadState, source: &str) {
    let p = theme.palette();
    let catalog = match state {
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

    ui.horizontal(|ui| {
        components::page_heading(ui, p, "JSON Data:", Some(source));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
            if ui
                .add(theme::button(p, format!("{}  Copy", egui_phosphor::regular::COPY)))
                .clicked()
            {
                ui.ctx().copy_text(catalog.raw_pretty.clone());
            }
        });
    });

    if catalog.dropped > 0 {
        ui.label(
            egui::RichText::new(format!(
                "{}  {} malformed record(s) were skipped while loading.",
                egui_phosphor::regular::WARNING,
                format_count(catalog.dropped)
            ))
            .size(theme::FONT_LABEL)
            .color(p.status_warning),
        );
        ui.add_space(theme::SPACING_SM);
    }

    theme::section_frame(p).show(ui, |ui| {
        egui::ScrollArea::both()
            .id_salt("raw_json")
            .auto_shrink([false, true])
            .max_height(ui.available_height().max(400.0))
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut catalog.raw_pretty.as_str())
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
    });
}
