//! Data contract details card

use crate::theme::{self, ThemeController};
use crate::types::ContractInfo;
use crate::ui::components;
use eframe::egui;

pub(crate) fn show_contract(ui: &mut egui::Ui, theme: &ThemeController, contract: &ContractInfo) {
    let p = theme.palette();
    components::page_heading(
        ui,
        p,
        "Data Contract",
        Some("Agreement between the producer and consumers of this dataset."),
    );

    ui.vertical_centered(|ui| {
        ui.set_max_width(800.0);
        theme::card_frame(p).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::FILE_TEXT)
                        .size(20.0)
                        .color(p.accent),
                );
                ui.label(
                    egui::RichText::new("Data Contract Details")
                        .size(theme::FONT_HEADING)
                        .strong()
                        .color(p.text_primary),
                );
            });
            ui.add_space(theme::SPACING_SM);
            ui.separator();
            ui.add_space(theme::SPACING_MD);

            egui::Grid::new("contract_fields")
                .num_columns(2)
                .spacing(egui::vec2(24.0, 12.0))
                .show(ui, |ui| {
                    for (label, value) in contract.fields() {
                        ui.label(
                            egui::RichText::new(format!("{}:", label))
                                .strong()
                                .color(p.text_secondary),
                        );
                        if value.is_empty() {
                            ui.label(egui::RichText::new("Not specified").italics().color(p.text_dim));
                        } else {
                            // Values can be copied
                            ui.add(
                                egui::Label::new(egui::RichText::new(value).color(p.text_primary))
                                    .selectable(true),
                            );
                        }
                        ui.end_row();
                    }
                });
        });
    });
}
