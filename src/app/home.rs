//! Home / splash page

use crate::constants::APP_NAME;
use crate::theme::{self, Palette, ThemeController};
use crate::types::Route;
use eframe::egui;

struct FeatureCard {
    icon: &'static str,
    lead: &'static str,
    emphasis: &'static str,
    route: Route,
}

const FEATURES: [FeatureCard; 3] = [
    FeatureCard {
        icon: egui_phosphor::regular::TREE_STRUCTURE,
        lead: "Explore structured",
        emphasis: "Data Models",
        route: Route::DataDictionary,
    },
    FeatureCard {
        icon: egui_phosphor::regular::FILE_TEXT,
        lead: "Define and review",
        emphasis: "Contracts",
        route: Route::DataContract,
    },
    FeatureCard {
        icon: egui_phosphor::regular::BOOK_OPEN,
        lead: "Explore the",
        emphasis: "Data Dictionary",
        route: Route::DataDictionary,
    },
];

struct Layer {
    name: &'static str,
    summary: &'static str,
    example: &'static str,
    color: egui::Color32,
}

const MEDALLION: [Layer; 3] = [
    Layer {
        name: "Bronze Layer",
        summary: "Raw, unprocessed data.",
        example: "Example: Raw JSON logs, CSV files, or unprocessed IoT data",
        color: egui::Color32::from_rgb(0xcd, 0x7f, 0x32),
    },
    Layer {
        name: "Silver Layer",
        summary: "Cleaned, structured data.",
        example: "Example: Filtered data with structured fields, cleaned for analysis",
        color: egui::Color32::from_rgb(0xa8, 0xa9, 0xad),
    },
    Layer {
        name: "Gold Layer",
        summary: "Aggregated, high-value data.",
        example: "Example: Aggregated reports, KPIs, or ML-ready datasets",
        color: egui::Color32::from_rgb(0xd4, 0xaf, 0x37),
    },
];

const VERIFY_STEPS: [&str; 4] = [
    "Ensure your profile is fully completed with accurate details.",
    "Use an official email or link your account to a verified website.",
    "Engage actively in the platform by contributing high-quality data.",
    "Submit a verification request through the platform's settings.",
];

/// Returns the route of a clicked feature card
pub(crate) fn show_home(ui: &mut egui::Ui, theme: &ThemeController) -> Option<Route> {
    let p = theme.palette();
    let mut navigate = None;

    // Hero
    egui::Frame::new()
        .fill(p.accent.gamma_multiply(0.12))
        .corner_radius(theme::RADIUS_LARGE)
        .inner_margin(egui::Margin::symmetric(48, 56))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(APP_NAME)
                    .size(theme::FONT_HERO)
                    .strong()
                    .color(p.text_primary),
            );
            ui.add_space(theme::SPACING_MD);
            ui.label(
                egui::RichText::new(
                    "A modern platform designed to present structured data models, datasets, and contracts.",
                )
                .size(theme::FONT_HEADING)
                .color(p.text_secondary),
            );
        });

    ui.add_space(40.0);
    section_title(ui, p, "Explore Our Data Platform");
    ui.add_space(theme::SPACING_LG);

    ui.columns(FEATURES.len(), |cols| {
        for (ui, card) in cols.iter_mut().zip(FEATURES.iter()) {
            if feature_card(ui, theme, card) {
                navigate = Some(card.route);
            }
        }
    });

    ui.add_space(48.0);
    section_title(ui, p, "Medallion Architecture");
    ui.vertical_centered(|ui| {
        ui.set_max_width(800.0);
        ui.label(
            egui::RichText::new(
                "The Medallion Architecture organizes data into Bronze (Raw), Silver (Cleaned), \
                 and Gold (Refined) layers for better quality and analytics.",
            )
            .color(p.text_muted),
        );
    });
    ui.add_space(theme::SPACING_XL);
    ui.columns(MEDALLION.len(), |cols| {
        for (ui, layer) in cols.iter_mut().zip(MEDALLION.iter()) {
            ui.vertical_centered(|ui| {
                let (rect, resp) = ui.allocate_exact_size(egui::vec2(72.0, 72.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 34.0, layer.color);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    egui_phosphor::regular::MEDAL,
                    egui::FontId::proportional(32.0),
                    egui::Color32::WHITE,
                );
                resp.on_hover_text(layer.example);
                ui.add_space(theme::SPACING_MD);
                ui.label(egui::RichText::new(layer.name).strong().color(p.text_primary));
                ui.label(egui::RichText::new(layer.summary).color(p.text_muted));
            });
        }
    });

    ui.add_space(48.0);
    theme::card_frame(p).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal_top(|ui| {
            ui.label(
                egui::RichText::new(egui_phosphor::regular::SEAL_CHECK)
                    .size(64.0)
                    .color(p.accent),
            );
            ui.add_space(theme::SPACING_XL);
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new("How to Get a Verified Account")
                        .size(theme::FONT_TITLE)
                        .strong()
                        .color(p.text_primary),
                );
                ui.add_space(theme::SPACING_SM);
                ui.label(
                    egui::RichText::new("Verification enhances trust and authenticity. To become verified:")
                        .color(p.text_secondary),
                );
                for step in VERIFY_STEPS {
                    ui.label(egui::RichText::new(format!("•  {}", step)).color(p.text_secondary));
                }
                ui.add_space(theme::SPACING_SM);
                ui.label(
                    egui::RichText::new(
                        "Once submitted, our team will review your request. If approved, \
                         you'll receive a verified badge next to your name.",
                    )
                    .color(p.text_muted),
                );
            });
        });
    });
    ui.add_space(theme::SPACING_XL);

    navigate
}

fn section_title(ui: &mut egui::Ui, p: &Palette, text: &str) {
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(theme::FONT_TITLE)
                .strong()
                .color(p.text_primary),
        );
    });
}

/// Clickable icon card. Returns true if clicked.
fn feature_card(ui: &mut egui::Ui, theme: &ThemeController, card: &FeatureCard) -> bool {
    let p = theme.palette();
    let size = egui::vec2(ui.available_width(), 150.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    let (fill, rect) = theme::button_visual(&response, p.card_fill, rect, theme.mode());

    let painter = ui.painter();
    painter.rect_filled(rect, theme::RADIUS_LARGE, fill);
    painter.rect_stroke(
        rect,
        theme::RADIUS_LARGE,
        egui::Stroke::new(theme::STROKE_DEFAULT, p.border_subtle),
        egui::StrokeKind::Inside,
    );
    let icon_size = if response.hovered() { 52.0 } else { 46.0 };
    painter.text(
        rect.center() - egui::vec2(0.0, 20.0),
        egui::Align2::CENTER_CENTER,
        card.icon,
        egui::FontId::proportional(icon_size),
        p.accent,
    );
    painter.text(
        rect.center() + egui::vec2(0.0, 36.0),
        egui::Align2::CENTER_CENTER,
        format!("{} {}", card.lead, card.emphasis),
        egui::FontId::proportional(theme::FONT_BODY),
        p.text_secondary,
    );

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.clicked()
}
