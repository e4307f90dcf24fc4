//! Reusable UI components
//!
//! Small painted widgets shared by the views. Colours always come from the
//! palette passed in, never from globals, so a theme toggle takes effect on
//! the next frame.

use crate::theme::{self, Palette, ThemeMode};
use eframe::egui;

/// Checkbox fill state; `Partial` is used by the "select visible" header box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Off,
    Partial,
    On,
}

impl CheckState {
    pub fn from_counts(selected: usize, total: usize) -> Self {
        if total == 0 || selected == 0 {
            Self::Off
        } else if selected == total {
            Self::On
        } else {
            Self::Partial
        }
    }
}

/// Custom checkbox widget with consistent styling
pub fn styled_checkbox(ui: &mut egui::Ui, p: &Palette, state: CheckState, size: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let rounding = 3.0;

        match state {
            CheckState::On => {
                painter.rect_filled(rect, rounding, p.accent);
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    egui_phosphor::regular::CHECK,
                    egui::FontId::proportional(size * 0.7),
                    p.accent_text,
                );
            }
            CheckState::Partial => {
                painter.rect_stroke(
                    rect,
                    rounding,
                    egui::Stroke::new(1.5, p.accent),
                    egui::StrokeKind::Inside,
                );
                let bar = egui::Rect::from_center_size(rect.center(), egui::vec2(size * 0.5, 2.0));
                painter.rect_filled(bar, 1.0, p.accent);
            }
            CheckState::Off => {
                let stroke = if response.hovered() { p.accent } else { p.border_default };
                painter.rect_stroke(
                    rect,
                    rounding,
                    egui::Stroke::new(1.5, stroke),
                    egui::StrokeKind::Inside,
                );
            }
        }
    }

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response
}

/// Rounded chip for one domain value
pub fn domain_chip(ui: &mut egui::Ui, domain: &str, mode: ThemeMode) {
    let (bg, fg) = theme::domain_colors(domain, mode);
    let font = egui::FontId::proportional(theme::FONT_SMALL);
    let galley = ui.fonts(|f| f.layout_no_wrap(domain.to_string(), font, fg));
    let size = galley.size() + egui::vec2(12.0, 6.0);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    if ui.is_rect_visible(rect) {
        ui.painter().rect_filled(rect, theme::RADIUS_MEDIUM, bg);
        ui.painter()
            .galley(rect.center() - galley.size() / 2.0, galley, fg);
    }
}

/// Check or cross icon for a boolean column
pub fn bool_icon(ui: &mut egui::Ui, p: &Palette, value: bool) {
    let (icon, color) = if value {
        (egui_phosphor::regular::CHECK_CIRCLE, p.status_success)
    } else {
        (egui_phosphor::regular::X_CIRCLE, p.status_error)
    };
    ui.add(
        egui::Label::new(egui::RichText::new(icon).size(16.0).color(color)).selectable(false),
    );
}

/// Small red "BETA" badge
pub fn beta_badge(ui: &mut egui::Ui) {
    let font = egui::FontId::proportional(theme::FONT_CAPTION);
    let galley = ui.fonts(|f| f.layout_no_wrap("BETA".to_string(), font, egui::Color32::WHITE));
    let size = galley.size() + egui::vec2(8.0, 4.0);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, theme::RADIUS_DEFAULT, theme::BADGE_BETA);
    ui.painter()
        .galley(rect.center() - galley.size() / 2.0, galley, egui::Color32::WHITE);
}

/// Page heading with an optional muted subtitle
pub fn page_heading(ui: &mut egui::Ui, p: &Palette, title: &str, subtitle: Option<&str>) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(title)
                .size(theme::FONT_TITLE)
                .strong()
                .color(p.text_primary),
        )
        .selectable(false),
    );
    if let Some(subtitle) = subtitle {
        ui.add(
            egui::Label::new(egui::RichText::new(subtitle).size(theme::FONT_LABEL).color(p.text_muted))
                .selectable(false),
        );
    }
    ui.add_space(theme::SPACING_LG);
}

/// Centred placeholder used for "Loading..." and error states
pub fn centered_message(ui: &mut egui::Ui, color: egui::Color32, text: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(egui::RichText::new(text).size(theme::FONT_BODY).color(color));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_state_from_counts() {
        assert_eq!(CheckState::from_counts(0, 0), CheckState::Off);
        assert_eq!(CheckState::from_counts(0, 4), CheckState::Off);
        assert_eq!(CheckState::from_counts(2, 4), CheckState::Partial);
        assert_eq!(CheckState::from_counts(4, 4), CheckState::On);
    }
}
