//! Toast notifications (bottom-right of the central panel)

use super::App;
use crate::theme;
use crate::utils;
use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

const VISIBLE_SECS: f32 = 4.0;
const FADE_SECS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub(crate) struct Toast {
    pub message: String,
    pub kind: ToastKind,
    /// Offered as "Open folder" when set
    pub reveal: Option<PathBuf>,
    pub start: Instant,
}

impl Toast {
    /// Opacity at `elapsed` seconds, `None` once fully faded
    fn alpha(elapsed: f32) -> Option<f32> {
        if elapsed >= VISIBLE_SECS + FADE_SECS {
            None
        } else if elapsed > VISIBLE_SECS {
            Some((VISIBLE_SECS + FADE_SECS - elapsed) / FADE_SECS)
        } else {
            Some(1.0)
        }
    }
}

impl App {
    pub(crate) fn show_toast(&mut self, kind: ToastKind, message: impl Into<String>, reveal: Option<PathBuf>) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
            reveal,
            start: Instant::now(),
        });
    }

    /// 4s visible then fade, paused while hovered
    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        let (Some(toast), Some(panel_rect)) = (self.toast.clone(), self.central_panel_rect) else {
            return;
        };
        let p = self.theme.palette();
        let Some(alpha) = Toast::alpha(toast.start.elapsed().as_secs_f32()) else {
            self.toast = None;
            return;
        };

        let accent = match toast.kind {
            ToastKind::Success => p.accent,
            ToastKind::Error => p.status_error,
        };
        let icon = match toast.kind {
            ToastKind::Success => egui_phosphor::regular::CHECK_CIRCLE,
            ToastKind::Error => egui_phosphor::regular::WARNING_CIRCLE,
        };
        let margin = 16.0;
        let mut open_folder = false;

        let response = egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin))
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .show(ctx, |ui| {
                ui.set_opacity(alpha);
                egui::Frame::new()
                    .fill(p.window_fill)
                    .stroke(egui::Stroke::new(1.0, accent))
                    .corner_radius(theme::RADIUS_MEDIUM)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(icon).color(accent));
                            ui.label(egui::RichText::new(&toast.message).color(p.text_primary));
                            if toast.reveal.is_some() {
                                ui.add_space(theme::SPACING_MD);
                                if ui
                                    .link(format!("{}  Open folder", egui_phosphor::regular::FOLDER_OPEN))
                                    .clicked()
                                {
                                    open_folder = true;
                                }
                            }
                        });
                    });
            });

        if open_folder {
            if let Some(path) = &toast.reveal {
                utils::reveal_in_file_manager(path);
            }
            self.toast = None;
            return;
        }

        // Pause timer while hovering
        if response.response.contains_pointer() {
            if let Some(current) = self.toast.as_mut() {
                current.start = Instant::now();
            }
        }
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_fades_then_expires() {
        assert_eq!(Toast::alpha(0.0), Some(1.0));
        assert_eq!(Toast::alpha(VISIBLE_SECS), Some(1.0));
        let mid = Toast::alpha(VISIBLE_SECS + FADE_SECS / 2.0).unwrap();
        assert!((mid - 0.5).abs() < 1e-4);
        assert_eq!(Toast::alpha(VISIBLE_SECS + FADE_SECS), None);
    }
}
