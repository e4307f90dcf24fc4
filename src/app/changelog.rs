//! Changelog accordion
//!
//! Released entries are listed newest first and revealed a few at a time;
//! planned entries (version "TODO") follow in their own section. One
//! accordion spans both sections, so at most one entry is open.

use crate::constants::CHANGELOG_PAGE;
use crate::theme::{self, Palette, ThemeController};
use crate::types::*;
use crate::ui::components;
use eframe::egui;
use tracing::debug;

/// Position of an entry in the loaded changelog
pub type EntryKey = usize;

#[derive(Debug, Clone)]
pub struct ChangelogView {
    expanded: Option<EntryKey>,
    shown: usize,
}

impl Default for ChangelogView {
    fn default() -> Self {
        Self {
            expanded: None,
            shown: CHANGELOG_PAGE,
        }
    }
}

impl ChangelogView {
    pub fn expanded(&self) -> Option<EntryKey> {
        self.expanded
    }

    pub fn is_expanded(&self, key: EntryKey) -> bool {
        self.expanded() == Some(key)
    }

    /// Open `key`, or close it if it is already open
    pub fn toggle(&mut self, key: EntryKey) {
        self.expanded = if self.expanded == Some(key) {
            None
        } else {
            Some(key)
        };
    }

    /// How many released entries are on screen
    pub fn visible_count(&self, released: usize) -> usize {
        self.shown.min(released)
    }

    pub fn all_shown(&self, released: usize) -> bool {
        self.shown >= released
    }

    pub fn load_more(&mut self) {
        self.shown += CHANGELOG_PAGE;
    }
}

/// Split into (released newest first, planned in document order)
pub fn partition(changelog: &[ChangelogEntry]) -> (Vec<EntryKey>, Vec<EntryKey>) {
    let (mut released, todo): (Vec<EntryKey>, Vec<EntryKey>) =
        (0..changelog.len()).partition(|&i| !changelog[i].is_todo());
    released.sort_by(|&a, &b| changelog[b].date.cmp(&changelog[a].date));
    (released, todo)
}

fn status_style(p: &Palette, status: ChangeStatus) -> (&'static str, egui::Color32) {
    match status {
        ChangeStatus::Done => (egui_phosphor::regular::CHECK_CIRCLE, p.status_success),
        ChangeStatus::InProgress => (egui_phosphor::regular::CIRCLE_DASHED, p.status_warning),
        ChangeStatus::Failed => (egui_phosphor::regular::X_CIRCLE, p.status_error),
    }
}

impl ChangelogView {
    pub(crate) fn show(&mut self, ui: &mut egui::Ui, theme: &ThemeController, changelog: &[ChangelogEntry]) {
        let p = theme.palette();
        let (released, todo) = partition(changelog);

        components::page_heading(ui, p, "Changelog", Some("Releases of the data catalog, newest first."));

        if released.is_empty() {
            ui.label(egui::RichText::new("No releases yet.").color(p.text_muted));
        }
        let visible = self.visible_count(released.len());
        for &key in &released[..visible] {
            self.entry_card(ui, theme, key, &changelog[key]);
            ui.add_space(theme::SPACING_MD);
        }

        if !released.is_empty() {
            ui.add_space(theme::SPACING_SM);
            ui.vertical_centered(|ui| {
                if self.all_shown(released.len()) {
                    ui.label(
                        egui::RichText::new(format!("{}  Oldest", egui_phosphor::regular::FLAG))
                            .size(theme::FONT_LABEL)
                            .color(p.text_dim),
                    );
                } else if ui
                    .add(theme::button(
                        p,
                        format!("{}  Load older logs", egui_phosphor::regular::CLOCK_COUNTER_CLOCKWISE),
                    ))
                    .clicked()
                {
                    self.load_more();
                    debug!(shown = self.visible_count(released.len()), "Loaded older changelog entries");
                }
            });
        }

        if !todo.is_empty() {
            ui.add_space(theme::SPACING_XL * 2.0);
            components::page_heading(ui, p, "To-Do", Some("Planned work that has not shipped yet."));
            for &key in &todo {
                self.entry_card(ui, theme, key, &changelog[key]);
                ui.add_space(theme::SPACING_MD);
            }
        }
    }

    fn entry_card(&mut self, ui: &mut egui::Ui, theme: &ThemeController, key: EntryKey, entry: &ChangelogEntry) {
        let p = theme.palette();
        let open = self.is_expanded(key);
        let (icon, status_color) = status_style(p, entry.status);
        let border = if open { status_color } else { p.border_subtle };

        let inner = theme::card_frame(p)
            .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, border))
            .inner_margin(egui::Margin::same(0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                let header_height = 48.0;
                let (rect, response) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width(), header_height),
                    egui::Sense::click(),
                );
                let (fill, rect) = theme::button_visual(&response, p.card_fill, rect, theme.mode());
                let painter = ui.painter();
                painter.rect_filled(rect, theme::RADIUS_LARGE, fill);
                if response.has_focus() {
                    painter.rect_stroke(
                        rect.shrink(1.0),
                        theme::RADIUS_LARGE,
                        egui::Stroke::new(theme::STROKE_THICK, p.accent),
                        egui::StrokeKind::Inside,
                    );
                }

                let y = rect.center().y;
                painter.text(
                    egui::pos2(rect.left() + 16.0, y),
                    egui::Align2::LEFT_CENTER,
                    icon,
                    egui::FontId::proportional(18.0),
                    status_color,
                );
                let title = if entry.is_todo() {
                    "Planned".to_string()
                } else {
                    format!("Version {}", entry.version)
                };
                let title_rect = painter.text(
                    egui::pos2(rect.left() + 44.0, y),
                    egui::Align2::LEFT_CENTER,
                    title,
                    egui::FontId::proportional(theme::FONT_HEADING),
                    p.text_primary,
                );
                painter.text(
                    egui::pos2(title_rect.right() + 12.0, y),
                    egui::Align2::LEFT_CENTER,
                    format!("{} · {}", entry.date.format("%B %-d, %Y"), entry.status.label()),
                    egui::FontId::proportional(theme::FONT_LABEL),
                    p.text_muted,
                );
                painter.text(
                    egui::pos2(rect.right() - 16.0, y),
                    egui::Align2::RIGHT_CENTER,
                    if open {
                        egui_phosphor::regular::CARET_DOWN
                    } else {
                        egui_phosphor::regular::CARET_RIGHT
                    },
                    egui::FontId::proportional(16.0),
                    p.text_muted,
                );

                if open {
                    egui::Frame::new()
                        .inner_margin(egui::Margin { left: 44, right: 16, top: 0, bottom: 14 })
                        .show(ui, |ui| {
                            if entry.changes.is_empty() {
                                ui.label(egui::RichText::new("No details recorded.").color(p.text_dim));
                            }
                            for change in &entry.changes {
                                if !change.title.is_empty() {
                                    ui.label(egui::RichText::new(&change.title).strong().color(p.text_primary));
                                }
                                ui.label(egui::RichText::new(&change.description).color(p.text_secondary));
                                ui.add_space(theme::SPACING_SM);
                            }
                        });
                }

                response
            });

        // clicked() also fires for Enter/Space while the header has keyboard focus
        let response = inner.inner;
        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        if response.clicked() {
            self.toggle(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(version: &str, date: &str) -> ChangelogEntry {
        ChangelogEntry {
            version: version.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            status: ChangeStatus::Done,
            changes: Vec::new(),
        }
    }

    #[test]
    fn at_most_one_entry_is_open() {
        let mut view = ChangelogView::default();
        assert_eq!(view.expanded(), None);

        view.toggle(0);
        assert!(view.is_expanded(0));
        view.toggle(3);
        assert!(view.is_expanded(3));
        assert!(!view.is_expanded(0));
        view.toggle(3);
        assert_eq!(view.expanded(), None);
    }

    #[test]
    fn todo_entries_are_kept_apart() {
        let log = vec![
            entry("1.0.0", "2023-01-01"),
            entry("todo", "2025-09-01"),
            entry("1.2.0", "2023-06-01"),
            entry("1.1.0", "2023-03-01"),
            entry("TODO", "2025-10-01"),
        ];
        let (released, todo) = partition(&log);
        assert_eq!(released, vec![2, 3, 0]);
        assert_eq!(todo, vec![1, 4]);
        assert!(released.iter().all(|&i| !log[i].is_todo()));
    }

    #[test]
    fn todo_entries_share_the_accordion() {
        let log = vec![entry("1.0.0", "2023-01-01"), entry("TODO", "2025-09-01")];
        let (released, todo) = partition(&log);
        let mut view = ChangelogView::default();

        view.toggle(released[0]);
        view.toggle(todo[0]);
        assert_eq!(view.expanded(), Some(1));
    }

    #[test]
    fn older_entries_load_in_pages() {
        let mut view = ChangelogView::default();
        assert_eq!(view.visible_count(8), 3);
        assert!(!view.all_shown(8));

        view.load_more();
        assert_eq!(view.visible_count(8), 6);
        view.load_more();
        assert_eq!(view.visible_count(8), 8);
        assert!(view.all_shown(8));

        assert_eq!(ChangelogView::default().visible_count(2), 2);
        assert!(ChangelogView::default().all_shown(2));
    }
}
