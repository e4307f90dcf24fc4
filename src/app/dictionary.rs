//! Data dictionary table: search, selection, sorting, paging and export

use super::{App, ToastKind};
use crate::constants::*;
use crate::export::{self, ExportError};
use crate::theme::{self, ThemeController};
use crate::types::*;
use crate::ui::components::{self, CheckState};
use eframe::egui;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::{debug, error};

// ============================================================================
// STATE
// ============================================================================

#[derive(Debug, Clone)]
pub struct DictionaryView {
    search: String,
    selection: BTreeSet<RowId>,
    sort: Option<(SortColumn, SortDirection)>,
    page: usize,
    page_size: usize,
}

/// What the table asked the app to do this frame
#[derive(Debug, Default)]
pub(crate) struct DictionaryAction {
    pub export: bool,
    pub page_size_changed: bool,
}

impl DictionaryView {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            selection: BTreeSet::new(),
            sort: None,
            page: 0,
            page_size: if PAGE_SIZES.contains(&page_size) {
                page_size
            } else {
                DEFAULT_PAGE_SIZE
            },
        }
    }

    /// Replace the filter string. Resets to the first page; never touches the selection.
    pub fn set_search_term(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.search {
            self.search = text;
            self.page = 0;
        }
    }

    pub fn selection(&self) -> &BTreeSet<RowId> {
        &self.selection
    }

    pub fn is_selected(&self, id: RowId) -> bool {
        self.selection.contains(&id)
    }

    fn is_visible(&self, entries: &[DictionaryEntry], id: RowId) -> bool {
        let needle = self.search.to_lowercase();
        entries
            .get(id.0)
            .is_some_and(|entry| matches_search(entry, &needle))
    }

    /// Insert on `included`; remove only while the row passes the filter.
    /// Returns whether the selection changed.
    pub fn toggle_selection(&mut self, entries: &[DictionaryEntry], id: RowId, included: bool) -> bool {
        if included {
            self.selection.insert(id)
        } else if self.is_visible(entries, id) {
            self.selection.remove(&id)
        } else {
            false
        }
    }

    /// Select or deselect every row passing the filter. Returns how many rows changed.
    pub fn set_visible_selection(&mut self, entries: &[DictionaryEntry], included: bool) -> usize {
        let needle = self.search.to_lowercase();
        let mut changed = 0;
        for (i, entry) in entries.iter().enumerate() {
            if !matches_search(entry, &needle) {
                continue;
            }
            let id = RowId(i);
            let did = if included {
                self.selection.insert(id)
            } else {
                self.selection.remove(&id)
            };
            if did {
                changed += 1;
            }
        }
        changed
    }

    pub fn sort(&self) -> Option<(SortColumn, SortDirection)> {
        self.sort
    }

    /// Ascending, then descending, then unsorted
    pub fn cycle_sort(&mut self, column: SortColumn) {
        self.sort = match self.sort {
            Some((c, SortDirection::Ascending)) if c == column => {
                Some((column, SortDirection::Descending))
            }
            Some((c, SortDirection::Descending)) if c == column => None,
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    /// Ids passing the filter, in display order
    pub fn visible_rows(&self, entries: &[DictionaryEntry]) -> Vec<RowId> {
        let needle = self.search.to_lowercase();
        let mut rows: Vec<RowId> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| matches_search(entry, &needle))
            .map(|(i, _)| RowId(i))
            .collect();

        if let Some((column, direction)) = self.sort {
            rows.sort_by(|a, b| {
                let ord = compare(&entries[a.0], &entries[b.0], column);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        rows
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, size: usize) {
        if PAGE_SIZES.contains(&size) && size != self.page_size {
            self.page_size = size;
            self.page = 0;
        }
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page.min(self.page_count(total) - 1);
    }

    /// The slice of `rows` on the current page
    pub fn page_rows<'a>(&self, rows: &'a [RowId]) -> &'a [RowId] {
        let page = self.page.min(self.page_count(rows.len()) - 1);
        let start = page * self.page_size;
        let end = (start + self.page_size).min(rows.len());
        &rows[start.min(end)..end]
    }
}

/// Case-insensitive substring match; `needle` must already be lowercase
pub fn matches_search(entry: &DictionaryEntry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    entry.term.to_lowercase().contains(needle)
        || entry.definition.to_lowercase().contains(needle)
        || entry.domain.iter().any(|d| d.to_lowercase().contains(needle))
        || entry.standard_or_fallback().to_lowercase().contains(needle)
}

fn compare(a: &DictionaryEntry, b: &DictionaryEntry, column: SortColumn) -> Ordering {
    let ci = |x: &str, y: &str| x.to_lowercase().cmp(&y.to_lowercase());
    match column {
        SortColumn::Term => ci(&a.term, &b.term),
        SortColumn::Definition => ci(&a.definition, &b.definition),
        SortColumn::AppearsInModel => a.appears_in_model.cmp(&b.appears_in_model),
        SortColumn::Domain => ci(
            &a.domain.join(DOMAIN_DELIMITER),
            &b.domain.join(DOMAIN_DELIMITER),
        ),
        SortColumn::Standard => ci(a.standard_or_fallback(), b.standard_or_fallback()),
    }
}

// ============================================================================
// RENDERING
// ============================================================================

impl DictionaryView {
    pub(crate) fn show(
        &mut self,
        ui: &mut egui::Ui,
        theme: &ThemeController,
        data: &CatalogData,
    ) -> DictionaryAction {
        let p = theme.palette();
        let entries = &data.dictionary;
        let mut action = DictionaryAction::default();

        components::page_heading(
            ui,
            p,
            "Data Dictionary",
            Some("Business terms, their definitions, and where they are used."),
        );

        // Toolbar: search on the left, export on the right
        ui.horizontal(|ui| {
            egui::Frame::new()
                .fill(p.bg_input)
                .stroke(egui::Stroke::new(1.0, p.border_subtle))
                .corner_radius(theme::RADIUS_DEFAULT)
                .inner_margin(egui::Margin::symmetric(8, 6))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(egui_phosphor::regular::MAGNIFYING_GLASS)
                                .color(p.text_dim),
                        );
                        let mut text = self.search.clone();
                        let resp = ui.add(
                            egui::TextEdit::singleline(&mut text)
                                .hint_text("Search terms, definitions, domains...")
                                .frame(false)
                                .desired_width(320.0),
                        );
                        if resp.changed() {
                            debug!(query = %text, "Dictionary search changed");
                            self.set_search_term(text);
                        }
                        if !self.search.is_empty()
                            && ui
                                .add(
                                    egui::Button::new(
                                        egui::RichText::new(egui_phosphor::regular::X).color(p.text_dim),
                                    )
                                    .frame(false),
                                )
                                .on_hover_text("Clear search")
                                .clicked()
                        {
                            self.set_search_term(String::new());
                        }
                    });
                });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = format!("{}  Export to Excel", egui_phosphor::regular::MICROSOFT_EXCEL_LOGO);
                let enabled = !self.selection.is_empty();
                let resp = ui
                    .add_enabled(enabled, theme::button_accent(p, label).min_size(egui::vec2(0.0, theme::BUTTON_HEIGHT)))
                    .on_disabled_hover_text("Select at least one term to export");
                if resp.clicked() {
                    action.export = true;
                }
            });
        });
        ui.add_space(theme::SPACING_MD);

        let rows = self.visible_rows(entries);
        self.set_page(self.page, rows.len());

        theme::section_frame(p).show(ui, |ui| {
            self.show_table(ui, theme, entries, &rows);
            ui.add_space(theme::SPACING_MD);
            if self.show_pager(ui, theme, entries.len(), rows.len()) {
                action.page_size_changed = true;
            }
        });

        ui.add_space(theme::SPACING_XL * 2.0);
        show_suffixes(ui, theme, &data.suffixes);

        action
    }

    fn show_table(
        &mut self,
        ui: &mut egui::Ui,
        theme: &ThemeController,
        entries: &[DictionaryEntry],
        rows: &[RowId],
    ) {
        use egui_extras::{Column, TableBuilder};

        let p = theme.palette();
        let mode = theme.mode();
        let row_height = theme::ROW_HEIGHT;
        let page_rows: Vec<RowId> = self.page_rows(rows).to_vec();
        let visible_selected = rows.iter().filter(|id| self.is_selected(**id)).count();
        let header_state = CheckState::from_counts(visible_selected, rows.len());

        let mut header_toggle: Option<bool> = None;
        let mut row_toggles: Vec<(RowId, bool)> = Vec::new();
        let mut sort_clicked: Option<SortColumn> = None;

        let available = ui.available_width() - 40.0;
        TableBuilder::new(ui)
            .striped(false)
            .resizable(false)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .sense(egui::Sense::click())
            .column(Column::exact(40.0))
            .column(Column::exact(available * 0.18).clip(true))
            .column(Column::exact(available * 0.38).clip(true))
            .column(Column::exact(available * 0.12))
            .column(Column::exact(available * 0.18).clip(true))
            .column(Column::remainder().clip(true))
            .header(36.0, |mut header| {
                header.col(|ui| {
                    ui.centered_and_justified(|ui| {
                        let resp = components::styled_checkbox(ui, p, header_state, theme::CHECKBOX_SIZE)
                            .on_hover_text("Select all visible terms");
                        if resp.clicked() {
                            header_toggle = Some(header_state != CheckState::On);
                        }
                    });
                });
                for column in SortColumn::ALL {
                    header.col(|ui| {
                        let sorted = self.sort.filter(|(c, _)| *c == column).map(|(_, d)| d);
                        let icon = match sorted {
                            Some(SortDirection::Ascending) => egui_phosphor::regular::CARET_UP,
                            Some(SortDirection::Descending) => egui_phosphor::regular::CARET_DOWN,
                            None => egui_phosphor::regular::CARET_UP_DOWN,
                        };
                        let color = if sorted.is_some() { p.text_primary } else { p.text_muted };
                        let resp = ui.add(
                            egui::Label::new(
                                egui::RichText::new(format!("{} {}", column.header(), icon))
                                    .size(theme::FONT_SMALL)
                                    .strong()
                                    .color(color),
                            )
                            .selectable(false)
                            .sense(egui::Sense::click()),
                        );
                        if resp.clicked() {
                            sort_clicked = Some(column);
                        }
                    });
                }
            })
            .body(|mut body| {
                body.ui_mut().visuals_mut().selection.bg_fill = p.row_selected;

                for id in &page_rows {
                    let entry = &entries[id.0];
                    let selected = self.is_selected(*id);
                    body.row(row_height, |mut row| {
                        row.set_selected(selected);

                        // Hover sense so the row receives the click
                        row.col(|ui| {
                            ui.centered_and_justified(|ui| {
                                let size = 16.0;
                                let (rect, _) =
                                    ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
                                if selected {
                                    ui.painter().rect_filled(rect, 3.0, p.accent);
                                    ui.painter().text(
                                        rect.center(),
                                        egui::Align2::CENTER_CENTER,
                                        egui_phosphor::regular::CHECK,
                                        egui::FontId::proportional(size * 0.7),
                                        p.accent_text,
                                    );
                                } else {
                                    ui.painter().rect_stroke(
                                        rect,
                                        3.0,
                                        egui::Stroke::new(1.5, p.border_default),
                                        egui::StrokeKind::Inside,
                                    );
                                }
                            });
                        });
                        row.col(|ui| {
                            ui.add(
                                egui::Label::new(egui::RichText::new(&entry.term).strong().color(p.text_primary))
                                    .truncate()
                                    .selectable(false),
                            );
                        });
                        row.col(|ui| {
                            ui.add(
                                egui::Label::new(egui::RichText::new(&entry.definition).color(p.text_secondary))
                                    .truncate()
                                    .selectable(false),
                            )
                            .on_hover_text(entry.definition.as_str());
                        });
                        row.col(|ui| {
                            components::bool_icon(ui, p, entry.appears_in_model);
                        });
                        row.col(|ui| {
                            ui.spacing_mut().item_spacing.x = 4.0;
                            for domain in &entry.domain {
                                components::domain_chip(ui, domain, mode);
                            }
                        });
                        row.col(|ui| {
                            let color = if entry.standard.is_some() { p.text_secondary } else { p.text_dim };
                            ui.add(
                                egui::Label::new(egui::RichText::new(entry.standard_or_fallback()).color(color))
                                    .truncate()
                                    .selectable(false),
                            );
                        });

                        let response = row.response();
                        if response.hovered() {
                            response.ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if response.clicked() {
                            row_toggles.push((*id, !selected));
                        }
                    });
                }
            });

        if rows.is_empty() {
            ui.add_space(theme::SPACING_LG);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("No terms match your search.").color(p.text_muted));
            });
        }

        if let Some(included) = header_toggle {
            let changed = self.set_visible_selection(entries, included);
            debug!(included = included, changed = changed, "Visible selection toggled");
        }
        for (id, included) in row_toggles {
            self.toggle_selection(entries, id, included);
        }
        if let Some(column) = sort_clicked {
            self.cycle_sort(column);
        }
    }

    /// Status line and page controls. Returns true if the page size changed.
    fn show_pager(&mut self, ui: &mut egui::Ui, theme: &ThemeController, total: usize, visible: usize) -> bool {
        let p = theme.palette();
        let mut size_changed = false;

        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!(
                    "Showing {} of {} terms • {} selected",
                    visible,
                    total,
                    self.selection.len()
                ))
                .size(theme::FONT_LABEL)
                .color(p.text_muted),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let page = self.page();
                let pages = self.page_count(visible);
                let next = ui.add_enabled(
                    page + 1 < pages,
                    theme::button(p, egui_phosphor::regular::CARET_RIGHT),
                );
                if next.clicked() {
                    self.set_page(page + 1, visible);
                }
                ui.label(
                    egui::RichText::new(format!("Page {} of {}", page + 1, pages))
                        .size(theme::FONT_LABEL)
                        .color(p.text_secondary),
                );
                let prev = ui.add_enabled(page > 0, theme::button(p, egui_phosphor::regular::CARET_LEFT));
                if prev.clicked() {
                    self.set_page(page.saturating_sub(1), visible);
                }

                ui.add_space(theme::SPACING_LG);
                let mut size = self.page_size;
                egui::ComboBox::from_id_salt("dictionary_page_size")
                    .selected_text(size.to_string())
                    .width(56.0)
                    .show_ui(ui, |ui| {
                        for option in PAGE_SIZES {
                            ui.selectable_value(&mut size, option, option.to_string());
                        }
                    });
                ui.label(egui::RichText::new("Rows per page").size(theme::FONT_LABEL).color(p.text_muted));
                if size != self.page_size {
                    self.set_page_size(size);
                    size_changed = true;
                }
            });
        });

        size_changed
    }
}

fn show_suffixes(ui: &mut egui::Ui, theme: &ThemeController, suffixes: &[SuffixEntry]) {
    let p = theme.palette();
    components::page_heading(
        ui,
        p,
        "Suffix Dictionary",
        Some("Column name suffixes and what they indicate."),
    );

    theme::section_frame(p).show(ui, |ui| {
        ui.set_width(ui.available_width());
        if suffixes.is_empty() {
            ui.label(egui::RichText::new("No suffixes defined.").color(p.text_muted));
            return;
        }
        egui::Grid::new("suffix_table")
            .num_columns(2)
            .striped(true)
            .spacing(egui::vec2(32.0, 10.0))
            .show(ui, |ui| {
                ui.label(egui::RichText::new("SUFFIX").size(theme::FONT_SMALL).strong().color(p.text_muted));
                ui.label(egui::RichText::new("MEANING").size(theme::FONT_SMALL).strong().color(p.text_muted));
                ui.end_row();
                for suffix in suffixes {
                    ui.label(egui::RichText::new(&suffix.suffix).monospace().color(p.accent));
                    ui.label(egui::RichText::new(&suffix.meaning).color(p.text_secondary));
                    ui.end_row();
                }
            });
    });
}

// ============================================================================
// EXPORT
// ============================================================================

impl App {
    /// Ask for a destination and write the selected rows there
    pub(crate) fn export_dictionary(&mut self, entries: &[DictionaryEntry]) {
        if self.dictionary.selection().is_empty() {
            self.show_toast(ToastKind::Error, ExportError::EmptySelection.to_string(), None);
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .set_directory(self.export_dir.clone())
            .set_file_name(EXPORT_FILE_NAME)
            .add_filter("Excel Workbook", &["xlsx"])
            .save_file()
        else {
            debug!("Export cancelled");
            return;
        };

        match export::export_selection(entries, self.dictionary.selection(), &path) {
            Ok(count) => {
                if let Some(dir) = path.parent() {
                    self.export_dir = dir.to_path_buf();
                    self.save_settings();
                }
                let noun = if count == 1 { "term" } else { "terms" };
                let file = path
                    .file_name()
                    .map(|f| f.to_string_lossy().to_string())
                    .unwrap_or_else(|| EXPORT_FILE_NAME.to_string());
                self.show_toast(
                    ToastKind::Success,
                    format!("Exported {} {} to {}", count, noun, file),
                    Some(path),
                );
            }
            Err(e) => {
                error!(error = %e, path = %path.display(), "Export failed");
                self.show_toast(ToastKind::Error, format!("Export failed: {}", e), None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(term: &str, definition: &str, in_model: bool, domain: &[&str], standard: Option<&str>) -> DictionaryEntry {
        DictionaryEntry {
            term: term.to_string(),
            definition: definition.to_string(),
            appears_in_model: in_model,
            domain: domain.iter().map(|s| s.to_string()).collect(),
            standard: standard.map(str::to_string),
        }
    }

    fn sample() -> Vec<DictionaryEntry> {
        vec![
            entry("Customer", "A person who buys", true, &["Sales"], Some("ISO 8000")),
            entry("invoice", "A bill for goods", false, &["Finance"], None),
            entry("Order", "A request to buy", true, &["Sales", "Ops"], None),
            entry("Ledger", "Book of accounts", false, &[], Some("GAAP")),
        ]
    }

    fn ids(rows: &[RowId]) -> Vec<usize> {
        rows.iter().map(|r| r.0).collect()
    }

    #[test]
    fn empty_search_matches_everything() {
        let view = DictionaryView::new(10);
        assert_eq!(ids(&view.visible_rows(&sample())), vec![0, 1, 2, 3]);
    }

    #[test]
    fn search_covers_every_text_field() {
        let entries = sample();
        let mut view = DictionaryView::new(10);

        view.set_search_term("CUSTOMER");
        assert_eq!(ids(&view.visible_rows(&entries)), vec![0]);

        view.set_search_term("bill");
        assert_eq!(ids(&view.visible_rows(&entries)), vec![1]);

        view.set_search_term("ops");
        assert_eq!(ids(&view.visible_rows(&entries)), vec![2]);

        view.set_search_term("gaap");
        assert_eq!(ids(&view.visible_rows(&entries)), vec![3]);

        // Absent standard searches as its fallback
        view.set_search_term("n/a");
        assert_eq!(ids(&view.visible_rows(&entries)), vec![1, 2]);
    }

    #[test]
    fn selection_survives_filtering() {
        let entries = sample();
        let mut view = DictionaryView::new(10);
        assert!(view.toggle_selection(&entries, RowId(0), true));
        assert!(view.toggle_selection(&entries, RowId(1), true));

        view.set_search_term("order");
        assert_eq!(view.selection().len(), 2);
        view.set_search_term("");
        assert!(view.is_selected(RowId(0)));
        assert!(view.is_selected(RowId(1)));
    }

    #[test]
    fn deselecting_a_hidden_row_is_a_noop() {
        let entries = sample();
        let mut view = DictionaryView::new(10);
        view.toggle_selection(&entries, RowId(0), true);

        view.set_search_term("invoice");
        assert!(!view.toggle_selection(&entries, RowId(0), false));
        assert!(view.is_selected(RowId(0)));

        view.set_search_term("customer");
        assert!(view.toggle_selection(&entries, RowId(0), false));
        assert!(view.selection().is_empty());
    }

    #[test]
    fn select_visible_leaves_hidden_rows_alone() {
        let entries = sample();
        let mut view = DictionaryView::new(10);
        view.toggle_selection(&entries, RowId(3), true);

        view.set_search_term("sales");
        assert_eq!(view.set_visible_selection(&entries, true), 2);
        assert_eq!(ids(&view.selection().iter().copied().collect::<Vec<_>>()), vec![0, 2, 3]);

        assert_eq!(view.set_visible_selection(&entries, false), 2);
        assert_eq!(ids(&view.selection().iter().copied().collect::<Vec<_>>()), vec![3]);
    }

    #[test]
    fn sort_cycles_through_three_states() {
        let entries = sample();
        let mut view = DictionaryView::new(10);

        view.cycle_sort(SortColumn::Term);
        assert_eq!(ids(&view.visible_rows(&entries)), vec![0, 1, 3, 2]);
        view.cycle_sort(SortColumn::Term);
        assert_eq!(ids(&view.visible_rows(&entries)), vec![2, 3, 1, 0]);
        view.cycle_sort(SortColumn::Term);
        assert_eq!(view.sort(), None);
        assert_eq!(ids(&view.visible_rows(&entries)), vec![0, 1, 2, 3]);

        // Switching column starts ascending again
        view.cycle_sort(SortColumn::Term);
        view.cycle_sort(SortColumn::AppearsInModel);
        assert_eq!(view.sort(), Some((SortColumn::AppearsInModel, SortDirection::Ascending)));
        assert_eq!(ids(&view.visible_rows(&entries)), vec![1, 3, 0, 2]);
    }

    #[test]
    fn paging_and_reset_on_search() {
        let entries: Vec<DictionaryEntry> = (0..12)
            .map(|i| entry(&format!("Term {}", i), "", false, &[], None))
            .collect();
        let mut view = DictionaryView::new(5);
        let rows = view.visible_rows(&entries);
        assert_eq!(view.page_count(rows.len()), 3);

        view.set_page(2, rows.len());
        assert_eq!(ids(view.page_rows(&rows)), vec![10, 11]);

        view.set_page(9, rows.len());
        assert_eq!(view.page(), 2);

        view.set_search_term("term 1");
        assert_eq!(view.page(), 0);

        view.set_page_size(20);
        assert_eq!(view.page_count(rows.len()), 1);
        view.set_page_size(7);
        assert_eq!(view.page_size(), 20);
    }

    #[test]
    fn empty_table_has_one_empty_page() {
        let view = DictionaryView::new(10);
        assert_eq!(view.page_count(0), 1);
        assert!(view.page_rows(&[]).is_empty());
    }
}
