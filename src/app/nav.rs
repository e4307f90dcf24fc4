//! Top navigation bar and footer

use super::App;
use crate::constants::{APP_NAME, FOOTER_TEXT};
use crate::theme::{self, Palette};
use crate::types::Route;
use crate::ui::components;
use eframe::egui;
use tracing::debug;

const LINKS: [Route; 3] = [Route::DataDictionary, Route::DataContract, Route::Changelog];

impl App {
    pub(crate) fn navigate(&mut self, route: Route) {
        if self.route != route {
            debug!(from = ?self.route, to = ?route, "Navigate");
            self.route = route;
        }
    }

    pub(crate) fn render_navbar(&mut self, ctx: &egui::Context) {
        let p = self.theme.palette();

        egui::TopBottomPanel::top("navbar")
            .exact_height(theme::NAVBAR_HEIGHT)
            .frame(theme::navbar_frame(p))
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    // Logo + title, navigates home
                    let texture = self.logo_texture.get_or_insert_with(|| {
                        let size = (theme::LOGO_SIZE * 2.0) as u32;
                        let (pixels, w, h) = crate::utils::rasterize_logo_square(size)
                            .unwrap_or_else(|| (vec![0; (size * size * 4) as usize], size, size));
                        ctx.load_texture(
                            "logo",
                            egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                            egui::TextureOptions::LINEAR,
                        )
                    });
                    let logo = ui.add(
                        egui::Image::new(egui::load::SizedTexture::new(
                            texture.id(),
                            egui::vec2(theme::LOGO_SIZE, theme::LOGO_SIZE),
                        ))
                        .sense(egui::Sense::click()),
                    );
                    let title = ui.add(
                        egui::Label::new(
                            egui::RichText::new(APP_NAME)
                                .size(theme::FONT_HEADING + 2.0)
                                .strong()
                                .color(p.text_primary),
                        )
                        .selectable(false)
                        .sense(egui::Sense::click()),
                    );
                    if logo.clicked() || title.clicked() {
                        self.navigate(Route::Home);
                    }

                    ui.add_space(theme::SPACING_XL * 2.0);

                    for route in LINKS {
                        if nav_link(ui, p, route.title(), self.route == route) {
                            self.navigate(route);
                        }
                    }
                    if let Some(route) = self.resources_menu(ui, p) {
                        self.navigate(route);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let (icon, hint) = if self.theme.mode().is_dark() {
                            (egui_phosphor::regular::SUN, "Switch to light mode")
                        } else {
                            (egui_phosphor::regular::MOON, "Switch to dark mode")
                        };
                        let resp = ui
                            .add(
                                egui::Button::new(egui::RichText::new(icon).size(18.0).color(p.text_secondary))
                                    .frame(false),
                            )
                            .on_hover_text(hint);
                        if resp.clicked() {
                            self.toggle_theme(ctx);
                        }
                    });
                });
            });
    }

    /// "Resources" dropdown. Returns the chosen route.
    fn resources_menu(&mut self, ui: &mut egui::Ui, p: &Palette) -> Option<Route> {
        let active = matches!(self.route, Route::MetroMap | Route::RawData);
        let color = if active { p.accent } else { p.text_secondary };
        let mut chosen = None;

        ui.menu_button(
            egui::RichText::new(format!("Resources {}", egui_phosphor::regular::CARET_DOWN))
                .size(theme::FONT_BODY)
                .color(color),
            |ui| {
                ui.spacing_mut().item_spacing.y = 2.0;
                theme::set_menu_width(ui, &["MetroMap  BETA", "Raw Data"]);
                if menu_item_with_badge(ui, p, egui_phosphor::regular::TRAIN_SIMPLE, "MetroMap") {
                    chosen = Some(Route::MetroMap);
                    ui.close_menu();
                }
                if theme::menu_item(ui, p, egui_phosphor::regular::BRACKETS_CURLY, "Raw Data") {
                    chosen = Some(Route::RawData);
                    ui.close_menu();
                }
            },
        );
        chosen
    }

    pub(crate) fn render_footer(&self, ctx: &egui::Context) {
        let p = self.theme.palette();
        egui::TopBottomPanel::bottom("footer")
            .frame(
                egui::Frame::new()
                    .fill(p.bg_elevated)
                    .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, p.border_subtle))
                    .inner_margin(egui::Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(FOOTER_TEXT)
                            .size(theme::FONT_SMALL)
                            .color(p.text_dim),
                    );
                });
            });
    }
}

/// Text link with an underline when active. Returns true if clicked.
fn nav_link(ui: &mut egui::Ui, p: &Palette, label: &str, active: bool) -> bool {
    let color = if active { p.accent } else { p.text_secondary };
    let resp = ui.add(
        egui::Label::new(egui::RichText::new(label).size(theme::FONT_BODY).color(color))
            .selectable(false)
            .sense(egui::Sense::click()),
    );
    if active {
        let r = resp.rect;
        ui.painter().line_segment(
            [egui::pos2(r.left(), r.bottom() + 3.0), egui::pos2(r.right(), r.bottom() + 3.0)],
            egui::Stroke::new(theme::STROKE_THICK, p.accent),
        );
    } else if resp.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    ui.add_space(theme::SPACING_MD);
    resp.clicked()
}

/// Menu item with a trailing red "BETA" badge
fn menu_item_with_badge(ui: &mut egui::Ui, p: &Palette, icon: &str, label: &str) -> bool {
    let clicked = theme::menu_item(ui, p, icon, label);
    let item = ui.min_rect();
    let font = egui::FontId::proportional(13.0);
    let text_w = ui.fonts(|f| {
        f.layout_no_wrap(format!("{}  {}", icon, label), font, p.text_secondary)
            .rect
            .width()
    });
    let badge_pos = egui::pos2(item.left() + 8.0 + text_w + 8.0, item.bottom() - 12.0);
    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(egui::Rect::from_min_size(
                badge_pos - egui::vec2(0.0, 8.0),
                egui::vec2(48.0, 16.0),
            ))
            .layout(egui::Layout::left_to_right(egui::Align::Center)),
    );
    components::beta_badge(&mut child);
    clicked
}
