//! Centralized theme for the Data Catalog
//! Colors come from the active palette, sizes and spacing are shared constants

use egui::Color32;
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// MODE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &LIGHT,
            Self::Dark => &DARK,
        }
    }
}

// =============================================================================
// COLORS - Palette
// =============================================================================

/// Colour set for one theme mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    // Backgrounds
    pub bg_base: Color32,
    pub bg_elevated: Color32,
    pub bg_input: Color32,
    pub bg_surface: Color32,
    pub bg_hover: Color32,
    pub window_fill: Color32,
    pub card_fill: Color32,

    // Accent
    pub accent: Color32,
    pub accent_text: Color32,

    // Text
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub text_dim: Color32,

    // Borders
    pub border_subtle: Color32,
    pub border_default: Color32,

    // Buttons
    pub btn_default: Color32,

    // Selection
    pub row_selected: Color32,
    pub text_selection: Color32,

    // Status
    pub status_success: Color32,
    pub status_warning: Color32,
    pub status_error: Color32,

    pub grid_line: Color32,
}

pub const DARK: Palette = Palette {
    bg_base: Color32::from_rgb(0x09, 0x09, 0x0b),     // zinc-950
    bg_elevated: Color32::from_rgb(0x18, 0x18, 0x1b), // zinc-900
    bg_input: Color32::from_rgb(0x14, 0x14, 0x18),
    bg_surface: Color32::from_rgb(0x27, 0x27, 0x2a), // zinc-800
    bg_hover: Color32::from_rgb(0x0f, 0x1a, 0x19),   // subtle teal hover
    window_fill: Color32::from_rgb(0x1a, 0x1a, 0x1e),
    card_fill: Color32::from_rgb(0x12, 0x12, 0x14),

    accent: Color32::from_rgb(0x2d, 0xd4, 0xbf), // teal-400
    accent_text: Color32::from_rgb(0x04, 0x2f, 0x2e),

    text_primary: Color32::WHITE,
    text_secondary: Color32::from_rgb(0xe4, 0xe4, 0xe7), // zinc-200
    text_muted: Color32::from_rgb(0xa1, 0xa1, 0xaa),     // zinc-400
    text_dim: Color32::from_rgb(0x71, 0x71, 0x7a),       // zinc-500

    border_subtle: Color32::from_rgb(0x27, 0x27, 0x2a),  // zinc-800
    border_default: Color32::from_rgb(0x3f, 0x3f, 0x46), // zinc-700

    btn_default: Color32::from_rgb(0x3f, 0x3f, 0x46),

    row_selected: Color32::from_rgb(0x0f, 0x1a, 0x19),
    text_selection: Color32::from_rgb(0x3a, 0x3a, 0x3f),

    status_success: Color32::from_rgb(0x34, 0xd3, 0x99), // emerald-400
    status_warning: Color32::from_rgb(0xfb, 0xbf, 0x24), // amber-400
    status_error: Color32::from_rgb(0xf8, 0x71, 0x71),   // red-400

    grid_line: Color32::from_rgb(0x1f, 0x1f, 0x22),
};

pub const LIGHT: Palette = Palette {
    bg_base: Color32::from_rgb(0xfa, 0xfa, 0xfa), // zinc-50
    bg_elevated: Color32::WHITE,
    bg_input: Color32::from_rgb(0xf4, 0xf4, 0xf5), // zinc-100
    bg_surface: Color32::from_rgb(0xe4, 0xe4, 0xe7), // zinc-200
    bg_hover: Color32::from_rgb(0xf0, 0xfd, 0xfa), // teal-50
    window_fill: Color32::WHITE,
    card_fill: Color32::WHITE,

    accent: Color32::from_rgb(0x0d, 0x94, 0x88), // teal-600
    accent_text: Color32::WHITE,

    text_primary: Color32::from_rgb(0x09, 0x09, 0x0b),
    text_secondary: Color32::from_rgb(0x27, 0x27, 0x2a),
    text_muted: Color32::from_rgb(0x52, 0x52, 0x5b), // zinc-600
    text_dim: Color32::from_rgb(0x71, 0x71, 0x7a),

    border_subtle: Color32::from_rgb(0xe4, 0xe4, 0xe7),
    border_default: Color32::from_rgb(0xd4, 0xd4, 0xd8), // zinc-300

    btn_default: Color32::from_rgb(0xe4, 0xe4, 0xe7),

    row_selected: Color32::from_rgb(0xcc, 0xfb, 0xf1), // teal-100
    text_selection: Color32::from_rgb(0xd4, 0xd4, 0xd8),

    status_success: Color32::from_rgb(0x05, 0x96, 0x69), // emerald-600
    status_warning: Color32::from_rgb(0xd9, 0x77, 0x06), // amber-600
    status_error: Color32::from_rgb(0xdc, 0x26, 0x26),   // red-600

    grid_line: Color32::from_rgb(0xe9, 0xe9, 0xec),
};

/// Red "BETA" badge, identical in both modes
pub const BADGE_BETA: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);

// =============================================================================
// COLORS - Domains
// =============================================================================

const DOMAIN_HUES: [(u8, u8, u8); 6] = [
    (0x38, 0xbd, 0xf8), // sky
    (0x34, 0xd3, 0x99), // emerald
    (0xfb, 0xbf, 0x24), // amber
    (0xfb, 0x92, 0x3c), // orange
    (0xf4, 0x72, 0xb6), // pink
    (0xa7, 0x8b, 0xfa), // violet
];

/// Returns (bg_color, text_color) for a domain chip, stable per domain name
pub fn domain_colors(domain: &str, mode: ThemeMode) -> (Color32, Color32) {
    let hash = domain
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    let (r, g, b) = DOMAIN_HUES[hash % DOMAIN_HUES.len()];
    match mode {
        ThemeMode::Dark => (
            Color32::from_rgba_unmultiplied(r, g, b, 10),
            Color32::from_rgb(r, g, b),
        ),
        ThemeMode::Light => (
            Color32::from_rgba_unmultiplied(r, g, b, 40),
            darken(Color32::from_rgb(r, g, b), 0.45),
        ),
    }
}

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_HERO: f32 = 40.0;
pub const FONT_TITLE: f32 = 22.0;
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_LABEL: f32 = 13.0;
pub const FONT_SMALL: f32 = 11.0;
pub const FONT_CAPTION: f32 = 10.0;

// =============================================================================
// DIMENSIONS
// =============================================================================
pub const NAVBAR_HEIGHT: f32 = 52.0;
pub const CONTENT_MAX_WIDTH: f32 = 1100.0;
pub const ROW_HEIGHT: f32 = 36.0;
pub const CHECKBOX_SIZE: f32 = 18.0;
pub const LOGO_SIZE: f32 = 32.0;
pub const BUTTON_HEIGHT: f32 = 28.0;

// =============================================================================
// CORNER RADIUS
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_MEDIUM: f32 = 6.0;
pub const RADIUS_LARGE: f32 = 8.0;

// =============================================================================
// STROKE WIDTHS
// =============================================================================
pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_MEDIUM: f32 = 1.5;
pub const STROKE_THICK: f32 = 2.0;

// =============================================================================
// SPACING
// =============================================================================
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;

// =============================================================================
// CONTROLLER
// =============================================================================

/// Owner of the active theme mode. Views read the palette from it; only the
/// navbar toggle changes it.
#[derive(Debug, Clone)]
pub struct ThemeController {
    mode: ThemeMode,
    revision: u64,
}

impl ThemeController {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode, revision: 0 }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn palette(&self) -> &'static Palette {
        self.mode.palette()
    }

    /// Bumped on every toggle
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Flip the mode and return the new one
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        self.revision += 1;
        info!(mode = ?self.mode, revision = self.revision, "Theme toggled");
        self.mode
    }

    pub fn apply(&self, ctx: &egui::Context) {
        apply_visuals(ctx, self.mode);
    }
}

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context, mode: ThemeMode) {
    let p = mode.palette();
    let base = if mode.is_dark() {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    let hover_weak = shade(p.bg_surface, 0.08, mode);
    let active_fill = shade(p.bg_surface, 0.04, mode);

    ctx.set_visuals(egui::Visuals {
        dark_mode: mode.is_dark(),
        panel_fill: p.bg_base,
        window_fill: p.window_fill,
        extreme_bg_color: p.bg_input,
        faint_bg_color: p.bg_elevated,
        hyperlink_color: p.accent,
        selection: egui::style::Selection {
            bg_fill: p.text_selection,
            stroke: egui::Stroke::NONE,
        },
        widgets: egui::style::Widgets {
            noninteractive: egui::style::WidgetVisuals {
                bg_fill: p.bg_elevated,
                weak_bg_fill: p.bg_surface,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, p.border_subtle),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, p.text_primary),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            inactive: egui::style::WidgetVisuals {
                bg_fill: Color32::TRANSPARENT,
                weak_bg_fill: p.bg_elevated,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, p.border_subtle),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, p.text_secondary),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            hovered: egui::style::WidgetVisuals {
                bg_fill: p.bg_hover,
                weak_bg_fill: hover_weak,
                bg_stroke: egui::Stroke::NONE,
                fg_stroke: egui::Stroke::new(STROKE_MEDIUM, p.text_primary),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            active: egui::style::WidgetVisuals {
                bg_fill: active_fill,
                weak_bg_fill: active_fill,
                bg_stroke: egui::Stroke::NONE,
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, p.text_primary),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: -2.0,
            },
            open: egui::style::WidgetVisuals {
                bg_fill: p.bg_surface,
                weak_bg_fill: p.bg_elevated,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, p.border_subtle),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, p.text_primary),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
        },
        striped: false,
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        popup_shadow: egui::epaint::Shadow {
            offset: [0, 4],
            blur: 12,
            spread: 0,
            color: Color32::from_black_alpha(if mode.is_dark() { 80 } else { 30 }),
        },
        window_stroke: egui::Stroke::new(1.0, p.border_subtle),
        window_corner_radius: egui::CornerRadius::same(8),
        menu_corner_radius: egui::CornerRadius::same(8),
        ..base
    });

    ctx.style_mut(|style| {
        style.spacing.menu_margin = egui::Margin::symmetric(6, 4);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.scroll.bar_inner_margin = 2.0;
        style.spacing.scroll.bar_width = 6.0;
        style.spacing.scroll.bar_outer_margin = 2.0;
        style.spacing.scroll.handle_min_length = 20.0;
        style.spacing.scroll.floating_allocated_width = 0.0;
        style.spacing.scroll.floating = false;
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================
pub fn card_frame(p: &Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(p.card_fill)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, p.border_subtle))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(egui::Margin::same(SPACING_XL as i8))
}

/// Section panel frame with fill and border
pub fn section_frame(p: &Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(p.bg_elevated)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, p.border_subtle))
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(12))
}

pub fn navbar_frame(p: &Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(p.bg_elevated)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, p.border_subtle))
        .inner_margin(egui::Margin::symmetric(16, 8))
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Default gray button
pub fn button(p: &Palette, text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(p.text_primary))
        .fill(p.btn_default)
        .corner_radius(RADIUS_DEFAULT)
}

/// Accent teal button (for primary actions like Export)
pub fn button_accent(p: &Palette, text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(p.accent_text))
        .fill(p.accent)
        .corner_radius(RADIUS_DEFAULT)
}

/// Dropdown menu item with icon. Returns true if clicked.
pub fn menu_item(ui: &mut egui::Ui, p: &Palette, icon: &str, label: &str) -> bool {
    let text = format!("{}  {}", icon, label);
    let w = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(egui::vec2(w, 24.0), egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        ui.painter().rect_filled(rect, RADIUS_DEFAULT, p.bg_hover);
    }
    ui.painter().text(
        rect.left_center() + egui::vec2(8.0, 0.0),
        egui::Align2::LEFT_CENTER,
        text,
        egui::FontId::proportional(13.0),
        p.text_secondary,
    );
    response.clicked()
}

/// Sets menu width to 1.5x the widest label.
pub fn set_menu_width(ui: &mut egui::Ui, labels: &[&str]) {
    let max_text = labels
        .iter()
        .map(|l| {
            ui.fonts(|f| {
                f.layout_no_wrap(l.to_string(), egui::FontId::proportional(13.0), Color32::WHITE)
                    .rect
                    .width()
            })
        })
        .fold(0.0_f32, f32::max);
    let w = (max_text + 16.0) * 1.5;
    ui.set_min_width(w);
    ui.set_max_width(w);
}

/// Returns (fill, draw_rect) for a custom-painted button with hover/press effects.
/// Shifts toward the contrast colour on hover, less so and shrinks on press.
pub fn button_visual(
    response: &egui::Response,
    base_fill: Color32,
    rect: egui::Rect,
    mode: ThemeMode,
) -> (Color32, egui::Rect) {
    if response.is_pointer_button_down_on() {
        (shade(base_fill, 0.06, mode), rect.shrink(1.5))
    } else if response.hovered() {
        (shade(base_fill, 0.12, mode), rect)
    } else {
        (base_fill, rect)
    }
}

/// Lighten in dark mode, darken in light mode
pub fn shade(c: Color32, amount: f32, mode: ThemeMode) -> Color32 {
    match mode {
        ThemeMode::Dark => lighten(c, amount),
        ThemeMode::Light => darken(c, amount),
    }
}

fn lighten(c: Color32, amount: f32) -> Color32 {
    let r = (c.r() as f32 + (255.0 - c.r() as f32) * amount) as u8;
    let g = (c.g() as f32 + (255.0 - c.g() as f32) * amount) as u8;
    let b = (c.b() as f32 + (255.0 - c.b() as f32) * amount) as u8;
    Color32::from_rgb(r, g, b)
}

fn darken(c: Color32, amount: f32) -> Color32 {
    let k = 1.0 - amount;
    Color32::from_rgb(
        (c.r() as f32 * k) as u8,
        (c.g() as f32 * k) as u8,
        (c.b() as f32 * k) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_an_involution() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(mode.toggled().toggled(), mode);
            assert_ne!(mode.toggled(), mode);
        }
    }

    #[test]
    fn controller_toggle_reports_new_mode() {
        let mut theme = ThemeController::new(ThemeMode::default());
        assert_eq!(theme.mode(), ThemeMode::Light);
        assert_eq!(theme.toggle(), ThemeMode::Dark);
        assert_eq!(theme.palette(), &DARK);
        assert_eq!(theme.toggle(), ThemeMode::Light);
        assert_eq!(theme.revision(), 2);
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
        let mode: ThemeMode = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(mode, ThemeMode::Light);
    }

    #[test]
    fn domain_colors_are_stable() {
        assert_eq!(
            domain_colors("Sales", ThemeMode::Dark),
            domain_colors("Sales", ThemeMode::Dark)
        );
    }

    #[test]
    fn shade_moves_toward_contrast() {
        let c = Color32::from_rgb(100, 100, 100);
        assert!(shade(c, 0.5, ThemeMode::Dark).r() > 100);
        assert!(shade(c, 0.5, ThemeMode::Light).r() < 100);
    }
}
