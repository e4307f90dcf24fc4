//! Decorative metro map: stations on coloured lines, pan/zoom, minimap

use crate::theme::{self, ThemeController};
use crate::ui::components;
use eframe::egui::{self, Color32, Pos2, Rect, Vec2};
use tracing::debug;

pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 4.0;
const STATION_RADIUS: f32 = 7.0;
const GRID_GAP: f32 = 15.0;
const FIT_PADDING: f32 = 60.0;
const MINIMAP_SIZE: Vec2 = egui::vec2(180.0, 110.0);

#[derive(Debug, Clone)]
pub struct Station {
    pub label: &'static str,
    pub color: Color32,
    pub pos: Pos2,
}

#[derive(Debug, Clone, Copy)]
pub struct Track {
    pub from: usize,
    pub to: usize,
    pub color: Color32,
}

const RED_LINE: Color32 = Color32::from_rgb(0xff, 0x57, 0x33);
const BLUE_LINE: Color32 = Color32::from_rgb(0x34, 0x98, 0xdb);
const PURPLE_LINE: Color32 = Color32::from_rgb(0x9b, 0x59, 0xb6);

fn initial_stations() -> Vec<Station> {
    let s = |label, rgb: (u8, u8, u8), x, y| Station {
        label,
        color: Color32::from_rgb(rgb.0, rgb.1, rgb.2),
        pos: egui::pos2(x, y),
    };
    vec![
        s("Central Hub", (0xff, 0x57, 0x33), 100.0, 300.0),
        s("West Point", (0x33, 0xff, 0x57), 300.0, 300.0),
        s("East Gate", (0x57, 0x33, 0xff), 500.0, 300.0),
        s("North Side", (0xf3, 0x9c, 0x12), 700.0, 300.0),
        s("South Pier", (0xe7, 0x4c, 0x3c), 900.0, 300.0),
        s("Tech Park", (0x34, 0x98, 0xdb), 500.0, 150.0),
        s("Industrial Zone", (0x9b, 0x59, 0xb6), 500.0, 450.0),
    ]
}

const TRACKS: [Track; 6] = [
    Track { from: 0, to: 1, color: RED_LINE },
    Track { from: 1, to: 2, color: RED_LINE },
    Track { from: 2, to: 3, color: RED_LINE },
    Track { from: 3, to: 4, color: RED_LINE },
    Track { from: 2, to: 5, color: BLUE_LINE },
    Track { from: 2, to: 6, color: PURPLE_LINE },
];

#[derive(Debug, Clone)]
pub struct MetroMap {
    stations: Vec<Station>,
    zoom: f32,
    /// Screen position of world origin, relative to the canvas top-left
    offset: Vec2,
    needs_fit: bool,
    dragging: Option<usize>,
}

impl Default for MetroMap {
    fn default() -> Self {
        Self {
            stations: initial_stations(),
            zoom: 1.0,
            offset: Vec2::ZERO,
            needs_fit: true,
            dragging: None,
        }
    }
}

impl MetroMap {
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    fn to_screen(&self, canvas: Rect, world: Pos2) -> Pos2 {
        canvas.min + self.offset + world.to_vec2() * self.zoom
    }

    fn to_world(&self, canvas: Rect, screen: Pos2) -> Pos2 {
        ((screen - canvas.min - self.offset) / self.zoom).to_pos2()
    }

    /// Bounding box of all stations in world coordinates
    pub fn bounds(&self) -> Rect {
        let mut rect = Rect::NOTHING;
        for station in &self.stations {
            rect.extend_with(station.pos);
        }
        rect
    }

    /// Zoom and centre so every station is inside `canvas`
    pub fn fit(&mut self, canvas: Rect) {
        let bounds = self.bounds().expand(FIT_PADDING);
        let zoom = (canvas.width() / bounds.width()).min(canvas.height() / bounds.height());
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset = canvas.size() / 2.0 - bounds.center().to_vec2() * self.zoom;
        self.needs_fit = false;
    }

    /// Multiply the zoom by `factor`, keeping the world point under `anchor` fixed
    pub fn zoom_at(&mut self, canvas: Rect, anchor: Pos2, factor: f32) {
        let world = self.to_world(canvas, anchor);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset = anchor - canvas.min - world.to_vec2() * self.zoom;
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Station under a screen position, topmost first
    fn hit_test(&self, canvas: Rect, screen: Pos2) -> Option<usize> {
        let reach = (STATION_RADIUS * self.zoom).max(8.0);
        self.stations
            .iter()
            .enumerate()
            .rev()
            .find(|(_, s)| self.to_screen(canvas, s.pos).distance(screen) <= reach)
            .map(|(i, _)| i)
    }

    fn move_station(&mut self, index: usize, screen_delta: Vec2) {
        if let Some(station) = self.stations.get_mut(index) {
            station.pos += screen_delta / self.zoom;
        }
    }
}

/// Orthogonal route between two points, bending once along the dominant axis
pub fn smooth_step(a: Pos2, b: Pos2) -> Vec<Pos2> {
    let d = b - a;
    if d.x == 0.0 || d.y == 0.0 {
        return vec![a, b];
    }
    if d.x.abs() >= d.y.abs() {
        let mx = a.x + d.x / 2.0;
        vec![a, egui::pos2(mx, a.y), egui::pos2(mx, b.y), b]
    } else {
        let my = a.y + d.y / 2.0;
        vec![a, egui::pos2(a.x, my), egui::pos2(b.x, my), b]
    }
}

// ============================================================================
// RENDERING
// ============================================================================

impl MetroMap {
    pub(crate) fn show(&mut self, ui: &mut egui::Ui, theme: &ThemeController) {
        let p = theme.palette();

        ui.horizontal(|ui| {
            components::page_heading(ui, p, "MetroMap", None);
            components::beta_badge(ui);
        });

        let mut zoom_step: Option<f32> = None;
        ui.horizontal(|ui| {
            if ui
                .add(theme::button(p, format!("{}  Fit", egui_phosphor::regular::CORNERS_IN)))
                .clicked()
            {
                self.needs_fit = true;
            }
            if ui.add(theme::button(p, egui_phosphor::regular::MINUS)).clicked() {
                zoom_step = Some(1.0 / 1.25);
            }
            ui.label(
                egui::RichText::new(format!("{:.0}%", self.zoom() * 100.0))
                    .size(theme::FONT_LABEL)
                    .color(p.text_muted),
            );
            if ui.add(theme::button(p, egui_phosphor::regular::PLUS)).clicked() {
                zoom_step = Some(1.25);
            }
        });
        ui.add_space(theme::SPACING_MD);

        let size = egui::vec2(ui.available_width(), ui.available_height().max(420.0));
        let (canvas, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

        if self.needs_fit {
            self.fit(canvas);
            debug!(zoom = self.zoom, "Metro map fitted");
        }
        if let Some(factor) = zoom_step {
            self.zoom_at(canvas, canvas.center(), factor);
        }

        // Drag a station if the drag started on one, otherwise pan
        if response.drag_started() {
            self.dragging = response
                .interact_pointer_pos()
                .and_then(|pos| self.hit_test(canvas, pos));
        }
        if response.dragged() {
            match self.dragging {
                Some(index) => self.move_station(index, response.drag_delta()),
                None => self.pan(response.drag_delta()),
            }
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        }
        if response.drag_stopped() {
            self.dragging = None;
        }
        if let Some(hover) = response.hover_pos() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                self.zoom_at(canvas, hover, 1.0 + scroll * 0.001);
            }
            if self.dragging.is_none() && self.hit_test(canvas, hover).is_some() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
            }
        }

        let painter = ui.painter_at(canvas);
        painter.rect_filled(canvas, theme::RADIUS_LARGE, p.bg_elevated);
        self.paint_grid(&painter, canvas, p.grid_line);

        // Lines with a marching dash
        let time = ui.input(|i| i.time) as f32;
        let dash_offset = -(time * 20.0) % 15.0;
        let width = (3.0 * self.zoom).clamp(1.5, 8.0);
        for track in TRACKS {
            let a = self.to_screen(canvas, self.stations[track.from].pos);
            let b = self.to_screen(canvas, self.stations[track.to].pos);
            let path = smooth_step(a, b);
            painter.extend(egui::Shape::dashed_line_with_offset(
                &path,
                egui::Stroke::new(width, track.color),
                &[10.0],
                &[5.0],
                dash_offset,
            ));
        }

        // Stations with labels above
        let font = egui::FontId::proportional((12.0 * self.zoom).clamp(9.0, 20.0));
        for station in &self.stations {
            let center = self.to_screen(canvas, station.pos);
            let radius = (STATION_RADIUS * self.zoom).clamp(4.0, 16.0);
            painter.circle(center, radius, station.color, egui::Stroke::new(2.0, p.text_primary));
            painter.text(
                center - egui::vec2(0.0, radius + 4.0),
                egui::Align2::CENTER_BOTTOM,
                station.label,
                font.clone(),
                p.text_primary,
            );
        }

        self.paint_minimap(&painter, canvas, theme);
        ui.ctx().request_repaint();
    }

    fn paint_grid(&self, painter: &egui::Painter, canvas: Rect, color: Color32) {
        let gap = GRID_GAP * self.zoom;
        if gap < 6.0 {
            return;
        }
        let origin = canvas.min + self.offset;
        let start_x = canvas.left() + (origin.x - canvas.left()).rem_euclid(gap);
        let start_y = canvas.top() + (origin.y - canvas.top()).rem_euclid(gap);

        let mut x = start_x;
        while x < canvas.right() {
            let mut y = start_y;
            while y < canvas.bottom() {
                painter.circle_filled(egui::pos2(x, y), 1.0, color);
                y += gap;
            }
            x += gap;
        }
    }

    fn paint_minimap(&self, painter: &egui::Painter, canvas: Rect, theme: &ThemeController) {
        let p = theme.palette();
        let mini = Rect::from_min_size(canvas.max - MINIMAP_SIZE - egui::vec2(12.0, 12.0), MINIMAP_SIZE);
        painter.rect_filled(mini, theme::RADIUS_DEFAULT, p.bg_surface.gamma_multiply(0.9));
        painter.rect_stroke(
            mini,
            theme::RADIUS_DEFAULT,
            egui::Stroke::new(theme::STROKE_DEFAULT, p.border_default),
            egui::StrokeKind::Inside,
        );

        // World area shown: station bounds plus the current viewport
        let viewport = Rect::from_two_pos(
            self.to_world(canvas, canvas.min),
            self.to_world(canvas, canvas.max),
        );
        let world = self.bounds().expand(FIT_PADDING).union(viewport);
        let scale = ((mini.width() - 8.0) / world.width()).min((mini.height() - 8.0) / world.height());
        let project = |pos: Pos2| mini.center() + (pos - world.center()) * scale;

        for station in self.stations() {
            painter.circle_filled(project(station.pos), 2.5, station.color);
        }
        painter.rect_stroke(
            Rect::from_two_pos(project(viewport.min), project(viewport.max)),
            0.0,
            egui::Stroke::new(theme::STROKE_DEFAULT, p.accent),
            egui::StrokeKind::Inside,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Rect {
        Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(800.0, 500.0))
    }

    #[test]
    fn seven_stations_on_six_tracks() {
        let map = MetroMap::default();
        assert_eq!(map.stations().len(), 7);
        assert!(TRACKS
            .iter()
            .all(|t| t.from < map.stations().len() && t.to < map.stations().len()));
    }

    #[test]
    fn fit_shows_every_station() {
        let mut map = MetroMap::default();
        map.fit(canvas());
        for station in map.stations() {
            assert!(canvas().contains(map.to_screen(canvas(), station.pos)), "{}", station.label);
        }
    }

    #[test]
    fn zoom_is_clamped_and_anchored() {
        let mut map = MetroMap::default();
        map.fit(canvas());
        let anchor = egui::pos2(300.0, 200.0);
        let before = map.to_world(canvas(), anchor);

        map.zoom_at(canvas(), anchor, 1.5);
        let after = map.to_world(canvas(), anchor);
        assert!((before - after).length() < 1e-3);

        map.zoom_at(canvas(), anchor, 100.0);
        assert_eq!(map.zoom(), MAX_ZOOM);
        map.zoom_at(canvas(), anchor, 0.0001);
        assert_eq!(map.zoom(), MIN_ZOOM);
    }

    #[test]
    fn smooth_step_is_orthogonal() {
        let path = smooth_step(egui::pos2(0.0, 0.0), egui::pos2(100.0, 40.0));
        assert_eq!(path.first(), Some(&egui::pos2(0.0, 0.0)));
        assert_eq!(path.last(), Some(&egui::pos2(100.0, 40.0)));
        for pair in path.windows(2) {
            assert!(pair[0].x == pair[1].x || pair[0].y == pair[1].y);
        }
        assert_eq!(smooth_step(egui::pos2(5.0, 0.0), egui::pos2(5.0, 90.0)).len(), 2);
    }

    #[test]
    fn dragging_moves_only_the_hit_station() {
        let mut map = MetroMap::default();
        map.fit(canvas());
        let target = map.to_screen(canvas(), map.stations()[5].pos);
        let hit = map.hit_test(canvas(), target);
        assert_eq!(hit, Some(5));

        let before = map.stations()[0].pos;
        map.move_station(5, egui::vec2(20.0, 0.0));
        assert_eq!(map.stations()[0].pos, before);
        assert!(map.to_screen(canvas(), map.stations()[5].pos).x > target.x);

        assert_eq!(map.hit_test(canvas(), canvas().min), None);
    }
}
