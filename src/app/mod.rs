//! App module - contains the main application state and logic

mod changelog;
mod contract;
mod dictionary;
mod home;
mod metro;
mod nav;
mod raw;
mod toast;
mod views;

pub(crate) use toast::ToastKind;

use crate::catalog::{self, DataSource};
use crate::settings::Settings;
use crate::theme::ThemeController;
use crate::types::*;
use crate::ui::boundary::Boundaries;
use changelog::ChangelogView;
use dictionary::DictionaryView;
use eframe::egui;
use metro::MetroMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use toast::Toast;
use tracing::{debug, error, info, warn};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // Data
    pub(crate) source: DataSource,
    pub(crate) load: LoadState,
    pub(crate) shared_load: Arc<Mutex<LoadState>>,
    pub(crate) runtime: Option<tokio::runtime::Runtime>,
    // Navigation and views
    pub(crate) route: Route,
    pub(crate) theme: ThemeController,
    pub(crate) dictionary: DictionaryView,
    pub(crate) changelog: ChangelogView,
    pub(crate) metro: MetroMap,
    pub(crate) boundaries: Boundaries,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    // Toast notification
    pub(crate) toast: Option<Toast>,
    pub(crate) central_panel_rect: Option<egui::Rect>,
    // Settings
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
    pub(crate) export_dir: PathBuf,
    pub(crate) data_source_setting: String,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf, source: DataSource) -> Self {
        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let theme = ThemeController::new(settings.theme_mode);
        theme.apply(&cc.egui_ctx);

        let mut app = Self {
            source: source.clone(),
            load: LoadState::Loading,
            shared_load: Arc::new(Mutex::new(LoadState::Loading)),
            runtime: None,
            route: Route::Home,
            theme,
            dictionary: DictionaryView::new(settings.page_size),
            changelog: ChangelogView::default(),
            metro: MetroMap::default(),
            boundaries: Boundaries::default(),
            logo_texture: None,
            toast: None,
            central_panel_rect: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
            export_dir: settings.export_dir_or_default(),
            data_source_setting: settings.data_source.clone(),
        };

        match &source {
            DataSource::Remote(url) => app.start_remote_load(&cc.egui_ctx, url.clone()),
            local => {
                app.load = match catalog::load_local(local) {
                    Ok(loaded) => LoadState::Ready(loaded),
                    Err(e) => {
                        error!(error = %e, source = %local.describe(), "Failed to load catalog");
                        LoadState::Failed(e.to_string())
                    }
                };
            }
        }
        app
    }

    /// One background GET; the result lands in `shared_load`
    fn start_remote_load(&mut self, ctx: &egui::Context, url: String) {
        let built = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build();
        let runtime = match built {
            Ok(rt) => self.runtime.insert(rt),
            Err(e) => {
                error!(error = %e, "Failed to start async runtime");
                self.load = LoadState::Failed(format!("failed to start runtime: {}", e));
                return;
            }
        };

        info!(url = %url, "Fetching catalog in background");
        let shared = self.shared_load.clone();
        let ctx = ctx.clone();
        runtime.spawn(async move {
            let state = match catalog::fetch_remote(&url).await {
                Ok(loaded) => LoadState::Ready(loaded),
                Err(e) => {
                    warn!(error = %e, url = %url, "Catalog fetch failed");
                    LoadState::Failed(e.to_string())
                }
            };
            if let Ok(mut guard) = shared.lock() {
                *guard = state;
            }
            ctx.request_repaint();
        });
    }

    /// Move a finished background load into the app
    pub(crate) fn poll_load(&mut self) {
        if !matches!(self.load, LoadState::Loading) {
            return;
        }
        if let Ok(mut guard) = self.shared_load.lock() {
            if !matches!(*guard, LoadState::Loading) {
                self.load = std::mem::take(&mut *guard);
                debug!(ready = matches!(self.load, LoadState::Ready(_)), "Background load finished");
            }
        }
    }

    pub(crate) fn toggle_theme(&mut self, ctx: &egui::Context) {
        let mode = self.theme.toggle();
        self.theme.apply(ctx);
        debug!(mode = ?mode, revision = self.theme.revision(), "Applied theme");
        self.save_settings();
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            theme_mode: self.theme.mode(),
            page_size: self.dictionary.page_size(),
            last_export_dir: Some(self.export_dir.to_string_lossy().to_string()),
            data_source: self.data_source_setting.clone(),
        };
        settings.save(&self.data_dir);
    }
}
