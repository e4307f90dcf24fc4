//! Utility functions

use crate::constants::APP_NAME;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Stacked-cylinder logo, square viewBox so it doubles as the window icon
pub const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><defs><style>.top{fill:#2dd4bf}.body{fill:#0d9488}.band{fill:#115e59}</style></defs><path class="body" d="M10 14v36c0 4.4 9.8 8 22 8s22-3.6 22-8V14z"/><path class="band" d="M10 26c0 4.4 9.8 8 22 8s22-3.6 22-8v4c0 4.4-9.8 8-22 8s-22-3.6-22-8zM10 38c0 4.4 9.8 8 22 8s22-3.6 22-8v4c0 4.4-9.8 8-22 8s-22-3.6-22-8z"/><ellipse class="top" cx="32" cy="14" rx="22" ry="8"/></svg>"##;

/// Rasterize the logo to a square straight-alpha RGBA image
pub fn rasterize_logo_square(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = match resvg::usvg::Tree::from_str(LOGO_SVG, &resvg::usvg::Options::default()) {
        Ok(tree) => tree,
        Err(e) => {
            warn!(error = %e, "Failed to parse logo SVG");
            return None;
        }
    };
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Per-user data directory holding settings.json and logs
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Open the folder containing `path` in the platform file manager
pub fn reveal_in_file_manager(path: &Path) {
    let dir = if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or(path)
    };
    if let Err(e) = open::that(dir) {
        warn!(error = %e, dir = %dir.display(), "Failed to open folder");
    }
}

/// Thousands separators for counts shown in the UI
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_rasterizes_to_rgba() {
        let (rgba, w, h) = rasterize_logo_square(32).unwrap();
        assert_eq!((w, h), (32, 32));
        assert_eq!(rgba.len(), 32 * 32 * 4);
        assert!(rgba.chunks(4).any(|px| px[3] > 0));
    }

    #[test]
    fn counts_get_separators() {
        assert_eq!(format_count(7), "7");
        assert_eq!(format_count(1234), "1,234");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
