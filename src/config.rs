//! Application configuration and document metadata

use crate::gfx::{color::Color, rendering::render_engine::RenderSettings};

pub const TITLE: &str = "3D Raumplan - Moderne Europäische Wohnung";
pub const DESCRIPTION: &str = "Interaktiver 3D Raumplan für eine moderne europäische Wohnung";
pub const LOCALE: &str = "de";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    /// Logical inner size of the window
    pub width: u32,
    pub height: u32,
    pub clear_color: Color,
    pub vsync: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: TITLE.to_string(),
            width: 1200,
            height: 800,
            clear_color: Color::hex("#F0F0F0"),
            vsync: true,
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            vsync: self.vsync,
            clear_color: self.clear_color,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.title, TITLE);
        assert_eq!((config.width, config.height), (1200, 800));
        assert_eq!(config.clear_color, Color::hex("#F0F0F0"));
        assert_eq!(LOCALE, "de");
    }

    #[test]
    fn test_builder_overrides() {
        let config = AppConfig::default()
            .with_title("Grundriss")
            .with_size(0, 600)
            .with_vsync(false)
            .with_clear_color(Color::WHITE);
        assert_eq!(config.title, "Grundriss");
        assert_eq!((config.width, config.height), (1, 600));

        let settings = config.render_settings();
        assert!(!settings.vsync);
        assert_eq!(settings.clear_color, Color::WHITE);
        assert_eq!(settings.shadow_map_size, 2048);
    }
}
