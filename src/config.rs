use crate::{
    consts::*,
    error::{Error, Result},
    filenames::wallcal_config,
};
use image::Rgb;
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const CONFIG_FILENAME: &str = ".wallcal.conf";

/// A named background colour; one image is written per theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub background: [u8; 3],
}

impl Theme {
    pub fn new(name: &str, background: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            background,
        }
    }

    pub fn color(&self) -> Rgb<u8> {
        Rgb(self.background)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 3840,
            height: 2160,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 50,
            right: 50,
            top: 200,
            bottom: 200,
        }
    }
}

impl Margins {
    /// `left + right`, or `None` when the sum overflows.
    pub fn horizontal(&self) -> Option<u32> {
        self.left.checked_add(self.right)
    }

    /// `top + bottom`, or `None` when the sum overflows.
    pub fn vertical(&self) -> Option<u32> {
        self.top.checked_add(self.bottom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub bold_path: std::path::PathBuf,
    pub regular_path: std::path::PathBuf,
    pub title_size: f32,
    pub year_size: f32,
    pub day_size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            bold_path: FONT_PATH_BOLD.into(),
            regular_path: FONT_PATH_REGULAR.into(),
            title_size: 60.0,
            year_size: 100.0,
            day_size: 35.0,
        }
    }
}

/// Foreground colours shared by every theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub text: [u8; 3],
    pub grid: [u8; 3],
    pub saturday: [u8; 3],
    pub sunday: [u8; 3],
    pub holiday: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: BLACK,
            grid: GRAY,
            saturday: STEEL_BLUE,
            sunday: CRIMSON,
            holiday: CRIMSON,
        }
    }
}

/// Pixel offsets used when laying out a month panel, all relative to the panel
/// origin or cell origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelMetrics {
    pub inset: u32,
    pub border_width: u32,
    pub title_offset: u32,
    pub header_offset: u32,
    pub grid_offset: u32,
    pub cell_height: u32,
    pub header_text_offset: u32,
    /// Applied to every numeral regardless of digit count.
    pub day_text_offset: u32,
    /// Extend the column separators through the last week row instead of stopping
    /// at its top edge.
    pub columns_span_last_row: bool,
}

impl Default for PanelMetrics {
    fn default() -> Self {
        Self {
            inset: 5,
            border_width: 2,
            title_offset: 20,
            header_offset: 120,
            grid_offset: 80,
            cell_height: 100,
            header_text_offset: 15,
            day_text_offset: 10,
            columns_span_last_row: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LunarConfig {
    pub enabled: bool,
    pub first_day_glyph: String,
}

impl Default for LunarConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            first_day_glyph: FIRST_DAY_GLYPH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    canvas: CanvasSize,
    margins: Margins,
    fonts: FontConfig,
    themes: Vec<Theme>,
    month_names: Vec<String>,
    weekday_names: Vec<String>,
    palette: Palette,
    panel: PanelMetrics,
    lunar: LunarConfig,
    extension: String,
    parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            margins: Margins::default(),
            fonts: FontConfig::default(),
            themes: DEFAULT_THEMES.clone(),
            month_names: MONTH_NAMES.iter().map(|s| s.to_string()).collect(),
            weekday_names: WEEKDAY_NAMES.iter().map(|s| s.to_string()).collect(),
            palette: Palette::default(),
            panel: PanelMetrics::default(),
            lunar: LunarConfig::default(),
            extension: DEFAULT_EXTENSION.to_string(),
            parallel: false,
        }
    }
}

impl Config {
    /// Reads the YAML config at `filename` (or the default location). A missing file
    /// yields the built-in defaults.
    pub fn load(filename: Option<std::path::PathBuf>) -> Result<Self> {
        let path = filename.unwrap_or(wallcal_config());
        let mut io = std::fs::OpenOptions::new();
        io.read(true);

        let config: Self = match io.open(&path) {
            Ok(io) => serde_yaml::from_reader(io)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e.into()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, filename: Option<std::path::PathBuf>) -> Result<()> {
        let path = filename.unwrap_or(wallcal_config());
        let mut io = std::fs::OpenOptions::new();
        io.write(true);
        io.truncate(true);
        io.create(true);
        let io = io.open(path)?;

        Ok(serde_yaml::to_writer(io, self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.month_names.len() != 12 {
            return Err(Error::Config(format!(
                "month_names must list 12 names, found {}",
                self.month_names.len()
            )));
        }

        if self.weekday_names.len() != 7 {
            return Err(Error::Config(format!(
                "weekday_names must list 7 names, found {}",
                self.weekday_names.len()
            )));
        }

        if self.themes.is_empty() {
            return Err(Error::Config("at least one theme is required".to_string()));
        }

        let mut seen = BTreeSet::new();
        for theme in &self.themes {
            if theme.name.is_empty() {
                return Err(Error::Config("theme names cannot be empty".to_string()));
            }
            if !seen.insert(theme.name.as_str()) {
                return Err(Error::Config(format!("duplicate theme '{}'", theme.name)));
            }
        }

        if self.extension.is_empty() {
            return Err(Error::Config("output extension cannot be empty".to_string()));
        }

        let m = &self.margins;
        let fits = |extent: u32, margin: Option<u32>| margin.is_some_and(|m| extent > m);
        if !fits(self.canvas.width, m.horizontal()) || !fits(self.canvas.height, m.vertical()) {
            return Err(Error::Config(format!(
                "canvas {}x{} leaves no room inside its margins",
                self.canvas.width, self.canvas.height
            )));
        }

        Ok(())
    }

    pub fn canvas(&self) -> &CanvasSize {
        &self.canvas
    }

    pub fn set_canvas(&mut self, width: u32, height: u32) {
        self.canvas = CanvasSize { width, height };
    }

    pub fn margins(&self) -> &Margins {
        &self.margins
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    pub fn fonts(&self) -> &FontConfig {
        &self.fonts
    }

    pub fn set_fonts(&mut self, fonts: FontConfig) {
        self.fonts = fonts;
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn set_themes(&mut self, themes: Vec<Theme>) {
        self.themes = themes;
    }

    /// Name of `month` (1-based).
    pub fn month_name(&self, month: u32) -> &str {
        &self.month_names[(month - 1) as usize]
    }

    pub fn weekday_names(&self) -> &[String] {
        &self.weekday_names
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn panel(&self) -> &PanelMetrics {
        &self.panel
    }

    pub fn set_panel(&mut self, panel: PanelMetrics) {
        self.panel = panel;
    }

    pub fn lunar(&self) -> &LunarConfig {
        &self.lunar
    }

    pub fn set_lunar_enabled(&mut self, enabled: bool) {
        self.lunar.enabled = enabled;
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn set_extension(&mut self, extension: String) {
        self.extension = extension;
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }
}
