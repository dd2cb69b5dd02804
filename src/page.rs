use crate::{
    calendar::validate_year,
    canvas::{Canvas, Surface},
    config::{CanvasSize, Config, Margins, Theme},
    error::{Error, Result},
    filenames::output_file,
    font::Fonts,
    lunar::{HolidayProvider, HolidaySet, LunarNewYear},
    panel::{render_month_panel, PanelStyle},
};
use image::Rgb;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Panel placement for a canvas, derived once per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutGeometry {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub left_margin: u32,
    pub top_margin: u32,
    pub panel_width: u32,
    pub panel_height: u32,
}

impl LayoutGeometry {
    pub const COLUMNS: u32 = 6;
    pub const ROWS: u32 = 2;

    pub fn new(canvas: &CanvasSize, margins: &Margins) -> Self {
        Self {
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            left_margin: margins.left,
            top_margin: margins.top,
            panel_width: inner_extent(canvas.width, margins.horizontal()) / Self::COLUMNS,
            panel_height: inner_extent(canvas.height, margins.vertical()) / Self::ROWS,
        }
    }

    /// `(row, column)` of `month` (1-based) in the 2x6 grid.
    pub fn cell(month: u32) -> (u32, u32) {
        ((month - 1) / Self::COLUMNS, (month - 1) % Self::COLUMNS)
    }

    pub fn panel_origin(&self, month: u32) -> (i32, i32) {
        let (row, col) = Self::cell(month);
        (
            (col * self.panel_width + self.left_margin) as i32,
            (row * self.panel_height + self.top_margin) as i32,
        )
    }
}

/// Space left inside `extent` after `margin`, zero when the margins do not fit.
fn inner_extent(extent: u32, margin: Option<u32>) -> u32 {
    margin
        .and_then(|m| extent.checked_sub(m))
        .unwrap_or(0)
}

/// Read-only state shared by every theme in one render pass.
#[derive(Debug, Clone, Copy)]
struct RenderPass<'a> {
    year: i32,
    config: &'a Config,
    fonts: &'a Fonts,
    holidays: Option<&'a HolidaySet>,
    output_dir: &'a Path,
}

impl RenderPass<'_> {
    fn render_theme(&self, theme: &Theme) -> Result<PathBuf> {
        debug!(year = self.year, theme = %theme.name, "rendering theme");

        let size = self.config.canvas();
        let mut canvas = Canvas::new(size.width, size.height, theme.color());
        compose_page(&mut canvas, self.year, self.config, self.fonts, self.holidays)?;

        std::fs::create_dir_all(self.output_dir).map_err(|source| Error::OutputDir {
            path: self.output_dir.to_path_buf(),
            source,
        })?;

        let path = output_file(
            self.output_dir,
            self.year,
            &theme.name,
            self.config.extension(),
        );
        canvas.save(&path)?;

        info!(year = self.year, theme = %theme.name, path = %path.display(), "wrote calendar");
        Ok(path)
    }
}

/// Draws the year label and all twelve month panels onto `surface`.
pub fn compose_page<S: Surface + ?Sized>(
    surface: &mut S,
    year: i32,
    config: &Config,
    fonts: &Fonts,
    holidays: Option<&HolidaySet>,
) -> Result<()> {
    let geometry = LayoutGeometry::new(config.canvas(), config.margins());

    let label = year.to_string();
    let (w, h) = surface.measure_text(&label, &fonts.year);
    surface.draw_text(
        (
            (geometry.canvas_width as i32 - w as i32) / 2,
            (geometry.top_margin as i32 - h as i32) / 2,
        ),
        &label,
        Rgb(config.palette().text),
        &fonts.year,
    );

    let style = PanelStyle {
        config,
        fonts,
        width: geometry.panel_width,
        height: geometry.panel_height,
    };

    for month in 1..=12 {
        render_month_panel(
            surface,
            geometry.panel_origin(month),
            month,
            year,
            holidays,
            &style,
        )?;
    }

    Ok(())
}

#[derive(Debug)]
pub struct ThemeFailure {
    pub theme: String,
    pub error: Error,
}

/// Outcome of a render pass. Themes succeed or fail independently.
#[derive(Debug, Default)]
pub struct RenderReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<ThemeFailure>,
}

impl RenderReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// The written paths, or the first failure if any theme failed.
    pub fn into_result(self) -> Result<Vec<PathBuf>> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure.error),
            None => Ok(self.written),
        }
    }
}

/// Renders one image per configured theme into `output_dir`.
///
/// Fonts are acquired once and holidays resolved once, then shared read-only by
/// every theme. With `parallel` set each theme renders on its own thread.
pub fn render_year(
    year: i32,
    config: &Config,
    provider: Option<&dyn HolidayProvider>,
    output_dir: &Path,
) -> RenderReport {
    let fonts = Fonts::load(config.fonts());
    let holidays = provider.map(|p| p.holidays(year));

    let pass = RenderPass {
        year,
        config,
        fonts: &fonts,
        holidays: holidays.as_ref(),
        output_dir,
    };

    let themes = config.themes();
    let outcomes: Vec<Result<PathBuf>> = if config.parallel() {
        std::thread::scope(|s| {
            let handles: Vec<_> = themes
                .iter()
                .map(|theme| s.spawn(move || pass.render_theme(theme)))
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        })
    } else {
        themes.iter().map(|theme| pass.render_theme(theme)).collect()
    };

    let mut report = RenderReport::default();
    for (theme, outcome) in themes.iter().zip(outcomes) {
        match outcome {
            Ok(path) => report.written.push(path),
            Err(e) => {
                error!(year, theme = %theme.name, error = %e, "theme failed");
                report.failures.push(ThemeFailure {
                    theme: theme.name.clone(),
                    error: e,
                });
            }
        }
    }

    report
}

/// Validates `year` and `config`, then renders every theme, attaching the lunar
/// holiday provider when the configuration enables it.
pub fn generate(year: i32, config: &Config, output_dir: &Path) -> Result<RenderReport> {
    let year = validate_year(year)?;
    config.validate()?;

    let lunar = LunarNewYear;
    let provider: Option<&dyn HolidayProvider> = if config.lunar().enabled {
        Some(&lunar)
    } else {
        None
    };

    info!(year, themes = config.themes().len(), lunar = provider.is_some(), "generating calendar");
    Ok(render_year(year, config, provider, output_dir))
}
