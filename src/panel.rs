use crate::{
    calendar::{month_grid, DAYS_IN_WEEK},
    canvas::{Rect, Surface},
    config::{Config, Palette},
    error::Result,
    font::Fonts,
    lunar::{HolidayKind, HolidaySet},
};
use image::Rgb;

const SATURDAY: usize = 5;
const SUNDAY: usize = 6;

/// Everything a panel needs besides the month it draws.
#[derive(Debug, Clone, Copy)]
pub struct PanelStyle<'a> {
    pub config: &'a Config,
    pub fonts: &'a Fonts,
    pub width: u32,
    pub height: u32,
}

/// Colour for a cell in `column` (Monday = 0). Holidays override weekend colouring,
/// which overrides the default text colour.
pub fn day_color(palette: &Palette, column: usize, holiday: Option<HolidayKind>) -> Rgb<u8> {
    if holiday.is_some() {
        return Rgb(palette.holiday);
    }

    match column {
        SUNDAY => Rgb(palette.sunday),
        SATURDAY => Rgb(palette.saturday),
        _ => Rgb(palette.text),
    }
}

/// Draws one month's bordered panel with its top-left corner at `origin`.
pub fn render_month_panel<S: Surface + ?Sized>(
    surface: &mut S,
    origin: (i32, i32),
    month: u32,
    year: i32,
    holidays: Option<&HolidaySet>,
    style: &PanelStyle<'_>,
) -> Result<()> {
    let grid = month_grid(year, month)?;

    let config = style.config;
    let m = config.panel();
    let palette = config.palette();
    let text = Rgb(palette.text);
    let line = Rgb(palette.grid);

    let (x, y) = origin;
    let (width, height) = (style.width as i32, style.height as i32);
    let inset = m.inset as i32;

    surface.draw_rect(
        Rect::new(x + inset, y + inset, x + width - inset, y + height - inset),
        text,
        m.border_width,
    );

    let title = config.month_name(month);
    let (title_width, _) = surface.measure_text(title, &style.fonts.title);
    surface.draw_text(
        (x + (width - title_width as i32) / 2, y + m.title_offset as i32),
        title,
        text,
        &style.fonts.title,
    );

    let header_y = y + m.header_offset as i32;
    let cell_width = (width - 2 * inset) / DAYS_IN_WEEK as i32;
    let cell_x = |col: usize| x + inset + col as i32 * cell_width;

    for (col, name) in config.weekday_names().iter().enumerate() {
        surface.draw_text(
            (
                cell_x(col) + cell_width / 2 - m.header_text_offset as i32,
                header_y,
            ),
            name,
            day_color(palette, col, None),
            &style.fonts.day,
        );
    }

    let cell_height = m.cell_height as i32;
    let mut row_y = header_y + m.grid_offset as i32;

    for week in grid.weeks() {
        for (col, day) in week.iter().enumerate() {
            let Some(day) = *day else {
                continue;
            };

            let holiday = holidays.and_then(|h| h.get(month, day));
            let label = match holiday {
                Some(kind) if kind.is_first_day() => config.lunar().first_day_glyph.clone(),
                _ => day.to_string(),
            };

            surface.draw_text(
                (
                    cell_x(col) + cell_width / 2 - m.day_text_offset as i32,
                    row_y,
                ),
                &label,
                day_color(palette, col, holiday),
                &style.fonts.day,
            );
        }

        surface.draw_line(
            (x + inset, row_y + cell_height),
            (x + width - inset, row_y + cell_height),
            line,
            1,
        );
        row_y += cell_height;
    }

    let columns_bottom = if m.columns_span_last_row {
        row_y
    } else {
        row_y - cell_height
    };

    for col in 0..=DAYS_IN_WEEK {
        surface.draw_line((cell_x(col), header_y), (cell_x(col), columns_bottom), line, 1);
    }

    Ok(())
}
