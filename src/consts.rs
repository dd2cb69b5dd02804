use crate::config::Theme;
use lazy_static::lazy_static;

pub const DEFAULT_YEAR: i32 = 2026;
pub const DEFAULT_OUTPUT_DIR: &str = "target";
pub const DEFAULT_EXTENSION: &str = "png";

pub const BLACK: [u8; 3] = [0, 0, 0];
pub const GRAY: [u8; 3] = [169, 169, 169];
pub const CRIMSON: [u8; 3] = [220, 20, 60];
pub const STEEL_BLUE: [u8; 3] = [70, 130, 180];

pub const FONT_PATH_BOLD: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
pub const FONT_PATH_REGULAR: &str = "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc";

/// Drawn in place of the numeral on the first day of the lunar year.
pub const FIRST_DAY_GLYPH: &str = "春";

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

lazy_static! {
    pub static ref DEFAULT_THEMES: Vec<Theme> = vec![
        Theme::new("gray", [245, 245, 245]),
        Theme::new("ivory", [255, 248, 220]),
        Theme::new("taupe", [157, 148, 136]),
    ];
}
