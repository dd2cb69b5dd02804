pub mod calendar;
pub mod canvas;
pub mod config;
pub mod consts;
pub mod error;
pub mod filenames;
pub mod font;
pub mod logging;
pub mod lunar;
pub mod page;
pub mod panel;

pub use error::{Error, Result};
pub use page::{generate, render_year, RenderReport};
