use crate::config::CONFIG_FILENAME;
use std::path::{Path, PathBuf};

pub fn wallcal_config() -> PathBuf {
    dirs::home_dir().unwrap_or("/".into()).join(CONFIG_FILENAME)
}

/// `{dir}/{year}_calendar_{theme}.{ext}`
pub fn output_file(dir: &Path, year: i32, theme: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}_calendar_{}.{}", year, theme, extension))
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_output_file() {
        use super::output_file;
        use std::path::{Path, PathBuf};

        let table = vec![
            ("target", 2026, "gray", "png", "target/2026_calendar_gray.png"),
            ("out", 1900, "ivory", "jpg", "out/1900_calendar_ivory.jpg"),
        ];

        for (dir, year, theme, ext, expected) in table {
            assert_eq!(
                output_file(Path::new(dir), year, theme, ext),
                PathBuf::from(expected)
            );
        }
    }

    #[test]
    fn test_config_path_in_home() {
        let path = super::wallcal_config();
        assert!(path.ends_with(super::CONFIG_FILENAME));
    }
}
