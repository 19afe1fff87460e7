use colored::{Color, ColoredString, Colorize};

pub(crate) const LOG_TARGET_EXTRACT: &str = "apicompat::extract";
pub(crate) const LOG_TARGET_ASSEMBLE: &str = "apicompat::assemble";
pub(crate) const LOG_TARGET_DRIVER: &str = "apicompat::driver";

// Color scheme constants (Tokyo Night inspired)
const COLOR_NAME: Color = Color::TrueColor {
    r: 255,
    g: 202,
    b: 158,
}; // Peach
const COLOR_PATH: Color = Color::TrueColor {
    r: 158,
    g: 206,
    b: 255,
}; // Sky blue
const COLOR_ERROR: Color = Color::TrueColor {
    r: 247,
    g: 118,
    b: 142,
}; // Soft red

// Logging trait for consistent styling
pub(crate) trait LogStyle: AsRef<str> {
    fn log_name(&self) -> ColoredString {
        self.as_ref().color(COLOR_NAME)
    }

    fn log_path(&self) -> ColoredString {
        self.as_ref().color(COLOR_PATH)
    }

    fn log_error(&self) -> ColoredString {
        self.as_ref().color(COLOR_ERROR).bold()
    }
}

impl LogStyle for String {}
impl LogStyle for str {}
