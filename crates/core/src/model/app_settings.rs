/// Persisted user preferences. Only the theme choice exists today.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppSettings {
    dark_theme: bool,
}

impl AppSettings {
    #[must_use]
    pub fn from_persisted(dark_theme: bool) -> Self {
        Self { dark_theme }
    }

    #[must_use]
    pub fn dark_theme(&self) -> bool {
        self.dark_theme
    }

    #[must_use]
    pub fn with_dark_theme(self, dark_theme: bool) -> Self {
        Self { dark_theme }
    }
}
