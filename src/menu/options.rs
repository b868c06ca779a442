/// Menu construction options.
///
/// These flags are fixed when the menu is created with
/// [`Menu::with_options`](crate::Menu::with_options).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuOptions {
    /// Draw the title inside a frame instead of on a single line.
    pub banner: bool,
    /// Append a quit entry the first time the menu runs.
    pub quit_entry: bool,
    /// Center the title horizontally.
    pub center_title: bool,
    /// Move the selection to an entry when the pointer enters it.
    pub select_on_hover: bool,
    /// Name of the quit entry.
    pub quit_label: String,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            banner: true,
            quit_entry: true,
            center_title: true,
            select_on_hover: false,
            quit_label: "Quit".to_string(),
        }
    }
}

impl MenuOptions {
    #[must_use]
    pub fn with_banner(mut self, banner: bool) -> Self {
        self.banner = banner;
        self
    }

    #[must_use]
    pub fn with_quit_entry(mut self, quit_entry: bool) -> Self {
        self.quit_entry = quit_entry;
        self
    }

    #[must_use]
    pub fn with_center_title(mut self, center_title: bool) -> Self {
        self.center_title = center_title;
        self
    }

    #[must_use]
    pub fn with_select_on_hover(mut self, select_on_hover: bool) -> Self {
        self.select_on_hover = select_on_hover;
        self
    }

    #[must_use]
    pub fn with_quit_label(mut self, label: impl Into<String>) -> Self {
        self.quit_label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = MenuOptions::default();
        assert!(options.banner);
        assert!(options.quit_entry);
        assert!(options.center_title);
        assert!(!options.select_on_hover);
        assert_eq!(options.quit_label, "Quit");
    }

    #[test]
    fn test_builders() {
        let options = MenuOptions::default()
            .with_banner(false)
            .with_quit_entry(false)
            .with_center_title(false)
            .with_select_on_hover(true)
            .with_quit_label("Back");
        assert_eq!(
            options,
            MenuOptions {
                banner: false,
                quit_entry: false,
                center_title: false,
                select_on_hover: true,
                quit_label: "Back".to_string(),
            }
        );
    }
}
