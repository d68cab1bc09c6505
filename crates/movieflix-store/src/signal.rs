use movieflix_models::Theme;

/// Host hint for the user's light/dark preference
pub trait ColorSchemeSignal {
    fn preferred(&self) -> Option<Theme>;
}

/// Reads the environment: `MOVIEFLIX_COLOR_SCHEME` first, then the terminal's
/// `COLORFGBG` background color.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemColorScheme;

impl SystemColorScheme {
    pub fn detect(explicit: Option<&str>, colorfgbg: Option<&str>) -> Option<Theme> {
        if let Some(theme) = explicit.and_then(|v| v.parse::<Theme>().ok()) {
            return Some(theme);
        }

        // "fg;bg" or "fg;default;bg". ANSI colors 0-6 and 8 are dark backgrounds.
        let background = colorfgbg?.rsplit(';').next()?.trim().parse::<u8>().ok()?;
        if background <= 6 || background == 8 {
            Some(Theme::Dark)
        } else {
            Some(Theme::Light)
        }
    }
}

impl ColorSchemeSignal for SystemColorScheme {
    fn preferred(&self) -> Option<Theme> {
        Self::detect(
            std::env::var("MOVIEFLIX_COLOR_SCHEME").ok().as_deref(),
            std::env::var("COLORFGBG").ok().as_deref(),
        )
    }
}

/// A signal that always reports the same answer
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedColorScheme(pub Option<Theme>);

impl ColorSchemeSignal for FixedColorScheme {
    fn preferred(&self) -> Option<Theme> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_override_wins() {
        assert_eq!(SystemColorScheme::detect(Some("dark"), Some("0;15")), Some(Theme::Dark));
    }

    #[test]
    fn test_colorfgbg_background() {
        assert_eq!(SystemColorScheme::detect(None, Some("15;0")), Some(Theme::Dark));
        assert_eq!(SystemColorScheme::detect(None, Some("0;default;15")), Some(Theme::Light));
        assert_eq!(SystemColorScheme::detect(Some("sepia"), Some("7;8")), Some(Theme::Dark));
    }

    #[test]
    fn test_no_signal() {
        assert_eq!(SystemColorScheme::detect(None, None), None);
        assert_eq!(SystemColorScheme::detect(None, Some("garbage")), None);
    }
}
