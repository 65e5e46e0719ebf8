//! Appearance of the provider-rendered sign-in button.

use serde::{Deserialize, Serialize};

/// Button colour scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonTheme {
    #[default]
    Outline,
    FilledBlue,
    FilledBlack,
}

impl ButtonTheme {
    /// Returns the identity provider's name for this theme.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Outline => "outline",
            Self::FilledBlue => "filled_blue",
            Self::FilledBlack => "filled_black",
        }
    }
}

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonSize {
    #[default]
    Large,
    Medium,
    Small,
}

impl ButtonSize {
    /// Returns the identity provider's name for this size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Large => "large",
            Self::Medium => "medium",
            Self::Small => "small",
        }
    }
}

/// Button caption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonText {
    #[default]
    SigninWith,
    SignupWith,
    ContinueWith,
    Signin,
}

impl ButtonText {
    /// Returns the identity provider's name for this caption.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SigninWith => "signin_with",
            Self::SignupWith => "signup_with",
            Self::ContinueWith => "continue_with",
            Self::Signin => "signin",
        }
    }
}

/// Options passed to the provider when rendering the button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonOptions {
    #[serde(default)]
    pub theme: ButtonTheme,
    #[serde(default)]
    pub size: ButtonSize,
    #[serde(default)]
    pub text: ButtonText,
    /// Button width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
}

fn default_width() -> u32 {
    280
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self {
            theme: ButtonTheme::default(),
            size: ButtonSize::default(),
            text: ButtonText::default(),
            width: default_width(),
        }
    }
}

impl ButtonOptions {
    /// Key/value pairs in the shape the provider's render call expects.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, String); 4] {
        [
            ("theme", self.theme.as_str().to_string()),
            ("size", self.size.as_str().to_string()),
            ("text", self.text.as_str().to_string()),
            ("width", self.width.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_render_large_outline_button() {
        let entries = ButtonOptions::default().entries();
        assert_eq!(
            entries,
            [
                ("theme", "outline".to_string()),
                ("size", "large".to_string()),
                ("text", "signin_with".to_string()),
                ("width", "280".to_string()),
            ]
        );
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let options: ButtonOptions =
            serde_json::from_str(r#"{"theme":"filled_black","width":320}"#)
                .expect("valid options");
        assert_eq!(options.theme, ButtonTheme::FilledBlack);
        assert_eq!(options.size, ButtonSize::Large);
        assert_eq!(options.text, ButtonText::SigninWith);
        assert_eq!(options.width, 320);
    }
}
