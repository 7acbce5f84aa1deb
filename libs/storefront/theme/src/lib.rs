//! Storefront Theme
//!
//! Style constants shared by the storefront mobile screens: brand colors,
//! the screen container, text inputs and the fallback avatar.
//!
//! The theme is an immutable value. Build it once for the platform the
//! client runs on and hand it to whatever renders:
//!
//! ```
//! use storefront_theme::{Platform, Theme};
//!
//! let theme = Theme::for_platform(Platform::Android, Some(24.0));
//! assert_eq!(theme.screen.padding_top, 24.0);
//! assert_eq!(theme.input_options.active_outline_color, theme.colors.primary);
//! ```

mod styles;

pub use styles::{InputMode, InputOptions, InputStyle, Palette, ScreenStyle};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Avatar shown for users without a profile picture
pub const DEFAULT_AVATAR_URL: &str =
    "https://p.kindpng.com/picc/s/451-4517876_default-profile-hd-png-download.png";

/// Operating system of the client
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Platform {
    Android,
    Ios,
    #[default]
    Web,
}

impl Platform {
    /// Only Android draws the app under a translucent status bar.
    pub fn draws_under_status_bar(self) -> bool {
        matches!(self, Platform::Android)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub platform: Platform,
    pub colors: Palette,
    pub screen: ScreenStyle,
    pub input: InputStyle,
    pub input_options: InputOptions,
    pub default_avatar_url: &'static str,
}

impl Theme {
    /// Theme for `platform`. `status_bar_height` is only used where the app
    /// draws under the status bar; unknown heights count as zero.
    pub fn for_platform(platform: Platform, status_bar_height: Option<f32>) -> Self {
        let colors = Palette::STOREFRONT;

        let padding_top = if platform.draws_under_status_bar() {
            status_bar_height.filter(|h| h.is_finite() && *h > 0.0).unwrap_or(0.0)
        } else {
            0.0
        };

        let input = InputStyle {
            height: 50.0,
            padding: 0.0,
            background_color: colors.surface,
            margin_vertical: 10.0,
            margin_horizontal: 20.0,
            line_height: 50.0,
        };

        Self {
            platform,
            colors,
            screen: ScreenStyle {
                padding: 35.0,
                padding_top,
                flex: 1.0,
                background_color: colors.surface,
            },
            input,
            input_options: InputOptions {
                style: input,
                mode: InputMode::Outlined,
                active_outline_color: colors.primary,
            },
            default_avatar_url: DEFAULT_AVATAR_URL,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_platform(Platform::default(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_status_bar_padding_only_on_android() {
        assert_eq!(Theme::for_platform(Platform::Android, Some(24.0)).screen.padding_top, 24.0);
        assert_eq!(Theme::for_platform(Platform::Android, None).screen.padding_top, 0.0);
        assert_eq!(Theme::for_platform(Platform::Ios, Some(44.0)).screen.padding_top, 0.0);
        assert_eq!(Theme::for_platform(Platform::Web, Some(10.0)).screen.padding_top, 0.0);
    }

    #[test]
    fn test_nonsense_status_bar_height_is_ignored() {
        let theme = Theme::for_platform(Platform::Android, Some(f32::NAN));
        assert_eq!(theme.screen.padding_top, 0.0);
        let theme = Theme::for_platform(Platform::Android, Some(-5.0));
        assert_eq!(theme.screen.padding_top, 0.0);
    }

    #[test]
    fn test_inputs_follow_palette() {
        let theme = Theme::default();
        assert_eq!(theme.input_options.style, theme.input);
        assert_eq!(theme.input_options.mode, InputMode::Outlined);
        assert_eq!(theme.input_options.active_outline_color, "#c70049");
        assert_eq!(theme.input.background_color, theme.colors.surface);
        assert_eq!(theme.screen.background_color, "white");
    }

    #[test]
    fn test_platform_parsing() {
        assert_eq!(Platform::from_str("android").unwrap(), Platform::Android);
        assert_eq!(Platform::from_str("iOS").unwrap(), Platform::Ios);
        assert!(Platform::from_str("symbian").is_err());
        assert_eq!(Platform::Ios.to_string(), "ios");
    }

    #[test]
    fn test_serializes_with_client_field_names() {
        let value = serde_json::to_value(Theme::for_platform(Platform::Android, Some(24.0))).unwrap();

        assert_eq!(value["platform"], "android");
        assert_eq!(value["colors"]["primaryLight"], "rgba(227,25,99,1)");
        assert_eq!(value["screen"]["paddingTop"], 24.0);
        assert_eq!(value["inputOptions"]["mode"], "outlined");
        assert_eq!(value["inputOptions"]["activeOutlineColor"], "#c70049");
        assert_eq!(
            value["input"],
            json!({
                "height": 50.0,
                "padding": 0.0,
                "backgroundColor": "white",
                "marginVertical": 10.0,
                "marginHorizontal": 20.0,
                "lineHeight": 50.0
            })
        );
        assert_eq!(value["defaultAvatarUrl"], DEFAULT_AVATAR_URL);
    }
}
