use serde::Serialize;
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Brand colors. Values are CSS color strings the mobile client uses as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: &'static str,
    pub primary_light: &'static str,
    pub primary_translucent: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub transparent: &'static str,
    pub muted_background: &'static str,
    pub subtle_background: &'static str,
}

impl Palette {
    pub const STOREFRONT: Palette = Palette {
        primary: "#c70049",
        primary_light: "rgba(227,25,99,1)",
        primary_translucent: "rgba(199,0,73,0.8)",
        surface: "white",
        text: "rgb(45,45,45)",
        transparent: "transparent",
        muted_background: "#f2f2f2",
        subtle_background: "#f7f7f7",
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::STOREFRONT
    }
}

/// Root container of every screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScreenStyle {
    pub padding: f32,
    /// Room for the status bar where the OS draws content under it
    pub padding_top: f32,
    pub flex: f32,
    pub background_color: &'static str,
}

/// Text input box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InputStyle {
    pub height: f32,
    pub padding: f32,
    pub background_color: &'static str,
    pub margin_vertical: f32,
    pub margin_horizontal: f32,
    pub line_height: f32,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputMode {
    Flat,
    #[default]
    Outlined,
}

/// Props spread onto every text input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InputOptions {
    pub style: InputStyle,
    pub mode: InputMode,
    pub active_outline_color: &'static str,
}
