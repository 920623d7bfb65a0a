//! Theme palettes for chart styling
//!
//! Two fixed palettes keyed purely off [`ThemeMode`]. Options are rebuilt
//! on every render, so a chart never mixes tokens from both palettes.

use serde_json::{Value, json};

use crate::theme::ThemeMode;

/// Color and typography tokens handed to every chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleOptions {
    pub mode: ThemeMode,
    pub grid_color: &'static str,
    pub text_color: &'static str,
    pub tooltip_background: &'static str,
    /// Separator drawn between donut segments
    pub segment_border: &'static str,
    pub tick_font_size: u32,
    pub legend_box_width: u32,
    pub legend_padding: u32,
}

const LIGHT: StyleOptions = StyleOptions {
    mode: ThemeMode::Light,
    grid_color: "rgba(0, 0, 0, 0.1)",
    text_color: "#374151",
    tooltip_background: "rgba(255, 255, 255, 0.8)",
    segment_border: "#FFFFFF",
    tick_font_size: 12,
    legend_box_width: 12,
    legend_padding: 20,
};

const DARK: StyleOptions = StyleOptions {
    mode: ThemeMode::Dark,
    grid_color: "rgba(255, 255, 255, 0.1)",
    text_color: "#E5E7EB",
    tooltip_background: "rgba(31, 41, 55, 0.8)",
    segment_border: "#1F2937",
    tick_font_size: 12,
    legend_box_width: 12,
    legend_padding: 20,
};

/// Palette for the given mode
pub fn build_theme_options(mode: ThemeMode) -> StyleOptions {
    match mode {
        ThemeMode::Light => LIGHT,
        ThemeMode::Dark => DARK,
    }
}

impl StyleOptions {
    fn axis(&self) -> Value {
        json!({
            "ticks": { "color": self.text_color, "font": { "size": self.tick_font_size } },
            "grid": { "color": self.grid_color },
        })
    }

    /// Chart.js `plugins` block shared by every chart kind
    pub fn plugin_options(&self) -> Value {
        json!({
            "legend": {
                "labels": {
                    "color": self.text_color,
                    "boxWidth": self.legend_box_width,
                    "padding": self.legend_padding,
                }
            },
            "tooltip": {
                "bodyColor": self.text_color,
                "titleColor": self.text_color,
                "backgroundColor": self.tooltip_background,
                "borderColor": self.grid_color,
            }
        })
    }

    /// Base Chart.js options for cartesian charts
    pub fn base_options(&self) -> Value {
        json!({
            "plugins": self.plugin_options(),
            "scales": {
                "x": self.axis(),
                "y": self.axis(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_are_fixed_per_mode() {
        let light = build_theme_options(ThemeMode::Light);
        let dark = build_theme_options(ThemeMode::Dark);

        assert_eq!(light.grid_color, "rgba(0, 0, 0, 0.1)");
        assert_eq!(light.text_color, "#374151");
        assert_eq!(dark.grid_color, "rgba(255, 255, 255, 0.1)");
        assert_eq!(dark.text_color, "#E5E7EB");
        assert_eq!(dark.tooltip_background, "rgba(31, 41, 55, 0.8)");
        assert_eq!(build_theme_options(ThemeMode::Dark), dark);
    }

    #[test]
    fn test_base_options_use_palette() {
        let opts = build_theme_options(ThemeMode::Dark).base_options();
        assert_eq!(opts["scales"]["x"]["ticks"]["color"], "#E5E7EB");
        assert_eq!(opts["scales"]["y"]["grid"]["color"], "rgba(255, 255, 255, 0.1)");
        assert_eq!(opts["plugins"]["tooltip"]["borderColor"], "rgba(255, 255, 255, 0.1)");
        assert_eq!(opts["plugins"]["legend"]["labels"]["boxWidth"], 12);
    }
}
