// SPDX-FileCopyrightText: 2021 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Gap, in pixels, between the close button and the corner of the content's border.
pub const CLOSE_BUTTON_INSET: f64 = 2.0;

/// Height of the spacer above the content that centers it vertically. Never negative, so
/// content taller than the viewport starts at the top.
pub fn spacer_height(viewport_height: f64, content_height: f64) -> f64 {
    (viewport_height - content_height).max(0.0) / 2.0
}

/// Margin that cancels out the content's own padding, so the close button sits at the corner.
pub fn close_button_margin(padding: f64) -> f64 {
    CLOSE_BUTTON_INSET - padding
}

/// Formats a CSS pixel length, e.g. `12.5px`.
pub fn px(length: f64) -> String {
    format!("{}px", length)
}

/// Parses a computed CSS pixel length like `12.5px`. Anything unparsable counts as zero.
pub fn parse_px(value: &str) -> f64 {
    let value = value.trim();
    value
        .strip_suffix("px")
        .unwrap_or(value)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacer() {
        assert_eq!(spacer_height(800.0, 200.0), 300.0);
        assert_eq!(spacer_height(801.0, 200.0), 300.5);
        assert_eq!(spacer_height(200.0, 200.0), 0.0);
        assert_eq!(spacer_height(200.0, 1000.0), 0.0);
    }

    #[test]
    fn margin() {
        assert_eq!(close_button_margin(0.0), 2.0);
        assert_eq!(close_button_margin(10.0), -8.0);
    }

    #[test]
    fn pixels() {
        assert_eq!(px(300.0), "300px");
        assert_eq!(px(300.5), "300.5px");
        assert_eq!(px(-8.0), "-8px");

        assert_eq!(parse_px("12px"), 12.0);
        assert_eq!(parse_px(" 1.5px "), 1.5);
        assert_eq!(parse_px("3"), 3.0);
        assert_eq!(parse_px(""), 0.0);
        assert_eq!(parse_px("auto"), 0.0);
    }
}
