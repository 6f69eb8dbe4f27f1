//! Lightweight CSS property extraction.
//!
//! Parses inline `style=""` attributes and extracts the small set of visual
//! properties the rasterizers use, plus the shade/tint blend used for panel
//! backgrounds and side materials.

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Blend toward white (`p > 0`) or black (`p < 0`), `p` in [-1, 1].
    ///
    /// Each channel interpolates linearly and rounds, so `blend(0)` is the
    /// identity, `blend(-1)` is pure black and `blend(1)` is pure white.
    /// Alpha is preserved.
    pub fn blend(self, p: f32) -> Color {
        let p = p.clamp(-1.0, 1.0);
        let channel = |c: u8| -> u8 {
            let c = c as f32;
            let out = if p >= 0.0 {
                c + (255.0 - c) * p
            } else {
                c * (1.0 + p)
            };
            out.round().clamp(0.0, 255.0) as u8
        };
        Color {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: self.a,
        }
    }

    /// CSS `rgb(r, g, b)` form.
    pub fn to_rgb_string(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    /// Colors appear in configuration as CSS strings (`"#rrggbb"`,
    /// `"rgb(...)"`, named).
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        parse_css_color(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unparseable CSS color `{s}`")))
    }
}

/// Extracted CSS visual properties.
#[derive(Debug, Clone, Default)]
pub struct StyleProps {
    pub color: Option<Color>,
    pub background_color: Option<Color>,
    pub font_size: Option<f32>,
}

/// Parse an inline `style="..."` attribute value.
pub fn parse_inline_style(style: &str) -> StyleProps {
    let mut props = StyleProps::default();
    for decl in style.split(';') {
        let parts: Vec<&str> = decl.splitn(2, ':').collect();
        if parts.len() != 2 {
            continue;
        }
        let prop = parts[0].trim();
        let val = parts[1].trim();
        match prop {
            "color" => props.color = parse_css_color(val),
            "background-color" | "background" => props.background_color = parse_css_color(val),
            "font-size" => props.font_size = parse_css_size(val),
            _ => {}
        }
    }
    props
}

/// Parse a CSS color value: named subset, `#rgb`/`#rrggbb`/`#rrggbbaa`,
/// `rgb(...)`/`rgba(...)`.
pub fn parse_css_color(val: &str) -> Option<Color> {
    let v = val.trim().to_lowercase();

    let named = match v.as_str() {
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        "red" => Some(Color::rgb(255, 0, 0)),
        "green" => Some(Color::rgb(0, 128, 0)),
        "blue" => Some(Color::rgb(0, 0, 255)),
        "yellow" => Some(Color::rgb(255, 255, 0)),
        "orange" => Some(Color::rgb(255, 165, 0)),
        "purple" => Some(Color::rgb(128, 0, 128)),
        "gray" | "grey" => Some(Color::rgb(128, 128, 128)),
        "transparent" => Some(Color::TRANSPARENT),
        _ => None,
    };
    if named.is_some() {
        return named;
    }

    if let Some(hex) = v.strip_prefix('#') {
        return match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Color::rgb(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color::rgb(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Color { r, g, b, a })
            }
            _ => None,
        };
    }

    if v.starts_with("rgb") {
        let inner = v
            .trim_start_matches("rgba(")
            .trim_start_matches("rgb(")
            .trim_end_matches(')');
        let nums: Vec<f32> = inner
            .split(',')
            .filter_map(|s| s.trim().parse::<f32>().ok())
            .collect();
        if nums.len() >= 3 {
            let a = if nums.len() >= 4 {
                (nums[3].clamp(0.0, 1.0) * 255.0).round() as u8
            } else {
                255
            };
            return Some(Color {
                r: nums[0].round().clamp(0.0, 255.0) as u8,
                g: nums[1].round().clamp(0.0, 255.0) as u8,
                b: nums[2].round().clamp(0.0, 255.0) as u8,
                a,
            });
        }
    }

    None
}

/// Parse a CSS size value (px or plain number).
fn parse_css_size(val: &str) -> Option<f32> {
    let v = val.trim().to_lowercase();
    let num_str = v
        .trim_end_matches("px")
        .trim_end_matches("em")
        .trim_end_matches("rem");
    num_str.parse::<f32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_colors() {
        assert_eq!(parse_css_color("red"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_css_color("black"), Some(Color::BLACK));
        assert_eq!(parse_css_color("transparent"), Some(Color::TRANSPARENT));
    }

    #[test]
    fn parse_hex_colors() {
        assert_eq!(parse_css_color("#ff0000"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_css_color("#f00"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_css_color("#33445566").unwrap().a, 0x66);
    }

    #[test]
    fn parse_rgb_colors() {
        assert_eq!(
            parse_css_color("rgb(128, 64, 0)"),
            Some(Color::rgb(128, 64, 0))
        );
        assert_eq!(parse_css_color("rgba(1, 2, 3, 0.0)").unwrap().a, 0);
    }

    #[test]
    fn blend_boundaries() {
        let c = Color::rgb(120, 45, 200);
        assert_eq!(c.blend(0.0), c);
        assert_eq!(c.blend(-1.0), Color::rgb(0, 0, 0));
        assert_eq!(c.blend(1.0), Color::rgb(255, 255, 255));
    }

    #[test]
    fn blend_is_monotonic_per_channel() {
        let c = Color::rgb(10, 130, 250);
        let mut prev = c.blend(-1.0);
        let mut p = -1.0;
        while p <= 1.0 {
            let cur = c.blend(p);
            assert!(cur.r >= prev.r && cur.g >= prev.g && cur.b >= prev.b);
            prev = cur;
            p += 0.05;
        }
    }

    #[test]
    fn blend_rounds_per_channel() {
        // 100 + (255-100)*0.5 = 177.5 -> 178
        assert_eq!(Color::rgb(100, 100, 100).blend(0.5).r, 178);
        // 101 * 0.5 = 50.5 -> 51
        assert_eq!(Color::rgb(101, 101, 101).blend(-0.5).r, 51);
    }

    #[test]
    fn parse_inline() {
        let props = parse_inline_style("color: red; font-size: 20px; background-color: #333");
        assert_eq!(props.color, Some(Color::rgb(255, 0, 0)));
        assert!((props.font_size.unwrap() - 20.0).abs() < 0.01);
        assert_eq!(props.background_color, Some(Color::rgb(0x33, 0x33, 0x33)));
    }
}
