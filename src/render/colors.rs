use crate::tree::labels::LABEL_SEPARATOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    /// Hue from the top-level category, jittered per leaf
    #[default]
    Category,
    /// Hue hashed from the full leaf path
    Leaf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ColorSettings {
    pub mode: ColorMode,
}

const CATEGORY_SATURATION: f32 = 0.74;
const LEAF_SATURATION: f32 = 0.86;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl AppColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` for SVG attributes.
    pub fn to_hex(self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    /// Relative luminance (Rec. 709 weights, no gamma).
    pub fn luminance(self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

/// Fill color for a rectangle with the given verbose label.
pub fn rectangle_color(verbose_label: &str, settings: &ColorSettings) -> AppColor {
    let top = verbose_label
        .split(LABEL_SEPARATOR)
        .next()
        .unwrap_or(verbose_label);

    match settings.mode {
        ColorMode::Category => {
            let base = hsv_to_rgb(hash01(top), CATEGORY_SATURATION, 0.86);
            let hue_jitter = hash01(verbose_label) * 0.08 - 0.04;
            shift_hue(base, hue_jitter)
        }
        ColorMode::Leaf => hsv_to_rgb(hash01(verbose_label), LEAF_SATURATION, 0.84),
    }
}

/// Readable text color on top of `background`.
pub fn text_color(background: AppColor) -> AppColor {
    if background.luminance() > 0.55 {
        AppColor::new(0.08, 0.08, 0.10)
    } else {
        AppColor::new(0.96, 0.96, 0.98)
    }
}

pub fn mode_name(mode: ColorMode) -> &'static str {
    match mode {
        ColorMode::Category => "Category",
        ColorMode::Leaf => "Leaf",
    }
}

fn shift_hue(color: AppColor, hue_delta: f32) -> AppColor {
    let (h, s, v) = rgb_to_hsv(color);
    hsv_to_rgb((h + hue_delta).rem_euclid(1.0), s, v)
}

fn rgb_to_hsv(c: AppColor) -> (f32, f32, f32) {
    let max = c.r.max(c.g.max(c.b));
    let min = c.r.min(c.g.min(c.b));
    let d = max - min;
    let h = if d <= 1e-6 {
        0.0
    } else if (max - c.r).abs() <= 1e-6 {
        ((c.g - c.b) / d).rem_euclid(6.0) / 6.0
    } else if (max - c.g).abs() <= 1e-6 {
        (((c.b - c.r) / d) + 2.0) / 6.0
    } else {
        (((c.r - c.g) / d) + 4.0) / 6.0
    };
    let s = if max <= 1e-6 { 0.0 } else { d / max };
    (h, s, max)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> AppColor {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let i = h6.floor() as i32;
    let f = h6 - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    AppColor { r, g, b }
}

/// FNV-1a hash of `s`, mapped to [0, 1].
fn hash01(s: &str) -> f32 {
    let mut h: u32 = 2166136261;
    for &b in s.as_bytes() {
        h ^= b as u32;
        h = h.wrapping_mul(16777619);
    }
    ((h >> 8) as f32) / ((u32::MAX >> 8) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hue_distance(a: f32, b: f32) -> f32 {
        let d = (a - b).abs();
        d.min(1.0 - d)
    }

    #[test]
    fn hex_is_six_digits() {
        assert_eq!(AppColor::new(1.0, 0.0, 0.5).to_hex(), "#ff0080");
        assert_eq!(AppColor::new(-1.0, 2.0, 0.0).to_hex(), "#00ff00");
    }

    #[test]
    fn colors_are_deterministic() {
        let settings = ColorSettings::default();
        assert_eq!(
            rectangle_color("Google: female", &settings),
            rectangle_color("Google: female", &settings)
        );
    }

    #[test]
    fn siblings_under_one_category_share_a_hue_family() {
        let settings = ColorSettings::default();
        let (h1, _, _) = rgb_to_hsv(rectangle_color("Google: female", &settings));
        let (h2, _, _) = rgb_to_hsv(rectangle_color("Google: male", &settings));
        assert!(hue_distance(h1, h2) <= 0.08 + 1e-3);
    }

    #[test]
    fn fills_use_the_mode_saturation() {
        let (_, s, _) = rgb_to_hsv(rectangle_color("Google: male", &ColorSettings::default()));
        assert!((s - CATEGORY_SATURATION).abs() < 1e-3);

        let leaf = ColorSettings {
            mode: ColorMode::Leaf,
        };
        let (_, s, _) = rgb_to_hsv(rectangle_color("Google: male", &leaf));
        assert!((s - LEAF_SATURATION).abs() < 1e-3);
    }

    #[test]
    fn hsv_round_trip_keeps_hue() {
        let c = hsv_to_rgb(0.3, 0.5, 0.8);
        let (h, s, v) = rgb_to_hsv(c);
        assert!((h - 0.3).abs() < 1e-4);
        assert!((s - 0.5).abs() < 1e-4);
        assert!((v - 0.8).abs() < 1e-4);
    }

    #[test]
    fn text_contrasts_with_background() {
        assert!(text_color(AppColor::new(1.0, 1.0, 1.0)).luminance() < 0.2);
        assert!(text_color(AppColor::new(0.0, 0.0, 0.1)).luminance() > 0.8);
    }
}
