use glam::Vec3;

/// Straight (non-premultiplied) colour with components in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Vec3,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        rgb: Vec3::ZERO,
        a: 0.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            rgb: Vec3::new(r, g, b),
            a,
        }
    }

    pub fn from_rgb(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], 1.0)
    }

    /// Scale brightness by `intensity`, clamping to the valid range.
    pub fn lit(self, intensity: f32) -> Self {
        Self {
            rgb: (self.rgb * intensity).clamp(Vec3::ZERO, Vec3::ONE),
            a: self.a,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            rgb: self.rgb,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// 8-bit channels, rounded.
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [c(self.rgb.x), c(self.rgb.y), c(self.rgb.z), c(self.a)]
    }

    /// CSS `rgba()` string for canvas style properties.
    pub fn to_css(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("rgba({},{},{},{:.3})", r, g, b, self.a.clamp(0.0, 1.0))
    }
}

/// HSL to RGB; hue in degrees (wrapped), saturation and lightness in \[0, 1\].
pub fn hsl(hue_deg: f32, saturation: f32, lightness: f32) -> Vec3 {
    let h = hue_deg.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c * 0.5;
    Vec3::new(r + m, g + m, b + m)
}
