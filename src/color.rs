use num_traits::clamp;

pub const CHANNEL_MAX: f64 = 255.0;

/// Lightness weight of the CMC l:c metric.
pub const CMC_LIGHTNESS: f64 = 1.0;
/// Chroma weight of the CMC l:c metric.
pub const CMC_CHROMA: f64 = 1.0;

// D65 reference white
const WHITE_X: f64 = 0.95047;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.08883;

const LAB_EPSILON: f64 = 216.0 / 24389.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl From<[i64; 3]> for Color {
    fn from([red, green, blue]: [i64; 3]) -> Color {
        Color::rgb(red as f64, green as f64, blue as f64)
    }
}

fn blend(fg: f64, bg: f64, alpha: f64) -> f64 {
    clamp(alpha * fg + (1. - alpha) * bg, 0., CHANNEL_MAX)
}

fn linearize(c: f64) -> f64 {
    let c = c / CHANNEL_MAX;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16. / 116.
    }
}

impl Color {
    pub fn rgb(red: impl Into<f64>, green: impl Into<f64>, blue: impl Into<f64>) -> Self {
        Color { red: red.into(), green: green.into(), blue: blue.into() }
    }

    /// Composites `fg` over `self` with weight `alpha`, clamping each channel
    /// into `[0, 255]` independently.
    pub fn blend(self, fg: Self, alpha: f64) -> Self {
        Color {
            red: blend(fg.red, self.red, alpha),
            green: blend(fg.green, self.green, alpha),
            blue: blend(fg.blue, self.blue, alpha),
        }
    }

    pub fn to_lab(self) -> Lab {
        let r = linearize(self.red);
        let g = linearize(self.green);
        let b = linearize(self.blue);

        let x = 0.412424 * r + 0.357579 * g + 0.180464 * b;
        let y = 0.212656 * r + 0.715158 * g + 0.0721856 * b;
        let z = 0.0193324 * r + 0.119193 * g + 0.950444 * b;

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y / WHITE_Y);
        let fz = lab_f(z / WHITE_Z);

        Lab {
            l: 116. * fy - 16.,
            a: 500. * (fx - fy),
            b: 200. * (fy - fz),
        }
    }

    /// CMC l:c (l = c = 1) difference with `self` as the reference color.
    /// Not symmetric: `a.distance(b)` and `b.distance(a)` generally differ.
    pub fn distance(self, other: Self) -> f64 {
        self.to_lab().delta_e_cmc(other.to_lab(), CMC_LIGHTNESS, CMC_CHROMA)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub fn chroma(&self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Hue angle in degrees, in `[0, 360)`.
    pub fn hue(&self) -> f64 {
        self.b.atan2(self.a).to_degrees().rem_euclid(360.)
    }

    pub fn delta_e_cmc(self, other: Lab, pl: f64, pc: f64) -> f64 {
        let c1 = self.chroma();
        let c2 = other.chroma();

        let delta_l = self.l - other.l;
        let delta_c = c1 - c2;
        let delta_a = self.a - other.a;
        let delta_b = self.b - other.b;
        // rounding can push this slightly below zero for near-identical hues
        let delta_h = (delta_a * delta_a + delta_b * delta_b - delta_c * delta_c)
            .max(0.)
            .sqrt();

        let h1 = self.hue();
        let c1_4 = c1.powi(4);
        let f = (c1_4 / (c1_4 + 1900.)).sqrt();
        let t = if (164. ..=345.).contains(&h1) {
            0.56 + (0.2 * (h1 + 168.).to_radians().cos()).abs()
        } else {
            0.36 + (0.4 * (h1 + 35.).to_radians().cos()).abs()
        };

        let s_l = if self.l < 16. {
            0.511
        } else {
            0.040975 * self.l / (1. + 0.01765 * self.l)
        };
        let s_c = 0.0638 * c1 / (1. + 0.0131 * c1) + 0.638;
        let s_h = s_c * (f * t + 1. - f);

        ((delta_l / (pl * s_l)).powi(2)
            + (delta_c / (pc * s_c)).powi(2)
            + (delta_h / s_h).powi(2))
        .sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub color: Color,
    pub alpha: f64,
}

impl Tint {
    /// Builds a tint from raw command line channels. `a` is an 8-bit alpha
    /// and is divided by 255; nothing is range checked here.
    pub fn from_rgba(r: i64, g: i64, b: i64, a: i64) -> Self {
        Tint {
            color: Color::rgb(r as f64, g as f64, b as f64),
            alpha: a as f64 / CHANNEL_MAX,
        }
    }

    pub fn apply(&self, base: Color) -> Color {
        base.blend(self.color, self.alpha)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn approx(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn blend_endpoints() {
        let base = Color::rgb(10, 20, 30);
        let fg = Color::rgb(200, 100, 0);
        assert_eq!(base.blend(fg, 0.), base);
        assert_eq!(base.blend(fg, 1.), fg);
        assert_eq!(base.blend(fg, 0.5), Color::rgb(105, 60, 15));
    }

    #[test]
    fn blend_clamps_each_channel() {
        let base = Color::rgb(0, 128, 255);
        let fg = Color::rgb(1000, -50, 300);
        assert_eq!(base.blend(fg, 1.), Color::rgb(255, 0, 255));

        // overdriven alpha extrapolates before the clamp
        let c = Color::rgb(100, 100, 100).blend(Color::rgb(200, 0, 100), 2.);
        assert_eq!(c, Color::rgb(255, 0, 100));
    }

    #[test]
    fn lab_of_primaries() {
        let white = Color::rgb(255, 255, 255).to_lab();
        assert!(approx(white.l, 100., 0.01));
        assert!(approx(white.a, 0., 0.05));
        assert!(approx(white.b, 0., 0.05));

        let black = Color::rgb(0, 0, 0).to_lab();
        assert!(approx(black.l, 0., 1e-9));

        let red = Color::rgb(255, 0, 0).to_lab();
        assert!(approx(red.l, 53.24, 0.05));
        assert!(approx(red.a, 80.09, 0.1));
        assert!(approx(red.b, 67.20, 0.1));
    }

    #[test]
    fn cmc_self_distance_is_zero() {
        for c in [
            Color::rgb(0, 0, 0),
            Color::rgb(255, 255, 255),
            Color::rgb(12, 200, 99),
            Color::rgb(255, 0, 255),
        ] {
            assert_eq!(c.distance(c), 0.);
        }
    }

    #[test]
    fn cmc_is_asymmetric() {
        let a = Color::rgb(30, 30, 30);
        let b = Color::rgb(200, 40, 90);
        let ab = a.distance(b);
        let ba = b.distance(a);
        assert!(ab > 0. && ba > 0.);
        assert!(!approx(ab, ba, 1e-6));
    }

    #[test]
    fn cmc_reference_values() {
        // (reference, sample, ΔE CMC 1:1)
        let cases = [
            // hue 40, L >= 16
            ((255, 0, 0), (200, 40, 90), 29.49794514418978),
            // hue 306, inside the 164..=345 band
            ((0, 0, 255), (40, 60, 200), 13.85059117842401),
            // hue 196
            ((0, 128, 128), (20, 100, 140), 20.465853629300327),
            // L < 16
            ((10, 10, 30), (40, 20, 10), 28.781032664102312),
        ];
        for ((r1, g1, b1), (r2, g2, b2), expected) in cases {
            let d = Color::rgb(r1, g1, b1).distance(Color::rgb(r2, g2, b2));
            assert!(approx(d, expected, 1e-6), "{d} != {expected}");
        }
    }

    #[test]
    fn cmc_prefers_perceptual_neighbour() {
        let target = Color::rgb(250, 250, 250);
        assert!(target.distance(Color::rgb(255, 255, 255)) < target.distance(Color::rgb(0, 0, 0)));
    }

    #[test]
    fn tint_normalizes_alpha() {
        let t = Tint::from_rgba(1, 2, 3, 255);
        assert_eq!(t.alpha, 1.);
        assert_eq!(t.color, Color::rgb(1, 2, 3));
        assert_eq!(Tint::from_rgba(0, 0, 0, 0).alpha, 0.);
    }
}
