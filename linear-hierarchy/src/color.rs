use std::str::FromStr;

use serde::Deserialize;

use crate::error::HierarchyError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum Color {
    Oklch { l: f32, c: f32, h: f32, a: f32 },
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Color {
    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::Oklch { l, c, h, a: 1.0 }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    pub fn to_rgb(&self) -> Rgb {
        match self {
            Self::Rgb { r, g, b } => Rgb::new(*r, *g, *b),
            Self::Oklch { l, c, h, .. } => oklch_to_rgb(*l, *c, *h),
        }
    }

    /// Interpolate towards `to` in OKLCH space. `t` is clamped to 0.0..=1.0.
    pub fn lerp(&self, to: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let (from_l, from_c, from_h) = color_to_oklch(self);
        let (to_l, to_c, to_h) = color_to_oklch(to);

        let l = from_l + (to_l - from_l) * t;
        let c = from_c + (to_c - from_c) * t;

        // Shortest path around the hue circle
        let mut dh = to_h - from_h;
        if dh > 180.0 {
            dh -= 360.0;
        } else if dh < -180.0 {
            dh += 360.0;
        }
        let h = (from_h + dh * t).rem_euclid(360.0);

        Color::oklch(l, c, h)
    }

    pub fn to_dsl(&self) -> String {
        match self {
            Self::Oklch { l, c, h, a } => {
                if *a >= 1.0 {
                    format!("oklch({l}, {c}, {h})")
                } else {
                    format!("oklch({l}, {c}, {h}, {a})")
                }
            }
            Self::Rgb { r, g, b } => format!("#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl FromStr for Color {
    type Err = HierarchyError;

    /// Accepts `#rrggbb`, `rgb(r, g, b)` and `oklch(l, c, h[, a])`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || HierarchyError::InvalidColor(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel =
                |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        if let Some(args) = function_args(s, "rgb") {
            let [r, g, b] = args.as_slice() else {
                return Err(invalid());
            };
            let channel = |v: &str| v.parse::<u8>().map_err(|_| invalid());
            return Ok(Self::rgb(channel(r)?, channel(g)?, channel(b)?));
        }

        if let Some(args) = function_args(s, "oklch") {
            let values = args
                .iter()
                .map(|v| v.parse::<f32>().map_err(|_| invalid()))
                .collect::<Result<Vec<_>, _>>()?;
            return match values.as_slice() {
                [l, c, h] => Ok(Self::oklch(*l, *c, *h)),
                [l, c, h, a] => Ok(Self::Oklch {
                    l: *l,
                    c: *c,
                    h: *h,
                    a: *a,
                }),
                _ => Err(invalid()),
            };
        }

        Err(invalid())
    }
}

impl TryFrom<String> for Color {
    type Error = HierarchyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<Vec<&'a str>> {
    let inner = s.strip_prefix(name)?.trim_start().strip_prefix('(')?.strip_suffix(')')?;
    Some(inner.split(',').map(str::trim).collect())
}

fn oklch_to_rgb(l: f32, c: f32, h: f32) -> Rgb {
    use palette::{IntoColor, Oklch, Srgb};

    let oklch = Oklch::new(l, c, h);
    let srgb: Srgb = oklch.into_color();
    let (r, g, b) = srgb.into_format::<u8>().into_components();

    Rgb::new(r, g, b)
}

fn color_to_oklch(color: &Color) -> (f32, f32, f32) {
    match color {
        Color::Oklch { l, c, h, .. } => (*l, *c, *h),
        Color::Rgb { r, g, b } => {
            use palette::{IntoColor, Oklch, Srgb};
            let srgb = Srgb::new(*r as f32 / 255.0, *g as f32 / 255.0, *b as f32 / 255.0);
            let oklch: Oklch = srgb.into_color();
            (oklch.l, oklch.chroma, oklch.hue.into_positive_degrees())
        }
    }
}
