//! Css color strings to nannou colors, for backends that need numbers.

use nannou::color::{Srgba, named, srgba};

fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Srgba {
    srgba(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    )
}

/// Parses `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()` and the
/// css named colors. Returns `None` for anything else.
pub fn parse_css_color(s: &str) -> Option<Srgba> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
    {
        return parse_rgb_args(args.strip_suffix(')')?);
    }
    if lower == "transparent" {
        return Some(srgba(0.0, 0.0, 0.0, 0.0));
    }
    named::from_str(&lower).map(|c| from_u8(c.red, c.green, c.blue, 255))
}

fn parse_hex(hex: &str) -> Option<Srgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(from_u8(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
        4 => Some(from_u8(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(from_u8(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(from_u8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Srgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |p: &str| -> Option<f32> {
        let v: f32 = p.parse().ok()?;
        Some((v / 255.0).clamp(0.0, 1.0))
    };
    let a = match parts.get(3) {
        Some(p) => p.parse::<f32>().ok()?.clamp(0.0, 1.0),
        None => 1.0,
    };
    Some(srgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        a,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Srgba, b: Srgba) -> bool {
        (a.red - b.red).abs() < 1e-3
            && (a.green - b.green).abs() < 1e-3
            && (a.blue - b.blue).abs() < 1e-3
            && (a.alpha - b.alpha).abs() < 1e-3
    }

    #[test]
    fn parses_long_hex() {
        let c = parse_css_color("#3b82f6").unwrap();
        assert!(close(c, from_u8(0x3b, 0x82, 0xf6, 255)));
    }

    #[test]
    fn parses_short_hex_with_alpha() {
        let c = parse_css_color("#f008").unwrap();
        assert!(close(c, from_u8(255, 0, 0, 0x88)));
    }

    #[test]
    fn parses_rgba_function() {
        let c = parse_css_color("rgba(2, 6, 23, 0.1)").unwrap();
        assert!(close(c, srgba(2.0 / 255.0, 6.0 / 255.0, 23.0 / 255.0, 0.1)));
    }

    #[test]
    fn parses_named_colors_case_insensitive() {
        assert!(close(parse_css_color("Red").unwrap(), srgba(1.0, 0.0, 0.0, 1.0)));
        assert!(close(parse_css_color("navy").unwrap(), from_u8(0, 0, 128, 255)));
        assert!(close(
            parse_css_color("slategray").unwrap(),
            from_u8(112, 128, 144, 255)
        ));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_css_color("#12").is_none());
        assert!(parse_css_color("#zzzzzz").is_none());
        assert!(parse_css_color("rgb(1, 2)").is_none());
        assert!(parse_css_color("not-a-color").is_none());
    }
}
