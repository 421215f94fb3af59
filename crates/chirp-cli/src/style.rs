//! Gradient and palette rendering for messages, the banner, and game logs.
//!
//! Everything goes through `colored`, which drops escape codes on its own
//! when stdout is not a terminal, so tests see plain text.

use colored::{Color, ColoredString, Colorize};
use rand::Rng;

use chirp_dungeon::{LogKind, LogLine};
use chirp_store::Theme;

/// Pastel gradient stops, interpolated left to right across the text.
const PASTEL_STOPS: [(u8, u8, u8); 5] = [
    (255, 179, 186),
    (255, 223, 186),
    (255, 255, 186),
    (186, 255, 201),
    (186, 225, 255),
];

/// Colors the plain theme picks from.
const SOLID_PALETTE: [Color; 5] = [
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::BrightWhite,
];

const BANNER: &str = r"       _     _
   ___| |__ (_)_ __ _ __
  / __| '_ \| | '__| '_ \
 | (__| | | | | |  | |_) |
  \___|_| |_|_|_|  | .__/
                   |_|";

/// Style one line of text according to the theme.
///
/// A forced rainbow wins over the configured theme; the plain theme draws
/// one solid color per call.
pub fn styled<R: Rng + ?Sized>(
    text: &str,
    theme: Theme,
    force_rainbow: bool,
    rng: &mut R,
) -> String {
    if force_rainbow {
        return rainbow(text);
    }
    match theme {
        Theme::Rainbow => rainbow(text),
        Theme::Pastel => pastel(text),
        Theme::Plain => solid_random(text, rng),
    }
}

/// The startup banner, styled like a message in the given theme.
pub fn banner<R: Rng + ?Sized>(theme: Theme, rng: &mut R) -> String {
    BANNER
        .lines()
        .map(|line| styled(line, theme, false, rng))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full hue sweep across the characters of `text`.
pub fn rainbow(text: &str) -> String {
    let len = text.chars().count().max(1);
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            let hue = 360.0 * i as f64 / len as f64;
            let (r, g, b) = hsv_to_rgb(hue, 0.85, 1.0);
            c.to_string().truecolor(r, g, b).to_string()
        })
        .collect()
}

/// Soft gradient interpolating between the pastel stops.
pub fn pastel(text: &str) -> String {
    let len = text.chars().count();
    if len == 0 {
        return String::new();
    }
    let spans = (PASTEL_STOPS.len() - 1) as f64;
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            let t = if len == 1 {
                0.0
            } else {
                spans * i as f64 / (len - 1) as f64
            };
            let idx = (t.floor() as usize).min(PASTEL_STOPS.len() - 2);
            let frac = t - idx as f64;
            let (r, g, b) = lerp_rgb(PASTEL_STOPS[idx], PASTEL_STOPS[idx + 1], frac);
            c.to_string().truecolor(r, g, b).to_string()
        })
        .collect()
}

/// The whole text in one randomly chosen palette color.
pub fn solid_random<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let color = SOLID_PALETTE[rng.random_range(0..SOLID_PALETTE.len())];
    text.color(color).to_string()
}

/// Map a game log line to a terminal style.
pub fn colorize_log(line: &LogLine) -> ColoredString {
    match line.kind {
        LogKind::Info => line.text.normal(),
        LogKind::Good => line.text.green(),
        LogKind::Bad => line.text.red(),
        LogKind::Notice => line.text.yellow(),
        LogKind::Dim => line.text.dimmed(),
    }
}

fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Standard HSV to RGB, hue in degrees, s and v in [0, 1].
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h as u32 {
        0..60 => (c, x, 0.0),
        60..120 => (x, c, 0.0),
        120..180 => (0.0, c, x),
        180..240 => (0.0, x, c),
        240..300 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn hsv_primary_corners() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), (0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), (0, 0, 255));
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), (255, 0, 0));
    }

    #[test]
    fn gradients_preserve_text_when_colors_are_disabled() {
        colored::control::set_override(false);
        assert_eq!(rainbow("hello"), "hello");
        assert_eq!(pastel("hello"), "hello");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(solid_random("hello", &mut rng), "hello");
    }

    #[test]
    fn empty_text_is_fine() {
        colored::control::set_override(false);
        assert_eq!(rainbow(""), "");
        assert_eq!(pastel(""), "");
    }

    #[test]
    fn banner_has_the_expected_shape() {
        colored::control::set_override(false);
        let mut rng = StdRng::seed_from_u64(1);
        let banner = banner(Theme::Pastel, &mut rng);
        assert_eq!(banner.lines().count(), BANNER.lines().count());
    }
}
