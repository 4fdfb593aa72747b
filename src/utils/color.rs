//! Colour palette and random colour generation for bodies and trails.
//!
//! Colours are rendering hints only. The physics never reads them. Random
//! colours draw from a [`RenderingRng`](crate::resources::RenderingRng) so
//! that recolouring a scenario never changes its physics.
//!
//! # Main Functions
//!
//! - [`random_vibrant`]: saturated colours whose channels differ strongly
//! - [`random_dull`]: muted mid-brightness colours
//! - [`gradient`]: linear blend between two colours in integer steps

use bevy::color::Srgba;
use rand::Rng;
use rand::seq::index::sample;

const MAX_CHANNEL: f32 = 255.0;

const VIBRANT_MIN_SPREAD: u32 = 200;
const DULL_SPREAD: (u32, u32) = (80, 200);
const DULL_BRIGHTNESS: (u32, u32) = (200, 500);

/// Opaque colour from 8-bit channels
pub const fn rgb(r: u8, g: u8, b: u8) -> Srgba {
    Srgba::new(
        r as f32 / MAX_CHANNEL,
        g as f32 / MAX_CHANNEL,
        b as f32 / MAX_CHANNEL,
        1.0,
    )
}

pub const WHITE: Srgba = rgb(255, 255, 255);
pub const DARK_GREY: Srgba = rgb(70, 70, 70);
pub const MID_GREY: Srgba = rgb(190, 190, 190);
pub const LIGHT_GREY: Srgba = rgb(230, 230, 230);
pub const NAVY: Srgba = rgb(20, 20, 80);
pub const BLUE: Srgba = rgb(40, 40, 200);
pub const GREEN: Srgba = rgb(40, 200, 40);
pub const RED: Srgba = rgb(200, 40, 40);
pub const GOLD: Srgba = rgb(240, 190, 50);

/// 8-bit channels of an sRGB colour, alpha dropped
pub fn channels(color: Srgba) -> [u8; 3] {
    [color.red, color.green, color.blue].map(|c| (c.clamp(0.0, 1.0) * MAX_CHANNEL).round() as u8)
}

/// Sum of pairwise channel differences, a cheap saturation measure
fn spread([r, g, b]: [u8; 3]) -> u32 {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    ((r - g).abs() + (g - b).abs() + (r - b).abs()) as u32
}

fn brightness([r, g, b]: [u8; 3]) -> u32 {
    r as u32 + g as u32 + b as u32
}

/// Three distinct channel values drawn without replacement from `0..=255`
fn distinct_channels<R: Rng + ?Sized>(rng: &mut R) -> [u8; 3] {
    let picked = sample(rng, 256, 3);
    [picked.index(0) as u8, picked.index(1) as u8, picked.index(2) as u8]
}

/// Random colour whose channels differ enough to read as vivid.
#[must_use]
pub fn random_vibrant<R: Rng + ?Sized>(rng: &mut R) -> Srgba {
    loop {
        let candidate = distinct_channels(rng);
        if spread(candidate) > VIBRANT_MIN_SPREAD {
            let [r, g, b] = candidate;
            return rgb(r, g, b);
        }
    }
}

/// Random muted colour: moderate channel spread, neither dark nor washed out.
#[must_use]
pub fn random_dull<R: Rng + ?Sized>(rng: &mut R) -> Srgba {
    loop {
        let candidate = distinct_channels(rng);
        let spread = spread(candidate);
        let brightness = brightness(candidate);
        if spread > DULL_SPREAD.0
            && spread < DULL_SPREAD.1
            && brightness > DULL_BRIGHTNESS.0
            && brightness < DULL_BRIGHTNESS.1
        {
            let [r, g, b] = candidate;
            return rgb(r, g, b);
        }
    }
}

/// Colour `part / parts` of the way from `from` to `to`, truncated to whole channel values.
///
/// `part` is expected in `0..=parts`. A zero `parts` yields `from`.
pub fn gradient(from: Srgba, to: Srgba, parts: usize, part: usize) -> Srgba {
    if parts == 0 {
        return from;
    }

    let t = part as f32 / parts as f32;
    let [r1, g1, b1] = channels(from);
    let [r2, g2, b2] = channels(to);
    let blend = |a: u8, b: u8| (a as f32 + t * (b as f32 - a as f32)) as u8;

    rgb(blend(r1, r2), blend(g1, g2), blend(b1, b2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::RenderingRng;

    #[test]
    fn test_palette_round_trips_channels() {
        assert_eq!(channels(GOLD), [240, 190, 50]);
        assert_eq!(channels(RED), [200, 40, 40]);
        assert_eq!(channels(WHITE), [255, 255, 255]);
    }

    #[test]
    fn test_random_vibrant_spread() {
        let mut rng = RenderingRng::from_seed(1);
        for _ in 0..1_000 {
            let color = channels(random_vibrant(&mut *rng));
            assert!(spread(color) > VIBRANT_MIN_SPREAD, "{color:?} is not vibrant");
            assert_ne!(color[0], color[1]);
            assert_ne!(color[1], color[2]);
            assert_ne!(color[0], color[2]);
        }
    }

    #[test]
    fn test_random_dull_bounds() {
        let mut rng = RenderingRng::from_seed(2);
        for _ in 0..1_000 {
            let color = channels(random_dull(&mut *rng));
            let spread = spread(color);
            let brightness = brightness(color);
            assert!(spread > 80 && spread < 200, "{color:?} spread {spread}");
            assert!(
                brightness > 200 && brightness < 500,
                "{color:?} brightness {brightness}"
            );
        }
    }

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(gradient(RED, WHITE, 10, 0), RED);
        assert_eq!(channels(gradient(RED, WHITE, 10, 10)), [255, 255, 255]);
        assert_eq!(gradient(RED, WHITE, 0, 5), RED);
    }

    #[test]
    fn test_gradient_midpoint_truncates() {
        // 70 + 0.5 * (230 - 70) = 150 exactly; 190 + 0.5 * 40 = 210
        let mid = gradient(DARK_GREY, LIGHT_GREY, 2, 1);
        assert_eq!(channels(mid), [150, 150, 150]);
        let mid = gradient(MID_GREY, LIGHT_GREY, 2, 1);
        assert_eq!(channels(mid), [210, 210, 210]);
        // 200 + (1/3) * 55 = 218.33 truncates to 218
        let third = gradient(RED, WHITE, 3, 1);
        assert_eq!(channels(third)[0], 218);
    }
}
