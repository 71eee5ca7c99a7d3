use crate::foundation::core::{Affine, Canvas, Point, Rect};
use crate::foundation::math::{clamp_u8, lerp};
use crate::random::prng::SeededRng;
use crate::render::composite::{atop_straight, overlay_channel, screen_straight};
use crate::render::gradient::Gradient;

/// Add the same seeded jitter in `[-amplitude/2, amplitude/2)` to the RGB channels of every
/// painted pixel. Transparent pixels consume no random draws.
pub(crate) fn paper_grain(rgba: &mut [u8], rng: &mut SeededRng, amplitude: f64) {
    for px in rgba.chunks_exact_mut(4) {
        if px[3] == 0 {
            continue;
        }
        let n = rng.jitter(amplitude);
        for c in &mut px[..3] {
            *c = clamp_u8(f64::from(*c) + n);
        }
    }
}

/// Film grain over every pixel, one draw each. `noise` is on a 0..=100 scale.
pub(crate) fn film_grain(rgba: &mut [u8], rng: &mut SeededRng, noise: f64) {
    if noise <= 0.0 {
        return;
    }
    let amplitude = noise * 2.55;
    for px in rgba.chunks_exact_mut(4) {
        let n = rng.jitter(amplitude);
        for c in &mut px[..3] {
            *c = clamp_u8(f64::from(*c) + n);
        }
    }
}

/// Paint `gradient` source-atop: only pixels that already have coverage are tinted.
pub(crate) fn tint_atop(
    rgba: &mut [u8],
    canvas: Canvas,
    device_to_local: Affine,
    gradient: &Gradient,
) {
    for_each_pixel(rgba, canvas, device_to_local, |px, local| {
        if px[3] == 0 {
            return;
        }
        let tint = straight(gradient.color_at(gradient.offset_at(local)));
        let out = atop_straight([px[0], px[1], px[2], px[3]], tint);
        px.copy_from_slice(&out);
    });
}

/// Screen-blend `gradient` over the pixels inside `device_bounds`.
pub(crate) fn screen_gradient(
    rgba: &mut [u8],
    canvas: Canvas,
    device_to_local: Affine,
    device_bounds: Rect,
    gradient: &Gradient,
) {
    let clip = |v: f64, max: u32| (v.max(0.0) as u32).min(max);
    let (x0, x1) = (
        clip(device_bounds.x0.floor(), canvas.width),
        clip(device_bounds.x1.ceil(), canvas.width),
    );
    let (y0, y1) = (
        clip(device_bounds.y0.floor(), canvas.height),
        clip(device_bounds.y1.ceil(), canvas.height),
    );
    let width = canvas.width as usize;
    for y in y0..y1 {
        for x in x0..x1 {
            let local = device_to_local * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let src = straight(gradient.color_at(gradient.offset_at(local)));
            let idx = (y as usize * width + x as usize) * 4;
            let px = &mut rgba[idx..idx + 4];
            let out = screen_straight([px[0], px[1], px[2], px[3]], src);
            px.copy_from_slice(&out);
        }
    }
}

/// Square tile of seeded gray values, repeated across the design in logical units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NoiseTile {
    size: usize,
    values: Vec<u8>,
}

impl NoiseTile {
    pub(crate) fn new(rng: &mut SeededRng, size: usize) -> Self {
        let size = size.max(1);
        let values = (0..size * size)
            .map(|_| (rng.next_f64() * 255.0) as u8)
            .collect();
        Self { size, values }
    }

    pub(crate) fn sample(&self, p: Point) -> u8 {
        let n = self.size as i64;
        let x = (p.x.floor() as i64).rem_euclid(n) as usize;
        let y = (p.y.floor() as i64).rem_euclid(n) as usize;
        self.values[y * self.size + x]
    }
}

/// Overlay-blend the tiled noise onto the color channels at `opacity`.
pub(crate) fn overlay_noise(
    rgba: &mut [u8],
    canvas: Canvas,
    device_to_local: Affine,
    tile: &NoiseTile,
    opacity: f64,
) {
    if opacity <= 0.0 {
        return;
    }
    let opacity = opacity.min(1.0);
    for_each_pixel(rgba, canvas, device_to_local, |px, local| {
        let v = tile.sample(local);
        for c in &mut px[..3] {
            let blended = overlay_channel(*c, v);
            *c = clamp_u8(lerp(f64::from(*c), f64::from(blended), opacity));
        }
    });
}

fn for_each_pixel(
    rgba: &mut [u8],
    canvas: Canvas,
    device_to_local: Affine,
    mut f: impl FnMut(&mut [u8], Point),
) {
    let width = canvas.width as usize;
    for (i, px) in rgba.chunks_exact_mut(4).enumerate() {
        let device = Point::new((i % width) as f64 + 0.5, (i / width) as f64 + 0.5);
        f(px, device_to_local * device);
    }
}

fn straight(premul: [u8; 4]) -> [u8; 4] {
    let a = u16::from(premul[3]);
    if a == 0 {
        return [0; 4];
    }
    let un = |c: u8| ((u16::from(c) * 255 + a / 2) / a).min(255) as u8;
    [un(premul[0]), un(premul[1]), un(premul[2]), premul[3]]
}

#[cfg(test)]
#[path = "../../tests/unit/render/grain.rs"]
mod tests;
