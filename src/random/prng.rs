use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Seed for every random draw of a render. Text and numbers both hash their string form.
///
/// JSON floats are accepted too: integral ones become [`Seed::Number`], the rest keep their
/// ECMAScript number text (`1.5`, `1e-7`, `1e+21`) as [`Seed::Text`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Seed {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeedRepr {
    Number(u64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match SeedRepr::deserialize(deserializer)? {
            SeedRepr::Number(n) => Self::Number(n),
            SeedRepr::Float(x) => Self::from_float(x),
            SeedRepr::Text(s) => Self::Text(s),
        })
    }
}

/// 2^53; every integral float below it converts to `u64` exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Seed {
    /// Seed hashing the same text a JavaScript `String(x)` would produce.
    pub fn from_float(x: f64) -> Self {
        if x.fract() == 0.0 && (0.0..MAX_EXACT_INTEGER).contains(&x) {
            return Self::Number(x as u64);
        }
        Self::Text(number_text(x))
    }
}

/// ECMAScript `Number::toString` over Rust's shortest round-trip digits.
fn number_text(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_owned();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if x == 0.0 {
        return "0".to_owned();
    }

    let sign = if x < 0.0 { "-" } else { "" };
    let sci = format!("{:e}", x.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    // Position of the decimal point relative to the first digit.
    let point = exp.parse::<i32>().unwrap_or(0) + 1;
    let len = digits.len() as i32;

    let body = if len <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - len) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let e = point - 1;
        let e_sign = if e < 0 { '-' } else { '+' };
        let (head, tail) = digits.split_at(1);
        let dot = if tail.is_empty() { "" } else { "." };
        format!("{head}{dot}{tail}e{e_sign}{}", e.unsigned_abs())
    };
    format!("{sign}{body}")
}

impl Default for Seed {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

/// Deterministic 32-bit multiply-xorshift stream.
///
/// The seed string is folded over its UTF-16 code units; each step mixes the state and yields
/// `state / 2^32`. The sequence is part of the output contract: changing it changes every render.
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: &Seed) -> Self {
        Self::from_text(&seed.to_string())
    }

    pub fn from_text(seed: &str) -> Self {
        let mut h: u32 = 0xdead_beef;
        for unit in seed.encode_utf16() {
            h = (h ^ u32::from(unit)).wrapping_mul(2_654_435_761);
        }
        Self { state: h }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut h = self.state;
        h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
        h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
        h ^= h >> 16;
        self.state = h;
        h
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform float in `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Uniform index in `0..len`; `len` must be > 0.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_f64() * len as f64) as usize).min(len.saturating_sub(1))
    }

    /// `true` when the next draw is strictly greater than `threshold`.
    pub fn above(&mut self, threshold: f64) -> bool {
        self.next_f64() > threshold
    }

    /// `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Centered jitter in `[-amplitude / 2, amplitude / 2)`.
    pub fn jitter(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() - 0.5) * amplitude
    }

    /// Uniform element of `items`; `items` must be non-empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/random/prng.rs"]
mod tests;
