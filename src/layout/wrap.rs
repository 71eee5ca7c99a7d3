/// Width of a run of text in the caller's units.
pub trait TextMeasure {
    fn measure(&mut self, text: &str) -> f64;
}

impl<F> TextMeasure for F
where
    F: FnMut(&str) -> f64,
{
    fn measure(&mut self, text: &str) -> f64 {
        self(text)
    }
}

/// Fixed advance per character; stands in for a monospace font.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    pub advance: f64,
}

impl MonospaceMeasure {
    pub fn new(advance: f64) -> Self {
        Self { advance }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.advance
    }
}

/// Greedy word wrap.
///
/// Words are the pieces between single spaces, so runs of spaces survive as empty words and
/// `lines.join(" ")` gives back `text`. A word joins the current line while
/// `measure(line + " " + word) < max_width`; otherwise it starts a new line. A word wider than
/// `max_width` sits alone on its own line. Empty text yields one empty line.
pub fn wrap_lines(measure: &mut impl TextMeasure, text: &str, max_width: f64) -> Vec<String> {
    let mut words = text.split(' ');
    let mut current = words.next().unwrap_or_default().to_owned();
    let mut lines = Vec::new();
    for word in words {
        let candidate = format!("{current} {word}");
        if measure.measure(&candidate) < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }
    lines.push(current);
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
