use super::*;

#[test]
fn wraps_on_strict_less_than() {
    let mut m = MonospaceMeasure::new(1.0);
    // "ab cd" measures exactly 5: not < 5, so it breaks.
    assert_eq!(wrap_lines(&mut m, "ab cd", 5.0), ["ab", "cd"]);
    assert_eq!(wrap_lines(&mut m, "ab cd", 5.5), ["ab cd"]);
}

#[test]
fn long_word_sits_alone() {
    let mut m = MonospaceMeasure::new(10.0);
    let lines = wrap_lines(&mut m, "a supercalifragilistic b", 50.0);
    assert_eq!(lines, ["a", "supercalifragilistic", "b"]);
}

#[test]
fn empty_text_is_one_empty_line() {
    let mut m = MonospaceMeasure::new(1.0);
    assert_eq!(wrap_lines(&mut m, "", 10.0), [""]);
}

#[test]
fn splits_on_single_spaces_only() {
    let mut m = MonospaceMeasure::new(1.0);
    // Runs of spaces stay; other whitespace belongs to the word.
    assert_eq!(wrap_lines(&mut m, "one   two\nthree", 100.0), ["one   two\nthree"]);
    assert_eq!(wrap_lines(&mut m, " lead", 100.0), [" lead"]);
    // Empty words still break lines when the budget is tight.
    assert_eq!(wrap_lines(&mut m, "a  b", 1.5), ["a", "", "b"]);
}

#[test]
fn closures_measure_too() {
    let mut calls = 0;
    let mut m = |s: &str| {
        calls += 1;
        s.len() as f64
    };
    let lines = wrap_lines(&mut m, "x y z", 4.0);
    assert_eq!(lines, ["x y", "z"]);
    assert_eq!(calls, 2);
}
