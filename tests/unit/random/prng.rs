use super::*;

#[test]
fn abc_fixture_words() {
    let mut rng = SeededRng::from_text("abc");
    let words: Vec<u32> = (0..5).map(|_| rng.next_u32()).collect();
    assert_eq!(
        words,
        [3420525053, 2305681891, 605191127, 3812239118, 1872669178]
    );
}

#[test]
fn abc_fixture_floats() {
    let mut rng = SeededRng::new(&Seed::from("abc"));
    let expected = [
        0.7964030497241765,
        0.5368333987426013,
        0.14090703963302076,
        0.8876060876064003,
        0.43601477006450295,
    ];
    for e in expected {
        assert_eq!(rng.next_f64(), e);
    }
}

#[test]
fn empty_seed_is_valid() {
    let mut rng = SeededRng::from_text("");
    let words: Vec<u32> = (0..5).map(|_| rng.next_u32()).collect();
    assert_eq!(
        words,
        [233162409, 3268920208, 843526106, 2140625350, 2053629427]
    );
}

#[test]
fn number_seed_hashes_decimal_text() {
    let mut a = SeededRng::new(&Seed::Number(42));
    let mut b = SeededRng::from_text("42");
    for _ in 0..16 {
        assert_eq!(a.next_u32(), b.next_u32());
    }
}

#[test]
fn helpers_stay_in_range() {
    let mut rng = SeededRng::from_text("range");
    for _ in 0..1000 {
        let v = rng.range(-10.0, 10.0);
        assert!((-10.0..10.0).contains(&v));
        assert!(rng.index(3) < 3);
        let j = rng.jitter(8.0);
        assert!((-4.0..4.0).contains(&j));
    }
    assert!(!rng.chance(0.0));
    assert!(rng.chance(1.0));
    assert_eq!(*rng.pick(&["only"]), "only");
}

#[test]
fn seed_serde_is_untagged() {
    let s: Seed = serde_json::from_str("\"k3x9\"").unwrap();
    assert_eq!(s, Seed::Text("k3x9".into()));
    let n: Seed = serde_json::from_str("7").unwrap();
    assert_eq!(n, Seed::Number(7));
    assert_eq!(serde_json::to_string(&Seed::Number(7)).unwrap(), "7");
}

#[test]
fn float_text_follows_number_to_string() {
    for (x, text) in [
        (1.5, "1.5"),
        (0.1, "0.1"),
        (-2.5, "-2.5"),
        (123456.789, "123456.789"),
        (0.000001, "0.000001"),
        (1.5e-7, "1.5e-7"),
        (1e20, "100000000000000000000"),
        (1e21, "1e+21"),
        (1.25e300, "1.25e+300"),
    ] {
        assert_eq!(number_text(x), text);
    }
}

#[test]
fn float_seeds_deserialize() {
    let seed: Seed = serde_json::from_str("1.5").unwrap();
    assert_eq!(seed, Seed::Text("1.5".to_owned()));
    let seed: Seed = serde_json::from_str("7.0").unwrap();
    assert_eq!(seed, Seed::Number(7));
    let seed: Seed = serde_json::from_str("-3").unwrap();
    assert_eq!(seed, Seed::Text("-3".to_owned()));
    let seed: Seed = serde_json::from_str("42").unwrap();
    assert_eq!(seed, Seed::Number(42));
    let seed: Seed = serde_json::from_str(r#""abc""#).unwrap();
    assert_eq!(seed, Seed::from("abc"));

    let mut a = SeededRng::new(&Seed::from_float(0.25));
    let mut b = SeededRng::from_text("0.25");
    assert_eq!(a.next_u32(), b.next_u32());
}
