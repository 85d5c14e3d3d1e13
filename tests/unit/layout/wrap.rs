use super::*;
use crate::text::measure::FixedAdvanceMeasure;

fn font(size: f32) -> FontSpec {
    FontSpec {
        family: "serif".to_string(),
        size_px: size,
        weight: 400,
        italic: false,
    }
}

#[test]
fn wraps_greedily_at_column_width() {
    // 10px per character.
    let mut m = FixedAdvanceMeasure { advance_em: 1.0 };
    let lines = wrap_words("aa bb cc dd", &font(10.0), 60.0, &mut m);
    // "aa bb " is 60px and fits; "aa bb cc " is 90px and does not.
    assert_eq!(lines, vec!["aa bb", "cc dd"]);
}

#[test]
fn overlong_word_gets_its_own_line() {
    let mut m = FixedAdvanceMeasure { advance_em: 1.0 };
    let lines = wrap_words("a extraordinarily b", &font(10.0), 50.0, &mut m);
    assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
}

#[test]
fn collapses_whitespace_and_handles_empty_input() {
    let mut m = FixedAdvanceMeasure::default();
    assert!(wrap_words("   ", &font(10.0), 100.0, &mut m).is_empty());
    assert_eq!(
        wrap_words("one \n  two", &font(10.0), 1000.0, &mut m),
        vec!["one two"]
    );
}

#[test]
fn no_line_exceeds_width_unless_it_is_a_single_word() {
    let text = "The journey of a thousand miles begins with a single step, \
                and extraordinarily stubborn persistence carries it home";
    let f = font(17.0);
    for width in [40.0, 90.0, 150.0, 233.0, 400.0, 1000.0] {
        let mut m = FixedAdvanceMeasure { advance_em: 0.55 };
        let lines = wrap_words(text, &f, width, &mut m);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined.split_whitespace().count(), text.split_whitespace().count());
        for line in &lines {
            let w = m.measure(&f, line);
            let single_word = !line.contains(' ');
            assert!(w <= width || single_word, "line {line:?} is {w}px in a {width}px column");
        }
    }
}
