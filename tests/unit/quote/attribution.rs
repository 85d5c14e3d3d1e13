use super::*;

fn parsed(main: &str, attribution: &str) -> ParsedQuote {
    ParsedQuote {
        main_quote: main.to_string(),
        attribution: attribution.to_string(),
    }
}

#[test]
fn dash_name_suffix_becomes_attribution() {
    assert_eq!(
        parse_quote("Stay hungry, stay foolish. - Steve Jobs"),
        parsed("Stay hungry, stay foolish.", "- Steve Jobs")
    );
}

#[test]
fn plain_quote_is_left_whole() {
    assert_eq!(parse_quote("Just do it"), parsed("Just do it", ""));
}

#[test]
fn handle_suffix_is_kept_verbatim() {
    assert_eq!(
        parse_quote("Great work @nasa"),
        parsed("Great work", "@nasa")
    );
}

#[test]
fn em_dash_and_double_dash_normalize_to_single_dash() {
    assert_eq!(
        parse_quote("Be yourself; everyone else is already taken. — Oscar Wilde"),
        parsed("Be yourself; everyone else is already taken.", "- Oscar Wilde")
    );
    assert_eq!(
        parse_quote("To be, or not to be --William Shakespeare"),
        parsed("To be, or not to be", "- William Shakespeare")
    );
}

#[test]
fn names_may_carry_apostrophes_periods_and_parentheses() {
    assert_eq!(
        parse_quote("Don't stop - Mary O'Brien"),
        parsed("Don't stop", "- Mary O'Brien")
    );
    assert_eq!(
        parse_quote("Know thyself, and you will know the gods. - Socrates (attr.)"),
        parsed("Know thyself, and you will know the gods.", "- Socrates (attr.)")
    );
}

#[test]
fn long_suffix_is_rejected_by_length_heuristic() {
    assert_eq!(
        parse_quote("Hi - Bob the builder"),
        parsed("Hi - Bob the builder", "")
    );
}

#[test]
fn match_covering_whole_string_is_rejected() {
    assert_eq!(parse_quote("- Anonymous"), parsed("- Anonymous", ""));
    assert_eq!(parse_quote("@nasa"), parsed("@nasa", ""));
}

#[test]
fn input_is_trimmed_and_empty_input_is_empty() {
    assert_eq!(
        parse_quote("   Great work @nasa  \n"),
        parsed("Great work", "@nasa")
    );
    let empty = parse_quote("   ");
    assert!(empty.is_empty());
    assert!(!empty.has_attribution());
}

#[test]
fn mid_sentence_dash_is_a_heuristic_default() {
    // Only the last dash-separated clause is eligible; it is taken as a name when short enough.
    assert_eq!(
        parse_quote("Life — as they say — is short and sweet"),
        parsed("Life — as they say", "- is short and sweet")
    );
}
