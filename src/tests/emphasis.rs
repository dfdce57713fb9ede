use super::html;

#[test]
fn simple_emphasis() {
    html("*foo*\n", "<p><em>foo</em></p>\n");
}

#[test]
fn simple_strong() {
    html("**foo**\n", "<p><strong>foo</strong></p>\n");
}

#[test]
fn underscore_emphasis() {
    html("_foo_\n", "<p><em>foo</em></p>\n");
}

#[test]
fn intraword_underscore_is_literal() {
    html("foo_bar_baz\n", "<p>foo_bar_baz</p>\n");
}

#[test]
fn intraword_asterisk_is_emphasis() {
    html("foo*bar*baz\n", "<p>foo<em>bar</em>baz</p>\n");
}

#[test]
fn triple_delimiter_nests_strong_in_emphasis() {
    html(
        "**hello *world***\n",
        "<p><strong>hello <em>world</em></strong></p>\n",
    );
}

#[test]
fn unmatched_delimiter_is_literal() {
    html("*foo\n", "<p>*foo</p>\n");
}

#[test]
fn emphasis_not_flanking_across_space() {
    html("* foo*\n", "<p>* foo*</p>\n");
}

#[test]
fn nested_emphasis_and_strong() {
    html("*a **b** c*\n", "<p><em>a <strong>b</strong> c</em></p>\n");
}

#[test]
fn many_asterisks_does_not_blow_up() {
    // Regression guard for the run-merging simplification (spec.md §8):
    // a maximal delimiter run collapses to a single token, so this input
    // resolves without exponential blowup even without `openers_bottom`.
    let input = format!("{}foo{}\n", "*".repeat(40), "*".repeat(40));
    let out = crate::render(&input);
    assert!(out.starts_with("<p>"));
}
