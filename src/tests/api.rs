use crate::nodes::Block;
use crate::plugins::{Plugins, TransformHook};
use crate::{parse, parse_checked, render, render_ast, render_with_plugins};

#[test]
fn render_matches_parse_then_render_ast() {
    let input = "# Title\n\nSome *text*.\n";
    assert_eq!(render(input), render_ast(&parse(input)));
}

#[test]
fn parse_exposes_reference_definitions() {
    let doc = parse("[foo]: /url \"t\"\n\n[foo]\n");
    let def = doc.reference_definitions.get("foo").expect("definition present");
    assert_eq!(def.url, "/url");
    assert_eq!(def.title.as_deref(), Some("t"));
}

#[test]
fn parse_checked_succeeds_on_ordinary_input() {
    let doc = parse_checked("hello\n").expect("should not hit the nesting limit");
    assert!(matches!(doc.children.as_slice(), [Block::Paragraph(_)]));
}

#[test]
fn parse_checked_reports_limit_error_on_pathological_nesting() {
    let input = "> ".repeat(2000) + "x\n";
    let err = parse_checked(&input).expect_err("should hit the nesting limit");
    // The partial document is still usable even though the limit was hit.
    assert!(!err.partial().children.is_empty());
}

#[test]
fn transform_hook_runs_between_parse_and_render() {
    let mut plugins = Plugins::new();
    plugins.add_transform(TransformHook::new(|mut doc| {
        doc.children.retain(|b| !matches!(b, Block::ThematicBreak));
        doc
    }));
    let out = render_with_plugins("para\n\n---\n", &plugins);
    assert!(!out.contains("<hr"));
    assert!(out.contains("<p>para</p>"));
}

#[test]
fn render_never_panics_on_arbitrary_utf8() {
    let inputs = [
        "",
        "\n\n\n",
        "# \n",
        "```\nunterminated fence",
        "[a](b",
        "***___***",
        "héllo wörld 你好",
    ];
    for input in inputs {
        let _ = render(input);
    }
}
