use super::html;

#[test]
fn basic_document() {
    html(
        concat!(
            "My **document**.\n",
            "\n",
            "It's mine.\n",
            "\n",
            "> Yes.\n",
            "\n",
            "## Hi!\n",
            "\n",
            "Okay.\n"
        ),
        concat!(
            "<p>My <strong>document</strong>.</p>\n",
            "<p>It's mine.</p>\n",
            "<blockquote>\n",
            "<p>Yes.</p>\n",
            "</blockquote>\n",
            "<h2>Hi!</h2>\n",
            "<p>Okay.</p>\n"
        ),
    );
}

#[test]
fn atx_heading() {
    html("# Title", "<h1>Title</h1>\n");
}

#[test]
fn atx_heading_trailing_hashes() {
    html("## Title ##", "<h2>Title</h2>\n");
}

#[test]
fn setext_heading_level_1() {
    html("Title\n=====\n", "<h1>Title</h1>\n");
}

#[test]
fn setext_heading_level_2() {
    html("Title\n-----\n", "<h2>Title</h2>\n");
}

#[test]
fn plain_paragraph() {
    html("Hello World", "<p>Hello World</p>\n");
}

#[test]
fn blockquote() {
    html("> quoted", "<blockquote>\n<p>quoted</p>\n</blockquote>\n");
}

#[test]
fn blockquote_lazy_continuation() {
    html(
        "> line one\nline two\n",
        "<blockquote>\n<p>line one\nline two</p>\n</blockquote>\n",
    );
}

#[test]
fn blockquote_blank_keeps_quote_open() {
    html(
        "> a\n>\n> b\n",
        concat!(
            "<blockquote>\n",
            "<p>a</p>\n",
            "<p>b</p>\n",
            "</blockquote>\n"
        ),
    );
}

#[test]
fn thematic_break() {
    html("---\n", "<hr />\n");
    html("***\n", "<hr />\n");
    html("___\n", "<hr />\n");
}

#[test]
fn setext_takes_priority_under_open_paragraph() {
    html("Foo\n---\n", "<h2>Foo</h2>\n");
}

#[test]
fn paragraph_interrupted_by_heading() {
    html(
        "para\n# heading\n",
        "<p>para</p>\n<h1>heading</h1>\n",
    );
}

#[test]
fn nested_blockquote_and_list() {
    html(
        "> - a\n> - b\n",
        concat!(
            "<blockquote>\n",
            "<ul>\n",
            "<li>a</li>\n",
            "<li>b</li>\n",
            "</ul>\n",
            "</blockquote>\n"
        ),
    );
}
