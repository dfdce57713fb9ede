use super::html;

#[test]
fn uri_autolink() {
    html(
        "<http://example.com>\n",
        "<p><a href=\"http://example.com\">http://example.com</a></p>\n",
    );
}

#[test]
fn email_autolink() {
    html(
        "<foo@bar.example.com>\n",
        "<p><a href=\"mailto:foo@bar.example.com\">foo@bar.example.com</a></p>\n",
    );
}

#[test]
fn autolink_rejects_whitespace() {
    html("<http://example.com with spaces>\n", "<p>&lt;http://example.com with spaces&gt;</p>\n");
}

#[test]
fn autolink_rejects_bad_scheme() {
    html("<1http://foo>\n", "<p>&lt;1http://foo&gt;</p>\n");
}

#[test]
fn raw_inline_html_passthrough() {
    html("foo <div>bar</div> baz\n", "<p>foo <div>bar</div> baz</p>\n");
}

#[test]
fn raw_inline_html_requires_block_tag_gate() {
    html("foo <span>bar</span> baz\n", "<p>foo &lt;span&gt;bar&lt;/span&gt; baz</p>\n");
}

#[test]
fn angle_bracket_not_recognized_as_tag_is_escaped() {
    html("1 < 2\n", "<p>1 &lt; 2</p>\n");
}
