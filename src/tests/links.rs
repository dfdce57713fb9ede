use super::html;

#[test]
fn inline_link() {
    html(
        "[foo](/url \"title\")\n",
        "<p><a href=\"/url\" title=\"title\">foo</a></p>\n",
    );
}

#[test]
fn inline_link_no_title() {
    html("[foo](/url)\n", "<p><a href=\"/url\">foo</a></p>\n");
}

#[test]
fn inline_image() {
    html(
        "![alt](/img.png \"t\")\n",
        "<p><img src=\"/img.png\" alt=\"alt\" title=\"t\" /></p>\n",
    );
}

#[test]
fn reference_link() {
    html(
        "[foo]: /url \"t\"\n\n[foo]\n",
        "<p><a href=\"/url\" title=\"t\">foo</a></p>\n",
    );
}

#[test]
fn full_reference_link() {
    html(
        "[bar]: /url2\n\n[foo][bar]\n",
        "<p><a href=\"/url2\">foo</a></p>\n",
    );
}

#[test]
fn collapsed_reference_link() {
    html(
        "[foo]: /url3\n\n[foo][]\n",
        "<p><a href=\"/url3\">foo</a></p>\n",
    );
}

#[test]
fn undefined_reference_falls_back_to_literal() {
    html("[foo][nope]\n", "<p>[foo][nope]</p>\n");
}

#[test]
fn unmatched_bracket_is_literal() {
    html("[foo\n", "<p>[foo</p>\n");
}

#[test]
fn reference_label_is_case_and_whitespace_normalized() {
    html(
        "[Foo Bar]: /url\n\n[foo   bar]\n",
        "<p><a href=\"/url\">foo   bar</a></p>\n",
    );
}

#[test]
fn link_with_emphasis_in_label() {
    html(
        "[*foo*](/url)\n",
        "<p><a href=\"/url\"><em>foo</em></a></p>\n",
    );
}

#[test]
fn nested_brackets_fail_gracefully() {
    html("[a[b]c]\n", "<p>[a[b]c]</p>\n");
}

#[test]
fn href_quote_is_percent_escaped() {
    html(
        "[x](\"quoted\")\n",
        "<p><a href=\"%22quoted%22\">x</a></p>\n",
    );
}
