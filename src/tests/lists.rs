use super::html;

#[test]
fn tight_bullet_list() {
    html(
        "- a\n- b\n- c\n",
        concat!(
            "<ul>\n",
            "<li>a</li>\n",
            "<li>b</li>\n",
            "<li>c</li>\n",
            "</ul>\n"
        ),
    );
}

#[test]
fn loose_list_blank_between_items() {
    html(
        "- a\n\n- b\n",
        concat!(
            "<ul>\n",
            "<li>\n<p>a</p>\n</li>\n",
            "<li>\n<p>b</p>\n</li>\n",
            "</ul>\n"
        ),
    );
}

#[test]
fn ordered_list_with_start() {
    html(
        "2. Hello.\n3. Hi.\n",
        concat!(
            "<ol start=\"2\">\n",
            "<li>Hello.</li>\n",
            "<li>Hi.</li>\n",
            "</ol>\n"
        ),
    );
}

#[test]
fn ordered_list_start_one_omits_attribute() {
    html(
        "1. a\n2. b\n",
        concat!("<ol>\n", "<li>a</li>\n", "<li>b</li>\n", "</ol>\n"),
    );
}

#[test]
fn different_bullet_chars_start_new_lists() {
    html(
        "- a\n* b\n",
        concat!(
            "<ul>\n<li>a</li>\n</ul>\n",
            "<ul>\n<li>b</li>\n</ul>\n"
        ),
    );
}

#[test]
fn list_item_with_nested_paragraph_content() {
    html(
        "- a\n  continued\n- b\n",
        concat!(
            "<ul>\n",
            "<li>a\ncontinued</li>\n",
            "<li>b</li>\n",
            "</ul>\n"
        ),
    );
}

#[test]
fn list_item_containing_code_block() {
    html(
        "- a\n\n      code\n",
        concat!(
            "<ul>\n",
            "<li>\n<p>a</p>\n<pre><code>code\n</code></pre>\n</li>\n",
            "</ul>\n"
        ),
    );
}
