use super::html;

#[test]
fn script_block_is_passthrough() {
    html(
        "<script>\nvar x = 1 < 2;\n</script>\n",
        "<script>\nvar x = 1 < 2;\n</script>\n",
    );
}

#[test]
fn comment_block() {
    html("<!-- a comment -->\n", "<!-- a comment -->\n");
}

#[test]
fn generic_block_tag() {
    html("<div>\ncontent\n</div>\n", "<div>\ncontent\n</div>\n");
}

#[test]
fn generic_block_closes_on_blank_line() {
    html(
        "<div>\nfoo\n\npara\n",
        "<div>\nfoo\n<p>para</p>\n",
    );
}

#[test]
fn doctype_block() {
    html("<!DOCTYPE html>\n", "<!DOCTYPE html>\n");
}
