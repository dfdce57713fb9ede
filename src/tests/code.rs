use super::html;

#[test]
fn fenced_code_backticks() {
    html(
        "```\nconsole.log('hi');\n```\n",
        "<pre><code>console.log(&#39;hi&#39;);\n</code></pre>\n",
    );
}

#[test]
fn fenced_code_with_language() {
    html(
        "```rust\nfn main() {}\n```\n",
        "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n",
    );
}

#[test]
fn fenced_code_tildes() {
    html("~~~\nhi\n~~~\n", "<pre><code>hi\n</code></pre>\n");
}

#[test]
fn fenced_code_requires_matching_length() {
    html(
        "````\n```\nstill open\n````\n",
        "<pre><code>```\nstill open\n</code></pre>\n",
    );
}

#[test]
fn indented_code_block() {
    html("    indented\n    code\n", "<pre><code>indented\ncode\n</code></pre>\n");
}

#[test]
fn indented_code_not_opened_under_paragraph() {
    html("para\n    still para\n", "<p>para\nstill para</p>\n");
}

#[test]
fn code_span_basic() {
    html("`code`\n", "<p><code>code</code></p>\n");
}

#[test]
fn code_span_strips_one_space_each_side() {
    html("` `` `\n", "<p><code>``</code></p>\n");
}

#[test]
fn code_span_unmatched_backtick_is_literal() {
    html("`unterminated\n", "<p>`unterminated</p>\n");
}

#[test]
fn code_span_escapes_html() {
    html("`<&>`\n", "<p><code>&lt;&amp;&gt;</code></p>\n");
}
