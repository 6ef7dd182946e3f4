//! Integration tests for markdown to HTML rendering
//!
//! Parses fixture documents and renders them through the full pipeline.

use std::fs;
use std::path::PathBuf;

use marktree_ast::{NodeType, Tree};
use marktree_html::{HtmlRenderer, RenderError, RenderOptions, render_html};
use marktree_parser::parse_document;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).expect("Failed to read fixture")
}

#[test]
fn sample_document() {
    let source = read_fixture("sample.md");
    let mut tree = Tree::new();
    let doc = parse_document(&mut tree, &source).unwrap();

    assert_eq!(tree.consistency_check(doc), 0);

    let html = render_html(&tree, doc).unwrap();
    insta::assert_snapshot!("sample_document", html);
}

#[test]
fn sample_document_with_options_from_file() {
    let source = read_fixture("sample.md");
    let options = RenderOptions::from_file(fixtures_dir().join("options.json")).unwrap();
    let mut tree = Tree::new();
    let doc = parse_document(&mut tree, &source).unwrap();

    let html = HtmlRenderer::with_options(options)
        .render(&tree, doc)
        .unwrap();

    assert!(html.starts_with("<h1 data-sourcepos=\"1:1-1:10\">marktree</h1>\n"));
    assert!(html.contains("with <code>code</code>, a"));
    assert!(html.contains("</a><br />\nand an"));
}

#[rstest]
#[case::nested_quote("> > deep\n", "<blockquote>\n<blockquote>\n<p>deep</p>\n</blockquote>\n</blockquote>\n")]
#[case::list_in_quote("> - a\n> - b\n", "<blockquote>\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n</blockquote>\n")]
#[case::nested_list("- a\n  - b\n", "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul>\n</li>\n</ul>\n")]
#[case::reference_link(
    "[home][]\n\n[home]: /index.html\n",
    "<p><a href=\"/index.html\">home</a></p>\n"
)]
#[case::emphasis_in_link("[*a*](/b)\n", "<p><a href=\"/b\"><em>a</em></a></p>\n")]
fn renders_markdown(#[case] source: &str, #[case] expected: &str) {
    let mut tree = Tree::new();
    let doc = parse_document(&mut tree, source).unwrap();

    assert_eq!(render_html(&tree, doc).unwrap(), expected);
}

#[test]
fn rendering_after_moving_a_subtree() {
    let mut tree = Tree::new();
    let doc = parse_document(&mut tree, "# Title\n\nBody\n").unwrap();
    let header = tree.first_child(doc).unwrap();
    let body = tree.last_child(doc).unwrap();

    tree.insert_after(body, header).unwrap();

    assert_eq!(tree.consistency_check(doc), 0);
    assert_eq!(
        render_html(&tree, doc).unwrap(),
        "<p>Body</p>\n<h1>Title</h1>\n"
    );
}

#[test]
fn rendering_two_documents_from_one_tree() {
    let mut tree = Tree::new();
    let first = parse_document(&mut tree, "one\n").unwrap();
    let second = parse_document(&mut tree, "two\n").unwrap();

    // Move the paragraph of the second document into the first
    let para = tree.first_child(second).unwrap();
    tree.append_child(first, para).unwrap();

    assert_eq!(render_html(&tree, first).unwrap(), "<p>one</p>\n<p>two</p>\n");
    assert_eq!(render_html(&tree, second).unwrap(), "");
}

#[test]
fn destroyed_root_is_an_error() {
    let mut tree = Tree::new();
    let doc = parse_document(&mut tree, "text\n").unwrap();
    tree.destroy(doc);

    assert!(matches!(render_html(&tree, doc), Err(RenderError::StaleNode)));
    assert!(tree.is_empty());
}

#[test]
fn hand_built_document_matches_parsed_one() {
    let mut parsed = Tree::new();
    let parsed_doc = parse_document(&mut parsed, "Hello, *world*!\n").unwrap();

    let mut built = Tree::new();
    let doc = built.new_node(NodeType::Document);
    let para = built.new_node(NodeType::Paragraph);
    let emph = built.new_node(NodeType::Emph);
    built.append_child(doc, para).unwrap();
    for (parent, content) in [(para, "Hello, "), (emph, "world")] {
        let text = built.new_node(NodeType::String);
        built.set_string_content(text, content).unwrap();
        built.append_child(parent, text).unwrap();
    }
    built.append_child(para, emph).unwrap();
    let bang = built.new_node(NodeType::String);
    built.set_string_content(bang, "!").unwrap();
    built.append_child(para, bang).unwrap();

    assert_eq!(
        render_html(&built, doc).unwrap(),
        render_html(&parsed, parsed_doc).unwrap()
    );
}
