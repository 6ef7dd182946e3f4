//! Integration tests for the public tree API
//!
//! Builds trees by hand and from markdown, mutates them through every
//! operation and checks the results through the consistency checker and the
//! HTML renderer.

use marktree_ast::{ErrorKind, ListType, NodeId, NodeType, Tree, TreeError};
use marktree_html::render_html;
use marktree_parser::parse_document;

fn string(tree: &mut Tree, content: &str) -> NodeId {
    let id = tree.new_node(NodeType::String);
    tree.set_string_content(id, content).unwrap();
    id
}

mod constructor {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_type_gets_its_defaults() {
        let mut tree = Tree::new();

        for node_type in NodeType::ALL {
            let node = tree.new_node(node_type);
            assert_eq!(tree.node_type(node), Some(node_type));
            assert_eq!(tree.parent(node), None);
            assert_eq!(tree.first_child(node), None);

            match node_type {
                NodeType::AtxHeader | NodeType::SetextHeader => {
                    assert_eq!(tree.header_level(node), 1, "default header level is 1");
                }
                NodeType::List => {
                    assert_eq!(tree.list_type(node), ListType::Bullet);
                    assert_eq!(tree.list_start(node), 1);
                    assert!(!tree.list_tight(node), "lists start loose");
                }
                _ => {
                    assert_eq!(tree.header_level(node), 0);
                    assert_eq!(tree.list_type(node), ListType::None);
                }
            }

            tree.destroy(node);
            assert!(!tree.contains(node));
        }

        assert!(tree.is_empty());
    }
}

mod accessors {
    use super::*;
    use pretty_assertions::assert_eq;

    const MARKDOWN: &str = "## Header\n\
        \n    code\n\
        \n* Item 1\n\
        * Item 2\n\
        \n2. Item 1\n\
        \n3. Item 2\n\
        \n``` lang\n\
        fenced\n\
        ```\n\
        \n<div>html</div>\n\
        \n[link](url 'title')\n";

    struct Parsed {
        tree: Tree,
        doc: NodeId,
        header: NodeId,
        code: NodeId,
        bullet_list: NodeId,
        ordered_list: NodeId,
        fenced: NodeId,
        html: NodeId,
        paragraph: NodeId,
        link: NodeId,
        string: NodeId,
    }

    fn parsed() -> Parsed {
        let mut tree = Tree::new();
        let doc = parse_document(&mut tree, MARKDOWN).unwrap();
        let blocks: Vec<NodeId> = tree.children(doc).collect();
        assert_eq!(blocks.len(), 7);

        let link = tree.first_child(blocks[6]).unwrap();
        let string = tree.first_child(link).unwrap();
        Parsed {
            doc,
            header: blocks[0],
            code: blocks[1],
            bullet_list: blocks[2],
            ordered_list: blocks[3],
            fenced: blocks[4],
            html: blocks[5],
            paragraph: blocks[6],
            link,
            string,
            tree,
        }
    }

    #[test]
    fn getters() {
        let p = parsed();
        let tree = &p.tree;

        assert_eq!(tree.node_type(p.header), Some(NodeType::AtxHeader));
        assert_eq!(tree.header_level(p.header), 2);

        assert_eq!(tree.node_type(p.code), Some(NodeType::IndentedCode));
        assert_eq!(tree.string_content(p.code), Some("code\n"));

        assert_eq!(tree.node_type(p.bullet_list), Some(NodeType::List));
        assert_eq!(tree.list_type(p.bullet_list), ListType::Bullet);
        assert!(tree.list_tight(p.bullet_list));

        assert_eq!(tree.node_type(p.ordered_list), Some(NodeType::List));
        assert_eq!(tree.list_type(p.ordered_list), ListType::Ordered);
        assert_eq!(tree.list_start(p.ordered_list), 2);
        assert!(!tree.list_tight(p.ordered_list));

        assert_eq!(tree.node_type(p.fenced), Some(NodeType::FencedCode));
        assert_eq!(tree.string_content(p.fenced), Some("fenced\n"));
        assert_eq!(tree.fence_info(p.fenced), Some("lang"));

        assert_eq!(tree.node_type(p.html), Some(NodeType::HtmlBlock));
        assert_eq!(tree.string_content(p.html), Some("<div>html</div>\n"));

        assert_eq!(tree.node_type(p.paragraph), Some(NodeType::Paragraph));
        assert_eq!(tree.start_line(p.paragraph), 18);
        assert_eq!(tree.start_column(p.paragraph), 1);
        assert_eq!(tree.end_line(p.paragraph), 18);

        assert_eq!(tree.node_type(p.link), Some(NodeType::Link));
        assert_eq!(tree.url(p.link), Some("url"));
        assert_eq!(tree.title(p.link), Some("title"));

        assert_eq!(tree.node_type(p.string), Some(NodeType::String));
        assert_eq!(tree.string_content(p.string), Some("link"));
    }

    #[test]
    fn setters_change_rendering() {
        let mut p = parsed();
        let tree = &mut p.tree;

        tree.set_header_level(p.header, 3).unwrap();

        tree.set_list_type(p.bullet_list, ListType::Ordered).unwrap();
        tree.set_list_start(p.bullet_list, 3).unwrap();
        tree.set_list_tight(p.bullet_list, false).unwrap();

        tree.set_list_type(p.ordered_list, ListType::Bullet).unwrap();
        tree.set_list_tight(p.ordered_list, true).unwrap();

        tree.set_string_content(p.code, "CODE\n").unwrap();
        tree.set_string_content(p.fenced, "FENCED\n").unwrap();
        tree.set_fence_info(p.fenced, "LANG").unwrap();
        tree.set_string_content(p.html, "<div>HTML</div>\n").unwrap();
        tree.set_url(p.link, "URL").unwrap();
        tree.set_title(p.link, "TITLE").unwrap();
        tree.set_string_content(p.string, "LINK").unwrap();

        let expected = concat!(
            "<h3>Header</h3>\n",
            "<pre><code>CODE\n",
            "</code></pre>\n",
            "<ol start=\"3\">\n",
            "<li>\n",
            "<p>Item 1</p>\n",
            "</li>\n",
            "<li>\n",
            "<p>Item 2</p>\n",
            "</li>\n",
            "</ol>\n",
            "<ul>\n",
            "<li>Item 1</li>\n",
            "<li>Item 2</li>\n",
            "</ul>\n",
            "<pre><code class=\"language-LANG\">FENCED\n",
            "</code></pre>\n",
            "<div>HTML</div>\n",
            "<p><a href=\"URL\" title=\"TITLE\">LINK</a></p>\n",
        );
        assert_eq!(render_html(tree, p.doc).unwrap(), expected);
    }

    #[test]
    fn getter_sentinels() {
        let p = parsed();
        let tree = &p.tree;

        assert_eq!(tree.header_level(p.bullet_list), 0);
        assert_eq!(tree.list_type(p.header), ListType::None);
        assert_eq!(tree.list_start(p.code), 0);
        assert!(!tree.list_tight(p.fenced));
        assert_eq!(tree.string_content(p.ordered_list), None);
        assert_eq!(tree.fence_info(p.paragraph), None);
        assert_eq!(tree.url(p.html), None);
        assert_eq!(tree.title(p.header), None);
    }

    #[test]
    fn setter_type_errors() {
        let mut p = parsed();
        let tree = &mut p.tree;

        let results = [
            tree.set_header_level(p.bullet_list, 3),
            tree.set_list_type(p.header, ListType::Ordered),
            tree.set_list_start(p.code, 3),
            tree.set_list_tight(p.fenced, false),
            tree.set_string_content(p.ordered_list, "content\n"),
            tree.set_fence_info(p.paragraph, "lang"),
            tree.set_url(p.html, "url"),
            tree.set_title(p.header, "title"),
        ];

        for result in results {
            assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::TypeMismatch));
        }
    }

    #[test]
    fn setter_domain_errors_keep_prior_value() {
        let mut p = parsed();
        let tree = &mut p.tree;

        for level in [0, 7] {
            let err = tree.set_header_level(p.header, level).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DomainViolation);
            assert_eq!(tree.header_level(p.header), 2);
        }

        let err = tree.set_list_type(p.bullet_list, ListType::None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DomainViolation);
        assert_eq!(tree.list_type(p.bullet_list), ListType::Bullet);

        let err = tree.set_list_start(p.ordered_list, -1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DomainViolation);
        assert_eq!(tree.list_start(p.ordered_list), 2);
    }

    #[test]
    fn parsing_into_a_level_three_header() {
        let mut tree = Tree::new();
        let doc = parse_document(&mut tree, "## Header\n").unwrap();
        let header = tree.first_child(doc).unwrap();

        tree.set_header_level(header, 3).unwrap();

        assert_eq!(render_html(&tree, doc).unwrap(), "<h3>Header</h3>\n");
    }
}

mod create_tree {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn build_and_shuffle() {
        let mut tree = Tree::new();
        let doc = tree.new_node(NodeType::Document);

        let p = tree.new_node(NodeType::Paragraph);
        tree.append_child(doc, p).unwrap();
        assert_eq!(tree.consistency_check(doc), 0);

        let emph = tree.new_node(NodeType::Emph);
        tree.prepend_child(p, emph).unwrap();
        assert_eq!(tree.consistency_check(doc), 0);

        let str1 = string(&mut tree, "Hello, ");
        tree.prepend_child(p, str1).unwrap();
        assert_eq!(tree.consistency_check(doc), 0);

        let str3 = string(&mut tree, "!");
        tree.append_child(p, str3).unwrap();
        assert_eq!(tree.consistency_check(doc), 0);

        let str2 = string(&mut tree, "world");
        tree.append_child(emph, str2).unwrap();
        assert_eq!(tree.consistency_check(doc), 0);

        assert_eq!(
            render_html(&tree, doc).unwrap(),
            "<p>Hello, <em>world</em>!</p>\n"
        );

        // 3 1 e
        tree.insert_before(str1, str3).unwrap();
        assert_eq!(tree.consistency_check(doc), 0);
        assert_eq!(tree.first_child(p), Some(str3));

        // 3 e 1
        tree.insert_before(str1, emph).unwrap();
        assert_eq!(tree.consistency_check(doc), 0);
        assert_eq!(tree.last_child(p), Some(str1));

        // e 1 3
        tree.insert_after(str1, str3).unwrap();
        assert_eq!(tree.consistency_check(doc), 0);
        assert_eq!(tree.last_child(p), Some(str3));

        // 1 e 3
        tree.insert_after(str1, emph).unwrap();
        assert_eq!(tree.consistency_check(doc), 0);
        assert_eq!(tree.first_child(p), Some(str1));

        let order: Vec<NodeId> = tree.children(p).collect();
        assert_eq!(order, vec![str1, emph, str3]);
        for &child in &order {
            if let Some(prev) = tree.prev(child) {
                assert_eq!(tree.next(prev), Some(child));
            }
        }

        assert_eq!(
            render_html(&tree, doc).unwrap(),
            "<p>Hello, <em>world</em>!</p>\n"
        );

        tree.destroy(doc);
        assert!(tree.is_empty());
    }

    #[test]
    fn unlink_then_reattach_elsewhere() {
        let mut tree = Tree::new();
        let doc = tree.new_node(NodeType::Document);
        let first = tree.new_node(NodeType::Paragraph);
        let second = tree.new_node(NodeType::Paragraph);
        let text = string(&mut tree, "moving");
        tree.append_child(doc, first).unwrap();
        tree.append_child(doc, second).unwrap();
        tree.append_child(first, text).unwrap();

        tree.unlink(text);
        assert_eq!(tree.parent(text), None);
        assert_eq!(tree.consistency_check(doc), 0);

        tree.append_child(second, text).unwrap();
        assert_eq!(tree.consistency_check(doc), 0);
        assert_eq!(
            render_html(&tree, doc).unwrap(),
            "<p></p>\n<p>moving</p>\n"
        );
    }
}

mod hierarchy {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mask(types: &[NodeType]) -> u32 {
        types.iter().fold(0, |acc, t| acc | (1 << t.index()))
    }

    fn allowed_content(parent: NodeType) -> u32 {
        let top_level_blocks = mask(&[
            NodeType::BlockQuote,
            NodeType::List,
            NodeType::FencedCode,
            NodeType::IndentedCode,
            NodeType::HtmlBlock,
            NodeType::Paragraph,
            NodeType::AtxHeader,
            NodeType::SetextHeader,
            NodeType::HRule,
            NodeType::ReferenceDef,
        ]);
        let all_inlines = mask(&[
            NodeType::String,
            NodeType::SoftBreak,
            NodeType::LineBreak,
            NodeType::InlineCode,
            NodeType::InlineHtml,
            NodeType::Emph,
            NodeType::Strong,
            NodeType::Link,
            NodeType::Image,
        ]);

        match parent {
            NodeType::Document | NodeType::BlockQuote | NodeType::ListItem => top_level_blocks,
            NodeType::List => mask(&[NodeType::ListItem]),
            NodeType::Paragraph
            | NodeType::AtxHeader
            | NodeType::SetextHeader
            | NodeType::Emph
            | NodeType::Strong
            | NodeType::Link
            | NodeType::Image => all_inlines,
            _ => 0,
        }
    }

    #[test]
    fn all_types_fit_a_bitmask() {
        assert!(NodeType::COUNT < 32);
    }

    #[test]
    fn content_model_matrix() {
        for parent_type in NodeType::ALL {
            let mut tree = Tree::new();
            let parent = tree.new_node(parent_type);

            for child_type in NodeType::ALL {
                let child = tree.new_node(child_type);
                let expected = (allowed_content(parent_type) >> child_type.index()) & 1 == 1;

                let result = tree.append_child(parent, child);
                assert_eq!(
                    result.is_ok(),
                    expected,
                    "add {child_type} as child of {parent_type}"
                );
                if let Err(err) = result {
                    assert_eq!(
                        err,
                        TreeError::NotAllowed {
                            parent: parent_type,
                            child: child_type,
                        }
                    );
                }

                tree.destroy(child);
                assert_eq!(tree.consistency_check(parent), 0);
            }
        }
    }

    #[test]
    fn cycles_are_rejected() {
        let mut tree = Tree::new();
        let bquote1 = tree.new_node(NodeType::BlockQuote);
        let bquote2 = tree.new_node(NodeType::BlockQuote);
        let bquote3 = tree.new_node(NodeType::BlockQuote);

        tree.append_child(bquote1, bquote2).unwrap();
        tree.append_child(bquote2, bquote3).unwrap();

        assert_eq!(tree.append_child(bquote3, bquote3), Err(TreeError::Cycle));
        assert_eq!(tree.append_child(bquote3, bquote1), Err(TreeError::Cycle));

        tree.destroy(bquote1);
        assert!(tree.is_empty());
    }

    #[test]
    fn descendant_attach_fails_for_every_operation() {
        let mut tree = Tree::new();
        let outer = tree.new_node(NodeType::BlockQuote);
        let middle = tree.new_node(NodeType::BlockQuote);
        let inner = tree.new_node(NodeType::BlockQuote);
        let leaf = tree.new_node(NodeType::HRule);
        tree.append_child(outer, middle).unwrap();
        tree.append_child(middle, inner).unwrap();
        tree.append_child(inner, leaf).unwrap();

        let before: Vec<NodeId> = tree.descendants(outer).collect();

        let results = [
            tree.append_child(inner, outer),
            tree.prepend_child(middle, outer),
            tree.insert_before(leaf, outer),
            tree.insert_after(leaf, middle),
        ];
        for result in results {
            assert_eq!(result, Err(TreeError::Cycle));
        }

        assert_eq!(tree.descendants(outer).collect::<Vec<_>>(), before);
        assert_eq!(tree.parent(outer), None);
        assert_eq!(tree.consistency_check(outer), 0);
    }

    #[test]
    fn insert_next_to_parentless_node_fails() {
        let mut tree = Tree::new();
        let lonely = tree.new_node(NodeType::Paragraph);
        let other = tree.new_node(NodeType::Paragraph);

        assert_eq!(tree.insert_before(lonely, other), Err(TreeError::Unattached));
        assert_eq!(tree.insert_after(lonely, other), Err(TreeError::Unattached));
        assert_eq!(tree.parent(other), None);
    }
}
