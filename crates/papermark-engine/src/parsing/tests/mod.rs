//! Parser tests over whole documents.
//!
//! Each parsed document is run through [`invariants::check`] before the
//! test looks at it.


use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::document::{Document, NodeId, NodeKind};
use crate::error::ParseError;
use crate::parsing::macros::MacroValue;
use papermark_config::StyleKind;

fn parse(source: &str) -> Document {
    let mut doc = Document::new();
    doc.parse(source).unwrap();
    invariants::check(&doc);
    doc
}

fn parse_err(source: &str) -> ParseError {
    let mut doc = Document::new();
    doc.parse(source).unwrap_err()
}

fn kinds_of<'a>(doc: &'a Document, pred: impl Fn(&NodeKind) -> bool) -> Vec<&'a NodeKind> {
    doc.descendants(NodeId::ROOT)
        .into_iter()
        .map(|id| doc.node(id).kind())
        .filter(|k| pred(k))
        .collect()
}

// Structure

#[test]
fn title_paragraph_and_image() {
    let doc = parse("# Title\n\nSome **bold** text with a ![fig](a.png) image.\n![fig](a.png)\n");
    insta::assert_snapshot!(doc.outline().trim_end(), @r#"
    <Section level=1 number=1>
      <Title text=Title>
      <Paragraph>
        "Some "
        <BoldSpan text=bold>
        " text with a ![fig](a.png) image."
      <Image name=fig link=a.png number=1>
    "#);
}

#[test]
fn empty_document() {
    let doc = parse("");
    assert!(doc.is_empty());
}

#[test]
fn blank_lines_only() {
    let doc = parse("\n   \n\t\n");
    assert!(doc.is_empty());
}

#[test]
fn every_text_line_is_its_own_paragraph() {
    let doc = parse("one\ntwo\n\nthree\n");
    let paragraphs = kinds_of(&doc, |k| matches!(k, NodeKind::Paragraph));
    assert_eq!(paragraphs.len(), 3);
}

#[test]
fn content_before_first_heading_belongs_to_root() {
    let doc = parse("preface\n# One\nbody\n");
    let root_children: Vec<_> = doc.root().children().map(|c| c.kind().name()).collect();
    assert_eq!(root_children, vec!["Paragraph", "Section"]);
}

#[test]
fn section_numbers_restart_under_each_parent() {
    let doc = parse("# A\n## A1\n## A2\n### A2a\n# B\n## B1\n### B1a\n### B1b\n");
    let labels: Vec<String> = doc
        .descendants(NodeId::ROOT)
        .into_iter()
        .map(|id| doc.node_ref(id))
        .filter(|n| matches!(n.kind(), NodeKind::Title(_)))
        .map(|n| n.label().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec!["A", "1 A1", "2 A2", "2.1 A2a", "B", "1 B1", "1.1 B1a", "1.2 B1b"]
    );
}

#[test]
fn seven_hashes_is_a_paragraph() {
    let doc = parse("####### not a heading\n");
    assert_eq!(
        kinds_of(&doc, |k| matches!(k, NodeKind::Text(_))),
        vec![&NodeKind::Text("####### not a heading".into())]
    );
}

// Numbering and name tables

#[test]
fn second_image_gets_gi_two() {
    let doc = parse("# A\n![one](1.png)\n## B\n![two](2.png)\n");
    let two = doc.image("two").unwrap();
    assert_eq!(two.placeholders().get("gi"), Some("2"));
    assert_eq!(two.label().unwrap(), "图2 two");
}

#[test]
fn duplicate_code_names() {
    let doc = parse("```go\nfirst\n```\n```go\nsecond\n```\n");
    let codes = kinds_of(&doc, |k| matches!(k, NodeKind::Code(_)));
    let numbers: Vec<_> = codes.iter().filter_map(|k| k.number()).collect();
    assert_eq!(numbers, vec![1, 2]);

    let NodeKind::Code(registered) = doc.code("go").unwrap().kind() else {
        panic!("expected code");
    };
    assert_eq!(registered.lines, vec!["second"]);
    assert_eq!(registered.number, 2);
}

#[test]
fn citations_number_in_order_with_repeats() {
    let doc = parse("# A\n@[[x]] @[[y]]\n@table(name=\"t\")\n| @[[x]] |\n");
    let refs: Vec<(String, usize)> = kinds_of(&doc, |k| matches!(k, NodeKind::Ref(_)))
        .into_iter()
        .filter_map(|k| match k {
            NodeKind::Ref(c) => Some((c.key.clone(), c.number)),
            _ => None,
        })
        .collect();
    assert_eq!(
        refs,
        vec![("x".into(), 1), ("y".into(), 2), ("x".into(), 3)]
    );
    assert_eq!(doc.citations(), ["x", "y", "x"]);
}

// Macros

#[test]
fn macro_applies_to_matching_block() {
    let doc = parse("@image(width=300,alt=\"diagram\")\n![fig](a.png)\n");
    let args = doc.image("fig").unwrap().args().cloned().unwrap();
    assert_eq!(args["width"], MacroValue::Int(300));
    assert_eq!(args["alt"], MacroValue::Str("diagram".into()));
}

#[test]
fn macro_survives_blank_lines() {
    let doc = parse("@paragraph(id=1)\n\n\ntext\n");
    let p = doc.root().children().next().unwrap();
    assert!(p.args().is_some());
}

#[test]
fn mismatched_macro_is_dropped_not_deferred() {
    let doc = parse("@image(width=3)\nsome text\n![fig](a.png)\n");
    assert!(doc.image("fig").unwrap().args().is_none());
    let p = doc.root().children().next().unwrap();
    assert!(matches!(p.kind(), NodeKind::Paragraph));
    assert!(p.args().is_none());
}

#[test]
fn later_macro_replaces_pending_one() {
    let doc = parse("@image(width=1)\n@image(width=2)\n![fig](a.png)\n");
    let args = doc.image("fig").unwrap().args().cloned().unwrap();
    assert_eq!(args["width"], MacroValue::Int(2));
}

#[test]
fn section_macro_is_case_insensitive() {
    let doc = parse("@SECTION(numbered=0)\n# Intro\n");
    let section = doc.find(|n| n.level() == Some(1)).unwrap();
    assert!(section.args().is_some());
}

#[test]
fn malformed_macro_is_fatal() {
    let err = parse_err("# A\n@table(name=unquoted)\n");
    assert!(matches!(err, ParseError::MalformedMacro { line: 2, .. }));
}

// Front matter

#[test]
fn front_matter_overrides_styles() {
    let doc = parse("---\nh2:\n  format: \"§{s1} {text}\"\n---\n# A\n## B\n");
    let title = doc
        .find(|n| matches!(n.kind(), NodeKind::Title(t) if t == "B"))
        .unwrap();
    assert_eq!(title.label().unwrap(), "§1 B");
}

#[test]
fn front_matter_may_follow_blank_lines() {
    let doc = parse("\n---\ncode:\n  show_line_numbers: true\n---\n");
    assert!(doc.style().get(&StyleKind::Code).unwrap().show_line_numbers());
}

#[test]
fn dashes_after_content_are_text() {
    let doc = parse("hello\n---\n");
    assert_eq!(
        kinds_of(&doc, |k| matches!(k, NodeKind::Text(_))),
        vec![
            &NodeKind::Text("hello".into()),
            &NodeKind::Text("---".into())
        ]
    );
}

#[test]
fn second_front_matter_is_text() {
    let doc = parse("---\n---\n---\n");
    assert_eq!(kinds_of(&doc, |k| matches!(k, NodeKind::Paragraph)).len(), 1);
}

#[test]
fn invalid_front_matter_is_fatal() {
    let err = parse_err("---\nh1:\n  font_size: huge\n---\n# A\n");
    assert!(matches!(err, ParseError::FrontMatter { line: 1, .. }));
}

#[test]
fn unterminated_front_matter_is_fatal() {
    let err = parse_err("---\nh1:\n  bold: true\n");
    assert!(matches!(err, ParseError::UnterminatedFrontMatter { line: 1 }));
}

// Code blocks

#[test]
fn code_lines_are_kept_raw() {
    let doc = parse("```hello.rs\nfn main() {\n    println!(\"# not a heading\");\n}\n```\n");
    let NodeKind::Code(code) = doc.code("hello.rs").unwrap().kind() else {
        panic!("expected code");
    };
    assert_eq!(
        code.lines,
        vec!["fn main() {", "    println!(\"# not a heading\");", "}"]
    );
}

#[rstest]
#[case("~~~ sh\necho ```\n```\n~~~\n", vec!["echo ```", "```"])]
#[case("```sh\n~~~\n```\n", vec!["~~~"])]
#[case("```sh\n```not closing\n```\n", vec!["```not closing"])]
fn only_a_bare_fence_of_the_same_kind_closes(#[case] source: &str, #[case] lines: Vec<&str>) {
    let doc = parse(source);
    let NodeKind::Code(code) = doc.code("sh").unwrap().kind() else {
        panic!("expected code");
    };
    assert_eq!(code.lines, lines);
}

#[test]
fn unterminated_code_runs_to_end_of_input() {
    let doc = parse("```tail\nlast line\n");
    let NodeKind::Code(code) = doc.code("tail").unwrap().kind() else {
        panic!("expected code");
    };
    assert_eq!(code.lines, vec!["last line"]);
}

#[test]
fn code_without_name_is_fatal() {
    let err = parse_err("# A\n\n```\nx\n```\n");
    assert!(matches!(err, ParseError::CodeNameRequired { line: 3 }));
}

#[test]
fn code_macro_is_taken_at_close() {
    let doc = parse("@code(lang=\"rust\")\n```x\n```\n");
    let args = doc.code("x").unwrap().args().cloned().unwrap();
    assert_eq!(args["lang"].as_str(), Some("rust"));
}

// Tables

#[test]
fn table_with_delimiter_row() {
    let doc = parse("@table(name=\"t\")\n| a | b |\n|---|:-:|\n| 1 | 2 |\n| 3 | 4 |\n");
    let NodeKind::Table(table) = doc.table("t").unwrap().kind() else {
        panic!("expected table");
    };
    assert_eq!((table.columns, table.rows), (2, 2));
}

#[test]
fn table_without_delimiter_row_keeps_all_rows() {
    let doc = parse("@table(name=\"t\")\n| a |\n| 1 |\n");
    let NodeKind::Table(table) = doc.table("t").unwrap().kind() else {
        panic!("expected table");
    };
    assert_eq!(table.rows, 1);
}

#[test]
fn integer_table_name() {
    let doc = parse("@table(name=7)\n| a |\n");
    assert!(doc.table("7").is_some());
}

#[test]
fn line_ending_a_table_is_read_again() {
    let doc = parse("# A\n@table(name=\"t\")\n| a |\n## B\n");
    let table = doc.table("t").unwrap();
    assert_eq!(table.enclosing_section().level(), Some(1));
    assert!(doc.find(|n| n.title() == Some("B")).is_some());
}

#[test]
fn table_cells_hold_inline_spans() {
    let doc = parse("@table(name=\"t\")\n| **k** | see @image[[f]] |\n");
    let head_cells: Vec<_> = doc
        .table("t")
        .unwrap()
        .children()
        .next()
        .unwrap()
        .children()
        .flat_map(|cell| cell.children().map(|c| c.kind().clone()).collect::<Vec<_>>())
        .collect();
    assert_eq!(
        head_cells,
        vec![
            NodeKind::Bold("k".into()),
            NodeKind::Text("see ".into()),
            NodeKind::ImageRef("f".into()),
        ]
    );
}

#[test]
fn table_without_name_is_fatal() {
    let err = parse_err("text\n| a | b |\n");
    assert!(matches!(err, ParseError::TableNameRequired { line: 2 }));
}

#[test]
fn empty_table_name_is_fatal() {
    let err = parse_err("@table(name=\"\")\n| a |\n| 1 |\n");
    assert!(matches!(err, ParseError::TableNameRequired { line: 2 }));
}

#[test]
fn mismatched_macro_leaves_table_unnamed() {
    let err = parse_err("@image(name=\"t\")\n| a |\n");
    assert!(matches!(err, ParseError::TableNameRequired { line: 2 }));
}

#[test]
fn ragged_row_is_fatal() {
    let err = parse_err("@table(name=\"t\")\n| a | b |\n|---|---|\n| 1 | 2 |\n| 3 |\n");
    match err {
        ParseError::RaggedTable {
            line,
            table,
            expected,
            found,
        } => {
            assert_eq!((line, table.as_str(), expected, found), (5, "t", 2, 1));
        }
        other => panic!("unexpected error: {other}"),
    }
}
