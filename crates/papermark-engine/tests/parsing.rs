use papermark_engine::plugins::references;
use papermark_engine::{Document, NodeKind, ParseError};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn parse_fixture(name: &str) -> Result<Document, ParseError> {
    let mut doc = Document::new();
    doc.parse(&fixture(name))?;
    Ok(doc)
}

#[test]
fn fixture_paper_outline() {
    let doc = parse_fixture("paper").unwrap();
    insta::assert_snapshot!(doc.outline().trim_end(), @r#"
    <Section level=1 number=1>
      <Title text=A Study of Things>
      <Paragraph>
        "We measure things, see "
        <ImageRef name=setup>
        " and "
        <TableRef name=results>
        "."
      <Section level=2 number=1>
        <Title text=Setup>
        <Image name=setup link=img/setup.png number=1>
        <Code name=measure.py lines=1 number=1>
      <Section level=2 number=2>
        <Title text=Results>
        <Table name=results row=2 col=2 number=1>
          <TableHead>
            <TableHeadCell>
              "run"
            <TableHeadCell>
              "value"
          <TableRow>
            <TableCell>
              "a"
            <TableCell>
              "1"
          <TableRow>
            <TableCell>
              "b"
            <TableCell>
              <CodeSpan text=2>
        <Paragraph>
          "As shown in "
          <CodeRef name=measure.py>
          ", see "
          <Ref key=smith2020 number=1>
          "."
    "#);
}

#[test]
fn fixture_paper_labels() {
    let doc = parse_fixture("paper").unwrap();

    let titles: Vec<String> = doc
        .descendants(doc.root().id())
        .into_iter()
        .map(|id| doc.node_ref(id))
        .filter(|n| matches!(n.kind(), NodeKind::Title(_)))
        .map(|n| n.label().unwrap())
        .collect();
    assert_eq!(titles, vec!["A Study of Things", "1. Setup", "2. Results"]);

    assert_eq!(doc.image("setup").unwrap().label().unwrap(), "图1 setup");
    assert_eq!(doc.table("results").unwrap().label().unwrap(), "表1 results");
    assert_eq!(doc.code("measure.py").unwrap().label().unwrap(), "代码1 measure.py");

    let code_ref = doc
        .find(|n| matches!(n.kind(), NodeKind::CodeRef(_)))
        .unwrap();
    assert_eq!(code_ref.reference_label().unwrap(), "代码1");
}

#[test]
fn fixture_paper_macro_arguments() {
    let doc = parse_fixture("paper").unwrap();

    let intro = doc
        .find(|n| matches!(n.kind(), NodeKind::Paragraph))
        .unwrap();
    assert_eq!(
        intro.args().and_then(|a| a.get("indent")).and_then(|v| v.as_int()),
        Some(2)
    );

    let code = doc.code("measure.py").unwrap();
    assert_eq!(
        code.args().and_then(|a| a.get("lang")).and_then(|v| v.as_str()),
        Some("python")
    );
}

#[test]
fn fixture_paper_with_references_list() {
    let mut doc = Document::new();
    references::install(&mut doc);
    doc.parse(&fixture("paper")).unwrap();

    let list = doc
        .find(|n| n.title() == Some(references::DEFAULT_TITLE))
        .unwrap();
    assert_eq!(list.label().unwrap(), "3. 参考文献");
    let entries: Vec<_> = list
        .children()
        .filter(|c| matches!(c.kind(), NodeKind::Paragraph))
        .flat_map(|p| p.children())
        .map(|t| t.kind().clone())
        .collect();
    assert_eq!(entries, vec![NodeKind::Text("[1] smith2020".into())]);
}

#[test]
fn fixture_unnamed_table_reports_its_line() {
    let err = parse_fixture("unnamed_table").unwrap_err();
    assert!(matches!(err, ParseError::TableNameRequired { line: 3 }));
    assert_eq!(
        err.to_string(),
        "line 3: table needs a name, e.g. `@table(name=\"results\")` before it"
    );
}

#[test]
fn failing_hook_aborts_the_parse() {
    let mut doc = Document::new();
    doc.add_post_parse_hook(|_| anyhow::bail!("boom"));
    let err = doc.parse("# A\n").unwrap_err();
    assert!(matches!(err, ParseError::Hook(_)));
}
