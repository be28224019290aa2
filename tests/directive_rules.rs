//! Directive placement and combination rules, checked end to end from Markdown text

use fulky::{build_document, Command, Error, ParseError};
use rstest::rstest;

fn parse_error(text: &str) -> ParseError {
    match build_document(text) {
        Err(Error::Parse(err)) => err,
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[rstest]
#[case::skip_test_then_globals("<!-- fulky:skip-test -->\n<!-- fulky:globals -->\n```js\nx();\n```\n", Command::SkipTest)]
#[case::globals_then_skip_test("<!-- fulky:globals -->\n<!-- fulky:skip-test -->\n```js\nx();\n```\n", Command::SkipTest)]
#[case::define_then_globals("<!-- fulky:define foo -->\n<!-- fulky:globals -->\n```js\nx();\n```\n", Command::Define)]
#[case::globals_then_define("<!-- fulky:globals -->\n<!-- fulky:define foo -->\n```js\nx();\n```\n", Command::Define)]
#[case::use_then_globals("<!-- fulky:define foo -->\n```js\nf();\n```\n<!-- fulky:use foo -->\n<!-- fulky:globals -->\n```js\nx();\n```\n", Command::Use)]
#[case::globals_then_use("<!-- fulky:define foo -->\n```js\nf();\n```\n<!-- fulky:globals -->\n<!-- fulky:use foo -->\n```js\nx();\n```\n", Command::Use)]
#[case::modifier_then_globals_body("<!-- fulky:skip-test -->\n<!-- fulky:globals\nsetup();\n-->\n```js\nx();\n```\n", Command::SkipTest)]
fn globals_cannot_be_combined(#[case] text: &str, #[case] offending: Command) {
    match parse_error(text) {
        ParseError::IncompatibleDirective { command, .. } => assert_eq!(command, offending),
        other => panic!("expected an incompatible directive error, got {:?}", other),
    }
}

#[rstest]
#[case::at_end_of_input("<!-- fulky:skip-test -->\n")]
#[case::use_at_end("<!-- fulky:define foo -->\n```js\nf();\n```\n<!-- fulky:use foo -->\n")]
#[case::globals_at_end("<!-- fulky:globals -->")]
#[case::at_end_without_newline("```js\nok();\n```\n<!-- fulky:define foo -->")]
#[case::before_prose("<!-- fulky:skip-test -->\nSome prose.\n```js\nx();\n```\n")]
#[case::before_other_language("<!-- fulky:use foo -->\n```python\nprint(1)\n```\n")]
#[case::globals_without_code("<!-- fulky:globals -->\n\n## Heading\n")]
#[case::before_unknown_directive("<!-- fulky:skip-test -->\n<!-- fulky:foobar -->\n```js\nx();\n```\n")]
fn directives_need_a_code_block(#[case] text: &str) {
    assert!(matches!(
        parse_error(text),
        ParseError::DanglingDirective { .. }
    ));
}

#[rstest]
#[case::blank_lines("<!-- fulky:skip-test -->\n\n\n```js\nx();\n```\n")]
#[case::stacked("<!-- fulky:define foo -->\n<!-- fulky:skip-test -->\n```js\nx();\n```\n")]
#[case::same_line("<!-- fulky:skip-test --><!-- fulky:define foo -->\n```js\nx();\n```\n")]
fn directives_reach_over_blank_lines(#[case] text: &str) {
    let doc = build_document(text).unwrap();
    assert!(doc.examples.is_empty());
}

#[test]
fn globals_body_needs_no_code_block() {
    let doc = build_document("<!-- fulky:globals\nsetup();\n-->\n\nJust prose afterwards.\n")
        .unwrap();
    assert_eq!(doc.globals, "setup();");
    assert!(doc.examples.is_empty());
}

#[test]
fn globals_forms_are_equivalent() {
    let from_body = build_document("<!-- fulky:globals\nsetup();\n-->\n").unwrap();
    let from_block = build_document("<!-- fulky:globals -->\n```js\nsetup();```\n").unwrap();
    assert_eq!(from_body, from_block);
}

#[test]
fn crlf_documents_match_lf_documents() {
    let lf = "<!-- fulky:globals\nsetup();\n-->\n```js\nx();\n```\n";
    let crlf = lf.replace('\n', "\r\n");
    let doc = build_document(&crlf).unwrap();
    assert_eq!(doc.globals, build_document(lf).unwrap().globals);
    assert_eq!(doc.examples, vec!["x();\r\n"]);

    let lf = "<!--\nfulky:define\nnotArg\n-->\n```js\nx();\n```\n";
    let crlf = lf.replace('\n', "\r\n");
    assert_eq!(parse_error(&crlf), parse_error(lf));
}

#[test]
fn errors_point_at_the_first_pending_directive() {
    let text = "# Title\n\n<!-- fulky:skip-test -->\n<!-- fulky:globals -->\n```js\nx();\n```\n";
    assert_eq!(parse_error(text).line(), Some(3));
}

#[test]
fn unknown_commands_are_prose() {
    let doc = build_document("<!-- fulky:foobar -->\n```js\nx();\n```\n").unwrap();
    assert_eq!(doc.examples, vec!["x();\n"]);
}

#[test]
fn snippets_must_be_defined_first() {
    let text = "<!-- fulky:use later -->\n```js\nx();\n```\n<!-- fulky:define later -->\n```js\ny();\n```\n";
    assert_eq!(
        parse_error(text),
        ParseError::UndefinedSnippet {
            name: "later".to_string(),
            line: Some(1),
        }
    );
}

#[test]
fn define_takes_exactly_one_name() {
    let err = parse_error("<!-- fulky:define a b -->\n```js\nx();\n```\n");
    assert_eq!(
        err,
        ParseError::InvalidArguments {
            command: Command::Define,
            found: 2,
            line: Some(1),
        }
    );
}
