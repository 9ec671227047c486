//! Tests for the `semi` rule.
#![allow(clippy::unwrap_used)]

use semiquote::config::{ContinuationChars, SemiMode, SemiOptions, StyleConfig};
use semiquote::rules::MessageId;
use semiquote::test_utils::{fix_with, lint_with};

fn semi(options: SemiOptions) -> StyleConfig {
    StyleConfig {
        quotes: None,
        semi: Some(options),
    }
}

fn always() -> StyleConfig {
    semi(SemiOptions::default())
}

fn never() -> StyleConfig {
    never_with(ContinuationChars::Any)
}

fn never_with(before_statement_continuation_chars: ContinuationChars) -> StyleConfig {
    semi(SemiOptions {
        mode: SemiMode::Never,
        before_statement_continuation_chars,
        ..SemiOptions::default()
    })
}

#[test]
fn test_always_valid() {
    for source in [
        "var x = 5;",
        "var x =5, y;",
        "foo();",
        "x = foo();",
        "setTimeout(function() {foo = \"bar\"; });",
        "for (var a in b){}",
        "for (var i;;){}",
        "if (true) {}\n;[global, extended].forEach(function(){});",
        "throw new Error('foo');",
        "debugger;",
        "do{}while(true);",
        "label: for (;;) { break label; }",
        "class C { foo() {} }",
        "class C { static {} }",
        "class C { static { foo(); } }",
        "class C { foo; }",
        "import a from 'a';",
        "export * from 'foo';",
        "export function foo () { }",
        "export default class { }",
        "export default foo || bar;",
    ] {
        assert!(lint_with(source, &always()).is_empty(), "{source}");
    }
}

#[test]
fn test_always_inserts_missing_semicolons() {
    let cases = [
        ("throw new Error('foo')", "throw new Error('foo');"),
        ("function foo() { return [] }", "function foo() { return []; }"),
        ("while(true) { break }", "while(true) { break; }"),
        ("var x = 5\nfoo()", "var x = 5;\nfoo();"),
        ("do{}while(true)", "do{}while(true);"),
        ("import a from 'a'", "import a from 'a';"),
        ("export default foo || bar", "export default foo || bar;"),
        ("var foo = () => {}", "var foo = () => {};"),
        ("class C { foo }", "class C { foo; }"),
        ("class C { foo = 1\nbar = 2 }", "class C { foo = 1;\nbar = 2; }"),
        ("class C { static { foo() } }", "class C { static { foo(); } }"),
    ];
    for (source, expected) in cases {
        assert_eq!(fix_with(source, &always()), expected, "{source}");
    }
}

#[test]
fn test_missing_semicolon_is_reported_after_the_last_token() {
    let diagnostics = lint_with("let a = 1 // comment\nb()", &always());
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].message_id, MessageId::MissingSemi);
    assert_eq!((diagnostics[0].line, diagnostics[0].col), (1, 10));
    assert_eq!(diagnostics[0].start_byte, diagnostics[0].end_byte);
}

#[test]
fn test_never_valid() {
    for source in [
        "throw new Error('foo')",
        "var x = 5",
        "foo()",
        "debugger",
        "if (true) {}\n;[global, extended].forEach(function(){})",
        "(function bar() {})\n;(function foo(){})",
        ";/foo/.test('bar')",
        ";+5",
        "a++\nb++",
        "a++; b++",
        "var a = b;\n(function(){})()",
        "var a = b;\n[1, 2].forEach(f)",
        "var a = b;\n+ c",
        "var a = b;\n/foo/.test(c)",
        "var a = b;\n`foo`",
        "class C { static { foo(); bar() } }",
        "class C { foo() {}; }",
        "class C { static {}; }",
        "class C { get;\nfoo() {} }",
        "class C { set;\nfoo() {} }",
        "class C { static;\nfoo() {} }",
        "class C { a=b;\n*foo() {} }",
    ] {
        assert!(lint_with(source, &never()).is_empty(), "{source}");
    }
}

#[test]
fn test_never_removes_extra_semicolons() {
    let cases = [
        ("throw new Error('foo');", "throw new Error('foo')"),
        ("function foo() { return []; }", "function foo() { return [] }"),
        ("var x = 5;\nfoo();", "var x = 5\nfoo()"),
        ("import a from 'a';", "import a from 'a'"),
        ("class C { foo; }", "class C { foo }"),
        ("class C { static static;\nfoo() {} }", "class C { static static\nfoo() {} }"),
        ("class C { static { foo(); } }", "class C { static { foo() } }"),
    ];
    for (source, expected) in cases {
        let diagnostics = lint_with(source, &never());
        assert!(
            diagnostics.iter().all(|d| d.message_id == MessageId::ExtraSemi),
            "{source}"
        );
        assert_eq!(fix_with(source, &never()), expected, "{source}");
    }
}

#[test]
fn test_continuation_chars_always_inserts_before_hazards() {
    let config = never_with(ContinuationChars::Always);
    let cases = [
        ("foo()\n;[1,2,3].forEach(x)", 0),
        ("var a = b\n;(function(){})()", 0),
        ("foo()\nbar()", 0),
        ("do {} while (a)\n;[x].forEach(f)", 0),
    ];
    for (source, expected) in cases {
        assert_eq!(lint_with(source, &config).len(), expected, "{source}");
    }
    assert_eq!(
        fix_with("import a from 'a'\n(function(){})()", &config),
        "import a from 'a';\n(function(){})()"
    );
}

#[test]
fn test_continuation_chars_never_removes_redundant_markers() {
    let config = never_with(ContinuationChars::Never);
    assert_eq!(
        fix_with("import a from \"a\";\n(function(){})()", &config),
        "import a from \"a\"\n(function(){})()"
    );
    assert_eq!(
        fix_with("do {} while (a);\n[1].forEach(f)", &config),
        "do {} while (a)\n[1].forEach(f)"
    );
    assert_eq!(
        fix_with("function f() { return;\n(a) }", &config),
        "function f() { return\n(a) }"
    );
    assert!(lint_with("var a = b;\n(c)", &config).is_empty());
    assert!(lint_with("var f = () => a;\n[b]", &config).is_empty());
    assert_eq!(
        fix_with("var f = () => {};\n[b]", &config),
        "var f = () => {}\n[b]"
    );
}

#[test]
fn test_omit_last_in_one_line_block() {
    let config = semi(SemiOptions {
        omit_last_in_one_line_block: true,
        ..SemiOptions::default()
    });
    assert_eq!(fix_with("if (foo) { bar(); }", &config), "if (foo) { bar() }");
    assert_eq!(
        fix_with("function f() { a(); b(); }", &config),
        "function f() { a(); b() }"
    );
    assert!(lint_with("if (foo) { bar() }", &config).is_empty());
    assert!(lint_with("if (foo) {\n bar();\n}", &config).is_empty());
    assert_eq!(
        fix_with("if (foo) {\n bar()\n}", &config),
        "if (foo) {\n bar();\n}"
    );
    assert!(lint_with("class C { static { foo() } }", &config).is_empty());
    assert_eq!(lint_with("class C { foo }", &config).len(), 1);
}

#[test]
fn test_omit_last_in_one_line_class_body() {
    let config = semi(SemiOptions {
        omit_last_in_one_line_class_body: true,
        ..SemiOptions::default()
    });
    assert_eq!(
        fix_with("class C { a = 1; b = 2; }", &config),
        "class C { a = 1; b = 2 }"
    );
    assert!(lint_with("class C {\n a = 1;\n}", &config).is_empty());
    assert_eq!(lint_with("if (foo) { bar() }", &config).len(), 1);
}

#[test]
fn test_string_statements_outside_prologue_follow_the_rule() {
    assert_eq!(
        fix_with("foo()\n'use strict'", &always()),
        "foo();\n'use strict';"
    );
    assert_eq!(fix_with("'use strict'\nfoo()", &always()), "'use strict';\nfoo();");
}
