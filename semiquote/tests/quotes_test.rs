//! Tests for the `quotes` rule.
#![allow(clippy::unwrap_used)]

use semiquote::config::{AllowTemplateLiterals, QuoteOptions, QuoteStyle, StyleConfig};
use semiquote::rules::MessageId;
use semiquote::test_utils::{fix_with, lint_with};

fn quotes(style: QuoteStyle) -> StyleConfig {
    quotes_with(QuoteOptions {
        style,
        ..QuoteOptions::default()
    })
}

fn quotes_with(options: QuoteOptions) -> StyleConfig {
    StyleConfig {
        quotes: Some(options),
        semi: None,
    }
}

#[test]
fn test_valid_literals() {
    let cases = [
        ("var foo = \"bar\";", QuoteStyle::Double),
        ("var foo = 'bar';", QuoteStyle::Single),
        ("var foo = 1;", QuoteStyle::Single),
        ("var foo = `bar`;", QuoteStyle::Backtick),
        ("var foo = `back\ntick`;", QuoteStyle::Single),
        ("var foo = `back\rtick`;", QuoteStyle::Double),
        ("var foo = `back\u{2028}tick`;", QuoteStyle::Double),
        ("var foo = `back${x}tick`;", QuoteStyle::Double),
        ("var foo = tag`backtick`;", QuoteStyle::Double),
    ];
    for (source, style) in cases {
        assert!(lint_with(source, &quotes(style)).is_empty(), "{source}");
    }
}

#[test]
fn test_wrong_quotes_are_fixed() {
    let cases = [
        ("var foo = 'bar';", QuoteStyle::Double, "var foo = \"bar\";"),
        ("var foo = \"bar\";", QuoteStyle::Single, "var foo = 'bar';"),
        ("var foo = `bar`;", QuoteStyle::Single, "var foo = 'bar';"),
        ("var foo = 'don\\'t';", QuoteStyle::Double, "var foo = \"don't\";"),
        ("var foo = \"bar\";", QuoteStyle::Backtick, "var foo = `bar`;"),
        ("var foo = 'b${x}a$r';", QuoteStyle::Backtick, "var foo = `b\\${x}a$r`;"),
        ("var foo = `\"`;", QuoteStyle::Double, "var foo = \"\\\"\";"),
    ];
    for (source, style, expected) in cases {
        assert_eq!(fix_with(source, &quotes(style)), expected, "{source}");
    }
}

#[test]
fn test_diagnostic_carries_style_description() {
    let diagnostics = lint_with("var foo = \"bar\";", &quotes(QuoteStyle::Backtick));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message_id, MessageId::WrongQuotes);
    assert_eq!(diagnostics[0].description, Some("backtick"));
    assert_eq!(diagnostics[0].message, "Strings must use backtick.");

    let diagnostics = lint_with("var foo = \"bar\";", &quotes(QuoteStyle::Single));
    assert_eq!(diagnostics[0].message, "Strings must use singlequote.");
}

#[test]
fn test_avoid_escape() {
    let config = quotes_with(QuoteOptions {
        style: QuoteStyle::Single,
        avoid_escape: true,
        ..QuoteOptions::default()
    });
    assert!(lint_with("var foo = \"don't\";", &config).is_empty());
    assert_eq!(lint_with("var foo = \"bar\";", &config).len(), 1);

    let config = quotes_with(QuoteOptions {
        style: QuoteStyle::Double,
        avoid_escape: true,
        ..QuoteOptions::default()
    });
    assert!(lint_with("var foo = 'a string containing \"double\" quotes';", &config).is_empty());
}

#[test]
fn test_allow_template_literals() {
    let always = quotes_with(QuoteOptions {
        style: QuoteStyle::Double,
        allow_template_literals: AllowTemplateLiterals::Always,
        ..QuoteOptions::default()
    });
    assert!(lint_with("var foo = `bar`;", &always).is_empty());
    assert_eq!(lint_with("var foo = 'bar';", &always).len(), 1);

    let avoid = quotes_with(QuoteOptions {
        style: QuoteStyle::Single,
        allow_template_literals: AllowTemplateLiterals::AvoidEscape,
        ..QuoteOptions::default()
    });
    assert!(lint_with("var foo = `don't`;", &avoid).is_empty());
    assert_eq!(lint_with("var foo = `bar`;", &avoid).len(), 1);
}

#[test]
fn test_backtick_exemptions() {
    let config = quotes(QuoteStyle::Backtick);
    let exempt = [
        "\"use strict\"; var foo = `backtick`;",
        "\"use strict\"; 'use strong'; \"use asm\"; var foo = `backtick`;",
        "function foo() { \"use strict\"; \"use strong\"; var foo = `backtick`; }",
        "(function() { 'use strict'; var foo = `backtick`; })();",
        "(() => { \"use strict\"; var foo = `backtick`; })();",
        "function a() { function b() { 'use strict'; } }",
        "import \"a\"; import 'b';",
        "import a from \"a\"; import b from 'b';",
        "export * from \"a\"; export * from 'b';",
        "import { \"a\" as b, 'c' as d } from 'mod';",
        "var obj = {\"key0\": 0, 'key1': 1};",
        "class Foo { 'bar'(){} }",
        "class C { \"x\" = 1; static 'y' = 2 }",
    ];
    for source in exempt {
        assert!(lint_with(source, &config).is_empty(), "{source}");
    }
}

#[test]
fn test_backtick_checks_non_directive_strings() {
    let config = quotes(QuoteStyle::Backtick);
    assert_eq!(
        fix_with("var foo = `backtick`; \"use strict\";", &config),
        "var foo = `backtick`; `use strict`;"
    );
    assert_eq!(
        fix_with("{ \"use strict\"; var foo = `backtick`; }", &config),
        "{ `use strict`; var foo = `backtick`; }"
    );
    assert_eq!(
        fix_with("var obj = {[\"key\"]: 0};", &config),
        "var obj = {[`key`]: 0};"
    );
}

#[test]
fn test_octal_escape_into_backtick_is_reported_without_fix() {
    let config = quotes(QuoteStyle::Backtick);
    let diagnostics = lint_with("var foo = '\\1';", &config);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].fix.is_none());
    assert_eq!(fix_with("var foo = '\\1';", &config), "var foo = '\\1';");
    assert_eq!(fix_with("var foo = '\\0';", &config), "var foo = `\\0`;");
}

#[test]
fn test_template_statement_that_could_become_a_directive() {
    let config = quotes(QuoteStyle::Double);
    for source in [
        "`use strict`;",
        "function foo() { `use strict`; foo(); }",
        "() => { foo(); `use strict`; }",
        "foo(); `use strict`;",
    ] {
        let diagnostics = lint_with(source, &config);
        assert_eq!(diagnostics.len(), 1, "{source}");
        assert!(diagnostics[0].fix.is_none(), "{source}");
    }
    assert_eq!(
        fix_with("() => { foo(); (`use strict`); }", &config),
        "() => { foo(); (\"use strict\"); }"
    );
}

#[test]
fn test_ignore_string_literals() {
    let config = quotes_with(QuoteOptions {
        style: QuoteStyle::Single,
        ignore_string_literals: true,
        ..QuoteOptions::default()
    });
    assert!(lint_with("var foo = \"bar\";", &config).is_empty());
    assert_eq!(fix_with("var foo = `bar`;", &config), "var foo = 'bar';");
}
