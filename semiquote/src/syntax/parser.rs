//! Recursive-descent parser for scripts and modules.
//!
//! Automatic semicolon insertion is applied where the grammar allows it and
//! every statement and class member remembers its first and last token, so
//! the rules can tell whether the construct ended with an explicit `;`.

use super::ast::{
    Arrow, ArrowBody, Block, CatchClause, Class, ClassBody, ClassMember, ClassMemberKind,
    Declarator, ExportAll, ExportDefault, ExportNamed, Expr, ExprKind, ForHead, Function,
    ImportAttribute, ImportDecl, MemberProperty, ModuleExportName, Program, Property, PropertyKey,
    Specifier, Stmt, StmtKind, StringLit, SwitchCase, TemplateLit, TokenSpan, VarDecl, VarKind,
};
use super::error::SyntaxError;
use super::lexer::{to_size, LexMode, TokenBuffer};
use super::prologue;
use super::token::{Token, TokenKind};
use rustc_hash::FxHashSet;
use text_size::{TextRange, TextSize};

/// Recursion bound for nested statements and expressions.
pub const MAX_NESTING_DEPTH: usize = 256;

const ASSIGNMENT_OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "<<=", ">>=", ">>>=", "&=", "|=", "^=", "&&=", "||=",
    "??=",
];

/// Everything a rule needs about one file.
#[derive(Debug)]
pub struct ParsedSource<'a> {
    /// Original text.
    pub source: &'a str,
    /// All tokens, comments included, in source order.
    pub tokens: Vec<Token<'a>>,
    /// Statement tree.
    pub program: Program,
    /// Token indices of the `}` closing an arrow function's block body.
    pub arrow_body_ends: FxHashSet<usize>,
}

/// Tokenizes and parses `source`.
///
/// # Errors
///
/// Returns the first [`SyntaxError`] met; no partial tree is produced.
pub fn parse(source: &str) -> Result<ParsedSource<'_>, SyntaxError> {
    let mut parser = Parser::new(TokenBuffer::lex(source)?, source.len());
    let program = parser.parse_program()?;
    Ok(ParsedSource {
        source,
        tokens: parser.lexed.tokens,
        program,
        arrow_body_ends: parser.arrow_body_ends,
    })
}

fn significant_from<'a>(tokens: &'a [Token<'_>], from: usize) -> impl Iterator<Item = usize> + 'a {
    tokens
        .iter()
        .enumerate()
        .skip(from)
        .filter(|(_, t)| !t.kind.is_trivia())
        .map(|(i, _)| i)
}

fn binary_precedence(token: Token<'_>, no_in: bool) -> Option<u8> {
    match token.kind {
        TokenKind::Punctuator => match token.text {
            "??" => Some(1),
            "||" => Some(2),
            "&&" => Some(3),
            "|" => Some(4),
            "^" => Some(5),
            "&" => Some(6),
            "==" | "!=" | "===" | "!==" => Some(7),
            "<" | ">" | "<=" | ">=" => Some(8),
            "<<" | ">>" | ">>>" => Some(9),
            "+" | "-" => Some(10),
            "*" | "/" | "%" => Some(11),
            "**" => Some(12),
            _ => None,
        },
        TokenKind::Identifier => match token.text {
            "instanceof" => Some(8),
            "in" if !no_in => Some(8),
            _ => None,
        },
        _ => None,
    }
}

/// Strips `lead` and `trail` bytes of delimiter from a template piece.
fn template_chunk(range: TextRange, lead: u32, trail: u32) -> TextRange {
    TextRange::new(
        range.start() + TextSize::from(lead),
        range.end() - TextSize::from(trail),
    )
}

struct Parser<'a> {
    lexed: TokenBuffer<'a>,
    /// Indices of non-trivia tokens.
    significant: Vec<usize>,
    pos: usize,
    source_len: usize,
    depth: usize,
    in_generator: bool,
    arrow_body_ends: FxHashSet<usize>,
}

impl<'a> Parser<'a> {
    fn new(lexed: TokenBuffer<'a>, source_len: usize) -> Self {
        let significant = significant_from(&lexed.tokens, 0).collect();
        Self {
            lexed,
            significant,
            pos: 0,
            source_len,
            depth: 0,
            in_generator: false,
            arrow_body_ends: FxHashSet::default(),
        }
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(SyntaxError::NestingTooDeep {
                offset: self.peek().map_or(self.source_len, |t| t.start()),
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Reads the current token again in `mode`, along with everything after it.
    fn relex(&mut self, mode: LexMode) {
        let Some(&index) = self.significant.get(self.pos) else {
            return;
        };
        if self.lexed.relex(index, mode) {
            self.significant.truncate(self.pos);
            self.significant
                .extend(significant_from(&self.lexed.tokens, index));
        }
    }

    // ----- cursor -----

    fn peek(&self) -> Option<Token<'a>> {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Option<Token<'a>> {
        self.significant
            .get(self.pos + n)
            .map(|&index| self.lexed.tokens[index])
    }

    fn at(&self, text: &str) -> bool {
        self.at_nth(0, text)
    }

    fn at_nth(&self, n: usize, text: &str) -> bool {
        self.peek_at(n).is_some_and(|t| {
            matches!(t.kind, TokenKind::Punctuator | TokenKind::Identifier) && t.text == text
        })
    }

    fn at_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn newline_before_nth(&self, n: usize) -> bool {
        self.peek_at(n).is_some_and(|t| t.newline_before)
    }

    /// Current token index, or the token count at the end of input.
    fn index(&self) -> usize {
        self.significant
            .get(self.pos)
            .copied()
            .unwrap_or(self.lexed.tokens.len())
    }

    /// Index of the last consumed token.
    fn prev_index(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|p| self.significant.get(p))
            .copied()
            .unwrap_or(0)
    }

    fn bump(&mut self) -> usize {
        let index = self.index();
        self.pos += 1;
        index
    }

    fn eat(&mut self, text: &str) -> bool {
        if self.at(text) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, text: &'static str) -> Result<usize, SyntaxError> {
        if self.at(text) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(text))
        }
    }

    /// True at `close`; errors at the end of input so list loops terminate.
    fn at_close(&self, close: &'static str) -> Result<bool, SyntaxError> {
        match self.peek() {
            Some(token) => Ok(token.is_punct(close)),
            None => Err(self.end_of_input(close)),
        }
    }

    fn unexpected(&self, expected: &'static str) -> SyntaxError {
        match self.peek() {
            Some(token) => SyntaxError::UnexpectedToken {
                found: token.text.to_owned(),
                offset: token.start(),
                expected,
            },
            None => self.end_of_input(expected),
        }
    }

    /// Error for input that stops early. A lexer error that cut the token
    /// list short takes precedence.
    fn end_of_input(&self, expected: &'static str) -> SyntaxError {
        self.lexed
            .error
            .clone()
            .unwrap_or(SyntaxError::UnexpectedEnd {
                expected,
                offset: self.source_len,
            })
    }

    fn start(&self) -> Result<TextSize, SyntaxError> {
        self.peek()
            .map(|t| t.range.start())
            .ok_or_else(|| self.end_of_input("more input"))
    }

    fn finish(&self, start: TextSize) -> TextRange {
        let end = self.lexed.tokens[self.prev_index()].range.end().max(start);
        TextRange::new(start, end)
    }

    /// Accepts an explicit `;` or an automatically inserted one.
    fn consume_semicolon(&mut self) -> Result<(), SyntaxError> {
        if self.eat(";") {
            return Ok(());
        }
        match self.peek() {
            None => Ok(()),
            Some(token) if token.is_punct("}") || token.newline_before => Ok(()),
            Some(_) => Err(self.unexpected("`;`")),
        }
    }

    // ----- statements -----

    fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        let mut body = Vec::new();
        while self.peek().is_some() {
            body.push(self.parse_statement()?);
        }
        if let Some(error) = self.lexed.error.take() {
            return Err(error);
        }
        prologue::mark_body(&mut body);
        Ok(Program {
            body,
            range: TextRange::up_to(to_size(self.source_len)),
        })
    }

    fn parse_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.nested(Self::parse_statement_node)
    }

    fn parse_statement_node(&mut self) -> Result<Stmt, SyntaxError> {
        let first = self.index();
        let start = self.start()?;
        let kind = self.parse_statement_kind()?;
        Ok(Stmt {
            kind,
            range: self.finish(start),
            tokens: TokenSpan {
                first,
                last: self.prev_index(),
            },
            directive: false,
            body_level: false,
        })
    }

    fn parse_statement_kind(&mut self) -> Result<StmtKind, SyntaxError> {
        let Some(token) = self.peek() else {
            return Err(self.end_of_input("statement"));
        };
        match token.kind {
            TokenKind::Punctuator if token.text == "{" => Ok(StmtKind::Block(self.parse_block()?)),
            TokenKind::Punctuator if token.text == ";" => {
                self.bump();
                Ok(StmtKind::Empty)
            }
            TokenKind::Identifier => self.parse_keyword_statement(token.text),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_keyword_statement(&mut self, word: &str) -> Result<StmtKind, SyntaxError> {
        match word {
            "var" | "const" => self.parse_var_statement(),
            "let" if self.let_starts_declaration() => self.parse_var_statement(),
            "function" => Ok(StmtKind::Function(Box::new(self.parse_function()?))),
            "async" if self.at_nth(1, "function") && !self.newline_before_nth(1) => {
                Ok(StmtKind::Function(Box::new(self.parse_function()?)))
            }
            "class" => Ok(StmtKind::Class(Box::new(self.parse_class()?))),
            "if" => self.parse_if(),
            "for" => self.parse_for(),
            "while" => {
                self.bump();
                let test = self.parse_paren_expression()?;
                let body = Box::new(self.parse_statement()?);
                Ok(StmtKind::While { test, body })
            }
            "do" => self.parse_do_while(),
            "return" => {
                self.bump();
                let argument = if self.can_start_argument() {
                    Some(self.parse_expression(false)?)
                } else {
                    None
                };
                self.consume_semicolon()?;
                Ok(StmtKind::Return(argument))
            }
            "break" | "continue" => {
                self.bump();
                if self.at_kind(TokenKind::Identifier) && !self.newline_before_nth(0) {
                    self.bump();
                }
                self.consume_semicolon()?;
                Ok(if word == "break" {
                    StmtKind::Break
                } else {
                    StmtKind::Continue
                })
            }
            "throw" => {
                self.bump();
                let argument = self.parse_expression(false)?;
                self.consume_semicolon()?;
                Ok(StmtKind::Throw(argument))
            }
            "debugger" => {
                self.bump();
                self.consume_semicolon()?;
                Ok(StmtKind::Debugger)
            }
            "try" => self.parse_try(),
            "switch" => self.parse_switch(),
            "with" => {
                self.bump();
                let object = self.parse_paren_expression()?;
                let body = Box::new(self.parse_statement()?);
                Ok(StmtKind::With { object, body })
            }
            "import" if !(self.at_nth(1, "(") || self.at_nth(1, ".")) => self.parse_import(),
            "export" => self.parse_export(),
            _ if self.at_nth(1, ":") => {
                self.bump();
                self.bump();
                Ok(StmtKind::Labeled(Box::new(self.parse_statement()?)))
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) -> Result<StmtKind, SyntaxError> {
        let expr = self.parse_expression(false)?;
        self.consume_semicolon()?;
        Ok(StmtKind::Expression(expr))
    }

    fn can_start_argument(&self) -> bool {
        self.peek().is_some_and(|t| {
            !t.newline_before && !t.is_punct(";") && !t.is_punct("}")
        })
    }

    fn let_starts_declaration(&self) -> bool {
        self.peek_at(1).is_some_and(|t| {
            (t.kind == TokenKind::Identifier && !matches!(t.text, "in" | "instanceof" | "of"))
                || t.is_punct("[")
                || t.is_punct("{")
        })
    }

    fn parse_var_statement(&mut self) -> Result<StmtKind, SyntaxError> {
        let decl = self.parse_var_decl(false)?;
        self.consume_semicolon()?;
        Ok(StmtKind::Var(decl))
    }

    fn parse_var_decl(&mut self, no_in: bool) -> Result<VarDecl, SyntaxError> {
        let kind = match self.peek().map(|t| t.text) {
            Some("var") => VarKind::Var,
            Some("let") => VarKind::Let,
            _ => VarKind::Const,
        };
        self.bump();
        let mut declarators = Vec::new();
        loop {
            let target = self.parse_binding_target()?;
            let init = if self.eat("=") {
                Some(self.parse_assignment(no_in)?)
            } else {
                None
            };
            declarators.push(Declarator { target, init });
            if !self.eat(",") {
                break;
            }
        }
        Ok(VarDecl { kind, declarators })
    }

    fn parse_binding_target(&mut self) -> Result<Expr, SyntaxError> {
        if self.at("[") || self.at("{") {
            self.parse_primary()
        } else {
            self.parse_identifier()
        }
    }

    fn parse_block(&mut self) -> Result<Block, SyntaxError> {
        let start = self.start()?;
        self.expect("{")?;
        let mut body = Vec::new();
        while !self.at_close("}")? {
            body.push(self.parse_statement()?);
        }
        self.bump();
        Ok(Block {
            body,
            range: self.finish(start),
        })
    }

    fn parse_paren_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.expect("(")?;
        let expr = self.parse_expression(false)?;
        self.expect(")")?;
        Ok(expr)
    }

    fn parse_if(&mut self) -> Result<StmtKind, SyntaxError> {
        self.bump();
        let test = self.parse_paren_expression()?;
        let consequent = Box::new(self.parse_statement()?);
        let alternate = if self.eat("else") {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(StmtKind::If {
            test,
            consequent,
            alternate,
        })
    }

    fn parse_for(&mut self) -> Result<StmtKind, SyntaxError> {
        self.bump();
        self.eat("await");
        self.expect("(")?;
        let init = if self.at(";") {
            None
        } else if self.at("var") || self.at("const") || (self.at("let") && self.let_starts_declaration())
        {
            Some(ForHead::Var(self.parse_var_decl(true)?))
        } else {
            Some(ForHead::Expr(self.parse_expression(true)?))
        };

        if let Some(left) = init {
            if self.at("in") || self.at("of") {
                let is_of = self.at("of");
                self.bump();
                let right = if is_of {
                    self.parse_assignment(false)?
                } else {
                    self.parse_expression(false)?
                };
                self.expect(")")?;
                let body = Box::new(self.parse_statement()?);
                return Ok(StmtKind::ForInOf { left, right, body });
            }
            return self.parse_for_rest(Some(left));
        }
        self.parse_for_rest(None)
    }

    fn parse_for_rest(&mut self, init: Option<ForHead>) -> Result<StmtKind, SyntaxError> {
        self.expect(";")?;
        let test = if self.at(";") {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect(";")?;
        let update = if self.at(")") {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect(")")?;
        let body = Box::new(self.parse_statement()?);
        Ok(StmtKind::For {
            init,
            test,
            update,
            body,
        })
    }

    fn parse_do_while(&mut self) -> Result<StmtKind, SyntaxError> {
        self.bump();
        let body = Box::new(self.parse_statement()?);
        self.expect("while")?;
        let test = self.parse_paren_expression()?;
        // A `;` after `do-while` is always optional.
        self.eat(";");
        Ok(StmtKind::DoWhile { body, test })
    }

    fn parse_try(&mut self) -> Result<StmtKind, SyntaxError> {
        self.bump();
        let block = self.parse_block()?;
        let handler = if self.eat("catch") {
            let param = if self.eat("(") {
                let param = self.parse_binding_target()?;
                self.expect(")")?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause { param, body })
        } else {
            None
        };
        let finalizer = if self.eat("finally") {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(StmtKind::Try {
            block,
            handler,
            finalizer,
        })
    }

    fn parse_switch(&mut self) -> Result<StmtKind, SyntaxError> {
        self.bump();
        let discriminant = self.parse_paren_expression()?;
        self.expect("{")?;
        let mut cases = Vec::new();
        while !self.at_close("}")? {
            let test = if self.eat("case") {
                Some(self.parse_expression(false)?)
            } else {
                self.expect("default")?;
                None
            };
            self.expect(":")?;
            let mut body = Vec::new();
            while !(self.at("case") || self.at("default") || self.at_close("}")?) {
                body.push(self.parse_statement()?);
            }
            cases.push(SwitchCase { test, body });
        }
        self.bump();
        Ok(StmtKind::Switch {
            discriminant,
            cases,
        })
    }

    // ----- modules -----

    fn parse_import(&mut self) -> Result<StmtKind, SyntaxError> {
        self.bump();
        let mut specifiers = Vec::new();
        if !self.at_kind(TokenKind::String) {
            if self.at_kind(TokenKind::Identifier) {
                self.bump();
                if self.eat(",") {
                    specifiers = self.parse_import_clause_rest()?;
                }
            } else {
                specifiers = self.parse_import_clause_rest()?;
            }
            self.expect("from")?;
        }
        let source = self.parse_module_source()?;
        let attributes = self.parse_import_attributes()?;
        self.consume_semicolon()?;
        Ok(StmtKind::Import(ImportDecl {
            specifiers,
            source,
            attributes,
        }))
    }

    fn parse_import_clause_rest(&mut self) -> Result<Vec<Specifier>, SyntaxError> {
        if self.eat("*") {
            self.expect("as")?;
            self.parse_identifier()?;
            Ok(Vec::new())
        } else {
            self.parse_specifiers()
        }
    }

    fn parse_specifiers(&mut self) -> Result<Vec<Specifier>, SyntaxError> {
        self.expect("{")?;
        let mut specifiers = Vec::new();
        while !self.at_close("}")? {
            let name = self.parse_module_export_name()?;
            let alias = if self.eat("as") {
                Some(self.parse_module_export_name()?)
            } else {
                None
            };
            specifiers.push(Specifier { name, alias });
            if !self.eat(",") {
                break;
            }
        }
        self.expect("}")?;
        Ok(specifiers)
    }

    fn parse_module_export_name(&mut self) -> Result<ModuleExportName, SyntaxError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::String => {
                self.bump();
                Ok(ModuleExportName::String(StringLit { range: token.range }))
            }
            Some(token) if token.kind == TokenKind::Identifier => {
                self.bump();
                Ok(ModuleExportName::Identifier(token.range))
            }
            _ => Err(self.unexpected("module export name")),
        }
    }

    fn parse_module_source(&mut self) -> Result<StringLit, SyntaxError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::String => {
                self.bump();
                Ok(StringLit { range: token.range })
            }
            _ => Err(self.unexpected("module specifier")),
        }
    }

    fn parse_import_attributes(&mut self) -> Result<Vec<ImportAttribute>, SyntaxError> {
        let introduced =
            self.at("with") || (self.at("assert") && !self.newline_before_nth(0));
        if !introduced {
            return Ok(Vec::new());
        }
        self.bump();
        self.expect("{")?;
        let mut attributes = Vec::new();
        while !self.at_close("}")? {
            let key = self.parse_module_export_name()?;
            self.expect(":")?;
            let value = self.parse_module_source()?;
            attributes.push(ImportAttribute { key, value });
            if !self.eat(",") {
                break;
            }
        }
        self.expect("}")?;
        Ok(attributes)
    }

    fn parse_export(&mut self) -> Result<StmtKind, SyntaxError> {
        self.bump();
        if self.eat("*") {
            let exported = if self.eat("as") {
                Some(self.parse_module_export_name()?)
            } else {
                None
            };
            self.expect("from")?;
            let source = self.parse_module_source()?;
            let attributes = self.parse_import_attributes()?;
            self.consume_semicolon()?;
            return Ok(StmtKind::ExportAll(ExportAll {
                exported,
                source,
                attributes,
            }));
        }

        if self.eat("default") {
            let is_declaration = self.at("function")
                || self.at("class")
                || (self.at("async") && self.at_nth(1, "function") && !self.newline_before_nth(1));
            if is_declaration {
                let declaration = self.parse_statement()?;
                return Ok(StmtKind::ExportDefault(ExportDefault::Declaration(Box::new(
                    declaration,
                ))));
            }
            let expr = self.parse_assignment(false)?;
            self.consume_semicolon()?;
            return Ok(StmtKind::ExportDefault(ExportDefault::Expression(expr)));
        }

        if self.at("{") {
            let specifiers = self.parse_specifiers()?;
            let (source, attributes) = if self.eat("from") {
                let source = self.parse_module_source()?;
                (Some(source), self.parse_import_attributes()?)
            } else {
                (None, Vec::new())
            };
            self.consume_semicolon()?;
            return Ok(StmtKind::ExportNamed(ExportNamed {
                declaration: None,
                specifiers,
                source,
                attributes,
            }));
        }

        let declaration = self.parse_statement()?;
        Ok(StmtKind::ExportNamed(ExportNamed {
            declaration: Some(Box::new(declaration)),
            specifiers: Vec::new(),
            source: None,
            attributes: Vec::new(),
        }))
    }

    // ----- functions and classes -----

    fn parse_function(&mut self) -> Result<Function, SyntaxError> {
        let is_async = self.eat("async");
        self.expect("function")?;
        let is_generator = self.eat("*");
        if !self.at("(") {
            self.parse_identifier()?;
        }
        self.parse_function_rest(is_async, is_generator)
    }

    /// Parameters and body, shared by functions and methods.
    fn parse_function_rest(
        &mut self,
        is_async: bool,
        is_generator: bool,
    ) -> Result<Function, SyntaxError> {
        let params = self.parse_params()?;
        let body = self.parse_function_body(is_generator)?;
        Ok(Function {
            params,
            body,
            is_async,
            is_generator,
        })
    }

    fn parse_params(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        self.expect("(")?;
        let mut params = Vec::new();
        while !self.at_close(")")? {
            params.push(self.parse_spread_or_assignment()?);
            if !self.eat(",") {
                break;
            }
        }
        self.expect(")")?;
        Ok(params)
    }

    fn parse_function_body(&mut self, is_generator: bool) -> Result<Block, SyntaxError> {
        let saved = std::mem::replace(&mut self.in_generator, is_generator);
        let block = self.parse_block();
        self.in_generator = saved;
        let mut block = block?;
        prologue::mark_body(&mut block.body);
        Ok(block)
    }

    fn parse_class(&mut self) -> Result<Class, SyntaxError> {
        self.expect("class")?;
        if self.at_kind(TokenKind::Identifier) && !self.at("extends") {
            self.bump();
        }
        let super_class = if self.eat("extends") {
            Some(self.nested(Self::parse_lhs)?)
        } else {
            None
        };
        let body = self.parse_class_body()?;
        Ok(Class { super_class, body })
    }

    fn parse_class_body(&mut self) -> Result<ClassBody, SyntaxError> {
        let start = self.start()?;
        self.expect("{")?;
        let mut members = Vec::new();
        while !self.at_close("}")? {
            members.push(self.parse_class_member()?);
        }
        self.bump();
        Ok(ClassBody {
            members,
            range: self.finish(start),
        })
    }

    /// True when the token `n` ahead ends a member name, so a preceding
    /// `static`/`get`/`set`/`async` is the name itself rather than a modifier.
    fn name_ends_at(&self, n: usize) -> bool {
        self.peek_at(n).is_none_or(|t| {
            t.kind == TokenKind::Punctuator && matches!(t.text, "(" | "=" | ";" | "}")
        })
    }

    fn parse_class_member(&mut self) -> Result<ClassMember, SyntaxError> {
        let first = self.index();
        let start = self.start()?;

        let (kind, is_static) = if self.eat(";") {
            (ClassMemberKind::Empty, false)
        } else if self.at("static") && self.at_nth(1, "{") {
            self.bump();
            (ClassMemberKind::StaticBlock(self.parse_block()?), true)
        } else {
            let is_static = self.at("static") && !self.name_ends_at(1);
            if is_static {
                self.bump();
            }
            (self.parse_member_definition()?, is_static)
        };

        Ok(ClassMember {
            kind,
            range: self.finish(start),
            tokens: TokenSpan {
                first,
                last: self.prev_index(),
            },
            is_static,
        })
    }

    fn parse_member_definition(&mut self) -> Result<ClassMemberKind, SyntaxError> {
        let is_async = self.at("async") && !self.name_ends_at(1) && !self.newline_before_nth(1);
        if is_async {
            self.bump();
        }
        let is_generator = self.eat("*");
        let is_accessor = !is_async
            && !is_generator
            && (self.at("get") || self.at("set"))
            && !self.name_ends_at(1);
        if is_accessor {
            self.bump();
        }

        let key = self.parse_property_key()?;
        if self.at("(") {
            let function = self.parse_function_rest(is_async, is_generator)?;
            return Ok(ClassMemberKind::Method { key, function });
        }
        if is_async || is_generator || is_accessor {
            return Err(self.unexpected("`(`"));
        }

        let value = if self.eat("=") {
            Some(self.parse_assignment(false)?)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(ClassMemberKind::Field { key, value })
    }

    fn parse_property_key(&mut self) -> Result<PropertyKey, SyntaxError> {
        let Some(token) = self.peek() else {
            return Err(self.end_of_input("property name"));
        };
        let key = match token.kind {
            TokenKind::Identifier => PropertyKey::Identifier(token.range),
            TokenKind::PrivateName => PropertyKey::Private(token.range),
            TokenKind::String => PropertyKey::String(StringLit { range: token.range }),
            TokenKind::Number => PropertyKey::Number(token.range),
            TokenKind::Punctuator if token.text == "[" => {
                self.bump();
                let expr = self.parse_assignment(false)?;
                self.expect("]")?;
                return Ok(PropertyKey::Computed(Box::new(expr)));
            }
            _ => return Err(self.unexpected("property name")),
        };
        self.bump();
        Ok(key)
    }

    // ----- expressions -----

    fn parse_expression(&mut self, no_in: bool) -> Result<Expr, SyntaxError> {
        let start = self.start()?;
        let first = self.parse_assignment(no_in)?;
        if !self.at(",") {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(",") {
            items.push(self.parse_assignment(no_in)?);
        }
        Ok(Expr {
            kind: ExprKind::Sequence(items),
            range: self.finish(start),
        })
    }

    fn parse_assignment(&mut self, no_in: bool) -> Result<Expr, SyntaxError> {
        self.nested(|p| p.parse_assignment_node(no_in))
    }

    fn parse_assignment_node(&mut self, no_in: bool) -> Result<Expr, SyntaxError> {
        if let Some(arrow) = self.try_parse_arrow(no_in)? {
            return Ok(arrow);
        }
        if self.in_generator && self.at("yield") {
            return self.parse_yield(no_in);
        }
        let start = self.start()?;
        let target = self.parse_conditional(no_in)?;
        let is_assignment = self.peek().is_some_and(|t| {
            t.kind == TokenKind::Punctuator && ASSIGNMENT_OPERATORS.contains(&t.text)
        });
        if !is_assignment {
            return Ok(target);
        }
        self.bump();
        let value = self.parse_assignment(no_in)?;
        Ok(Expr {
            kind: ExprKind::Assign(Box::new(target), Box::new(value)),
            range: self.finish(start),
        })
    }

    fn parse_yield(&mut self, no_in: bool) -> Result<Expr, SyntaxError> {
        let start = self.start()?;
        self.bump();
        let delegate = !self.newline_before_nth(0) && self.eat("*");
        let has_argument = delegate
            || self.peek().is_some_and(|t| {
                !t.newline_before
                    && !(t.kind == TokenKind::Punctuator
                        && matches!(t.text, ")" | "]" | "}" | "," | ";" | ":"))
            });
        let argument = if has_argument {
            Some(Box::new(self.parse_assignment(no_in)?))
        } else {
            None
        };
        Ok(Expr {
            kind: ExprKind::Yield(argument),
            range: self.finish(start),
        })
    }

    /// Looks past a parenthesised list starting at significant position
    /// `open` for a following `=>`.
    fn arrow_after_parens(&self, open: usize) -> bool {
        let mut depth = 0usize;
        for (offset, &index) in self.significant[open..].iter().enumerate() {
            let token = self.lexed.tokens[index];
            if token.kind != TokenKind::Punctuator {
                continue;
            }
            match token.text {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self
                            .significant
                            .get(open + offset + 1)
                            .is_some_and(|&next| self.lexed.tokens[next].is_punct("=>"));
                    }
                }
                _ => {}
            }
        }
        false
    }

    fn arrow_at(&self, n: usize) -> bool {
        match self.peek_at(n) {
            Some(t) if t.kind == TokenKind::Identifier => self.at_nth(n + 1, "=>"),
            Some(t) if t.is_punct("(") => self.arrow_after_parens(self.pos + n),
            _ => false,
        }
    }

    fn try_parse_arrow(&mut self, no_in: bool) -> Result<Option<Expr>, SyntaxError> {
        let is_async = self.at("async") && !self.newline_before_nth(1) && self.arrow_at(1);
        if !is_async && !self.arrow_at(0) {
            return Ok(None);
        }
        let start = self.start()?;
        if is_async {
            self.bump();
        }
        let params = if self.at("(") {
            self.parse_params()?
        } else {
            vec![self.parse_identifier()?]
        };
        self.expect("=>")?;
        let body = if self.at("{") {
            let block = self.parse_function_body(false)?;
            self.arrow_body_ends.insert(self.prev_index());
            ArrowBody::Block(block)
        } else {
            let saved = std::mem::replace(&mut self.in_generator, false);
            let body = self.parse_assignment(no_in);
            self.in_generator = saved;
            ArrowBody::Expr(Box::new(body?))
        };
        Ok(Some(Expr {
            kind: ExprKind::Arrow(Box::new(Arrow {
                params,
                body,
                is_async,
            })),
            range: self.finish(start),
        }))
    }

    fn parse_conditional(&mut self, no_in: bool) -> Result<Expr, SyntaxError> {
        let start = self.start()?;
        let test = self.parse_binary(0, no_in)?;
        if !self.eat("?") {
            return Ok(test);
        }
        let consequent = self.parse_assignment(false)?;
        self.expect(":")?;
        let alternate = self.parse_assignment(no_in)?;
        Ok(Expr {
            kind: ExprKind::Conditional(
                Box::new(test),
                Box::new(consequent),
                Box::new(alternate),
            ),
            range: self.finish(start),
        })
    }

    fn parse_binary(&mut self, min_precedence: u8, no_in: bool) -> Result<Expr, SyntaxError> {
        let start = self.start()?;
        let mut left = self.parse_unary()?;
        loop {
            // After an operand, `/` divides.
            if self.at_kind(TokenKind::Regex) {
                self.relex(LexMode::SlashIsDivision);
            }
            let Some(token) = self.peek() else {
                break;
            };
            let Some(precedence) = binary_precedence(token, no_in) else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            self.bump();
            // `**` is right-associative.
            let next_min = if token.text == "**" {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_binary(next_min, no_in)?;
            left = Expr {
                kind: ExprKind::Binary(Box::new(left), Box::new(right)),
                range: self.finish(start),
            };
        }
        Ok(left)
    }

    fn await_is_operator(&self) -> bool {
        self.peek_at(1).is_some_and(|t| {
            !(t.kind == TokenKind::Punctuator
                && matches!(
                    t.text,
                    ")" | "]" | "}" | "," | ";" | ":" | "=" | "." | "?." | "=>"
                ))
        })
    }

    fn parse_unary(&mut self) -> Result<Expr, SyntaxError> {
        self.nested(Self::parse_unary_node)
    }

    fn parse_unary_node(&mut self) -> Result<Expr, SyntaxError> {
        let start = self.start()?;
        let Some(token) = self.peek() else {
            return Err(self.unexpected("expression"));
        };
        let is_prefix = match token.kind {
            TokenKind::Punctuator => matches!(token.text, "!" | "~" | "+" | "-"),
            TokenKind::Identifier => {
                matches!(token.text, "typeof" | "void" | "delete")
                    || (token.text == "await" && self.await_is_operator())
            }
            _ => false,
        };
        let is_update = token.is_punct("++") || token.is_punct("--");
        if !is_prefix && !is_update {
            return self.parse_postfix();
        }
        self.bump();
        let argument = Box::new(self.parse_unary()?);
        let kind = if is_update {
            ExprKind::Update(argument)
        } else {
            ExprKind::Unary(argument)
        };
        Ok(Expr {
            kind,
            range: self.finish(start),
        })
    }

    fn parse_postfix(&mut self) -> Result<Expr, SyntaxError> {
        let start = self.start()?;
        let expr = self.parse_lhs()?;
        // No line terminator is allowed before a postfix `++`/`--`.
        let is_postfix = self.peek().is_some_and(|t| {
            (t.is_punct("++") || t.is_punct("--")) && !t.newline_before
        });
        if !is_postfix {
            return Ok(expr);
        }
        self.bump();
        Ok(Expr {
            kind: ExprKind::Update(Box::new(expr)),
            range: self.finish(start),
        })
    }

    fn parse_lhs(&mut self) -> Result<Expr, SyntaxError> {
        let start = self.start()?;
        let expr = if self.at("new") {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        self.parse_suffixes(expr, start, true)
    }

    fn parse_new(&mut self) -> Result<Expr, SyntaxError> {
        let start = self.start()?;
        self.bump();
        if self.eat(".") {
            self.parse_identifier()?;
            return Ok(Expr {
                kind: ExprKind::Atom,
                range: self.finish(start),
            });
        }
        let callee_start = self.start()?;
        let callee = if self.at("new") {
            self.nested(Self::parse_new)?
        } else {
            self.parse_primary()?
        };
        let callee = self.parse_suffixes(callee, callee_start, false)?;
        let arguments = if self.at("(") {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(Expr {
            kind: ExprKind::New(Box::new(callee), arguments),
            range: self.finish(start),
        })
    }

    /// Member accesses, calls and tagged templates following `expr`.
    fn parse_suffixes(
        &mut self,
        mut expr: Expr,
        start: TextSize,
        allow_call: bool,
    ) -> Result<Expr, SyntaxError> {
        while let Some(token) = self.peek() {
            let kind = match token.kind {
                TokenKind::Punctuator => match token.text {
                    "." => {
                        self.bump();
                        let name = self.parse_member_name()?;
                        ExprKind::Member(Box::new(expr), MemberProperty::Name(name))
                    }
                    "?." if allow_call => {
                        self.bump();
                        if self.at("(") {
                            let arguments = self.parse_arguments()?;
                            ExprKind::Call(Box::new(expr), arguments)
                        } else if self.eat("[") {
                            let property = self.parse_expression(false)?;
                            self.expect("]")?;
                            ExprKind::Member(
                                Box::new(expr),
                                MemberProperty::Computed(Box::new(property)),
                            )
                        } else {
                            let name = self.parse_member_name()?;
                            ExprKind::Member(Box::new(expr), MemberProperty::Name(name))
                        }
                    }
                    "[" => {
                        self.bump();
                        let property = self.parse_expression(false)?;
                        self.expect("]")?;
                        ExprKind::Member(
                            Box::new(expr),
                            MemberProperty::Computed(Box::new(property)),
                        )
                    }
                    "(" if allow_call => {
                        let arguments = self.parse_arguments()?;
                        ExprKind::Call(Box::new(expr), arguments)
                    }
                    _ => break,
                },
                TokenKind::NoSubstitutionTemplate | TokenKind::TemplateHead => {
                    let quasi = self.parse_template(true)?;
                    ExprKind::TaggedTemplate {
                        tag: Box::new(expr),
                        quasi,
                    }
                }
                _ => break,
            };
            expr = Expr {
                kind,
                range: self.finish(start),
            };
        }
        Ok(expr)
    }

    fn parse_member_name(&mut self) -> Result<TextRange, SyntaxError> {
        match self.peek() {
            Some(t) if matches!(t.kind, TokenKind::Identifier | TokenKind::PrivateName) => {
                self.bump();
                Ok(t.range)
            }
            _ => Err(self.unexpected("property name")),
        }
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        self.expect("(")?;
        let mut arguments = Vec::new();
        while !self.at_close(")")? {
            arguments.push(self.parse_spread_or_assignment()?);
            if !self.eat(",") {
                break;
            }
        }
        self.expect(")")?;
        Ok(arguments)
    }

    fn parse_spread_or_assignment(&mut self) -> Result<Expr, SyntaxError> {
        if !self.at("...") {
            return self.parse_assignment(false);
        }
        let start = self.start()?;
        self.bump();
        let argument = self.parse_assignment(false)?;
        Ok(Expr {
            kind: ExprKind::Spread(Box::new(argument)),
            range: self.finish(start),
        })
    }

    fn parse_identifier(&mut self) -> Result<Expr, SyntaxError> {
        match self.peek() {
            Some(t) if t.kind == TokenKind::Identifier => {
                self.bump();
                Ok(Expr {
                    kind: ExprKind::Identifier,
                    range: t.range,
                })
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        // An operand position: `/` starts a regular expression.
        if self
            .peek()
            .is_some_and(|t| t.kind == TokenKind::Punctuator && t.starts_with_slash())
        {
            self.relex(LexMode::SlashIsRegex);
        }
        let start = self.start()?;
        let Some(token) = self.peek() else {
            return Err(self.unexpected("expression"));
        };
        let kind = match token.kind {
            TokenKind::Identifier => match token.text {
                "function" => ExprKind::Function(Box::new(self.parse_function()?)),
                "async" if self.at_nth(1, "function") && !self.newline_before_nth(1) => {
                    ExprKind::Function(Box::new(self.parse_function()?))
                }
                "class" => ExprKind::Class(Box::new(self.parse_class()?)),
                "import" => {
                    self.bump();
                    if self.eat(".") {
                        self.parse_identifier()?;
                        ExprKind::Atom
                    } else {
                        ExprKind::ImportCall(self.parse_arguments()?)
                    }
                }
                "this" | "super" | "null" | "true" | "false" => {
                    self.bump();
                    ExprKind::Atom
                }
                _ => {
                    self.bump();
                    ExprKind::Identifier
                }
            },
            TokenKind::PrivateName | TokenKind::Number | TokenKind::Regex => {
                self.bump();
                ExprKind::Atom
            }
            TokenKind::String => {
                self.bump();
                ExprKind::String(StringLit { range: token.range })
            }
            TokenKind::NoSubstitutionTemplate | TokenKind::TemplateHead => {
                ExprKind::Template(self.parse_template(false)?)
            }
            TokenKind::Punctuator if token.text == "(" => {
                self.bump();
                let inner = self.parse_expression(false)?;
                self.expect(")")?;
                ExprKind::Paren(Box::new(inner))
            }
            TokenKind::Punctuator if token.text == "[" => self.parse_array()?,
            TokenKind::Punctuator if token.text == "{" => self.parse_object()?,
            _ => return Err(self.unexpected("expression")),
        };
        Ok(Expr {
            kind,
            range: self.finish(start),
        })
    }

    fn parse_template(&mut self, tagged: bool) -> Result<TemplateLit, SyntaxError> {
        let start = self.start()?;
        let Some(head) = self.peek() else {
            return Err(self.unexpected("template literal"));
        };
        self.bump();
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        if head.kind == TokenKind::NoSubstitutionTemplate {
            quasis.push(template_chunk(head.range, 1, 1));
        } else {
            quasis.push(template_chunk(head.range, 1, 2));
            loop {
                expressions.push(self.parse_expression(false)?);
                match self.peek() {
                    Some(piece) if piece.kind == TokenKind::TemplateMiddle => {
                        self.bump();
                        quasis.push(template_chunk(piece.range, 1, 2));
                    }
                    Some(piece) if piece.kind == TokenKind::TemplateTail => {
                        self.bump();
                        quasis.push(template_chunk(piece.range, 1, 1));
                        break;
                    }
                    _ => return Err(self.unexpected("`}` closing a template substitution")),
                }
            }
        }
        Ok(TemplateLit {
            range: self.finish(start),
            quasis,
            expressions,
            tagged,
        })
    }

    fn parse_array(&mut self) -> Result<ExprKind, SyntaxError> {
        self.bump();
        let mut elements = Vec::new();
        while !self.at_close("]")? {
            if self.eat(",") {
                elements.push(None);
                continue;
            }
            elements.push(Some(self.parse_spread_or_assignment()?));
            if !self.at("]") {
                self.expect(",")?;
            }
        }
        self.bump();
        Ok(ExprKind::Array(elements))
    }

    fn parse_object(&mut self) -> Result<ExprKind, SyntaxError> {
        self.bump();
        let mut properties = Vec::new();
        while !self.at_close("}")? {
            properties.push(self.parse_object_property()?);
            if !self.eat(",") {
                break;
            }
        }
        self.expect("}")?;
        Ok(ExprKind::Object(properties))
    }

    /// True when the token `n` ahead ends an object-literal key.
    fn key_ends_at(&self, n: usize) -> bool {
        self.peek_at(n).is_none_or(|t| {
            t.kind == TokenKind::Punctuator && matches!(t.text, "(" | ":" | "," | "}" | "=")
        })
    }

    fn parse_object_property(&mut self) -> Result<Property, SyntaxError> {
        if self.eat("...") {
            return Ok(Property::Spread(self.parse_assignment(false)?));
        }
        let is_async = self.at("async") && !self.key_ends_at(1) && !self.newline_before_nth(1);
        if is_async {
            self.bump();
        }
        let is_generator = self.eat("*");
        let is_accessor = !is_async
            && !is_generator
            && (self.at("get") || self.at("set"))
            && !self.key_ends_at(1);
        if is_accessor {
            self.bump();
        }

        let key = self.parse_property_key()?;
        if self.at("(") {
            let function = self.parse_function_rest(is_async, is_generator)?;
            return Ok(Property::Method { key, function });
        }
        if is_async || is_generator || is_accessor {
            return Err(self.unexpected("`(`"));
        }
        if self.eat(":") {
            let value = self.parse_assignment(false)?;
            return Ok(Property::KeyValue { key, value });
        }
        match key {
            PropertyKey::Identifier(name) => {
                let default = if self.eat("=") {
                    Some(self.parse_assignment(false)?)
                } else {
                    None
                };
                Ok(Property::Shorthand { name, default })
            }
            _ => Err(self.unexpected("`:`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statements(source: &str) -> Vec<Stmt> {
        parse(source).unwrap().program.body
    }

    fn last_token_text<'a>(parsed: &ParsedSource<'a>, stmt: &Stmt) -> &'a str {
        parsed.tokens[stmt.tokens.last].text
    }

    #[test]
    fn test_asi_splits_lines() {
        let parsed = parse("a = 1\nb = 2\nc()").unwrap();
        assert_eq!(parsed.program.body.len(), 3);
        assert_eq!(last_token_text(&parsed, &parsed.program.body[0]), "1");
    }

    #[test]
    fn test_explicit_semicolon_is_last_token() {
        let parsed = parse("foo();\nbar()").unwrap();
        assert_eq!(last_token_text(&parsed, &parsed.program.body[0]), ";");
        assert_eq!(last_token_text(&parsed, &parsed.program.body[1]), ")");
    }

    #[test]
    fn test_paren_on_next_line_continues_the_call() {
        assert_eq!(statements("a = b\n(c)").len(), 1);
        assert_eq!(statements("foo()\n[1, 2].map(f)").len(), 1);
    }

    #[test]
    fn test_restricted_productions() {
        let body = statements("function f() { return\n1 }");
        let StmtKind::Function(function) = &body[0].kind else {
            panic!("expected function");
        };
        assert!(matches!(function.body.body[0].kind, StmtKind::Return(None)));
        assert_eq!(function.body.body.len(), 2);

        assert_eq!(statements("a\n++b").len(), 2);
    }

    #[test]
    fn test_do_while_takes_optional_semicolon() {
        let parsed = parse("do {} while (a)\nfoo()").unwrap();
        assert_eq!(parsed.program.body.len(), 2);
        let parsed = parse("do {} while (a); foo()").unwrap();
        assert_eq!(last_token_text(&parsed, &parsed.program.body[0]), ";");
    }

    #[test]
    fn test_missing_semicolon_on_one_line_is_an_error() {
        assert!(matches!(
            parse("a b"),
            Err(SyntaxError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_class_fields_and_asi() {
        let parsed = parse("class C { foo\n[bar]; static; get\nx() {} static { a() } }").unwrap();
        let StmtKind::Class(class) = &parsed.program.body[0].kind else {
            panic!("expected class");
        };
        let members = &class.body.members;
        assert_eq!(members.len(), 5);
        assert!(matches!(members[0].kind, ClassMemberKind::Field { .. }));
        assert!(matches!(
            members[1].kind,
            ClassMemberKind::Field {
                key: PropertyKey::Computed(_),
                ..
            }
        ));
        assert_eq!(parsed.tokens[members[1].tokens.last].text, ";");
        assert!(matches!(members[2].kind, ClassMemberKind::Field { .. }));
        assert!(!members[2].is_static);
        assert!(matches!(members[3].kind, ClassMemberKind::Method { .. }));
        assert!(matches!(members[4].kind, ClassMemberKind::StaticBlock(_)));
    }

    #[test]
    fn test_field_initializer_continues_across_lines() {
        let parsed = parse("class C { foo = obj\n[bar] }").unwrap();
        let StmtKind::Class(class) = &parsed.program.body[0].kind else {
            panic!("expected class");
        };
        assert_eq!(class.body.members.len(), 1);
    }

    #[test]
    fn test_arrow_block_end_is_recorded() {
        let parsed = parse("const f = () => {};\nconst g = (a, b) => a + b;").unwrap();
        assert_eq!(parsed.arrow_body_ends.len(), 1);
        let end = *parsed.arrow_body_ends.iter().next().unwrap();
        assert_eq!(parsed.tokens[end].text, "}");
    }

    #[test]
    fn test_modules() {
        let source = r#"import a, { b as "c", "d" as e } from "mod" with { type: "json" };
export * as "ns" from "other";
export { x as "y" };
export default function () {}
export const z = 1;"#;
        let body = statements(source);
        assert_eq!(body.len(), 5);
        let StmtKind::Import(import) = &body[0].kind else {
            panic!("expected import");
        };
        assert_eq!(import.specifiers.len(), 2);
        assert_eq!(import.attributes.len(), 1);
        assert!(matches!(body[1].kind, StmtKind::ExportAll(_)));
        assert!(matches!(
            body[3].kind,
            StmtKind::ExportDefault(ExportDefault::Declaration(_))
        ));
        let StmtKind::ExportNamed(named) = &body[4].kind else {
            panic!("expected export");
        };
        assert!(named.declaration.is_some());
    }

    #[test]
    fn test_for_heads_are_not_statements() {
        let body = statements("for (var i = 0; i < n; i++) {}\nfor (const k in o) {}\nfor (x of y) z()");
        assert!(matches!(
            body[0].kind,
            StmtKind::For {
                init: Some(ForHead::Var(_)),
                ..
            }
        ));
        assert!(matches!(body[1].kind, StmtKind::ForInOf { .. }));
        assert!(matches!(body[2].kind, StmtKind::ForInOf { .. }));
    }

    #[test]
    fn test_tagged_and_nested_templates() {
        let body = statements("tag`a${`b`}c`; ````;");
        let StmtKind::Expression(expr) = &body[0].kind else {
            panic!("expected expression");
        };
        let ExprKind::TaggedTemplate { quasi, .. } = &expr.kind else {
            panic!("expected tagged template");
        };
        assert!(quasi.tagged);
        assert_eq!(quasi.quasis.len(), 2);
        assert_eq!(quasi.expressions.len(), 1);

        let StmtKind::Expression(expr) = &body[1].kind else {
            panic!("expected expression");
        };
        assert!(matches!(expr.kind, ExprKind::TaggedTemplate { .. }));
    }

    #[test]
    fn test_object_literal_forms() {
        let body = statements("x = { a, b: 1, 'c': 2, [d]: 3, get e() {}, async *f() {}, ...g, get: 4 };");
        let StmtKind::Expression(expr) = &body[0].kind else {
            panic!("expected expression");
        };
        let ExprKind::Assign(_, value) = &expr.kind else {
            panic!("expected assignment");
        };
        let ExprKind::Object(properties) = &value.kind else {
            panic!("expected object");
        };
        assert_eq!(properties.len(), 8);
    }

    #[test]
    fn test_regex_statement_after_block() {
        let body = statements("if (a) {}\n/foo/.test(b)");
        assert_eq!(body.len(), 2);
    }

    #[test]
    fn test_comments_are_skipped_but_kept() {
        let parsed = parse("a() // trailing\n/* lead */ b()").unwrap();
        assert_eq!(parsed.program.body.len(), 2);
        assert!(parsed.tokens.iter().any(|t| t.kind.is_trivia()));
    }

    #[test]
    fn test_slash_after_object_literal_divides() {
        let parsed = parse("x = {}\n/foo/g").unwrap();
        assert_eq!(parsed.program.body.len(), 1);
        let StmtKind::Expression(expr) = &parsed.program.body[0].kind else {
            panic!("expected expression");
        };
        let ExprKind::Assign(_, value) = &expr.kind else {
            panic!("expected assignment");
        };
        assert!(matches!(value.kind, ExprKind::Binary(..)));
        assert!(!parsed.tokens.iter().any(|t| t.kind == TokenKind::Regex));
    }

    #[test]
    fn test_regex_after_statement_head_paren() {
        let body = statements("if (a) /re/.test(s);");
        assert_eq!(body.len(), 1);
        let body = statements("while (x) /a/g.exec(s);");
        assert_eq!(body.len(), 1);
        let parsed = parse("if (a) /'/.test(s)").unwrap();
        assert!(parsed
            .tokens
            .iter()
            .any(|t| t.kind == TokenKind::Regex && t.text == "/'/"));
    }

    #[test]
    fn test_division_after_call_paren() {
        let parsed = parse("a = f(x) / 2 / y").unwrap();
        assert_eq!(parsed.program.body.len(), 1);
        assert!(!parsed.tokens.iter().any(|t| t.kind == TokenKind::Regex));
    }

    #[test]
    fn test_truncated_source_reports_end_offset() {
        let source = "a()\nb(\n";
        let error = parse(source).unwrap_err();
        assert!(matches!(error, SyntaxError::UnexpectedEnd { .. }));
        assert_eq!(error.offset(), Some(source.len()));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let source = format!("x = {}1{};", "(".repeat(10_000), ")".repeat(10_000));
        assert!(matches!(
            parse(&source),
            Err(SyntaxError::NestingTooDeep { .. })
        ));
        let source = format!("x = {}a;", "!".repeat(10_000));
        assert!(matches!(
            parse(&source),
            Err(SyntaxError::NestingTooDeep { .. })
        ));
        let source = format!("{}{}", "{".repeat(10_000), "}".repeat(10_000));
        assert!(matches!(
            parse(&source),
            Err(SyntaxError::NestingTooDeep { .. })
        ));
    }

    #[test]
    fn test_moderate_nesting_parses() {
        let source = format!("x = {}1{};", "(".repeat(40), ")".repeat(40));
        assert_eq!(statements(&source).len(), 1);
        let source = format!("{}{}", "{".repeat(40), "}".repeat(40));
        assert_eq!(statements(&source).len(), 1);
    }
}
