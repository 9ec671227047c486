//! Syntax tree.
//!
//! The tree keeps what the style rules consume: statement and class-member
//! boundaries (as token indices), literals and the syntactic position they
//! sit in. Operators and identifier names are left in the token list.

use text_size::TextRange;

/// Inclusive range of indices into the token list (trivia included).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSpan {
    /// Index of the first token.
    pub first: usize,
    /// Index of the last token; the terminating `;` when the construct consumed one.
    pub last: usize,
}

/// A parsed script or module.
#[derive(Debug, Clone)]
pub struct Program {
    /// Top-level statements.
    pub body: Vec<Stmt>,
    /// Whole source.
    pub range: TextRange,
}

/// A statement together with its boundary information.
#[derive(Debug, Clone)]
pub struct Stmt {
    /// What kind of statement this is.
    pub kind: StmtKind,
    /// Source range, terminating `;` included.
    pub range: TextRange,
    /// First and last token.
    pub tokens: TokenSpan,
    /// Member of the directive prologue of a program or function body.
    pub directive: bool,
    /// Direct child of a program or function body.
    pub body_level: bool,
}

/// Statement kinds.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// `expr;`
    Expression(Expr),
    /// `var`/`let`/`const` declaration.
    Var(VarDecl),
    /// Function declaration.
    Function(Box<Function>),
    /// Class declaration.
    Class(Box<Class>),
    /// `{ ... }`
    Block(Block),
    /// `;`
    Empty,
    /// `debugger;`
    Debugger,
    /// `if (test) consequent else alternate`
    If {
        /// Condition.
        test: Expr,
        /// Taken branch.
        consequent: Box<Stmt>,
        /// `else` branch.
        alternate: Option<Box<Stmt>>,
    },
    /// `for (init; test; update) body`
    For {
        /// Initializer.
        init: Option<ForHead>,
        /// Condition.
        test: Option<Expr>,
        /// Update expression.
        update: Option<Expr>,
        /// Loop body.
        body: Box<Stmt>,
    },
    /// `for (left in right)` and `for (left of right)`.
    ForInOf {
        /// Binding or assignment target.
        left: ForHead,
        /// Iterated object.
        right: Expr,
        /// Loop body.
        body: Box<Stmt>,
    },
    /// `while (test) body`
    While {
        /// Condition.
        test: Expr,
        /// Loop body.
        body: Box<Stmt>,
    },
    /// `do body while (test)`
    DoWhile {
        /// Loop body.
        body: Box<Stmt>,
        /// Condition.
        test: Expr,
    },
    /// `return arg;`
    Return(Option<Expr>),
    /// `throw arg;`
    Throw(Expr),
    /// `break label;`
    Break,
    /// `continue label;`
    Continue,
    /// `label: body`
    Labeled(Box<Stmt>),
    /// `switch (discriminant) { cases }`
    Switch {
        /// Switched value.
        discriminant: Expr,
        /// `case`/`default` clauses.
        cases: Vec<SwitchCase>,
    },
    /// `try { } catch { } finally { }`
    Try {
        /// Guarded block.
        block: Block,
        /// `catch` clause.
        handler: Option<CatchClause>,
        /// `finally` block.
        finalizer: Option<Block>,
    },
    /// `with (object) body`
    With {
        /// Scope object.
        object: Expr,
        /// Body.
        body: Box<Stmt>,
    },
    /// `import ... from "source";`
    Import(ImportDecl),
    /// `export * from "source";` and `export * as name from "source";`
    ExportAll(ExportAll),
    /// `export { ... }`, `export { ... } from "source"` or `export <declaration>`.
    ExportNamed(ExportNamed),
    /// `export default ...`
    ExportDefault(ExportDefault),
}

/// `var`, `let` or `const`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarKind {
    /// `var`
    Var,
    /// `let`
    Let,
    /// `const`
    Const,
}

/// Variable declaration with one or more declarators.
#[derive(Debug, Clone)]
pub struct VarDecl {
    /// Declaration keyword.
    pub kind: VarKind,
    /// `target = init` pairs.
    pub declarators: Vec<Declarator>,
}

/// A single `target = init`.
#[derive(Debug, Clone)]
pub struct Declarator {
    /// Binding identifier or pattern.
    pub target: Expr,
    /// Initializer.
    pub init: Option<Expr>,
}

/// Head of a `for` loop; declarations here are not statements.
#[derive(Debug, Clone)]
pub enum ForHead {
    /// `for (let x ...`
    Var(VarDecl),
    /// `for (x ...`
    Expr(Expr),
}

/// `{ ... }`
#[derive(Debug, Clone)]
pub struct Block {
    /// Statements.
    pub body: Vec<Stmt>,
    /// From `{` to `}` inclusive.
    pub range: TextRange,
}

/// `case test:` or `default:` with its statements.
#[derive(Debug, Clone)]
pub struct SwitchCase {
    /// `None` for `default`.
    pub test: Option<Expr>,
    /// Statements of the clause.
    pub body: Vec<Stmt>,
}

/// `catch (param) { ... }`
#[derive(Debug, Clone)]
pub struct CatchClause {
    /// Optional binding.
    pub param: Option<Expr>,
    /// Handler body.
    pub body: Block,
}

/// Function declaration, expression, method or accessor.
#[derive(Debug, Clone)]
pub struct Function {
    /// Parameters, with defaults as assignments and rest as spread.
    pub params: Vec<Expr>,
    /// Function body.
    pub body: Block,
    /// `async function`
    pub is_async: bool,
    /// `function*`
    pub is_generator: bool,
}

/// Arrow function.
#[derive(Debug, Clone)]
pub struct Arrow {
    /// Parameters.
    pub params: Vec<Expr>,
    /// Block or expression body.
    pub body: ArrowBody,
    /// `async (...) =>`
    pub is_async: bool,
}

/// Body of an arrow function.
#[derive(Debug, Clone)]
pub enum ArrowBody {
    /// `=> { ... }`
    Block(Block),
    /// `=> expr`
    Expr(Box<Expr>),
}

/// Class declaration or expression.
#[derive(Debug, Clone)]
pub struct Class {
    /// `extends` clause.
    pub super_class: Option<Expr>,
    /// Member list.
    pub body: ClassBody,
}

/// `{ ... }` of a class.
#[derive(Debug, Clone)]
pub struct ClassBody {
    /// Members in source order.
    pub members: Vec<ClassMember>,
    /// From `{` to `}` inclusive.
    pub range: TextRange,
}

/// One element of a class body.
#[derive(Debug, Clone)]
pub struct ClassMember {
    /// Field, method, static block or stray `;`.
    pub kind: ClassMemberKind,
    /// Source range, terminating `;` of a field included.
    pub range: TextRange,
    /// First and last token.
    pub tokens: TokenSpan,
    /// Declared `static`.
    pub is_static: bool,
}

/// Class element kinds.
#[derive(Debug, Clone)]
pub enum ClassMemberKind {
    /// `key = value;`
    Field {
        /// Field name.
        key: PropertyKey,
        /// Initializer.
        value: Option<Expr>,
    },
    /// Method, getter, setter or constructor.
    Method {
        /// Method name.
        key: PropertyKey,
        /// Parameters and body.
        function: Function,
    },
    /// `static { ... }`; the range of the block starts at its `{`.
    StaticBlock(Block),
    /// A `;` between members.
    Empty,
}

/// Name of a property, method or class field.
#[derive(Debug, Clone)]
pub enum PropertyKey {
    /// Identifier name (keywords included).
    Identifier(TextRange),
    /// `#name`
    Private(TextRange),
    /// Quoted name.
    String(StringLit),
    /// Numeric name.
    Number(TextRange),
    /// `[expr]`
    Computed(Box<Expr>),
}

/// Quoted string literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StringLit {
    /// Raw range, quotes included.
    pub range: TextRange,
}

/// Template literal.
#[derive(Debug, Clone)]
pub struct TemplateLit {
    /// Raw range, backticks included.
    pub range: TextRange,
    /// Raw text of each template chunk, delimiters excluded.
    pub quasis: Vec<TextRange>,
    /// Substitution expressions.
    pub expressions: Vec<Expr>,
    /// Used as the quasi of a tagged template.
    pub tagged: bool,
}

impl TemplateLit {
    /// Contains at least one `${ }`.
    #[must_use]
    pub fn has_substitutions(&self) -> bool {
        !self.expressions.is_empty()
    }
}

/// An expression.
#[derive(Debug, Clone)]
pub struct Expr {
    /// Kind and children.
    pub kind: ExprKind,
    /// Source range.
    pub range: TextRange,
}

/// Expression kinds.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Identifier reference.
    Identifier,
    /// Number, bigint, regex, boolean, `null`, `this`, `super`, meta property or private name.
    Atom,
    /// Quoted string.
    String(StringLit),
    /// Untagged template.
    Template(TemplateLit),
    /// `` tag`...` ``
    TaggedTemplate {
        /// Tag expression.
        tag: Box<Expr>,
        /// Template, with `tagged` set.
        quasi: TemplateLit,
    },
    /// `[a, , ...b]`; holes are `None`.
    Array(Vec<Option<Expr>>),
    /// `{ ... }`
    Object(Vec<Property>),
    /// Function expression.
    Function(Box<Function>),
    /// Arrow function.
    Arrow(Box<Arrow>),
    /// Class expression.
    Class(Box<Class>),
    /// Prefix operator, `await` included.
    Unary(Box<Expr>),
    /// `++x`, `x--`
    Update(Box<Expr>),
    /// Binary or logical operator.
    Binary(Box<Expr>, Box<Expr>),
    /// `target op= value`
    Assign(Box<Expr>, Box<Expr>),
    /// `test ? consequent : alternate`
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
    /// `callee(args)`, optional calls included.
    Call(Box<Expr>, Vec<Expr>),
    /// `new callee(args)`
    New(Box<Expr>, Vec<Expr>),
    /// `object.name`, `object[expr]`, `object?.name`
    Member(Box<Expr>, MemberProperty),
    /// `a, b`
    Sequence(Vec<Expr>),
    /// `...expr`
    Spread(Box<Expr>),
    /// `yield expr`
    Yield(Option<Box<Expr>>),
    /// `import(source)`
    ImportCall(Vec<Expr>),
    /// `( expr )`
    Paren(Box<Expr>),
}

/// Property part of a member expression.
#[derive(Debug, Clone)]
pub enum MemberProperty {
    /// `.name` or `.#name`
    Name(TextRange),
    /// `[expr]`
    Computed(Box<Expr>),
}

/// Entry of an object literal or object pattern.
#[derive(Debug, Clone)]
pub enum Property {
    /// `key: value`
    KeyValue {
        /// Property name.
        key: PropertyKey,
        /// Value.
        value: Expr,
    },
    /// `name` or `name = default`
    Shorthand {
        /// Identifier range.
        name: TextRange,
        /// Default in a pattern.
        default: Option<Expr>,
    },
    /// Method, getter or setter.
    Method {
        /// Method name.
        key: PropertyKey,
        /// Parameters and body.
        function: Function,
    },
    /// `...expr`
    Spread(Expr),
}

/// A name in an import or export specifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModuleExportName {
    /// `foo`
    Identifier(TextRange),
    /// `"foo"`
    String(StringLit),
}

/// `imported as local` / `local as exported`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Specifier {
    /// Name on the left of `as` (or the only name).
    pub name: ModuleExportName,
    /// Name on the right of `as`.
    pub alias: Option<ModuleExportName>,
}

/// `with { type: "json" }`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImportAttribute {
    /// Attribute key.
    pub key: ModuleExportName,
    /// Attribute value.
    pub value: StringLit,
}

/// Import declaration.
#[derive(Debug, Clone)]
pub struct ImportDecl {
    /// `{ ... }` specifiers; default and namespace bindings are not kept.
    pub specifiers: Vec<Specifier>,
    /// Module specifier.
    pub source: StringLit,
    /// Import attributes.
    pub attributes: Vec<ImportAttribute>,
}

/// `export * [as name] from "source"`
#[derive(Debug, Clone)]
pub struct ExportAll {
    /// Namespace export name.
    pub exported: Option<ModuleExportName>,
    /// Module specifier.
    pub source: StringLit,
    /// Import attributes.
    pub attributes: Vec<ImportAttribute>,
}

/// `export { ... } [from "source"]` or `export <declaration>`.
#[derive(Debug, Clone)]
pub struct ExportNamed {
    /// Exported declaration.
    pub declaration: Option<Box<Stmt>>,
    /// Specifier list.
    pub specifiers: Vec<Specifier>,
    /// Re-export source.
    pub source: Option<StringLit>,
    /// Import attributes.
    pub attributes: Vec<ImportAttribute>,
}

/// `export default ...`
#[derive(Debug, Clone)]
pub enum ExportDefault {
    /// `export default function ... {}` / `export default class ... {}`
    Declaration(Box<Stmt>),
    /// `export default expr;`
    Expression(Expr),
}
