use crate::rules::{Context, Diagnostic, Enclosing, LiteralSite, Node, Rule};
use crate::syntax::ast::{
    ArrowBody, Block, Class, ClassMemberKind, ExportDefault, Expr, ExprKind, ForHead, Function,
    ImportAttribute, MemberProperty, ModuleExportName, Program, Property, PropertyKey, Specifier,
    Stmt, StmtKind, StringLit, TemplateLit, VarDecl,
};

/// Visitor for traversing the syntax tree and applying style rules.
pub struct LinterVisitor<'a> {
    rules: Vec<Box<dyn Rule>>,
    context: Context<'a>,
    /// Diagnostics collected during the traversal, in visiting order.
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> LinterVisitor<'a> {
    /// Creates a new `LinterVisitor` with the given rules and context.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule>>, context: Context<'a>) -> Self {
        Self {
            rules,
            context,
            diagnostics: Vec::new(),
        }
    }

    fn emit(&mut self, node: Node<'_>) {
        for rule in &mut self.rules {
            if let Some(mut diagnostics) = rule.visit_node(&node, &self.context) {
                self.diagnostics.append(&mut diagnostics);
            }
        }
    }

    /// Visits every top-level statement.
    pub fn visit_program(&mut self, program: &Program) {
        for stmt in &program.body {
            self.visit_stmt(stmt, Enclosing::Program);
        }
    }

    /// Visits a statement node and applies rules, then walks its children.
    pub fn visit_stmt(&mut self, stmt: &Stmt, enclosing: Enclosing) {
        self.emit(Node::Statement { stmt, enclosing });

        match &stmt.kind {
            StmtKind::Expression(expr) => self.visit_statement_expr(expr, stmt),
            StmtKind::Var(decl) => self.visit_var(decl),
            StmtKind::Function(function) => self.visit_function(function),
            StmtKind::Class(class) => self.visit_class(class),
            StmtKind::Block(block) => self.visit_block(block),
            StmtKind::Empty | StmtKind::Debugger | StmtKind::Break | StmtKind::Continue => {}
            StmtKind::If {
                test,
                consequent,
                alternate,
            } => {
                self.visit_expr(test);
                self.visit_stmt(consequent, Enclosing::Statement);
                if let Some(alternate) = alternate {
                    self.visit_stmt(alternate, Enclosing::Statement);
                }
            }
            StmtKind::For {
                init,
                test,
                update,
                body,
            } => {
                if let Some(init) = init {
                    self.visit_for_head(init);
                }
                for expr in [test, update].into_iter().flatten() {
                    self.visit_expr(expr);
                }
                self.visit_stmt(body, Enclosing::Statement);
            }
            StmtKind::ForInOf { left, right, body } => {
                self.visit_for_head(left);
                self.visit_expr(right);
                self.visit_stmt(body, Enclosing::Statement);
            }
            StmtKind::While { test, body } | StmtKind::DoWhile { body, test } => {
                self.visit_expr(test);
                self.visit_stmt(body, Enclosing::Statement);
            }
            StmtKind::Return(argument) => {
                if let Some(argument) = argument {
                    self.visit_expr(argument);
                }
            }
            StmtKind::Throw(argument) => self.visit_expr(argument),
            StmtKind::Labeled(body) => self.visit_stmt(body, Enclosing::Statement),
            StmtKind::Switch {
                discriminant,
                cases,
            } => {
                self.visit_expr(discriminant);
                for case in cases {
                    if let Some(test) = &case.test {
                        self.visit_expr(test);
                    }
                    for stmt in &case.body {
                        self.visit_stmt(stmt, Enclosing::SwitchCase);
                    }
                }
            }
            StmtKind::Try {
                block,
                handler,
                finalizer,
            } => {
                self.visit_block(block);
                if let Some(handler) = handler {
                    if let Some(param) = &handler.param {
                        self.visit_expr(param);
                    }
                    self.visit_block(&handler.body);
                }
                if let Some(finalizer) = finalizer {
                    self.visit_block(finalizer);
                }
            }
            StmtKind::With { object, body } => {
                self.visit_expr(object);
                self.visit_stmt(body, Enclosing::Statement);
            }
            StmtKind::Import(import) => {
                self.visit_specifiers(&import.specifiers);
                self.visit_module_source(import.source);
                self.visit_attributes(&import.attributes);
            }
            StmtKind::ExportAll(export) => {
                if let Some(exported) = export.exported {
                    self.visit_module_name(exported);
                }
                self.visit_module_source(export.source);
                self.visit_attributes(&export.attributes);
            }
            StmtKind::ExportNamed(export) => {
                if let Some(declaration) = &export.declaration {
                    self.visit_stmt(declaration, Enclosing::Statement);
                }
                self.visit_specifiers(&export.specifiers);
                if let Some(source) = export.source {
                    self.visit_module_source(source);
                }
                self.visit_attributes(&export.attributes);
            }
            StmtKind::ExportDefault(ExportDefault::Declaration(declaration)) => {
                self.visit_stmt(declaration, Enclosing::Statement);
            }
            StmtKind::ExportDefault(ExportDefault::Expression(expr)) => self.visit_expr(expr),
        }
    }

    /// The expression of an expression statement; a bare literal here is
    /// reported with its statement position.
    fn visit_statement_expr(&mut self, expr: &Expr, stmt: &Stmt) {
        let site = LiteralSite::Statement {
            directive: stmt.directive,
            body_level: stmt.body_level,
        };
        match &expr.kind {
            ExprKind::String(literal) => self.emit_string(*literal, site),
            ExprKind::Template(template) => self.visit_template(template, site),
            _ => self.visit_expr(expr),
        }
    }

    fn visit_block(&mut self, block: &Block) {
        let enclosing = Enclosing::Block { range: block.range };
        for stmt in &block.body {
            self.visit_stmt(stmt, enclosing);
        }
    }

    fn visit_var(&mut self, decl: &VarDecl) {
        for declarator in &decl.declarators {
            self.visit_expr(&declarator.target);
            if let Some(init) = &declarator.init {
                self.visit_expr(init);
            }
        }
    }

    fn visit_for_head(&mut self, head: &ForHead) {
        match head {
            ForHead::Var(decl) => self.visit_var(decl),
            ForHead::Expr(expr) => self.visit_expr(expr),
        }
    }

    fn visit_function(&mut self, function: &Function) {
        for param in &function.params {
            self.visit_expr(param);
        }
        self.visit_block(&function.body);
    }

    fn visit_class(&mut self, class: &Class) {
        if let Some(super_class) = &class.super_class {
            self.visit_expr(super_class);
        }
        let enclosing = Enclosing::ClassBody {
            range: class.body.range,
        };
        for member in &class.body.members {
            self.emit(Node::ClassMember { member, enclosing });
            match &member.kind {
                ClassMemberKind::Field { key, value } => {
                    self.visit_key(key);
                    if let Some(value) = value {
                        self.visit_expr(value);
                    }
                }
                ClassMemberKind::Method { key, function } => {
                    self.visit_key(key);
                    self.visit_function(function);
                }
                ClassMemberKind::StaticBlock(block) => self.visit_block(block),
                ClassMemberKind::Empty => {}
            }
        }
    }

    fn visit_key(&mut self, key: &PropertyKey) {
        match key {
            PropertyKey::String(literal) => self.emit_string(*literal, LiteralSite::PropertyKey),
            PropertyKey::Computed(expr) => self.visit_expr(expr),
            PropertyKey::Identifier(_) | PropertyKey::Private(_) | PropertyKey::Number(_) => {}
        }
    }

    fn visit_specifiers(&mut self, specifiers: &[Specifier]) {
        for specifier in specifiers {
            self.visit_module_name(specifier.name);
            if let Some(alias) = specifier.alias {
                self.visit_module_name(alias);
            }
        }
    }

    fn visit_module_name(&mut self, name: ModuleExportName) {
        if let ModuleExportName::String(literal) = name {
            self.emit_string(literal, LiteralSite::ModuleExportName);
        }
    }

    fn visit_module_source(&mut self, source: StringLit) {
        self.emit_string(source, LiteralSite::ModuleSource);
    }

    fn visit_attributes(&mut self, attributes: &[ImportAttribute]) {
        for attribute in attributes {
            self.visit_module_name(attribute.key);
            self.emit_string(attribute.value, LiteralSite::ModuleSource);
        }
    }

    fn emit_string(&mut self, literal: StringLit, site: LiteralSite) {
        self.emit(Node::StringLiteral { literal, site });
    }

    fn visit_template(&mut self, template: &TemplateLit, site: LiteralSite) {
        self.emit(Node::TemplateLiteral {
            literal: template,
            site,
        });
        for expr in &template.expressions {
            self.visit_expr(expr);
        }
    }

    /// Visits an expression node and applies rules to every literal inside it.
    pub fn visit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Identifier | ExprKind::Atom => {}
            ExprKind::String(literal) => self.emit_string(*literal, LiteralSite::Expression),
            ExprKind::Template(template) => self.visit_template(template, LiteralSite::Expression),
            ExprKind::TaggedTemplate { tag, quasi } => {
                self.visit_expr(tag);
                self.visit_template(quasi, LiteralSite::Expression);
            }
            ExprKind::Array(elements) => {
                for element in elements.iter().flatten() {
                    self.visit_expr(element);
                }
            }
            ExprKind::Object(properties) => {
                for property in properties {
                    match property {
                        Property::KeyValue { key, value } => {
                            self.visit_key(key);
                            self.visit_expr(value);
                        }
                        Property::Shorthand { default, .. } => {
                            if let Some(default) = default {
                                self.visit_expr(default);
                            }
                        }
                        Property::Method { key, function } => {
                            self.visit_key(key);
                            self.visit_function(function);
                        }
                        Property::Spread(argument) => self.visit_expr(argument),
                    }
                }
            }
            ExprKind::Function(function) => self.visit_function(function),
            ExprKind::Arrow(arrow) => {
                for param in &arrow.params {
                    self.visit_expr(param);
                }
                match &arrow.body {
                    ArrowBody::Block(block) => self.visit_block(block),
                    ArrowBody::Expr(body) => self.visit_expr(body),
                }
            }
            ExprKind::Class(class) => self.visit_class(class),
            ExprKind::Unary(operand)
            | ExprKind::Update(operand)
            | ExprKind::Spread(operand)
            | ExprKind::Paren(operand) => self.visit_expr(operand),
            ExprKind::Binary(left, right) | ExprKind::Assign(left, right) => {
                self.visit_expr(left);
                self.visit_expr(right);
            }
            ExprKind::Conditional(test, consequent, alternate) => {
                self.visit_expr(test);
                self.visit_expr(consequent);
                self.visit_expr(alternate);
            }
            ExprKind::Call(callee, arguments) | ExprKind::New(callee, arguments) => {
                self.visit_expr(callee);
                for argument in arguments {
                    self.visit_expr(argument);
                }
            }
            ExprKind::Member(object, property) => {
                self.visit_expr(object);
                if let MemberProperty::Computed(property) = property {
                    self.visit_expr(property);
                }
            }
            ExprKind::Sequence(exprs) | ExprKind::ImportCall(exprs) => {
                for expr in exprs {
                    self.visit_expr(expr);
                }
            }
            ExprKind::Yield(argument) => {
                if let Some(argument) = argument {
                    self.visit_expr(argument);
                }
            }
        }
    }
}
