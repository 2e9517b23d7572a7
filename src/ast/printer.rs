use super::arena::{Arena, ClassId, MemberId};
use super::nodes::*;

/// AST printer for debugging and test assertions
pub struct AstPrinter {
    indent_level: usize,
    output: String,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            output: String::new(),
        }
    }

    /// Prints every class in the arena as Java-like source.
    pub fn print(&mut self, arena: &Arena) -> String {
        self.output.clear();
        for class in arena.class_ids() {
            self.print_class_into(arena, class);
        }
        self.output.clone()
    }

    fn indent(&mut self) {
        self.indent_level += 2;
    }

    fn dedent(&mut self) {
        if self.indent_level >= 2 {
            self.indent_level -= 2;
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push(' ');
        }
    }

    fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    fn print_class_into(&mut self, arena: &Arena, class: ClassId) {
        let decl = arena.class(class);
        for ann in &decl.annotations {
            let line = format_annotation(ann);
            self.writeln(&line);
        }
        let mut header = String::new();
        for m in &decl.modifiers {
            header.push_str(&format!("{} ", m));
        }
        header.push_str(&format!("{} {{", decl));
        self.writeln(&header);
        self.indent();
        for member in decl.members.clone() {
            match member {
                MemberId::Field(id) => self.print_field(arena.field(id)),
                MemberId::Method(id) => self.print_method(arena.method(id)),
            }
        }
        self.dedent();
        self.writeln("}");
    }

    fn print_field(&mut self, field: &FieldNode) {
        for ann in &field.annotations {
            let line = format_annotation(ann);
            self.writeln(&line);
        }
        let mut line = String::new();
        for m in &field.modifiers {
            line.push_str(&format!("{} ", m));
        }
        line.push_str(&format!("{} {};", field.type_ref, field.name));
        self.writeln(&line);
    }

    fn print_method(&mut self, method: &MethodNode) {
        for ann in &method.annotations {
            let line = format_annotation(ann);
            self.writeln(&line);
        }
        let mut header = String::new();
        for m in &method.modifiers {
            header.push_str(&format!("{} ", m));
        }
        match &method.return_type {
            Some(t) => header.push_str(&format!("{} ", t)),
            None => header.push_str("void "),
        }
        header.push_str(&method.name);
        header.push('(');
        for (i, p) in method.parameters.iter().enumerate() {
            if i > 0 {
                header.push_str(", ");
            }
            header.push_str(&format!("{} {}", p.type_ref, p.name));
        }
        header.push(')');
        match &method.body {
            None => {
                header.push(';');
                self.writeln(&header);
            }
            Some(body) => {
                header.push_str(" {");
                self.writeln(&header);
                self.indent();
                for stmt in &body.statements {
                    self.print_stmt(stmt);
                }
                self.dedent();
                self.writeln("}");
            }
        }
    }

    fn print_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(s) => {
                let line = format!("{};", format_expr(&s.expr));
                self.writeln(&line);
            }
            Stmt::LocalVar(s) => {
                let mut line = String::new();
                for m in &s.modifiers {
                    line.push_str(&format!("{} ", m));
                }
                line.push_str(&format!(
                    "{} {} = {};",
                    s.type_ref,
                    s.name,
                    format_expr(&s.initializer)
                ));
                self.writeln(&line);
            }
            Stmt::Return(s) => {
                let line = match &s.value {
                    Some(v) => format!("return {};", format_expr(v)),
                    None => "return;".to_string(),
                };
                self.writeln(&line);
            }
            Stmt::Throw(s) => {
                let line = format!("throw {};", format_expr(&s.expr));
                self.writeln(&line);
            }
            Stmt::Try(s) => {
                self.writeln("try {");
                self.indent();
                for stmt in &s.try_block.statements {
                    self.print_stmt(stmt);
                }
                self.dedent();
                for catch in &s.catch_clauses {
                    let line = format!(
                        "}} catch ({} {}) {{",
                        catch.parameter.type_ref, catch.parameter.name
                    );
                    self.writeln(&line);
                    self.indent();
                    for stmt in &catch.block.statements {
                        self.print_stmt(stmt);
                    }
                    self.dedent();
                }
                if let Some(finally) = &s.finally_block {
                    self.writeln("} finally {");
                    self.indent();
                    for stmt in &finally.statements {
                        self.print_stmt(stmt);
                    }
                    self.dedent();
                }
                self.writeln("}");
            }
            Stmt::Block(b) => {
                self.writeln("{");
                self.indent();
                for stmt in &b.statements {
                    self.print_stmt(stmt);
                }
                self.dedent();
                self.writeln("}");
            }
            Stmt::CtorCall(s) => {
                let kw = match s.kind {
                    CtorKind::This => "this",
                    CtorKind::Super => "super",
                };
                let args: Vec<String> = s.arguments.iter().map(format_expr).collect();
                let line = format!("{}({});", kw, args.join(", "));
                self.writeln(&line);
            }
            Stmt::Empty => self.writeln(";"),
        }
    }
}

impl Default for AstPrinter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_annotation(ann: &Annotation) -> String {
    if ann.arguments.is_empty() {
        return format!("@{}", ann.name);
    }
    let args: Vec<String> = ann
        .arguments
        .iter()
        .map(|a| match a {
            AnnotationArg::Value(e) => format_expr(e),
            AnnotationArg::Named(n, e) => format!("{} = {}", n, format_expr(e)),
        })
        .collect();
    format!("@{}({})", ann.name, args.join(", "))
}

fn format_expr(expr: &Expr) -> String {
    match expr {
        Expr::Literal(l) => match &l.value {
            Literal::Integer(v) => v.to_string(),
            Literal::Boolean(v) => v.to_string(),
            Literal::String(v) => format!("\"{}\"", v),
            Literal::Null => "null".to_string(),
        },
        Expr::Identifier(e) => e.name.clone(),
        Expr::FieldAccess(e) => match &e.target {
            Some(t) => format!("{}.{}", format_expr(t), e.name),
            None => e.name.clone(),
        },
        Expr::MethodCall(e) => {
            let args: Vec<String> = e.arguments.iter().map(format_expr).collect();
            match &e.target {
                Some(t) => format!("{}.{}({})", format_expr(t), e.name, args.join(", ")),
                None => format!("{}({})", e.name, args.join(", ")),
            }
        }
    }
}
