use std::io::Write;

use crate::{
    ast::{
        ConditionalStatement, ControllerKind, Declaration, Expr, ForLoop, Scope, Specifiers,
        VarDeclaration,
    },
    error::Fault,
    interpreter::{
        evaluator::{
            core::{EvalResult, Flow, Interpreter},
            environment::{Binding, ScopeKind},
        },
        value::core::Object,
    },
};

impl<W: Write> Interpreter<W> {
    /// Executes a single declaration or statement.
    ///
    /// Returns the control-flow signal for the enclosing construct.
    ///
    /// # Errors
    /// Returns the first fault raised while executing `declaration`.
    pub fn execute(&mut self, declaration: &Declaration) -> EvalResult<Flow> {
        match declaration {
            Declaration::Var(var) => {
                self.declare_variable(var)?;
                Ok(Flow::Normal)
            },
            Declaration::Func(func) => {
                self.declare_function(func)?;
                Ok(Flow::Normal)
            },
            Declaration::Expression { expr, .. } => {
                self.evaluate_checked(expr)?;
                Ok(Flow::Normal)
            },
            Declaration::Print { expressions, line } => {
                self.print(expressions, *line)?;
                Ok(Flow::Normal)
            },
            Declaration::Scope(scope) => self.execute_scope(scope, ScopeKind::None),
            Declaration::Conditional(chain) => self.execute_conditional(chain),
            Declaration::While { condition, body, .. } => self.execute_while(condition, body),
            Declaration::For(for_loop) => self.execute_for(for_loop),
            Declaration::Return { expr, line } => self.execute_return(expr.as_ref(), *line),
            Declaration::Controller { kind, line } => self.execute_controller(*kind, *line),
        }
    }

    /// Runs a block in a fresh scope of `kind`.
    pub(crate) fn execute_scope(&mut self, scope: &Scope, kind: ScopeKind) -> EvalResult<Flow> {
        self.scoped(kind, |this| this.execute_all(&scope.declarations))
    }

    /// Runs declarations in the current scope until one of them diverts
    /// control flow.
    pub(crate) fn execute_all(&mut self, declarations: &[Declaration]) -> EvalResult<Flow> {
        for declaration in declarations {
            let flow = self.execute(declaration)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Binds a new variable in the current scope.
    ///
    /// The name is bound to `void` before the initializer runs, then rebound
    /// to the initializer's value, which must have the declared type.
    fn declare_variable(&mut self, var: &VarDeclaration) -> EvalResult<()> {
        let mutable = !var.specifiers.contains(Specifiers::CONSTANT);
        if !mutable && var.initializer.is_none() {
            return Err(self.raise(Fault::ConstantWithoutInitializer, var.line));
        }

        self.environment.define(&var.name,
                                Binding { object: Object::Void,
                                          ty: var.ty,
                                          mutable });

        if let Some(initializer) = &var.initializer {
            let object = self.evaluate_checked(initializer)?;
            if object.value_type() != Some(var.ty) {
                return Err(self.raise(Fault::WrongType, initializer.line()));
            }
            self.environment.define(&var.name,
                                    Binding { object,
                                              ty: var.ty,
                                              mutable });
        }
        Ok(())
    }

    /// Writes each value with no separator, then a newline.
    ///
    /// Values are written as they are evaluated, so a fault in a later
    /// expression leaves the earlier pieces on the line.
    fn print(&mut self, expressions: &[Expr], line: usize) -> EvalResult<()> {
        for expr in expressions {
            let object = self.evaluate_checked(expr)?;
            write!(self.out, "{object}").map_err(|_| self.raise(Fault::Output, line))?;
        }
        writeln!(self.out).map_err(|_| self.raise(Fault::Output, line))
    }

    /// Evaluates a loop or branch condition.
    ///
    /// Only `true` is taken. Any other value, `bool` or not, is false.
    fn condition(&mut self, condition: &Expr) -> EvalResult<bool> {
        Ok(matches!(self.evaluate_checked(condition)?, Object::Bool(true)))
    }

    /// Runs the first branch whose condition holds, or the `else` branch.
    ///
    /// A `remit` inside the chosen body ends the conditional.
    fn execute_conditional(&mut self, chain: &ConditionalStatement) -> EvalResult<Flow> {
        let mut branch = Some(chain);
        while let Some(link) = branch {
            let taken = match &link.condition {
                Some(condition) => self.condition(condition)?,
                None => true,
            };
            if taken {
                return match self.execute_scope(&link.body, ScopeKind::Conditional)? {
                    Flow::Remit => Ok(Flow::Normal),
                    flow => Ok(flow),
                };
            }
            branch = link.next.as_deref();
        }
        Ok(Flow::Normal)
    }

    fn execute_while(&mut self, condition: &Expr, body: &Scope) -> EvalResult<Flow> {
        while self.condition(condition)? {
            match self.execute_scope(body, ScopeKind::Loop)? {
                Flow::Normal => {},
                Flow::Break => break,
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    /// The loop variable lives in its own scope around the loop; each
    /// iteration's body gets a fresh scope inside it.
    fn execute_for(&mut self, for_loop: &ForLoop) -> EvalResult<Flow> {
        self.scoped(ScopeKind::Loop, |this| this.iterate_for(for_loop))
    }

    fn iterate_for(&mut self, for_loop: &ForLoop) -> EvalResult<Flow> {
        self.declare_variable(&for_loop.initializer)?;
        while self.condition(&for_loop.condition)? {
            match self.execute_scope(&for_loop.body, ScopeKind::Loop)? {
                Flow::Normal => {},
                Flow::Break => break,
                flow => return Ok(flow),
            }
            self.evaluate_checked(&for_loop.step)?;
        }
        Ok(Flow::Normal)
    }

    fn execute_controller(&self, kind: ControllerKind, line: usize) -> EvalResult<Flow> {
        let (scope, flow) = match kind {
            ControllerKind::Break => (ScopeKind::Loop, Flow::Break),
            ControllerKind::Remit => (ScopeKind::Conditional, Flow::Remit),
        };
        if !self.environment.within(scope) {
            return Err(self.raise(Fault::MisplacedController, line));
        }
        Ok(flow)
    }
}
