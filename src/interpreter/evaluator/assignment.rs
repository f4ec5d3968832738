use std::io::Write;

use crate::{
    ast::{AssignOperator, Expr},
    error::Fault,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Object, operators::binary},
    },
};

impl<W: Write> Interpreter<W> {
    /// Evaluates `target op value` and returns the stored value.
    ///
    /// The target must be defined and mutable. The right-hand side runs
    /// first, so in `a = b += 1` the inner assignment completes before `a`
    /// is written. A compound operator combines the target's current value
    /// with the right-hand value. The result must have the target's declared
    /// type. Faults are returned in-band.
    pub(crate) fn assign(&mut self,
                         target: &str,
                         op: AssignOperator,
                         value: &Expr)
                         -> EvalResult<Object> {
        let Some(binding) = self.environment.binding(target) else {
            return Ok(Fault::UndefinedVar.into());
        };
        if !binding.mutable {
            return Ok(Fault::ConstantAssignment.into());
        }
        let ty = binding.ty;

        let rhs = self.evaluate(value)?;
        if rhs.found_errors() {
            return Ok(rhs);
        }

        let result = match op.binary() {
            Some(operator) => binary(operator, &self.environment.get(target), &rhs),
            None => rhs,
        };
        if result.found_errors() {
            return Ok(result);
        }
        if result.value_type() != Some(ty) {
            return Ok(Fault::WrongType.into());
        }

        if let Err(fault) = self.environment.update(target, result.clone()) {
            return Ok(fault.into());
        }
        Ok(result)
    }
}
