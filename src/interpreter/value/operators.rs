use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::Fault,
    interpreter::value::core::Object,
    util::num::{i64_to_char_checked, shift_amount_checked},
};

type OpResult = Result<Object, Fault>;

/// Applies a binary operator.
///
/// The evaluation order is fixed:
/// 1. An error operand is forwarded (the left one first).
/// 2. [`check_operators`] validates and coerces the operand types.
/// 3. `/` and `%` reject a zero divisor.
/// 4. The operator runs, or yields `UnknownType` for an unsupported type.
#[must_use]
pub fn binary(op: BinaryOperator, left: &Object, right: &Object) -> Object {
    binary_checked(op, left, right).into()
}

/// Applies a unary operator, forwarding an error operand unchanged.
#[must_use]
pub fn unary(op: UnaryOperator, operand: &Object) -> Object {
    let result = match (op, operand) {
        (_, Object::Error(fault)) => Err(*fault),
        (UnaryOperator::Negate, Object::Int(v)) => v.checked_neg().map(Object::Int).ok_or(Fault::Overflow),
        (UnaryOperator::Negate, Object::Float(v)) => Ok(Object::Float(-v)),
        (UnaryOperator::Negate, _) => Err(Fault::Negate),
        (UnaryOperator::Not, Object::Bool(v)) => Ok(Object::Bool(!v)),
        (UnaryOperator::BitNot, Object::Int(v)) => Ok(Object::Int(!v)),
        (UnaryOperator::Not | UnaryOperator::BitNot, _) => Err(Fault::UnknownType),
    };
    result.into()
}

/// Validates that two operands may be combined.
///
/// Operands must share a type. The one allowed coercion turns an `int` paired
/// with a `char` into a `char`; a code point that is not a valid `char` fails
/// with `ConvertFailed`. Any other pairing is a `TypeMismatch`.
///
/// # Errors
/// `TypeMismatch` or `ConvertFailed` as described above.
pub fn check_operators(left: &Object, right: &Object) -> Result<(Object, Object), Fault> {
    match (left, right) {
        (Object::Int(i), Object::Char(c)) => {
            Ok((Object::Char(i64_to_char_checked(*i, Fault::ConvertFailed)?), Object::Char(*c)))
        },
        (Object::Char(c), Object::Int(i)) => {
            Ok((Object::Char(*c), Object::Char(i64_to_char_checked(*i, Fault::ConvertFailed)?)))
        },
        (l, r) if l.value_type() == r.value_type() => Ok((l.clone(), r.clone())),
        _ => Err(Fault::TypeMismatch),
    }
}

fn binary_checked(op: BinaryOperator, left: &Object, right: &Object) -> OpResult {
    use BinaryOperator::{
        Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod,
        Mul, NotEqual, Or, ShiftLeft, ShiftRight, Sub,
    };

    if let Some(fault) = left.fault().or_else(|| right.fault()) {
        return Err(fault);
    }
    let (left, right) = check_operators(left, right)?;

    if matches!(op, Div | Mod) && right.is_zero() {
        return Err(Fault::DivideByZero);
    }

    match op {
        Add | Sub | Mul | Div | Mod => arithmetic(op, &left, &right),
        Less | Greater | LessEqual | GreaterEqual => comparison(op, &left, &right),
        Equal => Ok(Object::Bool(left == right)),
        NotEqual => Ok(Object::Bool(left != right)),
        And | Or => logical(op, &left, &right),
        BitAnd | BitOr | BitXor => bitwise(op, &left, &right),
        ShiftLeft | ShiftRight => shift(op, &left, &right),
    }
}

fn arithmetic(op: BinaryOperator, left: &Object, right: &Object) -> OpResult {
    match (left, right) {
        (Object::Int(l), Object::Int(r)) => integer_arithmetic(op, *l, *r).map(Object::Int),
        (Object::Float(l), Object::Float(r)) => Ok(Object::Float(float_arithmetic(op, *l, *r))),
        (Object::Char(l), Object::Char(r)) => {
            let code = integer_arithmetic(op, i64::from(u32::from(*l)), i64::from(u32::from(*r)))?;
            i64_to_char_checked(code, Fault::ConvertFailed).map(Object::Char)
        },
        (Object::Str(l), Object::Str(r)) if op == BinaryOperator::Add => {
            Ok(Object::Str(format!("{l}{r}")))
        },
        _ => Err(Fault::UnknownType),
    }
}

fn integer_arithmetic(op: BinaryOperator, l: i64, r: i64) -> Result<i64, Fault> {
    let result = match op {
        BinaryOperator::Add => l.checked_add(r),
        BinaryOperator::Sub => l.checked_sub(r),
        BinaryOperator::Mul => l.checked_mul(r),
        BinaryOperator::Div => l.checked_div(r),
        BinaryOperator::Mod => l.checked_rem(r),
        _ => return Err(Fault::UnknownType),
    };
    result.ok_or(Fault::Overflow)
}

fn float_arithmetic(op: BinaryOperator, l: f64, r: f64) -> f64 {
    match op {
        BinaryOperator::Add => l + r,
        BinaryOperator::Sub => l - r,
        BinaryOperator::Mul => l * r,
        BinaryOperator::Div => l / r,
        _ => l % r,
    }
}

fn comparison(op: BinaryOperator, left: &Object, right: &Object) -> OpResult {
    let ordering = match (left, right) {
        (Object::Int(l), Object::Int(r)) => l.partial_cmp(r),
        (Object::Float(l), Object::Float(r)) => l.partial_cmp(r),
        (Object::Char(l), Object::Char(r)) => l.partial_cmp(r),
        (Object::Bool(l), Object::Bool(r)) => l.partial_cmp(r),
        _ => return Err(Fault::UnknownType),
    };
    // NaN compares false under every ordering operator.
    let Some(ordering) = ordering else {
        return Ok(Object::Bool(false));
    };
    let result = match op {
        BinaryOperator::Less => ordering.is_lt(),
        BinaryOperator::Greater => ordering.is_gt(),
        BinaryOperator::LessEqual => ordering.is_le(),
        _ => ordering.is_ge(),
    };
    Ok(Object::Bool(result))
}

fn truthy(object: &Object) -> Result<bool, Fault> {
    match object {
        Object::Bool(v) => Ok(*v),
        Object::Int(v) => Ok(*v != 0),
        Object::Float(v) => Ok(*v != 0.0),
        Object::Char(v) => Ok(*v != '\0'),
        Object::Str(_) | Object::Void | Object::Error(_) => Err(Fault::UnknownType),
    }
}

fn logical(op: BinaryOperator, left: &Object, right: &Object) -> OpResult {
    let (l, r) = (truthy(left)?, truthy(right)?);
    let result = if op == BinaryOperator::And { l && r } else { l || r };
    Ok(Object::Bool(result))
}

fn bitwise(op: BinaryOperator, left: &Object, right: &Object) -> OpResult {
    match (left, right) {
        (Object::Int(l), Object::Int(r)) => {
            let result = match op {
                BinaryOperator::BitAnd => l & r,
                BinaryOperator::BitOr => l | r,
                _ => l ^ r,
            };
            Ok(Object::Int(result))
        },
        (Object::Bool(l), Object::Bool(r)) => {
            let result = match op {
                BinaryOperator::BitAnd => l & r,
                BinaryOperator::BitOr => l | r,
                _ => l ^ r,
            };
            Ok(Object::Bool(result))
        },
        _ => Err(Fault::UnknownType),
    }
}

fn shift(op: BinaryOperator, left: &Object, right: &Object) -> OpResult {
    let (Object::Int(value), Object::Int(amount)) = (left, right) else {
        return Err(Fault::UnknownType);
    };
    let amount = shift_amount_checked(*amount, Fault::Overflow)?;
    let result = if op == BinaryOperator::ShiftLeft { value << amount } else { value >> amount };
    Ok(Object::Int(result))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::BinaryOperator::*;

    fn int(v: i64) -> Object {
        Object::Int(v)
    }

    #[test]
    fn integer_arithmetic_is_checked() {
        assert_eq!(binary(Add, &int(2), &int(3)), int(5));
        assert_eq!(binary(Mod, &int(7), &int(3)), int(1));
        assert_eq!(binary(Div, &int(7), &int(2)), int(3));
        assert_eq!(binary(Add, &int(i64::MAX), &int(1)), Object::Error(Fault::Overflow));
        assert_eq!(binary(Div, &int(i64::MIN), &int(-1)), Object::Error(Fault::Overflow));
    }

    #[test]
    fn divide_by_zero_after_type_check() {
        assert_eq!(binary(Div, &int(1), &int(0)), Object::Error(Fault::DivideByZero));
        assert_eq!(binary(Mod, &Object::Float(1.0), &Object::Float(0.0)),
                   Object::Error(Fault::DivideByZero));
        assert_eq!(binary(Div, &int(1), &Object::Float(0.0)), Object::Error(Fault::TypeMismatch));
    }

    #[test]
    fn mismatched_types_are_rejected() {
        assert_eq!(binary(Add, &int(1), &Object::Float(1.0)), Object::Error(Fault::TypeMismatch));
        assert_eq!(binary(Equal, &Object::from("a"), &int(1)), Object::Error(Fault::TypeMismatch));
    }

    #[test]
    fn int_char_coercion() {
        assert_eq!(binary(Add, &Object::Char('a'), &int(1)), Object::Char('b'));
        assert_eq!(binary(Equal, &int(65), &Object::Char('A')), Object::Bool(true));
        assert_eq!(binary(Add, &int(-1), &Object::Char('a')), Object::Error(Fault::ConvertFailed));
    }

    #[test]
    fn strings_concatenate_and_compare() {
        assert_eq!(binary(Add, &Object::from("ab"), &Object::from("cd")), Object::from("abcd"));
        assert_eq!(binary(Equal, &Object::from("x"), &Object::from("x")), Object::Bool(true));
        assert_eq!(binary(NotEqual, &Object::from("x"), &Object::from("y")), Object::Bool(true));
        assert_eq!(binary(Sub, &Object::from("x"), &Object::from("y")),
                   Object::Error(Fault::UnknownType));
        assert_eq!(binary(Less, &Object::from("x"), &Object::from("y")),
                   Object::Error(Fault::UnknownType));
    }

    #[test]
    fn errors_are_forwarded_left_first() {
        let left = Object::Error(Fault::UndefinedVar);
        let right = Object::Error(Fault::DivideByZero);
        assert_eq!(binary(Add, &left, &right), left);
        assert_eq!(binary(Add, &int(1), &right), right);
        assert_eq!(unary(UnaryOperator::Negate, &right), right);
    }

    #[test]
    fn comparisons_and_logic() {
        assert_eq!(binary(LessEqual, &int(2), &int(2)), Object::Bool(true));
        assert_eq!(binary(Greater, &Object::Float(f64::NAN), &Object::Float(1.0)),
                   Object::Bool(false));
        assert_eq!(binary(And, &Object::Bool(true), &Object::Bool(false)), Object::Bool(false));
        assert_eq!(binary(Or, &int(0), &int(3)), Object::Bool(true));
        assert_eq!(binary(And, &Object::from("a"), &Object::from("b")),
                   Object::Error(Fault::UnknownType));
    }

    #[test]
    fn bitwise_and_shifts() {
        assert_eq!(binary(BitAnd, &int(6), &int(3)), int(2));
        assert_eq!(binary(BitOr, &int(6), &int(3)), int(7));
        assert_eq!(binary(BitXor, &int(6), &int(3)), int(5));
        assert_eq!(binary(ShiftLeft, &int(1), &int(4)), int(16));
        assert_eq!(binary(ShiftRight, &int(-16), &int(2)), int(-4));
        assert_eq!(binary(ShiftLeft, &int(1), &int(64)), Object::Error(Fault::Overflow));
    }

    #[test]
    fn unary_operators() {
        assert_eq!(unary(UnaryOperator::Negate, &int(4)), int(-4));
        assert_eq!(unary(UnaryOperator::Negate, &Object::Bool(true)), Object::Error(Fault::Negate));
        assert_eq!(unary(UnaryOperator::Negate, &int(i64::MIN)), Object::Error(Fault::Overflow));
        assert_eq!(unary(UnaryOperator::Not, &Object::Bool(false)), Object::Bool(true));
        assert_eq!(unary(UnaryOperator::Not, &int(1)), Object::Error(Fault::UnknownType));
        assert_eq!(unary(UnaryOperator::BitNot, &int(0)), int(-1));
    }
}
