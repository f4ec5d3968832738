/// The runtime object.
///
/// Defines [`Object`](core::Object), its type tag, formatting for `print`,
/// the in-band error channel and explicit conversions used by `cast`.
pub mod core;
/// Operator semantics.
///
/// Implements every unary and binary operator over objects. All operators are
/// total: invalid operands produce an `Object::Error` instead of panicking, and
/// errors already present in an operand are forwarded unchanged.
pub mod operators;
