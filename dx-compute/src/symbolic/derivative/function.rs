//! Symbolic derivatives of the supported functions.

use crate::symbolic::expr::SymExpr;
use dx_parser::parser::ast::Func;
use super::{derivative, MultBuilder, SymbolicDerivativeError};

/// Computes the derivative of `func(arg)` and applies the chain rule, multiplying by the
/// derivative of `arg`.
pub(super) fn function_derivative(func: Func, arg: &SymExpr, with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let mut mult_group = MultBuilder::default();
    mult_group.mult(derivative(arg, with)?);

    let call = |func| SymExpr::call(func, arg.clone());
    match func {
        Func::Sin => mult_group.mult(call(Func::Cos)),
        Func::Cos => {
            mult_group.mult(SymExpr::number(-1));
            mult_group.mult(call(Func::Sin));
        },
        Func::Tan => mult_group.mult(call(Func::Sec).pow(SymExpr::number(2))),
        Func::Cot => {
            mult_group.mult(SymExpr::number(-1));
            mult_group.mult(call(Func::Csc).pow(SymExpr::number(2)));
        },
        Func::Sec => {
            mult_group.mult(call(Func::Sec));
            mult_group.mult(call(Func::Tan));
        },
        Func::Csc => {
            mult_group.mult(SymExpr::number(-1));
            mult_group.mult(call(Func::Csc));
            mult_group.mult(call(Func::Cot));
        },
        Func::Exp => mult_group.mult(call(Func::Exp)),
        Func::Log => mult_group.mult(arg.clone().recip()),
        Func::Sqrt => {
            // d/dx sqrt(a) = 1 / (2 * sqrt(a))
            mult_group.mult(SymExpr::number((1, 2)));
            mult_group.mult(call(Func::Sqrt).recip());
        },
    }

    Ok(mult_group.into())
}
