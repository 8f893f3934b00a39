//! Numerical evaluation of [`SymExpr`]s, used to check symbolic results against sample points.

use crate::symbolic::expr::{Primary, SymExpr};
use dx_parser::{parse, parser::ast::Func};

/// Parses and binds an expression in the variable `x`.
pub fn bind_x(source: &str) -> SymExpr {
    let ast = parse(source).unwrap();
    SymExpr::bind(&ast, &["x"]).unwrap()
}

/// Evaluates the expression with `x` set to the given value.
pub fn eval_x(expr: &SymExpr, x: f64) -> f64 {
    eval(expr, "x", x)
}

/// Evaluates the expression with the symbol `var` set to the given value.
pub fn eval(expr: &SymExpr, var: &str, value: f64) -> f64 {
    match expr {
        SymExpr::Primary(Primary::Number(n)) => n.to_f64(),
        SymExpr::Primary(Primary::Symbol(sym)) => {
            assert_eq!(sym, var, "unexpected symbol in expression");
            value
        },
        SymExpr::Primary(Primary::Call(func, arg)) => {
            let arg = eval(arg, var, value);
            match func {
                Func::Sin => arg.sin(),
                Func::Cos => arg.cos(),
                Func::Tan => arg.tan(),
                Func::Cot => arg.tan().recip(),
                Func::Sec => arg.cos().recip(),
                Func::Csc => arg.sin().recip(),
                Func::Exp => arg.exp(),
                Func::Log => arg.ln(),
                Func::Sqrt => arg.sqrt(),
            }
        },
        SymExpr::Add(terms) => terms.iter().map(|term| eval(term, var, value)).sum(),
        SymExpr::Mul(factors) => factors.iter().map(|factor| eval(factor, var, value)).product(),
        SymExpr::Exp(base, exp) => eval(base, var, value).powf(eval(exp, var, value)),
    }
}
