use super::{Primary, SymExpr};

/// An iterator that traverses the tree of expressions in left-to-right post-order (i.e.
/// depth-first). The arguments of function calls are visited before the call itself.
///
/// This iterator is created by [`SymExpr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a SymExpr>,
    last_visited: Option<&'a SymExpr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that starts at the given expression.
    pub fn new(expr: &'a SymExpr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a SymExpr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression is the last visited expression.
    fn is_last_visited(&self, expr: &'a SymExpr) -> bool {
        self.last_visited.is_some_and(|last| std::ptr::eq(last, expr))
    }

    /// Visits the top of the stack if its children were just visited, otherwise pushes the
    /// children so that they are visited first.
    fn descend(&mut self, expr: &'a SymExpr, children: &'a [SymExpr]) -> Option<Option<&'a SymExpr>> {
        match children.last() {
            Some(last) if !self.is_last_visited(last) => {
                self.stack.extend(children.iter().rev());
                None
            },
            _ => {
                debug_assert!(std::ptr::eq(self.stack.last().copied()?, expr));
                Some(self.visit())
            },
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a SymExpr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            let visited = match expr {
                SymExpr::Primary(Primary::Call(_, arg)) => self.descend(expr, std::slice::from_ref(arg)),
                SymExpr::Primary(_) => Some(self.visit()),
                SymExpr::Add(terms) => self.descend(expr, terms),
                SymExpr::Mul(factors) => self.descend(expr, factors),
                SymExpr::Exp(lhs, rhs) => {
                    if self.is_last_visited(rhs) {
                        Some(self.visit())
                    } else {
                        self.stack.push(rhs);
                        self.stack.push(lhs);
                        None
                    }
                },
            };

            if let Some(visited) = visited {
                return visited;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use dx_parser::parser::ast::Func;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn post_order() {
        // sin(x) + 2*x^3
        let expr = SymExpr::call(Func::Sin, SymExpr::symbol("x"))
            + SymExpr::number(2) * SymExpr::symbol("x").pow(SymExpr::number(3));
        let visited = expr.post_order_iter().map(|e| e.to_string()).collect::<Vec<_>>();

        assert_eq!(visited, vec![
            "x",
            "sin(x)",
            "2",
            "x",
            "3",
            "x**3",
            "2*x**3",
            "sin(x) + 2*x**3",
        ]);
    }
}
