use dx_error::Error;
use dx_parser::{
    parser::ast::Func,
    tokenizer::{tokenize_complete, TokenKind},
};
use super::error::{InvalidVariable, InvalidVariableReason};

/// The variable of differentiation, a single identifier that is not a function name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    name: String,
}

impl Variable {
    /// Validates the given variable name. Whitespace around the name is ignored.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let name = source.trim();
        let start = source.len() - source.trim_start().len();
        let span = start..start + name.len();
        let reject = |reason: InvalidVariableReason| -> Result<Self, Error> {
            Err(Error::new(vec![span.clone()], InvalidVariable { reason }))
        };

        if name.is_empty() {
            return reject(InvalidVariableReason::Empty);
        }

        let tokens = tokenize_complete(name);
        if !matches!(&*tokens, [token] if token.kind == TokenKind::Name) {
            return reject(InvalidVariableReason::NotIdentifier);
        }

        if Func::from_name(name).is_some() {
            return reject(InvalidVariableReason::FunctionName);
        }

        Ok(Self { name: name.to_owned() })
    }

    /// Returns the name of the variable.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn reason(source: &str) -> Option<InvalidVariableReason> {
        Variable::parse(source)
            .err()
            .and_then(|err| err.downcast_ref::<InvalidVariable>().map(|kind| kind.reason))
    }

    #[test]
    fn valid_names() {
        assert_eq!(Variable::parse("x").unwrap().name(), "x");
        assert_eq!(Variable::parse("  theta_2 ").unwrap().name(), "theta_2");
    }

    #[test]
    fn invalid_names() {
        assert_eq!(reason(""), Some(InvalidVariableReason::Empty));
        assert_eq!(reason("   "), Some(InvalidVariableReason::Empty));
        assert_eq!(reason("x y"), Some(InvalidVariableReason::NotIdentifier));
        assert_eq!(reason("2x"), Some(InvalidVariableReason::NotIdentifier));
        assert_eq!(reason("x+"), Some(InvalidVariableReason::NotIdentifier));
        assert_eq!(reason("sin"), Some(InvalidVariableReason::FunctionName));
    }

    #[test]
    fn span_skips_whitespace() {
        let err = Variable::parse("  2x").unwrap_err();
        assert_eq!(err.spans, vec![2..4]);
    }
}
