//! The FOF grammar (also used by TPI).
//!
//! A strict subset of TFF: no types, no TFX productions, no non-classical
//! operators. Quantifiers bind plain upper-word variables; equality and
//! inequality attach at term level.

use tptp_lex::TokenKind;
use tptp_util::{ParseError, Result};

use crate::ast::fof::{self, BinaryConnective, Quantifier, UnaryConnective};

use super::{unexpected, Parser};

fn binary_connective_of(kind: TokenKind) -> Option<BinaryConnective> {
    Some(match kind {
        TokenKind::Iff => BinaryConnective::Iff,
        TokenKind::Impl => BinaryConnective::Impl,
        TokenKind::If => BinaryConnective::If,
        TokenKind::Niff => BinaryConnective::Niff,
        TokenKind::Nor => BinaryConnective::Nor,
        TokenKind::Nand => BinaryConnective::Nand,
        TokenKind::Or => BinaryConnective::Or,
        TokenKind::And => BinaryConnective::And,
        _ => return None,
    })
}

fn fold_right(conn: BinaryConnective, operands: Vec<fof::Formula>) -> fof::Formula {
    operands
        .into_iter()
        .rev()
        .reduce(|acc, operand| fof::Formula::Binary(conn, Box::new(operand), Box::new(acc)))
        .expect("chain is non-empty")
}

impl Parser<'_> {
    pub(crate) fn fof_statement(&mut self) -> Result<fof::Statement> {
        Ok(fof::Statement::Logical(self.fof_logic_formula()?))
    }

    pub(crate) fn fof_logic_formula(&mut self) -> Result<fof::Formula> {
        let first = self.fof_unit_formula()?;
        let Some(kind) = self.safe_peek_kind(0)? else {
            return Ok(first);
        };
        match kind {
            TokenKind::Or | TokenKind::And => {
                let conn = binary_connective_of(kind).expect("or/and");
                let mut operands = vec![first];
                while self.safe_peek_kind(0)? == Some(kind) {
                    self.consume()?;
                    operands.push(self.fof_unit_formula()?);
                }
                Ok(fold_right(conn, operands))
            }
            _ => match binary_connective_of(kind) {
                Some(conn) => {
                    self.consume()?;
                    let rhs = self.fof_unit_formula()?;
                    Ok(fof::Formula::Binary(conn, Box::new(first), Box::new(rhs)))
                }
                None => Ok(first),
            },
        }
    }

    fn fof_unit_formula(&mut self) -> Result<fof::Formula> {
        use fof::Formula as F;
        use fof::Term as T;

        match self.peek_kind()? {
            TokenKind::Forall | TokenKind::Exists | TokenKind::Hash => {
                let quantifier = match self.consume()?.kind {
                    TokenKind::Forall => Quantifier::Forall,
                    TokenKind::Exists => Quantifier::Exists,
                    _ => Quantifier::Epsilon,
                };
                self.expect(TokenKind::LBracket)?;
                let mut variables =
                    vec![self.expect(TokenKind::UpperWord)?.value.into_owned()];
                while self.next_is(TokenKind::Comma)? {
                    self.consume()?;
                    variables.push(self.expect(TokenKind::UpperWord)?.value.into_owned());
                }
                self.expect(TokenKind::RBracket)?;
                self.expect(TokenKind::Colon)?;
                let body = self.fof_unit_formula()?;
                Ok(F::Quantified(quantifier, variables, Box::new(body)))
            }
            TokenKind::Tilde => {
                self.consume()?;
                let body = self.fof_unit_formula()?;
                Ok(F::Unary(UnaryConnective::Not, Box::new(body)))
            }
            TokenKind::LParen => {
                self.consume()?;
                let inner = self.fof_logic_formula()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LowerWord
            | TokenKind::SingleQuoted
            | TokenKind::DollarWord
            | TokenKind::DollarDollarWord => {
                let word = self.consume()?.value.into_owned();
                let args = if self.next_is(TokenKind::LParen)? {
                    self.fof_arguments()?
                } else {
                    Vec::new()
                };
                match self.safe_peek_kind(0)? {
                    Some(op @ (TokenKind::Equals | TokenKind::NotEquals)) => {
                        self.consume()?;
                        let rhs = self.fof_term()?;
                        let lhs = T::Atomic(word, args);
                        Ok(if op == TokenKind::Equals {
                            F::Equality(lhs, rhs)
                        } else {
                            F::Inequality(lhs, rhs)
                        })
                    }
                    _ => Ok(F::Atomic(word, args)),
                }
            }
            TokenKind::UpperWord => {
                let tok = self.consume()?;
                let pos = tok.pos;
                let lhs = T::Variable(tok.value.into_owned());
                match self.safe_peek_kind(0)? {
                    Some(op @ (TokenKind::Equals | TokenKind::NotEquals)) => {
                        self.consume()?;
                        let rhs = self.fof_term()?;
                        Ok(if op == TokenKind::Equals {
                            F::Equality(lhs, rhs)
                        } else {
                            F::Inequality(lhs, rhs)
                        })
                    }
                    _ => Err(ParseError::malformed(
                        "Unexpected variable at formula level",
                        pos,
                    )),
                }
            }
            TokenKind::Int | TokenKind::Rational | TokenKind::Real | TokenKind::DoubleQuoted => {
                let tok = self.consume()?;
                let lhs = if tok.kind == TokenKind::DoubleQuoted {
                    T::DistinctObject(tok.value.into_owned())
                } else {
                    T::Number(self.number_of(&tok)?)
                };
                let op = self.expect_one_of(&[TokenKind::Equals, TokenKind::NotEquals])?;
                let rhs = self.fof_term()?;
                Ok(if op.kind == TokenKind::Equals {
                    F::Equality(lhs, rhs)
                } else {
                    F::Inequality(lhs, rhs)
                })
            }
            _ => Err(unexpected("<fof_logic_formula>", self.peek()?)),
        }
    }

    fn fof_arguments(&mut self) -> Result<Vec<fof::Term>> {
        self.expect(TokenKind::LParen)?;
        let mut args = vec![self.fof_term()?];
        while self.next_is(TokenKind::Comma)? {
            self.consume()?;
            args.push(self.fof_term()?);
        }
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }

    pub(crate) fn fof_term(&mut self) -> Result<fof::Term> {
        use fof::Term as T;
        match self.peek_kind()? {
            TokenKind::LowerWord
            | TokenKind::SingleQuoted
            | TokenKind::DollarWord
            | TokenKind::DollarDollarWord => {
                let word = self.consume()?.value.into_owned();
                let args = if self.next_is(TokenKind::LParen)? {
                    self.fof_arguments()?
                } else {
                    Vec::new()
                };
                Ok(T::Atomic(word, args))
            }
            TokenKind::UpperWord => Ok(T::Variable(self.consume()?.value.into_owned())),
            TokenKind::DoubleQuoted => {
                Ok(T::DistinctObject(self.consume()?.value.into_owned()))
            }
            TokenKind::Int | TokenKind::Rational | TokenKind::Real => {
                let tok = self.consume()?;
                Ok(T::Number(self.number_of(&tok)?))
            }
            _ => Err(unexpected("<fof_term>", self.peek()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::fof::{Formula as F, Term as T};

    fn parse(source: &str) -> fof::Formula {
        let mut parser = Parser::new(source);
        let formula = parser.fof_logic_formula().expect("parse error");
        parser.expect_end().expect("trailing input");
        formula
    }

    #[test]
    fn binary_formula() {
        let f = parse("(p(X) & q)");
        let F::Binary(BinaryConnective::And, left, right) = f else {
            panic!("expected conjunction");
        };
        assert!(matches!(*left, F::Atomic(ref w, ref args) if w == "p" && args.len() == 1));
        assert!(matches!(*right, F::Atomic(ref w, ref args) if w == "q" && args.is_empty()));
    }

    #[test]
    fn quantified_formula() {
        let f = parse("! [X, Y]: (p(X) => q(Y))");
        let F::Quantified(Quantifier::Forall, vars, body) = f else {
            panic!("expected quantified formula");
        };
        assert_eq!(vars, vec!["X".to_string(), "Y".to_string()]);
        assert!(matches!(*body, F::Binary(BinaryConnective::Impl, _, _)));
    }

    #[test]
    fn equality_of_terms() {
        let f = parse("f(X) != g(Y, \"d\")");
        let F::Inequality(l, r) = f else {
            panic!("expected inequality");
        };
        assert!(matches!(l, T::Atomic(ref w, _) if w == "f"));
        assert!(matches!(r, T::Atomic(ref w, ref args) if w == "g" && args.len() == 2));
    }

    #[test]
    fn quoted_lower_word_is_canonicalized() {
        // 'p' and p are the same atom once the quotes are resolved.
        assert_eq!(parse("'p'(X)"), parse("p(X)"));
    }

    #[test]
    fn chained_nonassoc_connective_stops() {
        // `a => b => c` is not grammatical; the parser stops after one
        // unit and the caller sees the stray token.
        let mut parser = Parser::new("a => b => c");
        let f = parser.fof_logic_formula().unwrap();
        assert!(matches!(f, F::Binary(BinaryConnective::Impl, _, _)));
        assert!(parser.expect_end().is_err());
    }

    #[test]
    fn bare_variable_is_rejected() {
        let mut parser = Parser::new("X");
        assert!(parser.fof_logic_formula().is_err());
    }
}
