//! The clausal grammars: CNF clauses and TCF (typed clause form).

use tptp_lex::TokenKind;
use tptp_util::Result;

use crate::ast::{cnf, tcf};

use super::{unexpected, Parser, ATOMIC_WORD_KINDS};

impl Parser<'_> {
    /// A CNF statement: a clause, optionally parenthesized.
    pub(crate) fn cnf_statement(&mut self) -> Result<cnf::Statement> {
        if self.next_is(TokenKind::LParen)? {
            self.consume()?;
            let clause = self.cnf_formula()?;
            self.expect(TokenKind::RParen)?;
            return Ok(cnf::Statement::Logical(clause));
        }
        Ok(cnf::Statement::Logical(self.cnf_formula()?))
    }

    /// `clause := literal (| literal)*`
    pub(crate) fn cnf_formula(&mut self) -> Result<cnf::Formula> {
        let mut literals = vec![self.cnf_literal()?];
        while self.next_is(TokenKind::Or)? {
            self.consume()?;
            literals.push(self.cnf_literal()?);
        }
        Ok(cnf::Formula(literals))
    }

    /// `literal := atom | ~ atom | term = term | term != term`
    fn cnf_literal(&mut self) -> Result<cnf::Literal> {
        use cnf::Literal as L;
        use cnf::Term as T;

        match self.peek_kind()? {
            TokenKind::Tilde => {
                self.consume()?;
                let (word, args) = self.cnf_atom()?;
                Ok(L::Negative(word, args))
            }
            k if ATOMIC_WORD_KINDS.contains(&k) => {
                let (word, args) = self.cnf_atom()?;
                match self.safe_peek_kind(0)? {
                    Some(op @ (TokenKind::Equals | TokenKind::NotEquals)) => {
                        self.consume()?;
                        let rhs = self.cnf_term()?;
                        let lhs = T::Atomic(word, args);
                        Ok(if op == TokenKind::Equals {
                            L::Equality(lhs, rhs)
                        } else {
                            L::Inequality(lhs, rhs)
                        })
                    }
                    _ => Ok(L::Positive(word, args)),
                }
            }
            TokenKind::UpperWord
            | TokenKind::DoubleQuoted
            | TokenKind::Int
            | TokenKind::Rational
            | TokenKind::Real => {
                let lhs = self.cnf_term()?;
                let op = self.expect_one_of(&[TokenKind::Equals, TokenKind::NotEquals])?;
                let rhs = self.cnf_term()?;
                Ok(if op.kind == TokenKind::Equals {
                    L::Equality(lhs, rhs)
                } else {
                    L::Inequality(lhs, rhs)
                })
            }
            _ => Err(unexpected("<cnf_literal>", self.peek()?)),
        }
    }

    fn cnf_atom(&mut self) -> Result<(String, Vec<cnf::Term>)> {
        let word = self.atomic_word()?;
        let mut args = Vec::new();
        if self.next_is(TokenKind::LParen)? {
            self.consume()?;
            loop {
                args.push(self.cnf_term()?);
                if self.next_is(TokenKind::Comma)? {
                    self.consume()?;
                } else {
                    break;
                }
            }
            self.expect(TokenKind::RParen)?;
        }
        Ok((word, args))
    }

    fn cnf_term(&mut self) -> Result<cnf::Term> {
        use cnf::Term as T;
        match self.peek_kind()? {
            k if ATOMIC_WORD_KINDS.contains(&k) => {
                let (word, args) = self.cnf_atom()?;
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
            _ => Err(unexpected("<cnf_term>", self.peek()?)),
        }
    }

    // -----------------------------------------------------------------------
    // TCF
    // -----------------------------------------------------------------------

    /// A TCF statement: a TFF typing, or a clause under an optional
    /// universal prefix.
    pub(crate) fn tcf_statement(&mut self) -> Result<tcf::Statement> {
        let idx = self.peek_under(TokenKind::LParen)?;
        let kind = self.peek_at(idx)?.kind;
        let next = self.safe_peek_kind(idx + 1)?;
        if ATOMIC_WORD_KINDS.contains(&kind) && next == Some(TokenKind::Colon) {
            let (atom, ty) = self.tcf_atom_typing()?;
            return Ok(tcf::Statement::Typing(atom, ty));
        }
        Ok(tcf::Statement::Logical(self.tcf_formula()?))
    }

    fn tcf_atom_typing(&mut self) -> Result<(String, crate::ast::tff::Type)> {
        if self.next_is(TokenKind::LParen)? {
            self.consume()?;
            let typing = self.tcf_atom_typing()?;
            self.expect(TokenKind::RParen)?;
            return Ok(typing);
        }
        let atom = self.atomic_word()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.tff_top_level_type()?;
        Ok((atom, ty))
    }

    /// `tcf_formula := (! [typed-vars]:)? cnf_formula`
    pub(crate) fn tcf_formula(&mut self) -> Result<tcf::Formula> {
        if !self.next_is(TokenKind::Forall)? {
            return Ok(tcf::Formula {
                variables: Vec::new(),
                clause: self.cnf_formula()?,
            });
        }
        self.consume()?;
        self.expect(TokenKind::LBracket)?;
        let mut variables = vec![self.tff_typed_variable()?];
        while self.next_is(TokenKind::Comma)? {
            self.consume()?;
            variables.push(self.tff_typed_variable()?);
        }
        self.expect(TokenKind::RBracket)?;
        self.expect(TokenKind::Colon)?;
        let clause = if self.next_is(TokenKind::LParen)? {
            self.consume()?;
            let clause = self.cnf_formula()?;
            self.expect(TokenKind::RParen)?;
            clause
        } else {
            self.cnf_formula()?
        };
        Ok(tcf::Formula { variables, clause })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::cnf::{Literal as L, Term as T};
    use crate::ast::tff::Type;

    fn parse_clause(source: &str) -> cnf::Formula {
        let mut parser = Parser::new(source);
        let clause = parser.cnf_formula().expect("parse error");
        parser.expect_end().expect("trailing input");
        clause
    }

    #[test]
    fn literals_in_order() {
        let clause = parse_clause("p(X) | ~q(X,a) | r(f(b)) = s");
        assert_eq!(clause.0.len(), 3);
        assert!(matches!(clause.0[0], L::Positive(ref w, _) if w == "p"));
        assert!(matches!(clause.0[1], L::Negative(ref w, ref args) if w == "q" && args.len() == 2));
        assert!(matches!(clause.0[2], L::Equality(_, _)));
    }

    #[test]
    fn variable_equality_literal() {
        let clause = parse_clause("X != \"d\"");
        assert!(matches!(
            clause.0[0],
            L::Inequality(T::Variable(_), T::DistinctObject(_))
        ));
    }

    #[test]
    fn parenthesized_clause() {
        let mut parser = Parser::new("(p | q)");
        let cnf::Statement::Logical(clause) = parser.cnf_statement().expect("parse error");
        assert_eq!(clause.0.len(), 2);
    }

    #[test]
    fn bare_variable_is_not_a_literal() {
        let mut parser = Parser::new("X | p");
        assert!(parser.cnf_formula().is_err());
    }

    #[test]
    fn tcf_with_prefix() {
        let mut parser = Parser::new("! [X: $i]: (p(X) | ~ q)");
        let formula = parser.tcf_formula().expect("parse error");
        assert_eq!(formula.variables.len(), 1);
        assert_eq!(formula.clause.0.len(), 2);
    }

    #[test]
    fn tcf_typing_statement() {
        let mut parser = Parser::new("c: $i > $o");
        let tcf::Statement::Typing(atom, ty) = parser.tcf_statement().expect("parse error")
        else {
            panic!("expected typing");
        };
        assert_eq!(atom, "c");
        assert!(matches!(ty, Type::Mapping(_, _)));
    }

    #[test]
    fn tcf_bare_clause() {
        let mut parser = Parser::new("p | q");
        let formula = parser.tcf_formula().expect("parse error");
        assert!(formula.variables.is_empty());
        assert_eq!(formula.clause.0.len(), 2);
    }
}
