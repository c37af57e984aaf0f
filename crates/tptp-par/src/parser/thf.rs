//! The THF grammar.
//!
//! Two tiers: `thf_unit_formula` parses one unit (quantified formula,
//! unary chain, atom, bracketed term, `$let`/`$ite`, non-classical
//! operator, …) with an optional trailing equality when the unit is
//! term-shaped; `thf_logic_formula` combines units with the binary
//! connectives, application, and the type constructors. The statement
//! entry peeks under leading `(` to tell typings and sequents from
//! formulas.

use tptp_lex::TokenKind;
use tptp_util::{ParseError, Result};

use crate::ast::thf::{
    self, BinaryConnective, Connective, DefinedTh1Constant, Quantifier, UnaryConnective,
    VararyConnective,
};

use super::{unexpected, Parser, ATOMIC_WORD_KINDS};

fn is_quantifier(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Forall
            | TokenKind::Exists
            | TokenKind::Lambda
            | TokenKind::Choice
            | TokenKind::Description
            | TokenKind::TyForall
            | TokenKind::TyExists
            | TokenKind::Hash
    )
}

fn quantifier_of(kind: TokenKind) -> Quantifier {
    match kind {
        TokenKind::Forall => Quantifier::Forall,
        TokenKind::Exists => Quantifier::Exists,
        TokenKind::Lambda => Quantifier::Lambda,
        TokenKind::Choice => Quantifier::Choice,
        TokenKind::Description => Quantifier::Description,
        TokenKind::TyForall => Quantifier::TypeForall,
        TokenKind::TyExists => Quantifier::TypeExists,
        TokenKind::Hash => Quantifier::Epsilon,
        other => unreachable!("not a THF quantifier: {other:?}"),
    }
}

/// The connectives accepted in connective-as-term position, `(&)` etc.
fn connective_of(kind: TokenKind) -> Option<Connective> {
    let conn = match kind {
        TokenKind::Tilde => return Some(Connective::Unary(UnaryConnective::Not)),
        TokenKind::Or => BinaryConnective::Or,
        TokenKind::And => BinaryConnective::And,
        TokenKind::App => BinaryConnective::App,
        TokenKind::Iff => BinaryConnective::Iff,
        TokenKind::Impl => BinaryConnective::Impl,
        TokenKind::If => BinaryConnective::If,
        TokenKind::Niff => BinaryConnective::Niff,
        TokenKind::Nor => BinaryConnective::Nor,
        TokenKind::Nand => BinaryConnective::Nand,
        TokenKind::Equals => BinaryConnective::Eq,
        TokenKind::NotEquals => BinaryConnective::Neq,
        _ => return None,
    };
    Some(Connective::Binary(conn))
}

fn fold_left(conn: BinaryConnective, operands: Vec<thf::Formula>) -> thf::Formula {
    let mut iter = operands.into_iter();
    let first = iter.next().expect("chain is non-empty");
    iter.fold(first, |acc, operand| {
        thf::Formula::Binary(conn, Box::new(acc), Box::new(operand))
    })
}

fn fold_right(conn: BinaryConnective, operands: Vec<thf::Formula>) -> thf::Formula {
    operands
        .into_iter()
        .rev()
        .reduce(|acc, operand| thf::Formula::Binary(conn, Box::new(operand), Box::new(acc)))
        .expect("chain is non-empty")
}

impl Parser<'_> {
    /// `thf_formula := thf_atom_typing | thf_sequent | thf_logic_formula`
    pub(crate) fn thf_statement(&mut self) -> Result<thf::Statement> {
        let idx = self.peek_under(TokenKind::LParen)?;
        let kind = self.peek_at(idx)?.kind;
        let next = self.safe_peek_kind(idx + 1)?;

        if ATOMIC_WORD_KINDS.contains(&kind) && next == Some(TokenKind::Colon) {
            let (atom, ty) = self.thf_atom_typing()?;
            return Ok(thf::Statement::Typing(atom, ty));
        }

        if kind == TokenKind::LBracket
            && !matches!(next, Some(TokenKind::Dot | TokenKind::Hash))
        {
            if idx > 0 {
                // A parenthesized sequent, or a tuple-headed formula in
                // parentheses; recurse under one paren and continue any
                // operators after the closing paren.
                self.consume()?;
                let inner = self.thf_statement()?;
                self.expect(TokenKind::RParen)?;
                return match inner {
                    thf::Statement::Logical(f) => Ok(thf::Statement::Logical(
                        self.thf_logic_formula_from_unit(f)?,
                    )),
                    sequent => Ok(sequent),
                };
            }
            let lhs = self.thf_tuple()?;
            if self.next_is(TokenKind::SequentArrow)? {
                self.consume()?;
                let rhs = self.thf_tuple()?;
                return Ok(thf::Statement::Sequent(lhs, rhs));
            }
            let formula = self.thf_logic_formula_from_unit(thf::Formula::Tuple(lhs))?;
            return Ok(thf::Statement::Logical(formula));
        }

        Ok(thf::Statement::Logical(self.thf_logic_formula()?))
    }

    /// `atom : type`, possibly nested in parentheses.
    fn thf_atom_typing(&mut self) -> Result<(String, thf::Type)> {
        if self.next_is(TokenKind::LParen)? {
            self.consume()?;
            let typing = self.thf_atom_typing()?;
            self.expect(TokenKind::RParen)?;
            return Ok(typing);
        }
        let atom = self.atomic_word()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.thf_logic_formula()?;
        Ok((atom, ty))
    }

    /// A full THF formula: a unit plus binary operators.
    pub(crate) fn thf_logic_formula(&mut self) -> Result<thf::Formula> {
        let unit = self.thf_unit_formula(true)?;
        self.thf_logic_formula_from_unit(unit)
    }

    /// Continues binary operators after an already-parsed unit.
    ///
    /// `@` is left-associative, `|`/`&` are right-associative, `>` is a
    /// right-associative type arrow, `*`/`+` left-associative type
    /// constructors; the remaining connectives are non-associative and
    /// consume exactly one more unit. Chains extend over one operator
    /// only, as in the strict grammar.
    fn thf_logic_formula_from_unit(&mut self, first: thf::Formula) -> Result<thf::Formula> {
        let Some(kind) = self.safe_peek_kind(0)? else {
            return Ok(first);
        };
        match kind {
            TokenKind::Or | TokenKind::And | TokenKind::App => {
                let conn = match kind {
                    TokenKind::Or => BinaryConnective::Or,
                    TokenKind::And => BinaryConnective::And,
                    _ => BinaryConnective::App,
                };
                let mut operands = vec![first];
                while self.safe_peek_kind(0)? == Some(kind) {
                    self.consume()?;
                    operands.push(self.thf_unit_formula(true)?);
                }
                Ok(if kind == TokenKind::App {
                    fold_left(conn, operands)
                } else {
                    fold_right(conn, operands)
                })
            }
            TokenKind::Iff
            | TokenKind::Impl
            | TokenKind::If
            | TokenKind::Niff
            | TokenKind::Nor
            | TokenKind::Nand
            | TokenKind::Assignment
            | TokenKind::Identity => {
                let conn = match kind {
                    TokenKind::Iff => BinaryConnective::Iff,
                    TokenKind::Impl => BinaryConnective::Impl,
                    TokenKind::If => BinaryConnective::If,
                    TokenKind::Niff => BinaryConnective::Niff,
                    TokenKind::Nor => BinaryConnective::Nor,
                    TokenKind::Nand => BinaryConnective::Nand,
                    TokenKind::Assignment => BinaryConnective::Assign,
                    _ => BinaryConnective::Identity,
                };
                self.consume()?;
                let rhs = self.thf_unit_formula(true)?;
                Ok(thf::Formula::Binary(conn, Box::new(first), Box::new(rhs)))
            }
            TokenKind::RAngle => {
                let mut items = vec![first];
                while self.safe_peek_kind(0)? == Some(TokenKind::RAngle) {
                    self.consume()?;
                    items.push(self.thf_unit_formula(true)?);
                }
                Ok(fold_right(BinaryConnective::FunType, items))
            }
            TokenKind::Star | TokenKind::Plus => {
                let conn = if kind == TokenKind::Star {
                    BinaryConnective::ProductType
                } else {
                    BinaryConnective::SumType
                };
                let mut acc = first;
                while self.safe_peek_kind(0)? == Some(kind) {
                    self.consume()?;
                    let rhs = self.thf_unit_formula(true)?;
                    acc = thf::Formula::Binary(conn, Box::new(acc), Box::new(rhs));
                }
                Ok(acc)
            }
            _ => Ok(first),
        }
    }

    /// One THF unit. When `accept_equality` holds and the unit is
    /// term-shaped, a trailing `=`/`!=` extends it to an equation whose
    /// right side must again be a unitary term.
    fn thf_unit_formula(&mut self, accept_equality: bool) -> Result<thf::Formula> {
        use thf::Formula as F;

        let kind = self.peek_kind()?;
        let mut feasible = false;
        let formula = match kind {
            k if is_quantifier(k) => self.thf_quantified_formula()?,
            TokenKind::Tilde => {
                self.consume()?;
                let body = self.thf_unit_formula(false)?;
                F::Unary(UnaryConnective::Not, Box::new(body))
            }
            TokenKind::ForallComb
            | TokenKind::ExistsComb
            | TokenKind::ChoiceComb
            | TokenKind::DescriptionComb
            | TokenKind::EqComb => {
                let constant = match kind {
                    TokenKind::ForallComb => DefinedTh1Constant::ForallComb,
                    TokenKind::ExistsComb => DefinedTh1Constant::ExistsComb,
                    TokenKind::ChoiceComb => DefinedTh1Constant::ChoiceComb,
                    TokenKind::DescriptionComb => DefinedTh1Constant::DescriptionComb,
                    _ => DefinedTh1Constant::EqComb,
                };
                self.consume()?;
                feasible = true;
                F::DefinedTh1Constant(constant)
            }
            TokenKind::LowerWord
            | TokenKind::SingleQuoted
            | TokenKind::DollarWord
            | TokenKind::DollarDollarWord => {
                let word = self.peek()?.value.to_string();
                let applied = self.safe_peek_kind(1)? == Some(TokenKind::LParen);
                feasible = true;
                if word == "$ite" && applied {
                    self.thf_conditional()?
                } else if word == "$let" && applied {
                    self.thf_let()?
                } else {
                    self.consume()?;
                    let args = if applied { self.thf_arguments()? } else { Vec::new() };
                    F::Function(word, args)
                }
            }
            TokenKind::UpperWord => {
                feasible = true;
                F::Variable(self.consume()?.value.into_owned())
            }
            TokenKind::DoubleQuoted => {
                feasible = true;
                F::DistinctObject(self.consume()?.value.into_owned())
            }
            TokenKind::Int | TokenKind::Rational | TokenKind::Real => {
                feasible = true;
                let tok = self.consume()?;
                F::Number(self.number_of(&tok)?)
            }
            TokenKind::LParen => {
                self.consume()?;
                let as_term = match (self.safe_peek_kind(0)?, self.safe_peek_kind(1)?) {
                    (Some(k), Some(TokenKind::RParen)) => connective_of(k),
                    _ => None,
                };
                feasible = true;
                if let Some(conn) = as_term {
                    self.consume()?;
                    self.consume()?;
                    F::ConnectiveTerm(conn)
                } else {
                    let inner = self.thf_logic_formula()?;
                    self.expect(TokenKind::RParen)?;
                    inner
                }
            }
            TokenKind::LBracket => match self.safe_peek_kind(1)? {
                Some(TokenKind::Dot) => {
                    self.consume()?;
                    self.consume()?;
                    self.expect(TokenKind::RBracket)?;
                    let body = self.thf_unit_formula(false)?;
                    F::NonclassicalPolyary(VararyConnective::Box(None), vec![body])
                }
                Some(TokenKind::Hash) => {
                    self.consume()?;
                    let index = self.thf_nonclassical_index()?;
                    self.expect(TokenKind::RBracket)?;
                    let body = self.thf_unit_formula(false)?;
                    F::NonclassicalPolyary(VararyConnective::Box(Some(index)), vec![body])
                }
                _ => F::Tuple(self.thf_tuple()?),
            },
            TokenKind::LAngle => {
                self.consume()?;
                let index = self.thf_nonclassical_short_index(TokenKind::RAngle)?;
                let body = self.thf_unit_formula(false)?;
                F::NonclassicalPolyary(VararyConnective::Diamond(index), vec![body])
            }
            TokenKind::Slash => {
                self.consume()?;
                let index = self.thf_nonclassical_short_index(TokenKind::Backslash)?;
                let body = self.thf_unit_formula(false)?;
                F::NonclassicalPolyary(VararyConnective::Cone(index), vec![body])
            }
            TokenKind::LBrace => self.thf_nonclassical_long_form()?,
            _ => return Err(unexpected("<thf_unit_formula>", self.peek()?)),
        };

        if accept_equality {
            if let Some(op @ (TokenKind::Equals | TokenKind::NotEquals)) = self.safe_peek_kind(0)?
            {
                if !feasible {
                    return Err(unexpected("<thf_unitary_term>", self.peek()?));
                }
                self.consume()?;
                let rhs_kind = self.peek_kind()?;
                if is_quantifier(rhs_kind) || rhs_kind == TokenKind::Tilde {
                    return Err(unexpected("<thf_unitary_term>", self.peek()?));
                }
                let rhs = self.thf_unit_formula(false)?;
                let conn = if op == TokenKind::Equals {
                    BinaryConnective::Eq
                } else {
                    BinaryConnective::Neq
                };
                return Ok(F::Binary(conn, Box::new(formula), Box::new(rhs)));
            }
        }

        Ok(formula)
    }

    fn thf_quantified_formula(&mut self) -> Result<thf::Formula> {
        let quantifier = quantifier_of(self.consume()?.kind);
        self.expect(TokenKind::LBracket)?;
        let mut variables = vec![self.thf_typed_variable()?];
        while self.next_is(TokenKind::Comma)? {
            self.consume()?;
            variables.push(self.thf_typed_variable()?);
        }
        self.expect(TokenKind::RBracket)?;
        self.expect(TokenKind::Colon)?;
        let body = self.thf_unit_formula(true)?;
        Ok(thf::Formula::Quantified(
            quantifier,
            variables,
            Box::new(body),
        ))
    }

    fn thf_typed_variable(&mut self) -> Result<thf::TypedVariable> {
        let name = self.expect(TokenKind::UpperWord)?.value.into_owned();
        let ty = if self.next_is(TokenKind::Colon)? {
            self.consume()?;
            Some(self.thf_logic_formula()?)
        } else {
            None
        };
        Ok((name, ty))
    }

    /// FOF-style argument list: `(formula, …)`.
    fn thf_arguments(&mut self) -> Result<Vec<thf::Formula>> {
        self.expect(TokenKind::LParen)?;
        let mut args = vec![self.thf_logic_formula()?];
        while self.next_is(TokenKind::Comma)? {
            self.consume()?;
            args.push(self.thf_logic_formula()?);
        }
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }

    /// `[a, b, …]`, empty allowed.
    fn thf_tuple(&mut self) -> Result<Vec<thf::Formula>> {
        self.expect(TokenKind::LBracket)?;
        let mut elements = Vec::new();
        if !self.next_is(TokenKind::RBracket)? {
            loop {
                elements.push(self.thf_logic_formula()?);
                if self.next_is(TokenKind::Comma)? {
                    self.consume()?;
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RBracket)?;
        Ok(elements)
    }

    /// `$ite(cond, then, else)`
    fn thf_conditional(&mut self) -> Result<thf::Formula> {
        self.consume()?;
        self.expect(TokenKind::LParen)?;
        let condition = self.thf_logic_formula()?;
        self.expect(TokenKind::Comma)?;
        let then = self.thf_logic_formula()?;
        self.expect(TokenKind::Comma)?;
        let els = self.thf_logic_formula()?;
        self.expect(TokenKind::RParen)?;
        Ok(thf::Formula::Conditional(
            Box::new(condition),
            Box::new(then),
            Box::new(els),
        ))
    }

    /// `$let(typings, bindings, body)`; typings and bindings may each be
    /// a single entry or a bracketed list.
    fn thf_let(&mut self) -> Result<thf::Formula> {
        self.consume()?;
        self.expect(TokenKind::LParen)?;
        let mut typings = Vec::new();
        if self.next_is(TokenKind::LBracket)? {
            self.consume()?;
            loop {
                typings.push(self.thf_let_typing()?);
                if self.next_is(TokenKind::Comma)? {
                    self.consume()?;
                } else {
                    break;
                }
            }
            self.expect(TokenKind::RBracket)?;
        } else {
            typings.push(self.thf_let_typing()?);
        }
        self.expect(TokenKind::Comma)?;
        let mut bindings = Vec::new();
        if self.next_is(TokenKind::LBracket)? {
            self.consume()?;
            loop {
                bindings.push(self.thf_let_binding()?);
                if self.next_is(TokenKind::Comma)? {
                    self.consume()?;
                } else {
                    break;
                }
            }
            self.expect(TokenKind::RBracket)?;
        } else {
            bindings.push(self.thf_let_binding()?);
        }
        self.expect(TokenKind::Comma)?;
        let body = self.thf_logic_formula()?;
        self.expect(TokenKind::RParen)?;
        Ok(thf::Formula::Let(typings, bindings, Box::new(body)))
    }

    fn thf_let_typing(&mut self) -> Result<(String, thf::Type)> {
        let atom = self.atomic_word()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.thf_logic_formula()?;
        Ok((atom, ty))
    }

    fn thf_let_binding(&mut self) -> Result<(thf::Formula, thf::Formula)> {
        let pos = self.peek()?.pos;
        match self.thf_logic_formula()? {
            thf::Formula::Binary(BinaryConnective::Assign, lhs, rhs) => Ok((*lhs, *rhs)),
            _ => Err(ParseError::malformed("Expected a := binding in $let", pos)),
        }
    }

    /// `#index` after a short-form opener.
    fn thf_nonclassical_index(&mut self) -> Result<Box<thf::Formula>> {
        self.expect(TokenKind::Hash)?;
        let tok = self.expect_one_of(&[
            TokenKind::LowerWord,
            TokenKind::DollarWord,
            TokenKind::UpperWord,
            TokenKind::Int,
        ])?;
        let index = match tok.kind {
            TokenKind::UpperWord => thf::Formula::Variable(tok.value.into_owned()),
            TokenKind::Int => thf::Formula::Number(self.number_of(&tok)?),
            _ => thf::Formula::Function(tok.value.into_owned(), Vec::new()),
        };
        Ok(Box::new(index))
    }

    /// The `.`-or-`#index` middle of `<.>` and `/.\`, up to `closer`.
    fn thf_nonclassical_short_index(
        &mut self,
        closer: TokenKind,
    ) -> Result<Option<Box<thf::Formula>>> {
        let index = match self.peek_kind()? {
            TokenKind::Dot => {
                self.consume()?;
                None
            }
            TokenKind::Hash => Some(self.thf_nonclassical_index()?),
            _ => {
                return Err(unexpected(
                    &format!("one of {},{}", TokenKind::Dot, TokenKind::Hash),
                    self.peek()?,
                ))
            }
        };
        self.expect(closer)?;
        Ok(index)
    }

    /// `{name(index?, key := value, …)} (@ arg)*`
    fn thf_nonclassical_long_form(&mut self) -> Result<thf::Formula> {
        self.expect(TokenKind::LBrace)?;
        let name = self.atomic_word()?;
        let mut index = None;
        let mut parameters = Vec::new();
        if self.next_is(TokenKind::LParen)? {
            self.consume()?;
            if self.next_is(TokenKind::Hash)? {
                index = Some(self.thf_nonclassical_index()?);
            } else {
                parameters.push(self.thf_nonclassical_parameter()?);
            }
            while self.next_is(TokenKind::Comma)? {
                self.consume()?;
                parameters.push(self.thf_nonclassical_parameter()?);
            }
            self.expect(TokenKind::RParen)?;
        }
        self.expect(TokenKind::RBrace)?;
        let mut args = Vec::new();
        while self.next_is(TokenKind::App)? {
            self.consume()?;
            args.push(self.thf_unit_formula(false)?);
        }
        // {$box}/{$dia}/{$cone} are the long spellings of the short-form
        // operators; canonicalize so indexed short forms survive the
        // long-form serialization.
        let connective = match (name.as_str(), parameters.is_empty()) {
            ("$box", true) => VararyConnective::Box(index),
            ("$dia", true) => VararyConnective::Diamond(index),
            ("$cone", true) => VararyConnective::Cone(index),
            _ => VararyConnective::LongOperator {
                name,
                index,
                parameters,
            },
        };
        Ok(thf::Formula::NonclassicalPolyary(connective, args))
    }

    fn thf_nonclassical_parameter(&mut self) -> Result<(String, thf::Formula)> {
        let key = self.expect(TokenKind::LowerWord)?.value.into_owned();
        self.expect(TokenKind::Assignment)?;
        let value = self.thf_logic_formula()?;
        Ok((key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::thf::Formula as F;

    fn parse(source: &str) -> thf::Formula {
        let mut parser = Parser::new(source);
        let formula = parser.thf_logic_formula().expect("parse error");
        parser.expect_end().expect("trailing input");
        formula
    }

    fn parse_statement(source: &str) -> thf::Statement {
        let mut parser = Parser::new(source);
        let statement = parser.thf_statement().expect("parse error");
        parser.expect_end().expect("trailing input");
        statement
    }

    #[test]
    fn application_is_left_associative() {
        let f = parse("a @ b @ c");
        let F::Binary(BinaryConnective::App, left, _) = f else {
            panic!("expected application");
        };
        assert!(matches!(
            *left,
            F::Binary(BinaryConnective::App, _, _)
        ));
    }

    #[test]
    fn disjunction_is_right_associative() {
        let f = parse("a | b | c");
        let F::Binary(BinaryConnective::Or, _, right) = f else {
            panic!("expected disjunction");
        };
        assert!(matches!(*right, F::Binary(BinaryConnective::Or, _, _)));
    }

    #[test]
    fn mapping_type_is_right_associative() {
        let f = parse("a > b > c");
        let F::Binary(BinaryConnective::FunType, _, right) = f else {
            panic!("expected mapping type");
        };
        assert!(matches!(
            *right,
            F::Binary(BinaryConnective::FunType, _, _)
        ));
    }

    #[test]
    fn quantified_formula() {
        let f = parse("! [X: $i]: (p @ X)");
        let F::Quantified(Quantifier::Forall, vars, body) = f else {
            panic!("expected quantified formula");
        };
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].0, "X");
        assert!(matches!(*body, F::Binary(BinaryConnective::App, _, _)));
    }

    #[test]
    fn lambda_with_untyped_variable() {
        let f = parse("^ [X]: X");
        assert!(matches!(f, F::Quantified(Quantifier::Lambda, _, _)));
    }

    #[test]
    fn equality_requires_unitary_rhs() {
        let mut parser = Parser::new("a = ! [X]: p");
        let err = parser.thf_logic_formula().unwrap_err();
        assert!(err.to_string().contains("<thf_unitary_term>"), "{err}");
    }

    #[test]
    fn equality_after_tuple_is_rejected() {
        let mut parser = Parser::new("[a,b] = c");
        let err = parser.thf_logic_formula().unwrap_err();
        assert!(err.to_string().contains("<thf_unitary_term>"), "{err}");
    }

    #[test]
    fn connective_as_term() {
        let f = parse("(&) @ a @ b");
        let F::Binary(BinaryConnective::App, left, _) = f else {
            panic!("expected application");
        };
        assert!(matches!(
            *left,
            F::Binary(BinaryConnective::App, ref l, _)
                if matches!(**l, F::ConnectiveTerm(Connective::Binary(BinaryConnective::And)))
        ));
    }

    #[test]
    fn defined_th1_constants() {
        assert!(matches!(
            parse("!!"),
            F::DefinedTh1Constant(DefinedTh1Constant::ForallComb)
        ));
        assert!(matches!(
            parse("?? @ p"),
            F::Binary(BinaryConnective::App, _, _)
        ));
    }

    #[test]
    fn conditional_and_let() {
        let f = parse("$ite(c, t, e)");
        assert!(matches!(f, F::Conditional(_, _, _)));

        let f = parse("$let(f: $i, f := a, p @ f)");
        let F::Let(typings, bindings, _) = f else {
            panic!("expected let");
        };
        assert_eq!(typings.len(), 1);
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn nonclassical_short_forms() {
        let f = parse("[.] (p)");
        assert!(matches!(
            f,
            F::NonclassicalPolyary(VararyConnective::Box(None), _)
        ));
        let f = parse("<.> (p)");
        assert!(matches!(
            f,
            F::NonclassicalPolyary(VararyConnective::Diamond(None), _)
        ));
        let f = parse("/.\\ (p)");
        assert!(matches!(
            f,
            F::NonclassicalPolyary(VararyConnective::Cone(None), _)
        ));
    }

    #[test]
    fn nonclassical_indexed_short_form() {
        let f = parse("[#idx] (p)");
        let F::NonclassicalPolyary(VararyConnective::Box(Some(index)), args) = f else {
            panic!("expected indexed box");
        };
        assert!(matches!(*index, F::Function(ref name, _) if name == "idx"));
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn nonclassical_long_form() {
        let f = parse("{$box(#1, k := v)} @ (p) @ (q)");
        let F::NonclassicalPolyary(
            VararyConnective::LongOperator {
                name,
                index,
                parameters,
            },
            args,
        ) = f
        else {
            panic!("expected long operator");
        };
        assert_eq!(name, "$box");
        assert!(index.is_some());
        assert_eq!(parameters.len(), 1);
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn typing_statement() {
        let s = parse_statement("f: $i > $o");
        let thf::Statement::Typing(atom, ty) = s else {
            panic!("expected typing");
        };
        assert_eq!(atom, "f");
        assert!(matches!(
            ty,
            F::Binary(BinaryConnective::FunType, _, _)
        ));
    }

    #[test]
    fn sequent_statement() {
        let s = parse_statement("[a, b] --> [c]");
        let thf::Statement::Sequent(lhs, rhs) = s else {
            panic!("expected sequent");
        };
        assert_eq!((lhs.len(), rhs.len()), (2, 1));
    }

    #[test]
    fn parenthesized_sequent() {
        let s = parse_statement("([a] --> [b])");
        assert!(matches!(s, thf::Statement::Sequent(_, _)));
    }

    #[test]
    fn tuple_formula_statement() {
        let s = parse_statement("[a, b]");
        assert!(matches!(
            s,
            thf::Statement::Logical(F::Tuple(ref elements)) if elements.len() == 2
        ));
    }
}
