//! The TFF grammar, with its TFX extension.
//!
//! The `tfx` flag switches the TFX-only productions (tuples, `$ite`,
//! `$let`, formula variables, formulas as terms, `:=`, `==`, sequents,
//! non-classical operators). Public entry points parse with `tfx = true`;
//! the restricted mode serves the plain-TFF positions.
//!
//! Because TFX lets any formula sit in term position, a parallel family
//! of routines (`tff_logic_formula_or_term`, `tff_unit_formula_or_term`)
//! returns [`tff::Term`], wrapping formulas via [`formula_into_term`].
//! Atomic formulas collapse to atomic terms there, which keeps the
//! embedding canonical under round-trips.

use tptp_lex::TokenKind;
use tptp_util::{ParseError, Position, Result};

use crate::ast::tff::{self, BinaryConnective, Quantifier, UnaryConnective, VararyConnective};

use super::{unexpected, Parser, ATOMIC_WORD_KINDS};

/// Embeds a formula into term position, collapsing the atomic cases.
pub(crate) fn formula_into_term(formula: tff::Formula) -> tff::Term {
    match formula {
        tff::Formula::Atomic(word, args) => tff::Term::Atomic(word, args),
        tff::Formula::FormulaVariable(name) => tff::Term::Variable(name),
        other => tff::Term::Formula(Box::new(other)),
    }
}

/// Reads a term back as a formula where the grammar requires one.
fn term_into_formula(term: tff::Term, pos: Position) -> Result<tff::Formula> {
    match term {
        tff::Term::Formula(f) => Ok(*f),
        tff::Term::Atomic(word, args) => Ok(tff::Formula::Atomic(word, args)),
        tff::Term::Variable(name) => Ok(tff::Formula::FormulaVariable(name)),
        _ => Err(ParseError::malformed(
            "Expected a formula but found a term",
            pos,
        )),
    }
}

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

fn fold_right(conn: BinaryConnective, operands: Vec<tff::Formula>) -> tff::Formula {
    operands
        .into_iter()
        .rev()
        .reduce(|acc, operand| tff::Formula::Binary(conn, Box::new(operand), Box::new(acc)))
        .expect("chain is non-empty")
}

impl Parser<'_> {
    /// `tff_formula := tff_atom_typing | tfx_sequent | tff_logic_formula`
    pub(crate) fn tff_statement(&mut self) -> Result<tff::Statement> {
        let idx = self.peek_under(TokenKind::LParen)?;
        let kind = self.peek_at(idx)?.kind;
        let next = self.safe_peek_kind(idx + 1)?;

        if ATOMIC_WORD_KINDS.contains(&kind) && next == Some(TokenKind::Colon) {
            let (atom, ty) = self.tff_atom_typing()?;
            return Ok(tff::Statement::Typing(atom, ty));
        }

        if kind == TokenKind::LBracket
            && !matches!(next, Some(TokenKind::Dot | TokenKind::Hash))
        {
            if idx > 0 {
                self.consume()?;
                let inner = self.tff_statement()?;
                self.expect(TokenKind::RParen)?;
                return match inner {
                    tff::Statement::Logical(f) => Ok(tff::Statement::Logical(
                        self.tff_logic_formula_from_unit(f, true)?,
                    )),
                    sequent => Ok(sequent),
                };
            }
            let lhs = self.tff_tuple_terms()?;
            if self.next_is(TokenKind::SequentArrow)? {
                self.consume()?;
                let rhs = self.tff_tuple_terms()?;
                return Ok(tff::Statement::Sequent(lhs, rhs));
            }
            let unit = self.tff_tuple_continuation(tff::Term::Tuple(lhs))?;
            let formula = self.tff_logic_formula_from_unit(unit, true)?;
            return Ok(tff::Statement::Logical(formula));
        }

        Ok(tff::Statement::Logical(self.tff_logic_formula(true)?))
    }

    /// `atom : type`, possibly nested in parentheses.
    fn tff_atom_typing(&mut self) -> Result<(String, tff::Type)> {
        if self.next_is(TokenKind::LParen)? {
            self.consume()?;
            let typing = self.tff_atom_typing()?;
            self.expect(TokenKind::RParen)?;
            return Ok(typing);
        }
        let atom = self.atomic_word()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.tff_top_level_type()?;
        Ok((atom, ty))
    }

    /// A full TFF formula: a unit plus binary operators.
    pub(crate) fn tff_logic_formula(&mut self, tfx: bool) -> Result<tff::Formula> {
        let unit = self.tff_unit_formula(tfx)?;
        self.tff_logic_formula_from_unit(unit, tfx)
    }

    /// Continues binary operators after an already-parsed unit. `|`/`&`
    /// chains are right-associative; the other connectives consume one
    /// more unit; trailing `==`/`:=` (TFX) build meta-identities and
    /// assignments over terms.
    fn tff_logic_formula_from_unit(
        &mut self,
        first: tff::Formula,
        tfx: bool,
    ) -> Result<tff::Formula> {
        let Some(kind) = self.safe_peek_kind(0)? else {
            return Ok(first);
        };
        match kind {
            TokenKind::Or | TokenKind::And => {
                let conn = binary_connective_of(kind).expect("or/and");
                let mut operands = vec![first];
                while self.safe_peek_kind(0)? == Some(kind) {
                    self.consume()?;
                    operands.push(self.tff_unit_formula(tfx)?);
                }
                Ok(fold_right(conn, operands))
            }
            TokenKind::Iff
            | TokenKind::Impl
            | TokenKind::If
            | TokenKind::Niff
            | TokenKind::Nor
            | TokenKind::Nand => {
                let conn = binary_connective_of(kind).expect("non-assoc connective");
                self.consume()?;
                let rhs = self.tff_unit_formula(tfx)?;
                Ok(tff::Formula::Binary(conn, Box::new(first), Box::new(rhs)))
            }
            TokenKind::Identity if tfx => {
                self.consume()?;
                let rhs = self.tff_unit_formula_or_term(false)?;
                Ok(tff::Formula::MetaIdentity(
                    Box::new(formula_into_term(first)),
                    Box::new(rhs),
                ))
            }
            TokenKind::Assignment if tfx => {
                self.consume()?;
                let rhs = self.tff_unit_formula_or_term(false)?;
                Ok(tff::Formula::Assignment(
                    Box::new(formula_into_term(first)),
                    Box::new(rhs),
                ))
            }
            _ => Ok(first),
        }
    }

    /// One TFF unit formula.
    pub(crate) fn tff_unit_formula(&mut self, tfx: bool) -> Result<tff::Formula> {
        use tff::Formula as F;
        use tff::Term as T;

        let kind = self.peek_kind()?;
        match kind {
            TokenKind::Forall | TokenKind::Exists | TokenKind::Hash => {
                self.tff_quantified_formula(tfx)
            }
            TokenKind::Tilde => {
                self.consume()?;
                let body = self.tff_unit_formula(tfx)?;
                Ok(F::Unary(UnaryConnective::Not, Box::new(body)))
            }
            TokenKind::LParen => {
                self.consume()?;
                let inner = self.tff_logic_formula(tfx)?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LowerWord
            | TokenKind::SingleQuoted
            | TokenKind::DollarWord
            | TokenKind::DollarDollarWord => {
                let word = self.peek()?.value.to_string();
                let applied = self.safe_peek_kind(1)? == Some(TokenKind::LParen);
                if tfx && word == "$ite" && applied {
                    let conditional = self.tff_conditional()?;
                    return self.tff_maybe_equation(conditional);
                }
                if tfx && word == "$let" && applied {
                    let lets = self.tff_let()?;
                    return self.tff_maybe_equation(lets);
                }
                self.consume()?;
                let args = if applied {
                    self.tff_arguments(tfx)?
                } else {
                    Vec::new()
                };
                match self.safe_peek_kind(0)? {
                    Some(op @ (TokenKind::Equals | TokenKind::NotEquals)) => {
                        self.consume()?;
                        let rhs = self.tff_equality_rhs(tfx)?;
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
                let name = tok.value.into_owned();
                match self.safe_peek_kind(0)? {
                    Some(op @ (TokenKind::Equals | TokenKind::NotEquals)) => {
                        self.consume()?;
                        let rhs = self.tff_equality_rhs(tfx)?;
                        let lhs = T::Variable(name);
                        Ok(if op == TokenKind::Equals {
                            F::Equality(lhs, rhs)
                        } else {
                            F::Inequality(lhs, rhs)
                        })
                    }
                    _ if tfx => Ok(F::FormulaVariable(name)),
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
                let rhs = self.tff_equality_rhs(tfx)?;
                Ok(if op.kind == TokenKind::Equals {
                    F::Equality(lhs, rhs)
                } else {
                    F::Inequality(lhs, rhs)
                })
            }
            TokenKind::LBracket if tfx => match self.safe_peek_kind(1)? {
                Some(TokenKind::Dot) => {
                    self.consume()?;
                    self.consume()?;
                    self.expect(TokenKind::RBracket)?;
                    let body = self.tff_unit_formula(tfx)?;
                    Ok(F::NonclassicalPolyary(VararyConnective::Box(None), vec![body]))
                }
                Some(TokenKind::Hash) => {
                    self.consume()?;
                    let index = self.tff_nonclassical_index()?;
                    self.expect(TokenKind::RBracket)?;
                    let body = self.tff_unit_formula(tfx)?;
                    Ok(F::NonclassicalPolyary(
                        VararyConnective::Box(Some(index)),
                        vec![body],
                    ))
                }
                _ => {
                    let tuple = T::Tuple(self.tff_tuple_terms()?);
                    self.tff_tuple_continuation(tuple)
                }
            },
            TokenKind::LAngle if tfx => {
                self.consume()?;
                let index = self.tff_nonclassical_short_index(TokenKind::RAngle)?;
                let body = self.tff_unit_formula(tfx)?;
                Ok(F::NonclassicalPolyary(
                    VararyConnective::Diamond(index),
                    vec![body],
                ))
            }
            TokenKind::Slash if tfx => {
                self.consume()?;
                let index = self.tff_nonclassical_short_index(TokenKind::Backslash)?;
                let body = self.tff_unit_formula(tfx)?;
                Ok(F::NonclassicalPolyary(
                    VararyConnective::Cone(index),
                    vec![body],
                ))
            }
            TokenKind::LBrace if tfx => self.tff_nonclassical_long_form(),
            _ => Err(unexpected("<tff_logic_formula>", self.peek()?)),
        }
    }

    /// `$ite`/`$let` expressions are term-shaped, so an equation may
    /// follow them directly.
    fn tff_maybe_equation(&mut self, formula: tff::Formula) -> Result<tff::Formula> {
        match self.safe_peek_kind(0)? {
            Some(op @ (TokenKind::Equals | TokenKind::NotEquals)) => {
                self.consume()?;
                let rhs = self.tff_equality_rhs(true)?;
                let lhs = formula_into_term(formula);
                Ok(if op == TokenKind::Equals {
                    tff::Formula::Equality(lhs, rhs)
                } else {
                    tff::Formula::Inequality(lhs, rhs)
                })
            }
            _ => Ok(formula),
        }
    }

    /// A tuple at formula position must extend into an equation, an
    /// assignment, or a meta-identity.
    fn tff_tuple_continuation(&mut self, tuple: tff::Term) -> Result<tff::Formula> {
        use tff::Formula as F;
        match self.safe_peek_kind(0)? {
            Some(op @ (TokenKind::Equals | TokenKind::NotEquals)) => {
                self.consume()?;
                let rhs = self.tff_equality_rhs(true)?;
                Ok(if op == TokenKind::Equals {
                    F::Equality(tuple, rhs)
                } else {
                    F::Inequality(tuple, rhs)
                })
            }
            Some(TokenKind::Assignment) => {
                self.consume()?;
                let rhs = self.tff_unit_formula_or_term(false)?;
                Ok(F::Assignment(Box::new(tuple), Box::new(rhs)))
            }
            Some(TokenKind::Identity) => {
                self.consume()?;
                let rhs = self.tff_unit_formula_or_term(false)?;
                Ok(F::MetaIdentity(Box::new(tuple), Box::new(rhs)))
            }
            _ => match self.safe_peek(0)? {
                Some(t) => Err(unexpected(
                    "one of EQUALS,NOTEQUALS,ASSIGNMENT,IDENTITY,SEQUENTARROW",
                    t,
                )),
                None => Err(self.eof_error("SEQUENTARROW")),
            },
        }
    }

    fn tff_quantified_formula(&mut self, tfx: bool) -> Result<tff::Formula> {
        let quantifier = match self.consume()?.kind {
            TokenKind::Forall => Quantifier::Forall,
            TokenKind::Exists => Quantifier::Exists,
            _ => Quantifier::Epsilon,
        };
        self.expect(TokenKind::LBracket)?;
        let mut variables = vec![self.tff_typed_variable()?];
        while self.next_is(TokenKind::Comma)? {
            self.consume()?;
            variables.push(self.tff_typed_variable()?);
        }
        self.expect(TokenKind::RBracket)?;
        self.expect(TokenKind::Colon)?;
        let body = self.tff_unit_formula(tfx)?;
        Ok(tff::Formula::Quantified(
            quantifier,
            variables,
            Box::new(body),
        ))
    }

    pub(crate) fn tff_typed_variable(&mut self) -> Result<tff::TypedVariable> {
        let name = self.expect(TokenKind::UpperWord)?.value.into_owned();
        let ty = if self.next_is(TokenKind::Colon)? {
            self.consume()?;
            Some(self.tff_top_level_type()?)
        } else {
            None
        };
        Ok((name, ty))
    }

    fn tff_arguments(&mut self, tfx: bool) -> Result<Vec<tff::Term>> {
        self.expect(TokenKind::LParen)?;
        let mut args = vec![self.tff_term(tfx)?];
        while self.next_is(TokenKind::Comma)? {
            self.consume()?;
            args.push(self.tff_term(tfx)?);
        }
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }

    /// A term. In TFX mode this is the full formula-or-term grammar; in
    /// plain mode only first-order terms are admitted.
    pub(crate) fn tff_term(&mut self, tfx: bool) -> Result<tff::Term> {
        if tfx {
            self.tff_logic_formula_or_term()
        } else {
            self.tff_term_plain()
        }
    }

    fn tff_term_plain(&mut self) -> Result<tff::Term> {
        use tff::Term as T;
        match self.peek_kind()? {
            TokenKind::LowerWord
            | TokenKind::SingleQuoted
            | TokenKind::DollarWord
            | TokenKind::DollarDollarWord => {
                let word = self.consume()?.value.into_owned();
                let args = if self.next_is(TokenKind::LParen)? {
                    self.tff_arguments(false)?
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
            _ => Err(unexpected("<tff_term>", self.peek()?)),
        }
    }

    fn tff_equality_rhs(&mut self, tfx: bool) -> Result<tff::Term> {
        if tfx {
            self.tff_unit_formula_or_term(false)
        } else {
            self.tff_term_plain()
        }
    }

    /// The TFX formula-or-term grammar at logic level.
    pub(crate) fn tff_logic_formula_or_term(&mut self) -> Result<tff::Term> {
        let term = self.tff_unit_formula_or_term(true)?;
        let Some(kind) = self.safe_peek_kind(0)? else {
            return Ok(term);
        };
        match kind {
            _ if binary_connective_of(kind).is_some() => {
                let pos = self.peek()?.pos;
                let formula = term_into_formula(term, pos)?;
                let formula = self.tff_logic_formula_from_unit(formula, true)?;
                Ok(formula_into_term(formula))
            }
            TokenKind::Assignment => {
                self.consume()?;
                let rhs = self.tff_unit_formula_or_term(false)?;
                Ok(formula_into_term(tff::Formula::Assignment(
                    Box::new(term),
                    Box::new(rhs),
                )))
            }
            TokenKind::Identity => {
                self.consume()?;
                let rhs = self.tff_unit_formula_or_term(false)?;
                Ok(formula_into_term(tff::Formula::MetaIdentity(
                    Box::new(term),
                    Box::new(rhs),
                )))
            }
            _ => Ok(term),
        }
    }

    /// The TFX formula-or-term grammar at unit level. A trailing `=`/`!=`
    /// (when accepted) turns the unit into an equation-as-term.
    fn tff_unit_formula_or_term(&mut self, accept_equality: bool) -> Result<tff::Term> {
        use tff::Term as T;

        let kind = self.peek_kind()?;
        let bracket_is_tuple = kind == TokenKind::LBracket
            && !matches!(
                self.safe_peek_kind(1)?,
                Some(TokenKind::Dot | TokenKind::Hash)
            );
        let term = match kind {
            TokenKind::Int | TokenKind::Rational | TokenKind::Real => {
                let tok = self.consume()?;
                T::Number(self.number_of(&tok)?)
            }
            TokenKind::DoubleQuoted => T::DistinctObject(self.consume()?.value.into_owned()),
            TokenKind::UpperWord => T::Variable(self.consume()?.value.into_owned()),
            TokenKind::LParen => {
                self.consume()?;
                let inner = self.tff_logic_formula_or_term()?;
                self.expect(TokenKind::RParen)?;
                inner
            }
            TokenKind::LBracket if bracket_is_tuple => T::Tuple(self.tff_tuple_terms()?),
            TokenKind::LowerWord
            | TokenKind::SingleQuoted
            | TokenKind::DollarWord
            | TokenKind::DollarDollarWord => {
                let word = self.peek()?.value.to_string();
                let applied = self.safe_peek_kind(1)? == Some(TokenKind::LParen);
                if (word == "$ite" || word == "$let") && applied {
                    formula_into_term(self.tff_unit_formula(true)?)
                } else {
                    self.consume()?;
                    let args = if applied {
                        self.tff_arguments(true)?
                    } else {
                        Vec::new()
                    };
                    T::Atomic(word, args)
                }
            }
            // Quantified, unary, and non-classical units are formulas.
            _ => formula_into_term(self.tff_unit_formula(true)?),
        };

        if accept_equality {
            if let Some(op @ (TokenKind::Equals | TokenKind::NotEquals)) = self.safe_peek_kind(0)?
            {
                self.consume()?;
                let rhs = self.tff_unit_formula_or_term(false)?;
                let formula = if op == TokenKind::Equals {
                    tff::Formula::Equality(term, rhs)
                } else {
                    tff::Formula::Inequality(term, rhs)
                };
                return Ok(T::Formula(Box::new(formula)));
            }
        }

        Ok(term)
    }

    /// `[t, …]`, empty allowed.
    fn tff_tuple_terms(&mut self) -> Result<Vec<tff::Term>> {
        self.expect(TokenKind::LBracket)?;
        let mut elements = Vec::new();
        if !self.next_is(TokenKind::RBracket)? {
            loop {
                elements.push(self.tff_logic_formula_or_term()?);
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
    fn tff_conditional(&mut self) -> Result<tff::Formula> {
        self.consume()?;
        self.expect(TokenKind::LParen)?;
        let condition = self.tff_logic_formula(true)?;
        self.expect(TokenKind::Comma)?;
        let then = self.tff_logic_formula_or_term()?;
        self.expect(TokenKind::Comma)?;
        let els = self.tff_logic_formula_or_term()?;
        self.expect(TokenKind::RParen)?;
        Ok(tff::Formula::Conditional(
            Box::new(condition),
            Box::new(then),
            Box::new(els),
        ))
    }

    /// `$let(typings, bindings, body)`
    fn tff_let(&mut self) -> Result<tff::Formula> {
        self.consume()?;
        self.expect(TokenKind::LParen)?;
        let mut typings = Vec::new();
        if self.next_is(TokenKind::LBracket)? {
            self.consume()?;
            loop {
                typings.push(self.tff_let_typing()?);
                if self.next_is(TokenKind::Comma)? {
                    self.consume()?;
                } else {
                    break;
                }
            }
            self.expect(TokenKind::RBracket)?;
        } else {
            typings.push(self.tff_let_typing()?);
        }
        self.expect(TokenKind::Comma)?;
        let mut bindings = Vec::new();
        if self.next_is(TokenKind::LBracket)? {
            self.consume()?;
            loop {
                bindings.push(self.tff_let_binding()?);
                if self.next_is(TokenKind::Comma)? {
                    self.consume()?;
                } else {
                    break;
                }
            }
            self.expect(TokenKind::RBracket)?;
        } else {
            bindings.push(self.tff_let_binding()?);
        }
        self.expect(TokenKind::Comma)?;
        let body = self.tff_logic_formula_or_term()?;
        self.expect(TokenKind::RParen)?;
        Ok(tff::Formula::Let(typings, bindings, Box::new(body)))
    }

    fn tff_let_typing(&mut self) -> Result<(String, tff::Type)> {
        let atom = self.atomic_word()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.tff_top_level_type()?;
        Ok((atom, ty))
    }

    fn tff_let_binding(&mut self) -> Result<(tff::Term, tff::Term)> {
        let lhs = self.tff_unit_formula_or_term(false)?;
        self.expect(TokenKind::Assignment)?;
        let rhs = self.tff_unit_formula_or_term(false)?;
        Ok((lhs, rhs))
    }

    fn tff_nonclassical_index(&mut self) -> Result<Box<tff::Term>> {
        self.expect(TokenKind::Hash)?;
        let tok = self.expect_one_of(&[
            TokenKind::LowerWord,
            TokenKind::DollarWord,
            TokenKind::UpperWord,
            TokenKind::Int,
        ])?;
        let index = match tok.kind {
            TokenKind::UpperWord => tff::Term::Variable(tok.value.into_owned()),
            TokenKind::Int => tff::Term::Number(self.number_of(&tok)?),
            _ => tff::Term::Atomic(tok.value.into_owned(), Vec::new()),
        };
        Ok(Box::new(index))
    }

    fn tff_nonclassical_short_index(
        &mut self,
        closer: TokenKind,
    ) -> Result<Option<Box<tff::Term>>> {
        let index = match self.peek_kind()? {
            TokenKind::Dot => {
                self.consume()?;
                None
            }
            TokenKind::Hash => Some(self.tff_nonclassical_index()?),
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

    /// `{name(index?, key := value, …)}`, applied NXF-style with a single
    /// `@` and a parenthesized argument list.
    fn tff_nonclassical_long_form(&mut self) -> Result<tff::Formula> {
        self.expect(TokenKind::LBrace)?;
        let name = self.atomic_word()?;
        let mut index = None;
        let mut parameters = Vec::new();
        if self.next_is(TokenKind::LParen)? {
            self.consume()?;
            if self.next_is(TokenKind::Hash)? {
                index = Some(self.tff_nonclassical_index()?);
            } else {
                parameters.push(self.tff_nonclassical_parameter()?);
            }
            while self.next_is(TokenKind::Comma)? {
                self.consume()?;
                parameters.push(self.tff_nonclassical_parameter()?);
            }
            self.expect(TokenKind::RParen)?;
        }
        self.expect(TokenKind::RBrace)?;
        let mut args = Vec::new();
        if self.next_is(TokenKind::App)? {
            self.consume()?;
            self.expect(TokenKind::LParen)?;
            loop {
                args.push(self.tff_logic_formula(true)?);
                if self.next_is(TokenKind::Comma)? {
                    self.consume()?;
                } else {
                    break;
                }
            }
            self.expect(TokenKind::RParen)?;
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
        Ok(tff::Formula::NonclassicalPolyary(connective, args))
    }

    fn tff_nonclassical_parameter(&mut self) -> Result<(String, tff::Term)> {
        let key = self.expect(TokenKind::LowerWord)?.value.into_owned();
        self.expect(TokenKind::Assignment)?;
        let value = self.tff_unit_formula_or_term(false)?;
        Ok((key, value))
    }

    // -----------------------------------------------------------------------
    // Types
    // -----------------------------------------------------------------------

    /// `tff_top_level_type := quantified | mapping | atomic`, with `>`
    /// right-associative and products parenthesized. Leading parentheses
    /// may nest; the depth is tracked explicitly and the matching closers
    /// are consumed after the right-hand side.
    pub(crate) fn tff_top_level_type(&mut self) -> Result<tff::Type> {
        if self.next_is(TokenKind::TyForall)? {
            return self.tff_quantified_type();
        }
        let mut depth = 0usize;
        while self.next_is(TokenKind::LParen)? {
            self.consume()?;
            depth += 1;
        }
        self.tff_type_group(depth)
    }

    fn tff_type_group(&mut self, mut depth: usize) -> Result<tff::Type> {
        let first = if self.next_is(TokenKind::TyForall)? {
            self.tff_quantified_type()?
        } else {
            self.tff_atomic_type()?
        };
        let mut members = vec![first];
        loop {
            match self.safe_peek_kind(0)? {
                Some(TokenKind::Star) if depth > 0 => {
                    self.consume()?;
                    members.push(self.tff_atomic_type()?);
                }
                Some(TokenKind::RParen) if depth > 0 => {
                    self.consume()?;
                    depth -= 1;
                    match self.safe_peek_kind(0)? {
                        Some(TokenKind::RAngle) => {
                            self.consume()?;
                            let ret = self.tff_top_level_type()?;
                            for _ in 0..depth {
                                self.expect(TokenKind::RParen)?;
                            }
                            return Ok(tff::Type::Mapping(members, Box::new(ret)));
                        }
                        Some(TokenKind::RParen) if depth > 0 => {}
                        _ if members.len() == 1 && depth == 0 => {
                            return Ok(members.pop().expect("single member"));
                        }
                        _ if members.len() > 1 => {
                            return Err(match self.safe_peek(0)? {
                                Some(t) => unexpected(TokenKind::RAngle.name(), t),
                                None => self.eof_error(TokenKind::RAngle.name()),
                            });
                        }
                        // Single member under remaining parens: keep
                        // closing on the next iteration.
                        _ => {}
                    }
                }
                Some(TokenKind::RAngle) => {
                    self.consume()?;
                    let ret = self.tff_top_level_type()?;
                    for _ in 0..depth {
                        self.expect(TokenKind::RParen)?;
                    }
                    return Ok(tff::Type::Mapping(members, Box::new(ret)));
                }
                _ if depth > 0 => {
                    return Err(match self.safe_peek(0)? {
                        Some(t) => unexpected(TokenKind::RParen.name(), t),
                        None => self.eof_error(TokenKind::RParen.name()),
                    });
                }
                _ if members.len() == 1 => return Ok(members.pop().expect("single member")),
                _ => {
                    return Err(match self.safe_peek(0)? {
                        Some(t) => unexpected(TokenKind::RAngle.name(), t),
                        None => self.eof_error(TokenKind::RAngle.name()),
                    });
                }
            }
        }
    }

    /// `!> [vars]: type`
    fn tff_quantified_type(&mut self) -> Result<tff::Type> {
        self.expect(TokenKind::TyForall)?;
        self.expect(TokenKind::LBracket)?;
        let mut variables = vec![self.tff_typed_variable()?];
        while self.next_is(TokenKind::Comma)? {
            self.consume()?;
            variables.push(self.tff_typed_variable()?);
        }
        self.expect(TokenKind::RBracket)?;
        self.expect(TokenKind::Colon)?;
        let body = self.tff_top_level_type()?;
        Ok(tff::Type::Quantified(variables, Box::new(body)))
    }

    fn tff_atomic_type(&mut self) -> Result<tff::Type> {
        match self.peek_kind()? {
            TokenKind::LowerWord
            | TokenKind::SingleQuoted
            | TokenKind::DollarWord
            | TokenKind::DollarDollarWord => {
                let name = self.consume()?.value.into_owned();
                let mut args = Vec::new();
                if self.next_is(TokenKind::LParen)? {
                    self.consume()?;
                    loop {
                        args.push(self.tff_atomic_type()?);
                        if self.next_is(TokenKind::Comma)? {
                            self.consume()?;
                        } else {
                            break;
                        }
                    }
                    self.expect(TokenKind::RParen)?;
                }
                Ok(tff::Type::Atomic(name, args))
            }
            TokenKind::UpperWord => Ok(tff::Type::Variable(self.consume()?.value.into_owned())),
            TokenKind::LBracket => {
                self.consume()?;
                let mut elements = Vec::new();
                if !self.next_is(TokenKind::RBracket)? {
                    loop {
                        elements.push(self.tff_top_level_type()?);
                        if self.next_is(TokenKind::Comma)? {
                            self.consume()?;
                        } else {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RBracket)?;
                Ok(tff::Type::Tuple(elements))
            }
            _ => Err(unexpected("<tff_atomic_type>", self.peek()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::tff::{Formula as F, Term as T, Type};

    fn parse(source: &str) -> tff::Formula {
        let mut parser = Parser::new(source);
        let formula = parser.tff_logic_formula(true).expect("parse error");
        parser.expect_end().expect("trailing input");
        formula
    }

    fn parse_type(source: &str) -> Type {
        let mut parser = Parser::new(source);
        let ty = parser.tff_top_level_type().expect("parse error");
        parser.expect_end().expect("trailing input");
        ty
    }

    #[test]
    fn quantified_with_types() {
        let f = parse("! [X: $i, Y]: p(X, Y)");
        let F::Quantified(Quantifier::Forall, vars, _) = f else {
            panic!("expected quantified formula");
        };
        assert_eq!(vars.len(), 2);
        assert!(vars[0].1.is_some());
        assert!(vars[1].1.is_none());
    }

    #[test]
    fn equality_at_term_level() {
        let f = parse("f(X) = g(a)");
        assert!(matches!(f, F::Equality(T::Atomic(_, _), T::Atomic(_, _))));
    }

    #[test]
    fn disjunction_right_fold() {
        let f = parse("a | b | c");
        let F::Binary(BinaryConnective::Or, _, right) = f else {
            panic!("expected disjunction");
        };
        assert!(matches!(*right, F::Binary(BinaryConnective::Or, _, _)));
    }

    #[test]
    fn tuple_equality() {
        let f = parse("[a, b] = c");
        assert!(matches!(f, F::Equality(T::Tuple(_), _)));
    }

    #[test]
    fn conditional_formula() {
        let f = parse("$ite(p, a, b)");
        assert!(matches!(f, F::Conditional(_, _, _)));
    }

    #[test]
    fn let_formula() {
        let f = parse("$let(f: $i > $i, f(X) := X, f(a) = a)");
        let F::Let(typings, bindings, _) = f else {
            panic!("expected let");
        };
        assert_eq!(typings.len(), 1);
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn formula_as_term_argument() {
        let f = parse("p(q & r)");
        let F::Atomic(_, args) = f else {
            panic!("expected atom");
        };
        assert!(matches!(args[0], T::Formula(_)));
    }

    #[test]
    fn atomic_argument_stays_atomic_term() {
        let f = parse("p((q))");
        let F::Atomic(_, args) = f else {
            panic!("expected atom");
        };
        assert!(matches!(args[0], T::Atomic(ref w, _) if w == "q"));
    }

    #[test]
    fn meta_identity() {
        let f = parse("a == b");
        assert!(matches!(f, F::MetaIdentity(_, _)));
    }

    #[test]
    fn assignment() {
        let f = parse("X := f(a)");
        assert!(matches!(f, F::Assignment(_, _)));
    }

    #[test]
    fn non_tfx_rejects_tuples_and_formula_variables() {
        let mut parser = Parser::new("[a, b] = c");
        assert!(parser.tff_logic_formula(false).is_err());
        let mut parser = Parser::new("X");
        assert!(parser.tff_logic_formula(false).is_err());
    }

    #[test]
    fn nonclassical_box() {
        let f = parse("[.] (p)");
        assert!(matches!(
            f,
            F::NonclassicalPolyary(VararyConnective::Box(None), _)
        ));
    }

    #[test]
    fn nxf_long_form_application() {
        let f = parse("{$box(#1)} @ (p, q)");
        let F::NonclassicalPolyary(VararyConnective::Box(index), args) = f else {
            panic!("expected canonicalized box operator");
        };
        assert!(index.is_some());
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn nxf_long_form_with_parameters_stays_long() {
        let f = parse("{$knows(agent := alice)} @ (p)");
        let F::NonclassicalPolyary(VararyConnective::LongOperator { name, .. }, args) = f else {
            panic!("expected long operator");
        };
        assert_eq!(name, "$knows");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn mapping_type_right_assoc() {
        let ty = parse_type("a > b > c");
        let Type::Mapping(args, ret) = ty else {
            panic!("expected mapping");
        };
        assert_eq!(args.len(), 1);
        assert!(matches!(*ret, Type::Mapping(_, _)));
    }

    #[test]
    fn product_mapping_type() {
        let ty = parse_type("($i * $i) > $o");
        let Type::Mapping(args, ret) = ty else {
            panic!("expected mapping");
        };
        assert_eq!(args.len(), 2);
        assert!(matches!(*ret, Type::Atomic(ref n, _) if n == "$o"));
    }

    #[test]
    fn nested_parens_around_mapping() {
        let ty = parse_type("((a * b)) > c");
        assert!(matches!(ty, Type::Mapping(ref args, _) if args.len() == 2));
        let ty = parse_type("(a > b)");
        assert!(matches!(ty, Type::Mapping(ref args, _) if args.len() == 1));
    }

    #[test]
    fn quantified_type() {
        let ty = parse_type("!> [A: $tType]: ((A * A) > $o)");
        let Type::Quantified(vars, body) = ty else {
            panic!("expected quantified type");
        };
        assert_eq!(vars.len(), 1);
        assert!(matches!(*body, Type::Mapping(_, _)));
    }

    #[test]
    fn type_applications_and_tuples() {
        let ty = parse_type("map($i, list(A))");
        assert!(matches!(ty, Type::Atomic(ref n, ref args) if n == "map" && args.len() == 2));
        let ty = parse_type("[$i, $o]");
        assert!(matches!(ty, Type::Tuple(ref elements) if elements.len() == 2));
    }

    #[test]
    fn product_without_arrow_is_rejected() {
        let mut parser = Parser::new("($i * $i)");
        assert!(parser.tff_top_level_type().is_err());
    }
}
