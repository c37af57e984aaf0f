//! Parsing of general terms (the annotation vocabulary).

use tptp_lex::TokenKind;
use tptp_util::Result;

use crate::ast::general::{FormulaData, GeneralData, GeneralTerm};

use super::{unexpected, Parser};

impl Parser<'_> {
    /// `general_term := general_data (: general_data)* (: general_list)?
    ///                | general_list`
    pub(crate) fn general_term(&mut self) -> Result<GeneralTerm> {
        if self.next_is(TokenKind::LBracket)? {
            return Ok(GeneralTerm::list(self.general_list()?));
        }
        let mut data = vec![self.general_data()?];
        let mut list = None;
        while self.next_is(TokenKind::Colon)? {
            self.consume()?;
            if self.next_is(TokenKind::LBracket)? {
                list = Some(self.general_list()?);
                break;
            }
            data.push(self.general_data()?);
        }
        Ok(GeneralTerm { data, list })
    }

    fn general_list(&mut self) -> Result<Vec<GeneralTerm>> {
        self.expect(TokenKind::LBracket)?;
        let mut items = Vec::new();
        if !self.next_is(TokenKind::RBracket)? {
            loop {
                items.push(self.general_term()?);
                if self.next_is(TokenKind::Comma)? {
                    self.consume()?;
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RBracket)?;
        Ok(items)
    }

    fn general_data(&mut self) -> Result<GeneralData> {
        match self.peek_kind()? {
            TokenKind::LowerWord | TokenKind::SingleQuoted | TokenKind::DollarDollarWord => {
                let word = self.consume()?.value.into_owned();
                Ok(GeneralData::Function(word, self.general_args()?))
            }
            TokenKind::DollarWord => {
                let word = self.peek()?.value.to_string();
                let applied = self.safe_peek_kind(1)? == Some(TokenKind::LParen);
                match word.as_str() {
                    "$thf" | "$tff" | "$fof" | "$cnf" | "$fot" if applied => {
                        self.consume()?;
                        self.expect(TokenKind::LParen)?;
                        let data = match word.as_str() {
                            "$thf" => FormulaData::Thf(self.thf_statement()?),
                            "$tff" => FormulaData::Tff(self.tff_statement()?),
                            "$fof" => FormulaData::Fof(self.fof_statement()?),
                            "$cnf" => FormulaData::Cnf(self.cnf_statement()?),
                            _ => FormulaData::Fot(self.fof_term()?),
                        };
                        self.expect(TokenKind::RParen)?;
                        Ok(GeneralData::Formula(data))
                    }
                    _ => {
                        let word = self.consume()?.value.into_owned();
                        Ok(GeneralData::Function(word, self.general_args()?))
                    }
                }
            }
            TokenKind::UpperWord => {
                Ok(GeneralData::Variable(self.consume()?.value.into_owned()))
            }
            TokenKind::Int | TokenKind::Rational | TokenKind::Real => {
                let tok = self.consume()?;
                Ok(GeneralData::Number(self.number_of(&tok)?))
            }
            TokenKind::DoubleQuoted => {
                Ok(GeneralData::DistinctObject(self.consume()?.value.into_owned()))
            }
            _ => Err(unexpected("<general_data>", self.peek()?)),
        }
    }

    fn general_args(&mut self) -> Result<Vec<GeneralTerm>> {
        let mut args = Vec::new();
        if self.next_is(TokenKind::LParen)? {
            self.consume()?;
            loop {
                args.push(self.general_term()?);
                if self.next_is(TokenKind::Comma)? {
                    self.consume()?;
                } else {
                    break;
                }
            }
            self.expect(TokenKind::RParen)?;
        }
        Ok(args)
    }
}
