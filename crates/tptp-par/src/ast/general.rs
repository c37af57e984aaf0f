//! General terms: the open-ended annotation vocabulary used in the
//! `source` and `info` slots of annotated formulas.

use std::fmt;

use super::{cnf, escape_functor, fof, tff, thf, Number};

/// `general_data (: general_data)* (: general_list)? | general_list`
///
/// The colon acts as a right-associative pairing operator; an optional
/// general list may close the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralTerm {
    pub data: Vec<GeneralData>,
    pub list: Option<Vec<GeneralTerm>>,
}

impl GeneralTerm {
    /// A term holding a single datum, e.g. `file('x.p')`.
    pub fn data(datum: GeneralData) -> Self {
        Self {
            data: vec![datum],
            list: None,
        }
    }

    /// A bare list term, e.g. `[a,b]`.
    pub fn list(items: Vec<GeneralTerm>) -> Self {
        Self {
            data: vec![],
            list: Some(items),
        }
    }
}

impl fmt::Display for GeneralTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, datum) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{datum}")?;
        }
        if let Some(list) = &self.list {
            if !self.data.is_empty() {
                write!(f, ":")?;
            }
            write!(f, "[")?;
            for (i, term) in list.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{term}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// A single general datum.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneralData {
    /// An atomic word, optionally applied: `status(thm)`, `file('x.p')`.
    Function(String, Vec<GeneralTerm>),
    /// An upper-word meta variable.
    Variable(String),
    Number(Number),
    DistinctObject(String),
    /// Embedded formula data: `$thf(…)`, `$fof(…)`, `$fot(…)`, ….
    Formula(FormulaData),
}

impl fmt::Display for GeneralData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneralData::Function(word, args) => {
                write!(f, "{}", escape_functor(word))?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
            GeneralData::Variable(name) => write!(f, "{name}"),
            GeneralData::Number(n) => write!(f, "{n}"),
            GeneralData::DistinctObject(name) => write!(f, "{name}"),
            GeneralData::Formula(data) => write!(f, "{data}"),
        }
    }
}

/// A dialect formula wrapped as annotation data.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaData {
    Thf(thf::Statement),
    Tff(tff::Statement),
    Fof(fof::Statement),
    Cnf(cnf::Statement),
    /// A bare first-order term, `$fot(…)`.
    Fot(fof::Term),
}

impl fmt::Display for FormulaData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaData::Thf(s) => write!(f, "$thf({s})"),
            FormulaData::Tff(s) => write!(f, "$tff({s})"),
            FormulaData::Fof(s) => write!(f, "$fof({s})"),
            FormulaData::Cnf(s) => write!(f, "$cnf({s})"),
            FormulaData::Fot(t) => write!(f, "$fot({t})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_chain_display() {
        let term = GeneralTerm {
            data: vec![
                GeneralData::Function("introduced".into(), vec![]),
                GeneralData::Variable("X".into()),
            ],
            list: Some(vec![GeneralTerm::data(GeneralData::Function(
                "a".into(),
                vec![],
            ))]),
        };
        assert_eq!(term.to_string(), "introduced:X:[a]");
    }

    #[test]
    fn bare_list_display() {
        let term = GeneralTerm::list(vec![]);
        assert_eq!(term.to_string(), "[]");
    }

    #[test]
    fn function_display() {
        let term = GeneralTerm::data(GeneralData::Function(
            "file".into(),
            vec![GeneralTerm::data(GeneralData::Function(
                "unknown source".into(),
                vec![],
            ))],
        ));
        assert_eq!(term.to_string(), "file('unknown source')");
    }
}
