//! Special-form markers.

use std::fmt;

/// A special form the evaluator handles itself instead of applying.
///
/// The syntax library binds each keyword to `Value::Syntax(form)`; an
/// evaluator that finds one of these in operator position dispatches on the
/// form rather than evaluating the operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxForm {
    Quote,
    Quasiquote,
    Unquote,
    UnquoteSplicing,
    If,
    Define,
    Set,
    Lambda,
    Begin,
    Let,
    LetStar,
    Letrec,
    And,
    Or,
    Cond,
    Case,
    Do,
    Delay,
    Defmacro,
}

impl SyntaxForm {
    /// Every form, in keyword order.
    pub const ALL: [SyntaxForm; 19] = [
        SyntaxForm::Quote,
        SyntaxForm::Quasiquote,
        SyntaxForm::Unquote,
        SyntaxForm::UnquoteSplicing,
        SyntaxForm::If,
        SyntaxForm::Define,
        SyntaxForm::Set,
        SyntaxForm::Lambda,
        SyntaxForm::Begin,
        SyntaxForm::Let,
        SyntaxForm::LetStar,
        SyntaxForm::Letrec,
        SyntaxForm::And,
        SyntaxForm::Or,
        SyntaxForm::Cond,
        SyntaxForm::Case,
        SyntaxForm::Do,
        SyntaxForm::Delay,
        SyntaxForm::Defmacro,
    ];

    /// The keyword this form is bound to.
    pub const fn keyword(self) -> &'static str {
        match self {
            SyntaxForm::Quote => "quote",
            SyntaxForm::Quasiquote => "quasiquote",
            SyntaxForm::Unquote => "unquote",
            SyntaxForm::UnquoteSplicing => "unquote-splicing",
            SyntaxForm::If => "if",
            SyntaxForm::Define => "define",
            SyntaxForm::Set => "set!",
            SyntaxForm::Lambda => "lambda",
            SyntaxForm::Begin => "begin",
            SyntaxForm::Let => "let",
            SyntaxForm::LetStar => "let*",
            SyntaxForm::Letrec => "letrec",
            SyntaxForm::And => "and",
            SyntaxForm::Or => "or",
            SyntaxForm::Cond => "cond",
            SyntaxForm::Case => "case",
            SyntaxForm::Do => "do",
            SyntaxForm::Delay => "delay",
            SyntaxForm::Defmacro => "defmacro",
        }
    }

    /// Look a form up by keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|form| form.keyword() == keyword)
    }
}

impl fmt::Display for SyntaxForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
