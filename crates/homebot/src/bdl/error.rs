//! Syntax errors and their rendering.

use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::span::SimpleSpan;
use chumsky::util::MaybeRef;

use super::lexer::Token;

/// What went wrong while parsing BDL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("expected a name declaration '$N('")]
    MissingName,

    #[error("'$N(' name declaration not closed with ')'")]
    UnterminatedName,

    #[error("'$C(' control declaration not closed with ')'")]
    UnterminatedControl,

    #[error("'$G(' gadget list not closed with ')'")]
    UnterminatedGadgetList,

    #[error("device has no control declaration, expected '$C('")]
    MissingControlDeclaration,

    #[error("room has no gadget list, expected '$G('")]
    MissingGadgetSection,

    #[error("invalid control kind '{found}', expected 'switch' or 'regulate'")]
    InvalidControlKind { found: String },

    #[error("device declaration not closed with '}}'")]
    UnterminatedDevice,

    #[error("room declaration not closed with ']'")]
    UnterminatedRoom,

    #[error("invalid name '{name}': names must be non-empty and must not contain '/'")]
    InvalidName { name: String },

    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
    },

    #[error("lexer error: {message}")]
    Lex { message: String },
}

/// A fatal BDL syntax error. Parsing never recovers past one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} at {}..{}", .span.start, .span.end)]
pub struct BdlSyntaxError {
    pub kind: SyntaxErrorKind,
    pub span: SimpleSpan,
}

impl BdlSyntaxError {
    pub fn new(kind: SyntaxErrorKind, span: SimpleSpan) -> Self {
        Self { kind, span }
    }

    /// `found` where `expected` should have been; `None` is end of input.
    pub(crate) fn unexpected(
        found: Option<&Token>,
        expected: &'static str,
        span: SimpleSpan,
    ) -> Self {
        let found = match found {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        };
        Self::new(SyntaxErrorKind::UnexpectedToken { found, expected }, span)
    }
}

// The grammar reports its own errors through `validate`, so chumsky only
// builds one of these when a token matches no rule at all.
impl<'a, I> chumsky::error::Error<'a, I> for BdlSyntaxError where
    I: Input<'a, Token = Token, Span = SimpleSpan>
{
}

impl<'a, I, L> LabelError<'a, I, L> for BdlSyntaxError
where
    I: Input<'a, Token = Token, Span = SimpleSpan>,
{
    fn expected_found<E: IntoIterator<Item = L>>(
        _expected: E,
        found: Option<MaybeRef<'a, Token>>,
        span: I::Span,
    ) -> Self {
        Self::unexpected(found.as_deref(), "a BDL entry", span)
    }
}

/// Render a syntax error against its source with ariadne.
pub fn format_syntax_error(error: &BdlSyntaxError, source: &str, filename: &str) -> String {
    use ariadne::Color;
    use ariadne::Label;
    use ariadne::Report;
    use ariadne::ReportKind;
    use ariadne::Source;

    let mut output = Vec::new();
    let span = error.span.start..error.span.end;
    let report = Report::build(ReportKind::Error, (filename, span.clone()))
        .with_message(&error.kind)
        .with_label(
            Label::new((filename, span))
                .with_message(&error.kind)
                .with_color(Color::Red),
        )
        .finish();

    report
        .write((filename, Source::from(source)), &mut output)
        .ok();
    String::from_utf8_lossy(&output).to_string()
}
