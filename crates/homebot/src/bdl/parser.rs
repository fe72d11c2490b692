//! Parser for the Building Description Language.
//!
//! Source text is tokenized by [`lexer`], then chumsky token parsers build a
//! [`DocumentSyntax`]. Once an entry's opening `[` or `{` is consumed the
//! entry always completes: a missing piece is reported through `validate`
//! and parsing carries on, so the first reported error is the first problem
//! in the source. Lowering the syntax tree into the model is where duplicate
//! names collapse (last declaration wins, first position kept).

use chumsky::input::ValueInput;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use tracing::debug;
use tracing::warn;

use super::error::BdlSyntaxError;
use super::error::SyntaxErrorKind;
use super::lexer::lexer;
use super::lexer::Token;
use super::syntax::*;
use crate::model::is_valid_name;
use crate::model::Building;
use crate::model::Control;
use crate::model::Device;
use crate::model::Entry;
use crate::model::Room;
use crate::model::DEFAULT_BUILDING_NAME;


type Extra = extra::Err<BdlSyntaxError>;

/// Parse a complete document into a [`Building`].
///
/// A document without a leading `$N(...)` yields a building named `house`.
pub fn parse_document(input: &str) -> Result<Building, BdlSyntaxError> {
    parse_document_with_default_name(input, DEFAULT_BUILDING_NAME)
}

/// Like [`parse_document`], naming an unnamed building `default_name`.
pub fn parse_document_with_default_name(
    input: &str,
    default_name: &str,
) -> Result<Building, BdlSyntaxError> {
    let document = parse_syntax(input)?;
    if document.name.is_none() && !is_valid_name(default_name) {
        return Err(BdlSyntaxError::new(
            SyntaxErrorKind::InvalidName {
                name: default_name.to_string(),
            },
            (0..0).into(),
        ));
    }
    Ok(lower_document(document, default_name))
}

/// Parse a document into its syntax tree without building the model.
pub fn parse_syntax(input: &str) -> Result<DocumentSyntax, BdlSyntaxError> {
    let tokens = tokenize(input)?;
    let (output, errors) = document_parser()
        .parse(tokens.as_slice().map(eoi(input), |(t, s)| (t, s)))
        .into_output_errors();
    first_error_or(output, errors, input)
}

/// Parse a single `[ ... ]` room fragment.
pub fn parse_room(input: &str) -> Result<Room, BdlSyntaxError> {
    let tokens = tokenize(input)?;
    let (output, errors) = fragment_parser(room_parser(), "a room '['")
        .parse(tokens.as_slice().map(eoi(input), |(t, s)| (t, s)))
        .into_output_errors();
    let room = first_error_or(output.flatten(), errors, input)?;
    Ok(lower_room(room.node))
}

/// Parse a single `{ ... }` device fragment.
pub fn parse_device(input: &str) -> Result<Device, BdlSyntaxError> {
    let tokens = tokenize(input)?;
    let (output, errors) = fragment_parser(device_parser(), "a device '{'")
        .parse(tokens.as_slice().map(eoi(input), |(t, s)| (t, s)))
        .into_output_errors();
    let device = first_error_or(output.flatten(), errors, input)?;
    Ok(lower_device(device.node))
}

fn tokenize(input: &str) -> Result<Vec<(Token, SimpleSpan)>, BdlSyntaxError> {
    lexer()
        .parse(input)
        .into_result()
        .map_err(|errs| match errs.into_iter().next() {
            Some(err) => BdlSyntaxError::new(
                SyntaxErrorKind::Lex {
                    message: err.to_string(),
                },
                *err.span(),
            ),
            None => BdlSyntaxError::new(
                SyntaxErrorKind::Lex {
                    message: "no tokens produced".to_string(),
                },
                eoi(input),
            ),
        })
}

fn eoi(input: &str) -> SimpleSpan {
    (input.len()..input.len()).into()
}

/// Errors come out in source order, so the first one is the one to report.
fn first_error_or<T>(
    output: Option<T>,
    errors: Vec<BdlSyntaxError>,
    input: &str,
) -> Result<T, BdlSyntaxError> {
    match errors.into_iter().next() {
        Some(error) => Err(error),
        None => output.ok_or_else(|| BdlSyntaxError::unexpected(None, "a BDL entry", eoi(input))),
    }
}

/// The next token and its span, without consuming it. `None` at end of input.
fn peek<'t, I>() -> impl Parser<'t, I, (Option<Token>, SimpleSpan), Extra> + Clone
where
    I: ValueInput<'t, Token = Token, Span = SimpleSpan>,
{
    any()
        .map_with(|token, e| (Some(token), e.span()))
        .rewind()
        .or(end().map_with(|_, e| (None, e.span())))
}

/// Consume whatever is left, reporting its first token as unexpected.
fn rest<'t, I>(expected: &'static str) -> impl Parser<'t, I, (), Extra> + Clone
where
    I: ValueInput<'t, Token = Token, Span = SimpleSpan>,
{
    peek()
        .then_ignore(any().repeated())
        .validate(move |(next, span), _, emitter| {
            if let Some(token) = next {
                emitter.emit(BdlSyntaxError::unexpected(Some(&token), expected, span));
            }
        })
}

fn text<'t, I>() -> impl Parser<'t, I, Spanned<String>, Extra> + Clone
where
    I: ValueInput<'t, Token = Token, Span = SimpleSpan>,
{
    select! { Token::Text(text) => text }.map_with(|text, e| Spanned::new(text, e.span()))
}

/// `$N( text )`
fn name_parser<'t, I>() -> impl Parser<'t, I, Spanned<String>, Extra> + Clone
where
    I: ValueInput<'t, Token = Token, Span = SimpleSpan>,
{
    peek()
        .then(just(Token::NameOpen).to_span().or_not())
        .then(text().or_not())
        .then(just(Token::RParen).to_span().or_not())
        .validate(|((((_, here), open), text), close), _, emitter| {
            let Some(open) = open else {
                emitter.emit(BdlSyntaxError::new(SyntaxErrorKind::MissingName, here));
                return Spanned::new(String::new(), here);
            };
            let Some(close): Option<SimpleSpan> = close else {
                emitter.emit(BdlSyntaxError::new(SyntaxErrorKind::UnterminatedName, open));
                return Spanned::new(String::new(), open);
            };
            let name = text
                .unwrap_or_else(|| Spanned::new(String::new(), (open.start..close.end).into()));
            if !is_valid_name(&name.node) {
                emitter.emit(BdlSyntaxError::new(
                    SyntaxErrorKind::InvalidName {
                        name: name.node.clone(),
                    },
                    name.span,
                ));
            }
            name
        })
}

/// `$C( switch | regulate )`
fn control_parser<'t, I>() -> impl Parser<'t, I, Spanned<Control>, Extra> + Clone
where
    I: ValueInput<'t, Token = Token, Span = SimpleSpan>,
{
    peek()
        .then(just(Token::ControlOpen).to_span().or_not())
        .then(text().or_not())
        .then(just(Token::RParen).to_span().or_not())
        .validate(|((((_, here), open), text), close), _, emitter| {
            let Some(open) = open else {
                emitter.emit(BdlSyntaxError::new(
                    SyntaxErrorKind::MissingControlDeclaration,
                    here,
                ));
                return Spanned::new(Control::Switch, here);
            };
            let Some(close): Option<SimpleSpan> = close else {
                emitter.emit(BdlSyntaxError::new(SyntaxErrorKind::UnterminatedControl, open));
                return Spanned::new(Control::Switch, open);
            };
            let text = text
                .unwrap_or_else(|| Spanned::new(String::new(), (open.start..close.end).into()));
            match text.node.parse::<Control>() {
                Ok(control) => Spanned::new(control, text.span),
                Err(_) => {
                    emitter.emit(BdlSyntaxError::new(
                        SyntaxErrorKind::InvalidControlKind { found: text.node },
                        text.span,
                    ));
                    Spanned::new(Control::Switch, text.span)
                }
            }
        })
}

/// `{ $N(name) $C(control) }`
fn device_parser<'t, I>() -> impl Parser<'t, I, Spanned<DeviceSyntax>, Extra> + Clone
where
    I: ValueInput<'t, Token = Token, Span = SimpleSpan>,
{
    just(Token::LBrace)
        .to_span()
        .then(name_parser())
        .then(control_parser())
        .then(just(Token::RBrace).to_span().or_not())
        .validate(|(((open, name), control), close), _, emitter| {
            let close: Option<SimpleSpan> = close;
            let end = match close {
                Some(close) => close.end,
                None => {
                    emitter.emit(BdlSyntaxError::new(SyntaxErrorKind::UnterminatedDevice, open));
                    open.end
                }
            };
            Spanned::new(DeviceSyntax { name, control }, (open.start..end).into())
        })
}

/// `$G( device* )`
fn gadgets_parser<'t, I>() -> impl Parser<'t, I, Vec<Spanned<DeviceSyntax>>, Extra> + Clone
where
    I: ValueInput<'t, Token = Token, Span = SimpleSpan>,
{
    peek()
        .then(just(Token::GadgetsOpen).to_span().or_not())
        .validate(|((_, here), open), _, emitter| {
            if open.is_none() {
                emitter.emit(BdlSyntaxError::new(SyntaxErrorKind::MissingGadgetSection, here));
            }
            open
        })
        .then(device_parser().repeated().collect::<Vec<_>>())
        .then(peek())
        .then(just(Token::RParen).or_not())
        .validate(|(((open, devices), (next, here)), close), _, emitter| {
            if let (Some(open), None) = (open, close) {
                match next {
                    Some(Token::RBracket) | None => emitter.emit(BdlSyntaxError::new(
                        SyntaxErrorKind::UnterminatedGadgetList,
                        open,
                    )),
                    Some(token) => emitter.emit(BdlSyntaxError::unexpected(
                        Some(&token),
                        "a device '{' or ')'",
                        here,
                    )),
                }
            }
            devices
        })
}

/// `[ $N(name) $G( device* ) ]`
fn room_parser<'t, I>() -> impl Parser<'t, I, Spanned<RoomSyntax>, Extra> + Clone
where
    I: ValueInput<'t, Token = Token, Span = SimpleSpan>,
{
    just(Token::LBracket)
        .to_span()
        .then(name_parser())
        .then(gadgets_parser())
        .then(just(Token::RBracket).to_span().or_not())
        .validate(|(((open, name), devices), close), _, emitter| {
            let close: Option<SimpleSpan> = close;
            let end = match close {
                Some(close) => close.end,
                None => {
                    emitter.emit(BdlSyntaxError::new(SyntaxErrorKind::UnterminatedRoom, open));
                    open.end
                }
            };
            Spanned::new(RoomSyntax { name, devices }, (open.start..end).into())
        })
}

/// `$N(name)? (room | device)*`
fn document_parser<'t, I>() -> impl Parser<'t, I, DocumentSyntax, Extra> + Clone
where
    I: ValueInput<'t, Token = Token, Span = SimpleSpan>,
{
    let entry = choice((
        room_parser().map(|room| room.map(EntrySyntax::Room)),
        device_parser().map(|device| device.map(EntrySyntax::Device)),
    ));

    just(Token::NameOpen)
        .rewind()
        .ignore_then(name_parser())
        .or_not()
        .then(entry.repeated().collect::<Vec<_>>())
        .then_ignore(rest("a room '[' or a device '{'"))
        .map(|(name, entries)| DocumentSyntax { name, entries })
}

/// Exactly one `entry`, reporting anything else as unexpected.
fn fragment_parser<'t, I, T>(
    entry: impl Parser<'t, I, T, Extra> + Clone,
    expected: &'static str,
) -> impl Parser<'t, I, Option<T>, Extra> + Clone
where
    I: ValueInput<'t, Token = Token, Span = SimpleSpan>,
{
    peek()
        .then(entry.or_not())
        .validate(move |((next, here), entry), _, emitter| {
            if entry.is_none() {
                emitter.emit(BdlSyntaxError::unexpected(next.as_ref(), expected, here));
            }
            entry
        })
        .then_ignore(rest("end of input"))
}

fn lower_device(device: DeviceSyntax) -> Device {
    Device::new(device.name.node, device.control.node)
}

fn lower_room(room: RoomSyntax) -> Room {
    let mut lowered = Room::new(room.name.node);
    for device in room.devices {
        let span = device.span;
        if let Some(previous) = lowered.insert(lower_device(device.node)) {
            warn!(
                room = lowered.name(),
                device = previous.name(),
                at = ?span,
                "duplicate device name, keeping the later declaration"
            );
        }
    }
    lowered
}

fn lower_document(document: DocumentSyntax, default_name: &str) -> Building {
    let name = document
        .name
        .map_or_else(|| default_name.to_string(), |name| name.node);
    let mut building = Building::new(name);

    for entry in document.entries {
        let span = entry.span;
        let lowered: Entry = match entry.node {
            EntrySyntax::Room(room) => lower_room(room).into(),
            EntrySyntax::Device(device) => lower_device(device).into(),
        };
        if let Some(previous) = building.insert(lowered) {
            warn!(
                building = building.name(),
                entry = previous.name(),
                at = ?span,
                "duplicate entry name, keeping the later declaration"
            );
        } else {
            debug!(building = building.name(), at = ?span, "parsed entry");
        }
    }

    building
}
