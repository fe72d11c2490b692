//! Syntax tree for BDL documents.
//!
//! All nodes include source span information for error reporting. The tree
//! keeps duplicates exactly as written; they are only collapsed when the
//! document is lowered into a [`crate::model::Building`].

use chumsky::span::SimpleSpan;

use crate::model::Control;

/// A syntax node with an associated source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: SimpleSpan,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: SimpleSpan) -> Self {
        Self { node, span }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned::new(f(self.node), self.span)
    }
}

/// `$N(name)? Entry*`
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSyntax {
    pub name: Option<Spanned<String>>,
    pub entries: Vec<Spanned<EntrySyntax>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntrySyntax {
    Room(RoomSyntax),
    Device(DeviceSyntax),
}

/// `[ $N(name) $G( Device* ) ]`
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSyntax {
    pub name: Spanned<String>,
    pub devices: Vec<Spanned<DeviceSyntax>>,
}

/// `{ $N(name) $C(switch|regulate) }`
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSyntax {
    pub name: Spanned<String>,
    pub control: Spanned<Control>,
}
