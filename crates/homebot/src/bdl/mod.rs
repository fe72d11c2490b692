//! The Building Description Language (BDL).
//!
//! A BDL document names a building and lists its rooms and standalone
//! devices:
//!
//! ```text
//! $N(house)
//! [ $N(kitchen) $G( {$N(light) $C(switch)} {$N(fan) $C(regulate)} ) ]
//! {$N(pump) $C(switch)}
//! ```
//!
//! `$N(...)` is a name, `$C(...)` a control kind (`switch` or `regulate`),
//! `$G(...)` a room's gadget list. Devices never nest and rooms only appear
//! at the top level.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod serialize;
pub mod syntax;

pub use error::format_syntax_error;
pub use error::BdlSyntaxError;
pub use error::SyntaxErrorKind;
pub use parser::parse_device;
pub use parser::parse_document;
pub use parser::parse_document_with_default_name;
pub use parser::parse_room;
pub use parser::parse_syntax;
pub use serialize::ToBdl;
