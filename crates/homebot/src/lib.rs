pub mod bdl;
pub mod config;
pub mod model;
pub mod pretty_print;

pub use bdl::format_syntax_error;
pub use bdl::parse_device;
pub use bdl::parse_document;
pub use bdl::parse_document_with_default_name;
pub use bdl::parse_room;
pub use bdl::BdlSyntaxError;
pub use bdl::SyntaxErrorKind;
pub use bdl::ToBdl;
pub use config::Config;
pub use config::LogLevel;
pub use model::Address;
pub use model::Building;
pub use model::Control;
pub use model::Device;
pub use model::Entry;
pub use model::ModelError;
pub use model::Node;
pub use model::Power;
pub use model::Room;
pub use pretty_print::PrettyPrint;
