//! Conversion between document state and MarkLogic's native XML.
//!
//! [`serialize`] renders a [`State`](crate::state::State) as a `<document>`; [`deserialize`]
//! reads one back. For every state `s` outside the known asymmetry below,
//! `deserialize(serialize(s)?)? == s`.
//!
//! # Known asymmetry
//!
//! An array's element type is carried by its items. An **empty** array of a non-string
//! type has no items, so it is read back as an empty string array.

pub mod deserializer;
pub mod errors;
pub mod serializer;
pub(crate) mod xml;

pub use deserializer::deserialize;
pub use errors::CodecError;
pub use serializer::serialize;
pub use xml::XmlDocument;
