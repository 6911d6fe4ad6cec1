//! # serde_rpcjson
//!
//! An encoder for the RPC JSON stream format: a compact text form of an object
//! graph made for two processes that do not share a type system at runtime.
//!
//! ## The Format
//!
//! A finished stream is a bracketed list of value tokens, a deduplicated
//! string table, a flags word and a version word:
//!
//! ```text
//! [3,'BA',1],["com.example.Order/1"],0,7]
//! ```
//!
//! - **Value tokens** are literals (`1`, `-4`, `2.5`), string-table indices,
//!   or quoted longs (`'BA'`). They appear in the reverse of the order they
//!   were written, which lets a reader decode in a single forward pass.
//! - **Strings** are stored once and escaped so that they survive any
//!   text-only channel; see [`Escaper`].
//! - **Longs** travel as base-64 text because the reader's numbers cannot
//!   hold every 64-bit value; see [`Base64LongCodec`].
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use serde_rpcjson::to_string;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! let text = to_string(&User { id: 64, name: "Ann".to_string() }).unwrap();
//! assert_eq!(text, r#"[2,'BA',1],["User","Ann"],0,7]"#);
//! ```
//!
//! ## Registered Types
//!
//! For graphs with shared references, or when signatures must match a peer's
//! type ids, write objects through a [`TypeRegistry`]:
//!
//! ```rust
//! use serde_rpcjson::{rpc_object, StreamWriter, TypeRegistry};
//!
//! struct Tag { label: String }
//! rpc_object!(Tag => "com.example.Tag");
//!
//! let mut registry = TypeRegistry::new();
//! registry.register("com.example.Tag", "com.example.Tag/99", |w, tag: &Tag| {
//!     w.write_string(Some(&tag.label));
//!     Ok(())
//! });
//!
//! let tag = Tag { label: "x".to_string() };
//! let mut writer = StreamWriter::new().with_type_serializer(&registry);
//! writer.write_object(&tag).unwrap();
//! writer.write_object(&tag).unwrap();
//! assert_eq!(
//!     writer.finish().unwrap(),
//!     r#"[-1,2,1],["com.example.Tag/99","x"],0,7]"#
//! );
//! ```
//!
//! ## Character Properties
//!
//! Escaping decisions depend on Unicode general categories. They come from a
//! [`PropertyTable`] that is unpacked once per process and shared read-only
//! by every writer.

pub mod category;
pub mod codec;
pub mod error;
pub mod escape;
pub mod latin1;
pub mod macros;
pub mod options;
pub mod properties;
pub mod registry;
pub mod ser;
pub mod string_table;
pub mod writer;

pub use category::Category;
pub use codec::{Base64LongCodec, Integer64Codec};
pub use error::{Error, Result};
pub use escape::Escaper;
pub use options::{
    Layout, WriterOptions, FLAG_ELIDE_TYPE_NAMES, FLAG_RPC_TOKEN_INCLUDED,
    SERIALIZATION_STREAM_VERSION,
};
pub use properties::PropertyTable;
pub use registry::{RpcObject, RuntimeType, TypeRegistry, TypeSerializer};
pub use ser::Serializer;
pub use string_table::{StringTable, StringTableSource};
pub use writer::StreamWriter;

use serde::Serialize;
use std::io;

/// Encode any `T: Serialize` as a finished stream.
///
/// # Examples
///
/// ```rust
/// use serde_rpcjson::to_string;
///
/// assert_eq!(to_string(&vec![1, 2]).unwrap(), "[2,1,2],[],0,7]");
/// ```
///
/// # Errors
///
/// Returns an error if the value has no wire representation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, WriterOptions::default())
}

/// Encode any `T: Serialize` with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_rpcjson::{to_string_with_options, Layout, WriterOptions};
///
/// let options = WriterOptions::new().with_layout(Layout::Flat).with_flags(1);
/// assert_eq!(to_string_with_options(&true, options).unwrap(), "[1,[],1,7]");
/// ```
///
/// # Errors
///
/// Returns an error if the value has no wire representation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: WriterOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut writer = StreamWriter::new().with_options(options);
    writer.write_value(value)?;
    writer.finish()
}

/// Encode any `T: Serialize` into an `io::Write`.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
