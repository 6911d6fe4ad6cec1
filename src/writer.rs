//! The stream writer session.
//!
//! A [`StreamWriter`] collects value tokens while an object graph is visited
//! and assembles them, together with the string table and the two header
//! words, into the finished text:
//!
//! ```text
//! [tokens],[strings],flags,version]
//! ```
//!
//! Tokens come out in the reverse of the order they were appended. Readers
//! consume the value array from the front, so whatever was appended last must
//! be read first; every producer of tokens appends in the reverse of the order
//! the reader expects them.
//!
//! ## Examples
//!
//! ```rust
//! use serde_rpcjson::StreamWriter;
//!
//! let mut writer = StreamWriter::new();
//! writer.write_int(1);
//! writer.write_string(Some("a"));
//! writer.write_long(-1);
//! assert_eq!(writer.finish().unwrap(), r#"['P__________',1,1],["a"],0,7]"#);
//! ```

use crate::codec::{Base64LongCodec, Integer64Codec};
use crate::escape::Escaper;
use crate::options::{Layout, WriterOptions};
use crate::properties::PropertyTable;
use crate::registry::{RpcObject, TypeSerializer};
use crate::string_table::{StringTable, StringTableSource};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::Serialize;
use std::any::TypeId;
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Separator between array elements.
pub const SEPARATOR: char = ',';

/// Delimiter of a long token.
pub const LONG_QUOTE: char = '\'';

static DEFAULT_CODEC: Base64LongCodec = Base64LongCodec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionState {
    Open,
    Failed,
}

/// Identity of a written instance. Instances are borrowed for the whole
/// session, so an address cannot be reused by another value while the key is
/// held. The type is part of the key because a struct and its first field
/// share an address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct ObjectKey {
    address: usize,
    type_id: TypeId,
}

impl ObjectKey {
    fn of(instance: &dyn RpcObject) -> Option<Self> {
        // Zero-sized values do not have a distinct address.
        if std::mem::size_of_val(instance) == 0 {
            return None;
        }
        Some(ObjectKey {
            address: instance as *const _ as *const () as usize,
            type_id: instance.as_any().type_id(),
        })
    }
}

/// Builds the string table segment: `["a","b"]`, or `[]` when empty.
#[must_use]
pub fn string_table_segment<S>(escaper: &Escaper<'_>, source: &S) -> String
where
    S: StringTableSource + ?Sized,
{
    let mut out = String::with_capacity(2 + source.len() * 8);
    out.push('[');
    for entry in source.entries() {
        escaper.escape_into(entry, &mut out);
        out.push(SEPARATOR);
    }
    if !source.is_empty() {
        out.pop();
    }
    out.push(']');
    out
}

/// Magnitudes at or above this are written with an exponent.
const EXPONENT_ABOVE: f64 = 1e21;

/// Nonzero magnitudes below this are written with an exponent.
const EXPONENT_BELOW: f64 = 1e-6;

fn float_token<T>(value: T) -> String
where
    T: Into<f64> + fmt::Display + fmt::LowerExp + Copy,
{
    let wide: f64 = value.into();
    if wide.is_nan() {
        "NaN".to_string()
    } else if wide.is_infinite() {
        let text = if wide > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if wide != 0.0 && (wide.abs() >= EXPONENT_ABOVE || wide.abs() < EXPONENT_BELOW) {
        // Shortest digits of `T` itself, so f32 values keep their own repr
        format!("{value:e}")
    } else {
        value.to_string()
    }
}

/// An encoding session for one object graph.
pub struct StreamWriter<'a> {
    tokens: VecDeque<String>,
    strings: StringTable,
    objects: HashMap<ObjectKey, i32>,
    options: WriterOptions,
    escaper: Escaper<'a>,
    codec: &'a dyn Integer64Codec,
    serializer: Option<&'a dyn TypeSerializer>,
    state: SessionState,
}

impl fmt::Debug for StreamWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamWriter")
            .field("tokens", &self.tokens)
            .field("strings", &self.strings)
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Default for StreamWriter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> StreamWriter<'a> {
    /// Creates a writer with default options, the shared property table and
    /// the base-64 long codec. Objects cannot be written until a type
    /// serializer is attached.
    pub fn new() -> Self {
        StreamWriter {
            tokens: VecDeque::new(),
            strings: StringTable::new(),
            objects: HashMap::new(),
            options: WriterOptions::default(),
            escaper: Escaper::new(PropertyTable::shared()),
            codec: &DEFAULT_CODEC,
            serializer: None,
            state: SessionState::Open,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: WriterOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_type_serializer(mut self, serializer: &'a dyn TypeSerializer) -> Self {
        self.serializer = Some(serializer);
        self
    }

    #[must_use]
    pub fn with_codec(mut self, codec: &'a dyn Integer64Codec) -> Self {
        self.codec = codec;
        self
    }

    #[must_use]
    pub fn with_property_table(mut self, table: &'a PropertyTable) -> Self {
        self.escaper = Escaper::new(table);
        self
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    pub fn flags(&self) -> i32 {
        self.options.flags
    }

    pub fn set_flags(&mut self, flags: i32) {
        self.options.flags = flags;
    }

    pub fn version(&self) -> i32 {
        self.options.version
    }

    /// Number of value tokens appended so far.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn string_table(&self) -> &StringTable {
        &self.strings
    }

    /// Whether a delegated write failed. A failed session cannot be finished.
    pub fn is_failed(&self) -> bool {
        self.state == SessionState::Failed
    }

    /// Clears all tokens, strings and object identities for a new graph.
    pub fn reset(&mut self) {
        self.tokens.clear();
        self.strings.clear();
        self.objects.clear();
        self.state = SessionState::Open;
    }

    /// Appends an already formatted token. `token` must not contain a separator.
    pub fn append_token(&mut self, token: impl Into<String>) {
        self.tokens.push_front(token.into());
    }

    /// Inserts `token` as though it had been appended when the writer held
    /// `mark` tokens.
    pub(crate) fn insert_token_at_mark(&mut self, mark: usize, token: String) {
        let position = self.tokens.len().saturating_sub(mark);
        self.tokens.insert(position, token);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.append_token(if value { "1" } else { "0" });
    }

    pub fn write_byte(&mut self, value: i8) {
        self.append_token(value.to_string());
    }

    pub fn write_short(&mut self, value: i16) {
        self.append_token(value.to_string());
    }

    pub fn write_int(&mut self, value: i32) {
        self.append_token(value.to_string());
    }

    /// Writes the code point of `value` as a decimal literal.
    pub fn write_char(&mut self, value: char) {
        self.append_token(u32::from(value).to_string());
    }

    pub fn write_float(&mut self, value: f32) {
        self.append_token(float_token(value));
    }

    pub fn write_double(&mut self, value: f64) {
        self.append_token(float_token(value));
    }

    /// Writes a 64-bit integer as quoted codec text, never as a bare number.
    pub fn write_long(&mut self, value: i64) {
        let encoded = self.codec.encode(value);
        let mut token = String::with_capacity(encoded.len() + 2);
        token.push(LONG_QUOTE);
        token.push_str(&encoded);
        token.push(LONG_QUOTE);
        self.append_token(token);
    }

    /// Adds `value` to the string table and returns its 1-based index.
    pub fn add_string(&mut self, value: &str) -> i32 {
        self.strings.add(value)
    }

    /// Writes the string-table index of `value`, `0` for `None`.
    pub fn write_string(&mut self, value: Option<&str>) {
        let index = self.strings.add_optional(value);
        self.write_int(index);
    }

    /// Writes a timestamp as milliseconds since the Unix epoch.
    pub fn write_date(&mut self, value: &DateTime<Utc>) {
        self.write_long(value.timestamp_millis());
    }

    /// Writes an arbitrary-precision integer as its decimal string.
    pub fn write_big_integer(&mut self, value: &BigInt) {
        self.write_string(Some(&value.to_string()));
    }

    pub fn write_null(&mut self) {
        self.write_string(None);
    }

    /// Writes an object: a back-reference if this instance was already
    /// written, otherwise its signature followed by its fields.
    ///
    /// The instance stays borrowed until the session ends. A value that is
    /// gone before then could hand its address to a different value, so the
    /// borrow checker rejects it:
    ///
    /// ```compile_fail
    /// use serde_rpcjson::{rpc_object, StreamWriter, TypeRegistry};
    ///
    /// struct Node { value: i32 }
    /// rpc_object!(Node => "test.Node");
    ///
    /// let mut registry = TypeRegistry::new();
    /// registry.register("test.Node", "N", |w, n: &Node| {
    ///     w.write_int(n.value);
    ///     Ok(())
    /// });
    ///
    /// let mut writer = StreamWriter::new().with_type_serializer(&registry);
    /// let first = Box::new(Node { value: 1 });
    /// writer.write_object(&*first).unwrap();
    /// drop(first);
    /// let second = Box::new(Node { value: 2 });
    /// writer.write_object(&*second).unwrap();
    /// writer.finish().unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Propagates any failure of the type serializer. The session is failed
    /// afterwards and must be discarded.
    pub fn write_object(&mut self, instance: &'a dyn RpcObject) -> Result<()> {
        if let Some(key) = ObjectKey::of(instance) {
            if let Some(&index) = self.objects.get(&key) {
                self.write_int(-(index + 1));
                return Ok(());
            }
            let index = self.objects.len() as i32;
            self.objects.insert(key, index);
        }
        let signature = self.resolve_type_signature(instance)?;
        self.write_string(Some(&signature));
        self.serialize_instance(instance, &signature)
    }

    /// [`StreamWriter::write_object`], writing null for `None`.
    ///
    /// # Errors
    ///
    /// See [`StreamWriter::write_object`].
    pub fn write_nullable_object(&mut self, instance: Option<&'a dyn RpcObject>) -> Result<()> {
        match instance {
            Some(instance) => self.write_object(instance),
            None => {
                self.write_null();
                Ok(())
            }
        }
    }

    /// Writes any `T: Serialize` through the serde mapping of [`crate::ser`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value has no wire representation; the session
    /// is failed afterwards.
    pub fn write_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let mut serializer = crate::ser::Serializer::new(self);
        match value.serialize(&mut serializer) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Signature of the instance's type. Enum constants resolve to their
    /// declaring type.
    ///
    /// # Errors
    ///
    /// Propagates the type serializer's failure and fails the session.
    pub fn resolve_type_signature(&mut self, instance: &dyn RpcObject) -> Result<String> {
        let Some(serializer) = self.serializer else {
            return Err(self.fail(Error::NoTypeSerializer));
        };
        let type_name = instance.runtime_type().signature_type();
        serializer
            .signature_for(type_name)
            .map_err(|err| self.fail(err))
    }

    /// Hands `instance` to the type serializer to write its fields.
    ///
    /// # Errors
    ///
    /// Propagates the type serializer's failure and fails the session.
    pub fn serialize_instance(&mut self, instance: &'a dyn RpcObject, signature: &str) -> Result<()> {
        let Some(serializer) = self.serializer else {
            return Err(self.fail(Error::NoTypeSerializer));
        };
        log::trace!("writing fields of {signature}");
        serializer
            .serialize(self, instance, signature)
            .map_err(|err| self.fail(err))
    }

    fn fail(&mut self, err: Error) -> Error {
        if self.state == SessionState::Open {
            log::warn!("stream write failed, session can no longer be finished: {err}");
        }
        self.state = SessionState::Failed;
        err
    }

    /// The string table as it will appear in the finished text.
    pub fn string_table_segment(&self) -> String {
        string_table_segment(&self.escaper, &self.strings)
    }

    /// Assembles the finished text without consuming the session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionFailed`] if a delegated write failed.
    pub fn to_wire_string(&self) -> Result<String> {
        if self.is_failed() {
            return Err(Error::SessionFailed);
        }
        Ok(self.assemble())
    }

    /// Finishes the session and returns the text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionFailed`] if a delegated write failed.
    pub fn finish(self) -> Result<String> {
        let text = self.to_wire_string()?;
        log::debug!(
            "finished stream: {} tokens, {} strings, {} bytes",
            self.tokens.len(),
            self.strings.len(),
            text.len()
        );
        Ok(text)
    }

    fn assemble(&self) -> String {
        let strings = self.string_table_segment();
        let tokens_len: usize = self.tokens.iter().map(|t| t.len() + 1).sum();
        let mut out = String::with_capacity(tokens_len + strings.len() + 32);

        out.push('[');
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                out.push(SEPARATOR);
            }
            out.push_str(token);
        }
        match self.options.layout {
            Layout::Nested => {
                out.push(']');
                out.push(SEPARATOR);
            }
            Layout::Flat => {
                if !self.tokens.is_empty() {
                    out.push(SEPARATOR);
                }
            }
        }
        out.push_str(&strings);
        out.push(SEPARATOR);
        out.push_str(&self.options.flags.to_string());
        out.push(SEPARATOR);
        out.push_str(&self.options.version.to_string());
        out.push(']');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeRegistry;
    use crate::rpc_object;

    #[test]
    fn test_empty_session() {
        let writer = StreamWriter::new();
        assert_eq!(writer.finish().unwrap(), "[],[],0,7]");
    }

    #[test]
    fn test_single_token_has_no_leading_separator() {
        let mut writer = StreamWriter::new();
        writer.append_token("X");
        assert_eq!(writer.finish().unwrap(), "[X],[],0,7]");
    }

    #[test]
    fn test_tokens_reverse_append_order() {
        let mut writer = StreamWriter::new();
        writer.append_token("T1");
        writer.append_token("T2");
        writer.append_token("T3");
        assert_eq!(writer.finish().unwrap(), "[T3,T2,T1],[],0,7]");
    }

    #[test]
    fn test_string_table_segment() {
        let escaper = Escaper::new(PropertyTable::shared());
        let entries: &[&str] = &["a", "b"];
        assert_eq!(string_table_segment(&escaper, entries), r#"["a","b"]"#);
        let empty: &[&str] = &[];
        assert_eq!(string_table_segment(&escaper, empty), "[]");
        let quoted: &[&str] = &["x\"y"];
        assert_eq!(string_table_segment(&escaper, quoted), r#"["x\"y"]"#);
    }

    #[test]
    fn test_flags_and_version() {
        let options = WriterOptions::new().with_flags(3).with_version(5);
        let mut writer = StreamWriter::new().with_options(options);
        writer.write_bool(true);
        assert_eq!(writer.flags(), 3);
        writer.set_flags(1);
        assert_eq!(writer.finish().unwrap(), "[1],[],1,5]");
    }

    #[test]
    fn test_flat_layout() {
        let options = WriterOptions::new().with_layout(Layout::Flat);
        let mut writer = StreamWriter::new().with_options(options.clone());
        writer.write_string(Some("a"));
        writer.write_int(9);
        assert_eq!(writer.finish().unwrap(), r#"[9,1,["a"],0,7]"#);

        let writer = StreamWriter::new().with_options(options);
        assert_eq!(writer.finish().unwrap(), "[[],0,7]");
    }

    #[test]
    fn test_primitive_tokens() {
        let mut writer = StreamWriter::new();
        writer.write_bool(false);
        writer.write_byte(-8);
        writer.write_short(300);
        writer.write_char('A');
        writer.write_float(0.5);
        writer.write_double(f64::NAN);
        writer.write_double(f64::NEG_INFINITY);
        writer.write_double(2.25);
        writer.write_long(0);
        assert_eq!(
            writer.finish().unwrap(),
            "['A',2.25,-Infinity,NaN,0.5,65,300,-8,0],[],0,7]"
        );
    }

    #[test]
    fn test_strings_are_deduplicated() {
        let mut writer = StreamWriter::new();
        writer.write_string(Some("x"));
        writer.write_string(None);
        writer.write_string(Some("y"));
        writer.write_string(Some("x"));
        assert_eq!(writer.add_string("y"), 2);
        assert_eq!(writer.finish().unwrap(), r#"[1,2,0,1],["x","y"],0,7]"#);
    }

    #[test]
    fn test_date_and_big_integer() {
        let mut writer = StreamWriter::new();
        let date = DateTime::<Utc>::from_timestamp_millis(64).unwrap();
        writer.write_date(&date);
        writer.write_big_integer(&BigInt::from(-12345));
        assert_eq!(writer.finish().unwrap(), r#"[1,'BA'],["-12345"],0,7]"#);
    }

    #[test]
    fn test_insert_at_mark() {
        let mut writer = StreamWriter::new();
        writer.append_token("a");
        let mark = writer.token_count();
        writer.append_token("b");
        writer.append_token("c");
        writer.insert_token_at_mark(mark, "n".to_string());
        assert_eq!(writer.finish().unwrap(), "[c,b,n,a],[],0,7]");
    }

    #[test]
    fn test_to_wire_string_is_repeatable() {
        let mut writer = StreamWriter::new();
        writer.write_int(1);
        let first = writer.to_wire_string().unwrap();
        assert_eq!(writer.to_wire_string().unwrap(), first);
    }

    #[test]
    fn test_reset() {
        let mut writer = StreamWriter::new();
        writer.write_string(Some("gone"));
        writer.reset();
        writer.write_string(Some("kept"));
        assert_eq!(writer.finish().unwrap(), r#"[1],["kept"],0,7]"#);
    }

    struct Node {
        value: i32,
    }

    struct Unknown {
        _value: u8,
    }

    rpc_object!(Node => "test.Node");
    rpc_object!(Unknown => "test.Unknown");

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register("test.Node", "N", |w, n: &Node| {
            w.write_int(n.value);
            Ok(())
        });
        registry
    }

    #[test]
    fn test_back_reference() {
        let registry = registry();
        let node = Node { value: 5 };
        let other = Node { value: 6 };
        let mut writer = StreamWriter::new().with_type_serializer(&registry);
        writer.write_object(&node).unwrap();
        writer.write_object(&other).unwrap();
        writer.write_object(&node).unwrap();
        writer.write_nullable_object(None).unwrap();
        assert_eq!(writer.finish().unwrap(), r#"[0,-1,6,1,5,1],["N"],0,7]"#);
    }

    fn emit<'a>(writer: &mut StreamWriter<'a>, node: &'a Node) -> Result<()> {
        writer.write_object(node)
    }

    #[test]
    fn test_distinct_instances_from_helper() {
        let registry = registry();
        let nodes: Vec<Node> = [10, 20, 30].into_iter().map(|value| Node { value }).collect();
        let mut writer = StreamWriter::new().with_type_serializer(&registry);
        for node in &nodes {
            emit(&mut writer, node).unwrap();
        }
        assert_eq!(
            writer.finish().unwrap(),
            r#"[30,1,20,1,10,1],["N"],0,7]"#
        );
    }

    #[test]
    fn test_boxed_instances_are_distinct() {
        let registry = registry();
        let first = Box::new(Node { value: 1 });
        let second = Box::new(Node { value: 2 });
        let mut writer = StreamWriter::new().with_type_serializer(&registry);
        writer.write_object(&*first).unwrap();
        writer.write_object(&*second).unwrap();
        writer.write_object(&*first).unwrap();
        assert_eq!(writer.finish().unwrap(), r#"[-1,2,1,1,1],["N"],0,7]"#);
    }

    #[test]
    fn test_large_and_small_floats_use_exponent() {
        let mut writer = StreamWriter::new();
        writer.write_double(1e300);
        writer.write_double(-1.5e-7);
        writer.write_double(123_456.5);
        writer.write_double(0.0);
        writer.write_float(1e30);
        writer.write_double(1e20);
        assert_eq!(
            writer.finish().unwrap(),
            "[100000000000000000000,1e30,0,123456.5,-1.5e-7,1e300],[],0,7]"
        );
    }

    #[test]
    fn test_failure_poisons_session() {
        let registry = registry();
        let mut writer = StreamWriter::new().with_type_serializer(&registry);
        let unknown = Unknown { _value: 1 };
        let err = writer.write_object(&unknown).unwrap_err();
        assert!(matches!(err, Error::UnknownType(_)));
        assert!(writer.is_failed());
        assert!(matches!(writer.to_wire_string(), Err(Error::SessionFailed)));
        assert!(matches!(writer.finish(), Err(Error::SessionFailed)));
    }

    #[test]
    fn test_object_without_type_serializer() {
        let node = Node { value: 1 };
        let mut writer = StreamWriter::new();
        let err = writer.write_object(&node).unwrap_err();
        assert!(matches!(err, Error::NoTypeSerializer));
        assert!(writer.is_failed());
    }
}
