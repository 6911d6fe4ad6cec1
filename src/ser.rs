//! Serde support.
//!
//! [`Serializer`] drives a [`StreamWriter`] from any `T: Serialize`, so plain
//! `#[derive(Serialize)]` types can be written without registering field
//! writers. The mapping follows the stream's own conventions:
//!
//! | serde | tokens |
//! |-------|--------|
//! | `bool` | `1` / `0` |
//! | `i8`, `i16`, `i32`, `u8`, `u16` | decimal int |
//! | `i64`, `u32`, `u64` | quoted long (`u64` above `i64::MAX` is rejected) |
//! | `f32`, `f64` | decimal, `NaN`, `Infinity`, `-Infinity` |
//! | `char` | decimal code point |
//! | `str` | string-table index |
//! | `None`, `()` | `0` (null string) |
//! | `Some(v)` | `v` |
//! | struct, tuple struct, unit struct | signature (type name), then fields |
//! | enum variant | signature (enum name), ordinal, then payload |
//! | seq, map, bytes | element count, then elements (key before value) |
//! | tuple | elements |
//!
//! Field names are not written; readers decode fields by position.
//!
//! ## Examples
//!
//! ```rust
//! use serde::Serialize;
//! use serde_rpcjson::to_string;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let text = to_string(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(text, r#"[2,1,1],["Point"],0,7]"#);
//! ```

use crate::writer::StreamWriter;
use crate::{Error, Result};
use serde::{ser, Serialize};

fn length_token(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| Error::unsupported_type("collection longer than i32::MAX"))
}

/// Serde serializer writing into a [`StreamWriter`].
pub struct Serializer<'w, 'a> {
    writer: &'w mut StreamWriter<'a>,
}

impl<'w, 'a> Serializer<'w, 'a> {
    pub fn new(writer: &'w mut StreamWriter<'a>) -> Self {
        Serializer { writer }
    }

    /// The underlying stream writer.
    pub fn writer(&mut self) -> &mut StreamWriter<'a> {
        self.writer
    }

    fn write_signature(&mut self, name: &str) {
        self.writer.write_string(Some(name));
    }

    fn write_variant(&mut self, name: &str, variant_index: u32) {
        self.write_signature(name);
        self.writer.write_int(variant_index as i32);
    }
}

/// A sequence whose length was not known up front. The count is inserted
/// behind its elements once the sequence ends.
struct PendingLength {
    mark: usize,
    count: usize,
}

/// Serializer for every compound serde type.
pub struct Compound<'s, 'w, 'a> {
    ser: &'s mut Serializer<'w, 'a>,
    pending: Option<PendingLength>,
}

impl<'s, 'w, 'a> Compound<'s, 'w, 'a> {
    fn fixed(ser: &'s mut Serializer<'w, 'a>) -> Self {
        Compound { ser, pending: None }
    }

    fn counted(ser: &'s mut Serializer<'w, 'a>, len: Option<usize>) -> Result<Self> {
        match len {
            Some(len) => {
                ser.writer.write_int(length_token(len)?);
                Ok(Compound { ser, pending: None })
            }
            None => {
                let mark = ser.writer.token_count();
                Ok(Compound {
                    ser,
                    pending: Some(PendingLength { mark, count: 0 }),
                })
            }
        }
    }

    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(&mut *self.ser)
    }

    fn count(&mut self) {
        if let Some(pending) = self.pending.as_mut() {
            pending.count += 1;
        }
    }

    fn finish(self) -> Result<()> {
        if let Some(pending) = self.pending {
            let len = length_token(pending.count)?;
            self.ser
                .writer
                .insert_token_at_mark(pending.mark, len.to_string());
        }
        Ok(())
    }
}

impl<'s, 'w, 'a> ser::Serializer for &'s mut Serializer<'w, 'a> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'s, 'w, 'a>;
    type SerializeTuple = Compound<'s, 'w, 'a>;
    type SerializeTupleStruct = Compound<'s, 'w, 'a>;
    type SerializeTupleVariant = Compound<'s, 'w, 'a>;
    type SerializeMap = Compound<'s, 'w, 'a>;
    type SerializeStruct = Compound<'s, 'w, 'a>;
    type SerializeStructVariant = Compound<'s, 'w, 'a>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.writer.write_bool(v);
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.writer.write_byte(v);
        Ok(())
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.writer.write_short(v);
        Ok(())
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.writer.write_int(v);
        Ok(())
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        self.writer.write_long(v);
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_i32(i32::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_i32(i32::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        let v = i64::try_from(v)
            .map_err(|_| Error::unsupported_type("u64 value above i64::MAX"))?;
        self.serialize_i64(v)
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.writer.write_float(v);
        Ok(())
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        self.writer.write_double(v);
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        self.writer.write_char(v);
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        self.writer.write_string(Some(v));
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        self.writer.write_int(length_token(v.len())?);
        for byte in v {
            self.writer.write_byte(*byte as i8);
        }
        Ok(())
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        self.writer.write_null();
        Ok(())
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Self::Ok> {
        self.write_signature(name);
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok> {
        self.write_variant(name, variant_index);
        Ok(())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        self.write_variant(name, variant_index);
        value.serialize(self)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Compound::counted(self, len)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(Compound::fixed(self))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.write_signature(name);
        Ok(Compound::fixed(self))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.write_variant(name, variant_index);
        Ok(Compound::fixed(self))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Compound::counted(self, len)
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.write_signature(name);
        Ok(Compound::fixed(self))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.write_variant(name, variant_index);
        Ok(Compound::fixed(self))
    }
}

impl<'s, 'w, 'a> ser::SerializeSeq for Compound<'s, 'w, 'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.count();
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'s, 'w, 'a> ser::SerializeTuple for Compound<'s, 'w, 'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'s, 'w, 'a> ser::SerializeTupleStruct for Compound<'s, 'w, 'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'s, 'w, 'a> ser::SerializeTupleVariant for Compound<'s, 'w, 'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'s, 'w, 'a> ser::SerializeMap for Compound<'s, 'w, 'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.count();
        self.element(key)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'s, 'w, 'a> ser::SerializeStruct for Compound<'s, 'w, 'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'s, 'w, 'a> ser::SerializeStructVariant for Compound<'s, 'w, 'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}
