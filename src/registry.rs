//! Type signatures and per-type field writers.
//!
//! A stream writer does not know how to visit the fields of an object. It asks
//! a [`TypeSerializer`] for the signature of the instance's type and then hands
//! the instance back to it, along with the writer, to emit the fields.
//!
//! [`TypeRegistry`] is the runtime implementation: field writers are closures
//! registered per type name, and deny patterns keep chosen types off the wire.
//!
//! ## Examples
//!
//! ```rust
//! use serde_rpcjson::{rpc_object, StreamWriter, TypeRegistry};
//!
//! struct Point { x: i32, y: i32 }
//! rpc_object!(Point => "com.example.Point");
//!
//! let mut registry = TypeRegistry::new();
//! registry.register("com.example.Point", "com.example.Point/1", |w, p: &Point| {
//!     w.write_int(p.x);
//!     w.write_int(p.y);
//!     Ok(())
//! });
//!
//! let point = Point { x: 3, y: 4 };
//! let mut writer = StreamWriter::new().with_type_serializer(&registry);
//! writer.write_object(&point).unwrap();
//! assert_eq!(writer.finish().unwrap(), r#"[4,3,1],["com.example.Point/1"],0,7]"#);
//! ```

use crate::writer::StreamWriter;
use crate::{Error, Result};
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;

/// The runtime type of an instance, as far as signatures are concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeType<'a> {
    /// An enum constant. `constant_type` names a per-constant subtype, if the
    /// constant has one; signatures always use the declaring type.
    Enum {
        declaring_type: &'a str,
        constant_type: Option<&'a str>,
    },
    /// Any other instance.
    Plain(&'a str),
}

impl<'a> RuntimeType<'a> {
    /// Name of the type whose signature describes the instance.
    #[must_use]
    pub fn signature_type(&self) -> &'a str {
        match *self {
            RuntimeType::Enum { declaring_type, .. } => declaring_type,
            RuntimeType::Plain(type_name) => type_name,
        }
    }
}

/// An instance that can be written with [`StreamWriter::write_object`].
///
/// Usually implemented with [`rpc_object!`](crate::rpc_object).
pub trait RpcObject: Any {
    fn runtime_type(&self) -> RuntimeType<'_>;

    fn as_any(&self) -> &dyn Any;
}

/// Resolves type signatures and writes the fields of instances.
pub trait TypeSerializer {
    /// Signature for the type named `type_name`.
    ///
    /// # Errors
    ///
    /// Fails if the type is unknown or not allowed on the wire.
    fn signature_for(&self, type_name: &str) -> Result<String>;

    /// Writes the fields of `instance` to `writer`.
    ///
    /// `instance` is borrowed for as long as the writer, so nested objects
    /// reached through it may be written with [`StreamWriter::write_object`].
    ///
    /// # Errors
    ///
    /// Fails if the instance cannot be written; the error is returned to the
    /// caller of the stream unchanged.
    fn serialize<'w>(
        &self,
        writer: &mut StreamWriter<'w>,
        instance: &'w dyn RpcObject,
        signature: &str,
    ) -> Result<()>;
}

type FieldWriter =
    Box<dyn for<'w> Fn(&mut StreamWriter<'w>, &'w dyn Any) -> Result<()> + Send + Sync>;

fn field_writer<F>(write_fields: F) -> FieldWriter
where
    F: for<'w> Fn(&mut StreamWriter<'w>, &'w dyn Any) -> Result<()> + Send + Sync + 'static,
{
    Box::new(write_fields)
}

struct Registration {
    signature: String,
    write_fields: FieldWriter,
}

/// Registry of serializable types.
///
/// Registration order is kept, which keeps [`TypeRegistry::type_names`]
/// deterministic.
#[derive(Default)]
pub struct TypeRegistry {
    types: IndexMap<String, Registration>,
    denied: Vec<String>,
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .field("denied", &self.denied)
            .finish()
    }
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under `type_name` with its wire `signature`.
    ///
    /// `write_fields` is called with the writer and the instance each time an
    /// instance of `T` is written. Registering a name again replaces it.
    pub fn register<T, F>(&mut self, type_name: &str, signature: &str, write_fields: F) -> &mut Self
    where
        T: 'static,
        F: for<'w> Fn(&mut StreamWriter<'w>, &'w T) -> Result<()> + Send + Sync + 'static,
    {
        let name = type_name.to_string();
        let write_fields = field_writer(move |writer, instance| {
            let instance = instance
                .downcast_ref::<T>()
                .ok_or_else(|| Error::type_mismatch(&name))?;
            write_fields(writer, instance)
        });
        self.types.insert(
            type_name.to_string(),
            Registration {
                signature: signature.to_string(),
                write_fields,
            },
        );
        self
    }

    /// Keeps matching types off the wire. A pattern ending in `*` matches by
    /// prefix; anything else must match the type name exactly.
    pub fn deny(&mut self, pattern: &str) -> &mut Self {
        self.denied.push(pattern.to_string());
        self
    }

    #[must_use]
    pub fn is_denied(&self, type_name: &str) -> bool {
        self.denied.iter().any(|pattern| match pattern.strip_suffix('*') {
            Some(prefix) => type_name.starts_with(prefix),
            None => type_name == pattern,
        })
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Registered type names in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    fn registration(&self, type_name: &str) -> Result<&Registration> {
        if self.is_denied(type_name) {
            return Err(Error::disallowed_type(type_name));
        }
        self.types
            .get(type_name)
            .ok_or_else(|| Error::unknown_type(type_name))
    }
}

impl TypeSerializer for TypeRegistry {
    fn signature_for(&self, type_name: &str) -> Result<String> {
        self.registration(type_name)
            .map(|registration| registration.signature.clone())
    }

    fn serialize<'w>(
        &self,
        writer: &mut StreamWriter<'w>,
        instance: &'w dyn RpcObject,
        signature: &str,
    ) -> Result<()> {
        let type_name = instance.runtime_type().signature_type();
        let registration = self.registration(type_name)?;
        if registration.signature != signature {
            return Err(Error::custom(format!(
                "signature {signature} does not belong to {type_name}"
            )));
        }
        (registration.write_fields)(writer, instance.as_any())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc_object;

    struct Point {
        x: i32,
        y: i32,
    }

    struct Secret;

    rpc_object!(Point => "test.Point");
    rpc_object!(Secret => "test.internal.Secret");

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry
            .register("test.Point", "test.Point/42", |w, p: &Point| {
                w.write_int(p.x);
                w.write_int(p.y);
                Ok(())
            })
            .register("test.internal.Secret", "test.internal.Secret/7", |_, _: &Secret| Ok(()))
            .deny("test.internal.*");
        registry
    }

    #[test]
    fn test_signature_lookup() {
        let registry = registry();
        assert_eq!(registry.signature_for("test.Point").unwrap(), "test.Point/42");
        assert!(matches!(
            registry.signature_for("test.Missing"),
            Err(Error::UnknownType(_))
        ));
    }

    #[test]
    fn test_denied_types() {
        let registry = registry();
        assert!(registry.contains("test.internal.Secret"));
        assert!(registry.is_denied("test.internal.Secret"));
        assert!(!registry.is_denied("test.Point"));
        assert!(matches!(
            registry.signature_for("test.internal.Secret"),
            Err(Error::DisallowedType(_))
        ));
    }

    #[test]
    fn test_serialize_checks_signature() {
        let registry = registry();
        let point = Point { x: 1, y: 2 };
        let mut writer = StreamWriter::new();
        assert!(registry.serialize(&mut writer, &point, "test.Point/1").is_err());
        registry.serialize(&mut writer, &point, "test.Point/42").unwrap();
        assert_eq!(writer.token_count(), 2);
    }

    #[test]
    fn test_type_names_in_order() {
        let registry = registry();
        assert_eq!(
            registry.type_names().collect::<Vec<_>>(),
            vec!["test.Point", "test.internal.Secret"]
        );
    }

    #[test]
    fn test_enum_signature_type() {
        let runtime = RuntimeType::Enum {
            declaring_type: "test.Suit",
            constant_type: Some("test.Suit$1"),
        };
        assert_eq!(runtime.signature_type(), "test.Suit");
    }
}
