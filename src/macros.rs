/// Implements [`RpcObject`](crate::RpcObject) for a type under a wire type name.
///
/// ```rust
/// use serde_rpcjson::{rpc_object, RpcObject, RuntimeType};
///
/// struct Point { x: i32, y: i32 }
/// enum Suit { Hearts, Spades }
///
/// rpc_object!(Point => "com.example.Point");
/// rpc_object!(enum Suit => "com.example.Suit");
///
/// assert_eq!(Point { x: 1, y: 2 }.runtime_type().signature_type(), "com.example.Point");
/// assert!(matches!(Suit::Spades.runtime_type(), RuntimeType::Enum { .. }));
/// ```
#[macro_export]
macro_rules! rpc_object {
    // Enum constants resolve to their declaring type
    (enum $ty:ty => $name:expr) => {
        impl $crate::RpcObject for $ty {
            fn runtime_type(&self) -> $crate::RuntimeType<'_> {
                $crate::RuntimeType::Enum {
                    declaring_type: $name,
                    constant_type: None,
                }
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };

    ($ty:ty => $name:expr) => {
        impl $crate::RpcObject for $ty {
            fn runtime_type(&self) -> $crate::RuntimeType<'_> {
                $crate::RuntimeType::Plain($name)
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{RpcObject, RuntimeType};

    struct Plain;
    enum Choice {
        Left,
    }

    rpc_object!(Plain => "test.Plain");
    rpc_object!(enum Choice => "test.Choice");

    #[test]
    fn test_rpc_object_plain() {
        assert_eq!(Plain.runtime_type(), RuntimeType::Plain("test.Plain"));
        assert!(Plain.as_any().is::<Plain>());
    }

    #[test]
    fn test_rpc_object_enum() {
        assert_eq!(
            Choice::Left.runtime_type(),
            RuntimeType::Enum {
                declaring_type: "test.Choice",
                constant_type: None,
            }
        );
        assert_eq!(Choice::Left.runtime_type().signature_type(), "test.Choice");
    }
}
