//! Custom text decoding for composite types.
//!
//! A type that owns its own wire format (say `"1=127.0.0.1:8080"`) implements
//! [`DecodeEnv`] and opts its binding through it with
//! [`impl_bind_via_decoder!`]. The binder then resolves the raw string for
//! the node and hands it over whole; no structural recursion happens, and any
//! internal delimiters are invisible to the engine. As a collection element
//! the type receives one piece of the collection literal per instance.

use crate::error::BoxError;

/// Decode a value in place from resolved environment text.
pub trait DecodeEnv {
    /// Decode from `text`, fully owning its interpretation.
    fn decode_env(&mut self, text: &str) -> Result<(), BoxError>;
}

/// Generate a [`Bind`](crate::Bind) impl that routes binding through the
/// type's [`DecodeEnv`] impl.
///
/// Requires `Default + PartialEq` for the zero-value check that gates the
/// tag-default fallback.
///
/// ```
/// use envbind::{BoxError, DecodeEnv};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Endpoint {
///     host: String,
///     port: u16,
/// }
///
/// impl DecodeEnv for Endpoint {
///     fn decode_env(&mut self, text: &str) -> Result<(), BoxError> {
///         let (host, port) = text.split_once(':').ok_or("missing ':' in endpoint")?;
///         self.host = host.to_string();
///         self.port = port.parse()?;
///         Ok(())
///     }
/// }
///
/// envbind::impl_bind_via_decoder!(Endpoint);
/// ```
#[macro_export]
macro_rules! impl_bind_via_decoder {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::Bind for $ty {
            fn bind(&mut self, cx: &$crate::Context<'_>) -> ::std::result::Result<(), $crate::BindError> {
                let raw = cx.resolve($crate::Bind::is_unset(self));
                $crate::DecodeEnv::decode_env(self, &raw)
                    .map_err(|source| $crate::BindError::decode(cx.key(), source))
            }

            fn is_unset(&self) -> bool {
                *self == <$ty as ::std::default::Default>::default()
            }
        }
    )+};
}
