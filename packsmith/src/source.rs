//! Byte payloads for binary resources.
//!
//! Large assets (textures, sounds) do not have to be loaded while a pack is
//! being assembled. A [`ByteSource`] is either a ready buffer or a deferred
//! producer that is invoked whenever the bytes are needed. A deferred
//! producer may run any number of times and must return identical bytes on
//! every call.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use bytes::Bytes;

type Producer = dyn Fn() -> Bytes + Send + Sync;

/// Re-invocable source of bytes.
///
/// Cloning is cheap: ready buffers are reference counted and deferred
/// producers are shared.
///
/// # Example
///
/// ```
/// use packsmith::ByteSource;
///
/// let ready = ByteSource::from(b"PNG".to_vec());
/// let deferred = ByteSource::deferred(|| b"PNG".to_vec().into());
///
/// assert!(deferred.is_deferred());
/// assert_eq!(ready, deferred);
/// ```
#[derive(Clone)]
pub struct ByteSource {
    inner: Inner,
}

#[derive(Clone)]
enum Inner {
    Ready(Bytes),
    Deferred(Arc<Producer>),
}

impl ByteSource {
    /// Wrap an in-memory buffer.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            inner: Inner::Ready(bytes.into()),
        }
    }

    /// Wrap a producer invoked each time the bytes are requested.
    pub fn deferred<F>(producer: F) -> Self
    where
        F: Fn() -> Bytes + Send + Sync + 'static,
    {
        Self {
            inner: Inner::Deferred(Arc::new(producer)),
        }
    }

    /// Produce the bytes.
    pub fn bytes(&self) -> Bytes {
        match &self.inner {
            Inner::Ready(bytes) => bytes.clone(),
            Inner::Deferred(producer) => producer(),
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self.inner, Inner::Deferred(_))
    }

    /// Stream the bytes into a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.bytes())
    }
}

impl PartialEq for ByteSource {
    fn eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (Inner::Deferred(a), Inner::Deferred(b)) if Arc::ptr_eq(a, b) => true,
            _ => self.bytes() == other.bytes(),
        }
    }
}

impl Eq for ByteSource {}

impl std::hash::Hash for ByteSource {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bytes().hash(state);
    }
}

impl fmt::Debug for ByteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Ready(bytes) => write!(f, "ByteSource({} bytes)", bytes.len()),
            Inner::Deferred(_) => f.write_str("ByteSource(deferred)"),
        }
    }
}

impl From<Bytes> for ByteSource {
    fn from(bytes: Bytes) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for ByteSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&'static [u8]> for ByteSource {
    fn from(bytes: &'static [u8]) -> Self {
        Self::from_bytes(Bytes::from_static(bytes))
    }
}

impl From<String> for ByteSource {
    fn from(text: String) -> Self {
        Self::from_bytes(text)
    }
}

impl From<&'static str> for ByteSource {
    fn from(text: &'static str) -> Self {
        Self::from_bytes(Bytes::from_static(text.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_deferred_runs_on_each_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = ByteSource::deferred(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Bytes::from_static(b"ogg")
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(source.bytes(), Bytes::from_static(b"ogg"));
        assert_eq!(source.bytes(), Bytes::from_static(b"ogg"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_equality_compares_content() {
        let a = ByteSource::from(vec![1, 2, 3]);
        let b = ByteSource::deferred(|| Bytes::from_static(&[1, 2, 3]));
        let c = ByteSource::from(vec![1, 2]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_write_to() {
        let source = ByteSource::from("hello");
        let mut sink = Vec::new();
        source.write_to(&mut sink).unwrap();
        assert_eq!(sink, b"hello");
    }

    #[test]
    fn test_debug_does_not_produce() {
        let source = ByteSource::deferred(|| panic!("must not be invoked"));
        assert_eq!(format!("{:?}", source), "ByteSource(deferred)");
        assert_eq!(format!("{:?}", ByteSource::from("abc")), "ByteSource(3 bytes)");
    }
}
