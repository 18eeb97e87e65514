use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PushbackError {
    #[error("unsuitable source: {0}")]
    UnsupportedSource(String),
    #[error("object is not iterable: {0}")]
    NotIterable(String),
    #[error("cannot seek while {pending} unit(s) of pushed-back data are pending; read them first")]
    SeekUnsupported { pending: usize },
    #[error("underlying source has no '{0}()' operation")]
    MissingCapability(&'static str),
    #[error("cannot push back {found} data into a {expected} stream")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PushbackError {
    /// Whether `e` was produced by seeking with pushed-back data pending.
    pub fn is_seek_unsupported(e: &io::Error) -> bool {
        matches!(
            e.get_ref().and_then(|inner| inner.downcast_ref::<PushbackError>()),
            Some(PushbackError::SeekUnsupported { .. })
        )
    }

    fn io_kind(&self) -> io::ErrorKind {
        match self {
            PushbackError::SeekUnsupported { .. } | PushbackError::MissingCapability(_) => {
                io::ErrorKind::Unsupported
            }
            PushbackError::UnsupportedSource(_)
            | PushbackError::NotIterable(_)
            | PushbackError::KindMismatch { .. } => io::ErrorKind::InvalidInput,
            PushbackError::Io(e) => e.kind(),
        }
    }
}

impl From<PushbackError> for io::Error {
    fn from(e: PushbackError) -> io::Error {
        match e {
            PushbackError::Io(e) => e,
            e => {
                let kind = e.io_kind();
                io::Error::new(kind, e)
            }
        }
    }
}
