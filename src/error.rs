use core::fmt;

/// Error surface for the KEM core.
///
/// `AuthFailure` from spec §7 is deliberately absent here: a decapsulation
/// re-encryption mismatch is carried through the `bool` returned by
/// [`crate::KemKyber::decapsulate`], never raised as an `Err`, so that a
/// failed decapsulation still produces a (useless, `z`-derived) shared
/// secret in constant time rather than short-circuiting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Unknown parameter enum, or a parameter id on a supplied key that
    /// does not match any known `KyberParameter`.
    InvalidParameter,
    /// Wrong primitive, class, or parameter on a key passed to `initialize`,
    /// or a key/ciphertext byte slice of the wrong length.
    InvalidKey,
    /// `encapsulate`/`decapsulate` called before `initialize`.
    NotInitialized,
    /// The underlying random number generator failed to produce bytes.
    AllocFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidParameter => "invalid or unsupported Kyber parameter set",
            Error::InvalidKey => "key wrong primitive, class, parameter, or length",
            Error::NotInitialized => "KEM instance used before initialize()",
            Error::AllocFailure => "random number generator failed",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for Error {}
