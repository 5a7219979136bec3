//! Sentinel-based link keys.
//!
//! Node links are stored as a bare key with a reserved `NONE` value rather
//! than `Option<usize>`. Arena keys handed out by `slab::Slab` are `usize`, so
//! `usize::MAX` can never name a live node.

/// A copyable node key with a sentinel "no node" value.
///
/// # Example
///
/// ```
/// use nexus_structs::Key;
///
/// let key: usize = 3;
/// assert!(key.is_some());
/// assert!(usize::NONE.is_none());
/// assert_eq!(usize::NONE.into_option(), None);
/// ```
pub trait Key: Copy + Eq {
    /// Sentinel value representing "no node".
    const NONE: Self;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is not the sentinel value.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Converts the sentinel to `None` and any other key to `Some`.
    #[inline]
    fn into_option(self) -> Option<Self> {
        if self.is_none() { None } else { Some(self) }
    }

    /// Converts `None` to the sentinel.
    #[inline]
    fn from_option(key: Option<Self>) -> Self {
        key.unwrap_or(Self::NONE)
    }
}

impl Key for usize {
    const NONE: Self = usize::MAX;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_max() {
        assert!(usize::NONE.is_none());
        assert!(!usize::NONE.is_some());
        assert!(0usize.is_some());
        assert!((usize::MAX - 1).is_some());
    }

    #[test]
    fn option_conversions() {
        assert_eq!(7usize.into_option(), Some(7));
        assert_eq!(usize::NONE.into_option(), None);
        assert_eq!(usize::from_option(Some(7)), 7);
        assert_eq!(usize::from_option(None), usize::NONE);
    }
}
