//! # IDs
//! Every animation object is referred to by an [`AnimObjId`], which is unique within this execution of the program.
//! Commands hold on to these rather than to the objects themselves, so an ID may outlive the object it names.
//!
//! To get a fresh ID, use `AnimObjId`'s `Default` impl. To eagerly acquire many ids, use `AnimObjId::many`.

use std::sync::atomic::{AtomicU64, Ordering};

// Next available ID. Zero is never handed out.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// ID of an animation object, guaranteed unique within this execution of the program.
///
/// Order of IDs is not guaranteed to match order of creation across threads.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimObjId(std::num::NonZeroU64);

impl AnimObjId {
    /// Get the raw numeric value of this ID.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.0.get()
    }
    /// Allocate many IDs at once, with a single atomic operation.
    ///
    /// It is on the caller to limit count to a reasonable amount. Exhausting all `u64::MAX - 1` IDs leads to
    /// unclean program termination. IDs are assigned eagerly - dropping the returned iterator early does *not*
    /// recycle the unused IDs.
    pub fn many(count: usize) -> impl ExactSizeIterator<Item = Self> {
        // Usize is always <= 64bits
        let count_u64 = count as u64;
        let start_id = NEXT_ID.fetch_add(count_u64, Ordering::Relaxed);

        // Wrapped around into zero or past it. The counter is now useless for everyone.
        #[allow(clippy::manual_assert)]
        if start_id == 0 || start_id.checked_add(count_u64).is_none() {
            #[cfg(not(test))]
            {
                log::error!("AnimObjId overflow! Aborting!");
                log::logger().flush();
                std::process::abort();
            }
            #[cfg(test)]
            {
                panic!("AnimObjId overflow! Aborting!")
            }
        }

        (0..count).map(move |idx| {
            // Non-zero-ness checked above.
            Self(std::num::NonZeroU64::new(start_id + idx as u64).unwrap())
        })
    }
}
impl Default for AnimObjId {
    fn default() -> Self {
        Self::many(1).next().unwrap()
    }
}
impl std::fmt::Display for AnimObjId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AnimObj#{}", self.0)
    }
}
impl std::fmt::Debug for AnimObjId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}
impl std::str::FromStr for AnimObjId {
    type Err = std::num::ParseIntError;
    /// Parses either the bare number or the `AnimObj#<n>` display form.
    ///
    /// This does *not* check that the ID was ever allocated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("AnimObj#").unwrap_or(s);
        digits.parse::<std::num::NonZeroU64>().map(Self)
    }
}

#[cfg(test)]
mod test {
    use super::AnimObjId;

    #[test]
    fn none_ids() {
        // Allocating none should be valid, and not consume anything.
        let empty = AnimObjId::many(0);
        assert_eq!(empty.len(), 0);
    }
    #[test]
    fn many_ids_unique() {
        let count = 1024;
        let mut v: Vec<_> = AnimObjId::many(count).collect();
        v.extend(AnimObjId::many(count));
        // Interleave a few singles, too.
        v.push(AnimObjId::default());
        v.push(AnimObjId::default());

        v.sort_unstable();
        let length_before = v.len();
        v.dedup();
        assert_eq!(length_before, v.len(), "had duplicate ids");
    }
    #[test]
    fn display_parses_back() {
        let id = AnimObjId::default();
        assert_eq!(id.to_string().parse::<AnimObjId>(), Ok(id));
        assert_eq!(id.id().to_string().parse::<AnimObjId>(), Ok(id));
        assert!("AnimObj#0".parse::<AnimObjId>().is_err());
        assert!("soup".parse::<AnimObjId>().is_err());
    }
}
