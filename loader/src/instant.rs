use std::{ops::Sub, time::Duration};

/// Wall-clock timestamp that works in both wasm and native builds.
/// Holds the duration since the Unix Epoch.
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Instant(pub Duration);

impl Instant {
    /// The current time as a Unix Timestamp.
    pub fn now() -> Self {
        cfg_if::cfg_if! {
            if #[cfg(any(feature = "hydrate", feature = "csr"))] {
                let millis = js_sys::Date::now();
                Instant(Duration::from_millis(millis as u64))
            } else {
                // A clock set before 1970 reads as the epoch itself.
                let since_epoch = std::time::SystemTime::now()
                    .duration_since(std::time::SystemTime::UNIX_EPOCH)
                    .unwrap_or_default();
                Instant(since_epoch)
            }
        }
    }
}

impl Sub<Instant> for Instant {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Instant) -> Self::Output {
        self.0.saturating_sub(rhs.0)
    }
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_millis())
    }
}

impl std::fmt::Debug for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Instant").field(&self.0.as_millis()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtraction_saturates() {
        let earlier = Instant(Duration::from_millis(100));
        let later = Instant(Duration::from_millis(250));

        assert_eq!(later - earlier, Duration::from_millis(150));
        assert_eq!(earlier - later, Duration::ZERO);
    }

    #[test]
    fn now_is_after_epoch() {
        assert!(Instant::now().0 > Duration::ZERO);
    }
}
