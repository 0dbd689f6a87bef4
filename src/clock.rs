use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Source of creation timestamps. Handlers stamp rows with it so repository
/// code never reads the wall clock itself.
pub trait Clock: Send + Sync {
    fn now(&self) -> String;
}

#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[derive(Clone)]
pub struct FixedClock(pub String);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_emits_rfc3339() {
        let stamp = SystemClock.now();
        assert!(OffsetDateTime::parse(&stamp, &Rfc3339).is_ok(), "{stamp}");
    }

    #[test]
    fn fixed_clock_is_stable() {
        let clock = FixedClock("2025-01-01T00:00:00Z".into());
        assert_eq!(clock.now(), clock.now());
    }
}
