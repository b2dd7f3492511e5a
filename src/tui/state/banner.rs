//! Timed status banners.
//!
//! Banners carry transient feedback: decision confirmations, scan results,
//! failures, and the unfollow guidance note. Each banner is stamped with a
//! generation counter; the dismissal timer carries the same stamp so a
//! stale timer cannot dismiss a newer banner.

use std::time::Duration;

/// How long ordinary status banners stay on screen.
pub const STATUS_BANNER_TTL: Duration = Duration::from_secs(5);

/// How long the unfollow guidance banner stays on screen.
pub const GUIDANCE_BANNER_TTL: Duration = Duration::from_secs(30);

/// Visual category of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    /// Routine feedback, dismissed after [`STATUS_BANNER_TTL`].
    Status,
    /// A failure the user should read, dismissed after [`STATUS_BANNER_TTL`].
    Error,
    /// The manual-unfollow reminder, dismissed after [`GUIDANCE_BANNER_TTL`].
    Guidance,
}

impl BannerKind {
    /// Returns how long banners of this kind stay on screen.
    #[must_use]
    pub const fn ttl(self) -> Duration {
        match self {
            Self::Status | Self::Error => STATUS_BANNER_TTL,
            Self::Guidance => GUIDANCE_BANNER_TTL,
        }
    }
}

/// A banner currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    /// Text shown in the status area.
    pub text: String,
    /// Visual category, which also decides the display time.
    pub kind: BannerKind,
    /// Generation stamp used to match dismissal timers.
    pub generation: u64,
}

impl Banner {
    /// Creates a banner with the given generation stamp.
    #[must_use]
    pub const fn new(text: String, kind: BannerKind, generation: u64) -> Self {
        Self {
            text,
            kind,
            generation,
        }
    }

    /// Returns true when a dismissal timer with this stamp applies.
    #[must_use]
    pub const fn matches_generation(&self, generation: u64) -> bool {
        self.generation == generation
    }
}
