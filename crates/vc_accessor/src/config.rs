//! Settings shared by every descriptor a cache builds.

use crate::member::Visibility;

// -----------------------------------------------------------------------------
// GrowthPolicy

/// Bounds how far an indexed write may grow a container.
///
/// Writing at `index` into a container of length `len` is allowed while
/// `index < max(len * max_growth_factor, len + min_headroom)`.
///
/// # Examples
///
/// ```
/// use vc_accessor::config::GrowthPolicy;
///
/// let policy = GrowthPolicy::DEFAULT;
/// assert_eq!(policy.limit(0), 8);
/// assert_eq!(policy.limit(100), 200);
/// assert!(policy.allows(3, 10));
/// assert!(!policy.allows(3, 11));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrowthPolicy {
    pub max_growth_factor: usize,
    pub min_headroom: usize,
}

impl GrowthPolicy {
    pub const DEFAULT: Self = Self::new(2, 8);

    #[inline]
    pub const fn new(max_growth_factor: usize, min_headroom: usize) -> Self {
        Self {
            max_growth_factor,
            min_headroom,
        }
    }

    /// First index that is rejected for a container of length `len`.
    pub const fn limit(&self, len: usize) -> usize {
        let scaled = len.saturating_mul(self.max_growth_factor);
        let padded = len.saturating_add(self.min_headroom);
        if scaled > padded { scaled } else { padded }
    }

    #[inline]
    pub const fn allows(&self, len: usize, index: usize) -> bool {
        index < self.limit(len)
    }
}

impl Default for GrowthPolicy {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

// -----------------------------------------------------------------------------
// NamingConvention

/// Controls which method names are recognised as accessors.
///
/// `get`/`set`/`is`/`add`/`remove`/`put` prefixes and the
/// `Size`/`Count`/`Length`/`Len` suffixes are always recognised, in both
/// `camelCase` and `snake_case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamingConvention {
    /// Treat a zero-argument method without a verb prefix (`fn tags(&self)`)
    /// as the getter of the property with the method's name.
    pub bare_getters: bool,
}

impl NamingConvention {
    pub const DEFAULT: Self = Self { bare_getters: true };
}

impl Default for NamingConvention {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

// -----------------------------------------------------------------------------
// AccessorConfig

/// Configuration of a [`DescriptorCache`](crate::descriptor::DescriptorCache).
///
/// # Examples
///
/// ```
/// use vc_accessor::config::{AccessorConfig, GrowthPolicy};
/// use vc_accessor::member::Visibility;
///
/// let config = AccessorConfig::DEFAULT
///     .with_growth(GrowthPolicy::new(4, 16))
///     .with_min_visibility(Visibility::Crate);
///
/// assert_eq!(config.growth.limit(10), 40);
/// assert!(config.naming.bare_getters);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessorConfig {
    pub growth: GrowthPolicy,
    pub naming: NamingConvention,
    /// Members less visible than this are ignored.
    pub min_visibility: Visibility,
}

impl AccessorConfig {
    pub const DEFAULT: Self = Self {
        growth: GrowthPolicy::DEFAULT,
        naming: NamingConvention::DEFAULT,
        min_visibility: Visibility::Public,
    };

    #[inline]
    pub const fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    #[inline]
    pub const fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    #[inline]
    pub const fn with_min_visibility(mut self, min_visibility: Visibility) -> Self {
        self.min_visibility = min_visibility;
        self
    }
}

impl Default for AccessorConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
