//! Viewport-dependent presentation decisions

use serde::Serialize;

use crate::config::SiteConfig;

/// Visibility of the back-to-top control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollVisibility {
    pub threshold_px: u32,
}

impl ScrollVisibility {
    #[must_use]
    pub fn new(threshold_px: u32) -> Self {
        Self { threshold_px }
    }

    #[must_use]
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.scroll_threshold_px())
    }

    /// Shown once the page is scrolled strictly past the threshold
    #[must_use]
    pub fn is_visible(self, scroll_offset_px: f64) -> bool {
        scroll_offset_px > f64::from(self.threshold_px)
    }
}

/// Which half of a hybrid table block is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HybridBlock {
    Cards,
    Table,
}

impl HybridBlock {
    /// Cards below the breakpoint, the original table at or above it
    #[must_use]
    pub fn for_viewport(width_px: u32, breakpoint_px: u32) -> Self {
        if width_px < breakpoint_px {
            Self::Cards
        } else {
            Self::Table
        }
    }

    #[must_use]
    pub fn for_config(width_px: u32, config: &SiteConfig) -> Self {
        Self::for_viewport(width_px, config.table_breakpoint_px())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_threshold_is_exclusive() {
        let visibility = ScrollVisibility::new(300);
        assert!(!visibility.is_visible(0.0));
        assert!(!visibility.is_visible(300.0));
        assert!(visibility.is_visible(300.5));
        assert!(visibility.is_visible(1200.0));
    }

    #[test]
    fn test_default_config_threshold() {
        let visibility = ScrollVisibility::from_config(&SiteConfig::default());
        assert_eq!(visibility.threshold_px, 300);
    }

    #[test]
    fn test_hybrid_block_breakpoint() {
        assert_eq!(HybridBlock::for_viewport(375, 768), HybridBlock::Cards);
        assert_eq!(HybridBlock::for_viewport(767, 768), HybridBlock::Cards);
        assert_eq!(HybridBlock::for_viewport(768, 768), HybridBlock::Table);
        assert_eq!(HybridBlock::for_viewport(1440, 768), HybridBlock::Table);
        assert_eq!(
            HybridBlock::for_config(800, &SiteConfig::default()),
            HybridBlock::Table
        );
    }
}
