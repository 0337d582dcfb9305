// Tracks the drawing surface size and which density tier it falls in.

use crate::config::FieldConfig;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DensityTier {
    Mobile,
    Desktop,
}

impl DensityTier {
    pub fn classify(viewport_width: u32, config: &FieldConfig) -> DensityTier {
        if viewport_width < config.mobile_breakpoint {
            DensityTier::Mobile
        } else {
            DensityTier::Desktop
        }
    }

    pub fn particle_count(self, config: &FieldConfig) -> usize {
        match self {
            DensityTier::Mobile => config.mobile_particles,
            DensityTier::Desktop => config.desktop_particles,
        }
    }
}

/// Result of a resize: the tier now in effect and whether it differs from the
/// tier before the resize.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resize {
    pub tier: DensityTier,
    pub tier_changed: bool,
}

#[derive(Debug)]
pub struct SurfaceManager {
    width: u32,
    height: u32,
    tier: DensityTier,
}

impl SurfaceManager {
    pub fn new() -> Self {
        SurfaceManager {
            width: 0,
            height: 0,
            tier: DensityTier::Desktop,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32, config: &FieldConfig) -> Resize {
        let tier = DensityTier::classify(width, config);
        let tier_changed = tier != self.tier;
        self.width = width;
        self.height = height;
        self.tier = tier;
        Resize { tier, tier_changed }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> [f64; 2] {
        [self.width as f64, self.height as f64]
    }

    pub fn tier(&self) -> DensityTier {
        self.tier
    }
}

impl Default for SurfaceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_exclusive() {
        let config = FieldConfig::default();
        assert_eq!(DensityTier::classify(767, &config), DensityTier::Mobile);
        assert_eq!(DensityTier::classify(768, &config), DensityTier::Desktop);
        assert_eq!(DensityTier::classify(0, &config), DensityTier::Mobile);
    }

    #[test]
    fn tier_counts() {
        let config = FieldConfig::default();
        assert_eq!(DensityTier::Mobile.particle_count(&config), 100);
        assert_eq!(DensityTier::Desktop.particle_count(&config), 200);
    }

    #[test]
    fn resize_reports_tier_changes_only() {
        let config = FieldConfig::default();
        let mut surface = SurfaceManager::new();

        let first = surface.resize(1024, 768, &config);
        assert_eq!(
            first,
            Resize {
                tier: DensityTier::Desktop,
                tier_changed: false
            }
        );
        assert_eq!(surface.bounds(), [1024.0, 768.0]);

        let same = surface.resize(1280, 720, &config);
        assert!(!same.tier_changed);

        let shrunk = surface.resize(390, 844, &config);
        assert_eq!(
            shrunk,
            Resize {
                tier: DensityTier::Mobile,
                tier_changed: true
            }
        );
        assert_eq!((surface.width(), surface.height()), (390, 844));
    }
}
