/// Render bands of a unified bucket.
///
/// One chunk key can be drawn up to five times per frame: once per band.
/// Blend windows contribute two bands each (one per side of the
/// cross-fade).

use bitflags::bitflags;

/// One of the five per-bucket render bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LeafBand {
    /// Full detail, opaque
    NearSolid,
    /// Full detail side of the near↔far window, fading out
    NearFarNear,
    /// Simplified side of the near↔far window, fading in
    NearFarFar,
    /// Simplified, opaque
    FarSolid,
    /// Simplified side of the far↔billboard window, fading out
    FarBillboard,
}

impl LeafBand {
    /// All bands in registry order
    pub const ALL: [LeafBand; 5] = [
        LeafBand::NearSolid,
        LeafBand::NearFarNear,
        LeafBand::NearFarFar,
        LeafBand::FarSolid,
        LeafBand::FarBillboard,
    ];

    /// Position in `ALL`
    pub fn index(self) -> usize {
        match self {
            LeafBand::NearSolid => 0,
            LeafBand::NearFarNear => 1,
            LeafBand::NearFarFar => 2,
            LeafBand::FarSolid => 3,
            LeafBand::FarBillboard => 4,
        }
    }

    /// Short name used in logs
    pub fn name(self) -> &'static str {
        match self {
            LeafBand::NearSolid => "near",
            LeafBand::NearFarNear => "nf-near",
            LeafBand::NearFarFar => "nf-far",
            LeafBand::FarSolid => "far",
            LeafBand::FarBillboard => "fb",
        }
    }

    /// Whether the band uses the thinned, enlarged leaf set.
    pub fn is_simplified(self) -> bool {
        matches!(self, LeafBand::NearFarFar | LeafBand::FarSolid | LeafBand::FarBillboard)
    }

    /// Whether elements of this band carry a cross-fade weight.
    pub fn is_blended(self) -> bool {
        matches!(self, LeafBand::NearFarNear | LeafBand::NearFarFar | LeafBand::FarBillboard)
    }

    /// Mask bit of this band
    pub fn mask(self) -> BandMask {
        match self {
            LeafBand::NearSolid => BandMask::NEAR_SOLID,
            LeafBand::NearFarNear => BandMask::NEAR_FAR_NEAR,
            LeafBand::NearFarFar => BandMask::NEAR_FAR_FAR,
            LeafBand::FarSolid => BandMask::FAR_SOLID,
            LeafBand::FarBillboard => BandMask::FAR_BILLBOARD,
        }
    }
}

bitflags! {
    /// Set of bands in which a bucket is populated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BandMask: u8 {
        const NEAR_SOLID = 1 << 0;
        const NEAR_FAR_NEAR = 1 << 1;
        const NEAR_FAR_FAR = 1 << 2;
        const FAR_SOLID = 1 << 3;
        const FAR_BILLBOARD = 1 << 4;
    }
}

impl BandMask {
    /// Bands contained in the mask, in registry order
    pub fn bands(self) -> impl Iterator<Item = LeafBand> {
        LeafBand::ALL.into_iter().filter(move |b| self.contains(b.mask()))
    }
}

#[cfg(test)]
#[path = "band_tests.rs"]
mod tests;
