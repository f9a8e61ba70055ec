use serde::{Deserialize, Serialize};

/// Hot/cold feedback band, derived purely from the guess's distance
/// to the target, except `Correct`, which only name equality reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProximityBand {
    Correct,
    VeryClose,
    Close,
    MediumFar,
    Far,
    VeryFar,
}

/// All bands in ascending upper-bound order. Classification scans this
/// list, so keep it sorted.
pub const BANDS: [ProximityBand; 6] = [
    ProximityBand::Correct,
    ProximityBand::VeryClose,
    ProximityBand::Close,
    ProximityBand::MediumFar,
    ProximityBand::Far,
    ProximityBand::VeryFar,
];

impl ProximityBand {
    /// Inclusive upper bound of the band in meters.
    pub fn upper_bound_meters(self) -> f64 {
        match self {
            Self::Correct => 0.0,
            Self::VeryClose => 25_000.0,
            Self::Close => 50_000.0,
            Self::MediumFar => 100_000.0,
            Self::Far => 200_000.0,
            Self::VeryFar => f64::INFINITY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Correct => "Correto!",
            Self::VeryClose => "Muito perto!",
            Self::Close => "Perto",
            Self::MediumFar => "Meio longe",
            Self::Far => "Longe",
            Self::VeryFar => "Muito longe!",
        }
    }

    pub fn color_hex(self) -> &'static str {
        match self {
            Self::Correct => "#00FF00",
            Self::VeryClose => "#FFFF00",
            Self::Close => "#FFBF00",
            Self::MediumFar => "#FF7F00",
            Self::Far => "#FF4000",
            Self::VeryFar => "#FF0000",
        }
    }

    /// Share-text glyph for this band's color.
    pub fn emoji(self) -> &'static str {
        crate::share::emoji_for_color(self.color_hex())
    }

    /// Classify a distance into the first band whose bound covers it.
    /// Two distinct centroids are never coincident, so a computed
    /// distance never lands in `Correct`; the evaluator forces that
    /// band on exact name match instead.
    pub fn classify(distance_meters: f64) -> Self {
        for band in BANDS {
            if distance_meters <= band.upper_bound_meters() {
                return band;
            }
        }
        Self::VeryFar
    }
}
