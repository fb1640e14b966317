//! Pip counting on a half-tile crop.

use domibot_core::{find_external_contours, gaussian_blur, threshold_binary_inv, GrayImageView};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::params::PipScorerParams;

/// Highest pip count on a double-six set.
pub const MAX_PIPS: u8 = 6;

/// Pip count of one tile half.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipValue {
    Pips(u8),
    /// Count outside `0..=6`, or nothing to measure.
    Unknown,
}

impl PipValue {
    pub fn known(self) -> Option<u8> {
        match self {
            PipValue::Pips(n) => Some(n),
            PipValue::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        self.known().is_some()
    }
}

impl From<u8> for PipValue {
    fn from(n: u8) -> Self {
        if n <= MAX_PIPS {
            PipValue::Pips(n)
        } else {
            PipValue::Unknown
        }
    }
}

impl std::fmt::Display for PipValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipValue::Pips(n) => write!(f, "{n}"),
            PipValue::Unknown => f.write_str("?"),
        }
    }
}

/// Pip values read off one tile.
///
/// Board open ends carry the single value facing their open side; loose tiles
/// carry both halves, top/left first as photographed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipReading {
    Single(PipValue),
    Pair(PipValue, PipValue),
}

impl PipReading {
    /// Value presented to the line of play. For a pair this is the first half.
    pub fn facing(&self) -> PipValue {
        match *self {
            PipReading::Single(v) => v,
            PipReading::Pair(a, _) => a,
        }
    }

    /// Both halves known and equal.
    pub fn is_double(&self) -> bool {
        match *self {
            PipReading::Pair(a, b) => a.is_known() && a == b,
            PipReading::Single(_) => false,
        }
    }

    /// Any half unreadable.
    pub fn has_unknown(&self) -> bool {
        match *self {
            PipReading::Single(v) => !v.is_known(),
            PipReading::Pair(a, b) => !a.is_known() || !b.is_known(),
        }
    }

    /// Known values in reading order.
    pub fn values(&self) -> Vec<u8> {
        match *self {
            PipReading::Single(v) => v.known().into_iter().collect(),
            PipReading::Pair(a, b) => a.known().into_iter().chain(b.known()).collect(),
        }
    }
}

/// Counts round dark marks on a light tile face.
#[derive(Clone, Debug, Default)]
pub struct PipScorer {
    params: PipScorerParams,
}

impl PipScorer {
    pub fn new(params: PipScorerParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &PipScorerParams {
        &self.params
    }

    /// Count pips in a grayscale half-tile crop.
    ///
    /// Pure function of the pixels: the same region always scores the same.
    pub fn count_pips(&self, region: &GrayImageView<'_>) -> PipValue {
        if region.width == 0 || region.height == 0 {
            return PipValue::Unknown;
        }

        let smoothed;
        let src = if self.params.blur {
            smoothed = gaussian_blur(region, self.params.blur_sigma);
            smoothed.view()
        } else {
            *region
        };
        let ink = threshold_binary_inv(&src, self.params.threshold);

        let (min_area, max_area) = self.params.area_window;
        let mut count = 0usize;
        for contour in find_external_contours(&ink.view()) {
            let Some(circ) = contour.circularity() else {
                continue;
            };
            let area = contour.area();
            let round = circ > self.params.min_circularity && circ <= self.params.max_circularity;
            let sized = area > min_area && area < max_area;
            trace!("pip candidate area={area:.1} circularity={circ:.3} keep={}", round && sized);
            if round && sized {
                count += 1;
            }
        }

        let value = u8::try_from(count).map_or(PipValue::Unknown, PipValue::from);
        debug!("counted {count} pips -> {value}");
        value
    }
}
