use serde::{Deserialize, Serialize};

use crate::ExtentOverflowError;

use super::board::Board;

/// The demand list of one cutting run.
///
/// A `CutSpec` is built once before the search starts and is read-only
/// afterwards. [`CutSpec::total_area`] always equals the summed area of the
/// demand boards, and the summed longer sides of the demand boards never
/// exceed `u32::MAX`, so any stacking of them fits in a [`Board`].
///
/// # Example
///
/// ```
/// use guillotine_engine::CutSpec;
///
/// let mut spec = CutSpec::new(500);
/// spec.add(200, 100).add(150, 100).add(50, 50);
/// assert_eq!(spec.len(), 3);
/// assert_eq!(spec.total_area(), 37_500);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CutSpecData", into = "CutSpecData")]
pub struct CutSpec {
    boards: Vec<Board>,
    max_width: u32,
    total_area: u64,
    total_extent: u64,
}

/// Serialized form of [`CutSpec`]; the total area is derived on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CutSpecData {
    #[serde(default)]
    max_width: u32,
    boards: Vec<Board>,
}

impl TryFrom<CutSpecData> for CutSpec {
    type Error = ExtentOverflowError;

    fn try_from(data: CutSpecData) -> Result<Self, Self::Error> {
        let mut spec = Self::with_capacity(data.boards.len(), data.max_width);
        for board in data.boards {
            spec.try_add(board.width, board.height)?;
        }
        Ok(spec)
    }
}

impl From<CutSpec> for CutSpecData {
    fn from(spec: CutSpec) -> Self {
        Self {
            max_width: spec.max_width,
            boards: spec.boards,
        }
    }
}

impl CutSpec {
    /// Creates an empty spec. A `max_width` of 0 means unconstrained.
    #[must_use]
    pub const fn new(max_width: u32) -> Self {
        Self {
            boards: Vec::new(),
            max_width,
            total_area: 0,
            total_extent: 0,
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize, max_width: u32) -> Self {
        Self {
            boards: Vec::with_capacity(capacity),
            max_width,
            total_area: 0,
            total_extent: 0,
        }
    }

    /// Replaces the stock width limit, keeping the demand list.
    #[must_use]
    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }

    /// Appends a demand board.
    ///
    /// # Panics
    ///
    /// Panics if the board would push the summed extent past `u32::MAX`; use
    /// [`CutSpec::try_add`] for boards from untrusted input.
    pub fn add(&mut self, width: u32, height: u32) -> &mut Self {
        self.try_add(width, height).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Appends a demand board unless its longer side would push the summed
    /// extent past `u32::MAX`.
    pub fn try_add(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<&mut Self, ExtentOverflowError> {
        let board = Board::new(width, height);
        let extent = self.total_extent + u64::from(width.max(height));
        if extent > u64::from(u32::MAX) {
            return Err(ExtentOverflowError { board, extent });
        }
        self.boards.push(board);
        self.total_area += board.area();
        self.total_extent = extent;
        Ok(self)
    }

    #[must_use]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    #[must_use]
    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    #[must_use]
    pub fn total_area(&self) -> u64 {
        self.total_area
    }

    /// Returns a spec holding only the first `count` demand boards.
    ///
    /// Returns `None` if the spec has fewer than `count` boards.
    #[must_use]
    pub fn truncated(&self, count: usize) -> Option<Self> {
        let boards = self.boards.get(..count)?;
        let mut spec = Self::with_capacity(count, self.max_width);
        for board in boards {
            spec.add(board.width, board.height);
        }
        Some(spec)
    }

    /// Whether a piece of this size can be cut from the stock.
    ///
    /// Both sides must be positive and at least one side must respect the
    /// width limit, since the piece can be turned to fit.
    #[must_use]
    pub fn fits(&self, width: u32, height: u32) -> bool {
        width > 0
            && height > 0
            && (self.max_width == 0 || width <= self.max_width || height <= self.max_width)
    }

    #[must_use]
    pub fn fits_board(&self, board: Board) -> bool {
        self.fits(board.width, board.height)
    }

    /// Percentage of `sheet` that is not covered by demand boards.
    ///
    /// Returns `None` for an empty spec.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn waste_percent(&self, sheet: Board) -> Option<f64> {
        if self.total_area == 0 {
            return None;
        }
        let sheet_area = sheet.area() as f64;
        let total_area = self.total_area as f64;
        Some(100.0 * (sheet_area - total_area) / total_area)
    }
}
