use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ParseBoardError, SplitError};

/// An axis-aligned rectangle of sheet material.
///
/// Boards are immutable values: stacking, splitting and rotation all return
/// new boards.
///
/// # Example
///
/// ```
/// use guillotine_engine::Board;
///
/// let left = Board::new(200, 100);
/// let right = Board::new(150, 80);
/// assert_eq!(left.hstack(right), Board::new(350, 100));
/// assert_eq!(left.vstack(right), Board::new(200, 180));
/// assert_eq!(right.rotated(), Board::new(80, 150));
/// ```
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("{width}x{height}")]
pub struct Board {
    pub width: u32,
    pub height: u32,
}

impl Board {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    #[must_use]
    pub const fn rotated(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Places `right` next to `self` and returns the bounding board.
    ///
    /// The summed widths must fit in a `u32`, which holds for any stacking of
    /// the boards of one [`CutSpec`](crate::CutSpec).
    #[must_use]
    pub fn hstack(self, right: Self) -> Self {
        Self {
            width: self.width + right.width,
            height: u32::max(self.height, right.height),
        }
    }

    /// Places `bottom` below `self` and returns the bounding board.
    ///
    /// The summed heights must fit in a `u32`.
    #[must_use]
    pub fn vstack(self, bottom: Self) -> Self {
        Self {
            width: u32::max(self.width, bottom.width),
            height: self.height + bottom.height,
        }
    }

    /// Cuts the board horizontally at `y`, returning the top and bottom parts.
    pub fn hsplit(self, y: u32) -> Result<(Self, Self), SplitError> {
        if y > self.height {
            return Err(SplitError {
                position: y,
                extent: self.height,
            });
        }
        Ok((
            Self::new(self.width, y),
            Self::new(self.width, self.height - y),
        ))
    }

    /// Cuts the board vertically at `x`, returning the left and right parts.
    pub fn vsplit(self, x: u32) -> Result<(Self, Self), SplitError> {
        if x > self.width {
            return Err(SplitError {
                position: x,
                extent: self.width,
            });
        }
        Ok((
            Self::new(x, self.height),
            Self::new(self.width - x, self.height),
        ))
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseBoardError {
            input: s.to_owned(),
        };
        let (width, height) = s.split_once(['x', 'X']).ok_or_else(err)?;
        let width = width.trim().parse().map_err(|_| err())?;
        let height = height.trim().parse().map_err(|_| err())?;
        Ok(Self::new(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_and_rotation() {
        let board = Board::new(200, 100);
        assert_eq!(board.area(), 20_000);
        assert_eq!(board.rotated(), Board::new(100, 200));
        assert_eq!(board.rotated().area(), board.area());
        assert_eq!(board.rotated().rotated(), board);
    }

    #[test]
    fn test_area_does_not_overflow() {
        let board = Board::new(u32::MAX, 2);
        assert_eq!(board.area(), u64::from(u32::MAX) * 2);
    }

    #[test]
    fn test_hstack_area_lower_bound() {
        let cases = [
            (Board::new(10, 5), Board::new(3, 5)),
            (Board::new(10, 5), Board::new(3, 7)),
            (Board::new(1, 9), Board::new(8, 2)),
            (Board::new(0, 4), Board::new(6, 4)),
        ];
        for (a, b) in cases {
            let stacked = a.hstack(b);
            assert!(stacked.area() >= a.area() + b.area());
            assert_eq!(
                stacked.area() == a.area() + b.area(),
                a.height == b.height,
                "hstack({a}, {b}) = {stacked}",
            );
        }
    }

    #[test]
    fn test_vstack_area_lower_bound() {
        let cases = [
            (Board::new(5, 10), Board::new(5, 3)),
            (Board::new(5, 10), Board::new(7, 3)),
            (Board::new(9, 1), Board::new(2, 8)),
        ];
        for (a, b) in cases {
            let stacked = a.vstack(b);
            assert!(stacked.area() >= a.area() + b.area());
            assert_eq!(
                stacked.area() == a.area() + b.area(),
                a.width == b.width,
                "vstack({a}, {b}) = {stacked}",
            );
        }
    }

    #[test]
    fn test_stacking_shape_depends_on_axis_only() {
        let a = Board::new(10, 5);
        let b = Board::new(3, 7);
        assert_eq!(a.hstack(b), b.hstack(a));
        assert_eq!(a.vstack(b), b.vstack(a));
        assert_ne!(a.hstack(b), a.vstack(b));
    }

    #[test]
    fn test_hsplit() {
        let board = Board::new(100, 80);
        assert_eq!(
            board.hsplit(30),
            Ok((Board::new(100, 30), Board::new(100, 50)))
        );
        assert_eq!(
            board.hsplit(80),
            Ok((Board::new(100, 80), Board::new(100, 0)))
        );
        assert_eq!(
            board.hsplit(90),
            Err(SplitError {
                position: 90,
                extent: 80
            })
        );
    }

    #[test]
    fn test_vsplit() {
        let board = Board::new(100, 80);
        assert_eq!(
            board.vsplit(40),
            Ok((Board::new(40, 80), Board::new(60, 80)))
        );
        assert!(board.vsplit(101).is_err());
    }

    #[test]
    fn test_split_inverts_stack() {
        let top = Board::new(100, 30);
        let bottom = Board::new(100, 50);
        let (t, b) = top.vstack(bottom).hsplit(top.height).unwrap();
        assert_eq!((t, b), (top, bottom));

        let left = Board::new(40, 80);
        let right = Board::new(60, 80);
        let (l, r) = left.hstack(right).vsplit(left.width).unwrap();
        assert_eq!((l, r), (left, right));
    }

    #[test]
    fn test_parse_board() {
        assert_eq!("200x100".parse(), Ok(Board::new(200, 100)));
        assert_eq!(" 50 X 70 ".trim().parse(), Ok(Board::new(50, 70)));
        assert!("200".parse::<Board>().is_err());
        assert!("ax10".parse::<Board>().is_err());
        assert!("-1x10".parse::<Board>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let board = Board::new(123, 231);
        assert_eq!(board.to_string(), "123x231");
        assert_eq!(board.to_string().parse(), Ok(board));
    }
}
