// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Index, Mul, Sub};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PathError {
    #[error("positions have different dimensions ({0} vs {1})")]
    DimensionMismatch(usize, usize),
    #[error("no straight path from {0} to {1}")]
    NotCollinear(Position, Position),
}

/// A square on a board of any size and dimension count.
///
/// Coordinates are signed so that differences between positions are
/// positions themselves, which keeps direction vectors and offsets in
/// the same algebra. Axis 0 is the rank axis in two dimensions, so
/// `"e4"` parses to `[3, 4]`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Position(Vec<i64>);

impl Position {
    pub fn new<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self(coords.into_iter().collect())
    }

    pub fn zero(dims: usize) -> Self {
        Self(vec![0; dims])
    }

    /// Two-dimensional position from algebraic notation (`"a1"` .. ).
    pub fn try_from_str(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if !file.is_ascii_lowercase() || !rank.is_ascii_digit() || chars.next().is_some() {
            return None;
        }
        let file = file as i64 - 'a' as i64;
        let rank = rank as i64 - '1' as i64;
        if rank < 0 {
            return None;
        }
        Some(Self(vec![rank, file]))
    }

    #[inline]
    pub fn dims(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn coords(&self) -> &[i64] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Copy with a single coordinate replaced.
    pub fn replace(&self, axis: usize, value: i64) -> Self {
        let mut coords = self.0.clone();
        coords[axis] = value;
        Self(coords)
    }

    /// Per-axis signum, the unit step of a straight line.
    pub fn signum(&self) -> Self {
        Self(self.0.iter().map(|c| c.signum()).collect())
    }

    /// The straight-line path `(self, dest]`, stepping by the per-axis
    /// signum of the difference.
    ///
    /// A path is straight when every non-zero component of the
    /// difference has the same magnitude: exactly one non-zero axis is
    /// a rook line, several equal-magnitude axes form a diagonal.
    /// Anything else is a caller error, not a runtime condition.
    pub fn path_to(&self, dest: &Position) -> Result<Vec<Position>, PathError> {
        if self.dims() != dest.dims() {
            return Err(PathError::DimensionMismatch(self.dims(), dest.dims()));
        }
        let diff = dest - self;
        let magnitude = diff.0.iter().map(|c| c.abs()).max().unwrap_or(0);
        if diff.0.iter().any(|&c| c != 0 && c.abs() != magnitude) {
            return Err(PathError::NotCollinear(self.clone(), dest.clone()));
        }
        let step = diff.signum();
        let mut path = Vec::with_capacity(magnitude as usize);
        let mut current = self.clone();
        while &current != dest {
            current = &current + &step;
            path.push(current.clone());
        }
        Ok(path)
    }
}

impl Index<usize> for Position {
    type Output = i64;

    #[inline]
    fn index(&self, axis: usize) -> &Self::Output {
        &self.0[axis]
    }
}

impl Add<&Position> for &Position {
    type Output = Position;

    fn add(self, rhs: &Position) -> Position {
        debug_assert_eq!(self.dims(), rhs.dims());
        Position(self.0.iter().zip(&rhs.0).map(|(a, b)| a + b).collect())
    }
}

impl Sub<&Position> for &Position {
    type Output = Position;

    fn sub(self, rhs: &Position) -> Position {
        debug_assert_eq!(self.dims(), rhs.dims());
        Position(self.0.iter().zip(&rhs.0).map(|(a, b)| a - b).collect())
    }
}

impl Mul<i64> for &Position {
    type Output = Position;

    fn mul(self, rhs: i64) -> Position {
        Position(self.0.iter().map(|c| c * rhs).collect())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dims() == 2 && self.0.iter().all(|&c| c >= 0) && self[1] < 26 {
            let file = (b'a' + self[1] as u8) as char;
            return write!(f, "{}{}", file, self[0] + 1);
        }
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebraic_round_trip() {
        for (name, coords) in [("a1", vec![0, 0]), ("f3", vec![2, 5]), ("h8", vec![7, 7])] {
            let pos = Position::try_from_str(name).unwrap();
            assert_eq!(pos, Position::new(coords));
            assert_eq!(pos.to_string(), name);
        }
        assert!(Position::try_from_str("i").is_none());
        assert!(Position::try_from_str("a1x").is_none());
    }

    #[test]
    fn test_display_higher_dimensions() {
        assert_eq!(Position::new([1, 2, 3]).to_string(), "(1, 2, 3)");
        assert_eq!(Position::new([-1, 0]).to_string(), "(-1, 0)");
    }

    #[test]
    fn test_path_dimension_mismatch() {
        let from = Position::new([1, 2, 3]);
        let to = Position::new([0, 0]);
        assert_eq!(from.path_to(&to), Err(PathError::DimensionMismatch(3, 2)));
    }

    #[test]
    fn test_path_not_collinear() {
        let from = Position::new([1, 2, 3]);
        let to = Position::new([0, 0, 0]);
        assert!(matches!(from.path_to(&to), Err(PathError::NotCollinear(..))));
    }

    #[test]
    fn test_path_single_axis() {
        let from = Position::new([1, 2, 3]);
        let path = from.path_to(&Position::new([3, 2, 3])).unwrap();
        assert_eq!(path, vec![Position::new([2, 2, 3]), Position::new([3, 2, 3])]);
    }

    #[test]
    fn test_path_diagonal_three_axes() {
        let from = Position::new([1, 2, 3]);
        let path = from.path_to(&Position::new([3, 0, 1])).unwrap();
        assert_eq!(path, vec![Position::new([2, 1, 2]), Position::new([3, 0, 1])]);
    }

    #[test]
    fn test_path_to_self_is_empty() {
        let pos = Position::new([4, 4]);
        assert!(pos.path_to(&pos.clone()).unwrap().is_empty());
    }

    #[test]
    fn test_replace() {
        let pos = Position::new([1, 2]);
        assert_eq!(pos.replace(0, 7), Position::new([7, 2]));
        assert_eq!(pos, Position::new([1, 2]));
    }

    #[test]
    fn test_difference_and_signum() {
        let a = Position::new([0, 4]);
        let b = Position::new([0, 0]);
        let diff = &b - &a;
        assert_eq!(diff, Position::new([0, -4]));
        assert_eq!(diff.signum(), Position::new([0, -1]));
        assert_eq!(&a + &(&diff.signum() * 2), Position::new([0, 2]));
    }
}
