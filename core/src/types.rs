use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts, flag counts, and linear cell indices.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row-major linear index, `row * cols + col`.
pub const fn linear_index((row, col): Coord2, (_, cols): Coord2) -> CellCount {
    row as CellCount * cols as CellCount + col as CellCount
}

/// Inverse of [`linear_index`]. The caller guarantees `index < rows * cols`.
pub const fn coords_from_index(index: CellCount, (_, cols): Coord2) -> Coord2 {
    let cols = cols as CellCount;
    ((index / cols) as Coord, (index % cols) as Coord)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let size = (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, size)
    }
}

/// Moore neighborhood of a cell: the 3x3 window around it, clipped at the
/// grid edge, minus the cell itself. Yields in row-major order.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    col_start: Coord,
    last: Coord2,
    cursor: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        let (row, col) = center;
        let (rows, cols) = bounds;
        let col_start = col.saturating_sub(1);
        let last = (
            row.saturating_add(1).min(rows.saturating_sub(1)),
            col.saturating_add(1).min(cols.saturating_sub(1)),
        );
        let in_bounds = row < rows && col < cols;

        Self {
            center,
            col_start,
            last,
            cursor: in_bounds.then_some((row.saturating_sub(1), col_start)),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pos = self.cursor?;
            self.cursor = if pos.1 < self.last.1 {
                Some((pos.0, pos.1 + 1))
            } else if pos.0 < self.last.0 {
                Some((pos.0 + 1, self.col_start))
            } else {
                None
            };

            if pos != self.center {
                return Some(pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (10, 10)).collect();
        assert_eq!(neighbors, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn edge_has_five_neighbors() {
        assert_eq!(NeighborIter::new((0, 5), (10, 10)).count(), 5);
        assert_eq!(NeighborIter::new((9, 5), (10, 10)).count(), 5);
        assert_eq!(NeighborIter::new((5, 9), (10, 10)).count(), 5);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((4, 4), (10, 10)).collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(4, 4)));
    }

    #[test]
    fn tiny_grids_clip_the_window() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);

        let strip: Vec<_> = NeighborIter::new((0, 2), (1, 5)).collect();
        assert_eq!(strip, vec![(0, 1), (0, 3)]);
    }

    #[test]
    fn out_of_bounds_center_has_no_neighbors() {
        assert_eq!(NeighborIter::new((10, 3), (10, 10)).count(), 0);
        assert_eq!(NeighborIter::new((3, 12), (10, 10)).count(), 0);
    }

    #[test]
    fn linear_index_is_row_major() {
        let size = (10, 10);
        assert_eq!(linear_index((0, 5), size), 5);
        assert_eq!(linear_index((1, 7), size), 17);
        assert_eq!(coords_from_index(73, size), (7, 3));
        assert_eq!(coords_from_index(linear_index((8, 8), size), size), (8, 8));
    }
}
