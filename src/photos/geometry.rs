//! Vertical layout of sheet rows, in points.

/// Vertical extent `[y_start, y_end]` of one sheet row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct RowRange {
    /// 1-based row number
    pub(crate) row: usize,
    pub(crate) y_start: f64,
    pub(crate) y_end: f64,
}

impl RowRange {
    fn contains(&self, y: f64, tolerance: f64) -> bool {
        self.y_start - tolerance <= y && y <= self.y_end + tolerance
    }
}

/// Contiguous row ranges plus the sorted start index used for lookups.
///
/// Built once per extraction and shared by every anchor.
pub(crate) struct RowGeometry {
    ranges: Vec<RowRange>,
    starts: Vec<f64>,
}

impl RowGeometry {
    /// Stacks rows top to bottom; a missing height counts as `default_height`.
    pub(crate) fn from_heights<I>(heights: I, default_height: f64) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut ranges = Vec::new();
        let mut y = 0.0;
        for (index, height) in heights.into_iter().enumerate() {
            let y_end = y + height.unwrap_or(default_height);
            ranges.push(RowRange {
                row: index + 1,
                y_start: y,
                y_end,
            });
            y = y_end;
        }
        let starts = ranges.iter().map(|range| range.y_start).collect();
        Self { ranges, starts }
    }

    #[cfg(test)]
    pub(crate) fn ranges(&self) -> &[RowRange] {
        &self.ranges
    }

    /// Top edge of a 1-based row, `None` past the last row.
    pub(crate) fn row_start(&self, row: usize) -> Option<f64> {
        row.checked_sub(1)
            .and_then(|index| self.starts.get(index))
            .copied()
    }

    /// Finds the 1-based row whose range contains `y` within `tolerance`.
    ///
    /// Two candidates are tested: the row just above the insertion point of
    /// `y - tolerance` and the row at it. The second one wins when both match,
    /// so a coordinate on a shared boundary belongs to the row starting there.
    pub(crate) fn locate(&self, y: f64, tolerance: f64) -> Option<usize> {
        let index = self.starts.partition_point(|start| *start < y - tolerance);
        let mut matched = None;
        if let Some(range) = index.checked_sub(1).and_then(|below| self.ranges.get(below)) {
            if range.contains(y, tolerance) {
                matched = Some(range.row);
            }
        }
        if let Some(range) = self.ranges.get(index) {
            if range.contains(y, tolerance) {
                matched = Some(range.row);
            }
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(rows: usize) -> RowGeometry {
        RowGeometry::from_heights(std::iter::repeat(None).take(rows), 15.0)
    }

    #[test]
    fn ranges_are_contiguous_and_increasing() {
        let heights = [Some(20.0), None, Some(0.75), Some(42.5), None, Some(15.0)];
        let geometry = RowGeometry::from_heights(heights, 15.0);
        let ranges = geometry.ranges();

        assert_eq!(ranges.len(), heights.len());
        assert_eq!(ranges[0].y_start, 0.0);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].y_end, pair[1].y_start);
            assert!(pair[0].y_start < pair[1].y_start);
            assert_eq!(pair[0].row + 1, pair[1].row);
        }
        assert_eq!(ranges[1], RowRange { row: 2, y_start: 20.0, y_end: 35.0 });
        assert_eq!(ranges[5].y_end, 20.0 + 15.0 + 0.75 + 42.5 + 15.0 + 15.0);
    }

    #[test]
    fn no_heights_no_ranges() {
        let geometry = RowGeometry::from_heights(Vec::new(), 15.0);
        assert!(geometry.ranges().is_empty());
        assert_eq!(geometry.locate(0.0, 0.5), None);
        assert_eq!(geometry.row_start(1), None);
    }

    #[test]
    fn row_start_is_one_based() {
        let geometry = uniform(3);
        assert_eq!(geometry.row_start(0), None);
        assert_eq!(geometry.row_start(1), Some(0.0));
        assert_eq!(geometry.row_start(3), Some(30.0));
        assert_eq!(geometry.row_start(4), None);
    }

    #[test]
    fn locates_interior_points() {
        let geometry = uniform(4);
        assert_eq!(geometry.locate(7.0, 0.5), Some(1));
        assert_eq!(geometry.locate(22.5, 0.5), Some(2));
        assert_eq!(geometry.locate(59.0, 0.5), Some(4));
    }

    #[test]
    fn boundary_belongs_to_the_row_starting_there() {
        let geometry = uniform(4);
        assert_eq!(geometry.locate(15.0, 0.5), Some(2));
        assert_eq!(geometry.locate(30.0, 0.5), Some(3));
        assert_eq!(geometry.locate(0.0, 0.5), Some(1));
    }

    #[test]
    fn tolerance_extends_the_outer_edges() {
        let geometry = uniform(2);
        assert_eq!(geometry.locate(30.4, 0.5), Some(2));
        assert_eq!(geometry.locate(30.6, 0.5), None);
        assert_eq!(geometry.locate(-0.4, 0.5), Some(1));
        assert_eq!(geometry.locate(-0.6, 0.5), None);
    }

    #[test]
    fn near_boundary_points_prefer_the_lower_row() {
        let geometry = uniform(3);
        // Inside row 1 but within tolerance of row 2's top edge
        assert_eq!(geometry.locate(14.8, 0.5), Some(2));
        // Inside row 2 just past its top edge
        assert_eq!(geometry.locate(15.2, 0.5), Some(2));
    }
}
