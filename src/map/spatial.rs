use std::collections::HashMap;

/// Spatial index for country features using conservative approximation.
/// Each feature's bounding box is indexed into every cell it overlaps,
/// guaranteeing no false negatives while allowing false positives
/// (eliminated by the exact point-in-polygon check in hit testing).
pub struct FeatureGrid {
    cells: HashMap<(i32, i32), Vec<usize>>,
    cell_size: f64,
}

impl FeatureGrid {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cells: HashMap::new(),
            cell_size,
        }
    }

    #[inline(always)]
    fn to_cell(&self, lon: f64, lat: f64) -> (i32, i32) {
        let x = (lon / self.cell_size).floor() as i32;
        let y = (lat / self.cell_size).floor() as i32;
        (x, y)
    }

    /// Build from feature bounding boxes (min_lon, min_lat, max_lon, max_lat)
    pub fn build(bboxes: impl Iterator<Item = (f64, f64, f64, f64)>, cell_size: f64) -> Self {
        let mut grid = Self::new(cell_size);
        for (idx, (min_lon, min_lat, max_lon, max_lat)) in bboxes.enumerate() {
            let min_cell = grid.to_cell(min_lon, min_lat);
            let max_cell = grid.to_cell(max_lon, max_lat);
            for y in min_cell.1..=max_cell.1 {
                for x in min_cell.0..=max_cell.0 {
                    grid.cells.entry((x, y)).or_default().push(idx);
                }
            }
        }
        grid
    }

    /// Append candidate feature indices for a point query into results vec.
    /// Candidates are a superset; caller must run the exact containment test.
    pub fn query_point(&self, lon: f64, lat: f64, results: &mut Vec<usize>) {
        if let Some(indices) = self.cells.get(&self.to_cell(lon, lat)) {
            results.extend_from_slice(indices);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_query_hits_overlapping_bbox() {
        let bboxes = vec![
            (0.0, 0.0, 10.0, 10.0),  // feature 0
            (20.0, 20.0, 30.0, 30.0), // feature 1
        ];
        let grid = FeatureGrid::build(bboxes.into_iter(), 10.0);

        let mut results = Vec::new();
        grid.query_point(5.0, 5.0, &mut results);
        assert!(results.contains(&0));
        assert!(!results.contains(&1));

        results.clear();
        grid.query_point(25.0, 25.0, &mut results);
        assert_eq!(results, vec![1]);
    }

    #[test]
    fn test_point_query_empty_region() {
        let grid = FeatureGrid::build(std::iter::once((0.0, 0.0, 1.0, 1.0)), 10.0);
        let mut results = Vec::new();
        grid.query_point(-50.0, -50.0, &mut results);
        assert!(results.is_empty());
    }
}
