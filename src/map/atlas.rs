use crate::braille::BrailleCanvas;
use crate::map::geometry::{draw_line, fill_rings, point_in_rings};
use crate::map::projection::Viewport;
use crate::map::shade::{self, Rgb};
use crate::map::spatial::FeatureGrid;
use crate::data::DataTable;

/// A single polygon: exterior ring first, then hole rings (lon/lat points)
pub type Polygon = Vec<Vec<(f64, f64)>>;

/// Grid cell size in degrees for the hit-test index
const GRID_CELL_DEG: f64 = 10.0;

/// Outline color for the selected country
const HIGHLIGHT: Rgb = Rgb::new(255, 255, 255);

/// A country shape with joined indicator metadata.
/// `color` is written only by the bake pass and never per frame.
pub struct Country {
    pub code: String,
    pub name: String,
    pub polygons: Vec<Polygon>,
    /// Geographic bounds: (min_lon, min_lat, max_lon, max_lat)
    pub bbox: (f64, f64, f64, f64),
    pub color: Rgb,
    pub selected: bool,
}

impl Country {
    pub fn new(code: String, name: String, polygons: Vec<Polygon>) -> Self {
        let bbox = compute_bbox(&polygons);
        Self {
            code,
            name,
            polygons,
            bbox,
            color: shade::NO_DATA,
            selected: false,
        }
    }

    /// Exact containment test over all polygons (even-odd handles holes)
    fn contains(&self, lon: f64, lat: f64) -> bool {
        let (min_lon, min_lat, max_lon, max_lat) = self.bbox;
        if lon < min_lon || lon > max_lon || lat < min_lat || lat > max_lat {
            return false;
        }
        self.polygons
            .iter()
            .any(|rings| point_in_rings(rings, lon, lat))
    }
}

fn compute_bbox(polygons: &[Polygon]) -> (f64, f64, f64, f64) {
    let mut bbox = (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for rings in polygons {
        for ring in rings {
            for &(lon, lat) in ring {
                bbox.0 = bbox.0.min(lon);
                bbox.1 = bbox.1.min(lat);
                bbox.2 = bbox.2.max(lon);
                bbox.3 = bbox.3.max(lat);
            }
        }
    }
    bbox
}

/// All country shapes plus the spatial index used for click hit-testing
pub struct Atlas {
    countries: Vec<Country>,
    grid: FeatureGrid,
}

impl Atlas {
    pub fn new() -> Self {
        Self {
            countries: Vec::new(),
            grid: FeatureGrid::new(GRID_CELL_DEG),
        }
    }

    pub fn from_countries(countries: Vec<Country>) -> Self {
        let grid = FeatureGrid::build(countries.iter().map(|c| c.bbox), GRID_CELL_DEG);
        Self { countries, grid }
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn countries_mut(&mut self) -> &mut [Country] {
        &mut self.countries
    }

    pub fn country(&self, idx: usize) -> Option<&Country> {
        self.countries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// One-time shading pass: join each country against the life-expectancy
    /// table and bake the encoded color into the shape. Countries absent
    /// from the table get the neutral no-data gray.
    pub fn bake_colors(&mut self, life_exp: &DataTable) {
        for country in &mut self.countries {
            country.color = shade::shade(life_exp.get(&country.code));
        }
    }

    /// How many countries have a value in the given table
    pub fn coverage(&self, table: &DataTable) -> usize {
        self.countries
            .iter()
            .filter(|c| table.get(&c.code).is_some())
            .count()
    }

    /// Find the first country containing the given geographic point.
    /// Grid candidates are deduped and checked in feature order so the
    /// result matches a linear first-hit scan.
    pub fn hit_test(&self, lon: f64, lat: f64) -> Option<usize> {
        let mut candidates = Vec::new();
        self.grid.query_point(lon, lat, &mut candidates);
        candidates.sort_unstable();
        candidates.dedup();

        candidates
            .into_iter()
            .find(|&idx| self.countries[idx].contains(lon, lat))
    }

    /// Render all visible countries to a fresh canvas of the given character
    /// dimensions. Each country is filled and outlined in its baked color;
    /// the selected country gets a highlight outline drawn on top.
    pub fn render(&self, width: usize, height: usize, viewport: &Viewport) -> BrailleCanvas {
        let mut canvas = BrailleCanvas::new(width, height);

        for country in &self.countries {
            if !self.bbox_visible(country, viewport) {
                continue;
            }
            for rings in &country.polygons {
                self.draw_polygon(&mut canvas, rings, viewport, country.color, true);
            }
        }

        // Selected country on top so its outline is never shaded over
        if let Some(country) = self.countries.iter().find(|c| c.selected) {
            for rings in &country.polygons {
                self.draw_polygon(&mut canvas, rings, viewport, HIGHLIGHT, false);
            }
        }

        canvas
    }

    /// Rough pixel-space visibility test on the country bbox
    fn bbox_visible(&self, country: &Country, viewport: &Viewport) -> bool {
        let (min_lon, min_lat, max_lon, max_lat) = country.bbox;
        // Antimeridian-spanning shapes (Russia, Fiji) produce a near-global
        // bbox; just attempt them
        if max_lon - min_lon > 180.0 {
            return true;
        }
        let top_left = viewport.project(min_lon, max_lat);
        let bottom_right = viewport.project(max_lon, min_lat);
        viewport.line_might_be_visible(top_left, bottom_right)
    }

    fn draw_polygon(
        &self,
        canvas: &mut BrailleCanvas,
        rings: &[Vec<(f64, f64)>],
        viewport: &Viewport,
        color: Rgb,
        fill: bool,
    ) {
        let projected: Vec<Vec<(f64, f64)>> = rings
            .iter()
            .map(|ring| {
                ring.iter()
                    .map(|&(lon, lat)| viewport.project_f64(lon, lat))
                    .collect()
            })
            .collect();

        // A polygon wrapping the antimeridian projects to a span covering
        // most of the world; filling it would smear across the map, so such
        // shapes are outlined only
        if fill && !self.wraps_world(&projected, viewport) {
            fill_rings(canvas, &projected, color);
        }

        for ring in &projected {
            self.draw_ring_outline(canvas, ring, viewport, color);
        }
    }

    fn wraps_world(&self, projected: &[Vec<(f64, f64)>], viewport: &Viewport) -> bool {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        for ring in projected {
            for &(x, _) in ring {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
            }
        }
        min_x.is_finite() && max_x - min_x > viewport.world_pixel_width() * 0.5
    }

    /// Draw a ring outline with viewport culling
    fn draw_ring_outline(
        &self,
        canvas: &mut BrailleCanvas,
        ring: &[(f64, f64)],
        viewport: &Viewport,
        color: Rgb,
    ) {
        if ring.len() < 2 {
            return;
        }

        let mut prev: Option<(i32, i32)> = None;

        for &(x, y) in ring {
            let (px, py) = (x as i32, y as i32);

            if let Some((prev_x, prev_y)) = prev {
                let dist = ((px - prev_x).abs() + (py - prev_y).abs()) as usize;
                if dist < viewport.width && viewport.line_might_be_visible((prev_x, prev_y), (px, py))
                {
                    draw_line(canvas, prev_x, prev_y, px, py, color);
                }
            }

            prev = Some((px, py));
        }
    }
}

impl Default for Atlas {
    fn default() -> Self {
        Self::new()
    }
}
