use crate::data::DataTable;
use crate::map::{Atlas, Country, Viewport};

/// Click selection state: at most one country is selected at a time.
/// Every click resets it, either to the hit country or to nothing.
#[derive(Default)]
pub struct Selection {
    current: Option<usize>,
}

impl Selection {
    pub fn current(&self) -> Option<usize> {
        self.current
    }
}

/// Application state
pub struct App {
    pub viewport: Viewport,
    pub atlas: Atlas,
    pub life_exp: DataTable,
    pub gdp: DataTable,
    pub selection: Selection,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Whether the current button-down gesture has panned the map
    drag_moved: bool,
}

impl App {
    pub fn new(width: usize, height: usize, atlas: Atlas, life_exp: DataTable, gdp: DataTable) -> Self {
        // Braille gives 2x4 resolution per character
        // Account for border (2 chars horizontal, 2 chars vertical including status bar)
        let inner_width = width.saturating_sub(2);
        let inner_height = height.saturating_sub(3); // 2 for border + 1 for status bar
        let pixel_width = inner_width * 2;
        let pixel_height = inner_height * 4;

        Self {
            viewport: Viewport::world(pixel_width, pixel_height),
            atlas,
            life_exp,
            gdp,
            selection: Selection::default(),
            should_quit: false,
            last_mouse: None,
            drag_moved: false,
        }
    }

    /// The one-time shading pass: bake every country's color from the
    /// life-expectancy table. Called once after loading, never per frame.
    pub fn bake_colors(&mut self) {
        self.atlas.bake_colors(&self.life_exp);
    }

    /// Update viewport size when terminal resizes
    pub fn resize(&mut self, width: usize, height: usize) {
        let inner_width = width.saturating_sub(2);
        let inner_height = height.saturating_sub(3);
        self.viewport.width = inner_width * 2;
        self.viewport.height = inner_height * 4;
    }

    /// Pan the map
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    /// Zoom in
    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    /// Zoom out
    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Zoom in towards a screen position (terminal column/row)
    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        let (px, py) = Self::to_pixel(col, row);
        self.viewport.zoom_in_at(px, py);
    }

    /// Zoom out from a screen position (terminal column/row)
    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        let (px, py) = Self::to_pixel(col, row);
        self.viewport.zoom_out_at(px, py);
    }

    /// Reset to the world view and clear the selection
    pub fn reset_view(&mut self) {
        self.viewport = Viewport::world(self.viewport.width, self.viewport.height);
        self.select(None);
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Convert terminal coords to braille pixel coords.
    /// Each terminal cell is 2 braille pixels wide, 4 tall; account for the
    /// map border (1 cell offset).
    fn to_pixel(col: u16, row: u16) -> (i32, i32) {
        let px = ((col.saturating_sub(1)) as i32) * 2;
        let py = ((row.saturating_sub(1)) as i32) * 4;
        (px, py)
    }

    /// Start a potential drag-or-click gesture
    pub fn begin_drag(&mut self, col: u16, row: u16) {
        self.last_mouse = Some((col, row));
        self.drag_moved = false;
    }

    /// Handle mouse drag motion by panning
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
            if dx != 0 || dy != 0 {
                self.drag_moved = true;
            }
            // Scale based on zoom: less sensitive when zoomed out
            let scale = if self.viewport.zoom < 2.0 {
                2
            } else if self.viewport.zoom < 4.0 {
                3
            } else {
                4
            };
            self.pan(dx * scale, dy * scale);
        }
        self.last_mouse = Some((x, y));
    }

    /// Finish the gesture; a release without motion is a click
    pub fn end_drag(&mut self, col: u16, row: u16) {
        let was_click = self.last_mouse.is_some() && !self.drag_moved;
        self.last_mouse = None;
        self.drag_moved = false;
        if was_click {
            self.click(col, row);
        }
    }

    /// Handle a pointer click: hit-test the clicked position and move the
    /// selection there. A miss clears the selection and shows no tooltip.
    pub fn click(&mut self, col: u16, row: u16) {
        let (px, py) = Self::to_pixel(col, row);
        let (lon, lat) = self.viewport.unproject(px, py);
        let hit = self.atlas.hit_test(lon, lat);
        self.select(hit);
    }

    /// Transition every country to unselected, then mark the hit (if any)
    pub fn select(&mut self, hit: Option<usize>) {
        for country in self.atlas.countries_mut() {
            country.selected = false;
        }
        if let Some(idx) = hit {
            if let Some(country) = self.atlas.countries_mut().get_mut(idx) {
                country.selected = true;
            }
        }
        self.selection.current = hit;
    }

    /// The currently selected country, if any
    pub fn selected_country(&self) -> Option<&Country> {
        self.selection.current.and_then(|idx| self.atlas.country(idx))
    }

    /// Get current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    /// Get current center coordinates as a string
    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_country(code: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Country {
        Country::new(
            code.to_string(),
            code.to_string(),
            vec![vec![vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]]],
        )
    }

    fn test_app() -> App {
        let atlas = Atlas::from_countries(vec![
            square_country("AAA", 0.0, 0.0, 10.0, 10.0),
            square_country("BBB", 20.0, 20.0, 30.0, 30.0),
        ]);
        App::new(80, 24, atlas, DataTable::default(), DataTable::default())
    }

    fn selected_flags(app: &App) -> Vec<bool> {
        app.atlas.countries().iter().map(|c| c.selected).collect()
    }

    #[test]
    fn test_select_replaces_previous_selection() {
        let mut app = test_app();
        app.select(Some(0));
        assert_eq!(selected_flags(&app), vec![true, false]);

        app.select(Some(1));
        assert_eq!(selected_flags(&app), vec![false, true]);
        assert_eq!(app.selection.current(), Some(1));
    }

    #[test]
    fn test_miss_clears_selection() {
        let mut app = test_app();
        app.select(Some(0));
        app.select(None);
        assert_eq!(selected_flags(&app), vec![false, false]);
        assert!(app.selected_country().is_none());
    }

    #[test]
    fn test_repeated_miss_is_noop() {
        let mut app = test_app();
        app.select(None);
        app.select(None);
        assert_eq!(selected_flags(&app), vec![false, false]);
    }

    #[test]
    fn test_drag_suppresses_click_selection() {
        let mut app = test_app();
        app.select(Some(0));
        app.begin_drag(10, 10);
        app.handle_drag(12, 10);
        app.end_drag(12, 10);
        // Pan gesture, not a click: selection untouched
        assert_eq!(app.selection.current(), Some(0));
    }

    #[test]
    fn test_click_hits_country_under_cursor() {
        let mut app = test_app();
        // Find the terminal cell over the center of country AAA
        let (px, py) = app.viewport.project(5.0, 5.0);
        let col = (px / 2 + 1) as u16;
        let row = (py / 4 + 1) as u16;

        app.begin_drag(col, row);
        app.end_drag(col, row);
        assert_eq!(app.selection.current(), Some(0));
        assert_eq!(app.selected_country().map(|c| c.code.as_str()), Some("AAA"));
    }

    #[test]
    fn test_reset_view_clears_selection() {
        let mut app = test_app();
        app.select(Some(1));
        app.viewport.zoom = 5.0;
        app.reset_view();
        assert!(app.selected_country().is_none());
        assert_eq!(app.viewport.zoom, 1.0);
    }
}
