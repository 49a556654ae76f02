mod atlas;
mod geometry;
mod projection;
pub mod shade;
mod spatial;

pub use atlas::{Atlas, Country, Polygon};
pub use projection::Viewport;
pub use shade::Rgb;
