pub mod noise;
pub mod color;

pub use noise::PerlinNoise;
pub use color::{get_color_by_height, band_for, HeightBand, HEIGHT_BANDS, BAND_BOUNDARIES};
