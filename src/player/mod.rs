// ============================================
// Player Module - Камера наблюдателя
// ============================================

mod camera;

pub use camera::*;
