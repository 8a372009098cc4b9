/// Geometry for the cycle wheel with tunable radius bounds.
///
/// These are render-layer constants handed to the mapper, not engine state;
/// the defaults match the 800x800 viewbox the web client draws into.
#[derive(Debug, Clone)]
pub struct WheelGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self {
            center_x: 400.0,
            center_y: 400.0,
            inner_radius: 100.0,
            outer_radius: 350.0,
        }
    }
}

impl WheelGeometry {
    pub fn radius_range(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }
}
