use nalgebra::Point2;

use crate::params::PixelToWorld;

impl PixelToWorld {
    /// Table point under pixel `(u, v)`.
    pub fn to_world(&self, pixel: Point2<f64>) -> Point2<f64> {
        let u_norm = pixel.x / self.resolution[0] as f64;
        let v_norm = pixel.y / self.resolution[1] as f64;
        Point2::new(
            lerp(self.x_limits, v_norm),
            lerp(self.y_limits, u_norm),
        )
    }

    /// Pixel over table point `p`. Inverse of [`PixelToWorld::to_world`].
    pub fn to_pixel(&self, p: Point2<f64>) -> Point2<f64> {
        let v_norm = (p.x - self.x_limits.0) / (self.x_limits.1 - self.x_limits.0);
        let u_norm = (p.y - self.y_limits.0) / (self.y_limits.1 - self.y_limits.0);
        Point2::new(
            u_norm * self.resolution[0] as f64,
            v_norm * self.resolution[1] as f64,
        )
    }
}

#[inline]
fn lerp((a, b): (f64, f64), t: f64) -> f64 {
    a + t * (b - a)
}
