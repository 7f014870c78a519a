use crate::camera::View;
use crate::complex::Complex;
use crate::complex_ff::ComplexFf;
use crate::error::CoreError;

/// The visible region of the plane, bound to a pixel grid.
///
/// Pixel origin is the **top-left** corner; pixel-y grows downward while
/// fractal-y grows upward, so the mapping flips y. The view `span` maps to
/// the viewport height (the reference axis), which keeps the aspect ratio
/// correct on non-square viewports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Center of the viewport in fractal space (full `f64` precision).
    pub center_x: f64,
    pub center_y: f64,

    /// Fractal-space extent mapped to the viewport height.
    pub span: f64,

    /// Viewport width in pixels.
    pub width: u32,

    /// Viewport height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport with explicit parameters.
    ///
    /// Dimensions must be nonzero: the per-pixel scale divides by the
    /// height, and a degenerate viewport means "no frame to render", never
    /// a NaN propagated into the evaluators.
    pub fn new(
        center_x: f64,
        center_y: f64,
        span: f64,
        width: u32,
        height: u32,
    ) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidViewport {
                reason: format!("dimensions must be > 0, got {width}×{height}"),
            });
        }
        if span <= 0.0 || !span.is_finite() {
            return Err(CoreError::InvalidViewport {
                reason: format!("span must be positive and finite, got {span}"),
            });
        }
        Ok(Self {
            center_x,
            center_y,
            span,
            width,
            height,
        })
    }

    /// Bind a camera view snapshot to a pixel grid.
    pub fn from_view(view: View, width: u32, height: u32) -> crate::Result<Self> {
        Self::new(view.center_x, view.center_y, view.span, width, height)
    }

    /// Fractal-space units per pixel.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.span / self.height as f64
    }

    /// Map a pixel coordinate to fractal space in full `f64` precision.
    #[inline]
    pub fn pixel_to_point(&self, px: u32, py: u32) -> (f64, f64) {
        let half_w = self.width as f64 / 2.0;
        let half_h = self.height as f64 / 2.0;
        let scale = self.scale();
        (
            self.center_x + (px as f64 - half_w) * scale,
            self.center_y - (py as f64 - half_h) * scale,
        )
    }

    /// Map a pixel to the native-precision absolute coordinate.
    ///
    /// The mapping is computed in `f64` and downcast once, so the only
    /// precision loss is the final representation, not the arithmetic.
    #[inline]
    pub fn pixel_to_complex(&self, px: u32, py: u32) -> Complex {
        let (x, y) = self.pixel_to_point(px, py);
        Complex::new(x as f32, y as f32)
    }

    /// Map a pixel to its offset from the viewport center.
    ///
    /// Deltas stay near zero regardless of where the camera sits, so `f32`
    /// holds them with full relative precision — this is what the
    /// emulated-precision evaluators consume.
    #[inline]
    pub fn pixel_to_delta(&self, px: u32, py: u32) -> Complex {
        let half_w = self.width as f64 / 2.0;
        let half_h = self.height as f64 / 2.0;
        let scale = self.scale();
        Complex::new(
            ((px as f64 - half_w) * scale) as f32,
            (-(py as f64 - half_h) * scale) as f32,
        )
    }

    /// The viewport center split for the emulated-precision path.
    #[inline]
    pub fn center_ff(&self) -> ComplexFf {
        ComplexFf::from_f64(self.center_x, self.center_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn home_view_binding() {
        let vp = Viewport::from_view(View::HOME, 800, 600).unwrap();
        assert_eq!(vp.width, 800);
        assert_eq!(vp.height, 600);
        assert!((vp.center_x - (-0.5)).abs() < EPSILON);
        assert!((vp.center_y).abs() < EPSILON);
        assert!((vp.span - 3.0).abs() < EPSILON);
        assert!((vp.scale() - 3.0 / 600.0).abs() < EPSILON);
    }

    #[test]
    fn center_pixel_maps_to_center() {
        let vp = Viewport::new(0.0, 0.0, 1.0, 100, 100).unwrap();
        let (x, y) = vp.pixel_to_point(50, 50);
        assert!(x.abs() < EPSILON);
        assert!(y.abs() < EPSILON);
    }

    #[test]
    fn y_axis_is_inverted() {
        let vp = Viewport::new(0.0, 0.0, 100.0, 100, 100).unwrap();

        // Top-left pixel → negative x, positive y.
        let (tl_x, tl_y) = vp.pixel_to_point(0, 0);
        assert!((tl_x - (-50.0)).abs() < EPSILON);
        assert!((tl_y - 50.0).abs() < EPSILON);

        // Bottom-right pixel → positive x, negative y.
        let (br_x, br_y) = vp.pixel_to_point(99, 99);
        assert!((br_x - 49.0).abs() < EPSILON);
        assert!((br_y - (-49.0)).abs() < EPSILON);
    }

    #[test]
    fn span_maps_to_height_axis() {
        // Wide viewport: the height still spans exactly `span` units.
        let vp = Viewport::new(0.0, 0.0, 2.0, 1920, 960).unwrap();
        let (_, top) = vp.pixel_to_point(0, 0);
        let (_, bottom) = vp.pixel_to_point(0, 960);
        assert!((top - bottom - 2.0).abs() < EPSILON);
        // And the width spans more, by the aspect ratio.
        let (left, _) = vp.pixel_to_point(0, 0);
        let (right, _) = vp.pixel_to_point(1920, 0);
        assert!((right - left - 4.0).abs() < EPSILON);
    }

    #[test]
    fn delta_is_point_minus_center() {
        let vp = Viewport::new(-0.5, 0.25, 3.0, 1024, 768).unwrap();
        for &(px, py) in &[(0, 0), (512, 384), (1023, 767), (100, 700)] {
            let (x, y) = vp.pixel_to_point(px, py);
            let d = vp.pixel_to_delta(px, py);
            assert!(((x - vp.center_x) as f32 - d.re).abs() < 1e-6);
            assert!(((y - vp.center_y) as f32 - d.im).abs() < 1e-6);
        }
    }

    #[test]
    fn delta_keeps_precision_at_deep_zoom() {
        // At spans far below f32 resolution of the center, deltas must
        // still step smoothly pixel to pixel.
        let vp = Viewport::new(-0.743_643_887, 0.131_825_904, 1e-9, 1024, 768).unwrap();
        let a = vp.pixel_to_delta(512, 384);
        let b = vp.pixel_to_delta(513, 384);
        let step = (b.re - a.re) as f64;
        assert!((step - vp.scale()).abs() < vp.scale() * 1e-5);
    }

    #[test]
    fn center_ff_reconstructs_center() {
        let vp = Viewport::new(-0.743_643_887_037_151, 0.131_825_904_205_33, 1e-6, 640, 480)
            .unwrap();
        let c = vp.center_ff();
        assert!((c.re.to_f64() - vp.center_x).abs() < 1e-13);
        assert!((c.im.to_f64() - vp.center_y).abs() < 1e-13);
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(Viewport::new(0.0, 0.0, 1.0, 0, 100).is_err());
        assert!(Viewport::new(0.0, 0.0, 1.0, 100, 0).is_err());
    }

    #[test]
    fn rejects_degenerate_span() {
        assert!(Viewport::new(0.0, 0.0, 0.0, 100, 100).is_err());
        assert!(Viewport::new(0.0, 0.0, -1.0, 100, 100).is_err());
        assert!(Viewport::new(0.0, 0.0, f64::NAN, 100, 100).is_err());
        assert!(Viewport::new(0.0, 0.0, f64::INFINITY, 100, 100).is_err());
    }
}
