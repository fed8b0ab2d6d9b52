use std::f32::consts::PI;

use glam::Affine2;

use crate::geometry::{try_inverse, Point};

pub const ROTATE_STEP: f32 = PI / 30.0;
pub const SCALE_STEP: f32 = 1.125;

/// Global rotation and uniform scale, pivoted at the window center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    rotation: f32,
    scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTransform {
    pub const fn new() -> Self {
        Self {
            rotation: 0.0,
            scale: 1.0,
        }
    }

    pub const fn rotation(&self) -> f32 {
        self.rotation
    }

    pub const fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rotate_clockwise(&mut self) {
        self.rotation += ROTATE_STEP;
    }

    pub fn rotate_counter_clockwise(&mut self) {
        self.rotation -= ROTATE_STEP;
    }

    pub fn zoom_in(&mut self) {
        self.scale *= SCALE_STEP;
    }

    pub fn zoom_out(&mut self) {
        self.scale /= SCALE_STEP;
    }

    /// Model space to window space for a `width` x `height` window.
    pub fn matrix(&self, width: f32, height: f32) -> Affine2 {
        let center = Point::new(width * 0.5, height * 0.5);
        Affine2::from_translation(center)
            * Affine2::from_angle(self.rotation)
            * Affine2::from_scale(Point::splat(self.scale))
            * Affine2::from_translation(-center)
    }

    /// Window space to model space; `None` only if the scale underflowed to zero.
    pub fn inverse(&self, width: f32, height: f32) -> Option<Affine2> {
        try_inverse(&self.matrix(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn assert_point_near(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < EPS && (actual.y - expected.y).abs() < EPS,
            "{actual:?} should be near {expected:?}"
        );
    }

    #[test]
    fn default_view_is_identity() {
        let view = ViewTransform::new();
        let m = view.matrix(640.0, 480.0);
        let p = Point::new(12.0, 34.0);
        assert_point_near(m.transform_point2(p), p);
    }

    #[test]
    fn window_center_is_fixed_point() {
        let mut view = ViewTransform::new();
        for _ in 0..7 {
            view.rotate_clockwise();
        }
        view.zoom_in();
        let center = Point::new(320.0, 240.0);
        assert_point_near(view.matrix(640.0, 480.0).transform_point2(center), center);
        let inverse = view.inverse(640.0, 480.0).expect("view is invertible");
        assert_point_near(inverse.transform_point2(center), center);
    }

    #[test]
    fn zoom_compounds_and_scales_about_center() {
        let mut view = ViewTransform::new();
        view.zoom_in();
        view.zoom_in();
        assert!((view.scale() - 1.265625).abs() < 1e-6);

        let m = view.matrix(200.0, 200.0);
        assert_point_near(
            m.transform_point2(Point::new(110.0, 100.0)),
            Point::new(112.65625, 100.0),
        );

        view.zoom_out();
        view.zoom_out();
        assert!((view.scale() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotation_steps_are_thirtieths_of_pi() {
        let mut view = ViewTransform::new();
        view.rotate_clockwise();
        view.rotate_clockwise();
        view.rotate_counter_clockwise();
        assert!((view.rotation() - PI / 30.0).abs() < 1e-6);

        let quarter = ROTATE_STEP * 15.0;
        let mut turned = ViewTransform::new();
        for _ in 0..15 {
            turned.rotate_clockwise();
        }
        assert!((turned.rotation() - quarter).abs() < 1e-5);
        // Positive angles turn +x toward +y (clockwise on a y-down window).
        let m = turned.matrix(200.0, 200.0);
        assert_point_near(
            m.transform_point2(Point::new(110.0, 100.0)),
            Point::new(100.0, 110.0),
        );
    }

    #[test]
    fn inverse_maps_window_point_back_to_model() {
        let mut view = ViewTransform::new();
        view.rotate_counter_clockwise();
        view.zoom_out();
        let (w, h) = (640.0, 480.0);
        let model = Point::new(100.0, 50.0);
        let window = view.matrix(w, h).transform_point2(model);
        let inverse = view.inverse(w, h).expect("view is invertible");
        assert_point_near(inverse.transform_point2(window), model);
    }
}
