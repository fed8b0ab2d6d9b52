use super::{Affine2, Paint, Point, Rect, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect(Rect),
    Polygon(Vec<Point>),
}

/// One recorded draw call together with the transform in effect.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub op: DrawOp,
    pub paint: Paint,
    pub ctm: Affine2,
}

impl DrawCommand {
    /// The command's geometry mapped to device space.
    pub fn device_points(&self) -> Vec<Point> {
        let points = match &self.op {
            DrawOp::Rect(rect) => rect.corners().to_vec(),
            DrawOp::Polygon(points) => points.clone(),
        };
        points
            .into_iter()
            .map(|point| self.ctm.transform_point2(point))
            .collect()
    }
}

/// Surface that records draw calls instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    ctm: Affine2,
    saved: Vec<Affine2>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn ctm(&self) -> Affine2 {
        self.ctm
    }

    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    fn record(&mut self, op: DrawOp, paint: &Paint) {
        self.commands.push(DrawCommand {
            op,
            paint: paint.clone(),
            ctm: self.ctm,
        });
    }
}

impl Surface for DisplayList {
    fn draw_rect(&mut self, rect: &Rect, paint: &Paint) {
        self.record(DrawOp::Rect(*rect), paint);
    }

    fn draw_convex_polygon(&mut self, points: &[Point], paint: &Paint) {
        if points.len() < 3 {
            return;
        }
        self.record(DrawOp::Polygon(points.to_vec()), paint);
    }

    fn save(&mut self) {
        self.saved.push(self.ctm);
    }

    fn restore(&mut self) {
        match self.saved.pop() {
            Some(ctm) => self.ctm = ctm,
            None => tracing::warn!("display list restore without matching save"),
        }
    }

    fn concat(&mut self, matrix: &Affine2) {
        self.ctm = self.ctm * *matrix;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Color;

    #[test]
    fn records_commands_with_current_transform() {
        let mut list = DisplayList::new();
        let paint = Paint::solid(Color::BLACK);
        list.draw_rect(&Rect::wh(10.0, 10.0), &paint);
        list.save();
        list.translate(5.0, 7.0);
        list.scale(2.0, 2.0);
        list.draw_rect(&Rect::wh(1.0, 1.0), &paint);
        list.restore();
        list.draw_rect(&Rect::wh(3.0, 3.0), &paint);

        let commands = list.commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0].ctm, Affine2::IDENTITY);
        assert_eq!(
            commands[1].device_points()[2],
            Point::new(7.0, 9.0),
            "bottom-right corner goes through scale then translate"
        );
        assert_eq!(commands[2].ctm, Affine2::IDENTITY);
        assert_eq!(list.save_depth(), 0);
    }

    #[test]
    fn degenerate_polygon_is_skipped() {
        let mut list = DisplayList::new();
        let paint = Paint::solid(Color::BLACK);
        list.draw_convex_polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], &paint);
        assert!(list.commands().is_empty());
    }

    #[test]
    fn unbalanced_restore_keeps_transform() {
        let mut list = DisplayList::new();
        list.translate(3.0, 4.0);
        list.restore();
        assert_eq!(list.ctm(), Affine2::from_translation(Point::new(3.0, 4.0)));
    }
}
