//! Outer borders of blobs in a binary image, with the shape measures pip and
//! tile filtering rely on.
//!
//! Border following is `imageproc`'s Suzuki-Abe tracer on 8-connected
//! foreground. Only top-level outer borders are kept, so blobs sitting in a
//! hole of another blob are ignored. Area and perimeter are measured on the
//! polygon through the border pixel centres.

use imageproc::contours::{find_contours, BorderType};
use nalgebra::Point2;

use crate::{GrayImageView, PixelRect};

/// Closed outer border of one connected component.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    /// Border pixels in tracing order.
    pub points: Vec<Point2<i32>>,
    bbox: PixelRect,
}

impl Contour {
    /// `None` for an empty point list.
    pub fn from_points(points: Vec<Point2<i32>>) -> Option<Self> {
        let first = *points.first()?;
        let mut bbox = PixelRect::new(first.x, first.y, first.x + 1, first.y + 1);
        for p in &points {
            bbox.x1 = bbox.x1.min(p.x);
            bbox.y1 = bbox.y1.min(p.y);
            bbox.x2 = bbox.x2.max(p.x + 1);
            bbox.y2 = bbox.y2.max(p.y + 1);
        }
        Some(Self { points, bbox })
    }

    /// Axis-aligned bounding box covering every border pixel (half-open).
    pub fn bounding_rect(&self) -> PixelRect {
        self.bbox
    }

    /// Enclosed polygon area (shoelace over pixel centres).
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: i64 = self
            .edges()
            .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
            .sum();
        (twice as f64).abs() * 0.5
    }

    /// Length of the closed border polyline.
    pub fn perimeter(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.edges()
            .map(|(a, b)| ((b.x - a.x) as f64).hypot((b.y - a.y) as f64))
            .sum()
    }

    /// `4*pi*area / perimeter^2`; `None` for degenerate borders.
    pub fn circularity(&self) -> Option<f64> {
        let p = self.perimeter();
        if p <= 0.0 {
            return None;
        }
        Some(4.0 * std::f64::consts::PI * self.area() / (p * p))
    }

    fn edges(&self) -> impl Iterator<Item = (Point2<i32>, Point2<i32>)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// Outer borders of all top-level components, in raster order of each
/// component's first pixel.
pub fn find_external_contours(binary: &GrayImageView<'_>) -> Vec<Contour> {
    if binary.width == 0 || binary.height == 0 {
        return Vec::new();
    }
    let Some(img) = binary.to_luma8() else {
        return Vec::new();
    };
    find_contours::<i32>(&img)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .filter_map(|c| {
            Contour::from_points(c.points.iter().map(|p| Point2::new(p.x, p.y)).collect())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GrayImage;
    use approx::assert_relative_eq;

    fn mask_with(rects: &[PixelRect], w: usize, h: usize) -> GrayImage {
        let mut img = GrayImage::new(w, h);
        for r in rects {
            img.fill_rect(*r, 255);
        }
        img
    }

    #[test]
    fn filled_rectangle_has_pixel_centre_area() {
        let rect = PixelRect::from_xywh(3, 4, 10, 6);
        let img = mask_with(&[rect], 20, 15);
        let contours = find_external_contours(&img.view());
        assert_eq!(contours.len(), 1);
        let c = &contours[0];
        assert_eq!(c.bounding_rect(), rect);
        assert_relative_eq!(c.area(), 9.0 * 5.0);
        assert_relative_eq!(c.perimeter(), 2.0 * (9.0 + 5.0));
    }

    #[test]
    fn stray_pixel_is_degenerate() {
        let img = mask_with(&[PixelRect::from_xywh(2, 2, 1, 1)], 5, 5);
        for c in find_external_contours(&img.view()) {
            assert_eq!(c.area(), 0.0);
            assert!(c.circularity().is_none());
        }
    }

    #[test]
    fn components_inside_holes_are_not_external() {
        // Ring with a blob in its hole.
        let mut img = mask_with(&[PixelRect::from_xywh(2, 2, 16, 16)], 20, 20);
        img.fill_rect(PixelRect::from_xywh(5, 5, 10, 10), 0);
        img.fill_rect(PixelRect::from_xywh(8, 8, 4, 4), 255);
        let contours = find_external_contours(&img.view());
        assert_eq!(contours.len(), 1);
        assert_eq!(
            contours[0].bounding_rect(),
            PixelRect::from_xywh(2, 2, 16, 16)
        );
    }

    #[test]
    fn diagonal_touch_merges_components() {
        let img = mask_with(
            &[
                PixelRect::from_xywh(0, 0, 3, 3),
                PixelRect::from_xywh(3, 3, 3, 3),
            ],
            8,
            8,
        );
        let contours = find_external_contours(&img.view());
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].bounding_rect(), PixelRect::new(0, 0, 6, 6));
    }

    #[test]
    fn contours_come_out_in_raster_order() {
        let img = mask_with(
            &[
                PixelRect::from_xywh(10, 1, 3, 3),
                PixelRect::from_xywh(1, 6, 3, 3),
                PixelRect::from_xywh(1, 1, 3, 3),
            ],
            16,
            12,
        );
        let boxes: Vec<PixelRect> = find_external_contours(&img.view())
            .iter()
            .map(Contour::bounding_rect)
            .collect();
        assert_eq!(
            boxes,
            vec![
                PixelRect::from_xywh(1, 1, 3, 3),
                PixelRect::from_xywh(10, 1, 3, 3),
                PixelRect::from_xywh(1, 6, 3, 3),
            ]
        );
    }

    #[test]
    fn circularity_of_square_is_pi_over_four() {
        let img = mask_with(&[PixelRect::from_xywh(1, 1, 9, 9)], 12, 12);
        let c = &find_external_contours(&img.view())[0];
        assert_relative_eq!(
            c.circularity().expect("non-degenerate"),
            std::f64::consts::FRAC_PI_4,
            epsilon = 1e-12
        );
    }

    #[test]
    fn empty_point_list_has_no_contour() {
        assert!(Contour::from_points(Vec::new()).is_none());
    }
}
