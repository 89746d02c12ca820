//! Bounding boxes over axes that may wrap around (like longitude does at the antimeridian).

use serde::{Deserialize, Serialize};
use tessera_types::geo::{GeoRectangle, EARTH_RECT};
use tessera_types::geometry::Geometry;
use tessera_types::{LonLat, Rect, Segment, Space, Span, Vec2};

use crate::error::TilingError;

/// Calculates minimal bounding rectangles inside a map domain.
///
/// Every input item is given as a directional [`Segment`] per axis. On an axis with `loop` set, a segment with
/// `start > end` goes through the domain boundary, and the resulting bounding range is the complement of the
/// largest part of the domain not covered by any segment. Such a range can extend past the domain boundary: a box
/// from `97` to `-92` degrees of longitude is returned as `left = -263, width = 171`. Use
/// [`GeoRectangle::from_rect`] to normalize it.
///
/// On a non-looping axis the result is simply the range from the minimum start to the maximum end.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct GeoBoundingBoxCalculator<S> {
    map_rect: Rect<S>,
    loop_x: bool,
    loop_y: bool,
}

impl<S> Clone for GeoBoundingBoxCalculator<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for GeoBoundingBoxCalculator<S> {}

impl<S> PartialEq for GeoBoundingBoxCalculator<S> {
    fn eq(&self, other: &Self) -> bool {
        self.map_rect == other.map_rect && self.loop_x == other.loop_x && self.loop_y == other.loop_y
    }
}

impl GeoBoundingBoxCalculator<LonLat> {
    /// Calculator for geographic coordinates: longitude wraps at the antimeridian, latitude does not.
    pub const fn lon_lat() -> Self {
        Self::new(EARTH_RECT, true, false)
    }
}

impl<S: Space> GeoBoundingBoxCalculator<S> {
    /// Creates a new calculator for the given map domain.
    pub const fn new(map_rect: Rect<S>, loop_x: bool, loop_y: bool) -> Self {
        Self {
            map_rect,
            loop_x,
            loop_y,
        }
    }

    /// Map domain.
    pub fn map_rect(&self) -> Rect<S> {
        self.map_rect
    }

    /// Whether the `x` axis wraps around.
    pub fn loop_x(&self) -> bool {
        self.loop_x
    }

    /// Whether the `y` axis wraps around.
    pub fn loop_y(&self) -> bool {
        self.loop_y
    }

    /// Bounding rectangle of items given by their extent along each axis.
    ///
    /// Returns [`TilingError::NoCoordinates`] if either of the sequences is empty.
    pub fn calculate_bounding_box(
        &self,
        x_segments: impl IntoIterator<Item = Segment>,
        y_segments: impl IntoIterator<Item = Segment>,
    ) -> Result<Rect<S>, TilingError> {
        let x_range = bounding_range(x_segments, self.map_rect.x_range(), self.loop_x)?;
        let y_range = bounding_range(y_segments, self.map_rect.y_range(), self.loop_y)?;

        Ok(Rect::from_ranges(x_range, y_range))
    }

    /// Bounding rectangle of points packed as `[x0, y0, x1, y1, ...]`.
    pub fn for_lon_lat_list(&self, coordinates: &[f64]) -> Result<Rect<S>, TilingError> {
        if coordinates.len() % 2 != 0 {
            return Err(TilingError::Precondition(format!(
                "packed coordinate list must have even length, got {}",
                coordinates.len()
            )));
        }

        let points = coordinates.chunks_exact(2);
        self.calculate_bounding_box(
            points.clone().map(|point| Segment::point(point[0])),
            points.map(|point| Segment::point(point[1])),
        )
    }

    /// Bounding rectangle of points given as separate lists of coordinates.
    pub fn for_coordinates(&self, xs: &[f64], ys: &[f64]) -> Result<Rect<S>, TilingError> {
        if xs.len() != ys.len() {
            return Err(TilingError::Precondition(format!(
                "got {} x coordinates and {} y coordinates",
                xs.len(),
                ys.len()
            )));
        }

        self.calculate_bounding_box(
            xs.iter().copied().map(Segment::point),
            ys.iter().copied().map(Segment::point),
        )
    }

    /// Bounding rectangle of boxes given as separate lists of their limits.
    ///
    /// On a looping axis `min > max` means the box goes through the domain boundary.
    pub fn for_limits(
        &self,
        min_xs: &[f64],
        min_ys: &[f64],
        max_xs: &[f64],
        max_ys: &[f64],
    ) -> Result<Rect<S>, TilingError> {
        let count = min_xs.len();
        if min_ys.len() != count || max_xs.len() != count || max_ys.len() != count {
            return Err(TilingError::Precondition(format!(
                "limit lists have different lengths: {count}, {}, {}, {}",
                min_ys.len(),
                max_xs.len(),
                max_ys.len()
            )));
        }

        self.calculate_bounding_box(
            segments(min_xs, max_xs),
            segments(min_ys, max_ys),
        )
    }

    /// Bounding rectangle of geographic rectangles.
    pub fn for_geo_rectangles(&self, rectangles: &[GeoRectangle]) -> Result<Rect<S>, TilingError> {
        self.calculate_bounding_box(
            rectangles
                .iter()
                .map(|rect| Segment::new(rect.min_longitude(), rect.max_longitude())),
            rectangles
                .iter()
                .map(|rect| Segment::new(rect.min_latitude(), rect.max_latitude())),
        )
    }

    /// Bounding rectangle of rectangles.
    pub fn for_rectangles(&self, rectangles: &[Rect<S>]) -> Result<Rect<S>, TilingError> {
        self.calculate_bounding_box(
            rectangles.iter().map(|rect| Segment::new(rect.left(), rect.right())),
            rectangles.iter().map(|rect| Segment::new(rect.top(), rect.bottom())),
        )
    }

    /// Bounding rectangle of points.
    pub fn for_points(&self, points: &[Vec2<S>]) -> Result<Rect<S>, TilingError> {
        self.calculate_bounding_box(
            points.iter().map(|point| Segment::point(point.x())),
            points.iter().map(|point| Segment::point(point.y())),
        )
    }

    /// Bounding rectangle of all vertices of the geometries.
    pub fn for_geometries(&self, geometries: &[Geometry<S>]) -> Result<Rect<S>, TilingError> {
        self.calculate_bounding_box(
            geometries
                .iter()
                .flat_map(Geometry::points)
                .map(|point| Segment::point(point.x())),
            geometries
                .iter()
                .flat_map(Geometry::points)
                .map(|point| Segment::point(point.y())),
        )
    }
}

fn segments<'a>(starts: &'a [f64], ends: &'a [f64]) -> impl Iterator<Item = Segment> + 'a {
    starts
        .iter()
        .zip(ends)
        .map(|(&start, &end)| Segment::new(start, end))
}

fn bounding_range(
    segments: impl IntoIterator<Item = Segment>,
    map_range: Span,
    is_looped: bool,
) -> Result<Span, TilingError> {
    if is_looped {
        calculate_loop_limit_range(segments, map_range)
    } else {
        calculate_limit_range(segments)
    }
}

/// Range from the smallest start to the largest end of the segments.
pub fn calculate_limit_range(
    segments: impl IntoIterator<Item = Segment>,
) -> Result<Span, TilingError> {
    let mut segments = segments.into_iter();
    let first = segments.next().ok_or(TilingError::NoCoordinates)?;
    let (lower, upper) = segments.fold((first.start(), first.end()), |(lower, upper), segment| {
        (lower.min(segment.start()), upper.max(segment.end()))
    });

    Ok(Span::new(lower, upper)?)
}

/// Minimal range covering all the segments on the cyclic axis `map_range`.
///
/// The result is the complement of the largest gap between the segments. Its center is always inside `map_range`,
/// but one of the ends can lie outside of it if the range goes through the domain boundary. If the segments cover
/// the whole domain, the result is the domain itself (possibly shifted).
pub fn calculate_loop_limit_range(
    segments: impl IntoIterator<Item = Segment>,
    map_range: Span,
) -> Result<Span, TilingError> {
    let mut pieces: Vec<Span> = segments
        .into_iter()
        .flat_map(|segment| segment.split(map_range))
        .collect();
    pieces.sort_by(|a, b| a.lower().total_cmp(&b.lower()));

    let Some((first, rest)) = pieces.split_first() else {
        return Err(TilingError::NoCoordinates);
    };

    let width = map_range.length();
    let max_gap = find_max_gap(first, rest, width);
    log::trace!(
        "Max gap between {} ranges: [{}, {}]",
        pieces.len(),
        max_gap.lower(),
        max_gap.upper()
    );

    Ok(normalize_center(invert_range(max_gap, width), map_range))
}

/// Pieces must be sorted by the lower end.
fn find_max_gap(first: &Span, rest: &[Span], width: f64) -> Span {
    let max_upper = rest
        .iter()
        .map(Span::upper)
        .fold(first.upper(), f64::max);

    // The gap through the domain boundary, from the last covered value to the first one.
    let gap_right = (width + first.lower()).max(max_upper);
    let mut max_gap = Span::from_unordered(max_upper, gap_right);

    let mut prev_upper = first.upper();
    for piece in rest {
        let next_lower = piece.lower();
        if next_lower > prev_upper && next_lower - prev_upper > max_gap.length() {
            max_gap = Span::from_unordered(prev_upper, next_lower);
        }
        prev_upper = prev_upper.max(piece.upper());
    }

    max_gap
}

fn invert_range(gap: Span, width: f64) -> Span {
    if gap.length() > width {
        Span::point(gap.lower())
    } else if gap.upper() > width {
        Span::from_unordered(gap.upper() - width, gap.lower())
    } else {
        Span::from_unordered(gap.upper(), width + gap.lower())
    }
}

fn normalize_center(range: Span, map_range: Span) -> Span {
    if map_range.contains(range.center()) {
        range
    } else {
        range.shift(-map_range.length())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use insta::assert_compact_debug_snapshot;
    use tessera_types::{TypesError, Untyped};

    use super::*;

    const FIRST: (f64, f64) = (97.0, -41.0);
    const SECOND: (f64, f64) = (-92.0, 62.0);
    const THIRD: (f64, f64) = (87.0, -43.0);
    const FOURTH: (f64, f64) = (-82.0, 64.0);

    fn rectangles() -> Vec<GeoRectangle> {
        vec![
            GeoRectangle::new(125.0, -65.0, 145.0, -44.0).unwrap(),
            GeoRectangle::new(-145.0, 30.0, -105.0, 60.0).unwrap(),
            GeoRectangle::new(175.0, 35.0, -140.0, 65.0).unwrap(),
        ]
    }

    fn points_bbox(points: &[(f64, f64)]) -> GeoRectangle {
        let calculator = GeoBoundingBoxCalculator::lon_lat();
        let packed: Vec<f64> = points.iter().flat_map(|&(x, y)| [x, y]).collect();
        let rect = calculator.for_lon_lat_list(&packed).unwrap();
        GeoRectangle::from_rect(&rect).unwrap()
    }

    fn assert_longitudes(rect: &GeoRectangle, min: f64, max: f64) {
        assert_abs_diff_eq!(rect.min_longitude(), min, epsilon = 1e-9);
        assert_abs_diff_eq!(rect.max_longitude(), max, epsilon = 1e-9);
    }

    fn assert_latitudes(rect: &GeoRectangle, min: f64, max: f64) {
        assert_abs_diff_eq!(rect.min_latitude(), min, epsilon = 1e-9);
        assert_abs_diff_eq!(rect.max_latitude(), max, epsilon = 1e-9);
    }

    #[test]
    fn points_across_antimeridian() {
        let bbox = points_bbox(&[FIRST, SECOND]);
        assert_longitudes(&bbox, 97.0, -92.0);
        assert_latitudes(&bbox, -41.0, 62.0);
    }

    #[test]
    fn points_over_zero_meridian() {
        let bbox = points_bbox(&[THIRD, FOURTH]);
        assert_longitudes(&bbox, -82.0, 87.0);
        assert_latitudes(&bbox, -43.0, 64.0);
    }

    #[test]
    fn all_points() {
        let bbox = points_bbox(&[FIRST, SECOND, THIRD, FOURTH]);
        assert_longitudes(&bbox, -92.0, 97.0);
        assert_latitudes(&bbox, -43.0, 64.0);
    }

    #[test]
    fn equal_points() {
        let rect = GeoBoundingBoxCalculator::lon_lat()
            .for_lon_lat_list(&[10.0, 20.0, 10.0, 20.0])
            .unwrap();
        assert_eq!(rect, Rect::from_xywh(10.0, 20.0, 0.0, 0.0));
    }

    #[test]
    fn raw_result_extends_past_domain() {
        let rect = GeoBoundingBoxCalculator::lon_lat()
            .for_coordinates(&[FIRST.0, SECOND.0], &[FIRST.1, SECOND.1])
            .unwrap();
        assert_compact_debug_snapshot!(rect, @"Rect { left: -263.0, top: -41.0, width: 171.0, height: 103.0 }");
    }

    #[test]
    fn geo_rectangles() {
        let calculator = GeoBoundingBoxCalculator::lon_lat();
        let rectangles = rectangles();

        let bbox = calculator.for_geo_rectangles(&rectangles[..2]).unwrap();
        let bbox = GeoRectangle::from_rect(&bbox).unwrap();
        assert_longitudes(&bbox, 125.0, -105.0);
        assert_latitudes(&bbox, -65.0, 60.0);

        let bbox = calculator.for_geo_rectangles(&rectangles).unwrap();
        let bbox = GeoRectangle::from_rect(&bbox).unwrap();
        assert_longitudes(&bbox, 125.0, -105.0);
        assert_latitudes(&bbox, -65.0, 65.0);
    }

    #[test]
    fn limits_match_geo_rectangles() {
        let calculator = GeoBoundingBoxCalculator::lon_lat();
        let rectangles = rectangles();
        let min_xs: Vec<f64> = rectangles.iter().map(|r| r.min_longitude()).collect();
        let min_ys: Vec<f64> = rectangles.iter().map(|r| r.min_latitude()).collect();
        let max_xs: Vec<f64> = rectangles.iter().map(|r| r.max_longitude()).collect();
        let max_ys: Vec<f64> = rectangles.iter().map(|r| r.max_latitude()).collect();

        assert_eq!(
            calculator
                .for_limits(&min_xs, &min_ys, &max_xs, &max_ys)
                .unwrap(),
            calculator.for_geo_rectangles(&rectangles).unwrap()
        );
    }

    #[test]
    fn rectangles_without_loop() {
        let calculator =
            GeoBoundingBoxCalculator::<Untyped>::new(Rect::from_xywh(0.0, 0.0, 100.0, 100.0), false, false);
        let bbox = calculator
            .for_rectangles(&[
                Rect::from_xywh(10.0, 20.0, 5.0, 5.0),
                Rect::from_xywh(50.0, 5.0, 10.0, 10.0),
            ])
            .unwrap();
        assert_eq!(bbox, Rect::from_ltrb(10.0, 5.0, 60.0, 25.0));
    }

    #[test]
    fn full_domain() {
        let range = calculate_loop_limit_range([Segment::new(-180.0, 180.0)], EARTH_RECT.x_range())
            .unwrap();
        assert_eq!(range, EARTH_RECT.x_range());

        let range = calculate_loop_limit_range(
            [Segment::new(-180.0, 0.0), Segment::new(0.0, 180.0)],
            EARTH_RECT.x_range(),
        )
        .unwrap();
        assert_eq!(range, EARTH_RECT.x_range());
    }

    #[test]
    fn wrapping_segment() {
        let range =
            calculate_loop_limit_range([Segment::new(170.0, -170.0)], EARTH_RECT.x_range()).unwrap();
        assert_abs_diff_eq!(range.lower(), 170.0, epsilon = 1e-9);
        assert_abs_diff_eq!(range.upper(), 190.0, epsilon = 1e-9);
    }

    #[test]
    fn point_in_nearly_full_domain() {
        let map_range = Span::new(0.0, 255.99999999999997).unwrap();
        let range = calculate_loop_limit_range([Segment::point(100.0)], map_range).unwrap();
        assert_abs_diff_eq!(range.lower(), 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(range.upper(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn adding_segments_never_shrinks_range() {
        let mut seed = 42u64;
        let mut next = move || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (seed >> 11) as f64 / (1u64 << 53) as f64 * 360.0 - 180.0
        };

        let mut segments = vec![];
        let mut prev_length = 0.0;
        for _ in 0..200 {
            let start = next();
            let end = next();
            segments.push(Segment::new(start, end));

            let range =
                calculate_loop_limit_range(segments.iter().copied(), EARTH_RECT.x_range()).unwrap();
            assert!(
                range.length() >= prev_length - 1e-9,
                "range shrunk from {prev_length} to {}",
                range.length()
            );
            assert!(EARTH_RECT.x_range().contains(range.center()));
            prev_length = range.length();
        }
    }

    #[test]
    fn geometries() {
        let geometries: Vec<Geometry<LonLat>> = vec![
            Vec2::new(FIRST.0, FIRST.1).into(),
            Vec2::new(SECOND.0, SECOND.1).into(),
        ];
        let rect = GeoBoundingBoxCalculator::lon_lat()
            .for_geometries(&geometries)
            .unwrap();
        let points = [Vec2::new(FIRST.0, FIRST.1), Vec2::new(SECOND.0, SECOND.1)];
        assert_eq!(
            rect,
            GeoBoundingBoxCalculator::lon_lat()
                .for_points(&points)
                .unwrap()
        );
    }

    #[test]
    fn errors() {
        let calculator = GeoBoundingBoxCalculator::lon_lat();
        assert_matches!(
            calculator.for_lon_lat_list(&[]),
            Err(TilingError::NoCoordinates)
        );
        assert_matches!(
            calculator.for_points(&[]),
            Err(TilingError::NoCoordinates)
        );
        assert_matches!(
            calculator.for_lon_lat_list(&[1.0, 2.0, 3.0]),
            Err(TilingError::Precondition(_))
        );
        assert_matches!(
            calculator.for_coordinates(&[1.0, 2.0], &[1.0]),
            Err(TilingError::Precondition(_))
        );
        assert_matches!(
            calculator.for_limits(&[1.0], &[1.0], &[1.0], &[]),
            Err(TilingError::Precondition(_))
        );
        assert_matches!(
            calculate_limit_range([Segment::new(5.0, 3.0)]),
            Err(TilingError::Types(TypesError::Precondition(_)))
        );
    }

    #[test]
    fn calculator_from_json() {
        let calculator: GeoBoundingBoxCalculator<LonLat> = serde_json::from_str(
            r#"{
                "map_rect": {"origin": {"x": -180.0, "y": -90.0}, "dimension": {"x": 360.0, "y": 180.0}},
                "loop_x": true,
                "loop_y": false
            }"#,
        )
        .unwrap();
        assert_eq!(calculator, GeoBoundingBoxCalculator::lon_lat());
    }
}
