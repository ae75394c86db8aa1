use glam::{Vec2, Vec3};
use portal_logo::extrude::{extrude, normalize_outline, signed_area, triangulate, Bevel, ExtrudeOptions};
use portal_logo::glyphs::WORDMARK;

const SQUARE: &[[f32; 2]] = &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

fn flat(depth: f32) -> ExtrudeOptions {
    ExtrudeOptions { depth, bevel: None }
}

fn approx_eq3(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).abs().max_element() < eps
}

#[test]
fn outline_is_made_counter_clockwise_without_closing_point() {
    let clockwise = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    let points = normalize_outline(&clockwise);
    assert_eq!(points.len(), 4);
    assert!(signed_area(&points) > 0.0);
}

#[test]
fn glyph_caps_cover_the_outline_exactly() {
    for glyph in &WORDMARK {
        let contour = normalize_outline(glyph.outline);
        let triangles = triangulate(&contour);
        assert!(triangles.len() <= contour.len() - 2, "glyph {}", glyph.letter);

        let covered: f32 = triangles
            .iter()
            .map(|t| signed_area(&[contour[t[0]], contour[t[1]], contour[t[2]]]))
            .inspect(|area| assert!(*area > 0.0, "glyph {} has a flipped triangle", glyph.letter))
            .sum();
        assert!((covered - signed_area(&contour)).abs() < 1e-5, "glyph {}", glyph.letter);
    }
}

#[test]
fn collinear_remainder_is_not_emitted() {
    // the X outline runs (0,1) -> (0.4,0.6) -> (0.5,0.5) along one line
    let x = WORDMARK.iter().find(|g| g.letter == 'X').expect("X glyph");
    let contour = normalize_outline(x.outline);
    let triangles = triangulate(&contour);
    for t in &triangles {
        let area = signed_area(&[contour[t[0]], contour[t[1]], contour[t[2]]]);
        assert!(area > 1e-6, "degenerate triangle {t:?}");
    }
    assert_eq!(triangles.len(), contour.len() - 3);
}

#[test]
fn collinear_points_do_not_stall_triangulation() {
    let polygon = [
        Vec2::new(0.0, 0.0),
        Vec2::new(0.5, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];
    let covered: f32 = triangulate(&polygon)
        .iter()
        .map(|t| signed_area(&[polygon[t[0]], polygon[t[1]], polygon[t[2]]]))
        .sum();
    assert!((covered - 1.0).abs() < 1e-6);
}

#[test]
fn flat_square_is_a_closed_box() {
    let geometry = extrude(SQUARE, &flat(0.25));
    // two triangles per cap, two per side
    assert_eq!(geometry.triangle_count(), 2 + 2 + 4 * 2);

    let (lo, hi) = geometry.bounds().expect("non-empty");
    assert!(approx_eq3(lo, Vec3::ZERO, 1e-6));
    assert!(approx_eq3(hi, Vec3::new(1.0, 1.0, 0.25), 1e-6));
}

#[test]
fn normals_point_out_of_the_box() {
    let geometry = extrude(SQUARE, &flat(1.0));
    let centre = Vec3::splat(0.5);
    for tri in geometry.positions.chunks(3).zip(geometry.normals.chunks(3)) {
        let (points, normals) = tri;
        let centroid = (points[0] + points[1] + points[2]) / 3.0;
        let normal = normals[0];
        assert!((normal.length() - 1.0).abs() < 1e-5);
        assert!(normal.dot(centroid - centre) > 0.0, "normal {normal} at {centroid}");

        // winding agrees with the stored normal
        let face = (points[1] - points[0]).cross(points[2] - points[0]);
        assert!(face.dot(normal) > 0.0);
    }
}

#[test]
fn bevel_grows_the_outline_and_extends_past_both_faces() {
    let bevel = Bevel { size: 0.05, thickness: 0.1, segments: 3 };
    let geometry = extrude(SQUARE, &ExtrudeOptions { depth: 0.5, bevel: Some(bevel) });

    // 3 front + 2 body + 3 back layers joined by 7 bands of 4 quads
    assert_eq!(geometry.triangle_count(), 2 + 2 + 7 * 4 * 2);

    let (lo, hi) = geometry.bounds().expect("non-empty");
    assert!(approx_eq3(lo, Vec3::new(-0.05, -0.05, -0.1), 1e-5), "lo {lo}");
    assert!(approx_eq3(hi, Vec3::new(1.05, 1.05, 0.6), 1e-5), "hi {hi}");
}

#[test]
fn bevel_caps_keep_the_original_outline() {
    let bevel = Bevel { size: 0.05, thickness: 0.1, segments: 2 };
    let geometry = extrude(SQUARE, &ExtrudeOptions { depth: 0.5, bevel: Some(bevel) });
    let front: Vec<Vec3> = geometry
        .positions
        .iter()
        .copied()
        .filter(|p| (p.z + 0.1).abs() < 1e-6)
        .collect();
    assert!(!front.is_empty());
    assert!(front.iter().all(|p| p.x >= -1e-6 && p.x <= 1.0 + 1e-6));
}

#[test]
fn degenerate_outline_gives_empty_geometry() {
    let geometry = extrude(&[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]], &flat(1.0));
    assert_eq!(geometry.vertex_count(), 0);
    assert!(geometry.bounds().is_none());
}

#[test]
fn interleaved_layout_is_position_then_normal() {
    let geometry = extrude(SQUARE, &flat(1.0));
    let data = geometry.interleaved();
    assert_eq!(data.len(), geometry.vertex_count() * 6);
    assert_eq!(&data[0..3], &geometry.positions[0].to_array());
    assert_eq!(&data[3..6], &geometry.normals[0].to_array());
}
