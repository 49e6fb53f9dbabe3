use matrixcompare::assert_scalar_eq;
use nalgebra::{Point1, Point2, Point3};
use paste::paste;
use quadproject::embedding::{map_to_child, FaceEmbedding, LineEmbedding};
use quadproject::{Error, FaceKind, ReferenceCellKind};

/// Evaluating a face embedding at the face's own corners must reproduce the cell vertices
/// exactly, with no interpolation error.
fn assert_face_corners_match_cell_vertices<const M: usize, const D: usize>(cell: ReferenceCellKind) {
    for face_index in 0..cell.num_faces() {
        let embedding = FaceEmbedding::<f64, D>::new(cell, face_index).unwrap();
        let kind = cell.face_kind(face_index).unwrap();
        for (corner_index, &vertex_index) in cell.face_vertices(face_index).unwrap().iter().enumerate() {
            let corner = kind.corner::<f64, M>(corner_index).unwrap();
            let mapped = embedding.map(&corner).unwrap();
            let vertex = cell.vertex::<f64, D>(vertex_index).unwrap();
            // Corner weights are exact zeros and ones, so this must hold bitwise
            assert_eq!(mapped, vertex, "{cell:?}, face {face_index}, corner {corner_index}");
        }
    }
}

macro_rules! corner_round_trip_tests {
    ($($kind:ident => ($m:literal, $d:literal)),* $(,)?) => {
        $(
            paste! {
                #[test]
                fn [<face_corners_match_cell_vertices_for_ $kind:lower>]() {
                    assert_face_corners_match_cell_vertices::<$m, $d>(ReferenceCellKind::$kind);
                }
            }
        )*
    };
}

corner_round_trip_tests!(
    Line => (0, 1),
    Triangle => (1, 2),
    Quadrilateral => (1, 2),
    Tetrahedron => (2, 3),
    Pyramid => (2, 3),
    Wedge => (2, 3),
    Hexahedron => (2, 3),
);

#[test]
fn face_embedding_rejects_wrong_dimensions() {
    assert_eq!(
        FaceEmbedding::<f64, 2>::new(ReferenceCellKind::Hexahedron, 0).unwrap_err(),
        Error::DimensionMismatch { expected: 3, found: 2 }
    );

    let embedding = FaceEmbedding::<f64, 3>::new(ReferenceCellKind::Hexahedron, 0).unwrap();
    assert_eq!(
        embedding.map(&Point1::new(0.5)).unwrap_err(),
        Error::DimensionMismatch { expected: 2, found: 1 }
    );
}

#[test]
fn face_embedding_rejects_out_of_range_face() {
    assert_eq!(
        FaceEmbedding::<f64, 3>::new(ReferenceCellKind::Tetrahedron, 4).unwrap_err(),
        Error::InvalidIndex { index: 4, count: 4 }
    );
}

#[test]
fn quadrilateral_face_embedding_is_bilinear() {
    // Face 4 of the hexahedron is the z = 0 plane with parameters (x, y)
    let embedding = FaceEmbedding::<f64, 3>::new(ReferenceCellKind::Hexahedron, 4).unwrap();
    let mapped = embedding.map(&Point2::new(0.25, 0.75)).unwrap();
    assert_eq!(mapped, Point3::new(0.25, 0.75, 0.0));
}

#[test]
fn line_embedding_maps_affinely() {
    let segment = LineEmbedding::new(Point2::new(1.0, 3.0), Point2::new(7.0, -5.0));
    assert_eq!(segment.map(0.0), Point2::new(1.0, 3.0));
    assert_eq!(segment.map(1.0), Point2::new(7.0, -5.0));
    assert_eq!(segment.map(0.5), Point2::new(4.0, -1.0));
    assert_scalar_eq!(segment.length(), 10.0, comp = abs, tol = 1e-14);
}

#[test]
fn line_children_cover_the_halves() {
    let t = Point1::new(0.5);
    assert_eq!(map_to_child(FaceKind::Line, 0, &t).unwrap(), Point1::new(0.25));
    assert_eq!(map_to_child(FaceKind::Line, 1, &t).unwrap(), Point1::new(0.75));

    // Child boundaries meet at the midpoint
    assert_eq!(
        map_to_child(FaceKind::Line, 0, &Point1::new(1.0)).unwrap(),
        map_to_child(FaceKind::Line, 1, &Point1::new(0.0)).unwrap()
    );
}

#[test]
fn quadrilateral_children_cover_the_quadrants() {
    let center = Point2::new(0.5, 0.5);
    assert_eq!(
        map_to_child(FaceKind::Quadrilateral, 0, &center).unwrap(),
        Point2::new(0.25, 0.25)
    );
    assert_eq!(
        map_to_child(FaceKind::Quadrilateral, 1, &center).unwrap(),
        Point2::new(0.75, 0.25)
    );
    assert_eq!(
        map_to_child(FaceKind::Quadrilateral, 2, &center).unwrap(),
        Point2::new(0.25, 0.75)
    );
    assert_eq!(
        map_to_child(FaceKind::Quadrilateral, 3, &center).unwrap(),
        Point2::new(0.75, 0.75)
    );
}

#[test]
fn child_maps_reject_unsupported_shapes_and_bad_indices() {
    assert_eq!(
        map_to_child(FaceKind::Triangle, 0, &Point2::new(0.1, 0.1)).unwrap_err(),
        Error::UnsupportedFaceKind {
            face_kind: FaceKind::Triangle
        }
    );
    assert_eq!(
        map_to_child(FaceKind::Line, 2, &Point1::new(0.5)).unwrap_err(),
        Error::InvalidIndex { index: 2, count: 2 }
    );
}
