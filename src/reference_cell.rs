//! Topology tables for the standard reference cells.
//!
//! Every projection in this crate is driven by the static tables in this module: vertex
//! coordinates per cell kind, the corner indices of each face, and the face shape (which in
//! turn determines the applicable orientation group). The tables are process-wide constants;
//! nothing here is ever computed at run time, which is what makes the block enumeration
//! order of [`crate::project::project_to_all_faces`] and the offsets of
//! [`crate::DataSetDescriptor`] agree across independent callers.
//!
//! Face corner lists are stored in *lexicographic* corner order with respect to the face's
//! own parameter domain: corner `i` of a quadrilateral face corresponds to the reference
//! square corner `(0, 0)`, `(1, 0)`, `(0, 1)`, `(1, 1)` for `i = 0, 1, 2, 3`, and similarly
//! for lines and triangles. [`crate::embedding::FaceEmbedding`] relies on this convention to
//! reproduce cell vertices exactly at face corners.

use crate::Error;
use nalgebra::{Point, RealField, SVector};
use serde::{Deserialize, Serialize};

/// The catalogue of supported reference cells.
///
/// Hypercube kinds use the unit interval/square/cube `[0, 1]^d` with vertices numbered
/// lexicographically (`x` fastest). The schematic below shows the quadrilateral numbering;
/// the hexahedron repeats the same pattern on the `z = 0` and `z = 1` planes.
///
/// ```text
/// 2_________3
/// |         |
/// |         |
/// |         |
/// 0_________1
/// ```
///
/// Simplices are the unit triangle/tetrahedron spanned by the origin and the unit vectors.
/// The wedge is the triangle extruded along `z`, and the pyramid has a `[-1, 1]^2` base at
/// `z = 0` with its apex at `(0, 0, 1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceCellKind {
    Line,
    Triangle,
    Quadrilateral,
    Tetrahedron,
    Pyramid,
    Wedge,
    Hexahedron,
}

/// The shape of a single face of a reference cell.
///
/// The face shape determines the group of orientation variants that two neighboring cells
/// can disagree by: a vertex has one, a line two, a triangle six and a quadrilateral eight.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceKind {
    Vertex,
    Line,
    Triangle,
    Quadrilateral,
}

/// All supported cell kinds, in a fixed order convenient for exhaustive tests.
pub const ALL_CELL_KINDS: [ReferenceCellKind; 7] = [
    ReferenceCellKind::Line,
    ReferenceCellKind::Triangle,
    ReferenceCellKind::Quadrilateral,
    ReferenceCellKind::Tetrahedron,
    ReferenceCellKind::Pyramid,
    ReferenceCellKind::Wedge,
    ReferenceCellKind::Hexahedron,
];

// Vertex coordinates are padded to three components; only the first `dim()` are meaningful.
const LINE_VERTICES: [[f64; 3]; 2] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];

const TRIANGLE_VERTICES: [[f64; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

const QUADRILATERAL_VERTICES: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
];

const TETRAHEDRON_VERTICES: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

const PYRAMID_VERTICES: [[f64; 3]; 5] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

const WEDGE_VERTICES: [[f64; 3]; 6] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
];

const HEXAHEDRON_VERTICES: [[f64; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
];

const LINE_FACES: [&[usize]; 2] = [&[0], &[1]];

const TRIANGLE_FACES: [&[usize]; 3] = [&[0, 1], &[1, 2], &[2, 0]];

// Left, right, bottom, top.
const QUADRILATERAL_FACES: [&[usize]; 4] = [&[0, 2], &[1, 3], &[0, 1], &[2, 3]];

const TETRAHEDRON_FACES: [&[usize]; 4] = [&[0, 1, 2], &[1, 0, 3], &[0, 2, 3], &[2, 1, 3]];

const PYRAMID_FACES: [&[usize]; 5] = [&[0, 1, 2, 3], &[0, 2, 4], &[3, 1, 4], &[1, 0, 4], &[2, 3, 4]];

const WEDGE_FACES: [&[usize]; 5] = [
    &[1, 0, 2],
    &[3, 4, 5],
    &[0, 1, 3, 4],
    &[1, 2, 4, 5],
    &[2, 0, 5, 3],
];

// Face pairs orthogonal to x, then y, then z.
const HEXAHEDRON_FACES: [&[usize]; 6] = [
    &[0, 2, 4, 6],
    &[1, 3, 5, 7],
    &[0, 4, 1, 5],
    &[2, 6, 3, 7],
    &[0, 1, 2, 3],
    &[4, 5, 6, 7],
];

impl ReferenceCellKind {
    /// The dimension of the cell's parameter domain.
    pub fn dim(self) -> usize {
        match self {
            Self::Line => 1,
            Self::Triangle | Self::Quadrilateral => 2,
            Self::Tetrahedron | Self::Pyramid | Self::Wedge | Self::Hexahedron => 3,
        }
    }

    pub fn num_vertices(self) -> usize {
        self.vertex_table().len()
    }

    pub fn num_faces(self) -> usize {
        self.face_table().len()
    }

    /// The coordinates of the given vertex as a `D`-dimensional point.
    ///
    /// `D` must equal [`Self::dim`]; a mismatch is reported as `Error::DimensionMismatch`.
    pub fn vertex<T, const D: usize>(self, vertex_index: usize) -> Result<Point<T, D>, Error>
    where
        T: RealField,
    {
        if self.dim() != D {
            return Err(Error::DimensionMismatch {
                expected: self.dim(),
                found: D,
            });
        }
        let table = self.vertex_table();
        let coords = table.get(vertex_index).ok_or(Error::InvalidIndex {
            index: vertex_index,
            count: table.len(),
        })?;
        Ok(Point::from(SVector::<T, D>::from_fn(|i, _| {
            T::from_f64(coords[i]).expect("Vertex coordinate must fit in T")
        })))
    }

    /// The corner indices of the given face, in lexicographic face-corner order.
    pub fn face_vertices(self, face_index: usize) -> Result<&'static [usize], Error> {
        let table = self.face_table();
        table.get(face_index).copied().ok_or(Error::InvalidIndex {
            index: face_index,
            count: table.len(),
        })
    }

    /// The shape of the given face, derived from the cell kind and the face corner count.
    pub fn face_kind(self, face_index: usize) -> Result<FaceKind, Error> {
        let corners = self.face_vertices(face_index)?.len();
        let kind = match (self.dim(), corners) {
            (1, 1) => FaceKind::Vertex,
            (2, 2) => FaceKind::Line,
            (3, 3) => FaceKind::Triangle,
            (3, 4) => FaceKind::Quadrilateral,
            // The tables above only contain the pairings matched here.
            _ => unreachable!("Inconsistent face table for {self:?}"),
        };
        Ok(kind)
    }

    fn vertex_table(self) -> &'static [[f64; 3]] {
        match self {
            Self::Line => &LINE_VERTICES,
            Self::Triangle => &TRIANGLE_VERTICES,
            Self::Quadrilateral => &QUADRILATERAL_VERTICES,
            Self::Tetrahedron => &TETRAHEDRON_VERTICES,
            Self::Pyramid => &PYRAMID_VERTICES,
            Self::Wedge => &WEDGE_VERTICES,
            Self::Hexahedron => &HEXAHEDRON_VERTICES,
        }
    }

    fn face_table(self) -> &'static [&'static [usize]] {
        match self {
            Self::Line => &LINE_FACES,
            Self::Triangle => &TRIANGLE_FACES,
            Self::Quadrilateral => &QUADRILATERAL_FACES,
            Self::Tetrahedron => &TETRAHEDRON_FACES,
            Self::Pyramid => &PYRAMID_FACES,
            Self::Wedge => &WEDGE_FACES,
            Self::Hexahedron => &HEXAHEDRON_FACES,
        }
    }
}

impl FaceKind {
    /// The dimension of the face's own parameter domain.
    pub fn dim(self) -> usize {
        match self {
            Self::Vertex => 0,
            Self::Line => 1,
            Self::Triangle | Self::Quadrilateral => 2,
        }
    }

    pub fn num_corners(self) -> usize {
        match self {
            Self::Vertex => 1,
            Self::Line => 2,
            Self::Triangle => 3,
            Self::Quadrilateral => 4,
        }
    }

    /// The number of distinct orientation variants two neighbors can disagree by.
    pub fn num_orientations(self) -> usize {
        match self {
            Self::Vertex => 1,
            Self::Line => 2,
            Self::Triangle => 6,
            Self::Quadrilateral => 8,
        }
    }

    /// The number of children the face splits into under isotropic subdivision, if this
    /// crate defines such a subdivision for the shape.
    ///
    /// Lines split into two half-segments and quadrilaterals into a 2x2 grid. Vertices have
    /// no children, and triangle subdivision is not provided here.
    pub fn num_children(self) -> Option<usize> {
        match self {
            Self::Line => Some(2),
            Self::Quadrilateral => Some(4),
            Self::Vertex | Self::Triangle => None,
        }
    }

    /// The coordinates of the given corner in the face's own parameter domain.
    ///
    /// Corners are numbered lexicographically, consistent with the face tables of
    /// [`ReferenceCellKind`].
    pub fn corner<T, const M: usize>(self, corner_index: usize) -> Result<Point<T, M>, Error>
    where
        T: RealField,
    {
        if self.dim() != M {
            return Err(Error::DimensionMismatch {
                expected: self.dim(),
                found: M,
            });
        }
        if corner_index >= self.num_corners() {
            return Err(Error::InvalidIndex {
                index: corner_index,
                count: self.num_corners(),
            });
        }
        let bit = |b: usize| T::from_usize(b).expect("Corner coordinate must fit in T");
        let mut point = Point::origin();
        match self {
            Self::Vertex => {}
            Self::Line => {
                point[0] = bit(corner_index);
            }
            Self::Triangle | Self::Quadrilateral => {
                point[0] = bit(corner_index & 1);
                point[1] = bit(corner_index >> 1);
            }
        }
        Ok(point)
    }
}
