//! Embeddings of face and line parameter domains into their parent cell.
//!
//! An embedding takes a point expressed in a sub-entity's own parameter domain — the unit
//! interval for a line, the unit triangle or square for a face — and produces the
//! corresponding point in the cell's `D`-dimensional coordinates. All embeddings here are
//! nodal interpolations of the sub-entity's corner coordinates: the local point induces a
//! set of barycentric/bilinear *corner weights*, and the embedded point is the weighted sum
//! of the corners. Evaluating at a corner of the parameter domain therefore reproduces the
//! cell vertex exactly, with no interpolation error.

use crate::reference_cell::{FaceKind, ReferenceCellKind};
use crate::Error;
use nalgebra::{distance, Point, RealField, SVector, Scalar};
use numeric_literals::replace_float_literals;

pub(crate) const MAX_FACE_CORNERS: usize = 4;

/// The nodal interpolation weights a local parametric point induces on a face's corners.
///
/// Only the first `kind.num_corners()` entries are meaningful; the rest are zero. The
/// weights are constant for a vertex, linear along a line, barycentric on a triangle and
/// bilinear on a quadrilateral. Callers must ensure `M == kind.dim()`.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub(crate) fn corner_weights<T, const M: usize>(kind: FaceKind, point: &Point<T, M>) -> [T; MAX_FACE_CORNERS]
where
    T: RealField,
{
    let mut weights = [T::zero(), T::zero(), T::zero(), T::zero()];
    match kind {
        FaceKind::Vertex => {
            weights[0] = 1.0;
        }
        FaceKind::Line => {
            let t = point[0].clone();
            weights[0] = 1.0 - t.clone();
            weights[1] = t;
        }
        FaceKind::Triangle => {
            let u = point[0].clone();
            let v = point[1].clone();
            weights[0] = 1.0 - u.clone() - v.clone();
            weights[1] = u;
            weights[2] = v;
        }
        FaceKind::Quadrilateral => {
            let u = point[0].clone();
            let v = point[1].clone();
            weights[0] = (1.0 - u.clone()) * (1.0 - v.clone());
            weights[1] = u.clone() * (1.0 - v.clone());
            weights[2] = (1.0 - u.clone()) * v.clone();
            weights[3] = u * v;
        }
    }
    weights
}

/// Reconstructs the local parametric point from its corner weights.
///
/// This is the inverse of [`corner_weights`] for weights that actually arise from a point,
/// and is what turns a permutation of corner weights back into a permuted point. Callers
/// must ensure `M == kind.dim()`.
pub(crate) fn point_from_corner_weights<T, const M: usize>(
    kind: FaceKind,
    weights: &[T; MAX_FACE_CORNERS],
) -> Point<T, M>
where
    T: RealField,
{
    let mut point = Point::origin();
    match kind {
        FaceKind::Vertex => {}
        FaceKind::Line => {
            point[0] = weights[1].clone();
        }
        FaceKind::Triangle => {
            point[0] = weights[1].clone();
            point[1] = weights[2].clone();
        }
        FaceKind::Quadrilateral => {
            point[0] = weights[1].clone() + weights[3].clone();
            point[1] = weights[2].clone() + weights[3].clone();
        }
    }
    point
}

/// The interpolation map from a face's parameter domain into cell coordinates.
///
/// The map is linear for line and triangle faces and bilinear for quadrilateral faces. Its
/// corner coordinates come straight from the cell kind's topology tables, so evaluating at
/// a parameter-domain corner reproduces the corresponding cell vertex exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceEmbedding<T: Scalar, const D: usize> {
    kind: FaceKind,
    corners: [Point<T, D>; MAX_FACE_CORNERS],
}

impl<T, const D: usize> FaceEmbedding<T, D>
where
    T: RealField,
{
    /// Constructs the embedding for the given face of the given cell kind.
    pub fn new(cell: ReferenceCellKind, face_index: usize) -> Result<Self, Error> {
        if cell.dim() != D {
            return Err(Error::DimensionMismatch {
                expected: cell.dim(),
                found: D,
            });
        }
        let kind = cell.face_kind(face_index)?;
        let mut corners = std::array::from_fn(|_| Point::origin());
        for (corner, vertex_index) in corners.iter_mut().zip(cell.face_vertices(face_index)?) {
            *corner = cell.vertex(*vertex_index)?;
        }
        Ok(Self { kind, corners })
    }

    pub fn kind(&self) -> FaceKind {
        self.kind
    }

    /// Maps a face-local parametric point into cell coordinates.
    pub fn map<const M: usize>(&self, local: &Point<T, M>) -> Result<Point<T, D>, Error> {
        if self.kind.dim() != M {
            return Err(Error::DimensionMismatch {
                expected: self.kind.dim(),
                found: M,
            });
        }
        let weights = corner_weights(self.kind, local);
        let mut coords = SVector::<T, D>::zeros();
        for (corner, weight) in self.corners.iter().zip(&weights).take(self.kind.num_corners()) {
            coords += corner.coords.clone() * weight.clone();
        }
        Ok(Point::from(coords))
    }
}

/// The affine map of the unit interval onto an arbitrary segment in `D` dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct LineEmbedding<T: Scalar, const D: usize> {
    start: Point<T, D>,
    end: Point<T, D>,
}

impl<T, const D: usize> LineEmbedding<T, D>
where
    T: RealField,
{
    pub fn new(start: Point<T, D>, end: Point<T, D>) -> Self {
        Self { start, end }
    }

    /// Maps `t` to `start + t * (end - start)`.
    pub fn map(&self, t: T) -> Point<T, D> {
        let direction = &self.end.coords - &self.start.coords;
        Point::from(&self.start.coords + direction * t)
    }

    /// The Euclidean length of the segment.
    pub fn length(&self) -> T {
        distance(&self.start, &self.end)
    }
}

/// Maps a point from a child's parameter domain into the parent face's parameter domain.
///
/// Lines split into the children `[0, 1/2]`, `[1/2, 1]`, quadrilaterals into a row-major
/// 2x2 grid of quadrants. Shapes without a child subdivision are rejected with
/// `Error::UnsupportedFaceKind`.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn map_to_child<T, const M: usize>(
    kind: FaceKind,
    child_index: usize,
    local: &Point<T, M>,
) -> Result<Point<T, M>, Error>
where
    T: RealField,
{
    let num_children = kind
        .num_children()
        .ok_or(Error::UnsupportedFaceKind { face_kind: kind })?;
    if child_index >= num_children {
        return Err(Error::InvalidIndex {
            index: child_index,
            count: num_children,
        });
    }
    if kind.dim() != M {
        return Err(Error::DimensionMismatch {
            expected: kind.dim(),
            found: M,
        });
    }
    let offset = |index: usize| T::from_usize(index).expect("Child index must fit in T");
    let mut point = local.clone();
    match kind {
        FaceKind::Line => {
            point[0] = (local[0].clone() + offset(child_index)) * 0.5;
        }
        FaceKind::Quadrilateral => {
            point[0] = (local[0].clone() + offset(child_index % 2)) * 0.5;
            point[1] = (local[1].clone() + offset(child_index / 2)) * 0.5;
        }
        // num_children() above has already ruled these out
        FaceKind::Vertex | FaceKind::Triangle => unreachable!(),
    }
    Ok(point)
}
