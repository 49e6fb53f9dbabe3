//! Orientation descriptors and the permutation groups they select from.
//!
//! When two cells share a face they need not agree on how that face is parametrized: the
//! neighbor may see it reversed, rotated or reflected. Each face shape admits a finite group
//! of such relative orientations — 2 for a line, 6 for a triangle, 8 for a quadrilateral —
//! and every element of the group is a permutation of the face's corners. This module stores
//! those groups as explicit corner-permutation tables, indexed in a fixed canonical order,
//! and realizes the induced point maps by permuting the nodal corner weights from
//! [`crate::embedding`]. Decoding the descriptor booleans happens in exactly one place
//! ([`OrientationDescriptor::index`]); everything downstream works with table indices.
//!
//! The canonical enumeration order — `orientation` bit fastest, then `flip`, then
//! `rotation` — is shared between [`crate::project::project_to_all_faces`] and
//! [`crate::DataSetDescriptor`], and must never change: independent callers rely on it to
//! address the same flat array without coordination.

use crate::embedding::{corner_weights, point_from_corner_weights, MAX_FACE_CORNERS};
use crate::reference_cell::FaceKind;
use crate::Error;
use nalgebra::{Point, RealField};
use serde::{Deserialize, Serialize};

/// Describes the relative orientation of a sub-entity between two parametrizations.
///
/// The variant must match the shape of the sub-entity it is applied to: `Line` for the line
/// faces of two-dimensional cells, `Face` for the triangular or quadrilateral faces of
/// three-dimensional cells, `Vertex` for the vertex "faces" of a line cell. The all-`false`
/// descriptor of each variant is the identity and reproduces the canonical, unpermuted
/// embedding exactly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrientationDescriptor {
    /// The only orientation a vertex admits.
    Vertex,
    /// Orientation of a line sub-entity; `reversed` remaps `t` to `1 - t`.
    Line { reversed: bool },
    /// Orientation of a two-dimensional face of a three-dimensional cell.
    ///
    /// The three booleans select one of up to eight symmetries of the face's parameter
    /// domain: `orientation` swaps the two axes, `flip` reflects the first axis about 1/2,
    /// and `rotation` reflects the second. For triangular faces only the six combinations
    /// without both `flip` and `rotation` set are defined.
    Face {
        orientation: bool,
        flip: bool,
        rotation: bool,
    },
}

const VERTEX_PERMUTATIONS: [[usize; 1]; 1] = [[0]];

const LINE_PERMUTATIONS: [[usize; 2]; 2] = [[0, 1], [1, 0]];

// The 6 elements of the triangle's symmetry group: three rotations of the corners, each
// with and without the reflection that swaps the two axes.
const TRIANGLE_PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [2, 0, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 1, 0],
];

// The 8 elements of the square's symmetry group, generated by the axis swap and the two
// per-axis reflections about 1/2.
const QUADRILATERAL_PERMUTATIONS: [[usize; 4]; 8] = [
    [0, 1, 2, 3],
    [0, 2, 1, 3],
    [1, 0, 3, 2],
    [2, 0, 3, 1],
    [2, 3, 0, 1],
    [1, 3, 0, 2],
    [3, 2, 1, 0],
    [3, 1, 2, 0],
];

impl OrientationDescriptor {
    /// The identity descriptor for the given face shape.
    pub fn identity(kind: FaceKind) -> Self {
        match kind {
            FaceKind::Vertex => Self::Vertex,
            FaceKind::Line => Self::Line { reversed: false },
            FaceKind::Triangle | FaceKind::Quadrilateral => Self::Face {
                orientation: false,
                flip: false,
                rotation: false,
            },
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(
            self,
            Self::Vertex
                | Self::Line { reversed: false }
                | Self::Face {
                    orientation: false,
                    flip: false,
                    rotation: false,
                }
        )
    }

    /// The index of this descriptor in the canonical enumeration for the given face shape.
    ///
    /// The order is fixed: `orientation` bit fastest, then `flip`, then `rotation`. Returns
    /// `Error::InvalidOrientation` if the descriptor variant does not match the shape, or if
    /// the combination is undefined for it (a triangular face with both `flip` and
    /// `rotation` set).
    pub fn index(self, kind: FaceKind) -> Result<usize, Error> {
        let invalid = Error::InvalidOrientation {
            face_kind: kind,
            descriptor: self,
        };
        let index = match (kind, self) {
            (FaceKind::Vertex, Self::Vertex) => 0,
            (FaceKind::Line, Self::Line { reversed }) => reversed as usize,
            (
                FaceKind::Triangle | FaceKind::Quadrilateral,
                Self::Face {
                    orientation,
                    flip,
                    rotation,
                },
            ) => orientation as usize + 2 * flip as usize + 4 * rotation as usize,
            _ => return Err(invalid),
        };
        if index >= kind.num_orientations() {
            return Err(invalid);
        }
        Ok(index)
    }

    /// The inverse of [`Self::index`]: the descriptor at the given position of the
    /// canonical enumeration.
    pub fn from_index(kind: FaceKind, index: usize) -> Result<Self, Error> {
        if index >= kind.num_orientations() {
            return Err(Error::InvalidIndex {
                index,
                count: kind.num_orientations(),
            });
        }
        let descriptor = match kind {
            FaceKind::Vertex => Self::Vertex,
            FaceKind::Line => Self::Line {
                reversed: index == 1,
            },
            FaceKind::Triangle | FaceKind::Quadrilateral => Self::Face {
                orientation: index & 1 != 0,
                flip: index & 2 != 0,
                rotation: index & 4 != 0,
            },
        };
        Ok(descriptor)
    }
}

/// The corner permutation at the given index of the face shape's table.
///
/// Entry `i` is the corner whose weight the permuted point assigns to corner `i`.
pub(crate) fn corner_permutation(kind: FaceKind, index: usize) -> &'static [usize] {
    match kind {
        FaceKind::Vertex => &VERTEX_PERMUTATIONS[index],
        FaceKind::Line => &LINE_PERMUTATIONS[index],
        FaceKind::Triangle => &TRIANGLE_PERMUTATIONS[index],
        FaceKind::Quadrilateral => &QUADRILATERAL_PERMUTATIONS[index],
    }
}

/// Applies the orientation's point map to a face-local parametric point.
///
/// The map is realized through the corner weights: the weights of the input point are
/// permuted by the orientation's corner permutation and the permuted point is reconstructed
/// from them. This keeps the table of valid orientations the single source of truth.
pub fn permute_face_point<T, const M: usize>(
    kind: FaceKind,
    descriptor: OrientationDescriptor,
    point: &Point<T, M>,
) -> Result<Point<T, M>, Error>
where
    T: RealField,
{
    if kind.dim() != M {
        return Err(Error::DimensionMismatch {
            expected: kind.dim(),
            found: M,
        });
    }
    let permutation = corner_permutation(kind, descriptor.index(kind)?);
    let weights = corner_weights(kind, point);
    let mut permuted: [T; MAX_FACE_CORNERS] = [T::zero(), T::zero(), T::zero(), T::zero()];
    for (target, source) in permutation.iter().enumerate() {
        permuted[target] = weights[*source].clone();
    }
    Ok(point_from_corner_weights(kind, &permuted))
}
