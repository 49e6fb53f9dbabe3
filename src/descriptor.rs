//! Offset arithmetic for the concatenated rules produced by the batch projections.
//!
//! [`crate::project::project_to_all_faces`] and
//! [`crate::project::project_to_all_subfaces`] emit one contiguous block of points per
//! `(face, orientation)` pair respectively `(face, child, orientation)` triple, in a fixed
//! enumeration order. This module recomputes the starting position of any such block from
//! nothing but the cell kind, the indices and the per-face rule size. Because the
//! computation is a pure function over the same static topology tables the projection uses,
//! two independent callers — a cell and its neighbor addressing a shared face, possibly on
//! different threads — always arrive at the same offset without any shared state.

use crate::orientation::OrientationDescriptor;
use crate::reference_cell::ReferenceCellKind;
use crate::Error;

/// The position of one block inside a concatenated projection result.
///
/// A descriptor is a computed value, never persisted; obtain one through [`Self::face`] or
/// [`Self::subface`] and add [`Self::offset`] to the index of a point within the block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DataSetDescriptor {
    offset: usize,
}

impl DataSetDescriptor {
    /// The offset of the `(face, orientation)` block inside the output of
    /// [`crate::project::project_to_all_faces`], for a rule with `num_points` points.
    ///
    /// The offset is the sum of the block sizes of all `(face, orientation)` pairs that
    /// precede the requested one in the canonical enumeration order: faces in topology
    /// order, orientations in the order of [`OrientationDescriptor::index`]. For cell kinds
    /// whose faces all share one shape this reduces to a multiple of `num_points`; for
    /// mixed-shape cells such as the wedge it is a running sum over the differing
    /// orientation counts.
    pub fn face(
        cell: ReferenceCellKind,
        face_index: usize,
        orientation: OrientationDescriptor,
        num_points: usize,
    ) -> Result<Self, Error> {
        let kind = cell.face_kind(face_index)?;
        let orientation_index = orientation.index(kind)?;
        let mut blocks = 0;
        for preceding in 0..face_index {
            blocks += cell
                .face_kind(preceding)
                .expect("Face index is in bounds")
                .num_orientations();
        }
        blocks += orientation_index;
        Ok(Self {
            offset: blocks * num_points,
        })
    }

    /// The offset of the `(face, child, orientation)` block inside the output of
    /// [`crate::project::project_to_all_subfaces`].
    ///
    /// Within each face, children are enumerated in their canonical order with all
    /// orientations of one child preceding the next child. Cell kinds whose faces have no
    /// child subdivision are rejected with `Error::UnsupportedFaceKind`.
    pub fn subface(
        cell: ReferenceCellKind,
        face_index: usize,
        child_index: usize,
        orientation: OrientationDescriptor,
        num_points: usize,
    ) -> Result<Self, Error> {
        let kind = cell.face_kind(face_index)?;
        let num_children = kind
            .num_children()
            .ok_or(Error::UnsupportedFaceKind { face_kind: kind })?;
        if child_index >= num_children {
            return Err(Error::InvalidIndex {
                index: child_index,
                count: num_children,
            });
        }
        let orientation_index = orientation.index(kind)?;
        let mut blocks = 0;
        for preceding in 0..face_index {
            let preceding_kind = cell.face_kind(preceding).expect("Face index is in bounds");
            let children = preceding_kind
                .num_children()
                .ok_or(Error::UnsupportedFaceKind {
                    face_kind: preceding_kind,
                })?;
            blocks += children * preceding_kind.num_orientations();
        }
        blocks += child_index * kind.num_orientations() + orientation_index;
        Ok(Self {
            offset: blocks * num_points,
        })
    }

    /// The starting index of the block inside the flat concatenated point sequence.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl From<DataSetDescriptor> for usize {
    fn from(descriptor: DataSetDescriptor) -> usize {
        descriptor.offset
    }
}

/// The total number of points [`crate::project::project_to_all_faces`] produces for the
/// given cell kind and per-face rule size.
pub fn total_face_data_size(cell: ReferenceCellKind, num_points: usize) -> usize {
    let blocks: usize = (0..cell.num_faces())
        .map(|face| {
            cell.face_kind(face)
                .expect("Face index is in bounds")
                .num_orientations()
        })
        .sum();
    blocks * num_points
}

/// The total number of points [`crate::project::project_to_all_subfaces`] produces, if
/// subface projection is defined for the cell kind.
pub fn total_subface_data_size(cell: ReferenceCellKind, num_points: usize) -> Result<usize, Error> {
    let mut blocks = 0;
    for face in 0..cell.num_faces() {
        let kind = cell.face_kind(face).expect("Face index is in bounds");
        let children = kind
            .num_children()
            .ok_or(Error::UnsupportedFaceKind { face_kind: kind })?;
        blocks += children * kind.num_orientations();
    }
    Ok(blocks * num_points)
}
