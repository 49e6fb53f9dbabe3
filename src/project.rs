//! Projection of lower-dimensional quadrature rules onto cell sub-entities.
//!
//! All routines here take a rule for the sub-entity's *own* reference domain and return an
//! owned rule whose points live in the cell's coordinates. Weights are passed through
//! unchanged for face projections — the input rule is assumed normalized to the reference
//! face's measure, and any Jacobian of the cell-to-physical map is applied by the caller —
//! while line projections scale weights by the length of the target segment.
//!
//! # Block layout of the batch projections
//!
//! [`project_to_all_faces`] concatenates one block of `rule.len()` points per
//! `(face, orientation)` pair: faces in topology order, and for each face every valid
//! orientation in the canonical order of [`OrientationDescriptor::index`] (`orientation`
//! bit fastest, then `flip`, then `rotation`). [`project_to_all_subfaces`] inserts a child
//! loop between the two: per face, per child, per orientation. There are no gaps; the
//! resulting layout is exactly the one [`crate::DataSetDescriptor`] computes offsets for.

use crate::descriptor::{total_face_data_size, total_subface_data_size};
use crate::embedding::{map_to_child, FaceEmbedding, LineEmbedding};
use crate::orientation::{permute_face_point, OrientationDescriptor};
use crate::quadrature::Quadrature;
use crate::reference_cell::ReferenceCellKind;
use crate::Error;
use log::trace;
use nalgebra::{Point, RealField};

/// Projects a 1D rule onto the segment from `start` to `end` in `D`-dimensional cell
/// coordinates.
///
/// Points are mapped by `t -> start + t * (end - start)` and weights are scaled by the
/// Euclidean segment length, so the projected weight sum equals the original weight sum
/// times the segment length. The direction of the segment is implicit in the endpoint
/// order; there is no orientation parameter.
pub fn project_to_line<T, const D: usize>(
    cell: ReferenceCellKind,
    rule: &Quadrature<T, 1>,
    start: &Point<T, D>,
    end: &Point<T, D>,
) -> Result<Quadrature<T, D>, Error>
where
    T: RealField,
{
    if cell.dim() != D {
        return Err(Error::DimensionMismatch {
            expected: cell.dim(),
            found: D,
        });
    }
    let segment = LineEmbedding::new(start.clone(), end.clone());
    let length = segment.length();
    let mut weights = Vec::with_capacity(rule.len());
    let mut points = Vec::with_capacity(rule.len());
    for (weight, point) in rule.iter() {
        weights.push(weight.clone() * length.clone());
        points.push(segment.map(point[0].clone()));
    }
    Ok(Quadrature::from_parts(weights, points))
}

/// Projects a rule for the reference face onto a single face of the cell, under the given
/// orientation.
///
/// Every point is first permuted by the orientation's point map and then embedded into the
/// cell; weights are passed through unchanged. The rule's dimension `M` must be `D - 1`.
pub fn project_to_face<T, const M: usize, const D: usize>(
    cell: ReferenceCellKind,
    rule: &Quadrature<T, M>,
    face_index: usize,
    orientation: OrientationDescriptor,
) -> Result<Quadrature<T, D>, Error>
where
    T: RealField,
{
    check_face_dims::<M, D>(cell)?;
    let embedding = FaceEmbedding::new(cell, face_index)?;
    // Validate eagerly so that an undefined orientation is reported even for empty rules
    orientation.index(embedding.kind())?;
    project_face_block(&embedding, rule, orientation, None)
}

/// Projects a rule onto one child of one face of the cell.
///
/// The orientation permutation acts on the child's own parameter domain before the child
/// map, so the identity descriptor reproduces the plain child embedding and all orientation
/// variants of a block cover the same geometric child patch. Weights are passed through
/// unchanged, consistent with [`project_to_face`].
pub fn project_to_subface<T, const M: usize, const D: usize>(
    cell: ReferenceCellKind,
    rule: &Quadrature<T, M>,
    face_index: usize,
    child_index: usize,
    orientation: OrientationDescriptor,
) -> Result<Quadrature<T, D>, Error>
where
    T: RealField,
{
    check_face_dims::<M, D>(cell)?;
    let embedding = FaceEmbedding::new(cell, face_index)?;
    let kind = embedding.kind();
    orientation.index(kind)?;
    let num_children = kind
        .num_children()
        .ok_or(Error::UnsupportedFaceKind { face_kind: kind })?;
    if child_index >= num_children {
        return Err(Error::InvalidIndex {
            index: child_index,
            count: num_children,
        });
    }
    project_face_block(&embedding, rule, orientation, Some(child_index))
}

/// Projects a rule onto every face of the cell in every valid orientation.
///
/// The output concatenates one block of `rule.len()` points per `(face, orientation)` pair
/// in the canonical enumeration order described in the module documentation. Use
/// [`crate::DataSetDescriptor::face`] to locate a block.
pub fn project_to_all_faces<T, const M: usize, const D: usize>(
    cell: ReferenceCellKind,
    rule: &Quadrature<T, M>,
) -> Result<Quadrature<T, D>, Error>
where
    T: RealField,
{
    check_face_dims::<M, D>(cell)?;
    let total = total_face_data_size(cell, rule.len());
    let mut weights = Vec::with_capacity(total);
    let mut points = Vec::with_capacity(total);
    for face_index in 0..cell.num_faces() {
        let embedding = FaceEmbedding::new(cell, face_index)?;
        for index in 0..embedding.kind().num_orientations() {
            let orientation = OrientationDescriptor::from_index(embedding.kind(), index)?;
            let block = project_face_block(&embedding, rule, orientation, None)?;
            let (block_weights, block_points) = block.into_parts();
            weights.extend(block_weights);
            points.extend(block_points);
        }
    }
    trace!(
        "Projected {} point rule onto all faces of {cell:?}: {} points total",
        rule.len(),
        points.len()
    );
    Ok(Quadrature::from_parts(weights, points))
}

/// Projects a rule onto every child of every face of the cell in every valid orientation.
///
/// Same block discipline as [`project_to_all_faces`], one level deeper: per face, per
/// child, per orientation. Use [`crate::DataSetDescriptor::subface`] to locate a block.
/// Only defined for cell kinds whose faces all have a child subdivision (line and
/// quadrilateral faces).
pub fn project_to_all_subfaces<T, const M: usize, const D: usize>(
    cell: ReferenceCellKind,
    rule: &Quadrature<T, M>,
) -> Result<Quadrature<T, D>, Error>
where
    T: RealField,
{
    check_face_dims::<M, D>(cell)?;
    let total = total_subface_data_size(cell, rule.len())?;
    let mut weights = Vec::with_capacity(total);
    let mut points = Vec::with_capacity(total);
    for face_index in 0..cell.num_faces() {
        let embedding = FaceEmbedding::new(cell, face_index)?;
        let kind = embedding.kind();
        let num_children = kind
            .num_children()
            .ok_or(Error::UnsupportedFaceKind { face_kind: kind })?;
        for child_index in 0..num_children {
            for index in 0..kind.num_orientations() {
                let orientation = OrientationDescriptor::from_index(kind, index)?;
                let block = project_face_block(&embedding, rule, orientation, Some(child_index))?;
                let (block_weights, block_points) = block.into_parts();
                weights.extend(block_weights);
                points.extend(block_points);
            }
        }
    }
    trace!(
        "Projected {} point rule onto all subfaces of {cell:?}: {} points total",
        rule.len(),
        points.len()
    );
    Ok(Quadrature::from_parts(weights, points))
}

/// Permute, optionally restrict to a child, then embed: the single-block work horse shared
/// by the face and subface projections.
fn project_face_block<T, const M: usize, const D: usize>(
    embedding: &FaceEmbedding<T, D>,
    rule: &Quadrature<T, M>,
    orientation: OrientationDescriptor,
    child_index: Option<usize>,
) -> Result<Quadrature<T, D>, Error>
where
    T: RealField,
{
    let mut weights = Vec::with_capacity(rule.len());
    let mut points = Vec::with_capacity(rule.len());
    for (weight, point) in rule.iter() {
        let mut local = permute_face_point(embedding.kind(), orientation, point)?;
        if let Some(child_index) = child_index {
            local = map_to_child(embedding.kind(), child_index, &local)?;
        }
        points.push(embedding.map(&local)?);
        weights.push(weight.clone());
    }
    Ok(Quadrature::from_parts(weights, points))
}

fn check_face_dims<const M: usize, const D: usize>(cell: ReferenceCellKind) -> Result<(), Error> {
    if cell.dim() != D {
        return Err(Error::DimensionMismatch {
            expected: cell.dim(),
            found: D,
        });
    }
    if M + 1 != D {
        return Err(Error::DimensionMismatch {
            expected: D - 1,
            found: M,
        });
    }
    Ok(())
}
