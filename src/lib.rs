//! Projection of quadrature rules onto the sub-entities of finite element reference cells.
//!
//! Integrals over the faces and edges of a cell are usually evaluated by taking a quadrature
//! rule for the *lower-dimensional* reference shape — the unit interval, triangle or square —
//! and re-expressing its points in the coordinate system of the cell itself. This crate
//! implements that re-expression for the standard reference cells (line, triangle,
//! quadrilateral, tetrahedron, pyramid, wedge, hexahedron), including the geometric
//! *orientations* that arise when two cells sharing a face disagree on how that face is
//! parametrized.
//!
//! The central operations are found in the [`project`] module:
//!
//! - [`project::project_to_line`] maps a 1D rule onto an arbitrary segment, scaling weights
//!   by the segment length.
//! - [`project::project_to_face`] maps a rule for the reference face onto a single face of a
//!   cell, under a chosen [`OrientationDescriptor`].
//! - [`project::project_to_all_faces`] concatenates the projections for *every* face and
//!   *every* valid orientation into one flat rule, whose blocks are addressable through
//!   [`DataSetDescriptor`] without any shared state between producer and consumer.
//! - [`project::project_to_subface`] and [`project::project_to_all_subfaces`] do the same one
//!   refinement level down, for the children of line and quadrilateral faces.
//!
//! All operations are pure functions of their inputs: no caches, no interior mutability.
//! Two threads that ask for the offset of the same `(face, orientation)` block therefore
//! always agree, which is what allows a cell and its neighbor to address a shared face in the
//! same concatenated array without a handshake.

use std::fmt;
use std::fmt::{Display, Formatter};

pub mod descriptor;
pub mod embedding;
pub mod orientation;
pub mod project;
pub mod quadrature;
pub mod reference_cell;

pub use descriptor::DataSetDescriptor;
pub use orientation::OrientationDescriptor;
pub use quadrature::Quadrature;
pub use reference_cell::{FaceKind, ReferenceCellKind};

/// Library-wide error type.
///
/// Every variant describes a precondition violation that is detected before any computation
/// takes place. There are no transient error conditions in this crate, so callers should
/// treat any of these as a programming error rather than something to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The dimension of an input rule or output point type does not match the cell kind.
    DimensionMismatch { expected: usize, found: usize },
    /// A face, vertex or child index is out of range for the cell kind.
    InvalidIndex { index: usize, count: usize },
    /// The orientation descriptor is undefined for the given face shape.
    InvalidOrientation {
        face_kind: FaceKind,
        descriptor: OrientationDescriptor,
    },
    /// The requested operation is not defined for faces of this shape.
    UnsupportedFaceKind { face_kind: FaceKind },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, found } => {
                write!(f, "Dimension mismatch: expected {expected}, found {found}")
            }
            Self::InvalidIndex { index, count } => {
                write!(f, "Index {index} is out of range for an entity count of {count}")
            }
            Self::InvalidOrientation {
                face_kind,
                descriptor,
            } => {
                write!(
                    f,
                    "Orientation descriptor {descriptor:?} is undefined for a face of kind {face_kind:?}"
                )
            }
            Self::UnsupportedFaceKind { face_kind } => {
                write!(
                    f,
                    "The requested operation is not defined for faces of kind {face_kind:?}"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
