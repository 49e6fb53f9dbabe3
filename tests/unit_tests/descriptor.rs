use proptest::prelude::*;
use quadproject::descriptor::{total_face_data_size, total_subface_data_size};
use quadproject::reference_cell::ALL_CELL_KINDS;
use quadproject::{DataSetDescriptor, Error, FaceKind, OrientationDescriptor, ReferenceCellKind};

#[test]
fn wedge_offsets_run_over_mixed_face_shapes() {
    // The wedge has two triangular faces (6 orientation variants each) followed by three
    // quadrilateral ones (8 variants each), so offsets are a running sum, not a multiple of
    // a single stride.
    let cell = ReferenceCellKind::Wedge;
    let nqs = 3;
    let tri_identity = OrientationDescriptor::identity(FaceKind::Triangle);
    let quad_identity = OrientationDescriptor::identity(FaceKind::Quadrilateral);

    let offset = |face, orientation| {
        DataSetDescriptor::face(cell, face, orientation, nqs)
            .unwrap()
            .offset()
    };
    assert_eq!(offset(0, tri_identity), 0);
    assert_eq!(offset(1, tri_identity), 6 * nqs);
    assert_eq!(offset(2, quad_identity), 12 * nqs);
    assert_eq!(offset(3, quad_identity), 20 * nqs);
    assert_eq!(offset(4, quad_identity), 28 * nqs);
    assert_eq!(total_face_data_size(cell, nqs), 36 * nqs);
}

#[test]
fn offsets_agree_across_threads() {
    // Two neighbors addressing a shared face compute the same offset with no shared state.
    let cell = ReferenceCellKind::Hexahedron;
    let orientation = OrientationDescriptor::Face {
        orientation: true,
        flip: false,
        rotation: true,
    };
    let offsets: Vec<usize> = (0..4)
        .map(|_| {
            std::thread::spawn(move || {
                DataSetDescriptor::face(cell, 3, orientation, 7).unwrap().offset()
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    assert!(offsets.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn descriptor_converts_to_usize() {
    let descriptor = DataSetDescriptor::face(
        ReferenceCellKind::Quadrilateral,
        1,
        OrientationDescriptor::Line { reversed: false },
        5,
    )
    .unwrap();
    assert_eq!(usize::from(descriptor), descriptor.offset());
    assert_eq!(descriptor.offset(), 2 * 5);
}

#[test]
fn face_offsets_reject_invalid_arguments() {
    let identity = OrientationDescriptor::identity(FaceKind::Quadrilateral);
    assert_eq!(
        DataSetDescriptor::face(ReferenceCellKind::Hexahedron, 6, identity, 1).unwrap_err(),
        Error::InvalidIndex { index: 6, count: 6 }
    );
    assert!(matches!(
        DataSetDescriptor::face(
            ReferenceCellKind::Tetrahedron,
            0,
            OrientationDescriptor::Line { reversed: true },
            1
        ),
        Err(Error::InvalidOrientation { .. })
    ));
}

#[test]
fn subface_offsets_reject_unsupported_cells() {
    let identity = OrientationDescriptor::identity(FaceKind::Triangle);
    assert!(matches!(
        DataSetDescriptor::subface(ReferenceCellKind::Tetrahedron, 0, 0, identity, 1),
        Err(Error::UnsupportedFaceKind {
            face_kind: FaceKind::Triangle
        })
    ));
    assert!(matches!(
        total_subface_data_size(ReferenceCellKind::Wedge, 1),
        Err(Error::UnsupportedFaceKind { .. })
    ));
}

proptest! {
    /// Enumerating all (face, orientation) pairs in canonical order yields consecutive
    /// disjoint ranges that exactly cover the concatenated array, for every cell kind and
    /// any rule size.
    #[test]
    fn face_offsets_partition_the_concatenated_array(
        kind_index in 0..ALL_CELL_KINDS.len(),
        nqs in 0usize..8,
    ) {
        let cell = ALL_CELL_KINDS[kind_index];
        let mut expected = 0;
        for face_index in 0..cell.num_faces() {
            let kind = cell.face_kind(face_index).unwrap();
            for index in 0..kind.num_orientations() {
                let orientation = OrientationDescriptor::from_index(kind, index).unwrap();
                let descriptor = DataSetDescriptor::face(cell, face_index, orientation, nqs).unwrap();
                prop_assert_eq!(descriptor.offset(), expected);
                expected += nqs;
            }
        }
        prop_assert_eq!(expected, total_face_data_size(cell, nqs));
    }

    /// Same property one level deeper, for the cell kinds that support subfaces.
    #[test]
    fn subface_offsets_partition_the_concatenated_array(
        kind_index in 0..3usize,
        nqs in 0usize..8,
    ) {
        let cell = [
            ReferenceCellKind::Triangle,
            ReferenceCellKind::Quadrilateral,
            ReferenceCellKind::Hexahedron,
        ][kind_index];
        let mut expected = 0;
        for face_index in 0..cell.num_faces() {
            let kind = cell.face_kind(face_index).unwrap();
            for child_index in 0..kind.num_children().unwrap() {
                for index in 0..kind.num_orientations() {
                    let orientation = OrientationDescriptor::from_index(kind, index).unwrap();
                    let descriptor =
                        DataSetDescriptor::subface(cell, face_index, child_index, orientation, nqs)
                            .unwrap();
                    prop_assert_eq!(descriptor.offset(), expected);
                    expected += nqs;
                }
            }
        }
        prop_assert_eq!(expected, total_subface_data_size(cell, nqs).unwrap());
    }

    /// Repeated evaluation is deterministic: the offset is a pure function of its inputs.
    #[test]
    fn face_offsets_are_referentially_transparent(
        kind_index in 0..ALL_CELL_KINDS.len(),
        nqs in 1usize..16,
    ) {
        let cell = ALL_CELL_KINDS[kind_index];
        for face_index in 0..cell.num_faces() {
            let kind = cell.face_kind(face_index).unwrap();
            for index in 0..kind.num_orientations() {
                let orientation = OrientationDescriptor::from_index(kind, index).unwrap();
                let first = DataSetDescriptor::face(cell, face_index, orientation, nqs).unwrap();
                let second = DataSetDescriptor::face(cell, face_index, orientation, nqs).unwrap();
                prop_assert_eq!(first, second);
            }
        }
    }
}
