use ncc2d::{
    compute_padding, Correlator, ImageView, NccError, OwnedImage, Padding, ResponseMap, Template,
};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        NccError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        NccError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        NccError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u8; 3];

    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, NccError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn image_view_roi_matches_expected_values() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = ImageView::from_slice(&data, 4, 4).unwrap();

    let roi = view.roi(1, 1, 2, 2).unwrap();
    assert_eq!(roi.width(), 2);
    assert_eq!(roi.height(), 2);
    assert_eq!(roi.stride(), 4);
    assert_eq!(roi.row(0).unwrap(), &[5u8, 6u8]);
    assert_eq!(roi.row(1).unwrap(), &[9u8, 10u8]);
    assert_eq!(roi.get(0, 0).copied(), Some(5u8));
    assert!(roi.get(2, 0).is_none());
    assert_eq!(roi.to_vec(), vec![5, 6, 9, 10]);
}

#[test]
fn owned_image_round_trips_through_view() {
    let data: Vec<u8> = (0u8..6).collect();
    let img = OwnedImage::new(data.clone(), 3, 2).unwrap();
    let copy = OwnedImage::from_view(img.view()).unwrap();
    assert_eq!(copy, img);
    assert_eq!(copy.data(), data.as_slice());

    let err = OwnedImage::new(vec![0u8; 5], 3, 2).unwrap_err();
    assert_eq!(err, NccError::BufferTooSmall { needed: 6, got: 5 });
}

#[test]
fn template_from_view_copies_strided_rows() {
    let data = [1u8, 2, 0, 3, 4, 0];
    let view = ImageView::new(&data, 2, 2, 3).unwrap();
    let tpl = Template::from_view(view).unwrap();
    assert_eq!((tpl.width(), tpl.height()), (2, 2));
    assert_eq!(tpl.view().as_slice(), &[1, 2, 3, 4]);
}

#[test]
fn padding_examples() {
    assert_eq!(
        compute_padding(5).unwrap(),
        Padding {
            before: 2,
            after: 2
        }
    );
    assert_eq!(
        compute_padding(4).unwrap(),
        Padding {
            before: 2,
            after: 1
        }
    );
}

#[test]
fn correlator_pads_each_axis_independently() {
    let tpl = Template::new((0u8..12).collect(), 4, 3).unwrap();
    let correlator = Correlator::new(&tpl).unwrap();
    let (pad_h, pad_w) = correlator.padding();
    assert_eq!(pad_h, Padding { before: 1, after: 1 });
    assert_eq!(pad_w, Padding { before: 2, after: 1 });
}

#[test]
fn template_plan_matches_known_stats() {
    let tpl = Template::new(vec![0u8, 1, 2, 3], 2, 2).unwrap();
    let correlator = Correlator::new(&tpl).unwrap();
    let plan = correlator.plan();

    assert_eq!(plan.width(), 2);
    assert_eq!(plan.height(), 2);
    assert!((plan.mean() - 1.5).abs() < 1e-12);
    assert!((plan.norm() - 5.0f64.sqrt()).abs() < 1e-12);
    assert!(!plan.is_degenerate());

    let norm = 5.0f64.sqrt();
    let expected = [-1.5 / norm, -0.5 / norm, 0.5 / norm, 1.5 / norm];
    for (value, expected) in plan.standardized().iter().zip(expected) {
        assert!((value - expected).abs() < 1e-12);
    }
}

#[test]
fn constant_template_plan_is_degenerate() {
    let tpl = Template::new(vec![5u8; 4], 2, 2).unwrap();
    let correlator = Correlator::new(&tpl).unwrap();
    assert!(correlator.plan().is_degenerate());
    assert_eq!(correlator.plan().standardized(), &[0.0; 4]);
}

#[test]
fn response_map_rejects_mismatched_buffer() {
    let err = ResponseMap::new(vec![0.0; 5], 3, 2).unwrap_err();
    assert_eq!(err, NccError::BufferTooSmall { needed: 6, got: 5 });
    assert!(ResponseMap::new(Vec::new(), 0, 0).is_err());
}
