#![cfg(feature = "rayon")]

use ncc2d::{CorrelationConfig, Correlator, ImageView, Method, Template};

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 11) ^ (y * 3) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

#[test]
fn parallel_matches_sequential() {
    let (width, height) = (64, 48);
    let image = make_image(width, height);
    let view = ImageView::from_slice(&image, width, height).unwrap();
    let tpl = Template::from_view(view.roi(20, 15, 9, 6).unwrap()).unwrap();

    for method in [Method::Direct, Method::Moments] {
        let seq = Correlator::new(&tpl)
            .unwrap()
            .with_config(CorrelationConfig {
                method,
                parallel: false,
            })
            .correlate(view)
            .unwrap();
        let par = Correlator::new(&tpl)
            .unwrap()
            .with_config(CorrelationConfig {
                method,
                parallel: true,
            })
            .correlate(view)
            .unwrap();

        assert_eq!(seq.data(), par.data());
        assert_eq!(seq.degenerate_patches(), par.degenerate_patches());
    }
}
