use criterion::{criterion_group, criterion_main, Criterion};
use ncc2d::{CorrelationConfig, Correlator, ImageView, Method, Template};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn bench_correlate(c: &mut Criterion) {
    let img_width = 160;
    let img_height = 120;
    let image = make_image(img_width, img_height);
    let image_view = ImageView::from_slice(&image, img_width, img_height).unwrap();
    let template = Template::from_view(image_view.roi(40, 30, 15, 15).unwrap()).unwrap();

    for (name, method) in [("direct", Method::Direct), ("moments", Method::Moments)] {
        let correlator = Correlator::new(&template)
            .unwrap()
            .with_config(CorrelationConfig {
                method,
                parallel: false,
            });
        c.bench_function(&format!("correlate_{name}_15x15"), |b| {
            b.iter(|| black_box(correlator.correlate(image_view).unwrap()));
        });
    }

    #[cfg(feature = "rayon")]
    {
        let correlator = Correlator::new(&template)
            .unwrap()
            .with_config(CorrelationConfig {
                method: Method::Moments,
                parallel: true,
            });
        c.bench_function("correlate_moments_15x15_parallel", |b| {
            b.iter(|| black_box(correlator.correlate(image_view).unwrap()));
        });
    }
}

criterion_group!(benches, bench_correlate);
criterion_main!(benches);
