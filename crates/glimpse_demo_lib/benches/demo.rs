use criterion::{Criterion, criterion_group, criterion_main};

use glimpse_demo_lib::DemoWindows;

pub fn criterion_benchmark(c: &mut Criterion) {
    let raw_input = egui::RawInput::default();

    {
        let ctx = egui::Context::default();
        let mut demo_windows = DemoWindows::default();

        // The most end-to-end benchmark.
        c.bench_function("demo_with_tessellate", |b| {
            b.iter(|| {
                let full_output = ctx.run(raw_input.clone(), |ctx| {
                    demo_windows.ui(ctx);
                });
                ctx.tessellate(full_output.shapes, full_output.pixels_per_point)
            });
        });
    }

    {
        let ctx = egui::Context::default();
        let mut demo_windows = DemoWindows::default();

        c.bench_function("demo_no_tessellate", |b| {
            b.iter(|| {
                ctx.run(raw_input.clone(), |ctx| {
                    demo_windows.ui(ctx);
                })
            });
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
