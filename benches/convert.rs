use criterion::{criterion_group, criterion_main, Criterion};
use kml2geojson::convert;
use kml2geojson::output::Output;
use std::fs;
use std::io::{Result, Write};

struct MockWriter;

impl Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        Ok(buf.len())
    }
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

pub fn convert_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("network");
    let kml = fs::read("./tests/data/network.kml").unwrap();
    group.bench_function("convert", |b| {
        b.iter(|| {
            let features = convert(kml.as_slice()).unwrap();
            let mut writer = MockWriter;
            features.write_geojson(&mut writer).unwrap();
        })
    });
    group.finish();
}

criterion_group!(benches, convert_bench);
criterion_main!(benches);
