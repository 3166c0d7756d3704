use criterion::{black_box, criterion_group, criterion_main, Criterion};
use slotpak::{PakReader, PakWriter};
use std::io::Cursor;

fn bench_pack_single_file(c: &mut Criterion) {
    let data = vec![42u8; 1024 * 1024];

    c.bench_function("pack_1mb", |b| {
        b.iter(|| {
            let buf = Cursor::new(Vec::new());
            let mut writer = PakWriter::new(buf, 8).unwrap();
            writer.add_file("bench.bin", black_box(&data)).unwrap();
            writer.finalize().unwrap();
        })
    });
}

fn bench_pack_many_small_files(c: &mut Criterion) {
    let data = vec![99u8; 4 * 1024];

    c.bench_function("pack_256_x_4kb", |b| {
        b.iter(|| {
            let buf = Cursor::new(Vec::new());
            let mut writer = PakWriter::new(buf, 256).unwrap();
            for i in 0..256 {
                writer
                    .add_file(&format!("file_{}.bin", i), black_box(&data))
                    .unwrap();
            }
            writer.finalize().unwrap();
        })
    });
}

fn bench_list_traversal(c: &mut Criterion) {
    let mut writer = PakWriter::new(Cursor::new(Vec::new()), 256).unwrap();
    let data = vec![7u8; 4 * 1024];
    for i in 0..256 {
        writer.add_file(&format!("file_{}.bin", i), &data).unwrap();
    }
    writer.finalize().unwrap();
    let bytes = writer.into_inner().into_inner();

    c.bench_function("list_256_entries", |b| {
        b.iter(|| {
            let mut reader = PakReader::new(Cursor::new(black_box(&bytes))).unwrap();
            reader.names().unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_pack_single_file,
    bench_pack_many_small_files,
    bench_list_traversal
);
criterion_main!(benches);
