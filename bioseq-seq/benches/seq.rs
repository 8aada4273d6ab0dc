use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use bioseq::{DnaSequence, FastqReader, GeneticCode};

fn random_dna(len: usize) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut state: u64 = 42;
    for _ in 0..len {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        seq.push(bases[((state >> 33) % 4) as usize]);
    }
    seq
}

fn make_fastq(n_records: usize, read_len: usize) -> String {
    let mut text = String::with_capacity(n_records * (2 * read_len + 16));
    for i in 0..n_records {
        let seq = random_dna(read_len + i % 7);
        text.push_str(&format!("@read_{i} 1:N:0:ATCACG\n"));
        text.push_str(std::str::from_utf8(&seq).unwrap());
        text.push_str("\n+\n");
        text.push_str(&"I".repeat(seq.len()));
        text.push('\n');
    }
    text
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    for len in [1_000, 100_000] {
        let raw = random_dna(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &raw, |b, raw| {
            b.iter(|| DnaSequence::new(black_box(raw)).unwrap())
        });
    }
    group.finish();
}

fn bench_reverse_complement(c: &mut Criterion) {
    let mut group = c.benchmark_group("reverse_complement");
    for len in [1_000, 100_000] {
        let seq = DnaSequence::new(random_dna(len)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(len), &seq, |b, seq| {
            b.iter(|| black_box(seq).reverse_complement().unwrap())
        });
    }
    group.finish();
}

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate");
    let table = GeneticCode::standard();
    for len in [999, 99_999] {
        let seq = DnaSequence::new(random_dna(len)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(len), &seq, |b, seq| {
            b.iter(|| black_box(seq).translate(table, b'*').unwrap())
        });
    }
    group.finish();
}

fn bench_fastq_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("fastq_read");
    let text = make_fastq(10_000, 150);
    group.bench_function("10k_x_150bp", |b| {
        b.iter(|| {
            FastqReader::new(black_box(text.as_bytes()), |s| DnaSequence::new(s))
                .read(0)
                .unwrap()
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_validation,
    bench_reverse_complement,
    bench_translate,
    bench_fastq_read
);
criterion_main!(benches);
