use std::hint::black_box;
use bencher::{TestCase, TestFile};
use bytes::BytesMut;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use http::{Method, StatusCode, Uri};
use micro_http_generator::codec::{Generator, Outcome, CHUNK_SIZE};
use micro_http_generator::protocol::{RequestInfo, ResponseInfo};

static SMALL_BODY: TestFile = TestFile::new("small.txt", include_str!("../resources/body/small.txt"));
static LARGE_BODY: TestFile = TestFile::new("large.txt", include_str!("../resources/body/large.txt"));

fn create_test_cases() -> Vec<TestCase> {
    vec![
        TestCase::small("small_body", SMALL_BODY),
        TestCase::small("large_body_small_pieces", LARGE_BODY),
        TestCase::normal("large_body", LARGE_BODY),
        TestCase::large("large_body_large_pieces", LARGE_BODY),
    ]
}

fn response_info() -> ResponseInfo {
    let mut info = ResponseInfo::new(StatusCode::OK);
    info.fields_mut()
        .add("Content-Type", "text/plain; charset=utf-8")
        .add("Cache-Control", "no-cache")
        .add("Date", "Sun, 19 Oct 2026 08:00:00 GMT");
    info
}

fn benchmark_length_response(criterion: &mut Criterion) {
    let test_cases = create_test_cases();
    let mut group = criterion.benchmark_group("length_response");
    let info = response_info();

    for case in test_cases {
        group.throughput(Throughput::Bytes(case.file().content().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &case, |b, case| {
            let mut generator = Generator::new();
            let body = case.file().content().as_bytes();
            b.iter_batched_ref(
                || BytesMut::with_capacity(1024),
                |header| {
                    generator.reset();
                    let outcome = generator.generate_response(Some(&info), Some(header), None, Some(body), true);
                    assert_eq!(outcome, Ok(Outcome::Flush));
                    let outcome = generator.generate_response(None, None, None, None, true);
                    black_box(outcome).expect("message should complete");
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn benchmark_chunked_request(criterion: &mut Criterion) {
    let test_cases = create_test_cases();
    let mut group = criterion.benchmark_group("chunked_request");
    let mut info = RequestInfo::new(Method::POST, Uri::from_static("/upload"));
    info.fields_mut().add("Host", "localhost").add("User-Agent", "bencher");

    for case in test_cases {
        group.throughput(Throughput::Bytes(case.file().content().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name()), &case, |b, case| {
            let mut generator = Generator::new();
            b.iter_batched_ref(
                || (BytesMut::with_capacity(1024), BytesMut::with_capacity(CHUNK_SIZE)),
                |(header, chunk)| {
                    generator.reset();
                    let mut info = Some(&info);
                    for piece in case.pieces() {
                        let outcome = generator.generate_request(info.take(), Some(&mut *header), Some(&mut *chunk), Some(piece), false);
                        assert_eq!(outcome, Ok(Outcome::Flush));
                        black_box((&header, &chunk));
                        header.clear();
                        chunk.clear();
                    }
                    loop {
                        match generator.generate_request(None, None, Some(&mut *chunk), None, true) {
                            Ok(Outcome::Done) => break,
                            Ok(_) => chunk.clear(),
                            Err(e) => panic!("chunked message should complete: {e}"),
                        }
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(generator, benchmark_length_response, benchmark_chunked_request);
criterion_main!(generator);
