//! Benchmarks for parsing and checking.

use apicheck_core::parser::{parse_files_parallel, parse_source, FileInput};
use apicheck_core::vcs::Memory;
use apicheck_core::{BuildTarget, Checker};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SOURCE: &str = r#"package store

import (
	"context"
	"io"
	"time"
)

const DefaultTimeout = 30 * time.Second

var ErrClosed = io.ErrUnexpectedEOF

type Store interface {
	Get(ctx context.Context, key string) ([]byte, error)
	Put(ctx context.Context, key string, value []byte) error
	io.Closer
}

type Options struct {
	Timeout time.Duration
	Retries int
	cache   map[string][]byte
}

type memory struct {
	items map[string][]byte
}

func Open(opts Options) *memory {
	return &memory{items: make(map[string][]byte)}
}

func (m *memory) Get(ctx context.Context, key string) ([]byte, error) {
	return m.items[key], nil
}

func (m *memory) Put(ctx context.Context, key string, value []byte) error {
	m.items[key] = value
	return nil
}

func (m *memory) Close() error { return nil }

func Copy(dst io.Writer, src io.Reader, events chan<- string) (int64, error) {
	return io.Copy(dst, src)
}
"#;

fn revision_files(count: usize, changed: bool) -> Vec<(String, String)> {
    (0..count)
        .map(|i| {
            let mut source = SOURCE.replace("memory", &format!("memory{}", i));
            source = source.replace("func Open(", &format!("func Open{}(", i));
            source = source.replace("func Copy(", &format!("func Copy{}(", i));
            source = source.replace("type Store ", &format!("type Store{} ", i));
            source = source.replace("type Options ", &format!("type Options{} ", i));
            source = source.replace("opts Options", &format!("opts Options{}", i));
            source = source.replace("DefaultTimeout", &format!("DefaultTimeout{}", i));
            source = source.replace("ErrClosed", &format!("ErrClosed{}", i));
            if changed && i % 2 == 0 {
                source = source.replace("src io.Reader", "src io.ReadCloser");
            }
            (format!("file{}.go", i), source)
        })
        .collect()
}

fn bench_parse_file(c: &mut Criterion) {
    c.bench_function("parse_go_file", |b| {
        b.iter(|| parse_source(black_box(SOURCE), "store.go"))
    });
}

fn bench_parse_multiple_files(c: &mut Criterion) {
    let inputs: Vec<FileInput> = revision_files(100, false)
        .into_iter()
        .map(|(path, source)| FileInput::new(path, source))
        .collect();
    c.bench_function("parse_100_files", |b| {
        b.iter(|| parse_files_parallel(black_box(&inputs), None))
    });
}

fn bench_check_revisions(c: &mut Criterion) {
    let mut vcs = Memory::new();
    for (path, source) in revision_files(50, false) {
        vcs.insert("v1", &path, source);
    }
    for (path, source) in revision_files(50, true) {
        vcs.insert("v2", &path, source);
    }
    let checker = Checker::new(vcs).with_target(BuildTarget::new("linux", "amd64"));

    c.bench_function("check_50_files", |b| {
        b.iter(|| checker.check(black_box("."), "v1", "v2"))
    });
}

criterion_group!(
    benches,
    bench_parse_file,
    bench_parse_multiple_files,
    bench_check_revisions
);
criterion_main!(benches);
