use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stacklog::log::{Args, LogFormatter, LogLevel, LogRecord, TextFormatter, TextFormatterConfig, Value};

fn benchmark_formatter(c: &mut Criterion) {
    let formatter_default = TextFormatter::new(TextFormatterConfig::default());
    let formatter_no_time = TextFormatter::with_template("#{id} [{level}] {name}: {message}");

    // 基础记录
    let basic_record = LogRecord::new(1, "bench", LogLevel::Info, "This is a test message", None);

    // printf 模板记录
    let printf_record = LogRecord::new(
        2,
        "bench",
        LogLevel::Error,
        Args::from(vec![Value::from("users"), Value::from(1500), Value::from(0.25)]),
        Some("query %s failed after %dms (%.2f%% of budget)".to_string()),
    );

    // 长消息记录
    let long_record = LogRecord::new(3, "bench", LogLevel::Warning, "A".repeat(1000), None);

    let mut group = c.benchmark_group("formatter");

    // Baseline: 什么都不做的基准测试
    group.bench_function("baseline", |b| {
        b.iter(|| {
            black_box(());
        })
    });

    let cases: [(&str, &LogRecord); 3] = [
        ("basic", &basic_record),
        ("printf", &printf_record),
        ("long_message", &long_record),
    ];

    for (name, record) in cases {
        group.bench_with_input(
            BenchmarkId::new("default_template", name),
            record,
            |b, record: &LogRecord| b.iter(|| black_box(formatter_default.format(black_box(record)).unwrap())),
        );

        group.bench_with_input(
            BenchmarkId::new("no_time", name),
            record,
            |b, record: &LogRecord| b.iter(|| black_box(formatter_no_time.format(black_box(record)).unwrap())),
        );
    }

    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    // 每次新建记录，测量未缓存的渲染开销
    group.bench_function("join", |b| {
        b.iter(|| {
            let record = LogRecord::new(
                1,
                "bench",
                LogLevel::Info,
                Args::from(vec![Value::from("user"), Value::from(42), Value::from(true)]),
                None,
            );
            black_box(record.render().len())
        })
    });

    group.bench_function("printf", |b| {
        b.iter(|| {
            let record = LogRecord::new(
                1,
                "bench",
                LogLevel::Info,
                Args::from(vec![Value::from("user"), Value::from(42), Value::from(3.5)]),
                Some("%-8s|%05d|%8.3f".to_string()),
            );
            black_box(record.render().len())
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_formatter, benchmark_render);
criterion_main!(benches);
