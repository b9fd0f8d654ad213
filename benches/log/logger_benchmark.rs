use anyhow::Result;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stacklog::log::{
    ConsoleHandler, ConsoleHandlerConfig, LogHandler, LogLevel, LogRecord, Logger, TextFormatter,
};
use stacklog::{LogFormatter, TypeOptions};
use std::io;
use std::sync::Arc;

/// 丢弃输出的处理器，只测量分发开销
struct NullHandler {
    level: LogLevel,
    formatter: Option<TextFormatter>,
}

impl LogHandler for NullHandler {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn handle(&self, record: &LogRecord) -> Result<()> {
        black_box(record.message());
        Ok(())
    }

    fn formatter(&self) -> Option<&dyn LogFormatter> {
        self.formatter.as_ref().map(|f| f as &dyn LogFormatter)
    }
}

/// 创建 benchmark 用的 logger，处理器输出到 io::sink
fn create_benchmark_logger(disable_color: bool, formatter: Option<TypeOptions>) -> Logger {
    let logger = Logger::new("bench");
    let config = ConsoleHandlerConfig {
        level: LogLevel::Debug,
        disable_color,
        formatter,
        ..Default::default()
    };
    logger.push_handler(Arc::new(ConsoleHandler::with_writer(config, io::sink()).unwrap()));
    logger
}

fn benchmark_basic_logging(c: &mut Criterion) {
    let logger_plain = create_benchmark_logger(true, None);
    let logger_colored = create_benchmark_logger(false, None);
    let logger_formatted = create_benchmark_logger(true, Some(TypeOptions::of("TextFormatter")));

    let mut group = c.benchmark_group("logger_basic");

    group.bench_function("plain", |b| {
        b.iter(|| black_box(logger_plain.info(black_box("Simple log message"))))
    });

    group.bench_function("colored", |b| {
        b.iter(|| black_box(logger_colored.info(black_box("Simple log message"))))
    });

    group.bench_function("formatted", |b| {
        b.iter(|| black_box(logger_formatted.info(black_box("Simple log message"))))
    });

    group.bench_function("printf", |b| {
        b.iter(|| {
            black_box(logger_plain.infof(
                black_box("user %s logged in from %s"),
                stacklog::args!["alice", "10.0.0.1"],
            ))
        })
    });

    group.finish();
}

fn benchmark_handler_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("handler_stack");

    for depth in [1usize, 4, 16] {
        let logger = Logger::new("bench");
        for i in 0..depth {
            logger.push_handler(Arc::new(NullHandler {
                level: LogLevel::Debug,
                formatter: (i % 2 == 1).then(|| TextFormatter::with_template("{level} {message}")),
            }));
        }

        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &logger, |b, logger| {
            b.iter(|| black_box(logger.warning(black_box("stacked"))))
        });
    }

    group.finish();
}

fn benchmark_filtered(c: &mut Criterion) {
    let logger = Logger::new("bench");
    logger.push_handler(Arc::new(NullHandler {
        level: LogLevel::Error,
        formatter: None,
    }));

    c.bench_function("filtered_debug", |b| {
        b.iter(|| black_box(logger.debug(black_box("never delivered"))))
    });
}

criterion_group!(
    benches,
    benchmark_basic_logging,
    benchmark_handler_stack,
    benchmark_filtered
);
criterion_main!(benches);
