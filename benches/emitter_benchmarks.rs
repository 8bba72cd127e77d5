//! Performance benchmarks for method-body emission.
//!
//! - Constant pushes across all three encodings
//! - Argument and local traffic through short and wide slot forms
//! - A factory-delegate body built from the constant array
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin
//! ```

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use stackemit::{ConstantPool, CtorRef, Emitter, MethodRef, TypeRef};
use std::hint::black_box;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

fn constant_benchmarks(c: &mut Criterion) {
    setup_profiler();

    let values: Vec<i32> = (-1000..1000).collect();
    let mut group = c.benchmark_group("emit/constants");
    group.throughput(Throughput::Elements(values.len() as u64));

    group.bench_function("push_int_mixed", |b| {
        b.iter(|| {
            let mut emitter = Emitter::with_capacity(Vec::new(), values.len());
            for &value in &values {
                emitter.push_int(black_box(value));
            }
            end_profiling_frame();
            black_box(emitter.finish())
        });
    });

    group.finish();
}

fn slot_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit/slots");

    group.bench_function("arguments_300", |b| {
        let arguments = vec![TypeRef::Object; 300];
        b.iter(|| {
            let mut emitter = Emitter::with_capacity(arguments.clone(), 300);
            emitter.push_arguments(0..300).unwrap();
            end_profiling_frame();
            black_box(emitter.finish())
        });
    });

    group.bench_function("locals_round_trip_300", |b| {
        b.iter(|| {
            let mut emitter = Emitter::with_capacity(Vec::new(), 600);
            for _ in 0..300 {
                let local = emitter.declare_local(TypeRef::INT32);
                emitter.push_int(black_box(7));
                emitter.store_local(local).unwrap();
            }
            end_profiling_frame();
            black_box(emitter.finish())
        });
    });

    group.finish();
}

fn factory_benchmarks(c: &mut Criterion) {
    let service = TypeRef::class("Service");
    let dependencies: Vec<TypeRef> = (0..16)
        .map(|n| TypeRef::class(format!("Dependency{n}")))
        .collect();
    let ctor = CtorRef::new(service.clone(), dependencies.clone());
    let attach = MethodRef::new(service.clone(), "Attach").virtual_dispatch();

    c.bench_function("emit/factory_16_dependencies", |b| {
        b.iter(|| {
            let mut constants = ConstantPool::new();
            let mut emitter = Emitter::new(vec![TypeRef::array_of(TypeRef::Object)]);
            let instance = emitter.declare_local(service.clone());

            for dependency in &dependencies {
                let index = constants.add(dependency.clone());
                emitter.push_constant(index, dependency).unwrap();
            }
            emitter.new_object(&ctor);
            emitter.store_local(instance).unwrap();
            emitter.push_local(instance).unwrap();
            emitter.call(&attach);
            emitter.push_local(instance).unwrap();
            emitter.emit_return();

            end_profiling_frame();
            black_box((emitter.finish(), constants.len()))
        });
    });
}

criterion_group!(
    benches,
    constant_benchmarks,
    slot_benchmarks,
    factory_benchmarks
);
criterion_main!(benches);
