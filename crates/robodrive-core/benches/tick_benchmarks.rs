//! Controller Benchmarks
//!
//! Criterion benchmarks for a full control tick.

use criterion::{Criterion, criterion_group, criterion_main};
use robodrive_core::{LoopbackBus, RawIntention, VehicleController, VehicleTelemetry};
use robodrive_transmission::{GearCommand, Gearbox};

fn cruising_vehicle() -> VehicleTelemetry {
    let mut vehicle = VehicleTelemetry::at_rest(Gearbox::six_speed(), 0.02).with_speed(30.0);
    vehicle.gear = GearCommand::new(3);
    vehicle.race_time = 12.0;
    vehicle.to_middle = 1.2;
    vehicle.yaw = 0.05;
    vehicle
}

fn bench_tick(c: &mut Criterion) {
    let mut controller = VehicleController::with_defaults();
    let vehicle = cruising_vehicle();
    let intention = RawIntention::new(0.3, 0.9, 0.0);

    c.bench_function("controller_tick", |b| {
        b.iter(|| controller.tick(std::hint::black_box(&intention), std::hint::black_box(&vehicle)))
    });
}

fn bench_step_loopback(c: &mut Criterion) {
    let mut controller = VehicleController::with_defaults();
    let vehicle = cruising_vehicle();
    let mut bus = LoopbackBus::new();
    bus.set_intention(RawIntention::new(-0.2, 0.7, 0.0));

    c.bench_function("controller_step_loopback", |b| {
        b.iter(|| {
            let result = controller.step(&mut bus, std::hint::black_box(&vehicle));
            bus.take_reports();
            result
        })
    });
}

criterion_group!(benches, bench_tick, bench_step_loopback);
criterion_main!(benches);
