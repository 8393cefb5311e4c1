use criterion::{criterion_group, criterion_main, Criterion};

use simulation::game_actions::Tool;
use simulation::test_harness::TestCity;

fn bench_full_cycle(c: &mut Criterion) {
    let mut city = TestCity::with_seed(42);
    c.bench_function("sim_cycle_16_phases", |b| b.iter(|| city.sim_cycles(1)));
}

fn bench_built_up_cycle(c: &mut Criterion) {
    let mut city = TestCity::with_seed(42).flattened().with_funds(1_000_000);
    city.do_tool(Tool::CoalPower, 11, 10);
    for x in 10..110 {
        city.do_tool(Tool::Road, x, 50);
        city.do_tool(Tool::Wire, x, 48);
    }
    for x in (12..108).step_by(3) {
        city.do_tool(Tool::Residential, x, 46);
        city.do_tool(Tool::Commercial, x, 53);
    }
    city.sim_cycles(20);
    c.bench_function("sim_cycle_built_city", |b| b.iter(|| city.sim_cycles(1)));
}

fn bench_power_scan(c: &mut Criterion) {
    let mut city = TestCity::with_seed(42).flattened().with_funds(1_000_000);
    city.do_tool(Tool::CoalPower, 11, 10);
    for x in 10..110 {
        city.do_tool(Tool::Wire, x, 48);
    }
    c.bench_function("power_scan", |b| b.iter(|| city.run_power_scan()));
}

criterion_group!(benches, bench_full_cycle, bench_built_up_cycle, bench_power_scan);
criterion_main!(benches);
