//! End-to-end behavior of the fluid step on hand-picked starting fields.

use fluxgrid_common::{CellCoord, GRID_HEIGHT, GRID_WIDTH};
use fluxgrid_kernel::{FluidConfig, SeedPattern, Simulation};

fn max_mass(sim: &Simulation) -> u8 {
    sim.mass_field().iter().copied().max().unwrap_or(0)
}

fn run(sim: &mut Simulation, steps: usize) {
    for _ in 0..steps {
        sim.step();
    }
}

#[test]
fn interior_block_conserves_mass() {
    let pattern = SeedPattern::Block {
        origin: CellCoord::new(20, 20),
        size: 10,
        mass: 200,
    };
    let mut sim = pattern.build(FluidConfig::default()).unwrap();
    let total = sim.total_mass();
    assert_eq!(total, 200 * 100);

    for _ in 0..500 {
        sim.step();
        assert_eq!(sim.total_mass(), total);
    }
}

#[test]
fn uniform_field_is_a_fixed_point() {
    let mut sim = SeedPattern::Uniform(77)
        .build(FluidConfig::default())
        .unwrap();
    let before = sim.mass_field().to_vec();

    let report = sim.step();
    assert_eq!(report.active_faces, 0);
    assert_eq!(report.carried_mass, 0);
    assert_eq!(sim.mass_field(), before.as_slice());
}

#[test]
fn full_grid_survives_ten_thousand_steps() {
    let mut sim = SeedPattern::Uniform(u8::MAX)
        .build(FluidConfig::default())
        .unwrap();
    run(&mut sim, 10_000);
    assert!(sim.mass_field().iter().all(|&m| m == u8::MAX));
    assert_eq!(sim.tick(), 10_000);
}

#[test]
fn checkerboard_stays_in_range_and_conserves() {
    let mut sim = Simulation::from_fn(FluidConfig::default(), |c| {
        if (c.x + c.y) % 2 == 0 { u8::MAX } else { 0 }
    })
    .unwrap();
    let total = sim.total_mass();

    for _ in 0..10_000 {
        sim.step();
    }
    // u8 storage already bounds the range; conservation shows nothing was clipped
    assert_eq!(sim.total_mass(), total);
}

#[test]
fn spike_smooths_monotonically_until_settled() {
    let mut sim = SeedPattern::centered_spike()
        .build(FluidConfig::default())
        .unwrap();

    let mut peaks = Vec::new();
    let mut settled = false;
    for _ in 0..1_000 {
        let before = sim.mass_field().to_vec();
        sim.step();
        assert_eq!(sim.total_mass(), 255);
        if sim.mass_field() == before.as_slice() {
            settled = true;
            break;
        }
        peaks.push(max_mass(&sim));
    }
    assert!(settled, "spike never reached a fixed point");
    assert_eq!(sim.tick(), 13);

    // Differences below the divisor move nothing, so the peak holds for a
    // step while the shoulders below it are still levelling out.
    assert_eq!(peaks, [127, 35, 31, 23, 19, 15, 15, 15, 12, 11, 11, 11]);
    assert!(peaks.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn peak_cell_with_a_steep_face_always_drops() {
    let config = FluidConfig::default();
    let divisor = config.spread_divisor;
    let mut sim = SeedPattern::centered_spike().build(config).unwrap();

    for _ in 0..13 {
        let before = sim.mass_field().to_vec();
        let peak = max_mass(&sim);
        sim.step();
        for coord in CellCoord::all().filter(|c| before[c.y * GRID_WIDTH + c.x] == peak) {
            let steep = neighbors(coord)
                .any(|n| peak - before[n.y * GRID_WIDTH + n.x] >= divisor);
            if steep {
                assert!(sim.sample(coord.x, coord.y).unwrap() < peak, "{coord} held {peak}");
            }
        }
    }
}

fn neighbors(c: CellCoord) -> impl Iterator<Item = CellCoord> {
    let west = c.x.checked_sub(1).map(|x| CellCoord::new(x, c.y));
    let north = c.y.checked_sub(1).map(|y| CellCoord::new(c.x, y));
    [c.east(), c.south(), west, north].into_iter().flatten()
}

#[test]
fn spike_spreads_symmetrically() {
    let mut sim = SeedPattern::centered_spike()
        .build(FluidConfig::default())
        .unwrap();
    run(&mut sim, 3);

    let (cx, cy) = (GRID_WIDTH / 2, GRID_HEIGHT / 2);
    for k in 1..5 {
        let east = sim.sample(cx + k, cy).unwrap();
        assert_eq!(sim.sample(cx - k, cy).unwrap(), east);
        assert_eq!(sim.sample(cx, cy + k).unwrap(), east);
        assert_eq!(sim.sample(cx, cy - k).unwrap(), east);
    }
    assert_eq!(sim.sample(cx, cy), Ok(31));
    assert_eq!(sim.sample(cx + 1, cy), Ok(21));
}

#[test]
fn corner_mass_never_leaks_through_walls() {
    let mut sim = SeedPattern::Corner { mass: u8::MAX }
        .build(FluidConfig::default())
        .unwrap();

    let report = sim.step();
    assert_eq!(report.active_faces, 2);
    assert_eq!(sim.sample(0, 0), Ok(191));
    assert_eq!(sim.sample(1, 0), Ok(32));
    assert_eq!(sim.sample(0, 1), Ok(32));

    for _ in 0..1_000 {
        sim.step();
        assert_eq!(sim.total_mass(), 255);
    }
}

#[test]
fn far_corner_mass_never_leaks_through_walls() {
    let far = CellCoord::new(GRID_WIDTH - 1, GRID_HEIGHT - 1);
    let mut sim = SeedPattern::Spike {
        at: far,
        mass: 180,
    }
    .build(FluidConfig::default())
    .unwrap();

    sim.step();
    let grid = sim.grid();
    assert_eq!(grid.flow_x(far.x, far.y), Ok(128));
    assert_eq!(grid.flow_y(far.x, far.y), Ok(128));
    for _ in 0..500 {
        sim.step();
        assert_eq!(sim.total_mass(), 180);
    }
}

#[test]
fn identical_fields_evolve_bit_identically() {
    let seed = |c: CellCoord| ((c.x * 31 + c.y * 17) % 256) as u8;
    let mut a = Simulation::from_fn(FluidConfig::default(), seed).unwrap();
    let mut b = Simulation::from_fn(FluidConfig::default(), seed).unwrap();

    for i in 0..2_000 {
        if i % 100 == 0 {
            a.inject(10, 40, 90).unwrap();
            b.inject(10, 40, 90).unwrap();
        }
        a.step();
        b.step();
    }
    assert_eq!(a.mass_field(), b.mass_field());
    assert_eq!(a.state_hash(), b.state_hash());
}

#[test]
fn tighter_exchange_cap_slows_spreading() {
    let slow_config = FluidConfig {
        max_exchange: 4,
        ..FluidConfig::default()
    };
    let mut slow = SeedPattern::centered_spike().build(slow_config).unwrap();
    let mut fast = SeedPattern::centered_spike()
        .build(FluidConfig::default())
        .unwrap();
    slow.step();
    fast.step();
    assert_eq!(slow.sample(25, 25), Ok(255 - 16));
    assert_eq!(fast.sample(25, 25), Ok(255 - 128));
}
