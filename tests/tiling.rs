// Mesh properties checked over many seeded random surfaces.

use nannou::geom::pt2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shatter::{
    animation::schedule, services::GridDimensions, DiagonalSplit, Direction, Rect,
    ScheduleConfig, Triangle, Triangulator,
};

fn random_bounds(rng: &mut StdRng) -> Rect {
    Rect::new(
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-50.0..50.0),
        rng.gen_range(20.0..1200.0),
        rng.gen_range(20.0..1200.0),
    )
}

fn total_area(triangles: &[Triangle]) -> f32 {
    triangles.iter().map(Triangle::area).sum()
}

#[test]
fn area_is_conserved() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for split in [DiagonalSplit::Alternating, DiagonalSplit::Legacy] {
        let triangulator = Triangulator::new(split);
        for _ in 0..200 {
            let bounds = random_bounds(&mut rng);
            let count = rng.gen_range(4..500);
            let direction: Direction = rng.gen();

            let triangles = triangulator.triangulate(bounds, count, direction, &mut rng);
            let area = total_area(&triangles);
            let relative = (area - bounds.area()).abs() / bounds.area();
            assert!(
                relative < 1e-3,
                "{:?} with {} triangles covers {} instead of {}",
                bounds,
                triangles.len(),
                area,
                bounds.area()
            );
            assert!(triangles.iter().all(|t| t.area() > 0.0));
        }
    }
}

#[test]
fn count_matches_grid_formula() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..100 {
        let bounds = random_bounds(&mut rng);
        let count = rng.gen_range(4..800);
        let dims = GridDimensions::for_bounds(&bounds, count);
        let triangles = Triangulator::default().triangulate(bounds, count, Direction::Up, &mut rng);
        assert_eq!(triangles.len(), 4 * dims.rows * dims.columns + 2);
    }
}

#[test]
fn counts_track_the_estimate() {
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..2_000 {
        let bounds = Rect::from_size(rng.gen_range(44.0..1000.0), rng.gen_range(44.0..1000.0));
        let estimate = rng.gen_range(8..=400);
        let count = GridDimensions::for_bounds(&bounds, estimate).triangle_count();
        let error = (count as f64 - estimate as f64).abs();
        assert!(
            error <= GridDimensions::tolerance(estimate as f64),
            "{:?} at {} produced {}",
            bounds,
            estimate,
            count
        );
        if estimate >= 10 {
            assert!(error <= 0.2 * estimate as f64);
        }
    }

    for estimate in (200..=400).step_by(10) {
        let side = rng.gen_range(100.0..1000.0);
        let bounds = Rect::from_size(side, side);
        let triangles = Triangulator::default().triangulate(bounds, estimate, Direction::Left, &mut rng);
        let ratio = triangles.len() as f32 / estimate as f32;
        assert!((0.8..=1.2).contains(&ratio));
    }
}

#[test]
fn extreme_aspect_ratios_still_tile() {
    let mut rng = StdRng::seed_from_u64(16);
    for bounds in [
        Rect::from_size(1e-3, 1000.0),
        Rect::from_size(1000.0, 1e-3),
        Rect::from_size(10.0, 1000.0),
        Rect::from_size(5000.0, 2.0),
    ] {
        let triangles = Triangulator::default().triangulate(bounds, 66, Direction::Up, &mut rng);
        assert_eq!(triangles.len(), 66, "{:?}", bounds);
        let relative = (total_area(&triangles) - bounds.area()).abs() / bounds.area();
        assert!(relative < 1e-3, "{:?} lost area", bounds);
    }
}

#[test]
fn mesh_has_no_gaps_or_overlaps() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..20 {
        let bounds = random_bounds(&mut rng);
        let count = rng.gen_range(4..300);
        let triangles = Triangulator::default().triangulate(bounds, count, Direction::Right, &mut rng);

        for _ in 0..200 {
            let p = pt2(
                bounds.x + bounds.width * rng.gen_range(0.001..0.999),
                bounds.y + bounds.height * rng.gen_range(0.001..0.999),
            );
            let covering = triangles.iter().filter(|t| t.contains(p, 1e-4)).count();
            assert!(covering >= 1, "{:?} not covered in {:?}", p, bounds);

            let interior = triangles
                .iter()
                .filter(|t| {
                    t.barycentric(p)
                        .map(|w| w.iter().all(|x| *x > 1e-3))
                        .unwrap_or(false)
                })
                .count();
            assert!(interior <= 1, "{:?} lies inside {} triangles", p, interior);
        }
    }
}

#[test]
fn every_direction_orders_its_mesh() {
    let mut rng = StdRng::seed_from_u64(14);
    let bounds = Rect::from_size(640.0, 480.0);
    for direction in Direction::ALL {
        let triangles = Triangulator::default().triangulate(bounds, 150, direction, &mut rng);
        let keys: Vec<f32> = triangles
            .iter()
            .map(|t| direction.ordering_key(t, &bounds))
            .collect();
        assert!(
            keys.windows(2).all(|w| w[0] <= w[1]),
            "{} is out of order",
            direction
        );
    }
}

#[test]
fn schedules_fit_inside_the_completion_delay() {
    let mut rng = StdRng::seed_from_u64(15);
    let config = ScheduleConfig::default();
    for _ in 0..20 {
        let bounds = random_bounds(&mut rng);
        let direction: Direction = rng.gen();
        let triangles = Triangulator::default().triangulate(bounds, 120, direction, &mut rng);
        let descriptors = schedule(&triangles, direction, &bounds, &config, &mut rng);

        assert_eq!(descriptors.len(), triangles.len());
        for (index, descriptor) in descriptors.iter().enumerate() {
            assert_eq!(descriptor.index, index);
            assert!(descriptor.begin_offset >= 0.0);
            assert!(descriptor.begin_offset <= config.max_begin_spread);
            assert!(descriptor.end_time() <= config.completion_delay() + 1e-4);
        }
    }
}
