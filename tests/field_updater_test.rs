use hero_fx::physic_engine::generator::{fire_field, floating_field, sparkling_field};
use hero_fx::physic_engine::particle_field::DirtyFlags;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

// ==================================
// 1. Recyclage
// ==================================

#[test]
fn test_floating_particles_never_exceed_upper_bound() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let mut field = floating_field(200, 15.0, 1.0, &mut rng);

    let mut total_recycled = 0;
    for frame in 0..3_000 {
        field.update(frame as f32 * DT, &mut rng);
        total_recycled += field.recycled_last_frame();
        for p in field.particles() {
            assert!(p.pos.y <= 15.0, "frame {frame}: y = {}", p.pos.y);
            assert!(p.pos.x.abs() <= 15.0);
            assert!(p.pos.z.abs() <= 15.0);
        }
    }
    // vitesse verticale ≥ 0.01/frame : tout le monde finit par sortir
    assert!(total_recycled > 0);
}

#[test]
fn test_recycled_particle_reappears_at_lower_bound() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(3);
    let mut field = floating_field(1, 15.0, 1.0, &mut rng);
    {
        let p = &mut field.particles_mut()[0];
        p.pos.y = 14.999;
        p.vel.y = 0.02;
    }
    field.update(0.0, &mut rng);

    let p = field.particles()[0];
    assert_eq!(field.recycled_last_frame(), 1);
    assert_eq!(p.pos.y, -15.0);
    // réapparition dans la moitié centrale du diamètre
    assert!(p.pos.x.abs() <= 7.5);
    assert!(p.pos.z.abs() <= 7.5);
}

#[test]
fn test_sparkling_and_fire_reappear_at_their_lower_bound() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(5);
    let fields = [
        (sparkling_field(1, 0.3, &mut rng), 15.0, -15.0),
        (fire_field(1, 0.5, &mut rng), 8.0, -8.0),
    ];
    for (mut field, top, bottom) in fields {
        {
            let p = &mut field.particles_mut()[0];
            p.pos = glam::Vec3::new(0.0, top - 0.001, 0.0);
            p.vel = glam::Vec3::new(0.0, 0.02, 0.0);
        }
        field.update(0.0, &mut rng);

        assert_eq!(field.recycled_last_frame(), 1);
        assert_eq!(field.particles()[0].pos.y, bottom);
        assert_eq!(field.vertical_extent(), Some((bottom, bottom)));
    }
}

#[test]
fn test_lateral_overflow_resamples_single_axis() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(8);
    let mut field = sparkling_field(1, 0.3, &mut rng);
    {
        let p = &mut field.particles_mut()[0];
        p.pos = glam::Vec3::new(30.0, 0.0, 1.0);
        p.vel = glam::Vec3::ZERO;
    }
    field.update(0.0, &mut rng);

    let p = field.particles()[0];
    assert!(p.pos.x.abs() <= 25.0);
    // y et z ne subissent que la petite perturbation
    assert!(p.pos.y.abs() < 0.01);
    assert!((p.pos.z - 1.0).abs() < 0.01);
    assert_eq!(field.recycled_last_frame(), 0);
}

#[test]
fn test_fire_rises_and_recycles_to_column_base() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(21);
    let mut field = fire_field(100, 0.6, &mut rng);
    let mut saw_recycle = false;
    for frame in 0..600 {
        field.update(frame as f32 * DT, &mut rng);
        saw_recycle |= field.recycled_last_frame() > 0;
        for p in field.particles() {
            assert!(p.pos.y <= 8.0 && p.pos.y >= -8.0);
            assert_eq!(p.color.x, 1.0);
            assert!((0.0..=1.0).contains(&p.color.y));
            assert!((0.0..=0.8).contains(&p.color.z));
        }
    }
    // 16 unités à au moins 0.05/frame : chaque particule a bouclé
    assert!(saw_recycle);
}

// ==================================
// 2. Scintillement
// ==================================

#[test]
fn test_sparkling_twinkle_stays_in_range() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(77);
    let mut field = sparkling_field(100, 0.3, &mut rng);
    for frame in 0..500 {
        field.update(frame as f32 * DT, &mut rng);
        for p in field.particles() {
            assert!(p.pos.y <= 15.0, "frame {frame}: y = {}", p.pos.y);
            let ratio = p.size / p.base_size;
            assert!((0.5 - 1e-4..=2.0 + 1e-4).contains(&ratio), "size ratio {ratio}");
            let c = p.color.x / p.base_color.x;
            assert!((0.3 - 1e-4..=1.0 + 1e-4).contains(&c), "color ratio {c}");
            assert_eq!(p.base_color.x, 1.0);
        }
        let (low, high) = field.vertical_extent().unwrap();
        assert!(low >= -15.0 && high <= 15.0, "extent [{low}, {high}]");
    }
}

// ==================================
// 3. Drapeaux sales
// ==================================

#[test]
fn test_dirty_flags_per_kind() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);

    let mut floating = floating_field(10, 15.0, 1.0, &mut rng);
    floating.take_dirty();
    floating.update(0.5, &mut rng);
    assert_eq!(
        floating.take_dirty(),
        DirtyFlags {
            position: true,
            color: false,
            size: false
        }
    );

    let mut fire = fire_field(10, 0.5, &mut rng);
    fire.take_dirty();
    fire.update(0.5, &mut rng);
    let dirty = fire.take_dirty();
    assert!(dirty.position && dirty.color && !dirty.size);

    let mut sparkling = sparkling_field(10, 0.3, &mut rng);
    sparkling.take_dirty();
    sparkling.update(0.5, &mut rng);
    assert_eq!(sparkling.take_dirty(), DirtyFlags::ALL);
    assert!(!sparkling.dirty().any());
}
