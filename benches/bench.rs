use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hitbox::{
    check_collision, Aabb, Body, Cosmos, Intersection, ObjectKind, Shape, Vec2, WorldObject,
};

fn populated_cosmos(n: usize) -> Cosmos {
    let mut cosmos = Cosmos::default();
    for i in 0..n {
        let x = (i % 8) as hitbox::Fp * 0.8;
        let y = (i / 8) as hitbox::Fp * 0.8;
        cosmos.add_body(Body::new(Vec2::new(x, y)).with_rotation(i as hitbox::Fp * 7.0));
    }
    let floor = Vec2::new(-1.0, -2.0);
    cosmos.add_object(WorldObject::new("floor", floor, Vec2::new(10.0, 1.5), ObjectKind::Rect));
    let pond = Vec2::new(2.0, 1.0);
    cosmos.add_object(WorldObject::new("pond", pond, Vec2::new(3.0, 2.0), ObjectKind::Ellipse));
    cosmos
}

fn criterion_benchmark(c: &mut Criterion) {
    let square = Shape::rect(Aabb::new(-1.0, -1.0, 1.0, 1.0));
    let rotated = Shape::oriented_box(Vec2::new(1.2, 0.4), Vec2::new(2.0, 0.75), 30.0);
    let ellipse = Shape::ellipse(Vec2::new(1.0, 0.8), Vec2::new(1.5, 0.5));
    let far = square.translate(Vec2::new(10.0, 3.0));
    let cursor = Shape::point(Vec2::new(0.3, -0.6));

    c.bench_function("gjk epa polygon polygon", |b| b.iter(|| check_collision(
        black_box(&square),
        black_box(&rotated),
        &mut Intersection::default())));
    c.bench_function("gjk epa polygon ellipse", |b| b.iter(|| check_collision(
        black_box(&square),
        black_box(&ellipse),
        &mut Intersection::default())));
    c.bench_function("gjk separated", |b| b.iter(|| check_collision(
        black_box(&square),
        black_box(&far),
        &mut Intersection::default())));
    c.bench_function("point query", |b| b.iter(|| check_collision(
        black_box(&square),
        black_box(&cursor),
        &mut Intersection::default())));

    let cosmos = populated_cosmos(32);
    c.bench_function("cosmos all contacts", |b| b.iter(|| black_box(&cosmos).all_contacts()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
