use cairn_geom::IVec3;

#[test]
fn ivec3_constants() {
    assert_eq!(IVec3::ZERO, IVec3::new(0, 0, 0));
    assert_eq!(IVec3::UP, IVec3::new(0, 0, 1));
    assert_eq!(IVec3::splat(7), IVec3::new(7, 7, 7));
}

#[test]
fn ivec3_add_sub_neg() {
    let a = IVec3::new(1, 2, 3);
    let b = IVec3::new(-4, 5, -6);
    assert_eq!(a + b, IVec3::new(-3, 7, -3));
    assert_eq!((a + b) - a, b);
    assert_eq!(-a, IVec3::new(-1, -2, -3));

    let mut v = a;
    v += b;
    v -= a;
    assert_eq!(v, b);
}

#[test]
fn ivec3_scalar_mul_and_dot() {
    let v = IVec3::new(3, -4, 0);
    assert_eq!(v * 2, IVec3::new(6, -8, 0));
    assert_eq!(v.length_sq(), 25);
    assert_eq!(v.distance_sq(IVec3::ZERO), 25);
    assert_eq!(IVec3::new(1, 2, 3).dot(IVec3::new(4, 5, 6)), 32);
}

#[test]
fn euclid_division_floors_negative_coordinates() {
    let v = IVec3::new(-1, -32, 33);
    assert_eq!(v.div_euclid(32), IVec3::new(-1, -1, 1));
    assert_eq!(v.rem_euclid(32), IVec3::new(31, 0, 1));
}

#[test]
fn conversions_roundtrip() {
    let v = IVec3::from((1, -2, 3));
    let t: (i32, i32, i32) = v.into();
    assert_eq!(t, (1, -2, 3));
    assert_eq!(IVec3::from([4, 5, 6]), IVec3::new(4, 5, 6));
}

#[test]
fn distance_sq_at_coordinate_extremes() {
    let far = IVec3::new(i32::MAX, 0, 0);
    assert_eq!(far.distance_sq(IVec3::new(i32::MAX - 3, 4, 0)), 25);
    let expected = (i64::from(i32::MAX) - 96).pow(2) + 52 * 52 + 320 * 320;
    assert_eq!(far.distance_sq(IVec3::new(96, 52, 320)), expected);
    assert_eq!(IVec3::new(0, 0, i32::MIN).distance_sq(IVec3::ZERO), 1i64 << 62);
    let lo = IVec3::splat(i32::MIN);
    let hi = IVec3::splat(i32::MAX);
    assert_eq!(lo.distance_sq(hi), i64::MAX);
    assert_eq!(hi.distance_sq(lo), i64::MAX);
}
