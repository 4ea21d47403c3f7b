use super::interpolate::*;

#[test]
fn test_lin_interp() {
    assert_eq!(lin_interp(1.0, 3.0, 0.5), 2.0);
}

#[test]
fn test_bilin_interp() {
    assert_eq!(bilin_interp(1.0, 2.0, 3.0, 4.0, 0.5, 0.5), 2.5);
}

#[test]
fn test_bilin_interp_corner_is_exact() {
    let f00 = 0.1_f64;
    assert_eq!(bilin_interp(f00, 0.7, 0.3, 0.9, 0.0, 0.0), f00);
}

#[test]
fn test_midpoint_is_symmetric() {
    let a = 0.1_f64;
    let b = 0.7_f64;
    assert_eq!(midpoint(a, b), midpoint(b, a));
}

#[test]
fn test_find_grid_indices_on_last_node() {
    let coords = [0.0, 1.0, 2.0];
    assert_eq!(
        find_grid_indices(&coords, 2.0, BoundaryPolicy::Extrapolate),
        (2, 2, 0.0)
    );
}

#[test]
fn test_boundary_policy_parse() {
    assert_eq!("clamp".parse::<BoundaryPolicy>(), Ok(BoundaryPolicy::Clamp));
    assert_eq!(
        " Extrapolate ".parse::<BoundaryPolicy>(),
        Ok(BoundaryPolicy::Extrapolate)
    );
    assert!("nearest".parse::<BoundaryPolicy>().is_err());
}
