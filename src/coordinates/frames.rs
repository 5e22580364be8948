use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{Degree, Radian, RADEG, RADSEC};

/// ICRS → Galactic rotation (Liu, Zhang & Zhu 2011; ERFA `eraIcrs2g`).
#[allow(clippy::excessive_precision)]
pub(crate) const ICRS_TO_GALACTIC: [[f64; 3]; 3] = [
    [
        -0.054875560416215368492398900454,
        -0.873437090234885048760383168409,
        -0.483835015548713226831774175116,
    ],
    [
        0.494109427875583673525222371358,
        -0.444829629960011178146614061616,
        0.746982244497218890527388004556,
    ],
    [
        -0.867666149019004701181616534570,
        -0.198076373431201528180486091412,
        0.455983776175066922272100478348,
    ],
];

/// Frame bias offsets of the mean J2000 equator/equinox w.r.t. ICRS (IERS 2003), in arcseconds.
const FRAME_BIAS_DALPHA0: f64 = -0.0146;
const FRAME_BIAS_XI0: f64 = -0.016617;
const FRAME_BIAS_ETA0: f64 = -0.0068192;

/// Elementary rotation of angle `alpha` around axis `k` (0 = x, 1 = y, 2 = z).
///
/// Arguments
/// -----------------
/// * `alpha`: rotation angle in radians.
/// * `k`: axis index.
///
/// Return
/// ----------
/// * The 3×3 rotation matrix.
///
/// # Panics
///
/// Panics if `k > 2`.
pub(crate) fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("rotmt: invalid axis index {k} (must be 0, 1 or 2)"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

pub(crate) fn galactic_to_icrs() -> Matrix3<f64> {
    Matrix3::from_fn(|i, j| ICRS_TO_GALACTIC[i][j]).transpose()
}

/// Rotation from mean J2000 equatorial (FK5) to ICRS.
///
/// The bias matrix `B = R1(-η0)·R2(ξ0)·R3(dα0)` maps ICRS onto J2000; the inverse is its
/// transpose. `rotmt` is an active rotation, hence the sign flips.
pub(crate) fn fk5_to_icrs() -> Matrix3<f64> {
    let bias = rotmt(FRAME_BIAS_ETA0 * RADSEC, 0)
        * rotmt(-FRAME_BIAS_XI0 * RADSEC, 1)
        * rotmt(-FRAME_BIAS_DALPHA0 * RADSEC, 2);
    bias.transpose()
}

/// Unit vector pointing at (`lon`, `lat`).
pub(crate) fn to_cartesian(lon: Degree, lat: Degree) -> Vector3<f64> {
    let (lon, lat) = (lon * RADEG, lat * RADEG);
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Spherical angles of a direction, longitude wrapped to [0, 360).
pub(crate) fn to_spherical(v: &Vector3<f64>) -> (Degree, Degree) {
    let lon = v.y.atan2(v.x) / RADEG;
    let lat = (v.z / v.norm()).asin() / RADEG;
    (lon.rem_euclid(360.0), lat)
}
