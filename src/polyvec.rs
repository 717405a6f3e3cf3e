//! `PolyVec` helpers: element-wise addition, matrix-by-vector and
//! transpose-by-vector multiplication, and dot products — the
//! runtime-`k` analogues of the teacher's `helpers.rs::{add_vecs,
//! mul_mat_vec, mul_mat_t_vec, dot_t_prod}`.

use crate::ntt::{ntt, poly_base_mul_acc, Poly};

pub(crate) type PolyVec = Vec<Poly>;

pub(crate) fn zero_vec(k: usize) -> PolyVec {
    vec![[0i16; 256]; k]
}

pub(crate) fn add_assign(dst: &mut PolyVec, src: &PolyVec) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        for (dc, sc) in d.iter_mut().zip(s.iter()) {
            *dc += *sc;
        }
    }
}

pub(crate) fn ntt_vec(v: &mut PolyVec) {
    for p in v.iter_mut() {
        ntt(p);
    }
}

/// `w_hat = A_hat . u_hat` (spec §4.3.1 step 6 / §4.2.2 "PolyVec
/// pointwise-multiply-accumulate").
pub(crate) fn mul_mat_vec(a: &[Vec<Poly>], u: &PolyVec) -> PolyVec {
    let k = u.len();
    let mut w = zero_vec(k);
    for i in 0..k {
        for j in 0..k {
            poly_base_mul_acc(&mut w[i], &a[i][j], &u[j]);
        }
    }
    w
}

/// `y_hat = A_hat^T . u_hat` (spec §4.3.2 step 7).
pub(crate) fn mul_mat_t_vec(a: &[Vec<Poly>], u: &PolyVec) -> PolyVec {
    let k = u.len();
    let mut y = zero_vec(k);
    for i in 0..k {
        for j in 0..k {
            poly_base_mul_acc(&mut y[i], &a[j][i], &u[j]);
        }
    }
    y
}

/// `z_hat = u_hat^T . v_hat` (spec §4.3.2 step 7, `v' = tˆ·rˆ`).
pub(crate) fn dot(u: &PolyVec, v: &PolyVec) -> Poly {
    debug_assert_eq!(u.len(), v.len());
    let mut acc = [0i16; 256];
    for (ui, vi) in u.iter().zip(v.iter()) {
        poly_base_mul_acc(&mut acc, ui, vi);
    }
    acc
}
