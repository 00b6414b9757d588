/// Additive guard on the divisor so an all-zero vector never divides by zero.
pub const NORM_EPSILON: f32 = 1e-8;

/// In-place L2 normalization: `v / (||v|| + ε)`.
///
/// For any non-zero input the result has norm within 1e-5 of 1.0. An
/// all-zero vector stays (numerically) all-zero rather than erroring.
pub fn l2_normalize_in_place(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    let inv_norm = (norm + NORM_EPSILON).recip();
    for x in v.iter_mut() {
        *x *= inv_norm;
    }
}

/// Normalize every vector in a batch.
pub fn normalize_all(vectors: &mut [Vec<f32>]) {
    for v in vectors.iter_mut() {
        l2_normalize_in_place(v);
    }
}
