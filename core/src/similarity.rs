pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must share the vocabulary");
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine of the angle between `a` and `b`.
///
/// Returns 0.0 when either vector has zero magnitude or the result is not finite, so a query
/// made only of unknown terms scores zero instead of NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let denom = magnitude(a) * magnitude(b);
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    let sim = dot_product(a, b) / denom;
    if sim.is_finite() { sim } else { 0.0 }
}
