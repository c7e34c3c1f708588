use ndarray::Array1;

use crate::objective::fitness_key;

/// Index and value of the smallest entry, first occurrence on ties.
///
/// NaN ranks as `+inf`, so it is only returned when every entry is NaN.
pub(crate) fn argmin(v: &Array1<f64>) -> (usize, f64) {
    let mut best_i = 0usize;
    let mut best_v = v[0];
    for (i, &val) in v.iter().enumerate() {
        if fitness_key(val) < fitness_key(best_v) {
            best_v = val;
            best_i = i;
        }
    }
    (best_i, best_v)
}
