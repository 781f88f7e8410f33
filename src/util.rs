use ndarray::ArrayViewMut1;

pub fn l2_normalize(mut v: ArrayViewMut1<f32>) -> f32 {
    let norm = v.dot(&v).sqrt();

    if norm != 0. {
        v /= norm;
    }

    norm
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    use super::l2_normalize;

    #[test]
    fn l2_normalize_unit_result() {
        let mut v = arr1(&[3f32, 4f32]);
        let norm = l2_normalize(v.view_mut());
        assert_abs_diff_eq!(norm, 5f32, epsilon = 1e-6);
        assert_abs_diff_eq!(v.dot(&v).sqrt(), 1f32, epsilon = 1e-6);
    }

    #[test]
    fn l2_normalize_zero_vector_unchanged() {
        let mut v = arr1(&[0f32, 0f32]);
        let norm = l2_normalize(v.view_mut());
        assert_abs_diff_eq!(norm, 0f32);
        assert_eq!(v, arr1(&[0f32, 0f32]));
    }
}
