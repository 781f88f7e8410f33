//! Elementwise arithmetic over embedding vectors.

use ndarray::{Array1, ArrayView1};

use crate::error::{Error, Result};

fn ensure_dims(vectors: &[ArrayView1<f32>]) -> Result<()> {
    if vectors.len() < 2 {
        return Err(Error::Format(format!(
            "Vector combination requires at least two vectors, got: {}",
            vectors.len()
        )));
    }

    let expected = vectors[0].len();
    for vector in &vectors[1..] {
        if vector.len() != expected {
            return Err(Error::Dimensions {
                expected,
                got: vector.len(),
            });
        }
    }

    Ok(())
}

/// Elementwise sum of two or more vectors.
///
/// All vectors must have the same dimensionality.
pub fn add_vectors(vectors: &[ArrayView1<f32>]) -> Result<Array1<f32>> {
    ensure_dims(vectors)?;

    let mut sum = vectors[0].to_owned();
    for vector in &vectors[1..] {
        sum += vector;
    }

    Ok(sum)
}

/// Elementwise product of two or more vectors.
///
/// All vectors must have the same dimensionality.
pub fn mult_vectors(vectors: &[ArrayView1<f32>]) -> Result<Array1<f32>> {
    ensure_dims(vectors)?;

    let mut product = vectors[0].to_owned();
    for vector in &vectors[1..] {
        product *= vector;
    }

    Ok(product)
}

/// Elementwise mean of two or more vectors.
///
/// The mean is the elementwise sum divided by the number of vectors. All
/// vectors must have the same dimensionality.
pub fn mean_vectors(vectors: &[ArrayView1<f32>]) -> Result<Array1<f32>> {
    let mut mean = add_vectors(vectors)?;
    mean /= vectors.len() as f32;

    Ok(mean)
}

#[cfg(test)]
mod tests {
    use ndarray::arr1;

    use super::{add_vectors, mean_vectors, mult_vectors};
    use crate::error::Error;

    #[test]
    fn add() {
        let v1 = arr1(&[1f32, 2.]);
        let v2 = arr1(&[3f32, 4.]);
        assert_eq!(
            add_vectors(&[v1.view(), v2.view()]).unwrap(),
            arr1(&[4f32, 6.])
        );
    }

    #[test]
    fn mult() {
        let v1 = arr1(&[1f32, 2.]);
        let v2 = arr1(&[3f32, 4.]);
        assert_eq!(
            mult_vectors(&[v1.view(), v2.view()]).unwrap(),
            arr1(&[3f32, 8.])
        );
    }

    #[test]
    fn mean() {
        let v1 = arr1(&[1f32, 2.]);
        let v2 = arr1(&[3f32, 4.]);
        assert_eq!(
            mean_vectors(&[v1.view(), v2.view()]).unwrap(),
            arr1(&[2f32, 3.])
        );
    }

    #[test]
    fn mean_of_three() {
        let v1 = arr1(&[0f32, 3.]);
        let v2 = arr1(&[3f32, 3.]);
        let v3 = arr1(&[6f32, 3.]);
        assert_eq!(
            mean_vectors(&[v1.view(), v2.view(), v3.view()]).unwrap(),
            arr1(&[3f32, 3.])
        );
    }

    #[test]
    fn dimensionality_mismatch_fails() {
        let v1 = arr1(&[1f32, 2.]);
        let v2 = arr1(&[3f32, 4., 5.]);
        match add_vectors(&[v1.view(), v2.view()]) {
            Err(Error::Dimensions { expected, got }) => {
                assert_eq!(expected, 2);
                assert_eq!(got, 3);
            }
            other => panic!("Expected dimension error, got: {:?}", other),
        }
    }

    #[test]
    fn fewer_than_two_vectors_fails() {
        let v1 = arr1(&[1f32, 2.]);
        assert!(add_vectors(&[v1.view()]).is_err());
        assert!(mean_vectors(&[]).is_err());
    }
}
