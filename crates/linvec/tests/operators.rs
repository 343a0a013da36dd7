//! Integration tests for elementwise operators and the dot/matmul/cross products.

use linvec::{
    add, approx_eq, argmax, cross, divide, dot, elementwise_abs, equals, matmul, negate, norm,
    scale, subtract, LinalgError, Product, Shape, Tensor,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn m(rows: Vec<Vec<f64>>) -> Tensor {
    Tensor::matrix(rows).unwrap()
}

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Tensor {
    let rows = (0..rows)
        .map(|_| (0..cols).map(|_| rng.gen_range(-10.0..10.0)).collect())
        .collect();
    m(rows)
}

// ---------------------------------------------------------------------------
// Elementwise arithmetic
// ---------------------------------------------------------------------------

#[test]
fn add_and_subtract_vectors() {
    let a = Tensor::vector(vec![1.0, 2.0, 3.0]);
    let b = Tensor::vector(vec![0.5, -2.0, 4.0]);
    assert_eq!(add(&a, &b).unwrap(), Tensor::vector(vec![1.5, 0.0, 7.0]));
    assert_eq!(subtract(&a, &b).unwrap(), Tensor::vector(vec![0.5, 4.0, -1.0]));
}

#[test]
fn add_rejects_shape_mismatch() {
    let a = Tensor::vector(vec![1.0, 2.0, 3.0]);
    let b = Tensor::vector(vec![1.0, 2.0]);
    assert_eq!(
        add(&a, &b).unwrap_err(),
        LinalgError::DimensionMismatch {
            op: "add",
            lhs: Shape::Vector(3),
            rhs: Shape::Vector(2),
        }
    );

    let row = Tensor::vector(vec![1.0, 2.0]);
    let mat = m(vec![vec![1.0, 2.0]]);
    assert!(matches!(
        subtract(&mat, &row),
        Err(LinalgError::DimensionMismatch { .. })
    ));
}

#[test]
fn add_then_subtract_round_trips() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let a = random_matrix(&mut rng, 3, 4);
        let b = random_matrix(&mut rng, 3, 4);
        let back = subtract(&add(&a, &b).unwrap(), &b).unwrap();
        assert!(equals(&back, &a));
    }
}

#[test]
fn scale_then_divide_round_trips() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let a = random_matrix(&mut rng, 2, 5);
        let k: f64 = rng.gen_range(0.5..4.0);
        assert!(equals(&divide(&scale(&a, k), k).unwrap(), &a));
    }
}

#[test]
fn divide_by_zero_is_an_error() {
    let a = Tensor::vector(vec![1.0, 2.0]);
    assert_eq!(divide(&a, 0.0).unwrap_err(), LinalgError::DivisionByZero);
}

#[test]
fn negate_and_abs() {
    let a = m(vec![vec![-1.0, 2.0], vec![0.0, -3.5]]);
    assert_eq!(negate(&a), m(vec![vec![1.0, -2.0], vec![0.0, 3.5]]));
    assert_eq!(elementwise_abs(&a), m(vec![vec![1.0, 2.0], vec![0.0, 3.5]]));
}

#[test]
fn operator_impls_match_functions() {
    let a = Tensor::vector(vec![1.0, 2.0]);
    let b = Tensor::vector(vec![3.0, 5.0]);
    assert_eq!((&a + &b).unwrap(), Tensor::vector(vec![4.0, 7.0]));
    assert_eq!((&b - &a).unwrap(), Tensor::vector(vec![2.0, 3.0]));
    assert_eq!(&a * 2.0, Tensor::vector(vec![2.0, 4.0]));
    assert_eq!(2.0 * &a, Tensor::vector(vec![2.0, 4.0]));
    assert_eq!((&b / 2.0).unwrap(), Tensor::vector(vec![1.5, 2.5]));
    assert_eq!(-&a, Tensor::vector(vec![-1.0, -2.0]));
    assert!((a.clone() / 0.0).is_err());
}

#[test]
fn operators_work_on_views() {
    let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let t = a.transpose_view();
    let sum = add(&a, &t).unwrap();
    assert_eq!(sum, m(vec![vec![2.0, 5.0], vec![5.0, 8.0]]));
}

#[test]
fn argmax_picks_first_maximum() {
    let v = Tensor::vector(vec![1.0, 7.0, 3.0, 7.0]);
    assert_eq!(argmax(&v).unwrap(), 1);
    assert!(matches!(
        argmax(&Tensor::vector(vec![])),
        Err(LinalgError::Shape(_))
    ));
    assert!(argmax(&m(vec![vec![1.0]])).is_err());
}

// ---------------------------------------------------------------------------
// Equality
// ---------------------------------------------------------------------------

#[test]
fn equality_uses_tolerance() {
    let a = Tensor::vector(vec![1.0, 2.0]);
    let close = Tensor::vector(vec![1.0 + 1e-7, 2.0 - 1e-7]);
    let far = Tensor::vector(vec![1.0 + 1e-5, 2.0]);
    assert_eq!(a, close);
    assert_ne!(a, far);
    assert!(approx_eq(&a, &far, 1e-4));
}

#[test]
fn equality_requires_same_shape() {
    let v = Tensor::vector(vec![1.0, 2.0]);
    let row = m(vec![vec![1.0, 2.0]]);
    assert_ne!(v, row);
    assert_ne!(Tensor::vector(vec![1.0]), Tensor::vector(vec![1.0, 1.0]));
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[test]
fn vector_dot_is_scalar() {
    let a = Tensor::vector(vec![1.0, 2.0, 3.0]);
    let b = Tensor::vector(vec![4.0, 5.0, 6.0]);
    assert_eq!(dot(&a, &b).unwrap(), Product::Scalar(32.0));
    assert_eq!(a.dot(&b).unwrap().as_scalar(), Some(32.0));
}

#[test]
fn vector_matmul_is_single_element_vector() {
    let a = Tensor::vector(vec![1.0, 2.0, 3.0]);
    let b = Tensor::vector(vec![4.0, 5.0, 6.0]);
    assert_eq!(matmul(&a, &b).unwrap(), Tensor::vector(vec![32.0]));
}

#[test]
fn matrix_matrix_product() {
    let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = m(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
    let expected = m(vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
    assert_eq!(matmul(&a, &b).unwrap(), expected);
    assert_eq!((&a * &b).unwrap(), expected);
    assert_eq!(
        dot(&a, &b).unwrap().into_tensor().unwrap(),
        expected
    );
}

#[test]
fn rectangular_product_shapes() {
    let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    let b = m(vec![vec![1.0], vec![0.0], vec![-1.0]]);
    let c = matmul(&a, &b).unwrap();
    assert_eq!(c.shape(), Shape::Matrix(2, 1));
    assert_eq!(c, m(vec![vec![-2.0], vec![-2.0]]));

    assert!(matches!(
        matmul(&a, &a),
        Err(LinalgError::DimensionMismatch { op: "matmul", .. })
    ));
}

#[test]
fn matrix_vector_product() {
    let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let v = Tensor::vector(vec![1.0, 1.0]);
    assert_eq!(matmul(&a, &v).unwrap(), Tensor::vector(vec![3.0, 7.0]));
    assert_eq!(
        dot(&a, &v).unwrap(),
        Product::Tensor(Tensor::vector(vec![3.0, 7.0]))
    );
}

#[test]
fn vector_on_the_left_is_rejected() {
    let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let v = Tensor::vector(vec![1.0, 1.0]);
    assert_eq!(
        matmul(&v, &a).unwrap_err(),
        LinalgError::DimensionMismatch {
            op: "matmul",
            lhs: Shape::Vector(2),
            rhs: Shape::Matrix(2, 2),
        }
    );
    assert!(dot(&v, &a).is_err());
}

#[test]
fn product_through_transposed_view() {
    let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    let gram = matmul(&a, &a.transpose_view()).unwrap();
    assert_eq!(gram, m(vec![vec![14.0, 32.0], vec![32.0, 77.0]]));
}

#[test]
fn identity_is_neutral() {
    let mut rng = StdRng::seed_from_u64(3);
    let i = linvec::identity(4).unwrap();
    for _ in 0..10 {
        let a = random_matrix(&mut rng, 4, 4);
        assert_eq!(matmul(&a, &i).unwrap(), a);
        assert_eq!(matmul(&i, &a).unwrap(), a);
    }
}

#[test]
fn cross_product_of_three_vectors() {
    let a = Tensor::vector(vec![1.0, 2.0, 3.0]);
    let b = Tensor::vector(vec![4.0, 5.0, 6.0]);
    let c = cross(&a, &b).unwrap();
    assert_eq!(c, Tensor::vector(vec![-3.0, 6.0, -3.0]));
    // orthogonal to both inputs
    assert!(dot(&c, &a).unwrap().as_scalar().unwrap().abs() < 1e-12);
    assert!(dot(&c, &b).unwrap().as_scalar().unwrap().abs() < 1e-12);
}

#[test]
fn cross_rejects_bad_operands() {
    let a = Tensor::vector(vec![1.0, 2.0]);
    let b = Tensor::vector(vec![3.0, 4.0]);
    assert!(matches!(
        cross(&a, &b),
        Err(LinalgError::DimensionMismatch { op: "cross", .. })
    ));
    let mat = m(vec![vec![1.0, 2.0, 3.0]]);
    assert!(matches!(cross(&mat, &mat), Err(LinalgError::Shape(_))));
}

#[test]
fn norm_is_frobenius() {
    assert!((norm(&Tensor::vector(vec![3.0, 4.0])) - 5.0).abs() < 1e-12);
    let a = m(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
    assert!((a.norm() - 5.0).abs() < 1e-12);
}
