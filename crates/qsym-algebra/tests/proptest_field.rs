//! Property-based tests for the exact field Q(√2, i) and the structures
//! built on it.
//!
//! Parts are drawn from the full `i64` range so that products and inverses
//! run well past machine width.

use num_rational::BigRational;
use num_traits::{One, Zero};
use proptest::prelude::*;
use qsym_algebra::{Adjoint, Coefficient, Matrix, Scalar, Surd};

fn arb_rational() -> impl Strategy<Value = BigRational> {
    prop_oneof![
        (-8_i64..=8, 1_i64..=8),
        (any::<i64>(), 1_i64..=i64::MAX),
    ]
    .prop_map(|(n, d)| BigRational::new(n.into(), d.into()))
}

fn arb_surd() -> impl Strategy<Value = Surd> {
    (arb_rational(), arb_rational()).prop_map(|(a, b)| Surd::new(a, b))
}

fn arb_scalar() -> impl Strategy<Value = Scalar> {
    (arb_surd(), arb_surd()).prop_map(|(re, im)| Scalar::new(re, im))
}

fn arb_small_scalar() -> impl Strategy<Value = Scalar> {
    (-3_i64..=3, -3_i64..=3, -3_i64..=3).prop_map(|(re, radical, im)| {
        Scalar::integer(re) + Scalar::integer(radical) * Scalar::sqrt2() + Scalar::integer(im) * Scalar::i()
    })
}

fn arb_matrix_2x2() -> impl Strategy<Value = Matrix> {
    prop::array::uniform4(arb_small_scalar()).prop_map(|[a, b, c, d]| {
        Matrix::from_scalars(&[[a, b], [c, d]])
    })
}

fn arb_coefficient() -> impl Strategy<Value = Coefficient> {
    (arb_small_scalar(), arb_small_scalar(), 0_u32..3).prop_map(|(s, t, degree)| {
        let a = Coefficient::symbol("a");
        &(&Coefficient::constant(s) * &a.pow(degree)) + &Coefficient::constant(t)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn surd_ring_laws(x in arb_surd(), y in arb_surd(), z in arb_surd()) {
        prop_assert_eq!(&(&x + &y) + &z, &x + &(&y + &z));
        prop_assert_eq!(&(&x * &y) * &z, &x * &(&y * &z));
        prop_assert_eq!(&x * &y, &y * &x);
        prop_assert_eq!(&x * &(&y + &z), &(&x * &y) + &(&x * &z));
        prop_assert_eq!(&x - &x, Surd::zero());
    }

    #[test]
    fn surd_inverse(x in arb_surd()) {
        prop_assume!(!x.is_zero());
        let inv = x.inv().unwrap();
        prop_assert_eq!(&x * &inv, Surd::one());
        prop_assert_eq!(inv.inv().unwrap(), x);
    }

    #[test]
    fn surd_norm_is_multiplicative(x in arb_surd(), y in arb_surd()) {
        prop_assert_eq!((&x * &y).norm(), x.norm() * y.norm());
    }

    #[test]
    fn scalar_field_laws(x in arb_scalar(), y in arb_scalar(), z in arb_scalar()) {
        prop_assert_eq!(&(&x * &y) * &z, &x * &(&y * &z));
        prop_assert_eq!(&x * &(&y + &z), &(&x * &y) + &(&x * &z));
        prop_assert_eq!(&x * &y, &y * &x);
    }

    #[test]
    fn scalar_division_undoes_multiplication(x in arb_scalar(), y in arb_scalar()) {
        prop_assume!(!y.is_zero());
        prop_assert_eq!(&y * &y.inv().unwrap(), Scalar::one());
        prop_assert_eq!((&x * &y).try_div(&y).unwrap(), x);
    }

    #[test]
    fn scalar_conjugation(x in arb_scalar(), y in arb_scalar()) {
        prop_assert_eq!(x.conj().conj(), x.clone());
        prop_assert_eq!((&x * &y).conj(), &x.conj() * &y.conj());
        prop_assert_eq!(&x * &x.conj(), Scalar::real(x.norm_sqr()));
        prop_assert_eq!(x.adjoint(), x.conj());
    }

    #[test]
    fn scalar_pow_matches_repeated_product(x in arb_small_scalar(), n in 0_u32..12) {
        let repeated = (0..n).fold(Scalar::one(), |acc, _| &acc * &x);
        prop_assert_eq!(x.pow(n), repeated);
    }

    #[test]
    fn small_scalars_convert_consistently(x in arb_small_scalar(), y in arb_small_scalar()) {
        let exact = (&x * &y).to_complex64();
        let approx = x.to_complex64() * y.to_complex64();
        prop_assert!((exact - approx).norm() < 1e-9);
    }

    #[test]
    fn coefficient_substitution_is_a_homomorphism(
        p in arb_coefficient(),
        q in arb_coefficient(),
        value in arb_small_scalar(),
    ) {
        let v = Coefficient::constant(value);
        prop_assert_eq!(
            (&p * &q).substitute("a", &v),
            &p.substitute("a", &v) * &q.substitute("a", &v)
        );
        prop_assert_eq!((&p * &q).adjoint(), &p.adjoint() * &q.adjoint());
    }

    #[test]
    fn matrix_adjoint_reverses_products(a in arb_matrix_2x2(), b in arb_matrix_2x2()) {
        let ab = a.try_mul(&b).unwrap();
        prop_assert_eq!(ab.adjoint(), b.adjoint().try_mul(&a.adjoint()).unwrap());
        prop_assert_eq!(a.adjoint().adjoint(), a.clone());
        prop_assert_eq!(a.kron(&b).adjoint(), a.adjoint().kron(&b.adjoint()));
    }

    #[test]
    fn kron_mixed_product(
        a in arb_matrix_2x2(),
        b in arb_matrix_2x2(),
        c in arb_matrix_2x2(),
        d in arb_matrix_2x2(),
    ) {
        let left = a.kron(&b).try_mul(&c.kron(&d)).unwrap();
        let right = a.try_mul(&c).unwrap().kron(&b.try_mul(&d).unwrap());
        prop_assert_eq!(left, right);
    }

    #[test]
    fn block_and_join_reassemble(m in arb_matrix_2x2(), n in arb_matrix_2x2()) {
        let wide = m.row_join(&n).unwrap();
        prop_assert_eq!(wide.shape(), (2, 4));
        prop_assert_eq!(wide.block(0, 2, 2, 2).unwrap(), n.clone());
        let tall = m.col_join(&n).unwrap();
        prop_assert_eq!(tall.transpose(), m.transpose().row_join(&n.transpose()).unwrap());
    }
}
