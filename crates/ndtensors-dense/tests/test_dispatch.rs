//! Tests for single-operand task dispatch.
//!
//! Covers every task on both storage kinds:
//! - element access and real-to-complex promotion
//! - fill, scale, conjugation, real/imaginary extraction
//! - norm and sum reductions
//! - printing and binary write/read

use approx::assert_relative_eq;
use ndtensors_dense::io::{BinaryWriter, read_storage};
use ndtensors_dense::task::{Fill, GetElt, Mult, PrintIt, SetElt, Task, WriteIt};
use ndtensors_dense::{Dense, Index, IndexSet, PrintConfig, RangeIter, Storage, c64, do_task};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn index_set(dims: &[usize]) -> IndexSet {
    IndexSet::new(dims.iter().map(|&d| Index::new(d))).unwrap()
}

fn get(is: &IndexSet, store: &mut Storage, inds: &[usize]) -> c64 {
    do_task(&mut Task::GetElt(GetElt::new(is, inds)), store)
        .unwrap()
        .cplx()
        .unwrap()
}

/// Fill then read back every multi-index.
#[test]
fn test_fill_then_get_everywhere() {
    let is = index_set(&[2, 3, 2]);

    let mut real = Storage::real_zeros(is.area());
    do_task(&mut Task::FillReal(Fill { value: 2.5 }), &mut real).unwrap();

    let mut cplx = Storage::cplx_zeros(is.area());
    do_task(&mut Task::FillReal(Fill { value: 2.5 }), &mut cplx).unwrap();

    for (ind, _) in RangeIter::new(&is) {
        assert_eq!(get(&is, &mut real, &ind), c64::new(2.5, 0.0));
        assert_eq!(get(&is, &mut cplx, &ind), c64::new(2.5, 0.0));
    }
}

/// A complex fill on real storage yields complex storage of the same length.
#[test]
fn test_fill_cplx_promotes() {
    let is = index_set(&[3]);
    let mut store = Storage::real_zeros(is.area());
    let z = c64::new(1.0, -1.0);
    do_task(&mut Task::FillCplx(Fill { value: z }), &mut store).unwrap();
    assert!(store.is_complex());
    assert_eq!(store.len(), 3);
    for i in 0..3 {
        assert_eq!(get(&is, &mut store, &[i]), z);
    }
}

/// Setting a complex element on real storage keeps the other values.
#[test]
fn test_set_cplx_preserves_other_values() {
    let is = index_set(&[2, 2]);
    let mut store = Storage::from_real_vec(vec![1.0, 2.0, 3.0, 4.0]);
    let z = c64::new(0.5, 0.25);
    do_task(&mut Task::SetCplx(SetElt::new(&is, &[1, 0], z)), &mut store).unwrap();

    assert!(store.is_complex());
    assert_eq!(get(&is, &mut store, &[0, 0]), c64::new(1.0, 0.0));
    assert_eq!(get(&is, &mut store, &[1, 0]), z);
    assert_eq!(get(&is, &mut store, &[0, 1]), c64::new(3.0, 0.0));
    assert_eq!(get(&is, &mut store, &[1, 1]), c64::new(4.0, 0.0));
}

#[test]
fn test_set_real_on_both_kinds() {
    let is = index_set(&[2, 2]);
    let mut real = Storage::real_zeros(4);
    let mut cplx = Storage::from_cplx_vec(vec![c64::new(0.0, 1.0); 4]);
    for store in [&mut real, &mut cplx] {
        do_task(&mut Task::SetReal(SetElt::new(&is, &[0, 1], 7.0)), store).unwrap();
        assert_eq!(get(&is, store, &[0, 1]), c64::new(7.0, 0.0));
    }
    assert!(!real.is_complex());
    assert_eq!(cplx.as_cplx().unwrap()[0], c64::new(0.0, 1.0));
}

#[test]
fn test_get_errors() {
    let is = index_set(&[2, 2]);
    let mut store = Storage::real_zeros(4);
    assert!(do_task(&mut Task::GetElt(GetElt::new(&is, &[0])), &mut store).is_err());
    assert!(do_task(&mut Task::GetElt(GetElt::new(&is, &[0, 2])), &mut store).is_err());
}

#[test]
fn test_mult() {
    let mut real = Storage::from_real_vec(vec![1.0, -2.0]);
    do_task(&mut Task::MultReal(Mult { value: 3.0 }), &mut real).unwrap();
    assert_eq!(real, Storage::from_real_vec(vec![3.0, -6.0]));

    do_task(&mut Task::MultCplx(Mult { value: c64::new(0.0, 2.0) }), &mut real).unwrap();
    assert_eq!(
        real,
        Storage::from_cplx_vec(vec![c64::new(0.0, 6.0), c64::new(0.0, -12.0)])
    );

    do_task(&mut Task::MultReal(Mult { value: 0.5 }), &mut real).unwrap();
    assert_eq!(
        real,
        Storage::from_cplx_vec(vec![c64::new(0.0, 3.0), c64::new(0.0, -6.0)])
    );
}

#[test]
fn test_norm() {
    let mut real = Storage::from_real_vec(vec![3.0, 4.0]);
    let n = do_task(&mut Task::NormNoScale, &mut real).unwrap();
    assert_relative_eq!(n.real().unwrap(), 5.0);

    let mut cplx = Storage::from_cplx_vec(vec![c64::new(1.0, 2.0), c64::new(2.0, 0.0)]);
    let n = do_task(&mut Task::NormNoScale, &mut cplx).unwrap();
    assert_relative_eq!(n.real().unwrap(), 3.0);
}

#[test]
fn test_conj() {
    let mut real = Storage::from_real_vec(vec![1.0, 2.0]);
    do_task(&mut Task::Conj, &mut real).unwrap();
    assert_eq!(real, Storage::from_real_vec(vec![1.0, 2.0]));

    let mut cplx = Storage::from_cplx_vec(vec![c64::new(1.0, 2.0)]);
    do_task(&mut Task::Conj, &mut cplx).unwrap();
    assert_eq!(cplx, Storage::from_cplx_vec(vec![c64::new(1.0, -2.0)]));
}

#[test]
fn test_take_real_and_imag_on_real() {
    let mut store = Storage::from_real_vec(vec![1.0, -2.0, 3.0]);
    do_task(&mut Task::TakeReal, &mut store).unwrap();
    assert_eq!(store, Storage::from_real_vec(vec![1.0, -2.0, 3.0]));

    do_task(&mut Task::TakeImag, &mut store).unwrap();
    assert!(!store.is_complex());
    assert!(store.as_real().unwrap().iter().all(|&x| x == 0.0));
}

/// Non-finite real values still have a zero imaginary part.
#[test]
fn test_take_imag_on_non_finite_real() {
    let mut store = Storage::from_real_vec(vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1.0]);
    do_task(&mut Task::TakeImag, &mut store).unwrap();
    assert_eq!(store, Storage::real_zeros(4));
}

#[test]
fn test_take_real_and_imag_on_cplx() {
    let data = vec![c64::new(1.0, 4.0), c64::new(-2.0, 5.0)];

    let mut store = Storage::from_cplx_vec(data.clone());
    do_task(&mut Task::TakeReal, &mut store).unwrap();
    assert_eq!(store, Storage::from_real_vec(vec![1.0, -2.0]));

    let mut store = Storage::from_cplx_vec(data);
    do_task(&mut Task::TakeImag, &mut store).unwrap();
    assert_eq!(store, Storage::from_real_vec(vec![4.0, 5.0]));
}

#[test]
fn test_sum_els() {
    let mut store = Storage::from_real_vec(vec![1.0, 2.0, 3.0]);
    let s = do_task(&mut Task::SumEls, &mut store).unwrap();
    assert_eq!(s.cplx(), Some(c64::new(6.0, 0.0)));

    let mut empty = Storage::real_zeros(0);
    let s = do_task(&mut Task::SumEls, &mut empty).unwrap();
    assert_eq!(s.cplx(), Some(c64::new(0.0, 0.0)));

    let mut cplx = Storage::from_cplx_vec(vec![c64::new(1.0, 1.0), c64::new(1.0, -3.0)]);
    let s = do_task(&mut Task::SumEls, &mut cplx).unwrap();
    assert_eq!(s.cplx(), Some(c64::new(2.0, -2.0)));
}

#[test]
fn test_print() {
    let is = index_set(&[2, 2]);
    let config = PrintConfig {
        precision: 1,
        ..PrintConfig::default()
    };
    let mut store = Storage::from_real_vec(vec![0.0, 3.0, 4.0, 0.0]);

    let mut out = String::new();
    do_task(
        &mut Task::Print(PrintIt::new(&is, &config, &mut out)),
        &mut store,
    )
    .unwrap();
    assert_eq!(out, "Dense Real {norm=5.00}\n(2,1) 3.0\n(1,2) 4.0\n");

    do_task(&mut Task::MultCplx(Mult { value: c64::new(0.0, 1.0) }), &mut store).unwrap();
    let mut out = String::new();
    let mut print = PrintIt::new(&is, &config, &mut out);
    print.scalefac = 2.0;
    do_task(&mut Task::Print(print), &mut store).unwrap();
    assert_eq!(out, "Dense Cplx {norm=5.00}\n(2,1) 0.0+6.0i\n(1,2) 0.0+8.0i\n");
}

#[test]
fn test_write_read_roundtrip() {
    let mut rng = StdRng::seed_from_u64(3);
    let real: Storage = Dense::<f64>::randn_with_rng(5, &mut rng).into();
    let cplx: Storage = Dense::<c64>::randn_with_rng(4, &mut rng).into();

    let mut writer = BinaryWriter::new(Vec::new());
    for store in [&real, &cplx] {
        let mut store = store.clone();
        do_task(&mut Task::Write(WriteIt { out: &mut writer }), &mut store).unwrap();
    }
    let bytes = writer.into_inner();
    assert_eq!(bytes.len(), (1 + 8 + 5 * 8) + (1 + 8 + 4 * 16));

    let mut input = bytes.as_slice();
    assert_eq!(read_storage(&mut input).unwrap(), real);
    assert_eq!(read_storage(&mut input).unwrap(), cplx);
    assert!(input.is_empty());
}
