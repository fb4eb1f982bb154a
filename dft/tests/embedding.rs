use dft::{Complex64, ComplexTransformContext};
use itertools::izip;
use sampling::Source;

const EPS: f64 = 1e-9;

fn random_values(source: &mut Source, n: usize) -> Vec<Complex64> {
    izip!(source.reals(n, -1.0, 1.0), source.reals(n, -1.0, 1.0))
        .map(|(re, im)| Complex64::new(re, im))
        .collect()
}

fn max_err(a: &[Complex64], b: &[Complex64]) -> f64 {
    izip!(a, b).map(|(a, b)| (a - b).norm()).fold(0.0, f64::max)
}

#[test]
fn fft_roundtrip_random() {
    let mut source: Source = Source::new([4u8; 32]);
    for log_m in 2..14 {
        let ctx: ComplexTransformContext = ComplexTransformContext::new(1 << log_m).unwrap();
        let v: Vec<Complex64> = random_values(&mut source, ctx.slots());
        let w: Vec<Complex64> = ctx.fft_inv(&ctx.fft_fwd(&v).unwrap()).unwrap();
        assert!(max_err(&v, &w) < EPS, "M={}", 1 << log_m);
    }
}

#[test]
fn emb_roundtrip_random() {
    let mut source: Source = Source::new([5u8; 32]);
    for log_m in 2..14 {
        let ctx: ComplexTransformContext = ComplexTransformContext::new(1 << log_m).unwrap();
        let v: Vec<Complex64> = random_values(&mut source, ctx.slots());
        let w: Vec<Complex64> = ctx.emb_inv(&ctx.emb(&v).unwrap()).unwrap();
        assert!(max_err(&v, &w) < EPS, "M={}", 1 << log_m);
    }
}

#[test]
fn emb_is_linear() {
    let mut source: Source = Source::new([6u8; 32]);
    let ctx: ComplexTransformContext = ComplexTransformContext::new(256).unwrap();
    let a: Vec<Complex64> = random_values(&mut source, ctx.slots());
    let b: Vec<Complex64> = random_values(&mut source, ctx.slots());
    let s: Complex64 = Complex64::new(0.5, -2.0);
    let lhs: Vec<Complex64> = ctx
        .emb(&izip!(&a, &b).map(|(a, b)| a + s * b).collect::<Vec<_>>())
        .unwrap();
    let rhs: Vec<Complex64> = izip!(ctx.emb(&a).unwrap(), ctx.emb(&b).unwrap())
        .map(|(a, b)| a + s * b)
        .collect();
    assert!(max_err(&lhs, &rhs) < EPS);
}

#[test]
fn fft_with_explicit_table_matches_stage_doubling() {
    let mut source: Source = Source::new([7u8; 32]);
    let ctx: ComplexTransformContext = ComplexTransformContext::new(512).unwrap();
    let n: usize = ctx.slots();
    let v: Vec<Complex64> = random_values(&mut source, n);

    let fwd_table: Vec<Complex64> = (0..n).map(|k| ctx.roots()[2 * k]).collect();
    let inv_table: Vec<Complex64> = (0..n).map(|k| ctx.roots()[ctx.length() - 2 * k]).collect();

    assert!(max_err(&ctx.fft(&v, &fwd_table).unwrap(), &ctx.fft_fwd(&v).unwrap()) < EPS);

    let back: Vec<Complex64> = ctx
        .fft(&ctx.fft_fwd(&v).unwrap(), &inv_table)
        .unwrap()
        .iter()
        .map(|x| x / n as f64)
        .collect();
    assert!(max_err(&back, &v) < EPS);
}

#[test]
fn every_transform_checks_its_input() {
    let ctx: ComplexTransformContext = ComplexTransformContext::new(64).unwrap();
    let short: Vec<Complex64> = vec![Complex64::new(1.0, 0.0); 15];
    assert!(ctx.check_input(&short).is_err());
    assert!(ctx.fft(&short, &short).is_err());
    assert!(ctx.fft_fwd(&short).is_err());
    assert!(ctx.fft_inv(&short).is_err());
    assert!(ctx.emb(&short).is_err());
    assert!(ctx.emb_inv(&short).is_err());
}
