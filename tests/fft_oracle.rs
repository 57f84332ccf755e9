use num_complex::Complex32;
use ocean_fft::complex::ApproxEq;
use ocean_fft::{FftScratch, FftTables, StridedView};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustfft::FftPlanner;

fn random_signal(len: usize, seed: u64) -> Vec<Complex32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| Complex32::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect()
}

#[test]
fn matches_rustfft_inverse_1d() {
    let mut planner = FftPlanner::<f32>::new();
    for n in [2, 4, 16, 64, 256] {
        let tables = FftTables::new(n).unwrap();
        let mut scratch = FftScratch::new(n);

        let input = random_signal(n, n as u64);
        let mut output = vec![Complex32::new(0.0, 0.0); n];
        tables.transform(&input, &mut output, StridedView::contiguous(), &mut scratch);

        let mut expected = input.clone();
        planner.plan_fft_inverse(n).process(&mut expected);

        let tolerance = 1e-4 * (n as f32).sqrt();
        for (actual, expected) in output.iter().zip(&expected) {
            assert!(actual.approx_eq(expected, tolerance), "n={}: {} != {}", n, actual, expected);
        }
    }
}

#[test]
fn matches_rustfft_inverse_2d() {
    let n = 32;
    let tables = FftTables::new(n).unwrap();
    let mut scratch = FftScratch::new(n);
    let mut field = random_signal(n * n, 77);

    // Reference: rows, then columns through an explicit transpose.
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_inverse(n);
    let mut expected = field.clone();
    for row in expected.chunks_exact_mut(n) {
        fft.process(row);
    }
    let mut transposed: Vec<Complex32> = (0..n * n).map(|idx| expected[(idx % n) * n + idx / n]).collect();
    for column in transposed.chunks_exact_mut(n) {
        fft.process(column);
    }
    let expected: Vec<Complex32> = (0..n * n).map(|idx| transposed[(idx % n) * n + idx / n]).collect();

    tables.transform_2d(&mut field, &mut scratch);

    for (actual, expected) in field.iter().zip(&expected) {
        assert!(actual.approx_eq(expected, 1e-3), "{} != {}", actual, expected);
    }
}

#[test]
fn separate_output_leaves_input_untouched() {
    let n = 8;
    let tables = FftTables::new(n).unwrap();
    let mut scratch = FftScratch::new(n);
    let input = random_signal(n * n, 3);
    let mut output = vec![Complex32::new(0.0, 0.0); n * n];

    tables.transform(&input, &mut output, StridedView::row(5, n), &mut scratch);

    let mut in_place = input.clone();
    tables.transform_in_place(&mut in_place, StridedView::row(5, n), &mut scratch);
    for idx in 0..n * n {
        if idx / n == 5 {
            assert_eq!(output[idx], in_place[idx]);
        } else {
            assert_eq!(output[idx], Complex32::new(0.0, 0.0));
            assert_eq!(in_place[idx], input[idx]);
        }
    }
}
