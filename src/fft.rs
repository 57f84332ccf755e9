//! Iterative radix-2 Cooley-Tukey transform.
//!
//! The transform uses twiddles `e^{+2 pi i x / size}`, i.e. the unnormalized
//! synthesis direction that takes the ocean spectrum to the spatial domain.
//! One routine serves both passes of the separable 2D transform: it reads and
//! writes N samples addressed as `index * stride + offset`, so a row is
//! `(stride 1, offset row * N)` and a column is `(stride N, offset col)` and no
//! transpose is ever needed.

use crate::complex::{self, ComplexSample};
use crate::error::Result;
use crate::grid::Grid;

/// N samples of a flat N x N buffer, addressed as `index * stride + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StridedView {
    pub stride: usize,
    pub offset: usize,
}

impl StridedView {
    pub fn contiguous() -> Self {
        Self { stride: 1, offset: 0 }
    }

    pub fn row(row: usize, n: usize) -> Self {
        Self {
            stride: 1,
            offset: row * n,
        }
    }

    pub fn column(column: usize, n: usize) -> Self {
        Self {
            stride: n,
            offset: column,
        }
    }

    #[inline]
    pub fn index(&self, i: usize) -> usize {
        i * self.stride + self.offset
    }
}

/// Ping-pong buffers for one worker; reused across every row and column pass.
#[derive(Debug, Clone)]
pub struct FftScratch {
    buffers: [Vec<ComplexSample>; 2],
}

impl FftScratch {
    pub fn new(n: usize) -> Self {
        Self {
            buffers: [vec![complex::ZERO; n], vec![complex::ZERO; n]],
        }
    }

    fn len(&self) -> usize {
        self.buffers[0].len()
    }
}

/// Bit-reversal permutation and twiddle factors for one transform size.
///
/// Read-only after construction and shared by all workers.
#[derive(Debug, Clone)]
pub struct FftTables {
    n: usize,
    log2n: u32,
    bit_reversal: Vec<usize>,
    // Pass p occupies [2^p - 1, 2^(p+1) - 1): 2^p twiddles e^{2 pi i x / 2^(p+1)}.
    twiddles: Vec<ComplexSample>,
}

impl FftTables {
    pub fn new(n: usize) -> Result<Self> {
        let grid = Grid::new(n, 1.0)?;
        Ok(Self::for_grid(&grid))
    }

    pub fn for_grid(grid: &Grid) -> Self {
        let n = grid.size();
        let log2n = grid.log2_size();

        let bit_reversal = (0..n).map(|i| reverse_bits(i, log2n)).collect();

        let mut twiddles = Vec::with_capacity(n - 1);
        for pass in 0..log2n {
            let half = 1usize << pass;
            let size = (half * 2) as f64;
            for x in 0..half {
                twiddles.push(complex::cis(std::f64::consts::TAU * x as f64 / size));
            }
        }

        log::debug!("fft tables ready: n={}, {} twiddles", n, twiddles.len());

        Self {
            n,
            log2n,
            bit_reversal,
            twiddles,
        }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn passes(&self) -> u32 {
        self.log2n
    }

    pub fn bit_reversal(&self) -> &[usize] {
        &self.bit_reversal
    }

    /// Twiddles used by butterfly pass `pass` (0-based).
    pub fn pass_twiddles(&self, pass: u32) -> &[ComplexSample] {
        let start = (1usize << pass) - 1;
        &self.twiddles[start..start * 2 + 1]
    }

    #[inline]
    pub fn twiddle(&self, pass: u32, k: usize) -> ComplexSample {
        self.twiddles[(1usize << pass) - 1 + k]
    }

    /// Transforms the samples of `input` selected by `view` into the same slots of `output`.
    pub fn transform(
        &self,
        input: &[ComplexSample],
        output: &mut [ComplexSample],
        view: StridedView,
        scratch: &mut FftScratch,
    ) {
        self.gather(input, view, scratch);
        let result = self.butterflies(scratch);
        self.scatter(result, output, view, scratch);
    }

    /// In-place variant of [`FftTables::transform`]; the view is read fully before it is written.
    pub fn transform_in_place(&self, data: &mut [ComplexSample], view: StridedView, scratch: &mut FftScratch) {
        self.gather(data, view, scratch);
        let result = self.butterflies(scratch);
        self.scatter(result, data, view, scratch);
    }

    /// Separable 2D transform of an N x N row-major field: every row, then every column.
    pub fn transform_2d(&self, field: &mut [ComplexSample], scratch: &mut FftScratch) {
        debug_assert_eq!(field.len(), self.n * self.n);
        for row in 0..self.n {
            self.transform_in_place(field, StridedView::row(row, self.n), scratch);
        }
        for column in 0..self.n {
            self.transform_in_place(field, StridedView::column(column, self.n), scratch);
        }
    }

    fn gather(&self, input: &[ComplexSample], view: StridedView, scratch: &mut FftScratch) {
        debug_assert_eq!(scratch.len(), self.n);
        for (slot, &source) in scratch.buffers[0].iter_mut().zip(&self.bit_reversal) {
            *slot = input[view.index(source)];
        }
    }

    /// Runs every butterfly pass, returning which scratch buffer holds the result.
    fn butterflies(&self, scratch: &mut FftScratch) -> usize {
        let mut which = 0;
        let mut loops = self.n >> 1;
        let mut size = 2;
        let mut size_over_2 = 1;

        for pass in 0..self.log2n {
            let twiddles = self.pass_twiddles(pass);
            let [first, second] = &mut scratch.buffers;
            let (src, dst) = if which == 0 {
                (&*first, second)
            } else {
                (&*second, first)
            };

            for j in 0..loops {
                let base = size * j;
                for k in 0..size_over_2 {
                    let even = src[base + k];
                    let odd = src[base + size_over_2 + k] * twiddles[k];
                    dst[base + k] = even + odd;
                    dst[base + size_over_2 + k] = even - odd;
                }
            }

            which ^= 1;
            loops >>= 1;
            size <<= 1;
            size_over_2 <<= 1;
        }

        which
    }

    fn scatter(&self, which: usize, output: &mut [ComplexSample], view: StridedView, scratch: &FftScratch) {
        for (i, &value) in scratch.buffers[which].iter().enumerate() {
            output[view.index(i)] = value;
        }
    }
}

fn reverse_bits(value: usize, bits: u32) -> usize {
    let mut reversed = 0;
    for bit in 0..bits {
        reversed = (reversed << 1) | ((value >> bit) & 1);
    }
    reversed
}
