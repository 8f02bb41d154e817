//! Zero-phase Butterworth low-pass filter.
//!
//! Each spoken phrase is passed through a 5th-order digital Butterworth
//! low-pass (bilinear transform of the analog prototype) applied forward and
//! then backward, which doubles the attenuation and cancels the phase shift.
//! The signal is extended at both ends by odd reflection and the filter state
//! is primed to its step-response steady state so the edges do not ring.

use std::f64::consts::PI;

use rustfft::num_complex::Complex64;

use crate::error::{AudioError, AudioResult, Stage};

/// Filter order.
pub const ORDER: usize = 5;

/// Edge extension, in multiples of the coefficient count.
const PAD_FACTOR: usize = 3;

/// Digital Butterworth low-pass coefficients, normalized so `a[0] == 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Butterworth {
    /// Numerator (feed-forward) coefficients.
    pub b: [f64; ORDER + 1],
    /// Denominator (feedback) coefficients.
    pub a: [f64; ORDER + 1],
}

impl Butterworth {
    /// Designs a low-pass filter.
    ///
    /// # Arguments
    /// * `cutoff_hz` - -3 dB frequency, must lie strictly between 0 and Nyquist
    /// * `sample_rate` - Sample rate in Hz
    pub fn lowpass(cutoff_hz: f64, sample_rate: f64) -> Self {
        // Normalized frequency designed at fs = 2, so the bilinear constant is 4
        let wn = cutoff_hz / (sample_rate / 2.0);
        let warped = 4.0 * (PI * wn / 2.0).tan();
        let four = Complex64::new(4.0, 0.0);

        let mut poles = [Complex64::new(0.0, 0.0); ORDER];
        let mut denom = Complex64::new(1.0, 0.0);
        for (k, pole) in poles.iter_mut().enumerate() {
            let m = 2 * k as i32 - (ORDER as i32 - 1);
            let theta = PI * m as f64 / (2.0 * ORDER as f64);
            let analog = -Complex64::from_polar(1.0, theta) * warped;
            denom *= four - analog;
            *pole = (four + analog) / (four - analog);
        }

        let gain = warped.powi(ORDER as i32) * (Complex64::new(1.0, 0.0) / denom).re;
        let zeros = [Complex64::new(-1.0, 0.0); ORDER];

        let numer = poly(&zeros);
        let feedback = poly(&poles);

        let mut b = [0.0; ORDER + 1];
        let mut a = [0.0; ORDER + 1];
        for i in 0..=ORDER {
            b[i] = gain * numer[i].re;
            a[i] = feedback[i].re;
        }

        Self { b, a }
    }

    /// Gain at 0 Hz.
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }

    /// Filter state after a unit step has settled.
    fn steady_state(&self) -> [f64; ORDER] {
        let g = self.dc_gain();
        let mut zi = [0.0; ORDER];
        let mut acc = 0.0;
        for i in (0..ORDER).rev() {
            acc += self.b[i + 1] - self.a[i + 1] * g;
            zi[i] = acc;
        }
        zi
    }

    /// Runs the filter once over `signal` in place (transposed direct form II).
    fn run(&self, signal: &mut [f64], mut z: [f64; ORDER]) {
        for sample in signal.iter_mut() {
            let x = *sample;
            let y = self.b[0] * x + z[0];
            for i in 0..ORDER - 1 {
                z[i] = self.b[i + 1] * x + z[i + 1] - self.a[i + 1] * y;
            }
            z[ORDER - 1] = self.b[ORDER] * x - self.a[ORDER] * y;
            *sample = y;
        }
    }

    /// Applies the filter forward and backward.
    ///
    /// The output has the same length as the input. Inputs shorter than the
    /// nominal edge extension are extended by `len - 1` samples instead.
    pub fn filtfilt(&self, x: &[f64]) -> Vec<f64> {
        let n = x.len();
        if n == 0 {
            return Vec::new();
        }

        let padlen = (PAD_FACTOR * (ORDER + 1)).min(n - 1);
        let first = x[0];
        let last = x[n - 1];

        let mut ext = Vec::with_capacity(n + 2 * padlen);
        ext.extend((1..=padlen).rev().map(|i| 2.0 * first - x[i]));
        ext.extend_from_slice(x);
        ext.extend((1..=padlen).map(|i| 2.0 * last - x[n - 1 - i]));

        let zi = self.steady_state();

        let x0 = ext[0];
        self.run(&mut ext, zi.map(|z| z * x0));
        ext.reverse();

        let y0 = ext[0];
        self.run(&mut ext, zi.map(|z| z * y0));
        ext.reverse();

        ext.drain(..padlen);
        ext.truncate(n);
        ext
    }
}

/// Expands roots into monic polynomial coefficients, highest power first.
fn poly(roots: &[Complex64; ORDER]) -> [Complex64; ORDER + 1] {
    let mut coeffs = [Complex64::new(0.0, 0.0); ORDER + 1];
    coeffs[0] = Complex64::new(1.0, 0.0);
    for (i, root) in roots.iter().enumerate() {
        for j in (1..=i + 1).rev() {
            coeffs[j] = coeffs[j] - root * coeffs[j - 1];
        }
    }
    coeffs
}

/// Per-clip low-pass stage.
///
/// Disabled stages pass samples through untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowpassStage {
    filter: Option<Butterworth>,
}

impl LowpassStage {
    /// Builds the stage, rejecting cutoffs outside `(0, Nyquist)`.
    pub fn new(cutoff_hz: Option<f64>, sample_rate: u32) -> AudioResult<Self> {
        let Some(cutoff) = cutoff_hz else {
            return Ok(Self::disabled());
        };

        let nyquist = sample_rate as f64 / 2.0;
        if !cutoff.is_finite() || cutoff <= 0.0 || cutoff >= nyquist {
            return Err(AudioError::invalid_param(
                Stage::Filter,
                "cutoff_hz",
                format!("{cutoff} Hz must be between 0 and Nyquist ({nyquist} Hz)"),
            ));
        }

        Ok(Self {
            filter: Some(Butterworth::lowpass(cutoff, sample_rate as f64)),
        })
    }

    /// A stage that does nothing.
    pub fn disabled() -> Self {
        Self { filter: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.filter.is_some()
    }

    /// Filters one clip.
    ///
    /// Filtered values are truncated toward zero and saturate at the `i16`
    /// range.
    pub fn apply(&self, samples: Vec<i16>) -> Vec<i16> {
        let Some(filter) = &self.filter else {
            return samples;
        };

        let signal: Vec<f64> = samples.iter().map(|&s| s as f64).collect();
        filter
            .filtfilt(&signal)
            .into_iter()
            .map(|s| s as i16)
            .collect()
    }
}
