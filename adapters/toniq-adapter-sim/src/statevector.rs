//! Statevector evolution for QAOA on diagonal cost Hamiltonians.

use num_complex::Complex64;
use rand::Rng;

/// A statevector representing a quantum state.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Create the uniform superposition |+...+⟩.
    pub fn uniform(num_qubits: usize) -> Self {
        let mut sv = Self::new(num_qubits);
        for q in 0..num_qubits {
            sv.apply_h(q);
        }
        sv
    }

    /// Apply a Hadamard gate.
    pub fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    /// Apply RX(theta) to one qubit.
    pub fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let neg_i_s = Complex64::new(0.0, -s);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    /// Apply `exp(-i gamma C)` for a diagonal cost `C` given per basis state.
    pub fn apply_cost_phase(&mut self, costs: &[f64], gamma: f64) {
        for (amp, &cost) in self.amplitudes.iter_mut().zip(costs) {
            *amp *= Complex64::from_polar(1.0, -gamma * cost);
        }
    }

    /// One QAOA layer: cost phase then RX(2 beta) mixer on every qubit.
    pub fn apply_qaoa_layer(&mut self, costs: &[f64], gamma: f64, beta: f64) {
        self.apply_cost_phase(costs, gamma);
        for q in 0..self.num_qubits {
            self.apply_rx(q, 2.0 * beta);
        }
    }

    /// Measurement probabilities of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Expectation value of a diagonal observable.
    pub fn expectation(&self, diagonal: &[f64]) -> f64 {
        self.amplitudes
            .iter()
            .zip(diagonal)
            .map(|(amp, &d)| amp.norm_sqr() * d)
            .sum()
    }
}

/// Sample a basis-state index from `probabilities`.
pub fn sample<R: Rng>(probabilities: &[f64], rng: &mut R) -> usize {
    let r: f64 = rng.r#gen();

    let mut cumulative = 0.0;
    for (i, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if r < cumulative {
            return i;
        }
    }

    // Rounding can leave the cumulative sum just under 1.
    probabilities.len() - 1
}
