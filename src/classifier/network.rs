//! Small feed-forward network
//!
//! Dense layers with ReLU on hidden layers and softmax on the output,
//! trained with categorical cross-entropy and Adam. Inputs are sparse count
//! vectors; hidden activations are passed on as sparse vectors too, since
//! ReLU zeroes a large share of them.

use rand::rngs::StdRng;
use rand::Rng;

use super::vectorizer::SparseVector;

const ADAM_BETA1: f64 = 0.9;
const ADAM_BETA2: f64 = 0.999;
const ADAM_EPSILON: f64 = 1e-7;
const PROBABILITY_FLOOR: f64 = 1e-12;

/// Fully connected layer, weights stored row-major as `[input][output]`
#[derive(Debug, Clone)]
struct Dense {
    inputs: usize,
    outputs: usize,
    weights: Vec<f64>,
    bias: Vec<f64>,
}

impl Dense {
    /// Glorot-uniform weights, zero bias
    fn glorot(inputs: usize, outputs: usize, rng: &mut StdRng) -> Self {
        let limit = (6.0 / (inputs + outputs).max(1) as f64).sqrt();
        let weights = (0..inputs * outputs)
            .map(|_| rng.gen_range(-limit..limit))
            .collect();
        Self {
            inputs,
            outputs,
            weights,
            bias: vec![0.0; outputs],
        }
    }

    fn row(&self, input: usize) -> &[f64] {
        &self.weights[input * self.outputs..(input + 1) * self.outputs]
    }

    /// Pre-activation `b + x W`
    fn forward(&self, input: &[(usize, f64)]) -> Vec<f64> {
        let mut z = self.bias.clone();
        for &(i, x) in input {
            if i >= self.inputs {
                continue;
            }
            for (zj, w) in z.iter_mut().zip(self.row(i)) {
                *zj += x * w;
            }
        }
        z
    }
}

/// Per-parameter buffers shaped like a network's layers
#[derive(Debug, Clone)]
pub(crate) struct Gradients {
    weights: Vec<Vec<f64>>,
    bias: Vec<Vec<f64>>,
}

impl Gradients {
    fn zeros_like(network: &FeedForward) -> Self {
        Self {
            weights: network
                .layers
                .iter()
                .map(|l| vec![0.0; l.weights.len()])
                .collect(),
            bias: network.layers.iter().map(|l| vec![0.0; l.outputs]).collect(),
        }
    }

    pub(crate) fn reset(&mut self) {
        for buf in self.weights.iter_mut().chain(self.bias.iter_mut()) {
            buf.iter_mut().for_each(|g| *g = 0.0);
        }
    }
}

struct Trace {
    /// Input of each layer
    inputs: Vec<SparseVector>,
    /// Pre-activation of each layer
    pre: Vec<Vec<f64>>,
    output: Vec<f64>,
}

/// Multi-layer perceptron producing a probability distribution
#[derive(Debug, Clone)]
pub struct FeedForward {
    layers: Vec<Dense>,
}

impl FeedForward {
    pub fn new(inputs: usize, hidden: &[usize], outputs: usize, rng: &mut StdRng) -> Self {
        let mut layers = Vec::with_capacity(hidden.len() + 1);
        let mut width = inputs;
        for &h in hidden.iter().chain(std::iter::once(&outputs)) {
            layers.push(Dense::glorot(width, h, rng));
            width = h;
        }
        Self { layers }
    }

    pub fn num_inputs(&self) -> usize {
        self.layers.first().map_or(0, |l| l.inputs)
    }

    pub fn num_outputs(&self) -> usize {
        self.layers.last().map_or(0, |l| l.outputs)
    }

    /// Class probabilities for `input`
    pub fn predict(&self, input: &[(usize, f64)]) -> Vec<f64> {
        self.trace(input).output
    }

    fn trace(&self, input: &[(usize, f64)]) -> Trace {
        let last = self.layers.len().saturating_sub(1);
        let mut inputs = Vec::with_capacity(self.layers.len());
        let mut pre = Vec::with_capacity(self.layers.len());
        let mut current: SparseVector = input.to_vec();

        for (l, layer) in self.layers.iter().enumerate() {
            let z = layer.forward(&current);
            inputs.push(std::mem::take(&mut current));
            if l < last {
                current = z
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| **v > 0.0)
                    .map(|(i, v)| (i, *v))
                    .collect();
            }
            pre.push(z);
        }

        let output = pre.last().map(|z| softmax(z)).unwrap_or_default();
        Trace {
            inputs,
            pre,
            output,
        }
    }

    /// Accumulate the cross-entropy gradient for one sample into `grads`,
    /// returning the sample loss.
    pub(crate) fn accumulate(
        &self,
        input: &[(usize, f64)],
        target: usize,
        grads: &mut Gradients,
    ) -> f64 {
        let trace = self.trace(input);
        let loss = -trace
            .output
            .get(target)
            .copied()
            .unwrap_or(0.0)
            .max(PROBABILITY_FLOOR)
            .ln();

        // softmax + cross-entropy: dL/dz = p - y
        let mut delta = trace.output.clone();
        if let Some(d) = delta.get_mut(target) {
            *d -= 1.0;
        }

        for l in (0..self.layers.len()).rev() {
            let layer = &self.layers[l];
            let gw = &mut grads.weights[l];
            for &(i, x) in &trace.inputs[l] {
                let row = &mut gw[i * layer.outputs..(i + 1) * layer.outputs];
                for (g, d) in row.iter_mut().zip(&delta) {
                    *g += x * d;
                }
            }
            for (g, d) in grads.bias[l].iter_mut().zip(&delta) {
                *g += d;
            }

            if l > 0 {
                let below = &trace.pre[l - 1];
                delta = (0..layer.inputs)
                    .map(|i| {
                        if below[i] > 0.0 {
                            layer.row(i).iter().zip(&delta).map(|(w, d)| w * d).sum::<f64>()
                        } else {
                            0.0
                        }
                    })
                    .collect();
            }
        }

        loss
    }
}

/// Adam optimizer state
#[derive(Debug, Clone)]
pub(crate) struct Adam {
    learning_rate: f64,
    step: i32,
    m: Gradients,
    v: Gradients,
}

impl Adam {
    pub(crate) fn new(network: &FeedForward, learning_rate: f64) -> Self {
        Self {
            learning_rate,
            step: 0,
            m: Gradients::zeros_like(network),
            v: Gradients::zeros_like(network),
        }
    }

    pub(crate) fn gradients(&self) -> Gradients {
        let mut g = self.m.clone();
        g.reset();
        g
    }

    /// Apply the mean of `grads` over `batch_size` samples
    pub(crate) fn apply(&mut self, network: &mut FeedForward, grads: &Gradients, batch_size: usize) {
        if batch_size == 0 {
            return;
        }
        self.step += 1;
        let t = self.step;
        let lr = self.learning_rate * (1.0 - ADAM_BETA2.powi(t)).sqrt() / (1.0 - ADAM_BETA1.powi(t));
        let scale = 1.0 / batch_size as f64;

        for (l, layer) in network.layers.iter_mut().enumerate() {
            update(
                &mut layer.weights,
                &grads.weights[l],
                &mut self.m.weights[l],
                &mut self.v.weights[l],
                lr,
                scale,
            );
            update(
                &mut layer.bias,
                &grads.bias[l],
                &mut self.m.bias[l],
                &mut self.v.bias[l],
                lr,
                scale,
            );
        }
    }
}

fn update(params: &mut [f64], grads: &[f64], m: &mut [f64], v: &mut [f64], lr: f64, scale: f64) {
    for (((p, g), m), v) in params.iter_mut().zip(grads).zip(m.iter_mut()).zip(v.iter_mut()) {
        let g = g * scale;
        *m = ADAM_BETA1 * *m + (1.0 - ADAM_BETA1) * g;
        *v = ADAM_BETA2 * *v + (1.0 - ADAM_BETA2) * g * g;
        *p -= lr * *m / (v.sqrt() + ADAM_EPSILON);
    }
}

/// Numerically stable softmax
pub fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = z.iter().map(|v| (v - max).exp()).collect();
    let sum: f64 = exp.iter().sum();
    exp.into_iter().map(|e| e / sum).collect()
}

/// Index of the largest value; the first one wins ties, NaN never wins.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
