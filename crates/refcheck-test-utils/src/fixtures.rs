//! Reusable kernel fixtures.
//!
//! Three toy kernels for driving checker scenarios:
//!
//! - [`ScaleKernel`]: multiplies every input by a constant.
//! - [`ConstKernel`]: ignores its input and writes a constant.
//! - [`PerturbedKernel`]: wraps another kernel and corrupts one element.

/// A named computation from an f32 input to an f32 output of equal length.
pub trait Kernel {
    fn name(&self) -> &str;

    fn run(&self, input: &[f32]) -> Vec<f32>;
}

/// Multiplies every element by `factor`.
pub struct ScaleKernel {
    pub name: String,
    pub factor: f32,
}

impl ScaleKernel {
    pub fn new(name: impl Into<String>, factor: f32) -> Self {
        Self {
            name: name.into(),
            factor,
        }
    }
}

impl Kernel for ScaleKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: &[f32]) -> Vec<f32> {
        input.iter().map(|&x| x * self.factor).collect()
    }
}

/// Writes `value` to every output element.
pub struct ConstKernel {
    pub name: String,
    pub value: f32,
}

impl ConstKernel {
    pub fn new(name: impl Into<String>, value: f32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl Kernel for ConstKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: &[f32]) -> Vec<f32> {
        vec![self.value; input.len()]
    }
}

/// Runs `inner`, then adds `delta` to the element at `index`.
///
/// Out-of-range indices leave the output untouched.
pub struct PerturbedKernel {
    pub name: String,
    pub inner: Box<dyn Kernel>,
    pub index: usize,
    pub delta: f32,
}

impl PerturbedKernel {
    pub fn new(name: impl Into<String>, inner: Box<dyn Kernel>, index: usize, delta: f32) -> Self {
        Self {
            name: name.into(),
            inner,
            index,
            delta,
        }
    }
}

impl Kernel for PerturbedKernel {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: &[f32]) -> Vec<f32> {
        let mut out = self.inner.run(input);
        if let Some(v) = out.get_mut(self.index) {
            *v += self.delta;
        }
        out
    }
}
