/// Appearance vector for one face, compared only by Euclidean distance.
///
/// The reference encoders emit 128 values (dlib) or 512 (ArcFace); any
/// length works as long as the vectors being compared agree.
#[derive(Clone, Debug, PartialEq)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Euclidean distance, accumulated in `f64`.
    ///
    /// Callers must compare equal-length vectors; extra trailing values
    /// of the longer vector are ignored.
    pub fn euclidean_distance(&self, other: &Embedding) -> f64 {
        debug_assert_eq!(self.dim(), other.dim(), "embedding dimensions differ");
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| {
                let d = *a as f64 - *b as f64;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}
