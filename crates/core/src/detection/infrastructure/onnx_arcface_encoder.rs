//! ArcFace face encoder using ONNX Runtime.
//!
//! Each face is cut as a square around its box, resized to 112×112 and
//! embedded. The result is L2-normalized and then scaled by
//! [`EMBEDDING_SCALE`], which puts ArcFace's same-person boundary (cosine
//! similarity 0.4) at Euclidean distance 0.6, the default clustering
//! threshold.

use std::path::Path;

use super::onnx_session::build_session;
use crate::detection::domain::face_encoder::FaceEncoder;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::embedding::Embedding;
use crate::shared::frame::Frame;

const INPUT_SIZE: usize = 112;
const NORM_MEAN: f32 = 127.5;
const NORM_STD: f32 = 127.5;

/// `0.6 / sqrt(1.2)`. Unit vectors at cosine `c` lie `sqrt(2 - 2c)` apart,
/// so cosine 0.4 maps to distance 0.6 and every distance tops out near 1.1.
pub const EMBEDDING_SCALE: f32 = 0.547_722_6;

/// Jitter shift step as a fraction of the crop side.
const JITTER_SHIFT_RATIO: f64 = 0.04;

pub struct OnnxArcFaceEncoder {
    session: ort::session::Session,
    num_jitters: usize,
}

impl OnnxArcFaceEncoder {
    /// `num_jitters` re-samples are averaged per face; 1 disables jitter.
    pub fn new(model_path: &Path, num_jitters: usize) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            session: build_session(model_path)?,
            num_jitters: num_jitters.max(1),
        })
    }

    fn embed_crop(&mut self, crop: &Crop) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
        let tensor = preprocess(&crop.data, crop.width, crop.height);
        let input_value = ort::value::Tensor::from_array(tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        let embedding_array = outputs[0].try_extract_array::<f32>()?;
        let embedding_slice = embedding_array
            .as_slice()
            .ok_or("Cannot get embedding slice")?;
        Ok(embedding_slice.to_vec())
    }

    fn embed_face(
        &mut self,
        frame: &Frame,
        bbox: &BoundingBox,
    ) -> Result<Embedding, Box<dyn std::error::Error>> {
        let mut sum: Vec<f32> = Vec::new();
        for k in 0..self.num_jitters {
            let jitter = Jitter::nth(k);
            let crop = square_crop(frame, bbox, jitter)
                .ok_or_else(|| format!("Face box {bbox:?} lies outside the photo"))?;
            let mut values = self.embed_crop(&crop)?;
            l2_normalize(&mut values);
            if sum.is_empty() {
                sum = values;
            } else {
                for (s, v) in sum.iter_mut().zip(values.iter()) {
                    *s += v;
                }
            }
        }
        Ok(finish_embedding(sum))
    }
}

impl FaceEncoder for OnnxArcFaceEncoder {
    fn encode(
        &mut self,
        frame: &Frame,
        boxes: &[BoundingBox],
    ) -> Result<Vec<Embedding>, Box<dyn std::error::Error>> {
        boxes.iter().map(|b| self.embed_face(frame, b)).collect()
    }
}

/// Deterministic re-sample: the first is the plain crop, odd ones are
/// mirrored, and every pair moves the window further out, alternating
/// direction.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Jitter {
    shift_steps: i32,
    mirror: bool,
}

impl Jitter {
    fn nth(k: usize) -> Self {
        let ring = (k / 2) as i32;
        let direction = if ring % 2 == 1 { 1 } else { -1 };
        Self {
            shift_steps: direction * ((ring + 1) / 2),
            mirror: k % 2 == 1,
        }
    }
}

struct Crop {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

/// Square RGB crop centered on the box, shifted by the jitter and clamped
/// to the frame. `None` when nothing of the box is inside the frame.
fn square_crop(frame: &Frame, bbox: &BoundingBox, jitter: Jitter) -> Option<Crop> {
    let fw = frame.width() as i64;
    let fh = frame.height() as i64;
    let side = bbox.width().max(bbox.height());
    if side == 0 {
        return None;
    }

    let step = (side as f64 * JITTER_SHIFT_RATIO).round().max(1.0) as i64;
    let shift = step * jitter.shift_steps as i64;
    let cx = (bbox.left as i64 + bbox.right as i64) / 2 + shift;
    let cy = (bbox.top as i64 + bbox.bottom as i64) / 2 + shift;
    let half = (side / 2).max(1);

    let x1 = (cx - half).max(0);
    let y1 = (cy - half).max(0);
    let x2 = (cx + half).min(fw);
    let y2 = (cy + half).min(fh);
    if x2 <= x1 || y2 <= y1 {
        return None;
    }

    let channels = frame.channels() as usize;
    let src = frame.data();
    let crop_w = (x2 - x1) as usize;
    let crop_h = (y2 - y1) as usize;
    let mut data = Vec::with_capacity(crop_w * crop_h * 3);

    for row in y1 as usize..y2 as usize {
        for i in 0..crop_w {
            let col = if jitter.mirror {
                x2 as usize - 1 - i
            } else {
                x1 as usize + i
            };
            let offset = (row * fw as usize + col) * channels;
            for c in 0..3 {
                data.push(src[offset + c.min(channels - 1)]);
            }
        }
    }

    Some(Crop {
        data,
        width: crop_w as u32,
        height: crop_h as u32,
    })
}

/// Resize crop to 112x112, normalize, NCHW layout.
fn preprocess(rgb_data: &[u8], width: u32, height: u32) -> ndarray::Array4<f32> {
    let src_w = width as usize;
    let src_h = height as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, INPUT_SIZE, INPUT_SIZE));

    for y in 0..INPUT_SIZE {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / INPUT_SIZE as f64) as usize).min(src_h - 1);
        for x in 0..INPUT_SIZE {
            let src_x =
                (((x as f64 + 0.5) * src_w as f64 / INPUT_SIZE as f64) as usize).min(src_w - 1);
            let offset = (src_y * src_w + src_x) * 3;
            if offset + 2 < rgb_data.len() {
                for c in 0..3 {
                    tensor[[0, c, y, x]] = (rgb_data[offset + c] as f32 - NORM_MEAN) / NORM_STD;
                }
            }
        }
    }

    tensor
}

/// Normalizes and rescales a raw (or averaged) model output.
fn finish_embedding(mut values: Vec<f32>) -> Embedding {
    l2_normalize(&mut values);
    for v in values.iter_mut() {
        *v *= EMBEDDING_SCALE;
    }
    Embedding::new(values)
}

pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
