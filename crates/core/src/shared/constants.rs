pub const YOLO_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const YOLO_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

pub const EMBEDDING_MODEL_NAME: &str = "w600k_r50.onnx";
pub const EMBEDDING_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/w600k_r50.onnx";

/// Lowercase, without the leading dot.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

pub const DEFAULT_UNKNOWN_LABEL: &str = "unknown";
pub const DEFAULT_LABELS_FILE: &str = "face_labels.json";
pub const DEFAULT_OUTPUT_DIR: &str = "organized";

/// Prefix of names generated for clusters nobody named.
pub const AUTO_LABEL_PREFIX: &str = "person_";

/// Sample photos listed when asking the user to name a cluster.
pub const MAX_PROMPT_SAMPLES: usize = 5;

/// Directory name used when a label has no usable characters.
pub const UNNAMED_DIR: &str = "unnamed";

/// Generated name for a cluster with no stored or chosen label.
pub fn auto_label(cluster_index: usize) -> String {
    format!("{AUTO_LABEL_PREFIX}{cluster_index}")
}
