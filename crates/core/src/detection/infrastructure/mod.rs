pub mod onnx_arcface_encoder;
mod onnx_session;
pub mod onnx_yolo_detector;
