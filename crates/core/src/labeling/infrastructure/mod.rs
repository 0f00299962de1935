pub mod json_label_store;
pub mod stdin_label_prompt;
