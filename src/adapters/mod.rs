// Adapters layer: concrete implementations for external systems (storage, http).

pub mod openai;
pub mod storage;
