pub mod openai;

use std::sync::Arc;

use anyhow::Result;

use crate::domain::models::BackendBox;

pub struct BackendManager {}

impl BackendManager {
    pub fn get() -> Result<BackendBox> {
        return Ok(Arc::new(openai::OpenAI::default()));
    }
}
