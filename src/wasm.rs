//! WebAssembly bindings for brickify

use wasm_bindgen::prelude::*;
use image::DynamicImage;
use crate::buffer;
use crate::{Converter, LevelDescription, PixelBuffer, ProcessorConfig};

#[wasm_bindgen]
pub struct WasmConverter {
    config: ProcessorConfig,
}

#[wasm_bindgen]
impl WasmConverter {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmConverter {
        WasmConverter { config: ProcessorConfig::default() }
    }

    #[wasm_bindgen]
    pub fn set_grid(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        let config = ProcessorConfig {
            grid_width: width,
            grid_height: height,
            ..self.config.clone()
        };
        config.validate().map_err(to_js)?;
        self.config = config;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_threshold(&mut self, threshold: u8) {
        self.config.threshold = threshold;
    }

    /// Convert raw RGBA pixels into a level and return it as JSON
    #[wasm_bindgen]
    pub fn convert_rgba(
        &self,
        image_data: &[u8],
        width: u32,
        height: u32,
        name: &str,
    ) -> Result<String, JsValue> {
        let img = image::RgbaImage::from_raw(width, height, image_data.to_vec())
            .ok_or_else(|| JsValue::from_str("Invalid image dimensions"))?;
        let buffer = buffer::normalize(DynamicImage::ImageRgba8(img), None, &self.config)
            .map_err(to_js)?;
        self.level_json(&buffer, name)
    }

    /// Decode an encoded image file (PNG, JPEG, ...) and return its level as JSON
    #[wasm_bindgen]
    pub fn convert_encoded(&self, bytes: &[u8], name: &str) -> Result<String, JsValue> {
        let buffer = buffer::load_bytes(bytes, None, &self.config).map_err(to_js)?;
        self.level_json(&buffer, name)
    }

    /// Text preview of a level JSON document
    #[wasm_bindgen]
    pub fn preview(&self, level_json: &str) -> Result<String, JsValue> {
        let level = LevelDescription::from_json(level_json).map_err(to_js)?;
        Ok(level.render_preview())
    }
}

impl WasmConverter {
    fn level_json(&self, buffer: &PixelBuffer, name: &str) -> Result<String, JsValue> {
        let level = Converter::new(self.config.clone()).convert_buffer(buffer, name, "");
        if level.bricks.is_empty() {
            web_sys::console::warn_1(&format!("No bricks generated for {}", name).into());
        }
        level.to_json().map_err(to_js)
    }
}

impl Default for WasmConverter {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js(err: crate::BrickifyError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

#[wasm_bindgen(start)]
pub fn init() {
    // WASM initialization
}
