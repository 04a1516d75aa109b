use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use season_recap_core::{
    Config, Inputs, PageFrame, RecapPage, RevealPhase, SeasonDataset, VisibilityTarget,
};

#[wasm_bindgen]
pub struct SeasonRecap {
    core: RecapPage,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn phase_name(phase: RevealPhase) -> String {
    match phase {
        RevealPhase::Closed => "closed",
        RevealPhase::Wrapped => "wrapped",
        RevealPhase::Revealed => "revealed",
    }
    .to_string()
}

/// Parse a config object, seeding the particle generator from `Math.random`
/// when the host did not pin a seed.
fn parse_config(config: JsValue) -> Result<Config, JsError> {
    if jsvalue_is_undefined_or_null(&config) {
        return Ok(Config {
            seed: random_seed(),
            ..Config::default()
        });
    }
    let has_seed = js_sys::Reflect::has(&config, &JsValue::from_str("seed")).unwrap_or(false);
    let mut cfg: Config =
        swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?;
    if !has_seed {
        cfg.seed = random_seed();
    }
    Ok(cfg)
}

fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}

#[wasm_bindgen]
impl SeasonRecap {
    /// Create a page. `config` is an optional partial Config object; `dataset`
    /// is an optional dataset object and defaults to the compiled-in season.
    /// Example:
    ///   new SeasonRecap({ reveal_delay_ms: 1500 }, undefined)
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, dataset: JsValue) -> Result<SeasonRecap, JsError> {
        console_error_panic_hook::set_once();

        let cfg = parse_config(config)?;
        let data: SeasonDataset = if jsvalue_is_undefined_or_null(&dataset) {
            SeasonDataset::fckt_2025()
        } else {
            swb::from_value(dataset).map_err(|e| JsError::new(&format!("dataset error: {e}")))?
        };
        let core = RecapPage::new(cfg, data).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(SeasonRecap { core })
    }

    /// Step the page by `dt_ms` (milliseconds since the previous animation
    /// frame) with an optional Inputs object. Returns the PageFrame.
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f64, inputs_json: JsValue) -> Result<JsValue, JsError> {
        let inputs: Inputs = if jsvalue_is_undefined_or_null(&inputs_json) {
            Inputs::default()
        } else {
            swb::from_value(inputs_json).map_err(|e| JsError::new(&format!("inputs error: {e}")))?
        };
        let out: &PageFrame = self.core.update(dt_ms, inputs);
        swb::to_value(out).map_err(|e| JsError::new(&format!("frame error: {e}")))
    }

    /// Award card click. Returns the resulting phase name.
    #[wasm_bindgen(js_name = open_award)]
    pub fn open_award(&mut self, index: usize) -> String {
        phase_name(self.core.open_award(index))
    }

    #[wasm_bindgen(js_name = open_attendance_king)]
    pub fn open_attendance_king(&mut self) -> String {
        phase_name(self.core.open_attendance_king())
    }

    #[wasm_bindgen]
    pub fn close(&mut self) -> String {
        phase_name(self.core.close())
    }

    /// Intersection report. `target` is `{ type: "counter", id }` or
    /// `{ type: "section", section }`.
    #[wasm_bindgen(js_name = set_visible)]
    pub fn set_visible(&mut self, target: JsValue, visible: bool) -> Result<(), JsError> {
        let target: VisibilityTarget =
            swb::from_value(target).map_err(|e| JsError::new(&format!("target error: {e}")))?;
        self.core.set_visible(target, visible);
        Ok(())
    }

    /// Cancel every pending timer and frame. Call from the host's teardown.
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.core.dispose();
    }

    /// The dataset in use, as a JS object.
    #[wasm_bindgen]
    pub fn dataset(&self) -> Result<JsValue, JsError> {
        swb::to_value(self.core.dataset()).map_err(|e| JsError::new(&format!("dataset error: {e}")))
    }

    /// Teaser cards for the awards grid.
    #[wasm_bindgen]
    pub fn cards(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.cards()).map_err(|e| JsError::new(&format!("cards error: {e}")))
    }

    /// Last frame without stepping.
    #[wasm_bindgen]
    pub fn frame(&self) -> Result<JsValue, JsError> {
        swb::to_value(self.core.frame()).map_err(|e| JsError::new(&format!("frame error: {e}")))
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
