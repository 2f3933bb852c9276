use serde::Serialize;

/// Options handed to `AOS.init`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScrollRevealOptions {
    pub duration: u32,
    pub easing: &'static str,
    pub once: bool,
    pub offset: u32,
}

impl Default for ScrollRevealOptions {
    fn default() -> Self {
        Self {
            duration: 800,
            easing: "ease-out-cubic",
            once: true,
            offset: 100,
        }
    }
}

impl ScrollRevealOptions {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
